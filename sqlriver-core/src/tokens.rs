#[cfg(not(feature = "std"))]
use alloc::string::String;
use core::fmt;

use crate::keywords::Keyword;

/// A half-open byte range into the original source text.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Byte offset of the first byte of the region.
    pub start: usize,
    /// Byte offset one past the last byte of the region.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start/end byte offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn union(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bytes({}..{})", self.start, self.end)
    }
}

/// A position in the source text: 0-based byte offset plus the 1-based
/// line and column it corresponds to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// 0-based byte offset.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column (in characters).
    pub column: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Location {
    /// Advances past `ch`, keeping offset, line and column in sync.
    pub fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.column = 1;
            self.line += 1;
        } else {
            self.column += 1;
        }
    }
}

/// The quoting flavour of a delimited identifier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuoteStyle {
    /// `"name"` (SQL standard).
    Double,
    /// `` `name` `` (MySQL, BigQuery).
    Backtick,
    /// `[name]` (T-SQL).
    Bracket,
}

impl QuoteStyle {
    /// The opening delimiter character.
    pub fn open(self) -> char {
        match self {
            Self::Double => '"',
            Self::Backtick => '`',
            Self::Bracket => '[',
        }
    }

    /// The closing delimiter character.
    pub fn close(self) -> char {
        match self {
            Self::Double => '"',
            Self::Backtick => '`',
            Self::Bracket => ']',
        }
    }
}

/// The sub-variant of a string literal token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StringKind {
    /// `'...'` with doubled `''` escapes.
    Plain,
    /// `E'...'` with C-style backslash escapes.
    CEscaped,
    /// `N'...'` national character string.
    National,
    /// `B'...'` bit string.
    Bit,
    /// `X'...'` hex string.
    Hex,
    /// `U&'...'` Unicode-escaped string.
    Unicode,
    /// `$tag$ ... $tag$` dollar-quoted string.
    Dollar,
}

/// The flavour of a placeholder parameter.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamKind {
    /// `$1` (PostgreSQL positional).
    Dollar,
    /// `@name` / `@@name` (T-SQL).
    At,
    /// `:name` / `:'name'` (Oracle, psql).
    Colon,
    /// `?` (JDBC style).
    Question,
}

/// A token that changes statement-termination or batching rules.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectiveKind {
    /// A `DELIMITER <seq>` line.
    Delimiter,
    /// An occurrence of the currently configured custom delimiter.
    CustomTerminator,
    /// `GO` on a line by itself.
    Go,
    /// Stand-alone `/` at column 1.
    Slash,
    /// `\.` on a line by itself (ends a COPY-FROM-stdin block).
    CopyEnd,
}

/// The closed token kind enumeration.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// A keyword recognised by the active dialect.
    Keyword(Keyword),
    /// An unquoted identifier.
    Ident,
    /// A delimited identifier.
    QuotedIdent(QuoteStyle),
    /// An unsigned numeric literal.
    Number,
    /// A string literal of some flavour.
    Str(StringKind),
    /// A placeholder parameter.
    Parameter(ParamKind),
    /// A (possibly multi-character) operator, e.g. `::` or `->>`.
    Operator,
    /// A single punctuation character: `,`, `;`, `(`, `)`, `[`, `]`, `.`.
    Punct(char),
    /// `-- ...` up to (not including) the line ending.
    LineComment,
    /// `/* ... */`.
    BlockComment,
    /// A whole-line client meta-command (psql `\...`, SQL*Plus `@file`,
    /// `REM`, `DESCRIBE`, ...), preserved verbatim.
    MetaCommand,
    /// A dialect directive (see [`DirectiveKind`]).
    Directive(DirectiveKind),
    /// End of input.
    Eof,
}

/// A lexed token: its kind, the exact source text it covers, the byte span,
/// the 1-based line/column of its first character, and the whitespace run
/// that preceded it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The raw source text of the token (quotes and prefixes included).
    pub text: String,
    /// Byte span in the source.
    pub span: Span,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character.
    pub column: usize,
    /// The exact whitespace run between the previous token and this one.
    pub leading_ws: String,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Token {
    /// Returns the keyword of this token, if it is a keyword token.
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns true if this token is the given keyword.
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    /// Returns the matching keyword if this token is one of `keywords`.
    pub fn is_one_of_keywords(&self, keywords: &[Keyword]) -> bool {
        match self.keyword() {
            Some(kw) => keywords.contains(&kw),
            None => false,
        }
    }

    /// Returns true for the given punctuation character.
    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punct(ch)
    }

    /// Returns true for an operator token with exactly this text.
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// Returns true for line and block comments.
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Number of newlines in the whitespace run before this token.
    pub fn leading_newlines(&self) -> usize {
        self.leading_ws.matches('\n').count()
    }

    /// Returns true if a blank line separated this token from the
    /// previous one.
    pub fn has_blank_line_before(&self) -> bool {
        self.leading_newlines() >= 2
    }

    /// Returns true if this token starts on the same line the previous
    /// token ended on.
    pub fn same_line_as_previous(&self) -> bool {
        self.leading_newlines() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_advance() {
        let mut loc = Location::default();
        loc.advance('a');
        assert_eq!((loc.offset, loc.line, loc.column), (1, 1, 2));
        loc.advance('\n');
        assert_eq!((loc.offset, loc.line, loc.column), (2, 2, 1));
        loc.advance('ä');
        assert_eq!((loc.offset, loc.line, loc.column), (4, 2, 2));
    }

    #[test]
    fn span_union() {
        let a = Span::new(3, 10);
        let b = Span::new(7, 15);
        assert_eq!(a.union(b), Span::new(3, 15));
    }
}
