//! An index-based cursor over the significant token stream.
//!
//! The parser needs to rewind to arbitrary saved positions (speculative
//! clause probes, recovery scans), so the cursor keeps the whole token
//! vector and an index instead of wrapping an iterator.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use sqlriver_core::{Token, TokenKind};

/// A cursor over the significant (non-comment) tokens. The final token
/// is always `Eof`, so `peek` never runs off the end in practice.
#[derive(Clone, Debug)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenCursor {
    /// Creates a cursor over the given tokens, filtering out comments.
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|token| !token.is_comment())
            .collect();
        Self { tokens, pos: 0 }
    }

    /// Current position, usable with [`rewind`](Self::rewind).
    pub fn index(&self) -> usize {
        self.pos
    }

    /// Rewinds to a position previously returned by
    /// [`index`](Self::index).
    pub fn rewind(&mut self, index: usize) {
        self.pos = index;
    }

    /// Returns a reference to the next token without advancing.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Peeks `n` tokens ahead (`peek_nth(0)` is `peek`).
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    /// Returns the most recently consumed token.
    pub fn prev_token(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Consumes and returns the next token.
    pub fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consumes and returns the next token, or a synthetic `Eof` token
    /// when the stream is exhausted.
    pub fn bump(&mut self) -> Token {
        self.next().unwrap_or(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            span: sqlriver_core::Span::default(),
            line: 1,
            column: 1,
            leading_ws: String::new(),
        })
    }

    /// Consumes the next token if `func` accepts it.
    pub fn next_if(&mut self, func: impl FnOnce(&Token) -> bool) -> Option<Token> {
        match self.peek() {
            Some(token) if func(token) => self.next(),
            _ => None,
        }
    }

    /// True when every remaining token is `Eof`.
    pub fn at_eof(&self) -> bool {
        matches!(self.peek().map(|t| &t.kind), None | Some(TokenKind::Eof))
    }
}

#[cfg(test)]
mod tests {
    use sqlriver_core::Span;

    use super::*;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token {
            kind,
            text: text.into(),
            span: Span::default(),
            line: 1,
            column: 1,
            leading_ws: String::new(),
        }
    }

    #[test]
    fn cursor_filters_comments_and_rewinds() {
        let mut cursor = TokenCursor::new(vec![
            tok(TokenKind::Ident, "a"),
            tok(TokenKind::LineComment, "-- c"),
            tok(TokenKind::Ident, "b"),
            tok(TokenKind::Eof, ""),
        ]);
        assert_eq!(cursor.peek().map(|t| t.text.as_str()), Some("a"));
        let mark = cursor.index();
        cursor.next();
        assert_eq!(cursor.peek().map(|t| t.text.as_str()), Some("b"));
        cursor.rewind(mark);
        assert_eq!(cursor.peek().map(|t| t.text.as_str()), Some("a"));
        cursor.next();
        cursor.next();
        assert!(cursor.at_eof());
    }
}
