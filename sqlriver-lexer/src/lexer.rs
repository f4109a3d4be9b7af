#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use sqlriver_core::{
    Dialect, DialectLexerConf, DirectiveKind, Location, ParamKind, QuoteStyle, Span, StringKind,
    Token, TokenKind,
};

use crate::{config::LexerConfig, error::TokenizeError};

/// A saved scanner position, restored after speculative scans
/// (scientific-notation backtracking, dollar-quote probing, ...).
#[derive(Copy, Clone)]
struct ScanState {
    pos: usize,
    location: Location,
}

/// SQL tokenizer.
///
/// Scans the raw text into an ordered token sequence with byte spans,
/// line/column info and the whitespace run preceding each token. The
/// final token is always [`TokenKind::Eof`].
pub struct Lexer<'a, D: Dialect> {
    dialect: &'a D,
    config: LexerConfig,
    chars: Vec<char>,
    pos: usize,
    location: Location,
    tokens: Vec<Token>,
    pending_ws: String,
    /// True at the very start of input and after a statement boundary;
    /// meta-commands are only recognised here.
    at_statement_start: bool,
    /// The terminator installed by the most recent `DELIMITER` line.
    custom_delimiter: Option<String>,
}

impl<'a, D: Dialect> Lexer<'a, D> {
    /// Creates a new lexer for the given input string.
    pub fn new(dialect: &'a D, input: &'a str) -> Self {
        Self::with_config(dialect, input, LexerConfig::default())
    }

    /// Creates a new lexer with explicit resource guards.
    pub fn with_config(dialect: &'a D, input: &'a str, config: LexerConfig) -> Self {
        Self {
            dialect,
            config,
            chars: input.chars().collect(),
            pos: 0,
            location: Location::default(),
            tokens: Vec::new(),
            pending_ws: String::new(),
            at_statement_start: true,
            custom_delimiter: None,
        }
    }

    fn conf(&self) -> &'a D::LexerConf {
        self.dialect.lexer_conf()
    }

    /// Tokenizes the input and produces the token sequence.
    pub fn tokenize(mut self) -> Result<Vec<Token>, TokenizeError> {
        let input_bytes: usize = self.chars.iter().map(|c| c.len_utf8()).sum();
        if input_bytes > self.config.max_input_size {
            return Err(TokenizeError::new(
                format!("input exceeds maximum size {}", self.config.max_input_size),
                Location::default(),
            ));
        }
        // Byte order mark.
        if self.peek() == Some('\u{feff}') {
            self.next_char();
        }
        loop {
            self.consume_whitespace();
            let start = self.location;
            match self.peek() {
                None => {
                    self.push_token(TokenKind::Eof, String::new(), start)?;
                    break;
                }
                Some(ch) => {
                    let (kind, text) = self.next_token(ch, start)?;
                    self.push_token(kind, text, start)?;
                }
            }
        }
        Ok(self.tokens)
    }

    fn next_token(
        &mut self,
        ch: char,
        start: Location,
    ) -> Result<(TokenKind, String), TokenizeError> {
        // A custom DELIMITER terminator beats every other rule, so that
        // e.g. `$$` or `//` terminators are not mistaken for quotes or
        // comments.
        if let Some(delim) = self.custom_delimiter.clone() {
            if self.starts_with(&delim) {
                for _ in 0..delim.chars().count() {
                    self.next_char();
                }
                return Ok((TokenKind::Directive(DirectiveKind::CustomTerminator), delim));
            }
        }
        match ch {
            '\u{200b}' => Err(self.error("Zero-width space is not allowed", start)),
            c if is_rejected_control(c) => Err(self.error(
                format!("Illegal control character 0x{:02X}", c as u32),
                start,
            )),
            '\'' => self.tokenize_quoted_string(StringKind::Plain, String::new()),
            c if self.conf().is_delimited_identifier_start(c) => self.tokenize_delimited_ident(c),
            c if self.conf().is_identifier_start(c) => self.tokenize_word(start),
            c if c.is_ascii_digit() => Ok(self.tokenize_number(String::new())),
            '.' => {
                self.next_char();
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    Ok(self.tokenize_number(".".to_string()))
                } else {
                    Ok((TokenKind::Punct('.'), ".".to_string()))
                }
            }
            '$' => self.tokenize_dollar(start),
            '\\' => Ok(self.tokenize_backslash()),
            '@' => Ok(self.tokenize_at()),
            ':' => self.tokenize_colon(),
            '-' => self.tokenize_minus(),
            '/' => self.tokenize_slash(start),
            ']' if self.conf().supports_lua_bracket_strings() => {
                Ok(self.tokenize_lua_continuation())
            }
            ',' | ';' | '(' | ')' | '[' | ']' | '{' | '}' => {
                self.next_char();
                Ok((TokenKind::Punct(ch), ch.to_string()))
            }
            '?' => {
                self.next_char();
                if self.conf().question_is_operator() {
                    Ok(self.op_among(&[('|', "?|"), ('&', "?&")], "?"))
                } else {
                    Ok((TokenKind::Parameter(ParamKind::Question), "?".to_string()))
                }
            }
            '<' => {
                self.next_char();
                Ok(self.op_among(&[('=', "<="), ('>', "<>"), ('<', "<<"), ('@', "<@")], "<"))
            }
            '>' => {
                self.next_char();
                Ok(self.op_among(&[('=', ">="), ('>', ">>")], ">"))
            }
            '!' => {
                self.next_char();
                if self.next_if_is('=') {
                    Ok((TokenKind::Operator, "!=".to_string()))
                } else if self.next_if_is('~') {
                    Ok(self.op_among(&[('*', "!~*")], "!~"))
                } else {
                    Ok((TokenKind::Operator, "!".to_string()))
                }
            }
            '~' => {
                self.next_char();
                Ok(self.op_among(&[('*', "~*")], "~"))
            }
            '|' => {
                self.next_char();
                Ok(self.op_among(&[('|', "||")], "|"))
            }
            '#' => {
                self.next_char();
                if self.next_if_is('>') {
                    Ok(self.op_among(&[('>', "#>>")], "#>"))
                } else {
                    Ok((TokenKind::Operator, "#".to_string()))
                }
            }
            '=' => {
                self.next_char();
                Ok(self.op_among(&[('>', "=>")], "="))
            }
            '+' | '*' | '%' | '^' | '&' => {
                self.next_char();
                Ok((TokenKind::Operator, ch.to_string()))
            }
            other => Err(self.error(format!("Unexpected character '{}'", other), start)),
        }
    }

    /// Words: identifiers, keywords, prefixed strings, meta-commands and
    /// word-shaped directives.
    fn tokenize_word(&mut self, _start: Location) -> Result<(TokenKind, String), TokenizeError> {
        let conf = self.conf();
        let at_line_start = self.at_line_start();
        let first = self.next_char().unwrap_or_default();
        // Prefixed string literals: the prefix letter is only a prefix
        // when the quote follows immediately.
        if self.peek() == Some('\'') {
            match first {
                'n' | 'N' => {
                    return self.tokenize_quoted_string(StringKind::National, first.to_string())
                }
                'x' | 'X' => {
                    return self.tokenize_quoted_string(StringKind::Hex, first.to_string())
                }
                'b' | 'B' => {
                    return self.tokenize_quoted_string(StringKind::Bit, first.to_string())
                }
                'e' | 'E' if conf.supports_escape_string() => {
                    return self.tokenize_escape_string(first)
                }
                _ => {}
            }
        }
        // U&'...'
        if matches!(first, 'u' | 'U')
            && conf.supports_unicode_string()
            && self.peek() == Some('&')
            && self.peek_at(1) == Some('\'')
        {
            let mut prefix = first.to_string();
            prefix.push(self.next_char().unwrap_or_default());
            return self.tokenize_quoted_string(StringKind::Unicode, prefix);
        }

        let mut word = first.to_string();
        word.push_str(&self.next_while(|c| conf.is_identifier_part(c)));

        // Word-shaped directives and meta-commands.
        let upper = word.to_uppercase();
        if conf.supports_go_batch() && upper == "GO" && at_line_start && self.rest_of_line_blank() {
            return Ok((TokenKind::Directive(DirectiveKind::Go), word));
        }
        if conf.supports_delimiter_directive() && upper == "DELIMITER" && self.at_statement_start {
            let rest = self.consume_rest_of_line();
            let seq = rest
                .split_whitespace()
                .next()
                .unwrap_or(";")
                .to_string();
            self.custom_delimiter = if seq == ";" { None } else { Some(seq) };
            word.push_str(&rest);
            return Ok((TokenKind::Directive(DirectiveKind::Delimiter), word));
        }
        if at_line_start && self.at_statement_start && self.is_meta_command_head(&upper) {
            let rest = self.consume_rest_of_line();
            word.push_str(&rest);
            return Ok((TokenKind::MetaCommand, word));
        }

        Ok(match conf.keyword(&word) {
            Some(kw) => (TokenKind::Keyword(kw), word),
            None => (TokenKind::Ident, word),
        })
    }

    fn is_meta_command_head(&self, upper: &str) -> bool {
        let conf = self.conf();
        if conf.supports_sqlplus_meta() {
            match upper {
                "REM" | "ACCEPT" | "DESCRIBE" | "DESC" => return true,
                // Only `SET SERVEROUTPUT ...` is a SQL*Plus command;
                // plain SET stays a session statement.
                "SET" => return self.next_word_on_line().eq_ignore_ascii_case("SERVEROUTPUT"),
                _ => {}
            }
        }
        if conf.supports_mysql_meta() && matches!(upper, "SOURCE" | "DESCRIBE") {
            return true;
        }
        false
    }

    /// Peeks the next word on the current line without advancing.
    fn next_word_on_line(&self) -> String {
        let mut pos = self.pos;
        while matches!(self.chars.get(pos), Some(' ' | '\t')) {
            pos += 1;
        }
        let mut word = String::new();
        while let Some(&c) = self.chars.get(pos) {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                pos += 1;
            } else {
                break;
            }
        }
        word
    }

    /// `'...'`-style literals with doubled-quote escapes, including the
    /// N/B/X/U& prefixed flavours. `prefix` holds the consumed prefix.
    fn tokenize_quoted_string(
        &mut self,
        kind: StringKind,
        prefix: String,
    ) -> Result<(TokenKind, String), TokenizeError> {
        let start = self.location;
        let mut text = prefix;
        text.push(self.next_char().unwrap_or_default()); // opening quote
        loop {
            match self.next_char() {
                Some('\'') => {
                    text.push('\'');
                    if self.peek() == Some('\'') {
                        text.push(self.next_char().unwrap_or_default());
                    } else {
                        return Ok((TokenKind::Str(kind), text));
                    }
                }
                Some(c) => text.push(c),
                None => return Err(self.error("Unterminated string literal", start)),
            }
        }
    }

    /// `E'...'` literals where a backslash escapes the next character.
    fn tokenize_escape_string(
        &mut self,
        prefix: char,
    ) -> Result<(TokenKind, String), TokenizeError> {
        let start = self.location;
        let mut text = prefix.to_string();
        text.push(self.next_char().unwrap_or_default()); // opening quote
        loop {
            match self.next_char() {
                Some('\\') => {
                    text.push('\\');
                    match self.next_char() {
                        Some(c) => text.push(c),
                        None => return Err(self.error("Unterminated string literal", start)),
                    }
                }
                Some('\'') => {
                    text.push('\'');
                    if self.peek() == Some('\'') {
                        text.push(self.next_char().unwrap_or_default());
                    } else {
                        return Ok((TokenKind::Str(StringKind::CEscaped), text));
                    }
                }
                Some(c) => text.push(c),
                None => return Err(self.error("Unterminated string literal", start)),
            }
        }
    }

    fn tokenize_delimited_ident(
        &mut self,
        open: char,
    ) -> Result<(TokenKind, String), TokenizeError> {
        let start = self.location;
        let style = match open {
            '"' => QuoteStyle::Double,
            '`' => QuoteStyle::Backtick,
            '[' => QuoteStyle::Bracket,
            _ => return Err(self.error("Unexpected quoting style", start)),
        };
        let close = style.close();
        let mut text = String::new();
        text.push(self.next_char().unwrap_or_default());
        loop {
            match self.next_char() {
                Some(c) if c == close => {
                    text.push(c);
                    // Doubled closers escape the closer; backslash is a
                    // literal character inside brackets.
                    if self.peek() == Some(close) {
                        text.push(self.next_char().unwrap_or_default());
                    } else {
                        return Ok((TokenKind::QuotedIdent(style), text));
                    }
                }
                Some(c) => text.push(c),
                None => {
                    return Err(self.error(
                        format!("Expected close delimiter '{}' before EOF", close),
                        start,
                    ))
                }
            }
        }
    }

    /// Numbers: integer, decimal, scientific (with backtracking when no
    /// exponent digit follows), hex, with `_` digit separators in integer
    /// and hex bodies.
    fn tokenize_number(&mut self, seed: String) -> (TokenKind, String) {
        let mut text = seed;
        if text.is_empty() {
            if self.peek() == Some('0')
                && matches!(self.peek_at(1), Some('x' | 'X'))
                && self.peek_at(2).is_some_and(|c| c.is_ascii_hexdigit())
            {
                text.push(self.next_char().unwrap_or_default());
                text.push(self.next_char().unwrap_or_default());
                text.push_str(&self.next_while(|c| c.is_ascii_hexdigit() || c == '_'));
                return (TokenKind::Number, text);
            }
            text.push_str(&self.next_while(|c| c.is_ascii_digit() || c == '_'));
            if self.next_if_is('.') {
                text.push('.');
            }
        }
        text.push_str(&self.next_while(|c| c.is_ascii_digit()));
        // Scientific notation; if no digit follows the marker (and the
        // optional sign), restore to just after the mantissa so the bare
        // `e` lexes as an identifier and the sign as an operator.
        if let Some(e @ ('e' | 'E')) = self.peek() {
            let state = self.save();
            self.next_char();
            let sign = match self.peek() {
                Some(s @ ('+' | '-')) => {
                    self.next_char();
                    Some(s)
                }
                _ => None,
            };
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                text.push(e);
                if let Some(s) = sign {
                    text.push(s);
                }
                text.push_str(&self.next_while(|c| c.is_ascii_digit()));
            } else {
                self.restore(state);
            }
        }
        (TokenKind::Number, text)
    }

    /// `$`: positional parameter, dollar-quoted string, or a bare `$`
    /// operator (never silently dropped).
    fn tokenize_dollar(&mut self, start: Location) -> Result<(TokenKind, String), TokenizeError> {
        let state = self.save();
        self.next_char(); // consume `$`
        if self.conf().supports_dollar_parameter()
            && self.peek().is_some_and(|c| c.is_ascii_digit())
        {
            let mut text = "$".to_string();
            text.push_str(&self.next_while(|c| c.is_ascii_digit()));
            return Ok((TokenKind::Parameter(ParamKind::Dollar), text));
        }
        if self.conf().supports_dollar_quoting() {
            // Probe for an opening `$tag$`.
            let mut tag = String::new();
            if self
                .peek()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            {
                tag.push(self.next_char().unwrap_or_default());
                tag.push_str(&self.next_while(|c| c.is_ascii_alphanumeric() || c == '_'));
            }
            if self.peek() == Some('$') {
                self.next_char();
                let open = format!("${}$", tag);
                let mut text = open.clone();
                loop {
                    if self.peek().is_none() {
                        return Err(self.error(
                            format!("Unterminated dollar-quoted string starting with {}", open),
                            start,
                        ));
                    }
                    if self.starts_with(&open) {
                        for _ in 0..open.chars().count() {
                            text.push(self.next_char().unwrap_or_default());
                        }
                        return Ok((TokenKind::Str(StringKind::Dollar), text));
                    }
                    text.push(self.next_char().unwrap_or_default());
                }
            }
        }
        self.restore(state);
        self.next_char();
        Ok((TokenKind::Operator, "$".to_string()))
    }

    fn tokenize_backslash(&mut self) -> (TokenKind, String) {
        let at_line_start = self.at_line_start();
        self.next_char();
        if at_line_start && self.peek() == Some('.') {
            let state = self.save();
            self.next_char();
            if self.rest_of_line_blank() {
                return (TokenKind::Directive(DirectiveKind::CopyEnd), "\\.".to_string());
            }
            self.restore(state);
        }
        if at_line_start && self.conf().supports_backslash_meta() {
            let mut text = "\\".to_string();
            text.push_str(&self.consume_rest_of_line());
            return (TokenKind::MetaCommand, text);
        }
        (TokenKind::Operator, "\\".to_string())
    }

    fn tokenize_at(&mut self) -> (TokenKind, String) {
        let conf = self.conf();
        // SQL*Plus `@file` include.
        if conf.supports_sqlplus_meta()
            && self.at_line_start()
            && self.at_statement_start
            && self.peek_at(1).is_some_and(|c| !c.is_whitespace())
        {
            let mut text = String::new();
            text.push(self.next_char().unwrap_or_default());
            text.push_str(&self.consume_rest_of_line());
            return (TokenKind::MetaCommand, text);
        }
        self.next_char();
        if self.next_if_is('>') {
            return (TokenKind::Operator, "@>".to_string());
        }
        if conf.supports_at_parameter() {
            let double = self.peek() == Some('@');
            let head = if double { self.peek_at(1) } else { self.peek() };
            if head.is_some_and(|c| conf.is_identifier_start(c)) {
                let mut text = "@".to_string();
                if double {
                    text.push(self.next_char().unwrap_or_default());
                }
                text.push_str(&self.next_while(|c| conf.is_identifier_part(c)));
                return (TokenKind::Parameter(ParamKind::At), text);
            }
        }
        if self.next_if_is('@') {
            return (TokenKind::Operator, "@@".to_string());
        }
        (TokenKind::Operator, "@".to_string())
    }

    fn tokenize_colon(&mut self) -> Result<(TokenKind, String), TokenizeError> {
        let conf = self.conf();
        self.next_char();
        if self.next_if_is(':') {
            return Ok((TokenKind::Operator, "::".to_string()));
        }
        if self.next_if_is('=') {
            return Ok((TokenKind::Operator, ":=".to_string()));
        }
        if conf.supports_colon_parameter() {
            if self.peek().is_some_and(|c| conf.is_identifier_start(c)) {
                let mut text = ":".to_string();
                text.push_str(&self.next_while(|c| conf.is_identifier_part(c)));
                return Ok((TokenKind::Parameter(ParamKind::Colon), text));
            }
            if self.peek() == Some('\'') {
                // `:'name'` psql interpolation.
                let (_, quoted) = self.tokenize_quoted_string(StringKind::Plain, String::new())?;
                return Ok((
                    TokenKind::Parameter(ParamKind::Colon),
                    format!(":{}", quoted),
                ));
            }
        }
        Ok((TokenKind::Operator, ":".to_string()))
    }

    fn tokenize_minus(&mut self) -> Result<(TokenKind, String), TokenizeError> {
        self.next_char();
        if self.next_if_is('>') {
            return Ok(self.op_among(&[('>', "->>")], "->"));
        }
        // `--` is a comment only when preceded by whitespace or at line
        // start; `a--b` is two minus operators.
        let comment_position = self.tokens.is_empty() || !self.pending_ws.is_empty();
        if self.peek() == Some('-') && comment_position {
            self.next_char();
            let mut text = "--".to_string();
            text.push_str(&self.next_while(|c| c != '\n' && c != '\r'));
            return Ok((TokenKind::LineComment, text));
        }
        Ok((TokenKind::Operator, "-".to_string()))
    }

    fn tokenize_slash(&mut self, start: Location) -> Result<(TokenKind, String), TokenizeError> {
        // Stand-alone `/` at column 1 is an Oracle block terminator.
        if start.column == 1 && self.conf().supports_slash_terminator() {
            let state = self.save();
            self.next_char();
            if self.rest_of_line_blank() {
                return Ok((TokenKind::Directive(DirectiveKind::Slash), "/".to_string()));
            }
            self.restore(state);
        }
        self.next_char();
        if self.next_if_is('*') {
            // Block comments do not nest (SQL standard).
            let mut text = "/*".to_string();
            loop {
                match self.next_char() {
                    Some('*') if self.peek() == Some('/') => {
                        text.push('*');
                        text.push(self.next_char().unwrap_or_default());
                        return Ok((TokenKind::BlockComment, text));
                    }
                    Some(c) => text.push(c),
                    None => return Err(self.error("Unterminated block comment", start)),
                }
            }
        }
        Ok((TokenKind::Operator, "/".to_string()))
    }

    /// Exasol Lua bracket-string continuation `]]..ident..[[`, lexed as
    /// one opaque identifier so the sequence survives round-trip.
    fn tokenize_lua_continuation(&mut self) -> (TokenKind, String) {
        let state = self.save();
        if self.starts_with("]]..") {
            let mut text = String::new();
            for _ in 0..4 {
                text.push(self.next_char().unwrap_or_default());
            }
            let ident = self.next_while(|c| c.is_alphanumeric() || c == '_');
            if !ident.is_empty() && self.starts_with("..[[") {
                text.push_str(&ident);
                for _ in 0..4 {
                    text.push(self.next_char().unwrap_or_default());
                }
                return (TokenKind::Ident, text);
            }
        }
        self.restore(state);
        self.next_char();
        (TokenKind::Punct(']'), "]".to_string())
    }

    // ------------------------------------------------------------------
    // Scanner primitives
    // ------------------------------------------------------------------

    fn consume_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0b' | '\x0c') {
                self.pending_ws.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn push_token(
        &mut self,
        kind: TokenKind,
        text: String,
        start: Location,
    ) -> Result<(), TokenizeError> {
        if text.chars().count() > self.config.max_token_length {
            return Err(self.error(
                format!(
                    "token exceeds maximum length {}",
                    self.config.max_token_length
                ),
                start,
            ));
        }
        if kind != TokenKind::Eof && self.tokens.len() >= self.config.max_token_count {
            return Err(self.error(
                format!("token count exceeds {}", self.config.max_token_count),
                start,
            ));
        }
        self.at_statement_start = match kind {
            TokenKind::Punct(';') | TokenKind::Directive(_) | TokenKind::MetaCommand => true,
            TokenKind::LineComment | TokenKind::BlockComment | TokenKind::Eof => {
                self.at_statement_start
            }
            _ => false,
        };
        let leading_ws = core::mem::take(&mut self.pending_ws);
        self.tokens.push(Token {
            kind,
            span: Span::new(start.offset, self.location.offset),
            line: start.line,
            column: start.column,
            leading_ws,
            text,
        });
        Ok(())
    }

    fn at_line_start(&self) -> bool {
        self.tokens.iter().all(|t| t.is_comment()) || self.pending_ws.contains('\n')
    }

    fn rest_of_line_blank(&self) -> bool {
        let mut pos = self.pos;
        while let Some(&c) = self.chars.get(pos) {
            match c {
                '\n' => return true,
                ' ' | '\t' | '\r' | '\x0b' | '\x0c' => pos += 1,
                _ => return false,
            }
        }
        true
    }

    fn consume_rest_of_line(&mut self) -> String {
        self.next_while(|c| c != '\n' && c != '\r')
    }

    fn error(&self, message: impl Into<String>, location: Location) -> TokenizeError {
        TokenizeError::new(message, location)
    }

    fn save(&self) -> ScanState {
        ScanState {
            pos: self.pos,
            location: self.location,
        }
    }

    fn restore(&mut self, state: ScanState) {
        self.pos = state.pos;
        self.location = state.location;
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, ch)| self.chars.get(self.pos + i) == Some(&ch))
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        self.location.advance(ch);
        Some(ch)
    }

    /// Consumes the next character if it matches `ch`, returning whether
    /// it matched.
    fn next_if_is(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.next_char();
            true
        } else {
            false
        }
    }

    /// Grabs the next characters that match the predicate, as a string.
    fn next_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> String {
        let mut value = String::new();
        while let Some(c) = self.peek() {
            if predicate(c) {
                value.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        value
    }

    fn op_among(&mut self, table: &[(char, &str)], fallback: &str) -> (TokenKind, String) {
        for (ch, op) in table {
            if self.next_if_is(*ch) {
                return (TokenKind::Operator, (*op).to_string());
            }
        }
        (TokenKind::Operator, fallback.to_string())
    }
}

fn is_rejected_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{e}'..='\u{1f}')
}

#[cfg(test)]
mod tests {
    use sqlriver_core::{mysql::MysqlDialect, oracle::OracleDialect, tsql::TsqlDialect, Keyword};

    use super::*;

    macro_rules! tokenize {
        ($input:expr) => {{
            let dialect = ::sqlriver_core::postgres::PostgresDialect;
            Lexer::new(&dialect, $input).tokenize()
        }};
        ($input:expr, $dialect:expr) => {{
            Lexer::new($dialect, $input).tokenize()
        }};
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind.clone()).collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn tokenize_simple_select() {
        let tokens = tokenize!("SELECT * FROM customer WHERE id = 1").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Keyword(Keyword::SELECT),
                TokenKind::Operator,
                TokenKind::Keyword(Keyword::FROM),
                TokenKind::Ident,
                TokenKind::Keyword(Keyword::WHERE),
                TokenKind::Ident,
                TokenKind::Operator,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[3].text, "customer");
        assert_eq!(tokens[3].span, Span::new(14, 22));
        assert_eq!((tokens[3].line, tokens[3].column), (1, 15));
    }

    #[test]
    fn tokenize_leading_whitespace_runs() {
        let tokens = tokenize!("a\n\n  b").unwrap();
        assert_eq!(tokens[0].leading_ws, "");
        assert_eq!(tokens[1].leading_ws, "\n\n  ");
        assert!(tokens[1].has_blank_line_before());
    }

    #[test]
    fn tokenize_strings() {
        let tokens = tokenize!("'a''b' E'x\\'y' N'n' B'01' X'ff' U&'d\\0061t'").unwrap();
        assert_eq!(
            kinds(&tokens)[..6],
            [
                TokenKind::Str(StringKind::Plain),
                TokenKind::Str(StringKind::CEscaped),
                TokenKind::Str(StringKind::National),
                TokenKind::Str(StringKind::Bit),
                TokenKind::Str(StringKind::Hex),
                TokenKind::Str(StringKind::Unicode),
            ]
        );
        assert_eq!(tokens[0].text, "'a''b'");
        assert_eq!(tokens[1].text, "E'x\\'y'");
    }

    #[test]
    fn tokenize_unterminated_string() {
        let err = tokenize!("select 'foo").unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!((err.line, err.column), (1, 8));
    }

    #[test]
    fn tokenize_dollar_quoting() {
        let tokens = tokenize!("$tag$ not $ a $end$ quote $tag$").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Str(StringKind::Dollar));
        assert_eq!(tokens[0].text, "$tag$ not $ a $end$ quote $tag$");

        let tokens = tokenize!("$$x$$").unwrap();
        assert_eq!(tokens[0].text, "$$x$$");

        let err = tokenize!("$q$ never closed").unwrap_err();
        assert!(err.message.contains("$q$"));
    }

    #[test]
    fn tokenize_dollar_parameter_not_a_quote() {
        let tokens = tokenize!("$1 $23").unwrap();
        assert_eq!(
            kinds(&tokens)[..2],
            [
                TokenKind::Parameter(ParamKind::Dollar),
                TokenKind::Parameter(ParamKind::Dollar),
            ]
        );
        // A bare `$` downgrades to an operator.
        let tokens = tokenize!("$ x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[0].text, "$");
    }

    #[test]
    fn tokenize_scientific_backtracking() {
        let tokens = tokenize!("1e5 1.5e-3 2e+ 3e").unwrap();
        assert_eq!(
            texts(&tokens)[..8],
            ["1e5", "1.5e-3", "2", "e", "+", "3", "e", ""]
        );
        assert_eq!(tokens[3].kind, TokenKind::Ident);
        assert_eq!(tokens[4].kind, TokenKind::Operator);
    }

    #[test]
    fn tokenize_hex_and_separators() {
        let tokens = tokenize!("0xDEAD_beef 1_000_000 .5 5.").unwrap();
        assert_eq!(texts(&tokens)[..4], ["0xDEAD_beef", "1_000_000", ".5", "5."]);
        assert!(kinds(&tokens)[..4]
            .iter()
            .all(|k| *k == TokenKind::Number));
    }

    #[test]
    fn tokenize_operators_longest_match() {
        let tokens = tokenize!("a::int ->> x #>> y @> z !~* w ?| q").unwrap();
        let ops: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(ops, ["::", "->>", "#>>", "@>", "!~*", "?|"]);
    }

    #[test]
    fn tokenize_adjacent_minus_is_not_comment() {
        let tokens = tokenize!("a--b").unwrap();
        assert_eq!(texts(&tokens)[..4], ["a", "-", "-", "b"]);

        let tokens = tokenize!("a --b").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::LineComment);
        assert_eq!(tokens[1].text, "--b");
    }

    #[test]
    fn tokenize_block_comment_does_not_nest() {
        let tokens = tokenize!("/* outer /* inner */ x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::BlockComment);
        assert_eq!(tokens[0].text, "/* outer /* inner */");
        assert_eq!(tokens[1].text, "x");

        let err = tokenize!("/* never closed").unwrap_err();
        assert_eq!(err.message, "Unterminated block comment");
    }

    #[test]
    fn tokenize_quoted_identifiers() {
        let tokens = tokenize!("\"a\"\"b\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::QuotedIdent(QuoteStyle::Double));
        assert_eq!(tokens[0].text, "\"a\"\"b\"");

        let dialect = MysqlDialect;
        let tokens = tokenize!("`tick``ed`", &dialect).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::QuotedIdent(QuoteStyle::Backtick));

        let dialect = TsqlDialect;
        let tokens = tokenize!("[bra]]cket]", &dialect).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::QuotedIdent(QuoteStyle::Bracket));
        assert_eq!(tokens[0].text, "[bra]]cket]");
    }

    #[test]
    fn tokenize_parameters() {
        let dialect = TsqlDialect;
        let tokens = tokenize!("@name @@rowcount", &dialect).unwrap();
        assert_eq!(
            kinds(&tokens)[..2],
            [
                TokenKind::Parameter(ParamKind::At),
                TokenKind::Parameter(ParamKind::At),
            ]
        );
        assert_eq!(texts(&tokens)[..2], ["@name", "@@rowcount"]);

        let dialect = OracleDialect;
        let tokens = tokenize!("x = :name", &dialect).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Parameter(ParamKind::Colon));
    }

    #[test]
    fn tokenize_go_batch() {
        let dialect = TsqlDialect;
        let tokens = tokenize!("SELECT 1\nGO\nSELECT 2", &dialect).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Directive(DirectiveKind::Go));
        // GO mid-line is an ordinary keyword token, not a directive.
        let tokens = tokenize!("SELECT go", &dialect).unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::GO));
    }

    #[test]
    fn tokenize_delimiter_directive() {
        let dialect = MysqlDialect;
        let tokens = tokenize!("DELIMITER $$\nSELECT 1 $$\nDELIMITER ;", &dialect).unwrap();
        assert_eq!(
            tokens[0].kind,
            TokenKind::Directive(DirectiveKind::Delimiter)
        );
        assert_eq!(
            tokens[3].kind,
            TokenKind::Directive(DirectiveKind::CustomTerminator)
        );
        assert_eq!(
            tokens[4].kind,
            TokenKind::Directive(DirectiveKind::Delimiter)
        );
    }

    #[test]
    fn tokenize_meta_commands() {
        let tokens = tokenize!("\\dt foo\nSELECT 1").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::MetaCommand);
        assert_eq!(tokens[0].text, "\\dt foo");

        let dialect = OracleDialect;
        let tokens = tokenize!("REM a remark\nSELECT 1", &dialect).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::MetaCommand);

        let tokens = tokenize!("SET SERVEROUTPUT ON\nSELECT 1", &dialect).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::MetaCommand);

        // Plain SET stays a statement.
        let tokens = tokenize!("SET search_path = public", &dialect).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::SET));
    }

    #[test]
    fn tokenize_slash_terminator() {
        let dialect = OracleDialect;
        let tokens = tokenize!("BEGIN NULL; END;\n/\n", &dialect).unwrap();
        let slash = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Directive(DirectiveKind::Slash));
        assert!(slash.is_some());

        // Division is untouched, even at line start with operands after.
        let tokens = tokenize!("SELECT 1\n/ 2 x", &dialect).unwrap();
        assert!(tokens
            .iter()
            .all(|t| t.kind != TokenKind::Directive(DirectiveKind::Slash)));
    }

    #[test]
    fn tokenize_control_bytes() {
        assert!(tokenize!("a\u{0}b").is_err());
        assert!(tokenize!("a\u{200b}b").is_err());
        // Form feed and vertical tab are whitespace.
        assert!(tokenize!("a\x0c\x0bb").is_ok());
        // BOM at start is consumed.
        let tokens = tokenize!("\u{feff}select").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::SELECT));
    }

    #[test]
    fn tokenize_resource_limits() {
        let dialect = sqlriver_core::postgres::PostgresDialect;
        let config = LexerConfig::new().max_token_count(3);
        let err = Lexer::with_config(&dialect, "a b c d", config)
            .tokenize()
            .unwrap_err();
        assert!(err.message.contains("3"), "{}", err.message);

        let config = LexerConfig::new().max_token_length(4);
        let err = Lexer::with_config(&dialect, "abcde", config)
            .tokenize()
            .unwrap_err();
        assert!(err.message.contains("maximum length 4"));
        assert!(Lexer::with_config(&dialect, "abcd", LexerConfig::new().max_token_length(4))
            .tokenize()
            .is_ok());

        let config = LexerConfig::new().max_input_size(4);
        let err = Lexer::with_config(&dialect, "abcde", config)
            .tokenize()
            .unwrap_err();
        assert!(err.message.contains("exceeds maximum size"));
    }

    #[test]
    fn tokenize_lua_continuation() {
        let dialect = sqlriver_core::exasol::ExasolDialect;
        let tokens = tokenize!("]]..schema_name..[[", &dialect).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text, "]]..schema_name..[[");
    }
}
