//! Data type parsing.

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use sqlriver_ast::types::DataType;
use sqlriver_core::{Dialect, Keyword, TokenKind};

use crate::{error::ParserError, parser::Parser};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Parses a column type expression: name words, an optional argument
    /// list, and the modifier words that stay attached to the type.
    pub(crate) fn parse_data_type(&mut self) -> Result<DataType, ParserError> {
        let first = self.cursor.bump();
        let head = match &first.kind {
            TokenKind::Ident | TokenKind::QuotedIdent(_) => first.text.clone(),
            // Non-structural keywords may double as type names
            // (`INTERVAL`, `KEY` in enums, ...).
            TokenKind::Keyword(kw) if !super::RESERVED_FOR_IDENT.contains(kw) => {
                first.text.clone()
            }
            _ => return self.expected("a data type", Some(&first)),
        };
        let mut name = vec![head];
        // Multi-word names: `CHARACTER VARYING`, `DOUBLE PRECISION`,
        // `NATIONAL CHARACTER`.
        while let Some(token) = self.cursor.peek() {
            let absorb = token.kind == TokenKind::Ident
                && matches!(
                    token.text.to_uppercase().as_str(),
                    "VARYING" | "PRECISION" | "CHARACTER" | "CHAR"
                )
                && matches!(
                    name.last().map(|w| w.to_uppercase()),
                    Some(ref w) if matches!(w.as_str(), "CHARACTER" | "CHAR" | "DOUBLE" | "NATIONAL")
                );
            if absorb {
                name.push(self.cursor.bump().text);
            } else {
                break;
            }
        }
        // Argument list: lengths, precisions, enum values.
        let args = if self.parse_punct('(') {
            let mut args = vec![];
            loop {
                let token = self.cursor.bump();
                match &token.kind {
                    TokenKind::Punct(')') => break,
                    TokenKind::Punct(',') => continue,
                    TokenKind::Eof => {
                        return self.expected("')' to close the type arguments", Some(&token))
                    }
                    _ => args.push(token.text.clone()),
                }
            }
            Some(args)
        } else {
            None
        };
        let mut modifiers = vec![];
        loop {
            // `UNSIGNED` / `ZEROFILL` (MySQL).
            if let Some(kw) =
                self.parse_one_of_keywords(&[Keyword::UNSIGNED, Keyword::ZEROFILL])
            {
                modifiers.push(kw.as_str().to_string());
                continue;
            }
            // `WITH | WITHOUT TIME ZONE`.
            let mark = self.cursor.index();
            if self.parse_keyword(Keyword::WITH) || self.parse_ident_word("WITHOUT") {
                let with = match self.cursor.prev_token() {
                    Some(t) => t.text.to_uppercase(),
                    None => "WITH".to_string(),
                };
                if self.parse_ident_word("TIME") && self.parse_keyword(Keyword::ZONE) {
                    modifiers.push(with);
                    modifiers.push("TIME".to_string());
                    modifiers.push("ZONE".to_string());
                    continue;
                }
                self.cursor.rewind(mark);
            }
            // Array suffix `[]`.
            if self.peek_punct('[')
                && self.cursor.peek_nth(1).is_some_and(|t| t.is_punct(']'))
            {
                self.cursor.next();
                self.cursor.next();
                modifiers.push("[]".to_string());
                continue;
            }
            break;
        }
        Ok(DataType {
            name,
            args,
            modifiers,
        })
    }

    /// Consumes the next token when it is a plain identifier with the
    /// given (case-insensitive) spelling.
    fn parse_ident_word(&mut self, word: &str) -> bool {
        self.cursor
            .next_if(|t| t.kind == TokenKind::Ident && t.text.eq_ignore_ascii_case(word))
            .is_some()
    }
}
