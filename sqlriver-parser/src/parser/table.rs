//! FROM-list parsing: table factors, join trees, aliases and hints.

#[cfg(not(feature = "std"))]
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec,
    vec::Vec,
};

use sqlriver_ast::expression::{
    Join, JoinConstraint, JoinType, TableAlias, TableFactor, TableWithJoins,
};
use sqlriver_core::{Dialect, Keyword, TokenKind};

use crate::{error::ParserError, parser::Parser};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Parses one FROM-list entry: a table factor and its join chain.
    pub(crate) fn parse_table_with_joins(&mut self) -> Result<TableWithJoins, ParserError> {
        let relation = self.parse_table_factor()?;
        let mut joins = vec![];
        while let Some(join) = self.parse_join()? {
            joins.push(join);
        }
        Ok(TableWithJoins { relation, joins })
    }

    fn parse_join(&mut self) -> Result<Option<Join>, ParserError> {
        let natural = self.parse_keyword(Keyword::NATURAL);
        let join_type = if natural {
            // NATURAL [INNER | LEFT | RIGHT | FULL [OUTER]] JOIN
            self.parse_one_of_keywords(&[
                Keyword::INNER,
                Keyword::LEFT,
                Keyword::RIGHT,
                Keyword::FULL,
            ]);
            self.parse_keyword(Keyword::OUTER);
            self.expect_keyword(Keyword::JOIN)?;
            JoinType::Natural
        } else if self.parse_keyword(Keyword::CROSS) {
            if self.parse_keyword(Keyword::APPLY) {
                JoinType::CrossApply
            } else {
                self.expect_keyword(Keyword::JOIN)?;
                JoinType::Cross
            }
        } else if self.parse_keywords(&[Keyword::OUTER, Keyword::APPLY]) {
            JoinType::OuterApply
        } else if self.parse_keyword(Keyword::STRAIGHT_JOIN) {
            JoinType::Straight
        } else if self.parse_keyword(Keyword::INNER) {
            self.expect_keyword(Keyword::JOIN)?;
            JoinType::Inner
        } else if self.parse_keyword(Keyword::LEFT) {
            let outer = self.parse_keyword(Keyword::OUTER);
            self.expect_keyword(Keyword::JOIN)?;
            JoinType::Left(outer)
        } else if self.parse_keyword(Keyword::RIGHT) {
            let outer = self.parse_keyword(Keyword::OUTER);
            self.expect_keyword(Keyword::JOIN)?;
            JoinType::Right(outer)
        } else if self.parse_keyword(Keyword::FULL) {
            let outer = self.parse_keyword(Keyword::OUTER);
            self.expect_keyword(Keyword::JOIN)?;
            JoinType::Full(outer)
        } else if self.parse_keywords(&[Keyword::LATERAL, Keyword::JOIN]) {
            JoinType::Lateral
        } else if self.parse_keyword(Keyword::JOIN) {
            JoinType::Join
        } else {
            return Ok(None);
        };
        let offset = self.peek_start();
        let relation = self.parse_table_factor()?;
        let constraint = if natural {
            JoinConstraint::None
        } else if self.parse_keyword(Keyword::ON) {
            JoinConstraint::On(self.parse_expr()?)
        } else if self.parse_keyword(Keyword::USING) {
            self.expect_punct('(')?;
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(')')?;
            JoinConstraint::Using(columns)
        } else {
            JoinConstraint::None
        };
        Ok(Some(Join {
            join_type,
            offset,
            relation,
            constraint,
        }))
    }

    /// Parses one table factor.
    pub(crate) fn parse_table_factor(&mut self) -> Result<TableFactor, ParserError> {
        let lateral = self.parse_keyword(Keyword::LATERAL);
        if self.peek_punct('(') {
            return self.parse_parenthesized_factor(lateral);
        }
        if self.peek_keyword(Keyword::VALUES) {
            let values = self.parse_values()?;
            let alias = self.parse_table_alias()?;
            return Ok(TableFactor::Values { values, alias });
        }
        let name = self.parse_object_name()?;
        // A table function call.
        if self.peek_punct('(') {
            let call = self.parse_function_call(name)?;
            let with_ordinality = self.parse_keywords(&[Keyword::WITH, Keyword::ORDINALITY]);
            let mut column_defs = vec![];
            let mut alias = None;
            if self.parse_keyword(Keyword::AS) {
                if self.peek_punct('(') {
                    // `AS (col type, ...)` column definition list.
                    self.expect_punct('(')?;
                    column_defs = self.parse_comma_separated(|parser| {
                        let col = parser.parse_identifier()?;
                        let data_type = parser.parse_data_type()?;
                        Ok((col, data_type))
                    })?;
                    self.expect_punct(')')?;
                } else {
                    let name = self.parse_identifier()?;
                    let columns = self.parse_alias_columns()?;
                    alias = Some(TableAlias { name, columns });
                }
            } else {
                alias = self.parse_table_alias()?;
            }
            return Ok(TableFactor::Function {
                lateral,
                call: Box::new(call),
                alias,
                column_defs,
                with_ordinality,
            });
        }
        let with_ordinality = self.parse_keywords(&[Keyword::WITH, Keyword::ORDINALITY]);
        let alias = self.parse_table_alias()?;
        let hints = self.parse_table_hints()?;
        let tablesample = self.parse_tablesample()?;
        Ok(TableFactor::Table {
            name,
            alias,
            with_ordinality,
            hints,
            tablesample,
        })
    }

    /// `( ... )` in FROM position: a derived table or a parenthesised
    /// join tree.
    fn parse_parenthesized_factor(
        &mut self,
        lateral: bool,
    ) -> Result<TableFactor, ParserError> {
        self.expect_punct('(')?;
        let factor = self.descend(|parser| {
            if parser.next_is_query_start() {
                let subquery = parser.parse_query(true)?;
                parser.expect_punct(')')?;
                let alias = parser.parse_table_alias()?;
                Ok(TableFactor::Derived {
                    lateral,
                    subquery: Box::new(subquery),
                    alias,
                })
            } else {
                let inner = parser.parse_table_with_joins()?;
                parser.expect_punct(')')?;
                let alias = parser.parse_table_alias()?;
                Ok(TableFactor::NestedJoin {
                    inner: Box::new(inner),
                    alias,
                })
            }
        })?;
        Ok(factor)
    }

    /// `[AS] <alias> [(columns)]`.
    pub(crate) fn parse_table_alias(&mut self) -> Result<Option<TableAlias>, ParserError> {
        let explicit = self.parse_keyword(Keyword::AS);
        let aliasable = explicit
            || matches!(
                self.cursor.peek().map(|t| &t.kind),
                Some(TokenKind::Ident | TokenKind::QuotedIdent(_))
            );
        if !aliasable {
            if explicit {
                let found = self.cursor.peek().cloned();
                return self.expected("an alias after AS", found.as_ref());
            }
            return Ok(None);
        }
        let name = self.parse_identifier()?;
        let columns = self.parse_alias_columns()?;
        Ok(Some(TableAlias { name, columns }))
    }

    /// The optional parenthesised column list of an alias. A paren that
    /// opens a T-SQL table hint is left untouched.
    fn parse_alias_columns(&mut self) -> Result<Vec<sqlriver_ast::types::Ident>, ParserError> {
        if !self.peek_punct('(') || self.peek_is_table_hint() {
            return Ok(vec![]);
        }
        self.expect_punct('(')?;
        let columns = self.parse_comma_separated(Parser::parse_identifier)?;
        self.expect_punct(')')?;
        Ok(columns)
    }

    fn peek_is_table_hint(&self) -> bool {
        let inner = self.cursor.peek_nth(1);
        inner.is_some_and(|t| {
            t.kind == TokenKind::Ident && is_known_table_hint(&t.text)
        })
    }

    /// T-SQL style `(NOLOCK)` table hints, preserved verbatim.
    fn parse_table_hints(&mut self) -> Result<Vec<String>, ParserError> {
        if !self.peek_punct('(') || !self.peek_is_table_hint() {
            return Ok(vec![]);
        }
        self.expect_punct('(')?;
        let mut hints = vec![];
        loop {
            let token = self.cursor.bump();
            match &token.kind {
                TokenKind::Punct(')') => break,
                TokenKind::Punct(',') => continue,
                TokenKind::Eof => {
                    return self.expected("')' to close the table hint", Some(&token))
                }
                _ => hints.push(token.text),
            }
        }
        Ok(hints)
    }

    /// `TABLESAMPLE ...`: the clause is preserved as an opaque tail up
    /// to the closing paren of its argument list.
    fn parse_tablesample(&mut self) -> Result<Option<String>, ParserError> {
        if !self.parse_keyword(Keyword::TABLESAMPLE) {
            return Ok(None);
        }
        let mut out = String::new();
        // Method name, argument list, and optional REPEATABLE tail.
        loop {
            let next_kind = match self.cursor.peek() {
                Some(token) => token.kind.clone(),
                None => break,
            };
            match next_kind {
                TokenKind::Ident
                | TokenKind::Number
                | TokenKind::Keyword(
                    Keyword::REPEATABLE | Keyword::PERCENT | Keyword::ROWS | Keyword::SYSTEM,
                ) => {
                    push_word(&mut out, &self.cursor.bump().text);
                }
                TokenKind::Punct('(') => {
                    let mut depth = 0usize;
                    loop {
                        let token = self.cursor.bump();
                        match &token.kind {
                            TokenKind::Punct('(') => {
                                depth += 1;
                                out.push('(');
                            }
                            TokenKind::Punct(')') => {
                                out.push(')');
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            TokenKind::Punct(',') => out.push_str(", "),
                            TokenKind::Eof => {
                                return self.expected("')' to close TABLESAMPLE", Some(&token))
                            }
                            _ => out.push_str(&token.text),
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(Some(out))
    }
}

/// Appends a word with a separating space when needed.
fn push_word(out: &mut String, word: &str) {
    if !out.is_empty() && !out.ends_with('(') {
        out.push(' ');
    }
    out.push_str(word);
}

/// The T-SQL hints the factor parser recognises inside parens.
fn is_known_table_hint(word: &str) -> bool {
    matches!(
        word.to_uppercase().as_str(),
        "NOLOCK" | "READUNCOMMITTED" | "UPDLOCK" | "HOLDLOCK" | "ROWLOCK" | "TABLOCK"
            | "TABLOCKX" | "XLOCK" | "FORCESEEK"
    )
}
