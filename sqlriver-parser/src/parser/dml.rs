//! INSERT / UPDATE / DELETE / MERGE parsing.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec, vec::Vec};

use sqlriver_ast::{
    expression::{Expr, SelectItem},
    statement::{
        Assignment, AssignmentTarget, DeleteStmt, InsertOr, InsertSource, InsertStmt, MergeAction,
        MergeClause, MergeStmt, OnConflict, OnConflictAction, Stmt, UpdateStmt,
    },
};
use sqlriver_core::{Dialect, Keyword, TokenKind};

use crate::{error::ParserError, parser::Parser};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Parses an INSERT statement.
    pub(crate) fn parse_insert(&mut self) -> Result<Stmt, ParserError> {
        self.expect_keyword(Keyword::INSERT)?;
        let or_conflict = if self.parse_keyword(Keyword::OR) {
            let kw = self.parse_one_of_keywords(&[
                Keyword::IGNORE,
                Keyword::REPLACE,
                Keyword::ROLLBACK,
                Keyword::ABORT,
                Keyword::FAIL,
            ]);
            match kw {
                Some(Keyword::IGNORE) => Some(InsertOr::Ignore),
                Some(Keyword::REPLACE) => Some(InsertOr::Replace),
                Some(Keyword::ROLLBACK) => Some(InsertOr::Rollback),
                Some(Keyword::ABORT) => Some(InsertOr::Abort),
                Some(Keyword::FAIL) => Some(InsertOr::Fail),
                _ => {
                    let found = self.cursor.peek().cloned();
                    return self.expected("a conflict action after INSERT OR", found.as_ref());
                }
            }
        } else {
            None
        };
        // INTO is optional in MySQL and T-SQL.
        self.parse_keyword(Keyword::INTO);
        let table = self.parse_object_name()?;
        let alias = if self.parse_keyword(Keyword::AS) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let mut columns = vec![];
        let mut parenthesized_query = None;
        if self.peek_punct('(') {
            // A parenthesised SELECT right after the target is a source
            // query, not a column list.
            if self.paren_wraps_query() {
                self.expect_punct('(')?;
                let query = self.descend(|parser| parser.parse_query(true))?;
                self.expect_punct(')')?;
                parenthesized_query = Some(query);
            } else {
                self.expect_punct('(')?;
                columns = self.parse_comma_separated(Parser::parse_identifier)?;
                self.expect_punct(')')?;
            }
        }
        let overriding_system = if self.parse_keyword(Keyword::OVERRIDING) {
            let system = self.parse_keyword(Keyword::SYSTEM);
            if !system {
                self.expect_keyword(Keyword::USER)?;
            }
            self.expect_keyword(Keyword::VALUE)?;
            Some(system)
        } else {
            None
        };
        let source = if let Some(query) = parenthesized_query {
            InsertSource::Query(Box::new(query))
        } else if self.parse_keywords(&[Keyword::DEFAULT, Keyword::VALUES]) {
            InsertSource::DefaultValues
        } else if self.peek_keyword(Keyword::VALUES) {
            InsertSource::Values(self.parse_values()?)
        } else if self.next_is_query_start() || self.peek_punct('(') {
            InsertSource::Query(Box::new(self.parse_query(true)?))
        } else {
            let found = self.cursor.peek().cloned();
            return self.expected("VALUES, a query or DEFAULT VALUES", found.as_ref());
        };
        let on_conflict = if self.parse_keywords(&[Keyword::ON, Keyword::CONFLICT]) {
            Some(self.parse_on_conflict()?)
        } else {
            None
        };
        let on_duplicate = if self.parse_keywords(&[
            Keyword::ON,
            Keyword::DUPLICATE,
            Keyword::KEY,
            Keyword::UPDATE,
        ]) {
            self.parse_comma_separated(Parser::parse_assignment)?
        } else {
            vec![]
        };
        let returning = self.parse_returning()?;
        Ok(Stmt::Insert(Box::new(InsertStmt {
            or_conflict,
            table,
            alias,
            columns,
            overriding_system,
            source,
            on_conflict,
            on_duplicate,
            returning,
        })))
    }

    /// Peeks whether the upcoming parenthesised group starts a query.
    fn paren_wraps_query(&self) -> bool {
        self.cursor
            .peek_nth(1)
            .and_then(|t| t.keyword())
            .is_some_and(|kw| matches!(kw, Keyword::SELECT | Keyword::WITH | Keyword::VALUES))
    }

    fn parse_on_conflict(&mut self) -> Result<OnConflict, ParserError> {
        let target = if self.parse_punct('(') {
            let exprs = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_punct(')')?;
            exprs
        } else {
            vec![]
        };
        self.expect_keyword(Keyword::DO)?;
        let action = if self.parse_keyword(Keyword::NOTHING) {
            OnConflictAction::DoNothing
        } else {
            self.expect_keyword(Keyword::UPDATE)?;
            self.expect_keyword(Keyword::SET)?;
            let assignments = self.parse_comma_separated(Parser::parse_assignment)?;
            let selection = if self.parse_keyword(Keyword::WHERE) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            OnConflictAction::DoUpdate {
                assignments,
                selection,
            }
        };
        Ok(OnConflict { target, action })
    }

    /// Parses an UPDATE statement.
    pub(crate) fn parse_update(&mut self) -> Result<Stmt, ParserError> {
        self.expect_keyword(Keyword::UPDATE)?;
        let table = self.parse_table_factor()?;
        self.expect_keyword(Keyword::SET)?;
        let assignments = self.parse_comma_separated(Parser::parse_assignment)?;
        let from = if self.parse_keyword(Keyword::FROM) {
            self.parse_comma_separated(Parser::parse_table_with_joins)?
        } else {
            vec![]
        };
        let mut selection_offset = None;
        let selection = if self.parse_keyword(Keyword::WHERE) {
            selection_offset = Some(self.peek_start());
            Some(self.parse_expr()?)
        } else {
            None
        };
        let returning = self.parse_returning()?;
        Ok(Stmt::Update(Box::new(UpdateStmt {
            table,
            assignments,
            from,
            selection,
            selection_offset,
            returning,
        })))
    }

    /// One SET item: a qualified column or a tuple target, `=`, and the
    /// value expression.
    pub(crate) fn parse_assignment(&mut self) -> Result<Assignment, ParserError> {
        let target = if self.parse_punct('(') {
            let columns = self.parse_comma_separated(|parser| {
                let mut parts = vec![parser.parse_identifier()?];
                while parser.parse_punct('.') {
                    parts.push(parser.parse_identifier()?);
                }
                Ok(parts)
            })?;
            self.expect_punct(')')?;
            AssignmentTarget::Tuple(columns)
        } else {
            let mut parts = vec![self.parse_identifier()?];
            while self.parse_punct('.') {
                parts.push(self.parse_identifier()?);
            }
            AssignmentTarget::Column(parts)
        };
        if self.cursor.next_if(|t| t.is_op("=")).is_none() {
            let found = self.cursor.peek().cloned();
            return self.expected("'=' in assignment", found.as_ref());
        }
        let value = if self.parse_keyword(Keyword::DEFAULT) {
            Expr::Default
        } else {
            self.parse_expr()?
        };
        Ok(Assignment { target, value })
    }

    /// Parses a DELETE statement; the Oracle `DELETE <table>` shorthand
    /// is accepted and normalised.
    pub(crate) fn parse_delete(&mut self) -> Result<Stmt, ParserError> {
        self.expect_keyword(Keyword::DELETE)?;
        self.parse_keyword(Keyword::FROM);
        let table = self.parse_object_name()?;
        let alias = if self.parse_keyword(Keyword::AS) {
            Some(self.parse_identifier()?)
        } else {
            match self.cursor.peek().map(|t| &t.kind) {
                Some(TokenKind::Ident | TokenKind::QuotedIdent(_)) => {
                    Some(self.parse_identifier()?)
                }
                _ => None,
            }
        };
        let using = if self.parse_keyword(Keyword::USING) {
            self.parse_comma_separated(Parser::parse_table_with_joins)?
        } else {
            vec![]
        };
        let mut selection_offset = None;
        let selection = if self.parse_keyword(Keyword::WHERE) {
            selection_offset = Some(self.peek_start());
            Some(self.parse_expr()?)
        } else {
            None
        };
        let returning = self.parse_returning()?;
        Ok(Stmt::Delete(Box::new(DeleteStmt {
            table,
            alias,
            using,
            selection,
            selection_offset,
            returning,
        })))
    }

    /// Parses a MERGE statement.
    pub(crate) fn parse_merge(&mut self) -> Result<Stmt, ParserError> {
        self.expect_keyword(Keyword::MERGE)?;
        self.expect_keyword(Keyword::INTO)?;
        let target = self.parse_table_factor()?;
        self.expect_keyword(Keyword::USING)?;
        let source = self.parse_table_factor()?;
        self.expect_keyword(Keyword::ON)?;
        let on = self.parse_expr()?;
        let mut clauses = vec![];
        while self.parse_keyword(Keyword::WHEN) {
            let matched = if self.parse_keyword(Keyword::NOT) {
                self.expect_keyword(Keyword::MATCHED)?;
                false
            } else {
                self.expect_keyword(Keyword::MATCHED)?;
                true
            };
            let condition = if self.parse_keyword(Keyword::AND) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.expect_keyword(Keyword::THEN)?;
            let action = if self.parse_keyword(Keyword::UPDATE) {
                self.expect_keyword(Keyword::SET)?;
                MergeAction::Update(self.parse_comma_separated(Parser::parse_assignment)?)
            } else if self.parse_keyword(Keyword::DELETE) {
                MergeAction::Delete
            } else {
                self.expect_keyword(Keyword::INSERT)?;
                let columns = if self.parse_punct('(') {
                    let cols = self.parse_comma_separated(Parser::parse_identifier)?;
                    self.expect_punct(')')?;
                    cols
                } else {
                    vec![]
                };
                let values = self.parse_values()?;
                MergeAction::Insert { columns, values }
            };
            clauses.push(MergeClause {
                matched,
                condition,
                action,
            });
        }
        if clauses.is_empty() {
            let found = self.cursor.peek().cloned();
            return self.expected("WHEN [NOT] MATCHED in MERGE", found.as_ref());
        }
        Ok(Stmt::Merge(Box::new(MergeStmt {
            target,
            source,
            on,
            clauses,
        })))
    }

    /// The optional `RETURNING` clause.
    pub(crate) fn parse_returning(&mut self) -> Result<Vec<SelectItem>, ParserError> {
        if self.parse_keyword(Keyword::RETURNING) {
            self.parse_comma_separated(Parser::parse_select_item)
        } else {
            Ok(vec![])
        }
    }
}
