//! DDL parsing: CREATE TABLE / VIEW / INDEX / routines, ALTER TABLE and
//! DROP.

#[cfg(not(feature = "std"))]
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec,
    vec::Vec,
};

use sqlriver_ast::statement::{
    AlterColumnChange, AlterTableAction, AlterTableStmt, ColumnConstraint, ColumnDef,
    CreateIndexStmt, CreateRoutineStmt, CreateTableStmt, CreateViewStmt, DropStmt, IndexDef,
    RoutineKind, Stmt, TableConstraint, TableConstraintDef, TableElement, TableElementKind,
};
use sqlriver_core::{Dialect, DirectiveKind, Keyword, Span, Token, TokenKind};

use crate::{error::ParserError, parser::Parser};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Dispatches `CREATE ...` to the specific statement parser.
    pub(crate) fn parse_create(&mut self) -> Result<Stmt, ParserError> {
        let mark = self.cursor.index();
        self.expect_keyword(Keyword::CREATE)?;
        let or_replace = self.parse_keywords(&[Keyword::OR, Keyword::REPLACE]);
        let temporary = if self.parse_keywords(&[Keyword::GLOBAL, Keyword::TEMPORARY]) {
            Some("GLOBAL TEMPORARY".to_string())
        } else if self.parse_keyword(Keyword::TEMPORARY) {
            Some("TEMPORARY".to_string())
        } else if self.parse_keyword(Keyword::TEMP) {
            Some("TEMP".to_string())
        } else {
            None
        };
        let unique = self.parse_keyword(Keyword::UNIQUE);
        let materialized = self.parse_keyword(Keyword::MATERIALIZED);

        if self.parse_keyword(Keyword::TABLE) {
            return self.parse_create_table(or_replace, temporary);
        }
        if self.parse_keyword(Keyword::VIEW) {
            return self.parse_create_view(or_replace, materialized);
        }
        if self.parse_keyword(Keyword::INDEX) {
            return self.parse_create_index(unique);
        }
        if self.peek_keyword(Keyword::PROCEDURE) {
            self.cursor.rewind(mark);
            return self.parse_create_routine(RoutineKind::Procedure);
        }
        if self.peek_keyword(Keyword::FUNCTION) {
            self.cursor.rewind(mark);
            return self.parse_create_routine(RoutineKind::Function);
        }
        if self.peek_keyword(Keyword::TRIGGER) {
            self.cursor.rewind(mark);
            return self.parse_create_routine(RoutineKind::Trigger);
        }
        // Shallow CREATE flavours re-capture from the CREATE keyword.
        let generic_kind = self.cursor.peek().and_then(|t| t.keyword());
        self.cursor.rewind(mark);
        match generic_kind {
            Some(Keyword::TYPE) | Some(Keyword::DOMAIN) => {
                Ok(Stmt::CreateType(self.capture_generic()))
            }
            Some(Keyword::SEQUENCE) => Ok(Stmt::CreateSequence(self.capture_generic())),
            Some(Keyword::PIPE) => Ok(Stmt::CreatePipe(self.capture_generic())),
            Some(Keyword::PUBLICATION) => Ok(Stmt::Publication(self.capture_generic())),
            _ => Ok(self.parse_raw_passthrough()),
        }
    }

    fn parse_create_table(
        &mut self,
        or_replace: bool,
        temporary: Option<String>,
    ) -> Result<Stmt, ParserError> {
        let if_not_exists = self.parse_keywords(&[Keyword::IF, Keyword::NOT, Keyword::EXISTS]);
        let name = self.parse_object_name()?;
        let mut elements = vec![];
        let mut trailing_comma = false;
        if self.parse_punct('(') {
            loop {
                if self.parse_punct(')') {
                    break;
                }
                elements.push(self.parse_table_element()?);
                if self.parse_punct(',') {
                    // A trailing comma before `)` is accepted and kept.
                    if self.parse_punct(')') {
                        trailing_comma = true;
                        break;
                    }
                } else {
                    self.expect_punct(')')?;
                    break;
                }
            }
        }
        let options = self.parse_table_options();
        let query = if self.parse_keyword(Keyword::AS) {
            Some(Box::new(self.parse_query(true)?))
        } else {
            None
        };
        Ok(Stmt::CreateTable(Box::new(CreateTableStmt {
            or_replace,
            temporary,
            if_not_exists,
            name,
            elements,
            trailing_comma,
            options,
            query,
        })))
    }

    /// The opaque table-options tail (`ENGINE=...`, `WITH (...)`,
    /// `PARTITION BY ...`, `ON [PRIMARY]`).
    fn parse_table_options(&mut self) -> Vec<Token> {
        let mut options = vec![];
        let mut depth = 0usize;
        while let Some(token) = self.cursor.peek() {
            match &token.kind {
                TokenKind::Eof => break,
                TokenKind::Punct(';') if depth == 0 => break,
                TokenKind::Directive(DirectiveKind::CustomTerminator) if depth == 0 => break,
                TokenKind::Directive(_) | TokenKind::MetaCommand => break,
                TokenKind::Keyword(Keyword::AS) if depth == 0 => break,
                TokenKind::Punct('(') => {
                    depth += 1;
                    options.push(self.cursor.bump());
                }
                TokenKind::Punct(')') => {
                    depth = depth.saturating_sub(1);
                    options.push(self.cursor.bump());
                }
                _ => options.push(self.cursor.bump()),
            }
        }
        options
    }

    fn parse_table_element(&mut self) -> Result<TableElement, ParserError> {
        let start = self.peek_start();
        let kind = if self.parse_keyword(Keyword::CONSTRAINT) {
            let name = self.parse_identifier()?;
            let constraint = self.parse_table_constraint_body()?;
            TableElementKind::Constraint(TableConstraintDef {
                name: Some(name),
                constraint,
            })
        } else if self.peek_is_table_constraint() {
            TableElementKind::Constraint(TableConstraintDef {
                name: None,
                constraint: self.parse_table_constraint_body()?,
            })
        } else if self.peek_is_index_def() {
            TableElementKind::Index(self.parse_index_def()?)
        } else if self.parse_keyword(Keyword::LIKE) {
            TableElementKind::Like(self.parse_object_name()?)
        } else {
            TableElementKind::Column(self.parse_column_def()?)
        };
        Ok(TableElement {
            kind,
            span: Span::new(start, self.prev_end()),
        })
    }

    fn peek_is_table_constraint(&self) -> bool {
        match self.cursor.peek().and_then(|t| t.keyword()) {
            Some(Keyword::PRIMARY | Keyword::FOREIGN | Keyword::CHECK | Keyword::EXCLUDE) => true,
            // UNIQUE is a table constraint only with a column list.
            Some(Keyword::UNIQUE) => self
                .cursor
                .peek_nth(1)
                .is_some_and(|t| t.is_punct('(') || t.is_keyword(Keyword::KEY)),
            _ => false,
        }
    }

    fn peek_is_index_def(&self) -> bool {
        let head = match self.cursor.peek().and_then(|t| t.keyword()) {
            Some(kw @ (Keyword::KEY | Keyword::INDEX | Keyword::FULLTEXT | Keyword::SPATIAL)) => {
                kw
            }
            _ => return false,
        };
        let after_name = |n: usize| {
            self.cursor
                .peek_nth(n)
                .is_some_and(|t| t.is_punct('('))
        };
        match head {
            // `KEY (a)` / `KEY idx (a)`.
            Keyword::KEY | Keyword::INDEX => {
                after_name(1)
                    || (matches!(
                        self.cursor.peek_nth(1).map(|t| &t.kind),
                        Some(TokenKind::Ident | TokenKind::QuotedIdent(_))
                    ) && after_name(2))
            }
            _ => true,
        }
    }

    fn parse_index_def(&mut self) -> Result<IndexDef, ParserError> {
        let prefix = self
            .parse_one_of_keywords(&[Keyword::FULLTEXT, Keyword::SPATIAL])
            .map(|kw| kw.as_str().to_string());
        let keyword = match self.parse_one_of_keywords(&[Keyword::KEY, Keyword::INDEX]) {
            Some(kw) => kw.as_str().to_string(),
            None => "INDEX".to_string(),
        };
        let name = if self.peek_punct('(') {
            None
        } else {
            Some(self.parse_identifier()?)
        };
        self.expect_punct('(')?;
        let columns = self.parse_comma_separated(Parser::parse_identifier)?;
        self.expect_punct(')')?;
        Ok(IndexDef {
            prefix,
            keyword,
            name,
            columns,
        })
    }

    fn parse_table_constraint_body(&mut self) -> Result<TableConstraint, ParserError> {
        if self.parse_keywords(&[Keyword::PRIMARY, Keyword::KEY]) {
            self.expect_punct('(')?;
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(')')?;
            return Ok(TableConstraint::PrimaryKey(columns));
        }
        if self.parse_keyword(Keyword::UNIQUE) {
            self.parse_keyword(Keyword::KEY);
            self.expect_punct('(')?;
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(')')?;
            return Ok(TableConstraint::Unique(columns));
        }
        if self.parse_keyword(Keyword::CHECK) {
            self.expect_punct('(')?;
            let expr = self.descend(|parser| parser.parse_expr())?;
            self.expect_punct(')')?;
            return Ok(TableConstraint::Check(Box::new(expr)));
        }
        if self.parse_keywords(&[Keyword::FOREIGN, Keyword::KEY]) {
            self.expect_punct('(')?;
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(')')?;
            self.expect_keyword(Keyword::REFERENCES)?;
            let table = self.parse_object_name()?;
            let referenced_columns = if self.parse_punct('(') {
                let cols = self.parse_comma_separated(Parser::parse_identifier)?;
                self.expect_punct(')')?;
                cols
            } else {
                vec![]
            };
            let actions = self.parse_referential_actions();
            return Ok(TableConstraint::ForeignKey {
                columns,
                table,
                referenced_columns,
                actions,
            });
        }
        if self.parse_keyword(Keyword::EXCLUDE) {
            let tokens = self.capture_constraint_tail();
            return Ok(TableConstraint::Exclude(tokens));
        }
        let found = self.cursor.peek().cloned();
        self.expected("a table constraint", found.as_ref())
    }

    /// `ON DELETE ...` / `ON UPDATE ...` / `MATCH ...` tails, verbatim.
    fn parse_referential_actions(&mut self) -> Vec<Token> {
        let mut actions = vec![];
        loop {
            let starts_action = self.cursor.peek().is_some_and(|t| {
                t.is_keyword(Keyword::ON) || t.text.eq_ignore_ascii_case("MATCH")
            });
            if !starts_action {
                break;
            }
            actions.push(self.cursor.bump());
            while self.cursor.peek().is_some_and(|t| {
                matches!(
                    t.keyword(),
                    Some(
                        Keyword::DELETE
                            | Keyword::UPDATE
                            | Keyword::CASCADE
                            | Keyword::RESTRICT
                            | Keyword::SET
                            | Keyword::NULL
                            | Keyword::DEFAULT
                            | Keyword::NO
                            | Keyword::ACTION
                            | Keyword::FULL
                    )
                )
            }) {
                actions.push(self.cursor.bump());
            }
        }
        actions
    }

    /// Collects a constraint tail with balanced parens, stopping at a
    /// top-level `,`, `)` or statement boundary.
    fn capture_constraint_tail(&mut self) -> Vec<Token> {
        let mut tokens = vec![];
        let mut depth = 0usize;
        while let Some(token) = self.cursor.peek() {
            match &token.kind {
                TokenKind::Eof => break,
                TokenKind::Punct(',' | ')') if depth == 0 => break,
                TokenKind::Punct(';') => break,
                TokenKind::Directive(_) | TokenKind::MetaCommand => break,
                TokenKind::Punct('(') => {
                    depth += 1;
                    tokens.push(self.cursor.bump());
                }
                TokenKind::Punct(')') => {
                    depth -= 1;
                    tokens.push(self.cursor.bump());
                }
                _ => tokens.push(self.cursor.bump()),
            }
        }
        tokens
    }

    /// Parses one column definition (shared with ALTER TABLE ADD/MODIFY).
    pub(crate) fn parse_column_def(&mut self) -> Result<ColumnDef, ParserError> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut constraints = vec![];
        loop {
            match self.cursor.peek().map(|t| &t.kind) {
                None
                | Some(TokenKind::Eof)
                | Some(TokenKind::Punct(',' | ')' | ';'))
                | Some(TokenKind::Directive(_))
                | Some(TokenKind::MetaCommand) => break,
                _ => constraints.push(self.parse_column_constraint()?),
            }
        }
        Ok(ColumnDef {
            name,
            data_type,
            constraints,
        })
    }

    fn parse_column_constraint(&mut self) -> Result<ColumnConstraint, ParserError> {
        if self.parse_keyword(Keyword::CONSTRAINT) {
            let name = self.parse_identifier()?;
            let inner = self.parse_column_constraint()?;
            return Ok(ColumnConstraint::Named {
                name,
                inner: Box::new(inner),
            });
        }
        if self.parse_keywords(&[Keyword::NOT, Keyword::NULL]) {
            return Ok(ColumnConstraint::NotNull);
        }
        if self.parse_keyword(Keyword::NULL) {
            return Ok(ColumnConstraint::Null);
        }
        if self.parse_keyword(Keyword::DEFAULT) {
            let expr = self.parse_expr()?;
            return Ok(ColumnConstraint::Default(expr));
        }
        if self.parse_keywords(&[Keyword::PRIMARY, Keyword::KEY]) {
            return Ok(ColumnConstraint::PrimaryKey);
        }
        if self.parse_keyword(Keyword::UNIQUE) {
            return Ok(ColumnConstraint::Unique);
        }
        if self.parse_keyword(Keyword::CHECK) {
            self.expect_punct('(')?;
            let expr = self.descend(|parser| parser.parse_expr())?;
            self.expect_punct(')')?;
            return Ok(ColumnConstraint::Check(Box::new(expr)));
        }
        if self.parse_keyword(Keyword::REFERENCES) {
            let table = self.parse_object_name()?;
            let columns = if self.parse_punct('(') {
                let cols = self.parse_comma_separated(Parser::parse_identifier)?;
                self.expect_punct(')')?;
                cols
            } else {
                vec![]
            };
            let actions = self.parse_referential_actions();
            return Ok(ColumnConstraint::References {
                table,
                columns,
                actions,
            });
        }
        if self.parse_keyword(Keyword::COLLATE) {
            return Ok(ColumnConstraint::Collate(self.parse_object_name()?));
        }
        // Everything else is carried verbatim: AUTO_INCREMENT,
        // IDENTITY(1,1), COMMENT '...', GENERATED ALWAYS AS (...), etc.
        let tokens = self.capture_verbatim_constraint();
        if tokens.is_empty() {
            let found = self.cursor.peek().cloned();
            return self.expected("a column constraint", found.as_ref());
        }
        Ok(ColumnConstraint::Verbatim(tokens))
    }

    /// Captures one verbatim column option: a word (or parameter/string)
    /// plus any parenthesised argument directly attached to it.
    fn capture_verbatim_constraint(&mut self) -> Vec<Token> {
        let mut tokens = vec![];
        loop {
            let stop = match self.cursor.peek().map(|t| &t.kind) {
                None
                | Some(TokenKind::Eof)
                | Some(TokenKind::Punct(',' | ')' | ';'))
                | Some(TokenKind::Directive(_))
                | Some(TokenKind::MetaCommand) => true,
                Some(TokenKind::Keyword(kw)) => matches!(
                    kw,
                    Keyword::NOT
                        | Keyword::NULL
                        | Keyword::DEFAULT
                        | Keyword::PRIMARY
                        | Keyword::UNIQUE
                        | Keyword::CHECK
                        | Keyword::REFERENCES
                        | Keyword::COLLATE
                        | Keyword::CONSTRAINT
                ),
                _ => false,
            };
            if stop {
                break;
            }
            let token = self.cursor.bump();
            let opens = token.is_punct('(');
            tokens.push(token);
            if opens {
                let mut depth = 1usize;
                while depth > 0 {
                    let token = self.cursor.bump();
                    match &token.kind {
                        TokenKind::Punct('(') => depth += 1,
                        TokenKind::Punct(')') => depth -= 1,
                        TokenKind::Eof => break,
                        _ => {}
                    }
                    tokens.push(token);
                }
            }
        }
        tokens
    }

    fn parse_create_view(
        &mut self,
        or_replace: bool,
        materialized: bool,
    ) -> Result<Stmt, ParserError> {
        let if_not_exists = self.parse_keywords(&[Keyword::IF, Keyword::NOT, Keyword::EXISTS]);
        let name = self.parse_object_name()?;
        let columns = if self.parse_punct('(') {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(')')?;
            cols
        } else {
            vec![]
        };
        self.expect_keyword(Keyword::AS)?;
        let query = self.parse_query(true)?;
        Ok(Stmt::CreateView(Box::new(CreateViewStmt {
            or_replace,
            materialized,
            if_not_exists,
            name,
            columns,
            query: Box::new(query),
        })))
    }

    fn parse_create_index(&mut self, unique: bool) -> Result<Stmt, ParserError> {
        let concurrently = self.parse_keyword(Keyword::CONCURRENTLY);
        let if_not_exists = self.parse_keywords(&[Keyword::IF, Keyword::NOT, Keyword::EXISTS]);
        let name = if self.peek_keyword(Keyword::ON) {
            None
        } else {
            Some(self.parse_object_name()?)
        };
        self.expect_keyword(Keyword::ON)?;
        let table = self.parse_object_name()?;
        let using = if self.parse_keyword(Keyword::USING) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.expect_punct('(')?;
        let columns = self.parse_comma_separated(Parser::parse_order_by_expr)?;
        self.expect_punct(')')?;
        let tail = self.capture_generic().tokens;
        Ok(Stmt::CreateIndex(Box::new(CreateIndexStmt {
            unique,
            concurrently,
            if_not_exists,
            name,
            table,
            using,
            columns,
            tail,
        })))
    }

    fn parse_create_routine(&mut self, kind: RoutineKind) -> Result<Stmt, ParserError> {
        let mut header = vec![];
        let mut depth = 0usize;
        let mut body = None;
        loop {
            let next = match self.cursor.peek() {
                Some(token) => token.clone(),
                None => break,
            };
            match &next.kind {
                TokenKind::Eof => break,
                TokenKind::Punct(';') if depth == 0 => break,
                TokenKind::Directive(DirectiveKind::CustomTerminator) if depth == 0 => break,
                TokenKind::Directive(DirectiveKind::Slash) => break,
                TokenKind::Keyword(Keyword::BEGIN) if depth == 0 => {
                    body = Some(self.parse_block()?);
                    break;
                }
                TokenKind::Keyword(Keyword::DECLARE) if depth == 0 => {
                    if let Stmt::PlsqlBlock(block) = self.parse_plsql_block()? {
                        body = Some(*block);
                    }
                    break;
                }
                TokenKind::Punct('(') => {
                    depth += 1;
                    header.push(self.cursor.bump());
                }
                TokenKind::Punct(')') => {
                    depth = depth.saturating_sub(1);
                    header.push(self.cursor.bump());
                }
                _ => header.push(self.cursor.bump()),
            }
        }
        Ok(Stmt::CreateRoutine(Box::new(CreateRoutineStmt {
            kind,
            header,
            body,
        })))
    }

    /// Parses `ALTER TABLE` (and dispatches ALTER DOMAIN / PUBLICATION
    /// to the shallow printer).
    pub(crate) fn parse_alter(&mut self) -> Result<Stmt, ParserError> {
        let mark = self.cursor.index();
        self.expect_keyword(Keyword::ALTER)?;
        match self.cursor.peek().and_then(|t| t.keyword()) {
            Some(Keyword::TABLE) => {
                self.cursor.next();
                self.parse_alter_table()
            }
            Some(Keyword::DOMAIN) => {
                self.cursor.rewind(mark);
                Ok(Stmt::AlterDomain(self.capture_generic()))
            }
            Some(Keyword::PUBLICATION) => {
                self.cursor.rewind(mark);
                Ok(Stmt::AlterPublication(self.capture_generic()))
            }
            _ => {
                self.cursor.rewind(mark);
                Ok(self.parse_raw_passthrough())
            }
        }
    }

    fn parse_alter_table(&mut self) -> Result<Stmt, ParserError> {
        let if_exists = self.parse_keywords(&[Keyword::IF, Keyword::EXISTS]);
        let only = self.parse_keyword(Keyword::ONLY);
        let name = self.parse_object_name()?;
        let actions = self.parse_comma_separated(Parser::parse_alter_table_action)?;
        Ok(Stmt::AlterTable(Box::new(AlterTableStmt {
            if_exists,
            only,
            name,
            actions,
        })))
    }

    fn parse_alter_table_action(&mut self) -> Result<AlterTableAction, ParserError> {
        if self.parse_keyword(Keyword::ADD) {
            if self.parse_keyword(Keyword::CONSTRAINT) {
                let name = self.parse_identifier()?;
                let constraint = self.parse_table_constraint_body()?;
                return Ok(AlterTableAction::AddConstraint(TableConstraintDef {
                    name: Some(name),
                    constraint,
                }));
            }
            if self.peek_is_table_constraint() {
                return Ok(AlterTableAction::AddConstraint(TableConstraintDef {
                    name: None,
                    constraint: self.parse_table_constraint_body()?,
                }));
            }
            if self.peek_is_index_def() {
                return Ok(AlterTableAction::AddIndex(self.parse_index_def()?));
            }
            let explicit_column = self.parse_keyword(Keyword::COLUMN);
            let column = self.parse_column_def()?;
            return Ok(AlterTableAction::AddColumn {
                explicit_column,
                column,
            });
        }
        if self.parse_keyword(Keyword::DROP) {
            if self.parse_keyword(Keyword::CONSTRAINT) {
                return Ok(AlterTableAction::DropConstraint(self.parse_identifier()?));
            }
            let explicit_column = self.parse_keyword(Keyword::COLUMN);
            let name = self.parse_identifier()?;
            let behavior = self
                .parse_one_of_keywords(&[Keyword::CASCADE, Keyword::RESTRICT])
                .map(|kw| kw.as_str().to_string());
            return Ok(AlterTableAction::DropColumn {
                explicit_column,
                name,
                behavior,
            });
        }
        if self.parse_keyword(Keyword::ALTER) {
            self.parse_keyword(Keyword::COLUMN);
            let name = self.parse_identifier()?;
            let change = if self.parse_keywords(&[Keyword::SET, Keyword::DEFAULT]) {
                AlterColumnChange::SetDefault(self.parse_expr()?)
            } else if self.parse_keywords(&[Keyword::DROP, Keyword::DEFAULT]) {
                AlterColumnChange::DropDefault
            } else if self.parse_keywords(&[Keyword::SET, Keyword::NOT, Keyword::NULL]) {
                AlterColumnChange::SetNotNull
            } else if self.parse_keywords(&[Keyword::DROP, Keyword::NOT, Keyword::NULL]) {
                AlterColumnChange::DropNotNull
            } else {
                // `[SET DATA] TYPE <type> [USING <expr>]`.
                self.parse_keyword(Keyword::SET);
                self.cursor.next_if(|t| t.text.eq_ignore_ascii_case("DATA"));
                self.expect_keyword(Keyword::TYPE)?;
                let data_type = self.parse_data_type()?;
                let using = if self.parse_keyword(Keyword::USING) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                AlterColumnChange::SetType { data_type, using }
            };
            return Ok(AlterTableAction::AlterColumn { name, change });
        }
        if self.parse_keyword(Keyword::MODIFY) {
            self.parse_keyword(Keyword::COLUMN);
            return Ok(AlterTableAction::ModifyColumn(self.parse_column_def()?));
        }
        if self.parse_keywords(&[Keyword::OWNER, Keyword::TO]) {
            return Ok(AlterTableAction::OwnerTo(self.parse_identifier()?));
        }
        if self.parse_keywords(&[Keyword::SET, Keyword::SCHEMA]) {
            return Ok(AlterTableAction::SetSchema(self.parse_identifier()?));
        }
        if self.parse_keywords(&[Keyword::RENAME, Keyword::TO]) {
            return Ok(AlterTableAction::RenameTo(self.parse_identifier()?));
        }
        let tokens = self.capture_constraint_tail();
        if tokens.is_empty() {
            let found = self.cursor.peek().cloned();
            return self.expected("an ALTER TABLE action", found.as_ref());
        }
        Ok(AlterTableAction::Verbatim(tokens))
    }

    /// Parses a DROP statement.
    pub(crate) fn parse_drop(&mut self) -> Result<Stmt, ParserError> {
        self.expect_keyword(Keyword::DROP)?;
        let mut object_kind = vec![];
        if self.parse_keyword(Keyword::MATERIALIZED) {
            object_kind.push("MATERIALIZED".to_string());
        }
        let kind_token = self.cursor.bump();
        match &kind_token.kind {
            TokenKind::Keyword(_) | TokenKind::Ident => {
                object_kind.push(kind_token.text.to_uppercase());
            }
            _ => return self.expected("an object kind after DROP", Some(&kind_token)),
        }
        let if_exists = self.parse_keywords(&[Keyword::IF, Keyword::EXISTS]);
        let names = self.parse_comma_separated(Parser::parse_object_name)?;
        let behavior = self
            .parse_one_of_keywords(&[Keyword::CASCADE, Keyword::RESTRICT])
            .map(|kw| kw.as_str().to_string());
        Ok(Stmt::Drop(Box::new(DropStmt {
            object_kind,
            if_exists,
            names,
            behavior,
        })))
    }
}
