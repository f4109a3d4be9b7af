mod ddl;
mod dml;
mod expression;
mod query;
mod table;
mod types;

#[cfg(not(feature = "std"))]
use alloc::{
    boxed::Box,
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};
use core::fmt::Display;

use sqlriver_ast::{
    statement::{
        BlockStmt, CopyStmt, CteStmt, DeclareCursorStmt, ExplainStmt, GenericStmt, PrepareStmt,
        RawStmt, Statement, Stmt, Terminator, TransactionKind, TransactionStmt, TsqlIfStmt,
    },
    types::{Ident, ObjectName},
};
use sqlriver_core::{
    Dialect, DialectKind, DirectiveKind, Keyword, Span, Token, TokenKind,
};
use sqlriver_lexer::{Lexer, LexerConfig};

use crate::{
    config::ParserConfig,
    cursor::TokenCursor,
    error::{MaxDepthError, ParseError, ParserError},
};

/// Statement-head keywords used by the implicit boundary heuristic.
const STATEMENT_HEAD_KEYWORDS: &[Keyword] = &[
    Keyword::ALTER,
    Keyword::ANALYZE,
    Keyword::BEGIN,
    Keyword::CALL,
    Keyword::COMMENT,
    Keyword::COMMIT,
    Keyword::COPY,
    Keyword::CREATE,
    Keyword::DEALLOCATE,
    Keyword::DECLARE,
    Keyword::DELETE,
    Keyword::DO,
    Keyword::DROP,
    Keyword::EXECUTE,
    Keyword::EXPLAIN,
    Keyword::GRANT,
    Keyword::INSERT,
    Keyword::LISTEN,
    Keyword::MERGE,
    Keyword::NOTIFY,
    Keyword::PREPARE,
    Keyword::REFRESH,
    Keyword::RESET,
    Keyword::REVOKE,
    Keyword::ROLLBACK,
    Keyword::SAVEPOINT,
    Keyword::SELECT,
    Keyword::SET,
    Keyword::SHOW,
    Keyword::TRUNCATE,
    Keyword::UPDATE,
    Keyword::USE,
    Keyword::VACUUM,
    Keyword::WITH,
];

/// Keywords that can never stand as bare identifiers.
pub(crate) const RESERVED_FOR_IDENT: &[Keyword] = &[
    Keyword::ALL,
    Keyword::AND,
    Keyword::AS,
    Keyword::BETWEEN,
    Keyword::CASE,
    Keyword::CAST,
    Keyword::CREATE,
    Keyword::CROSS,
    Keyword::DELETE,
    Keyword::DISTINCT,
    Keyword::ELSE,
    Keyword::END,
    Keyword::EXCEPT,
    Keyword::EXISTS,
    Keyword::FALSE,
    Keyword::FETCH,
    Keyword::FOR,
    Keyword::FROM,
    Keyword::FULL,
    Keyword::GROUP,
    Keyword::HAVING,
    Keyword::IN,
    Keyword::INNER,
    Keyword::INSERT,
    Keyword::INTERSECT,
    Keyword::INTO,
    Keyword::IS,
    Keyword::JOIN,
    Keyword::LATERAL,
    Keyword::LIMIT,
    Keyword::MERGE,
    Keyword::MINUS,
    Keyword::NATURAL,
    Keyword::NOT,
    Keyword::NULL,
    Keyword::OFFSET,
    Keyword::ON,
    Keyword::OR,
    Keyword::ORDER,
    Keyword::OUTER,
    Keyword::RETURNING,
    Keyword::SELECT,
    Keyword::THEN,
    Keyword::TRUE,
    Keyword::UNION,
    Keyword::UPDATE,
    Keyword::USING,
    Keyword::VALUES,
    Keyword::WHEN,
    Keyword::WHERE,
    Keyword::WINDOW,
    Keyword::WITH,
];

/// SQL parser: top-down recursive descent with one-token lookahead and
/// dialect-keyed predicates.
pub struct Parser<'a, D: Dialect> {
    pub(crate) dialect: &'a D,
    pub(crate) config: ParserConfig,
    source: &'a str,
    pub(crate) cursor: TokenCursor,
    depth: usize,
}

impl<'a, D: Dialect> Parser<'a, D> {
    /// Creates a parser over an already tokenized source.
    pub fn new_with_tokens(dialect: &'a D, source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            dialect,
            config: ParserConfig::default(),
            source,
            cursor: TokenCursor::new(tokens),
            depth: 0,
        }
    }

    /// Tokenizes and wraps the given SQL text.
    pub fn new_with_sql(dialect: &'a D, sql: &'a str) -> Result<Self, ParserError> {
        let tokens = Lexer::with_config(dialect, sql, LexerConfig::default()).tokenize()?;
        Ok(Self::new_with_tokens(dialect, sql, tokens))
    }

    /// Replaces the parser configuration.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses the whole input into a statement sequence.
    ///
    /// In recovery mode a structural error degrades the offending
    /// statement to a raw pass-through covering its exact source bytes
    /// and invokes `on_recover`; `MaxDepthError` is never recovered.
    pub fn parse_statements(
        &mut self,
        mut on_recover: Option<&mut dyn FnMut(&ParseError)>,
    ) -> Result<Vec<Statement>, ParserError> {
        let mut statements = vec![];
        loop {
            while self.cursor.next_if(|t| t.is_punct(';')).is_some() {}
            if self.cursor.at_eof() {
                break;
            }
            let mark = self.cursor.index();
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(ParserError::Parse(err)) if self.config.recover => {
                    self.cursor.rewind(mark);
                    let mut stmt = self.recover_statement();
                    stmt.terminator = self.consume_terminator();
                    if let Some(callback) = on_recover.as_deref_mut() {
                        callback(&err);
                    }
                    statements.push(stmt);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(statements)
    }

    /// Parses one statement including its terminator.
    pub fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        let start = self.peek_start();
        let stmt = self.parse_stmt_kind()?;
        let end = self.prev_end();
        let terminator = self.consume_terminator();
        Ok(Statement {
            stmt,
            span: Span::new(start, end),
            terminator,
        })
    }

    /// Parses one statement without consuming its terminator, for nested
    /// positions (EXPLAIN, PREPARE, block bodies).
    pub(crate) fn parse_nested_statement(&mut self) -> Result<Statement, ParserError> {
        let start = self.peek_start();
        let stmt = self.parse_stmt_kind()?;
        let end = self.prev_end();
        Ok(Statement {
            stmt,
            span: Span::new(start, end),
            terminator: Terminator::None,
        })
    }

    fn parse_stmt_kind(&mut self) -> Result<Stmt, ParserError> {
        let token = match self.cursor.peek() {
            Some(token) => token.clone(),
            None => return self.expected("a statement", None::<&Token>),
        };
        match &token.kind {
            TokenKind::MetaCommand => {
                self.cursor.next();
                Ok(Stmt::MetaCommand(RawStmt { text: token.text }))
            }
            TokenKind::Directive(DirectiveKind::Delimiter) => {
                self.cursor.next();
                Ok(Stmt::DelimiterChange(RawStmt { text: token.text }))
            }
            TokenKind::Directive(DirectiveKind::Go) => {
                self.cursor.next();
                Ok(Stmt::GoBatch(RawStmt { text: token.text }))
            }
            TokenKind::Directive(DirectiveKind::Slash) => {
                self.cursor.next();
                Ok(Stmt::SlashTerminator(RawStmt { text: token.text }))
            }
            TokenKind::Keyword(kw) => self.parse_keyword_statement(*kw),
            _ => Ok(self.parse_raw_passthrough()),
        }
    }

    fn parse_keyword_statement(&mut self, kw: Keyword) -> Result<Stmt, ParserError> {
        match kw {
            Keyword::SELECT | Keyword::VALUES => {
                Ok(Stmt::Select(Box::new(self.parse_query(true)?)))
            }
            Keyword::WITH => self.parse_with_statement(),
            Keyword::INSERT => {
                if self
                    .cursor
                    .peek_nth(1)
                    .is_some_and(|t| t.is_keyword(Keyword::ALL))
                {
                    // Oracle multi-table INSERT ALL.
                    Ok(Stmt::OracleInsertAll(self.capture_generic()))
                } else {
                    self.parse_insert()
                }
            }
            Keyword::UPDATE => self.parse_update(),
            Keyword::DELETE => self.parse_delete(),
            Keyword::MERGE => self.parse_merge(),
            Keyword::CREATE => self.parse_create(),
            Keyword::ALTER => self.parse_alter(),
            Keyword::DROP => self.parse_drop(),
            Keyword::TRUNCATE => Ok(Stmt::Truncate(self.capture_generic())),
            Keyword::GRANT => Ok(Stmt::Grant(self.capture_generic())),
            Keyword::REVOKE => Ok(Stmt::Revoke(self.capture_generic())),
            Keyword::COMMENT => Ok(Stmt::CommentOn(self.capture_generic())),
            Keyword::EXPLAIN => self.parse_explain(),
            Keyword::COPY => self.parse_copy(),
            Keyword::BEGIN => self.parse_begin(),
            Keyword::START => self.parse_transaction(TransactionKind::Start),
            Keyword::COMMIT => self.parse_transaction(TransactionKind::Commit),
            Keyword::ROLLBACK => self.parse_transaction(TransactionKind::Rollback),
            Keyword::SAVEPOINT => self.parse_transaction(TransactionKind::Savepoint),
            Keyword::RELEASE => self.parse_transaction(TransactionKind::Release),
            Keyword::SET => Ok(Stmt::SetSession(self.capture_generic())),
            Keyword::RESET => Ok(Stmt::Reset(self.capture_generic())),
            Keyword::USE => Ok(Stmt::Use(self.capture_generic())),
            Keyword::SHOW => Ok(Stmt::Show(self.capture_generic())),
            Keyword::LISTEN | Keyword::UNLISTEN => Ok(Stmt::Listen(self.capture_generic())),
            Keyword::NOTIFY => Ok(Stmt::Notify(self.capture_generic())),
            Keyword::PREPARE => self.parse_prepare(),
            Keyword::EXECUTE => Ok(Stmt::Execute(self.capture_generic())),
            Keyword::DEALLOCATE => Ok(Stmt::Deallocate(self.capture_generic())),
            Keyword::ANALYZE => Ok(Stmt::Analyze(self.capture_generic())),
            Keyword::VACUUM => Ok(Stmt::Vacuum(self.capture_generic())),
            Keyword::CALL => Ok(Stmt::Call(self.capture_generic())),
            Keyword::REFRESH => Ok(Stmt::RefreshMaterializedView(self.capture_generic())),
            Keyword::DECLARE => self.parse_declare(),
            Keyword::DO => Ok(Stmt::DoBlock(self.capture_generic())),
            Keyword::IF => self.parse_tsql_if(),
            _ => Ok(self.parse_raw_passthrough()),
        }
    }

    /// `WITH ... { SELECT | INSERT | UPDATE | DELETE | MERGE }`.
    fn parse_with_statement(&mut self) -> Result<Stmt, ParserError> {
        let mark = self.cursor.index();
        let with = self.parse_with()?;
        match self.cursor.peek().and_then(|t| t.keyword()) {
            Some(Keyword::SELECT) | Some(Keyword::VALUES) | None => {
                // Re-parse as a plain query so the WITH stays attached to it.
                self.cursor.rewind(mark);
                Ok(Stmt::Select(Box::new(self.parse_query(true)?)))
            }
            Some(Keyword::INSERT) => Ok(Stmt::Cte(Box::new(CteStmt {
                with,
                main: Box::new(self.parse_insert()?),
            }))),
            Some(Keyword::UPDATE) => Ok(Stmt::Cte(Box::new(CteStmt {
                with,
                main: Box::new(self.parse_update()?),
            }))),
            Some(Keyword::DELETE) => Ok(Stmt::Cte(Box::new(CteStmt {
                with,
                main: Box::new(self.parse_delete()?),
            }))),
            Some(Keyword::MERGE) => Ok(Stmt::Cte(Box::new(CteStmt {
                with,
                main: Box::new(self.parse_merge()?),
            }))),
            _ => {
                let found = self.cursor.peek().cloned();
                self.expected("a DML statement after WITH", found.as_ref())
            }
        }
    }

    fn parse_explain(&mut self) -> Result<Stmt, ParserError> {
        self.expect_keyword(Keyword::EXPLAIN)?;
        let mut options = vec![];
        // Collect option tokens until a statement head keyword shows up.
        while let Some(token) = self.cursor.peek() {
            match token.keyword() {
                Some(kw)
                    if STATEMENT_HEAD_KEYWORDS.contains(&kw)
                        && !matches!(kw, Keyword::ANALYZE | Keyword::VACUUM) =>
                {
                    break
                }
                _ if token.is_punct(';') || token.kind == TokenKind::Eof => break,
                _ => options.push(self.cursor.bump()),
            }
        }
        let inner = Box::new(self.parse_nested_statement()?);
        Ok(Stmt::Explain(Box::new(ExplainStmt { options, inner })))
    }

    fn parse_copy(&mut self) -> Result<Stmt, ParserError> {
        let head = self.capture_generic();
        let from_stdin = head.tokens.windows(2).any(|pair| {
            pair[0].is_keyword(Keyword::FROM) && pair[1].text.eq_ignore_ascii_case("stdin")
        });
        let mut data = None;
        if from_stdin {
            // The data block runs from just after the terminator up to the
            // `\.` line, preserved byte-for-byte.
            self.consume_terminator();
            let data_start = self.prev_end();
            let mut end = data_start;
            loop {
                match self.cursor.peek().map(|t| t.kind.clone()) {
                    Some(TokenKind::Directive(DirectiveKind::CopyEnd)) => {
                        let tok = self.cursor.bump();
                        end = tok.span.start;
                        break;
                    }
                    Some(TokenKind::Eof) | None => {
                        end = self.prev_end();
                        break;
                    }
                    _ => {
                        self.cursor.next();
                    }
                }
            }
            data = Some(self.source[data_start..end].to_string());
            return Ok(Stmt::Copy(Box::new(CopyStmt { head, data })));
        }
        Ok(Stmt::Copy(Box::new(CopyStmt { head, data })))
    }

    fn parse_prepare(&mut self) -> Result<Stmt, ParserError> {
        self.expect_keyword(Keyword::PREPARE)?;
        let mut head = vec![];
        while let Some(token) = self.cursor.peek() {
            if token.is_keyword(Keyword::AS) || token.is_punct(';') || token.kind == TokenKind::Eof
            {
                break;
            }
            head.push(self.cursor.bump());
        }
        if self.parse_keyword(Keyword::AS) {
            let inner = Box::new(self.parse_nested_statement()?);
            Ok(Stmt::Prepare(Box::new(PrepareStmt { head, inner })))
        } else {
            let found = self.cursor.peek().cloned();
            self.expected("AS in PREPARE", found.as_ref())
        }
    }

    fn parse_declare(&mut self) -> Result<Stmt, ParserError> {
        if self.dialect.kind() == DialectKind::Oracle {
            return self.parse_plsql_block();
        }
        self.expect_keyword(Keyword::DECLARE)?;
        let mut head = vec![];
        let mut saw_cursor_for = false;
        while let Some(token) = self.cursor.peek() {
            if token.is_punct(';') || token.kind == TokenKind::Eof {
                break;
            }
            if token.is_keyword(Keyword::FOR) {
                saw_cursor_for = true;
                self.cursor.next();
                break;
            }
            head.push(self.cursor.bump());
        }
        let query = if saw_cursor_for {
            Some(Box::new(self.parse_nested_statement()?))
        } else {
            None
        };
        Ok(Stmt::DeclareCursor(Box::new(DeclareCursorStmt {
            head,
            query,
        })))
    }

    /// `BEGIN`: either a transaction statement or a procedural block.
    fn parse_begin(&mut self) -> Result<Stmt, ParserError> {
        let next = self.cursor.peek_nth(1);
        let is_transaction = match next.map(|t| &t.kind) {
            Some(TokenKind::Punct(';')) | Some(TokenKind::Eof) | None => true,
            Some(TokenKind::Keyword(Keyword::TRANSACTION))
            | Some(TokenKind::Keyword(Keyword::WORK))
            | Some(TokenKind::Keyword(Keyword::ISOLATION)) => true,
            Some(TokenKind::Ident) => next.is_some_and(|t| t.text.eq_ignore_ascii_case("TRAN")),
            _ => false,
        };
        if is_transaction {
            self.parse_transaction(TransactionKind::Begin)
        } else if self.dialect.kind() == DialectKind::Oracle {
            self.parse_plsql_block()
        } else {
            Ok(Stmt::TsqlBeginBlock(Box::new(self.parse_block()?)))
        }
    }

    fn parse_transaction(&mut self, kind: TransactionKind) -> Result<Stmt, ParserError> {
        // Consume the verb (two words for START TRANSACTION).
        self.cursor.next();
        if kind == TransactionKind::Start {
            self.parse_keyword(Keyword::TRANSACTION);
        }
        let tail = self.capture_generic().tokens;
        Ok(Stmt::Transaction(Box::new(TransactionStmt { kind, tail })))
    }

    /// `[DECLARE ...] BEGIN ... [EXCEPTION ...] END`.
    pub(crate) fn parse_plsql_block(&mut self) -> Result<Stmt, ParserError> {
        let mut declare = vec![];
        if self.parse_keyword(Keyword::DECLARE) {
            while let Some(token) = self.cursor.peek() {
                if token.is_keyword(Keyword::BEGIN) || token.kind == TokenKind::Eof {
                    break;
                }
                declare.push(self.cursor.bump());
            }
        }
        let mut block = self.parse_block()?;
        block.declare = declare;
        Ok(Stmt::PlsqlBlock(Box::new(block)))
    }

    /// `BEGIN <statements> [EXCEPTION <handlers>] END [<label>]`.
    pub(crate) fn parse_block(&mut self) -> Result<BlockStmt, ParserError> {
        self.expect_keyword(Keyword::BEGIN)?;
        let mut statements = vec![];
        let mut exception = vec![];
        loop {
            while self.cursor.next_if(|t| t.is_punct(';')).is_some() {}
            match self.cursor.peek().map(|t| &t.kind) {
                Some(TokenKind::Keyword(Keyword::END)) => {
                    self.cursor.next();
                    // Optional block label after END.
                    self.cursor.next_if(|t| {
                        matches!(t.kind, TokenKind::Ident | TokenKind::QuotedIdent(_))
                    });
                    break;
                }
                Some(TokenKind::Keyword(Keyword::EXCEPTION)) => {
                    // The handler section is preserved verbatim up to the
                    // matching END.
                    self.cursor.next();
                    let mut depth = 0usize;
                    while let Some(token) = self.cursor.peek() {
                        match &token.kind {
                            TokenKind::Keyword(Keyword::BEGIN) => depth += 1,
                            TokenKind::Keyword(Keyword::END) if depth == 0 => break,
                            TokenKind::Keyword(Keyword::END) => depth -= 1,
                            TokenKind::Eof => break,
                            _ => {}
                        }
                        exception.push(self.cursor.bump());
                    }
                }
                Some(TokenKind::Eof) | None => {
                    let found = self.cursor.peek().cloned();
                    return self.expected("END to close the block", found.as_ref());
                }
                _ => {
                    let mut stmt = self.parse_nested_statement()?;
                    if self.cursor.next_if(|t| t.is_punct(';')).is_some() {
                        stmt.terminator = Terminator::Semicolon;
                    }
                    statements.push(stmt);
                }
            }
        }
        Ok(BlockStmt {
            declare: vec![],
            statements,
            exception,
        })
    }

    fn parse_tsql_if(&mut self) -> Result<Stmt, ParserError> {
        self.expect_keyword(Keyword::IF)?;
        let condition = self.parse_expr()?;
        let then_branch = Box::new(self.parse_branch_statement()?);
        let else_branch = if self.parse_keyword(Keyword::ELSE) {
            Some(Box::new(self.parse_branch_statement()?))
        } else {
            None
        };
        Ok(Stmt::TsqlIf(Box::new(TsqlIfStmt {
            condition,
            then_branch,
            else_branch,
        })))
    }

    /// One branch of a T-SQL IF: a block or a single statement with its
    /// own terminator.
    fn parse_branch_statement(&mut self) -> Result<Statement, ParserError> {
        let mut stmt = self.parse_nested_statement()?;
        if self.cursor.next_if(|t| t.is_punct(';')).is_some() {
            stmt.terminator = Terminator::Semicolon;
        }
        Ok(stmt)
    }

    // ------------------------------------------------------------------
    // Capture, recovery and boundaries
    // ------------------------------------------------------------------

    /// Collects the significant tokens of a shallow statement up to the
    /// next statement boundary.
    pub(crate) fn capture_generic(&mut self) -> GenericStmt {
        let mut tokens = vec![];
        let mut depth = 0usize;
        let mut case_depth = 0usize;
        while let Some(token) = self.cursor.peek() {
            match &token.kind {
                TokenKind::Eof => break,
                TokenKind::Punct(';') if depth == 0 => break,
                TokenKind::Directive(DirectiveKind::CustomTerminator) if depth == 0 => break,
                TokenKind::Directive(_) => break,
                TokenKind::MetaCommand => break,
                TokenKind::Punct('(') => {
                    depth += 1;
                    tokens.push(self.cursor.bump());
                }
                TokenKind::Punct(')') => {
                    depth = depth.saturating_sub(1);
                    tokens.push(self.cursor.bump());
                }
                TokenKind::Keyword(Keyword::CASE) => {
                    case_depth += 1;
                    tokens.push(self.cursor.bump());
                }
                // END closes a CASE here; an unmatched END (or a bare
                // ELSE) belongs to an enclosing block or IF.
                TokenKind::Keyword(Keyword::END) if case_depth > 0 => {
                    case_depth -= 1;
                    tokens.push(self.cursor.bump());
                }
                TokenKind::Keyword(Keyword::END) => break,
                TokenKind::Keyword(Keyword::ELSE) if case_depth == 0 => break,
                TokenKind::Keyword(kw)
                    if depth == 0
                        && !tokens.is_empty()
                        && STATEMENT_HEAD_KEYWORDS.contains(kw)
                        && self.last_is_clause_terminal(&tokens) =>
                {
                    break
                }
                _ => tokens.push(self.cursor.bump()),
            }
        }
        GenericStmt { tokens }
    }

    /// True when the last captured token can legally end a statement, so
    /// a following statement-head keyword is an implicit boundary.
    fn last_is_clause_terminal(&self, tokens: &[Token]) -> bool {
        match tokens.last().map(|t| &t.kind) {
            Some(TokenKind::Ident)
            | Some(TokenKind::QuotedIdent(_))
            | Some(TokenKind::Number)
            | Some(TokenKind::Str(_))
            | Some(TokenKind::Parameter(_))
            | Some(TokenKind::Punct(')')) => true,
            Some(TokenKind::Keyword(kw)) => matches!(
                kw,
                Keyword::NULL
                    | Keyword::TRUE
                    | Keyword::FALSE
                    | Keyword::END
                    | Keyword::DEFAULT
                    | Keyword::LOCKED
                    | Keyword::NOWAIT
            ),
            _ => false,
        }
    }

    /// Degrades the statement at the cursor to a raw pass-through whose
    /// text is the exact source bytes up to the next boundary.
    pub(crate) fn parse_raw_passthrough(&mut self) -> Stmt {
        let raw = self.recover_statement();
        raw.stmt
    }

    /// Scans to the next statement boundary and wraps the skipped span as
    /// a raw pass-through statement.
    pub(crate) fn recover_statement(&mut self) -> Statement {
        let start = self.peek_start();
        let mut end = start;
        let mut depth = 0usize;
        let mut case_depth = 0usize;
        let mut any = false;
        while let Some(token) = self.cursor.peek() {
            match &token.kind {
                TokenKind::Eof => break,
                TokenKind::Punct(';') if depth == 0 => break,
                TokenKind::Directive(DirectiveKind::CustomTerminator) if depth == 0 => break,
                TokenKind::Directive(_) | TokenKind::MetaCommand if any => break,
                TokenKind::Keyword(Keyword::END) if case_depth == 0 && any => break,
                TokenKind::Keyword(Keyword::ELSE) if case_depth == 0 && any => break,
                TokenKind::Keyword(kw)
                    if depth == 0
                        && any
                        && STATEMENT_HEAD_KEYWORDS.contains(kw)
                        && self.prev_is_clause_terminal() =>
                {
                    break
                }
                kind => {
                    match kind {
                        TokenKind::Punct('(') => depth += 1,
                        TokenKind::Punct(')') => depth = depth.saturating_sub(1),
                        TokenKind::Keyword(Keyword::CASE) => case_depth += 1,
                        TokenKind::Keyword(Keyword::END) => {
                            case_depth = case_depth.saturating_sub(1)
                        }
                        _ => {}
                    }
                    let token = self.cursor.bump();
                    end = token.span.end;
                    any = true;
                }
            }
        }
        let text = self.source[start..end].to_string();
        Statement {
            stmt: Stmt::RawPassthrough(RawStmt { text }),
            span: Span::new(start, end),
            terminator: Terminator::None,
        }
    }

    fn prev_is_clause_terminal(&self) -> bool {
        match self.cursor.prev_token().map(|t| &t.kind) {
            Some(TokenKind::Ident)
            | Some(TokenKind::QuotedIdent(_))
            | Some(TokenKind::Number)
            | Some(TokenKind::Str(_))
            | Some(TokenKind::Parameter(_))
            | Some(TokenKind::Punct(')')) => true,
            Some(TokenKind::Keyword(kw)) => matches!(
                kw,
                Keyword::NULL | Keyword::TRUE | Keyword::FALSE | Keyword::END | Keyword::DEFAULT
            ),
            _ => false,
        }
    }

    /// Consumes a trailing `;` or custom terminator, if present.
    pub(crate) fn consume_terminator(&mut self) -> Terminator {
        if let Some(token) = self.cursor.next_if(|t| t.is_punct(';')) {
            let _ = token;
            return Terminator::Semicolon;
        }
        if let Some(token) = self
            .cursor
            .next_if(|t| t.kind == TokenKind::Directive(DirectiveKind::CustomTerminator))
        {
            return Terminator::Custom(token.text);
        }
        Terminator::None
    }

    // ------------------------------------------------------------------
    // Token-level helpers
    // ------------------------------------------------------------------

    /// Byte offset where the next token starts.
    pub(crate) fn peek_start(&self) -> usize {
        self.cursor.peek().map(|t| t.span.start).unwrap_or(0)
    }

    /// Byte offset where the previous token ended.
    pub(crate) fn prev_end(&self) -> usize {
        self.cursor.prev_token().map(|t| t.span.end).unwrap_or(0)
    }

    /// Report an unexpected token.
    pub(crate) fn expected<R>(
        &self,
        expected: impl Display,
        found: Option<&Token>,
    ) -> Result<R, ParserError> {
        let err = match found {
            Some(token) if token.kind != TokenKind::Eof => ParseError::at_token(
                format!("Expected {}, found: {}", expected, token.text),
                token,
            ),
            Some(token) => {
                ParseError::at_token(format!("Expected {}, found end of input", expected), token)
            }
            None => ParseError {
                message: format!("Expected {}, found end of input", expected),
                offset: self.source.len(),
                line: 1,
                column: 1,
            },
        };
        Err(err.into())
    }

    /// Consumes the next keyword token and returns ok if it matches the
    /// expected keyword, otherwise returns an error.
    pub(crate) fn expect_keyword(&mut self, expected: Keyword) -> Result<(), ParserError> {
        if self.parse_keyword(expected) {
            Ok(())
        } else {
            let found = self.cursor.peek().cloned();
            self.expected(expected, found.as_ref())
        }
    }

    /// Consumes the next keyword tokens if they all match, erroring
    /// otherwise.
    pub(crate) fn expect_keywords(&mut self, expected: &[Keyword]) -> Result<(), ParserError> {
        for &kw in expected {
            self.expect_keyword(kw)?;
        }
        Ok(())
    }

    /// Consumes the next token if it is the expected keyword.
    pub(crate) fn parse_keyword(&mut self, keyword: Keyword) -> bool {
        self.cursor.next_if(|t| t.is_keyword(keyword)).is_some()
    }

    /// Consumes a whole keyword sequence, or nothing.
    pub(crate) fn parse_keywords(&mut self, keywords: &[Keyword]) -> bool {
        let mark = self.cursor.index();
        for &kw in keywords {
            if !self.parse_keyword(kw) {
                self.cursor.rewind(mark);
                return false;
            }
        }
        true
    }

    /// Consumes the next token if it is one of the expected keywords.
    pub(crate) fn parse_one_of_keywords(&mut self, keywords: &[Keyword]) -> Option<Keyword> {
        let kw = self.cursor.peek().and_then(|t| t.keyword())?;
        if keywords.contains(&kw) {
            self.cursor.next();
            Some(kw)
        } else {
            None
        }
    }

    /// True if the next token is the given keyword (no consumption).
    pub(crate) fn peek_keyword(&self, keyword: Keyword) -> bool {
        self.cursor.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    /// Consumes the next token if it is the given punctuation character.
    pub(crate) fn parse_punct(&mut self, ch: char) -> bool {
        self.cursor.next_if(|t| t.is_punct(ch)).is_some()
    }

    /// Consumes the next punctuation token or errors.
    pub(crate) fn expect_punct(&mut self, ch: char) -> Result<(), ParserError> {
        if self.parse_punct(ch) {
            Ok(())
        } else {
            let found = self.cursor.peek().cloned();
            self.expected(format!("'{}'", ch), found.as_ref())
        }
    }

    /// Consumes the next token if it is an operator with this exact text.
    pub(crate) fn parse_op(&mut self, op: &str) -> bool {
        self.cursor.next_if(|t| t.is_op(op)).is_some()
    }

    /// Parse a comma-separated list of 1+ items accepted by `f`.
    pub(crate) fn parse_comma_separated<T, F>(&mut self, mut f: F) -> Result<Vec<T>, ParserError>
    where
        F: FnMut(&mut Parser<'a, D>) -> Result<T, ParserError>,
    {
        let mut values = vec![];
        loop {
            values.push(f(self)?);
            if !self.parse_punct(',') {
                break;
            }
        }
        Ok(values)
    }

    /// Parses one identifier. Non-reserved keywords are permitted as
    /// identifiers without quoting.
    pub(crate) fn parse_identifier(&mut self) -> Result<Ident, ParserError> {
        let token = match self.cursor.peek() {
            Some(token) => token.clone(),
            None => return self.expected("an identifier", None::<&Token>),
        };
        match &token.kind {
            TokenKind::Ident => {
                self.cursor.next();
                Ok(Ident::new(token.text))
            }
            TokenKind::QuotedIdent(style) => {
                self.cursor.next();
                let inner = strip_quotes(&token.text);
                Ok(Ident::quoted(inner, *style))
            }
            TokenKind::Keyword(kw) if !RESERVED_FOR_IDENT.contains(kw) => {
                self.cursor.next();
                Ok(Ident::new(token.text))
            }
            _ => self.expected("an identifier", Some(&token)),
        }
    }

    /// Parses a dotted object name.
    pub(crate) fn parse_object_name(&mut self) -> Result<ObjectName, ParserError> {
        let mut parts = vec![self.parse_identifier()?];
        while self.parse_punct('.') {
            parts.push(self.parse_identifier()?);
        }
        Ok(ObjectName(parts))
    }

    /// Runs `f` one nesting level deeper, enforcing the depth bound in
    /// both modes.
    pub(crate) fn descend<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParserError>,
    ) -> Result<T, ParserError> {
        self.depth += 1;
        if self.depth >= self.config.max_depth {
            let (offset, line, column) = self
                .cursor
                .peek()
                .map(|t| (t.span.start, t.line, t.column))
                .unwrap_or((0, 1, 1));
            self.depth -= 1;
            return Err(MaxDepthError {
                max_depth: self.config.max_depth,
                offset,
                line,
                column,
            }
            .into());
        }
        let result = f(self);
        self.depth -= 1;
        result
    }

}

/// Strips the outer quote characters of a delimited identifier token.
fn strip_quotes(text: &str) -> String {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

#[cfg(test)]
mod tests {
    use sqlriver_ast::{
        expression::{Expr, QueryBody, SetOperator},
        statement::{InsertSource, Stmt, TableElementKind, Terminator},
    };
    use sqlriver_core::postgres::PostgresDialect;

    use super::*;

    macro_rules! parse {
        ($input:expr) => {{
            let dialect = PostgresDialect;
            let mut parser = Parser::new_with_sql(&dialect, $input).unwrap();
            parser.parse_statements(None)
        }};
        ($input:expr, $dialect:expr) => {{
            let mut parser = Parser::new_with_sql($dialect, $input).unwrap();
            parser.parse_statements(None)
        }};
    }

    #[test]
    fn parse_statement_kinds() {
        let statements = parse!(
            "select 1; insert into t values (1); update t set a = 1; \
             delete from t; drop table t; grant select on t to u; begin; commit;"
        )
        .unwrap();
        let kinds: Vec<_> = statements
            .iter()
            .map(|s| match &s.stmt {
                Stmt::Select(_) => "select",
                Stmt::Insert(_) => "insert",
                Stmt::Update(_) => "update",
                Stmt::Delete(_) => "delete",
                Stmt::Drop(_) => "drop",
                Stmt::Grant(_) => "grant",
                Stmt::Transaction(_) => "txn",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            ["select", "insert", "update", "delete", "drop", "grant", "txn", "txn"]
        );
        assert!(statements
            .iter()
            .all(|s| s.terminator == Terminator::Semicolon));
    }

    #[test]
    fn parse_insert_source_disambiguation() {
        // A parenthesised SELECT after the target is a source query.
        let statements = parse!("insert into a (select * from b);").unwrap();
        match &statements[0].stmt {
            Stmt::Insert(insert) => {
                assert!(insert.columns.is_empty());
                assert!(matches!(insert.source, InsertSource::Query(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
        // A plain parenthesised list is a column list.
        let statements = parse!("insert into a (x, y) values (1, 2);").unwrap();
        match &statements[0].stmt {
            Stmt::Insert(insert) => {
                assert_eq!(insert.columns.len(), 2);
                assert!(matches!(insert.source, InsertSource::Values(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parse_set_operations_left_associative() {
        let statements = parse!("select 1 union select 2 intersect select 3;").unwrap();
        let Stmt::Select(query) = &statements[0].stmt else {
            panic!("expected select");
        };
        // ((1 UNION 2) INTERSECT 3) — same precedence, left-associative.
        let QueryBody::SetOperation { left, op, .. } = &query.body else {
            panic!("expected set operation");
        };
        assert_eq!(*op, SetOperator::Intersect);
        assert!(matches!(**left, QueryBody::SetOperation { .. }));
    }

    #[test]
    fn parse_alter_table_actions_stay_grouped() {
        let statements =
            parse!("alter table t add column a int, drop column b, rename to u;").unwrap();
        assert_eq!(statements.len(), 1);
        let Stmt::AlterTable(alter) = &statements[0].stmt else {
            panic!("expected alter table");
        };
        assert_eq!(alter.actions.len(), 3);
    }

    #[test]
    fn parse_create_table_elements() {
        let statements = parse!(
            "create table t (id int primary key, name text not null, \
             constraint fk foreign key (id) references u (id), check (id > 0));"
        )
        .unwrap();
        let Stmt::CreateTable(create) = &statements[0].stmt else {
            panic!("expected create table");
        };
        assert_eq!(create.elements.len(), 4);
        assert!(matches!(
            create.elements[0].kind,
            TableElementKind::Column(_)
        ));
        assert!(matches!(
            create.elements[2].kind,
            TableElementKind::Constraint(_)
        ));
    }

    #[test]
    fn parse_expression_precedence() {
        let statements = parse!("select 1 + 2 * 3;").unwrap();
        let Stmt::Select(query) = &statements[0].stmt else {
            panic!("expected select");
        };
        let QueryBody::Select(select) = &query.body else {
            panic!("expected select core");
        };
        // `+` at the root proves `*` bound tighter.
        match &select.projection[0].expr {
            Expr::BinaryOp { op, .. } => assert_eq!(op.to_string(), "+"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parse_recovery_keeps_statement_count() {
        let dialect = PostgresDialect;
        let mut recovered = 0usize;
        let mut on_recover = |_: &ParseError| recovered += 1;
        let mut parser = Parser::new_with_sql(&dialect, "select from; select 1;").unwrap();
        let statements = parser.parse_statements(Some(&mut on_recover)).unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(recovered, 1);
        match &statements[0].stmt {
            Stmt::RawPassthrough(raw) => assert_eq!(raw.text, "select from"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parse_strict_mode_fails() {
        let dialect = PostgresDialect;
        let mut parser = Parser::new_with_sql(&dialect, "select from;")
            .unwrap()
            .with_config(ParserConfig::new().recover(false));
        assert!(matches!(
            parser.parse_statements(None),
            Err(ParserError::Parse(_))
        ));
    }

    #[test]
    fn parse_max_depth_is_never_recovered() {
        let dialect = PostgresDialect;
        for recover in [true, false] {
            let mut parser = Parser::new_with_sql(&dialect, "select ((((1))));")
                .unwrap()
                .with_config(ParserConfig::new().recover(recover).max_depth(3));
            assert!(matches!(
                parser.parse_statements(None),
                Err(ParserError::MaxDepth(_))
            ));
        }
    }

    #[test]
    fn parse_nonreserved_keywords_as_identifiers() {
        let statements = parse!("select key, value, level from t;").unwrap();
        let Stmt::Select(query) = &statements[0].stmt else {
            panic!("expected select");
        };
        let QueryBody::Select(select) = &query.body else {
            panic!("expected select core");
        };
        assert_eq!(select.projection.len(), 3);
    }

    #[test]
    fn parse_with_prologue_on_dml() {
        let statements = parse!("with d as (select 1) insert into t select * from d;").unwrap();
        match &statements[0].stmt {
            Stmt::Cte(cte) => assert!(matches!(*cte.main, Stmt::Insert(_))),
            other => panic!("unexpected {:?}", other),
        }
    }
}
