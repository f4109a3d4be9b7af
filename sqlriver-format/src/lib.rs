//! # sqlriver-format
//!
//! The river-style layout engine of the sqlriver SQL formatter: walks
//! frozen statement trees, re-attaches comments from the original token
//! stream, and emits text with clause alignment, wrap decisions driven
//! by a soft line-length budget, and per-token casing rules.

#![deny(missing_docs)]
#![deny(unused_imports)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod comments;
mod ddl;
mod expr;
mod options;
mod printer;
mod query;
mod stmt;

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use sqlriver_ast::{
    statement::{Statement, Stmt, Terminator},
    types::{Ident, ObjectName},
};
use sqlriver_core::{Dialect, DialectParserConf, Token, TokenKind};

pub use self::options::{FormatOptions, IdentifierCase, KeywordCase};
use self::{comments::CommentQueue, printer::Printer};

/// The clause-keyword river column: the trailing edge of `SELECT`.
/// First words longer than this start at the base indent instead.
pub(crate) const RIVER: usize = 6;

/// Known SQL function names, uppercased in call position. Sorted for
/// binary search.
const KNOWN_FUNCTIONS: &[&str] = &[
    "ABS", "AVG", "CEIL", "CHAR_LENGTH", "COALESCE", "CONCAT", "COUNT", "DENSE_RANK", "FLOOR",
    "FORMAT", "GREATEST", "GROUP_CONCAT", "IFNULL", "LAG", "LEAD", "LEAST", "LEFT", "LENGTH",
    "LOWER", "LTRIM", "MAX", "MIN", "MOD", "NOW", "NULLIF", "NVL", "RANK", "REPLACE", "RIGHT",
    "ROUND", "ROW_NUMBER", "RTRIM", "SIGN", "SQRT", "STRING_AGG", "SUBSTR", "SUBSTRING", "SUM",
    "TRIM", "UPPER",
];

/// Formats a parsed statement sequence against the original token
/// stream (used for comment and trivia re-attachment).
pub fn format_statements<D: Dialect>(
    statements: &[Statement],
    tokens: &[Token],
    dialect: &D,
    options: &FormatOptions,
) -> String {
    let mut fmt = Fmt {
        dialect,
        options,
        p: Printer::new(),
        comments: CommentQueue::from_tokens(tokens),
        in_write: false,
        block_depth: 0,
    };
    for (index, statement) in statements.iter().enumerate() {
        if index > 0 {
            fmt.p.blank_line();
        }
        fmt.emit_own_line_comments(statement.span.start, 0);
        fmt.emit_statement(statement, 0);
        let next_start = statements
            .get(index + 1)
            .map(|s| s.span.start)
            .unwrap_or(usize::MAX);
        fmt.emit_statement_trailing_comments(next_start);
    }
    let rest = fmt.comments.take_rest();
    for comment in &rest {
        if fmt.p.col() > 0 {
            if comment.trailing {
                fmt.p.push(" ");
                fmt.p.push(&comment.render(false));
                continue;
            }
            fmt.p.newline();
        }
        if comment.blank_before {
            fmt.p.blank_line();
        }
        fmt.p.push(&comment.render(false));
        fmt.p.newline();
    }
    fmt.p.finish()
}

/// The tree walker. Dialect and options travel as immutable values
/// alongside the printer and the comment queue.
pub(crate) struct Fmt<'a, D: Dialect> {
    pub(crate) dialect: &'a D,
    pub(crate) options: &'a FormatOptions,
    pub(crate) p: Printer,
    pub(crate) comments: CommentQueue,
    /// True inside write statements (CREATE/INSERT/UPDATE/...), where
    /// identifiers are lowercased and line comments become block form.
    pub(crate) in_write: bool,
    /// Procedural-block nesting depth.
    pub(crate) block_depth: usize,
}

impl<'a, D: Dialect> Fmt<'a, D> {
    // ------------------------------------------------------------------
    // Casing
    // ------------------------------------------------------------------

    /// Renders a clause keyword (canonical uppercase input).
    pub(crate) fn kw(&self, canonical: &str) -> String {
        match self.options.keyword_case {
            KeywordCase::Upper | KeywordCase::Preserve => canonical.to_string(),
            KeywordCase::Lower => canonical.to_lowercase(),
        }
    }

    /// Renders a keyword token, honouring `Preserve`.
    pub(crate) fn kw_token(&self, token: &Token) -> String {
        match self.options.keyword_case {
            KeywordCase::Upper => token.text.to_uppercase(),
            KeywordCase::Lower => token.text.to_lowercase(),
            KeywordCase::Preserve => token.text.clone(),
        }
    }

    /// Renders an identifier, applying the write-statement lowercasing
    /// rule. Quoted identifiers are never recased.
    pub(crate) fn ident(&self, ident: &Ident) -> String {
        match ident.quote {
            Some(style) => {
                let mut s = String::new();
                s.push(style.open());
                s.push_str(&ident.value);
                s.push(style.close());
                s
            }
            None => {
                if self.in_write
                    && self.options.identifier_case == IdentifierCase::Lower
                    && ident.is_not_deliberately_cased()
                {
                    ident.value.to_lowercase()
                } else {
                    ident.value.clone()
                }
            }
        }
    }

    /// Renders a dotted object name.
    pub(crate) fn object_name(&self, name: &ObjectName) -> String {
        let mut out = String::new();
        for (i, part) in name.0.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&self.ident(part));
        }
        out
    }

    /// Renders a function name: known SQL functions are uppercased in
    /// call position; BigQuery procedure bodies keep built-ins as
    /// spelled.
    pub(crate) fn function_name(&self, name: &ObjectName) -> String {
        if name.0.len() == 1 && name.0[0].quote.is_none() {
            let word = &name.0[0].value;
            let upper = word.to_uppercase();
            let passthrough = self.block_depth > 0
                && self.dialect.parser_conf().builtins_keep_case_in_blocks();
            if !passthrough && KNOWN_FUNCTIONS.binary_search(&upper.as_str()).is_ok() {
                return match self.options.keyword_case {
                    KeywordCase::Lower => upper.to_lowercase(),
                    _ => upper,
                };
            }
            return word.clone();
        }
        self.object_name(name)
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Emits all comments queued before `offset` on their own lines at
    /// `indent`, preserving blank lines between comment groups.
    pub(crate) fn emit_own_line_comments(&mut self, offset: usize, indent: usize) {
        for comment in self.comments.take_before(offset) {
            if self.p.col() > 0 {
                self.p.newline();
            }
            if comment.blank_before && !self.p.ends_with("\n\n") {
                self.p.blank_line();
            }
            self.p.spaces(indent);
            let normalize = self.in_write && !comment.is_conditional();
            self.p.push(&comment.render(normalize));
            self.p.newline();
        }
    }

    /// Emits comments trailing the construct that ends before `limit`,
    /// inline on the current line. Line comments are always normalised
    /// here: more statement text may follow on the same output line.
    pub(crate) fn emit_inline_comments(&mut self, limit: usize) {
        for comment in self.comments.take_trailing_before(limit) {
            self.p.push(" ");
            let normalize = !comment.is_conditional();
            self.p.push(&comment.render(normalize));
        }
    }

    /// Claims the comments that lexically precede a clause's first body
    /// token, just before the clause keyword is emitted: trailing
    /// comments stay on the line being closed, own-line comments come
    /// out on their own lines above the clause. A comment sitting inside
    /// a compound clause keyword (`ORDER /* c */ BY`) is hoisted to the
    /// preceding line this way, so the keyword stays atomic.
    pub(crate) fn claim_clause_comments(&mut self, before: Option<usize>, indent: usize) {
        let Some(limit) = before else { return };
        for comment in self.comments.take_before(limit) {
            if comment.trailing && self.p.col() > 0 {
                self.p.push(" ");
                let normalize = !comment.is_conditional();
                self.p.push(&comment.render(normalize));
            } else {
                if self.p.col() > 0 {
                    self.p.newline();
                }
                if comment.blank_before && !self.p.ends_with("\n\n") {
                    self.p.blank_line();
                }
                self.p.spaces(indent);
                let normalize = self.in_write && !comment.is_conditional();
                self.p.push(&comment.render(normalize));
                self.p.newline();
            }
        }
    }

    /// Statement-trailing comments stay on the terminator line and keep
    /// their source form.
    fn emit_statement_trailing_comments(&mut self, next_start: usize) {
        for comment in self.comments.take_trailing_before(next_start) {
            self.p.push(" ");
            self.p.push(&comment.render(false));
        }
    }

    // ------------------------------------------------------------------
    // Statement dispatch
    // ------------------------------------------------------------------

    /// Emits one statement (and its terminator) at the given indent.
    pub(crate) fn emit_statement(&mut self, statement: &Statement, indent: usize) {
        let was_write = self.in_write;
        self.in_write = statement.stmt.is_write();
        self.p.pad_to(indent);
        self.emit_stmt_kind(&statement.stmt, indent);
        // Interior comments that no inner emitter claimed are flushed
        // before the terminator line ends.
        self.flush_interior_comments(statement.span.end, indent);
        self.emit_terminator(&statement.stmt, &statement.terminator);
        self.in_write = was_write;
    }

    fn flush_interior_comments(&mut self, end: usize, indent: usize) {
        if !self.comments.has_before(end) {
            return;
        }
        for comment in self.comments.take_before(end) {
            if comment.trailing {
                self.p.push(" ");
                let normalize = !comment.is_conditional();
                self.p.push(&comment.render(normalize));
            } else {
                self.p.newline();
                self.p.spaces(indent);
                let normalize = self.in_write && !comment.is_conditional();
                self.p.push(&comment.render(normalize));
            }
        }
    }

    fn emit_terminator(&mut self, stmt: &Stmt, terminator: &Terminator) {
        match stmt {
            Stmt::GoBatch(_)
            | Stmt::SlashTerminator(_)
            | Stmt::MetaCommand(_)
            | Stmt::DelimiterChange(_) => {}
            Stmt::Copy(copy) if copy.data.is_some() => {}
            Stmt::RawPassthrough(_) => match terminator {
                Terminator::Semicolon => self.p.push(";"),
                Terminator::Custom(delim) => {
                    let delim = delim.clone();
                    self.p.push(" ");
                    self.p.push(&delim);
                }
                Terminator::None => {}
            },
            _ => match terminator {
                Terminator::Custom(delim) => {
                    let delim = delim.clone();
                    self.p.push(" ");
                    self.p.push(&delim);
                }
                _ => self.p.push(";"),
            },
        }
    }

    fn emit_stmt_kind(&mut self, stmt: &Stmt, indent: usize) {
        match stmt {
            Stmt::Select(query) => self.emit_query(query, indent),
            Stmt::Insert(insert) => self.emit_insert(insert, indent),
            Stmt::Update(update) => self.emit_update(update, indent),
            Stmt::Delete(delete) => self.emit_delete(delete, indent),
            Stmt::Merge(merge) => self.emit_merge(merge, indent),
            Stmt::Cte(cte) => {
                self.emit_with(&cte.with, indent);
                self.p.newline();
                self.p.spaces(indent);
                self.emit_stmt_kind(&cte.main, indent);
            }
            Stmt::CreateTable(create) => self.emit_create_table(create, indent),
            Stmt::CreateView(view) => self.emit_create_view(view, indent),
            Stmt::CreateIndex(index) => self.emit_create_index(index, indent),
            Stmt::CreateRoutine(routine) => self.emit_create_routine(routine, indent),
            Stmt::AlterTable(alter) => self.emit_alter_table(alter, indent),
            Stmt::Drop(drop) => self.emit_drop(drop, indent),
            Stmt::Transaction(txn) => {
                let head = self.kw(txn.kind.as_str());
                self.p.push(&head);
                let tail = txn.tail.clone();
                self.emit_token_run(&tail, indent);
            }
            Stmt::Explain(explain) => {
                self.p.push(&self.kw("EXPLAIN"));
                let options = explain.options.clone();
                self.emit_token_run(&options, indent);
                self.p.newline();
                self.p.spaces(indent);
                self.emit_stmt_kind(&explain.inner.stmt, indent);
            }
            Stmt::Copy(copy) => {
                let head = copy.head.tokens.clone();
                self.emit_tokens(&head, indent);
                if let Some(data) = &copy.data {
                    let data = data.clone();
                    self.p.push(";");
                    self.p.push(&data);
                    if !data.ends_with('\n') {
                        self.p.newline();
                    }
                    self.p.push("\\.");
                }
            }
            Stmt::Prepare(prepare) => {
                self.p.push(&self.kw("PREPARE"));
                let head = prepare.head.clone();
                self.emit_token_run(&head, indent);
                self.p.push(" ");
                self.p.push(&self.kw("AS"));
                self.p.newline();
                self.p.spaces(indent);
                self.emit_stmt_kind(&prepare.inner.stmt, indent);
            }
            Stmt::DeclareCursor(declare) => {
                self.p.push(&self.kw("DECLARE"));
                let head = declare.head.clone();
                self.emit_token_run(&head, indent);
                if let Some(query) = &declare.query {
                    self.p.push(" ");
                    self.p.push(&self.kw("FOR"));
                    self.p.newline();
                    self.p.spaces(indent);
                    self.emit_stmt_kind(&query.stmt, indent);
                }
            }
            Stmt::TsqlIf(tsql_if) => self.emit_tsql_if(tsql_if, indent),
            Stmt::TsqlBeginBlock(block) | Stmt::PlsqlBlock(block) => {
                self.emit_block(block, indent)
            }
            Stmt::DelimiterChange(raw)
            | Stmt::GoBatch(raw)
            | Stmt::SlashTerminator(raw)
            | Stmt::MetaCommand(raw)
            | Stmt::RawPassthrough(raw) => {
                let text = raw.text.clone();
                self.p.push(&text);
            }
            // The shallow statements all render through the generic
            // clause-aware token printer.
            Stmt::CreateType(g)
            | Stmt::CreateSequence(g)
            | Stmt::CreatePipe(g)
            | Stmt::AlterDomain(g)
            | Stmt::AlterPublication(g)
            | Stmt::Publication(g)
            | Stmt::Truncate(g)
            | Stmt::CommentOn(g)
            | Stmt::RefreshMaterializedView(g)
            | Stmt::Grant(g)
            | Stmt::Revoke(g)
            | Stmt::SetSession(g)
            | Stmt::Reset(g)
            | Stmt::Use(g)
            | Stmt::Show(g)
            | Stmt::Listen(g)
            | Stmt::Notify(g)
            | Stmt::Execute(g)
            | Stmt::Deallocate(g)
            | Stmt::Analyze(g)
            | Stmt::Vacuum(g)
            | Stmt::Call(g)
            | Stmt::DoBlock(g)
            | Stmt::OracleInsertAll(g) => {
                let tokens = g.tokens.clone();
                self.emit_tokens(&tokens, indent);
            }
        }
    }

    // ------------------------------------------------------------------
    // Generic token rendering
    // ------------------------------------------------------------------

    /// Emits a token run continuing the current line (used for verbatim
    /// tails of otherwise structured statements).
    pub(crate) fn emit_token_run(&mut self, tokens: &[Token], indent: usize) {
        self.emit_tokens_inner(tokens, indent, false);
    }

    /// Emits a whole shallow statement from its significant tokens.
    pub(crate) fn emit_tokens(&mut self, tokens: &[Token], indent: usize) {
        self.emit_tokens_inner(tokens, indent, true);
    }

    fn emit_tokens_inner(&mut self, tokens: &[Token], indent: usize, fresh: bool) {
        let mut prev: Option<&Token> = None;
        for (i, token) in tokens.iter().enumerate() {
            let text = self.token_text(token);
            let glue_left = matches!(token.kind, TokenKind::Punct(',' | ';' | ')' | ']' | '.'))
                || token.is_op("::")
                || (token.is_punct('(')
                    && prev.is_some_and(|p| {
                        matches!(p.kind, TokenKind::Ident | TokenKind::QuotedIdent(_))
                    }))
                || prev.is_some_and(|p| {
                    matches!(p.kind, TokenKind::Punct('(' | '[' | '.')) || p.is_op("::")
                });
            if i == 0 {
                if fresh {
                    self.p.pad_to(indent);
                }
            } else if !glue_left {
                // Wrap at the budget, but never split a run of keywords
                // (multi-word keywords stay atomic).
                let over = self.p.col() + 1 + text.chars().count() > self.options.max_line_length;
                let keyword_run = matches!(token.kind, TokenKind::Keyword(_))
                    && prev.is_some_and(|p| matches!(p.kind, TokenKind::Keyword(_)));
                let after_comma = prev.is_some_and(|p| p.is_punct(','));
                if over && !keyword_run && (after_comma || token.keyword().is_some()) {
                    self.p.newline();
                    self.p.spaces(indent + self.options.indent);
                } else {
                    self.p.push(" ");
                }
            }
            self.p.push(&text);
            prev = Some(token);
        }
    }

    /// The rendered text of one token under the casing rules.
    pub(crate) fn token_text(&self, token: &Token) -> String {
        match &token.kind {
            TokenKind::Keyword(_) => self.kw_token(token),
            TokenKind::Ident => {
                if self.in_write
                    && self.options.identifier_case == IdentifierCase::Lower
                    && !token.text.chars().any(|c| c.is_lowercase())
                {
                    token.text.to_lowercase()
                } else {
                    token.text.clone()
                }
            }
            _ => token.text.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Layout helpers
    // ------------------------------------------------------------------

    /// Starts a river-aligned clause line: pads so the first keyword
    /// word right-aligns at `base + RIVER`, then writes the keyword and
    /// one space.
    pub(crate) fn clause(&mut self, base: usize, keyword: &str) {
        if self.p.col() > 0 {
            self.p.newline();
        }
        let first_len = keyword.split(' ').next().unwrap_or(keyword).chars().count();
        let col = base + RIVER.saturating_sub(first_len);
        self.p.pad_to(col);
        self.p.push(&self.kw(keyword));
        self.p.push(" ");
    }

    /// Remaining budget from the current column.
    pub(crate) fn fits(&self, width: usize) -> bool {
        self.p.col() + width <= self.options.max_line_length
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sqlriver_core::postgres::PostgresDialect;
    use sqlriver_lexer::Lexer;
    use sqlriver_parser::Parser;

    use super::*;

    fn render(input: &str) -> String {
        let dialect = PostgresDialect;
        let tokens = Lexer::new(&dialect, input).tokenize().unwrap();
        let statements = Parser::new_with_tokens(&dialect, input, tokens.clone())
            .parse_statements(None)
            .unwrap();
        format_statements(&statements, &tokens, &dialect, &FormatOptions::default())
    }

    #[test]
    fn create_table_three_column_alignment() {
        let out = render(
            "create table users (id bigint primary key, username varchar(20) not null, note text, check (id > 0));",
        );
        assert_eq!(
            out,
            "CREATE TABLE users (\n\
             \x20   id       BIGINT      PRIMARY KEY,\n\
             \x20   username VARCHAR(20) NOT NULL,\n\
             \x20   note     TEXT,\n\
             \x20            CHECK (id > 0)\n\
             );"
        );
    }

    #[test]
    fn named_table_constraint_wraps() {
        let out = render(
            "create table t (id int, constraint fk_u foreign key (id) references u (id));",
        );
        assert!(out.contains("    CONSTRAINT fk_u\n        FOREIGN KEY (id) REFERENCES u (id)"), "{}", out);
    }

    #[test]
    fn select_list_wraps_one_item_per_line() {
        let out = render(
            "select first_name, last_name, email_address, phone_number, street_address, city_name, postal_code, country_code from customers;",
        );
        assert_eq!(
            out,
            "SELECT first_name,\n\
             \x20      last_name,\n\
             \x20      email_address,\n\
             \x20      phone_number,\n\
             \x20      street_address,\n\
             \x20      city_name,\n\
             \x20      postal_code,\n\
             \x20      country_code\n\
             \x20 FROM customers;"
        );
    }

    #[test]
    fn generic_statements_render_through_token_printer() {
        assert_eq!(
            render("grant select, insert on t to reporting;"),
            "GRANT SELECT, INSERT ON t TO reporting;"
        );
        assert_eq!(render("show search_path;"), "SHOW search_path;");
    }

    #[test]
    fn statement_trailing_line_comment_keeps_its_form() {
        assert_eq!(render("select 1; -- done"), "SELECT 1; -- done");
    }

    #[test]
    fn long_check_in_list_wraps_under_the_paren() {
        let out = render(
            "create table t (status text, check (status in ('pending', 'active', 'suspended', 'deleted', 'archived', 'migrating', 'degraded')));",
        );
        assert!(out.contains("IN ('pending',\n"), "{}", out);
        // Each value aligns under the list's opening paren.
        let lines: Vec<&str> = out.lines().collect();
        let first_value = lines
            .iter()
            .find(|l| l.contains("'pending'"))
            .copied()
            .unwrap_or_default();
        let second_value = lines
            .iter()
            .find(|l| l.trim_start().starts_with("'active'"))
            .copied()
            .unwrap_or_default();
        let col = first_value.find("'pending'");
        assert_eq!(col, second_value.find("'active'"), "{}", out);
    }
}
