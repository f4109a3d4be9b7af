//! The top-level statement sum type.

mod ddl;
mod dml;
mod procedural;
mod session;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};

use sqlriver_core::{Span, Token};

pub use self::{ddl::*, dml::*, procedural::*, session::*};
use crate::expression::{Query, With};

/// A parsed statement: the tagged tree plus the byte span it covers and
/// the terminator that ended it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statement {
    /// The statement tree.
    pub stmt: Stmt,
    /// Byte span in the source, terminator excluded.
    pub span: Span,
    /// How the statement was terminated.
    pub terminator: Terminator,
}

/// How a statement was terminated in the source.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terminator {
    /// Implicit boundary (end of input or a new top-level keyword).
    None,
    /// An explicit `;`.
    Semicolon,
    /// The currently configured `DELIMITER` sequence.
    Custom(String),
}

/// A top-level statement (SELECT, INSERT, CREATE, etc.)
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    // ========================================================================
    // Data manipulation
    // ========================================================================
    /// The `SELECT ...` statement (including leading `WITH`).
    Select(Box<Query>),
    /// The `INSERT ...` statement.
    Insert(Box<InsertStmt>),
    /// The `UPDATE ... SET ...` statement.
    Update(Box<UpdateStmt>),
    /// The `DELETE ...` statement.
    Delete(Box<DeleteStmt>),
    /// The `MERGE INTO ...` statement.
    Merge(Box<MergeStmt>),
    /// A `WITH ...` prologue in front of a non-SELECT DML statement.
    Cte(Box<CteStmt>),

    // ========================================================================
    // Data definition
    // ========================================================================
    /// The `CREATE TABLE ...` statement.
    CreateTable(Box<CreateTableStmt>),
    /// The `CREATE VIEW ...` statement.
    CreateView(Box<CreateViewStmt>),
    /// The `CREATE INDEX ...` statement.
    CreateIndex(Box<CreateIndexStmt>),
    /// `CREATE { PROCEDURE | FUNCTION | TRIGGER } ...` with an optional
    /// procedural body.
    CreateRoutine(Box<CreateRoutineStmt>),
    /// The `CREATE TYPE ...` statement.
    CreateType(GenericStmt),
    /// The `CREATE SEQUENCE ...` statement.
    CreateSequence(GenericStmt),
    /// The `CREATE PIPE ...` statement (Snowflake).
    CreatePipe(GenericStmt),
    /// The `ALTER TABLE ...` statement.
    AlterTable(Box<AlterTableStmt>),
    /// The `ALTER DOMAIN ...` statement.
    AlterDomain(GenericStmt),
    /// The `ALTER PUBLICATION ...` statement.
    AlterPublication(GenericStmt),
    /// The `CREATE PUBLICATION ...` statement.
    Publication(GenericStmt),
    /// The `DROP ...` statement.
    Drop(Box<DropStmt>),
    /// The `TRUNCATE ...` statement.
    Truncate(GenericStmt),
    /// The `COMMENT ON ...` statement.
    CommentOn(GenericStmt),
    /// The `REFRESH MATERIALIZED VIEW ...` statement.
    RefreshMaterializedView(GenericStmt),

    // ========================================================================
    // Access control
    // ========================================================================
    /// The `GRANT ...` statement.
    Grant(GenericStmt),
    /// The `REVOKE ...` statement.
    Revoke(GenericStmt),

    // ========================================================================
    // Transactions and sessions
    // ========================================================================
    /// `BEGIN` / `COMMIT` / `ROLLBACK` / `SAVEPOINT` / `RELEASE`.
    Transaction(Box<TransactionStmt>),
    /// The `SET ...` session statement.
    SetSession(GenericStmt),
    /// The `RESET ...` statement.
    Reset(GenericStmt),
    /// The `USE ...` statement.
    Use(GenericStmt),
    /// The `SHOW ...` statement.
    Show(GenericStmt),
    /// The `LISTEN ...` statement.
    Listen(GenericStmt),
    /// The `NOTIFY ...` statement.
    Notify(GenericStmt),

    // ========================================================================
    // Utility statements
    // ========================================================================
    /// `EXPLAIN [options] <statement>`.
    Explain(Box<ExplainStmt>),
    /// `COPY ... [FROM stdin data block]`.
    Copy(Box<CopyStmt>),
    /// `DECLARE ... CURSOR FOR ...`.
    DeclareCursor(Box<DeclareCursorStmt>),
    /// `PREPARE <name> AS <statement>`.
    Prepare(Box<PrepareStmt>),
    /// `EXECUTE ...`.
    Execute(GenericStmt),
    /// `DEALLOCATE ...`.
    Deallocate(GenericStmt),
    /// `ANALYZE ...`.
    Analyze(GenericStmt),
    /// `VACUUM ...`.
    Vacuum(GenericStmt),
    /// `CALL ...`.
    Call(GenericStmt),

    // ========================================================================
    // Procedural
    // ========================================================================
    /// PostgreSQL `DO [LANGUAGE ...] $$ ... $$`.
    DoBlock(GenericStmt),
    /// T-SQL `IF <cond> <stmt> [ELSE <stmt>]`.
    TsqlIf(Box<TsqlIfStmt>),
    /// T-SQL `BEGIN ... END` block.
    TsqlBeginBlock(Box<BlockStmt>),
    /// Oracle `[DECLARE ...] BEGIN ... [EXCEPTION ...] END` block.
    PlsqlBlock(Box<BlockStmt>),
    /// Oracle `INSERT ALL ... SELECT ...`.
    OracleInsertAll(GenericStmt),

    // ========================================================================
    // Directives, meta-commands and pass-through
    // ========================================================================
    /// A `DELIMITER <seq>` line.
    DelimiterChange(RawStmt),
    /// A `GO` batch separator line.
    GoBatch(RawStmt),
    /// A stand-alone `/` terminator line.
    SlashTerminator(RawStmt),
    /// A client meta-command preserved verbatim.
    MetaCommand(RawStmt),
    /// Literal source bytes preserved because the parser chose not to
    /// parse the statement, or recovered from an error inside it.
    RawPassthrough(RawStmt),
}

/// A shallow statement: the significant tokens of the statement body,
/// rendered by the generic clause-aware printer.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericStmt {
    /// The significant (non-comment) tokens of the statement.
    pub tokens: Vec<Token>,
}

/// A statement preserved as literal source bytes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawStmt {
    /// The exact source text of the statement.
    pub text: String,
}

/// A `WITH` prologue attached to a non-SELECT DML statement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CteStmt {
    /// The WITH clause.
    pub with: With,
    /// The main statement the CTEs feed.
    pub main: Box<Stmt>,
}

impl Stmt {
    /// True for write statements: CREATE, INSERT, UPDATE, DELETE, ALTER,
    /// DROP, MERGE, TRUNCATE, GRANT, REVOKE. Identifier lowercasing only
    /// applies inside these.
    pub fn is_write(&self) -> bool {
        match self {
            Stmt::Insert(_)
            | Stmt::Update(_)
            | Stmt::Delete(_)
            | Stmt::Merge(_)
            | Stmt::CreateTable(_)
            | Stmt::CreateView(_)
            | Stmt::CreateIndex(_)
            | Stmt::CreateRoutine(_)
            | Stmt::CreateType(_)
            | Stmt::CreateSequence(_)
            | Stmt::CreatePipe(_)
            | Stmt::AlterTable(_)
            | Stmt::AlterDomain(_)
            | Stmt::AlterPublication(_)
            | Stmt::Publication(_)
            | Stmt::Drop(_)
            | Stmt::Truncate(_)
            | Stmt::Grant(_)
            | Stmt::Revoke(_)
            | Stmt::OracleInsertAll(_) => true,
            Stmt::Cte(cte) => cte.main.is_write(),
            _ => false,
        }
    }
}
