#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};

use sqlriver_core::Token;

use crate::statement::{GenericStmt, Statement};

/// Transaction control: `BEGIN` / `START TRANSACTION` / `COMMIT` /
/// `ROLLBACK` / `SAVEPOINT` / `RELEASE`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransactionStmt {
    /// The verb.
    pub kind: TransactionKind,
    /// Everything after the verb (`TRANSACTION`, `WORK`, isolation
    /// options, savepoint names), verbatim.
    pub tail: Vec<Token>,
}

/// The transaction verb.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransactionKind {
    /// `BEGIN`
    Begin,
    /// `START TRANSACTION`
    Start,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `SAVEPOINT <name>`
    Savepoint,
    /// `RELEASE [SAVEPOINT] <name>`
    Release,
}

impl TransactionKind {
    /// The leading keyword text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Begin => "BEGIN",
            Self::Start => "START TRANSACTION",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
            Self::Savepoint => "SAVEPOINT",
            Self::Release => "RELEASE",
        }
    }
}

/// `EXPLAIN [ ( <options> ) | ANALYZE | VERBOSE | QUERY PLAN ] <statement>`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplainStmt {
    /// The option tokens between EXPLAIN and the inner statement.
    pub options: Vec<Token>,
    /// The explained statement.
    pub inner: Box<Statement>,
}

/// `COPY <table> ... [ FROM stdin data block terminated by \. ]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyStmt {
    /// The COPY head (target, column list, options).
    pub head: GenericStmt,
    /// The verbatim stdin data block, when the source is `FROM stdin`.
    pub data: Option<String>,
}

/// `DECLARE <name> CURSOR FOR <query>`, or any other DECLARE form.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclareCursorStmt {
    /// The head tokens up to `FOR`.
    pub head: Vec<Token>,
    /// The cursor query, when present.
    pub query: Option<Box<Statement>>,
}

/// `PREPARE <name> [ (<types>) ] AS <statement>`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrepareStmt {
    /// The head tokens up to `AS`.
    pub head: Vec<Token>,
    /// The prepared statement.
    pub inner: Box<Statement>,
}
