#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use sqlriver_core::Token;

use crate::{expression::Expr, statement::Statement};

/// A procedural block: T-SQL `BEGIN ... END` or Oracle
/// `[DECLARE ...] BEGIN ... [EXCEPTION ...] END`. Inner statements are
/// parsed with the full grammar and render at an inherited indent,
/// separated by single newlines.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockStmt {
    /// The `DECLARE` section, verbatim (Oracle).
    pub declare: Vec<Token>,
    /// The inner statements.
    pub statements: Vec<Statement>,
    /// The `EXCEPTION` section, verbatim (Oracle).
    pub exception: Vec<Token>,
}

/// T-SQL `IF <condition> <statement> [ ELSE <statement> ]`, where either
/// branch may be a `BEGIN ... END` block.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TsqlIfStmt {
    /// The condition.
    pub condition: Expr,
    /// The THEN branch.
    pub then_branch: Box<Statement>,
    /// The ELSE branch.
    pub else_branch: Option<Box<Statement>>,
}
