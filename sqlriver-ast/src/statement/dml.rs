#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use crate::{
    expression::{Expr, Query, SelectItem, TableFactor, TableWithJoins, Values},
    types::{Ident, ObjectName},
};

/// The `INSERT` statement.
///
/// ```txt
/// INSERT [ OR <conflict> ] INTO <table> [ AS <alias> ] [ (<columns>) ]
///     [ OVERRIDING { SYSTEM | USER } VALUE ]
///     { VALUES <rows> | <query> | DEFAULT VALUES }
///     [ ON CONFLICT [ (<target>) ] DO { NOTHING | UPDATE SET ... [ WHERE ... ] } ]
///     [ ON DUPLICATE KEY UPDATE <assignments> ]
///     [ RETURNING <items> ]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsertStmt {
    /// SQLite `INSERT OR <conflict resolution>`.
    pub or_conflict: Option<InsertOr>,
    /// Target table.
    pub table: ObjectName,
    /// `AS <alias>`.
    pub alias: Option<Ident>,
    /// Explicit column list.
    pub columns: Vec<Ident>,
    /// `OVERRIDING { SYSTEM | USER } VALUE`; true for SYSTEM.
    pub overriding_system: Option<bool>,
    /// What is inserted.
    pub source: InsertSource,
    /// `ON CONFLICT` clause.
    pub on_conflict: Option<OnConflict>,
    /// MySQL `ON DUPLICATE KEY UPDATE` assignments.
    pub on_duplicate: Vec<Assignment>,
    /// `RETURNING` items.
    pub returning: Vec<SelectItem>,
}

/// SQLite conflict resolution after `INSERT OR`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertOr {
    /// `IGNORE`
    Ignore,
    /// `REPLACE`
    Replace,
    /// `ROLLBACK`
    Rollback,
    /// `ABORT`
    Abort,
    /// `FAIL`
    Fail,
}

impl InsertOr {
    /// The keyword spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "IGNORE",
            Self::Replace => "REPLACE",
            Self::Rollback => "ROLLBACK",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
        }
    }
}

/// The source of the inserted rows.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertSource {
    /// `VALUES <rows>`.
    Values(Values),
    /// A query source. A parenthesised SELECT immediately after the
    /// target is a source query, not a column list.
    Query(Box<Query>),
    /// `DEFAULT VALUES`.
    DefaultValues,
}

/// The `ON CONFLICT` clause of an INSERT.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnConflict {
    /// The conflict target columns.
    pub target: Vec<Expr>,
    /// The conflict action.
    pub action: OnConflictAction,
}

/// The action of an `ON CONFLICT` clause.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OnConflictAction {
    /// `DO NOTHING`.
    DoNothing,
    /// `DO UPDATE SET <assignments> [ WHERE <condition> ]`.
    DoUpdate {
        /// The assignments.
        assignments: Vec<Assignment>,
        /// The condition.
        selection: Option<Expr>,
    },
}

/// The `UPDATE` statement.
///
/// ```txt
/// UPDATE <table> [ AS <alias> ] SET <assignments>
///     [ FROM <source list> ] [ WHERE <condition> ] [ RETURNING <items> ]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateStmt {
    /// Target table with alias.
    pub table: TableFactor,
    /// The SET assignments.
    pub assignments: Vec<Assignment>,
    /// The FROM source list.
    pub from: Vec<TableWithJoins>,
    /// The WHERE condition.
    pub selection: Option<Expr>,
    /// Byte offset of the first WHERE-condition token, for comment
    /// anchoring.
    pub selection_offset: Option<usize>,
    /// `RETURNING` items.
    pub returning: Vec<SelectItem>,
}

/// One SET assignment; the target may be a qualified name or a tuple.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// The assigned-to target.
    pub target: AssignmentTarget,
    /// The assigned value.
    pub value: Expr,
}

/// The left-hand side of an assignment.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignmentTarget {
    /// `col` or `alias.col`.
    Column(Vec<Ident>),
    /// `(a, b) = (...)` tuple assignment.
    Tuple(Vec<Vec<Ident>>),
}

/// The `DELETE` statement. The Oracle `DELETE <table>` shorthand is
/// normalised to `DELETE FROM <table>`.
///
/// ```txt
/// DELETE [FROM] <table> [ AS <alias> ]
///     [ USING <source list> ] [ WHERE <condition> ] [ RETURNING <items> ]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeleteStmt {
    /// Target table.
    pub table: ObjectName,
    /// `AS <alias>`.
    pub alias: Option<Ident>,
    /// The USING source list.
    pub using: Vec<TableWithJoins>,
    /// The WHERE condition.
    pub selection: Option<Expr>,
    /// Byte offset of the first WHERE-condition token, for comment
    /// anchoring.
    pub selection_offset: Option<usize>,
    /// `RETURNING` items.
    pub returning: Vec<SelectItem>,
}

/// The `MERGE` statement.
///
/// ```txt
/// MERGE INTO <target> USING <source> ON <condition>
///     { WHEN [NOT] MATCHED [ AND <condition> ] THEN <action> }...
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeStmt {
    /// The merge target.
    pub target: TableFactor,
    /// The merge source.
    pub source: TableFactor,
    /// The ON condition.
    pub on: Expr,
    /// The WHEN clauses, in source order.
    pub clauses: Vec<MergeClause>,
}

/// One `WHEN [NOT] MATCHED ... THEN ...` clause.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeClause {
    /// False for `WHEN NOT MATCHED`.
    pub matched: bool,
    /// The extra `AND <condition>`.
    pub condition: Option<Expr>,
    /// The action after THEN.
    pub action: MergeAction,
}

/// The action of a merge clause.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MergeAction {
    /// `UPDATE SET <assignments>`.
    Update(Vec<Assignment>),
    /// `INSERT [ (<columns>) ] VALUES <rows>`.
    Insert {
        /// The column list.
        columns: Vec<Ident>,
        /// The inserted values.
        values: Values,
    },
    /// `DELETE`.
    Delete,
}
