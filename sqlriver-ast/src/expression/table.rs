#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};
use core::fmt;

use crate::{
    expression::{Expr, FunctionCall, Query, Values},
    types::{DataType, Ident, ObjectName},
};

/// One entry of a FROM list: a table factor plus the joins chained onto
/// it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableWithJoins {
    /// The base relation.
    pub relation: TableFactor,
    /// The join chain.
    pub joins: Vec<Join>,
}

/// A from-source.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableFactor {
    /// A base table reference.
    Table {
        /// Table name.
        name: ObjectName,
        /// Alias with optional column list.
        alias: Option<TableAlias>,
        /// `WITH ORDINALITY` flag.
        with_ordinality: bool,
        /// T-SQL style table hints (`(NOLOCK)`), verbatim.
        hints: Vec<String>,
        /// `TABLESAMPLE` clause, verbatim tail.
        tablesample: Option<String>,
    },
    /// A parenthesised subquery, optionally LATERAL.
    Derived {
        /// `LATERAL` wrapper flag.
        lateral: bool,
        /// The subquery.
        subquery: Box<Query>,
        /// Alias with optional column list.
        alias: Option<TableAlias>,
    },
    /// A table function call, optionally with a column type list.
    Function {
        /// `LATERAL` wrapper flag.
        lateral: bool,
        /// The call.
        call: Box<FunctionCall>,
        /// Alias with optional column list.
        alias: Option<TableAlias>,
        /// `AS (col type, ...)` column definitions.
        column_defs: Vec<(Ident, DataType)>,
        /// `WITH ORDINALITY` flag.
        with_ordinality: bool,
    },
    /// A `VALUES` constructor in FROM position.
    Values {
        /// The rows.
        values: Values,
        /// Alias with optional column list.
        alias: Option<TableAlias>,
    },
    /// A parenthesised join tree.
    NestedJoin {
        /// The inner join tree.
        inner: Box<TableWithJoins>,
        /// Alias for the whole group.
        alias: Option<TableAlias>,
    },
}

/// A table alias with an optional column list.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableAlias {
    /// The alias name.
    pub name: Ident,
    /// The column alias list.
    pub columns: Vec<Ident>,
}

impl fmt::Display for TableAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            let mut first = true;
            for col in &self.columns {
                if !first {
                    f.write_str(", ")?;
                }
                first = false;
                write!(f, "{}", col)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// One join step chained onto a table factor.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Join {
    /// The join kind.
    pub join_type: JoinType,
    /// Byte offset of the joined relation's first token, for comment
    /// anchoring.
    pub offset: usize,
    /// The joined relation.
    pub relation: TableFactor,
    /// The join constraint.
    pub constraint: JoinConstraint,
}

/// The join kind, as written.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinType {
    /// Bare `JOIN`.
    Join,
    /// `INNER JOIN`.
    Inner,
    /// `LEFT [OUTER] JOIN`; true when `OUTER` was written.
    Left(bool),
    /// `RIGHT [OUTER] JOIN`.
    Right(bool),
    /// `FULL [OUTER] JOIN`.
    Full(bool),
    /// `CROSS JOIN`.
    Cross,
    /// `STRAIGHT_JOIN` (MySQL).
    Straight,
    /// `NATURAL JOIN`.
    Natural,
    /// `LATERAL JOIN` spelling.
    Lateral,
    /// `CROSS APPLY` (T-SQL).
    CrossApply,
    /// `OUTER APPLY` (T-SQL).
    OuterApply,
}

impl JoinType {
    /// The canonical keyword text of the join.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "JOIN",
            Self::Inner => "INNER JOIN",
            Self::Left(false) => "LEFT JOIN",
            Self::Left(true) => "LEFT OUTER JOIN",
            Self::Right(false) => "RIGHT JOIN",
            Self::Right(true) => "RIGHT OUTER JOIN",
            Self::Full(false) => "FULL JOIN",
            Self::Full(true) => "FULL OUTER JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Straight => "STRAIGHT_JOIN",
            Self::Natural => "NATURAL JOIN",
            Self::Lateral => "LATERAL JOIN",
            Self::CrossApply => "CROSS APPLY",
            Self::OuterApply => "OUTER APPLY",
        }
    }

    /// True for the LEFT/RIGHT/FULL outer family, which the layout engine
    /// indents two extra columns.
    pub fn is_outer_family(&self) -> bool {
        matches!(self, Self::Left(_) | Self::Right(_) | Self::Full(_))
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The constraint of a join.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinConstraint {
    /// `ON <condition>`.
    On(Expr),
    /// `USING (<columns>)`.
    Using(Vec<Ident>),
    /// No constraint (CROSS, NATURAL, comma join).
    None,
}
