#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};

use sqlriver_core::Span;

use crate::{
    expression::{Expr, TableWithJoins},
    types::{Ident, ObjectName},
};

/// The most complete variant of a query expression, optionally including
/// `WITH`, set operations, `ORDER BY` and the limiting clauses.
///
/// ```txt
/// <query> ::= [ <with clause> ] <query body>
///     [ <order by clause> ]
///     [ <limit clause> ] [ <offset clause> ] [ <fetch clause> ]
///     [ <locking clause>... ]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    /// WITH (common table expressions).
    pub with: Option<With>,
    /// SELECT or set operation tree.
    pub body: QueryBody,
    /// `ORDER BY` sort keys.
    pub order_by: Vec<OrderByExpr>,
    /// Byte offset of the first sort-key token, for comment anchoring.
    pub order_by_offset: Option<usize>,
    /// `LIMIT <n> | ALL`.
    pub limit: Option<LimitClause>,
    /// `OFFSET <n> [ ROW | ROWS ]`.
    pub offset: Option<OffsetClause>,
    /// `FETCH { FIRST | NEXT } ...`.
    pub fetch: Option<FetchClause>,
    /// `FOR { UPDATE | SHARE } ...` clauses.
    pub locking: Vec<LockingClause>,
}

/// The body of a query expression: a plain SELECT, a parenthesised
/// query, a VALUES constructor, or a set operation over two bodies.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryBody {
    /// A `SELECT ...` specification.
    Select(Box<Select>),
    /// A parenthesised query.
    Nested(Box<Query>),
    /// A `VALUES ...` constructor.
    Values(Values),
    /// `UNION` / `INTERSECT` / `EXCEPT` / `MINUS` over two bodies,
    /// left-associative at equal precedence.
    SetOperation {
        /// Left operand.
        left: Box<QueryBody>,
        /// The set operator.
        op: SetOperator,
        /// `ALL` / `DISTINCT` quantifier.
        quantifier: Option<SetQuantifier>,
        /// Right operand.
        right: Box<QueryBody>,
    },
}

/// A set operator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetOperator {
    /// `UNION`
    Union,
    /// `INTERSECT`
    Intersect,
    /// `EXCEPT`
    Except,
    /// `MINUS` (Oracle spelling of EXCEPT)
    Minus,
}

impl SetOperator {
    /// The keyword spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::Minus => "MINUS",
        }
    }
}

/// `ALL` / `DISTINCT` after a set operator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetQuantifier {
    /// `ALL`
    All,
    /// `DISTINCT`
    Distinct,
}

/// The `WITH [RECURSIVE]` clause.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct With {
    /// `RECURSIVE` flag.
    pub recursive: bool,
    /// The common table expressions.
    pub ctes: Vec<Cte>,
}

/// One common table expression.
///
/// ```txt
/// <name> [ (<columns>) ] AS [ [NOT] MATERIALIZED ] ( <query> )
///     [ SEARCH { DEPTH | BREADTH } FIRST BY <columns> SET <column> ]
///     [ CYCLE <columns> SET <column> [ USING <column> ] ]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cte {
    /// CTE name.
    pub name: Ident,
    /// Optional column list.
    pub columns: Vec<Ident>,
    /// `MATERIALIZED` (true) / `NOT MATERIALIZED` (false) hint.
    pub materialized: Option<bool>,
    /// The CTE body.
    pub query: Box<Query>,
    /// The `SEARCH ... SET ...` clause.
    pub search: Option<CteSearch>,
    /// The `CYCLE ... SET ... [USING ...]` clause.
    pub cycle: Option<CteCycle>,
}

/// `SEARCH { DEPTH | BREADTH } FIRST BY <columns> SET <column>`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CteSearch {
    /// True for `DEPTH FIRST`, false for `BREADTH FIRST`.
    pub depth_first: bool,
    /// The `BY` column list.
    pub by: Vec<Ident>,
    /// The `SET` target column.
    pub set: Ident,
}

/// `CYCLE <columns> SET <column> [ USING <column> ]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CteCycle {
    /// The cycle column list.
    pub columns: Vec<Ident>,
    /// The `SET` target column.
    pub set: Ident,
    /// The `USING` path column.
    pub using: Option<Ident>,
}

/// A `SELECT` specification (one operand of a set operation).
///
/// ```txt
/// SELECT [ ALL | DISTINCT [ ON (...) ] ] [ TOP <n> ] <projection>
///     [ INTO <target> ]
///     [ FROM <from list> ]
///     [ WHERE <condition> ]
///     [ GROUP BY <exprs> ] [ HAVING <condition> ]
///     [ WINDOW <name> AS (<spec>) [, ...] ]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Select {
    /// The `ALL` / `DISTINCT` / `DISTINCT ON` quantifier.
    pub distinct: Option<Distinct>,
    /// T-SQL `TOP <n>`.
    pub top: Option<Expr>,
    /// MySQL `STRAIGHT_JOIN` select hint.
    pub straight_join: bool,
    /// The select list.
    pub projection: Vec<SelectItem>,
    /// `INTO <target>`.
    pub into: Option<ObjectName>,
    /// The FROM list with join trees.
    pub from: Vec<TableWithJoins>,
    /// Byte offset of the first FROM-list token, for comment anchoring.
    pub from_offset: Option<usize>,
    /// The WHERE condition.
    pub selection: Option<Expr>,
    /// Byte offset of the first WHERE-condition token.
    pub selection_offset: Option<usize>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// Byte offset of the first GROUP BY expression token.
    pub group_by_offset: Option<usize>,
    /// HAVING condition.
    pub having: Option<Expr>,
    /// Byte offset of the first HAVING-condition token.
    pub having_offset: Option<usize>,
    /// Named windows (`WINDOW w AS (...)`).
    pub windows: Vec<NamedWindow>,
}

/// The `DISTINCT` flavour of a SELECT.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distinct {
    /// Explicit `ALL`.
    All,
    /// `DISTINCT`.
    Distinct,
    /// `DISTINCT ON (<exprs>)`.
    DistinctOn(Vec<Expr>),
}

/// One item of a select list, with the source span used for comment
/// anchoring.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectItem {
    /// The projected expression.
    pub expr: Expr,
    /// The alias, if any.
    pub alias: Option<Ident>,
    /// Whether `AS` was written before the alias.
    pub explicit_as: bool,
    /// Byte span of the item in the source.
    pub span: Span,
}

/// A named window definition.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedWindow {
    /// The window name.
    pub name: Ident,
    /// The window specification.
    pub spec: crate::expression::WindowSpec,
}

/// One sort key of an `ORDER BY` clause.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderByExpr {
    /// The sort expression.
    pub expr: Expr,
    /// `ASC` (true) / `DESC` (false).
    pub asc: Option<bool>,
    /// `NULLS FIRST` (true) / `NULLS LAST` (false).
    pub nulls_first: Option<bool>,
}

/// `LIMIT <n>` or `LIMIT ALL` (`None`).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LimitClause {
    /// The row count; `None` for `LIMIT ALL`.
    pub quantity: Option<Expr>,
}

/// `OFFSET <n> [ ROW | ROWS ]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetClause {
    /// The offset value.
    pub value: Expr,
    /// The `ROW` / `ROWS` noise word, preserved as written.
    pub rows: Option<String>,
}

/// `FETCH { FIRST | NEXT } [ <n> ] [ PERCENT ] { ROW | ROWS } { ONLY | WITH TIES }`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchClause {
    /// `FIRST` (true) or `NEXT` (false).
    pub first: bool,
    /// The row count.
    pub quantity: Option<Expr>,
    /// `PERCENT` flag.
    pub percent: bool,
    /// `WITH TIES` (true) / `ONLY` (false).
    pub with_ties: bool,
}

/// `FOR { UPDATE | SHARE } [ OF <tables> ] [ SKIP LOCKED | NOWAIT ]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockingClause {
    /// `UPDATE` (true) or `SHARE` (false).
    pub update: bool,
    /// The `OF` table list.
    pub of: Vec<ObjectName>,
    /// The wait policy.
    pub wait: Option<LockWait>,
}

/// The wait policy of a locking clause.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockWait {
    /// `SKIP LOCKED`
    SkipLocked,
    /// `NOWAIT`
    Nowait,
}

/// A `VALUES` table constructor.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Values {
    /// The rows.
    pub rows: Vec<ValuesRow>,
}

/// One parenthesised row of a VALUES constructor.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuesRow {
    /// The row expressions.
    pub exprs: Vec<Expr>,
    /// Byte span of the row in the source.
    pub span: Span,
}
