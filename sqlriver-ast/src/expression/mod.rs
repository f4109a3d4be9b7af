//! The recursive expression sum type and its satellites.

mod function;
mod operator;
mod query;
mod table;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};

pub use self::{function::*, operator::*, query::*, table::*};
use crate::types::{DataType, Ident, Literal};

/// A SQL expression.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),
    /// A plain identifier.
    Identifier(Ident),
    /// A dotted identifier path (`alias.column`, `schema.table.column`).
    CompoundIdentifier(Vec<Ident>),
    /// `*`
    Wildcard,
    /// `alias.*`
    QualifiedWildcard(Vec<Ident>),
    /// A placeholder parameter (`$1`, `@name`, `:name`, `?`), verbatim.
    Parameter(String),
    /// The `DEFAULT` keyword in INSERT/UPDATE value position.
    Default,
    /// A function call with its optional clause tail.
    Function(Box<FunctionCall>),
    /// `CAST(<expr> AS <type>)` or `<expr>::<type>`.
    Cast {
        /// The operand.
        expr: Box<Expr>,
        /// Target type.
        data_type: DataType,
        /// True for the `::` spelling.
        double_colon: bool,
    },
    /// Simple or searched CASE.
    Case(Box<CaseExpr>),
    /// `<expr> [NOT] BETWEEN <low> AND <high>`
    Between {
        /// The tested expression.
        expr: Box<Expr>,
        /// Negation flag.
        negated: bool,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
    },
    /// `<expr> [NOT] IN (<list>)`
    InList {
        /// The tested expression.
        expr: Box<Expr>,
        /// Negation flag.
        negated: bool,
        /// The value list.
        list: Vec<Expr>,
    },
    /// `<expr> [NOT] IN (<subquery>)`
    InSubquery {
        /// The tested expression.
        expr: Box<Expr>,
        /// Negation flag.
        negated: bool,
        /// The subquery.
        subquery: Box<Query>,
    },
    /// `[NOT] EXISTS (<subquery>)`
    Exists {
        /// Negation flag.
        negated: bool,
        /// The subquery.
        subquery: Box<Query>,
    },
    /// `<expr> <op> { ALL | ANY | SOME } (<subquery>)`
    Quantified {
        /// Left operand.
        expr: Box<Expr>,
        /// Comparison operator.
        op: BinaryOperator,
        /// The quantifier keyword.
        quantifier: Quantifier,
        /// The subquery.
        subquery: Box<Query>,
    },
    /// A scalar subquery.
    Subquery(Box<Query>),
    /// `ARRAY[...]` constructor.
    Array(Vec<Expr>),
    /// `ROW(...)` or a bare parenthesised tuple.
    Row(Vec<Expr>),
    /// `INTERVAL '...' [ <qualifier words> ]`
    Interval {
        /// The interval body literal.
        value: Box<Expr>,
        /// Trailing qualifier words (`DAY`, `YEAR TO MONTH`, ...).
        qualifier: Vec<String>,
    },
    /// `<op> <expr>`
    UnaryOp {
        /// The operator.
        op: UnaryOperator,
        /// The operand.
        expr: Box<Expr>,
    },
    /// `<left> <op> <right>`
    BinaryOp {
        /// Left operand.
        left: Box<Expr>,
        /// The operator.
        op: BinaryOperator,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `<expr> IS [NOT] NULL`
    IsNull {
        /// The tested expression.
        expr: Box<Expr>,
        /// Negation flag.
        negated: bool,
    },
    /// `<expr> IS [NOT] DISTINCT FROM <expr>`
    IsDistinctFrom {
        /// Left operand.
        left: Box<Expr>,
        /// Negation flag.
        negated: bool,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `<expr> [ <index> ]` or `<expr> [ <lo> : <hi> ]`
    Subscript {
        /// The indexed expression.
        expr: Box<Expr>,
        /// The subscript.
        subscript: Box<Subscript>,
    },
    /// Snowflake VARIANT path access `<expr>:<ident>`.
    VariantPath {
        /// The accessed expression.
        expr: Box<Expr>,
        /// The path component.
        path: Ident,
    },
    /// A parenthesised expression.
    Nested(Box<Expr>),
}

/// `ALL` / `ANY` / `SOME` in a quantified comparison.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quantifier {
    /// `ALL`
    All,
    /// `ANY`
    Any,
    /// `SOME`
    Some,
}

impl Quantifier {
    /// The keyword spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Any => "ANY",
            Self::Some => "SOME",
        }
    }
}

/// An array subscript: single index or slice.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Subscript {
    /// `[ <index> ]`
    Index(Expr),
    /// `[ <lo> : <hi> ]`, either bound optional.
    Slice {
        /// Lower bound.
        lower: Option<Expr>,
        /// Upper bound.
        upper: Option<Expr>,
    },
}

/// A `CASE` expression, simple (`CASE <operand> WHEN ...`) or searched
/// (`CASE WHEN <cond> ...`).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseExpr {
    /// The operand of a simple CASE.
    pub operand: Option<Expr>,
    /// The WHEN arms.
    pub when_clauses: Vec<CaseWhen>,
    /// The ELSE result.
    pub else_result: Option<Expr>,
}

/// One `WHEN <condition> THEN <result>` arm.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseWhen {
    /// The condition (or comparand, for a simple CASE).
    pub condition: Expr,
    /// The result.
    pub result: Expr,
}
