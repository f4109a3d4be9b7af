#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use crate::{
    expression::{Expr, OrderByExpr},
    types::{Ident, Literal, ObjectName},
};

/// A function call, with the clause extensions that may follow the
/// argument list.
///
/// ```txt
/// <name> ( [ DISTINCT | VARIADIC ] <args> [ ORDER BY ... ] [ SEPARATOR <lit> ] )
///     [ WITHIN GROUP ( ORDER BY ... ) ]
///     [ FILTER ( WHERE <cond> ) ]
///     [ OVER ( <window spec> ) | OVER <window name> ]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionCall {
    /// Function name.
    pub name: ObjectName,
    /// Argument list.
    pub args: Vec<FunctionArg>,
    /// `DISTINCT` before the arguments.
    pub distinct: bool,
    /// `VARIADIC` before the arguments.
    pub variadic: bool,
    /// Aggregate `ORDER BY` inside the argument list.
    pub order_by: Vec<OrderByExpr>,
    /// MySQL `GROUP_CONCAT(... SEPARATOR '...')`.
    pub separator: Option<Literal>,
    /// `WITHIN GROUP (ORDER BY ...)`.
    pub within_group: Vec<OrderByExpr>,
    /// `FILTER (WHERE ...)`.
    pub filter: Option<Box<Expr>>,
    /// `OVER ...` window.
    pub over: Option<WindowSpec>,
}

/// A single function argument.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionArg {
    /// An ordinary expression argument.
    Unnamed(Expr),
    /// `name => value` named argument.
    Named {
        /// Argument name.
        name: Ident,
        /// Argument value.
        value: Expr,
    },
}

/// An `OVER` clause: either a reference to a named window or an inline
/// specification.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSpec {
    /// Base window name (`OVER w` or `OVER (w PARTITION BY ...)`).
    pub name: Option<Ident>,
    /// `PARTITION BY` expressions.
    pub partition_by: Vec<Expr>,
    /// `ORDER BY` expressions.
    pub order_by: Vec<OrderByExpr>,
    /// The frame clause.
    pub frame: Option<WindowFrame>,
    /// `EXCLUDE ...`.
    pub exclude: Option<FrameExclusion>,
    /// Whether the spec was parenthesised (`OVER w` vs `OVER (...)`).
    pub parenthesized: bool,
}

/// A window frame clause.
///
/// ```txt
/// { ROWS | RANGE | GROUPS } { <bound> | BETWEEN <bound> AND <bound> }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowFrame {
    /// Frame units.
    pub units: WindowFrameUnits,
    /// Frame start bound.
    pub start: WindowFrameBound,
    /// Frame end bound, when the `BETWEEN ... AND ...` form was used.
    pub end: Option<WindowFrameBound>,
}

/// Window frame units.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowFrameUnits {
    /// `ROWS`
    Rows,
    /// `RANGE`
    Range,
    /// `GROUPS`
    Groups,
}

/// A single window frame bound.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowFrameBound {
    /// `CURRENT ROW`
    CurrentRow,
    /// `<expr> PRECEDING` or `UNBOUNDED PRECEDING` (`None`).
    Preceding(Option<Box<Expr>>),
    /// `<expr> FOLLOWING` or `UNBOUNDED FOLLOWING` (`None`).
    Following(Option<Box<Expr>>),
}

/// `EXCLUDE` clause of a window frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameExclusion {
    /// `EXCLUDE CURRENT ROW`
    CurrentRow,
    /// `EXCLUDE GROUP`
    Group,
    /// `EXCLUDE TIES`
    Ties,
    /// `EXCLUDE NO OTHERS`
    NoOthers,
}
