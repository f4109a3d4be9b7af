#[cfg(not(feature = "std"))]
use alloc::string::String;
use core::fmt;

/// Unary operators.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOperator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `NOT`
    Not,
    /// `~` (bitwise not)
    BitwiseNot,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "NOT",
            Self::BitwiseNot => "~",
        })
    }
}

/// Binary operators.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    StringConcat,
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
    Equal,
    NotEqual,
    And,
    Or,
    Like,
    NotLike,
    ILike,
    NotILike,
    BitwiseAnd,
    BitwiseOr,
    Caret,
    LeftShift,
    RightShift,
    /// `->` JSON field access.
    Arrow,
    /// `->>` JSON field access as text.
    LongArrow,
    /// `#>` JSON path access.
    HashArrow,
    /// `#>>` JSON path access as text.
    HashLongArrow,
    /// `@>` containment.
    AtArrow,
    /// `<@` contained-by.
    ArrowAt,
    /// `@@` text-search match.
    AtAt,
    /// `~` regex match.
    Tilde,
    /// `~*` case-insensitive regex match.
    TildeStar,
    /// `!~` regex non-match.
    NotTilde,
    /// `!~*` case-insensitive regex non-match.
    NotTildeStar,
    /// `?` / `?|` / `?&` key-existence operators, or any other operator
    /// token carried through verbatim.
    Custom(String),
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::StringConcat => "||",
            Self::Greater => ">",
            Self::Less => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::ILike => "ILIKE",
            Self::NotILike => "NOT ILIKE",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::Caret => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Arrow => "->",
            Self::LongArrow => "->>",
            Self::HashArrow => "#>",
            Self::HashLongArrow => "#>>",
            Self::AtArrow => "@>",
            Self::ArrowAt => "<@",
            Self::AtAt => "@@",
            Self::Tilde => "~",
            Self::TildeStar => "~*",
            Self::NotTilde => "!~",
            Self::NotTildeStar => "!~*",
            Self::Custom(op) => op,
        })
    }
}
