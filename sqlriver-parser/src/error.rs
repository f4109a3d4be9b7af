#[cfg(not(feature = "std"))]
use alloc::string::String;

use sqlriver_core::Token;
use sqlriver_lexer::TokenizeError;

/// Structural parse error: unexpected token, missing required clause,
/// unbalanced parenthesis. Fatal in strict mode; in recovery mode the
/// offending statement degrades to a raw pass-through.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    /// Human-readable description.
    pub message: String,
    /// 0-based byte offset of the offending token.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl ParseError {
    /// Creates an error pinned to the given token.
    pub fn at_token(message: impl Into<String>, token: &Token) -> Self {
        Self {
            message: message.into(),
            offset: token.span.start,
            line: token.line,
            column: token.column,
        }
    }
}

/// Nesting bound violation. Always fatal, in both strict and recovery
/// mode.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("nesting depth exceeds {max_depth} at line {line}, column {column}")]
pub struct MaxDepthError {
    /// The configured bound.
    pub max_depth: usize,
    /// 0-based byte offset.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

/// Any error the parser can raise.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParserError {
    /// A lexical error surfaced while tokenizing for the parser.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// A structural error.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The nesting bound was exceeded.
    #[error(transparent)]
    MaxDepth(#[from] MaxDepthError),
}
