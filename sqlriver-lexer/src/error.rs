#[cfg(not(feature = "std"))]
use alloc::string::String;

use sqlriver_core::Location;

/// Fatal lexical error: unterminated literal, illegal control byte, or a
/// resource guard violation. Never recoverable.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct TokenizeError {
    /// Human-readable description; resource-limit messages include the
    /// numeric limit.
    pub message: String,
    /// 0-based byte offset of the error.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl TokenizeError {
    /// Creates an error pinned to the given source location.
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            offset: location.offset,
            line: location.line,
            column: location.column,
        }
    }
}
