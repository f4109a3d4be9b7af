use sqlriver_lexer::TokenizeError;
use sqlriver_parser::{MaxDepthError, ParseError, ParserError};

/// Any error a `format` or `parse` call can raise. Every variant carries
/// a human-readable message, a 0-based byte offset and 1-based line and
/// column.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Fatal lexical error: unterminated literal, illegal control byte,
    /// or a resource guard violation.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// Structural parse error (strict mode only; recovery mode degrades
    /// the statement to a raw pass-through instead).
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Nesting bound violation. Never recoverable.
    #[error(transparent)]
    MaxDepth(#[from] MaxDepthError),
}

impl From<ParserError> for Error {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::Tokenize(e) => Self::Tokenize(e),
            ParserError::Parse(e) => Self::Parse(e),
            ParserError::MaxDepth(e) => Self::MaxDepth(e),
        }
    }
}
