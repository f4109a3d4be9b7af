#[cfg(not(feature = "std"))]
use alloc::string::String;
use core::fmt;

use sqlriver_core::StringKind;

/// A literal value. String-like literals keep their exact source text
/// (prefix and quotes included) so they are re-emitted byte-for-byte and
/// never split across lines.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    /// An unsigned numeric literal, as spelled in the source.
    Number(String),
    /// A string literal of any flavour; `text` is the raw source slice.
    String {
        /// The string sub-variant.
        kind: StringKind,
        /// Raw source text including prefix and quotes.
        text: String,
    },
    /// `TRUE` / `FALSE`.
    Boolean(bool),
    /// `NULL`.
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(n),
            Self::String { text, .. } => f.write_str(text),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
        }
    }
}
