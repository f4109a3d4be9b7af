#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
use core::fmt;

use sqlriver_core::QuoteStyle;

/// An optionally quoted SQL identifier.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ident {
    /// The identifier as spelled in the source, without the enclosing
    /// quotes. Escape sequences are left unprocessed so the exact source
    /// spelling can be re-emitted.
    pub value: String,
    /// The quoting flavour, if the identifier was delimited. Quoted
    /// identifiers are never recased.
    pub quote: Option<QuoteStyle>,
}

impl Ident {
    /// Creates an unquoted identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: None,
        }
    }

    /// Creates a quoted identifier.
    pub fn quoted(value: impl Into<String>, quote: QuoteStyle) -> Self {
        Self {
            value: value.into(),
            quote: Some(quote),
        }
    }

    /// True if the source spelling contains no lowercase letter, i.e. the
    /// identifier was not deliberately mixed-case.
    pub fn is_not_deliberately_cased(&self) -> bool {
        !self.value.chars().any(|c| c.is_lowercase())
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote {
            None => f.write_str(&self.value),
            Some(style) => write!(f, "{}{}{}", style.open(), self.value, style.close()),
        }
    }
}

/// A dotted, possibly qualified object name (`schema.table`).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    /// The last (unqualified) component of the name.
    pub fn last(&self) -> Option<&Ident> {
        self.0.last()
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            first = false;
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}
