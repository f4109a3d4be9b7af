#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::utils::display_comma_separated;

/// A column type expression: one or more name words, an optional argument
/// list, and trailing modifier words that stay visually attached to the
/// type (`UNSIGNED`, `ZEROFILL`, `WITH TIME ZONE`, ...).
///
/// ```txt
/// DECIMAL(10, 2) UNSIGNED
/// TIMESTAMP WITH TIME ZONE
/// ```
///
/// Words are stored as spelled in the source; the formatter decides their
/// casing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataType {
    /// The type name words (`character varying` is two words).
    pub name: Vec<String>,
    /// The parenthesised argument list, raw (`10`, `2`, `'utf8'`).
    pub args: Option<Vec<String>>,
    /// Modifier words following the argument list.
    pub modifiers: Vec<String>,
}

impl DataType {
    /// A type with a single name word and no arguments.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: [name.into()].into(),
            args: None,
            modifiers: Vec::new(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for word in &self.name {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            f.write_str(word)?;
        }
        if let Some(args) = &self.args {
            write!(f, "({})", display_comma_separated(args))?;
        }
        for word in &self.modifiers {
            write!(f, " {}", word)?;
        }
        Ok(())
    }
}
