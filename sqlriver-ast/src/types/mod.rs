//! Atomic value types shared across the tree: identifiers, object names,
//! literals and data types.

mod data_type;
mod ident;
mod literal;

pub use self::{
    data_type::DataType,
    ident::{Ident, ObjectName},
    literal::Literal,
};
