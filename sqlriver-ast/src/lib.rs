//! # sqlriver-ast
//!
//! The statement, expression and from-source tree types of the sqlriver
//! SQL formatter. Trees are built by `sqlriver-parser` and read-only
//! thereafter; every node owns its children exclusively and no cycles
//! exist.

#![deny(missing_docs)]
#![deny(unused_imports)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Expression trees.
pub mod expression;
/// Statement trees.
pub mod statement;
/// Atomic value types.
pub mod types;
/// Display helpers.
pub mod utils;
