//! # sqlriver-parser
//!
//! The recursive-descent SQL parser of the sqlriver formatter. Lifts the
//! token stream into statement trees, with optional per-statement error
//! recovery: a failed statement degrades to a raw pass-through covering
//! its exact source bytes, and no statement is ever silently dropped.

#![deny(missing_docs)]
#![deny(unused_imports)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod config;
mod cursor;
mod error;
mod parser;

pub use self::{
    config::ParserConfig,
    cursor::TokenCursor,
    error::{MaxDepthError, ParseError, ParserError},
    parser::Parser,
};
