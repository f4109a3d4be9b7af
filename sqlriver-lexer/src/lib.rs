//! # sqlriver-lexer
//!
//! The tokenizer of the sqlriver SQL formatter: converts raw SQL text into
//! an ordered token sequence with byte spans and leading-whitespace info,
//! recognising the union of lexical features across the supported dialects.

#![deny(missing_docs)]
#![deny(unused_imports)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod config;
mod error;
mod lexer;

pub use self::{config::LexerConfig, error::TokenizeError, lexer::Lexer};
