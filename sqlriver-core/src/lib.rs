//! # sqlriver-core
//!
//! Core types shared by the sqlriver SQL formatter: the dialect traits and
//! the nine built-in dialects, the global keyword tables, and the token
//! model (kind, raw text, byte span, line/column, leading whitespace).

#![deny(missing_docs)]
#![deny(unused_imports)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod dialect;
/// The keyword definitions.
pub mod keywords;
mod tokens;

/// The ANSI SQL dialect.
pub mod ansi;
/// The Google BigQuery dialect.
pub mod bigquery;
/// The Exasol dialect.
pub mod exasol;
/// The MySQL dialect.
pub mod mysql;
/// The Oracle dialect.
pub mod oracle;
/// The PostgreSQL dialect.
pub mod postgres;
/// The Snowflake dialect.
pub mod snowflake;
/// The SQLite dialect.
pub mod sqlite;
/// The T-SQL dialect.
pub mod tsql;

pub use self::{
    dialect::{Dialect, DialectKind, DialectLexerConf, DialectParserConf},
    keywords::Keyword,
    tokens::{
        DirectiveKind, Location, ParamKind, QuoteStyle, Span, StringKind, Token, TokenKind,
    },
};
