use core::fmt::Debug;

use crate::keywords::{is_common_keyword, Keyword};

/// The supported dialects, as selected by the options record.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DialectKind {
    /// PostgreSQL (the default).
    #[default]
    Postgres,
    /// MySQL / MariaDB.
    Mysql,
    /// Microsoft T-SQL.
    Tsql,
    /// Oracle SQL and PL/SQL.
    Oracle,
    /// SQLite.
    Sqlite,
    /// Snowflake.
    Snowflake,
    /// Google BigQuery.
    Bigquery,
    /// Exasol.
    Exasol,
    /// Plain ANSI SQL.
    Ansi,
}

/// The marker for a dialect.
pub trait Dialect: Debug {
    /// The lexer configuration of the dialect.
    type LexerConf: DialectLexerConf;

    /// The parser configuration of the dialect.
    type ParserConf: DialectParserConf;

    /// Returns the lexer configuration.
    fn lexer_conf(&self) -> &Self::LexerConf;

    /// Returns the parser configuration.
    fn parser_conf(&self) -> &Self::ParserConf;

    /// Returns which dialect this is.
    fn kind(&self) -> DialectKind;
}

/// The configuration of the lexer part of a dialect.
///
/// The default implementations describe ANSI SQL; each dialect overrides
/// the predicates it deviates on.
pub trait DialectLexerConf: Clone + Debug {
    /// Looks up a word in the keyword table, honouring the dialect's
    /// keyword set. Words that are keywords only in other dialects
    /// lex as plain identifiers.
    fn keyword(&self, word: &str) -> Option<Keyword> {
        Keyword::from_word(word).filter(|kw| self.recognizes_keyword(*kw))
    }

    /// Determine if the dialect treats `kw` as a keyword.
    fn recognizes_keyword(&self, kw: Keyword) -> bool {
        is_common_keyword(kw)
    }

    /// Determine if a character starts a quoted identifier.
    /// Accepting double-quoted identifiers is both ANSI-compliant and
    /// appropriate for most dialects (with the notable exceptions of
    /// MySQL/BigQuery backticks and T-SQL brackets).
    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '"'
    }

    /// Determine if a character is a valid start character for an
    /// unquoted identifier.
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_'
    }

    /// Determine if a character is a valid part character for an
    /// unquoted identifier. `$` mid-identifier is an Oracle extension
    /// that is accepted everywhere.
    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '$'
    }

    /// `$tag$ ... $tag$` dollar-quoted strings.
    fn supports_dollar_quoting(&self) -> bool {
        false
    }

    /// `E'...'` strings with C-style backslash escapes.
    fn supports_escape_string(&self) -> bool {
        false
    }

    /// `U&'...'` Unicode-escaped strings with an optional `UESCAPE` clause.
    fn supports_unicode_string(&self) -> bool {
        false
    }

    /// `$N` positional parameters.
    fn supports_dollar_parameter(&self) -> bool {
        false
    }

    /// `@name` / `@@name` parameters.
    fn supports_at_parameter(&self) -> bool {
        false
    }

    /// `:name` / `:'name'` parameters.
    fn supports_colon_parameter(&self) -> bool {
        false
    }

    /// Whether a bare `?` is an operator (PostgreSQL JSON containment)
    /// rather than a JDBC-style parameter.
    fn question_is_operator(&self) -> bool {
        false
    }

    /// psql-style `\...` meta-commands.
    fn supports_backslash_meta(&self) -> bool {
        false
    }

    /// SQL*Plus `@file`, `REM`, `SET SERVEROUTPUT`, `ACCEPT`,
    /// `DESCRIBE`/`DESC` meta-commands.
    fn supports_sqlplus_meta(&self) -> bool {
        false
    }

    /// MySQL CLI `source` / `DESCRIBE` meta-commands.
    fn supports_mysql_meta(&self) -> bool {
        false
    }

    /// The `DELIMITER <seq>` directive.
    fn supports_delimiter_directive(&self) -> bool {
        false
    }

    /// `GO` on a line by itself as a batch separator.
    fn supports_go_batch(&self) -> bool {
        false
    }

    /// Stand-alone `/` at column 1 as a block terminator.
    fn supports_slash_terminator(&self) -> bool {
        false
    }

    /// MySQL `/*! ... */` conditional comments kept verbatim.
    fn supports_conditional_comments(&self) -> bool {
        false
    }

    /// Exasol Lua bracket-string continuations (`]]..ident..[[`).
    fn supports_lua_bracket_strings(&self) -> bool {
        false
    }
}

/// The configuration of the parser part of a dialect.
pub trait DialectParserConf: Clone + Debug {
    /// Snowflake VARIANT path access with `:` (e.g. `payload:item.id`).
    fn supports_variant_path(&self) -> bool {
        false
    }

    /// BigQuery procedure bodies pass built-ins such as `format` through
    /// in lowercase; the word is classified as a plain identifier inside
    /// procedural blocks instead of a function keyword.
    fn builtins_keep_case_in_blocks(&self) -> bool {
        false
    }
}
