use crate::{
    dialect::{Dialect, DialectKind, DialectLexerConf, DialectParserConf},
    keywords::{is_common_keyword, Keyword},
};

/// PostgreSQL dialect (also covers psql meta-commands).
#[derive(Clone, Debug, Default)]
pub struct PostgresDialect;

/// Keywords PostgreSQL recognises on top of the common set.
const EXTRA_KEYWORDS: &[Keyword] = &[
    Keyword::CONCURRENTLY,
    Keyword::ILIKE,
    Keyword::LISTEN,
    Keyword::NOTIFY,
    Keyword::PUBLICATION,
    Keyword::UNLISTEN,
    Keyword::VARIADIC,
];

impl Dialect for PostgresDialect {
    type LexerConf = Self;
    type ParserConf = Self;

    fn lexer_conf(&self) -> &Self {
        self
    }

    fn parser_conf(&self) -> &Self {
        self
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Postgres
    }
}

impl DialectLexerConf for PostgresDialect {
    fn recognizes_keyword(&self, kw: Keyword) -> bool {
        is_common_keyword(kw) || EXTRA_KEYWORDS.binary_search(&kw).is_ok()
    }

    fn supports_dollar_quoting(&self) -> bool {
        true
    }

    fn supports_escape_string(&self) -> bool {
        true
    }

    fn supports_unicode_string(&self) -> bool {
        true
    }

    fn supports_dollar_parameter(&self) -> bool {
        true
    }

    fn supports_colon_parameter(&self) -> bool {
        true
    }

    fn question_is_operator(&self) -> bool {
        true
    }

    fn supports_backslash_meta(&self) -> bool {
        true
    }
}

impl DialectParserConf for PostgresDialect {}
