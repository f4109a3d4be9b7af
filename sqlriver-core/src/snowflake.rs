use crate::{
    dialect::{Dialect, DialectKind, DialectLexerConf, DialectParserConf},
    keywords::{is_common_keyword, Keyword},
};

/// Snowflake dialect.
#[derive(Clone, Debug, Default)]
pub struct SnowflakeDialect;

/// Keywords Snowflake recognises on top of the common set.
const EXTRA_KEYWORDS: &[Keyword] = &[Keyword::IDENTIFIER, Keyword::PIPE];

impl Dialect for SnowflakeDialect {
    type LexerConf = Self;
    type ParserConf = Self;

    fn lexer_conf(&self) -> &Self {
        self
    }

    fn parser_conf(&self) -> &Self {
        self
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Snowflake
    }
}

impl DialectLexerConf for SnowflakeDialect {
    fn recognizes_keyword(&self, kw: Keyword) -> bool {
        is_common_keyword(kw) || EXTRA_KEYWORDS.binary_search(&kw).is_ok()
    }

    fn supports_dollar_quoting(&self) -> bool {
        true
    }
}

impl DialectParserConf for SnowflakeDialect {
    fn supports_variant_path(&self) -> bool {
        true
    }
}
