use crate::{
    dialect::{Dialect, DialectKind, DialectLexerConf, DialectParserConf},
    keywords::{is_common_keyword, Keyword},
};

/// Plain ANSI SQL dialect.
#[derive(Clone, Debug, Default)]
pub struct AnsiDialect;

/// `ILIKE` is uppercase-normalised under `ansi` as well as `postgres`.
const EXTRA_KEYWORDS: &[Keyword] = &[Keyword::ILIKE];

impl Dialect for AnsiDialect {
    type LexerConf = Self;
    type ParserConf = Self;

    fn lexer_conf(&self) -> &Self {
        self
    }

    fn parser_conf(&self) -> &Self {
        self
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Ansi
    }
}

impl DialectLexerConf for AnsiDialect {
    fn recognizes_keyword(&self, kw: Keyword) -> bool {
        is_common_keyword(kw) || EXTRA_KEYWORDS.binary_search(&kw).is_ok()
    }

    fn supports_unicode_string(&self) -> bool {
        true
    }
}

impl DialectParserConf for AnsiDialect {}
