use crate::{
    dialect::{Dialect, DialectKind, DialectLexerConf, DialectParserConf},
    keywords::{is_common_keyword, Keyword},
};

/// Microsoft T-SQL dialect.
#[derive(Clone, Debug, Default)]
pub struct TsqlDialect;

/// Keywords T-SQL recognises on top of the common set.
const EXTRA_KEYWORDS: &[Keyword] = &[
    Keyword::APPLY,
    Keyword::GO,
    Keyword::IDENTITY,
    Keyword::OUTPUT,
    Keyword::PRINT,
    Keyword::TOP,
];

impl Dialect for TsqlDialect {
    type LexerConf = Self;
    type ParserConf = Self;

    fn lexer_conf(&self) -> &Self {
        self
    }

    fn parser_conf(&self) -> &Self {
        self
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Tsql
    }
}

impl DialectLexerConf for TsqlDialect {
    fn recognizes_keyword(&self, kw: Keyword) -> bool {
        is_common_keyword(kw) || EXTRA_KEYWORDS.binary_search(&kw).is_ok()
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '[' || ch == '"'
    }

    fn supports_at_parameter(&self) -> bool {
        true
    }

    fn supports_go_batch(&self) -> bool {
        true
    }
}

impl DialectParserConf for TsqlDialect {}
