use crate::{
    dialect::{Dialect, DialectKind, DialectLexerConf, DialectParserConf},
    keywords::{is_common_keyword, Keyword},
};

/// Oracle SQL / PL/SQL dialect (also covers SQL*Plus meta-commands).
#[derive(Clone, Debug, Default)]
pub struct OracleDialect;

/// Keywords Oracle recognises on top of the common set.
const EXTRA_KEYWORDS: &[Keyword] = &[Keyword::CONNECT, Keyword::MINUS, Keyword::PRIOR];

impl Dialect for OracleDialect {
    type LexerConf = Self;
    type ParserConf = Self;

    fn lexer_conf(&self) -> &Self {
        self
    }

    fn parser_conf(&self) -> &Self {
        self
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Oracle
    }
}

impl DialectLexerConf for OracleDialect {
    fn recognizes_keyword(&self, kw: Keyword) -> bool {
        is_common_keyword(kw) || EXTRA_KEYWORDS.binary_search(&kw).is_ok()
    }

    fn supports_colon_parameter(&self) -> bool {
        true
    }

    fn supports_sqlplus_meta(&self) -> bool {
        true
    }

    fn supports_slash_terminator(&self) -> bool {
        true
    }
}

impl DialectParserConf for OracleDialect {}
