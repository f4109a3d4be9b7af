use crate::{
    dialect::{Dialect, DialectKind, DialectLexerConf, DialectParserConf},
    keywords::{is_common_keyword, Keyword},
};

/// SQLite dialect. Accepts all three identifier quoting flavours.
#[derive(Clone, Debug, Default)]
pub struct SqliteDialect;

/// Keywords SQLite recognises on top of the common set.
const EXTRA_KEYWORDS: &[Keyword] = &[Keyword::AUTOINCREMENT];

impl Dialect for SqliteDialect {
    type LexerConf = Self;
    type ParserConf = Self;

    fn lexer_conf(&self) -> &Self {
        self
    }

    fn parser_conf(&self) -> &Self {
        self
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Sqlite
    }
}

impl DialectLexerConf for SqliteDialect {
    fn recognizes_keyword(&self, kw: Keyword) -> bool {
        is_common_keyword(kw) || EXTRA_KEYWORDS.binary_search(&kw).is_ok()
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '"' || ch == '`' || ch == '['
    }
}

impl DialectParserConf for SqliteDialect {}
