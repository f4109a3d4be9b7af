use crate::{
    dialect::{Dialect, DialectKind, DialectLexerConf, DialectParserConf},
    keywords::{is_common_keyword, Keyword},
};

/// MySQL / MariaDB dialect.
#[derive(Clone, Debug, Default)]
pub struct MysqlDialect;

/// Keywords MySQL recognises on top of the common set.
const EXTRA_KEYWORDS: &[Keyword] = &[
    Keyword::AUTO_INCREMENT,
    Keyword::CHARSET,
    Keyword::DELIMITER,
    Keyword::DUPLICATE,
    Keyword::ENGINE,
    Keyword::FULLTEXT,
    Keyword::MODIFY,
    Keyword::SPATIAL,
    Keyword::STRAIGHT_JOIN,
    Keyword::UNSIGNED,
    Keyword::ZEROFILL,
];

impl Dialect for MysqlDialect {
    type LexerConf = Self;
    type ParserConf = Self;

    fn lexer_conf(&self) -> &Self {
        self
    }

    fn parser_conf(&self) -> &Self {
        self
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Mysql
    }
}

impl DialectLexerConf for MysqlDialect {
    fn recognizes_keyword(&self, kw: Keyword) -> bool {
        is_common_keyword(kw) || EXTRA_KEYWORDS.binary_search(&kw).is_ok()
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '`'
    }

    fn supports_at_parameter(&self) -> bool {
        true
    }

    fn supports_delimiter_directive(&self) -> bool {
        true
    }

    fn supports_conditional_comments(&self) -> bool {
        true
    }

    fn supports_mysql_meta(&self) -> bool {
        true
    }
}

impl DialectParserConf for MysqlDialect {}
