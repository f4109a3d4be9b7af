use crate::dialect::{Dialect, DialectKind, DialectLexerConf, DialectParserConf};

/// Google BigQuery dialect.
#[derive(Clone, Debug, Default)]
pub struct BigqueryDialect;

impl Dialect for BigqueryDialect {
    type LexerConf = Self;
    type ParserConf = Self;

    fn lexer_conf(&self) -> &Self {
        self
    }

    fn parser_conf(&self) -> &Self {
        self
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Bigquery
    }
}

impl DialectLexerConf for BigqueryDialect {
    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '`'
    }
}

impl DialectParserConf for BigqueryDialect {
    fn builtins_keep_case_in_blocks(&self) -> bool {
        true
    }
}
