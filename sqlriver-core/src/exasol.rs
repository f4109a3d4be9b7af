use crate::dialect::{Dialect, DialectKind, DialectLexerConf, DialectParserConf};

/// Exasol dialect. Script bodies may contain Lua bracket-string
/// continuations, which the lexer passes through opaquely.
#[derive(Clone, Debug, Default)]
pub struct ExasolDialect;

impl Dialect for ExasolDialect {
    type LexerConf = Self;
    type ParserConf = Self;

    fn lexer_conf(&self) -> &Self {
        self
    }

    fn parser_conf(&self) -> &Self {
        self
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Exasol
    }
}

impl DialectLexerConf for ExasolDialect {
    fn supports_lua_bracket_strings(&self) -> bool {
        true
    }
}

impl DialectParserConf for ExasolDialect {}
