use sqlriver_core::DialectKind;
use sqlriver_format::{FormatOptions, IdentifierCase, KeywordCase};
use sqlriver_lexer::LexerConfig;
use sqlriver_parser::ParserConfig;

/// The options record shared by [`format`](crate::format) and
/// [`parse`](crate::parse). All fields have defaults.
#[derive(Clone, Debug)]
pub struct Options {
    /// The SQL dialect to format against.
    pub dialect: DialectKind,
    /// Soft line-length budget.
    pub max_line_length: usize,
    /// Maximum input size in bytes.
    pub max_input_size: usize,
    /// Maximum number of tokens.
    pub max_token_count: usize,
    /// Maximum single-token length in characters.
    pub max_token_length: usize,
    /// Maximum subquery/parenthesis nesting.
    pub max_depth: usize,
    /// Indent width in spaces.
    pub indent: usize,
    /// Keyword casing policy.
    pub keyword_case: KeywordCase,
    /// Identifier casing policy (write statements only).
    pub identifier_case: IdentifierCase,
    /// Per-statement error recovery.
    pub recover: bool,
}

impl Default for Options {
    fn default() -> Self {
        let lexer = LexerConfig::default();
        let parser = ParserConfig::default();
        let format = FormatOptions::default();
        Self {
            dialect: DialectKind::default(),
            max_line_length: format.max_line_length,
            max_input_size: lexer.max_input_size,
            max_token_count: lexer.max_token_count,
            max_token_length: lexer.max_token_length,
            max_depth: parser.max_depth,
            indent: format.indent,
            keyword_case: format.keyword_case,
            identifier_case: format.identifier_case,
            recover: parser.recover,
        }
    }
}

impl Options {
    /// The lexer resource guards of this options record.
    pub(crate) fn lexer_config(&self) -> LexerConfig {
        LexerConfig::new()
            .max_input_size(self.max_input_size)
            .max_token_count(self.max_token_count)
            .max_token_length(self.max_token_length)
    }

    /// The parser configuration of this options record.
    pub(crate) fn parser_config(&self) -> ParserConfig {
        ParserConfig::new()
            .recover(self.recover)
            .max_depth(self.max_depth)
    }

    /// The layout options of this options record.
    pub(crate) fn format_options(&self) -> FormatOptions {
        FormatOptions {
            max_line_length: self.max_line_length,
            indent: self.indent,
            keyword_case: self.keyword_case,
            identifier_case: self.identifier_case,
        }
    }
}
