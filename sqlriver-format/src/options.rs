/// Keyword casing policy.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum KeywordCase {
    /// Uppercase all keywords (the default).
    #[default]
    Upper,
    /// Lowercase all keywords.
    Lower,
    /// Keep the source spelling where it is available; statements that
    /// are rebuilt from structured trees use the canonical uppercase.
    Preserve,
}

/// Identifier casing policy (applies inside write statements only).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum IdentifierCase {
    /// Lowercase identifiers that were not deliberately mixed-case.
    #[default]
    Lower,
    /// Keep the source spelling.
    Preserve,
}

/// Layout options for the formatter.
#[derive(Copy, Clone, Debug)]
pub struct FormatOptions {
    /// Soft line-length budget.
    pub max_line_length: usize,
    /// Indent width in spaces.
    pub indent: usize,
    /// Keyword casing policy.
    pub keyword_case: KeywordCase,
    /// Identifier casing policy for write statements.
    pub identifier_case: IdentifierCase,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_line_length: 100,
            indent: 4,
            keyword_case: KeywordCase::Upper,
            identifier_case: IdentifierCase::Lower,
        }
    }
}
