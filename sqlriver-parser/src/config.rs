/// Parser configuration.
#[derive(Copy, Clone, Debug)]
pub struct ParserConfig {
    /// When true (the default), a structural error inside a statement
    /// degrades that statement to a raw pass-through instead of failing
    /// the whole parse.
    pub recover: bool,
    /// Maximum subquery/parenthesis nesting. Exceeding it is fatal in
    /// both modes.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            recover: true,
            max_depth: 100,
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the recovery flag.
    pub fn recover(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    /// Sets the nesting bound.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
