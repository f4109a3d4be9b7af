/// Resource guards for the tokenizer. Exceeding any limit is a fatal
/// [`TokenizeError`](crate::TokenizeError) whose message names the limit.
#[derive(Copy, Clone, Debug)]
pub struct LexerConfig {
    /// Maximum input size in bytes.
    pub max_input_size: usize,
    /// Maximum number of tokens produced for one input.
    pub max_token_count: usize,
    /// Maximum length of a single token, in characters.
    pub max_token_length: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            max_input_size: 10 * 1024 * 1024,
            max_token_count: 1_000_000,
            max_token_length: 10_000,
        }
    }
}

impl LexerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum input size in bytes.
    pub fn max_input_size(mut self, max: usize) -> Self {
        self.max_input_size = max;
        self
    }

    /// Sets the maximum token count.
    pub fn max_token_count(mut self, max: usize) -> Self {
        self.max_token_count = max;
        self
    }

    /// Sets the maximum single-token length in characters.
    pub fn max_token_length(mut self, max: usize) -> Self {
        self.max_token_length = max;
        self
    }
}
