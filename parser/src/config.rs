use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_LINE_LEN: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Longest accepted request line in bytes. `None` accepts any length.
    pub max_line_len: Option<usize>,
}

impl ParserConfig {
    #[inline]
    pub fn unbounded() -> ParserConfig {
        return ParserConfig { max_line_len: None };
    }

    #[inline]
    pub fn with_max_line_len(mut self, max: usize) -> ParserConfig {
        self.max_line_len = Some(max);
        return self;
    }
}

impl Default for ParserConfig {
    #[inline]
    fn default() -> Self {
        return ParserConfig {
            max_line_len: Some(DEFAULT_MAX_LINE_LEN),
        };
    }
}
