//! Parser configuration.
//!
//! Only the error list is configurable: the minimum level of recorded
//! errors and the capacity that triggers an overflow. Literal tokens and
//! delimiters are fixed in [`crate::model::constants`].

use serde::{Deserialize, Serialize};

use crate::error::{ErrorLevel, ErrorList, MAX_ERROR_COUNT};

/// Settings of one parse session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Minimum level of recorded errors
    pub level: ErrorLevel,
    /// Capacity of the error list
    pub max_error_count: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            level: ErrorLevel::Error,
            max_error_count: MAX_ERROR_COUNT,
        }
    }
}

impl ParserConfig {
    /// Set the minimum level of recorded errors
    pub fn with_level(mut self, level: ErrorLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the error list capacity
    pub fn with_max_error_count(mut self, max_error_count: usize) -> Self {
        self.max_error_count = max_error_count;
        self
    }

    /// Empty error list for a new session
    pub fn error_list(&self) -> ErrorList {
        ErrorList::new(self.level, self.max_error_count)
    }
}
