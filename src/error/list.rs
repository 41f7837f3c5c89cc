use std::fmt;
use std::io::{self, Write};

use super::types::{ErrorLevel, MzTabError};

/// Default capacity of an [`ErrorList`]
pub const MAX_ERROR_COUNT: usize = 300;

/// Signal raised when the error list is full.
///
/// This means validation is incomplete, not that the recorded errors are
/// the only ones in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("System error queue overflow! More than {max_error_count} errors were reported.")]
pub struct ErrorOverflow {
    /// Capacity that was reached
    pub max_error_count: usize,
}

/// Bounded, severity-filtered collection of recoverable errors.
///
/// Only errors at or above the configured level are kept. Adding an
/// admissible error to a full list returns [`ErrorOverflow`].
#[derive(Debug, Clone)]
pub struct ErrorList {
    errors: Vec<MzTabError>,
    level: ErrorLevel,
    max_error_count: usize,
}

impl Default for ErrorList {
    fn default() -> Self {
        Self::new(ErrorLevel::Error, MAX_ERROR_COUNT)
    }
}

impl ErrorList {
    /// Create a list admitting errors at or above `level`
    pub fn new(level: ErrorLevel, max_error_count: usize) -> Self {
        Self {
            errors: Vec::new(),
            level,
            max_error_count,
        }
    }

    /// Add an error.
    ///
    /// Returns `Ok(false)` when the error is below the configured level
    /// and was dropped, `Ok(true)` when it was recorded.
    pub fn add(&mut self, error: MzTabError) -> Result<bool, ErrorOverflow> {
        if error.level() < self.level {
            return Ok(false);
        }
        if self.errors.len() >= self.max_error_count {
            return Err(ErrorOverflow {
                max_error_count: self.max_error_count,
            });
        }
        self.errors.push(error);
        Ok(true)
    }

    /// Minimum level of admitted errors
    pub fn level(&self) -> ErrorLevel {
        self.level
    }

    /// Change the minimum level; affects later adds only
    pub fn set_level(&mut self, level: ErrorLevel) {
        self.level = level;
    }

    /// Capacity of the list
    pub fn max_error_count(&self) -> usize {
        self.max_error_count
    }

    /// Change the capacity; affects later adds only
    pub fn set_max_error_count(&mut self, max_error_count: usize) {
        self.max_error_count = max_error_count;
    }

    /// Number of recorded errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error at `index`
    pub fn get(&self, index: usize) -> Option<&MzTabError> {
        self.errors.get(index)
    }

    /// Iterate over recorded errors in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, MzTabError> {
        self.errors.iter()
    }

    /// True when an error of at least `level` was recorded
    pub fn has_level(&self, level: ErrorLevel) -> bool {
        self.errors.iter().any(|e| e.level() >= level)
    }

    /// Remove all recorded errors
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Write one error per line
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for error in &self.errors {
            writeln!(out, "{}", error)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a MzTabError;
    type IntoIter = std::slice::Iter<'a, MzTabError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}
