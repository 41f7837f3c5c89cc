//! # Error Model
//!
//! Problems found while reading a document fall into two groups:
//!
//! - **Recoverable** problems become [`MzTabError`] values collected in the
//!   session's [`ErrorList`]; parsing continues.
//! - **Unrecoverable** problems abort the document and are returned as
//!   [`ParseError::Unrecoverable`].
//!
//! A full error list raises [`ErrorOverflow`], surfaced as
//! [`ParseError::Overflow`]: too many problems to enumerate, so validation
//! is incomplete.

mod list;
mod report;
mod types;

#[cfg(test)]
mod tests;

pub use list::{ErrorList, ErrorOverflow, MAX_ERROR_COUNT};
pub use report::ValidationReport;
pub use types::{
    CrossCheckErrorType, ErrorCategory, ErrorLevel, FormatErrorType, LogicalErrorType,
    MzTabError, MzTabErrorType,
};

/// Summary printed when an unrecoverable error stops validation
pub const ABORT_MESSAGE: &str = "There exist errors in the metadata section or \
small_molecule/small_molecule_feature/small_molecule_evidence header section! \
Validation will stop, and ignore data table check!";

/// Reasons a document cannot be read to the end
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// A problem that makes the rest of the document untrustworthy
    #[error("{0}")]
    Unrecoverable(MzTabError),

    /// The error list reached its capacity
    #[error(transparent)]
    Overflow(#[from] ErrorOverflow),
}

impl ParseError {
    /// Build an unrecoverable error
    pub fn unrecoverable<I, S>(
        error_type: impl Into<MzTabErrorType>,
        line_number: usize,
        context: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParseError::Unrecoverable(MzTabError::new(error_type, line_number, context))
    }

    /// The triggering error, unless this is an overflow
    pub fn error(&self) -> Option<&MzTabError> {
        match self {
            ParseError::Unrecoverable(error) => Some(error),
            ParseError::Overflow(_) => None,
        }
    }

    /// True for the overflow signal
    pub fn is_overflow(&self) -> bool {
        matches!(self, ParseError::Overflow(_))
    }
}
