use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::list::ErrorList;
use super::types::{ErrorLevel, MzTabError};
use super::{ParseError, ABORT_MESSAGE};

/// Human-readable outcome of validating one document
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Path of the file that was validated
    pub file_path: String,
    /// Recorded recoverable errors
    pub errors: Vec<MzTabError>,
    /// Cause that stopped parsing, if any
    pub abort: Option<ParseError>,
}

impl ValidationReport {
    /// Create a report from a session's errors
    pub fn new(file_path: impl Into<String>, errors: &ErrorList, abort: Option<&ParseError>) -> Self {
        Self {
            file_path: file_path.into(),
            errors: errors.iter().cloned().collect(),
            abort: abort.cloned(),
        }
    }

    /// Check if the document is invalid or could not be fully validated
    pub fn has_failures(&self) -> bool {
        self.abort.is_some() || self.count(ErrorLevel::Error) > 0
    }

    /// Check if any warnings were recorded
    pub fn has_warnings(&self) -> bool {
        self.count(ErrorLevel::Warn) > 0
    }

    /// Count recorded errors of exactly `level`
    pub fn count(&self, level: ErrorLevel) -> usize {
        self.errors.iter().filter(|e| e.level() == level).count()
    }

    fn verdict(&self) -> &'static str {
        match &self.abort {
            Some(ParseError::Overflow(_)) => "Validation INCOMPLETE",
            Some(ParseError::Unrecoverable(_)) => "Validation FAILED",
            None if self.has_failures() => "Validation FAILED",
            None if self.has_warnings() => "Validation PASSED with warnings",
            None => "Validation PASSED",
        }
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static INFO: Emoji<'_, '_> = Emoji("ℹ", "[INFO]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();

            output.push_str(&format!("{}\n", style("mzTab-M Validation Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("=========================").cyan()));
            output.push_str(&format!("{}: {}\n\n", style("File").bold(), self.file_path));

            for error in &self.errors {
                let line = error.to_string();
                match error.level() {
                    ErrorLevel::Info => output.push_str(&format!("[{}] {}\n", INFO, line)),
                    ErrorLevel::Warn => {
                        output.push_str(&format!("[{}] {}\n", WARN, style(line).yellow()))
                    }
                    ErrorLevel::Error => {
                        output.push_str(&format!("[{}] {}\n", FAIL, style(line).red()))
                    }
                }
            }

            if let Some(abort) = &self.abort {
                output.push('\n');
                output.push_str(&format!("{}: {}\n", style("STOPPED").red().bold(), abort));
                if !abort.is_overflow() {
                    output.push_str(&format!("{}\n", ABORT_MESSAGE));
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} errors, {} warnings, {} info\n",
                style("Summary").bold(),
                style(self.count(ErrorLevel::Error)).red(),
                style(self.count(ErrorLevel::Warn)).yellow(),
                self.count(ErrorLevel::Info)
            ));

            output.push('\n');
            let verdict = self.verdict();
            if self.has_failures() {
                output.push_str(&format!("{}\n", style(verdict).red().bold()));
            } else if self.has_warnings() {
                output.push_str(&format!("{}\n", style(verdict).yellow().bold()));
            } else {
                output.push_str(&format!("{}\n", style(verdict).green().bold()));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mzTab-M Validation Report")?;
        writeln!(f, "=========================")?;
        writeln!(f, "File: {}", self.file_path)?;
        writeln!(f)?;

        for error in &self.errors {
            let symbol = match error.level() {
                ErrorLevel::Info => "ℹ",
                ErrorLevel::Warn => "⚠",
                ErrorLevel::Error => "✗",
            };
            writeln!(f, "[{}] {}", symbol, error)?;
        }

        if let Some(abort) = &self.abort {
            writeln!(f)?;
            writeln!(f, "STOPPED: {}", abort)?;
            if !abort.is_overflow() {
                writeln!(f, "{}", ABORT_MESSAGE)?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} errors, {} warnings, {} info",
            self.count(ErrorLevel::Error),
            self.count(ErrorLevel::Warn),
            self.count(ErrorLevel::Info)
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.verdict())
    }
}
