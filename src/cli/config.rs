//! TOML configuration file support.
//!
//! Error reporting settings can be kept in a file instead of flags:
//!
//! ```toml
//! # mztab.toml
//! [errors]
//! level = "warn"
//! max_error_count = 500
//! ```
//!
//! Command-line flags take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mztab_m::config::ParserConfig;
use mztab_m::error::ErrorLevel;

/// Root configuration structure for mztab.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Error list settings.
    #[serde(default)]
    pub errors: ErrorsConfig,
}

/// Settings of the error list.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorsConfig {
    /// Minimum level of reported errors.
    pub level: Option<ErrorLevel>,

    /// Capacity of the error list.
    pub max_error_count: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Parser settings with flag overrides applied on top of the file.
    pub fn parser_config(
        &self,
        level: Option<ErrorLevel>,
        max_error_count: Option<usize>,
    ) -> ParserConfig {
        let mut config = ParserConfig::default();
        if let Some(level) = level.or(self.errors.level) {
            config = config.with_level(level);
        }
        if let Some(max) = max_error_count.or(self.errors.max_error_count) {
            config = config.with_max_error_count(max);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [errors]
            level = "warn"
            max_error_count = 500
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.errors.level, Some(ErrorLevel::Warn));
        assert_eq!(config.errors.max_error_count, Some(500));
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config::from_str("[errors]\nlevel = \"info\"\nmax_error_count = 10\n").unwrap();
        let parser = config.parser_config(Some(ErrorLevel::Error), None);
        assert_eq!(parser.level, ErrorLevel::Error);
        assert_eq!(parser.max_error_count, 10);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.errors.level, None);
        assert_eq!(config.parser_config(None, None), ParserConfig::default());
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(Config::from_str("[errors]\nlevel = \"fatal\"\n").is_err());
    }
}
