use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mztab_m::error::ErrorLevel;
use mztab_m::parser::MzTabFileParser;

use super::config::Config;

/// Validate an mzTab-M document
pub fn run(
    file: PathBuf,
    level: Option<ErrorLevel>,
    max_errors: Option<usize>,
    config: Option<PathBuf>,
) -> Result<()> {
    let file_config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    let parser_config = file_config.parser_config(level, max_errors);

    info!("mzTab-M Validator");
    info!("File: {}", file.display());
    info!(
        "Reporting {} and above, at most {} errors",
        parser_config.level, parser_config.max_error_count
    );

    let report = MzTabFileParser::with_config(parser_config)
        .parse_file(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?
        .validation_report(file.display().to_string());

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
