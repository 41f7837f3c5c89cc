use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use mztab_m::model::Metadata;
use mztab_m::parser::{MzTabFileParser, ParseReport};

#[derive(Serialize)]
struct Summary<'a> {
    file: String,
    valid: bool,
    errors: usize,
    small_molecule_summaries: usize,
    small_molecule_features: usize,
    small_molecule_evidence: usize,
    metadata: &'a Metadata,
}

impl<'a> Summary<'a> {
    fn new(file: &Path, report: &'a ParseReport) -> Self {
        Self {
            file: file.display().to_string(),
            valid: report.is_valid(),
            errors: report.errors.len(),
            small_molecule_summaries: report.small_molecule_summaries.len(),
            small_molecule_features: report.small_molecule_features.len(),
            small_molecule_evidence: report.small_molecule_evidence.len(),
            metadata: &report.metadata,
        }
    }
}

/// Display a summary of an mzTab-M document
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let report = MzTabFileParser::new()
        .parse_file(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let summary = Summary::new(&file, &report);

    if json {
        let text = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", text);
        return Ok(());
    }

    let metadata = summary.metadata;
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "<not set>".to_string());

    println!("mzTab-M File Information");
    println!("========================");
    println!("File: {}", summary.file);
    println!();

    println!("Metadata:");
    println!("  mzTab-version: {}", show(&metadata.mztab_version));
    println!("  mzTab-ID: {}", show(&metadata.mztab_id));
    println!("  Title: {}", show(&metadata.title));
    if let Some(method) = &metadata.quantification_method {
        println!("  Quantification method: {}", method);
    }
    println!("  MS runs: {}", metadata.ms_runs.len());
    println!("  Samples: {}", metadata.samples.len());
    println!("  Assays: {}", metadata.assays.len());
    println!("  Study variables: {}", metadata.study_variables.len());
    println!("  Databases: {}", metadata.databases.len());
    println!();

    println!("Tables:");
    println!("  SML rows: {}", summary.small_molecule_summaries);
    println!("  SMF rows: {}", summary.small_molecule_features);
    println!("  SME rows: {}", summary.small_molecule_evidence);
    println!();

    println!("Errors recorded: {}", summary.errors);
    if let Some(abort) = &report.abort {
        println!("Parsing stopped: {}", abort);
    }
    println!("Valid: {}", if summary.valid { "yes" } else { "no" });

    Ok(())
}
