use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};

use super::context::ParserContext;
use super::error::ReaderError;
use super::header::{HeaderLineParser, TableLayout};
use super::mtd::{refine_normal_metadata, MtdLineParser};
use super::sme::SmeLineParser;
use super::smf::SmfLineParser;
use super::sml::SmlLineParser;
use crate::config::ParserConfig;
use crate::error::{ErrorLevel, ErrorList, FormatErrorType, ParseError, ValidationReport};
use crate::model::{
    LineKind, Metadata, Section, SmallMoleculeEvidence, SmallMoleculeFeature,
    SmallMoleculeSummary,
};

/// Everything read from one document
#[derive(Debug, Clone)]
pub struct ParseReport {
    /// Metadata section, complete or as far as it was read
    pub metadata: Metadata,
    /// `SML` rows
    pub small_molecule_summaries: Vec<SmallMoleculeSummary>,
    /// `SMF` rows
    pub small_molecule_features: Vec<SmallMoleculeFeature>,
    /// `SME` rows
    pub small_molecule_evidence: Vec<SmallMoleculeEvidence>,
    /// Recorded recoverable errors
    pub errors: ErrorList,
    /// Cause that stopped parsing, if any
    pub abort: Option<ParseError>,
}

impl ParseReport {
    /// True when parsing completed without any Error-level entry
    pub fn is_valid(&self) -> bool {
        self.abort.is_none() && !self.errors.has_level(ErrorLevel::Error)
    }

    /// Human-readable report for `file_path`
    pub fn validation_report(&self, file_path: impl Into<String>) -> ValidationReport {
        ValidationReport::new(file_path, &self.errors, self.abort.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Metadata,
    Data,
    /// Metadata had errors; table lines are ignored
    Skipped,
}

struct Session {
    context: ParserContext,
    errors: ErrorList,
    stage: Stage,
    layouts: BTreeMap<Section, TableLayout>,
    summaries: Vec<SmallMoleculeSummary>,
    features: Vec<SmallMoleculeFeature>,
    evidence: Vec<SmallMoleculeEvidence>,
}

impl Session {
    fn new(config: &ParserConfig) -> Self {
        Self {
            context: ParserContext::new(),
            errors: config.error_list(),
            stage: Stage::Metadata,
            layouts: BTreeMap::new(),
            summaries: Vec::new(),
            features: Vec::new(),
            evidence: Vec::new(),
        }
    }

    fn process(&mut self, line_number: usize, items: &[&str]) -> Result<(), ParseError> {
        let prefix = items.first().copied().unwrap_or_default();
        let kind = LineKind::from_prefix(prefix).ok_or_else(|| {
            ParseError::unrecoverable(
                FormatErrorType::LinePrefix,
                line_number,
                [prefix, "unknown line prefix"],
            )
        })?;

        match kind {
            LineKind::Comment => Ok(()),
            LineKind::Metadata => {
                if self.stage != Stage::Metadata {
                    return Err(ParseError::unrecoverable(
                        FormatErrorType::LinePrefix,
                        line_number,
                        [prefix, "metadata after the first table"],
                    ));
                }
                MtdLineParser::new(&mut self.context, &mut self.errors).parse_items(line_number, items)
            }
            LineKind::Header(section) => {
                if self.stage == Stage::Metadata {
                    self.finish_metadata()?;
                }
                if self.stage == Stage::Skipped {
                    return Ok(());
                }
                if self.layouts.contains_key(&section) {
                    return Err(ParseError::unrecoverable(
                        FormatErrorType::LinePrefix,
                        line_number,
                        [prefix, "header declared twice"],
                    ));
                }
                let layout = HeaderLineParser::new(&self.context, &mut self.errors)
                    .parse_items(line_number, items)?;
                self.layouts.insert(section, layout);
                Ok(())
            }
            LineKind::Row(section) => {
                if self.stage == Stage::Metadata {
                    self.finish_metadata()?;
                }
                if self.stage == Stage::Skipped {
                    return Ok(());
                }
                let layout = self.layouts.get(&section).ok_or_else(|| {
                    ParseError::unrecoverable(
                        FormatErrorType::LinePrefix,
                        line_number,
                        [prefix, "data line before its header"],
                    )
                })?;
                let metadata = self.context.metadata();
                match section {
                    Section::SmallMolecule => self.summaries.push(
                        SmlLineParser::new(layout, metadata).parse_items(
                            line_number,
                            items,
                            &mut self.errors,
                        )?,
                    ),
                    Section::SmallMoleculeFeature => self.features.push(
                        SmfLineParser::new(layout, metadata).parse_items(
                            line_number,
                            items,
                            &mut self.errors,
                        )?,
                    ),
                    Section::SmallMoleculeEvidence => self.evidence.push(
                        SmeLineParser::new(layout, metadata).parse_items(
                            line_number,
                            items,
                            &mut self.errors,
                        )?,
                    ),
                }
                Ok(())
            }
        }
    }

    fn finish_metadata(&mut self) -> Result<(), ParseError> {
        refine_normal_metadata(self.context.metadata())?;
        let metadata = self.context.metadata();
        info!(
            "Metadata complete: {} ms runs, {} assays, {} study variables",
            metadata.ms_runs.len(),
            metadata.assays.len(),
            metadata.study_variables.len()
        );
        if self.errors.has_level(ErrorLevel::Error) {
            info!("Metadata section has errors, skipping table sections");
            self.stage = Stage::Skipped;
        } else {
            self.stage = Stage::Data;
        }
        Ok(())
    }

    fn into_report(self, abort: Option<ParseError>) -> ParseReport {
        ParseReport {
            metadata: self.context.into_metadata(),
            small_molecule_summaries: self.summaries,
            small_molecule_features: self.features,
            small_molecule_evidence: self.evidence,
            errors: self.errors,
            abort,
        }
    }
}

/// Reads and validates whole mzTab-M documents.
///
/// Lines are routed by prefix: `MTD` lines build the metadata, the first
/// table line triggers the metadata completeness check, and header and
/// data lines of the three tables are parsed against the finished
/// metadata. `COM` and blank lines are ignored. The first unrecoverable
/// error or an error list overflow stops the document and is returned in
/// [`ParseReport::abort`].
#[derive(Debug, Clone, Default)]
pub struct MzTabFileParser {
    config: ParserConfig,
}

impl MzTabFileParser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a document on disk
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParseReport, ReaderError> {
        let path = path.as_ref();
        info!("Parsing {}", path.display());
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse a document held in memory
    pub fn parse_str(&self, text: &str) -> Result<ParseReport, ReaderError> {
        self.parse_reader(text.as_bytes())
    }

    /// Parse a document from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<ParseReport, ReaderError> {
        let mut records = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut session = Session::new(&self.config);
        let mut record = csv::StringRecord::new();
        let mut abort = None;
        let mut line_count = 0;

        while records.read_record(&mut record)? {
            let line_number = record
                .position()
                .map_or(line_count + 1, |p| p.line() as usize);
            line_count = line_number;

            let items: Vec<&str> = record.iter().map(str::trim).collect();
            if items.iter().all(|item| item.is_empty()) {
                continue;
            }
            if let Err(e) = session.process(line_number, &items) {
                abort = Some(e);
                break;
            }
        }

        if abort.is_none() && session.stage == Stage::Metadata {
            abort = session.finish_metadata().err();
        }
        match &abort {
            Some(e) => info!("Parsing stopped: {}", e),
            None => debug!("Parsed {} lines", line_count),
        }
        Ok(session.into_report(abort))
    }
}
