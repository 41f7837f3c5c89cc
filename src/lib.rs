//! # mzTab-M - Reader and Validator for Small-Molecule Reports
//!
//! `mztab_m` reads mzTab-M 2.0 documents, the tab-separated reporting format
//! for metabolomics and other small-molecule mass spectrometry results, into a
//! typed model and validates them while reading.
//!
//! ## Key Features
//!
//! - **Typed Metadata**: every `MTD` define-label is parsed into an indexed
//!   entity (`ms_run[n]`, `assay[n]`, `study_variable[n]`, ...) with
//!   cross-references checked against earlier declarations.
//!
//! - **Layout-Aware Tables**: header lines build a column layout with a
//!   logical column order, so data lines are read correctly whatever order
//!   their columns appear in.
//!
//! - **Tiered Errors**: recoverable problems are collected with a level and a
//!   numeric code; structural problems stop the document. The error list has
//!   a configurable level filter and capacity.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mztab_m::config::ParserConfig;
//! use mztab_m::error::ErrorLevel;
//! use mztab_m::parser::MzTabFileParser;
//!
//! let config = ParserConfig::default().with_level(ErrorLevel::Warn);
//! let report = MzTabFileParser::with_config(config).parse_file("study.mztab")?;
//!
//! println!("{}", report.validation_report("study.mztab"));
//! for row in &report.small_molecule_summaries {
//!     println!("{:?} {:?}", row.sml_id, row.chemical_name);
//! }
//! # Ok::<(), mztab_m::parser::ReaderError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`model`]: metadata entities, column definitions and typed rows
//! - [`codec`]: parsing of cell-level values (parameters, lists, URIs, ...)
//! - [`error`]: error catalogue, error list and validation reports
//! - [`parser`]: line parsers and the whole-document driver
//! - [`config`]: parser settings
//!
//! ## Document Structure
//!
//! | Prefix | Line |
//! |--------|------|
//! | `MTD` | Metadata: `MTD <define-label> <value>` |
//! | `COM` | Comment, ignored |
//! | `SMH` / `SML` | Small Molecule Summary header / row |
//! | `SFH` / `SMF` | Small Molecule Feature header / row |
//! | `SEH` / `SME` | Small Molecule Evidence header / row |
//!
//! The metadata section comes first. Its completeness is checked once the
//! first table line is reached; when it holds errors the tables are not
//! read.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::codec::MzBoolean;
    pub use crate::config::ParserConfig;
    pub use crate::error::{
        ErrorLevel, ErrorList, ErrorOverflow, FormatErrorType, LogicalErrorType, MzTabError,
        MzTabErrorType, ParseError, ValidationReport,
    };
    pub use crate::model::{
        Assay, Metadata, MsRun, OptColumnMapping, Parameter, Sample, Section,
        SmallMoleculeEvidence, SmallMoleculeFeature, SmallMoleculeSummary, SpectraRef,
        StudyVariable,
    };
    pub use crate::parser::{
        HeaderLineParser, MtdLineParser, MzTabFileParser, ParseReport, ParserContext,
        ReaderError, SmeLineParser, SmfLineParser, SmlLineParser,
    };
}
