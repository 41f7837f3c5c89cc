//! # mzTab-M Parsers
//!
//! Line parsers for every part of an mzTab-M document, and
//! [`MzTabFileParser`], which drives them over a whole document.
//!
//! ## Flow
//!
//! 1. [`MtdLineParser`] turns `MTD` lines into entities held by a
//!    [`ParserContext`]. References between entities must point at ids
//!    declared on earlier lines.
//! 2. [`refine_normal_metadata`] checks document-wide completeness once
//!    the metadata section has ended.
//! 3. [`HeaderLineParser`] reads a table header into a [`TableLayout`]:
//!    a [`ColumnFactory`] with the logical column order and a
//!    [`PositionMapping`] from file positions to logical ones.
//! 4. [`DataLineParser`] type-checks each data line against its layout and
//!    fills a [`SectionRecord`] row.
//!
//! Recoverable problems are collected in an
//! [`ErrorList`](crate::error::ErrorList); every parser returns
//! [`ParseError`](crate::error::ParseError) for problems that stop the
//! document.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mztab_m::parser::MzTabFileParser;
//!
//! let report = MzTabFileParser::new().parse_file("study.mztab")?;
//! for error in &report.errors {
//!     println!("{}", error);
//! }
//! println!("valid: {}", report.is_valid());
//! # Ok::<(), mztab_m::parser::ReaderError>(())
//! ```

mod context;
mod data;
mod error;
mod factory;
mod file;
mod header;
mod label;
mod mtd;
mod position;
mod sme;
mod smf;
mod sml;

#[cfg(test)]
mod tests;

pub use context::{ContextError, ParserContext};
pub use data::{CellChecker, DataLineParser, SectionRecord};
pub use error::ReaderError;
pub use factory::ColumnFactory;
pub use file::{MzTabFileParser, ParseReport};
pub use header::{parse_optional, HeaderLineParser, TableLayout};
pub use label::{
    AssayProperty, ContactProperty, CvProperty, DatabaseProperty, InstrumentProperty,
    LabelError, MetadataLabel, MsRunProperty, MzTabProperty, SampleProperty,
    SmallMoleculeFeatureProperty, SmallMoleculeProperty, SoftwareProperty,
    StudyVariableProperty,
};
pub use mtd::{refine_normal_metadata, MtdLineParser};
pub use position::PositionMapping;
pub use sme::SmeLineParser;
pub use smf::SmfLineParser;
pub use sml::SmlLineParser;
