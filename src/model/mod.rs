//! # mzTab-M Data Model
//!
//! Typed representation of an mzTab-M document: the metadata section with
//! its indexed entities, column definitions of the three data tables and
//! the typed rows produced by the data line parsers.
//!
//! ## Entity References
//!
//! Entities refer to each other by id (`assay[1]-sample_ref` stores `1`).
//! The [`Metadata`] maps are the only storage of each entity, so a lookup
//! by id always sees the latest state.

pub mod constants;

mod columns;
mod metadata;
mod param;
mod records;
mod section;


pub use columns::{
    AbundanceKind, ColumnKind, ColumnType, MzTabColumn, OptScope, OptionalColumn,
    SmallMoleculeColumn, SmallMoleculeEvidenceColumn, SmallMoleculeFeatureColumn, StableColumn,
};
pub use metadata::{
    Assay, Contact, Cv, Database, IndexedElement, Instrument, Location, Metadata, MsRun,
    Publication, PublicationItem, PublicationType, Sample, SampleProcessing, Software,
    StudyVariable,
};
pub use param::Parameter;
pub use records::{
    OptColumnMapping, SmallMoleculeEvidence, SmallMoleculeFeature, SmallMoleculeSummary,
    SpectraRef,
};
pub use section::{LineKind, Section};
