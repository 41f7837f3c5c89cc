use std::collections::{BTreeMap, BTreeSet};

use crate::model::{
    Assay, Contact, Cv, Database, IndexedElement, Instrument, Metadata, MsRun, Parameter,
    Publication, Sample, SampleProcessing, Section, Software, StudyVariable,
};

/// Failures of context operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// Entity ids start at 1
    #[error("{element} id must be greater than zero")]
    InvalidId {
        /// Element name
        element: &'static str,
    },

    /// A reference names an entity that was not declared before
    #[error("{element}[{id}] is not declared")]
    Undeclared {
        /// Element name of the missing entity
        element: &'static str,
        /// Missing id
        id: u32,
    },
}

fn entry<T: IndexedElement>(map: &mut BTreeMap<u32, T>, id: u32) -> Result<&mut T, ContextError> {
    if id == 0 {
        return Err(ContextError::InvalidId {
            element: T::ELEMENT,
        });
    }
    Ok(map.entry(id).or_insert_with(|| T::with_id(id)))
}

fn require<T: IndexedElement>(map: &BTreeMap<u32, T>, ids: &[u32]) -> Result<(), ContextError> {
    match ids.iter().find(|id| !map.contains_key(id)) {
        Some(&id) => Err(ContextError::Undeclared {
            element: T::ELEMENT,
            id,
        }),
        None => Ok(()),
    }
}

fn push_distinct(refs: &mut Vec<u32>, ids: &[u32]) {
    for id in ids {
        if !refs.contains(id) {
            refs.push(*id);
        }
    }
}

/// Registry of every metadata entity seen so far in one document.
///
/// The context owns the [`Metadata`] under construction. Entities are
/// created the first time their id appears and updated in place by later
/// lines, so references resolve against the same storage the finished
/// metadata exposes.
#[derive(Debug, Clone, Default)]
pub struct ParserContext {
    metadata: Metadata,
    col_units: BTreeMap<String, Vec<String>>,
    singletons: BTreeSet<String>,
}

impl ParserContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata built so far
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Mutable access for document-level singleton fields
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Mark a document singleton as declared; false if it already was.
    ///
    /// A singleton counts as declared even when its value was `null` or
    /// malformed.
    pub fn declare_singleton(&mut self, define_label: &str) -> bool {
        self.singletons.insert(define_label.to_ascii_lowercase())
    }

    /// Finish the session and take the metadata
    pub fn into_metadata(self) -> Metadata {
        self.metadata
    }

    /// Get or create `sample_processing[id]`
    pub fn add_sample_processing(&mut self, id: u32) -> Result<&mut SampleProcessing, ContextError> {
        entry(&mut self.metadata.sample_processing, id)
    }

    /// Get or create `instrument[id]`
    pub fn add_instrument(&mut self, id: u32) -> Result<&mut Instrument, ContextError> {
        entry(&mut self.metadata.instruments, id)
    }

    /// Get or create `software[id]`
    pub fn add_software(&mut self, id: u32) -> Result<&mut Software, ContextError> {
        entry(&mut self.metadata.software, id)
    }

    /// Get or create `publication[id]`
    pub fn add_publication(&mut self, id: u32) -> Result<&mut Publication, ContextError> {
        entry(&mut self.metadata.publications, id)
    }

    /// Get or create `contact[id]`
    pub fn add_contact(&mut self, id: u32) -> Result<&mut Contact, ContextError> {
        entry(&mut self.metadata.contacts, id)
    }

    /// Get or create `ms_run[id]`
    pub fn add_ms_run(&mut self, id: u32) -> Result<&mut MsRun, ContextError> {
        entry(&mut self.metadata.ms_runs, id)
    }

    /// Get or create `sample[id]`
    pub fn add_sample(&mut self, id: u32) -> Result<&mut Sample, ContextError> {
        entry(&mut self.metadata.samples, id)
    }

    /// Get or create `assay[id]`
    pub fn add_assay(&mut self, id: u32) -> Result<&mut Assay, ContextError> {
        entry(&mut self.metadata.assays, id)
    }

    /// Get or create `study_variable[id]`
    pub fn add_study_variable(&mut self, id: u32) -> Result<&mut StudyVariable, ContextError> {
        entry(&mut self.metadata.study_variables, id)
    }

    /// Get or create `cv[id]`
    pub fn add_cv(&mut self, id: u32) -> Result<&mut Cv, ContextError> {
        entry(&mut self.metadata.cvs, id)
    }

    /// Get or create `database[id]`
    pub fn add_database(&mut self, id: u32) -> Result<&mut Database, ContextError> {
        entry(&mut self.metadata.databases, id)
    }

    /// Set `custom[id]`
    pub fn add_custom(&mut self, id: u32, parameter: Parameter) -> Result<(), ContextError> {
        insert_indexed(&mut self.metadata.custom, "custom", id, parameter)
    }

    /// Set `id_confidence_measure[id]`
    pub fn add_id_confidence_measure(
        &mut self,
        id: u32,
        parameter: Parameter,
    ) -> Result<(), ContextError> {
        insert_indexed(
            &mut self.metadata.id_confidence_measures,
            "id_confidence_measure",
            id,
            parameter,
        )
    }

    /// Set `uri[id]`
    pub fn add_uri(&mut self, id: u32, uri: String) -> Result<(), ContextError> {
        insert_indexed(&mut self.metadata.uris, "uri", id, uri)
    }

    /// Set `external_study_uri[id]`
    pub fn add_external_study_uri(&mut self, id: u32, uri: String) -> Result<(), ContextError> {
        insert_indexed(
            &mut self.metadata.external_study_uris,
            "external_study_uri",
            id,
            uri,
        )
    }

    /// Point `ms_run[ms_run]` at an already declared instrument
    pub fn add_ms_run_instrument_ref(
        &mut self,
        ms_run: u32,
        instrument: u32,
    ) -> Result<&MsRun, ContextError> {
        require(&self.metadata.instruments, &[instrument])?;
        let run = entry(&mut self.metadata.ms_runs, ms_run)?;
        run.instrument_ref = Some(instrument);
        Ok(run)
    }

    /// Point `assay[assay]` at an already declared sample
    pub fn add_assay_sample_ref(&mut self, assay: u32, sample: u32) -> Result<&Assay, ContextError> {
        require(&self.metadata.samples, &[sample])?;
        let entity = entry(&mut self.metadata.assays, assay)?;
        entity.sample_ref = Some(sample);
        Ok(entity)
    }

    /// Add MS run references to `assay[assay]`.
    ///
    /// Either every id is declared and all are added, or nothing changes.
    pub fn add_assay_ms_run_refs(&mut self, assay: u32, ms_runs: &[u32]) -> Result<&Assay, ContextError> {
        require(&self.metadata.ms_runs, ms_runs)?;
        let entity = entry(&mut self.metadata.assays, assay)?;
        push_distinct(&mut entity.ms_run_refs, ms_runs);
        Ok(entity)
    }

    /// Add assay references to `study_variable[study_variable]`, all or nothing
    pub fn add_study_variable_assay_refs(
        &mut self,
        study_variable: u32,
        assays: &[u32],
    ) -> Result<&StudyVariable, ContextError> {
        require(&self.metadata.assays, assays)?;
        let entity = entry(&mut self.metadata.study_variables, study_variable)?;
        push_distinct(&mut entity.assay_refs, assays);
        Ok(entity)
    }

    /// Add sample references to `study_variable[study_variable]`, all or nothing
    pub fn add_study_variable_sample_refs(
        &mut self,
        study_variable: u32,
        samples: &[u32],
    ) -> Result<&StudyVariable, ContextError> {
        require(&self.metadata.samples, samples)?;
        let entity = entry(&mut self.metadata.study_variables, study_variable)?;
        push_distinct(&mut entity.sample_refs, samples);
        Ok(entity)
    }

    /// Keep a raw `colunit-` declaration until its table header is read
    pub fn add_col_unit(&mut self, define_label: impl Into<String>, value: impl Into<String>) {
        self.col_units
            .entry(define_label.into())
            .or_default()
            .push(value.into());
    }

    /// Raw column-unit declarations for a table, in declaration order
    pub fn col_units(&self, section: Section) -> &[String] {
        self.col_units
            .get(&section.colunit_label())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All raw column-unit declarations keyed by define-label
    pub fn col_unit_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.col_units
    }
}

fn insert_indexed<T>(
    map: &mut BTreeMap<u32, T>,
    element: &'static str,
    id: u32,
    value: T,
) -> Result<(), ContextError> {
    if id == 0 {
        return Err(ContextError::InvalidId { element });
    }
    if map.insert(id, value).is_some() {
        log::warn!("{}[{}] was redefined, keeping the last value", element, id);
    }
    Ok(())
}
