use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::param::Parameter;

/// An entity addressed as `element[id]` in the metadata section
pub trait IndexedElement {
    /// Element name used in define-labels and references (e.g., "ms_run")
    const ELEMENT: &'static str;

    /// Create an empty entity with the given id
    fn with_id(id: u32) -> Self;

    /// The entity's id, unique within its kind
    fn id(&self) -> u32;

    /// Reference text of this entity, e.g. `assay[2]`
    fn reference(&self) -> String {
        format!("{}[{}]", Self::ELEMENT, self.id())
    }
}

macro_rules! indexed_element {
    ($ty:ty, $element:literal) => {
        impl IndexedElement for $ty {
            const ELEMENT: &'static str = $element;

            fn with_id(id: u32) -> Self {
                Self {
                    id,
                    ..Default::default()
                }
            }

            fn id(&self) -> u32 {
                self.id
            }
        }
    };
}

/// Sample processing step, a list of parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleProcessing {
    /// Entity id
    pub id: u32,
    /// Processing parameters in declaration order
    pub parameters: Vec<Parameter>,
}

/// Instrument description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Entity id
    pub id: u32,
    /// Instrument name
    pub name: Option<Parameter>,
    /// Ion source
    pub source: Option<Parameter>,
    /// Mass analyzers in declaration order
    pub analyzers: Vec<Parameter>,
    /// Detector
    pub detector: Option<Parameter>,
}

/// Software used to produce the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Software {
    /// Entity id
    pub id: u32,
    /// Software name and version
    pub parameter: Option<Parameter>,
    /// Free-text settings
    pub settings: Vec<String>,
}

/// Kind of a publication identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationType {
    /// PubMed identifier
    Pubmed,
    /// Digital object identifier
    Doi,
    /// Plain URI
    Uri,
}

impl PublicationType {
    /// Parse a publication type token (case-insensitive)
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "pubmed" => Some(Self::Pubmed),
            "doi" => Some(Self::Doi),
            "uri" => Some(Self::Uri),
            _ => None,
        }
    }

    /// Token as written in the document
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pubmed => "pubmed",
            Self::Doi => "doi",
            Self::Uri => "uri",
        }
    }
}

/// One `type:accession` item of a publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationItem {
    /// Identifier kind
    pub kind: PublicationType,
    /// Identifier text
    pub accession: String,
}

impl fmt::Display for PublicationItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.accession)
    }
}

/// Publication related to the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Entity id
    pub id: u32,
    /// Identifier items
    pub items: Vec<PublicationItem>,
}

/// Contact person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Entity id
    pub id: u32,
    /// Full name
    pub name: Option<String>,
    /// Affiliation
    pub affiliation: Option<String>,
    /// E-mail address
    pub email: Option<String>,
}

/// Declared location of a file-like resource.
///
/// `Unknown` means the property was declared with the null token: the
/// location is declared but not available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    /// Declared as `null`
    Unknown,
    /// A parsed URL
    Url(String),
}

impl Location {
    /// The URL, if known
    pub fn url(&self) -> Option<&str> {
        match self {
            Location::Unknown => None,
            Location::Url(url) => Some(url),
        }
    }
}

/// MS run (one raw data file)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MsRun {
    /// Entity id
    pub id: u32,
    /// Run name
    pub name: Option<String>,
    /// Location of the run's data file; `None` means never declared
    pub location: Option<Location>,
    /// Referenced instrument id
    pub instrument_ref: Option<u32>,
    /// File format
    pub format: Option<Parameter>,
    /// Native spectrum id format
    pub id_format: Option<Parameter>,
    /// Fragmentation methods
    pub fragmentation_methods: Vec<Parameter>,
    /// File hash
    pub hash: Option<String>,
    /// Hash algorithm
    pub hash_method: Option<Parameter>,
}

/// Biological sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Entity id
    pub id: u32,
    /// Sample name
    pub name: Option<String>,
    /// Species
    pub species: Vec<Parameter>,
    /// Tissue
    pub tissue: Vec<Parameter>,
    /// Cell types
    pub cell_type: Vec<Parameter>,
    /// Diseases
    pub disease: Vec<Parameter>,
    /// Free-text description
    pub description: Option<String>,
    /// Additional parameters
    pub custom: Vec<Parameter>,
}

/// Assay: one sample measured in one or more MS runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assay {
    /// Entity id
    pub id: u32,
    /// Assay name
    pub name: Option<String>,
    /// Referenced sample id
    pub sample_ref: Option<u32>,
    /// Referenced MS run ids
    pub ms_run_refs: Vec<u32>,
    /// Additional parameters
    pub custom: Vec<Parameter>,
    /// External URI
    pub external_uri: Option<String>,
}

/// Study variable grouping assays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyVariable {
    /// Entity id
    pub id: u32,
    /// Variable name
    pub name: Option<String>,
    /// Referenced assay ids
    pub assay_refs: Vec<u32>,
    /// Referenced sample ids
    pub sample_refs: Vec<u32>,
    /// Free-text description
    pub description: Option<String>,
    /// Function used to average abundances
    pub average_function: Option<Parameter>,
    /// Function used to compute abundance variation
    pub variation_function: Option<Parameter>,
}

/// Controlled vocabulary source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cv {
    /// Entity id
    pub id: u32,
    /// Label used in parameters (e.g., "MS")
    pub label: Option<String>,
    /// Full name
    pub full_name: Option<String>,
    /// Version
    pub version: Option<String>,
    /// URL of the vocabulary
    pub url: Option<String>,
}

/// Database used for identification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    /// Entity id
    pub id: u32,
    /// Database name
    pub parameter: Option<Parameter>,
    /// Prefix of identifiers from this database
    pub prefix: Option<String>,
    /// Database version
    pub version: Option<String>,
    /// Database location
    pub url: Option<Location>,
}

indexed_element!(SampleProcessing, "sample_processing");
indexed_element!(Instrument, "instrument");
indexed_element!(Software, "software");
indexed_element!(Publication, "publication");
indexed_element!(Contact, "contact");
indexed_element!(MsRun, "ms_run");
indexed_element!(Sample, "sample");
indexed_element!(Assay, "assay");
indexed_element!(StudyVariable, "study_variable");
indexed_element!(Cv, "cv");
indexed_element!(Database, "database");

/// Root aggregate of the metadata section.
///
/// Every collection is keyed by entity id and iterates in ascending id
/// order. Cross-references between entities are stored as ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// `mzTab-version`
    pub mztab_version: Option<String>,
    /// `mzTab-ID`
    pub mztab_id: Option<String>,
    /// `title`
    pub title: Option<String>,
    /// `description`
    pub description: Option<String>,
    /// `sample_processing[n]`
    pub sample_processing: BTreeMap<u32, SampleProcessing>,
    /// `instrument[n]`
    pub instruments: BTreeMap<u32, Instrument>,
    /// `software[n]`
    pub software: BTreeMap<u32, Software>,
    /// `publication[n]`
    pub publications: BTreeMap<u32, Publication>,
    /// `contact[n]`
    pub contacts: BTreeMap<u32, Contact>,
    /// `uri[n]`
    pub uris: BTreeMap<u32, String>,
    /// `external_study_uri[n]`
    pub external_study_uris: BTreeMap<u32, String>,
    /// `quantification_method`
    pub quantification_method: Option<Parameter>,
    /// `small_molecule-quantification_unit`
    pub small_molecule_quantification_unit: Option<Parameter>,
    /// `small_molecule_feature-quantification_unit`
    pub small_molecule_feature_quantification_unit: Option<Parameter>,
    /// `small_molecule-identification_reliability`
    pub small_molecule_identification_reliability: Option<Parameter>,
    /// `ms_run[n]`
    pub ms_runs: BTreeMap<u32, MsRun>,
    /// `custom[n]`
    pub custom: BTreeMap<u32, Parameter>,
    /// `sample[n]`
    pub samples: BTreeMap<u32, Sample>,
    /// `assay[n]`
    pub assays: BTreeMap<u32, Assay>,
    /// `study_variable[n]`
    pub study_variables: BTreeMap<u32, StudyVariable>,
    /// `cv[n]`
    pub cvs: BTreeMap<u32, Cv>,
    /// `database[n]`
    pub databases: BTreeMap<u32, Database>,
    /// `id_confidence_measure[n]`
    pub id_confidence_measures: BTreeMap<u32, Parameter>,
}

impl Metadata {
    /// Create an empty metadata section
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
