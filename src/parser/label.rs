//! Define-label grammar of metadata lines.
//!
//! A define-label such as `assay[1]-ms_run_ref` is resolved once into a
//! [`MetadataLabel`]; the metadata line parser then matches on it
//! exhaustively.

use std::sync::LazyLock;

use regex::Regex;

static RE_DEFINE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(\[(\w+)\])?(-(\w+)(\[(\w+)\])?)?(-(\w+))?$")
        .expect("valid define label regex")
});

/// Why a define-label could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// Unknown element or property, or a shape the element does not take
    DefineLabel,
    /// Missing, non-numeric or zero id
    IdNumber(String),
}

trait Property: Sized + Copy + 'static {
    const NAMES: &'static [(&'static str, Self)];

    fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| *p)
    }

    /// Accumulating properties may carry a `[n]` sub-index
    fn accepts_sub_index(self) -> bool {
        false
    }
}

macro_rules! properties {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal, )+
        }
        $( sub_index: [$($sub:ident),*] )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl Property for $name {
            const NAMES: &'static [(&'static str, Self)] = &[ $( ($text, $name::$variant), )+ ];

            $(
                fn accepts_sub_index(self) -> bool {
                    matches!(self, $( $name::$sub )|*)
                }
            )?
        }
    };
}

properties! {
    /// Properties of `mzTab`
    MzTabProperty {
        /// `mzTab-version`
        Version = "version",
        /// `mzTab-ID`
        Id = "id",
    }
}

properties! {
    /// Properties of `instrument[n]`
    InstrumentProperty {
        /// `-name`
        Name = "name",
        /// `-source`
        Source = "source",
        /// `-analyzer[m]`
        Analyzer = "analyzer",
        /// `-detector`
        Detector = "detector",
    }
    sub_index: [Analyzer]
}

properties! {
    /// Properties of `software[n]`
    SoftwareProperty {
        /// `-setting[m]`
        Setting = "setting",
    }
    sub_index: [Setting]
}

properties! {
    /// Properties of `contact[n]`
    ContactProperty {
        /// `-name`
        Name = "name",
        /// `-affiliation`
        Affiliation = "affiliation",
        /// `-email`
        Email = "email",
    }
}

properties! {
    /// Properties of `small_molecule`
    SmallMoleculeProperty {
        /// `-quantification_unit`
        QuantificationUnit = "quantification_unit",
        /// `-identification_reliability`
        IdentificationReliability = "identification_reliability",
    }
}

properties! {
    /// Properties of `small_molecule_feature`
    SmallMoleculeFeatureProperty {
        /// `-quantification_unit`
        QuantificationUnit = "quantification_unit",
    }
}

properties! {
    /// Properties of `ms_run[n]`
    MsRunProperty {
        /// `-format`
        Format = "format",
        /// `-location`
        Location = "location",
        /// `-instrument_ref`
        InstrumentRef = "instrument_ref",
        /// `-id_format`
        IdFormat = "id_format",
        /// `-fragmentation_method[m]`
        FragmentationMethod = "fragmentation_method",
        /// `-hash`
        Hash = "hash",
        /// `-hash_method`
        HashMethod = "hash_method",
    }
    sub_index: [FragmentationMethod]
}

properties! {
    /// Properties of `sample[n]`
    SampleProperty {
        /// `-species[m]`
        Species = "species",
        /// `-tissue[m]`
        Tissue = "tissue",
        /// `-cell_type[m]`
        CellType = "cell_type",
        /// `-disease[m]`
        Disease = "disease",
        /// `-description`
        Description = "description",
        /// `-custom[m]`
        Custom = "custom",
    }
    sub_index: [Species, Tissue, CellType, Disease, Custom]
}

properties! {
    /// Properties of `assay[n]`
    AssayProperty {
        /// `-sample_ref`
        SampleRef = "sample_ref",
        /// `-ms_run_ref`
        MsRunRef = "ms_run_ref",
        /// `-custom[m]`
        Custom = "custom",
        /// `-external_uri`
        ExternalUri = "external_uri",
    }
    sub_index: [Custom]
}

properties! {
    /// Properties of `study_variable[n]`
    StudyVariableProperty {
        /// `-assay_refs`
        AssayRefs = "assay_refs",
        /// `-sample_refs`
        SampleRefs = "sample_refs",
        /// `-description`
        Description = "description",
        /// `-average_function`
        AverageFunction = "average_function",
        /// `-variation_function`
        VariationFunction = "variation_function",
    }
}

properties! {
    /// Properties of `cv[n]`
    CvProperty {
        /// `-label`
        Label = "label",
        /// `-full_name`
        FullName = "full_name",
        /// `-version`
        Version = "version",
        /// `-url`
        Url = "url",
    }
}

properties! {
    /// Properties of `database[n]`
    DatabaseProperty {
        /// `-prefix`
        Prefix = "prefix",
        /// `-version`
        Version = "version",
        /// `-url`
        Url = "url",
    }
}

/// A resolved define-label: the element, its id and property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataLabel {
    /// `mzTab-version`, `mzTab-ID`
    MzTab(MzTabProperty),
    /// `title`
    Title,
    /// `description`
    Description,
    /// `sample_processing[n]`
    SampleProcessing(u32),
    /// `instrument[n]-<property>`
    Instrument(u32, InstrumentProperty),
    /// `software[n]` or `software[n]-setting[m]`
    Software(u32, Option<SoftwareProperty>),
    /// `publication[n]`
    Publication(u32),
    /// `contact[n]-<property>`
    Contact(u32, ContactProperty),
    /// `uri[n]`
    Uri(u32),
    /// `external_study_uri[n]`
    ExternalStudyUri(u32),
    /// `quantification_method`
    QuantificationMethod,
    /// `small_molecule-<property>`
    SmallMolecule(SmallMoleculeProperty),
    /// `small_molecule_feature-<property>`
    SmallMoleculeFeature(SmallMoleculeFeatureProperty),
    /// `ms_run[n]` or `ms_run[n]-<property>`
    MsRun(u32, Option<MsRunProperty>),
    /// `custom[n]`
    Custom(u32),
    /// `sample[n]` or `sample[n]-<property>`
    Sample(u32, Option<SampleProperty>),
    /// `assay[n]` or `assay[n]-<property>`
    Assay(u32, Option<AssayProperty>),
    /// `study_variable[n]` or `study_variable[n]-<property>`
    StudyVariable(u32, Option<StudyVariableProperty>),
    /// `cv[n]` or `cv[n]-<property>`
    Cv(u32, Option<CvProperty>),
    /// `database[n]` or `database[n]-<property>`
    Database(u32, Option<DatabaseProperty>),
    /// `colunit-<table>`; the table name is checked by the handler
    ColUnit(String),
    /// `id_confidence_measure[n]`
    IdConfidenceMeasure(u32),
}

struct Parts<'a> {
    id: Option<&'a str>,
    property: Option<&'a str>,
    sub_id: Option<&'a str>,
}

impl<'a> Parts<'a> {
    fn index(&self) -> Result<u32, LabelError> {
        let text = self.id.unwrap_or_default();
        match text.parse::<u32>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(LabelError::IdNumber(text.to_string())),
        }
    }

    fn no_index(&self) -> Result<(), LabelError> {
        match self.id {
            Some(_) => Err(LabelError::DefineLabel),
            None => Ok(()),
        }
    }

    fn no_property(&self) -> Result<(), LabelError> {
        match self.property {
            Some(_) => Err(LabelError::DefineLabel),
            None => Ok(()),
        }
    }

    fn optional<P: Property>(&self) -> Result<Option<P>, LabelError> {
        let Some(name) = self.property else {
            return Ok(None);
        };
        let property = P::from_name(name).ok_or(LabelError::DefineLabel)?;
        if let Some(sub_id) = self.sub_id {
            if !property.accepts_sub_index() {
                return Err(LabelError::DefineLabel);
            }
            match sub_id.parse::<u32>() {
                Ok(n) if n > 0 => {}
                _ => return Err(LabelError::IdNumber(sub_id.to_string())),
            }
        }
        Ok(Some(property))
    }

    fn required<P: Property>(&self) -> Result<P, LabelError> {
        self.optional()?.ok_or(LabelError::DefineLabel)
    }

    fn indexed_only(&self) -> Result<u32, LabelError> {
        let id = self.index()?;
        self.no_property()?;
        Ok(id)
    }
}

impl MetadataLabel {
    /// Resolve a define-label; matching is case-insensitive
    pub fn parse(define_label: &str) -> Result<MetadataLabel, LabelError> {
        let label = define_label.trim().to_lowercase();
        let caps = RE_DEFINE_LABEL
            .captures(&label)
            .ok_or(LabelError::DefineLabel)?;
        if caps.get(9).is_some() {
            return Err(LabelError::DefineLabel);
        }
        let parts = Parts {
            id: caps.get(3).map(|m| m.as_str()),
            property: caps.get(5).map(|m| m.as_str()),
            sub_id: caps.get(7).map(|m| m.as_str()),
        };

        let resolved = match &caps[1] {
            "mztab" => {
                parts.no_index()?;
                MetadataLabel::MzTab(parts.required()?)
            }
            "title" => {
                parts.no_index()?;
                parts.no_property()?;
                MetadataLabel::Title
            }
            "description" => {
                parts.no_index()?;
                parts.no_property()?;
                MetadataLabel::Description
            }
            "sample_processing" => MetadataLabel::SampleProcessing(parts.indexed_only()?),
            "instrument" => MetadataLabel::Instrument(parts.index()?, parts.required()?),
            "software" => MetadataLabel::Software(parts.index()?, parts.optional()?),
            "publication" => MetadataLabel::Publication(parts.indexed_only()?),
            "contact" => MetadataLabel::Contact(parts.index()?, parts.required()?),
            "uri" => MetadataLabel::Uri(parts.indexed_only()?),
            "external_study_uri" => MetadataLabel::ExternalStudyUri(parts.indexed_only()?),
            "quantification_method" => {
                parts.no_index()?;
                parts.no_property()?;
                MetadataLabel::QuantificationMethod
            }
            "small_molecule" => {
                parts.no_index()?;
                MetadataLabel::SmallMolecule(parts.required()?)
            }
            "small_molecule_feature" => {
                parts.no_index()?;
                MetadataLabel::SmallMoleculeFeature(parts.required()?)
            }
            "ms_run" => MetadataLabel::MsRun(parts.index()?, parts.optional()?),
            "custom" => MetadataLabel::Custom(parts.indexed_only()?),
            "sample" => MetadataLabel::Sample(parts.index()?, parts.optional()?),
            "assay" => MetadataLabel::Assay(parts.index()?, parts.optional()?),
            "study_variable" => MetadataLabel::StudyVariable(parts.index()?, parts.optional()?),
            "cv" => MetadataLabel::Cv(parts.index()?, parts.optional()?),
            "database" => MetadataLabel::Database(parts.index()?, parts.optional()?),
            "colunit" => {
                parts.no_index()?;
                if parts.sub_id.is_some() {
                    return Err(LabelError::DefineLabel);
                }
                let target = parts.property.ok_or(LabelError::DefineLabel)?;
                MetadataLabel::ColUnit(target.to_string())
            }
            "id_confidence_measure" => MetadataLabel::IdConfidenceMeasure(parts.indexed_only()?),
            _ => return Err(LabelError::DefineLabel),
        };
        Ok(resolved)
    }
}
