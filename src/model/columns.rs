//! Column definitions for the three data tables.
//!
//! Each table has a fixed, ordered set of stable columns. Abundance,
//! confidence-measure and optional (`opt_`) columns are declared per
//! document by the header line and referenced metadata entities.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::{DECOY_ACCESSION, OPT_CV, OPT_GLOBAL, OPT_PREFIX};
use super::param::Parameter;
use super::section::Section;

/// Value type of a column, used to coerce cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Free text
    String,
    /// Signed integer
    Integer,
    /// Double with `NaN`/`INF` tokens
    Double,
    /// `0`/`1` flag
    Boolean,
    /// CV parameter
    Parameter,
    /// `|`-separated strings
    StringList,
    /// `|`-separated doubles
    DoubleList,
    /// `|`-separated `ms_run[n]:reference` items
    SpectraRefList,
    /// URI
    Uri,
}

macro_rules! stable_columns {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($header:literal, $ty:ident), )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All columns in canonical order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Header text of the column
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $header, )+
                }
            }

            /// Declared value type
            pub fn column_type(self) -> ColumnType {
                match self {
                    $( $name::$variant => ColumnType::$ty, )+
                }
            }
        }
    };
}

stable_columns! {
    /// Stable columns of the Small Molecule Summary table
    SmallMoleculeColumn {
        /// `SML_ID`
        SmlId => ("SML_ID", String),
        /// `SMF_ID_REFS`
        SmfIdRefs => ("SMF_ID_REFS", StringList),
        /// `database_identifier`
        DatabaseIdentifier => ("database_identifier", StringList),
        /// `chemical_formula`
        ChemicalFormula => ("chemical_formula", StringList),
        /// `smiles`
        Smiles => ("smiles", StringList),
        /// `inchi`
        Inchi => ("inchi", StringList),
        /// `chemical_name`
        ChemicalName => ("chemical_name", StringList),
        /// `uri`
        Uri => ("uri", StringList),
        /// `theoretical_neutral_mass`
        TheoreticalNeutralMass => ("theoretical_neutral_mass", DoubleList),
        /// `adduct_ions`
        AdductIons => ("adduct_ions", StringList),
        /// `reliability`
        Reliability => ("reliability", String),
        /// `best_id_confidence_measure`
        BestIdConfidenceMeasure => ("best_id_confidence_measure", Parameter),
        /// `best_id_confidence_value`
        BestIdConfidenceValue => ("best_id_confidence_value", Double),
    }
}

stable_columns! {
    /// Stable columns of the Small Molecule Feature table
    SmallMoleculeFeatureColumn {
        /// `SMF_ID`
        SmfId => ("SMF_ID", String),
        /// `SME_ID_REFS`
        SmeIdRefs => ("SME_ID_REFS", StringList),
        /// `SME_ID_REF_ambiguity_code`
        SmeIdRefAmbiguityCode => ("SME_ID_REF_ambiguity_code", Integer),
        /// `adduct_ion`
        AdductIon => ("adduct_ion", String),
        /// `isotopomer`
        Isotopomer => ("isotopomer", Parameter),
        /// `exp_mass_to_charge`
        ExpMassToCharge => ("exp_mass_to_charge", Double),
        /// `charge`
        Charge => ("charge", Integer),
        /// `retention_time_in_seconds`
        RetentionTime => ("retention_time_in_seconds", Double),
        /// `retention_time_in_seconds_start`
        RetentionTimeStart => ("retention_time_in_seconds_start", Double),
        /// `retention_time_in_seconds_end`
        RetentionTimeEnd => ("retention_time_in_seconds_end", Double),
    }
}

stable_columns! {
    /// Stable columns of the Small Molecule Evidence table
    SmallMoleculeEvidenceColumn {
        /// `SME_ID`
        SmeId => ("SME_ID", String),
        /// `evidence_input_id`
        EvidenceInputId => ("evidence_input_id", String),
        /// `database_identifier`
        DatabaseIdentifier => ("database_identifier", String),
        /// `chemical_formula`
        ChemicalFormula => ("chemical_formula", String),
        /// `smiles`
        Smiles => ("smiles", String),
        /// `inchi`
        Inchi => ("inchi", String),
        /// `chemical_name`
        ChemicalName => ("chemical_name", String),
        /// `uri`
        Uri => ("uri", Uri),
        /// `derivatized_form`
        DerivatizedForm => ("derivatized_form", Parameter),
        /// `adduct_ion`
        AdductIon => ("adduct_ion", String),
        /// `exp_mass_to_charge`
        ExpMassToCharge => ("exp_mass_to_charge", Double),
        /// `charge`
        Charge => ("charge", Integer),
        /// `theoretical_mass_to_charge`
        TheoreticalMassToCharge => ("theoretical_mass_to_charge", Double),
        /// `spectra_ref`
        SpectraRef => ("spectra_ref", SpectraRefList),
        /// `identification_method`
        IdentificationMethod => ("identification_method", Parameter),
        /// `ms_level`
        MsLevel => ("ms_level", Parameter),
        /// `rank`
        Rank => ("rank", Integer),
    }
}

/// A stable column of any table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StableColumn {
    /// Small Molecule Summary column
    SmallMolecule(SmallMoleculeColumn),
    /// Small Molecule Feature column
    SmallMoleculeFeature(SmallMoleculeFeatureColumn),
    /// Small Molecule Evidence column
    SmallMoleculeEvidence(SmallMoleculeEvidenceColumn),
}

impl StableColumn {
    /// Stable columns of a table in canonical order
    pub fn for_section(section: Section) -> Vec<StableColumn> {
        match section {
            Section::SmallMolecule => SmallMoleculeColumn::ALL
                .iter()
                .map(|c| StableColumn::SmallMolecule(*c))
                .collect(),
            Section::SmallMoleculeFeature => SmallMoleculeFeatureColumn::ALL
                .iter()
                .map(|c| StableColumn::SmallMoleculeFeature(*c))
                .collect(),
            Section::SmallMoleculeEvidence => SmallMoleculeEvidenceColumn::ALL
                .iter()
                .map(|c| StableColumn::SmallMoleculeEvidence(*c))
                .collect(),
        }
    }

    /// Find a stable column of a table by header text
    pub fn find(section: Section, header: &str) -> Option<StableColumn> {
        Self::for_section(section)
            .into_iter()
            .find(|c| c.name() == header)
    }

    /// Header text
    pub fn name(self) -> &'static str {
        match self {
            StableColumn::SmallMolecule(c) => c.name(),
            StableColumn::SmallMoleculeFeature(c) => c.name(),
            StableColumn::SmallMoleculeEvidence(c) => c.name(),
        }
    }

    /// Declared value type
    pub fn column_type(self) -> ColumnType {
        match self {
            StableColumn::SmallMolecule(c) => c.column_type(),
            StableColumn::SmallMoleculeFeature(c) => c.column_type(),
            StableColumn::SmallMoleculeEvidence(c) => c.column_type(),
        }
    }
}

/// Kinds of abundance columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbundanceKind {
    /// `abundance_assay[n]`
    Assay,
    /// `abundance_study_variable[n]`
    StudyVariable,
    /// `abundance_variation_study_variable[n]`
    VariationStudyVariable,
}

impl AbundanceKind {
    /// All kinds in canonical order
    pub const ALL: [AbundanceKind; 3] = [
        AbundanceKind::Assay,
        AbundanceKind::StudyVariable,
        AbundanceKind::VariationStudyVariable,
    ];

    /// Header text before the `[n]` index
    pub fn header_prefix(self) -> &'static str {
        match self {
            AbundanceKind::Assay => "abundance_assay",
            AbundanceKind::StudyVariable => "abundance_study_variable",
            AbundanceKind::VariationStudyVariable => "abundance_variation_study_variable",
        }
    }

    /// Metadata element the index refers to
    pub fn element(self) -> &'static str {
        match self {
            AbundanceKind::Assay => "assay",
            AbundanceKind::StudyVariable | AbundanceKind::VariationStudyVariable => {
                "study_variable"
            }
        }
    }

    /// Abundance kinds allowed in a table
    pub fn for_section(section: Section) -> &'static [AbundanceKind] {
        match section {
            Section::SmallMolecule => &Self::ALL,
            Section::SmallMoleculeFeature => &[AbundanceKind::Assay],
            Section::SmallMoleculeEvidence => &[],
        }
    }
}

/// Scope of an optional column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptScope {
    /// `opt_global_...`
    Global,
    /// `opt_assay[n]_...`
    Assay(u32),
    /// `opt_study_variable[n]_...`
    StudyVariable(u32),
    /// `opt_ms_run[n]_...`
    MsRun(u32),
}

impl fmt::Display for OptScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptScope::Global => f.write_str(OPT_GLOBAL),
            OptScope::Assay(id) => write!(f, "assay[{}]", id),
            OptScope::StudyVariable(id) => write!(f, "study_variable[{}]", id),
            OptScope::MsRun(id) => write!(f, "ms_run[{}]", id),
        }
    }
}

/// An `opt_<scope>_<name>` column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionalColumn {
    /// Scope of the column
    pub scope: OptScope,
    /// Name after the scope, e.g. `cv_MS:1002217_decoy_peptide`
    pub name: String,
}

impl OptionalColumn {
    /// Create an optional column with a free-text name
    pub fn new(scope: OptScope, name: impl Into<String>) -> Self {
        Self {
            scope,
            name: name.into(),
        }
    }

    /// Create a column defined by a CV parameter.
    ///
    /// Spaces in the parameter name are replaced with underscores.
    pub fn from_parameter(scope: OptScope, parameter: &Parameter) -> Self {
        let name = format!(
            "{}{}_{}",
            OPT_CV,
            parameter.cv_accession,
            parameter.name.trim().replace(' ', "_")
        );
        Self { scope, name }
    }

    /// Accession of the defining CV parameter, if any
    pub fn cv_accession(&self) -> Option<&str> {
        let rest = self.name.strip_prefix(OPT_CV)?;
        rest.split('_').next().filter(|a| !a.is_empty())
    }

    /// Value type implied by the column name
    pub fn default_type(&self) -> ColumnType {
        match self.cv_accession() {
            Some(DECOY_ACCESSION) => ColumnType::Boolean,
            _ => ColumnType::String,
        }
    }

    /// Identifier of row items: the header without `opt_`
    pub fn identifier(&self) -> String {
        format!("{}_{}", self.scope, self.name)
    }

    /// Full header text
    pub fn header(&self) -> String {
        format!("{}{}", OPT_PREFIX, self.identifier())
    }
}

/// What a header column refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// A fixed column of the table
    Stable(StableColumn),
    /// An abundance column bound to an assay or study variable
    Abundance {
        /// Abundance kind
        kind: AbundanceKind,
        /// Referenced entity id
        id: u32,
    },
    /// `id_confidence_measure[n]`
    IdConfidenceMeasure {
        /// Referenced confidence measure id
        id: u32,
    },
    /// An `opt_` column
    Optional(OptionalColumn),
}

/// A column declared by a header line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MzTabColumn {
    /// Header text
    pub header: String,
    /// Column role
    pub kind: ColumnKind,
    /// Value type used for coercion
    pub column_type: ColumnType,
    /// Unit declared through `colunit-` metadata
    pub unit: Option<Parameter>,
}

impl MzTabColumn {
    /// Column for a stable header
    pub fn stable(column: StableColumn) -> Self {
        Self {
            header: column.name().to_string(),
            kind: ColumnKind::Stable(column),
            column_type: column.column_type(),
            unit: None,
        }
    }

    /// Column for `<kind>[id]`
    pub fn abundance(kind: AbundanceKind, id: u32) -> Self {
        Self {
            header: format!("{}[{}]", kind.header_prefix(), id),
            kind: ColumnKind::Abundance { kind, id },
            column_type: ColumnType::Double,
            unit: None,
        }
    }

    /// Column for `id_confidence_measure[id]`
    pub fn id_confidence_measure(id: u32) -> Self {
        Self {
            header: format!("id_confidence_measure[{}]", id),
            kind: ColumnKind::IdConfidenceMeasure { id },
            column_type: ColumnType::Double,
            unit: None,
        }
    }

    /// Column for an `opt_` header with an explicit type
    pub fn optional(column: OptionalColumn, column_type: ColumnType) -> Self {
        Self {
            header: column.header(),
            kind: ColumnKind::Optional(column),
            column_type,
            unit: None,
        }
    }
}
