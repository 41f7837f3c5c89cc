use serde::{Deserialize, Serialize};
use std::fmt;

use super::param::Parameter;

/// Value of an optional column in one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptColumnMapping {
    /// Column header without the `opt_` prefix
    pub identifier: String,
    /// Coerced value rendered with the format's tokens; `None` for null
    pub value: Option<String>,
}

/// Reference to a spectrum inside an MS run: `ms_run[n]:reference`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectraRef {
    /// Referenced MS run id
    pub ms_run: u32,
    /// Native spectrum reference inside that run
    pub reference: String,
}

impl fmt::Display for SpectraRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ms_run[{}]:{}", self.ms_run, self.reference)
    }
}

/// One `SML` row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmallMoleculeSummary {
    /// `SML_ID`
    pub sml_id: Option<String>,
    /// `SMF_ID_REFS`
    pub smf_id_refs: Vec<String>,
    /// `database_identifier`
    pub database_identifier: Vec<String>,
    /// `chemical_formula`
    pub chemical_formula: Vec<String>,
    /// `smiles`
    pub smiles: Vec<String>,
    /// `inchi`
    pub inchi: Vec<String>,
    /// `chemical_name`
    pub chemical_name: Vec<String>,
    /// `uri`
    pub uri: Vec<String>,
    /// `theoretical_neutral_mass`
    pub theoretical_neutral_mass: Vec<f64>,
    /// `adduct_ions`
    pub adduct_ions: Vec<String>,
    /// `reliability`
    pub reliability: Option<String>,
    /// `best_id_confidence_measure`
    pub best_id_confidence_measure: Option<Parameter>,
    /// `best_id_confidence_value`
    pub best_id_confidence_value: Option<f64>,
    /// `abundance_assay[n]` in logical column order
    pub abundance_assay: Vec<Option<f64>>,
    /// `abundance_study_variable[n]` in logical column order
    pub abundance_study_variable: Vec<Option<f64>>,
    /// `abundance_variation_study_variable[n]` in logical column order
    pub abundance_variation_study_variable: Vec<Option<f64>>,
    /// Optional columns
    pub opt: Vec<OptColumnMapping>,
}

/// One `SMF` row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmallMoleculeFeature {
    /// `SMF_ID`
    pub smf_id: Option<String>,
    /// `SME_ID_REFS`
    pub sme_id_refs: Vec<String>,
    /// `SME_ID_REF_ambiguity_code`
    pub sme_id_ref_ambiguity_code: Option<i32>,
    /// `adduct_ion`
    pub adduct_ion: Option<String>,
    /// `isotopomer`
    pub isotopomer: Option<Parameter>,
    /// `exp_mass_to_charge`
    pub exp_mass_to_charge: Option<f64>,
    /// `charge`
    pub charge: Option<i32>,
    /// `retention_time_in_seconds`
    pub retention_time_in_seconds: Option<f64>,
    /// `retention_time_in_seconds_start`
    pub retention_time_in_seconds_start: Option<f64>,
    /// `retention_time_in_seconds_end`
    pub retention_time_in_seconds_end: Option<f64>,
    /// `abundance_assay[n]` in logical column order
    pub abundance_assay: Vec<Option<f64>>,
    /// Optional columns
    pub opt: Vec<OptColumnMapping>,
}

/// One `SME` row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmallMoleculeEvidence {
    /// `SME_ID`
    pub sme_id: Option<String>,
    /// `evidence_input_id`
    pub evidence_input_id: Option<String>,
    /// `database_identifier`
    pub database_identifier: Option<String>,
    /// `chemical_formula`
    pub chemical_formula: Option<String>,
    /// `smiles`
    pub smiles: Option<String>,
    /// `inchi`
    pub inchi: Option<String>,
    /// `chemical_name`
    pub chemical_name: Option<String>,
    /// `uri`
    pub uri: Option<String>,
    /// `derivatized_form`
    pub derivatized_form: Option<Parameter>,
    /// `adduct_ion`
    pub adduct_ion: Option<String>,
    /// `exp_mass_to_charge`
    pub exp_mass_to_charge: Option<f64>,
    /// `charge`
    pub charge: Option<i32>,
    /// `theoretical_mass_to_charge`
    pub theoretical_mass_to_charge: Option<f64>,
    /// `spectra_ref`
    pub spectra_ref: Vec<SpectraRef>,
    /// `identification_method`
    pub identification_method: Option<Parameter>,
    /// `ms_level`
    pub ms_level: Option<Parameter>,
    /// `id_confidence_measure[n]` in logical column order
    pub id_confidence_measure: Vec<Option<f64>>,
    /// `rank`
    pub rank: Option<i32>,
    /// Optional columns
    pub opt: Vec<OptColumnMapping>,
}
