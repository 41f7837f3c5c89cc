use super::data::{CellChecker, DataLineParser, SectionRecord};
use crate::error::ErrorOverflow;
use crate::model::constants::BAR;
use crate::model::{
    AbundanceKind, OptColumnMapping, Section, SmallMoleculeColumn, SmallMoleculeSummary,
    StableColumn,
};

/// Parser for `SML` lines
pub type SmlLineParser<'a> = DataLineParser<'a, SmallMoleculeSummary>;

impl SectionRecord for SmallMoleculeSummary {
    const SECTION: Section = Section::SmallMolecule;

    fn set_stable(
        &mut self,
        column: StableColumn,
        cell: Option<&str>,
        checker: &mut CellChecker<'_>,
    ) -> Result<(), ErrorOverflow> {
        let StableColumn::SmallMolecule(column) = column else {
            return Ok(());
        };
        let header = column.name();
        match column {
            SmallMoleculeColumn::SmlId => self.sml_id = checker.check_string(header, cell)?,
            SmallMoleculeColumn::SmfIdRefs => {
                self.smf_id_refs = checker.check_string_list(header, cell, BAR)?
            }
            SmallMoleculeColumn::DatabaseIdentifier => {
                self.database_identifier = checker.check_string_list(header, cell, BAR)?
            }
            SmallMoleculeColumn::ChemicalFormula => {
                self.chemical_formula = checker.check_string_list(header, cell, BAR)?
            }
            SmallMoleculeColumn::Smiles => {
                self.smiles = checker.check_string_list(header, cell, BAR)?
            }
            SmallMoleculeColumn::Inchi => self.inchi = checker.check_string_list(header, cell, BAR)?,
            SmallMoleculeColumn::ChemicalName => {
                self.chemical_name = checker.check_string_list(header, cell, BAR)?
            }
            SmallMoleculeColumn::Uri => self.uri = checker.check_string_list(header, cell, BAR)?,
            SmallMoleculeColumn::TheoreticalNeutralMass => {
                self.theoretical_neutral_mass = checker.check_double_list(header, cell)?
            }
            SmallMoleculeColumn::AdductIons => {
                self.adduct_ions = checker.check_string_list(header, cell, BAR)?
            }
            SmallMoleculeColumn::Reliability => {
                self.reliability = checker.check_string(header, cell)?
            }
            SmallMoleculeColumn::BestIdConfidenceMeasure => {
                self.best_id_confidence_measure = checker.check_parameter(header, cell, true)?
            }
            SmallMoleculeColumn::BestIdConfidenceValue => {
                self.best_id_confidence_value = checker.check_double(header, cell)?
            }
        }
        Ok(())
    }

    fn push_abundance(&mut self, kind: AbundanceKind, value: Option<f64>) {
        match kind {
            AbundanceKind::Assay => self.abundance_assay.push(value),
            AbundanceKind::StudyVariable => self.abundance_study_variable.push(value),
            AbundanceKind::VariationStudyVariable => {
                self.abundance_variation_study_variable.push(value)
            }
        }
    }

    fn opt_mut(&mut self) -> &mut Vec<OptColumnMapping> {
        &mut self.opt
    }
}
