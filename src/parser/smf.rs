use super::data::{CellChecker, DataLineParser, SectionRecord};
use crate::error::ErrorOverflow;
use crate::model::constants::BAR;
use crate::model::{
    AbundanceKind, OptColumnMapping, Section, SmallMoleculeFeature, SmallMoleculeFeatureColumn,
    StableColumn,
};

/// Parser for `SMF` lines
pub type SmfLineParser<'a> = DataLineParser<'a, SmallMoleculeFeature>;

impl SectionRecord for SmallMoleculeFeature {
    const SECTION: Section = Section::SmallMoleculeFeature;

    fn set_stable(
        &mut self,
        column: StableColumn,
        cell: Option<&str>,
        checker: &mut CellChecker<'_>,
    ) -> Result<(), ErrorOverflow> {
        let StableColumn::SmallMoleculeFeature(column) = column else {
            return Ok(());
        };
        let header = column.name();
        match column {
            SmallMoleculeFeatureColumn::SmfId => self.smf_id = checker.check_string(header, cell)?,
            SmallMoleculeFeatureColumn::SmeIdRefs => {
                self.sme_id_refs = checker.check_string_list(header, cell, BAR)?
            }
            SmallMoleculeFeatureColumn::SmeIdRefAmbiguityCode => {
                self.sme_id_ref_ambiguity_code = checker.check_integer(header, cell)?
            }
            SmallMoleculeFeatureColumn::AdductIon => {
                self.adduct_ion = checker.check_string(header, cell)?
            }
            SmallMoleculeFeatureColumn::Isotopomer => {
                self.isotopomer = checker.check_parameter(header, cell, true)?
            }
            SmallMoleculeFeatureColumn::ExpMassToCharge => {
                self.exp_mass_to_charge = checker.check_double(header, cell)?
            }
            SmallMoleculeFeatureColumn::Charge => self.charge = checker.check_integer(header, cell)?,
            SmallMoleculeFeatureColumn::RetentionTime => {
                self.retention_time_in_seconds = checker.check_double(header, cell)?
            }
            SmallMoleculeFeatureColumn::RetentionTimeStart => {
                self.retention_time_in_seconds_start = checker.check_double(header, cell)?
            }
            SmallMoleculeFeatureColumn::RetentionTimeEnd => {
                self.retention_time_in_seconds_end = checker.check_double(header, cell)?
            }
        }
        Ok(())
    }

    fn push_abundance(&mut self, kind: AbundanceKind, value: Option<f64>) {
        if kind == AbundanceKind::Assay {
            self.abundance_assay.push(value);
        }
    }

    fn opt_mut(&mut self) -> &mut Vec<OptColumnMapping> {
        &mut self.opt
    }
}
