use super::data::{CellChecker, DataLineParser, SectionRecord};
use crate::error::ErrorOverflow;
use crate::model::{
    OptColumnMapping, Section, SmallMoleculeEvidence, SmallMoleculeEvidenceColumn, StableColumn,
};

/// Parser for `SME` lines
pub type SmeLineParser<'a> = DataLineParser<'a, SmallMoleculeEvidence>;

impl SectionRecord for SmallMoleculeEvidence {
    const SECTION: Section = Section::SmallMoleculeEvidence;

    fn set_stable(
        &mut self,
        column: StableColumn,
        cell: Option<&str>,
        checker: &mut CellChecker<'_>,
    ) -> Result<(), ErrorOverflow> {
        use SmallMoleculeEvidenceColumn as Col;

        let StableColumn::SmallMoleculeEvidence(column) = column else {
            return Ok(());
        };
        let header = column.name();
        match column {
            Col::SmeId => self.sme_id = checker.check_string(header, cell)?,
            Col::EvidenceInputId => self.evidence_input_id = checker.check_string(header, cell)?,
            Col::DatabaseIdentifier => {
                self.database_identifier = checker.check_string(header, cell)?
            }
            Col::ChemicalFormula => self.chemical_formula = checker.check_string(header, cell)?,
            Col::Smiles => self.smiles = checker.check_string(header, cell)?,
            Col::Inchi => self.inchi = checker.check_string(header, cell)?,
            Col::ChemicalName => self.chemical_name = checker.check_string(header, cell)?,
            Col::Uri => self.uri = checker.check_uri(header, cell)?,
            Col::DerivatizedForm => {
                self.derivatized_form = checker.check_parameter(header, cell, true)?
            }
            Col::AdductIon => self.adduct_ion = checker.check_string(header, cell)?,
            Col::ExpMassToCharge => self.exp_mass_to_charge = checker.check_double(header, cell)?,
            Col::Charge => self.charge = checker.check_integer(header, cell)?,
            Col::TheoreticalMassToCharge => {
                self.theoretical_mass_to_charge = checker.check_double(header, cell)?
            }
            Col::SpectraRef => self.spectra_ref = checker.check_spectra_ref(header, cell)?,
            Col::IdentificationMethod => {
                self.identification_method = checker.check_parameter(header, cell, false)?
            }
            Col::MsLevel => self.ms_level = checker.check_parameter(header, cell, false)?,
            Col::Rank => self.rank = checker.check_integer(header, cell)?,
        }
        Ok(())
    }

    fn push_id_confidence_measure(&mut self, value: Option<f64>) {
        self.id_confidence_measure.push(value);
    }

    fn opt_mut(&mut self) -> &mut Vec<OptColumnMapping> {
        &mut self.opt
    }
}
