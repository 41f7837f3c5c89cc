use super::*;
use crate::error::{
    ErrorLevel, ErrorList, FormatErrorType, LogicalErrorType, MzTabErrorType, ParseError,
};

mod file;
mod header;

const METADATA: &[&str] = &[
    "MTD\tmzTab-version\t2.0.0-M",
    "MTD\tmzTab-ID\tMTBLS1",
    "MTD\tdescription\tA minimal study",
    "MTD\tms_run[1]-location\tfile:///data/run1.mzML",
    "MTD\tsample[1]\tSample one",
    "MTD\tassay[1]-sample_ref\tsample[1]",
    "MTD\tassay[1]-ms_run_ref\tms_run[1]",
    "MTD\tquantification_method\t[MS, MS:1001834, LC-MS label-free quantitation analysis, ]",
];

const SMH_STABLE: &str = "SML_ID\tSMF_ID_REFS\tdatabase_identifier\tchemical_formula\tsmiles\t\
inchi\tchemical_name\turi\ttheoretical_neutral_mass\tadduct_ions\treliability\t\
best_id_confidence_measure\tbest_id_confidence_value";

const SFH_STABLE: &str = "SMF_ID\tSME_ID_REFS\tSME_ID_REF_ambiguity_code\tadduct_ion\tisotopomer\t\
exp_mass_to_charge\tcharge\tretention_time_in_seconds\tretention_time_in_seconds_start\t\
retention_time_in_seconds_end";

const SEH_STABLE: &str = "SME_ID\tevidence_input_id\tdatabase_identifier\tchemical_formula\tsmiles\t\
inchi\tchemical_name\turi\tderivatized_form\tadduct_ion\texp_mass_to_charge\tcharge\t\
theoretical_mass_to_charge\tspectra_ref\tidentification_method\tms_level\trank";

const SMF_VALUES: &str = "1\tnull\tnull\t[M+H]1+\tnull\t180.06\t1\t300.5\t290.0\t310.0";

const SME_VALUES: &str = "1\t1\tHMDB:HMDB0000122\tC6H12O6\tnull\tnull\tGlucose\tnull\tnull\t\
[M+H]1+\t181.07\t1\t181.0707\tms_run[1]:index=5\t[MS, MS:1001477, SpectraST, ]\t\
[MS, MS:1000511, ms level, 1]\t1";

fn parse_metadata(lines: &[&str], errors: &mut ErrorList) -> Result<ParserContext, ParseError> {
    let mut context = ParserContext::new();
    let mut parser = MtdLineParser::new(&mut context, errors);
    for (i, line) in lines.iter().enumerate() {
        parser.parse(i + 1, line)?;
    }
    Ok(context)
}

fn metadata_context() -> ParserContext {
    parse_metadata(METADATA, &mut ErrorList::default()).unwrap()
}

fn error_type(error: &ParseError) -> MzTabErrorType {
    error.error().expect("unrecoverable error").error_type
}

fn warn_list() -> ErrorList {
    ErrorList::new(ErrorLevel::Warn, 100)
}
