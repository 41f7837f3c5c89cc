//! Integration tests for mzTab-M
//!
//! These tests read whole documents from disk and check the typed result
//! together with the validation outcome.

use mztab_m::config::ParserConfig;
use mztab_m::error::{ErrorLevel, FormatErrorType, LogicalErrorType, MzTabErrorType};
use mztab_m::model::{Location, PublicationType};
use mztab_m::parser::{MzTabFileParser, ReaderError};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const METADATA: &str = "\
COM\tGlucose quantification in two runs
MTD\tmzTab-version\t2.0.0-M
MTD\tmzTab-ID\tMTBLS263
MTD\ttitle\tGlucose in plasma
MTD\tdescription\tLabel-free quantification of glucose in two plasma runs
MTD\tpublication[1]\tpubmed:29039908|doi:10.1021/acs.analchem.7b02849
MTD\tcontact[1]-name\tJane Doe
MTD\tcontact[1]-email\tjane.doe@example.org
MTD\tinstrument[1]-name\t[MS, MS:1000483, Thermo Fisher Scientific instrument model, ]
MTD\tsoftware[1]\t[MS, MS:1002879, Progenesis QI, 3.0]
MTD\tsoftware[1]-setting[1]\tFragment tolerance = 0.1 Da
MTD\tquantification_method\t[MS, MS:1001834, LC-MS label-free quantitation analysis, ]
MTD\tsample[1]\tPlasma pool
MTD\tsample[1]-species[1]\t[NCBITaxon, NCBITaxon:9606, Homo sapiens (Human), ]
MTD\tms_run[1]-location\tfile:///data/run1.mzML
MTD\tms_run[1]-instrument_ref\tinstrument[1]
MTD\tms_run[1]-format\t[MS, MS:1000584, mzML format, ]
MTD\tms_run[1]-id_format\t[MS, MS:1000774, multiple peak list nativeID format, ]
MTD\tms_run[2]-location\tfile:///data/run2.mzML
MTD\tassay[1]\tRun 1
MTD\tassay[1]-sample_ref\tsample[1]
MTD\tassay[1]-ms_run_ref\tms_run[1]
MTD\tassay[2]\tRun 2
MTD\tassay[2]-sample_ref\tsample[1]
MTD\tassay[2]-ms_run_ref\tms_run[2]
MTD\tstudy_variable[1]\tPlasma
MTD\tstudy_variable[1]-assay_refs\tassay[1],assay[2]
MTD\tstudy_variable[1]-description\tPooled plasma
MTD\tstudy_variable[1]-average_function\t[MS, MS:1002883, mean, ]
MTD\tcv[1]-label\tMS
MTD\tcv[1]-full_name\tPSI-MS controlled vocabulary
MTD\tcv[1]-version\t4.1.11
MTD\tcv[1]-url\thttps://example.org/psi-ms.obo
MTD\tdatabase[1]\t[MIRIAM, MIR:00100079, HMDB, ]
MTD\tdatabase[1]-prefix\thmdb
MTD\tdatabase[1]-version\t3.6
MTD\tdatabase[1]-url\thttp://www.hmdb.ca/
MTD\tsmall_molecule-quantification_unit\t[PRIDE, PRIDE:0000330, Arbitrary quantification unit, ]
MTD\tsmall_molecule_feature-quantification_unit\t[PRIDE, PRIDE:0000330, Arbitrary quantification unit, ]
MTD\tid_confidence_measure[1]\t[MS, MS:1002890, fragmentation score, ]
MTD\tcolunit-small_molecule\tbest_id_confidence_value=[UO, UO:0000187, percent, ]
";

const TABLES: &str = "\

SMH\tSML_ID\tSMF_ID_REFS\tdatabase_identifier\tchemical_formula\tsmiles\tinchi\tchemical_name\turi\ttheoretical_neutral_mass\tadduct_ions\treliability\tbest_id_confidence_measure\tbest_id_confidence_value\tabundance_study_variable[1]\tabundance_variation_study_variable[1]\tabundance_assay[1]\tabundance_assay[2]\topt_global_cv_MS:1002217_decoy_peptide
SML\t1\t1|2\tHMDB:HMDB0000122\tC6H12O6\tnull\tnull\tGlucose\tnull\t180.0634\t[M+H]1+|[M+Na]1+\t2\t[MS, MS:1002890, fragmentation score, ]\t0.92\t1500.5\tNaN\t1000.0\t2001.0\t0

SFH\tSMF_ID\tSME_ID_REFS\tSME_ID_REF_ambiguity_code\tadduct_ion\tisotopomer\texp_mass_to_charge\tcharge\tretention_time_in_seconds\tretention_time_in_seconds_start\tretention_time_in_seconds_end\tabundance_assay[1]\tabundance_assay[2]
SMF\t1\t1\tnull\t[M+H]1+\tnull\t181.0707\t1\t300.5\t290.0\t310.0\t1000.0\t2001.0
SMF\t2\tnull\tnull\t[M+Na]1+\tnull\t203.0526\t1\t301.0\tnull\tnull\tnull\t50.0

SEH\tSME_ID\tevidence_input_id\tdatabase_identifier\tchemical_formula\tsmiles\tinchi\tchemical_name\turi\tderivatized_form\tadduct_ion\texp_mass_to_charge\tcharge\ttheoretical_mass_to_charge\tspectra_ref\tidentification_method\tms_level\tid_confidence_measure[1]\trank
SME\t1\tfeature_1\tHMDB:HMDB0000122\tC6H12O6\tnull\tnull\tGlucose\tnull\tnull\t[M+H]1+\t181.07\t1\t181.0707\tms_run[1]:index=5|ms_run[2]:index=7\t[MS, MS:1001477, SpectraST, ]\t[MS, MS:1000511, ms level, 2]\t0.92\t1
";

fn write_document(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// Test reading a complete document from disk
#[test]
fn test_read_complete_document() {
    let dir = tempdir().unwrap();
    let path = write_document(dir.path(), "study.mztab", &format!("{}{}", METADATA, TABLES));

    let report = MzTabFileParser::new().parse_file(&path).unwrap();
    assert!(report.abort.is_none(), "{:?}", report.abort);
    assert!(report.errors.is_empty(), "{}", report.errors);
    assert!(report.is_valid());

    let metadata = &report.metadata;
    assert_eq!(metadata.title.as_deref(), Some("Glucose in plasma"));
    assert_eq!(metadata.publications[&1].items.len(), 2);
    assert_eq!(metadata.publications[&1].items[1].kind, PublicationType::Doi);
    assert_eq!(metadata.contacts[&1].email.as_deref(), Some("jane.doe@example.org"));
    assert_eq!(metadata.software[&1].settings, vec!["Fragment tolerance = 0.1 Da"]);
    assert_eq!(metadata.ms_runs[&1].instrument_ref, Some(1));
    assert_eq!(
        metadata.ms_runs[&2].location,
        Some(Location::Url("file:///data/run2.mzML".to_string()))
    );
    assert_eq!(metadata.assays[&2].ms_run_refs, vec![2]);
    assert_eq!(metadata.study_variables[&1].assay_refs, vec![1, 2]);
    assert_eq!(metadata.samples[&1].species.len(), 1);
    assert_eq!(metadata.cvs[&1].version.as_deref(), Some("4.1.11"));
    assert_eq!(metadata.databases[&1].prefix.as_deref(), Some("hmdb"));
    assert_eq!(metadata.id_confidence_measures.len(), 1);

    assert_eq!(report.small_molecule_summaries.len(), 1);
    let sml = &report.small_molecule_summaries[0];
    assert_eq!(sml.smf_id_refs, vec!["1", "2"]);
    assert_eq!(sml.adduct_ions, vec!["[M+H]1+", "[M+Na]1+"]);
    assert_eq!(sml.best_id_confidence_value, Some(0.92));
    assert_eq!(sml.abundance_assay, vec![Some(1000.0), Some(2001.0)]);
    assert_eq!(sml.abundance_study_variable, vec![Some(1500.5)]);
    assert!(sml.abundance_variation_study_variable[0].unwrap().is_nan());
    assert_eq!(sml.opt.len(), 1);
    assert_eq!(sml.opt[0].value.as_deref(), Some("0"));

    assert_eq!(report.small_molecule_features.len(), 2);
    let smf = &report.small_molecule_features[1];
    assert_eq!(smf.adduct_ion.as_deref(), Some("[M+Na]1+"));
    assert_eq!(smf.retention_time_in_seconds_start, None);
    assert_eq!(smf.abundance_assay, vec![None, Some(50.0)]);

    assert_eq!(report.small_molecule_evidence.len(), 1);
    let sme = &report.small_molecule_evidence[0];
    assert_eq!(sme.evidence_input_id.as_deref(), Some("feature_1"));
    let runs: Vec<u32> = sme.spectra_ref.iter().map(|r| r.ms_run).collect();
    assert_eq!(runs, vec![1, 2]);
    assert_eq!(sme.id_confidence_measure, vec![Some(0.92)]);
    assert_eq!(sme.rank, Some(1));
}

/// Test that the metadata section on its own passes the completeness check
#[test]
fn test_metadata_section_is_complete() {
    let report = MzTabFileParser::new().parse_str(METADATA).unwrap();
    assert!(report.abort.is_none(), "{:?}", report.abort);
    assert!(report.errors.is_empty(), "{}", report.errors);
    assert_eq!(report.metadata.study_variables[&1].assay_refs, vec![1, 2]);
}

/// Test that metadata errors are reported and the tables are not read
#[test]
fn test_invalid_metadata_skips_tables() {
    let dir = tempdir().unwrap();
    let broken = METADATA.replace("http://www.hmdb.ca/", "not a url");
    let broken = broken.replace("jane.doe@example.org", "jane.doe");
    let path = write_document(dir.path(), "broken.mztab", &format!("{}{}", broken, TABLES));

    let report = MzTabFileParser::new().parse_file(&path).unwrap();
    let types: Vec<_> = report.errors.iter().map(|e| e.error_type).collect();
    assert_eq!(
        types,
        vec![
            MzTabErrorType::Format(FormatErrorType::Email),
            MzTabErrorType::Format(FormatErrorType::Url),
        ]
    );
    assert_eq!(report.errors.get(0).unwrap().line_number, 8);
    assert!(report.small_molecule_summaries.is_empty());
    assert!(!report.is_valid());

    let summary = report.validation_report(path.display().to_string());
    assert!(summary.has_failures());
    assert_eq!(summary.count(ErrorLevel::Error), 2);
}

/// Test that an undeclared abundance column stops the document
#[test]
fn test_undeclared_assay_column_aborts() {
    let dir = tempdir().unwrap();
    let tables = TABLES.replace("abundance_assay[2]", "abundance_assay[3]");
    let path = write_document(dir.path(), "undeclared.mztab", &format!("{}{}", METADATA, tables));

    let report = MzTabFileParser::new().parse_file(&path).unwrap();
    let abort = report.abort.as_ref().unwrap();
    let error = abort.error().unwrap();
    assert_eq!(
        error.error_type,
        MzTabErrorType::Logical(LogicalErrorType::NotDefineInMetadata)
    );
    assert_eq!(error.context, vec!["assay[3]"]);
    assert!(report.small_molecule_summaries.is_empty());

    let summary = report.validation_report("undeclared.mztab");
    assert!(summary.has_failures());
    assert!(summary.to_string().contains("assay[3]"));
}

/// Test that warnings only appear at the warn level
#[test]
fn test_warning_levels() {
    let dir = tempdir().unwrap();
    let text = format!(
        "{}{}",
        METADATA.replace("file:///data/run2.mzML", "null"),
        TABLES
    );
    let path = write_document(dir.path(), "warnings.mztab", &text);

    let report = MzTabFileParser::new().parse_file(&path).unwrap();
    assert!(report.errors.is_empty());
    assert!(report.is_valid());

    let config = ParserConfig::default().with_level(ErrorLevel::Warn);
    let report = MzTabFileParser::with_config(config).parse_file(&path).unwrap();
    assert!(report.is_valid());
    let types: Vec<_> = report.errors.iter().map(|e| e.error_type).collect();
    assert_eq!(
        types,
        vec![
            MzTabErrorType::Logical(LogicalErrorType::NotNull),
            MzTabErrorType::Logical(LogicalErrorType::SpectraRef),
        ]
    );
    assert_eq!(report.small_molecule_evidence[0].spectra_ref.len(), 2);
}

/// Test that a missing file is an I/O error
#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result = MzTabFileParser::new().parse_file(dir.path().join("absent.mztab"));
    assert!(matches!(result, Err(ReaderError::Io(_))));
}
