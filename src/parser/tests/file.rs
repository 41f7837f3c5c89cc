use super::*;
use crate::config::ParserConfig;

const SML_ROW: &str = "SML\t1\t1\tHMDB:HMDB0000122\tC6H12O6\tnull\tnull\tGlucose\tnull\t\
180.0634\t[M+H]1+\t1\tnull\tnull";

fn document(metadata: &[&str], tables: &[String]) -> String {
    let mut lines: Vec<String> = metadata.iter().map(|l| l.to_string()).collect();
    lines.extend(tables.iter().cloned());
    lines.join("\n") + "\n"
}

fn tables() -> Vec<String> {
    vec![
        format!("SMH\t{}", SMH_STABLE),
        SML_ROW.to_string(),
        String::new(),
        format!("SFH\t{}", SFH_STABLE),
        format!("SMF\t{}", SMF_VALUES),
        String::new(),
        format!("SEH\t{}", SEH_STABLE),
        format!("SME\t{}", SME_VALUES),
    ]
}

#[test]
fn test_full_document_is_valid() {
    let mut metadata = METADATA.to_vec();
    metadata.insert(0, "COM\tgenerated for testing");
    let report = MzTabFileParser::new()
        .parse_str(&document(&metadata, &tables()))
        .unwrap();

    assert!(report.abort.is_none(), "{:?}", report.abort);
    assert!(report.errors.is_empty());
    assert!(report.is_valid());
    assert_eq!(report.metadata.mztab_id.as_deref(), Some("MTBLS1"));
    assert_eq!(report.small_molecule_summaries.len(), 1);
    assert_eq!(report.small_molecule_features.len(), 1);
    assert_eq!(report.small_molecule_evidence.len(), 1);
    assert_eq!(
        report.small_molecule_summaries[0].chemical_name,
        vec!["Glucose"]
    );
}

#[test]
fn test_metadata_errors_skip_tables() {
    let mut metadata = METADATA.to_vec();
    metadata.push("MTD\tcontact[1]-email\tnot-an-address");
    let report = MzTabFileParser::new()
        .parse_str(&document(&metadata, &tables()))
        .unwrap();

    assert!(report.abort.is_none());
    assert!(!report.is_valid());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(
        report.errors.get(0).unwrap().error_type,
        MzTabErrorType::Format(FormatErrorType::Email)
    );
    assert!(report.small_molecule_summaries.is_empty());
    assert!(report.small_molecule_features.is_empty());
    assert!(report.small_molecule_evidence.is_empty());
}

#[test]
fn test_unknown_prefix_aborts() {
    let report = MzTabFileParser::new()
        .parse_str(&document(METADATA, &["XYZ\tsomething".to_string()]))
        .unwrap();

    let abort = report.abort.as_ref().unwrap();
    assert_eq!(error_type(abort), MzTabErrorType::Format(FormatErrorType::LinePrefix));
    assert_eq!(abort.error().unwrap().line_number, 9);
    assert!(!report.is_valid());
}

#[test]
fn test_row_before_header_aborts() {
    let report = MzTabFileParser::new()
        .parse_str(&document(METADATA, &[SML_ROW.to_string()]))
        .unwrap();

    let abort = report.abort.as_ref().unwrap();
    assert_eq!(error_type(abort), MzTabErrorType::Format(FormatErrorType::LinePrefix));
    assert_eq!(abort.error().unwrap().line_number, 9);
}

#[test]
fn test_metadata_after_table_aborts() {
    let mut lines = tables();
    lines.push("MTD\tdescription\tlate".to_string());
    let report = MzTabFileParser::new()
        .parse_str(&document(METADATA, &lines))
        .unwrap();

    let abort = report.abort.as_ref().unwrap();
    assert_eq!(error_type(abort), MzTabErrorType::Format(FormatErrorType::LinePrefix));
    assert_eq!(report.small_molecule_evidence.len(), 1);
}

#[test]
fn test_header_declared_twice_aborts() {
    let lines = vec![format!("SMH\t{}", SMH_STABLE), format!("SMH\t{}", SMH_STABLE)];
    let report = MzTabFileParser::new()
        .parse_str(&document(METADATA, &lines))
        .unwrap();

    let abort = report.abort.as_ref().unwrap();
    assert_eq!(error_type(abort), MzTabErrorType::Format(FormatErrorType::LinePrefix));
    assert_eq!(abort.error().unwrap().line_number, 10);
}

#[test]
fn test_incomplete_metadata_aborts_at_end() {
    let metadata: Vec<&str> = METADATA
        .iter()
        .copied()
        .filter(|line| !line.contains("quantification_method"))
        .collect();
    let report = MzTabFileParser::new()
        .parse_str(&document(&metadata, &[]))
        .unwrap();

    let abort = report.abort.as_ref().unwrap();
    assert_eq!(
        error_type(abort),
        MzTabErrorType::Logical(LogicalErrorType::NotDefineInMetadata)
    );
    assert_eq!(abort.error().unwrap().line_number, 0);
    assert_eq!(abort.error().unwrap().context, vec!["quantification_method"]);
}

#[test]
fn test_metadata_only_document_is_valid() {
    let report = MzTabFileParser::new()
        .parse_str(&document(METADATA, &[]))
        .unwrap();
    assert!(report.is_valid());
    assert_eq!(report.metadata.ms_runs.len(), 1);
}

#[test]
fn test_error_overflow_stops_parsing() {
    let bad_row = format!("SMF\t{}", SMF_VALUES.replace("\t1\t300.5", "\tone\t300.5"));
    let lines = vec![
        format!("SFH\t{}", SFH_STABLE),
        bad_row.clone(),
        bad_row.clone(),
        bad_row,
    ];
    let parser = MzTabFileParser::with_config(ParserConfig::default().with_max_error_count(1));
    let report = parser.parse_str(&document(METADATA, &lines)).unwrap();

    assert!(report.abort.as_ref().unwrap().is_overflow());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.small_molecule_features.len(), 1);
    assert!(!report.is_valid());
}

#[test]
fn test_warn_level_keeps_warnings() {
    let mut metadata = METADATA.to_vec();
    metadata.push("MTD\tdatabase[1]-url\tnull");
    let document = document(&metadata, &[]);

    let report = MzTabFileParser::new().parse_str(&document).unwrap();
    assert!(report.errors.is_empty());

    let parser = MzTabFileParser::with_config(ParserConfig::default().with_level(ErrorLevel::Warn));
    let report = parser.parse_str(&document).unwrap();
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors.get(0).unwrap().level(), ErrorLevel::Warn);
    assert!(report.is_valid());
}

#[test]
fn test_windows_line_endings() {
    let text = document(METADATA, &tables()).replace('\n', "\r\n");
    let report = MzTabFileParser::new().parse_str(&text).unwrap();
    assert!(report.is_valid(), "{:?}", report.abort);
    assert_eq!(report.small_molecule_evidence.len(), 1);
}
