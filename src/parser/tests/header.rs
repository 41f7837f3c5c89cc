use super::*;
use crate::model::{AbundanceKind, ColumnKind, ColumnType, OptScope, Parameter, Section};

fn parse_header(context: &ParserContext, line: &str) -> Result<TableLayout, ParseError> {
    HeaderLineParser::new(context, &mut warn_list()).parse(10, line)
}

#[test]
fn test_logical_order_differs_from_physical() {
    let context = metadata_context();
    let line = format!("SMH\t{}\topt_global_note\tabundance_assay[1]", SMH_STABLE);
    let layout = parse_header(&context, &line).unwrap();

    assert_eq!(layout.section(), Section::SmallMolecule);
    let factory = layout.factory();
    assert_eq!(factory.len(), 15);
    assert_eq!(factory.column(14).unwrap().header, "abundance_assay[1]");
    assert_eq!(factory.column(15).unwrap().header, "opt_global_note");

    let mapping = layout.mapping();
    assert_eq!(mapping.len(), 15);
    assert_eq!(mapping.logical(1), Some(1));
    assert_eq!(mapping.logical(14), Some(15));
    assert_eq!(mapping.logical(15), Some(14));
    assert_eq!(mapping.physical(14), Some(15));
}

#[test]
fn test_reordered_stable_columns() {
    let context = metadata_context();
    let mut cells: Vec<&str> = SFH_STABLE.split('\t').collect();
    cells.swap(0, 9);
    let line = format!("SFH\t{}", cells.join("\t"));
    let layout = parse_header(&context, &line).unwrap();

    assert_eq!(layout.mapping().logical(1), Some(10));
    assert_eq!(layout.mapping().logical(10), Some(1));
    assert_eq!(layout.factory().column(1).unwrap().header, "SMF_ID");
}

#[test]
fn test_optional_column_types() {
    let context = metadata_context();
    let line = format!(
        "SFH\t{}\topt_assay[1]_cv_MS:1002217_decoy_peptide\topt_ms_run[1]_comment",
        SFH_STABLE
    );
    let layout = parse_header(&context, &line).unwrap();
    let decoy = layout.factory().column(11).unwrap();
    assert_eq!(decoy.column_type, ColumnType::Boolean);
    match &decoy.kind {
        ColumnKind::Optional(column) => {
            assert_eq!(column.scope, OptScope::Assay(1));
            assert_eq!(column.identifier(), "assay[1]_cv_MS:1002217_decoy_peptide");
        }
        other => panic!("unexpected column kind {:?}", other),
    }
    assert_eq!(layout.factory().column(12).unwrap().column_type, ColumnType::String);
    assert_eq!(layout.factory().optional_columns().count(), 2);
}

#[test]
fn test_confidence_columns_only_in_evidence() {
    let mut lines = METADATA.to_vec();
    lines.push("MTD\tid_confidence_measure[1]\t[MS, MS:1002890, fragmentation score, ]");
    let context = parse_metadata(&lines, &mut ErrorList::default()).unwrap();

    let line = format!("SEH\t{}\tid_confidence_measure[1]", SEH_STABLE);
    let layout = parse_header(&context, &line).unwrap();
    assert_eq!(layout.factory().len(), 18);

    let line = format!("SFH\t{}\tid_confidence_measure[1]", SFH_STABLE);
    let error = parse_header(&context, &line).unwrap_err();
    assert_eq!(
        error_type(&error),
        MzTabErrorType::Format(FormatErrorType::ColumnNotValid)
    );
}

#[test]
fn test_header_errors() {
    let context = metadata_context();
    let cases = [
        (
            format!("SMX\t{}", SMH_STABLE),
            MzTabErrorType::Format(FormatErrorType::LinePrefix),
        ),
        (
            format!("SMH\t{}\tSML_ID", SMH_STABLE),
            MzTabErrorType::Format(FormatErrorType::DuplicationColumn),
        ),
        (
            format!("SMH\t{}\tunknown_column", SMH_STABLE),
            MzTabErrorType::Format(FormatErrorType::ColumnNotValid),
        ),
        (
            format!("SMH\t{}\topt_sample[1]_note", SMH_STABLE),
            MzTabErrorType::Format(FormatErrorType::OptionalColumn),
        ),
        (
            format!("SMH\t{}\tabundance_assay[2]", SMH_STABLE),
            MzTabErrorType::Logical(LogicalErrorType::NotDefineInMetadata),
        ),
        (
            format!("SMH\t{}\topt_study_variable[1]_note", SMH_STABLE),
            MzTabErrorType::Logical(LogicalErrorType::NotDefineInMetadata),
        ),
        (
            "SMH\tSML_ID\tSMF_ID_REFS".to_string(),
            MzTabErrorType::Format(FormatErrorType::StableColumn),
        ),
    ];
    for (line, expected) in cases {
        let error = parse_header(&context, &line).unwrap_err();
        assert_eq!(error_type(&error), expected, "line {:?}", line);
        assert_eq!(error.error().unwrap().line_number, 10);
    }
}

#[test]
fn test_missing_stable_column_is_named() {
    let context = metadata_context();
    let line = format!("SMH\t{}", SMH_STABLE.replace("\treliability", ""));
    let error = parse_header(&context, &line).unwrap_err();
    assert_eq!(
        error.error().unwrap().context,
        vec!["small_molecule".to_string(), "reliability".to_string()]
    );
}

#[test]
fn test_col_units_applied_to_header() {
    let mut lines = METADATA.to_vec();
    lines.extend([
        "MTD\tcolunit-small_molecule\tbest_id_confidence_value=[UO, UO:0000187, percent, ]",
        "MTD\tcolunit-small_molecule\tmissing_column=[UO, UO:0000187, percent, ]",
        "MTD\tcolunit-small_molecule\tno unit here",
    ]);
    let context = parse_metadata(&lines, &mut ErrorList::default()).unwrap();

    let mut errors = warn_list();
    let layout = HeaderLineParser::new(&context, &mut errors)
        .parse(12, &format!("SMH\t{}", SMH_STABLE))
        .unwrap();

    let column = layout.factory().column(13).unwrap();
    assert_eq!(column.header, "best_id_confidence_value");
    assert_eq!(column.unit.as_ref().unwrap().cv_accession, "UO:0000187");

    let types: Vec<_> = errors.iter().map(|e| e.error_type).collect();
    assert_eq!(
        types,
        vec![
            MzTabErrorType::Logical(LogicalErrorType::ColUnitColumn),
            MzTabErrorType::Format(FormatErrorType::ColUnit),
        ]
    );
}

#[test]
fn test_parse_optional_names() {
    let column = parse_optional("opt_global_cv_MS:1002217_decoy_peptide").unwrap();
    assert_eq!(column.scope, OptScope::Global);
    assert_eq!(column.name, "cv_MS:1002217_decoy_peptide");
    assert_eq!(
        parse_optional("opt_study_variable[2]_mean").unwrap().scope,
        OptScope::StudyVariable(2)
    );
    assert!(parse_optional("opt_global").is_none());
    assert!(parse_optional("opt_sample[1]_x").is_none());
}

#[test]
fn test_factory_rejects_duplicates() {
    let mut factory = ColumnFactory::new(Section::SmallMoleculeFeature);
    assert_eq!(factory.len(), 10);
    assert!(factory.add_abundance_column(AbundanceKind::Assay, 2));
    assert!(factory.add_abundance_column(AbundanceKind::Assay, 1));
    assert!(!factory.add_abundance_column(AbundanceKind::Assay, 1));
    let optional = crate::model::OptionalColumn::new(OptScope::Global, "note");
    assert!(factory.add_optional_column(optional.clone(), ColumnType::String));
    assert!(!factory.add_optional_column(optional, ColumnType::Integer));

    let headers: Vec<_> = factory.columns().skip(10).map(|c| c.header.clone()).collect();
    assert_eq!(
        headers,
        vec!["abundance_assay[1]", "abundance_assay[2]", "opt_global_note"]
    );
    assert_eq!(factory.find("opt_global_note"), Some(13));
    assert!(factory.set_unit("charge", Parameter::cv("UO", "UO:0000000", "none")));
    assert!(!factory.set_unit("nothing", Parameter::cv("UO", "UO:0000000", "none")));
}

#[test]
fn test_position_mapping_replaces_pairs() {
    let mut mapping = PositionMapping::new();
    mapping.put(1, 2);
    mapping.put(2, 1);
    mapping.put(1, 3);
    assert_eq!(mapping.logical(1), Some(3));
    assert_eq!(mapping.physical(2), None);
    assert_eq!(mapping.len(), 2);
    let pairs: Vec<_> = mapping.iter().collect();
    assert_eq!(pairs, vec![(1, 3), (2, 1)]);
}

#[test]
fn test_zero_padded_indices_are_mapped() {
    let context = metadata_context();
    let line = format!("SFH\t{}\topt_assay[01]_note\tabundance_assay[01]", SFH_STABLE);
    let layout = parse_header(&context, &line).unwrap();

    assert_eq!(layout.mapping().len(), 12);
    assert_eq!(layout.factory().column(11).unwrap().header, "abundance_assay[1]");
    assert_eq!(layout.factory().column(12).unwrap().header, "opt_assay[1]_note");
    assert_eq!(layout.mapping().logical(11), Some(12));
    assert_eq!(layout.mapping().logical(12), Some(11));

    let line = format!("SFH\t{}\tabundance_assay[1]\tabundance_assay[01]", SFH_STABLE);
    let err = parse_header(&context, &line).unwrap_err();
    assert_eq!(
        error_type(&err),
        MzTabErrorType::Format(FormatErrorType::DuplicationColumn)
    );
}
