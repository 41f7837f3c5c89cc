use super::*;
use crate::model::{Location, MsRun};

#[test]
fn test_parse_string_null_and_empty() {
    assert_eq!(parse_string("  value "), Some("value".to_string()));
    assert_eq!(parse_string("null"), None);
    assert_eq!(parse_string(" NULL "), None);
    assert_eq!(parse_string("   "), None);
}

#[test]
fn test_parse_double_tokens() {
    assert_eq!(parse_double("12.5").unwrap(), Some(12.5));
    assert_eq!(parse_double("null").unwrap(), None);
    assert!(parse_double("NaN").unwrap().unwrap().is_nan());
    assert_eq!(parse_double("INF").unwrap(), Some(f64::INFINITY));
}

#[test]
fn test_parse_double_rejects_negative_infinity() {
    assert!(parse_double("-INF").is_err());
    assert!(parse_double("-inf").is_err());
    assert!(parse_double("-Infinity").is_err());
    assert!(parse_double("abc").is_err());
}

#[test]
fn test_print_double() {
    assert_eq!(print_double(None), "null");
    assert_eq!(print_double(Some(f64::NAN)), "NaN");
    assert_eq!(print_double(Some(f64::INFINITY)), "INF");
    assert_eq!(print_double(Some(1.0)), "1.0");
    assert_eq!(print_double(Some(0.25)), "0.25");
}

#[test]
fn test_parse_integer() {
    assert_eq!(parse_integer(" 3 ").unwrap(), Some(3));
    assert_eq!(parse_integer("-2").unwrap(), Some(-2));
    assert_eq!(parse_integer("null").unwrap(), None);
    assert!(parse_integer("3.5").is_err());
}

#[test]
fn test_parse_cv_param() {
    let param = parse_param("[MS, MS:1001477, SpectraST, ]").unwrap();
    assert_eq!(param.cv_label, "MS");
    assert_eq!(param.cv_accession, "MS:1001477");
    assert_eq!(param.name, "SpectraST");
    assert_eq!(param.value, None);
    assert!(!param.is_user_param());
}

#[test]
fn test_parse_param_quoted_comma() {
    let param = parse_param("[CHEBI, CHEBI:28794, \"2,4-dichlorophenol\", ]").unwrap();
    assert_eq!(param.name, "2,4-dichlorophenol");
    assert_eq!(param.to_string(), "[CHEBI, CHEBI:28794, \"2,4-dichlorophenol\", ]");
}

#[test]
fn test_parse_user_param() {
    let param = parse_param("[, , tolerance, 0.5]").unwrap();
    assert!(param.is_user_param());
    assert_eq!(param.name, "tolerance");
    assert_eq!(param.value, Some("0.5".to_string()));

    let value_only = parse_param("[, , , 0.5]").unwrap();
    assert_eq!(value_only.name, "");
    assert_eq!(value_only.value, Some("0.5".to_string()));
}

#[test]
fn test_parse_param_invalid_shapes() {
    assert_eq!(parse_param("null"), None);
    assert_eq!(parse_param("[MS, MS:1000031]"), None);
    assert_eq!(parse_param("[MS, MS:1, a, b, c]"), None);
    assert_eq!(parse_param("[, , , ]"), None);
    assert_eq!(parse_param("MS, MS:1, name, value"), None);
}

#[test]
fn test_parse_string_list_drops_trailing_empty() {
    assert_eq!(parse_string_list('|', "a|b|"), vec!["a", "b"]);
    assert_eq!(parse_string_list('|', "a||b"), vec!["a", "", "b"]);
    assert!(parse_string_list('|', "null").is_empty());
}

#[test]
fn test_double_list_all_or_nothing() {
    assert_eq!(parse_double_list("1.5|2|INF").unwrap(), vec![1.5, 2.0, f64::INFINITY]);
    assert!(parse_double_list("null").unwrap().is_empty());
    assert_eq!(
        parse_double_list("1.5|x|3"),
        Err(CodecError::ListItem {
            item: "x".to_string()
        })
    );
}

#[test]
fn test_param_list_all_or_nothing() {
    let params = parse_param_list("[MS, MS:1, a, ]|[, , b, 1]").unwrap();
    assert_eq!(params.len(), 2);
    assert!(parse_param_list("[MS, MS:1, a, ]|broken").is_err());
}

#[test]
fn test_parse_indexed_element() {
    assert_eq!(parse_indexed_element("sample[12]", "sample"), Some(12));
    assert_eq!(parse_indexed_element(" ms_run[1] ", "ms_run"), Some(1));
    assert_eq!(parse_indexed_element("sample[1]", "assay"), None);
    assert_eq!(parse_indexed_element("sample[x]", "sample"), None);
}

#[test]
fn test_ref_list_all_or_nothing() {
    assert_eq!(parse_ref_list("assay[1], assay[2]", "assay").unwrap(), vec![1, 2]);
    assert!(parse_ref_list("assay[1],sample[2]", "assay").is_err());
    assert!(parse_ref_list("null", "assay").unwrap().is_empty());
}

#[test]
fn test_spectra_ref_list_resolves_ms_runs() {
    let mut metadata = Metadata::new();
    metadata.ms_runs.insert(
        1,
        MsRun {
            id: 1,
            location: Some(Location::Unknown),
            ..Default::default()
        },
    );

    let refs = parse_spectra_ref_list("ms_run[1]:scan=5|ms_run[1]:scan=7", &metadata).unwrap();
    assert_eq!(refs.len(), 2);
    assert_eq!(refs[1].reference, "scan=7");
    assert_eq!(refs[0].to_string(), "ms_run[1]:scan=5");

    assert_eq!(
        parse_spectra_ref_list("ms_run[1]:scan=5|ms_run[2]:scan=1", &metadata),
        Err(CodecError::UndeclaredMsRun(2))
    );
}

#[test]
fn test_publication_items() {
    let items = parse_publication_items("pubmed:21063943|doi:10.1021/ac500801d").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind, PublicationType::Pubmed);
    assert_eq!(items[1].accession, "10.1021/ac500801d");
    assert!(parse_publication_items("pubmed:1|isbn:2").is_err());
}

#[test]
fn test_email_and_version() {
    assert!(parse_email("jane.doe@example.org").is_some());
    assert!(parse_email("not-an-email").is_none());
    assert_eq!(parse_version("2.0.0-M"), Some("2.0.0-M".to_string()));
    assert_eq!(parse_version("1.0.0"), None);
}

#[test]
fn test_uri_and_url() {
    assert!(parse_uri("https://www.ebi.ac.uk/metabolights/MTBLS1").unwrap().is_some());
    assert!(parse_uri("relative/path.mzML").unwrap().is_some());
    assert!(parse_uri("has space").is_err());
    assert!(parse_url("file:///data/run1.mzML").unwrap().is_some());
    assert!(parse_url("run1.mzML").is_err());
    assert_eq!(parse_url("null").unwrap(), None);
}

#[test]
fn test_mz_boolean() {
    assert_eq!(MzBoolean::parse(" 1 ").unwrap(), Some(MzBoolean::True));
    assert_eq!(MzBoolean::parse("0").unwrap(), Some(MzBoolean::False));
    assert_eq!(MzBoolean::parse("null").unwrap(), None);
    assert!(MzBoolean::parse("yes").is_err());
    assert!(MzBoolean::parse("true").is_err());
    assert_eq!(MzBoolean::True.to_string(), "1");
}

#[test]
fn test_split_line() {
    assert_eq!(split_line("MTD\tmzTab-version\t2.0.0-M\r\n"), vec!["MTD", "mzTab-version", "2.0.0-M"]);
    assert_eq!(split_line("SML\t1\t"), vec!["SML", "1", ""]);
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Finite values survive print then parse
        #[test]
        fn test_double_roundtrip(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            let parsed = parse_double(&print_double(Some(value))).unwrap();
            prop_assert_eq!(parsed, Some(value));
        }

        /// CV parameters survive display then parse
        #[test]
        fn test_param_roundtrip(
            label in "[A-Z]{1,5}",
            accession in "[A-Z]{1,5}:[0-9]{1,7}",
            name in "[A-Za-z][A-Za-z0-9 ]{0,12}[A-Za-z0-9]",
            value in proptest::option::of("[A-Za-z0-9.]{1,8}"),
        ) {
            let text = format!("[{}, {}, {}, {}]", label, accession, name, value.clone().unwrap_or_default());
            let param = parse_param(&text).unwrap();
            prop_assert_eq!(param.cv_label, label);
            prop_assert_eq!(param.cv_accession, accession);
            prop_assert_eq!(param.name, name);
            prop_assert_eq!(param.value, value);
        }
    }
}
