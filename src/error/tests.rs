use super::*;

fn warn(line: usize) -> MzTabError {
    MzTabError::new(LogicalErrorType::DuplicationId, line, ["assay[1]-ms_run_ref", "ms_run[1]"])
}

fn info_level_error(line: usize) -> MzTabError {
    MzTabError::new(LogicalErrorType::NotNull, line, ["ms_run[1]-location"])
}

#[test]
fn test_error_type_category_and_level() {
    let t = MzTabErrorType::from(FormatErrorType::CountMatch);
    assert_eq!(t.category(), ErrorCategory::Format);
    assert_eq!(t.level(), ErrorLevel::Error);
    assert_eq!(t.code(), 1017);

    let species = MzTabErrorType::from(CrossCheckErrorType::Species);
    assert_eq!(species.category(), ErrorCategory::CrossCheck);
    assert_eq!(species.level(), ErrorLevel::Warn);
    assert_eq!(species.name(), "Species");
}

#[test]
fn test_level_ordering() {
    assert!(ErrorLevel::Info < ErrorLevel::Warn);
    assert!(ErrorLevel::Warn < ErrorLevel::Error);
    assert_eq!("warning".parse::<ErrorLevel>().unwrap(), ErrorLevel::Warn);
    assert!("fatal".parse::<ErrorLevel>().is_err());
}

#[test]
fn test_error_message_and_display() {
    let error = MzTabError::new(LogicalErrorType::NotDefineInMetadata, 12, ["assay[1]-ms_run_ref"]);
    assert_eq!(
        error.message(),
        "\"assay[1]-ms_run_ref\" is not defined in the metadata section."
    );
    assert_eq!(
        error.to_string(),
        "[Error-2006] line 12: \"assay[1]-ms_run_ref\" is not defined in the metadata section."
    );
}

#[test]
fn test_default_list_admits_errors_only() {
    let mut list = ErrorList::default();
    assert_eq!(list.level(), ErrorLevel::Error);
    assert_eq!(list.max_error_count(), MAX_ERROR_COUNT);
    assert!(!list.add(warn(1)).unwrap());
    assert!(list.is_empty());
}

#[test]
fn test_overflow_on_third_error() {
    let mut list = ErrorList::new(ErrorLevel::Warn, 2);
    assert!(list.add(warn(1)).unwrap());
    assert!(list.add(warn(2)).unwrap());
    let overflow = list.add(warn(3)).unwrap_err();
    assert_eq!(overflow.max_error_count, 2);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_below_level_is_not_counted() {
    let mut list = ErrorList::new(ErrorLevel::Error, 2);
    let error = MzTabError::new(FormatErrorType::Double, 4, ["charge", "x"]);
    assert!(list.add(error.clone()).unwrap());
    assert!(list.add(error).unwrap());
    assert!(!list.add(info_level_error(5)).unwrap());
    assert_eq!(list.len(), 2);
}

#[test]
fn test_level_change_affects_later_adds() {
    let mut list = ErrorList::new(ErrorLevel::Error, 10);
    assert!(!list.add(warn(1)).unwrap());
    list.set_level(ErrorLevel::Info);
    assert!(list.add(warn(2)).unwrap());
    assert_eq!(list.get(0).unwrap().line_number, 2);
    list.set_max_error_count(1);
    assert!(list.add(warn(3)).is_err());
    list.clear();
    assert!(list.is_empty());
}

#[test]
fn test_print_one_error_per_line() {
    let mut list = ErrorList::new(ErrorLevel::Info, 10);
    list.add(warn(1)).unwrap();
    list.add(info_level_error(2)).unwrap();

    let mut out = Vec::new();
    list.print(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("[Warn-2004] line 1:"));
    assert_eq!(text, list.to_string());
}

#[test]
fn test_parse_error_variants() {
    let fatal = ParseError::unrecoverable(FormatErrorType::MtdLine, 3, ["MTD\tbroken"]);
    assert!(!fatal.is_overflow());
    assert_eq!(fatal.error().unwrap().line_number, 3);

    let overflow: ParseError = ErrorOverflow { max_error_count: 5 }.into();
    assert!(overflow.is_overflow());
    assert!(overflow.error().is_none());
    assert!(overflow.to_string().starts_with("System error queue overflow!"));
}

#[test]
fn test_validation_report_verdicts() {
    let mut list = ErrorList::new(ErrorLevel::Info, 10);
    let clean = ValidationReport::new("a.mztab", &list, None);
    assert!(!clean.has_failures());
    assert!(clean.to_string().contains("Validation PASSED"));

    list.add(warn(1)).unwrap();
    let warned = ValidationReport::new("a.mztab", &list, None);
    assert!(warned.has_warnings());
    assert!(warned.to_string().contains("PASSED with warnings"));

    let abort = ParseError::unrecoverable(LogicalErrorType::NotDefineInMetadata, 0, ["description"]);
    let failed = ValidationReport::new("a.mztab", &list, Some(&abort));
    assert!(failed.has_failures());
    let text = failed.to_string();
    assert!(text.contains("STOPPED"));
    assert!(text.contains(ABORT_MESSAGE));
}

mod prop {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_admission_counts_only_admitted_errors(
            kinds in proptest::collection::vec(any::<bool>(), 0..40),
            capacity in 1usize..10,
        ) {
            let mut list = ErrorList::new(ErrorLevel::Error, capacity);
            let mut admitted = 0;
            for (line, is_error) in kinds.iter().enumerate() {
                let error = if *is_error {
                    MzTabError::new(FormatErrorType::Double, line, ["charge", "x"])
                } else {
                    warn(line)
                };
                match list.add(error) {
                    Ok(added) => {
                        prop_assert_eq!(added, *is_error);
                        if added {
                            admitted += 1;
                        }
                    }
                    Err(overflow) => {
                        prop_assert!(*is_error);
                        prop_assert_eq!(admitted, capacity);
                        prop_assert_eq!(overflow.max_error_count, capacity);
                        break;
                    }
                }
            }
            prop_assert_eq!(list.len(), admitted);
            prop_assert!(list.len() <= capacity);
        }
    }
}
