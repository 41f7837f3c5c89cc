use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of an error; ordered `Info < Warn < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    /// Informational
    Info,
    /// Suspicious but acceptable
    Warn,
    /// Violates the format
    Error,
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorLevel::Info => f.write_str("Info"),
            ErrorLevel::Warn => f.write_str("Warn"),
            ErrorLevel::Error => f.write_str("Error"),
        }
    }
}

impl FromStr for ErrorLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(ErrorLevel::Info),
            "warn" | "warning" => Ok(ErrorLevel::Warn),
            "error" => Ok(ErrorLevel::Error),
            other => Err(format!("unknown error level '{}'", other)),
        }
    }
}

/// Broad class of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Text does not follow the format grammar
    Format,
    /// Text is well-formed but inconsistent
    Logical,
    /// Disagreement with an external resource
    CrossCheck,
}

macro_rules! error_types {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = ($code:literal, $level:ident, $template:literal), )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Stable numeric code
            pub fn code(self) -> u16 {
                match self {
                    $( $name::$variant => $code, )+
                }
            }

            /// Fixed severity of this error type
            pub fn level(self) -> ErrorLevel {
                match self {
                    $( $name::$variant => ErrorLevel::$level, )+
                }
            }

            /// Message template with `{0}`, `{1}`... placeholders
            pub fn template(self) -> &'static str {
                match self {
                    $( $name::$variant => $template, )+
                }
            }

            /// Short name of the error type
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant), )+
                }
            }
        }
    };
}

error_types! {
    /// Errors in the textual shape of a line or cell
    FormatErrorType {
        /// Metadata line without exactly three fields
        MtdLine = (1001, Error, "Metadata line \"{0}\" must have exactly three tab-separated fields."),
        /// Unknown element, property or col-unit target
        MtdDefineLabel = (1002, Error, "Define label \"{0}\" is not recognized."),
        /// Version not of the form 2.x.y-M
        MzTabVersion = (1003, Error, "mzTab-version \"{0}\" must match 2.<digit>.<digit>-M."),
        /// Malformed parameter
        Param = (1004, Error, "\"{1}\" in \"{0}\" is not a parameter of the form [label, accession, name, value]."),
        /// Malformed parameter list
        ParamList = (1005, Error, "\"{1}\" in \"{0}\" is not a |-separated list of parameters."),
        /// Malformed publication
        Publication = (1006, Error, "\"{1}\" in \"{0}\" is not a |-separated list of pubmed:, doi: or uri: items."),
        /// Malformed e-mail address
        Email = (1007, Error, "\"{1}\" in \"{0}\" is not a valid e-mail address."),
        /// Malformed URI
        Uri = (1008, Error, "\"{1}\" in \"{0}\" is not a valid URI."),
        /// Malformed URL
        Url = (1009, Error, "\"{1}\" in \"{0}\" is not a valid URL."),
        /// Malformed indexed element reference
        IndexedElement = (1010, Error, "\"{1}\" in \"{0}\" is not a valid reference to {2}[n]."),
        /// Malformed integer cell
        Integer = (1011, Error, "\"{1}\" in column \"{0}\" is not an integer."),
        /// Malformed double cell
        Double = (1012, Error, "\"{1}\" in column \"{0}\" is not a double, NaN or INF."),
        /// Malformed boolean cell
        MzBoolean = (1013, Error, "\"{1}\" in column \"{0}\" is not 0 or 1."),
        /// Malformed string list cell
        StringList = (1014, Error, "\"{1}\" in column \"{0}\" is not a {2}-separated list."),
        /// Malformed double list cell
        DoubleList = (1015, Error, "\"{1}\" in column \"{0}\" is not a |-separated list of doubles."),
        /// Malformed spectra reference cell
        SpectraRef = (1016, Error, "\"{1}\" in column \"{0}\" is not a |-separated list of ms_run[n]:reference items of declared MS runs."),
        /// Cell count differs from the header
        CountMatch = (1017, Error, "Line has {0} cells but the {1} header declares {2}."),
        /// Unknown or misplaced line prefix
        LinePrefix = (1018, Error, "Line prefix \"{0}\" is not valid here: {1}."),
        /// Missing mandatory header column
        StableColumn = (1019, Error, "The {0} header is missing the mandatory column \"{1}\"."),
        /// Unknown header column
        ColumnNotValid = (1020, Error, "Column \"{1}\" is not valid in the {0} header."),
        /// Repeated header column
        DuplicationColumn = (1021, Error, "Column \"{1}\" appears more than once in the {0} header."),
        /// Malformed opt_ header
        OptionalColumn = (1022, Error, "Optional column \"{0}\" must be named opt_<global|assay[n]|study_variable[n]|ms_run[n]>_<name>."),
        /// Malformed column unit declaration
        ColUnit = (1023, Error, "\"{1}\" in \"{0}\" is not of the form <column>=[label, accession, name, value]."),
    }
}

error_types! {
    /// Errors in the consistency of well-formed content
    LogicalErrorType {
        /// Empty cell
        Null = (2001, Error, "Column \"{0}\" has an empty cell, absent values must be written as null."),
        /// Null token where a value is expected
        NotNull = (2002, Warn, "\"{0}\" should not be null."),
        /// Singleton defined twice
        DuplicationDefine = (2003, Error, "\"{0}\" is defined more than once."),
        /// Same id repeated in a reference list
        DuplicationId = (2004, Warn, "\"{1}\" is referenced more than once in \"{0}\"."),
        /// Non-numeric or non-positive id
        IdNumber = (2005, Error, "Id \"{1}\" in \"{0}\" must be an integer greater than zero."),
        /// Missing required property or undeclared reference
        NotDefineInMetadata = (2006, Error, "\"{0}\" is not defined in the metadata section."),
        /// Study variable without assays
        AssayRefs = (2007, Error, "\"{0}\" must reference at least one assay."),
        /// Software without a version value
        SoftwareVersion = (2008, Warn, "\"{0}\" should give the software version as the parameter value."),
        /// Spectra reference to a run without location
        SpectraRef = (2009, Warn, "Spectra reference \"{0}\" points to ms_run[{1}], whose location is unknown."),
        /// Column unit for a column absent from the header
        ColUnitColumn = (2010, Warn, "Column unit \"{1}\" refers to a column that is not in the {0} header."),
    }
}

error_types! {
    /// Errors found by comparing against external resources
    CrossCheckErrorType {
        /// Species term not found
        Species = (3001, Warn, "Species \"{0}\" is not a known taxonomy term."),
        /// CV term outside the allowed branch
        CvTermNotAllowed = (3002, Warn, "CV term \"{0}\" is not allowed for \"{1}\"."),
    }
}

/// Any concrete error type, carrying its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MzTabErrorType {
    /// Format error
    Format(FormatErrorType),
    /// Logical error
    Logical(LogicalErrorType),
    /// Cross-check error
    CrossCheck(CrossCheckErrorType),
}

impl MzTabErrorType {
    /// Category of the error
    pub fn category(self) -> ErrorCategory {
        match self {
            MzTabErrorType::Format(_) => ErrorCategory::Format,
            MzTabErrorType::Logical(_) => ErrorCategory::Logical,
            MzTabErrorType::CrossCheck(_) => ErrorCategory::CrossCheck,
        }
    }

    /// Stable numeric code
    pub fn code(self) -> u16 {
        match self {
            MzTabErrorType::Format(t) => t.code(),
            MzTabErrorType::Logical(t) => t.code(),
            MzTabErrorType::CrossCheck(t) => t.code(),
        }
    }

    /// Severity
    pub fn level(self) -> ErrorLevel {
        match self {
            MzTabErrorType::Format(t) => t.level(),
            MzTabErrorType::Logical(t) => t.level(),
            MzTabErrorType::CrossCheck(t) => t.level(),
        }
    }

    /// Message template
    pub fn template(self) -> &'static str {
        match self {
            MzTabErrorType::Format(t) => t.template(),
            MzTabErrorType::Logical(t) => t.template(),
            MzTabErrorType::CrossCheck(t) => t.template(),
        }
    }

    /// Short name
    pub fn name(self) -> &'static str {
        match self {
            MzTabErrorType::Format(t) => t.name(),
            MzTabErrorType::Logical(t) => t.name(),
            MzTabErrorType::CrossCheck(t) => t.name(),
        }
    }
}

impl From<FormatErrorType> for MzTabErrorType {
    fn from(t: FormatErrorType) -> Self {
        MzTabErrorType::Format(t)
    }
}

impl From<LogicalErrorType> for MzTabErrorType {
    fn from(t: LogicalErrorType) -> Self {
        MzTabErrorType::Logical(t)
    }
}

impl From<CrossCheckErrorType> for MzTabErrorType {
    fn from(t: CrossCheckErrorType) -> Self {
        MzTabErrorType::CrossCheck(t)
    }
}

/// A single detected problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MzTabError {
    /// Type, fixing category, code and level
    pub error_type: MzTabErrorType,
    /// 1-based line number, 0 when not tied to a line
    pub line_number: usize,
    /// Values substituted into the message template
    pub context: Vec<String>,
}

impl MzTabError {
    /// Create an error for a line
    pub fn new<I, S>(error_type: impl Into<MzTabErrorType>, line_number: usize, context: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            error_type: error_type.into(),
            line_number,
            context: context.into_iter().map(Into::into).collect(),
        }
    }

    /// Severity of the error
    pub fn level(&self) -> ErrorLevel {
        self.error_type.level()
    }

    /// Category of the error
    pub fn category(&self) -> ErrorCategory {
        self.error_type.category()
    }

    /// Message with the context values filled in
    pub fn message(&self) -> String {
        let mut message = self.error_type.template().to_string();
        for (i, value) in self.context.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), value);
        }
        message
    }
}

impl fmt::Display for MzTabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}-{}] line {}: {}",
            self.level(),
            self.error_type.code(),
            self.line_number,
            self.message()
        )
    }
}
