//! # Primitive Value Codecs
//!
//! Stateless conversions between cell text and typed values.
//!
//! Scalar codecs return `Result<Option<T>, CodecError>`: `Ok(None)` is the
//! `null` token (or an empty cell), `Err` is text that cannot be read as
//! the requested type. List codecs are all-or-nothing: a single bad item
//! fails the whole list, and `Ok(vec![])` means the list was declared
//! empty.

mod boolean;

#[cfg(test)]
mod tests;

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::model::constants::{BAR, CALCULATE_ERROR, COLON, COMMA, INFINITY, NULL, TAB};
use crate::model::{Metadata, Parameter, PublicationItem, PublicationType, SpectraRef};

pub use boolean::MzBoolean;

static RE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^2\.\d\.\d-M$").expect("valid version regex"));

static RE_INDEXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\[(\d+)\]$").expect("valid indexed element regex"));

static RE_SPECTRA_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ms_run\[(\d+)\]:(.*)$").expect("valid spectra ref regex"));

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[_A-Za-z0-9-]+(\.[_A-Za-z0-9-']+)*@[A-Za-z0-9]+(?:[-.][A-Za-z0-9]+)*(\.[A-Za-z]{2,})$",
    )
    .expect("valid email regex")
});

/// Reasons a cell value could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Not a number, `NaN` or `INF`
    #[error("'{0}' is not a valid double")]
    Double(String),

    /// Not an integer
    #[error("'{0}' is not a valid integer")]
    Integer(String),

    /// Not `0` or `1`
    #[error("'{0}' is not a valid boolean, expected 0 or 1")]
    Boolean(String),

    /// Not a `[label, accession, name, value]` tuple
    #[error("'{0}' is not a valid parameter")]
    Parameter(String),

    /// A list item failed to decode
    #[error("invalid list item '{item}'")]
    ListItem {
        /// The offending item
        item: String,
    },

    /// Not an `element[id]` reference to the expected element
    #[error("'{0}' is not a valid {1} reference")]
    Reference(String, &'static str),

    /// Spectra reference to an MS run that is not declared
    #[error("ms_run[{0}] is not declared")]
    UndeclaredMsRun(u32),

    /// Not a `pubmed:`, `doi:` or `uri:` item
    #[error("'{0}' is not a valid publication item")]
    Publication(String),

    /// Not a valid URI or URL
    #[error("'{0}' is not a valid URI")]
    Uri(String),
}

/// True for an empty cell or the `null` token
pub fn is_null(target: &str) -> bool {
    let trimmed = target.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NULL)
}

/// Split a line into trimmed tab-separated fields
pub fn split_line(line: &str) -> Vec<&str> {
    line.trim_end_matches(['\r', '\n'])
        .split(TAB)
        .map(str::trim)
        .collect()
}

/// Trimmed text, or `None` for empty and `null`
pub fn parse_string(target: &str) -> Option<String> {
    if is_null(target) {
        None
    } else {
        Some(target.trim().to_string())
    }
}

/// Parse a double.
///
/// `NaN` and `INF` map to IEEE NaN and positive infinity. Any other
/// non-finite reading (including negative infinity) is rejected.
pub fn parse_double(target: &str) -> Result<Option<f64>, CodecError> {
    let Some(text) = parse_string(target) else {
        return Ok(None);
    };
    match text.as_str() {
        CALCULATE_ERROR => Ok(Some(f64::NAN)),
        INFINITY => Ok(Some(f64::INFINITY)),
        _ => match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(CodecError::Double(text)),
        },
    }
}

/// Render a double with the format's tokens
pub fn print_double(value: Option<f64>) -> String {
    match value {
        None => NULL.to_string(),
        Some(v) if v.is_nan() => CALCULATE_ERROR.to_string(),
        Some(v) if v == f64::INFINITY => INFINITY.to_string(),
        Some(v) => format!("{:?}", v),
    }
}

/// Parse a signed 32-bit integer
pub fn parse_integer(target: &str) -> Result<Option<i32>, CodecError> {
    let Some(text) = parse_string(target) else {
        return Ok(None);
    };
    text.parse::<i32>()
        .map(Some)
        .map_err(|_| CodecError::Integer(text))
}

/// Split on commas that are not inside double quotes.
///
/// A comma separates fields when an even number of quotes follows it,
/// which keeps quoted names such as `"2,4-D"` intact.
fn split_unquoted_commas(text: &str) -> Vec<&str> {
    let total = text.matches('"').count();
    let mut seen = 0;
    let mut start = 0;
    let mut fields = Vec::new();
    for (i, c) in text.char_indices() {
        match c {
            '"' => seen += 1,
            ',' if (total - seen) % 2 == 0 => {
                fields.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&text[start..]);
    fields
}

fn remove_double_quotes(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let quotes = trimmed.matches('"').count();
    if quotes > 2 {
        log::warn!("Nested quotes are not supported, removing all quotes from '{}'", trimmed);
    }
    let unquoted = trimmed.replace('"', "");
    let unquoted = unquoted.trim();
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

/// Parse a `[label, accession, name, value]` parameter.
///
/// Returns `None` for `null` and for any text that is not a four-field
/// tuple with a name or a value.
pub fn parse_param(target: &str) -> Option<Parameter> {
    let text = parse_string(target)?;
    let start = text.find('[').map_or(0, |i| i + 1);
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }

    let fields = split_unquoted_commas(&text[start..end]);
    let [label, accession, name, value] = fields.as_slice() else {
        return None;
    };

    let name = remove_double_quotes(name);
    let value = remove_double_quotes(value);
    if name.is_none() && value.is_none() {
        return None;
    }

    Some(Parameter {
        cv_label: label.trim().to_string(),
        cv_accession: accession.trim().to_string(),
        name: name.unwrap_or_default(),
        value,
    })
}

/// Split a list cell. Trailing empty items are dropped.
pub fn parse_string_list(split_char: char, target: &str) -> Vec<String> {
    let Some(text) = parse_string(target) else {
        return Vec::new();
    };
    let mut items: Vec<String> = text.split(split_char).map(str::to_string).collect();
    while items.last().is_some_and(|s| s.is_empty()) {
        items.pop();
    }
    items
}

/// Parse a `|`-separated list of doubles
pub fn parse_double_list(target: &str) -> Result<Vec<f64>, CodecError> {
    parse_string_list(BAR, target)
        .into_iter()
        .map(|item| match parse_double(&item) {
            Ok(Some(value)) => Ok(value),
            _ => Err(CodecError::ListItem { item }),
        })
        .collect()
}

/// Parse a `|`-separated list of parameters
pub fn parse_param_list(target: &str) -> Result<Vec<Parameter>, CodecError> {
    parse_string_list(BAR, target)
        .into_iter()
        .map(|item| parse_param(&item).ok_or(CodecError::ListItem { item }))
        .collect()
}

/// Parse `element[id]` and return the id
pub fn parse_indexed_element(target: &str, element: &str) -> Option<u32> {
    let text = parse_string(target)?;
    let caps = RE_INDEXED.captures(&text)?;
    if &caps[1] != element {
        return None;
    }
    caps[2].parse().ok()
}

/// Parse a `,`-separated list of `element[id]` references
pub fn parse_ref_list(target: &str, element: &'static str) -> Result<Vec<u32>, CodecError> {
    parse_string_list(COMMA, target)
        .into_iter()
        .map(|item| {
            parse_indexed_element(&item, element)
                .ok_or_else(|| CodecError::Reference(item.trim().to_string(), element))
        })
        .collect()
}

/// Parse `ms_run[n]:reference` items against the declared MS runs
pub fn parse_spectra_ref_list(
    target: &str,
    metadata: &Metadata,
) -> Result<Vec<SpectraRef>, CodecError> {
    parse_string_list(BAR, target)
        .into_iter()
        .map(|item| {
            let caps = RE_SPECTRA_REF
                .captures(item.trim())
                .ok_or_else(|| CodecError::Reference(item.clone(), "ms_run"))?;
            let ms_run: u32 = caps[1]
                .parse()
                .map_err(|_| CodecError::Reference(item.clone(), "ms_run"))?;
            if !metadata.ms_runs.contains_key(&ms_run) {
                return Err(CodecError::UndeclaredMsRun(ms_run));
            }
            Ok(SpectraRef {
                ms_run,
                reference: caps[2].to_string(),
            })
        })
        .collect()
}

/// Parse `|`-separated `pubmed:`, `doi:` or `uri:` items
pub fn parse_publication_items(target: &str) -> Result<Vec<PublicationItem>, CodecError> {
    parse_string_list(BAR, target)
        .into_iter()
        .map(|item| {
            let (kind, accession) = item
                .split_once(COLON)
                .ok_or_else(|| CodecError::Publication(item.clone()))?;
            let kind = PublicationType::from_token(kind)
                .ok_or_else(|| CodecError::Publication(item.clone()))?;
            let accession = accession.trim();
            if accession.is_empty() {
                return Err(CodecError::Publication(item.clone()));
            }
            Ok(PublicationItem {
                kind,
                accession: accession.to_string(),
            })
        })
        .collect()
}

/// The trimmed address if it is a plausible e-mail address
pub fn parse_email(target: &str) -> Option<String> {
    parse_string(target).filter(|text| RE_EMAIL.is_match(text))
}

/// The trimmed version if it has the `2.x.y-M` shape
pub fn parse_version(target: &str) -> Option<String> {
    parse_string(target).filter(|text| RE_VERSION.is_match(text))
}

/// Validate an absolute or relative URI
pub fn parse_uri(target: &str) -> Result<Option<String>, CodecError> {
    let Some(text) = parse_string(target) else {
        return Ok(None);
    };
    if text.chars().any(char::is_whitespace) {
        return Err(CodecError::Uri(text));
    }
    match Url::parse(&text) {
        Ok(_) => Ok(Some(text)),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("file:///").map_err(|_| CodecError::Uri(text.clone()))?;
            match base.join(&text) {
                Ok(_) => Ok(Some(text)),
                Err(_) => Err(CodecError::Uri(text)),
            }
        }
        Err(_) => Err(CodecError::Uri(text)),
    }
}

/// Validate an absolute URL with a scheme
pub fn parse_url(target: &str) -> Result<Option<String>, CodecError> {
    let Some(text) = parse_string(target) else {
        return Ok(None);
    };
    if text.chars().any(char::is_whitespace) {
        return Err(CodecError::Uri(text));
    }
    Url::parse(&text)
        .map(|_| Some(text.clone()))
        .map_err(|_| CodecError::Uri(text))
}
