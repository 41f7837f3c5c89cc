use serde::{Deserialize, Serialize};
use std::fmt;

/// Controlled-vocabulary parameter `[label, accession, name, value]`.
///
/// User-defined parameters leave the label and accession empty and carry
/// free text in the name and/or value. Two parameters are equal when their
/// four textual fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Parameter {
    /// CV source label (e.g., "MS")
    pub cv_label: String,

    /// CV accession (e.g., "MS:1000031")
    pub cv_accession: String,

    /// Term name, may be empty when a value is present
    pub name: String,

    /// Optional value; an empty value field is `None`
    pub value: Option<String>,
}

impl Parameter {
    /// Create a CV parameter without a value
    pub fn cv(
        cv_label: impl Into<String>,
        cv_accession: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            cv_label: cv_label.into(),
            cv_accession: cv_accession.into(),
            name: name.into(),
            value: None,
        }
    }

    /// Create a user parameter (empty label and accession)
    pub fn user(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            cv_label: String::new(),
            cv_accession: String::new(),
            name: name.into(),
            value,
        }
    }

    /// Builder method to attach a value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// True when the parameter has no CV label and no accession
    pub fn is_user_param(&self) -> bool {
        self.cv_label.is_empty() && self.cv_accession.is_empty()
    }
}

// Commas inside a field must be quoted so the tuple splits back into four fields.
fn write_field(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if text.contains(',') {
        write!(f, "\"{}\"", text)
    } else {
        f.write_str(text)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, ", self.cv_label, self.cv_accession)?;
        write_field(f, &self.name)?;
        f.write_str(", ")?;
        if let Some(value) = &self.value {
            write_field(f, value)?;
        }
        f.write_str("]")
    }
}
