use serde::{Deserialize, Serialize};
use std::fmt;

use super::{parse_string, CodecError};

/// Boolean written as `1` or `0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MzBoolean {
    /// `1`
    True,
    /// `0`
    False,
}

impl MzBoolean {
    /// Parse a cell; only the digits `0` and `1` are accepted
    pub fn parse(target: &str) -> Result<Option<MzBoolean>, CodecError> {
        let Some(text) = parse_string(target) else {
            return Ok(None);
        };
        match text.as_str() {
            "1" => Ok(Some(MzBoolean::True)),
            "0" => Ok(Some(MzBoolean::False)),
            _ => Err(CodecError::Boolean(text)),
        }
    }

    /// Convert to a native boolean
    pub fn to_bool(self) -> bool {
        matches!(self, MzBoolean::True)
    }
}

impl From<bool> for MzBoolean {
    fn from(value: bool) -> Self {
        if value {
            MzBoolean::True
        } else {
            MzBoolean::False
        }
    }
}

impl fmt::Display for MzBoolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MzBoolean::True => f.write_str("1"),
            MzBoolean::False => f.write_str("0"),
        }
    }
}
