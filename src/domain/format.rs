//! Input format constraints attached to string fields

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Format of a string field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Format {
    /// Input must match the given regular expression
    Regex { pattern: String },
    /// Free-form input
    #[default]
    None,
}

impl Format {
    /// Decode a format descriptor.
    ///
    /// Never fails: an absent descriptor, `null`, or a shape this crate does
    /// not know about all decode to [`Format::None`].
    pub fn decode(descriptor: Option<&Value>) -> Format {
        let descriptor = match descriptor {
            Some(descriptor) if !descriptor.is_null() => descriptor,
            _ => return Format::None,
        };

        match Format::deserialize(descriptor) {
            Ok(format) => format,
            Err(e) => {
                tracing::debug!(format = %descriptor, error = %e, "unrecognized string format, using none");
                Format::None
            }
        }
    }

    /// Regex pattern, if any
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Format::Regex { pattern } => Some(pattern),
            Format::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Format::None)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Regex { pattern } => write!(f, "regex `{}`", pattern),
            Format::None => f.write_str("none"),
        }
    }
}
