//! Decoded settings field types

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::format::Format;

/// The type of a settings field, as consumed by form rendering.
///
/// Built once by the decoder and never mutated afterwards. Holds no reference
/// to the descriptor it was decoded from.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "id")]
pub enum FieldType {
    #[serde(rename = "oauth2-config")]
    Oauth2Config { optional: bool },
    #[serde(rename = "duration")]
    Duration { optional: bool },
    #[serde(rename = "bool")]
    Boolean { optional: bool },
    #[serde(rename = "string")]
    String {
        optional: bool,
        format: Format,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    #[serde(rename = "text")]
    Text { optional: bool },
    #[serde(rename = "number")]
    Number { optional: bool },
    #[serde(rename = "percentage")]
    Percentage { optional: bool },
    #[serde(rename = "set")]
    Set { optional: bool, value: Box<FieldType> },
    #[serde(rename = "select")]
    Select {
        optional: bool,
        value: Box<FieldType>,
        options: Vec<Value>,
    },
    /// Fallback for any tag without a dedicated field type
    #[serde(rename = "raw")]
    Raw { optional: bool },
}

impl FieldType {
    /// Whether the field may be left unset
    pub fn optional(&self) -> bool {
        match self {
            FieldType::Oauth2Config { optional }
            | FieldType::Duration { optional }
            | FieldType::Boolean { optional }
            | FieldType::String { optional, .. }
            | FieldType::Text { optional }
            | FieldType::Number { optional }
            | FieldType::Percentage { optional }
            | FieldType::Set { optional, .. }
            | FieldType::Select { optional, .. }
            | FieldType::Raw { optional } => *optional,
        }
    }

    /// Canonical discriminant of this field type
    pub fn tag(&self) -> &'static str {
        match self {
            FieldType::Oauth2Config { .. } => "oauth2-config",
            FieldType::Duration { .. } => "duration",
            FieldType::Boolean { .. } => "bool",
            FieldType::String { .. } => "string",
            FieldType::Text { .. } => "text",
            FieldType::Number { .. } => "number",
            FieldType::Percentage { .. } => "percentage",
            FieldType::Set { .. } => "set",
            FieldType::Select { .. } => "select",
            FieldType::Raw { .. } => "raw",
        }
    }

    /// Nested element or option type for containers
    pub fn element(&self) -> Option<&FieldType> {
        match self {
            FieldType::Set { value, .. } | FieldType::Select { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.element().is_some()
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, FieldType::Raw { .. })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String {
                format,
                placeholder,
                ..
            } => {
                f.write_str("string")?;
                if let Format::Regex { pattern } = format {
                    write!(f, " matching `{}`", pattern)?;
                }
                if let Some(placeholder) = placeholder {
                    write!(f, " placeholder {:?}", placeholder)?;
                }
            }
            FieldType::Set { value, .. } => write!(f, "set<{}>", value)?,
            FieldType::Select { value, options, .. } => {
                write!(f, "select<{}> of {} option(s)", value, options.len())?
            }
            other => f.write_str(other.tag())?,
        }

        if self.optional() {
            f.write_str(" (optional)")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_and_tag() {
        let field = FieldType::Percentage { optional: true };
        assert!(field.optional());
        assert_eq!(field.tag(), "percentage");
        assert!(!field.is_container());
    }

    #[test]
    fn test_element() {
        let field = FieldType::Set {
            optional: false,
            value: Box::new(FieldType::Number { optional: false }),
        };
        assert_eq!(field.element(), Some(&FieldType::Number { optional: false }));
        assert!(field.is_container());
    }

    #[test]
    fn test_display() {
        let field = FieldType::Select {
            optional: true,
            value: Box::new(FieldType::String {
                optional: false,
                format: Format::Regex {
                    pattern: "^[a-z]+$".to_string(),
                },
                placeholder: Some("name".to_string()),
            }),
            options: vec![json!("a"), json!("b")],
        };

        assert_eq!(
            field.to_string(),
            "select<string matching `^[a-z]+$` placeholder \"name\"> of 2 option(s) (optional)"
        );
        assert_eq!(FieldType::Raw { optional: false }.to_string(), "raw");
    }

    #[test]
    fn test_serialize_is_tagged_by_id() {
        let field = FieldType::Set {
            optional: true,
            value: Box::new(FieldType::Boolean { optional: false }),
        };

        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({
                "id": "set",
                "optional": true,
                "value": { "id": "bool", "optional": false }
            })
        );
    }
}
