//! Serialized type descriptors as they come out of a backend settings schema

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A type descriptor for a single settings field.
///
/// Only `id` is required. The remaining keys are read depending on the tag:
/// `format` and `placeholder` for `string`, `value` for `set` and `select`,
/// `options` for `select`. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Discriminant selecting the field type
    #[serde(deserialize_with = "deserialize_tag")]
    pub id: String,
    /// Whether the field may be left unset
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub optional: bool,
    /// Format sub-schema for `string`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
    /// Display hint for `string`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Element type for `set`, option value type for `select`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<TypeDescriptor>>,
    /// Selectable values for `select`, passed through untouched
    #[serde(
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub options: Vec<Value>,
}

impl TypeDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_format(mut self, format: Value) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_value(mut self, value: TypeDescriptor) -> Self {
        self.value = Some(Box::new(value));
        self
    }

    pub fn with_options(mut self, options: Vec<Value>) -> Self {
        self.options = options;
        self
    }
}

/// Accept any scalar as a discriminant. Non-string tags match no builder and
/// decode as raw fields.
fn deserialize_tag<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(de::Error::custom("type id must not be null")),
        other => Err(de::Error::custom(format!(
            "type id must be a scalar, got {}",
            other
        ))),
    }
}

/// Treat an explicit `null` like a missing key.
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
