//! Settings schema documents.
//!
//! A schema document maps setting keys to their documentation and type
//! descriptor:
//!
//! ```yaml
//! types:
//!   irc/channel:
//!     doc: Channel to join.
//!     type:
//!       id: string
//!       placeholder: "#channel"
//!   song/max-duration:
//!     doc: Longest song that may be requested.
//!     type:
//!       id: duration
//!       optional: true
//! ```
//!
//! Documents load from JSON, YAML or TOML, either one file at a time or a
//! whole directory merged together.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::decoder::{DecodeError, Decoder};
use crate::domain::{FieldType, PropertyPath, TypeDescriptor};

/// Errors that can occur while loading a schema document
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid schema directory pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Unsupported schema file: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Serialization format of a schema file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
    Toml,
}

impl SchemaFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(SchemaFormat::Json),
            "yaml" | "yml" => Some(SchemaFormat::Yaml),
            "toml" => Some(SchemaFormat::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Documentation and type of a single setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    #[serde(default)]
    pub doc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Secret settings are hidden from listings unless explicitly requested
    #[serde(default)]
    pub secret: bool,
    /// Feature that must be enabled for the setting to apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    /// Type descriptor; `null` or missing is an invalid descriptor
    #[serde(rename = "type", default)]
    pub ty: Option<TypeDescriptor>,
}

/// A decoded setting, ready for form rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingField {
    pub key: String,
    pub doc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub secret: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    pub field_type: FieldType,
}

impl SettingField {
    /// Key prefix the setting is grouped under, e.g. `irc` for `irc/channel`
    pub fn group(&self) -> Option<&str> {
        self.key.rsplit_once('/').map(|(group, _)| group)
    }
}

/// Settings schema keyed by setting name. Iteration is in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub types: BTreeMap<String, SchemaEntry>,
}

impl SchemaDocument {
    /// Parse a document from text in the given format
    pub fn parse(content: &str, format: SchemaFormat) -> Result<Self, SchemaError> {
        let document = match format {
            SchemaFormat::Json => serde_json::from_str(content)?,
            SchemaFormat::Yaml => serde_yaml::from_str(content)?,
            SchemaFormat::Toml => toml::from_str(content)?,
        };
        Ok(document)
    }

    /// Load a single schema file, picking the format from its extension
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let format = SchemaFormat::from_path(path)
            .ok_or_else(|| SchemaError::UnsupportedFormat(path.to_path_buf()))?;

        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, format)
    }

    /// Load and merge every schema file in a directory.
    ///
    /// Files are merged in name order, so later files override keys from
    /// earlier ones. Files with other extensions are skipped.
    pub fn from_dir(path: &Path) -> Result<Self, SchemaError> {
        let pattern = format!("{}/*", glob::Pattern::escape(&path.to_string_lossy()));
        let mut document = SchemaDocument::default();

        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if path.is_file() && SchemaFormat::from_path(&path).is_some() {
                        tracing::debug!(file = %path.display(), "Loading schema file");
                        document.merge(Self::from_path(&path)?);
                    }
                }
                Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
            }
        }

        Ok(document)
    }

    /// Load a schema file or a directory of schema files
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_path(path)
        }
    }

    /// Merge another document into this one. Entries from `other` win.
    pub fn merge(&mut self, other: SchemaDocument) {
        self.types.extend(other.types);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&SchemaEntry> {
        self.types.get(key)
    }

    /// Decode every entry. The first invalid entry aborts the decode.
    pub fn decode(&self, decoder: &Decoder) -> Result<Vec<SettingField>, DecodeError> {
        self.types
            .iter()
            .map(|(key, entry)| Self::decode_entry(decoder, key, entry))
            .collect()
    }

    /// Decode every entry, skipping the ones that fail.
    ///
    /// Returns the decoded fields alongside the errors of skipped entries so
    /// one broken entry does not take the rest of the form down with it.
    pub fn decode_lenient(&self, decoder: &Decoder) -> (Vec<SettingField>, Vec<DecodeError>) {
        let mut fields = Vec::with_capacity(self.types.len());
        let mut errors = Vec::new();

        for (key, entry) in &self.types {
            match Self::decode_entry(decoder, key, entry) {
                Ok(field) => fields.push(field),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Skipping setting that failed to decode");
                    errors.push(e);
                }
            }
        }

        (fields, errors)
    }

    fn decode_entry(
        decoder: &Decoder,
        key: &str,
        entry: &SchemaEntry,
    ) -> Result<SettingField, DecodeError> {
        let path = PropertyPath::root().push_property(key);
        let field_type = decoder.decode_at(entry.ty.as_ref(), &path, 0)?;
        tracing::debug!(key = %key, field_type = %field_type, "Decoded setting");

        Ok(SettingField {
            key: key.to_string(),
            doc: entry.doc.clone(),
            title: entry.title.clone(),
            secret: entry.secret,
            feature: entry.feature.clone(),
            field_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Format;
    use serde_json::json;

    const YAML: &str = r##"
types:
  irc/channel:
    doc: Channel to join.
    type:
      id: string
      placeholder: "#channel"
      format:
        type: regex
        pattern: "^#"
  irc/token:
    doc: OAuth token.
    secret: true
    type:
      id: oauth2-config
  song/volume:
    doc: Player volume.
    feature: song
    type:
      id: percentage
      optional: true
"##;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SchemaFormat::from_extension("yml"), Some(SchemaFormat::Yaml));
        assert_eq!(SchemaFormat::from_extension("toml"), Some(SchemaFormat::Toml));
        assert_eq!(SchemaFormat::from_extension("ini"), None);
        assert_eq!(
            SchemaFormat::from_path(Path::new("schema/base.json")),
            Some(SchemaFormat::Json)
        );
    }

    #[test]
    fn test_decode_yaml_document() {
        let document = SchemaDocument::parse(YAML, SchemaFormat::Yaml).unwrap();
        let fields = document.decode(&Decoder::default()).unwrap();

        let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["irc/channel", "irc/token", "song/volume"]);

        assert_eq!(
            fields[0].field_type,
            FieldType::String {
                optional: false,
                format: Format::Regex {
                    pattern: "^#".to_string()
                },
                placeholder: Some("#channel".to_string()),
            }
        );
        assert!(fields[1].secret);
        assert_eq!(fields[2].feature.as_deref(), Some("song"));
        assert_eq!(fields[2].group(), Some("song"));
    }

    #[test]
    fn test_null_type_fails_with_key_in_path() {
        let document: SchemaDocument = serde_json::from_value(json!({
            "types": {
                "a/ok": { "type": { "id": "bool" } },
                "b/broken": { "doc": "no type", "type": null }
            }
        }))
        .unwrap();

        let err = document.decode(&Decoder::default()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidDescriptor { .. }));
        assert_eq!(err.path().to_string(), "b/broken");
    }

    #[test]
    fn test_decode_lenient_skips_broken_entries() {
        let document: SchemaDocument = serde_json::from_value(json!({
            "types": {
                "a/ok": { "type": { "id": "bool" } },
                "b/broken": { "type": { "id": "set" } },
                "c/ok": { "type": { "id": "text" } }
            }
        }))
        .unwrap();

        let (fields, errors) = document.decode_lenient(&Decoder::default());
        assert_eq!(fields.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path().to_string(), "b/broken.value");
    }

    #[test]
    fn test_merge_overrides() {
        let mut base: SchemaDocument = serde_json::from_value(json!({
            "types": {
                "a": { "doc": "old", "type": { "id": "bool" } },
                "b": { "type": { "id": "text" } }
            }
        }))
        .unwrap();
        let other: SchemaDocument = serde_json::from_value(json!({
            "types": { "a": { "doc": "new", "type": { "id": "number" } } }
        }))
        .unwrap();

        base.merge(other);

        assert_eq!(base.len(), 2);
        assert_eq!(base.get("a").unwrap().doc, "new");
    }

    #[test]
    fn test_group_without_prefix() {
        let field = SettingField {
            key: "standalone".to_string(),
            doc: String::new(),
            title: None,
            secret: false,
            feature: None,
            field_type: FieldType::Text { optional: false },
        };
        assert_eq!(field.group(), None);
    }
}
