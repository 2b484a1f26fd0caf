//! Type descriptor decoding
//!
//! Turns a [`TypeDescriptor`] from a backend settings schema into a
//! [`FieldType`]. Dispatch is a lookup on the descriptor's `id` through a
//! static builder table. Any tag missing from the table decodes to
//! [`FieldType::Raw`], so schemas can introduce new tags before the form
//! knows how to render them.
//!
//! ```
//! use settings_schema::decoder::decode;
//! use settings_schema::domain::{FieldType, TypeDescriptor};
//!
//! let descriptor = TypeDescriptor::new("set")
//!     .with_optional(true)
//!     .with_value(TypeDescriptor::new("number"));
//!
//! let field = decode(Some(&descriptor)).unwrap();
//! assert_eq!(field.element(), Some(&FieldType::Number { optional: false }));
//! ```

pub mod error;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{FieldType, Format, PropertyPath, TypeDescriptor};

pub use error::{DecodeError, DecodeResult};

/// Default limit on descriptor nesting below the root
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Options controlling a [`Decoder`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting depth of `value` descriptors below the root
    pub max_depth: usize,
    /// Emit a warning event when a tag falls back to a raw field
    pub warn_on_unknown: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            warn_on_unknown: true,
        }
    }
}

type Builder = fn(&Decoder, &TypeDescriptor, &PropertyPath, usize) -> DecodeResult<FieldType>;

static BUILDERS: &[(&str, Builder)] = &[
    ("oauth2-config", build_oauth2_config),
    ("duration", build_duration),
    ("bool", build_boolean),
    ("string", build_string),
    ("text", build_text),
    ("number", build_number),
    ("percentage", build_percentage),
    ("set", build_set),
    ("select", build_select),
];

/// Tags that decode to a dedicated field type
pub fn known_tags() -> impl Iterator<Item = &'static str> {
    BUILDERS.iter().map(|(tag, _)| *tag)
}

fn builder_for(tag: &str) -> Option<Builder> {
    BUILDERS
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, builder)| *builder)
}

/// Decodes type descriptors into field types.
///
/// Stateless apart from its options. The same descriptor always decodes to an
/// equal [`FieldType`].
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a descriptor.
    ///
    /// `None` stands for a null descriptor and fails with
    /// [`DecodeError::InvalidDescriptor`]. An unrecognized `id` is not an
    /// error and decodes to [`FieldType::Raw`].
    pub fn decode(&self, descriptor: Option<&TypeDescriptor>) -> DecodeResult<FieldType> {
        self.decode_at(descriptor, &PropertyPath::root(), 0)
    }

    /// Decode a descriptor located at `path`, `depth` levels below the root.
    pub fn decode_at(
        &self,
        descriptor: Option<&TypeDescriptor>,
        path: &PropertyPath,
        depth: usize,
    ) -> DecodeResult<FieldType> {
        let descriptor = descriptor.ok_or_else(|| DecodeError::invalid(path))?;

        if depth > self.options.max_depth {
            return Err(DecodeError::DepthExceeded {
                path: path.clone(),
                max_depth: self.options.max_depth,
            });
        }

        match builder_for(&descriptor.id) {
            Some(build) => build(self, descriptor, path, depth),
            None => {
                if self.options.warn_on_unknown {
                    tracing::warn!(
                        id = %descriptor.id,
                        path = %path,
                        "Unrecognized type id, rendering as raw"
                    );
                }
                Ok(FieldType::Raw {
                    optional: descriptor.optional,
                })
            }
        }
    }

    /// Decode an untyped JSON value. JSON `null` is a null descriptor.
    pub fn decode_value(&self, value: &Value) -> DecodeResult<FieldType> {
        let path = PropertyPath::root();

        if value.is_null() {
            return Err(DecodeError::invalid(&path));
        }

        let descriptor = TypeDescriptor::deserialize(value).map_err(|source| {
            DecodeError::Malformed {
                path: path.clone(),
                source,
            }
        })?;

        self.decode_at(Some(&descriptor), &path, 0)
    }

    /// Decode a descriptor from JSON text.
    pub fn decode_str(&self, json: &str) -> DecodeResult<FieldType> {
        let descriptor: Option<TypeDescriptor> =
            serde_json::from_str(json).map_err(|source| DecodeError::Malformed {
                path: PropertyPath::root(),
                source,
            })?;

        self.decode(descriptor.as_ref())
    }

    fn decode_nested(
        &self,
        parent: &TypeDescriptor,
        path: &PropertyPath,
        depth: usize,
    ) -> DecodeResult<Box<FieldType>> {
        let path = path.push_property("value");
        self.decode_at(parent.value.as_deref(), &path, depth + 1)
            .map(Box::new)
    }
}

/// Decode a descriptor with default options.
pub fn decode(descriptor: Option<&TypeDescriptor>) -> DecodeResult<FieldType> {
    Decoder::default().decode(descriptor)
}

// ============================================================================
// Builders
// ============================================================================

fn build_oauth2_config(
    _: &Decoder,
    descriptor: &TypeDescriptor,
    _: &PropertyPath,
    _: usize,
) -> DecodeResult<FieldType> {
    Ok(FieldType::Oauth2Config {
        optional: descriptor.optional,
    })
}

fn build_duration(
    _: &Decoder,
    descriptor: &TypeDescriptor,
    _: &PropertyPath,
    _: usize,
) -> DecodeResult<FieldType> {
    Ok(FieldType::Duration {
        optional: descriptor.optional,
    })
}

fn build_boolean(
    _: &Decoder,
    descriptor: &TypeDescriptor,
    _: &PropertyPath,
    _: usize,
) -> DecodeResult<FieldType> {
    Ok(FieldType::Boolean {
        optional: descriptor.optional,
    })
}

fn build_string(
    _: &Decoder,
    descriptor: &TypeDescriptor,
    _: &PropertyPath,
    _: usize,
) -> DecodeResult<FieldType> {
    Ok(FieldType::String {
        optional: descriptor.optional,
        format: Format::decode(descriptor.format.as_ref()),
        placeholder: descriptor.placeholder.clone(),
    })
}

fn build_text(
    _: &Decoder,
    descriptor: &TypeDescriptor,
    _: &PropertyPath,
    _: usize,
) -> DecodeResult<FieldType> {
    Ok(FieldType::Text {
        optional: descriptor.optional,
    })
}

fn build_number(
    _: &Decoder,
    descriptor: &TypeDescriptor,
    _: &PropertyPath,
    _: usize,
) -> DecodeResult<FieldType> {
    Ok(FieldType::Number {
        optional: descriptor.optional,
    })
}

fn build_percentage(
    _: &Decoder,
    descriptor: &TypeDescriptor,
    _: &PropertyPath,
    _: usize,
) -> DecodeResult<FieldType> {
    Ok(FieldType::Percentage {
        optional: descriptor.optional,
    })
}

fn build_set(
    decoder: &Decoder,
    descriptor: &TypeDescriptor,
    path: &PropertyPath,
    depth: usize,
) -> DecodeResult<FieldType> {
    Ok(FieldType::Set {
        optional: descriptor.optional,
        value: decoder.decode_nested(descriptor, path, depth)?,
    })
}

fn build_select(
    decoder: &Decoder,
    descriptor: &TypeDescriptor,
    path: &PropertyPath,
    depth: usize,
) -> DecodeResult<FieldType> {
    Ok(FieldType::Select {
        optional: descriptor.optional,
        value: decoder.decode_nested(descriptor, path, depth)?,
        options: descriptor.options.clone(),
    })
}

// ============================================================================
// Tests
// ============================================================================
