//! # settings-schema
//!
//! Decodes the type descriptors of a backend settings schema into the field
//! types a settings form renders.
//!
//! ## Features
//!
//! - **Closed field types**: oauth2-config, duration, bool, string, text,
//!   number, percentage, set, select, and a raw fallback
//! - **Forward compatible**: unknown type ids decode to raw fields instead of failing
//! - **Schema documents**: JSON, YAML and TOML files, single or merged from a directory
//! - **Bounded**: nested descriptors are limited to a configurable depth
//!
//! ## Quick Start
//!
//! ```rust
//! use settings_schema::decoder::Decoder;
//! use settings_schema::domain::FieldType;
//! use serde_json::json;
//!
//! let decoder = Decoder::default();
//! let field = decoder
//!     .decode_value(&json!({ "id": "bool", "optional": true }))
//!     .unwrap();
//!
//! assert_eq!(field, FieldType::Boolean { optional: true });
//! ```
//!
//! ## Layout
//!
//! - **Domain**: descriptors, field types, formats
//! - **Decoder**: tag dispatch from descriptor to field type
//! - **Schema**: schema documents and bulk decoding
//! - **Config**: layered decoder settings

pub mod cli;
pub mod config;
pub mod decoder;
pub mod domain;
pub mod schema;

pub use decoder::{decode, DecodeError, DecodeOptions, Decoder};
pub use domain::{FieldType, Format, PropertyPath, TypeDescriptor};
pub use schema::{SchemaDocument, SchemaError, SettingField};
