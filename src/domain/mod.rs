//! Core types: descriptors coming in, field types going out

pub mod descriptor;
pub mod field_type;
pub mod format;
pub mod path;

pub use descriptor::TypeDescriptor;
pub use field_type::FieldType;
pub use format::Format;
pub use path::PropertyPath;
