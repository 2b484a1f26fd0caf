//! Error types for descriptor decoding

use thiserror::Error;

use crate::domain::PropertyPath;

/// Errors that can occur while decoding a type descriptor
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Descriptor is null or absent
    #[error("Invalid type descriptor at {path}: {found}")]
    InvalidDescriptor { path: PropertyPath, found: String },

    /// Descriptor nesting is deeper than the configured limit
    #[error("Type descriptor at {path} is nested deeper than {max_depth} levels")]
    DepthExceeded { path: PropertyPath, max_depth: usize },

    /// Input is not shaped like a descriptor
    #[error("Malformed type descriptor at {path}: {source}")]
    Malformed {
        path: PropertyPath,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// Location of the failing descriptor
    pub fn path(&self) -> &PropertyPath {
        match self {
            Self::InvalidDescriptor { path, .. }
            | Self::DepthExceeded { path, .. }
            | Self::Malformed { path, .. } => path,
        }
    }

    pub(crate) fn invalid(path: &PropertyPath) -> Self {
        Self::InvalidDescriptor {
            path: path.clone(),
            found: "null".to_string(),
        }
    }
}

/// Result type alias for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;
