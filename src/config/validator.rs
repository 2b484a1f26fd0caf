use thiserror::Error;

use crate::config::{DecoderSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_decoder(&settings.decoder) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_decoder(decoder: &DecoderSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if decoder.max_depth == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "decoder.max_depth".to_string(),
                reason: "Depth limit must be at least 1 so set and select fields can decode".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
