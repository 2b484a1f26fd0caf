use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::cli::Cli;
use crate::decoder::{DecodeOptions, DEFAULT_MAX_DEPTH};

/// Config file looked up when none is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "settings-schema.toml";

/// Prefix for environment overrides, e.g. `SETTINGS_SCHEMA_DECODER__MAX_DEPTH=4`
pub const ENV_PREFIX: &str = "SETTINGS_SCHEMA";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub decoder: DecoderSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DecoderSettings {
    /// Maximum nesting of `value` descriptors below a schema entry
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Log a warning for tags that fall back to raw fields
    #[serde(default = "default_warn_on_unknown")]
    pub warn_on_unknown: bool,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            warn_on_unknown: default_warn_on_unknown(),
        }
    }
}

impl DecoderSettings {
    pub fn options(&self) -> DecodeOptions {
        DecodeOptions {
            max_depth: self.max_depth,
            warn_on_unknown: self.warn_on_unknown,
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_warn_on_unknown() -> bool {
    true
}

impl Settings {
    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an optional config file plus environment overrides
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let settings = Self::load(path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .set_default("decoder.max_depth", DEFAULT_MAX_DEPTH as i64)?
            .set_default("decoder.warn_on_unknown", true)?
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        tracing::debug!(config = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(max_depth) = cli.max_depth {
            self.decoder.max_depth = max_depth;
        }
        if cli.quiet_unknown {
            self.decoder.warn_on_unknown = false;
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}
