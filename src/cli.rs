use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::schema::SettingField;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Decode a settings schema into the field types a settings form renders
#[derive(Parser, Debug, Clone)]
#[command(name = "settings-schema", version, about, long_about = None)]
pub struct Cli {
    /// Schema file (json, yaml, toml) or a directory of schema files
    pub schema: PathBuf,

    /// Path to the configuration file
    #[arg(short, long, env = "SETTINGS_SCHEMA_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Maximum nesting depth of set/select descriptors
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Do not warn about type ids that fall back to raw fields
    #[arg(long)]
    pub quiet_unknown: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,

    /// Include secret settings in the output
    #[arg(long)]
    pub include_secrets: bool,

    /// Skip entries that fail to decode instead of aborting
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per field
    Summary,
    /// Decoded fields as pretty-printed JSON
    Json,
}

/// Drop secret fields unless they were asked for
pub fn visible_fields(fields: Vec<SettingField>, include_secrets: bool) -> Vec<SettingField> {
    fields
        .into_iter()
        .filter(|field| include_secrets || !field.secret)
        .collect()
}

/// Render decoded fields for printing
pub fn render(fields: &[SettingField], output: OutputFormat) -> Result<String, serde_json::Error> {
    match output {
        OutputFormat::Json => serde_json::to_string_pretty(fields),
        OutputFormat::Summary => Ok(fields
            .iter()
            .map(|field| {
                let mut line = format!("{}: {}", field.key, field.field_type);
                if field.secret {
                    line.push_str(" [secret]");
                }
                if let Some(feature) = &field.feature {
                    line.push_str(&format!(" [feature: {}]", feature));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
