use clap::Parser;
use settings_schema::cli::{render, visible_fields, Cli, DEFAULT_LOG_FILTER};
use settings_schema::config::Settings;
use settings_schema::decoder::Decoder;
use settings_schema::schema::SchemaDocument;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the decoded output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = Settings::new_with_cli(&cli)?;
    let decoder = Decoder::new(settings.decoder.options());

    let document = SchemaDocument::load(&cli.schema)?;
    info!("Loaded {} settings from {}", document.len(), cli.schema.display());

    let fields = if cli.lenient {
        let (fields, errors) = document.decode_lenient(&decoder);
        if !errors.is_empty() {
            warn!("{} settings could not be decoded", errors.len());
        }
        fields
    } else {
        document.decode(&decoder)?
    };

    let fields = visible_fields(fields, cli.include_secrets);
    println!("{}", render(&fields, cli.output)?);

    Ok(())
}
