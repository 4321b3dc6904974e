//! Command Handler
//!
//! Dispatches parsed commands to the store and the API server.

use crate::commands::{Cli, Commands, ExportFormat, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output;
use naics_api::{ApiConfig, AppState, AuthConfig};
use naics_store::{epoch_seconds, NaicsProcessor, StoreConfig};
use std::path::{Path, PathBuf};

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> CliResult<()> {
    let processor = create_processor(&cli.data_dir)?;

    match cli.command {
        Commands::Serve { host, port } => handle_serve(processor, host, port).await,
        Commands::Build { force } => handle_build(&processor, force, cli.format).await,
        Commands::Status => handle_status(&processor, cli.format).await,
        Commands::Export { format, output } => handle_export(&processor, format, output).await,
    }
}

/// Store settings come from the environment; the data directory flag wins.
fn create_processor(data_dir: &Path) -> CliResult<NaicsProcessor> {
    let config = StoreConfig {
        data_dir: data_dir.to_path_buf(),
        ..StoreConfig::from_env()
    };
    Ok(NaicsProcessor::new(config)?)
}

/// Handle serve command
async fn handle_serve(processor: NaicsProcessor, host: String, port: u16) -> CliResult<()> {
    let config = ApiConfig {
        host,
        port,
        ..ApiConfig::from_env()
    };
    let auth = AuthConfig::from_env();

    println!("Starting NAICS API server...");
    println!("  Listen:   {}", config.bind_address());
    println!("  Data dir: {}", processor.config().data_dir.display());
    println!("  Auth:     {}", if auth.enabled { "bearer token" } else { "disabled" });

    let state = AppState::with_config(config, processor).with_auth(auth);
    naics_api::run_server(state)
        .await
        .map_err(|e| CliError::server(e.to_string()))
}

/// Handle build command
async fn handle_build(processor: &NaicsProcessor, force: bool, format: OutputFormat) -> CliResult<()> {
    tracing::debug!(force, data_dir = %processor.config().data_dir.display(), "Building NAICS cache");
    let envelope = processor.get_data(force).await?;
    output::print_build_summary(&envelope, format);
    Ok(())
}

/// Handle status command
async fn handle_status(processor: &NaicsProcessor, format: OutputFormat) -> CliResult<()> {
    let envelope = processor.load_cached().await?.ok_or(CliError::NotProcessed)?;
    let fresh = envelope.is_fresh_at(epoch_seconds(), processor.cache().ttl_secs());
    output::print_status(&envelope, fresh, format);
    Ok(())
}

/// Handle export command
async fn handle_export(
    processor: &NaicsProcessor,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let envelope = processor.load_cached().await?.ok_or(CliError::NotProcessed)?;
    let rendered = render_export(&envelope.lookups, format)?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;
            eprintln!(
                "Exported {} codes to {}",
                envelope.lookups.naics.len(),
                path.display()
            );
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn render_export(lookups: &naics_core::NaicsLookups, format: ExportFormat) -> CliResult<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(lookups)?),
        ExportFormat::Csv => Ok(naics_core::to_csv(lookups)?),
    }
}
