//! CLI Commands
//!
//! Command definitions for the NAICS CLI.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// NAICS reference service CLI
#[derive(Parser, Debug)]
#[command(name = "naics")]
#[command(version)]
#[command(about = "NAICS reference data builder and API server")]
#[command(long_about = "Downloads the Census 2022 NAICS workbooks and the SBA size \
    standards, merges them into a cached lookup payload and serves it over HTTP.")]
pub struct Cli {
    /// Directory for downloaded files and the cache (env: NAICS_DATA_DIR)
    #[arg(short, long, env = "NAICS_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Output format (json, plain)
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text
    #[default]
    Plain,
}

/// Export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Full lookup payload
    Json,
    /// One row per code
    Csv,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to (env: NAICS_BIND_ADDR)
        #[arg(short = 'H', long, env = "NAICS_BIND_ADDR", default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on (env: NAICS_PORT)
        #[arg(short, long, env = "NAICS_PORT", default_value = "8000")]
        port: u16,
    },

    /// Download missing sources and build the cache
    Build {
        /// Rebuild even when the cache is fresh
        #[arg(long)]
        force: bool,
    },

    /// Show cache status
    Status,

    /// Export the cached payload
    Export {
        /// Export format
        #[arg(long, default_value = "json")]
        format: ExportFormat,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_help() {
        let result = Cli::try_parse_from(["naics", "--help"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_build_force() {
        let cli = Cli::try_parse_from(["naics", "--data-dir", "/tmp/naics", "build", "--force"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/naics"));
        assert!(matches!(cli.command, Commands::Build { force: true }));
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from(["naics", "export", "--format", "csv", "-o", "out.csv"]).unwrap();
        match cli.command {
            Commands::Export { format, output } => {
                assert_eq!(format, ExportFormat::Csv);
                assert_eq!(output, Some(PathBuf::from("out.csv")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }
}
