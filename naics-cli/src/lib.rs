//! NAICS CLI - Command Line Interface
//!
//! Builds the NAICS lookup cache and serves it over HTTP.
//!
//! # Usage
//!
//! ```text
//! naics [OPTIONS] <COMMAND>
//!
//! Commands:
//!   serve   Start the API server
//!   build   Download missing sources and build the cache
//!   status  Show cache status
//!   export  Export the cached payload
//!
//! Options:
//!   -d, --data-dir <DIR>   Data directory [env: NAICS_DATA_DIR] [default: ./data]
//!   -f, --format <FORMAT>  Output format (json, plain) [default: plain]
//!   -v, --verbose          Enable verbose output
//!   -h, --help             Print help
//!   -V, --version          Print version
//! ```
//!
//! # Examples
//!
//! ```text
//! naics build --force
//! naics export --format csv -o naics.csv
//! naics serve --port 8080
//! ```

pub mod commands;
pub mod error;
pub mod handler;
pub mod output;

pub use commands::{Cli, Commands, ExportFormat, OutputFormat};
pub use error::{CliError, CliResult};
