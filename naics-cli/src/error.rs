//! CLI Error Types
//!
//! Error types for the NAICS CLI application.

use naics_core::CoreError;
use naics_store::StoreError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// No cache file yet
    #[error("NAICS data not processed yet; run `naics build` first")]
    NotProcessed,

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Store error
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Core error
    #[error("Core error: {0}")]
    CoreError(#[from] CoreError),

    /// Server error
    #[error("Server error: {message}")]
    ServerError { message: String },
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        CliError::ConfigError {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_arg(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server(message: impl Into<String>) -> Self {
        CliError::ServerError {
            message: message.into(),
        }
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ConfigError { .. } => 1,
            CliError::InvalidArgument { .. } => 2,
            CliError::NotProcessed => 3,
            CliError::IoError(_) => 5,
            CliError::JsonError(_) => 6,
            CliError::StoreError(StoreError::DownloadFailed { .. }) => 7,
            CliError::StoreError(_) => 10,
            CliError::CoreError(_) => 12,
            CliError::ServerError { .. } => 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_config_error() {
        let err = CliError::config("Missing data directory");
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("Missing data directory"));
    }

    #[test]
    fn test_not_processed() {
        let err = CliError::NotProcessed;
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("naics build"));
    }

    #[test]
    fn test_download_failure_exit_code() {
        let err: CliError = StoreError::DownloadFailed {
            status: BTreeMap::new(),
        }
        .into();
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_server_error() {
        let err = CliError::server("address in use");
        assert_eq!(err.exit_code(), 30);
    }
}
