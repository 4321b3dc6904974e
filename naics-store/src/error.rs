//! NAICS Store Error Types

use naics_core::CoreError;
use std::collections::BTreeMap;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// At least one upstream file could not be downloaded
    #[error("Failed to download NAICS data files: {}", failed_sources(.status))]
    DownloadFailed { status: BTreeMap<String, bool> },

    /// HTTP transfer failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Loading or merging the source files failed
    #[error("Processing failed: {0}")]
    Core(#[from] CoreError),

    /// Cache file could not be parsed
    #[error("Corrupt cache file: {0}")]
    CorruptCache(String),

    /// Blocking worker failed
    #[error("Worker task failed: {0}")]
    Task(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

fn failed_sources(status: &BTreeMap<String, bool>) -> String {
    let failed: Vec<&str> = status
        .iter()
        .filter(|(_, ok)| !**ok)
        .map(|(key, _)| key.as_str())
        .collect();
    failed.join(", ")
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Http(e.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(e: tokio::task::JoinError) -> Self {
        StoreError::Task(e.to_string())
    }
}
