//! Store Configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cache::{CACHE_FILE_NAME, CACHE_TTL_SECS};

/// Default data directory
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default upstream download timeout
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Where source files and the cache live, and how long the cache lasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding downloaded files and the cache file
    pub data_dir: PathBuf,
    /// Timeout for each upstream GET
    pub download_timeout_secs: u64,
    /// Cache lifetime
    pub cache_ttl_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            download_timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            cache_ttl_secs: CACHE_TTL_SECS,
        }
    }
}

impl StoreConfig {
    /// Config rooted at a data directory, other settings default
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Load from environment variables
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("NAICS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            download_timeout_secs: std::env::var("NAICS_DOWNLOAD_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT_SECS),
            cache_ttl_secs: std::env::var("NAICS_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(CACHE_TTL_SECS),
        }
    }

    /// Path of the lookup cache file
    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join(CACHE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.download_timeout_secs, 30);
        assert_eq!(config.cache_ttl_secs, 604_800);
        assert_eq!(config.cache_path(), PathBuf::from("./data/naics_lookups.json"));
    }

    #[test]
    fn test_with_data_dir() {
        let config = StoreConfig::with_data_dir("/tmp/naics");
        assert_eq!(config.cache_path(), PathBuf::from("/tmp/naics/naics_lookups.json"));
        assert_eq!(config.cache_ttl_secs, CACHE_TTL_SECS);
    }
}
