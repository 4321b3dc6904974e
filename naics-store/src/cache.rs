//! Lookup Cache
//!
//! A single JSON envelope in the data directory. Freshness is a pure
//! function of the envelope timestamp; nothing is locked, concurrent
//! writers race and the last one wins.

use chrono::Utc;
use naics_core::NaicsLookups;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Cache file name inside the data directory
pub const CACHE_FILE_NAME: &str = "naics_lookups.json";

/// Cache lifetime: seven days
pub const CACHE_TTL_SECS: u64 = 604_800;

/// Persisted build output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    pub lookups: NaicsLookups,
    /// Source key to download success
    pub download_status: BTreeMap<String, bool>,
    /// Build time, epoch seconds
    pub timestamp: f64,
    /// `timestamp` plus the cache lifetime
    pub expires_at: f64,
}

impl CacheEnvelope {
    /// Wrap a freshly built payload, stamped now
    pub fn new(lookups: NaicsLookups, download_status: BTreeMap<String, bool>, ttl_secs: u64) -> Self {
        let timestamp = epoch_seconds();
        Self {
            lookups,
            download_status,
            timestamp,
            expires_at: timestamp + ttl_secs as f64,
        }
    }

    /// Whether the envelope is still fresh at `now`
    pub fn is_fresh_at(&self, now: f64, ttl_secs: u64) -> bool {
        is_fresh_within(self.timestamp, now, ttl_secs)
    }
}

/// Current time as fractional epoch seconds
pub fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Fresh while `now - timestamp` has not passed the seven day lifetime
pub fn is_fresh(timestamp: f64, now: f64) -> bool {
    is_fresh_within(timestamp, now, CACHE_TTL_SECS)
}

/// Fresh while `now - timestamp <= ttl_secs`
pub fn is_fresh_within(timestamp: f64, now: f64, ttl_secs: u64) -> bool {
    now - timestamp <= ttl_secs as f64
}

/// File-backed envelope store
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
    ttl_secs: u64,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        Self {
            path: path.into(),
            ttl_secs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Fresh envelope, if any.
    ///
    /// A missing, unreadable, malformed or expired file is a miss.
    pub async fn load_valid(&self) -> Option<CacheEnvelope> {
        if !self.exists() {
            debug!("No cache file at {:?}", self.path);
            return None;
        }

        let envelope = match self.read().await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Ignoring unusable cache file {:?}: {}", self.path, e);
                return None;
            }
        };

        if !envelope.is_fresh_at(epoch_seconds(), self.ttl_secs) {
            info!("Cache has expired, reprocessing");
            return None;
        }

        debug!("Returning valid data from cache");
        Some(envelope)
    }

    /// Envelope regardless of age. `None` when no cache file exists, an
    /// error when it cannot be parsed.
    pub async fn load_existing(&self) -> StoreResult<Option<CacheEnvelope>> {
        if !self.exists() {
            return Ok(None);
        }
        self.read().await.map(Some)
    }

    /// Persist an envelope. Failures are logged and reported as `false`.
    pub async fn store(&self, envelope: &CacheEnvelope) -> bool {
        match self.write(envelope).await {
            Ok(()) => {
                info!("Wrote cache file {:?}", self.path);
                true
            }
            Err(e) => {
                warn!("Failed to write cache file {:?}: {}", self.path, e);
                false
            }
        }
    }

    async fn read(&self) -> StoreResult<CacheEnvelope> {
        let json = fs::read_to_string(&self.path).await?;
        serde_json::from_str(&json).map_err(|e| StoreError::CorruptCache(e.to_string()))
    }

    async fn write(&self, envelope: &CacheEnvelope) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(envelope)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use naics_core::generate_lookups;
    use tempfile::TempDir;

    fn envelope() -> CacheEnvelope {
        let mut status = BTreeMap::new();
        status.insert("descriptions".to_string(), true);
        CacheEnvelope::new(generate_lookups(Vec::new(), Utc::now()), status, CACHE_TTL_SECS)
    }

    #[test]
    fn test_freshness_boundary() {
        let t = 1_700_000_000.0;
        assert!(is_fresh(t, t));
        assert!(is_fresh(t, t + 604_799.0));
        assert!(is_fresh(t, t + 604_800.0));
        assert!(!is_fresh(t, t + 604_801.0));
    }

    #[test]
    fn test_expires_at_offset() {
        let env = envelope();
        assert!((env.expires_at - env.timestamp - CACHE_TTL_SECS as f64).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::new(dir.path().join(CACHE_FILE_NAME), CACHE_TTL_SECS);
        let env = envelope();

        assert!(cache.store(&env).await);
        let loaded = cache.load_valid().await.unwrap();
        assert_eq!(loaded.download_status, env.download_status);
        assert_eq!(loaded.lookups.metadata.total_codes, 0);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::new(dir.path().join(CACHE_FILE_NAME), CACHE_TTL_SECS);
        assert!(cache.load_valid().await.is_none());
        assert!(cache.load_existing().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_is_miss_but_still_readable() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::new(dir.path().join(CACHE_FILE_NAME), CACHE_TTL_SECS);
        let mut env = envelope();
        env.timestamp -= (CACHE_TTL_SECS + 10) as f64;
        env.expires_at -= (CACHE_TTL_SECS + 10) as f64;
        assert!(cache.store(&env).await);

        assert!(cache.load_valid().await.is_none());
        assert!(cache.load_existing().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let cache = CacheStore::new(&path, CACHE_TTL_SECS);

        assert!(cache.load_valid().await.is_none());
        assert!(matches!(
            cache.load_existing().await,
            Err(StoreError::CorruptCache(_))
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        // The cache path is an existing directory, so the write fails
        let cache = CacheStore::new(dir.path(), CACHE_TTL_SECS);
        assert!(!cache.store(&envelope()).await);
    }
}
