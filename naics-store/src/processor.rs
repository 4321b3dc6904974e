//! Build Pipeline
//!
//! download → load → merge → generate lookups → write cache.

use chrono::Utc;
use naics_core::{generate_lookups, merge_sources, SourceTables};
use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::{CacheEnvelope, CacheStore};
use crate::config::StoreConfig;
use crate::download::{download_missing, HttpFetcher, SourceFetcher};
use crate::error::{StoreError, StoreResult};
use crate::sources::SourceCatalog;

/// Builds the lookup payload and serves it through the cache
#[derive(Clone)]
pub struct NaicsProcessor {
    config: StoreConfig,
    catalog: SourceCatalog,
    fetcher: Arc<dyn SourceFetcher>,
    cache: CacheStore,
}

impl NaicsProcessor {
    /// Processor over the Census 2022 catalog with an HTTP fetcher
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let fetcher = HttpFetcher::new(config.download_timeout_secs)?;
        Ok(Self::with_fetcher(
            config,
            SourceCatalog::census_2022(),
            Arc::new(fetcher),
        ))
    }

    /// Processor with an explicit catalog and transport
    pub fn with_fetcher(
        config: StoreConfig,
        catalog: SourceCatalog,
        fetcher: Arc<dyn SourceFetcher>,
    ) -> Self {
        let cache = CacheStore::new(config.cache_path(), config.cache_ttl_secs);
        Self {
            config,
            catalog,
            fetcher,
            cache,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Run a full build and write the cache.
    ///
    /// Fails without touching the cache when any download failed. A cache
    /// write failure is logged and the envelope is still returned.
    pub async fn process_and_cache(&self) -> StoreResult<CacheEnvelope> {
        let data_dir = self.config.data_dir.clone();

        let download_status =
            download_missing(self.fetcher.as_ref(), &self.catalog, &data_dir).await?;
        if download_status.values().any(|ok| !ok) {
            warn!("Download failed: {:?}", download_status);
            return Err(StoreError::DownloadFailed {
                status: download_status,
            });
        }

        let paths = self.catalog.paths(&data_dir);
        let lookups = tokio::task::spawn_blocking(move || {
            let tables = SourceTables::load(&paths)?;
            let records = merge_sources(&tables);
            Ok::<_, StoreError>(generate_lookups(records, Utc::now()))
        })
        .await??;

        info!(
            total_codes = lookups.metadata.total_codes,
            defense_count = lookups.metadata.defense_count,
            "Processed NAICS data"
        );

        let envelope = CacheEnvelope::new(lookups, download_status, self.config.cache_ttl_secs);
        self.cache.store(&envelope).await;

        Ok(envelope)
    }

    /// Cached envelope when fresh, otherwise a new build
    pub async fn get_data(&self, force_refresh: bool) -> StoreResult<CacheEnvelope> {
        if !force_refresh {
            if let Some(envelope) = self.cache.load_valid().await {
                return Ok(envelope);
            }
        }
        self.process_and_cache().await
    }

    /// Whatever the cache holds, without building or checking age
    pub async fn load_cached(&self) -> StoreResult<Option<CacheEnvelope>> {
        self.cache.load_existing().await
    }
}
