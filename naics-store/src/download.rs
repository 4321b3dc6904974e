//! Upstream Downloader
//!
//! Fetches catalog files that are not yet in the data directory. Files
//! already on disk are never fetched again. There are no retries; each
//! source reports a plain success flag.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::sources::SourceCatalog;

/// Transport for upstream files
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch the full body at `url`
    async fn fetch(&self, url: &str) -> StoreResult<Vec<u8>>;
}

/// HTTP GET fetcher with a per-request timeout
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout_secs`
    pub fn new(timeout_secs: u64) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Configuration(format!("HTTP client error: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> StoreResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }
}

/// Download every catalog file missing from `data_dir`.
///
/// Returns one flag per source key; a file that was already present counts
/// as a success.
pub async fn download_missing(
    fetcher: &dyn SourceFetcher,
    catalog: &SourceCatalog,
    data_dir: &Path,
) -> StoreResult<BTreeMap<String, bool>> {
    fs::create_dir_all(data_dir).await?;

    let mut status = BTreeMap::new();

    for spec in catalog.sources() {
        let path = data_dir.join(&spec.file_name);

        if path.exists() {
            info!("{} already exists, skipping download", spec.file_name);
            status.insert(spec.kind.key().to_string(), true);
            continue;
        }

        info!("Downloading {} from {}", spec.file_name, spec.url);
        let ok = match fetcher.fetch(&spec.url).await {
            Ok(body) => match fs::write(&path, &body).await {
                Ok(()) => {
                    info!("Downloaded {} ({} bytes)", spec.file_name, body.len());
                    true
                }
                Err(e) => {
                    warn!("Failed to write {:?}: {}", path, e);
                    false
                }
            },
            Err(e) => {
                warn!("Failed to download {}: {}", spec.file_name, e);
                false
            }
        };

        status.insert(spec.kind.key().to_string(), ok);
    }

    Ok(status)
}
