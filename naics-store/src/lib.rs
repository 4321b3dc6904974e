//! NAICS Store - Acquisition and Cache
//!
//! Downloads the vendor files into a data directory, runs the core
//! load/merge/generate pipeline on a blocking worker and keeps the result in
//! a JSON cache envelope that stays valid for seven days.
//!
//! # Usage Example
//!
//! ```ignore
//! use naics_store::{NaicsProcessor, StoreConfig};
//!
//! let processor = NaicsProcessor::new(StoreConfig::from_env())?;
//! let envelope = processor.get_data(false).await?;
//! println!("{} codes", envelope.lookups.metadata.total_codes);
//! ```

pub mod cache;
pub mod config;
pub mod download;
pub mod error;
pub mod processor;
pub mod sources;

pub use cache::{
    epoch_seconds, is_fresh, is_fresh_within, CacheEnvelope, CacheStore, CACHE_FILE_NAME,
    CACHE_TTL_SECS,
};
pub use config::StoreConfig;
pub use download::{download_missing, HttpFetcher, SourceFetcher};
pub use error::{StoreError, StoreResult};
pub use processor::NaicsProcessor;
pub use sources::{SourceCatalog, SourceKind, SourceSpec};
