//! Data Transfer Objects
//!
//! Request and response DTOs for the NAICS API layer.

use chrono::{DateTime, Utc};
use naics_core::{CodeFilter, NaicsRecord};
use naics_store::CacheEnvelope;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

// ============================================
// Service DTOs
// ============================================

/// Root greeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,
    /// Service version
    pub version: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Whether a cache file exists
    pub data_processed: bool,
}

// ============================================
// Code DTOs
// ============================================

/// Query parameters for `GET /naics/codes`.
///
/// Values stay raw so malformed input is reported as an [`ApiError`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCodesQuery {
    pub defense_only: Option<String>,
    pub sector: Option<String>,
    pub min_cross_refs: Option<String>,
}

impl TryFrom<ListCodesQuery> for CodeFilter {
    type Error = ApiError;

    fn try_from(query: ListCodesQuery) -> ApiResult<Self> {
        let min_cross_refs = match query.min_cross_refs.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(raw) => raw.parse().map_err(|_| {
                ApiError::validation(format!(
                    "min_cross_refs must be a non-negative integer, got '{}'",
                    raw
                ))
            })?,
        };

        Ok(CodeFilter {
            defense_only: parse_flag("defense_only", query.defense_only.as_deref())?,
            sector: query.sector,
            min_cross_refs,
        })
    }
}

/// Parse an optional boolean query flag; absent means false
pub fn parse_flag(name: &str, raw: Option<&str>) -> ApiResult<bool> {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("0") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some(other) => Err(ApiError::validation(format!(
            "{} must be true or false, got '{}'",
            name, other
        ))),
    }
}

/// Filtered code list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeListResponse {
    pub codes: Vec<NaicsRecord>,
    pub count: usize,
}

// ============================================
// Data DTOs
// ============================================

/// Query parameters for `GET /naics/data`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataQuery {
    pub force_refresh: Option<String>,
}

impl DataQuery {
    pub fn force_refresh(&self) -> ApiResult<bool> {
        parse_flag("force_refresh", self.force_refresh.as_deref())
    }
}

/// Full cache envelope wrapped in a status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaicsDataResponse {
    pub success: bool,
    pub message: String,
    pub data: CacheEnvelope,
}

/// Summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_codes: usize,
    pub defense_count: usize,
    pub high_defense_count: usize,
    pub codes_with_cross_refs: usize,
    pub avg_cross_refs: f64,
    pub sector_count: usize,
    pub total_relationships: usize,
    pub processed_at: DateTime<Utc>,
    /// Cache build time, epoch seconds
    pub cache_timestamp: f64,
    /// Cache expiry, epoch seconds
    pub cache_expires_at: f64,
}

impl From<&CacheEnvelope> for StatsResponse {
    fn from(envelope: &CacheEnvelope) -> Self {
        let lookups = &envelope.lookups;
        Self {
            total_codes: lookups.metadata.total_codes,
            defense_count: lookups.metadata.defense_count,
            high_defense_count: lookups.indexes.high_defense_codes.len(),
            codes_with_cross_refs: lookups.indexes.codes_with_cross_refs.len(),
            avg_cross_refs: lookups.metadata.avg_cross_refs,
            sector_count: lookups.metadata.sectors.len(),
            total_relationships: lookups
                .relationship_analysis
                .network_stats
                .total_relationships,
            processed_at: lookups.metadata.processed_at,
            cache_timestamp: envelope.timestamp,
            cache_expires_at: envelope.expires_at,
        }
    }
}

// ============================================
// Search DTOs
// ============================================

/// Query parameters for `POST /search-naics`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: Option<String>,
}
