//! API Handlers
//!
//! Stateless readers over the cached payload. Every handler re-reads the
//! cache file; only `/naics/data` may trigger a build.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use naics_core::{
    relationships, search, to_csv, CodeFilter, NaicsRecord, RelationshipAnalysis, Relationships,
    SearchResults,
};
use naics_store::CacheEnvelope;
use std::sync::Arc;

use crate::dto::*;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Attachment name of the CSV export
pub const CSV_EXPORT_FILENAME: &str = "comprehensive_naics_data.csv";

/// Cache envelope, or 404 when nothing has been built
async fn load_envelope(state: &AppState) -> ApiResult<CacheEnvelope> {
    state
        .processor
        .load_cached()
        .await?
        .ok_or(ApiError::NotProcessed)
}

// ============================================
// Health & Status
// ============================================

/// Root greeting
pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "NAICS Reference Service".to_string(),
        version: state.config.version.clone(),
    })
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.config.version.clone(),
        uptime_secs: state.uptime_secs(),
        data_processed: state.processor.cache().exists(),
    })
}

/// Summary statistics of the cached payload
pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsResponse>> {
    let envelope = load_envelope(&state).await?;
    Ok(Json(StatsResponse::from(&envelope)))
}

// ============================================
// Codes
// ============================================

/// List codes, AND-combining the optional filters
pub async fn list_codes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCodesQuery>,
) -> ApiResult<Json<CodeListResponse>> {
    let envelope = load_envelope(&state).await?;
    let filter = CodeFilter::try_from(query)?;

    let codes: Vec<NaicsRecord> = filter
        .apply(&envelope.lookups)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(CodeListResponse {
        count: codes.len(),
        codes,
    }))
}

/// Get one code
pub async fn get_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<NaicsRecord>> {
    let envelope = load_envelope(&state).await?;
    envelope
        .lookups
        .find(&code)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("NAICS code", code))
}

/// Full payload, building it on a miss, on expiry or when forced
pub async fn get_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DataQuery>,
) -> ApiResult<Json<NaicsDataResponse>> {
    let force_refresh = query.force_refresh()?;
    let envelope = state.processor.get_data(force_refresh).await?;
    Ok(Json(NaicsDataResponse {
        success: true,
        message: "NAICS data retrieved".to_string(),
        data: envelope,
    }))
}

// ============================================
// Relationships
// ============================================

/// Cross-references of one code with descriptions
pub async fn get_relationships(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<Relationships>> {
    let envelope = load_envelope(&state).await?;
    Ok(Json(relationships(&envelope.lookups, &code)))
}

/// Cross-reference network analysis
pub async fn get_network_analysis(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RelationshipAnalysis>> {
    let envelope = load_envelope(&state).await?;
    if envelope.lookups.metadata.total_codes == 0 {
        return Err(ApiError::not_found("Relationship analysis", "network"));
    }
    Ok(Json(envelope.lookups.relationship_analysis))
}

/// Keyword search over descriptions
pub async fn search_codes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResults>> {
    let envelope = load_envelope(&state).await?;
    let term = query
        .term
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Search term must not be empty"))?;

    Ok(Json(search(&envelope.lookups, &term)))
}

// ============================================
// Export
// ============================================

/// Export the payload as JSON or as a flat CSV attachment
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Path(format): Path<String>,
) -> ApiResult<Response> {
    let envelope = load_envelope(&state).await?;

    let format = format.to_lowercase();
    if format != "json" && format != "csv" {
        return Err(ApiError::validation("Format must be 'json' or 'csv'"));
    }

    if format == "json" {
        return Ok(Json(envelope.lookups).into_response());
    }

    let body = to_csv(&envelope.lookups)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", CSV_EXPORT_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}
