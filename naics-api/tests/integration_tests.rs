//! Integration tests for NAICS API endpoints
//!
//! Each test builds the payload from CSV fixtures placed in a temporary data
//! directory, so no upstream download happens.

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use naics_api::{build_app, AppState, AuthConfig};
use naics_store::{HttpFetcher, NaicsProcessor, SourceCatalog, SourceKind, SourceSpec, StoreConfig};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;

const DESCRIPTIONS: &str = "\
Code,Title,Description
541511,Custom Computer Programming ServicesT,computer systems design services
541512,Computer Systems Design ServicesT,Planning and designing computer systems
541519,Other Computer Related ServicesT,Computer disaster recovery services
111110,Soybean FarmingT,Growing soybeans
311224,Soybean and Other Oilseed ProcessingT,Crushing oilseeds
";

const CROSS_REFERENCES: &str = "\
Code,Cross-Reference
541511,Computer systems design--are classified in Industry 541512
541512,Custom programming--are classified in Industry 541511
541519,Computer systems design--are classified in Industry 541512
311224,Soybean farming--are classified in Industry 111110
";

fn write_fixtures(dir: &TempDir) -> SourceCatalog {
    std::fs::write(dir.path().join("descriptions.csv"), DESCRIPTIONS).unwrap();
    std::fs::write(dir.path().join("cross_references.csv"), CROSS_REFERENCES).unwrap();

    SourceCatalog::new([
        SourceSpec::new(
            SourceKind::Descriptions,
            "https://fixtures.test/descriptions.csv",
            "descriptions.csv",
        ),
        SourceSpec::new(
            SourceKind::CrossReferences,
            "https://fixtures.test/cross_references.csv",
            "cross_references.csv",
        ),
    ])
}

fn create_processor(dir: &TempDir) -> NaicsProcessor {
    let catalog = write_fixtures(dir);
    NaicsProcessor::with_fetcher(
        StoreConfig::with_data_dir(dir.path()),
        catalog,
        Arc::new(HttpFetcher::new(1).unwrap()),
    )
}

/// Create test server over an already built cache
async fn create_test_server(dir: &TempDir) -> TestServer {
    let processor = create_processor(dir);
    processor.process_and_cache().await.unwrap();
    TestServer::new(build_app(AppState::new(processor))).unwrap()
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn test_health_check() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["data_processed"], true);
}

#[tokio::test]
async fn test_stats() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.get("/stats").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_codes"], 5);
    assert_eq!(body["codes_with_cross_refs"], 4);
    assert!(body["cache_expires_at"].as_f64().unwrap() > body["cache_timestamp"].as_f64().unwrap());
}

// ============ Code Endpoint Tests ============

#[tokio::test]
async fn test_list_codes_by_sector() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.get("/naics/codes").add_query_param("sector", "54").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 3);
    let codes = body["codes"].as_array().unwrap();
    assert!(codes.iter().all(|c| c["sector"] == "54"));
}

#[tokio::test]
async fn test_list_codes_filters_intersect() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server
        .get("/naics/codes")
        .add_query_param("defense_only", "true")
        .add_query_param("sector", "31")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_get_code() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.get("/naics/codes/541511").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["code"], "541511");
    assert_eq!(body["defense_related"], true);
    assert_eq!(body["sector"], "54");
    assert!(body["defense_keyword_count"].as_u64().unwrap() >= 2);
}

#[tokio::test]
async fn test_get_code_not_found() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.get("/naics/codes/999999").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_endpoints_before_processing() {
    let dir = TempDir::new().unwrap();
    let server = TestServer::new(build_app(AppState::new(create_processor(&dir)))).unwrap();

    for path in ["/naics/codes", "/stats", "/network-analysis", "/export/json"] {
        let response = server.get(path).await;
        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["message"], "NAICS data not processed yet");
    }

    // Missing cache wins over malformed input
    server.get("/export/xml").await.assert_status_not_found();
    server
        .post("/search-naics")
        .add_query_param("term", " ")
        .await
        .assert_status_not_found();
    server
        .get("/naics/codes")
        .add_query_param("min_cross_refs", "many")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_list_codes_malformed_filter() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server
        .get("/naics/codes")
        .add_query_param("defense_only", "maybe")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let response = server
        .get("/naics/codes")
        .add_query_param("min_cross_refs", "-1")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ============ Data Endpoint Tests ============

#[tokio::test]
async fn test_get_data_builds_on_miss() {
    let dir = TempDir::new().unwrap();
    let server = TestServer::new(build_app(AppState::new(create_processor(&dir)))).unwrap();

    let response = server.get("/naics/data").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "NAICS data retrieved");
    assert_eq!(body["data"]["lookups"]["metadata"]["total_codes"], 5);
    assert!(dir.path().join("naics_lookups.json").exists());
}

#[tokio::test]
async fn test_get_data_force_refresh() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let first: Value = server.get("/naics/data").await.json();
    let refreshed: Value = server
        .get("/naics/data")
        .add_query_param("force_refresh", "true")
        .await
        .json();

    let before = first["data"]["timestamp"].as_f64().unwrap();
    let after = refreshed["data"]["timestamp"].as_f64().unwrap();
    assert!(after >= before);
}

// ============ Relationship Endpoint Tests ============

#[tokio::test]
async fn test_relationships() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.get("/relationships/541512").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["relationship_count"], 1);
    assert_eq!(body["related_codes"][0]["naics_code"], "541511");
    assert_eq!(
        body["related_codes"][0]["description"],
        "computer systems design services"
    );
}

#[tokio::test]
async fn test_relationships_without_refs() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.get("/relationships/111110").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["relationship_count"], 0);
    assert_eq!(body["message"], "No cross-references found for this code");
}

#[tokio::test]
async fn test_network_analysis() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.get("/network-analysis").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["network_stats"]["total_relationships"], 4);
    assert_eq!(body["network_stats"]["codes_with_no_refs"], 1);
    assert!(!body["most_connected_codes"].as_array().unwrap().is_empty());
}

// ============ Search Endpoint Tests ============

#[tokio::test]
async fn test_search_direct_and_related() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server
        .post("/search-naics")
        .add_query_param("term", "Planning")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["search_term"], "Planning");
    let direct = body["direct_matches"].as_object().unwrap();
    assert_eq!(direct.len(), 1);
    assert_eq!(direct["541512"]["match_type"], "direct");

    let related = body["related_matches"].as_object().unwrap();
    assert_eq!(related.len(), 2);
    assert_eq!(related["541511"]["related_via"], "541512");
    assert_eq!(related["541519"]["related_via"], "541512");
    assert_eq!(body["total_matches"], 3);
}

#[tokio::test]
async fn test_search_blank_term() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.post("/search-naics").add_query_param("term", "  ").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ============ Export Endpoint Tests ============

#[tokio::test]
async fn test_export_csv() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.get("/export/CSV").await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=comprehensive_naics_data.csv"
    );
    let text = response.text();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "naics_code,description,sector,level,defense_related,cross_reference_count,related_codes"
    );
    assert_eq!(lines.count(), 5);
}

#[tokio::test]
async fn test_export_json_matches_csv_count() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let json: Value = server.get("/export/json").await.json();
    let csv = server.get("/export/csv").await.text();

    assert_eq!(json["naics"].as_array().unwrap().len(), csv.lines().count() - 1);
}

#[tokio::test]
async fn test_export_unknown_format() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(&dir).await;

    let response = server.get("/export/xml").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ============ Auth Tests ============

#[tokio::test]
async fn test_bearer_token_required() {
    let dir = TempDir::new().unwrap();
    let processor = create_processor(&dir);
    processor.process_and_cache().await.unwrap();
    let state = AppState::new(processor).with_auth(AuthConfig::with_token("s3cret"));
    let server = TestServer::new(build_app(state)).unwrap();

    let response = server.get("/naics/codes").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Invalid authorization token.");

    let response = server
        .get("/naics/codes")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"))
        .await;
    response.assert_status_ok();

    server.get("/health").await.assert_status_ok();
}
