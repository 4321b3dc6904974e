//! API Routes
//!
//! Route definitions for the NAICS API.

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::auth::auth_middleware;
use crate::handlers::*;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let enable_cors = state.config.enable_cors;
    let auth_enabled = state.auth_config.enabled;
    let allowed_origin = state.config.allowed_origin.clone();

    let mut router = Router::new()
        // Health and status
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        // Codes
        .route("/naics/codes", get(list_codes))
        .route("/naics/codes/:code", get(get_code))
        .route("/naics/data", get(get_data))
        // Relationships
        .route("/relationships/:code", get(get_relationships))
        .route("/network-analysis", get(get_network_analysis))
        .route("/search-naics", post(search_codes))
        // Export
        .route("/export/:format", get(export_data))
        .with_state(state.clone());

    // Add authentication middleware (if enabled)
    if auth_enabled {
        router = router.layer(middleware::from_fn_with_state(state, auth_middleware));
    }

    // Add CORS middleware
    if enable_cors {
        match cors_layer(&allowed_origin) {
            Some(cors) => router = router.layer(cors),
            None => warn!("Invalid CORS origin {:?}, CORS disabled", allowed_origin),
        }
    }

    router = router.layer(TraceLayer::new_for_http());

    router
}

/// Credentialed CORS for a single origin. Methods and headers mirror the
/// preflight request.
fn cors_layer(origin: &str) -> Option<CorsLayer> {
    let origin = HeaderValue::from_str(origin).ok()?;
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    )
}

/// Build the full application router
pub fn build_app(state: AppState) -> Router {
    create_router(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthConfig;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use naics_store::{NaicsProcessor, StoreConfig};
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    fn create_test_state(dir: &TempDir) -> AppState {
        let processor = NaicsProcessor::new(StoreConfig::with_data_dir(dir.path())).unwrap();
        AppState::new(processor)
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let dir = TempDir::new().unwrap();
        let app = build_app(create_test_state(&dir));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = TempDir::new().unwrap();
        let app = build_app(create_test_state(&dir));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_codes_before_processing() {
        let dir = TempDir::new().unwrap();
        let app = build_app(create_test_state(&dir));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/naics/codes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_auth_required_for_data_routes() {
        let dir = TempDir::new().unwrap();
        let app = build_app(create_test_state(&dir).with_auth(AuthConfig::with_token("secret")));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/stats")
                    .header(header::AUTHORIZATION, "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Authenticated, but nothing built yet
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/stats")
                    .header(header::AUTHORIZATION, "Bearer secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_configured_origin() {
        let dir = TempDir::new().unwrap();
        let app = build_app(create_test_state(&dir));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/naics/codes")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[test]
    fn test_invalid_origin_skips_cors() {
        assert!(cors_layer("http://bad\norigin").is_none());
        assert!(cors_layer("http://localhost:3000").is_some());
    }
}
