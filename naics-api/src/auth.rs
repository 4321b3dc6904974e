//! Authentication
//!
//! Bearer token check for the data endpoints.
//!
//! ```text
//! Authorization: Bearer your-token-here
//! ```
//!
//! # Configuration
//!
//! - `NAICS_API_TOKEN`: shared secret; setting it enables authentication
//! - `NAICS_AUTH_ENABLED`: force authentication on or off

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::state::AppState;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Whether authentication is enabled
    pub enabled: bool,
    /// Shared bearer token
    pub token: Option<String>,
    /// Paths that don't require authentication
    pub public_paths: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            token: None,
            public_paths: vec!["/".to_string(), "/health".to_string()],
        }
    }
}

impl AuthConfig {
    /// Authentication enabled with a single bearer token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            enabled: true,
            token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let token = std::env::var("NAICS_API_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let enabled = std::env::var("NAICS_AUTH_ENABLED")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(token.is_some());

        Self {
            enabled,
            token,
            ..Default::default()
        }
    }

    /// Check if a path is public (doesn't require authentication)
    pub fn is_public_path(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| path == p)
    }

    /// Constant-time comparison against the configured token. With no
    /// token configured nothing validates.
    pub fn validate_bearer_token(&self, token: &str) -> bool {
        match &self.token {
            Some(expected) => bool::from(token.as_bytes().ct_eq(expected.as_bytes())),
            None => false,
        }
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let auth_config = &state.auth_config;

    if !auth_config.enabled || auth_config.is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if auth_config.validate_bearer_token(token) => next.run(request).await,
        _ => ApiError::unauthorized("Invalid authorization token.").into_response(),
    }
}
