//! Application State
//!
//! Shared state for the NAICS API service. Nothing here is mutable; every
//! request reads the cache file through the processor.

use chrono::{DateTime, Utc};
use naics_store::NaicsProcessor;
use std::sync::Arc;

use crate::auth::AuthConfig;
use crate::DEFAULT_PORT;

/// Default allowed browser origin
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Service name
    pub service_name: String,
    /// Service version
    pub version: String,
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Single origin allowed to make credentialed requests
    pub allowed_origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            service_name: "naics-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            enable_cors: true,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl ApiConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("NAICS_BIND_ADDR").unwrap_or(defaults.host),
            port: std::env::var("NAICS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            enable_cors: std::env::var("NAICS_CORS_ENABLED")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.enable_cors),
            allowed_origin: std::env::var("NAICS_ALLOWED_ORIGIN")
                .unwrap_or(defaults.allowed_origin),
            ..defaults
        }
    }

    /// Get the full bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application state shared across handlers
pub struct AppState {
    /// Configuration
    pub config: ApiConfig,
    /// Authentication configuration
    pub auth_config: AuthConfig,
    /// Build pipeline and cache access
    pub processor: Arc<NaicsProcessor>,
    /// Service start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state with default config
    pub fn new(processor: NaicsProcessor) -> Self {
        Self::with_config(ApiConfig::default(), processor)
    }

    /// Create with configuration
    pub fn with_config(config: ApiConfig, processor: NaicsProcessor) -> Self {
        Self {
            config,
            auth_config: AuthConfig::default(),
            processor: Arc::new(processor),
            started_at: Utc::now(),
        }
    }

    /// Set authentication configuration
    pub fn with_auth(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = auth_config;
        self
    }

    /// Get service uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        let now = Utc::now();
        (now - self.started_at).num_seconds().max(0) as u64
    }
}
