//! NAICS API - HTTP Interface Layer
//!
//! Read, filter, search and export endpoints over the cached NAICS lookup
//! payload.
//!
//! # Endpoints
//!
//! ## Health & Status
//! - `GET /` - Service greeting
//! - `GET /health` - Service health check
//! - `GET /stats` - Summary statistics of the cached payload
//!
//! ## Codes
//! - `GET /naics/codes` - List codes (`defense_only`, `sector`, `min_cross_refs`)
//! - `GET /naics/codes/:code` - Get one code
//! - `GET /naics/data` - Full cache envelope, building on miss (`force_refresh`)
//!
//! ## Relationships
//! - `GET /relationships/:code` - Cross-references of a code
//! - `GET /network-analysis` - Cross-reference network analysis
//! - `POST /search-naics?term=` - Keyword search with related matches
//!
//! ## Export
//! - `GET /export/:format` - `json` or `csv`
//!
//! # Usage Example
//!
//! ```ignore
//! use naics_api::{run_server, ApiConfig, AppState, AuthConfig};
//! use naics_store::{NaicsProcessor, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let processor = NaicsProcessor::new(StoreConfig::from_env()).unwrap();
//!     let state = AppState::with_config(ApiConfig::from_env(), processor)
//!         .with_auth(AuthConfig::from_env());
//!     run_server(state).await.unwrap();
//! }
//! ```

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use auth::AuthConfig;
pub use dto::*;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::{build_app, create_router};
pub use server::{create_server, run_server, start_background_server};
pub use state::{ApiConfig, AppState, DEFAULT_ALLOWED_ORIGIN};

/// NAICS API version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API port
pub const DEFAULT_PORT: u16 = 8000;
