//! API Server setup

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::routes::build_app;
use crate::state::AppState;

/// Create the API server
pub fn create_server(
    state: AppState,
) -> Result<(Router, SocketAddr), Box<dyn std::error::Error + Send + Sync>> {
    let addr: SocketAddr = state.config.bind_address().parse()?;
    let router = build_app(state);
    Ok((router, addr))
}

/// Run the API server
pub async fn run_server(state: AppState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (router, addr) = create_server(state)?;

    tracing::info!("NAICS API server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Start server in background (for testing)
pub async fn start_background_server(
    state: AppState,
) -> Result<SocketAddr, Box<dyn std::error::Error + Send + Sync>> {
    let (router, addr) = create_server(state)?;

    // Bind to get actual address (useful when port is 0)
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(actual_addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ApiConfig;
    use naics_store::{NaicsProcessor, StoreConfig};

    fn state(host: &str, port: u16) -> AppState {
        let processor = NaicsProcessor::new(StoreConfig::with_data_dir("/tmp/naics-server")).unwrap();
        let config = ApiConfig {
            host: host.to_string(),
            port,
            ..Default::default()
        };
        AppState::with_config(config, processor)
    }

    #[test]
    fn test_invalid_bind_address() {
        assert!(create_server(state("not an address", 8000)).is_err());
    }

    #[tokio::test]
    async fn test_background_server_binds_ephemeral_port() {
        let addr = start_background_server(state("127.0.0.1", 0)).await.unwrap();
        assert_ne!(addr.port(), 0);
    }
}
