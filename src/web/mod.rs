//! Web server and API endpoints.
//!
//! Three read-only JSON endpoints (`/stats`, `/processes`, `/interfaces`). Each
//! request computes a fresh snapshot; the client owns the polling cadence.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::create_app;

use crate::error::{MonitorError, Result};
use crate::metrics::{MonitorService, MonotonicClock, SysinfoProvider, SystemProvider};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Start the web server backed by the host's own counters.
pub async fn start_web_server(config: WebConfig) -> Result<()> {
    start_web_server_with_provider(config, Arc::new(SysinfoProvider::new())).await
}

/// Start the web server with an explicit system information provider.
///
/// Fails only if the bind address is invalid or cannot be bound; once listening,
/// provider failures never stop the server.
pub async fn start_web_server_with_provider(
    config: WebConfig,
    provider: Arc<dyn SystemProvider>,
) -> Result<()> {
    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| MonitorError::config_error(format!("Invalid bind address: {}", e)))?;

    let service = MonitorService::new(provider, Arc::new(MonotonicClock::new()), &config);
    let app = create_app(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MonitorError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    info!("Starting system monitor API on http://{}", addr);
    info!("Endpoints: /stats, /processes, /interfaces");
    info!("Secondary disk mount point: {}", config.usb_mount_point.display());

    axum::serve(listener, app)
        .await
        .map_err(|e| MonitorError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
