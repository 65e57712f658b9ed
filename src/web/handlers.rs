//! HTTP handlers for API endpoints.

use crate::metrics::data::{NetworkInterfaceInfo, ProcessInfo, SystemStats};
use crate::metrics::MonitorService;
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::error;

/// Shared handler state.
pub type AppState = Arc<MonitorService>;

/// Run a snapshot computation on the blocking pool.
///
/// Provider queries are synchronous system calls and the engine holds its locks
/// across them, so they stay off the async workers.
async fn run_blocking<T, F>(service: AppState, compute: F) -> Result<T, StatusCode>
where
    F: FnOnce(&MonitorService) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || compute(&service))
        .await
        .map_err(|e| {
            error!("Snapshot worker failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Current system statistics.
pub async fn get_stats(State(service): State<AppState>) -> Result<Json<SystemStats>, StatusCode> {
    run_blocking(service, MonitorService::system_stats).await.map(Json)
}

/// Current process list with per-process CPU and memory percentages.
pub async fn get_processes(
    State(service): State<AppState>,
) -> Result<Json<Vec<ProcessInfo>>, StatusCode> {
    run_blocking(service, MonitorService::processes).await.map(Json)
}

/// Network interfaces, without the excluded names.
pub async fn get_interfaces(
    State(service): State<AppState>,
) -> Result<Json<Vec<NetworkInterfaceInfo>>, StatusCode> {
    run_blocking(service, MonitorService::interfaces).await.map(Json)
}
