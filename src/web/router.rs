//! Web application router and middleware setup.

use crate::web::handlers::{self, AppState};
use axum::{http::Method, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the axum application with all routes and middleware.
///
/// Every route is a parameterless `GET` answering JSON, with a permissive CORS
/// policy so any dashboard origin can poll it.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/stats", get(handlers::get_stats))
        .route("/processes", get(handlers::get_processes))
        .route("/interfaces", get(handlers::get_interfaces))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
}
