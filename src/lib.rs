//! connection_info Library
//!
//! Inspects inbound connections: normalized client address, fingerprint,
//! clock readings and best-effort geolocation.

pub mod api;
pub mod config;
pub mod domain;
pub mod geo;
pub mod handlers;
pub mod render;
pub mod state;
mod error;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use domain::{ConnectionId, ConnectionRecord, GeoInfo, TransportMeta};
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let connection_routes = api::create_router().layer(middleware::from_fn(
        api::middleware::connection_middleware,
    ));

    Router::new()
        // Health check (no connection logging)
        .route("/health", get(health_check))
        .merge(connection_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build state and router from configuration
pub fn build_app(config: Config) -> AppResult<Router> {
    let state = AppState::new(config)?;
    Ok(build_router(state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
