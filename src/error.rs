//! Error handling module
//!
//! Centralized error types and HTTP response conversion. The connection
//! pipeline itself has no error path; these cover the surrounding surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Geolocation client error: {0}")]
    Geo(#[from] crate::geo::GeoError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_code = match &self {
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                "config_error"
            }
            AppError::Geo(e) => {
                tracing::error!("Geolocation client error: {:?}", e);
                "geo_client_error"
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
