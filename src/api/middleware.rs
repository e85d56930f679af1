//! API Middleware
//!
//! Per-connection identification and request logging.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::domain::{ConnectionId, TransportMeta};

// =========================================================================
// mask_headers_for_logging
// =========================================================================

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            let masked_value = if SENSITIVE_HEADERS.contains(&name_lower.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

// =========================================================================
// Connection Logging Middleware
// =========================================================================

/// Assign a connection ID and log both ends of the connection.
///
/// The ID is stored as a request extension for the handlers.
pub async fn connection_middleware(
    ConnectInfo(transport): ConnectInfo<TransportMeta>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let connection_id = ConnectionId::new();
    request.extensions_mut().insert(connection_id);

    let method = request.method().clone();
    let uri = request.uri().clone();
    let headers = mask_headers_for_logging(request.headers());
    let server = transport
        .local
        .map(|local| local.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let start = std::time::Instant::now();

    tracing::info!(
        connection_id = %connection_id,
        client = %transport.remote,
        server = %server,
        method = %method,
        uri = %uri,
        headers = ?headers,
        "Incoming request"
    );

    let response = next.run(request).await;

    tracing::info!(
        connection_id = %connection_id,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        "Request completed"
    );

    response
}
