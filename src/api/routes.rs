//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{ConnectInfo, Extension, State},
    http::HeaderMap,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{ConnectionId, ConnectionRecord, TransportMeta};
use crate::handlers::{InspectConnectionCommand, InspectConnectionHandler};
use crate::render::render_page;
use crate::state::AppState;

// =========================================================================
// Response types
// =========================================================================

/// Raw transport-layer peer, as seen by the socket
#[derive(Debug, Serialize, Deserialize)]
pub struct DebugResponse {
    pub ip: String,
    pub port: u16,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the connection info router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(connection_page))
        .route("/api/connection", get(connection_json))
        .route("/debug", get(debug))
}

// =========================================================================
// GET /
// =========================================================================

/// HTML page describing the current connection
async fn connection_page(
    State(state): State<AppState>,
    ConnectInfo(transport): ConnectInfo<TransportMeta>,
    connection_id: Option<Extension<ConnectionId>>,
    headers: HeaderMap,
) -> Html<String> {
    let record = inspect(&state, transport, connection_id, &headers).await;
    Html(render_page(&record))
}

// =========================================================================
// GET /api/connection
// =========================================================================

/// The connection record as JSON
async fn connection_json(
    State(state): State<AppState>,
    ConnectInfo(transport): ConnectInfo<TransportMeta>,
    connection_id: Option<Extension<ConnectionId>>,
    headers: HeaderMap,
) -> Json<ConnectionRecord> {
    Json(inspect(&state, transport, connection_id, &headers).await)
}

// =========================================================================
// GET /debug
// =========================================================================

/// Transport-layer remote address and port, no header processing
async fn debug(ConnectInfo(transport): ConnectInfo<TransportMeta>) -> Json<DebugResponse> {
    Json(DebugResponse {
        ip: transport.remote.ip().to_string(),
        port: transport.remote.port(),
    })
}

async fn inspect(
    state: &AppState,
    transport: TransportMeta,
    connection_id: Option<Extension<ConnectionId>>,
    headers: &HeaderMap,
) -> ConnectionRecord {
    let command = InspectConnectionCommand::from_headers(transport, headers);
    let command = match connection_id {
        Some(Extension(id)) => command.with_connection_id(id),
        None => command,
    };

    InspectConnectionHandler::new(state).execute(command).await
}
