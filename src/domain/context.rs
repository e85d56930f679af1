//! Connection Context
//!
//! Transport-layer metadata captured for the current request.

use serde::Serialize;
use std::fmt;
use std::net::SocketAddr;
use uuid::Uuid;

/// Opaque per-request identifier assigned by the connection middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Socket addresses of the current connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportMeta {
    /// Remote (client or proxy) address
    pub remote: SocketAddr,

    /// Local address the connection was accepted on, if known
    pub local: Option<SocketAddr>,
}

impl TransportMeta {
    /// Create metadata with only the remote address
    pub fn new(remote: SocketAddr) -> Self {
        Self {
            remote,
            local: None,
        }
    }

    /// Attach the local address
    pub fn with_local(mut self, local: SocketAddr) -> Self {
        self.local = Some(local);
        self
    }
}
