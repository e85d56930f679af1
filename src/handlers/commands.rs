//! Command definitions
//!
//! Commands carry everything the pipeline reads from the inbound request.

use axum::http::{header, HeaderMap, HeaderName};

use crate::domain::{ConnectionId, TransportMeta};

/// Proxy-chain header listing the original client address first
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

// =========================================================================
// InspectConnectionCommand
// =========================================================================

/// Command to build a connection record for the current request
#[derive(Debug, Clone)]
pub struct InspectConnectionCommand {
    pub transport: TransportMeta,
    /// Raw forwarding header, trusted or not
    pub forwarded_for: Option<String>,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
    pub connection_id: Option<ConnectionId>,
}

impl InspectConnectionCommand {
    pub fn new(transport: TransportMeta) -> Self {
        Self {
            transport,
            forwarded_for: None,
            user_agent: None,
            accept_language: None,
            connection_id: None,
        }
    }

    /// Read the relevant request headers. Missing, empty or non-UTF-8
    /// values are left as `None`; non-ASCII UTF-8 is kept verbatim.
    pub fn from_headers(transport: TransportMeta, headers: &HeaderMap) -> Self {
        Self {
            transport,
            forwarded_for: header_value(headers, &X_FORWARDED_FOR),
            user_agent: header_value(headers, &header::USER_AGENT),
            accept_language: header_value(headers, &header::ACCEPT_LANGUAGE),
            connection_id: None,
        }
    }

    pub fn with_forwarded_for(mut self, forwarded_for: impl Into<String>) -> Self {
        self.forwarded_for = Some(forwarded_for.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.accept_language = Some(accept_language.into());
        self
    }

    pub fn with_connection_id(mut self, connection_id: ConnectionId) -> Self {
        self.connection_id = Some(connection_id);
        self
    }
}

fn header_value(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
