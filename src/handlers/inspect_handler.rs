//! Inspect Connection Handler
//!
//! Builds the connection record: address resolution, fingerprint, clock
//! readings and optional geolocation.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::config::Config;
use crate::domain::{compute_fingerprint, normalize_address, ConnectionRecord, UNKNOWN};
use crate::geo::GeoLocator;
use crate::state::AppState;

use super::InspectConnectionCommand;

/// Handler for the connection info pipeline
pub struct InspectConnectionHandler {
    config: Arc<Config>,
    geo: GeoLocator,
    clock_origin: Instant,
}

impl InspectConnectionHandler {
    pub fn new(state: &AppState) -> Self {
        Self {
            config: state.config.clone(),
            geo: state.geo.clone(),
            clock_origin: state.clock_origin,
        }
    }

    /// Execute the command. Geolocation is the only await point and its
    /// failures end up in `geo.message`.
    pub async fn execute(&self, command: InspectConnectionCommand) -> ConnectionRecord {
        let timestamp = Utc::now();
        let monotonic_reading =
            u64::try_from(self.clock_origin.elapsed().as_nanos()).unwrap_or(u64::MAX);

        let (client_address, client_port) = self.resolve_client(&command);

        let user_agent = command.user_agent.unwrap_or_else(|| UNKNOWN.to_string());
        let accept_language = command
            .accept_language
            .unwrap_or_else(|| UNKNOWN.to_string());

        let fingerprint = compute_fingerprint(&client_address, &user_agent, &accept_language);

        let (server_address, server_port) = match command.transport.local {
            Some(local) if self.config.show_server_address => (
                Some(normalize_address(Some(&local.ip().to_string()))),
                Some(local.port()),
            ),
            _ => (None, None),
        };

        let connection_id = command
            .connection_id
            .filter(|_| self.config.show_connection_id);

        let geo = if self.config.geo_enabled {
            Some(self.geo.locate(&client_address).await)
        } else {
            None
        };

        tracing::debug!(
            client_address = %client_address,
            client_port = ?client_port,
            fingerprint = %fingerprint,
            "Connection record built"
        );

        ConnectionRecord {
            connection_id,
            client_address,
            client_port,
            server_address,
            server_port,
            timestamp,
            monotonic_reading,
            user_agent,
            accept_language,
            fingerprint,
            geo,
        }
    }

    /// Client address and port. A forwarding header wins only when the
    /// immediate peer is a trusted proxy; the real port is then unknown.
    fn resolve_client(&self, command: &InspectConnectionCommand) -> (String, Option<u16>) {
        let peer = command.transport.remote;

        if let Some(forwarded) = command.forwarded_for.as_deref() {
            if self.config.trusted_proxies.is_trusted(peer.ip()) {
                let address = normalize_address(Some(forwarded));
                if !address.is_empty() {
                    return (address, None);
                }
            } else {
                tracing::debug!(peer = %peer, "Ignoring X-Forwarded-For from untrusted peer");
            }
        }

        (
            normalize_address(Some(&peer.ip().to_string())),
            Some(peer.port()),
        )
    }
}
