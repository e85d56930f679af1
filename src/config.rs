//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Whether public client addresses are enriched with geolocation
    pub geo_enabled: bool,

    /// Base URL of the geolocation lookup service
    pub geo_api_url: String,

    /// Timeout for a single geolocation lookup
    pub geo_timeout: Duration,

    /// Peers allowed to set X-Forwarded-For
    pub trusted_proxies: TrustedProxies,

    /// Include a per-request connection ID in the record
    pub show_connection_id: bool,

    /// Include the server-side address/port in the record
    pub show_server_address: bool,
}

/// Set of peers whose forwarding headers are honored
#[derive(Debug, Clone, PartialEq)]
pub enum TrustedProxies {
    /// Every peer is trusted
    Any,
    /// Only the listed peers are trusted
    List(Vec<IpAddr>),
}

impl TrustedProxies {
    /// Parse a comma-separated list of IPs, or `*` for any peer
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim() == "*" {
            return Ok(Self::Any);
        }

        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<IpAddr>()
                    .map_err(|_| ConfigError::InvalidValue("TRUSTED_PROXIES"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::List)
    }

    /// Check whether the immediate peer may supply a forwarding header
    pub fn is_trusted(&self, peer: IpAddr) -> bool {
        match self {
            Self::Any => true,
            Self::List(ips) => {
                let peer = match peer {
                    IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(peer),
                    v4 => v4,
                };
                ips.contains(&peer)
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            geo_enabled: true,
            geo_api_url: "https://ipapi.co".to_string(),
            geo_timeout: Duration::from_millis(3000),
            trusted_proxies: TrustedProxies::List(vec![
                IpAddr::from([127, 0, 0, 1]),
                IpAddr::from([0u16, 0, 0, 0, 0, 0, 0, 1]),
            ]),
            show_connection_id: true,
            show_server_address: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let geo_enabled = bool_var("GEO_ENABLED", defaults.geo_enabled)?;

        let geo_api_url = env::var("GEO_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.geo_api_url);

        let geo_timeout = env::var("GEO_TIMEOUT_MS")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidValue("GEO_TIMEOUT_MS"))?;

        let trusted_proxies = match env::var("TRUSTED_PROXIES") {
            Ok(raw) => TrustedProxies::parse(&raw)?,
            Err(_) => defaults.trusted_proxies,
        };

        let show_connection_id = bool_var("SHOW_CONNECTION_ID", defaults.show_connection_id)?;
        let show_server_address = bool_var("SHOW_SERVER_ADDRESS", defaults.show_server_address)?;

        Ok(Self {
            host,
            port,
            geo_enabled,
            geo_api_url,
            geo_timeout,
            trusted_proxies,
            show_connection_id,
            show_server_address,
        })
    }

    /// Socket address to listen on; `HOST` may be IPv4 or IPv6
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host: IpAddr = self
            .host
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HOST"))?;

        Ok(SocketAddr::new(host, self.port))
    }
}

fn bool_var(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_bool(&value).ok_or(ConfigError::InvalidValue(name)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
