//! Geolocation client
//!
//! One outbound request per public address, no retries. Response fields
//! are read leniently: anything absent or mistyped becomes `None`.

use serde_json::Value;
use std::net::IpAddr;
use std::time::Duration;

use crate::config::Config;
use crate::domain::{is_private_address, GeoInfo};

use super::GeoError;

/// Advisory set when the address is private and no lookup is attempted
pub const PRIVATE_ADDRESS_MESSAGE: &str =
    "Private or local address; use client-side geolocation for coordinates";

/// Advisory set when the client address does not parse as an IP
pub const INVALID_ADDRESS_MESSAGE: &str = "Client address is not a valid IP; geolocation skipped";

/// Client for the external geolocation service
#[derive(Debug, Clone)]
pub struct GeoLocator {
    http: reqwest::Client,
    base_url: String,
}

impl GeoLocator {
    /// Create a locator against `base_url` with a per-lookup timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GeoError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("connection-info/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a locator from application configuration
    pub fn from_config(config: &Config) -> Result<Self, GeoError> {
        Self::new(config.geo_api_url.clone(), config.geo_timeout)
    }

    /// Resolve an address to geo info. Never fails.
    ///
    /// Private and empty addresses short-circuit with a static advisory.
    /// Lookup failures are logged and recorded in `message`.
    pub async fn locate(&self, address: &str) -> GeoInfo {
        if address.is_empty() || is_private_address(address) {
            return GeoInfo::with_message(PRIVATE_ADDRESS_MESSAGE);
        }

        let Ok(ip) = address.parse::<IpAddr>() else {
            tracing::debug!(address = %address, "Skipping geolocation for non-IP address");
            return GeoInfo::with_message(INVALID_ADDRESS_MESSAGE);
        };

        match self.lookup(ip).await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(address = %address, error = %e, "Geolocation lookup failed");
                GeoInfo::with_message(e.advisory_message())
            }
        }
    }

    /// Issue the lookup request for a public address
    pub async fn lookup(&self, ip: IpAddr) -> Result<GeoInfo, GeoError> {
        let url = format!("{}/{}/json/", self.base_url, ip);

        tracing::debug!(url = %url, "Geolocation lookup");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body).map_err(|_| GeoError::InvalidBody)?;

        parse_lookup_body(&value)
    }
}

/// Extract geo fields from a provider response body
pub(crate) fn parse_lookup_body(value: &Value) -> Result<GeoInfo, GeoError> {
    let Some(body) = value.as_object() else {
        return Err(GeoError::InvalidBody);
    };

    if body.get("error").and_then(Value::as_bool) == Some(true) {
        let reason = string_field(value, "reason").unwrap_or_else(|| "unknown error".to_string());
        return Err(GeoError::Provider(reason));
    }

    Ok(GeoInfo {
        city: string_field(value, "city"),
        region: string_field(value, "region"),
        country_name: string_field(value, "country_name").or_else(|| string_field(value, "country")),
        latitude: number_field(value, "latitude"),
        longitude: number_field(value, "longitude"),
        organization: string_field(value, "org").or_else(|| string_field(value, "asn")),
        message: None,
    })
}

/// Non-empty string, or a number rendered as a string
fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Finite number, or a string that parses as one
fn number_field(value: &Value, key: &str) -> Option<f64> {
    let n = match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;

    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_body() {
        let body = json!({
            "city": "Mountain View",
            "region": "California",
            "country_name": "United States",
            "country": "US",
            "latitude": 37.4056,
            "longitude": -122.0775,
            "org": "GOOGLE",
            "asn": "AS15169"
        });

        let geo = parse_lookup_body(&body).unwrap();

        assert_eq!(geo.city.as_deref(), Some("Mountain View"));
        assert_eq!(geo.region.as_deref(), Some("California"));
        assert_eq!(geo.country_name.as_deref(), Some("United States"));
        assert_eq!(geo.coordinates(), Some((37.4056, -122.0775)));
        assert_eq!(geo.organization.as_deref(), Some("GOOGLE"));
        assert!(geo.message.is_none());
    }

    #[test]
    fn test_parse_falls_back_to_country_code_and_asn() {
        let body = json!({ "country": "DE", "asn": 3320 });

        let geo = parse_lookup_body(&body).unwrap();

        assert_eq!(geo.country_name.as_deref(), Some("DE"));
        assert_eq!(geo.organization.as_deref(), Some("3320"));
        assert!(geo.city.is_none());
    }

    #[test]
    fn test_parse_mistyped_fields_become_none() {
        let body = json!({
            "city": 12,
            "region": ["x"],
            "latitude": "not a number",
            "longitude": null,
            "org": ""
        });

        let geo = parse_lookup_body(&body).unwrap();

        assert_eq!(geo.city.as_deref(), Some("12"));
        assert!(geo.region.is_none());
        assert!(geo.latitude.is_none());
        assert!(geo.longitude.is_none());
        assert!(geo.organization.is_none());
    }

    #[test]
    fn test_parse_numeric_string_coordinates() {
        let body = json!({ "latitude": "52.52", "longitude": "13.40" });
        let geo = parse_lookup_body(&body).unwrap();
        assert_eq!(geo.coordinates(), Some((52.52, 13.40)));
    }

    #[test]
    fn test_parse_provider_error() {
        let body = json!({ "error": true, "reason": "RateLimited" });

        let err = parse_lookup_body(&body).unwrap_err();

        assert!(matches!(err, GeoError::Provider(ref r) if r == "RateLimited"));
    }

    #[test]
    fn test_parse_non_object_body() {
        assert!(matches!(
            parse_lookup_body(&json!([1, 2, 3])),
            Err(GeoError::InvalidBody)
        ));
    }

    #[tokio::test]
    async fn test_locate_private_address_skips_lookup() {
        // Unroutable base URL: any request would fail, not produce this message
        let locator = GeoLocator::new("http://127.0.0.1:9", Duration::from_millis(100)).unwrap();

        for address in ["127.0.0.1", "192.168.1.5", "172.20.0.4", ""] {
            let geo = locator.locate(address).await;
            assert_eq!(geo.message.as_deref(), Some(PRIVATE_ADDRESS_MESSAGE));
            assert!(geo.coordinates().is_none());
        }
    }

    #[tokio::test]
    async fn test_locate_rejects_non_ip_address() {
        let locator = GeoLocator::new("http://127.0.0.1:9", Duration::from_millis(100)).unwrap();

        for address in ["8.8.8.8/json/?x=", "example.com", "8.8.8.8:53"] {
            let geo = locator.locate(address).await;
            assert_eq!(geo.message.as_deref(), Some(INVALID_ADDRESS_MESSAGE));
            assert!(geo.city.is_none());
        }
    }

    #[tokio::test]
    async fn test_locate_transport_failure_is_captured() {
        let locator = GeoLocator::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();

        let geo = locator.locate("8.8.8.8").await;

        assert_eq!(geo.message.as_deref(), Some("Geolocation lookup failed"));
        assert!(geo.city.is_none());
    }
}
