//! Connection record
//!
//! The per-request result of the connection pipeline. Built once, rendered,
//! then dropped.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use super::ConnectionId;

/// Placeholder for absent request headers
pub const UNKNOWN: &str = "Unknown";

/// Everything known about the current connection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<ConnectionId>,

    pub client_address: String,

    /// `None` when the address came from a forwarding header
    pub client_port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,

    #[serde(serialize_with = "serialize_iso_millis")]
    pub timestamp: DateTime<Utc>,

    /// Nanoseconds since the process clock origin. Display only.
    pub monotonic_reading: u64,

    pub user_agent: String,

    pub accept_language: String,

    pub fingerprint: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoInfo>,
}

impl ConnectionRecord {
    /// Wall-clock timestamp in ISO-8601 with millisecond precision
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Best-effort geolocation of the client address
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoInfo {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub organization: Option<String>,
    /// Advisory text when the lookup was skipped or failed
    pub message: Option<String>,
}

impl GeoInfo {
    /// Geo info carrying only an advisory message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Both coordinates, if the lookup produced them
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

fn serialize_iso_millis<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> ConnectionRecord {
        ConnectionRecord {
            connection_id: None,
            client_address: "203.0.113.5".to_string(),
            client_port: Some(51234),
            server_address: None,
            server_port: None,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            monotonic_reading: 42,
            user_agent: UNKNOWN.to_string(),
            accept_language: UNKNOWN.to_string(),
            fingerprint: "abc".to_string(),
            geo: None,
        }
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(sample_record()).unwrap();

        assert_eq!(json["clientAddress"], "203.0.113.5");
        assert_eq!(json["clientPort"], 51234);
        assert_eq!(json["monotonicReading"], 42);
        assert_eq!(json["timestamp"], "2024-05-01T12:30:00.000Z");
        assert!(json.get("connectionId").is_none());
        assert!(json.get("serverAddress").is_none());
        assert!(json.get("geo").is_none());
    }

    #[test]
    fn test_geo_with_message_leaves_fields_empty() {
        let geo = GeoInfo::with_message("skipped");

        assert_eq!(geo.message.as_deref(), Some("skipped"));
        assert!(geo.city.is_none());
        assert!(geo.coordinates().is_none());
    }

    #[test]
    fn test_geo_serializes_nulls() {
        let json = serde_json::to_value(GeoInfo::with_message("x")).unwrap();
        assert!(json["countryName"].is_null());
        assert!(json["latitude"].is_null());
    }
}
