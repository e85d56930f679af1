//! Geolocation Errors
//!
//! Lookup failures. These never leave the geo module: `GeoLocator::locate`
//! folds them into an advisory message on the record.

/// Errors that can occur during a geolocation lookup
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// Provider answered with a non-success status
    #[error("Geolocation lookup failed with status {0}")]
    Status(u16),

    /// Timeout, DNS failure, refused connection, ...
    #[error("Geolocation transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not a JSON object
    #[error("Geolocation response was not valid JSON")]
    InvalidBody,

    /// Provider reported an in-band error on a success status
    #[error("Geolocation lookup failed: {0}")]
    Provider(String),
}

impl GeoError {
    /// Human-readable text attached to the record
    pub fn advisory_message(&self) -> String {
        match self {
            GeoError::Status(_) | GeoError::Provider(_) => self.to_string(),
            GeoError::Transport(_) | GeoError::InvalidBody => {
                "Geolocation lookup failed".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_contains_code() {
        let msg = GeoError::Status(500).advisory_message();
        assert!(msg.contains("500"));
    }

    #[test]
    fn test_invalid_body_message_is_generic() {
        assert_eq!(
            GeoError::InvalidBody.advisory_message(),
            "Geolocation lookup failed"
        );
    }

    #[test]
    fn test_provider_message_includes_reason() {
        let msg = GeoError::Provider("RateLimited".to_string()).advisory_message();
        assert_eq!(msg, "Geolocation lookup failed: RateLimited");
    }
}
