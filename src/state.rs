//! Shared application state
//!
//! Immutable after startup; cloned into every handler.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::geo::{GeoError, GeoLocator};

/// State handed to the router
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub geo: GeoLocator,
    /// Origin for the high-resolution clock reading
    pub clock_origin: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, GeoError> {
        let geo = GeoLocator::from_config(&config)?;

        Ok(Self {
            config: Arc::new(config),
            geo,
            clock_origin: Instant::now(),
        })
    }
}
