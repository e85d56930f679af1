//! Geolocation module
//!
//! Best-effort enrichment of public client addresses via an external
//! HTTP lookup service.

mod client;
mod error;

pub use client::{GeoLocator, INVALID_ADDRESS_MESSAGE, PRIVATE_ADDRESS_MESSAGE};
pub use error::GeoError;
