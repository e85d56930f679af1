//! Domain module
//!
//! Core connection types and the pure parts of the pipeline.

pub mod address;
pub mod context;
pub mod fingerprint;
pub mod record;

pub use address::{is_private_address, normalize_address};
pub use context::{ConnectionId, TransportMeta};
pub use fingerprint::compute_fingerprint;
pub use record::{ConnectionRecord, GeoInfo, UNKNOWN};
