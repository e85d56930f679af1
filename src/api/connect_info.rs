//! Transport metadata extraction
//!
//! Lets `axum::serve` record both ends of each accepted connection.

use axum::extract::connect_info::Connected;
use axum::serve::IncomingStream;

use crate::domain::TransportMeta;

impl Connected<IncomingStream<'_>> for TransportMeta {
    fn connect_info(target: IncomingStream<'_>) -> Self {
        let meta = TransportMeta::new(target.remote_addr());
        match target.local_addr() {
            Ok(local) => meta.with_local(local),
            Err(_) => meta,
        }
    }
}
