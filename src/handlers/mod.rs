//! Command Handlers module
//!
//! Handlers that turn request metadata into connection records.

mod commands;
mod inspect_handler;


pub use commands::*;
pub use inspect_handler::InspectConnectionHandler;
