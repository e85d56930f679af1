//! API module
//!
//! HTTP endpoints and middleware.

mod connect_info;
pub mod middleware;
pub mod routes;

pub use routes::create_router;
