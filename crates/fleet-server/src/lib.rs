//! HTTP server for the fleet registry.
//!
//! Exposes the vehicle service as a JSON REST API under `/vehicles`.
//! Successful responses use the envelope `{"message": "success", "data": ...}`;
//! failures are `{"message": ..., "code": ...}` with the status taken from
//! [`ApiError::status_code`].

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use handler::{AppState, Envelope};
pub use server::FleetServer;
