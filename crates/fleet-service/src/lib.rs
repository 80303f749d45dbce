//! Query and command service for the fleet registry.
//!
//! [`VehicleService`] validates requests, forwards them to a
//! [`VehicleStore`](fleet_store::VehicleStore), and reshapes storage outcomes
//! into [`ServiceError`]. It holds no state of its own, so swapping the
//! backing store does not change the contract seen by request handlers.

pub mod error;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use service::VehicleService;
