//! Vehicle record storage for the fleet registry.
//!
//! The store owns the mapping from [`VehicleId`](fleet_types::VehicleId) to
//! [`Vehicle`](fleet_types::Vehicle) and provides lookup, filter, aggregate,
//! insert, update, and delete primitives over it.
//!
//! # Storage Backends
//!
//! All backends implement the [`VehicleStore`] trait:
//!
//! - [`InMemoryVehicleStore`] -- `BTreeMap` behind a `RwLock`
//!
//! # Design Rules
//!
//! 1. Every read returns copies; no caller holds a reference into the store.
//! 2. Identifiers are allocated from the current maximum key, never from the
//!    collection size.
//! 3. Filters and aggregates that select nothing fail with a not-found error.
//!    Listing everything never fails on an empty store.
//! 4. A batch insert is all-or-nothing.
//! 5. The store never logs or retries; it returns a typed failure.

pub mod error;
pub mod loader;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use loader::{load_vehicles, parse_vehicles};
pub use memory::InMemoryVehicleStore;
pub use traits::{VehicleMap, VehicleStore};
