//! Foundation types for the fleet registry.
//!
//! Every other fleet crate depends on `fleet-types`. The types here carry no
//! behavior beyond construction, validation, and wire-format mapping.
//!
//! # Key Types
//!
//! - [`VehicleId`] -- Positive integer identifier assigned by the store
//! - [`Vehicle`] -- A complete vehicle record (identifier + attributes)
//! - [`VehicleAttributes`] -- Everything but the identifier; the create payload
//! - [`BrandYearRange`], [`DimensionRange`], [`WeightRange`] -- Typed filter queries
//! - [`UpdateSpeed`], [`UpdateFuelType`] -- Partial-mutation commands

pub mod command;
pub mod error;
pub mod query;
pub mod vehicle;

pub use command::{UpdateFuelType, UpdateSpeed};
pub use error::TypeError;
pub use query::{BrandYearRange, DimensionRange, Range, WeightRange};
pub use vehicle::{Dimensions, Vehicle, VehicleAttributes, VehicleId};
