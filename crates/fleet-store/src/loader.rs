//! Seed data loading.
//!
//! A seed file is a JSON array of vehicle records in wire format. It is read
//! once at startup; the store never writes back to it.

use std::path::Path;

use fleet_types::Vehicle;

use crate::error::{StoreError, StoreResult};
use crate::traits::VehicleMap;

/// Read and parse a seed file.
pub fn load_vehicles(path: impl AsRef<Path>) -> StoreResult<VehicleMap> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    parse_vehicles(&raw)
}

/// Parse a JSON array of records, rejecting duplicate identifiers and
/// records that fail attribute validation.
pub fn parse_vehicles(raw: &str) -> StoreResult<VehicleMap> {
    let records: Vec<Vehicle> =
        serde_json::from_str(raw).map_err(|e| StoreError::Serialization(e.to_string()))?;

    let mut map = VehicleMap::new();
    for vehicle in records {
        vehicle
            .attributes
            .validate()
            .map_err(|e| StoreError::Serialization(format!("vehicle {}: {e}", vehicle.id)))?;
        let id = vehicle.id;
        if map.insert(id, vehicle).is_some() {
            return Err(StoreError::Conflict(id));
        }
    }
    Ok(map)
}
