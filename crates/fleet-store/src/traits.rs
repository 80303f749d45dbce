use std::collections::BTreeMap;

use fleet_types::{
    BrandYearRange, DimensionRange, UpdateFuelType, UpdateSpeed, Vehicle, VehicleAttributes,
    VehicleId, WeightRange,
};

use crate::error::StoreResult;

/// A snapshot of records keyed by identifier.
pub type VehicleMap = BTreeMap<VehicleId, Vehicle>;

/// Vehicle record store.
///
/// All implementations must satisfy these invariants:
/// - Identifiers are unique across live records.
/// - A record exists fully or not at all.
/// - Reads return copies. Mutations are serialized against each other and
///   never observed half-applied by a concurrent read.
/// - Subset filters and brand aggregates that select nothing return a
///   not-found error; `find_all` on an empty store returns an empty map.
pub trait VehicleStore: Send + Sync {
    /// Copy of every record.
    fn find_all(&self) -> StoreResult<VehicleMap>;

    /// Records fabricated in `year` whose color equals `color`.
    ///
    /// `None` leaves color unconstrained.
    fn find_by_color_and_year(&self, color: Option<&str>, year: i32) -> StoreResult<VehicleMap>;

    /// Records of the given brand fabricated inside the inclusive year window.
    fn find_by_brand_and_year_range(&self, query: &BrandYearRange) -> StoreResult<VehicleMap>;

    /// Mean max speed across the given brand.
    fn average_speed_by_brand(&self, brand: &str) -> StoreResult<f64>;

    /// Mean passenger capacity across the given brand.
    fn average_capacity_by_brand(&self, brand: &str) -> StoreResult<f64>;

    fn find_by_fuel_type(&self, fuel_type: &str) -> StoreResult<VehicleMap>;

    fn find_by_transmission(&self, transmission: &str) -> StoreResult<VehicleMap>;

    /// Records whose length and width both fall inside the query windows.
    fn find_by_dimensions(&self, query: &DimensionRange) -> StoreResult<VehicleMap>;

    fn find_by_weight(&self, query: &WeightRange) -> StoreResult<VehicleMap>;

    /// Insert a record under `max(id) + 1` and return the stored record.
    fn create(&self, attributes: VehicleAttributes) -> StoreResult<Vehicle>;

    /// Insert records under consecutive identifiers starting at `max(id) + 1`.
    ///
    /// Either every record is inserted or none is. The stored records are
    /// returned in input order.
    fn create_batch(&self, batch: Vec<VehicleAttributes>) -> StoreResult<Vec<Vehicle>>;

    /// Overwrite one record's max speed and return the updated record.
    fn update_speed(&self, command: &UpdateSpeed) -> StoreResult<Vehicle>;

    /// Overwrite one record's fuel type and return the updated record.
    fn update_fuel_type(&self, command: &UpdateFuelType) -> StoreResult<Vehicle>;

    /// Remove a record and return it.
    fn delete(&self, id: VehicleId) -> StoreResult<Vehicle>;

    /// Number of live records.
    fn count(&self) -> StoreResult<usize> {
        self.find_all().map(|all| all.len())
    }
}
