use std::sync::Arc;

use fleet_store::{VehicleMap, VehicleStore};
use fleet_types::{
    BrandYearRange, DimensionRange, UpdateFuelType, UpdateSpeed, Vehicle, VehicleAttributes,
    VehicleId, WeightRange,
};

use crate::error::{ServiceError, ServiceResult};

/// Validating facade over a [`VehicleStore`].
///
/// Cloning is cheap: clones share the same store.
#[derive(Clone)]
pub struct VehicleService {
    store: Arc<dyn VehicleStore>,
}

impl VehicleService {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    // ---- Queries ----

    pub fn find_all(&self) -> ServiceResult<VehicleMap> {
        Ok(self.store.find_all()?)
    }

    pub fn count(&self) -> ServiceResult<usize> {
        Ok(self.store.count()?)
    }

    /// Records fabricated in `year`, narrowed to `color` when one is given.
    ///
    /// A missing or blank color does not filter on color.
    pub fn find_by_color_and_year(
        &self,
        color: Option<&str>,
        year: i32,
    ) -> ServiceResult<VehicleMap> {
        let color = color.map(str::trim).filter(|c| !c.is_empty());
        Ok(self.store.find_by_color_and_year(color, year)?)
    }

    pub fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i32,
        end_year: i32,
    ) -> ServiceResult<VehicleMap> {
        let query = BrandYearRange::new(brand, start_year, end_year)?;
        Ok(self.store.find_by_brand_and_year_range(&query)?)
    }

    pub fn average_speed_by_brand(&self, brand: &str) -> ServiceResult<f64> {
        require("brand", brand)?;
        Ok(self.store.average_speed_by_brand(brand)?)
    }

    pub fn average_capacity_by_brand(&self, brand: &str) -> ServiceResult<f64> {
        require("brand", brand)?;
        Ok(self.store.average_capacity_by_brand(brand)?)
    }

    pub fn find_by_fuel_type(&self, fuel_type: &str) -> ServiceResult<VehicleMap> {
        require("fuel_type", fuel_type)?;
        Ok(self.store.find_by_fuel_type(fuel_type)?)
    }

    pub fn find_by_transmission(&self, transmission: &str) -> ServiceResult<VehicleMap> {
        require("transmission", transmission)?;
        Ok(self.store.find_by_transmission(transmission)?)
    }

    pub fn find_by_dimensions(&self, query: &DimensionRange) -> ServiceResult<VehicleMap> {
        Ok(self.store.find_by_dimensions(query)?)
    }

    pub fn find_by_weight(&self, min: f64, max: f64) -> ServiceResult<VehicleMap> {
        let query = WeightRange::new(min, max)?;
        Ok(self.store.find_by_weight(&query)?)
    }

    // ---- Commands ----

    /// Validate and insert one record, returning it with its new identifier.
    pub fn create(&self, attributes: VehicleAttributes) -> ServiceResult<Vehicle> {
        attributes.validate()?;
        Ok(self.store.create(attributes)?)
    }

    /// Validate every item, then insert the batch atomically.
    ///
    /// A single invalid item rejects the whole batch before the store is
    /// touched.
    pub fn create_batch(&self, batch: Vec<VehicleAttributes>) -> ServiceResult<Vec<Vehicle>> {
        for (index, attributes) in batch.iter().enumerate() {
            attributes
                .validate()
                .map_err(|e| ServiceError::Validation(format!("item {index}: {e}")))?;
        }
        Ok(self.store.create_batch(batch)?)
    }

    pub fn update_speed(&self, id: VehicleId, speed: f64) -> ServiceResult<Vehicle> {
        let command = UpdateSpeed::new(id, speed)?;
        Ok(self.store.update_speed(&command)?)
    }

    pub fn update_fuel_type(&self, id: VehicleId, fuel_type: &str) -> ServiceResult<Vehicle> {
        let command = UpdateFuelType::new(id, fuel_type)?;
        Ok(self.store.update_fuel_type(&command)?)
    }

    pub fn delete(&self, id: VehicleId) -> ServiceResult<Vehicle> {
        Ok(self.store.delete(id)?)
    }
}

impl std::fmt::Debug for VehicleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VehicleService").finish_non_exhaustive()
    }
}

fn require(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
