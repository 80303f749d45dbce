use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use fleet_types::{
    BrandYearRange, DimensionRange, UpdateFuelType, UpdateSpeed, Vehicle, VehicleAttributes,
    VehicleId, WeightRange,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::{VehicleMap, VehicleStore};

/// In-memory, `BTreeMap`-based vehicle store.
///
/// A single `RwLock` guards the map: reads share it, and every mutation
/// (including a whole batch insert) holds the write half for its full
/// duration. Records are cloned on the way in and on the way out.
pub struct InMemoryVehicleStore {
    vehicles: RwLock<VehicleMap>,
}

impl InMemoryVehicleStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::with_vehicles(VehicleMap::new())
    }

    /// Create a store seeded with existing records.
    pub fn with_vehicles(vehicles: VehicleMap) -> Self {
        Self {
            vehicles: RwLock::new(vehicles),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, VehicleMap>> {
        self.vehicles
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, VehicleMap>> {
        self.vehicles
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    /// Linear scan returning copies of every matching record.
    fn select<F>(&self, describe: impl FnOnce() -> String, predicate: F) -> StoreResult<VehicleMap>
    where
        F: Fn(&Vehicle) -> bool,
    {
        let map = self.read()?;
        let found: VehicleMap = map
            .iter()
            .filter(|(_, vehicle)| predicate(vehicle))
            .map(|(id, vehicle)| (*id, vehicle.clone()))
            .collect();
        if found.is_empty() {
            return Err(StoreError::NoMatch(describe()));
        }
        Ok(found)
    }

    /// Arithmetic mean of `field` over one brand.
    fn brand_mean<F>(&self, brand: &str, field: F) -> StoreResult<f64>
    where
        F: Fn(&VehicleAttributes) -> f64,
    {
        let map = self.read()?;
        let (sum, count) = map
            .values()
            .filter(|vehicle| vehicle.attributes.brand == brand)
            .fold((0.0, 0usize), |(sum, count), vehicle| {
                (sum + field(&vehicle.attributes), count + 1)
            });
        if count == 0 {
            return Err(StoreError::NoMatch(format!("brand '{brand}'")));
        }
        Ok(sum / count as f64)
    }
}

/// The identifier after the current maximum, or the first one.
fn next_id(map: &VehicleMap) -> StoreResult<VehicleId> {
    match map.keys().next_back() {
        Some(max) => max.next().ok_or(StoreError::IdSpaceExhausted),
        None => Ok(VehicleId::FIRST),
    }
}

impl Default for InMemoryVehicleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleStore for InMemoryVehicleStore {
    fn find_all(&self) -> StoreResult<VehicleMap> {
        Ok(self.read()?.clone())
    }

    fn find_by_color_and_year(&self, color: Option<&str>, year: i32) -> StoreResult<VehicleMap> {
        self.select(
            || match color {
                Some(color) => format!("color '{color}' and year {year}"),
                None => format!("year {year}"),
            },
            |v| {
                v.attributes.fabrication_year == year
                    && color.map_or(true, |color| v.attributes.color == color)
            },
        )
    }

    fn find_by_brand_and_year_range(&self, query: &BrandYearRange) -> StoreResult<VehicleMap> {
        self.select(
            || {
                format!(
                    "brand '{}' between {} and {}",
                    query.brand, query.start_year, query.end_year
                )
            },
            |v| query.matches(&v.attributes.brand, v.attributes.fabrication_year),
        )
    }

    fn average_speed_by_brand(&self, brand: &str) -> StoreResult<f64> {
        self.brand_mean(brand, |attrs| attrs.max_speed)
    }

    fn average_capacity_by_brand(&self, brand: &str) -> StoreResult<f64> {
        self.brand_mean(brand, |attrs| f64::from(attrs.capacity))
    }

    fn find_by_fuel_type(&self, fuel_type: &str) -> StoreResult<VehicleMap> {
        self.select(
            || format!("fuel type '{fuel_type}'"),
            |v| v.attributes.fuel_type == fuel_type,
        )
    }

    fn find_by_transmission(&self, transmission: &str) -> StoreResult<VehicleMap> {
        self.select(
            || format!("transmission '{transmission}'"),
            |v| v.attributes.transmission == transmission,
        )
    }

    fn find_by_dimensions(&self, query: &DimensionRange) -> StoreResult<VehicleMap> {
        self.select(
            || format!("length {} and width {}", query.length, query.width),
            |v| query.contains(&v.attributes.dimensions),
        )
    }

    fn find_by_weight(&self, query: &WeightRange) -> StoreResult<VehicleMap> {
        self.select(
            || format!("weight {}", query.0),
            |v| query.contains(v.attributes.weight),
        )
    }

    fn create(&self, attributes: VehicleAttributes) -> StoreResult<Vehicle> {
        let mut map = self.write()?;
        let id = next_id(&map)?;
        if map.contains_key(&id) {
            return Err(StoreError::Conflict(id));
        }
        let vehicle = Vehicle::new(id, attributes);
        map.insert(id, vehicle.clone());
        Ok(vehicle)
    }

    fn create_batch(&self, batch: Vec<VehicleAttributes>) -> StoreResult<Vec<Vehicle>> {
        let mut map = self.write()?;

        // Allocate and check every identifier before touching the map.
        let mut ids = Vec::with_capacity(batch.len());
        let mut cursor = next_id(&map)?;
        for i in 0..batch.len() {
            if map.contains_key(&cursor) {
                return Err(StoreError::Conflict(cursor));
            }
            ids.push(cursor);
            if i + 1 < batch.len() {
                cursor = cursor.next().ok_or(StoreError::IdSpaceExhausted)?;
            }
        }

        let created: Vec<Vehicle> = ids
            .into_iter()
            .zip(batch)
            .map(|(id, attributes)| Vehicle::new(id, attributes))
            .collect();
        for vehicle in &created {
            map.insert(vehicle.id, vehicle.clone());
        }
        Ok(created)
    }

    fn update_speed(&self, command: &UpdateSpeed) -> StoreResult<Vehicle> {
        let mut map = self.write()?;
        let vehicle = map
            .get_mut(&command.id)
            .ok_or(StoreError::VehicleNotFound(command.id))?;
        vehicle.attributes.max_speed = command.speed;
        Ok(vehicle.clone())
    }

    fn update_fuel_type(&self, command: &UpdateFuelType) -> StoreResult<Vehicle> {
        let mut map = self.write()?;
        let vehicle = map
            .get_mut(&command.id)
            .ok_or(StoreError::VehicleNotFound(command.id))?;
        vehicle.attributes.fuel_type = command.fuel_type.clone();
        Ok(vehicle.clone())
    }

    fn delete(&self, id: VehicleId) -> StoreResult<Vehicle> {
        self.write()?
            .remove(&id)
            .ok_or(StoreError::VehicleNotFound(id))
    }

    fn count(&self) -> StoreResult<usize> {
        self.len()
    }
}

impl std::fmt::Debug for InMemoryVehicleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or_default();
        f.debug_struct("InMemoryVehicleStore")
            .field("vehicle_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_types::Dimensions;
    use proptest::prelude::*;

    fn id(n: u64) -> VehicleId {
        VehicleId::new(n).unwrap()
    }

    fn attrs(brand: &str, color: &str, year: i32, speed: f64) -> VehicleAttributes {
        VehicleAttributes {
            brand: brand.into(),
            model: "Model".into(),
            registration: format!("{brand}-{year}"),
            color: color.into(),
            fabrication_year: year,
            capacity: 4,
            max_speed: speed,
            fuel_type: "gas".into(),
            transmission: "manual".into(),
            weight: 1200.0,
            dimensions: Dimensions::new(1.5, 4.0, 1.8),
        }
    }

    fn seeded(entries: Vec<(u64, VehicleAttributes)>) -> InMemoryVehicleStore {
        let map = entries
            .into_iter()
            .map(|(n, a)| (id(n), Vehicle::new(id(n), a)))
            .collect();
        InMemoryVehicleStore::with_vehicles(map)
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    #[test]
    fn find_all_on_empty_store_is_empty_not_error() {
        let store = InMemoryVehicleStore::new();
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn find_all_returns_copies() {
        let store = seeded(vec![(1, attrs("A", "red", 2010, 100.0))]);
        let mut snapshot = store.find_all().unwrap();
        snapshot.get_mut(&id(1)).unwrap().attributes.max_speed = 1.0;
        assert_eq!(store.find_all().unwrap()[&id(1)].attributes.max_speed, 100.0);
    }

    // -----------------------------------------------------------------------
    // Creation and identifier allocation
    // -----------------------------------------------------------------------

    #[test]
    fn create_on_empty_store_assigns_first_id() {
        let store = InMemoryVehicleStore::new();
        assert_eq!(store.create(attrs("A", "red", 2010, 100.0)).unwrap().id, VehicleId::FIRST);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn create_uses_max_id_not_len() {
        let store = seeded(vec![
            (1, attrs("A", "red", 2010, 100.0)),
            (7, attrs("A", "red", 2011, 100.0)),
        ]);
        let new_id = store.create(attrs("B", "blue", 2020, 90.0)).unwrap().id;
        assert_eq!(new_id, id(8));
        assert!(store.find_all().unwrap().keys().all(|k| *k <= new_id));
    }

    #[test]
    fn create_writes_into_live_store() {
        let store = InMemoryVehicleStore::new();
        let created = store.create(attrs("A", "red", 2010, 100.0)).unwrap();
        let all = store.find_all().unwrap();
        assert_eq!(all[&created.id], created);
        assert_eq!(created.attributes.brand, "A");
    }

    #[test]
    fn create_after_deleting_max_reuses_nothing_below_max() {
        let store = seeded(vec![
            (1, attrs("A", "red", 2010, 100.0)),
            (2, attrs("A", "red", 2011, 100.0)),
            (3, attrs("A", "red", 2012, 100.0)),
        ]);
        store.delete(id(2)).unwrap();
        assert_eq!(store.create(attrs("B", "red", 2013, 1.0)).unwrap().id, id(4));
    }

    #[test]
    fn create_fails_when_id_space_exhausted() {
        let store = seeded(vec![(u64::MAX, attrs("A", "red", 2010, 100.0))]);
        assert!(matches!(
            store.create(attrs("B", "red", 2010, 1.0)),
            Err(StoreError::IdSpaceExhausted)
        ));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn create_batch_assigns_consecutive_ids() {
        let store = seeded(vec![(5, attrs("A", "red", 2010, 100.0))]);
        let created = store
            .create_batch(vec![
                attrs("B", "red", 2010, 1.0),
                attrs("C", "red", 2010, 2.0),
                attrs("D", "red", 2010, 3.0),
            ])
            .unwrap();
        let ids: Vec<VehicleId> = created.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![id(6), id(7), id(8)]);
        assert_eq!(created[1].attributes.brand, "C");
        let all = store.find_all().unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[&id(7)].attributes.brand, "C");
    }

    #[test]
    fn create_batch_is_all_or_nothing() {
        let store = seeded(vec![(u64::MAX - 1, attrs("A", "red", 2010, 100.0))]);
        // The first item fits at u64::MAX, the second overflows.
        let result = store.create_batch(vec![
            attrs("B", "red", 2010, 1.0),
            attrs("C", "red", 2010, 2.0),
        ]);
        assert!(matches!(result, Err(StoreError::IdSpaceExhausted)));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn create_empty_batch_is_noop() {
        let store = InMemoryVehicleStore::new();
        assert!(store.create_batch(Vec::new()).unwrap().is_empty());
        assert!(store.is_empty().unwrap());
    }

    // -----------------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------------

    #[test]
    fn color_and_year_returns_exact_subset() {
        let store = seeded(vec![
            (1, attrs("A", "red", 2010, 100.0)),
            (2, attrs("B", "red", 2011, 100.0)),
            (3, attrs("C", "blue", 2010, 100.0)),
            (4, attrs("D", "red", 2010, 100.0)),
        ]);
        let found = store.find_by_color_and_year(Some("red"), 2010).unwrap();
        assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![id(1), id(4)]);
    }

    #[test]
    fn year_alone_when_color_is_unconstrained() {
        let store = seeded(vec![
            (1, attrs("A", "red", 2010, 100.0)),
            (2, attrs("B", "red", 2011, 100.0)),
            (3, attrs("C", "blue", 2010, 100.0)),
        ]);
        let found = store.find_by_color_and_year(None, 2010).unwrap();
        assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![id(1), id(3)]);
        assert!(store
            .find_by_color_and_year(None, 1999)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn color_and_year_no_match_is_not_found() {
        let store = seeded(vec![(1, attrs("A", "red", 2010, 100.0))]);
        let err = store.find_by_color_and_year(Some("green"), 2010).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn brand_and_year_range_is_inclusive() {
        let store = seeded(vec![
            (1, attrs("A", "red", 2009, 100.0)),
            (2, attrs("A", "red", 2010, 100.0)),
            (3, attrs("A", "red", 2015, 100.0)),
            (4, attrs("A", "red", 2016, 100.0)),
            (5, attrs("B", "red", 2012, 100.0)),
        ]);
        let query = BrandYearRange::new("A", 2010, 2015).unwrap();
        let found = store.find_by_brand_and_year_range(&query).unwrap();
        assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![id(2), id(3)]);
    }

    #[test]
    fn fuel_and_transmission_filters() {
        let mut diesel = attrs("A", "red", 2010, 100.0);
        diesel.fuel_type = "diesel".into();
        diesel.transmission = "automatic".into();
        let store = seeded(vec![(1, diesel), (2, attrs("B", "red", 2010, 100.0))]);

        assert_eq!(store.find_by_fuel_type("diesel").unwrap().len(), 1);
        assert_eq!(store.find_by_transmission("manual").unwrap().len(), 1);
        assert!(store.find_by_fuel_type("electric").unwrap_err().is_not_found());
        assert!(store.find_by_transmission("cvt").unwrap_err().is_not_found());
    }

    #[test]
    fn dimensions_require_both_bounds() {
        let mut long = attrs("A", "red", 2010, 100.0);
        long.dimensions = Dimensions::new(1.0, 6.0, 2.0);
        let mut wide = attrs("B", "red", 2010, 100.0);
        wide.dimensions = Dimensions::new(1.0, 4.0, 5.5);
        let mut fits = attrs("C", "red", 2010, 100.0);
        fits.dimensions = Dimensions::new(1.0, 5.0, 0.0);
        let store = seeded(vec![(1, long), (2, wide), (3, fits)]);

        let query = DimensionRange::new(0.0, 5.0, 0.0, 5.0).unwrap();
        let found = store.find_by_dimensions(&query).unwrap();
        assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![id(3)]);
    }

    #[test]
    fn weight_filter() {
        let mut heavy = attrs("A", "red", 2010, 100.0);
        heavy.weight = 3000.0;
        let store = seeded(vec![(1, heavy), (2, attrs("B", "red", 2010, 100.0))]);

        let found = store.find_by_weight(&WeightRange::new(2000.0, 3000.0).unwrap()).unwrap();
        assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![id(1)]);
        assert!(store
            .find_by_weight(&WeightRange::new(0.0, 100.0).unwrap())
            .unwrap_err()
            .is_not_found());
    }

    // -----------------------------------------------------------------------
    // Aggregates
    // -----------------------------------------------------------------------

    #[test]
    fn average_speed_by_brand() {
        let store = seeded(vec![
            (1, attrs("b", "red", 2010, 100.0)),
            (2, attrs("b", "red", 2010, 200.0)),
            (3, attrs("c", "red", 2010, 900.0)),
        ]);
        assert_eq!(store.average_speed_by_brand("b").unwrap(), 150.0);
    }

    #[test]
    fn average_of_unknown_brand_is_not_found_not_zero() {
        let store = seeded(vec![(1, attrs("b", "red", 2010, 100.0))]);
        assert!(matches!(
            store.average_speed_by_brand("zzz"),
            Err(StoreError::NoMatch(_))
        ));
        assert!(store.average_capacity_by_brand("zzz").is_err());
    }

    #[test]
    fn average_capacity_by_brand() {
        let mut small = attrs("b", "red", 2010, 100.0);
        small.capacity = 2;
        let mut big = attrs("b", "red", 2010, 100.0);
        big.capacity = 7;
        let store = seeded(vec![(1, small), (2, big)]);
        assert_eq!(store.average_capacity_by_brand("b").unwrap(), 4.5);
    }

    // -----------------------------------------------------------------------
    // Updates and deletes
    // -----------------------------------------------------------------------

    #[test]
    fn update_speed_touches_only_one_field_of_one_record() {
        let store = seeded(vec![
            (1, attrs("A", "red", 2010, 100.0)),
            (2, attrs("B", "blue", 2011, 120.0)),
        ]);
        let before = store.find_all().unwrap();

        let updated = store
            .update_speed(&UpdateSpeed::new(id(2), 180.0).unwrap())
            .unwrap();
        assert_eq!(updated.attributes.max_speed, 180.0);

        let after = store.find_all().unwrap();
        assert_eq!(after[&id(1)], before[&id(1)]);
        let mut expected = before[&id(2)].clone();
        expected.attributes.max_speed = 180.0;
        assert_eq!(after[&id(2)], expected);
    }

    #[test]
    fn update_speed_missing_id_mutates_nothing() {
        let store = seeded(vec![(1, attrs("A", "red", 2010, 100.0))]);
        let before = store.find_all().unwrap();
        let err = store
            .update_speed(&UpdateSpeed::new(id(99), 1.0).unwrap())
            .unwrap_err();
        assert!(matches!(err, StoreError::VehicleNotFound(missing) if missing == id(99)));
        assert_eq!(store.find_all().unwrap(), before);
    }

    #[test]
    fn update_speed_looks_up_by_key_after_gaps() {
        let store = seeded(vec![
            (10, attrs("A", "red", 2010, 100.0)),
            (20, attrs("B", "red", 2010, 100.0)),
        ]);
        store.update_speed(&UpdateSpeed::new(id(20), 5.0).unwrap()).unwrap();
        assert_eq!(store.find_all().unwrap()[&id(20)].attributes.max_speed, 5.0);
    }

    #[test]
    fn update_fuel_type() {
        let store = seeded(vec![(1, attrs("A", "red", 2010, 100.0))]);
        let updated = store
            .update_fuel_type(&UpdateFuelType::new(id(1), "diesel").unwrap())
            .unwrap();
        assert_eq!(updated.attributes.fuel_type, "diesel");
        assert!(store
            .update_fuel_type(&UpdateFuelType::new(id(2), "diesel").unwrap())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn deleted_id_never_listed_again() {
        let store = seeded(vec![
            (1, attrs("A", "red", 2010, 100.0)),
            (2, attrs("B", "red", 2010, 100.0)),
        ]);
        let removed = store.delete(id(1)).unwrap();
        assert_eq!(removed.id, id(1));
        assert!(!store.find_all().unwrap().contains_key(&id(1)));
        assert!(matches!(store.delete(id(1)), Err(StoreError::VehicleNotFound(_))));
    }

    #[test]
    fn average_then_delete_then_filter_scenario() {
        let store = seeded(vec![
            (1, attrs("A", "red", 2010, 50.0)),
            (2, attrs("A", "red", 2010, 150.0)),
            (3, attrs("B", "red", 2010, 90.0)),
        ]);
        assert_eq!(store.average_speed_by_brand("A").unwrap(), 100.0);
        store.delete(id(3)).unwrap();
        assert!(store
            .find_by_transmission("automatic")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn debug_shows_count() {
        let store = seeded(vec![(1, attrs("A", "red", 2010, 100.0))]);
        assert!(format!("{store:?}").contains("vehicle_count: 1"));
    }

    proptest! {
        #[test]
        fn assigned_id_is_max_plus_one(
            seed_ids in proptest::collection::btree_set(1u64..1_000, 0..20),
            deletions in proptest::collection::vec(1u64..1_000, 0..10),
        ) {
            let store = seeded(
                seed_ids.iter().map(|n| (*n, attrs("A", "red", 2010, 1.0))).collect(),
            );
            for n in deletions {
                let _ = store.delete(id(n));
            }
            let expected = store
                .find_all()
                .unwrap()
                .keys()
                .next_back()
                .map_or(1, |max| max.get() + 1);

            let new_id = store.create(attrs("B", "blue", 2020, 2.0)).unwrap().id;
            prop_assert_eq!(new_id.get(), expected);
            let all = store.find_all().unwrap();
            prop_assert!(all.keys().all(|k| *k <= new_id));
        }

        #[test]
        fn batch_inserts_exactly_n_consecutive(
            seed_ids in proptest::collection::btree_set(1u64..1_000, 0..20),
            n in 0usize..8,
        ) {
            let store = seeded(
                seed_ids.iter().map(|s| (*s, attrs("A", "red", 2010, 1.0))).collect(),
            );
            let before = store.len().unwrap();
            let start = seed_ids.iter().next_back().map_or(1, |max| max + 1);

            let created = store
                .create_batch((0..n).map(|_| attrs("B", "red", 2010, 1.0)).collect())
                .unwrap();
            let expected: Vec<u64> = (start..start + n as u64).collect();
            prop_assert_eq!(created.iter().map(|v| v.id.get()).collect::<Vec<_>>(), expected);
            prop_assert_eq!(store.len().unwrap(), before + n);
        }
    }
}
