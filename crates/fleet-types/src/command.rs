//! Partial-mutation commands.

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, check_not_blank, TypeError};
use crate::vehicle::VehicleId;

/// Overwrite the max speed of one vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateSpeed {
    pub id: VehicleId,
    pub speed: f64,
}

impl UpdateSpeed {
    pub fn new(id: VehicleId, speed: f64) -> Result<Self, TypeError> {
        check_non_negative("speed", speed)?;
        Ok(Self { id, speed })
    }
}

/// Overwrite the fuel type of one vehicle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFuelType {
    pub id: VehicleId,
    pub fuel_type: String,
}

impl UpdateFuelType {
    pub fn new(id: VehicleId, fuel_type: impl Into<String>) -> Result<Self, TypeError> {
        let fuel_type = fuel_type.into();
        check_not_blank("fuel_type", &fuel_type)?;
        Ok(Self { id, fuel_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_speed_rejects_negative() {
        assert!(UpdateSpeed::new(VehicleId::FIRST, -5.0).is_err());
        assert!(UpdateSpeed::new(VehicleId::FIRST, f64::INFINITY).is_err());
        assert_eq!(UpdateSpeed::new(VehicleId::FIRST, 0.0).unwrap().speed, 0.0);
    }

    #[test]
    fn update_fuel_rejects_blank() {
        assert!(UpdateFuelType::new(VehicleId::FIRST, "").is_err());
        assert_eq!(
            UpdateFuelType::new(VehicleId::FIRST, "diesel").unwrap().fuel_type,
            "diesel"
        );
    }
}
