use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, check_not_blank, TypeError};

/// Positive integer identifier of a vehicle record.
///
/// Identifiers are assigned by the store on creation and never chosen by
/// clients. Zero is not a valid identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct VehicleId(u64);

impl VehicleId {
    /// The identifier handed out by an empty store.
    pub const FIRST: VehicleId = VehicleId(1);

    /// Create an identifier, rejecting zero.
    pub fn new(value: u64) -> Result<Self, TypeError> {
        if value == 0 {
            return Err(TypeError::InvalidId("identifier must be positive".into()));
        }
        Ok(Self(value))
    }

    /// The raw integer value.
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The identifier immediately after this one, or `None` on overflow.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl TryFrom<u64> for VehicleId {
    type Error = TypeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VehicleId> for u64 {
    fn from(id: VehicleId) -> Self {
        id.0
    }
}

impl FromStr for VehicleId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|_| TypeError::InvalidId(format!("'{s}' is not a positive integer")))?;
        Self::new(value)
    }
}

impl fmt::Debug for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({})", self.0)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical dimensions of a vehicle, in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

impl Dimensions {
    pub fn new(height: f64, length: f64, width: f64) -> Self {
        Self {
            height,
            length,
            width,
        }
    }

    pub fn validate(&self) -> Result<(), TypeError> {
        check_non_negative("height", self.height)?;
        check_non_negative("length", self.length)?;
        check_non_negative("width", self.width)
    }
}

/// Every field of a vehicle record except its identifier.
///
/// This is the creation payload. On the wire the dimensions are flattened
/// into the same object, so the JSON keys are `brand`, `model`,
/// `registration`, `color`, `year`, `passengers`, `max_speed`, `fuel_type`,
/// `transmission`, `weight`, `height`, `length`, and `width`. All keys are
/// required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleAttributes {
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    #[serde(rename = "year")]
    pub fabrication_year: i32,
    #[serde(rename = "passengers")]
    pub capacity: u32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    #[serde(flatten)]
    pub dimensions: Dimensions,
}

impl VehicleAttributes {
    /// Check the field-level invariants a record must satisfy before it is
    /// admitted to the store.
    pub fn validate(&self) -> Result<(), TypeError> {
        check_not_blank("brand", &self.brand)?;
        check_not_blank("fuel_type", &self.fuel_type)?;
        check_not_blank("transmission", &self.transmission)?;
        check_non_negative("max_speed", self.max_speed)?;
        check_non_negative("weight", self.weight)?;
        self.dimensions.validate()
    }
}

/// A complete vehicle record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(flatten)]
    pub attributes: VehicleAttributes,
}

impl Vehicle {
    pub fn new(id: VehicleId, attributes: VehicleAttributes) -> Self {
        Self { id, attributes }
    }
}
