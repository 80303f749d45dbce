//! Typed filter queries.
//!
//! Every bound is inclusive. Constructors validate their inputs so that a
//! query value which exists is always well-formed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, check_not_blank, TypeError};
use crate::vehicle::Dimensions;

/// Exact brand match combined with an inclusive fabrication-year window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandYearRange {
    pub brand: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl BrandYearRange {
    pub fn new(brand: impl Into<String>, start_year: i32, end_year: i32) -> Result<Self, TypeError> {
        let brand = brand.into();
        check_not_blank("brand", &brand)?;
        if start_year > end_year {
            return Err(TypeError::range(
                "year",
                format!("start year {start_year} is after end year {end_year}"),
            ));
        }
        Ok(Self {
            brand,
            start_year,
            end_year,
        })
    }

    pub fn matches(&self, brand: &str, year: i32) -> bool {
        brand == self.brand && (self.start_year..=self.end_year).contains(&year)
    }
}

/// Inclusive, non-negative numeric interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(field: &'static str, min: f64, max: f64) -> Result<Self, TypeError> {
        check_non_negative(field, min)?;
        check_non_negative(field, max)?;
        if min > max {
            return Err(TypeError::range(field, format!("min {min} is greater than max {max}")));
        }
        Ok(Self { min, max })
    }

    /// Parse a `"{min}-{max}"` span such as `"1.5-4.25"`.
    pub fn parse_span(field: &'static str, span: &str) -> Result<Self, TypeError> {
        let (min, max) = span
            .split_once('-')
            .ok_or_else(|| TypeError::range(field, format!("expected 'min-max', got '{span}'")))?;
        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| TypeError::range(field, format!("'{s}' is not a number")))
        };
        Self::new(field, parse(min)?, parse(max)?)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Length and width windows that must both hold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DimensionRange {
    pub length: Range,
    pub width: Range,
}

impl DimensionRange {
    pub fn new(min_length: f64, max_length: f64, min_width: f64, max_width: f64) -> Result<Self, TypeError> {
        Ok(Self {
            length: Range::new("length", min_length, max_length)?,
            width: Range::new("width", min_width, max_width)?,
        })
    }

    pub fn contains(&self, dimensions: &Dimensions) -> bool {
        self.length.contains(dimensions.length) && self.width.contains(dimensions.width)
    }
}

/// Weight window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightRange(pub Range);

impl WeightRange {
    pub fn new(min: f64, max: f64) -> Result<Self, TypeError> {
        Range::new("weight", min, max).map(Self)
    }

    pub fn contains(&self, weight: f64) -> bool {
        self.0.contains(weight)
    }
}
