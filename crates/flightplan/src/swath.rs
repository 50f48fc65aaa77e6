//! Sensor swath model.
//!
//! The half-width is the one-sided ground distance covered from the flight
//! line: `tan(angle / 2) * altitude`. It is computed in meters and then
//! expressed in the linear unit of the CRS used for coverage arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Meters per degree on the equator (the host toolkit's conversion factor).
pub const METERS_PER_DEGREE: f64 = 111_319.490_793_273_57;
const METERS_PER_FOOT: f64 = 0.3048;
const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Sensor ground half-width in meters.
///
/// Pre: `0 <= opening_angle_deg < 180`, otherwise `InvalidSensorAngle`.
/// Post: `tan(radians(opening_angle_deg) / 2) * altitude_m`. A negative altitude
/// yields a negative width; callers treat any width `<= 0` as unusable.
pub fn half_width(opening_angle_deg: f64, altitude_m: f64) -> Result<f64, PlanError> {
    if !(0.0..180.0).contains(&opening_angle_deg) {
        return Err(PlanError::InvalidSensorAngle {
            angle_deg: opening_angle_deg,
        });
    }
    Ok((opening_angle_deg.to_radians() / 2.0).tan() * altitude_m)
}

/// Half-width converted to `unit`, rejected unless strictly positive and finite.
pub fn coverage_half_width(
    opening_angle_deg: f64,
    altitude_m: f64,
    unit: LinearUnit,
) -> Result<f64, PlanError> {
    let meters = half_width(opening_angle_deg, altitude_m)?;
    if !(meters.is_finite() && meters > 0.0) {
        return Err(PlanError::params(format!(
            "sensor half-width {meters} m is not positive (altitude {altitude_m} m)"
        )));
    }
    Ok(unit.from_meters(meters))
}

/// Linear unit of a planar CRS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinearUnit {
    #[default]
    Meters,
    Kilometers,
    Feet,
    NauticalMiles,
    Degrees,
}

impl LinearUnit {
    /// Size of one unit in meters.
    #[inline]
    pub fn meters_per_unit(self) -> f64 {
        match self {
            LinearUnit::Meters => 1.0,
            LinearUnit::Kilometers => 1000.0,
            LinearUnit::Feet => METERS_PER_FOOT,
            LinearUnit::NauticalMiles => METERS_PER_NAUTICAL_MILE,
            LinearUnit::Degrees => METERS_PER_DEGREE,
        }
    }

    #[inline]
    pub fn from_meters(self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    #[inline]
    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }
}
