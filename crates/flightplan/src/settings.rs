//! Planner settings loaded by callers (JSON via serde).
//!
//! Every value is explicit input to a planning call; nothing here is global.
//! Absent or invalid values surface as `InvalidFlightParameters` (or
//! `InvalidSensorAngle` for a bad catalog entry) when they are used.

use std::collections::BTreeMap;

use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::geom::{Affine2, Vec2};
use crate::plan::Sensor;
use crate::racetrack::Strategy;
use crate::service::{Crs, PlanarService};
use crate::waypoint::Tag;

pub const DEFAULT_FLIGHT_SPEED_KMH: f64 = 200.0;
pub const DEFAULT_FLIGHT_ALTITUDE_M: f64 = 2000.0;
pub const MAX_FLIGHT_ALTITUDE_M: f64 = 9999.0;

/// Affine map between two named planar CRSs: `x ↦ matrix · x + translation`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformSpec {
    pub from: String,
    pub to: String,
    /// Row-major 2×2 matrix.
    pub matrix: [[f64; 2]; 2],
    #[serde(default)]
    pub translation: [f64; 2],
}

impl TransformSpec {
    pub fn affine(&self) -> Affine2 {
        let [[a, b], [c, d]] = self.matrix;
        Affine2 {
            m: Matrix2::new(a, b, c, d),
            t: Vec2::new(self.translation[0], self.translation[1]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Sensor catalog: name → opening angle in degrees.
    pub sensors: BTreeMap<String, f64>,
    pub overlap: f64,
    /// Meters; required for the racetrack mode.
    pub max_turn_distance: Option<f64>,
    pub prefer_rotated: bool,
    /// CRS for coverage arithmetic; the AOI's own CRS when absent.
    pub coverage_crs: Option<Crs>,
    pub flight_speed_kmh: f64,
    pub flight_altitude_m: f64,
    pub strategy: Strategy,
    pub default_tag: Tag,
    pub transforms: Vec<TransformSpec>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            sensors: BTreeMap::new(),
            overlap: 0.0,
            max_turn_distance: None,
            prefer_rotated: false,
            coverage_crs: None,
            flight_speed_kmh: DEFAULT_FLIGHT_SPEED_KMH,
            flight_altitude_m: DEFAULT_FLIGHT_ALTITUDE_M,
            strategy: Strategy::BackAndForth,
            default_tag: Tag::FlyOver,
            transforms: Vec::new(),
        }
    }
}

impl PlannerSettings {
    /// Check every scalar; the first offending value is reported.
    pub fn validate(&self) -> Result<(), PlanError> {
        for (name, &angle) in &self.sensors {
            if !(0.0..180.0).contains(&angle) {
                tracing::warn!(sensor = %name, angle, "sensor angle out of range");
                return Err(PlanError::InvalidSensorAngle { angle_deg: angle });
            }
        }
        if !(0.0..1.0).contains(&self.overlap) {
            return Err(PlanError::params(format!(
                "overlap must be in [0, 1), got {}",
                self.overlap
            )));
        }
        if let Some(d) = self.max_turn_distance {
            if !(d.is_finite() && d > 0.0) {
                return Err(PlanError::params(format!(
                    "max turn distance must be positive, got {d}"
                )));
            }
        }
        if !(self.flight_speed_kmh.is_finite() && self.flight_speed_kmh > 0.0) {
            return Err(PlanError::params(format!(
                "flight speed must be positive, got {}",
                self.flight_speed_kmh
            )));
        }
        if !(self.flight_altitude_m > 0.0 && self.flight_altitude_m <= MAX_FLIGHT_ALTITUDE_M) {
            return Err(PlanError::params(format!(
                "flight altitude must be in (0, {MAX_FLIGHT_ALTITUDE_M}] m, got {}",
                self.flight_altitude_m
            )));
        }
        Ok(())
    }

    /// Catalog lookup; an unknown name is an invalid parameter.
    pub fn sensor(&self, name: &str) -> Result<Sensor, PlanError> {
        let angle = self
            .sensors
            .get(name)
            .ok_or_else(|| PlanError::params(format!("unknown sensor '{name}'")))?;
        Sensor::new(name, *angle)
    }

    pub fn max_turn_distance(&self) -> Result<f64, PlanError> {
        self.max_turn_distance
            .ok_or_else(|| PlanError::params("max turn distance is not set"))
    }

    /// Planar adapter with every configured transform registered.
    pub fn planar_service(&self) -> Result<PlanarService, PlanError> {
        let mut svc = PlanarService::new();
        for t in &self.transforms {
            svc.register(&t.from, &t.to, t.affine())?;
        }
        Ok(svc)
    }
}
