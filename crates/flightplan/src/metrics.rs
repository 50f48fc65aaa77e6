//! Flight distance and duration of an ordered point list.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::geom::Point2;
use crate::swath::LinearUnit;

/// Planar length of a flight path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightStats {
    pub distance_km: f64,
    pub waypoint_count: usize,
}

impl FlightStats {
    /// Sum of segment lengths; coordinates are in `unit`.
    pub fn measure(points: &[Point2], unit: LinearUnit) -> Self {
        let length: f64 = points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
        Self {
            distance_km: unit.to_meters(length) / 1000.0,
            waypoint_count: points.len(),
        }
    }

    /// Hours needed at `speed_kmh`.
    pub fn duration_hours(&self, speed_kmh: f64) -> Result<f64, PlanError> {
        if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
            return Err(PlanError::params(format!(
                "flight speed must be greater than zero, got {speed_kmh} km/h"
            )));
        }
        Ok(self.distance_km / speed_kmh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_sums_segments_in_kilometers() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(3000.0, 4000.0),
            Point2::new(3000.0, 0.0),
        ];
        let s = FlightStats::measure(&pts, LinearUnit::Meters);
        assert!((s.distance_km - 9.0).abs() < 1e-12);
        assert_eq!(s.waypoint_count, 3);
        let s = FlightStats::measure(&pts, LinearUnit::Feet);
        assert!((s.distance_km - 9.0 * 0.3048).abs() < 1e-12);
    }

    #[test]
    fn duration_at_default_speed() {
        let s = FlightStats::measure(&[Point2::new(0.0, 0.0), Point2::new(0.0, 300.0)], LinearUnit::Kilometers);
        assert!((s.duration_hours(200.0).unwrap() - 1.5).abs() < 1e-12);
        assert!(matches!(
            s.duration_hours(0.0),
            Err(PlanError::InvalidFlightParameters { .. })
        ));
    }

    #[test]
    fn short_paths_have_zero_length() {
        assert_eq!(FlightStats::measure(&[], LinearUnit::Meters).distance_km, 0.0);
        assert_eq!(
            FlightStats::measure(&[Point2::new(1.0, 1.0)], LinearUnit::Degrees).distance_km,
            0.0
        );
    }
}
