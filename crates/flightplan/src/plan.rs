//! Planning entry points.
//!
//! `Planner` wires the geometry service to the pure building blocks:
//! AOI → coverage CRS → sweep frame → lines (simple mode) or racetrack
//! (ordered mode) → back to the AOI's CRS → numbered waypoints.
//!
//! Distances supplied by callers (altitude, turn budget) are in meters and
//! are converted to the coverage CRS unit before any geometry is done.

use serde::{Deserialize, Serialize};

use crate::aoi::{Aoi, FlightPath};
use crate::error::PlanError;
use crate::footprint::{self, Footprint};
use crate::frame::{extract_frame, SweepFrame};
use crate::geom::Point2;
use crate::lines::{flight_lines, place_lines};
use crate::metrics::FlightStats;
use crate::racetrack::{sequence_lines, Strategy};
use crate::service::{Crs, GeometryService, PlanarService};
use crate::settings::PlannerSettings;
use crate::swath::coverage_half_width;
use crate::waypoint::{number_points, Tag, Waypoint};

/// Sensor with a validated opening angle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub name: String,
    pub opening_angle_deg: f64,
}

impl Sensor {
    pub fn new(name: impl Into<String>, opening_angle_deg: f64) -> Result<Self, PlanError> {
        if !(0.0..180.0).contains(&opening_angle_deg) {
            return Err(PlanError::InvalidSensorAngle {
                angle_deg: opening_angle_deg,
            });
        }
        Ok(Self {
            name: name.into(),
            opening_angle_deg,
        })
    }
}

/// Stateless planner over a geometry service.
#[derive(Clone, Debug)]
pub struct Planner<S> {
    service: S,
    coverage_crs: Option<Crs>,
    prefer_rotated: bool,
    tag: Tag,
}

impl<S: GeometryService> Planner<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            coverage_crs: None,
            prefer_rotated: false,
            tag: Tag::default(),
        }
    }

    /// Do coverage arithmetic in `crs` instead of the input's CRS.
    pub fn with_coverage_crs(mut self, crs: Crs) -> Self {
        self.coverage_crs = Some(crs);
        self
    }

    /// Sweep along the shorter side of the bounding box.
    pub fn with_prefer_rotated(mut self, prefer_rotated: bool) -> Self {
        self.prefer_rotated = prefer_rotated;
        self
    }

    /// Tag assigned to every generated waypoint.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn working_crs<'a>(&'a self, input: &'a Crs) -> &'a Crs {
        self.coverage_crs.as_ref().unwrap_or(input)
    }

    /// Sweep frame of the AOI in the coverage CRS.
    pub fn sweep_frame(&self, aoi: &Aoi) -> Result<SweepFrame, PlanError> {
        let crs = self.working_crs(&aoi.crs);
        let ring = self.service.transform(&aoi.ring, &aoi.crs, crs)?;
        extract_frame(&self.service, &ring, self.prefer_rotated)
    }

    fn finish(&self, points: Vec<Point2>, from: &Crs, to: &Crs) -> Result<Vec<Waypoint>, PlanError> {
        let points = self.service.transform(&points, from, to)?;
        if points.is_empty() {
            return Err(PlanError::empty("no coverage line was placed"));
        }
        Ok(number_points(points, &self.tag))
    }

    /// Simple mode: lines in increasing order, two waypoints per line,
    /// start anchor side first. Each pair is an independent segment.
    pub fn generate_coverage_lines(
        &self,
        aoi: &Aoi,
        sensor: &Sensor,
        altitude_m: f64,
        overlap: f64,
    ) -> Result<Vec<Waypoint>, PlanError> {
        tracing::info!(sensor = %sensor.name, altitude_m, overlap, "generating coverage lines");
        let crs = self.working_crs(&aoi.crs);
        let half_width = coverage_half_width(sensor.opening_angle_deg, altitude_m, crs.unit)?;
        let frame = self.sweep_frame(aoi)?;
        let offsets = place_lines(&frame, half_width, overlap)?;
        let points = flight_lines(&frame, &offsets)
            .into_iter()
            .flat_map(|l| [l.start, l.end])
            .collect();
        self.finish(points, crs, &aoi.crs)
    }

    /// Ordered mode: one continuous path whose turns stay within
    /// `max_turn_distance_m`. `algorithm` names a [`Strategy`].
    pub fn generate_racetrack(
        &self,
        aoi: &Aoi,
        sensor: &Sensor,
        altitude_m: f64,
        overlap: f64,
        max_turn_distance_m: f64,
        algorithm: &str,
    ) -> Result<Vec<Waypoint>, PlanError> {
        let strategy: Strategy = algorithm.parse()?;
        self.generate_racetrack_with(aoi, sensor, altitude_m, overlap, max_turn_distance_m, strategy)
    }

    pub fn generate_racetrack_with(
        &self,
        aoi: &Aoi,
        sensor: &Sensor,
        altitude_m: f64,
        overlap: f64,
        max_turn_distance_m: f64,
        strategy: Strategy,
    ) -> Result<Vec<Waypoint>, PlanError> {
        tracing::info!(
            sensor = %sensor.name,
            altitude_m,
            overlap,
            max_turn_distance_m,
            strategy = %strategy,
            "generating racetrack"
        );
        if !(max_turn_distance_m.is_finite() && max_turn_distance_m > 0.0) {
            return Err(PlanError::params(format!(
                "max turn distance must be positive, got {max_turn_distance_m}"
            )));
        }
        let crs = self.working_crs(&aoi.crs);
        let half_width = coverage_half_width(sensor.opening_angle_deg, altitude_m, crs.unit)?;
        let max_turn = crs.unit.from_meters(max_turn_distance_m);
        let frame = self.sweep_frame(aoi)?;
        let points = sequence_lines(&frame, half_width, overlap, max_turn, strategy)?
            .into_iter()
            .flat_map(|l| [l.start, l.end])
            .collect();
        self.finish(points, crs, &aoi.crs)
    }

    /// Ground coverage of a flown line, returned in the line's CRS.
    pub fn build_footprint(
        &self,
        path: &FlightPath,
        sensor: &Sensor,
        altitude_m: f64,
    ) -> Result<Footprint, PlanError> {
        tracing::info!(sensor = %sensor.name, altitude_m, parts = path.parts.len(), "building footprint");
        let crs = self.working_crs(&path.crs);
        let half_width = coverage_half_width(sensor.opening_angle_deg, altitude_m, crs.unit)?;
        let parts = path
            .parts
            .iter()
            .map(|p| self.service.transform(p, &path.crs, crs))
            .collect::<Result<Vec<_>, _>>()?;
        let fp = footprint::build_footprint(&self.service, &parts, half_width)?;
        fp.try_map_rings(|ring| self.service.transform(ring, crs, &path.crs))
    }

    /// Distance of a waypoint list, measured in the coverage CRS.
    pub fn flight_stats(&self, waypoints: &[Waypoint], crs: &Crs) -> Result<FlightStats, PlanError> {
        let work = self.working_crs(crs);
        let points: Vec<Point2> = waypoints.iter().map(|w| w.point).collect();
        let points = self.service.transform(&points, crs, work)?;
        Ok(FlightStats::measure(&points, work.unit))
    }
}

impl Planner<PlanarService> {
    /// Planner configured from settings (validated first).
    pub fn from_settings(settings: &PlannerSettings) -> Result<Self, PlanError> {
        settings.validate()?;
        let mut planner = Planner::new(settings.planar_service()?)
            .with_prefer_rotated(settings.prefer_rotated)
            .with_tag(settings.default_tag.clone());
        if let Some(crs) = &settings.coverage_crs {
            planner = planner.with_coverage_crs(crs.clone());
        }
        Ok(planner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Affine2, Vec2};
    use crate::swath::LinearUnit;

    fn box_aoi(crs: Crs, w: f64, h: f64) -> Aoi {
        Aoi::new(
            crs,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(w, 0.0),
                Point2::new(w, h),
                Point2::new(0.0, h),
            ],
        )
    }

    // tan(45°) · 100 = 100 m half-width
    fn sensor_90() -> Sensor {
        Sensor::new("wide", 90.0).unwrap()
    }

    #[test]
    fn sensor_angle_is_checked() {
        assert!(matches!(
            Sensor::new("bad", 180.0),
            Err(PlanError::InvalidSensorAngle { .. })
        ));
        assert!(Sensor::new("pinhole", 0.0).is_ok());
    }

    #[test]
    fn coverage_lines_over_a_box() {
        let planner = Planner::new(PlanarService::new());
        let aoi = box_aoi(Crs::metric("LOCAL"), 950.0, 400.0);
        let wps = planner
            .generate_coverage_lines(&aoi, &sensor_90(), 100.0, 0.0)
            .unwrap();
        assert_eq!(wps.len(), 10);
        let xs: Vec<f64> = wps.iter().step_by(2).map(|w| w.point.x).collect();
        for (x, expect) in xs.iter().zip([100.0, 300.0, 500.0, 700.0, 900.0]) {
            assert!((x - expect).abs() < 1e-6, "{xs:?}");
        }
        // start anchor side first on every line
        assert!(wps.iter().step_by(2).all(|w| (w.point.y - 400.0).abs() < 1e-6));
        assert_eq!(wps.last().unwrap().sequence_id, 10);
    }

    #[test]
    fn racetrack_threads_lines_and_rejects_unknown_names() {
        let planner = Planner::new(PlanarService::new()).with_tag(Tag::FlyBy);
        let aoi = box_aoi(Crs::metric("LOCAL"), 950.0, 400.0);
        let wps = planner
            .generate_racetrack(&aoi, &sensor_90(), 100.0, 0.0, 250.0, "Back and Forth")
            .unwrap();
        assert_eq!(wps.len(), 10);
        assert!(wps.iter().all(|w| w.tag == Tag::FlyBy));
        for k in 1..5 {
            let gap = (wps[2 * k].point - wps[2 * k - 1].point).norm();
            assert!(gap <= 250.0 + 1e-6);
        }
        let err = planner
            .generate_racetrack(&aoi, &sensor_90(), 100.0, 0.0, 250.0, "Zamboni")
            .unwrap_err();
        assert!(matches!(err, PlanError::UnsupportedAlgorithm { .. }));
        let err = planner
            .generate_racetrack(&aoi, &sensor_90(), 100.0, 0.0, -1.0, "Racetrack")
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidFlightParameters { .. }));
    }

    #[test]
    fn invalid_altitude_and_degenerate_aoi() {
        let planner = Planner::new(PlanarService::new());
        let aoi = box_aoi(Crs::metric("LOCAL"), 950.0, 400.0);
        assert!(matches!(
            planner.generate_coverage_lines(&aoi, &sensor_90(), 0.0, 0.0),
            Err(PlanError::InvalidFlightParameters { .. })
        ));
        assert!(matches!(
            planner.generate_coverage_lines(&aoi, &sensor_90(), 100.0, 1.0),
            Err(PlanError::InvalidFlightParameters { .. })
        ));
        let flat = box_aoi(Crs::metric("LOCAL"), 950.0, 0.0);
        assert!(matches!(
            planner.generate_coverage_lines(&flat, &sensor_90(), 100.0, 0.0),
            Err(PlanError::DegenerateAoi { .. })
        ));
    }

    #[test]
    fn coverage_crs_round_trip() {
        // AOI given in kilometers, planned in a meter grid shifted by 5 km
        let km = Crs::new("KM", LinearUnit::Kilometers);
        let grid = Crs::metric("GRID");
        let svc = PlanarService::new()
            .with_transform("KM", "GRID", Affine2::scale_translate(1000.0, Vec2::new(5000.0, 0.0)))
            .unwrap();
        let planner = Planner::new(svc).with_coverage_crs(grid);
        let aoi = box_aoi(km.clone(), 0.95, 0.4);
        let wps = planner
            .generate_coverage_lines(&aoi, &sensor_90(), 100.0, 0.0)
            .unwrap();
        assert_eq!(wps.len(), 10);
        assert!((wps[0].point.x - 0.1).abs() < 1e-9);
        assert!((wps[0].point.y - 0.4).abs() < 1e-9);
        let stats = planner.flight_stats(&wps[..2], &km).unwrap();
        assert!((stats.distance_km - 0.4).abs() < 1e-9);
        // missing transform is a service failure
        let other = box_aoi(Crs::metric("ELSEWHERE"), 950.0, 400.0);
        assert!(matches!(
            planner.generate_coverage_lines(&other, &sensor_90(), 100.0, 0.0),
            Err(PlanError::GeometryServiceFailure { .. })
        ));
    }

    #[test]
    fn footprint_of_a_line_in_its_own_crs() {
        let planner = Planner::new(PlanarService::new());
        let path = FlightPath::single(
            Crs::metric("LOCAL"),
            vec![Point2::new(0.0, 0.0), Point2::new(1000.0, 0.0)],
        );
        let fp = planner.build_footprint(&path, &sensor_90(), 100.0).unwrap();
        assert!((fp.area() - 200.0 * 1000.0).abs() < 1e-6);
    }

    #[test]
    fn from_settings_applies_preferences() {
        let settings: PlannerSettings = serde_json::from_str(
            r#"{"prefer_rotated": true, "default_tag": "LH 180"}"#,
        )
        .unwrap();
        let planner = Planner::from_settings(&settings).unwrap();
        let aoi = box_aoi(Crs::metric("LOCAL"), 950.0, 450.0);
        let frame = planner.sweep_frame(&aoi).unwrap();
        assert!((frame.axis_length() - 450.0).abs() < 1e-6);
        let wps = planner
            .generate_coverage_lines(&aoi, &sensor_90(), 100.0, 0.0)
            .unwrap();
        // lines at 100, 300, 500 across the short side
        assert_eq!(wps.len(), 6);
        assert_eq!(wps[0].tag, Tag::LeftHand180);
    }

    #[test]
    fn random_aois_yield_flyable_racetracks() {
        use crate::aoi::rand::{draw_aoi_radial, AoiCfg, ReplayToken, VertexCount};
        let planner = Planner::new(PlanarService::new());
        let cfg = AoiCfg {
            vertex_count: VertexCount::Uniform { min: 4, max: 12 },
            aspect: 2.5,
            ..AoiCfg::default()
        };
        let max_turn = 1500.0;
        for index in 0..16 {
            let ring = draw_aoi_radial(cfg, ReplayToken { seed: 11, index });
            let aoi = Aoi::new(Crs::metric("LOCAL"), ring);
            for strategy in Strategy::ALL {
                let wps = planner
                    .generate_racetrack_with(&aoi, &sensor_90(), 250.0, 0.1, max_turn, strategy)
                    .unwrap();
                assert_eq!(wps.len() % 2, 0);
                for k in 1..wps.len() / 2 {
                    let gap = (wps[2 * k].point - wps[2 * k - 1].point).norm();
                    assert!(gap <= max_turn + 1e-6, "{strategy} #{index}: {gap}");
                }
            }
        }
    }
}
