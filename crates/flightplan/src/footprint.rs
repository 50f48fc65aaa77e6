//! Sensor ground-coverage footprint of a flight line.
//!
//! Every segment of the (concatenated) line is widened by the half-width on
//! both sides into a quadrilateral; the quads are unioned by the geometry
//! service. Zero-length segments have no direction and contribute nothing.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::geom::{between, perpendicular_ccw, perpendicular_cw, signed_ring_area, Point2};
use crate::service::GeometryService;

/// One polygon of a footprint: open exterior ring plus holes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FootprintPolygon {
    pub exterior: Vec<Point2>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interiors: Vec<Vec<Point2>>,
}

impl FootprintPolygon {
    pub fn area(&self) -> f64 {
        signed_ring_area(&self.exterior).abs()
            - self
                .interiors
                .iter()
                .map(|r| signed_ring_area(r).abs())
                .sum::<f64>()
    }
}

/// Union of segment quads; several parts when the swaths are disjoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub parts: Vec<FootprintPolygon>,
}

impl Footprint {
    pub fn area(&self) -> f64 {
        self.parts.iter().map(FootprintPolygon::area).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Apply a fallible point map to every ring, keeping the structure.
    pub fn try_map_rings<F>(&self, mut f: F) -> Result<Footprint, PlanError>
    where
        F: FnMut(&[Point2]) -> Result<Vec<Point2>, PlanError>,
    {
        let mut parts = Vec::with_capacity(self.parts.len());
        for p in &self.parts {
            parts.push(FootprintPolygon {
                exterior: f(&p.exterior)?,
                interiors: p
                    .interiors
                    .iter()
                    .map(|r| f(r))
                    .collect::<Result<_, _>>()?,
            });
        }
        Ok(Footprint { parts })
    }
}

/// Quadrilateral covering `from → to` on both sides, counter-clockwise.
pub fn segment_quad(from: Point2, to: Point2, half_width: f64) -> [Point2; 4] {
    let v = between(from, to);
    let cw = perpendicular_cw(v, half_width);
    let ccw = perpendicular_ccw(v, half_width);
    [from + cw, to + cw, to + ccw, from + ccw]
}

/// Quads of all consecutive point pairs; degenerate segments are skipped.
pub fn segment_quads(points: &[Point2], half_width: f64) -> Vec<Vec<Point2>> {
    points
        .windows(2)
        .map(|w| segment_quad(w[0], w[1], half_width))
        .filter(|q| signed_ring_area(q) > 0.0)
        .map(|q| q.to_vec())
        .collect()
}

/// Footprint of a (multi-part) line; parts are concatenated end-to-end.
pub fn build_footprint<S: GeometryService>(
    service: &S,
    parts: &[Vec<Point2>],
    half_width: f64,
) -> Result<Footprint, PlanError> {
    if !(half_width.is_finite() && half_width > 0.0) {
        return Err(PlanError::params(format!(
            "half-width must be positive, got {half_width}"
        )));
    }
    let points: Vec<Point2> = parts.iter().flatten().copied().collect();
    let quads = segment_quads(&points, half_width);
    tracing::debug!(
        vertices = points.len(),
        quads = quads.len(),
        half_width,
        "building coverage footprint"
    );
    service.union(&quads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vec2;
    use crate::service::PlanarService;

    #[test]
    fn straight_segment_gives_a_swath_rectangle() {
        let svc = PlanarService::new();
        let line = vec![vec![Point2::new(0.0, 0.0), Point2::new(300.0, 400.0)]];
        let fp = build_footprint(&svc, &line, 50.0).unwrap();
        assert_eq!(fp.parts.len(), 1);
        assert!((fp.area() - 100.0 * 500.0).abs() < 1e-6);
        let q = segment_quad(line[0][0], line[0][1], 50.0);
        assert!(((q[0] - q[3]).norm() - 100.0).abs() < 1e-9);
        assert!(((q[1] - q[0]).norm() - 500.0).abs() < 1e-9);
        // cw side first
        assert!((q[0] - Point2::new(40.0, -30.0)).norm() < 1e-9);
    }

    #[test]
    fn zero_length_segment_contributes_nothing() {
        let p = Point2::new(3.0, 4.0);
        let q = segment_quad(p, p, 10.0);
        assert!(q.iter().all(|c| *c == p));
        assert!(segment_quads(&[p, p], 10.0).is_empty());
        let svc = PlanarService::new();
        let fp = build_footprint(&svc, &[vec![p, p, p + Vec2::new(10.0, 0.0)]], 1.0).unwrap();
        assert!((fp.area() - 20.0).abs() < 1e-9);
        assert!(build_footprint(&svc, &[vec![p]], 1.0).unwrap().is_empty());
    }

    #[test]
    fn parts_are_joined_end_to_end() {
        let svc = PlanarService::new();
        let parts = vec![
            vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)],
            vec![Point2::new(10.0, 10.0), Point2::new(0.0, 10.0)],
        ];
        // three segments: bottom, connecting leg, top (a U shape)
        let fp = build_footprint(&svc, &parts, 1.0).unwrap();
        assert_eq!(fp.parts.len(), 1);
        // 3 quads of 20, two unit overlaps at the corners
        assert!((fp.area() - 58.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_swaths_stay_separate() {
        let svc = PlanarService::new();
        let quads = vec![
            segment_quad(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 1.0).to_vec(),
            segment_quad(Point2::new(0.0, 50.0), Point2::new(10.0, 50.0), 1.0).to_vec(),
        ];
        let fp = svc.union(&quads).unwrap();
        assert_eq!(fp.parts.len(), 2);
        assert!((fp.area() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_half_width_is_rejected() {
        let svc = PlanarService::new();
        let line = vec![vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]];
        assert!(matches!(
            build_footprint(&svc, &line, 0.0),
            Err(PlanError::InvalidFlightParameters { .. })
        ));
    }
}
