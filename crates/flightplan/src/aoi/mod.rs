//! Areas of interest and flight paths as plain value types.
//!
//! - `Aoi`: one polygon ring tagged with the CRS its coordinates are in.
//! - `FlightPath`: a single- or multi-part polyline tagged with its CRS.
//! - `validate_ring`: rejects rings the planner cannot sweep (too few
//!   points, non-finite coordinates, zero area, self-intersections).
//!
//! Code cross-refs: `frame::extract_frame`, `footprint::build_footprint`

pub mod rand;

use serde::{Deserialize, Serialize};

use crate::cfg::AREA_REL_EPS;
use crate::error::PlanError;
use crate::geom::{signed_ring_area, Point2};
use crate::service::Crs;

/// Polygon to be covered, as an open or closed ring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aoi {
    pub crs: Crs,
    pub ring: Vec<Point2>,
}

impl Aoi {
    pub fn new(crs: Crs, ring: Vec<Point2>) -> Self {
        Self { crs, ring }
    }
}

/// Flight line; multi-part lines are flown part after part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightPath {
    pub crs: Crs,
    pub parts: Vec<Vec<Point2>>,
}

impl FlightPath {
    pub fn single(crs: Crs, points: Vec<Point2>) -> Self {
        Self {
            crs,
            parts: vec![points],
        }
    }

    /// All parts concatenated end-to-end (no gap filling).
    pub fn concatenated(&self) -> Vec<Point2> {
        self.parts.iter().flatten().copied().collect()
    }
}

/// Return the ring open (no repeated closing point, no consecutive duplicates)
/// or fail with `DegenerateAoi`.
pub fn validate_ring(ring: &[Point2]) -> Result<Vec<Point2>, PlanError> {
    if ring.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(PlanError::degenerate("ring has non-finite coordinates"));
    }
    let mut pts: Vec<Point2> = Vec::with_capacity(ring.len());
    for p in ring {
        if pts.last() != Some(p) {
            pts.push(*p);
        }
    }
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    if pts.len() < 3 {
        return Err(PlanError::degenerate(format!(
            "ring needs at least 3 distinct points, got {}",
            pts.len()
        )));
    }

    let extent = ring_extent(&pts);
    let area = signed_ring_area(&pts).abs();
    if extent <= 0.0 || area <= AREA_REL_EPS * extent * extent {
        return Err(PlanError::degenerate(format!("ring area {area} is zero")));
    }
    if let Some((a, b)) = first_self_intersection(&pts) {
        return Err(PlanError::degenerate(format!(
            "ring edges {a} and {b} intersect"
        )));
    }
    Ok(pts)
}

fn ring_extent(pts: &[Point2]) -> f64 {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in pts {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x).max(max_y - min_y)
}

/// First pair of non-adjacent edges that touch or cross. O(n²).
fn first_self_intersection(pts: &[Point2]) -> Option<(usize, usize)> {
    let n = pts.len();
    for i in 0..n {
        let (a1, a2) = (pts[i], pts[(i + 1) % n]);
        for k in (i + 2)..n {
            if i == 0 && k == n - 1 {
                continue;
            }
            let (b1, b2) = (pts[k], pts[(k + 1) % n]);
            if segments_intersect(a1, a2, b1, b2) {
                return Some((i, k));
            }
        }
    }
    None
}

#[inline]
fn cross(a: Point2, b: Point2, c: Point2) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

fn on_segment(a: Point2, b: Point2, p: Point2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_intersect(p1: Point2, p2: Point2, q1: Point2, q2: Point2) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}
