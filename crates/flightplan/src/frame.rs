//! Sweep frame extraction.
//!
//! From the AOI's minimum-area oriented bounding rectangle, derive the axis
//! along which coverage lines are offset, its unit direction, and the two
//! anchor points every line is offset from.
//!
//! Conventions
//! - Corners are labelled by the rectangle's own orientation: walking the
//!   ring counter-clockwise from the lowest corner (ties: largest x) gives
//!   bottom_right → top_right → top_left → bottom_left.
//! - "vertical" runs top_left → bottom_left, "horizontal" runs
//!   bottom_right → bottom_left. The longer one becomes the sweep axis;
//!   `prefer_rotated` swaps the choice (90°-rotated sweep).
//! - The unit axis always points from the anchor edge into the rectangle.

use serde::{Deserialize, Serialize};

use crate::aoi::validate_ring;
use crate::cfg::CORNER_TIE_EPS;
use crate::error::PlanError;
use crate::geom::{between, normalized, offset, signed_ring_area, Point2, Vec2};
use crate::service::GeometryService;

/// Oriented rectangle with labelled corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    pub bottom_right: Point2,
    pub top_right: Point2,
    pub top_left: Point2,
    pub bottom_left: Point2,
}

impl OrientedRect {
    /// Label four corners given in ring order (either orientation).
    pub fn from_corners(corners: [Point2; 4]) -> Result<Self, PlanError> {
        let mut ring = corners.to_vec();
        let area = signed_ring_area(&ring);
        if !area.is_finite() || area == 0.0 {
            return Err(PlanError::degenerate("bounding rectangle has zero area"));
        }
        if area < 0.0 {
            ring.reverse();
        }
        let scale = ring
            .iter()
            .map(|p| p.coords.amax())
            .fold(1.0_f64, f64::max);
        let tie = CORNER_TIE_EPS * scale;
        let mut start = 0;
        for (k, p) in ring.iter().enumerate().skip(1) {
            let s = ring[start];
            if p.y < s.y - tie || ((p.y - s.y).abs() <= tie && p.x > s.x) {
                start = k;
            }
        }
        ring.rotate_left(start);
        Ok(Self {
            bottom_right: ring[0],
            top_right: ring[1],
            top_left: ring[2],
            bottom_left: ring[3],
        })
    }

    /// Corners in counter-clockwise ring order, starting at bottom_right.
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.bottom_right,
            self.top_right,
            self.top_left,
            self.bottom_left,
        ]
    }
}

/// Axis and anchors along which coverage lines are placed.
///
/// A line at signed distance `d` runs from `anchor_start + axis_normalized * d`
/// to `anchor_end + axis_normalized * d`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepFrame {
    pub axis: Vec2,
    pub axis_normalized: Vec2,
    pub anchor_start: Point2,
    pub anchor_end: Point2,
}

impl SweepFrame {
    #[inline]
    pub fn axis_length(&self) -> f64 {
        self.axis.norm()
    }

    /// Length of every line placed in this frame.
    #[inline]
    pub fn line_length(&self) -> f64 {
        between(self.anchor_start, self.anchor_end).norm()
    }

    /// Endpoints of the line at signed distance `distance` along the axis.
    #[inline]
    pub fn line_at(&self, distance: f64) -> (Point2, Point2) {
        (
            offset(self.anchor_start, self.axis_normalized, distance),
            offset(self.anchor_end, self.axis_normalized, distance),
        )
    }

    /// Derive the frame from a labelled rectangle.
    pub fn from_rect(rect: &OrientedRect, prefer_rotated: bool) -> Result<Self, PlanError> {
        let vertical = between(rect.top_left, rect.bottom_left);
        let horizontal = between(rect.bottom_right, rect.bottom_left);
        let mut use_vertical = vertical.norm() > horizontal.norm();
        if prefer_rotated {
            use_vertical = !use_vertical;
        }
        let frame = if use_vertical {
            Self {
                axis: vertical,
                axis_normalized: normalized(vertical)
                    .ok_or_else(|| PlanError::degenerate("vertical side has zero length"))?,
                anchor_start: rect.top_left,
                anchor_end: rect.top_right,
            }
        } else {
            Self {
                axis: horizontal,
                axis_normalized: normalized(horizontal)
                    .ok_or_else(|| PlanError::degenerate("horizontal side has zero length"))?
                    * -1.0,
                anchor_start: rect.top_left,
                anchor_end: rect.bottom_left,
            }
        };
        if frame.line_length() == 0.0 {
            return Err(PlanError::degenerate("anchor edge has zero length"));
        }
        Ok(frame)
    }
}

/// Validate the AOI ring (already in the coverage CRS) and extract its frame.
pub fn extract_frame<S: GeometryService>(
    service: &S,
    ring: &[Point2],
    prefer_rotated: bool,
) -> Result<SweepFrame, PlanError> {
    let ring = validate_ring(ring)?;
    let rect = service.oriented_bounding_box(&ring)?;
    let frame = SweepFrame::from_rect(&rect, prefer_rotated)?;
    tracing::debug!(
        axis_length = frame.axis_length(),
        line_length = frame.line_length(),
        prefer_rotated,
        "sweep frame"
    );
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::PlanarService;

    fn rect_ring(w: f64, h: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
            Point2::new(0.0, h),
        ]
    }

    #[test]
    fn corners_are_labelled_from_either_orientation() {
        let ccw = [
            Point2::new(0.0, 500.0),
            Point2::new(0.0, 0.0),
            Point2::new(1000.0, 0.0),
            Point2::new(1000.0, 500.0),
        ];
        let mut cw = ccw;
        cw.reverse();
        for corners in [ccw, cw] {
            let r = OrientedRect::from_corners(corners).unwrap();
            assert_eq!(r.bottom_right, Point2::new(1000.0, 0.0));
            assert_eq!(r.top_right, Point2::new(1000.0, 500.0));
            assert_eq!(r.top_left, Point2::new(0.0, 500.0));
            assert_eq!(r.bottom_left, Point2::new(0.0, 0.0));
        }
    }

    #[test]
    fn flat_rectangle_is_rejected() {
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ];
        assert!(matches!(
            OrientedRect::from_corners(corners),
            Err(PlanError::DegenerateAoi { .. })
        ));
    }

    #[test]
    fn wide_box_sweeps_along_horizontal_side() {
        let rect = OrientedRect::from_corners([
            Point2::new(1000.0, 0.0),
            Point2::new(1000.0, 500.0),
            Point2::new(0.0, 500.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap();
        let f = SweepFrame::from_rect(&rect, false).unwrap();
        assert!((f.axis_length() - 1000.0).abs() < 1e-12);
        // points from the left edge into the box
        assert!((f.axis_normalized - Vec2::new(1.0, 0.0)).norm() < 1e-12);
        assert_eq!(f.anchor_start, Point2::new(0.0, 500.0));
        assert_eq!(f.anchor_end, Point2::new(0.0, 0.0));
        let (a, b) = f.line_at(250.0);
        assert_eq!(a, Point2::new(250.0, 500.0));
        assert_eq!(b, Point2::new(250.0, 0.0));
    }

    #[test]
    fn rotated_preference_swaps_axis() {
        let rect = OrientedRect::from_corners([
            Point2::new(1000.0, 0.0),
            Point2::new(1000.0, 500.0),
            Point2::new(0.0, 500.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap();
        let f = SweepFrame::from_rect(&rect, true).unwrap();
        assert!((f.axis_length() - 500.0).abs() < 1e-12);
        // from the top edge downwards
        assert!((f.axis_normalized - Vec2::new(0.0, -1.0)).norm() < 1e-12);
        assert_eq!(f.anchor_start, Point2::new(0.0, 500.0));
        assert_eq!(f.anchor_end, Point2::new(1000.0, 500.0));
        assert!((f.line_length() - 1000.0).abs() < 1e-12);
    }

    #[test]
    fn tall_box_sweeps_along_vertical_side() {
        let svc = PlanarService::new();
        let f = extract_frame(&svc, &rect_ring(300.0, 900.0), false).unwrap();
        assert!((f.axis_length() - 900.0).abs() < 1e-6);
        assert!((f.axis_normalized - Vec2::new(0.0, -1.0)).norm() < 1e-9);
        assert!((f.line_length() - 300.0).abs() < 1e-6);
    }

    #[test]
    fn lines_of_a_rotated_square_stay_inside_its_box() {
        let svc = PlanarService::new();
        let th: f64 = 0.4;
        let (c, s) = (th.cos(), th.sin());
        let ring: Vec<Point2> = rect_ring(800.0, 200.0)
            .into_iter()
            .map(|p| Point2::new(c * p.x - s * p.y, s * p.x + c * p.y))
            .collect();
        let f = extract_frame(&svc, &ring, false).unwrap();
        assert!((f.axis_length() - 800.0).abs() < 1e-6);
        let (a, b) = f.line_at(f.axis_length() / 2.0);
        let mid = Point2::from((a.coords + b.coords) / 2.0);
        let center = Point2::new(c * 400.0 - s * 100.0, s * 400.0 + c * 100.0);
        assert!((mid - center).norm() < 1e-6);
    }

    #[test]
    fn degenerate_aoi_is_reported() {
        let svc = PlanarService::new();
        let line = vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(10.0, 10.0),
        ];
        assert!(matches!(
            extract_frame(&svc, &line, false),
            Err(PlanError::DegenerateAoi { .. })
        ));
    }
}
