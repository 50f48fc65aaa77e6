//! Overlap-controlled placement of parallel coverage lines.
//!
//! Line `i >= 1` sits at `distance(i) = 2w(1-o)·i - w` along the sweep axis
//! (`w` half-width, `o` overlap). Lines are produced while
//! `distance(i) <= L + w`, so the far edge of the AOI is always covered by a
//! line beyond its boundary. A call that would need more than `MAX_LINES`
//! lines fails with `InvalidFlightParameters`.

use serde::{Deserialize, Serialize};

use crate::cfg::MAX_LINES;
use crate::error::PlanError;
use crate::frame::SweepFrame;
use crate::geom::Point2;

/// Index of a coverage line and its signed distance along the sweep axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineOffset {
    pub index: usize,
    pub distance: f64,
}

impl LineOffset {
    /// Offset of line `index` (1-based).
    #[inline]
    pub fn at(index: usize, half_width: f64, overlap: f64) -> Self {
        Self {
            index,
            distance: line_spacing(half_width, overlap) * index as f64 - half_width,
        }
    }
}

/// One coverage line as an independent segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightLine {
    pub offset: LineOffset,
    pub start: Point2,
    pub end: Point2,
}

impl FlightLine {
    pub fn new(frame: &SweepFrame, offset: LineOffset) -> Self {
        let (start, end) = frame.line_at(offset.distance);
        Self { offset, start, end }
    }
}

/// Distance between neighbouring lines: `2w(1-o)`.
#[inline]
pub fn line_spacing(half_width: f64, overlap: f64) -> f64 {
    2.0 * half_width * (1.0 - overlap)
}

/// Reject a half-width `<= 0` or an overlap outside `[0, 1)`.
pub fn check_line_params(half_width: f64, overlap: f64) -> Result<(), PlanError> {
    if !(half_width.is_finite() && half_width > 0.0) {
        return Err(PlanError::params(format!(
            "half-width must be positive, got {half_width}"
        )));
    }
    if !(0.0..1.0).contains(&overlap) {
        return Err(PlanError::params(format!(
            "overlap must be in [0, 1), got {overlap}"
        )));
    }
    Ok(())
}

/// Reject line counts above `MAX_LINES` (or not finite) before anything is allocated.
pub(crate) fn check_line_count(count: f64) -> Result<usize, PlanError> {
    if !(count.is_finite() && count <= MAX_LINES as f64) {
        return Err(PlanError::params(format!(
            "{count} coverage lines exceed the limit of {MAX_LINES}; \
             the swath is too narrow for this AOI"
        )));
    }
    Ok(count.max(0.0) as usize)
}

/// Enumerate line offsets covering the frame's axis with the requested overlap.
pub fn place_lines(
    frame: &SweepFrame,
    half_width: f64,
    overlap: f64,
) -> Result<Vec<LineOffset>, PlanError> {
    check_line_params(half_width, overlap)?;
    let limit = frame.axis_length() + half_width;
    check_line_count(((limit + half_width) / line_spacing(half_width, overlap)).floor())?;
    let offsets: Vec<LineOffset> = (1..)
        .map(|i| LineOffset::at(i, half_width, overlap))
        .take_while(|o| o.distance <= limit)
        .collect();
    tracing::debug!(lines = offsets.len(), half_width, overlap, "placed coverage lines");
    Ok(offsets)
}

/// Lines in increasing index order, each as an independent segment.
pub fn flight_lines(frame: &SweepFrame, offsets: &[LineOffset]) -> Vec<FlightLine> {
    offsets.iter().map(|o| FlightLine::new(frame, *o)).collect()
}
