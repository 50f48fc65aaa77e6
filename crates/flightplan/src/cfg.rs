//! Tolerance defaults (internal).
//!
//! Fixed constants; geometry in this crate works in projected units where
//! these magnitudes are far below any meaningful survey distance.

/// Vectors shorter than this are treated as zero (no direction).
pub(crate) const LENGTH_EPS: f64 = 1e-12;
/// Relative area threshold (area / extent²) under which a ring is degenerate.
pub(crate) const AREA_REL_EPS: f64 = 1e-12;
/// Tie-break tolerance when labelling rectangle corners.
pub(crate) const CORNER_TIE_EPS: f64 = 1e-9;
/// Largest number of coverage lines a single planning call may produce.
pub(crate) const MAX_LINES: usize = 1_000_000;
