//! Planar point/vector primitives.
//!
//! Purpose
//! - Points and free vectors are kept as distinct nalgebra types so that
//!   `point - point = vector` and `point + vector = point` are checked by the
//!   compiler.
//! - Small helpers for the operations the planner needs: normalization,
//!   perpendicular rotation at a given magnitude, linear offset.
//!
//! Code cross-refs: `frame::SweepFrame`, `footprint::segment_quads`, `service::PlanarService`

mod affine;
mod vector;

pub use affine::Affine2;
pub use vector::{
    between, normalized, normalized_or_zero, offset, perpendicular_ccw, perpendicular_cw,
    signed_ring_area,
};

/// Point in one planar CRS.
pub type Point2 = nalgebra::Point2<f64>;
/// Free 2D vector.
pub type Vec2 = nalgebra::Vector2<f64>;

#[cfg(test)]
mod tests;
