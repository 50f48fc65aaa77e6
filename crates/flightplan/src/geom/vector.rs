use super::{Point2, Vec2};
use crate::cfg::LENGTH_EPS;

/// Vector from `from` to `to`.
#[inline]
pub fn between(from: Point2, to: Point2) -> Vec2 {
    to - from
}

/// Unit vector along `v`, or `None` if `v` has no usable direction.
#[inline]
pub fn normalized(v: Vec2) -> Option<Vec2> {
    if !(v.x.is_finite() && v.y.is_finite()) {
        return None;
    }
    v.try_normalize(LENGTH_EPS)
}

/// Unit vector along `v`; the zero vector when `v` is (numerically) zero.
#[inline]
pub fn normalized_or_zero(v: Vec2) -> Vec2 {
    normalized(v).unwrap_or_else(Vec2::zeros)
}

/// `v` rotated 90° clockwise and scaled to `magnitude`. Zero for a zero `v`.
#[inline]
pub fn perpendicular_cw(v: Vec2, magnitude: f64) -> Vec2 {
    normalized_or_zero(Vec2::new(v.y, -v.x)) * magnitude
}

/// `v` rotated 90° counter-clockwise and scaled to `magnitude`. Zero for a zero `v`.
#[inline]
pub fn perpendicular_ccw(v: Vec2, magnitude: f64) -> Vec2 {
    normalized_or_zero(Vec2::new(-v.y, v.x)) * magnitude
}

/// `p` moved by `distance` along `direction` (not renormalized).
#[inline]
pub fn offset(p: Point2, direction: Vec2, distance: f64) -> Point2 {
    p + direction * distance
}

/// Shoelace area of an open ring; positive for counter-clockwise order.
pub fn signed_ring_area(ring: &[Point2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for k in 0..ring.len() {
        let p = ring[k];
        let q = ring[(k + 1) % ring.len()];
        acc += p.x * q.y - q.x * p.y;
    }
    0.5 * acc
}
