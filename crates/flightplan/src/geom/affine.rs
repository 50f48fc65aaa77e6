use nalgebra::Matrix2;

use super::{Point2, Vec2};

/// 2D affine map: `x ↦ M x + t`.
///
/// Used to describe a transform between two planar CRSs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vec2,
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vec2::zeros(),
        }
    }

    /// Uniform scale followed by a translation.
    #[inline]
    pub fn scale_translate(scale: f64, t: Vec2) -> Self {
        Self {
            m: Matrix2::identity() * scale,
            t,
        }
    }

    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    #[inline]
    pub fn apply(&self, p: Point2) -> Point2 {
        Point2::from(self.m * p.coords + self.t)
    }

    /// `self ∘ other` (apply `other` first).
    #[inline]
    pub fn compose(&self, other: &Affine2) -> Affine2 {
        Affine2 {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }
}
