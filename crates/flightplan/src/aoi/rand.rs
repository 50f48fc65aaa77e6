//! Seeded random AOIs (radial jitter + replay tokens).
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, stretch along x by `aspect`, and translate to `center`.
//! - The result is star-shaped around `center`, hence simple (never
//!   self-intersecting) and always accepted by `validate_ring`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::Point2;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter AOI sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct AoiCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude), clamped to [0, 0.9].
    pub radial_jitter: f64,
    /// Base radius in CRS units.
    pub base_radius: f64,
    /// Stretch factor along x (elongated survey areas).
    pub aspect: f64,
    pub center: Point2,
}

impl Default for AoiCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(8),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 5_000.0,
            aspect: 1.0,
            center: Point2::origin(),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random star-shaped AOI ring (counter-clockwise, open).
pub fn draw_aoi_radial(cfg: AoiCfg, tok: ReplayToken) -> Vec<Point2> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.base_radius.max(1e-6);
    let aspect = cfg.aspect.max(1e-3);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + (k as f64) * delta + jitter;
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
            Point2::new(
                cfg.center.x + th.cos() * r * aspect,
                cfg.center.y + th.sin() * r,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aoi::validate_ring;
    use crate::geom::signed_ring_area;

    #[test]
    fn draws_are_reproducible() {
        let tok = ReplayToken { seed: 7, index: 3 };
        let a = draw_aoi_radial(AoiCfg::default(), tok);
        let b = draw_aoi_radial(AoiCfg::default(), tok);
        assert_eq!(a, b);
        let c = draw_aoi_radial(AoiCfg::default(), ReplayToken { seed: 7, index: 4 });
        assert_ne!(a, c);
    }

    #[test]
    fn draws_are_valid_ccw_rings() {
        let cfg = AoiCfg {
            vertex_count: VertexCount::Uniform { min: 3, max: 16 },
            aspect: 3.0,
            ..AoiCfg::default()
        };
        for index in 0..50 {
            let ring = draw_aoi_radial(cfg, ReplayToken { seed: 2025, index });
            assert!(signed_ring_area(&ring) > 0.0);
            assert!(validate_ring(&ring).is_ok(), "draw {index} rejected");
        }
    }
}
