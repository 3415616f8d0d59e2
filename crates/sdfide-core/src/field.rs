//! Terminal scalar fields used as surface texture
//!
//! These are not solids. Their zero sets are open lattices, so they are only
//! meant as the second operand of a blend with a real shape:
//!
//! ```rust
//! use sdfide_core::prelude::*;
//!
//! let bumpy = sphere(2.0).blend(sines(6.0, 0.1));
//! assert!(bumpy.distance(Vec3::ZERO) < 0.0);
//! ```

use crate::sdf::Sdf;
use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// `amplitude * sin(scale x) * sin(scale y) * sin(scale z)`
///
/// Bounded by `amplitude`, smooth, and periodic with period `2π / scale`
/// along each axis independently.
#[derive(Debug, Clone, Copy)]
pub struct Sines {
    pub scale: f32,
    pub amplitude: f32,
}

impl Sines {
    pub fn new(scale: f32, amplitude: f32) -> Self {
        Self { scale, amplitude }
    }
}

impl Sdf for Sines {
    fn distance(&self, p: Vec3) -> f32 {
        let s = self.scale;
        (s * p.x).sin() * (s * p.y).sin() * (s * p.z).sin() * self.amplitude
    }
}

/// Periodic triple-sine texture
pub fn sines(scale: f32, amplitude: f32) -> Sines {
    Sines::new(scale, amplitude)
}

/// Seeded Perlin texture, `amplitude * perlin(scale * p)`
pub struct NoiseField {
    noise: Perlin,
    pub scale: f32,
    pub amplitude: f32,
}

impl NoiseField {
    pub fn new(scale: f32, amplitude: f32) -> Self {
        Self::with_seed(0, scale, amplitude)
    }

    pub fn with_seed(seed: u32, scale: f32, amplitude: f32) -> Self {
        Self {
            noise: Perlin::new(seed),
            scale,
            amplitude,
        }
    }
}

impl Sdf for NoiseField {
    fn distance(&self, p: Vec3) -> f32 {
        let q = p.as_dvec3() * self.scale as f64;
        let n = self.noise.get([q.x, q.y, q.z]).clamp(-1.0, 1.0);
        n as f32 * self.amplitude
    }
}

/// Perlin texture with an explicit seed
pub fn noise_field(scale: f32, amplitude: f32, seed: u32) -> NoiseField {
    NoiseField::with_seed(seed, scale, amplitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{PI, TAU};

    fn sample_points() -> impl Iterator<Item = Vec3> {
        (0..343).map(|i| {
            let (x, y, z) = (i % 7, (i / 7) % 7, i / 49);
            Vec3::new(x as f32 * 0.37 - 1.1, y as f32 * 0.53 - 1.6, z as f32 * 0.29 - 0.9)
        })
    }

    #[test]
    fn sines_at_origin_is_zero() {
        assert_eq!(sines(6.0, 0.1).distance(Vec3::ZERO), 0.0);
    }

    #[test]
    fn sines_bounded_by_amplitude() {
        let f = sines(6.0, 0.1);
        for p in sample_points() {
            assert!(f.distance(p).abs() <= 0.1);
        }
    }

    #[test]
    fn sines_periodic_on_each_axis() {
        let s = 6.0;
        let f = sines(s, 0.1);
        let period = TAU / s;
        for p in sample_points().take(60) {
            for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                assert_relative_eq!(
                    f.distance(p + axis * period),
                    f.distance(p),
                    epsilon = 1e-5
                );
            }
        }
    }

    #[test]
    fn sines_zero_on_coordinate_planes() {
        let f = sines(3.0, 2.0);
        // Exactly zero where any coordinate is zero
        for p in [
            Vec3::new(0.0, 1.3, -0.4),
            Vec3::new(0.8, 0.0, 2.2),
            Vec3::new(-1.5, 0.6, 0.0),
        ] {
            assert_eq!(f.distance(p), 0.0);
        }
        // Other multiples of π/scale: f32 sin(π) is only approximately zero
        for n in [1.0, 2.0, -3.0] {
            let x = n * PI / 3.0;
            assert_relative_eq!(f.distance(Vec3::new(x, 0.7, 0.4)), 0.0, epsilon = 1e-5);
            assert_relative_eq!(f.distance(Vec3::new(0.7, x, 0.4)), 0.0, epsilon = 1e-5);
            assert_relative_eq!(f.distance(Vec3::new(0.7, 0.4, x)), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn sines_peak_reaches_amplitude() {
        let f = sines(1.0, 0.5);
        let q = PI / 2.0;
        assert_relative_eq!(f.distance(Vec3::splat(q)), 0.5, epsilon = 1e-6);
        assert_relative_eq!(f.distance(Vec3::new(-q, q, q)), -0.5, epsilon = 1e-6);
    }

    #[test]
    fn noise_field_bounded_and_deterministic() {
        let a = noise_field(2.0, 0.2, 7);
        let b = noise_field(2.0, 0.2, 7);
        for p in sample_points() {
            let d = a.distance(p);
            assert!(d.abs() <= 0.2);
            assert_eq!(d, b.distance(p));
        }
    }

    #[test]
    fn noise_field_vanishes_on_lattice() {
        // Perlin gradient noise is zero at integer lattice points
        let f = NoiseField::new(1.0, 1.0);
        assert_relative_eq!(f.distance(Vec3::new(1.0, 2.0, 3.0)), 0.0, epsilon = 1e-6);
    }
}
