//! SDF Transforms - Translation, rotation, orientation, scale, deformations

use super::{Aabb, Sdf, UNBOUNDED_EXTENT, UP, evaluate_mapped};
use crate::ease::Ease;
use crate::vector::{normalize, perpendicular};
use glam::{Quat, Vec3};
use std::f32::consts::PI;

// ============================================================================
// Basic Transforms
// ============================================================================

/// Translation transform
pub struct Translate<S: Sdf> {
    pub inner: S,
    pub offset: Vec3,
}

impl<S: Sdf> Translate<S> {
    pub fn new(inner: S, offset: Vec3) -> Self {
        Self { inner, offset }
    }
}

impl<S: Sdf> Sdf for Translate<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(p - self.offset)
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        evaluate_mapped(&self.inner, points, |p| p - self.offset)
    }

    fn bounds(&self) -> Aabb {
        let b = self.inner.bounds();
        Aabb::new(b.min + self.offset, b.max + self.offset)
    }
}

/// Rotation transform
pub struct Rotate<S: Sdf> {
    pub inner: S,
    pub rotation: Quat,
    pub inverse: Quat,
}

impl<S: Sdf> Rotate<S> {
    pub fn new(inner: S, rotation: Quat) -> Self {
        Self {
            inner,
            rotation,
            inverse: rotation.inverse(),
        }
    }
}

impl<S: Sdf> Sdf for Rotate<S> {
    fn distance(&self, p: Vec3) -> f32 {
        // Rotate point into local space
        self.inner.distance(self.inverse * p)
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        evaluate_mapped(&self.inner, points, |p| self.inverse * p)
    }

    fn bounds(&self) -> Aabb {
        self.inner.bounds().map_corners(|c| self.rotation * c)
    }
}

/// Rotation carrying `from` onto `to`, both unit length.
///
/// Identity when they already agree, a half turn about some perpendicular
/// when they are opposite. NaN inputs give a NaN rotation.
pub fn rotation_between(from: Vec3, to: Vec3) -> Quat {
    let d = from.dot(to);
    if d >= 1.0 {
        Quat::IDENTITY
    } else if d <= -1.0 {
        Quat::from_axis_angle(perpendicular(from), PI)
    } else {
        Quat::from_axis_angle(normalize(from.cross(to)), d.acos())
    }
}

/// Re-orient a shape so that its canonical up axis points along `axis`
///
/// Primitives aligned with Z (cylinders, slabs, twist) are laid along any
/// direction with this. `axis` is normalized first; a zero axis poisons
/// every distance with NaN.
pub struct Orient<S: Sdf> {
    pub inner: Rotate<S>,
    pub axis: Vec3,
}

impl<S: Sdf> Orient<S> {
    pub fn new(inner: S, axis: Vec3) -> Self {
        let rotation = rotation_between(UP, normalize(axis));
        Self {
            inner: Rotate::new(inner, rotation),
            axis,
        }
    }
}

impl<S: Sdf> Sdf for Orient<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(p)
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        self.inner.evaluate(points)
    }

    fn bounds(&self) -> Aabb {
        self.inner.bounds()
    }
}

/// Uniform scale transform
pub struct Scale<S: Sdf> {
    pub inner: S,
    pub factor: f32,
}

impl<S: Sdf> Scale<S> {
    pub fn new(inner: S, factor: f32) -> Self {
        Self { inner, factor }
    }
}

impl<S: Sdf> Sdf for Scale<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(p / self.factor) * self.factor
    }

    fn bounds(&self) -> Aabb {
        let b = self.inner.bounds();
        Aabb::from_points([b.min * self.factor, b.max * self.factor])
    }
}

// ============================================================================
// Deformation Transforms
// ============================================================================

/// Twist deformation around the up axis
pub struct Twist<S: Sdf> {
    pub inner: S,
    pub k: f32, // radians per unit along Z
}

impl<S: Sdf> Twist<S> {
    pub fn new(inner: S, k: f32) -> Self {
        Self { inner, k }
    }

    fn local(&self, p: Vec3) -> Vec3 {
        let (s, c) = (self.k * p.z).sin_cos();
        Vec3::new(c * p.x - s * p.y, s * p.x + c * p.y, p.z)
    }
}

impl<S: Sdf> Sdf for Twist<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(self.local(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        evaluate_mapped(&self.inner, points, |p| self.local(p))
    }

    fn bounds(&self) -> Aabb {
        // Any rotation about Z stays inside the circumscribed circle
        let b = self.inner.bounds();
        let rx = b.min.x.abs().max(b.max.x.abs());
        let ry = b.min.y.abs().max(b.max.y.abs());
        let r = rx.hypot(ry);
        Aabb::new(Vec3::new(-r, -r, b.min.z), Vec3::new(r, r, b.max.z))
    }
}

/// Linear bend: shear by `v`, ramping in along the segment `p0`..`p1`
///
/// Points before `p0` are untouched, points past `p1` are moved by the full
/// `v`, and the ramp in between follows `ease`.
pub struct BendLinear<S: Sdf> {
    pub inner: S,
    pub p0: Vec3,
    pub ab: Vec3,
    /// Stored negated: the query point moves opposite to the shape
    pub shift: Vec3,
    pub ease: Ease,
}

impl<S: Sdf> BendLinear<S> {
    pub fn new(inner: S, p0: Vec3, p1: Vec3, v: Vec3, ease: Ease) -> Self {
        Self {
            inner,
            p0,
            ab: p1 - p0,
            shift: -v,
            ease,
        }
    }

    fn local(&self, p: Vec3) -> Vec3 {
        let t = ((p - self.p0).dot(self.ab) / self.ab.dot(self.ab)).clamp(0.0, 1.0);
        p + self.shift * self.ease.apply(t)
    }
}

impl<S: Sdf> Sdf for BendLinear<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(self.local(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        evaluate_mapped(&self.inner, points, |p| self.local(p))
    }

    fn bounds(&self) -> Aabb {
        let b = self.inner.bounds();
        if b.size().max_element() >= UNBOUNDED_EXTENT {
            return b;
        }
        b.union(&Aabb::new(b.min - self.shift, b.max - self.shift))
    }
}
