//! Mirrors and reflections
//!
//! Three different symmetries live here and are easy to confuse:
//!
//! - [`Reflect`]: reflection across an arbitrary plane (point + normal).
//!   Orientation-reversing, `det = -1`.
//! - [`PointMirror`]: inversion through a point, `p -> offset - p`. This is a
//!   half turn's worth of symmetry in every axis at once, not a plane
//!   reflection.
//! - [`AxisMirror`]: flips the canonical Z coordinate inside the frame the
//!   orientation primitive sets up for a target axis, then re-orients the
//!   result onto that axis.
//!
//! None of them validate their parameters. A zero normal or axis turns every
//! distance into NaN at evaluation time.

use crate::sdf::{Aabb, ORIGIN, Remap, Sdf, UP, evaluate_mapped, transforms::Orient};
use crate::vector::normalize;
use glam::{Mat3, Vec3};

// ============================================================================
// Plane reflection
// ============================================================================

/// Householder matrix reflecting across the plane through the origin with
/// the given normal: `M * v = v - 2 (v . n) n`.
///
/// The normal is normalized first. The rows below are written out as in the
/// usual row-vector formula and transposed into glam's column-major storage;
/// the matrix is symmetric so the values do not change, and it is applied as
/// `M * p` like every other matrix in this crate.
pub fn reflection_matrix(normal: Vec3) -> Mat3 {
    let Vec3 { x, y, z } = normalize(normal);
    Mat3::from_cols_array_2d(&[
        [1.0 - 2.0 * x * x, -2.0 * x * y, -2.0 * x * z],
        [-2.0 * x * y, 1.0 - 2.0 * y * y, -2.0 * y * z],
        [-2.0 * x * z, -2.0 * y * z, 1.0 - 2.0 * z * z],
    ])
    .transpose()
}

/// Reflection across the plane through `point` with normal `normal`
///
/// `distance(p) = inner.distance(M (p - point) + point)`.
pub struct Reflect<S: Sdf> {
    pub inner: S,
    pub point: Vec3,
    pub matrix: Mat3,
}

impl<S: Sdf> Reflect<S> {
    pub fn new(inner: S, point: Vec3, normal: Vec3) -> Self {
        Self {
            inner,
            point,
            matrix: reflection_matrix(normal),
        }
    }

    /// Reflect across the horizontal plane through the origin
    pub fn with_defaults(inner: S) -> Self {
        Self::new(inner, ORIGIN, UP)
    }

    fn image(&self, p: Vec3) -> Vec3 {
        self.matrix * (p - self.point) + self.point
    }
}

impl<S: Sdf> Sdf for Reflect<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(self.image(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        evaluate_mapped(&self.inner, points, |p| self.image(p))
    }

    fn bounds(&self) -> Aabb {
        // The reflection is its own inverse
        self.inner.bounds().map_corners(|c| self.image(c))
    }
}

// ============================================================================
// Point mirror
// ============================================================================

/// Inversion through `offset`: `distance(p) = inner.distance(offset - p)`
///
/// Applying it twice with the same offset gives back the original field.
pub struct PointMirror<S: Sdf> {
    pub inner: S,
    pub offset: Vec3,
}

impl<S: Sdf> PointMirror<S> {
    pub fn new(inner: S, offset: Vec3) -> Self {
        Self { inner, offset }
    }
}

impl<S: Sdf> Sdf for PointMirror<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(self.offset - p)
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        evaluate_mapped(&self.inner, points, |p| self.offset - p)
    }

    fn bounds(&self) -> Aabb {
        let b = self.inner.bounds();
        Aabb::new(self.offset - b.max, self.offset - b.min)
    }
}

// ============================================================================
// Axis mirror
// ============================================================================

fn flip_z(p: Vec3) -> Vec3 {
    Vec3::new(p.x, p.y, -p.z)
}

type FlippedZ<S> = Remap<Orient<S>, fn(Vec3) -> Vec3>;

/// Axis-agnostic Z flip
///
/// Evaluates as `orient(q -> orient(inner, axis)(flip_z(q)), axis)`:
/// the Z negation happens in the canonical frame, the wrapped field is
/// oriented onto `axis` inside the flip, and the whole composition is
/// oriented onto `axis` again. With `axis == Z` both orientations are the
/// identity and this is `inner(x, y, -z)`.
pub struct AxisMirror<S: Sdf> {
    composed: Orient<FlippedZ<S>>,
}

impl<S: Sdf> AxisMirror<S> {
    pub fn new(inner: S, axis: Vec3) -> Self {
        let flipped: FlippedZ<S> =
            Remap::new(Orient::new(inner, axis), flip_z as fn(Vec3) -> Vec3);
        Self {
            composed: Orient::new(flipped, axis),
        }
    }

    /// The direction this mirror was built for
    pub fn axis(&self) -> Vec3 {
        self.composed.axis
    }
}

impl<S: Sdf> Sdf for AxisMirror<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.composed.distance(p)
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        self.composed.evaluate(points)
    }

    fn bounds(&self) -> Aabb {
        // Inner orientation bounds, flipped, then oriented again
        let oriented = self.composed.inner.inner.inner.bounds();
        let flipped = oriented.map_corners(flip_z);
        let rotation = self.composed.inner.rotation;
        flipped.map_corners(|c| rotation * c)
    }
}
