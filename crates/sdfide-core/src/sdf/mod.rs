//! Signed Distance Functions (SDF) for 3D shape definition
//!
//! SDFs represent shapes as mathematical functions that return the distance
//! from any point in space to the nearest surface. Negative values are inside,
//! positive values are outside, and zero is exactly on the surface.
//!
//! ## Example
//!
//! ```rust
//! use sdfide_core::prelude::*;
//!
//! // Drill three orthogonal holes through a rounded cube
//! let body = sphere(1.1).intersect(box3(Vec3::splat(1.7)));
//! let c = cylinder(0.5);
//! let part = body - (c.orient(X) | c.orient(Y) | c.orient(Z));
//! assert!(part.distance(Vec3::ZERO) > 0.0);
//! ```

pub mod lift;
pub mod operations;
pub mod primitives;
pub mod transforms;

use crate::ease::Ease;
use crate::mirror::{AxisMirror, PointMirror, Reflect};
use glam::{Quat, Vec3};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};
use std::sync::Arc;

pub use lift::{Field, Remap, field, field_with_bounds, remap};

/// World origin
pub const ORIGIN: Vec3 = Vec3::ZERO;
/// Principal X axis
pub const X: Vec3 = Vec3::X;
/// Principal Y axis
pub const Y: Vec3 = Vec3::Y;
/// Principal Z axis
pub const Z: Vec3 = Vec3::Z;
/// Canonical axis of every oriented primitive
pub const UP: Vec3 = Vec3::Z;

/// Half-size used for the bounds of shapes that extend forever.
pub const UNBOUNDED_EXTENT: f32 = 1.0e4;

/// The core SDF trait - any type that can compute distance from a point
pub trait Sdf: Send + Sync {
    /// Calculate the signed distance from point `p` to the surface.
    ///
    /// - Returns negative values for points inside the shape
    /// - Returns positive values for points outside the shape
    /// - Returns zero for points exactly on the surface
    fn distance(&self, p: Vec3) -> f32;

    /// Evaluate a batch of points.
    ///
    /// The output is zip-aligned with `points`. Domain transforms override
    /// this to remap the whole batch into a fresh one before forwarding it.
    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        points.iter().map(|&p| self.distance(p)).collect()
    }

    /// Get an approximate bounding box for this SDF.
    /// Used for grid sampling.
    fn bounds(&self) -> Aabb {
        // Default: large bounding box, can be overridden for better performance
        Aabb::new(Vec3::splat(-10.0), Vec3::splat(10.0))
    }

    /// Blend radius requested by this operand, if any.
    ///
    /// Boolean combinators read it from their right-hand operand.
    fn smoothing(&self) -> Option<f32> {
        None
    }
}

/// Evaluate `inner` on a batch remapped point by point through `map`.
pub(crate) fn evaluate_mapped<S, F>(inner: &S, points: &[Vec3], map: F) -> Vec<f32>
where
    S: Sdf + ?Sized,
    F: Fn(Vec3) -> Vec3,
{
    let mapped: Vec<Vec3> = points.iter().map(|&p| map(p)).collect();
    inner.evaluate(&mapped)
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a cube centered at origin
    pub fn cube(half_size: f32) -> Self {
        Self::new(Vec3::splat(-half_size), Vec3::splat(half_size))
    }

    /// Box standing in for "all of space"
    pub fn unbounded() -> Self {
        Self::cube(UNBOUNDED_EXTENT)
    }

    /// Smallest box containing every point
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for p in points {
            min = min.min(p);
            max = max.max(p);
        }
        Self::new(min, max)
    }

    /// The eight corners
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of the image of this box under a point map.
    ///
    /// Exact for affine maps.
    pub fn map_corners(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        Self::from_points(self.corners().into_iter().map(f))
    }

    /// Expand the bounding box by a margin
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.min - Vec3::splat(margin),
            self.max + Vec3::splat(margin),
        )
    }

    /// Merge two bounding boxes
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Overlap of two bounding boxes (may be empty)
    pub fn intersection(&self, other: &Aabb) -> Self {
        Self::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Whether the box encloses any volume and has finite corners
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmplt(self.max).all()
    }

    /// Get the size of the bounding box
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn volume(&self) -> f32 {
        let s = self.size();
        s.x * s.y * s.z
    }
}

/// An SDF node that can be composed and transformed
///
/// Cloning shares the wrapped field. The optional `k` is the blend radius
/// the node asks for when it is the right operand of a boolean combinator.
#[derive(Clone)]
pub struct SdfNode {
    inner: Arc<dyn Sdf>,
    k: Option<f32>,
}

impl SdfNode {
    /// Create a new SDF node from any type implementing Sdf
    pub fn new<S: Sdf + 'static>(sdf: S) -> Self {
        Self {
            inner: Arc::new(sdf),
            k: None,
        }
    }

    /// Same field, carrying blend radius `k` into the next boolean operation
    pub fn k(mut self, k: f32) -> Self {
        self.k = Some(k);
        self
    }
}

impl Sdf for SdfNode {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(p)
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        self.inner.evaluate(points)
    }

    fn bounds(&self) -> Aabb {
        self.inner.bounds()
    }

    fn smoothing(&self) -> Option<f32> {
        self.k
    }
}

impl std::fmt::Debug for SdfNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdfNode")
            .field("bounds", &self.inner.bounds())
            .field("k", &self.k)
            .finish()
    }
}

/// Extension trait providing chainable operations on SDFs
pub trait SdfExt: Sdf + Sized + 'static {
    /// Erase the concrete type
    fn into_node(self) -> SdfNode {
        SdfNode::new(self)
    }

    /// Attach a blend radius for the next boolean operation
    fn k(self, k: f32) -> SdfNode {
        SdfNode::new(self).k(k)
    }

    // === Boolean Operations ===

    /// Union: combine two shapes (OR), smooth if `other` carries `k`
    fn union<S: Sdf + 'static>(self, other: S) -> SdfNode {
        match other.smoothing() {
            Some(k) => self.smooth_union(other, k),
            None => SdfNode::new(operations::Union::new(self, other)),
        }
    }

    /// Subtraction: cut shape `other` from `self`, smooth if `other` carries `k`
    fn subtract<S: Sdf + 'static>(self, other: S) -> SdfNode {
        match other.smoothing() {
            Some(k) => self.smooth_subtract(other, k),
            None => SdfNode::new(operations::Subtract::new(self, other)),
        }
    }

    /// Intersection: keep only where both shapes overlap (AND), smooth if
    /// `other` carries `k`
    fn intersect<S: Sdf + 'static>(self, other: S) -> SdfNode {
        match other.smoothing() {
            Some(k) => self.smooth_intersect(other, k),
            None => SdfNode::new(operations::Intersect::new(self, other)),
        }
    }

    /// Union with several shapes; `k` overrides each operand's own radius
    fn union_all<I>(self, others: I, k: Option<f32>) -> SdfNode
    where
        I: IntoIterator,
        I::Item: Sdf + 'static,
    {
        others
            .into_iter()
            .fold(SdfNode::new(self), |acc, b| match k.or(b.smoothing()) {
                Some(k) => acc.smooth_union(b, k),
                None => SdfNode::new(operations::Union::new(acc, b)),
            })
    }

    /// Intersection with several shapes; `k` overrides each operand's own radius
    fn intersect_all<I>(self, others: I, k: Option<f32>) -> SdfNode
    where
        I: IntoIterator,
        I::Item: Sdf + 'static,
    {
        others
            .into_iter()
            .fold(SdfNode::new(self), |acc, b| match k.or(b.smoothing()) {
                Some(k) => acc.smooth_intersect(b, k),
                None => SdfNode::new(operations::Intersect::new(acc, b)),
            })
    }

    // === Smooth Boolean Operations ===

    /// Smooth union with blend radius `k`
    fn smooth_union<S: Sdf + 'static>(self, other: S, k: f32) -> SdfNode {
        SdfNode::new(operations::SmoothUnion::new(self, other, k))
    }

    /// Smooth subtraction with blend radius `k`
    fn smooth_subtract<S: Sdf + 'static>(self, other: S, k: f32) -> SdfNode {
        SdfNode::new(operations::SmoothSubtract::new(self, other, k))
    }

    /// Smooth intersection with blend radius `k`
    fn smooth_intersect<S: Sdf + 'static>(self, other: S, k: f32) -> SdfNode {
        SdfNode::new(operations::SmoothIntersect::new(self, other, k))
    }

    /// Linear blend towards `other`, weighted by its `k` or one half
    fn blend<S: Sdf + 'static>(self, other: S) -> SdfNode {
        let weight = other.smoothing().unwrap_or(0.5);
        self.blend_by(other, weight)
    }

    /// Linear blend towards `other` with an explicit weight
    fn blend_by<S: Sdf + 'static>(self, other: S, weight: f32) -> SdfNode {
        SdfNode::new(operations::Blend::new(self, other, weight))
    }

    // === Transforms ===

    /// Translate (move) the shape
    fn translate(self, offset: Vec3) -> SdfNode {
        SdfNode::new(transforms::Translate::new(self, offset))
    }

    /// Translate along X axis
    fn translate_x(self, x: f32) -> SdfNode {
        self.translate(Vec3::new(x, 0.0, 0.0))
    }

    /// Translate along Y axis
    fn translate_y(self, y: f32) -> SdfNode {
        self.translate(Vec3::new(0.0, y, 0.0))
    }

    /// Translate along Z axis
    fn translate_z(self, z: f32) -> SdfNode {
        self.translate(Vec3::new(0.0, 0.0, z))
    }

    /// Rotate around the up axis (angle in radians)
    fn rotate(self, angle: f32) -> SdfNode {
        self.rotate_about(UP, angle)
    }

    /// Rotate around X axis (angle in radians)
    fn rotate_x(self, angle: f32) -> SdfNode {
        SdfNode::new(transforms::Rotate::new(self, Quat::from_rotation_x(angle)))
    }

    /// Rotate around Y axis (angle in radians)
    fn rotate_y(self, angle: f32) -> SdfNode {
        SdfNode::new(transforms::Rotate::new(self, Quat::from_rotation_y(angle)))
    }

    /// Rotate around Z axis (angle in radians)
    fn rotate_z(self, angle: f32) -> SdfNode {
        SdfNode::new(transforms::Rotate::new(self, Quat::from_rotation_z(angle)))
    }

    /// Rotate around arbitrary axis (angle in radians)
    fn rotate_about(self, axis: Vec3, angle: f32) -> SdfNode {
        SdfNode::new(transforms::Rotate::new(
            self,
            Quat::from_axis_angle(crate::vector::normalize(axis), angle),
        ))
    }

    /// Turn the shape so its canonical up axis points along `axis`
    fn orient(self, axis: Vec3) -> SdfNode {
        SdfNode::new(transforms::Orient::new(self, axis))
    }

    /// Uniform scale
    fn scale(self, factor: f32) -> SdfNode {
        SdfNode::new(transforms::Scale::new(self, factor))
    }

    // === Mirrors ===

    /// Reflect across the plane through `point` with normal `normal`
    fn reflect(self, point: Vec3, normal: Vec3) -> SdfNode {
        SdfNode::new(Reflect::new(self, point, normal))
    }

    /// Reflect across the horizontal plane through the origin
    fn reflect_default(self) -> SdfNode {
        SdfNode::new(Reflect::with_defaults(self))
    }

    /// Point symmetry through `offset` (not a plane reflection)
    fn mirror_point(self, offset: Vec3) -> SdfNode {
        SdfNode::new(PointMirror::new(self, offset))
    }

    /// Flip the canonical frame and re-orient onto `axis`
    fn mirror_axis(self, axis: Vec3) -> SdfNode {
        SdfNode::new(AxisMirror::new(self, axis))
    }

    // === Repetition ===

    /// Infinite repetition with given spacing; zero spacing leaves an axis alone
    fn repeat(self, spacing: Vec3) -> SdfNode {
        self.repeat_with(spacing, None, 0)
    }

    /// Repetition limited to `count` copies either side of the origin,
    /// checking `padding` neighbouring cells per axis
    fn repeat_with(self, spacing: Vec3, count: Option<Vec3>, padding: u32) -> SdfNode {
        SdfNode::new(operations::Repeat::new(self, spacing, count, padding))
    }

    /// `count` copies arranged around the up axis, `offset` from it
    fn circular_array(self, count: u32, offset: f32) -> SdfNode {
        SdfNode::new(operations::CircularArray::new(self, count, offset))
    }

    // === Deformations ===

    /// Twist around the up axis, `k` radians per unit height
    fn twist(self, k: f32) -> SdfNode {
        SdfNode::new(transforms::Twist::new(self, k))
    }

    /// Shear by `v` ramping in along the segment `p0`..`p1`
    fn bend_linear(self, p0: Vec3, p1: Vec3, v: Vec3, ease: Ease) -> SdfNode {
        SdfNode::new(transforms::BendLinear::new(self, p0, p1, v, ease))
    }

    /// Custom domain transform from a point map
    fn remap<F>(self, map: F) -> SdfNode
    where
        F: Fn(Vec3) -> Vec3 + Send + Sync + 'static,
    {
        SdfNode::new(remap(self, map))
    }

    /// Custom domain transform with known bounds
    fn remap_bounded<F>(self, map: F, bounds: Aabb) -> SdfNode
    where
        F: Fn(Vec3) -> Vec3 + Send + Sync + 'static,
    {
        SdfNode::new(remap(self, map).with_bounds(bounds))
    }
}

// Implement SdfExt for all types that implement Sdf
impl<T: Sdf + 'static> SdfExt for T {}

// === Operator sugar on nodes ===

impl<S: Sdf + 'static> BitOr<S> for SdfNode {
    type Output = SdfNode;

    fn bitor(self, rhs: S) -> SdfNode {
        self.union(rhs)
    }
}

impl<S: Sdf + 'static> BitAnd<S> for SdfNode {
    type Output = SdfNode;

    fn bitand(self, rhs: S) -> SdfNode {
        self.intersect(rhs)
    }
}

impl<S: Sdf + 'static> Sub<S> for SdfNode {
    type Output = SdfNode;

    fn sub(self, rhs: S) -> SdfNode {
        self.subtract(rhs)
    }
}

impl<S: Sdf + 'static> BitOrAssign<S> for SdfNode {
    fn bitor_assign(&mut self, rhs: S) {
        *self = self.clone().union(rhs);
    }
}

impl<S: Sdf + 'static> BitAndAssign<S> for SdfNode {
    fn bitand_assign(&mut self, rhs: S) {
        *self = self.clone().intersect(rhs);
    }
}

impl<S: Sdf + 'static> SubAssign<S> for SdfNode {
    fn sub_assign(&mut self, rhs: S) {
        *self = self.clone().subtract(rhs);
    }
}

// Re-exports
pub use operations::*;
pub use primitives::*;
pub use transforms::*;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn evaluate_matches_distance() {
        let f = sphere(1.0).translate(Vec3::new(0.5, 0.0, 0.0)).twist(0.3);
        let points = [
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-0.5, 0.25, -1.0),
        ];
        let batch = f.evaluate(&points);
        assert_eq!(batch.len(), points.len());
        for (p, d) in points.iter().zip(&batch) {
            assert_relative_eq!(*d, f.distance(*p), epsilon = 1e-6);
        }
    }

    #[test]
    fn evaluate_empty_batch() {
        assert!(sphere(1.0).evaluate(&[]).is_empty());
    }

    #[test]
    fn node_k_marks_smoothing() {
        let plain = sphere(1.0).into_node();
        assert_eq!(plain.smoothing(), None);
        let soft = plain.k(0.25);
        assert_eq!(soft.smoothing(), Some(0.25));
    }

    #[test]
    fn operator_union_uses_rhs_k() {
        let a = sphere(1.0).into_node();
        let b = sphere(1.0).translate_x(1.5);
        let hard = a.clone() | b.clone();
        let soft = a | b.k(0.5);

        // Smooth union bulges outward at the seam
        let seam = Vec3::new(0.75, 0.8, 0.0);
        assert!(soft.distance(seam) < hard.distance(seam));
    }

    #[test]
    fn operator_assign_forms() {
        let mut f = box3(Vec3::splat(2.0)).into_node();
        f -= sphere(0.5);
        assert!(f.distance(Vec3::ZERO) > 0.0);

        f |= sphere(0.25);
        assert!(f.distance(Vec3::ZERO) < 0.0);

        f &= sphere(0.1);
        assert_relative_eq!(f.distance(Vec3::ZERO), -0.1, epsilon = 1e-6);
    }

    #[test]
    fn union_all_folds_every_operand() {
        let s = sphere(0.5);
        let f = s.union_all(
            [s.translate_x(2.0), s.translate_y(2.0), s.translate_z(2.0)],
            None,
        );
        for p in [Vec3::ZERO, X * 2.0, Y * 2.0, Z * 2.0] {
            assert!(f.distance(p) < 0.0);
        }
        assert!(f.distance(Vec3::splat(1.0)) > 0.0);
    }

    #[test]
    fn aabb_intersection_and_validity() {
        let a = Aabb::cube(1.0);
        let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(3.0));
        let i = a.intersection(&b);
        assert_eq!(i.min, Vec3::splat(0.5));
        assert_eq!(i.max, Vec3::splat(1.0));
        assert!(i.is_valid());

        let far = Aabb::new(Vec3::splat(5.0), Vec3::splat(6.0));
        assert!(!a.intersection(&far).is_valid());
    }

    #[test]
    fn aabb_map_corners_affine() {
        let b = Aabb::cube(1.0).map_corners(|p| p * 2.0 + Vec3::X);
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -2.0));
        assert_eq!(b.max, Vec3::new(3.0, 2.0, 2.0));
        assert_relative_eq!(b.volume(), 64.0);
    }
}
