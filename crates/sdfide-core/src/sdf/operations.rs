//! SDF Operations - Boolean, blending, repetition

use super::{Aabb, Sdf, UNBOUNDED_EXTENT, transforms::Translate};
use glam::Vec3;
use std::f32::consts::TAU;

// ============================================================================
// Boolean Operations
// ============================================================================

/// Union of two SDFs (combine shapes)
pub struct Union<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
}

impl<A: Sdf, B: Sdf> Union<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Sdf, B: Sdf> Sdf for Union<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        min(self.a.distance(p), self.b.distance(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        zip_batches(&self.a, &self.b, points, min)
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds().union(&self.b.bounds())
    }
}

/// Subtraction of two SDFs (cut B from A)
pub struct Subtract<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
}

impl<A: Sdf, B: Sdf> Subtract<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Sdf, B: Sdf> Sdf for Subtract<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        max(self.a.distance(p), -self.b.distance(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        zip_batches(&self.a, &self.b, points, |d1, d2| max(d1, -d2))
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds() // Subtraction can only reduce, not expand
    }
}

/// Intersection of two SDFs (keep only overlap)
pub struct Intersect<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
}

impl<A: Sdf, B: Sdf> Intersect<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Sdf, B: Sdf> Sdf for Intersect<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        max(self.a.distance(p), self.b.distance(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        zip_batches(&self.a, &self.b, points, max)
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds().intersection(&self.b.bounds())
    }
}

// ============================================================================
// Smooth Boolean Operations
// ============================================================================

/// Smooth union with polynomial blending
pub struct SmoothUnion<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
    pub k: f32,
}

impl<A: Sdf, B: Sdf> SmoothUnion<A, B> {
    pub fn new(a: A, b: B, k: f32) -> Self {
        Self { a, b, k }
    }

    fn combine(&self, d1: f32, d2: f32) -> f32 {
        let h = (0.5 + 0.5 * (d2 - d1) / self.k).clamp(0.0, 1.0);
        lerp(d2, d1, h) - self.k * h * (1.0 - h)
    }
}

impl<A: Sdf, B: Sdf> Sdf for SmoothUnion<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        self.combine(self.a.distance(p), self.b.distance(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        zip_batches(&self.a, &self.b, points, |d1, d2| self.combine(d1, d2))
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds().union(&self.b.bounds()).expand(self.k)
    }
}

/// Smooth subtraction
pub struct SmoothSubtract<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
    pub k: f32,
}

impl<A: Sdf, B: Sdf> SmoothSubtract<A, B> {
    pub fn new(a: A, b: B, k: f32) -> Self {
        Self { a, b, k }
    }

    fn combine(&self, d1: f32, d2: f32) -> f32 {
        let h = (0.5 - 0.5 * (d2 + d1) / self.k).clamp(0.0, 1.0);
        lerp(d1, -d2, h) + self.k * h * (1.0 - h)
    }
}

impl<A: Sdf, B: Sdf> Sdf for SmoothSubtract<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        self.combine(self.a.distance(p), self.b.distance(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        zip_batches(&self.a, &self.b, points, |d1, d2| self.combine(d1, d2))
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds()
    }
}

/// Smooth intersection
pub struct SmoothIntersect<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
    pub k: f32,
}

impl<A: Sdf, B: Sdf> SmoothIntersect<A, B> {
    pub fn new(a: A, b: B, k: f32) -> Self {
        Self { a, b, k }
    }

    fn combine(&self, d1: f32, d2: f32) -> f32 {
        let h = (0.5 - 0.5 * (d2 - d1) / self.k).clamp(0.0, 1.0);
        lerp(d2, d1, h) + self.k * h * (1.0 - h)
    }
}

impl<A: Sdf, B: Sdf> Sdf for SmoothIntersect<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        self.combine(self.a.distance(p), self.b.distance(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        zip_batches(&self.a, &self.b, points, |d1, d2| self.combine(d1, d2))
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds().intersection(&self.b.bounds()).expand(self.k)
    }
}

/// Linear interpolation between two fields: `weight * b + (1 - weight) * a`
///
/// With a scalar texture as `b` this adds bumps to the surface of `a`.
pub struct Blend<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
    pub weight: f32,
}

impl<A: Sdf, B: Sdf> Blend<A, B> {
    pub fn new(a: A, b: B, weight: f32) -> Self {
        Self { a, b, weight }
    }

    fn combine(&self, d1: f32, d2: f32) -> f32 {
        self.weight * d2 + (1.0 - self.weight) * d1
    }
}

impl<A: Sdf, B: Sdf> Sdf for Blend<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        self.combine(self.a.distance(p), self.b.distance(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        zip_batches(&self.a, &self.b, points, |d1, d2| self.combine(d1, d2))
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds().union(&self.b.bounds())
    }
}

// ============================================================================
// Repetition Operations
// ============================================================================

/// Grid repetition
///
/// Each query snaps to the nearest cell index `round(p / spacing)`, clamped
/// to `[-count, count]` when limited, and takes the closest copy among the
/// `padding` neighbouring cells on every repeated axis. A zero spacing
/// component leaves that axis unrepeated.
pub struct Repeat<S: Sdf> {
    pub inner: S,
    pub spacing: Vec3,
    pub count: Option<Vec3>,
    pub padding: u32,
}

impl<S: Sdf> Repeat<S> {
    pub fn new(inner: S, spacing: Vec3, count: Option<Vec3>, padding: u32) -> Self {
        Self {
            inner,
            spacing,
            count,
            padding,
        }
    }

    fn padding_on(&self, spacing: f32) -> i32 {
        if spacing == 0.0 { 0 } else { self.padding as i32 }
    }
}

impl<S: Sdf> Sdf for Repeat<S> {
    fn distance(&self, p: Vec3) -> f32 {
        let repeated = self.spacing.cmpne(Vec3::ZERO);
        let q = Vec3::select(repeated, p / self.spacing, Vec3::ZERO);
        let mut index = q.round();
        if let Some(count) = self.count {
            index = index.clamp(-count, count);
        }

        let px = self.padding_on(self.spacing.x);
        let py = self.padding_on(self.spacing.y);
        let pz = self.padding_on(self.spacing.z);

        let mut d = f32::INFINITY;
        for z in -pz..=pz {
            for y in -py..=py {
                for x in -px..=px {
                    let cell = index + Vec3::new(x as f32, y as f32, z as f32);
                    d = min(d, self.inner.distance(p - self.spacing * cell));
                }
            }
        }
        d
    }

    fn bounds(&self) -> Aabb {
        let b = self.inner.bounds();
        let reach = match self.count {
            Some(count) => self.spacing.abs() * count,
            None => Vec3::splat(UNBOUNDED_EXTENT),
        };
        let reach = Vec3::select(self.spacing.cmpne(Vec3::ZERO), reach, Vec3::ZERO);
        Aabb::new(b.min - reach, b.max + reach)
    }
}

/// Copies arranged in a ring around the up axis
///
/// The shape is first pushed `offset` along X; queries fold their polar angle
/// into one sector and take the nearer of the two adjacent copies.
pub struct CircularArray<S: Sdf> {
    pub inner: Translate<S>,
    pub count: u32,
    pub sector: f32,
}

impl<S: Sdf> CircularArray<S> {
    pub fn new(inner: S, count: u32, offset: f32) -> Self {
        Self {
            inner: Translate::new(inner, Vec3::new(offset, 0.0, 0.0)),
            count,
            sector: TAU / count as f32,
        }
    }
}

impl<S: Sdf> Sdf for CircularArray<S> {
    fn distance(&self, p: Vec3) -> f32 {
        let r = p.x.hypot(p.y);
        let a = p.y.atan2(p.x).rem_euclid(self.sector);
        let (s0, c0) = (a - self.sector).sin_cos();
        let (s1, c1) = a.sin_cos();
        let d1 = self.inner.distance(Vec3::new(c0 * r, s0 * r, p.z));
        let d2 = self.inner.distance(Vec3::new(c1 * r, s1 * r, p.z));
        min(d1, d2)
    }

    fn bounds(&self) -> Aabb {
        let b = self.inner.bounds();
        let r = b
            .corners()
            .iter()
            .map(|c| c.x.hypot(c.y))
            .fold(0.0_f32, f32::max);
        Aabb::new(Vec3::new(-r, -r, b.min.z), Vec3::new(r, r, b.max.z))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Minimum that propagates NaN from either side, unlike `f32::min`.
fn min(a: f32, b: f32) -> f32 {
    if a < b || a.is_nan() { a } else { b }
}

/// Maximum that propagates NaN from either side, unlike `f32::max`.
fn max(a: f32, b: f32) -> f32 {
    if a > b || a.is_nan() { a } else { b }
}

fn zip_batches<A, B, F>(a: &A, b: &B, points: &[Vec3], f: F) -> Vec<f32>
where
    A: Sdf + ?Sized,
    B: Sdf + ?Sized,
    F: Fn(f32, f32) -> f32,
{
    let da = a.evaluate(points);
    let db = b.evaluate(points);
    da.into_iter().zip(db).map(|(d1, d2)| f(d1, d2)).collect()
}

// ============================================================================
// Tests
// ============================================================================
