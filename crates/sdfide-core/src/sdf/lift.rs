//! Lifting plain functions into fields
//!
//! [`remap`] turns a point map into a domain transform over an existing
//! field; [`field`] turns a point-to-scalar function into a terminal field.
//! Both are ordinary values implementing [`Sdf`], so they compose like any
//! built-in operator.

use super::{Aabb, Sdf, evaluate_mapped};
use glam::Vec3;

/// Domain transform defined by a point map
///
/// A point map says nothing about where the shape ends up, so the bounds are
/// the inner field's unless [`Remap::with_bounds`] gives better ones. Maps
/// that move the shape outside its own box need explicit bounds before grid
/// sampling.
pub struct Remap<S: Sdf, F> {
    pub inner: S,
    pub map: F,
    pub bounds: Option<Aabb>,
}

impl<S: Sdf, F> Remap<S, F>
where
    F: Fn(Vec3) -> Vec3 + Send + Sync,
{
    pub fn new(inner: S, map: F) -> Self {
        Self {
            inner,
            map,
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

impl<S: Sdf, F> Sdf for Remap<S, F>
where
    F: Fn(Vec3) -> Vec3 + Send + Sync,
{
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance((self.map)(p))
    }

    fn evaluate(&self, points: &[Vec3]) -> Vec<f32> {
        evaluate_mapped(&self.inner, points, &self.map)
    }

    fn bounds(&self) -> Aabb {
        self.bounds.unwrap_or_else(|| self.inner.bounds())
    }
}

/// Wrap `inner` so every query point goes through `map` first
pub fn remap<S, F>(inner: S, map: F) -> Remap<S, F>
where
    S: Sdf,
    F: Fn(Vec3) -> Vec3 + Send + Sync,
{
    Remap::new(inner, map)
}

/// Terminal field defined by a scalar function
pub struct Field<F> {
    pub f: F,
    pub bounds: Aabb,
}

impl<F> Sdf for Field<F>
where
    F: Fn(Vec3) -> f32 + Send + Sync,
{
    fn distance(&self, p: Vec3) -> f32 {
        (self.f)(p)
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

/// Lift a scalar function into a field with the default bounds
pub fn field<F>(f: F) -> Field<F>
where
    F: Fn(Vec3) -> f32 + Send + Sync,
{
    field_with_bounds(f, Aabb::cube(10.0))
}

/// Lift a scalar function into a field with known bounds
pub fn field_with_bounds<F>(f: F, bounds: Aabb) -> Field<F>
where
    F: Fn(Vec3) -> f32 + Send + Sync,
{
    Field { f, bounds }
}
