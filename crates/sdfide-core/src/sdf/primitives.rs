//! SDF Primitive shapes
//!
//! Primitives are centered at the origin and aligned with the up axis (Z).
//! Use transforms to position them.

use super::{Aabb, Sdf, UNBOUNDED_EXTENT};
use glam::{Vec2, Vec3};

// ============================================================================
// Constructor functions (ergonomic API)
// ============================================================================

/// Create a sphere with given radius
pub fn sphere(radius: f32) -> Sphere {
    Sphere::new(radius)
}

/// Create a box with given full size along each axis
pub fn box3(size: Vec3) -> Box3 {
    Box3::new(size * 0.5)
}

/// Create a cube with given size
pub fn cube(size: f32) -> Box3 {
    Box3::new(Vec3::splat(size * 0.5))
}

/// Create a box with given full size and rounded edges
pub fn rounded_box(size: Vec3, radius: f32) -> RoundedBox {
    RoundedBox::new(size * 0.5, radius)
}

/// Create an infinite cylinder along Z with given radius
pub fn cylinder(radius: f32) -> Cylinder {
    Cylinder::new(radius)
}

/// Create a finite cylinder between two end points
pub fn capped_cylinder(a: Vec3, b: Vec3, radius: f32) -> CappedCylinder {
    CappedCylinder::new(a, b, radius)
}

/// Create a Z-aligned cylinder of radius `ra`, edge radius `rb` and height `h`
pub fn rounded_cylinder(ra: f32, rb: f32, h: f32) -> RoundedCylinder {
    RoundedCylinder::new(ra, rb, h)
}

/// Create a capsule between two end points
pub fn capsule(a: Vec3, b: Vec3, radius: f32) -> Capsule {
    Capsule::new(a, b, radius)
}

/// Create a slab bounded along Z
pub fn slab_z(z0: f32, z1: f32) -> Slab {
    Slab::default().z(z0, z1)
}

// ============================================================================
// Primitive Structs
// ============================================================================

/// Sphere centered at origin
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Sdf for Sphere {
    fn distance(&self, p: Vec3) -> f32 {
        p.length() - self.radius
    }

    fn bounds(&self) -> Aabb {
        Aabb::cube(self.radius)
    }
}

/// Axis-aligned box (rectangular prism)
#[derive(Debug, Clone, Copy)]
pub struct Box3 {
    pub half_extents: Vec3,
}

impl Box3 {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }
}

impl Sdf for Box3 {
    fn distance(&self, p: Vec3) -> f32 {
        let q = p.abs() - self.half_extents;
        q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(-self.half_extents, self.half_extents)
    }
}

/// Box with rounded edges
#[derive(Debug, Clone, Copy)]
pub struct RoundedBox {
    pub half_extents: Vec3,
    pub radius: f32,
}

impl RoundedBox {
    pub fn new(half_extents: Vec3, radius: f32) -> Self {
        Self {
            half_extents,
            radius,
        }
    }
}

impl Sdf for RoundedBox {
    fn distance(&self, p: Vec3) -> f32 {
        let q = p.abs() - self.half_extents + Vec3::splat(self.radius);
        q.max(Vec3::ZERO).length() + q.max_element().min(0.0) - self.radius
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(-self.half_extents, self.half_extents)
    }
}

/// Infinite cylinder around the Z axis
#[derive(Debug, Clone, Copy)]
pub struct Cylinder {
    pub radius: f32,
}

impl Cylinder {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Sdf for Cylinder {
    fn distance(&self, p: Vec3) -> f32 {
        p.x.hypot(p.y) - self.radius
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec3::new(-self.radius, -self.radius, -UNBOUNDED_EXTENT),
            Vec3::new(self.radius, self.radius, UNBOUNDED_EXTENT),
        )
    }
}

/// Cylinder with flat caps between two arbitrary end points
#[derive(Debug, Clone, Copy)]
pub struct CappedCylinder {
    pub a: Vec3,
    pub b: Vec3,
    pub radius: f32,
}

impl CappedCylinder {
    pub fn new(a: Vec3, b: Vec3, radius: f32) -> Self {
        Self { a, b, radius }
    }
}

impl Sdf for CappedCylinder {
    fn distance(&self, p: Vec3) -> f32 {
        let ba = self.b - self.a;
        let pa = p - self.a;
        let baba = ba.dot(ba);
        let paba = pa.dot(ba);
        let x = (pa * baba - ba * paba).length() - self.radius * baba;
        let y = (paba - baba * 0.5).abs() - baba * 0.5;
        let x2 = x * x;
        let y2 = y * y * baba;
        let d = if x.max(y) < 0.0 {
            -x2.min(y2)
        } else {
            (if x > 0.0 { x2 } else { 0.0 }) + (if y > 0.0 { y2 } else { 0.0 })
        };
        d.signum() * d.abs().sqrt() / baba
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(self.a.min(self.b), self.a.max(self.b)).expand(self.radius)
    }
}

/// Z-aligned cylinder with rounded rims
#[derive(Debug, Clone, Copy)]
pub struct RoundedCylinder {
    pub ra: f32,
    pub rb: f32,
    pub half_height: f32,
}

impl RoundedCylinder {
    pub fn new(ra: f32, rb: f32, h: f32) -> Self {
        Self {
            ra,
            rb,
            half_height: h * 0.5,
        }
    }
}

impl Sdf for RoundedCylinder {
    fn distance(&self, p: Vec3) -> f32 {
        let d = Vec2::new(
            p.x.hypot(p.y) - self.ra + self.rb,
            p.z.abs() - self.half_height + self.rb,
        );
        d.x.max(d.y).min(0.0) + d.max(Vec2::ZERO).length() - self.rb
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec3::new(-self.ra, -self.ra, -self.half_height),
            Vec3::new(self.ra, self.ra, self.half_height),
        )
    }
}

/// Capsule (segment with a radius) between two end points
#[derive(Debug, Clone, Copy)]
pub struct Capsule {
    pub a: Vec3,
    pub b: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub fn new(a: Vec3, b: Vec3, radius: f32) -> Self {
        Self { a, b, radius }
    }
}

impl Sdf for Capsule {
    fn distance(&self, p: Vec3) -> f32 {
        let pa = p - self.a;
        let ba = self.b - self.a;
        let h = (pa.dot(ba) / ba.dot(ba)).clamp(0.0, 1.0);
        (pa - ba * h).length() - self.radius
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(self.a.min(self.b), self.a.max(self.b)).expand(self.radius)
    }
}

/// Region between pairs of axis-aligned planes
///
/// Every axis is optional; with no limits set the slab fills all of space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slab {
    pub x: Option<(f32, f32)>,
    pub y: Option<(f32, f32)>,
    pub z: Option<(f32, f32)>,
}

impl Slab {
    pub fn x(mut self, x0: f32, x1: f32) -> Self {
        self.x = Some((x0, x1));
        self
    }

    pub fn y(mut self, y0: f32, y1: f32) -> Self {
        self.y = Some((y0, y1));
        self
    }

    pub fn z(mut self, z0: f32, z1: f32) -> Self {
        self.z = Some((z0, z1));
        self
    }

    fn limits(&self) -> [(Option<(f32, f32)>, usize); 3] {
        [(self.x, 0), (self.y, 1), (self.z, 2)]
    }
}

impl Sdf for Slab {
    fn distance(&self, p: Vec3) -> f32 {
        self.limits()
            .iter()
            .filter_map(|&(range, axis)| range.map(|(lo, hi)| (lo - p[axis]).max(p[axis] - hi)))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    fn bounds(&self) -> Aabb {
        let mut b = Aabb::unbounded();
        for (range, axis) in self.limits() {
            if let Some((lo, hi)) = range {
                b.min[axis] = lo;
                b.max[axis] = hi;
            }
        }
        b
    }
}

// ============================================================================
// Tests
// ============================================================================
