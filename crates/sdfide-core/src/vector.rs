//! Direction vector helpers

use glam::Vec3;

/// Scale `v` to unit length.
///
/// A zero vector yields NaN components. Callers rely on that: a degenerate
/// normal or axis must poison the distances it feeds rather than silently
/// fall back to some default direction.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    v / v.length()
}

/// Some unit vector perpendicular to `v`.
///
/// Crosses with whichever principal axis is least aligned with `v`.
pub fn perpendicular(v: Vec3) -> Vec3 {
    let a = v.abs();
    let other = if a.x <= a.y && a.x <= a.z {
        Vec3::X
    } else if a.y <= a.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    normalize(v.cross(other))
}
