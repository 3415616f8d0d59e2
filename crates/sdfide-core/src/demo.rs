//! Showcase compositions
//!
//! Each function builds a complete part from the field algebra. They double as
//! end-to-end exercises of the mirrors and textures.

use crate::ease::Ease;
use crate::field::{noise_field, sines};
use crate::sdf::{
    SdfExt, SdfNode, X, Y, Z, box3, capped_cylinder, capsule, cylinder, rounded_box,
    rounded_cylinder, slab_z, sphere,
};
use crate::{Error, Result};
use glam::Vec3;
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Rounded cube with three orthogonal bores
pub fn sample() -> SdfNode {
    let mut f = sphere(1.1).intersect(box3(Vec3::splat(1.7)));
    let c = cylinder(0.5);
    f -= c.orient(X) | c.orient(Y) | c.orient(Z);
    f
}

/// Knurled handle with a central bore and two vent holes
pub fn knurling() -> SdfNode {
    let mut f = rounded_cylinder(1.0, 0.1, 5.0).into_node();

    let x = box3(Vec3::new(1.0, 1.0, 4.0))
        .rotate(PI / 4.0)
        .circular_array(24, 1.6);
    let x = x.clone().twist(0.75) | x.twist(-0.75);
    f -= x.k(0.1);

    f -= cylinder(0.5).k(0.1);

    let c = cylinder(0.25).orient(X);
    f -= c.clone().translate(Z * -2.5).k(0.1);
    f -= c.translate(Z * 2.5).k(0.1);
    f
}

/// Flat disc with a hub bore and sixteen rim notches
pub fn gearlike() -> SdfNode {
    gearlike2(0.1)
}

/// Four spheres joined to a hub along the three axes
pub fn blobby() -> SdfNode {
    let s = sphere(0.75);
    let s = s.translate(Z * -3.0) | s.translate(Z * 3.0);
    let s = s.smooth_union(capsule(Z * -3.0, Z * 3.0, 0.5), 1.0);

    sphere(1.5).union_all(
        [s.clone().orient(X), s.clone().orient(Y), s.orient(Z)],
        Some(1.0),
    )
}

/// Woven strips inside a rim
pub fn weave() -> SdfNode {
    let f = rounded_box(Vec3::new(3.2, 1.0, 0.25), 0.1)
        .translate(Vec3::new(1.5, 0.0, 0.0625))
        .bend_linear(X * 0.75, X * 2.25, Z * -0.1875, Ease::InOutQuad)
        .circular_array(3, 0.0);

    let mut f = f.repeat_with(Vec3::new(2.7, 5.4, 0.0), None, 1);
    f |= f.clone().translate(Vec3::new(2.7 / 2.0, 2.7, 0.0));

    f &= cylinder(10.0);
    f |= cylinder(12.0).subtract(cylinder(10.0)) & slab_z(-0.5, 0.5).k(0.25);
    f
}

/// [`gearlike`] with a configurable blend radius
pub fn gearlike2(k: f32) -> SdfNode {
    let mut f = sphere(2.0).intersect(slab_z(-0.5, 0.5).k(k));
    f -= cylinder(1.0).k(k);
    f -= cylinder(0.25).circular_array(16, 2.0).k(k);
    f
}

/// Herringbone gear: a twisted disc unioned with its mirror image
pub fn herring() -> SdfNode {
    let mut g = gearlike2(0.001).twist(0.3);
    g |= g.clone().reflect(Z * 0.6, Z).rotate(2.0 * PI / 32.0);
    g | (capped_cylinder(Z * -0.5, Z * 1.5, 1.5).k(0.1) - cylinder(1.0).k(0.1))
}

/// Sphere with a periodic bump texture
pub fn bumpy() -> SdfNode {
    sphere(2.0).blend(sines(6.0, 0.1))
}

/// [`herring`] with the bump texture of [`bumpy`]
pub fn bumpy_herring() -> SdfNode {
    herring().blend(sines(6.0, 0.1))
}

/// Sphere roughened with seeded Perlin noise
pub fn noisy() -> SdfNode {
    sphere(2.0).blend(noise_field(1.5, 0.3, 7))
}

/// Named demo, selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    Sample,
    Knurling,
    Gearlike,
    Blobby,
    Weave,
    Gearlike2,
    Herring,
    Bumpy,
    BumpyHerring,
    Noisy,
}

impl Demo {
    pub fn all() -> &'static [Demo] {
        &[
            Demo::Sample,
            Demo::Knurling,
            Demo::Gearlike,
            Demo::Blobby,
            Demo::Weave,
            Demo::Gearlike2,
            Demo::Herring,
            Demo::Bumpy,
            Demo::BumpyHerring,
            Demo::Noisy,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Demo::Sample => "sample",
            Demo::Knurling => "knurling",
            Demo::Gearlike => "gearlike",
            Demo::Blobby => "blobby",
            Demo::Weave => "weave",
            Demo::Gearlike2 => "gearlike2",
            Demo::Herring => "herring",
            Demo::Bumpy => "bumpy",
            Demo::BumpyHerring => "bumpy_herring",
            Demo::Noisy => "noisy",
        }
    }

    /// Build the field. `Gearlike2` uses its default blend radius of 0.1.
    pub fn build(self) -> SdfNode {
        match self {
            Demo::Sample => sample(),
            Demo::Knurling => knurling(),
            Demo::Gearlike => gearlike(),
            Demo::Blobby => blobby(),
            Demo::Weave => weave(),
            Demo::Gearlike2 => gearlike2(0.1),
            Demo::Herring => herring(),
            Demo::Bumpy => bumpy(),
            Demo::BumpyHerring => bumpy_herring(),
            Demo::Noisy => noisy(),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Demo::all()
            .iter()
            .copied()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| Error::UnknownDemo(s.to_string()))
    }
}
