//! # sdfide core
//!
//! Solids as signed distance fields, composed without ever building a mesh.
//!
//! A field maps a batch of points to signed distances (negative inside,
//! positive outside, zero on the surface). Fields are combined with boolean
//! operators and reshaped with domain transforms; this crate adds plane
//! reflection, point mirroring, axis mirroring with re-orientation and
//! periodic scalar textures on top of that algebra.
//!
//! ## Quick Start
//!
//! ```rust
//! use sdfide_core::prelude::*;
//!
//! // A sphere lifted 3 units up, then mirrored through the origin
//! let ball = sphere(1.0).translate(Z * 3.0).mirror_point(ORIGIN);
//! let d = ball.evaluate(&[Vec3::new(0.0, 0.0, -2.0)]);
//! assert!(d[0].abs() < 1e-6);
//!
//! // A bumpy sphere: blend a solid with a periodic texture
//! let bumpy = sphere(2.0).blend(sines(6.0, 0.1));
//! assert!(bumpy.distance(Vec3::ZERO) < 0.0);
//! ```
//!
//! ## Units and Conventions
//!
//! - **Coordinate system**: Right-handed, Z-up (`UP == Z`)
//! - **Angles**: All rotation functions use **radians**
//! - **Matrices**: Column vectors, `Mat3 * Vec3`
//! - **Precision**: `f32` throughout

pub mod demo;
pub mod ease;
pub mod field;
pub mod mirror;
pub mod sample;
pub mod sdf;
pub mod vector;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Field algebra
    pub use crate::sdf::{
        Aabb, ORIGIN, Sdf, SdfExt, SdfNode, UP, X, Y, Z, field, field_with_bounds, primitives::*,
        remap,
    };

    // Mirrors and reflections
    pub use crate::mirror::{AxisMirror, PointMirror, Reflect, reflection_matrix};

    // Scalar generators
    pub use crate::field::{noise_field, sines};

    // Easing
    pub use crate::ease::Ease;

    // Sampling
    pub use crate::sample::{SampleConfig, SampleReport, evaluate_parallel, sample_grid};

    // Demos
    pub use crate::demo::Demo;

    // Math (re-export glam)
    pub use glam::{Mat3, Quat, Vec3};

    // Error handling
    pub use crate::{Error, Result};
}
