//! End-to-end tests for the mirror and texture operators

// Tests are allowed to use expect/unwrap for cleaner error messages
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use sdfide_core::prelude::*;
use std::f32::consts::PI;

fn grid(n: usize, half: f32) -> Vec<Vec3> {
    let step = 2.0 * half / (n - 1) as f32;
    (0..n * n * n)
        .map(|i| {
            let (x, y, z) = (i % n, (i / n) % n, i / (n * n));
            Vec3::new(x as f32, y as f32, z as f32) * step - Vec3::splat(half)
        })
        .collect()
}

#[test]
fn mirrored_lifted_sphere() {
    let lifted = sphere(1.0).translate(Z * 3.0);
    let mirrored = lifted.clone().mirror_point(ORIGIN);

    let d = mirrored.evaluate(&[
        Vec3::new(0.0, 0.0, -3.0),
        Vec3::new(0.0, 0.0, -2.0),
        Vec3::new(0.0, 0.0, 3.0),
    ]);
    assert_relative_eq!(d[0], lifted.distance(Vec3::new(0.0, 0.0, 3.0)));
    assert_relative_eq!(d[0], -1.0);
    assert_relative_eq!(d[1], 0.0, epsilon = 1e-6);
    // The original location is now empty
    assert!(d[2] > 4.0);
}

#[test]
fn sines_vanish_at_origin() {
    let d = sines(6.0, 0.1).evaluate(&[Vec3::ZERO]);
    assert_eq!(d, vec![0.0]);
}

#[test]
fn reflected_cube_lands_on_the_other_side() {
    // Unit cube centred at (2, 1, 0), reflected across the plane x = 0.5
    let shape = cube(1.0).translate(Vec3::new(2.0, 1.0, 0.0));
    let image = shape.clone().reflect(X * 0.5, X);

    assert_relative_eq!(image.distance(Vec3::new(-1.0, 1.0, 0.0)), -0.5, epsilon = 1e-6);
    assert!(image.distance(Vec3::new(2.0, 1.0, 0.0)) > 0.0);

    for p in grid(7, 3.0) {
        let q = Vec3::new(1.0 - p.x, p.y, p.z);
        assert_relative_eq!(image.distance(p), shape.distance(q), epsilon = 1e-5);
    }
}

#[test]
fn reflection_is_involutory_on_batches() {
    let shape = box3(Vec3::new(1.0, 2.0, 0.5))
        .translate(Vec3::new(0.3, -0.7, 1.1))
        .rotate_x(0.4);
    let points = grid(6, 2.5);
    let expected = shape.evaluate(&points);

    for (point, normal) in [
        (ORIGIN, Z),
        (Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 1.0, 0.0)),
        (Vec3::new(-0.5, 0.0, 0.25), Vec3::new(0.2, -0.9, 0.4)),
    ] {
        let twice = shape.clone().reflect(point, normal).reflect(point, normal);
        for (a, b) in twice.evaluate(&points).iter().zip(&expected) {
            assert_relative_eq!(*a, *b, epsilon = 1e-4);
        }
    }
}

#[test]
fn default_reflection_negates_z() {
    let shape = capsule(Vec3::new(0.2, 0.0, 0.5), Vec3::new(-0.4, 0.3, 2.0), 0.3);
    let image = shape.reflect_default();
    for p in grid(5, 2.0) {
        assert_relative_eq!(
            image.distance(p),
            shape.distance(p * Vec3::new(1.0, 1.0, -1.0)),
            epsilon = 1e-6
        );
    }
}

#[test]
fn axis_mirror_composes_with_orient() {
    // Orient onto X, flip, orient onto X again: the spike ends up along -Z
    let spike = capsule(ORIGIN, Z * 2.0, 0.2);
    let mirrored = spike.mirror_axis(X);

    assert!(mirrored.distance(Z * -1.5) < 0.0);
    assert!(mirrored.distance(Z * 1.5) > 0.0);
    assert!(mirrored.distance(X * 1.5) > 0.0);
    assert!(mirrored.distance(X * -1.5) > 0.0);

    // Orienting the mirror onto Z is a plain flip, identical to reflect_default
    let flipped = spike.mirror_axis(Z);
    let reflected = spike.reflect_default();
    for p in grid(5, 2.5) {
        assert_relative_eq!(flipped.distance(p), reflected.distance(p), epsilon = 1e-5);
    }
}

#[test]
fn degenerate_axes_produce_nan() {
    let s = sphere(1.0);
    let points = [Vec3::ZERO, Vec3::ONE];
    for d in s.reflect(ORIGIN, Vec3::ZERO).evaluate(&points) {
        assert!(d.is_nan());
    }
    for d in s.mirror_axis(Vec3::ZERO).evaluate(&points) {
        assert!(d.is_nan());
    }
}

#[test]
fn bumpy_sphere_surface_oscillates() {
    let bumpy = sphere(2.0).blend(sines(6.0, 0.1));

    // On the sphere the blend is half the texture
    let on_surface = Vec3::splat(PI / 12.0).normalize() * 2.0;
    let expected = 0.5 * sines(6.0, 0.1).distance(on_surface);
    assert_relative_eq!(bumpy.distance(on_surface), expected, epsilon = 1e-5);

    let report = sample_grid(
        &bumpy,
        &SampleConfig::default()
            .with_samples(1 << 15)
            .with_bounds(Aabb::cube(4.5)),
    )
    .unwrap();
    assert_eq!(report.non_finite, 0);
    assert!(report.inside > 0);
}

#[test]
fn herring_samples_cleanly() {
    let herring = Demo::Herring.build();
    let report = sample_grid(
        &herring,
        &SampleConfig::default()
            .with_samples(1 << 14)
            .with_bounds(Aabb::new(Vec3::new(-2.5, -2.5, -1.0), Vec3::new(2.5, 2.5, 2.2))),
    )
    .unwrap();
    assert_eq!(report.non_finite, 0);
    assert!(report.volume > 1.0);
    assert!(report.min_distance.unwrap() < 0.0);
}

#[test]
fn parallel_evaluation_matches_sequential() {
    let f = Demo::Blobby.build();
    let points = grid(12, 4.0);
    assert_eq!(evaluate_parallel(&f, &points, 97), f.evaluate(&points));
}
