//! Regular-grid sampling of a field
//!
//! Uses Rayon to evaluate the grid in chunks across all CPU cores. Each chunk
//! goes through the field's batch `evaluate`, so domain transforms remap a
//! whole chunk at a time.

use crate::sdf::{Aabb, Sdf};
use crate::{Error, Result};
use glam::{DVec3, UVec3, Vec3};
use rayon::prelude::*;
use serde::Serialize;

/// Configuration for grid sampling
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Approximate number of grid points
    pub samples: u64,
    /// Region to sample; the field's own bounds when `None`
    pub bounds: Option<Aabb>,
    /// Points per parallel work item
    pub chunk_size: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            samples: 1 << 20,
            bounds: None,
            chunk_size: 1 << 16,
        }
    }
}

impl SampleConfig {
    pub fn with_samples(mut self, samples: u64) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Summary of one sampling pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleReport {
    pub bounds_min: [f32; 3],
    pub bounds_max: [f32; 3],
    /// Grid points per axis
    pub resolution: [u32; 3],
    /// Grid spacing
    pub step: f32,
    pub total: u64,
    /// Points with a negative distance
    pub inside: u64,
    /// NaN or infinite distances
    pub non_finite: u64,
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    /// `inside * step^3`
    pub volume: f32,
}

#[derive(Debug, Clone, Copy)]
struct Tally {
    inside: u64,
    non_finite: u64,
    min: f32,
    max: f32,
}

impl Default for Tally {
    fn default() -> Self {
        Self {
            inside: 0,
            non_finite: 0,
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }
}

impl Tally {
    fn from_distances(distances: &[f32]) -> Self {
        distances.iter().fold(Self::default(), |mut t, &d| {
            if d.is_finite() {
                t.min = t.min.min(d);
                t.max = t.max.max(d);
                if d < 0.0 {
                    t.inside += 1;
                }
            } else {
                t.non_finite += 1;
            }
            t
        })
    }

    fn merge(self, other: Self) -> Self {
        Self {
            inside: self.inside + other.inside,
            non_finite: self.non_finite + other.non_finite,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Grid layout derived from a region and a target sample count
///
/// Returns per-axis point counts, the spacing and the total point count.
/// Counts are computed in `f64` so a huge `samples` cannot wrap.
fn grid_layout(bounds: &Aabb, samples: u64) -> Result<(UVec3, f32, u64)> {
    let size = bounds.size().as_dvec3();
    let step = (size.x * size.y * size.z / samples as f64).cbrt();
    let cells = (size / step).ceil().max(DVec3::ONE);

    let too_large = || {
        Error::InvalidParameter(format!(
            "grid too large: {:.0} x {:.0} x {:.0} points for {samples} samples",
            cells.x, cells.y, cells.z
        ))
    };
    if !cells.is_finite() || cells.max_element() > f64::from(u32::MAX) || step as f32 <= 0.0 {
        return Err(too_large());
    }

    let res = cells.as_uvec3();
    let total = u64::from(res.x)
        .checked_mul(u64::from(res.y))
        .and_then(|n| n.checked_mul(u64::from(res.z)))
        .ok_or_else(too_large)?;
    Ok((res, step as f32, total))
}

/// Sample `sdf` on a regular grid and summarise the result
///
/// Grid points sit at cell centres and are ordered x-fastest.
pub fn sample_grid<S: Sdf + ?Sized>(sdf: &S, config: &SampleConfig) -> Result<SampleReport> {
    if config.samples == 0 {
        return Err(Error::InvalidParameter("samples must be positive".into()));
    }
    if config.chunk_size == 0 {
        return Err(Error::InvalidParameter("chunk_size must be positive".into()));
    }
    let bounds = config.bounds.unwrap_or_else(|| sdf.bounds());
    if !bounds.is_valid() {
        return Err(Error::InvalidParameter(format!(
            "sampling bounds are empty or not finite: {bounds:?}"
        )));
    }

    let (res, step, total) = grid_layout(&bounds, config.samples)?;
    let (nx, ny) = (u64::from(res.x), u64::from(res.y));
    let chunk = config.chunk_size as u64;
    let chunks = total.div_ceil(chunk);

    tracing::debug!(
        ?res,
        step,
        total,
        chunks,
        "sampling field on regular grid"
    );

    let point_at = |idx: u64| {
        let x = idx % nx;
        let y = (idx / nx) % ny;
        let z = idx / (nx * ny);
        bounds.min + (Vec3::new(x as f32, y as f32, z as f32) + 0.5) * step
    };

    let tally = (0..chunks)
        .into_par_iter()
        .map(|c| {
            let start = c * chunk;
            let end = (start + chunk).min(total);
            let points: Vec<Vec3> = (start..end).map(point_at).collect();
            Tally::from_distances(&sdf.evaluate(&points))
        })
        .reduce(Tally::default, Tally::merge);

    let finite = total > tally.non_finite;
    let report = SampleReport {
        bounds_min: bounds.min.to_array(),
        bounds_max: bounds.max.to_array(),
        resolution: res.to_array(),
        step,
        total,
        inside: tally.inside,
        non_finite: tally.non_finite,
        min_distance: finite.then_some(tally.min),
        max_distance: finite.then_some(tally.max),
        volume: tally.inside as f32 * step.powi(3),
    };

    tracing::debug!(
        inside = report.inside,
        non_finite = report.non_finite,
        volume = report.volume,
        "sampling done"
    );

    Ok(report)
}

/// Order-preserving parallel batch evaluation
///
/// `points` is split into chunks of `chunk_size` (at least one point) and each
/// chunk is evaluated on the Rayon pool.
pub fn evaluate_parallel<S: Sdf + ?Sized>(sdf: &S, points: &[Vec3], chunk_size: usize) -> Vec<f32> {
    points
        .par_chunks(chunk_size.max(1))
        .flat_map_iter(|chunk| sdf.evaluate(chunk))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::{SdfExt, field, primitives::sphere};
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn unit_sphere_volume() {
        let config = SampleConfig::default()
            .with_samples(1 << 18)
            .with_bounds(Aabb::cube(1.5));
        let report = sample_grid(&sphere(1.0), &config).unwrap();

        assert_relative_eq!(report.volume, 4.0 / 3.0 * PI, max_relative = 0.02);
        assert_eq!(report.non_finite, 0);
        assert_relative_eq!(report.min_distance.unwrap(), -1.0, epsilon = 0.05);
    }

    #[test]
    fn resolution_covers_bounds() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(4.0, 2.0, 1.0));
        let config = SampleConfig::default().with_samples(8).with_bounds(bounds);
        let report = sample_grid(&sphere(1.0), &config).unwrap();

        // volume 8, 8 samples: unit step
        assert_relative_eq!(report.step, 1.0, epsilon = 1e-6);
        assert_eq!(report.resolution, [4, 2, 1]);
        assert_eq!(report.total, 8);
    }

    #[test]
    fn chunking_does_not_change_totals() {
        let shape = sphere(1.0).translate(Vec3::new(0.3, -0.2, 0.1)).twist(0.4);
        let base = SampleConfig::default()
            .with_samples(20_000)
            .with_bounds(Aabb::cube(1.6));
        let a = sample_grid(&shape, &base.clone().with_chunk_size(7)).unwrap();
        let b = sample_grid(&shape, &base.with_chunk_size(1 << 16)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_distances_are_counted() {
        let f = field(|p: Vec3| if p.x < 0.0 { f32::NAN } else { -1.0 });
        let config = SampleConfig::default()
            .with_samples(1000)
            .with_bounds(Aabb::cube(1.0));
        let report = sample_grid(&f, &config).unwrap();

        assert_eq!(report.non_finite + report.inside, report.total);
        assert!(report.non_finite > 0);
        assert_eq!(report.min_distance, Some(-1.0));
    }

    #[test]
    fn all_nan_has_no_extremes() {
        let f = field(|_| f32::NAN);
        let config = SampleConfig::default().with_samples(64);
        let report = sample_grid(&f, &config).unwrap();
        assert_eq!(report.non_finite, report.total);
        assert_eq!(report.min_distance, None);
        assert_eq!(report.max_distance, None);
    }

    #[test]
    fn rejects_bad_config() {
        let s = sphere(1.0);
        let zero = SampleConfig::default().with_samples(0);
        assert!(matches!(sample_grid(&s, &zero), Err(Error::InvalidParameter(_))));

        let no_chunk = SampleConfig::default().with_chunk_size(0);
        assert!(matches!(sample_grid(&s, &no_chunk), Err(Error::InvalidParameter(_))));

        let empty = SampleConfig::default().with_bounds(Aabb::new(Vec3::ONE, Vec3::ONE));
        assert!(matches!(sample_grid(&s, &empty), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn rejects_grids_that_overflow() {
        let s = sphere(1.0);
        // Total point count does not fit in u64
        let flat = SampleConfig::default()
            .with_samples(u64::MAX)
            .with_bounds(Aabb::new(Vec3::ZERO, Vec3::new(1e4, 1e4, 1e-4)));
        let err = sample_grid(&s, &flat).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(ref m) if m.starts_with("grid too large")));

        // One axis alone exceeds u32
        let needle = SampleConfig::default()
            .with_samples(u64::MAX)
            .with_bounds(Aabb::new(Vec3::ZERO, Vec3::new(1e9, 1e-3, 1e-3)));
        assert!(matches!(sample_grid(&s, &needle), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn report_serializes_to_json() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(4.0, 2.0, 1.0));
        let config = SampleConfig::default().with_samples(8).with_bounds(bounds);
        let report = sample_grid(&sphere(1.0), &config).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["resolution"], serde_json::json!([4, 2, 1]));
        assert_eq!(json["total"], 8);
        // Only the centre (0.5, 0.5, 0.5) lies inside the unit sphere
        assert_eq!(json["inside"], 1);
        assert_eq!(json["volume"].as_f64(), Some(1.0));
        assert_eq!(json["bounds_max"], serde_json::json!([4.0, 2.0, 1.0]));

        let config = SampleConfig::default()
            .with_samples(8)
            .with_bounds(Aabb::cube(1.0));
        let nan = sample_grid(&field(|_| f32::NAN), &config).unwrap();
        let json = serde_json::to_value(&nan).unwrap();
        assert!(json["min_distance"].is_null());
        assert!(json["max_distance"].is_null());
        assert_eq!(json["non_finite"], 8);
    }

    #[test]
    fn evaluate_parallel_preserves_order() {
        let shape = sphere(1.0).translate(Vec3::Z);
        let points: Vec<Vec3> = (0..1000).map(|i| Vec3::new(0.0, 0.0, i as f32 * 0.01)).collect();
        let expected = shape.evaluate(&points);
        assert_eq!(evaluate_parallel(&shape, &points, 33), expected);
        assert_eq!(evaluate_parallel(&shape, &points, 0), expected);
        assert!(evaluate_parallel(&shape, &[], 16).is_empty());
    }
}
