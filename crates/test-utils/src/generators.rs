//! Deterministic point generators.
//!
//! These generators create predictable sample sets that can be used across
//! the test suite and benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a latitude/longitude lattice with `step` degree spacing.
///
/// Latitudes run from -90 to 90 and longitudes from -180 (inclusive) to 180
/// (exclusive), so the poles appear once per longitude column.
///
/// # Example
///
/// ```
/// use test_utils::lat_lng_lattice;
///
/// let points = lat_lng_lattice(90.0);
/// assert_eq!(points.len(), 3 * 4); // lats -90, 0, 90 x lngs -180, -90, 0, 90
/// assert_eq!(points[0], (-90.0, -180.0));
/// ```
pub fn lat_lng_lattice(step: f64) -> Vec<(f64, f64)> {
    let lat_steps = (180.0 / step).round() as usize;
    let lng_steps = (360.0 / step).round() as usize;
    let mut points = Vec::with_capacity((lat_steps + 1) * lng_steps);
    for i in 0..=lat_steps {
        let lat = (-90.0 + i as f64 * step).min(90.0);
        for j in 0..lng_steps {
            points.push((lat, -180.0 + j as f64 * step));
        }
    }
    points
}

/// Creates `count` points distributed uniformly over the sphere.
///
/// Uniform in area, not in degrees: latitude is drawn as `asin(u)`. The
/// same seed always yields the same points.
pub fn random_points(count: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let z: f64 = rng.gen_range(-1.0..=1.0);
            let lat = z.asin().to_degrees();
            let lng: f64 = rng.gen_range(-180.0..180.0);
            (lat, lng)
        })
        .collect()
}

/// Creates `count` random `(from, to)` corner pairs for bounding box tests.
///
/// Boxes are at most `max_span` degrees on a side so that fine-resolution
/// tile walks stay cheap.
pub fn random_boxes(count: usize, max_span: f64, seed: u64) -> Vec<((f64, f64), (f64, f64))> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let lat: f64 = rng.gen_range(-90.0..=90.0);
            let lng: f64 = rng.gen_range(-180.0..180.0);
            let dlat: f64 = rng.gen_range(-max_span..=max_span);
            let dlng: f64 = rng.gen_range(0.0..=max_span);
            let to_lat = (lat + dlat).clamp(-90.0, 90.0);
            ((lat, lng), (to_lat, lng + dlng))
        })
        .collect()
}
