//! Great-circle computations on a sphere.
//!
//! Distances use the haversine formula. Bearings are initial bearings in
//! degrees clockwise from north, in (-180, 180]. Every point produced here
//! is rounded to the grid's degree precision so independently derived
//! vertices compare equal.

use std::f64::consts::PI;

use nalgebra::Vector3;
use tmg_common::normalize::{lng180, truncate_degrees};
use tmg_common::{is_lng_between, LatLng, TmgError, TmgResult};
use tracing::error;

use crate::vector::{from_unit_vector, to_unit_vector};

/// WGS84 semi-major axis in meters, the radius of the grid's sphere.
pub const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// Slack in radians when deciding whether a point lies on an arc (about
/// 1 m on the Earth).
const ON_ARC_TOLERANCE: f64 = 1.6e-7;

/// Cross products shorter than this are treated as zero.
const DEGENERATE_NORM: f64 = 1e-12;

/// Angle in radians subtended at the sphere centre by two points.
///
/// The haversine term is clamped to 1 so that nearly antipodal points do
/// not push `sqrt(1 - a)` into NaN.
pub fn central_angle(p0: LatLng, p1: LatLng) -> f64 {
    let d_lat = (p1.lat - p0.lat).to_radians();
    let d_lng = (p1.lng - p0.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + p0.lat.to_radians().cos() * p1.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let a = a.min(1.0);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Distance in meters between two points on a sphere of radius
/// [`SEMI_MAJOR_AXIS`].
pub fn great_circle_distance(p0: LatLng, p1: LatLng) -> f64 {
    Sphere::default().distance(p0, p1)
}

/// Initial bearing in degrees from `from` toward `to`.
///
/// Every direction leaves the south pole northward, so the bearing from
/// there is defined as 0.
pub fn bearing(from: LatLng, to: LatLng) -> f64 {
    if from.is_south_pole() {
        return 0.0;
    }
    let (lat1, lat2) = (from.lat.to_radians(), to.lat.to_radians());
    let d_lng = (to.lng - from.lng).to_radians();
    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
    truncate_degrees(y.atan2(x).to_degrees())
}

/// Whether `q` lies on the shorter arc between `p0` and `p1`.
fn on_arc(q: LatLng, p0: LatLng, p1: LatLng) -> bool {
    (central_angle(p0, q) + central_angle(q, p1) - central_angle(p0, p1)).abs() < ON_ARC_TOLERANCE
}

/// Longitudes where the parallel at `lat` crosses the shorter arc from
/// `p0` to `p1`.
///
/// A great circle meets a parallel in zero or two places, and an arc can
/// contain both. An arc ending at a pole runs along the meridian of its
/// other end.
pub fn lngs_where_parallel_crosses_arc(lat: f64, p0: LatLng, p1: LatLng) -> Vec<f64> {
    let strictly_between = (p0.lat < lat && lat < p1.lat) || (p1.lat < lat && lat < p0.lat);
    if p0.lat.abs() == 90.0 {
        return if strictly_between { vec![lng180(p1.lng)] } else { Vec::new() };
    }
    if p1.lat.abs() == 90.0 {
        return if strictly_between { vec![lng180(p0.lng)] } else { Vec::new() };
    }

    let (lat1, lat2, lat3) = (p0.lat.to_radians(), p1.lat.to_radians(), lat.to_radians());
    let (lng1, lng2) = (p0.lng.to_radians(), p1.lng.to_radians());
    let l12 = lng1 - lng2;
    let a = lat1.sin() * lat2.cos() * lat3.cos() * l12.sin();
    let b = lat1.sin() * lat2.cos() * lat3.cos() * l12.cos() - lat1.cos() * lat2.sin() * lat3.cos();
    let c = lat1.cos() * lat2.cos() * lat3.sin() * l12.sin();
    let h = a.hypot(b);
    if h == 0.0 || c.abs() > h {
        return Vec::new();
    }
    let offset = b.atan2(a);
    let d_lng = (c / h).acos();

    let mut crossings = Vec::with_capacity(2);
    for candidate in [lng1 + d_lng + offset, lng1 - d_lng + offset] {
        let lng = lng180(candidate.to_degrees());
        if on_arc(LatLng::new(lat, lng), p0, p1) && !crossings.contains(&lng) {
            crossings.push(lng);
        }
    }
    crossings
}

/// Latitude where the meridian at `lng` crosses the shorter arc from `p0`
/// to `p1`, if it does.
///
/// Arcs touching a pole or lying along a meridian have no isolated
/// crossing and yield `None`.
pub fn lat_where_meridian_crosses_arc(lng: f64, p0: LatLng, p1: LatLng) -> Option<f64> {
    if p0.lat.abs() == 90.0 || p1.lat.abs() == 90.0 {
        return None;
    }
    let (west, east) = if lng180(p1.lng - p0.lng) >= 0.0 {
        (p0.lng, p1.lng)
    } else {
        (p1.lng, p0.lng)
    };
    if !is_lng_between(lng, west, east) {
        return None;
    }
    let (lat1, lat2) = (p0.lat.to_radians(), p1.lat.to_radians());
    let (lng1, lng2, l) = (p0.lng.to_radians(), p1.lng.to_radians(), lng.to_radians());
    let den = (lng1 - lng2).sin();
    if den.abs() < DEGENERATE_NORM {
        return None;
    }
    let tan_lat = (lat1.tan() * (l - lng2).sin() - lat2.tan() * (l - lng1).sin()) / den;
    Some(tan_lat.atan().to_degrees())
}

/// A sphere of fixed radius.
///
/// The grid only needs ratios of distances, so any radius yields the same
/// cells; the radius sets the units of [`distance`](Self::distance) and
/// [`destination`](Self::destination).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Radius in meters.
    pub radius: f64,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            radius: SEMI_MAJOR_AXIS,
        }
    }
}

impl Sphere {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Great-circle distance in meters.
    pub fn distance(&self, p0: LatLng, p1: LatLng) -> f64 {
        self.radius * central_angle(p0, p1)
    }

    /// Point reached by travelling `distance` meters from `start` along the
    /// great circle with initial `bearing_deg`.
    pub fn destination(&self, start: LatLng, distance: f64, bearing_deg: f64) -> LatLng {
        let delta = distance / self.radius;
        let (lat1, lng1) = (start.lat.to_radians(), start.lng.to_radians());
        let theta = bearing_deg.to_radians();
        let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos();
        let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
        let lng2 = lng1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());
        LatLng::new(truncate_degrees(lat2.to_degrees()), lng180(lng2.to_degrees()))
    }

    /// Whether two points are within a quarter circumference of each other.
    pub fn same_hemisphere(&self, p0: LatLng, p1: LatLng) -> bool {
        self.distance(p0, p1) <= PI * self.radius / 2.0
    }

    /// Intersection of the great circle through `p0`, `p1` with the great
    /// circle through `p2`, `p3`.
    ///
    /// Two great circles meet at a pair of antipodal points; the one in the
    /// same hemisphere as `p0` is returned. Fails with
    /// [`TmgError::DegenerateGeometry`] when either pair does not define a
    /// circle (coincident or antipodal points) or the two circles coincide.
    pub fn intersection(&self, p0: LatLng, p1: LatLng, p2: LatLng, p3: LatLng) -> TmgResult<LatLng> {
        let n1: Vector3<f64> = to_unit_vector(p0).cross(&to_unit_vector(p1));
        let n2: Vector3<f64> = to_unit_vector(p2).cross(&to_unit_vector(p3));
        if n1.norm() < DEGENERATE_NORM || n2.norm() < DEGENERATE_NORM {
            error!(%p0, %p1, %p2, %p3, "great circle undefined by coincident or antipodal points");
            return Err(TmgError::degenerate(format!(
                "no great circle through ({}) ({}) or ({}) ({})",
                p0, p1, p2, p3
            )));
        }
        let direction = n1.cross(&n2);
        if direction.norm() < DEGENERATE_NORM * n1.norm() * n2.norm() {
            error!(%p0, %p1, %p2, %p3, "great circles coincide");
            return Err(TmgError::degenerate(format!(
                "great circles through ({}) ({}) and ({}) ({}) coincide",
                p0, p1, p2, p3
            )));
        }
        let p = from_unit_vector(&direction);
        let p = LatLng::new(truncate_degrees(p.lat), lng180(p.lng));
        if self.same_hemisphere(p, p0) {
            Ok(p)
        } else {
            Ok(p.antipode())
        }
    }
}
