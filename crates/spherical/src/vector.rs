//! Conversions between geographic points and unit vectors.
//!
//! The frame is right-handed and Earth-centred: +x through (0, 0), +y
//! through (0, 90), +z through the north pole.

use nalgebra::{Rotation3, Unit, Vector3};
use tmg_common::LatLng;

/// Unit vector for a point on the sphere.
pub fn to_unit_vector(p: LatLng) -> Vector3<f64> {
    let (lat, lng) = (p.lat.to_radians(), p.lng.to_radians());
    Vector3::new(lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin())
}

/// Point for a vector of any non-zero length.
///
/// Latitude comes from `atan2` rather than `asin` so points near the poles
/// keep full precision.
pub fn from_unit_vector(v: &Vector3<f64>) -> LatLng {
    LatLng::new(
        v.z.atan2(v.x.hypot(v.y)).to_degrees(),
        v.y.atan2(v.x).to_degrees(),
    )
}

/// Rotate `p` by `angle_deg` about the axis through the sphere centre and
/// `axis`, counter-clockwise when looking down the axis at the sphere.
pub fn rotate(p: LatLng, axis: LatLng, angle_deg: f64) -> LatLng {
    let axis = Unit::new_normalize(to_unit_vector(axis));
    let rotation = Rotation3::from_axis_angle(&axis, angle_deg.to_radians());
    from_unit_vector(&(rotation * to_unit_vector(p)))
}
