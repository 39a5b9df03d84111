//! Great-circle geometry on a spherical Earth.
//!
//! Implements the handful of spherical trigonometry primitives the grid is
//! built from: distance, bearing, destination point, great-circle
//! intersection, parallel and meridian crossings, and axis rotation.
//! Points are [`LatLng`] values in degrees; the vector math runs on unit
//! vectors in Earth-centred coordinates.

pub mod great_circle;
pub mod vector;

pub use great_circle::{
    bearing, central_angle, great_circle_distance, lat_where_meridian_crosses_arc,
    lngs_where_parallel_crosses_arc, Sphere, SEMI_MAJOR_AXIS,
};
pub use tmg_common::normalize::{lng180, lng360};
pub use tmg_common::LatLng;
pub use vector::{from_unit_vector, rotate, to_unit_vector};
