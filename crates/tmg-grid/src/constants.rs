//! Fixed geometry of the icosahedron the grid is built on.
//!
//! These values do not depend on the grid resolution or the sphere radius;
//! everything resolution-dependent lives in [`GridConfig`](crate::GridConfig).

use tmg_common::LatLng;

/// Latitude of the ten non-polar icosahedron vertices, `atan(1/2)` in degrees.
pub const VERTEX_LAT: f64 = 26.565051177077997;

/// Angle in degrees between a pole and an adjacent icosahedron vertex, as
/// seen from the sphere centre.
pub const VERTEX_ANGLE: f64 = 90.0 - VERTEX_LAT;

/// Longitude width of a polar face.
pub const SECTOR_WIDTH: f64 = 72.0;

/// Longitude offset between the northern and southern vertex rings.
pub const HALF_SECTOR: f64 = 36.0;

/// Width of an equatorial half-sector.
pub const EQUATORIAL_SECTOR: f64 = 18.0;

/// Number of icosahedron faces.
pub const FACE_COUNT: u8 = 20;

/// Axis of the rotation that carries southern rhomboid 5 onto rhomboid 0.
pub const SOUTHERN_ROTATION_AXIS: LatLng = LatLng::new(-VERTEX_LAT, -SECTOR_WIDTH);

/// Angle of that rotation in degrees.
pub const SOUTHERN_ROTATION_ANGLE: f64 = SECTOR_WIDTH;

/// Points closer than this many meters to a rhomboid's south or north
/// corner take that corner's cell index.
pub const CORNER_SNAP_M: f64 = 1.0;
