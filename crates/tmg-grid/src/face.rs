//! Face locator.
//!
//! The icosahedron's 20 faces are numbered as follows:
//!
//! ```text
//!   0..5    northern faces, touching the north pole
//!   5..10   equatorial faces pointing south (apex on the southern ring)
//!   10..15  equatorial faces pointing north (apex on the northern ring)
//!   15..20  southern faces, touching the south pole
//! ```
//!
//! Faces `f` and `f + 5` for `f < 5` share an edge and form northern
//! rhomboid `f`; faces `10 + k` and `15 + k` form southern rhomboid `5 + k`.

use nalgebra::Vector3;
use spherical::{lng180, lng360, to_unit_vector, LatLng};

use crate::constants::{EQUATORIAL_SECTOR, HALF_SECTOR, SECTOR_WIDTH, VERTEX_LAT};

/// Identifier of an icosahedron face, in `[0, 20)`.
pub type FaceId = u8;

/// Which of the three latitude bands a point falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceBand {
    North,
    Equatorial,
    South,
}

impl FaceBand {
    pub fn of(lat: f64) -> Self {
        if lat >= VERTEX_LAT {
            FaceBand::North
        } else if lat < -VERTEX_LAT {
            FaceBand::South
        } else {
            FaceBand::Equatorial
        }
    }
}

/// Face the point projects onto.
///
/// Faces are closed on the west: a point on the edge between two faces
/// belongs to the eastern one.
pub fn face_number(p: LatLng) -> FaceId {
    let lng = lng180(p.lng);
    match FaceBand::of(p.lat) {
        FaceBand::North => {
            let f = ((lng + 360.0 + HALF_SECTOR) / SECTOR_WIDTH).floor() as FaceId;
            if lng >= -HALF_SECTOR {
                f - 5
            } else {
                f
            }
        }
        FaceBand::South => {
            let f = ((lng + 360.0) / SECTOR_WIDTH).floor() as FaceId + 15;
            if lng >= 0.0 {
                f - 5
            } else {
                f
            }
        }
        FaceBand::Equatorial => equatorial_face(p.lat, lng),
    }
}

/// Equatorial faces are bounded by slanted great-circle edges. The sector
/// is first estimated from the linear skew `18·lat/VL` and then corrected
/// against the true edges on either side.
fn equatorial_face(lat: f64, lng: f64) -> FaceId {
    let shifted = lng360(lng + EQUATORIAL_SECTOR);
    let skew = EQUATORIAL_SECTOR * lat / VERTEX_LAT;
    let skewed_boundary = |j: i32| {
        let base = 2.0 * EQUATORIAL_SECTOR * f64::from(j);
        if j.rem_euclid(2) == 1 {
            base + skew
        } else {
            base - skew
        }
    };

    let mut sector = (shifted / (2.0 * EQUATORIAL_SECTOR)).floor() as i32;
    if shifted < skewed_boundary(sector) {
        sector -= 1;
    } else if shifted >= skewed_boundary(sector + 1) {
        sector += 1;
    }

    let v = to_unit_vector(LatLng::new(lat, lng));
    if !is_east_of_edge(sector, &v) {
        sector -= 1;
    } else if is_east_of_edge(sector + 1, &v) {
        sector += 1;
    }

    let sector = sector.rem_euclid(10) as FaceId;
    if sector % 2 == 0 {
        5 + sector / 2
    } else {
        10 + (sector - 1) / 2
    }
}

/// Whether `v` lies on or east of equatorial edge `j`, the great circle
/// joining a southern-ring vertex and a northern-ring vertex.
fn is_east_of_edge(j: i32, v: &Vector3<f64>) -> bool {
    let base = -EQUATORIAL_SECTOR + 2.0 * EQUATORIAL_SECTOR * f64::from(j);
    let slant = if j.rem_euclid(2) == 1 {
        EQUATORIAL_SECTOR
    } else {
        -EQUATORIAL_SECTOR
    };
    let bottom = to_unit_vector(LatLng::new(-VERTEX_LAT, base - slant));
    let top = to_unit_vector(LatLng::new(VERTEX_LAT, base + slant));
    bottom.cross(&top).dot(v) <= 0.0
}
