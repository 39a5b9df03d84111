//! Rhomboid coordinate system.
//!
//! Each rhomboid pairs two faces that share an edge. Its corners are named
//! by their position in the canonical frame: the south corner S is the
//! cell index origin, x grows from S toward E and y from S toward W, and N
//! is the far corner. The diagonal W–E is the shared face edge.
//!
//! Index derivation happens in the frame of rhomboid 0, where the corners
//! sit at fixed positions:
//!
//! ```text
//!                 N0 (90, 0)
//!                /  \
//!   W0 (VL, -36)      E0 (VL, 36)
//!                \  /
//!                 S0 (-VL, 0)
//! ```
//!
//! Northern rhomboids reach that frame by a longitude shift. Southern
//! rhomboids additionally need a 72° rotation about the axis through
//! (-VL, -72), which carries rhomboid 5 onto rhomboid 0.

use nalgebra::{Unit, Vector3};
use spherical::{lng180, rotate, to_unit_vector, LatLng};
use tmg_common::cell::RHOMBOID_COUNT;
use tmg_common::{TmgError, TmgResult};

use crate::constants::{
    CORNER_SNAP_M, HALF_SECTOR, SECTOR_WIDTH, SOUTHERN_ROTATION_ANGLE, SOUTHERN_ROTATION_AXIS,
    VERTEX_LAT,
};
use crate::face::FaceId;

/// One of the ten rhomboids, numbered `0..5` in the north and `5..10` in
/// the south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rhomboid(u8);

/// The four corners of a rhomboid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub south: LatLng,
    pub east: LatLng,
    pub west: LatLng,
    pub north: LatLng,
}

impl Rhomboid {
    pub fn new(id: u8) -> TmgResult<Self> {
        if id >= RHOMBOID_COUNT {
            return Err(TmgError::invalid_key(format!(
                "rhomboid {} is not in [0, {})",
                id, RHOMBOID_COUNT
            )));
        }
        Ok(Self(id))
    }

    /// Rhomboid containing a face.
    pub fn from_face(face: FaceId) -> Self {
        if face < 10 {
            Self(face % 5)
        } else {
            Self(face % 5 + 5)
        }
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    pub fn is_northern(&self) -> bool {
        self.0 < 5
    }

    /// Position among the five rhomboids of the same hemisphere.
    fn sector(&self) -> f64 {
        f64::from(self.0 % 5)
    }

    pub fn south(&self) -> LatLng {
        if self.is_northern() {
            LatLng::new(-VERTEX_LAT, lng180(SECTOR_WIDTH * self.sector()))
        } else {
            LatLng::south_pole(lng180(SECTOR_WIDTH + SECTOR_WIDTH * self.sector()))
        }
    }

    pub fn east(&self) -> LatLng {
        if self.is_northern() {
            LatLng::new(VERTEX_LAT, lng180(HALF_SECTOR + SECTOR_WIDTH * self.sector()))
        } else {
            LatLng::new(-VERTEX_LAT, lng180(SECTOR_WIDTH + SECTOR_WIDTH * self.sector()))
        }
    }

    pub fn west(&self) -> LatLng {
        if self.is_northern() {
            LatLng::new(VERTEX_LAT, lng180(-HALF_SECTOR + SECTOR_WIDTH * self.sector()))
        } else {
            LatLng::new(-VERTEX_LAT, lng180(SECTOR_WIDTH * self.sector()))
        }
    }

    pub fn north(&self) -> LatLng {
        if self.is_northern() {
            LatLng::north_pole(0.0)
        } else {
            LatLng::new(VERTEX_LAT, lng180(HALF_SECTOR + SECTOR_WIDTH * self.sector()))
        }
    }

    pub fn corners(&self) -> Corners {
        Corners {
            south: self.south(),
            east: self.east(),
            west: self.west(),
            north: self.north(),
        }
    }

    /// Map a point of this rhomboid into the frame of rhomboid 0.
    pub fn to_canonical(&self, p: LatLng) -> LatLng {
        if self.is_northern() {
            LatLng::new(p.lat, lng180(p.lng - SECTOR_WIDTH * self.sector()))
        } else {
            let shifted = LatLng::new(p.lat, p.lng - SECTOR_WIDTH * self.sector());
            rotate(shifted, SOUTHERN_ROTATION_AXIS, SOUTHERN_ROTATION_ANGLE)
        }
    }
}

/// Edge fractions of a point measured in the canonical frame.
///
/// Cell boundaries parallel to an edge are arcs of great circles through a
/// fixed direction (a pencil). In the lower triangle S0–E0–W0 the x lines
/// run parallel to S0→W0 and the y lines parallel to S0→E0; in the upper
/// triangle they run parallel to E0→N0 and W0→N0. Projecting the point
/// along its pencil circle onto the matching rhomboid edge gives the
/// fraction of the edge the point has passed.
#[derive(Debug, Clone)]
pub struct CanonicalFrame {
    south: Vector3<f64>,
    east: Vector3<f64>,
    west: Vector3<f64>,
    north: Vector3<f64>,
    /// Sign of S0 relative to the diagonal great circle W0→E0.
    south_side: f64,
}

impl Default for CanonicalFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl CanonicalFrame {
    pub fn new() -> Self {
        let south = to_unit_vector(LatLng::new(-VERTEX_LAT, 0.0));
        let east = to_unit_vector(LatLng::new(VERTEX_LAT, HALF_SECTOR));
        let west = to_unit_vector(LatLng::new(VERTEX_LAT, -HALF_SECTOR));
        let north = to_unit_vector(LatLng::north_pole(0.0));
        let south_side = west.cross(&east).dot(&south).signum();
        Self {
            south,
            east,
            west,
            north,
            south_side,
        }
    }

    /// Whether a canonical point lies in the lower (southern) triangle,
    /// diagonal included.
    pub fn in_lower_triangle(&self, v: &Vector3<f64>) -> bool {
        self.west.cross(&self.east).dot(v) * self.south_side >= 0.0
    }

    /// The (x, y) edge fractions of a canonical point. Points inside the
    /// rhomboid give fractions in `[0, 1]`.
    pub fn edge_fractions(&self, p: LatLng) -> (f64, f64) {
        let v = to_unit_vector(p);
        if self.in_lower_triangle(&v) {
            (
                edge_fraction(&v, &self.south, &self.east, &(self.west - self.south)),
                edge_fraction(&v, &self.south, &self.west, &(self.east - self.south)),
            )
        } else {
            (
                edge_fraction(&v, &self.west, &self.north, &(self.north - self.east)),
                edge_fraction(&v, &self.east, &self.north, &(self.north - self.west)),
            )
        }
    }

    /// Cell indices of a canonical point at resolution `cell_count` on a
    /// sphere of `radius` meters.
    pub fn indices(&self, p: LatLng, cell_count: u32, radius: f64) -> (u32, u32) {
        let v = to_unit_vector(p);
        if angle_between(&v, &self.south) * radius < CORNER_SNAP_M {
            return (0, 0);
        }
        if angle_between(&v, &self.north) * radius < CORNER_SNAP_M {
            return (cell_count - 1, cell_count - 1);
        }
        let (fx, fy) = self.edge_fractions(p);
        (cell_index(fx, cell_count), cell_index(fy, cell_count))
    }
}

/// `floor(cell_count · fraction)` clamped into `[0, cell_count)`.
///
/// The epsilon keeps points computed to lie exactly on a cell boundary from
/// falling into the cell before it.
pub fn cell_index(fraction: f64, cell_count: u32) -> u32 {
    let i = (f64::from(cell_count) * fraction + 1e-9).floor();
    if i <= 0.0 {
        0
    } else if i >= f64::from(cell_count - 1) {
        cell_count - 1
    } else {
        i as u32
    }
}

/// Fraction of the arc `origin → end` cut off by the great circle through
/// `v` and the pencil direction. Negative when the cut falls before
/// `origin`.
fn edge_fraction(
    v: &Vector3<f64>,
    origin: &Vector3<f64>,
    end: &Vector3<f64>,
    pencil: &Vector3<f64>,
) -> f64 {
    let edge_normal = origin.cross(end);
    let cut = v.cross(pencil).cross(&edge_normal);
    let Some(cut) = Unit::try_new(cut, 1e-15) else {
        return 0.0;
    };
    let mid = origin + end;
    let cut = if cut.dot(&mid) < 0.0 {
        -cut.into_inner()
    } else {
        cut.into_inner()
    };
    let fraction = angle_between(origin, &cut) / angle_between(origin, end);
    if origin.cross(&cut).dot(&edge_normal) < 0.0 {
        -fraction
    } else {
        fraction
    }
}

fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}
