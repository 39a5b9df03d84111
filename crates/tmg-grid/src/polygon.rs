//! Cell polygon builder.
//!
//! A cell's four vertices are intersections of great circles through points
//! walked a whole number of cell sides along the rhomboid edges. Which
//! circles meet at which vertex depends on where the cell sits relative to
//! the rhomboid's W–E diagonal, captured by [`CellPosition`].
//!
//! Walked points, with `x`/`y` the cell indices and `+1` the far side of
//! the cell:
//!
//! ```text
//!   we0, we1   W → E   by x, x+1        se0, se1   S → E   by x, x+1
//!   ew0, ew1   E → W   by y, y+1        sw0, sw1   S → W   by y, y+1
//!   en0, en1   E → N   by y, y+1        wn0, wn1   W → N   by x, x+1
//! ```

use spherical::{bearing, from_unit_vector, to_unit_vector, LatLng, Sphere};
use tmg_common::{lng180, CellKey, TmgResult};

use crate::rhomboid::Corners;

/// Vertices within this many degrees of a pole are placed exactly on it.
const POLE_SNAP_DEG: f64 = 1e-5;

/// Where a cell sits within its rhomboid. `t = x + y` counts cell steps
/// from the south corner; the diagonal lies between `t = n - 1` and
/// `t = n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPosition {
    /// The cell at the south corner of a southern rhomboid, whose south
    /// vertex is the south pole.
    SouthPole,
    /// Entirely below the diagonal.
    SouthTriangle,
    /// Below the diagonal with its north vertex on it.
    NorthVertexOnDiagonal,
    /// Above the diagonal with its south vertex on it.
    SouthVertexOnDiagonal,
    /// Entirely above the diagonal.
    NorthTriangle,
}

impl CellPosition {
    pub fn classify(key: &CellKey, cell_count: u32) -> Self {
        let t = diagonal_steps(key);
        let n = u64::from(cell_count);
        if t == 0 && !key.is_northern() {
            CellPosition::SouthPole
        } else if t + 1 < n {
            CellPosition::SouthTriangle
        } else if t + 1 == n {
            CellPosition::NorthVertexOnDiagonal
        } else if t == n {
            CellPosition::SouthVertexOnDiagonal
        } else {
            CellPosition::NorthTriangle
        }
    }
}

/// `x + y`, widened so it cannot overflow at any `u32` resolution.
fn diagonal_steps(key: &CellKey) -> u64 {
    u64::from(key.x) + u64::from(key.y)
}

/// Points walked along the rhomboid edges for one cell.
#[derive(Debug, Clone, Copy)]
struct EdgeWalk {
    we0: LatLng,
    we1: LatLng,
    ew0: LatLng,
    ew1: LatLng,
    se0: LatLng,
    se1: LatLng,
    sw0: LatLng,
    sw1: LatLng,
    en0: LatLng,
    en1: LatLng,
    wn0: LatLng,
    wn1: LatLng,
}

impl EdgeWalk {
    fn new(sphere: &Sphere, c: &Corners, side: f64, x: u32, y: u32) -> Self {
        let (x0, x1) = (side * f64::from(x), side * f64::from(x + 1));
        let (y0, y1) = (side * f64::from(y), side * f64::from(y + 1));
        let walk = |from: LatLng, to: LatLng, d: f64| sphere.destination(from, d, bearing(from, to));

        // From the south pole every edge leaves along its far corner's
        // meridian, so the walk toward W starts on W's meridian.
        let south_to_west = if c.south.is_south_pole() {
            LatLng::south_pole(c.west.lng)
        } else {
            c.south
        };

        let wn0 = walk(c.west, c.north, x0);
        let wn1 = walk(c.west, c.north, x1);
        let wn1 = if is_near_pole(wn1) && wn1.lat > 0.0 {
            LatLng::north_pole(wn0.lng)
        } else {
            wn1
        };

        Self {
            we0: walk(c.west, c.east, x0),
            we1: walk(c.west, c.east, x1),
            ew0: walk(c.east, c.west, y0),
            ew1: walk(c.east, c.west, y1),
            se0: walk(c.south, c.east, x0),
            se1: walk(c.south, c.east, x1),
            sw0: walk(south_to_west, c.west, y0),
            sw1: walk(south_to_west, c.west, y1),
            en0: walk(c.east, c.north, y0),
            en1: walk(c.east, c.north, y1),
            wn0,
            wn1,
        }
    }
}

/// The boundary of one cell.
///
/// Vertices are kept in (lat, lng) order like every other point in the
/// grid; [`to_lng_lat_ring`](Self::to_lng_lat_ring) is the single place the
/// order flips for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPolygon {
    pub key: CellKey,
    pub south: LatLng,
    pub east: LatLng,
    pub north: LatLng,
    pub west: LatLng,
}

impl CellPolygon {
    /// Build the polygon of `key`, a cell of the rhomboid with `corners`,
    /// with cells of `side` meters on a grid of `cell_count` cells per edge.
    pub fn build(
        sphere: &Sphere,
        corners: &Corners,
        side: f64,
        key: CellKey,
        cell_count: u32,
    ) -> TmgResult<Self> {
        let walk = EdgeWalk::new(sphere, corners, side, key.x, key.y);
        let builder = VertexBuilder {
            sphere,
            walk: &walk,
            corners,
            cell_count,
            t: diagonal_steps(&key),
        };
        let position = CellPosition::classify(&key, cell_count);
        let [south, east, north, west] = match position {
            CellPosition::SouthPole => builder.south_pole()?,
            CellPosition::SouthTriangle | CellPosition::NorthVertexOnDiagonal => {
                builder.south_triangle()?
            }
            CellPosition::SouthVertexOnDiagonal => builder.south_vertex_on_diagonal()?,
            CellPosition::NorthTriangle => builder.north_triangle()?,
        };
        Ok(Self {
            key,
            south: finish_vertex(south),
            east: finish_vertex(east),
            north: finish_vertex(north),
            west: finish_vertex(west),
        })
    }

    /// Vertices in S, E, N, W order.
    pub fn vertices(&self) -> [LatLng; 4] {
        [self.south, self.east, self.north, self.west]
    }

    /// Boundary arcs S–E, E–N, N–W, W–S.
    pub fn edges(&self) -> [(LatLng, LatLng); 4] {
        [
            (self.south, self.east),
            (self.east, self.north),
            (self.north, self.west),
            (self.west, self.south),
        ]
    }

    pub fn touches_south_pole(&self) -> bool {
        self.south.is_south_pole()
    }

    pub fn touches_north_pole(&self) -> bool {
        self.north.is_north_pole()
    }

    /// Closed boundary ring starting at the south vertex.
    ///
    /// A pole has no longitude of its own, so a pole vertex is emitted
    /// twice, once on the meridian of each neighbouring vertex, giving six
    /// points instead of five.
    pub fn ring(&self) -> Vec<LatLng> {
        if self.touches_south_pole() {
            let south_east = LatLng::south_pole(self.east.lng);
            vec![
                south_east,
                self.east,
                self.north,
                self.west,
                LatLng::south_pole(self.west.lng),
                south_east,
            ]
        } else if self.touches_north_pole() {
            vec![
                self.south,
                self.east,
                LatLng::north_pole(self.east.lng),
                LatLng::north_pole(self.west.lng),
                self.west,
                self.south,
            ]
        } else {
            vec![self.south, self.east, self.north, self.west, self.south]
        }
    }

    /// The ring as (lng, lat) pairs, the order KML and GeoJSON expect.
    pub fn to_lng_lat_ring(&self) -> Vec<[f64; 2]> {
        self.ring().iter().map(LatLng::to_lng_lat).collect()
    }

    /// Whether `lat` lies within the cell's latitude span.
    pub fn spans_lat(&self, lat: f64) -> bool {
        self.south.lat <= lat && lat <= self.north.lat
    }

    /// Whether `lng` lies on the eastward sweep from the west vertex to the
    /// east vertex.
    pub fn spans_lng(&self, lng: f64) -> bool {
        let w = lng180(self.west.lng);
        let sweep = (lng180(self.east.lng) - w).rem_euclid(360.0);
        let offset = (lng180(lng) - w).rem_euclid(360.0);
        offset <= sweep
    }

    /// A point well inside the cell: the normalized mean of the vertex
    /// unit vectors.
    pub fn center(&self) -> LatLng {
        let sum = self
            .vertices()
            .iter()
            .fold(nalgebra::Vector3::<f64>::zeros(), |acc, &v| acc + to_unit_vector(v));
        from_unit_vector(&sum)
    }
}

/// Derives the vertices for each [`CellPosition`].
struct VertexBuilder<'a> {
    sphere: &'a Sphere,
    walk: &'a EdgeWalk,
    corners: &'a Corners,
    cell_count: u32,
    t: u64,
}

type Vertices = [LatLng; 4];

impl VertexBuilder<'_> {
    fn cross(&self, p0: LatLng, p1: LatLng, p2: LatLng, p3: LatLng) -> TmgResult<LatLng> {
        self.sphere.intersection(p0, p1, p2, p3)
    }

    /// Use `candidate` when it coincides with `other`, which happens where
    /// the vertex is a rhomboid corner or lies on a rhomboid edge, and the
    /// intersection would be ill-defined.
    fn coincident_or(
        &self,
        candidate: LatLng,
        other: LatLng,
        arcs: [LatLng; 4],
    ) -> TmgResult<LatLng> {
        if candidate.approx_eq(&other) {
            Ok(candidate)
        } else {
            self.cross(arcs[0], arcs[1], arcs[2], arcs[3])
        }
    }

    /// North vertex of a cell below the diagonal.
    fn lower_north(&self) -> TmgResult<LatLng> {
        let w = self.walk;
        self.cross(w.se1, w.we1, w.sw1, w.ew1)
    }

    /// North vertex of a cell touching or above the diagonal.
    fn upper_north(&self) -> TmgResult<LatLng> {
        let w = self.walk;
        if w.en1.approx_eq(&w.wn1) {
            Ok(w.en1)
        } else {
            self.cross(w.we1, w.wn1, w.ew1, w.en1)
        }
    }

    fn north_for_lower_cell(&self) -> TmgResult<LatLng> {
        if self.t + 1 < u64::from(self.cell_count) {
            self.lower_north()
        } else {
            self.upper_north()
        }
    }

    fn lower_south(&self) -> TmgResult<LatLng> {
        let w = self.walk;
        self.coincident_or(w.se0, w.sw0, [w.se0, w.we0, w.sw0, w.ew0])
    }

    fn upper_east(&self) -> TmgResult<LatLng> {
        let w = self.walk;
        self.cross(w.ew0, w.en0, w.we1, w.wn1)
    }

    fn upper_west(&self) -> TmgResult<LatLng> {
        let w = self.walk;
        self.cross(w.we0, w.wn0, w.ew1, w.en1)
    }

    fn south_pole(&self) -> TmgResult<Vertices> {
        let w = self.walk;
        Ok([
            LatLng::south_pole(self.corners.east.lng),
            w.se1,
            self.north_for_lower_cell()?,
            w.sw1,
        ])
    }

    fn south_triangle(&self) -> TmgResult<Vertices> {
        let w = self.walk;
        let east = self.coincident_or(w.se1, w.we1, [w.se1, w.we1, w.sw0, w.ew0])?;
        let west = self.coincident_or(w.sw1, w.we0, [w.se0, w.we0, w.sw1, w.ew1])?;
        Ok([self.lower_south()?, east, self.north_for_lower_cell()?, west])
    }

    fn south_vertex_on_diagonal(&self) -> TmgResult<Vertices> {
        Ok([
            self.lower_south()?,
            self.upper_east()?,
            self.upper_north()?,
            self.upper_west()?,
        ])
    }

    fn north_triangle(&self) -> TmgResult<Vertices> {
        let w = self.walk;
        Ok([
            self.cross(w.ew0, w.en0, w.we0, w.wn0)?,
            self.upper_east()?,
            self.cross(w.we1, w.wn1, w.ew1, w.en1)?,
            self.upper_west()?,
        ])
    }
}

fn is_near_pole(p: LatLng) -> bool {
    90.0 - p.lat.abs() < POLE_SNAP_DEG
}

fn finish_vertex(p: LatLng) -> LatLng {
    if is_near_pole(p) {
        LatLng::new(90f64.copysign(p.lat), lng180(p.lng))
    } else {
        LatLng::new(p.lat, lng180(p.lng))
    }
}
