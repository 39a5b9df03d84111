//! Adjacency navigator.
//!
//! Every cell has four edge neighbours. Inside a rhomboid they are the
//! obvious index steps; across a rhomboid boundary the step lands on the
//! neighbouring rhomboid with the indices re-mapped so the two cells share
//! an edge. The five northern rhomboids fan around the north pole and the
//! five southern ones around the south pole:
//!
//! ```text
//!   NE  x + 1     north: (r+1)%5 (y, n-1)      south: (r+1)%5   (0, y)
//!   SE  y - 1     north: 5+r     (x, n-1)      south: 5+(r+1)%5 (0, x)
//!   SW  x - 1     north: 5+(r+4)%5 (n-1, y)    south: 5+(r+4)%5 (y, 0)
//!   NW  y + 1     north: (r+4)%5 (n-1, x)      south: r-5       (x, 0)
//! ```
//!
//! The south pole cells `(r, 0, 0)` of the southern rhomboids have no SE
//! or SW neighbour in this scheme: the step would cross the pole.

use serde::Serialize;
use tmg_common::{CellKey, TmgResult};

use crate::grid::Grid;
use crate::polygon::CellPolygon;

/// Neighbour across the cell's north-east edge.
///
/// In the north, rhomboid `r`'s east-to-north edge is rhomboid `r + 1`'s
/// west-to-north edge, so `y` along one becomes `x` along the other and
/// the crossing lands on `y = n - 1`.
pub fn next_ne(key: CellKey, cell_count: u32) -> CellKey {
    let CellKey { rhomboid: r, x, y } = key;
    if x + 1 < cell_count {
        CellKey::new(r, x + 1, y)
    } else if key.is_northern() {
        CellKey::new((r + 1) % 5, y, cell_count - 1)
    } else {
        CellKey::new((r + 1) % 5, 0, y)
    }
}

/// Neighbour across the cell's south-east edge, if it has one.
pub fn next_se(key: CellKey, cell_count: u32) -> Option<CellKey> {
    let CellKey { rhomboid: r, x, y } = key;
    if y > 0 {
        Some(CellKey::new(r, x, y - 1))
    } else if key.is_northern() {
        Some(CellKey::new(5 + r, x, cell_count - 1))
    } else if x == 0 {
        None
    } else {
        Some(CellKey::new(5 + (r - 5 + 1) % 5, 0, x))
    }
}

/// Neighbour across the cell's south-west edge, if it has one.
pub fn next_sw(key: CellKey, cell_count: u32) -> Option<CellKey> {
    let CellKey { rhomboid: r, x, y } = key;
    if x > 0 {
        Some(CellKey::new(r, x - 1, y))
    } else if key.is_northern() {
        Some(CellKey::new(5 + (r + 4) % 5, cell_count - 1, y))
    } else if y == 0 {
        None
    } else {
        Some(CellKey::new(5 + (r - 5 + 4) % 5, y, 0))
    }
}

/// Neighbour across the cell's north-west edge.
pub fn next_nw(key: CellKey, cell_count: u32) -> CellKey {
    let CellKey { rhomboid: r, x, y } = key;
    if y + 1 < cell_count {
        CellKey::new(r, x, y + 1)
    } else if key.is_northern() {
        CellKey::new((r + 4) % 5, cell_count - 1, x)
    } else {
        CellKey::new(r - 5, x, 0)
    }
}

/// Southward step along the meridian `lng`: the SE or SW neighbour whose
/// longitude span contains `lng`.
pub(crate) fn step_south<F>(
    key: CellKey,
    lng: f64,
    cell_count: u32,
    mut polygon: F,
) -> TmgResult<Option<CellKey>>
where
    F: FnMut(CellKey) -> TmgResult<CellPolygon>,
{
    let Some(se) = next_se(key, cell_count) else {
        return Ok(None);
    };
    if polygon(se)?.spans_lng(lng) {
        return Ok(Some(se));
    }
    if let Some(sw) = next_sw(key, cell_count) {
        if polygon(sw)?.spans_lng(lng) {
            return Ok(Some(sw));
        }
    }
    Ok(None)
}

/// Eastward step along the parallel `lat`: the SE neighbour if its latitude
/// span contains `lat`, otherwise the NE neighbour. From a south pole cell
/// the step moves to the next southern rhomboid's pole cell.
pub(crate) fn step_east<F>(
    key: CellKey,
    lat: f64,
    cell_count: u32,
    mut polygon: F,
) -> TmgResult<CellKey>
where
    F: FnMut(CellKey) -> TmgResult<CellPolygon>,
{
    match next_se(key, cell_count) {
        None => Ok(CellKey::new(5 + (key.rhomboid + 1) % 5, key.x, key.y)),
        Some(se) if polygon(se)?.spans_lat(lat) => Ok(se),
        Some(_) => Ok(next_ne(key, cell_count)),
    }
}

/// The four edge neighbours of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    pub ne: CellKey,
    pub se: Option<CellKey>,
    pub sw: Option<CellKey>,
    pub nw: CellKey,
}

impl Neighbors {
    /// The neighbours that exist, in NE, SE, SW, NW order.
    pub fn iter(&self) -> impl Iterator<Item = CellKey> {
        [Some(self.ne), self.se, self.sw, Some(self.nw)].into_iter().flatten()
    }
}

impl Grid {
    pub fn next_ne(&self, key: CellKey) -> TmgResult<CellKey> {
        self.check_key(&key)?;
        Ok(next_ne(key, self.cell_count()))
    }

    pub fn next_se(&self, key: CellKey) -> TmgResult<Option<CellKey>> {
        self.check_key(&key)?;
        Ok(next_se(key, self.cell_count()))
    }

    pub fn next_sw(&self, key: CellKey) -> TmgResult<Option<CellKey>> {
        self.check_key(&key)?;
        Ok(next_sw(key, self.cell_count()))
    }

    pub fn next_nw(&self, key: CellKey) -> TmgResult<CellKey> {
        self.check_key(&key)?;
        Ok(next_nw(key, self.cell_count()))
    }

    /// The SE or SW neighbour whose longitude span contains `lng`. `None`
    /// when the cell has no SE neighbour or neither span matches.
    pub fn next_south(&self, lng: f64, key: CellKey) -> TmgResult<Option<CellKey>> {
        self.check_key(&key)?;
        step_south(key, lng, self.cell_count(), |k| self.polygon(k))
    }

    /// The SE neighbour if its latitude span contains `lat`, else the NE
    /// neighbour.
    pub fn next_east(&self, lat: f64, key: CellKey) -> TmgResult<CellKey> {
        self.check_key(&key)?;
        step_east(key, lat, self.cell_count(), |k| self.polygon(k))
    }

    pub fn neighbors(&self, key: CellKey) -> TmgResult<Neighbors> {
        self.check_key(&key)?;
        let n = self.cell_count();
        Ok(Neighbors {
            ne: next_ne(key, n),
            se: next_se(key, n),
            sw: next_sw(key, n),
            nw: next_nw(key, n),
        })
    }

    /// Whether `lat` lies within the latitude span of the cell.
    pub fn lat_in_cell(&self, lat: f64, key: CellKey) -> TmgResult<bool> {
        Ok(self.polygon(key)?.spans_lat(lat))
    }

    /// Whether `lng` lies within the longitude span of the cell.
    pub fn lng_in_cell(&self, lng: f64, key: CellKey) -> TmgResult<bool> {
        Ok(self.polygon(key)?.spans_lng(lng))
    }
}
