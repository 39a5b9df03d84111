//! Bounding-box query.
//!
//! The walk starts at the cell holding the box's north-west corner and
//! collects rows of cells by stepping NE while cells still overlap the box.
//! Row starts move south along the west edge, then east along the south
//! edge. A final flood over edge neighbours picks up cells the row walk
//! cannot reach, which happens where rows bend around a pole or wrap the
//! whole globe.

use std::collections::{HashMap, HashSet, VecDeque};

use spherical::{lat_where_meridian_crosses_arc, lngs_where_parallel_crosses_arc, LatLng};
use tmg_common::{is_lng_between, CellKey, OrientedBoundingBox, TmgResult};
use tracing::{debug, trace, warn};

use crate::adjacency::{next_ne, next_nw, next_se, next_sw, step_east, step_south};
use crate::grid::Grid;
use crate::polygon::CellPolygon;

impl Grid {
    /// Every cell overlapping the box spanned by `from` and `to`.
    ///
    /// `orientation` selects the longitude direction, see
    /// [`OrientedBoundingBox::from_corners`]. Keys come back in walk order,
    /// each once.
    pub fn tile(&self, from: LatLng, to: LatLng, orientation: i32) -> TmgResult<Vec<CellKey>> {
        let bb = OrientedBoundingBox::try_from_corners(from, to, orientation)?;
        self.tile_box(&bb)
    }

    /// Every cell overlapping `bb`.
    pub fn tile_box(&self, bb: &OrientedBoundingBox) -> TmgResult<Vec<CellKey>> {
        let mut walk = TileWalk::new(self, bb);
        walk.run()?;
        debug!(
            north = bb.north,
            west = bb.west,
            south = bb.south,
            east = bb.east,
            cells = walk.keys.len(),
            polygons = walk.polygons.len(),
            "tile walk complete"
        );
        Ok(walk.keys)
    }

    /// Whether the cell's polygon overlaps `bb`.
    pub fn cell_in_bb(&self, key: CellKey, bb: &OrientedBoundingBox) -> TmgResult<bool> {
        let polygon = self.polygon(key)?;
        let corner_keys = self.corner_keys(bb);
        Ok(polygon_in_bb(&polygon, bb, &corner_keys))
    }

    fn corner_keys(&self, bb: &OrientedBoundingBox) -> [CellKey; 4] {
        bb.corners().map(|c| self.locate(c))
    }
}

/// Overlap test between a cell and a box, cheapest checks first.
///
/// 1. Reject when the cell lies wholly north or south of the box.
/// 2. Accept when a cell vertex lies in the box.
/// 3. Accept when a box corner lies in the cell.
/// 4. Accept when a box edge crosses a cell edge. Near the poles a cell
///    edge can meet a parallel twice, so every crossing is checked.
fn polygon_in_bb(polygon: &CellPolygon, bb: &OrientedBoundingBox, corner_keys: &[CellKey; 4]) -> bool {
    if polygon.south.lat > bb.north || polygon.north.lat < bb.south {
        return false;
    }
    if polygon.vertices().iter().any(|&v| bb.contains(v)) {
        return true;
    }
    if corner_keys.contains(&polygon.key) {
        return true;
    }
    polygon.edges().iter().any(|&(a, b)| {
        let crosses_parallel = [bb.north, bb.south].iter().any(|&lat| {
            lngs_where_parallel_crosses_arc(lat, a, b)
                .into_iter()
                .any(|lng| is_lng_between(lng, bb.west, bb.east))
        });
        crosses_parallel
            || [bb.west, bb.east].iter().any(|&lng| {
                lat_where_meridian_crosses_arc(lng, a, b)
                    .is_some_and(|lat| bb.south <= lat && lat <= bb.north)
            })
    })
}

/// State of one bounding-box query. Polygons and overlap results are
/// memoized since the walk revisits cells from several directions.
struct TileWalk<'a> {
    grid: &'a Grid,
    bb: OrientedBoundingBox,
    corner_keys: [CellKey; 4],
    polygons: HashMap<CellKey, CellPolygon>,
    overlaps: HashMap<CellKey, bool>,
    keys: Vec<CellKey>,
    seen: HashSet<CellKey>,
}

impl<'a> TileWalk<'a> {
    fn new(grid: &'a Grid, bb: &OrientedBoundingBox) -> Self {
        Self {
            grid,
            bb: *bb,
            corner_keys: grid.corner_keys(bb),
            polygons: HashMap::new(),
            overlaps: HashMap::new(),
            keys: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn cell_count(&self) -> u32 {
        self.grid.cell_count()
    }

    fn overlaps(&mut self, key: CellKey) -> TmgResult<bool> {
        if let Some(&hit) = self.overlaps.get(&key) {
            return Ok(hit);
        }
        let polygon = cached_polygon(self.grid, &mut self.polygons, key)?;
        let hit = polygon_in_bb(&polygon, &self.bb, &self.corner_keys);
        self.overlaps.insert(key, hit);
        Ok(hit)
    }

    fn record(&mut self, key: CellKey) -> bool {
        if self.seen.insert(key) {
            self.keys.push(key);
            true
        } else {
            false
        }
    }

    fn run(&mut self) -> TmgResult<()> {
        let start = self.corner_keys[0];
        if !self.overlaps(start)? {
            warn!(%start, "north-west corner cell fails the overlap test");
        }
        let last = self.walk_west_edge(start)?;
        self.walk_south_edge(last)?;
        let before = self.keys.len();
        self.complete()?;
        if self.keys.len() > before {
            debug!(added = self.keys.len() - before, "completion pass added cells");
        }
        Ok(())
    }

    /// Collect one row by stepping NE until a cell no longer overlaps or
    /// the row wraps onto itself.
    fn walk_row(&mut self, start: CellKey) -> TmgResult<()> {
        let n = self.cell_count();
        let mut row = HashSet::new();
        let mut cell = start;
        while !row.contains(&cell) && self.overlaps(cell)? {
            row.insert(cell);
            self.record(cell);
            cell = next_ne(cell, n);
        }
        trace!(%start, cells = row.len(), "walked row");
        Ok(())
    }

    /// Rows starting down the west edge. Returns the last row start.
    fn walk_west_edge(&mut self, first: CellKey) -> TmgResult<CellKey> {
        let n = self.cell_count();
        let west = self.bb.west;
        let mut starts = HashSet::new();
        let mut start = first;
        let mut last = first;
        while !starts.contains(&start) && self.overlaps(start)? {
            starts.insert(start);
            // The west edge may clip the cell SW of the one holding it.
            if let Some(sw) = next_sw(start, n) {
                if !starts.contains(&sw) && self.overlaps(sw)? {
                    start = sw;
                    starts.insert(sw);
                }
            }
            self.walk_row(start)?;
            last = start;

            let grid = self.grid;
            let polygons = &mut self.polygons;
            let next = step_south(start, west, n, |k| cached_polygon(grid, polygons, k))?;
            match next {
                Some(next) => start = next,
                None => break,
            }
        }
        Ok(last)
    }

    /// Rows starting along the south edge, east of the last west-edge row.
    fn walk_south_edge(&mut self, last: CellKey) -> TmgResult<()> {
        let n = self.cell_count();
        let south = self.bb.south;
        let grid = self.grid;
        let mut start = step_east(last, south, n, |k| cached_polygon(grid, &mut self.polygons, k))?;
        let mut visited = HashSet::new();
        while !visited.contains(&start) && self.overlaps(start)? {
            visited.insert(start);
            self.walk_row(start)?;
            start = step_east(start, south, n, |k| cached_polygon(grid, &mut self.polygons, k))?;
        }
        Ok(())
    }

    /// Flood from every collected cell over edge neighbours that overlap.
    ///
    /// The south pole cells of the five southern rhomboids meet only at the
    /// pole, so a box reaching a pole seeds that pole's cells directly.
    fn complete(&mut self) -> TmgResult<()> {
        let n = self.cell_count();
        let mut queue: VecDeque<CellKey> = self.keys.iter().copied().collect();
        let mut seeds = self.corner_keys.to_vec();
        if self.bb.south <= -90.0 {
            seeds.extend((5..10).map(|r| CellKey::new(r, 0, 0)));
        }
        if self.bb.north >= 90.0 {
            seeds.extend((0..5).map(|r| CellKey::new(r, n - 1, n - 1)));
        }
        for key in seeds {
            if self.overlaps(key)? && self.record(key) {
                queue.push_back(key);
            }
        }
        while let Some(key) = queue.pop_front() {
            let neighbours = [
                Some(next_ne(key, n)),
                next_se(key, n),
                next_sw(key, n),
                Some(next_nw(key, n)),
            ];
            for neighbour in neighbours.into_iter().flatten() {
                if !self.seen.contains(&neighbour) && self.overlaps(neighbour)? {
                    self.record(neighbour);
                    queue.push_back(neighbour);
                }
            }
        }
        Ok(())
    }
}

fn cached_polygon(
    grid: &Grid,
    polygons: &mut HashMap<CellKey, CellPolygon>,
    key: CellKey,
) -> TmgResult<CellPolygon> {
    if let Some(p) = polygons.get(&key) {
        return Ok(*p);
    }
    let p = grid.polygon(key)?;
    polygons.insert(key, p);
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_set(keys: &[CellKey]) -> HashSet<CellKey> {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_global_box_covers_every_cell() {
        let grid = Grid::default();
        let keys = grid
            .tile(LatLng::new(90.0, -180.0), LatLng::new(-90.0, 180.0), 1)
            .unwrap();
        assert_eq!(keys.len(), 90);
        assert_eq!(keys_set(&keys).len(), 90);
    }

    #[test]
    fn test_antimeridian_box() {
        let grid = Grid::default();
        let keys = grid
            .tile(LatLng::new(10.0, 170.0), LatLng::new(-10.0, -170.0), 1)
            .unwrap();
        let expected: HashSet<CellKey> =
            [CellKey::new(7, 1, 2), CellKey::new(7, 2, 1), CellKey::new(7, 2, 2)]
                .into_iter()
                .collect();
        assert_eq!(keys_set(&keys), expected);
    }

    #[test]
    fn test_small_box_contains_its_corner_cells() {
        let grid = Grid::with_cell_count(12).unwrap();
        let bb = OrientedBoundingBox::from_corners(LatLng::new(48.0, 2.0), LatLng::new(45.0, 8.0), 1);
        let keys = keys_set(&grid.tile_box(&bb).unwrap());
        for corner in bb.corners() {
            let k = grid.cell_key(corner.lat, corner.lng).unwrap();
            assert!(keys.contains(&k), "corner cell {} missing", k);
        }
    }

    #[test]
    fn test_box_touching_south_pole_reaches_every_pole_cell() {
        let grid = Grid::with_cell_count(7).unwrap();
        let keys = keys_set(
            &grid
                .tile(LatLng::new(-70.0, 0.0), LatLng::new(-90.0, 60.0), 1)
                .unwrap(),
        );
        for r in 5..10 {
            assert!(keys.contains(&CellKey::new(r, 0, 0)), "pole cell of {} missing", r);
        }
    }

    #[test]
    fn test_cell_in_bb() {
        let grid = Grid::default();
        let bb = OrientedBoundingBox::from_corners(LatLng::new(1.0, -1.0), LatLng::new(-1.0, 1.0), 1);
        let inside = grid.cell_key(0.0, 0.0).unwrap();
        assert!(grid.cell_in_bb(inside, &bb).unwrap());
        let far = grid.cell_key(-60.0, 180.0).unwrap();
        assert!(!grid.cell_in_bb(far, &bb).unwrap());
    }

    #[test]
    fn test_tile_rejects_bad_corner() {
        let grid = Grid::default();
        assert!(grid.tile(LatLng::new(95.0, 0.0), LatLng::new(0.0, 10.0), 1).is_err());
    }
}
