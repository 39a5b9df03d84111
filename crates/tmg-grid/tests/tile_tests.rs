//! Bounding-box queries checked against a scan of every cell and against
//! point lookups sampled inside the box.

use std::collections::HashSet;

use test_utils::fixtures::boxes;
use test_utils::random_boxes;
use tmg_grid::{CellKey, Grid, LatLng, OrientedBoundingBox};

fn corners(((from_lat, from_lng), (to_lat, to_lng)): ((f64, f64), (f64, f64))) -> (LatLng, LatLng) {
    (LatLng::new(from_lat, from_lng), LatLng::new(to_lat, to_lng))
}

fn tile_set(grid: &Grid, bb: &OrientedBoundingBox) -> HashSet<CellKey> {
    let keys = grid.tile_box(bb).unwrap();
    let set: HashSet<CellKey> = keys.iter().copied().collect();
    assert_eq!(set.len(), keys.len(), "tile returned duplicates");
    set
}

fn brute_force(grid: &Grid, bb: &OrientedBoundingBox) -> HashSet<CellKey> {
    grid.all_cells()
        .into_iter()
        .filter(|&k| grid.cell_in_bb(k, bb).unwrap())
        .collect()
}

/// Cells of points sampled on a `steps × steps` lattice inside the box.
fn sampled(grid: &Grid, bb: &OrientedBoundingBox, steps: usize) -> HashSet<CellKey> {
    let mut keys = HashSet::new();
    for i in 0..=steps {
        let lat = bb.south + (bb.north - bb.south) * i as f64 / steps as f64;
        for j in 0..=steps {
            let lng = bb.west + bb.lng_span() * j as f64 / steps as f64;
            keys.insert(grid.cell_key(lat, lng).unwrap());
        }
    }
    keys
}

// ============================================================================
// Known boxes
// ============================================================================

#[test]
fn test_global_box() {
    let grid = Grid::default();
    let (from, to) = corners(boxes::GLOBAL);
    let keys = grid.tile(from, to, 1).unwrap();
    assert_eq!(keys.len(), 90);
    assert_eq!(keys.iter().collect::<HashSet<_>>().len(), 90);
}

#[test]
fn test_antimeridian_box() {
    let grid = Grid::default();
    let (from, to) = corners(boxes::ANTIMERIDIAN);
    let keys: HashSet<CellKey> = grid.tile(from, to, 1).unwrap().into_iter().collect();
    let expected: HashSet<CellKey> = ["7-1-2", "7-2-1", "7-2-2"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_orientation_combinations() {
    let grid = Grid::with_cell_count(4).unwrap();
    let a = LatLng::new(-10.0, -10.0);
    let b = LatLng::new(10.0, 10.0);

    // Same corners, eastward from a: the small box.
    let small = grid.tile(a, b, 1).unwrap();
    // Swapping the corners keeps north/south and swaps west/east.
    let wide = grid.tile(b, a, 1).unwrap();
    assert!(small.len() < wide.len());

    // A negative orientation reverses the longitude direction.
    let wide_again: HashSet<_> = grid.tile(a, b, -1).unwrap().into_iter().collect();
    assert_eq!(wide_again, wide.into_iter().collect());
    let small_again: HashSet<_> = grid.tile(b, a, -1).unwrap().into_iter().collect();
    assert_eq!(small_again, small.into_iter().collect());
}

#[test]
fn test_fixture_boxes_match_brute_force() {
    let all = [
        boxes::CONUS,
        boxes::EUROPE,
        boxes::SMALL,
        boxes::PACIFIC,
        boxes::ANTIMERIDIAN,
        boxes::ARCTIC,
        boxes::ANTARCTIC,
    ];
    for n in [3, 7] {
        let grid = Grid::with_cell_count(n).unwrap();
        for corner_pair in all {
            let (from, to) = corners(corner_pair);
            let bb = OrientedBoundingBox::from_corners(from, to, 1);
            assert_eq!(tile_set(&grid, &bb), brute_force(&grid, &bb), "{:?} at n={}", bb, n);
        }
    }
}

#[test]
fn test_polar_caps() {
    let grid = Grid::default();
    let (from, to) = corners(boxes::ARCTIC);
    let arctic: HashSet<CellKey> = grid.tile(from, to, 1).unwrap().into_iter().collect();
    assert!(arctic.iter().all(|k| k.is_northern()));
    for r in 0..5u8 {
        assert!(arctic.contains(&CellKey::new(r, 2, 2)), "north pole cell of {} missing", r);
    }

    let (from, to) = corners(boxes::ANTARCTIC);
    let antarctic: HashSet<CellKey> = grid.tile(from, to, 1).unwrap().into_iter().collect();
    for r in 5..10u8 {
        assert!(antarctic.contains(&CellKey::new(r, 0, 0)), "south pole cell of {} missing", r);
    }
}

#[test]
fn test_tiny_box_is_one_cell() {
    let grid = Grid::default();
    let (from, to) = corners(boxes::SMALL);
    let keys = grid.tile(from, to, 1).unwrap();
    assert_eq!(keys, vec![grid.cell_key(38.95, -95.35).unwrap()]);
}

// ============================================================================
// Randomized agreement
// ============================================================================

#[test]
fn test_random_boxes_match_brute_force() {
    for (i, corner_pair) in random_boxes(60, 35.0, 2024).into_iter().enumerate() {
        let n = [1, 2, 3, 4, 6][i % 5];
        let orientation = if i % 3 == 0 { -1 } else { 1 };
        let grid = Grid::with_cell_count(n).unwrap();
        let (from, to) = corners(corner_pair);
        let bb = OrientedBoundingBox::from_corners(from, to, orientation);
        assert_eq!(tile_set(&grid, &bb), brute_force(&grid, &bb), "{:?} at n={}", bb, n);
    }
}

#[test]
fn test_random_boxes_cover_sampled_points() {
    for (i, corner_pair) in random_boxes(30, 35.0, 77).into_iter().enumerate() {
        let n = [2, 3, 5][i % 3];
        let grid = Grid::with_cell_count(n).unwrap();
        let (from, to) = corners(corner_pair);
        let bb = OrientedBoundingBox::from_corners(from, to, 1);
        let tiled = tile_set(&grid, &bb);
        let missing: Vec<_> = sampled(&grid, &bb, 24).difference(&tiled).copied().collect();
        assert!(missing.is_empty(), "{:?} at n={} misses {:?}", bb, n, missing);
    }
}
