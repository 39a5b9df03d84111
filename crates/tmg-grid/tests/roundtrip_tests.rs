//! Lookup and polygon must describe the same grid: points inside a cell's
//! polygon look up to that cell.

use nalgebra::Vector3;
use spherical::{from_unit_vector, to_unit_vector};
use test_utils::fixtures::{points, RESOLUTIONS};
use test_utils::{lat_lng_lattice, random_points};
use tmg_grid::{CellKey, Grid, LatLng};

/// Point a fraction `t` of the way from `from` toward `to` along the chord,
/// projected back onto the sphere.
fn toward(from: LatLng, to: LatLng, t: f64) -> LatLng {
    let a = to_unit_vector(from);
    let b = to_unit_vector(to);
    let v: Vector3<f64> = a * (1.0 - t) + b * t;
    from_unit_vector(&v)
}

// ============================================================================
// Centre round trips
// ============================================================================

#[test]
fn test_center_round_trip_default_resolution() {
    let grid = Grid::default();
    for key in grid.all_cells() {
        let c = grid.cell_center(key).unwrap();
        assert_eq!(grid.cell_key(c.lat, c.lng).unwrap(), key, "center {} of {}", c, key);
    }
}

#[test]
fn test_center_round_trip_all_resolutions() {
    for &n in RESOLUTIONS.iter() {
        let grid = Grid::with_cell_count(n).unwrap();
        for key in grid.all_cells() {
            let c = grid.cell_center(key).unwrap();
            let found = grid.cell_key(c.lat, c.lng).unwrap();
            assert_eq!(found, key, "n={}: center {} of {} looked up as {}", n, c, key, found);
        }
    }
}

#[test]
fn test_points_toward_vertices_round_trip() {
    for n in [1, 2, 3, 5, 8] {
        let grid = Grid::with_cell_count(n).unwrap();
        for key in grid.all_cells() {
            let polygon = grid.polygon(key).unwrap();
            let center = polygon.center();
            for vertex in polygon.vertices() {
                let p = toward(center, vertex, 0.8);
                let found = grid.cell_key(p.lat, p.lng).unwrap();
                assert_eq!(found, key, "n={}: {} toward {} of {} gave {}", n, p, vertex, key, found);
            }
        }
    }
}

// ============================================================================
// Lookup sanity
// ============================================================================

#[test]
fn test_every_cell_is_hit_by_a_dense_lattice() {
    let grid = Grid::default();
    let mut hits = std::collections::HashSet::new();
    for (lat, lng) in lat_lng_lattice(2.0) {
        hits.insert(grid.cell_key(lat, lng).unwrap());
    }
    assert_eq!(hits.len(), 90);
}

#[test]
fn test_random_points_give_in_range_keys() {
    for &n in RESOLUTIONS.iter() {
        let grid = Grid::with_cell_count(n).unwrap();
        for (lat, lng) in random_points(500, u64::from(n)) {
            let key = grid.cell_key(lat, lng).unwrap();
            assert!(key.validate(n).is_ok(), "{} out of range at n={}", key, n);
        }
    }
}

#[test]
fn test_fixture_points() {
    let grid = Grid::default();
    for &(lat, lng) in points::ALL.iter() {
        let key = grid.cell_key(lat, lng).unwrap();
        assert!(grid.polygon(key).is_ok());
    }
    let north = grid.cell_key(points::NORTH_POLE.0, points::NORTH_POLE.1).unwrap();
    assert_eq!(north, CellKey::new(0, 2, 2));
    let south = grid.cell_key(points::SOUTH_POLE.0, points::SOUTH_POLE.1).unwrap();
    assert_eq!((south.x, south.y), (0, 0));
    assert!(!south.is_northern());
}

#[test]
fn test_lookup_ignores_longitude_wrapping() {
    let grid = Grid::with_cell_count(7).unwrap();
    for (lat, lng) in random_points(200, 99) {
        assert_eq!(
            grid.cell_key(lat, lng).unwrap(),
            grid.cell_key(lat, lng + 360.0).unwrap()
        );
    }
}

// ============================================================================
// Polygon shape
// ============================================================================

#[test]
fn test_rings_close() {
    for &n in RESOLUTIONS.iter() {
        let grid = Grid::with_cell_count(n).unwrap();
        for key in grid.all_cells() {
            let ring = grid.cell_polygon(key).unwrap();
            assert!(ring.len() == 5 || ring.len() == 6, "{} has {} points", key, ring.len());
            assert_eq!(ring.first(), ring.last(), "{} ring is not closed", key);
        }
    }
}

#[test]
fn test_pole_rings() {
    let grid = Grid::default();
    for key in grid.all_cells() {
        let polygon = grid.polygon(key).unwrap();
        let ring = polygon.ring();
        let touches_pole = polygon.touches_north_pole() || polygon.touches_south_pole();
        if touches_pole {
            assert_eq!(ring.len(), 6, "{}", key);
            let pole_vertices = ring[..5].iter().filter(|p| p.lat.abs() == 90.0).count();
            assert_eq!(pole_vertices, 2, "{}", key);
        } else {
            assert_eq!(ring.len(), 5, "{}", key);
        }
    }
    // Five cells touch each pole.
    let north = grid
        .all_cells()
        .into_iter()
        .filter(|&k| grid.polygon(k).unwrap().touches_north_pole())
        .count();
    let south = grid
        .all_cells()
        .into_iter()
        .filter(|&k| grid.polygon(k).unwrap().touches_south_pole())
        .count();
    assert_eq!((north, south), (5, 5));
}

#[test]
fn test_vertices_are_truncated() {
    let grid = Grid::with_cell_count(4).unwrap();
    for key in grid.all_cells() {
        for [lng, lat] in grid.cell_polygon(key).unwrap() {
            assert_eq!(lat, (lat * 1e7).round() / 1e7);
            assert_eq!(lng, (lng * 1e7).round() / 1e7);
            assert!(lng > -180.0 && lng <= 180.0);
        }
    }
}
