//! Comprehensive tests for OrientedBoundingBox operations.

use test_utils::fixtures::boxes;
use tmg_common::bbox::{is_lng_between, lng_distance, OrientedBoundingBox};
use tmg_common::LatLng;

fn obb(from: (f64, f64), to: (f64, f64), orientation: i32) -> OrientedBoundingBox {
    OrientedBoundingBox::from_corners(
        LatLng::new(from.0, from.1),
        LatLng::new(to.0, to.1),
        orientation,
    )
}

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_obb_latitudes_sorted() {
    let bb = obb((-10.0, 5.0), (20.0, 15.0), 1);
    assert_eq!(bb.north, 20.0);
    assert_eq!(bb.south, -10.0);
    assert_eq!(bb.west, 5.0);
    assert_eq!(bb.east, 15.0);
}

#[test]
fn test_obb_normalizes_longitudes() {
    let bb = obb((10.0, 190.0), (-10.0, 540.0), 1);
    assert_eq!(bb.west, -170.0);
    assert_eq!(bb.east, 180.0);
}

#[test]
fn test_obb_negative_orientation_swaps_longitudes() {
    let bb = obb((10.0, 170.0), (-10.0, -170.0), -1);
    assert_eq!(bb.west, -170.0);
    assert_eq!(bb.east, 170.0);
    assert_eq!(bb.lng_span(), 340.0);
}

#[test]
fn test_obb_zero_orientation_is_eastward() {
    assert_eq!(obb((0.0, 0.0), (1.0, 10.0), 0), obb((0.0, 0.0), (1.0, 10.0), 1));
}

#[test]
fn test_try_from_corners_validates() {
    assert!(OrientedBoundingBox::try_from_corners(
        LatLng::new(91.0, 0.0),
        LatLng::new(0.0, 1.0),
        1
    )
    .is_err());
}

// ============================================================================
// from_nwse_string tests
// ============================================================================

#[test]
fn test_parse_nwse() {
    let bb = OrientedBoundingBox::from_nwse_string("50,-125,24,-66").unwrap();
    assert_eq!(bb.north, 50.0);
    assert_eq!(bb.west, -125.0);
    assert_eq!(bb.south, 24.0);
    assert_eq!(bb.east, -66.0);
}

#[test]
fn test_parse_nwse_errors() {
    assert!(OrientedBoundingBox::from_nwse_string("1,2,3").is_err());
    assert!(OrientedBoundingBox::from_nwse_string("1,2,x,4").is_err());
    assert!(OrientedBoundingBox::from_nwse_string("95,0,0,1").is_err());
}

// ============================================================================
// Longitude span tests
// ============================================================================

#[test]
fn test_lng_distance_hemispheres() {
    assert_eq!(lng_distance(-100.0, -50.0), 50.0);
    assert_eq!(lng_distance(-50.0, -100.0), 310.0);
    assert_eq!(lng_distance(50.0, -100.0), 210.0);
    assert_eq!(lng_distance(-100.0, 50.0), 150.0);
    assert_eq!(lng_distance(100.0, 50.0), 310.0);
    assert_eq!(lng_distance(50.0, 100.0), 50.0);
}

#[test]
fn test_lng_between_wraps() {
    assert!(is_lng_between(175.0, 170.0, -170.0));
    assert!(is_lng_between(-175.0, 170.0, -170.0));
    assert!(is_lng_between(180.0, 170.0, -170.0));
    assert!(!is_lng_between(0.0, 170.0, -170.0));
    assert!(is_lng_between(0.0, -170.0, 170.0));
}

#[test]
fn test_lng_between_endpoints() {
    assert!(is_lng_between(10.0, 10.0, 20.0));
    assert!(is_lng_between(20.0, 10.0, 20.0));
    assert!(is_lng_between(380.0, 10.0, 20.0));
}

#[test]
fn test_lng_between_full_circle() {
    for lng in [-179.0, -90.0, 0.0, 45.0, 180.0] {
        assert!(is_lng_between(lng, -180.0, 180.0));
    }
}

// ============================================================================
// Containment tests
// ============================================================================

#[test]
fn test_contains_fixture_boxes() {
    let conus = obb(boxes::CONUS.0, boxes::CONUS.1, 1);
    assert!(conus.contains(LatLng::new(39.0, -94.5)));
    assert!(!conus.contains(LatLng::new(39.0, 2.35)));

    let pacific = obb(boxes::PACIFIC.0, boxes::PACIFIC.1, 1);
    assert!(pacific.crosses_antimeridian());
    assert!(pacific.contains(LatLng::new(0.0, 180.0)));
    assert!(pacific.contains(LatLng::new(0.0, -150.0)));
    assert!(!pacific.contains(LatLng::new(0.0, 0.0)));

    let global = obb(boxes::GLOBAL.0, boxes::GLOBAL.1, 1);
    assert!(global.is_global_lng());
    assert!(!global.crosses_antimeridian());
    assert!(global.contains(LatLng::new(-45.0, 123.0)));
}

#[test]
fn test_contains_edges() {
    let bb = obb((10.0, 0.0), (0.0, 10.0), 1);
    assert!(bb.contains(LatLng::new(10.0, 0.0)));
    assert!(bb.contains(LatLng::new(0.0, 10.0)));
    assert!(!bb.contains(LatLng::new(10.0000001, 5.0)));
}

#[test]
fn test_corners_order() {
    let bb = obb((10.0, 0.0), (0.0, 10.0), 1);
    let [nw, ne, sw, se] = bb.corners();
    assert_eq!(nw, LatLng::new(10.0, 0.0));
    assert_eq!(ne, LatLng::new(10.0, 10.0));
    assert_eq!(sw, LatLng::new(0.0, 0.0));
    assert_eq!(se, LatLng::new(0.0, 10.0));
}
