#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, PI};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn ll(lat: f64, lng: f64) -> LatLng {
    LatLng::new(lat, lng)
}

// =============================================================
// bearing
// =============================================================

#[test]
fn bearing_due_north_is_zero() {
    assert!(approx_eq(bearing(ll(0.0, 0.0), ll(1.0, 0.0)), 0.0));
}

#[test]
fn bearing_due_east_is_quarter_turn() {
    assert!(approx_eq(bearing(ll(0.0, 0.0), ll(0.0, 1.0)), FRAC_PI_2));
}

#[test]
fn bearing_due_south_is_half_turn() {
    assert!(approx_eq(bearing(ll(0.0, 0.0), ll(-1.0, 0.0)), PI));
}

#[test]
fn bearing_due_west_is_three_quarter_turn() {
    assert!(approx_eq(bearing(ll(0.0, 0.0), ll(0.0, -1.0)), 3.0 * FRAC_PI_2));
}

#[test]
fn bearing_same_point_is_zero() {
    let p = ll(37.2, -115.8);
    assert_eq!(bearing(p, p), 0.0);
}

#[test]
fn bearing_is_always_in_range() {
    let origin = ll(42.0, 41.0);
    for (dlat, dlng) in [(0.3, -0.7), (-0.9, -0.1), (-0.2, 0.8), (0.5, 0.5)] {
        let b = bearing(origin, ll(origin.lat + dlat, origin.lng + dlng));
        assert!((0.0..std::f64::consts::TAU).contains(&b), "bearing {b} out of range");
    }
}

// =============================================================
// distance
// =============================================================

#[test]
fn distance_one_degree_of_latitude() {
    let d = distance(ll(0.0, 0.0), ll(1.0, 0.0));
    assert!((d - 111_194.93).abs() < 1.0, "got {d}");
}

#[test]
fn distance_is_symmetric() {
    let a = ll(36.0, -115.0);
    let b = ll(37.5, -114.2);
    assert!(approx_eq(distance(a, b), distance(b, a)));
}

#[test]
fn distance_to_self_is_zero() {
    let a = ll(36.0, -115.0);
    assert_eq!(distance(a, a), 0.0);
}

// =============================================================
// Mercator projection
// =============================================================

#[test]
fn mercator_origin_maps_to_origin() {
    let p = to_mercator(ll(0.0, 0.0));
    assert!(approx_eq(p.x, 0.0));
    assert!(approx_eq(p.y, 0.0));
}

#[test]
fn mercator_antimeridian_is_half_circumference() {
    let p = to_mercator(ll(0.0, 180.0));
    assert!((p.x - 20_037_508.342_789_244).abs() < 1e-3);
}

#[test]
fn mercator_north_is_positive_y() {
    assert!(to_mercator(ll(10.0, 0.0)).y > 0.0);
    assert!(to_mercator(ll(-10.0, 0.0)).y < 0.0);
}

#[test]
fn mercator_inverse_recovers_coordinate() {
    let original = ll(37.23, -115.8);
    let back = from_mercator(to_mercator(original));
    assert!((back.lat - original.lat).abs() < 1e-9);
    assert!((back.lng - original.lng).abs() < 1e-9);
}

#[test]
fn mercator_clamps_polar_latitudes() {
    let p = to_mercator(ll(90.0, 0.0));
    assert!(p.y.is_finite());
}

// =============================================================
// normalize_radians
// =============================================================

#[test]
fn normalize_negative_angle() {
    assert!(approx_eq(normalize_radians(-FRAC_PI_2), 3.0 * FRAC_PI_2));
}

#[test]
fn normalize_full_turn_is_zero() {
    assert!(approx_eq(normalize_radians(2.0 * PI), 0.0));
}

// =============================================================
// LatLngBounds
// =============================================================

#[test]
fn bounds_from_corners_orders_edges() {
    let b = LatLngBounds::from_corners(ll(10.0, 20.0), ll(5.0, 25.0));
    assert_eq!(b.south_west, ll(5.0, 20.0));
    assert_eq!(b.north_east, ll(10.0, 25.0));
}

#[test]
fn bounds_contains_inside_and_edges() {
    let b = LatLngBounds::from_corners(ll(0.0, 0.0), ll(10.0, 10.0));
    assert!(b.contains(ll(5.0, 5.0)));
    assert!(b.contains(ll(0.0, 10.0)));
    assert!(!b.contains(ll(10.1, 5.0)));
    assert!(!b.contains(ll(5.0, -0.1)));
}

#[test]
fn bounds_center() {
    let b = LatLngBounds::from_corners(ll(0.0, 0.0), ll(10.0, 20.0));
    assert_eq!(b.center(), ll(5.0, 10.0));
}

#[test]
fn world_bounds_contain_everything() {
    let w = LatLngBounds::world();
    assert!(w.contains(ll(-89.0, 179.0)));
    assert!(w.contains(ll(45.0, -120.0)));
}
