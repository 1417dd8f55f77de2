//! Geographic primitives: coordinates, bounds, bearings, and the Web-Mercator projection.
//!
//! Angles crossing this module's API are in radians unless the name says otherwise. Latitude
//! and longitude are stored in degrees because that is what every map host speaks.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{EARTH_RADIUS_M, MAX_MERCATOR_LAT, MEAN_EARTH_RADIUS_M};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Build bounds from any two opposite corners.
    #[must_use]
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// The whole globe.
    #[must_use]
    pub fn world() -> Self {
        Self::from_corners(LatLng::new(-90.0, -180.0), LatLng::new(90.0, 180.0))
    }

    /// Whether `coord` lies inside the bounds (edges inclusive).
    #[must_use]
    pub fn contains(&self, coord: LatLng) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&coord.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&coord.lng)
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) * 0.5,
            (self.south_west.lng + self.north_east.lng) * 0.5,
        )
    }
}

/// Initial compass bearing from `from` to `to`, in radians within `[0, 2π)`.
///
/// Zero points north and the angle grows clockwise. Identical points yield zero.
#[must_use]
pub fn bearing(from: LatLng, to: LatLng) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let dlambda = (to.lng - from.lng).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    normalize_radians(y.atan2(x))
}

/// Great-circle (haversine) distance in metres.
#[must_use]
pub fn distance(a: LatLng, b: LatLng) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Project to spherical Web-Mercator metres (EPSG:3857). `y` grows northward.
#[must_use]
pub fn to_mercator(coord: LatLng) -> Point {
    let lat = coord.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    Point {
        x: EARTH_RADIUS_M * coord.lng.to_radians(),
        y: EARTH_RADIUS_M * (PI / 4.0 + lat / 2.0).tan().ln(),
    }
}

/// Inverse of [`to_mercator`].
#[must_use]
pub fn from_mercator(point: Point) -> LatLng {
    LatLng {
        lat: (2.0 * (point.y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees(),
        lng: (point.x / EARTH_RADIUS_M).to_degrees(),
    }
}

/// Fold any angle into `[0, 2π)`.
#[must_use]
pub fn normalize_radians(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}
