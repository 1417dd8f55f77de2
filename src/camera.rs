//! Screen points, the map-view capability, and a Web-Mercator slippy-map camera.
//!
//! [`MapView`] is everything the interaction core needs from a map widget: panning, jumping to a
//! view, and converting between container pixels and coordinates. [`Camera`] is the in-crate
//! implementation used by the browser host and by tests.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::f64::consts::PI;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_LAT, INITIAL_LNG, INITIAL_ZOOM, MAX_MERCATOR_LAT, MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::geo::LatLng;

/// A point in container (screen) pixels or projected space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Map widget operations consumed by the interaction core.
pub trait MapView {
    /// Displace the view by `offset` container pixels (positive x pans east, positive y south).
    fn pan_by(&mut self, offset: Point);

    /// Jump to `center` at `zoom`. `animate` is a hint; hosts without animation ignore it.
    fn set_view(&mut self, center: LatLng, zoom: f64, animate: bool);

    fn center(&self) -> LatLng;

    fn zoom(&self) -> f64;

    /// Coordinate under a container pixel.
    fn container_point_to_latlng(&self, point: Point) -> LatLng;

    /// Container pixel of a coordinate.
    fn latlng_to_container_point(&self, coord: LatLng) -> Point;
}

/// Camera state for a Web-Mercator tiled map.
///
/// `center` is the coordinate at the middle of the viewport; `zoom` follows slippy-map levels
/// (one tile of [`TILE_SIZE`] pixels covers the world at zoom 0).
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    center: LatLng,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    viewport_width: f64,
    viewport_height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: LatLng::new(INITIAL_LAT, INITIAL_LNG),
            zoom: INITIAL_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

impl Camera {
    /// Create a camera with explicit zoom limits. The initial zoom is clamped into them.
    ///
    /// Swapped limits are reordered and a NaN limit leaves that side unbounded.
    #[must_use]
    pub fn new(center: LatLng, zoom: f64, min_zoom: f64, max_zoom: f64) -> Self {
        let lo = if min_zoom.is_nan() { f64::NEG_INFINITY } else { min_zoom };
        let hi = if max_zoom.is_nan() { f64::INFINITY } else { max_zoom };
        let (min_zoom, max_zoom) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        Self {
            center,
            zoom: zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    /// Update the viewport size in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
    }

    #[must_use]
    pub fn viewport_size(&self) -> Point {
        Point::new(self.viewport_width, self.viewport_height)
    }

    /// Top-left corner of the viewport in world pixels at the current zoom.
    fn pixel_origin(&self) -> Point {
        let half = Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5);
        project(self.center, self.zoom) - half
    }
}

impl MapView for Camera {
    fn pan_by(&mut self, offset: Point) {
        let moved = project(self.center, self.zoom) + offset;
        self.center = unproject(moved, self.zoom);
    }

    fn set_view(&mut self, center: LatLng, zoom: f64, animate: bool) {
        log::trace!("set_view ({:.4}, {:.4}) z{zoom} animate={animate}", center.lat, center.lng);
        self.center = center;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn container_point_to_latlng(&self, point: Point) -> LatLng {
        unproject(self.pixel_origin() + point, self.zoom)
    }

    fn latlng_to_container_point(&self, coord: LatLng) -> Point {
        project(coord, self.zoom) - self.pixel_origin()
    }
}

fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

/// Coordinate to world pixels at `zoom`. `y` grows southward.
#[must_use]
pub fn project(coord: LatLng, zoom: f64) -> Point {
    let size = world_size(zoom);
    let lat = coord.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    Point {
        x: (coord.lng + 180.0) / 360.0 * size,
        y: (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size,
    }
}

/// World pixels at `zoom` back to a coordinate.
#[must_use]
pub fn unproject(point: Point, zoom: f64) -> LatLng {
    let size = world_size(zoom);
    let n = PI - 2.0 * PI * point.y / size;
    LatLng {
        lat: n.sinh().atan().to_degrees(),
        lng: point.x / size * 360.0 - 180.0,
    }
}
