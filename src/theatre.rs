//! Theatre bounds and the minimap frame that follows them.

#[cfg(test)]
#[path = "theatre_test.rs"]
mod theatre_test;

use serde::{Deserialize, Serialize};

use crate::consts::FALLBACK_MINIMAP_ZOOM;
use crate::geo::{LatLng, LatLngBounds};

/// Map extent of a simulator theatre and the fixed zoom its minimap uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheatreFrame {
    pub bounds: LatLngBounds,
    pub minimap_zoom: f64,
}

/// `(name, south-west, north-east, minimap zoom)`
const THEATRES: &[(&str, (f64, f64), (f64, f64), f64)] = &[
    ("Caucasus", (39.6, 27.5), (47.2, 45.8), 4.5),
    ("MarianaIslands", (11.5, 142.0), (19.0, 148.5), 5.0),
    ("Nevada", (34.4, -119.0), (39.8, -112.0), 5.0),
    ("PersianGulf", (22.0, 50.0), (30.5, 60.0), 4.5),
    ("Syria", (31.0, 30.5), (37.6, 40.6), 4.5),
];

/// Look up a theatre by its simulator name.
#[must_use]
pub fn lookup(name: &str) -> Option<TheatreFrame> {
    THEATRES.iter().find(|(n, ..)| *n == name).map(|&(_, sw, ne, minimap_zoom)| TheatreFrame {
        bounds: LatLngBounds::from_corners(LatLng::new(sw.0, sw.1), LatLng::new(ne.0, ne.1)),
        minimap_zoom,
    })
}

/// Frame for `name`, falling back to the whole world for unknown theatres.
#[must_use]
pub fn frame_for(name: &str) -> TheatreFrame {
    lookup(name).unwrap_or_else(|| {
        log::warn!("unknown theatre {name:?}, using world bounds");
        TheatreFrame { bounds: LatLngBounds::world(), minimap_zoom: FALLBACK_MINIMAP_ZOOM }
    })
}

/// Fixed minimap view. Clicking the minimap recenters the main map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Minimap {
    pub center: LatLng,
    pub zoom: f64,
}

impl From<TheatreFrame> for Minimap {
    fn from(frame: TheatreFrame) -> Self {
        Self { center: frame.bounds.center(), zoom: frame.minimap_zoom }
    }
}
