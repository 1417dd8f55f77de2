//! Group destination geometry.
//!
//! A group move keeps the formation shape: each unit's offset from the group centroid is
//! measured in Web-Mercator metres, rotated rigidly by the commanded angle, and re-applied around
//! the target anchor.

#[cfg(test)]
#[path = "formation_test.rs"]
mod formation_test;

use crate::camera::Point;
use crate::geo::{LatLng, from_mercator, to_mercator};
use crate::units::UnitId;

/// Per-unit destinations in the order the units were supplied.
pub type GroupDestinations = Vec<(UnitId, LatLng)>;

/// Rotate `offset` counter-clockwise by `angle` radians (mercator `y` points north).
#[must_use]
pub fn rotate(offset: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(offset.x * cos - offset.y * sin, offset.x * sin + offset.y * cos)
}

/// Mean mercator position of the members, or `None` when there are none.
#[must_use]
pub fn centroid(members: &[(UnitId, LatLng)]) -> Option<Point> {
    if members.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = members.len() as f64;
    let sum = members
        .iter()
        .fold(Point::default(), |acc, (_, pos)| acc + to_mercator(*pos));
    Some(Point::new(sum.x / n, sum.y / n))
}

/// Compute one destination per member around `anchor`, preserving the group's shape rotated by
/// `rotation` radians.
///
/// A single member lands exactly on the anchor. No members yields an empty list.
#[must_use]
pub fn group_destinations(members: &[(UnitId, LatLng)], anchor: LatLng, rotation: f64) -> GroupDestinations {
    let Some(center) = centroid(members) else {
        return Vec::new();
    };
    let target = to_mercator(anchor);
    members
        .iter()
        .map(|(id, pos)| {
            let offset = rotate(to_mercator(*pos) - center, rotation);
            (*id, from_mercator(target + offset))
        })
        .collect()
}
