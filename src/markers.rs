//! Marker bookkeeping: destination previews and temporary spawn placeholders.
//!
//! The crate draws nothing. Markers are plain values with stable ids so the host can keep one
//! map layer per marker and move it when the position changes.

#[cfg(test)]
#[path = "markers_test.rs"]
mod markers_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::{LatLng, distance};
use crate::units::UnitId;

/// Unique identifier for a marker layer.
pub type MarkerId = Uuid;

/// Where one selected unit would go if the pending move were committed now.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewMarker {
    pub id: MarkerId,
    pub unit_id: UnitId,
    pub position: LatLng,
}

impl PreviewMarker {
    #[must_use]
    pub fn new(unit_id: UnitId, position: LatLng) -> Self {
        Self { id: Uuid::new_v4(), unit_id, position }
    }
}

/// Placeholder shown where a unit was requested but has not appeared yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemporaryMarker {
    pub id: MarkerId,
    pub position: LatLng,
}

#[derive(Debug, Default)]
pub struct TemporaryMarkers {
    markers: Vec<TemporaryMarker>,
}

impl TemporaryMarkers {
    pub fn add(&mut self, position: LatLng) -> MarkerId {
        let id = Uuid::new_v4();
        self.markers.push(TemporaryMarker { id, position });
        id
    }

    /// Remove the marker nearest to `position`. Returns what was removed.
    pub fn remove_closest(&mut self, position: LatLng) -> Option<TemporaryMarker> {
        let index = self
            .markers
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| distance(a.position, position).total_cmp(&distance(b.position, position)))
            .map(|(i, _)| i)?;
        Some(self.markers.remove(index))
    }

    #[must_use]
    pub fn all(&self) -> &[TemporaryMarker] {
        &self.markers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
