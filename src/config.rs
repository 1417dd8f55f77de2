//! Map configuration parsed from JSON, with defaults for every field.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CLICK_SUPPRESS_MS, DEFAULT_PAN_DELTA_PX, INITIAL_LAT, INITIAL_LNG, INITIAL_ZOOM, MAX_PREVIEW_UNITS, MAX_ZOOM,
    MIN_PREVIEW_UNITS, MIN_ZOOM, PAN_TICK_MS, THEATRE_ZOOM,
};
use crate::geo::LatLng;

/// Errors produced while loading a [`MapConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not valid JSON for this shape.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field parsed but its value is out of range.
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Pixels panned per tick per held direction key.
    pub pan_delta_px: f64,
    /// Pan tick period in milliseconds.
    pub pan_tick_ms: u32,
    /// How long clicks are swallowed after a drag-selection release.
    pub click_suppress_ms: f64,
    /// Group size range that gets live destination previews.
    pub min_preview_units: usize,
    pub max_preview_units: usize,
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom the main view uses after switching theatre.
    pub theatre_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            pan_delta_px: DEFAULT_PAN_DELTA_PX,
            pan_tick_ms: PAN_TICK_MS,
            click_suppress_ms: CLICK_SUPPRESS_MS,
            min_preview_units: MIN_PREVIEW_UNITS,
            max_preview_units: MAX_PREVIEW_UNITS,
            initial_center: LatLng::new(INITIAL_LAT, INITIAL_LNG),
            initial_zoom: INITIAL_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            theatre_zoom: THEATRE_ZOOM,
        }
    }
}

impl MapConfig {
    /// Parse and validate a JSON config. Absent fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pan_delta_px.is_finite() && self.pan_delta_px > 0.0) {
            return Err(invalid("pan_delta_px", format!("must be positive, got {}", self.pan_delta_px)));
        }
        if self.pan_tick_ms == 0 {
            return Err(invalid("pan_tick_ms", "must be at least 1".into()));
        }
        if !(self.click_suppress_ms.is_finite() && self.click_suppress_ms >= 0.0) {
            return Err(invalid(
                "click_suppress_ms",
                format!("must be non-negative, got {}", self.click_suppress_ms),
            ));
        }
        if self.min_preview_units < MIN_PREVIEW_UNITS {
            return Err(invalid(
                "min_preview_units",
                format!("must be at least {MIN_PREVIEW_UNITS}, got {}", self.min_preview_units),
            ));
        }
        if self.min_preview_units > self.max_preview_units {
            return Err(invalid(
                "max_preview_units",
                format!("{} is below min_preview_units {}", self.max_preview_units, self.min_preview_units),
            ));
        }
        if self.min_zoom > self.max_zoom {
            return Err(invalid("min_zoom", format!("{} exceeds max_zoom {}", self.min_zoom, self.max_zoom)));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.initial_zoom) {
            return Err(invalid(
                "initial_zoom",
                format!("{} outside [{}, {}]", self.initial_zoom, self.min_zoom, self.max_zoom),
            ));
        }
        Ok(())
    }

    /// Whether a group of `count` eligible units gets live previews.
    #[must_use]
    pub fn previews_enabled_for(&self, count: usize) -> bool {
        (self.min_preview_units..=self.max_preview_units).contains(&count)
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
