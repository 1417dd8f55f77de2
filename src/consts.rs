//! Shared numeric constants for the map crate.

// ── Pan driver ──────────────────────────────────────────────────

/// Screen pixels the view is displaced per pan tick for each held direction key.
pub const DEFAULT_PAN_DELTA_PX: f64 = 100.0;

/// Period of the continuous pan tick, in milliseconds.
pub const PAN_TICK_MS: u32 = 20;

// ── Pointer ─────────────────────────────────────────────────────

/// Window after a drag-selection release during which clicks are swallowed.
pub const CLICK_SUPPRESS_MS: f64 = 200.0;

// ── Group destination previews ──────────────────────────────────

/// Fewest eligible units that get live destination previews.
pub const MIN_PREVIEW_UNITS: usize = 2;

/// Most eligible units that get live destination previews.
pub const MAX_PREVIEW_UNITS: usize = 19;

// ── View ────────────────────────────────────────────────────────

/// Latitude of the initial view center.
pub const INITIAL_LAT: f64 = 37.23;

/// Longitude of the initial view center.
pub const INITIAL_LNG: f64 = -115.8;

/// Zoom level the map opens at.
pub const INITIAL_ZOOM: f64 = 10.0;

/// Lowest zoom the main view accepts.
pub const MIN_ZOOM: f64 = 7.0;

/// Highest zoom the main view accepts.
pub const MAX_ZOOM: f64 = 18.0;

/// Zoom used when the view jumps to a theatre.
pub const THEATRE_ZOOM: f64 = 8.0;

/// Minimap zoom for theatres without an entry in the bounds table.
pub const FALLBACK_MINIMAP_ZOOM: f64 = 5.0;

// ── Projection ──────────────────────────────────────────────────

/// Side length of a slippy-map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Equatorial radius used by the spherical Web-Mercator projection, in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Mean earth radius for great-circle distances, in metres.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Latitude limit of the Web-Mercator projection.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_6;
