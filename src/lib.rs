//! Interaction core for the tactical map of a flight-simulator companion client.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the map's interaction
//! state: the idle/move-unit mode machine, input routing, live destination previews for group
//! moves, rigid formation rotation, and continuous keyboard panning. Tile and icon rendering stay
//! in the host JavaScript layer, which wires DOM events to the engine and reacts to the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser [`engine::MapEngine`] and testable [`engine::MapCore`] |
//! | [`router`] | Per-mode routing of pointer and keyboard events |
//! | [`input`] | Input event types, modes, rotation and pointer state |
//! | [`formation`] | Group destination geometry and rotation |
//! | [`units`] | Units registry trait and in-memory store |
//! | [`camera`] | Web-Mercator camera and the [`camera::MapView`] seam |
//! | [`geo`] | Coordinates, bounds, bearing and distance |
//! | [`pan`] | Fixed-tick keyboard panning |
//! | [`markers`] | Preview and temporary marker bookkeeping |
//! | [`menu`] | Context menu state |
//! | [`theatre`] | Theatre bounds and minimap frame |
//! | [`timer`] | Host-clocked one-shot and periodic timers |
//! | [`notify`] | Observer registry for actions |
//! | [`config`] | JSON configuration with defaults |
//! | [`error`] | Host construction errors |
//! | [`consts`] | Shared numeric constants (pan speed, zoom limits, preview range, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod formation;
pub mod geo;
pub mod input;
pub mod markers;
pub mod menu;
pub mod notify;
pub mod pan;
pub mod router;
pub mod theatre;
pub mod timer;
pub mod units;
