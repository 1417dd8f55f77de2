//! Errors surfaced at the crate's edges: configuration and browser host setup.
//!
//! The interaction core itself has no failure modes; missing collaborators are no-ops.

use crate::config::ConfigError;

/// Error returned when building a [`crate::engine::MapEngine`].
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// No browser window/document is available (not running in a page).
    #[error("no document available")]
    NoDocument,
    /// No element with the requested id, or it is not an `HTMLElement`.
    #[error("map container element not found: #{0}")]
    MissingElement(String),
    /// The supplied configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
