//! Continuous keyboard panning.
//!
//! While any pan key is held the view moves a fixed number of pixels per tick. There is no
//! acceleration: velocity is `pan_delta / tick_period` for as long as the key stays down.

#[cfg(test)]
#[path = "pan_test.rs"]
mod pan_test;

use crate::camera::{MapView, Point};
use crate::input::{PanDirection, PanKeys};
use crate::timer::Ticker;

#[derive(Debug, Clone, Copy)]
pub struct PanDriver {
    keys: PanKeys,
    delta_px: f64,
    ticker: Ticker,
}

impl PanDriver {
    #[must_use]
    pub fn new(delta_px: f64, tick_ms: f64) -> Self {
        Self { keys: PanKeys::default(), delta_px, ticker: Ticker::new(tick_ms) }
    }

    pub fn set_key(&mut self, direction: PanDirection, held: bool) {
        self.keys.set(direction, held);
    }

    /// Release every key, e.g. when the host window loses focus.
    pub fn release_all(&mut self) {
        self.keys = PanKeys::default();
    }

    #[must_use]
    pub fn keys(&self) -> PanKeys {
        self.keys
    }

    /// Displacement one tick applies with the current keys.
    #[must_use]
    pub fn offset(&self) -> Point {
        let dir = self.keys.direction();
        Point::new(dir.x * self.delta_px, dir.y * self.delta_px)
    }

    /// Run one tick. Returns whether the view was displaced.
    pub fn tick(&self, view: &mut impl MapView) -> bool {
        if !self.keys.any() {
            return false;
        }
        let offset = self.offset();
        if offset == Point::default() {
            return false;
        }
        view.pan_by(offset);
        true
    }

    /// Advance the tick clock by `elapsed_ms`, running every tick that came due.
    ///
    /// Returns how many ticks displaced the view.
    pub fn advance(&mut self, elapsed_ms: f64, view: &mut impl MapView) -> u32 {
        let due = self.ticker.advance(elapsed_ms);
        (0..due).map(|_| u32::from(self.tick(view))).sum()
    }
}
