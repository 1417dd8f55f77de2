//! Input model: interaction modes, modifier keys, mouse buttons, and gesture state.
//!
//! `MapEvent` is the normalized form of every DOM event the map listens to. The remaining types
//! are the small pieces of state the router keeps between events: where the pointer was, whether
//! a group rotation is being dragged, and which pan keys are held.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::geo::{LatLng, LatLngBounds};
use crate::timer::OneShot;

/// Which interaction mode the map is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionMode {
    /// Resting state; clicks and right-clicks act on the map itself.
    #[default]
    Idle,
    /// The selected units are waiting for a destination.
    MoveUnit,
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift: previews and commits keep the group's formation.
    pub shift: bool,
    /// Ctrl: a commit appends to the route instead of replacing it.
    pub ctrl: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key, holding the physical key code reported by the browser (e.g. `"KeyA"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// The pan direction bound to this key, if any.
    #[must_use]
    pub fn pan_direction(&self) -> Option<PanDirection> {
        match self.0.as_str() {
            "KeyA" | "ArrowLeft" => Some(PanDirection::Left),
            "KeyD" | "ArrowRight" => Some(PanDirection::Right),
            "KeyW" | "ArrowUp" => Some(PanDirection::Up),
            "KeyS" | "ArrowDown" => Some(PanDirection::Down),
            _ => None,
        }
    }
}

/// Screen direction a pan key moves the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Which pan keys are currently held.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl PanKeys {
    /// Record a key press (`held`) or release for `direction`.
    pub fn set(&mut self, direction: PanDirection, held: bool) {
        match direction {
            PanDirection::Left => self.left = held,
            PanDirection::Right => self.right = held,
            PanDirection::Up => self.up = held,
            PanDirection::Down => self.down = held,
        }
    }

    /// Whether any pan key is down.
    #[must_use]
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Unit displacement in screen convention: x grows right, y grows down.
    ///
    /// Opposite keys cancel out.
    #[must_use]
    pub fn direction(&self) -> Point {
        let axis = |neg: bool, pos: bool| f64::from(i8::from(pos) - i8::from(neg));
        Point::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Group rotation being dragged with the secondary button held.
///
/// The rotation is active exactly when a pivot is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationContext {
    pivot: Option<LatLng>,
    angle: f64,
}

impl RotationContext {
    /// Start rotating around `pivot` from a zero angle.
    pub fn begin(&mut self, pivot: LatLng) {
        self.pivot = Some(pivot);
        self.angle = 0.0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Update the angle. Ignored while inactive so the last angle stays frozen.
    pub fn set_angle(&mut self, angle: f64) {
        if self.pivot.is_some() {
            self.angle = angle;
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.pivot.is_some()
    }

    #[must_use]
    pub fn pivot(&self) -> Option<LatLng> {
        self.pivot
    }

    /// Accumulated group rotation in radians.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

/// Last known pointer position and the post-drag click suppression window.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub last_position: Point,
    pub suppress_click: OneShot,
}

/// A normalized map input event.
#[derive(Debug, Clone)]
pub enum MapEvent {
    Click { now_ms: f64 },
    DoubleClick,
    /// Secondary click release at a container point.
    ContextMenu { screen: Point, modifiers: Modifiers },
    /// Drag-box selection released.
    SelectionEnd { bounds: LatLngBounds, now_ms: f64 },
    MouseDown { button: Button },
    MouseUp { button: Button },
    MouseMove { screen: Point, modifiers: Modifiers },
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key, modifiers: Modifiers },
    ZoomStart,
    Drag,
}
