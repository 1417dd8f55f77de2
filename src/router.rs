//! Input routing: turns each [`MapEvent`] into state changes on [`MapCore`].
//!
//! The same DOM gesture means different things per mode. A right-click opens the map menu while
//! idle but commits a group move in `MoveUnit`, closing only the map menu so a unit or airbase
//! menu stays up; a left click only closes menus while idle but cancels the move in `MoveUnit`.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use crate::camera::{MapView, Point};
use crate::engine::{Action, MapCore};
use crate::geo::{LatLngBounds, bearing};
use crate::input::{Button, InteractionMode, Key, MapEvent, Modifiers};
use crate::menu::ContextMenuKind;
use crate::units::UnitsRegistry;

impl<V: MapView, R: UnitsRegistry> MapCore<V, R> {
    /// Route one input event. Returns the actions the host should observe.
    pub fn handle(&mut self, event: MapEvent) -> Vec<Action> {
        match event {
            MapEvent::Click { now_ms } => self.on_click(now_ms),
            MapEvent::DoubleClick | MapEvent::MouseUp { .. } => Vec::new(),
            MapEvent::ContextMenu { screen, modifiers } => self.on_context_menu(screen, modifiers),
            MapEvent::SelectionEnd { bounds, now_ms } => self.on_selection_end(bounds, now_ms),
            MapEvent::MouseDown { button } => self.on_mouse_down(button),
            MapEvent::MouseMove { screen, modifiers } => self.on_mouse_move(screen, modifiers),
            MapEvent::KeyDown { key, modifiers } => self.on_key(&key, modifiers, true),
            MapEvent::KeyUp { key, modifiers } => self.on_key(&key, modifiers, false),
            MapEvent::ZoomStart => self.pan_to_center_unit(),
            MapEvent::Drag => {
                self.center_on_unit(None);
                Vec::new()
            }
        }
    }

    fn on_click(&mut self, now_ms: f64) -> Vec<Action> {
        if self.pointer.suppress_click.is_pending(now_ms) {
            log::trace!("click swallowed after drag selection");
            return Vec::new();
        }
        let mut actions = self.hide_all_context_menus();
        if self.mode == InteractionMode::MoveUnit {
            actions.extend(self.set_mode(InteractionMode::Idle));
            self.units.deselect_all_units();
            actions.push(Action::SelectionChanged);
        }
        actions
    }

    fn on_context_menu(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        match self.mode {
            InteractionMode::Idle => self.show_map_context_menu(screen),
            InteractionMode::MoveUnit => {
                let mut actions = self.hide_context_menu(ContextMenuKind::Map);
                let coord = self.view.container_point_to_latlng(screen);
                actions.extend(self.commit_destinations(coord, modifiers));
                actions
            }
        }
    }

    fn on_selection_end(&mut self, bounds: LatLngBounds, now_ms: f64) -> Vec<Action> {
        let window = self.config().click_suppress_ms;
        self.pointer.suppress_click.arm(now_ms, window);
        self.units.select_from_bounds(bounds);
        let mut actions = vec![Action::SelectionChanged];
        if self.rebuild_previews() {
            actions.push(Action::PreviewMarkersChanged);
        }
        actions
    }

    fn on_mouse_down(&mut self, button: Button) -> Vec<Action> {
        let actions = self.hide_all_context_menus();
        if self.mode == InteractionMode::MoveUnit {
            self.rotation.reset();
            if button == Button::Secondary {
                let pivot = self.mouse_coordinates();
                self.rotation.begin(pivot);
            }
        }
        actions
    }

    fn on_mouse_move(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        self.pointer.last_position = screen;
        if let Some(pivot) = self.rotation.pivot() {
            let cursor = self.mouse_coordinates();
            self.rotation.set_angle(-bearing(pivot, cursor));
        }
        self.update_destination_preview(modifiers.shift)
    }

    fn on_key(&mut self, key: &Key, modifiers: Modifiers, held: bool) -> Vec<Action> {
        if let Some(direction) = key.pan_direction() {
            self.pan.set_key(direction, held);
        }
        self.update_destination_preview(modifiers.shift)
    }
}
