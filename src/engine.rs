use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::camera::{Camera, MapView, Point};
use crate::config::MapConfig;
use crate::error::MapError;
use crate::geo::{LatLng, LatLngBounds};
use crate::input::{Button, InteractionMode, Key, MapEvent, Modifiers, PanKeys, PointerState, RotationContext};
use crate::markers::{PreviewMarker, TemporaryMarker, TemporaryMarkers};
use crate::menu::{ContextMenuKind, ContextMenus, OpenMenu};
use crate::notify::{ListenerId, Notifier};
use crate::pan::PanDriver;
use crate::theatre::{self, Minimap};
use crate::units::{HiddenType, SelectionFilter, UnitId, UnitsManager, UnitsRegistry};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Notifications returned from map handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ModeChanged { mode: InteractionMode },
    ContextMenuShown { menu: OpenMenu },
    ContextMenuHidden { kind: ContextMenuKind },
    /// Preview markers were created, moved, or removed.
    PreviewMarkersChanged,
    SelectionChanged,
    DestinationsChanged,
    ViewChanged,
    TemporaryMarkersChanged,
    MinimapChanged { minimap: Minimap },
    /// A visibility toggle changed; the host redraws the affected markers.
    VisibilityChanged { kind: HiddenType, hidden: bool },
}

/// Core map state: everything that doesn't depend on the browser.
///
/// Separated from `MapEngine` so it can be tested without WASM/browser dependencies. The map
/// widget and the units registry are held by composition and reached only through their traits.
pub struct MapCore<V, R> {
    pub(crate) view: V,
    pub(crate) units: R,
    config: MapConfig,
    pub(crate) mode: InteractionMode,
    previews: Vec<PreviewMarker>,
    pub(crate) rotation: RotationContext,
    pub(crate) pointer: PointerState,
    pub(crate) pan: PanDriver,
    menus: ContextMenus,
    pub(crate) center_unit: Option<UnitId>,
    temporary: TemporaryMarkers,
    minimap: Option<Minimap>,
}

impl<V: MapView, R: UnitsRegistry> MapCore<V, R> {
    /// `config` is assumed valid; see [`MapConfig::validate`].
    #[must_use]
    pub fn new(view: V, units: R, config: MapConfig) -> Self {
        let pan = PanDriver::new(config.pan_delta_px, f64::from(config.pan_tick_ms));
        Self {
            view,
            units,
            config,
            mode: InteractionMode::Idle,
            previews: Vec::new(),
            rotation: RotationContext::default(),
            pointer: PointerState::default(),
            pan,
            menus: ContextMenus::default(),
            center_unit: None,
            temporary: TemporaryMarkers::default(),
            minimap: None,
        }
    }

    // --- State machine ---

    /// Enter `mode`, applying its side effects, then announce the change.
    ///
    /// Any previous preview markers and rotation are discarded first. Entering
    /// [`InteractionMode::MoveUnit`] creates one preview per selected non-human unit at the
    /// pointer coordinate when the group size is within the configured preview range.
    pub fn set_mode(&mut self, mode: InteractionMode) -> Vec<Action> {
        let mut actions = Vec::new();
        self.rotation.reset();
        self.mode = mode;
        if self.rebuild_previews() {
            actions.push(Action::PreviewMarkersChanged);
        }
        log::debug!("map mode -> {mode:?}");
        actions.push(Action::ModeChanged { mode });
        actions
    }

    /// Replace the preview markers with one per selected non-human unit at the pointer
    /// coordinate, or none outside `MoveUnit` or the configured group size range.
    ///
    /// Returns whether any markers existed before or exist now.
    pub(crate) fn rebuild_previews(&mut self) -> bool {
        let had_previews = !self.previews.is_empty();
        self.previews.clear();
        if self.mode == InteractionMode::MoveUnit {
            let coord = self.mouse_coordinates();
            let selected = self.units.selected_units(SelectionFilter::commandable());
            if self.config.previews_enabled_for(selected.len()) {
                self.previews = selected.iter().map(|u| PreviewMarker::new(u.id, coord)).collect();
            } else {
                log::debug!("no destination previews for {} selected units", selected.len());
            }
        }
        had_previews || !self.previews.is_empty()
    }

    /// Move the preview markers to where the pending command would send each unit.
    ///
    /// With `shift` every marker takes its formation-preserving destination; otherwise all of
    /// them sit on the cursor coordinate, matching what a commit would do.
    pub(crate) fn update_destination_preview(&mut self, shift: bool) -> Vec<Action> {
        if self.previews.is_empty() {
            return Vec::new();
        }
        let cursor = self.mouse_coordinates();
        let anchor = self.rotation.pivot().unwrap_or(cursor);
        let destinations = self
            .units
            .selected_units_compute_group_destination(anchor, self.rotation.angle());
        for marker in &mut self.previews {
            if !shift {
                marker.position = cursor;
            } else if let Some((_, dest)) = destinations.iter().find(|(id, _)| *id == marker.unit_id) {
                marker.position = *dest;
            }
        }
        vec![Action::PreviewMarkersChanged]
    }

    /// Hand the pending move to the registry and reset the rotation. The mode is unchanged.
    pub(crate) fn commit_destinations(&mut self, coord: LatLng, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.ctrl {
            self.units.selected_units_clear_destinations();
        }
        let anchor = self.rotation.pivot().unwrap_or(coord);
        let rotation = self.rotation.angle();
        log::debug!(
            "commit move to ({:.5}, {:.5}) rotation={rotation:.3} preserve_offset={} append={}",
            anchor.lat,
            anchor.lng,
            modifiers.shift,
            modifiers.ctrl
        );
        self.units.selected_units_add_destination(anchor, modifiers.shift, rotation);
        self.rotation.reset();

        let mut actions = vec![Action::DestinationsChanged];
        actions.extend(self.update_destination_preview(modifiers.shift));
        actions
    }

    // --- Context menus ---

    pub fn hide_all_context_menus(&mut self) -> Vec<Action> {
        self.menus
            .hide_all()
            .map(|m| vec![Action::ContextMenuHidden { kind: m.kind }])
            .unwrap_or_default()
    }

    pub fn hide_context_menu(&mut self, kind: ContextMenuKind) -> Vec<Action> {
        self.menus
            .hide(kind)
            .map(|m| vec![Action::ContextMenuHidden { kind: m.kind }])
            .unwrap_or_default()
    }

    /// Open the map menu at a container point, targeting the coordinate under it.
    pub fn show_map_context_menu(&mut self, screen: Point) -> Vec<Action> {
        self.show_context_menu(ContextMenuKind::Map, screen, None)
    }

    pub fn show_unit_context_menu(&mut self, screen: Point) -> Vec<Action> {
        self.show_context_menu(ContextMenuKind::Unit, screen, None)
    }

    pub fn show_airbase_context_menu(&mut self, screen: Point, airbase: impl Into<String>) -> Vec<Action> {
        self.show_context_menu(ContextMenuKind::Airbase, screen, Some(airbase.into()))
    }

    fn show_context_menu(&mut self, kind: ContextMenuKind, screen: Point, airbase: Option<String>) -> Vec<Action> {
        let mut actions = self.hide_all_context_menus();
        let menu = OpenMenu { kind, screen, coord: self.view.container_point_to_latlng(screen), airbase };
        self.menus.show(menu.clone());
        actions.push(Action::ContextMenuShown { menu });
        actions
    }

    // --- View following ---

    /// Keep the view on a unit across zooms and unit updates, or stop following with `None`.
    pub fn center_on_unit(&mut self, id: Option<UnitId>) {
        self.center_unit = id;
    }

    /// A unit's state changed; re-center if it is the followed unit.
    pub fn on_unit_updated(&mut self, id: UnitId) -> Vec<Action> {
        if self.center_unit == Some(id) {
            self.pan_to_center_unit()
        } else {
            Vec::new()
        }
    }

    pub(crate) fn pan_to_center_unit(&mut self) -> Vec<Action> {
        let Some(position) = self.center_unit.and_then(|id| self.units.unit_position(id)) else {
            return Vec::new();
        };
        let zoom = self.view.zoom();
        self.view.set_view(position, zoom, false);
        vec![Action::ViewChanged]
    }

    // --- Theatre / minimap ---

    /// Jump to a theatre and frame the minimap on it.
    pub fn set_theatre(&mut self, name: &str) -> Vec<Action> {
        let frame = theatre::frame_for(name);
        self.view.set_view(frame.bounds.center(), self.config.theatre_zoom, true);
        let minimap = Minimap::from(frame);
        self.minimap = Some(minimap);
        log::info!("theatre set to {name}");
        vec![Action::ViewChanged, Action::MinimapChanged { minimap }]
    }

    /// A click on the minimap recenters the main view at the current zoom.
    pub fn on_minimap_click(&mut self, coord: LatLng) -> Vec<Action> {
        if self.minimap.is_none() {
            return Vec::new();
        }
        let zoom = self.view.zoom();
        self.view.set_view(coord, zoom, true);
        vec![Action::ViewChanged]
    }

    // --- Visibility ---

    /// Hide or show every unit covered by `kind`. Setting the current state is silent.
    pub fn set_hidden_type(&mut self, kind: HiddenType, hidden: bool) -> Vec<Action> {
        if self.units.is_hidden_type(kind) == hidden {
            return Vec::new();
        }
        self.units.set_hidden_type(kind, hidden);
        vec![Action::VisibilityChanged { kind, hidden }]
    }

    /// Flip a visibility toggle, as the coalition and unit-type buttons do.
    pub fn toggle_hidden_type(&mut self, kind: HiddenType) -> Vec<Action> {
        let hidden = !self.units.is_hidden_type(kind);
        self.set_hidden_type(kind, hidden)
    }

    // --- Temporary markers ---

    pub fn add_temporary_marker(&mut self, coord: LatLng) -> Vec<Action> {
        self.temporary.add(coord);
        vec![Action::TemporaryMarkersChanged]
    }

    /// Remove the temporary marker closest to `coord`, if any exist.
    pub fn remove_temporary_marker(&mut self, coord: LatLng) -> Vec<Action> {
        match self.temporary.remove_closest(coord) {
            Some(_) => vec![Action::TemporaryMarkersChanged],
            None => Vec::new(),
        }
    }

    // --- Panning ---

    /// One pan tick.
    pub fn pan_tick(&mut self) -> Vec<Action> {
        if self.pan.tick(&mut self.view) {
            vec![Action::ViewChanged]
        } else {
            Vec::new()
        }
    }

    /// Advance the pan clock for hosts that drive time themselves.
    pub fn advance_pan(&mut self, elapsed_ms: f64) -> Vec<Action> {
        if self.pan.advance(elapsed_ms, &mut self.view) > 0 {
            vec![Action::ViewChanged]
        } else {
            Vec::new()
        }
    }

    /// Forget held pan keys, e.g. after the window loses focus and key-ups are lost.
    pub fn release_pan_keys(&mut self) {
        self.pan.release_all();
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Last pointer position in container pixels.
    #[must_use]
    pub fn mouse_position(&self) -> Point {
        self.pointer.last_position
    }

    /// Coordinate under the last pointer position.
    #[must_use]
    pub fn mouse_coordinates(&self) -> LatLng {
        self.view.container_point_to_latlng(self.pointer.last_position)
    }

    #[must_use]
    pub fn preview_markers(&self) -> &[PreviewMarker] {
        &self.previews
    }

    #[must_use]
    pub fn rotation(&self) -> RotationContext {
        self.rotation
    }

    #[must_use]
    pub fn pan_keys(&self) -> PanKeys {
        self.pan.keys()
    }

    #[must_use]
    pub fn open_context_menu(&self) -> Option<&OpenMenu> {
        self.menus.open()
    }

    #[must_use]
    pub fn center_unit(&self) -> Option<UnitId> {
        self.center_unit
    }

    #[must_use]
    pub fn temporary_markers(&self) -> &[TemporaryMarker] {
        self.temporary.all()
    }

    #[must_use]
    pub fn minimap(&self) -> Option<Minimap> {
        self.minimap
    }

    #[must_use]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[must_use]
    pub fn units(&self) -> &R {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut R {
        &mut self.units
    }
}

/// Map core as hosted in the browser.
pub type BrowserCore = MapCore<Camera, UnitsManager>;

/// Route `log` records to the browser console.
pub fn init_logging(level: log::Level) {
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {err}");
    }
}

/// The full browser map. Wraps `MapCore`, binds to the container element, and owns the pan timer.
///
/// The pan interval is dropped, and therefore cancelled, together with the engine.
pub struct MapEngine {
    element: HtmlElement,
    core: Rc<RefCell<BrowserCore>>,
    notifier: Rc<Notifier>,
    pan_interval: Option<Interval>,
}

impl MapEngine {
    /// Bind to the element with id `container_id`.
    pub fn new(container_id: &str, config: MapConfig) -> Result<Self, MapError> {
        config.validate()?;
        let document = web_sys::window().and_then(|w| w.document()).ok_or(MapError::NoDocument)?;
        let element = document
            .get_element_by_id(container_id)
            .ok_or_else(|| MapError::MissingElement(container_id.to_owned()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| MapError::MissingElement(container_id.to_owned()))?;

        let camera = Camera::new(config.initial_center, config.initial_zoom, config.min_zoom, config.max_zoom);
        let core = Rc::new(RefCell::new(MapCore::new(camera, UnitsManager::new(), config)));
        let mut engine = Self { element, core, notifier: Rc::new(Notifier::new()), pan_interval: None };
        engine.sync_viewport();
        engine.resume_panning();
        Ok(engine)
    }

    /// Push the container's CSS size to the camera. Call on every resize.
    pub fn sync_viewport(&self) {
        let width = f64::from(self.element.client_width()).max(1.0);
        let height = f64::from(self.element.client_height()).max(1.0);
        self.core.borrow_mut().view_mut().set_viewport(width, height);
    }

    /// Start the periodic pan tick if it is not running.
    pub fn resume_panning(&mut self) {
        if self.pan_interval.is_some() {
            return;
        }
        let core = Rc::clone(&self.core);
        let notifier = Rc::clone(&self.notifier);
        let period = core.borrow().config().pan_tick_ms;
        self.pan_interval = Some(Interval::new(period, move || {
            let actions = core.borrow_mut().pan_tick();
            if !actions.is_empty() {
                notifier.publish(&actions);
            }
        }));
    }

    /// Stop the pan tick, e.g. while the map is hidden. Held keys are released.
    pub fn suspend_panning(&mut self) {
        self.pan_interval = None;
        self.core.borrow_mut().release_pan_keys();
    }

    #[must_use]
    pub fn is_panning_active(&self) -> bool {
        self.pan_interval.is_some()
    }

    // --- Observers ---

    /// Listeners may call back into the engine; the actions that produces are delivered after
    /// the current one.
    pub fn subscribe(&self, listener: impl FnMut(&Action) + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    /// Subscribe a JS callback. It receives each action as a JSON string.
    pub fn subscribe_js(&self, callback: js_sys::Function) -> ListenerId {
        self.subscribe(move |action| match serde_json::to_string(action) {
            Ok(json) => {
                if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("map listener threw: {err:?}");
                }
            }
            Err(err) => log::warn!("failed to encode map action: {err}"),
        })
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // --- Input events ---

    /// Route an event through the core and publish the resulting actions.
    pub fn handle(&self, event: MapEvent) -> Vec<Action> {
        let actions = self.core.borrow_mut().handle(event);
        self.publish(&actions);
        actions
    }

    pub fn on_click(&self) -> Vec<Action> {
        self.handle(MapEvent::Click { now_ms: now_ms() })
    }

    pub fn on_double_click(&self) -> Vec<Action> {
        self.handle(MapEvent::DoubleClick)
    }

    pub fn on_context_menu(&self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        self.handle(MapEvent::ContextMenu { screen, modifiers })
    }

    pub fn on_selection_end(&self, bounds: LatLngBounds) -> Vec<Action> {
        self.handle(MapEvent::SelectionEnd { bounds, now_ms: now_ms() })
    }

    pub fn on_mouse_down(&self, dom_button: i16) -> Vec<Action> {
        self.handle(MapEvent::MouseDown { button: Button::from_dom(dom_button) })
    }

    pub fn on_mouse_up(&self, dom_button: i16) -> Vec<Action> {
        self.handle(MapEvent::MouseUp { button: Button::from_dom(dom_button) })
    }

    pub fn on_mouse_move(&self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        self.handle(MapEvent::MouseMove { screen, modifiers })
    }

    pub fn on_key_down(&self, code: &str, modifiers: Modifiers) -> Vec<Action> {
        self.handle(MapEvent::KeyDown { key: Key(code.to_owned()), modifiers })
    }

    pub fn on_key_up(&self, code: &str, modifiers: Modifiers) -> Vec<Action> {
        self.handle(MapEvent::KeyUp { key: Key(code.to_owned()), modifiers })
    }

    pub fn on_zoom_start(&self) -> Vec<Action> {
        self.handle(MapEvent::ZoomStart)
    }

    pub fn on_drag(&self) -> Vec<Action> {
        self.handle(MapEvent::Drag)
    }

    // --- Delegated operations ---

    pub fn set_mode(&self, mode: InteractionMode) -> Vec<Action> {
        let actions = self.core.borrow_mut().set_mode(mode);
        self.publish(&actions);
        actions
    }

    pub fn set_theatre(&self, name: &str) -> Vec<Action> {
        let actions = self.core.borrow_mut().set_theatre(name);
        self.publish(&actions);
        actions
    }

    /// Run `f` with mutable access to the core for operations without a wrapper here.
    ///
    /// Actions returned by `f` are published.
    pub fn with_core(&self, f: impl FnOnce(&mut BrowserCore) -> Vec<Action>) -> Vec<Action> {
        let actions = f(&mut self.core.borrow_mut());
        self.publish(&actions);
        actions
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.core.borrow().mode()
    }

    #[must_use]
    pub fn mouse_coordinates(&self) -> LatLng {
        self.core.borrow().mouse_coordinates()
    }

    #[must_use]
    pub fn preview_markers(&self) -> Vec<PreviewMarker> {
        self.core.borrow().preview_markers().to_vec()
    }

    fn publish(&self, actions: &[Action]) {
        if !actions.is_empty() {
            self.notifier.publish(actions);
        }
    }
}

/// Current wall-clock time in milliseconds via the JS `Date.now()` API.
fn now_ms() -> f64 {
    js_sys::Date::now()
}
