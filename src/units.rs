//! Units registry: the selectable units the map commands.
//!
//! The interaction core talks to units only through [`UnitsRegistry`]. [`UnitsManager`] is the
//! in-memory implementation the browser host feeds from its unit updates.

#[cfg(test)]
#[path = "units_test.rs"]
mod units_test;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::formation::{GroupDestinations, group_destinations};
use crate::geo::{LatLng, LatLngBounds};

/// Simulator-assigned unit identifier.
pub type UnitId = u32;

/// Side a unit fights for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coalition {
    Blue,
    Red,
    #[default]
    Neutral,
}

/// Broad unit class used by the visibility toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    #[default]
    Aircraft,
    #[serde(rename = "groundunit-sam")]
    GroundUnitSam,
    #[serde(rename = "groundunit-other")]
    GroundUnitOther,
    NavyUnit,
}

impl UnitCategory {
    #[must_use]
    pub fn hidden_type(self) -> HiddenType {
        match self {
            Self::Aircraft => HiddenType::Aircraft,
            Self::GroundUnitSam => HiddenType::GroundUnitSam,
            Self::GroundUnitOther => HiddenType::GroundUnitOther,
            Self::NavyUnit => HiddenType::NavyUnit,
        }
    }
}

/// Something the map's visibility toggles can hide: a control, a category, or a coalition.
///
/// `Human` and `Dcs` split units by who controls them. `Airbase` hides airbase markers, which the
/// host draws outside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenType {
    Human,
    Dcs,
    Aircraft,
    #[serde(rename = "groundunit-sam")]
    GroundUnitSam,
    #[serde(rename = "groundunit-other")]
    GroundUnitOther,
    NavyUnit,
    Airbase,
    Coalition(Coalition),
}

/// A unit as the map sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub position: LatLng,
    /// Flown by a human player; never commanded from the map.
    #[serde(default)]
    pub human: bool,
    #[serde(default)]
    pub coalition: Coalition,
    #[serde(default)]
    pub category: UnitCategory,
    #[serde(default)]
    pub selected: bool,
    /// Pending route, in visiting order.
    #[serde(default)]
    pub destinations: Vec<LatLng>,
}

impl Unit {
    #[must_use]
    pub fn new(id: UnitId, name: impl Into<String>, position: LatLng) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            human: false,
            coalition: Coalition::default(),
            category: UnitCategory::default(),
            selected: false,
            destinations: Vec::new(),
        }
    }

    /// Whether any of `hidden` covers this unit.
    #[must_use]
    pub fn is_hidden_by(&self, hidden: &BTreeSet<HiddenType>) -> bool {
        let control = if self.human { HiddenType::Human } else { HiddenType::Dcs };
        hidden.contains(&control)
            || hidden.contains(&self.category.hidden_type())
            || hidden.contains(&HiddenType::Coalition(self.coalition))
    }
}

/// Filter for selection queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionFilter {
    pub exclude_humans: bool,
}

impl SelectionFilter {
    /// The filter every command path uses: humans are never commanded.
    #[must_use]
    pub fn commandable() -> Self {
        Self { exclude_humans: true }
    }
}

/// Registry operations consumed by the interaction core.
pub trait UnitsRegistry {
    /// Selected units in a stable order.
    fn selected_units(&self, filter: SelectionFilter) -> Vec<&Unit>;

    /// Replace the selection with the units inside `bounds`.
    fn select_from_bounds(&mut self, bounds: LatLngBounds);

    /// Append a destination to every selected, non-human unit.
    ///
    /// With `preserve_offset` each unit gets its formation-preserving destination around `coord`
    /// rotated by `rotation` radians; otherwise every unit converges on `coord`.
    fn selected_units_add_destination(&mut self, coord: LatLng, preserve_offset: bool, rotation: f64);

    fn selected_units_clear_destinations(&mut self);

    /// Formation-preserving destinations for the selected, non-human units.
    fn selected_units_compute_group_destination(&self, anchor: LatLng, rotation: f64) -> GroupDestinations;

    fn deselect_all_units(&mut self);

    /// Current position of a unit, if it exists.
    fn unit_position(&self, id: UnitId) -> Option<LatLng>;
    /// Show or hide every unit (or airbase) covered by `kind`.
    fn set_hidden_type(&mut self, kind: HiddenType, hidden: bool);
    fn is_hidden_type(&self, kind: HiddenType) -> bool;
}

/// In-memory units registry keyed by id.
#[derive(Debug, Default)]
pub struct UnitsManager {
    units: BTreeMap<UnitId, Unit>,
    hidden: BTreeSet<HiddenType>,
}

impl UnitsManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a unit, keeping its selection and route when it already exists.
    pub fn upsert(&mut self, unit: Unit) {
        match self.units.get_mut(&unit.id) {
            Some(existing) => {
                existing.name = unit.name;
                existing.position = unit.position;
                existing.human = unit.human;
                existing.coalition = unit.coalition;
                existing.category = unit.category;
            }
            None => {
                self.units.insert(unit.id, unit);
            }
        }
    }

    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        self.units.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Select a single unit, optionally adding to the current selection.
    pub fn select(&mut self, id: UnitId, additive: bool) {
        if !additive {
            self.deselect_all_units();
        }
        if let Some(unit) = self.units.get_mut(&id) {
            unit.selected = true;
        }
    }

    /// Whether the unit exists and no hidden type covers it.
    #[must_use]
    pub fn is_visible(&self, id: UnitId) -> bool {
        self.units.get(&id).is_some_and(|u| !u.is_hidden_by(&self.hidden))
    }

    /// Units currently drawn on the map.
    pub fn visible_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(|u| !u.is_hidden_by(&self.hidden))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn commandable_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.values_mut().filter(|u| u.selected && !u.human)
    }
}

impl UnitsRegistry for UnitsManager {
    fn selected_units(&self, filter: SelectionFilter) -> Vec<&Unit> {
        self.units
            .values()
            .filter(|u| u.selected && !(filter.exclude_humans && u.human))
            .collect()
    }

    fn select_from_bounds(&mut self, bounds: LatLngBounds) {
        let mut count = 0usize;
        for unit in self.units.values_mut() {
            unit.selected = bounds.contains(unit.position) && !unit.is_hidden_by(&self.hidden);
            count += usize::from(unit.selected);
        }
        log::debug!("selected {count} units from bounds");
    }

    fn selected_units_add_destination(&mut self, coord: LatLng, preserve_offset: bool, rotation: f64) {
        if preserve_offset {
            let destinations = self.selected_units_compute_group_destination(coord, rotation);
            for (id, dest) in destinations {
                if let Some(unit) = self.units.get_mut(&id) {
                    unit.destinations.push(dest);
                }
            }
        } else {
            for unit in self.commandable_mut() {
                unit.destinations.push(coord);
            }
        }
    }

    fn selected_units_clear_destinations(&mut self) {
        for unit in self.commandable_mut() {
            unit.destinations.clear();
        }
    }

    fn selected_units_compute_group_destination(&self, anchor: LatLng, rotation: f64) -> GroupDestinations {
        let members: Vec<_> = self
            .selected_units(SelectionFilter::commandable())
            .into_iter()
            .map(|u| (u.id, u.position))
            .collect();
        group_destinations(&members, anchor, rotation)
    }

    fn deselect_all_units(&mut self) {
        for unit in self.units.values_mut() {
            unit.selected = false;
        }
    }

    fn unit_position(&self, id: UnitId) -> Option<LatLng> {
        self.units.get(&id).map(|u| u.position)
    }

    fn set_hidden_type(&mut self, kind: HiddenType, hidden: bool) {
        if hidden {
            self.hidden.insert(kind);
        } else {
            self.hidden.remove(&kind);
        }
        log::debug!("{kind:?} hidden={hidden}");
    }

    fn is_hidden_type(&self, kind: HiddenType) -> bool {
        self.hidden.contains(&kind)
    }
}
