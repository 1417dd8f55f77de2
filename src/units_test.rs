#![allow(clippy::float_cmp)]

use super::*;

fn ll(lat: f64, lng: f64) -> LatLng {
    LatLng::new(lat, lng)
}

fn manager_with(units: &[(UnitId, f64, f64, bool)]) -> UnitsManager {
    let mut m = UnitsManager::new();
    for &(id, lat, lng, human) in units {
        let mut u = Unit::new(id, format!("unit-{id}"), ll(lat, lng));
        u.human = human;
        m.upsert(u);
    }
    m
}

fn select_all(m: &mut UnitsManager) {
    m.select_from_bounds(LatLngBounds::world());
}

fn ids(units: &[&Unit]) -> Vec<UnitId> {
    units.iter().map(|u| u.id).collect()
}

// =============================================================
// Basic store
// =============================================================

#[test]
fn new_manager_is_empty() {
    let m = UnitsManager::new();
    assert!(m.is_empty());
    assert_eq!(m.len(), 0);
}

#[test]
fn upsert_keeps_selection_and_route() {
    let mut m = manager_with(&[(1, 36.0, -115.0, false)]);
    m.select(1, false);
    m.selected_units_add_destination(ll(37.0, -115.0), false, 0.0);
    m.upsert(Unit::new(1, "renamed", ll(36.5, -115.5)));
    let u = m.get(1).unwrap();
    assert!(u.selected);
    assert_eq!(u.destinations.len(), 1);
    assert_eq!(u.position, ll(36.5, -115.5));
    assert_eq!(u.name, "renamed");
}

#[test]
fn remove_returns_unit() {
    let mut m = manager_with(&[(1, 36.0, -115.0, false)]);
    assert_eq!(m.remove(1).map(|u| u.id), Some(1));
    assert!(m.remove(1).is_none());
}

#[test]
fn unit_position_lookup() {
    let m = manager_with(&[(4, 36.0, -115.0, false)]);
    assert_eq!(m.unit_position(4), Some(ll(36.0, -115.0)));
    assert_eq!(m.unit_position(5), None);
}

#[test]
fn unit_deserializes_with_defaults() {
    let u: Unit = serde_json::from_str(r#"{"id":3,"name":"Viper","position":{"lat":1.0,"lng":2.0}}"#).unwrap();
    assert!(!u.human);
    assert!(!u.selected);
    assert!(u.destinations.is_empty());
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_from_bounds_replaces_selection() {
    let mut m = manager_with(&[(1, 36.0, -115.0, false), (2, 40.0, -115.0, false)]);
    m.select(2, false);
    m.select_from_bounds(LatLngBounds::from_corners(ll(35.0, -116.0), ll(37.0, -114.0)));
    assert_eq!(ids(&m.selected_units(SelectionFilter::default())), vec![1]);
}

#[test]
fn select_additive_and_exclusive() {
    let mut m = manager_with(&[(1, 0.0, 0.0, false), (2, 0.0, 0.0, false)]);
    m.select(1, false);
    m.select(2, true);
    assert_eq!(ids(&m.selected_units(SelectionFilter::default())), vec![1, 2]);
    m.select(2, false);
    assert_eq!(ids(&m.selected_units(SelectionFilter::default())), vec![2]);
}

#[test]
fn selected_units_can_exclude_humans() {
    let mut m = manager_with(&[(1, 0.0, 0.0, false), (2, 0.0, 0.0, true)]);
    select_all(&mut m);
    assert_eq!(ids(&m.selected_units(SelectionFilter::default())), vec![1, 2]);
    assert_eq!(ids(&m.selected_units(SelectionFilter::commandable())), vec![1]);
}

#[test]
fn deselect_all_clears_selection() {
    let mut m = manager_with(&[(1, 0.0, 0.0, false), (2, 0.0, 0.0, false)]);
    select_all(&mut m);
    m.deselect_all_units();
    assert!(m.selected_units(SelectionFilter::default()).is_empty());
}

// =============================================================
// Destinations
// =============================================================

#[test]
fn converge_assigns_same_point_to_all() {
    let mut m = manager_with(&[(1, 36.0, -115.0, false), (2, 36.1, -115.1, false)]);
    select_all(&mut m);
    m.selected_units_add_destination(ll(37.0, -114.0), false, 0.5);
    for id in [1, 2] {
        assert_eq!(m.get(id).unwrap().destinations, vec![ll(37.0, -114.0)]);
    }
}

#[test]
fn preserve_offset_assigns_formation_points() {
    let mut m = manager_with(&[(1, 36.0, -115.2, false), (2, 36.0, -114.8, false)]);
    select_all(&mut m);
    m.selected_units_add_destination(ll(36.0, -110.0), true, 0.0);
    let a = m.get(1).unwrap().destinations[0];
    let b = m.get(2).unwrap().destinations[0];
    assert!((a.lng + 110.2).abs() < 1e-6);
    assert!((b.lng + 109.8).abs() < 1e-6);
}

#[test]
fn destinations_skip_humans_and_unselected() {
    let mut m = manager_with(&[(1, 0.0, 0.0, false), (2, 0.0, 0.0, true), (3, 0.0, 0.0, false)]);
    m.select(1, false);
    m.select(2, true);
    m.selected_units_add_destination(ll(1.0, 1.0), false, 0.0);
    m.selected_units_add_destination(ll(2.0, 2.0), true, 0.0);
    assert_eq!(m.get(1).unwrap().destinations.len(), 2);
    assert!(m.get(2).unwrap().destinations.is_empty());
    assert!(m.get(3).unwrap().destinations.is_empty());
}

#[test]
fn destinations_append_as_route() {
    let mut m = manager_with(&[(1, 0.0, 0.0, false)]);
    m.select(1, false);
    m.selected_units_add_destination(ll(1.0, 1.0), false, 0.0);
    m.selected_units_add_destination(ll(2.0, 2.0), false, 0.0);
    assert_eq!(m.get(1).unwrap().destinations, vec![ll(1.0, 1.0), ll(2.0, 2.0)]);
}

#[test]
fn clear_destinations_only_touches_selection() {
    let mut m = manager_with(&[(1, 0.0, 0.0, false), (2, 0.0, 0.0, false)]);
    select_all(&mut m);
    m.selected_units_add_destination(ll(1.0, 1.0), false, 0.0);
    m.select(1, false);
    m.selected_units_clear_destinations();
    assert!(m.get(1).unwrap().destinations.is_empty());
    assert_eq!(m.get(2).unwrap().destinations.len(), 1);
}

#[test]
fn compute_group_destination_excludes_humans() {
    let mut m = manager_with(&[(1, 0.0, 0.0, false), (2, 0.0, 1.0, true), (3, 0.0, 2.0, false)]);
    select_all(&mut m);
    let dest = m.selected_units_compute_group_destination(ll(5.0, 5.0), 0.0);
    let got: Vec<UnitId> = dest.iter().map(|(id, _)| *id).collect();
    assert_eq!(got, vec![1, 3]);
}

// =============================================================
// Visibility
// =============================================================

#[test]
fn nothing_is_hidden_by_default() {
    let m = manager_with(&[(1, 0.0, 0.0, false)]);
    assert!(m.is_visible(1));
    assert!(!m.is_hidden_type(HiddenType::Aircraft));
    assert!(!m.is_visible(99));
}

#[test]
fn hiding_a_category_hides_only_that_category() {
    let mut m = UnitsManager::new();
    m.upsert(Unit::new(1, "jet", ll(0.0, 0.0)));
    let mut ship = Unit::new(2, "ship", ll(0.0, 0.0));
    ship.category = UnitCategory::NavyUnit;
    m.upsert(ship);

    m.set_hidden_type(HiddenType::NavyUnit, true);
    assert!(m.is_visible(1));
    assert!(!m.is_visible(2));
    assert_eq!(m.visible_units().map(|u| u.id).collect::<Vec<_>>(), vec![1]);

    m.set_hidden_type(HiddenType::NavyUnit, false);
    assert!(m.is_visible(2));
}

#[test]
fn hiding_a_coalition() {
    let mut m = UnitsManager::new();
    let mut red = Unit::new(1, "red", ll(0.0, 0.0));
    red.coalition = Coalition::Red;
    let mut blue = Unit::new(2, "blue", ll(0.0, 0.0));
    blue.coalition = Coalition::Blue;
    m.upsert(red);
    m.upsert(blue);

    m.set_hidden_type(HiddenType::Coalition(Coalition::Red), true);
    assert!(!m.is_visible(1));
    assert!(m.is_visible(2));
}

#[test]
fn human_and_dcs_toggles_split_by_control() {
    let mut m = manager_with(&[(1, 0.0, 0.0, false), (2, 0.0, 0.0, true)]);
    m.set_hidden_type(HiddenType::Human, true);
    assert!(m.is_visible(1));
    assert!(!m.is_visible(2));
    m.set_hidden_type(HiddenType::Dcs, true);
    assert!(!m.is_visible(1));
}

#[test]
fn hidden_units_are_not_box_selected() {
    let mut m = manager_with(&[(1, 0.0, 0.0, false), (2, 0.0, 0.0, true)]);
    m.set_hidden_type(HiddenType::Human, true);
    select_all(&mut m);
    assert_eq!(ids(&m.selected_units(SelectionFilter::default())), vec![1]);
}

#[test]
fn hidden_type_names_match_toggle_controls() {
    let json = serde_json::to_string(&HiddenType::GroundUnitSam).unwrap();
    assert_eq!(json, "\"groundunit-sam\"");
    let kind: HiddenType = serde_json::from_str(r#"{"coalition":"red"}"#).unwrap();
    assert_eq!(kind, HiddenType::Coalition(Coalition::Red));
}
