//! Unit tests for marker drag/tap handling.

use bevy::prelude::*;

use crate::editor::camera::{MapProjection, MapView};
use crate::geo::Coordinate;
use crate::territory::{GroupId, MarkerId, MarkerStatus, TerritoryData, TerritoryUpdate};

use super::drag::{MarkerAction, MarkerDrag};
use super::systems::{apply_marker_action, hit_test_marker, place_marker};

fn territory_with_marker() -> (TerritoryData, MarkerId, Coordinate) {
    let mut territory = TerritoryData::default();
    let position = Coordinate::new(-10.169, -48.331);
    let id = territory
        .group_mut(GroupId(1))
        .and_then(|g| g.add_marker(position))
        .unwrap();
    (territory, id, position)
}

fn marker_state(territory: &TerritoryData, id: MarkerId) -> (Coordinate, MarkerStatus) {
    let marker = territory.group(GroupId(1)).and_then(|g| g.marker(id)).unwrap();
    (marker.position, marker.status)
}

#[test]
fn test_small_wiggle_is_a_tap() {
    let (mut territory, id, position) = territory_with_marker();
    let view = MapView::default();
    let mut drag = MarkerDrag::default();

    drag.press(GroupId(1), id, Vec2::new(100.0, 100.0), position);
    drag.drag_to(Vec2::new(101.5, 98.5), &view);
    drag.drag_to(Vec2::new(102.0, 102.0), &view);
    let action = drag.release().unwrap();
    assert_eq!(
        action,
        MarkerAction::ToggleStatus {
            group_id: GroupId(1),
            marker_id: id
        }
    );

    apply_marker_action(&mut territory, action);
    assert_eq!(marker_state(&territory, id), (position, MarkerStatus::Worked));
}

#[test]
fn test_drag_moves_without_toggling() {
    let (mut territory, id, position) = territory_with_marker();
    let view = MapView::default();
    let mut drag = MarkerDrag::default();

    drag.press(GroupId(1), id, Vec2::new(100.0, 100.0), position);
    drag.drag_to(Vec2::new(130.0, 80.0), &view);
    let action = drag.release().unwrap();

    let expected = view.screen_delta_to_coord(position, Vec2::new(30.0, -20.0));
    assert_eq!(
        action,
        MarkerAction::Move {
            group_id: GroupId(1),
            marker_id: id,
            position: expected
        }
    );
    // Dragged right and up: east and north
    assert!(expected.lng > position.lng);
    assert!(expected.lat > position.lat);

    let update = apply_marker_action(&mut territory, action);
    assert!(matches!(update, Some(TerritoryUpdate::Markers { .. })));
    assert_eq!(marker_state(&territory, id), (expected, MarkerStatus::NotWorked));
}

#[test]
fn test_drag_back_to_start_is_still_a_move() {
    let (_, id, position) = territory_with_marker();
    let view = MapView::default();
    let mut drag = MarkerDrag::default();

    drag.press(GroupId(1), id, Vec2::new(100.0, 100.0), position);
    drag.drag_to(Vec2::new(110.0, 100.0), &view);
    drag.drag_to(Vec2::new(100.0, 100.0), &view);
    assert!(matches!(drag.release(), Some(MarkerAction::Move { .. })));
}

#[test]
fn test_one_action_per_gesture() {
    let (_, id, position) = territory_with_marker();
    let mut drag = MarkerDrag::default();
    assert!(drag.release().is_none());

    drag.press(GroupId(1), id, Vec2::ZERO, position);
    assert!(drag.is_dragging());
    assert!(drag.release().is_some());
    assert!(drag.release().is_none());
    assert!(!drag.is_dragging());
}

#[test]
fn test_preview_only_while_moving() {
    let (_, id, position) = territory_with_marker();
    let view = MapView::default();
    let mut drag = MarkerDrag::default();

    drag.press(GroupId(1), id, Vec2::ZERO, position);
    assert_eq!(drag.preview(GroupId(1), id), None);
    drag.drag_to(Vec2::new(0.0, 10.0), &view);
    assert!(drag.preview(GroupId(1), id).is_some());
    assert_eq!(drag.preview(GroupId(2), id), None);
    drag.cancel();
    assert_eq!(drag.preview(GroupId(1), id), None);
}

#[test]
fn test_action_on_deleted_marker_is_ignored() {
    let (mut territory, id, _) = territory_with_marker();
    if let Some(group) = territory.group_mut(GroupId(1)) {
        group.remove_marker(id);
    }
    let action = MarkerAction::ToggleStatus {
        group_id: GroupId(1),
        marker_id: id,
    };
    assert!(apply_marker_action(&mut territory, action).is_none());
}

#[test]
fn test_hit_test_picks_nearest_within_radius() {
    let view = MapView::default();
    let mut territory = TerritoryData::default();
    let near = view.from_render(Vec2::new(5.0, 0.0));
    let nearer = view.from_render(Vec2::new(0.0, 3.0));
    let far = view.from_render(Vec2::new(100.0, 0.0));

    let group = territory.group_mut(GroupId(1)).unwrap();
    group.add_marker(near);
    let nearer_id = group.add_marker(nearer).unwrap();
    group.add_marker(far);

    let group = territory.group(GroupId(1)).unwrap();
    assert_eq!(hit_test_marker(group, Vec2::ZERO, &view), Some(nearer_id));
    assert_eq!(hit_test_marker(group, Vec2::new(50.0, 50.0), &view), None);
}

#[test]
fn test_place_marker_in_selected_group() {
    let mut territory = TerritoryData::default();
    let update = place_marker(&mut territory, Coordinate::new(1.0, 2.0));
    let Some(TerritoryUpdate::Markers { group_id, markers }) = update else {
        panic!("expected a markers update");
    };
    assert_eq!(group_id, GroupId(1));
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].label, "1");

    territory.selected = None;
    assert!(place_marker(&mut territory, Coordinate::new(1.0, 2.0)).is_none());
}
