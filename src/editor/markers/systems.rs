use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::MARKER_HIT_RADIUS_PX;
use crate::editor::camera::MapView;
use crate::editor::params::{is_cursor_over_ui, MapCursor};
use crate::geo::Coordinate;
use crate::territory::{Group, MarkerId, TerritoryData, TerritoryUpdate};

use super::drag::{MarkerAction, MarkerDrag};

/// Nearest marker of `group` within the hit radius of `render_pos`
pub fn hit_test_marker(group: &Group, render_pos: Vec2, view: &MapView) -> Option<MarkerId> {
    group
        .markers
        .iter()
        .map(|m| (m.id, view.to_render(m.position).distance(render_pos)))
        .filter(|(_, d)| *d <= MARKER_HIT_RADIUS_PX)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Apply a finished drag/tap to the model
pub fn apply_marker_action(territory: &mut TerritoryData, action: MarkerAction) -> Option<TerritoryUpdate> {
    let group_id = match action {
        MarkerAction::Move {
            group_id,
            marker_id,
            position,
        } => {
            let marker = territory.group_mut(group_id)?.marker_mut(marker_id)?;
            marker.position = position;
            debug!("Marker {} moved", marker.label);
            group_id
        }
        MarkerAction::ToggleStatus {
            group_id,
            marker_id,
        } => {
            let marker = territory.group_mut(group_id)?.marker_mut(marker_id)?;
            marker.status = marker.status.toggled();
            debug!("Marker {} is now {:?}", marker.label, marker.status);
            group_id
        }
    };
    TerritoryUpdate::markers_of(territory, group_id)
}

/// Press on a marker of the selected group (Navigate mode)
pub fn handle_marker_press(
    mouse_button: Res<ButtonInput<MouseButton>>,
    cursor: MapCursor,
    territory: Res<TerritoryData>,
    mut drag: ResMut<MarkerDrag>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) || is_cursor_over_ui(&mut contexts) {
        return;
    }
    let (Some(render_pos), Some(screen_pos)) = (cursor.render_pos(), cursor.screen_pos()) else {
        return;
    };
    let Some(group) = territory.selected_group() else {
        return;
    };
    let Some(marker) = hit_test_marker(group, render_pos, &cursor.view).and_then(|id| group.marker(id)) else {
        return;
    };

    drag.press(group.id, marker.id, screen_pos, marker.position);
}

/// Follow and finish a marker gesture
pub fn handle_marker_drag(
    mouse_button: Res<ButtonInput<MouseButton>>,
    cursor: MapCursor,
    mut territory: ResMut<TerritoryData>,
    mut drag: ResMut<MarkerDrag>,
    mut updates: MessageWriter<TerritoryUpdate>,
) {
    if !drag.is_dragging() {
        return;
    }

    if let Some(screen_pos) = cursor.screen_pos() {
        drag.drag_to(screen_pos, &*cursor.view);
    }
    if mouse_button.pressed(MouseButton::Left) {
        return;
    }

    if let Some(update) = drag
        .release()
        .and_then(|action| apply_marker_action(&mut territory, action))
    {
        updates.write(update);
    }
}

/// Right click deletes a marker of the selected group (Navigate mode)
pub fn handle_marker_delete(
    mouse_button: Res<ButtonInput<MouseButton>>,
    cursor: MapCursor,
    mut territory: ResMut<TerritoryData>,
    mut updates: MessageWriter<TerritoryUpdate>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Right) || is_cursor_over_ui(&mut contexts) {
        return;
    }
    let Some(render_pos) = cursor.render_pos() else {
        return;
    };
    let Some(group) = territory.selected_group() else {
        return;
    };
    let group_id = group.id;
    let Some(marker_id) = hit_test_marker(group, render_pos, &cursor.view) else {
        return;
    };

    if let Some(group) = territory.group_mut(group_id)
        && group.remove_marker(marker_id)
    {
        info!("Deleted marker {:?} from group {:?}", marker_id, group_id);
        if let Some(update) = TerritoryUpdate::markers_of(&territory, group_id) {
            updates.write(update);
        }
    }
}

/// Add a marker to the selected group at `position`
pub fn place_marker(territory: &mut TerritoryData, position: Coordinate) -> Option<TerritoryUpdate> {
    let group_id = territory.selected?;
    let Some(marker_id) = territory.group_mut(group_id)?.add_marker(position) else {
        warn!("Group {:?} has no free marker id", group_id);
        return None;
    };
    info!("Placed marker {:?} in group {:?}", marker_id, group_id);
    TerritoryUpdate::markers_of(territory, group_id)
}

/// Click places a marker (Marker mode)
pub fn handle_marker_place(
    mouse_button: Res<ButtonInput<MouseButton>>,
    cursor: MapCursor,
    mut territory: ResMut<TerritoryData>,
    mut updates: MessageWriter<TerritoryUpdate>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) || is_cursor_over_ui(&mut contexts) {
        return;
    }
    let Some(position) = cursor.coord() else {
        return;
    };
    if let Some(update) = place_marker(&mut territory, position) {
        updates.write(update);
    }
}
