use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::editor::history::EditContext;
use crate::editor::params::{is_cursor_over_ui, MapCursor};
use crate::territory::{ExtraAnnotations, TerritoryData};

use super::session::{EraseSession, PendingErase};

/// Whether finishing `pending` would change the committed model
pub fn has_changes(pending: &PendingErase, territory: &TerritoryData, extra: &ExtraAnnotations) -> bool {
    PendingErase::capture(pending.target(), territory, extra).as_ref() != Some(pending)
}

/// Commit the gesture in progress, if there still is one
fn commit_erase(session: &mut EraseSession, edit: &mut EditContext) -> bool {
    let Some(pending) = session.finish() else {
        return false;
    };

    if !has_changes(&pending, &edit.territory, &edit.extra) {
        debug!("Eraser: gesture touched nothing, no history entry");
        return false;
    }

    let (target, change) = pending.into_edit();
    edit.commit(target, change)
}

pub fn handle_erase(
    mouse_button: Res<ButtonInput<MouseButton>>,
    cursor: MapCursor,
    mut session: ResMut<EraseSession>,
    mut edit: EditContext,
    mut contexts: EguiContexts,
) {
    if mouse_button.just_pressed(MouseButton::Left) && !session.is_active() {
        if is_cursor_over_ui(&mut contexts) {
            return;
        }
        let Some(at) = cursor.coord() else {
            return;
        };
        let Some(target) = edit.active_target() else {
            debug!("Eraser: no group selected");
            return;
        };
        if let Some(working) = PendingErase::capture(target, &edit.territory, &edit.extra) {
            session.begin(working, at);
        }
        return;
    }

    if !session.is_active() {
        return;
    }

    if let Some(at) = cursor.coord() {
        session.stroke_to(at);
    }

    if mouse_button.just_released(MouseButton::Left) {
        commit_erase(&mut session, &mut edit);
    }
}

/// Finish a gesture whose release never reached the map (pointer left the window, UI, ...)
pub fn finish_erase_on_release(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut session: ResMut<EraseSession>,
    mut edit: EditContext,
) {
    if session.is_active() && !mouse_button.pressed(MouseButton::Left) {
        commit_erase(&mut session, &mut edit);
    }
}
