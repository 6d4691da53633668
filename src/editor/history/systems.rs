//! Bevy systems for handling undo/redo shortcuts and toolbar buttons.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::editor::eraser::EraseSession;
use crate::editor::freehand::{CapturePhase, FreehandCapture};

use super::commit::EditContext;

/// Undo/redo requested from the toolbar
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRequest {
    Undo,
    Redo,
}

/// Decode Ctrl+Z / Ctrl+Y / Ctrl+Shift+Z into a request
pub fn shortcut_request(keyboard: &ButtonInput<KeyCode>) -> Option<HistoryRequest> {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return None;
    }
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if keyboard.just_pressed(KeyCode::KeyY) || (shift && keyboard.just_pressed(KeyCode::KeyZ)) {
        Some(HistoryRequest::Redo)
    } else if keyboard.just_pressed(KeyCode::KeyZ) {
        Some(HistoryRequest::Undo)
    } else {
        None
    }
}

/// Whether an uncommitted gesture holds a working copy derived from the current state.
///
/// Undo/redo underneath it would be overwritten when the gesture commits.
pub fn gesture_in_progress(erase: &EraseSession, capture: &FreehandCapture) -> bool {
    erase.is_active() || capture.phase() == CapturePhase::Capturing
}

/// Run a request against whatever target is active right now.
///
/// With no active target (no group selected in Group mode) or while a gesture
/// is in progress the request is a no-op.
fn run_request(request: HistoryRequest, edit: &mut EditContext, busy: bool) -> bool {
    if busy {
        debug!("History: {:?} ignored, gesture in progress", request);
        return false;
    }
    if edit.active_target().is_none() {
        debug!("History: {:?} ignored, no active target", request);
        return false;
    }
    match request {
        HistoryRequest::Undo => edit.undo(),
        HistoryRequest::Redo => edit.redo(),
    }
}

/// System to handle undo (Ctrl+Z) and redo (Ctrl+Y or Ctrl+Shift+Z) shortcuts
pub fn handle_history_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    erase: Res<EraseSession>,
    capture: Res<FreehandCapture>,
    mut edit: EditContext,
) {
    // Text fields keep their own undo
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if let Some(request) = shortcut_request(&keyboard) {
        run_request(request, &mut edit, gesture_in_progress(&erase, &capture));
    }
}

/// System to handle undo/redo buttons
pub fn handle_history_requests(
    mut requests: MessageReader<HistoryRequest>,
    erase: Res<EraseSession>,
    capture: Res<FreehandCapture>,
    mut edit: EditContext,
) {
    let busy = gesture_in_progress(&erase, &capture);
    for request in requests.read() {
        run_request(*request, &mut edit, busy);
    }
}
