//! Modal windows: clear confirmations, config reset notice and help.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ConfigResetNotification;
use crate::editor::history::{Edit, EditContext, HistoryTarget};
use crate::territory::GroupId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearKind {
    Rings,
    Paths,
}

impl ClearKind {
    fn edit(self) -> Edit {
        match self {
            ClearKind::Rings => Edit::ClearRings,
            ClearKind::Paths => Edit::ClearPaths,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            ClearKind::Rings => "rings",
            ClearKind::Paths => "paths",
        }
    }
}

/// A pending "clear all rings/paths" on one group, awaiting confirmation
#[derive(Resource, Default)]
pub struct ClearConfirmation {
    pending: Option<(GroupId, ClearKind)>,
}

impl ClearConfirmation {
    pub fn open(&mut self, group_id: GroupId, kind: ClearKind) {
        self.pending = Some((group_id, kind));
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Close the dialog, returning the edit to commit if it was confirmed
    fn close(&mut self, confirmed: bool) -> Option<(HistoryTarget, Edit)> {
        let (group_id, kind) = self.pending.take()?;
        confirmed.then(|| (HistoryTarget::Group(group_id), kind.edit()))
    }
}

#[derive(Resource, Default)]
pub struct HelpWindowState {
    pub is_open: bool,
}

pub fn clear_confirmation_ui(
    mut contexts: EguiContexts,
    mut clear: ResMut<ClearConfirmation>,
    mut edit: EditContext,
) -> Result {
    let Some((group_id, kind)) = clear.pending else {
        return Ok(());
    };
    let name = edit
        .territory
        .group(group_id)
        .map(|g| g.name.clone())
        .unwrap_or_default();

    let mut decision = None;
    egui::Window::new(format!("Clear {}", kind.noun()))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(format!(
                "Remove all {} from \"{}\"? This can be undone.",
                kind.noun(),
                name
            ));
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    decision = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    decision = Some(false);
                }
            });
        });

    if let Some(confirmed) = decision
        && let Some((target, change)) = clear.close(confirmed)
    {
        edit.commit(target, change);
    }
    Ok(())
}

pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(4.0);
                ui.colored_label(egui::Color32::from_rgb(255, 165, 0), reason);
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });
    Ok(())
}

fn shortcut_row(ui: &mut egui::Ui, key: &str, action: &str) {
    ui.horizontal(|ui| {
        ui.strong(key);
        ui.label(action);
    });
}

pub fn help_popup_ui(mut contexts: EguiContexts, mut help_state: ResMut<HelpWindowState>) -> Result {
    if !help_state.is_open {
        return Ok(());
    }

    egui::Window::new("Help")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(380.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.heading("Territory Editor");
            ui.separator();

            ui.label(egui::RichText::new("Tools").strong());
            shortcut_row(ui, "N", "Navigate: pan, tap or drag markers");
            shortcut_row(ui, "F", "Freehand: drag to draw a path");
            shortcut_row(ui, "E", "Eraser: cut paths, remove touched rings");
            shortcut_row(ui, "G", "Polygon: click vertices of a ring");
            shortcut_row(ui, "L", "Line: click vertices of a path");
            shortcut_row(ui, "M", "Marker: click to place");

            ui.add_space(8.0);
            ui.label(egui::RichText::new("History").strong());
            shortcut_row(ui, "Ctrl+Z", "Undo");
            shortcut_row(ui, "Ctrl+Y / Ctrl+Shift+Z", "Redo");

            ui.add_space(8.0);
            ui.label(egui::RichText::new("Map").strong());
            shortcut_row(ui, "Middle drag", "Pan with any tool");
            shortcut_row(ui, "Scroll", "Zoom around the cursor");

            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if ui.button("Close").clicked() {
                    help_state.is_open = false;
                }
            });
        });
    Ok(())
}

/// H toggles help, Escape closes it
pub fn handle_help_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut help_state: ResMut<HelpWindowState>,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyH) {
        help_state.is_open = !help_state.is_open;
    } else if help_state.is_open && keyboard.just_pressed(KeyCode::Escape) {
        help_state.is_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_clear_yields_group_edit() {
        let mut clear = ClearConfirmation::default();
        assert!(!clear.is_open());

        clear.open(GroupId(3), ClearKind::Paths);
        assert!(clear.is_open());
        assert_eq!(
            clear.close(true),
            Some((HistoryTarget::Group(GroupId(3)), Edit::ClearPaths))
        );
        assert!(!clear.is_open());
    }

    #[test]
    fn test_cancelled_clear_yields_nothing() {
        let mut clear = ClearConfirmation::default();
        clear.open(GroupId(1), ClearKind::Rings);
        assert_eq!(clear.close(false), None);
        assert!(!clear.is_open());
        assert_eq!(clear.close(true), None);
    }
}
