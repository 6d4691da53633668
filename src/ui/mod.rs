mod dialogs;
mod groups_panel;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigResetNotification;

use dialogs::{ClearConfirmation, HelpWindowState};

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers check this so map gestures don't fire behind a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    pub any_modal_open: bool,
}

/// Aggregate all dialog open states. Runs in First, before input handlers.
fn update_dialog_state(
    clear: Res<ClearConfirmation>,
    help: Res<HelpWindowState>,
    config_reset: Res<ConfigResetNotification>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = clear.is_open() || help.is_open || config_reset.show;
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<ClearConfirmation>()
            .init_resource::<HelpWindowState>()
            // Side panel renders first so the top panels fit beside it
            .add_systems(
                EguiPrimaryContextPass,
                (
                    groups_panel::groups_panel_ui,
                    toolbar::toolbar_ui,
                    toolbar::tool_settings_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    dialogs::clear_confirmation_ui,
                    dialogs::config_reset_notification_ui,
                    dialogs::help_popup_ui,
                )
                    .after(toolbar::tool_settings_ui),
            )
            .add_systems(Update, dialogs::handle_help_shortcut)
            .add_systems(First, update_dialog_state);
    }
}
