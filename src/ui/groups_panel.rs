//! Right-hand panel: group list, edit target and destructive clear actions.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::SetEditTargetRequest;
use crate::editor::{CommandHistory, MapView};
use crate::territory::{group_color, EditTarget, TerritoryData};

use super::dialogs::{ClearConfirmation, ClearKind, HelpWindowState};

/// Colors handed out to new groups, in order
const GROUP_PALETTE: [&str; 6] = [
    "#1E88E5", "#E53935", "#43A047", "#8E24AA", "#FB8C00", "#00897B",
];

fn swatch(color: &str) -> egui::Color32 {
    let srgba = group_color(color).to_srgba();
    egui::Color32::from_rgb(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
    )
}

fn render_groups(ui: &mut egui::Ui, territory: &mut TerritoryData) {
    ui.heading("Groups");
    ui.add_space(4.0);

    let mut clicked = None;
    for group in &territory.groups {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 2.0, swatch(&group.color));

            let selected = territory.selected == Some(group.id);
            let label = format!(
                "{} ({} rings, {} paths)",
                group.name,
                group.geometry.rings.len(),
                group.geometry.paths.len()
            );
            if ui.selectable_label(selected, label).clicked() {
                clicked = Some(group.id);
            }
        });
    }
    if let Some(id) = clicked {
        territory.select(id);
    }

    ui.add_space(4.0);
    if ui.button("Add Group").clicked() {
        let color = GROUP_PALETTE[territory.groups.len() % GROUP_PALETTE.len()];
        let name = format!("Group {}", territory.groups.len() + 1);
        match territory.add_group(name, color) {
            Some(id) => {
                territory.select(id);
                info!("Added group {:?}", id);
            }
            None => warn!("No free group id left"),
        }
    }
}

fn render_edit_target(
    ui: &mut egui::Ui,
    edit_target: &mut EditTarget,
    requests: &mut MessageWriter<SetEditTargetRequest>,
) {
    ui.label(egui::RichText::new("Edit Target").strong());
    ui.horizontal(|ui| {
        for target in [EditTarget::Group, EditTarget::Extra] {
            if ui
                .radio(*edit_target == target, target.display_name())
                .clicked()
                && *edit_target != target
            {
                *edit_target = target;
                requests.write(SetEditTargetRequest { target });
            }
        }
    });
}

fn render_clear_actions(ui: &mut egui::Ui, territory: &TerritoryData, clear: &mut ClearConfirmation) {
    let Some(group) = territory.selected_group() else {
        return;
    };
    ui.label(egui::RichText::new("Selected Group").strong());
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!group.geometry.rings.is_empty(), egui::Button::new("Clear Rings"))
            .clicked()
        {
            clear.open(group.id, ClearKind::Rings);
        }
        if ui
            .add_enabled(!group.geometry.paths.is_empty(), egui::Button::new("Clear Paths"))
            .clicked()
        {
            clear.open(group.id, ClearKind::Paths);
        }
    });
}

#[allow(clippy::too_many_arguments)]
pub fn groups_panel_ui(
    mut contexts: EguiContexts,
    mut territory: ResMut<TerritoryData>,
    mut edit_target: ResMut<EditTarget>,
    mut clear: ResMut<ClearConfirmation>,
    mut help: ResMut<HelpWindowState>,
    history: Res<CommandHistory>,
    view: Res<MapView>,
    mut target_requests: MessageWriter<SetEditTargetRequest>,
) -> Result {
    egui::SidePanel::right("groups_panel")
        .default_width(220.0)
        .show(contexts.ctx_mut()?, |ui| {
            render_groups(ui, &mut territory);

            ui.add_space(8.0);
            ui.separator();
            render_edit_target(ui, &mut edit_target, &mut target_requests);

            ui.add_space(8.0);
            ui.separator();
            render_clear_actions(ui, &territory, &mut clear);

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                ui.weak(format!(
                    "Zoom {:.1}  |  {} undo / {} redo",
                    view.zoom,
                    history.undo_count(),
                    history.redo_count()
                ));
                ui.add_space(4.0);
                if ui
                    .add_sized([120.0, 28.0], egui::Button::new("Help (H)"))
                    .clicked()
                {
                    help.is_open = true;
                }
            });
        });
    Ok(())
}
