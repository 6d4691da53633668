use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, SetEraseRadiusRequest, SetSnapToRoadRequest};
use crate::editor::{
    CapturePhase, CommandHistory, CurrentTool, EditorTool, EraseSession, FreehandCapture,
    HistoryRequest,
};

const HINT_COLOR: egui::Color32 = egui::Color32::GRAY;
const BUSY_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);

/// Main toolbar showing tools and undo/redo
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut current_tool: ResMut<CurrentTool>,
    history: Res<CommandHistory>,
    capture: Res<FreehandCapture>,
    mut history_requests: MessageWriter<HistoryRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                for tool in EditorTool::all() {
                    let button = egui::Button::new(
                        egui::RichText::new(tool_button_label(tool)).size(14.0).strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(current_tool.tool == *tool);

                    let response = ui.add(button);
                    if response.clicked() {
                        current_tool.tool = *tool;
                    }
                    response.on_hover_text(tool.display_name());
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let undo = ui
                    .add_enabled(history.can_undo(), egui::Button::new("Undo"))
                    .on_hover_text("Ctrl+Z");
                if undo.clicked() {
                    history_requests.write(HistoryRequest::Undo);
                }
                let redo = ui
                    .add_enabled(history.can_redo(), egui::Button::new("Redo"))
                    .on_hover_text("Ctrl+Y / Ctrl+Shift+Z");
                if redo.clicked() {
                    history_requests.write(HistoryRequest::Redo);
                }

                // A snap can outlive the freehand tool, so show it regardless of the tool
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if capture.phase() == CapturePhase::Snapping {
                        ui.colored_label(BUSY_COLOR, "Snapping to road...");
                        ui.spinner();
                    }
                });
            });
        });
    Ok(())
}

/// Secondary toolbar showing settings and hints for the active tool
pub fn tool_settings_ui(
    mut contexts: EguiContexts,
    current_tool: Res<CurrentTool>,
    config: Res<AppConfig>,
    mut erase: ResMut<EraseSession>,
    mut radius_requests: MessageWriter<SetEraseRadiusRequest>,
    mut snap_requests: MessageWriter<SetSnapToRoadRequest>,
) -> Result {
    egui::TopBottomPanel::top("tool_settings")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 6))
                .fill(egui::Color32::from_rgb(45, 45, 48)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                match current_tool.tool {
                    EditorTool::Eraser => {
                        ui.label("Radius:");
                        let mut steps = 0;
                        if ui.button("-").clicked() {
                            steps -= 1;
                        }
                        ui.label(
                            egui::RichText::new(format!("{:.0} m", erase.radius())).monospace(),
                        );
                        if ui.button("+").clicked() {
                            steps += 1;
                        }
                        if steps != 0 {
                            erase.step_radius(steps);
                            radius_requests.write(SetEraseRadiusRequest {
                                radius: erase.radius(),
                            });
                        }
                        ui.add_space(12.0);
                        hint(ui, "Drag across paths to cut them; touching a ring removes it");
                    }
                    EditorTool::Freehand => {
                        let mut snap = config.data.snap_to_road;
                        if ui.checkbox(&mut snap, "Snap to road").changed() {
                            snap_requests.write(SetSnapToRoadRequest { enabled: snap });
                        }
                        ui.add_space(12.0);
                        hint(ui, "Drag to draw a path");
                    }
                    EditorTool::Polygon => {
                        hint(ui, "Click to add vertices, click the first vertex or Enter to close, Esc to cancel");
                    }
                    EditorTool::Line => {
                        hint(ui, "Click to add vertices, Enter to finish, Esc to cancel");
                    }
                    EditorTool::Marker => {
                        hint(ui, "Click to place a marker on the selected group");
                    }
                    EditorTool::Navigate => {
                        hint(ui, "Drag to pan. Tap a marker to toggle its status, drag to move it, right-click to delete");
                    }
                }
            });
        });
    Ok(())
}

fn hint(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).color(HINT_COLOR).size(11.0));
}

/// Get the button label for a tool (with keyboard shortcut)
fn tool_button_label(tool: &EditorTool) -> &'static str {
    match tool {
        EditorTool::Navigate => "Navigate [N]",
        EditorTool::Freehand => "Freehand [F]",
        EditorTool::Eraser => "Eraser [E]",
        EditorTool::Polygon => "Polygon [G]",
        EditorTool::Line => "Line [L]",
        EditorTool::Marker => "Marker [M]",
    }
}
