mod camera;
pub mod conditions;
pub mod eraser;
pub mod freehand;
pub mod history;
pub mod markers;
pub mod params;
mod polygon;
mod rendering;
pub mod tools;

pub use camera::MapView;
pub use eraser::EraseSession;
pub use freehand::{CapturePhase, FreehandCapture};
pub use history::{CommandHistory, HistoryRequest};
pub use tools::{CurrentTool, EditorTool};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::{AppConfig, ConfigLoaded};
use crate::territory::EditTarget;

use conditions::{no_dialog_open, tool_is};

/// Start the editor from the persisted view and edit target
fn apply_startup_config(
    config: Res<AppConfig>,
    mut view: ResMut<MapView>,
    mut edit_target: ResMut<EditTarget>,
) {
    view.center = config.data.map_center;
    view.zoom = config
        .data
        .map_zoom
        .clamp(crate::constants::MIN_MAP_ZOOM, crate::constants::MAX_MAP_ZOOM);
    *edit_target = config.data.edit_target;
}

/// Keep the eraser radius in step with the configured value
fn sync_erase_radius(config: Res<AppConfig>, mut erase: ResMut<EraseSession>) {
    let radius = config.data.erase_radius();
    if erase.radius() != radius {
        erase.set_radius(radius);
    }
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentTool>()
            .init_resource::<MapView>()
            .init_resource::<camera::PanState>()
            .init_resource::<CommandHistory>()
            .init_resource::<EraseSession>()
            .init_resource::<FreehandCapture>()
            .init_resource::<freehand::RoutingBackend>()
            .init_resource::<markers::MarkerDrag>()
            .init_resource::<polygon::VertexDraft>()
            .add_message::<HistoryRequest>()
            .init_gizmo_group::<rendering::MapGizmos>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    rendering::configure_map_gizmos,
                    (apply_startup_config, freehand::sync_routing_backend).after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    tools::handle_tool_shortcuts,
                    tools::abandon_previous_tool_state,
                    tools::update_cursor_icon,
                    sync_erase_radius.run_if(resource_changed::<AppConfig>),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    history::handle_history_shortcuts.run_if(no_dialog_open),
                    history::handle_history_requests.run_if(on_message::<HistoryRequest>),
                ),
            )
            .add_systems(
                Update,
                (
                    markers::handle_marker_press
                        .run_if(tool_is(EditorTool::Navigate))
                        .run_if(no_dialog_open),
                    markers::handle_marker_drag,
                    camera::camera_pan,
                    camera::camera_zoom.run_if(no_dialog_open),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    markers::handle_marker_delete
                        .run_if(tool_is(EditorTool::Navigate))
                        .run_if(no_dialog_open),
                    markers::handle_marker_place
                        .run_if(tool_is(EditorTool::Marker))
                        .run_if(no_dialog_open),
                    polygon::handle_vertex_tool.run_if(no_dialog_open),
                    (
                        eraser::handle_erase
                            .run_if(tool_is(EditorTool::Eraser))
                            .run_if(no_dialog_open),
                        eraser::finish_erase_on_release,
                    )
                        .chain(),
                    (
                        freehand::handle_freehand
                            .run_if(tool_is(EditorTool::Freehand))
                            .run_if(no_dialog_open),
                        freehand::poll_snap_tasks,
                    )
                        .chain(),
                ),
            )
            .add_systems(
                Update,
                (rendering::render_territory, rendering::render_tool_preview),
            )
            .add_systems(EguiPrimaryContextPass, rendering::render_markers);
    }
}
