//! Gizmo rendering of territory geometry, working copies and tool previews.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::geo::Coordinate;
use crate::territory::{group_color, ExtraAnnotations, GroupGeometry, MarkerStatus, TerritoryData};

use super::camera::{EditorCamera, MapView};
use super::eraser::{EraseSession, PendingErase};
use super::freehand::FreehandCapture;
use super::markers::MarkerDrag;
use super::params::MapCursor;
use super::polygon::VertexDraft;
use super::tools::{CurrentTool, EditorTool};

/// Custom gizmo group for map geometry
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct MapGizmos;

const EXTRA_COLOR: Color = Color::srgb(1.0, 0.6, 0.0);
const PREVIEW_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);
const ERASER_COLOR: Color = Color::srgba(1.0, 0.3, 0.3, 0.9);
const WORKED_COLOR: Color = Color::srgb(0.2, 0.7, 0.3);
const NOT_WORKED_COLOR: Color = Color::srgb(0.85, 0.2, 0.2);

pub fn configure_map_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<MapGizmos>();
    config.line.width = 3.0;
}

fn draw_path(gizmos: &mut Gizmos<MapGizmos>, view: &MapView, path: &[Coordinate], color: Color) {
    if path.len() < 2 {
        return;
    }
    gizmos.linestrip_2d(path.iter().map(|p| view.to_render(*p)), color);
}

fn draw_ring(gizmos: &mut Gizmos<MapGizmos>, view: &MapView, ring: &[Coordinate], color: Color) {
    if ring.len() < 3 {
        return;
    }
    let closed = ring.iter().chain(ring.first()).map(|p| view.to_render(*p));
    gizmos.linestrip_2d(closed, color);
}

fn draw_geometry(gizmos: &mut Gizmos<MapGizmos>, view: &MapView, geometry: &GroupGeometry, color: Color) {
    for ring in &geometry.rings {
        draw_ring(gizmos, view, ring, color);
    }
    for path in &geometry.paths {
        draw_path(gizmos, view, path, color);
    }
}

/// Committed geometry, with the eraser's working copy standing in for its target mid-gesture
pub fn render_territory(
    mut gizmos: Gizmos<MapGizmos>,
    view: Res<MapView>,
    territory: Res<TerritoryData>,
    extra: Res<ExtraAnnotations>,
    erase: Res<EraseSession>,
) {
    let working = erase.working_copy();

    for group in &territory.groups {
        let mut color = group_color(&group.color);
        if territory.selected != Some(group.id) {
            color = color.with_alpha(0.45);
        }

        let geometry = match working {
            Some(PendingErase::Group { group_id, geometry }) if *group_id == group.id => geometry,
            _ => &group.geometry,
        };
        draw_geometry(&mut gizmos, &view, geometry, color);
    }

    let extra_paths = match working {
        Some(PendingErase::Extra { paths }) => paths,
        _ => &extra.paths,
    };
    for path in extra_paths {
        draw_path(&mut gizmos, &view, path, EXTRA_COLOR);
    }
}

pub fn render_tool_preview(
    mut gizmos: Gizmos<MapGizmos>,
    current_tool: Res<CurrentTool>,
    cursor: MapCursor,
    capture: Res<FreehandCapture>,
    draft: Res<VertexDraft>,
    erase: Res<EraseSession>,
) {
    let view = &cursor.view;
    match current_tool.tool {
        EditorTool::Freehand => draw_path(&mut gizmos, view, capture.points(), PREVIEW_COLOR),
        EditorTool::Polygon | EditorTool::Line => {
            let mut points: Vec<Vec2> = draft.vertices.iter().map(|p| view.to_render(*p)).collect();
            if points.is_empty() {
                return;
            }
            if let Some(pos) = cursor.render_pos() {
                points.push(pos);
            }
            gizmos.linestrip_2d(points, PREVIEW_COLOR);
        }
        EditorTool::Eraser => {
            let (Some(pos), Some(at)) = (cursor.render_pos(), cursor.coord()) else {
                return;
            };
            let radius_px = view.meters_to_pixels(erase.radius(), at.lat);
            gizmos.circle_2d(pos, radius_px, ERASER_COLOR);
        }
        EditorTool::Navigate | EditorTool::Marker => {}
    }
}

fn status_color(status: MarkerStatus) -> Color {
    match status {
        MarkerStatus::Worked => WORKED_COLOR,
        MarkerStatus::NotWorked => NOT_WORKED_COLOR,
    }
}

/// Markers of the selected group, drawn with egui so labels sit on top of the map
pub fn render_markers(
    mut contexts: EguiContexts,
    camera: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    view: Res<MapView>,
    territory: Res<TerritoryData>,
    drag: Res<MarkerDrag>,
) -> Result {
    let Ok((camera, camera_transform)) = camera.single() else {
        return Ok(());
    };
    let Some(group) = territory.selected_group() else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("map_markers"),
    ));

    for marker in &group.markers {
        let position = drag.preview(group.id, marker.id).unwrap_or(marker.position);
        let render = view.to_render(position);
        let Ok(screen) = camera.world_to_viewport(camera_transform, render.extend(0.0)) else {
            continue;
        };

        let fill = status_color(marker.status).to_srgba();
        let center = egui::pos2(screen.x, screen.y);
        painter.circle(
            center,
            11.0,
            egui::Color32::from_rgb(
                (fill.red * 255.0) as u8,
                (fill.green * 255.0) as u8,
                (fill.blue * 255.0) as u8,
            ),
            egui::Stroke::new(1.5, egui::Color32::WHITE),
        );
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            &marker.label,
            egui::FontId::proportional(11.0),
            egui::Color32::WHITE,
        );
    }
    Ok(())
}
