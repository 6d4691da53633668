//! Click-by-click drawing of rings (Polygon tool) and straight-segment paths (Line tool).

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::CLOSE_RING_DISTANCE_PX;
use crate::geo::Coordinate;

use super::camera::MapView;
use super::history::{Edit, EditContext, HistoryTarget};
use super::params::{is_cursor_over_ui, MapCursor};
use super::tools::{CurrentTool, EditorTool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    Ring,
    Path,
}

impl DraftKind {
    fn for_tool(tool: EditorTool) -> Option<Self> {
        match tool {
            EditorTool::Polygon => Some(DraftKind::Ring),
            EditorTool::Line => Some(DraftKind::Path),
            _ => None,
        }
    }

    pub fn min_vertices(&self) -> usize {
        match self {
            DraftKind::Ring => 3,
            DraftKind::Path => 2,
        }
    }
}

/// Vertices placed so far
#[derive(Resource, Debug, Default)]
pub struct VertexDraft {
    pub vertices: Vec<Coordinate>,
}

impl VertexDraft {
    pub fn add_vertex(&mut self, at: Coordinate) {
        self.vertices.push(at);
    }

    /// Whether a click at `click` (render space) closes the ring on its first vertex
    pub fn closes_ring(&self, click: Vec2, view: &MapView) -> bool {
        match self.vertices.first() {
            Some(first) if self.vertices.len() >= DraftKind::Ring.min_vertices() => {
                view.to_render(*first).distance(click) <= CLOSE_RING_DISTANCE_PX
            }
            _ => false,
        }
    }

    /// Take the draft as an edit, or `None` if it has too few vertices
    pub fn complete(&mut self, kind: DraftKind) -> Option<Edit> {
        let vertices = std::mem::take(&mut self.vertices);
        if vertices.len() < kind.min_vertices() {
            debug!("Draft with {} vertices discarded", vertices.len());
            return None;
        }
        Some(match kind {
            DraftKind::Ring => Edit::AppendRing(vertices),
            DraftKind::Path => Edit::AppendPath(vertices),
        })
    }

    pub fn cancel(&mut self) {
        self.vertices.clear();
    }
}

fn commit_draft(draft: &mut VertexDraft, kind: DraftKind, edit: &mut EditContext) {
    let Some(target) = edit.active_target() else {
        warn!("No group selected, draft discarded");
        draft.cancel();
        return;
    };
    if kind == DraftKind::Ring && target == HistoryTarget::Extra {
        warn!("Rings can only be added to a group");
        draft.cancel();
        return;
    }
    if let Some(change) = draft.complete(kind) {
        edit.commit(target, change);
    }
}

pub fn handle_vertex_tool(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    current_tool: Res<CurrentTool>,
    cursor: MapCursor,
    mut draft: ResMut<VertexDraft>,
    mut edit: EditContext,
    mut contexts: EguiContexts,
) {
    let Some(kind) = DraftKind::for_tool(current_tool.tool) else {
        return;
    };

    let typing = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false);
    if !typing {
        if keyboard.just_pressed(KeyCode::Escape) {
            draft.cancel();
            return;
        }
        if keyboard.just_pressed(KeyCode::Enter) {
            commit_draft(&mut draft, kind, &mut edit);
            return;
        }
    }

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    // Right click cancels
    if mouse_button.just_pressed(MouseButton::Right) {
        draft.cancel();
        return;
    }

    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    let (Some(render_pos), Some(at)) = (cursor.render_pos(), cursor.coord()) else {
        return;
    };

    if kind == DraftKind::Ring && draft.closes_ring(render_pos, &cursor.view) {
        commit_draft(&mut draft, kind, &mut edit);
    } else {
        draft.add_vertex(at);
    }
}
