use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::EguiContexts;
use futures_lite::future;

use crate::config::AppConfig;
use crate::editor::history::{Edit, EditContext, HistoryTarget};
use crate::editor::params::{is_cursor_over_ui, MapCursor};
use crate::geo::Path;

use super::capture::{CapturePhase, FreehandCapture};
use super::snap::{snap_or_fallback, RoutingBackend};

/// Background snap request for a finished stroke
#[derive(Component)]
pub struct SnapTask {
    /// Where the stroke lands, fixed when the gesture ended
    target: HistoryTarget,
    task: Task<Path>,
}

#[allow(clippy::too_many_arguments)]
pub fn handle_freehand(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    cursor: MapCursor,
    mut capture: ResMut<FreehandCapture>,
    config: Res<AppConfig>,
    router: Res<RoutingBackend>,
    mut edit: EditContext,
    mut contexts: EguiContexts,
) {
    if mouse_button.just_pressed(MouseButton::Left) && capture.phase() == CapturePhase::Idle {
        if is_cursor_over_ui(&mut contexts) {
            return;
        }
        if let Some(at) = cursor.coord() {
            capture.begin(at);
        }
        return;
    }

    if capture.phase() != CapturePhase::Capturing {
        return;
    }

    if let Some(at) = cursor.coord() {
        capture.extend(at);
    }
    if mouse_button.pressed(MouseButton::Left) {
        return;
    }

    let Some(raw) = capture.finish() else {
        debug!("Freehand: stroke too short, discarded");
        return;
    };
    let Some(target) = edit.active_target() else {
        warn!("Freehand: no group selected, stroke discarded");
        return;
    };

    if config.data.snap_to_road {
        capture.start_snapping();
        let router = router.0.clone();
        let task_pool = AsyncComputeTaskPool::get();
        let task = task_pool.spawn(async move { snap_or_fallback(router.as_ref(), raw) });
        commands.spawn(SnapTask { target, task });
    } else {
        edit.commit(target, Edit::AppendPath(raw));
    }
}

/// System to poll snap requests and commit their result
pub fn poll_snap_tasks(
    mut commands: Commands,
    mut capture: ResMut<FreehandCapture>,
    mut tasks: Query<(Entity, &mut SnapTask)>,
    mut edit: EditContext,
) {
    for (entity, mut snap) in tasks.iter_mut() {
        if let Some(path) = future::block_on(future::poll_once(&mut snap.task)) {
            capture.snapping_done();
            edit.commit(snap.target, Edit::AppendPath(path));
            commands.entity(entity).despawn();
        }
    }
}

/// Point the routing client at the configured service
pub fn sync_routing_backend(config: Res<AppConfig>, mut router: ResMut<RoutingBackend>) {
    *router = RoutingBackend::osrm(config.data.routing_url.clone());
    info!("Routing service: {}", config.data.routing_url);
}
