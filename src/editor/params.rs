//! Common SystemParam bundles to reduce parameter counts in editor systems.
//!
//! ## Available Bundles
//!
//! - [`CameraParams`]: Basic camera and window access for cursor-to-render conversion
//! - [`MapCursor`]: Cursor position as a geographic coordinate, through the current [`MapView`]
//!
//! ## Helper Functions
//!
//! - [`is_cursor_over_ui`]: Check if cursor is over egui UI (for input gating)

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::geo::Coordinate;

use super::camera::{EditorCamera, MapView};

/// Bundled camera and window queries for cursor-to-world calculations
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<EditorCamera>>,
}

impl CameraParams<'_, '_> {
    /// Get the render-space position of the cursor, if available
    pub fn cursor_world_pos(&self) -> Option<Vec2> {
        let window = self.window.single().ok()?;
        let (camera, transform) = self.camera.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        camera.viewport_to_world_2d(transform, cursor_pos).ok()
    }

    /// Get the cursor position in window pixels (y down), if available
    pub fn cursor_screen_pos(&self) -> Option<Vec2> {
        self.window.single().ok()?.cursor_position()
    }
}

/// Cursor access in map terms
#[derive(SystemParam)]
pub struct MapCursor<'w, 's> {
    pub camera: CameraParams<'w, 's>,
    pub view: Res<'w, MapView>,
}

impl MapCursor<'_, '_> {
    /// Geographic coordinate under the cursor
    pub fn coord(&self) -> Option<Coordinate> {
        self.camera
            .cursor_world_pos()
            .map(|pos| self.view.from_render(pos))
    }

    pub fn render_pos(&self) -> Option<Vec2> {
        self.camera.cursor_world_pos()
    }

    pub fn screen_pos(&self) -> Option<Vec2> {
        self.camera.cursor_screen_pos()
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}
