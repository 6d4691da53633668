//! Map view over a Web-Mercator world plane.
//!
//! The Bevy camera never moves. [`MapView`] holds the geographic center and
//! zoom, and geometry is placed in render space as pixel offsets from that
//! center (x right, y up), so gizmos draw at screen resolution.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::f64::consts::PI;

use crate::constants::{MAX_MAP_ZOOM, MIN_MAP_ZOOM};
use crate::geo::Coordinate;

use super::markers::MarkerDrag;
use super::params::{is_cursor_over_ui, CameraParams};
use super::tools::{CurrentTool, EditorTool};

/// World units across the whole map at zoom 0
pub const WORLD_SIZE: f64 = 256.0;

/// Mercator latitude limit
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Meters per pixel at the equator at zoom 0
const EQUATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;

#[derive(Component)]
pub struct EditorCamera;

/// Screen ↔ geographic conversion for the current view
pub trait MapProjection {
    /// Web-Mercator world position (y grows south)
    fn coord_to_world(&self, coord: Coordinate) -> DVec2;

    fn world_to_coord(&self, world: DVec2) -> Coordinate;

    /// Screen pixels per world unit
    fn scale(&self) -> f64;

    /// Move `origin` by a screen-space delta (pixels, y down)
    fn screen_delta_to_coord(&self, origin: Coordinate, delta: Vec2) -> Coordinate {
        let world = self.coord_to_world(origin) + delta.as_dvec2() / self.scale();
        self.world_to_coord(world)
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Coordinate::new(-10.169, -48.331),
            zoom: 15.0,
        }
    }
}

impl MapProjection for MapView {
    fn coord_to_world(&self, coord: Coordinate) -> DVec2 {
        let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (coord.lng + 180.0) / 360.0 * WORLD_SIZE;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * WORLD_SIZE;
        DVec2::new(x, y)
    }

    fn world_to_coord(&self, world: DVec2) -> Coordinate {
        let lng = world.x / WORLD_SIZE * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * world.y / WORLD_SIZE);
        let lat = n.sinh().atan().to_degrees();
        Coordinate::new(lat, lng)
    }

    fn scale(&self) -> f64 {
        2f64.powf(self.zoom)
    }
}

impl MapView {
    /// Render-space position (pixels from the view center, y up)
    pub fn to_render(&self, coord: Coordinate) -> Vec2 {
        let offset = (self.coord_to_world(coord) - self.coord_to_world(self.center)) * self.scale();
        Vec2::new(offset.x as f32, -offset.y as f32)
    }

    pub fn from_render(&self, render: Vec2) -> Coordinate {
        let offset = DVec2::new(render.x as f64, -(render.y as f64)) / self.scale();
        self.world_to_coord(self.coord_to_world(self.center) + offset)
    }

    /// Drag the map by a screen delta (pixels, y down)
    pub fn pan_by_screen(&mut self, delta: Vec2) {
        self.center = self.screen_delta_to_coord(self.center, -delta);
    }

    /// Change zoom keeping the coordinate under `anchor` (render space) fixed
    pub fn zoom_around(&mut self, delta: f64, anchor: Vec2) {
        let pinned = self.from_render(anchor);
        self.zoom = (self.zoom + delta).clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM);

        let offset = DVec2::new(anchor.x as f64, -(anchor.y as f64)) / self.scale();
        self.center = self.world_to_coord(self.coord_to_world(pinned) - offset);
    }

    /// How many screen pixels `meters` spans at `lat`
    pub fn meters_to_pixels(&self, meters: f64, lat: f64) -> f32 {
        let meters_per_pixel = EQUATOR_METERS_PER_PIXEL * lat.to_radians().cos() / self.scale();
        if meters_per_pixel <= 0.0 {
            return 0.0;
        }
        (meters / meters_per_pixel) as f32
    }
}

/// Left-drag panning in Navigate mode
#[derive(Resource, Default)]
pub struct PanState {
    pub active: bool,
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

/// A marker drag projects pointer deltas through the current view, so the
/// view holds still until the marker is released.
fn pan_allowed(left_pan_active: bool, middle_pressed: bool, marker_dragging: bool) -> bool {
    !marker_dragging && (left_pan_active || middle_pressed)
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    current_tool: Res<CurrentTool>,
    marker_drag: Res<MarkerDrag>,
    mut pan: ResMut<PanState>,
    mut view: ResMut<MapView>,
    mut contexts: EguiContexts,
) {
    if current_tool.tool == EditorTool::Navigate
        && mouse_button.just_pressed(MouseButton::Left)
        && !marker_drag.is_dragging()
        && !is_cursor_over_ui(&mut contexts)
    {
        pan.active = true;
    }
    if !mouse_button.pressed(MouseButton::Left) || current_tool.tool != EditorTool::Navigate {
        pan.active = false;
    }

    if !pan_allowed(
        pan.active,
        mouse_button.pressed(MouseButton::Middle),
        marker_drag.is_dragging(),
    ) {
        mouse_motion.clear();
        return;
    }

    for event in mouse_motion.read() {
        view.pan_by_screen(event.delta);
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut view: ResMut<MapView>,
    camera: CameraParams,
    mut contexts: EguiContexts,
) {
    if is_cursor_over_ui(&mut contexts) {
        scroll_events.clear();
        return;
    }

    let anchor = camera.cursor_world_pos().unwrap_or(Vec2::ZERO);
    for event in scroll_events.read() {
        let delta = match event.unit {
            MouseScrollUnit::Line => event.y as f64 * 0.5,
            MouseScrollUnit::Pixel => event.y as f64 * 0.01,
        };
        view.zoom_around(delta, anchor);
    }
}
