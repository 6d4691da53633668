use bevy::prelude::*;

use crate::constants::MARKER_DRAG_THRESHOLD_PX;
use crate::editor::camera::MapProjection;
use crate::geo::Coordinate;
use crate::territory::{GroupId, MarkerId};

/// The single effect a press/release on a marker produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerAction {
    Move {
        group_id: GroupId,
        marker_id: MarkerId,
        position: Coordinate,
    },
    ToggleStatus {
        group_id: GroupId,
        marker_id: MarkerId,
    },
}

#[derive(Debug, Clone, Copy)]
struct DragGesture {
    group_id: GroupId,
    marker_id: MarkerId,
    start_screen: Vec2,
    start_coord: Coordinate,
    tentative: Coordinate,
    moved: bool,
}

/// Tells a marker drag apart from a tap.
///
/// Once the pointer strays past the threshold the gesture is a drag for good,
/// even if it comes back to where it started.
#[derive(Resource, Debug, Default)]
pub struct MarkerDrag {
    gesture: Option<DragGesture>,
}

impl MarkerDrag {
    pub fn press(&mut self, group_id: GroupId, marker_id: MarkerId, screen: Vec2, coord: Coordinate) {
        self.gesture = Some(DragGesture {
            group_id,
            marker_id,
            start_screen: screen,
            start_coord: coord,
            tentative: coord,
            moved: false,
        });
    }

    /// Follow the pointer (window pixels, y down)
    pub fn drag_to(&mut self, screen: Vec2, projection: &impl MapProjection) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        let delta = screen - gesture.start_screen;
        if delta.x.abs() > MARKER_DRAG_THRESHOLD_PX || delta.y.abs() > MARKER_DRAG_THRESHOLD_PX {
            gesture.moved = true;
        }
        if gesture.moved {
            gesture.tentative = projection.screen_delta_to_coord(gesture.start_coord, delta);
        }
    }

    /// End the gesture with exactly one action
    pub fn release(&mut self) -> Option<MarkerAction> {
        let gesture = self.gesture.take()?;
        Some(if gesture.moved {
            MarkerAction::Move {
                group_id: gesture.group_id,
                marker_id: gesture.marker_id,
                position: gesture.tentative,
            }
        } else {
            MarkerAction::ToggleStatus {
                group_id: gesture.group_id,
                marker_id: gesture.marker_id,
            }
        })
    }

    pub fn cancel(&mut self) {
        self.gesture = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Where the dragged marker should be drawn right now
    pub fn preview(&self, group_id: GroupId, marker_id: MarkerId) -> Option<Coordinate> {
        self.gesture
            .filter(|g| g.moved && g.group_id == group_id && g.marker_id == marker_id)
            .map(|g| g.tentative)
    }
}
