use bevy::prelude::*;

use crate::constants::{DEFAULT_ERASE_RADIUS_M, ERASE_RADIUS_STEP_M, MAX_ERASE_RADIUS_M, MIN_ERASE_RADIUS_M};
use crate::editor::history::{Edit, HistoryTarget};
use crate::geo::{Coordinate, Path};
use crate::territory::{ExtraAnnotations, GroupGeometry, GroupId, TerritoryData};

use super::clip::{erase_from_paths, erase_from_rings};
use super::stroke::stroke_positions;

/// Working copy of the target an erase gesture is editing
#[derive(Debug, Clone, PartialEq)]
pub enum PendingErase {
    Group {
        group_id: GroupId,
        geometry: GroupGeometry,
    },
    Extra {
        paths: Vec<Path>,
    },
}

impl PendingErase {
    /// Copy the committed state of `target`
    pub fn capture(
        target: HistoryTarget,
        territory: &TerritoryData,
        extra: &ExtraAnnotations,
    ) -> Option<Self> {
        match target {
            HistoryTarget::Group(group_id) => {
                territory.group(group_id).map(|group| PendingErase::Group {
                    group_id,
                    geometry: group.geometry.clone(),
                })
            }
            HistoryTarget::Extra => Some(PendingErase::Extra {
                paths: extra.paths.clone(),
            }),
        }
    }

    pub fn target(&self) -> HistoryTarget {
        match self {
            PendingErase::Group { group_id, .. } => HistoryTarget::Group(*group_id),
            PendingErase::Extra { .. } => HistoryTarget::Extra,
        }
    }

    fn erase_at(&mut self, cursor: Coordinate, radius: f64) {
        match self {
            PendingErase::Group { geometry, .. } => {
                geometry.rings = erase_from_rings(cursor, radius, &geometry.rings);
                geometry.paths = erase_from_paths(cursor, radius, &geometry.paths);
            }
            PendingErase::Extra { paths } => {
                *paths = erase_from_paths(cursor, radius, paths);
            }
        }
    }

    pub fn into_edit(self) -> (HistoryTarget, Edit) {
        let target = self.target();
        let edit = match self {
            PendingErase::Group { geometry, .. } => Edit::ReplaceGeometry(geometry),
            PendingErase::Extra { paths } => Edit::ReplacePaths(paths),
        };
        (target, edit)
    }
}

/// Eraser state: the radius plus the gesture in progress, if any.
///
/// The working copy is only written back when the gesture finishes, so the
/// committed model never shows a half-erased state.
#[derive(Resource, Debug)]
pub struct EraseSession {
    radius: f64,
    /// Last position erased at during the current gesture
    last: Option<Coordinate>,
    pending: Option<PendingErase>,
}

impl Default for EraseSession {
    fn default() -> Self {
        Self {
            radius: DEFAULT_ERASE_RADIUS_M,
            last: None,
            pending: None,
        }
    }
}

impl EraseSession {
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = if radius.is_finite() {
            radius.clamp(MIN_ERASE_RADIUS_M, MAX_ERASE_RADIUS_M)
        } else {
            DEFAULT_ERASE_RADIUS_M
        };
    }

    /// Grow (positive) or shrink (negative) the radius by whole steps
    pub fn step_radius(&mut self, steps: i32) {
        self.set_radius(self.radius + ERASE_RADIUS_STEP_M * steps as f64);
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub fn working_copy(&self) -> Option<&PendingErase> {
        self.pending.as_ref()
    }

    /// Start a gesture on `working` and erase at the press position
    pub fn begin(&mut self, working: PendingErase, at: Coordinate) {
        self.pending = Some(working);
        self.last = None;
        self.stroke_to(at);
    }

    /// Erase along the move from the last position to `at`
    pub fn stroke_to(&mut self, at: Coordinate) {
        let radius = self.radius;
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if self.last == Some(at) {
            return;
        }

        for position in stroke_positions(self.last, at, radius) {
            pending.erase_at(position, radius);
        }
        self.last = Some(at);
    }

    /// End the gesture. Only the first call after `begin` returns the working copy.
    pub fn finish(&mut self) -> Option<PendingErase> {
        self.last = None;
        self.pending.take()
    }

    /// Drop the gesture without committing
    pub fn abandon(&mut self) {
        if self.pending.is_some() {
            debug!("Eraser: abandoning uncommitted erase");
        }
        self.last = None;
        self.pending = None;
    }
}
