use bevy::prelude::*;

use crate::geo::{Coordinate, Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePhase {
    #[default]
    Idle,
    Capturing,
    /// A finished stroke is waiting on the routing service
    Snapping,
}

/// Point buffer for the freehand stroke in progress
#[derive(Resource, Debug, Default)]
pub struct FreehandCapture {
    phase: CapturePhase,
    points: Path,
}

impl FreehandCapture {
    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Start a stroke at `at`. Refused while another stroke is capturing or snapping.
    pub fn begin(&mut self, at: Coordinate) -> bool {
        if self.phase != CapturePhase::Idle {
            return false;
        }
        self.phase = CapturePhase::Capturing;
        self.points.clear();
        self.points.push(at);
        true
    }

    /// Append a pointer position. Every distinct position is kept.
    pub fn extend(&mut self, at: Coordinate) {
        if self.phase == CapturePhase::Capturing && self.points.last() != Some(&at) {
            self.points.push(at);
        }
    }

    /// End the stroke, returning it if it has at least two points
    pub fn finish(&mut self) -> Option<Path> {
        if self.phase != CapturePhase::Capturing {
            return None;
        }
        self.phase = CapturePhase::Idle;
        let points = std::mem::take(&mut self.points);
        (points.len() >= 2).then_some(points)
    }

    pub fn start_snapping(&mut self) {
        self.phase = CapturePhase::Snapping;
    }

    pub fn snapping_done(&mut self) {
        if self.phase == CapturePhase::Snapping {
            self.phase = CapturePhase::Idle;
        }
    }

    /// Drop a stroke that is still being drawn. A stroke already snapping is left to finish.
    pub fn abandon(&mut self) {
        if self.phase == CapturePhase::Capturing {
            debug!("Freehand: abandoning stroke with {} points", self.points.len());
            self.phase = CapturePhase::Idle;
            self.points.clear();
        }
    }
}
