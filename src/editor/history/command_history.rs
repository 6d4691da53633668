//! Command history resource for tracking undo/redo state.

use bevy::prelude::*;

use crate::geo::Path;
use crate::territory::{EditTarget, ExtraAnnotations, GroupGeometry, GroupId, TerritoryData};

use super::MAX_HISTORY_SIZE;

/// The editing target a history entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTarget {
    Group(GroupId),
    Extra,
}

impl HistoryTarget {
    /// Resolve the live target from the current edit mode and group selection
    pub fn active(edit_target: EditTarget, territory: &TerritoryData) -> Option<Self> {
        match edit_target {
            EditTarget::Group => territory.selected.map(HistoryTarget::Group),
            EditTarget::Extra => Some(HistoryTarget::Extra),
        }
    }
}

/// Snapshot of one target taken before a mutation
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    Group {
        id: GroupId,
        geometry: GroupGeometry,
    },
    Extra {
        paths: Vec<Path>,
    },
}

impl HistoryEntry {
    pub fn target(&self) -> HistoryTarget {
        match self {
            HistoryEntry::Group { id, .. } => HistoryTarget::Group(*id),
            HistoryEntry::Extra { .. } => HistoryTarget::Extra,
        }
    }
}

/// Something history can snapshot from and restore into
pub trait EditTargets {
    fn capture(&self, target: HistoryTarget) -> Option<HistoryEntry>;

    /// Apply a snapshot as the new committed state. Returns false if the target no longer exists.
    fn restore(&mut self, entry: HistoryEntry) -> bool;
}

/// Borrowed view over the two editable stores
pub struct TerritoryTargets<'a> {
    pub territory: &'a mut TerritoryData,
    pub extra: &'a mut ExtraAnnotations,
}

impl EditTargets for TerritoryTargets<'_> {
    fn capture(&self, target: HistoryTarget) -> Option<HistoryEntry> {
        match target {
            HistoryTarget::Group(id) => self.territory.group(id).map(|group| HistoryEntry::Group {
                id,
                geometry: group.geometry.clone(),
            }),
            HistoryTarget::Extra => Some(HistoryEntry::Extra {
                paths: self.extra.paths.clone(),
            }),
        }
    }

    fn restore(&mut self, entry: HistoryEntry) -> bool {
        match entry {
            HistoryEntry::Group { id, geometry } => match self.territory.group_mut(id) {
                Some(group) => {
                    group.geometry = geometry;
                    true
                }
                None => false,
            },
            HistoryEntry::Extra { paths } => {
                self.extra.paths = paths;
                true
            }
        }
    }
}

/// Resource tracking command history for undo/redo.
///
/// Both targets share the same pair of stacks so ordering stays chronological
/// across group edits and extra-annotation edits.
#[derive(Resource, Default)]
pub struct CommandHistory {
    /// Snapshots that can be restored by undo (most recent last)
    undo_stack: Vec<HistoryEntry>,
    /// Snapshots that can be restored by redo (most recent last)
    redo_stack: Vec<HistoryEntry>,
}

impl CommandHistory {
    /// Snapshot `target` before it gets mutated. Clears the redo stack.
    ///
    /// Returns false (and records nothing) if the target doesn't exist.
    pub fn record(&mut self, targets: &impl EditTargets, target: HistoryTarget) -> bool {
        let Some(entry) = targets.capture(target) else {
            debug!("History: nothing to record for {:?}", target);
            return false;
        };

        self.redo_stack.clear();
        self.undo_stack.push(entry);

        // Trim history if it exceeds max size
        while self.undo_stack.len() > MAX_HISTORY_SIZE {
            self.undo_stack.remove(0);
        }
        true
    }

    /// Restore the most recent snapshot. Returns the target that changed.
    pub fn undo(&mut self, targets: &mut impl EditTargets) -> Option<HistoryTarget> {
        let entry = self.undo_stack.pop()?;
        let target = entry.target();

        let Some(current) = targets.capture(target) else {
            warn!("Undo: target {:?} no longer exists, dropping entry", target);
            return None;
        };

        targets.restore(entry);
        self.redo_stack.push(current);
        Some(target)
    }

    /// Re-apply the most recently undone snapshot. Returns the target that changed.
    pub fn redo(&mut self, targets: &mut impl EditTargets) -> Option<HistoryTarget> {
        let entry = self.redo_stack.pop()?;
        let target = entry.target();

        let Some(current) = targets.capture(target) else {
            warn!("Redo: target {:?} no longer exists, dropping entry", target);
            return None;
        };

        targets.restore(entry);
        self.undo_stack.push(current);
        Some(target)
    }

    /// Check if there are commands to undo
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are commands to redo
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the count of undoable commands
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the count of redoable commands
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
