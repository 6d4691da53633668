//! The history-recording boundary every geometry mutation goes through.
//!
//! A commit snapshots the target into [`CommandHistory`], applies the edit,
//! and publishes a [`TerritoryUpdate`] for the persistence collaborator.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::geo::{Path, Ring};
use crate::territory::{
    EditTarget, ExtraAnnotations, GroupGeometry, TerritoryData, TerritoryUpdate,
};

use super::command_history::{CommandHistory, HistoryTarget, TerritoryTargets};

/// A mutation of one editing target
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    AppendPath(Path),
    AppendRing(Ring),
    ClearRings,
    ClearPaths,
    /// Replace a group's whole geometry (eraser commit)
    ReplaceGeometry(GroupGeometry),
    /// Replace the extra annotation buffer (eraser commit)
    ReplacePaths(Vec<Path>),
}

/// Build the persistence message describing the current state of `target`
pub fn update_for(
    target: HistoryTarget,
    territory: &TerritoryData,
    extra: &ExtraAnnotations,
) -> Option<TerritoryUpdate> {
    match target {
        HistoryTarget::Group(id) => TerritoryUpdate::geometry_of(territory, id),
        HistoryTarget::Extra => Some(TerritoryUpdate::extra_of(extra)),
    }
}

fn edit_applies_to(edit: &Edit, target: HistoryTarget) -> bool {
    match target {
        HistoryTarget::Group(_) => !matches!(edit, Edit::ReplacePaths(_)),
        HistoryTarget::Extra => matches!(edit, Edit::AppendPath(_) | Edit::ReplacePaths(_)),
    }
}

/// Record `target` in history, then apply `edit` to it.
///
/// Returns the update to publish, or `None` if the edit doesn't fit the
/// target (nothing is recorded in that case).
pub fn apply_edit(
    territory: &mut TerritoryData,
    extra: &mut ExtraAnnotations,
    history: &mut CommandHistory,
    target: HistoryTarget,
    edit: Edit,
) -> Option<TerritoryUpdate> {
    if !edit_applies_to(&edit, target) {
        warn!("Edit {:?} does not apply to {:?}", edit, target);
        return None;
    }

    {
        let targets = TerritoryTargets {
            territory: &mut *territory,
            extra: &mut *extra,
        };
        if !history.record(&targets, target) {
            return None;
        }
    }

    match target {
        HistoryTarget::Group(id) => {
            let group = territory.group_mut(id)?;
            let geometry = &mut group.geometry;
            match edit {
                Edit::AppendPath(path) => geometry.paths.push(path),
                Edit::AppendRing(ring) => geometry.rings.push(ring),
                Edit::ClearRings => geometry.rings.clear(),
                Edit::ClearPaths => geometry.paths.clear(),
                Edit::ReplaceGeometry(new_geometry) => *geometry = new_geometry,
                Edit::ReplacePaths(_) => {}
            }
        }
        HistoryTarget::Extra => match edit {
            Edit::AppendPath(path) => extra.paths.push(path),
            Edit::ReplacePaths(paths) => extra.paths = paths,
            _ => {}
        },
    }

    update_for(target, territory, extra)
}

/// Everything an editing system needs to commit, undo and redo.
///
/// Systems receive this at invocation time so they always see the current
/// selection and edit target.
#[derive(SystemParam)]
pub struct EditContext<'w> {
    pub territory: ResMut<'w, TerritoryData>,
    pub extra: ResMut<'w, ExtraAnnotations>,
    pub edit_target: Res<'w, EditTarget>,
    pub history: ResMut<'w, CommandHistory>,
    pub updates: MessageWriter<'w, TerritoryUpdate>,
}

impl EditContext<'_> {
    pub fn active_target(&self) -> Option<HistoryTarget> {
        HistoryTarget::active(*self.edit_target, &self.territory)
    }

    pub fn commit(&mut self, target: HistoryTarget, edit: Edit) -> bool {
        let update = apply_edit(
            &mut self.territory,
            &mut self.extra,
            &mut self.history,
            target,
            edit,
        );
        match update {
            Some(update) => {
                self.updates.write(update);
                true
            }
            None => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        let mut targets = TerritoryTargets {
            territory: &mut self.territory,
            extra: &mut self.extra,
        };
        let Some(target) = self.history.undo(&mut targets) else {
            return false;
        };
        self.publish(target);
        true
    }

    pub fn redo(&mut self) -> bool {
        let mut targets = TerritoryTargets {
            territory: &mut self.territory,
            extra: &mut self.extra,
        };
        let Some(target) = self.history.redo(&mut targets) else {
            return false;
        };
        self.publish(target);
        true
    }

    fn publish(&mut self, target: HistoryTarget) {
        if let Some(update) = update_for(target, &self.territory, &self.extra) {
            self.updates.write(update);
        }
    }
}
