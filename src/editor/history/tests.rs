//! Unit tests for the history module.

use bevy::prelude::*;

use crate::editor::eraser::{EraseSession, PendingErase};
use crate::editor::freehand::FreehandCapture;
use crate::geo::Coordinate;
use crate::territory::{ExtraAnnotations, GroupGeometry, GroupId, TerritoryData, TerritoryUpdate};

use super::command_history::{CommandHistory, HistoryTarget, TerritoryTargets};
use super::commit::{apply_edit, Edit};
use super::systems::{gesture_in_progress, shortcut_request, HistoryRequest};
use super::MAX_HISTORY_SIZE;

fn path(lat: f64) -> Vec<Coordinate> {
    vec![Coordinate::new(lat, 0.0), Coordinate::new(lat, 0.001)]
}

struct Fixture {
    territory: TerritoryData,
    extra: ExtraAnnotations,
    history: CommandHistory,
}

impl Fixture {
    fn new() -> Self {
        Self {
            territory: TerritoryData::default(),
            extra: ExtraAnnotations::default(),
            history: CommandHistory::default(),
        }
    }

    fn edit(&mut self, target: HistoryTarget, edit: Edit) -> Option<TerritoryUpdate> {
        apply_edit(
            &mut self.territory,
            &mut self.extra,
            &mut self.history,
            target,
            edit,
        )
    }

    fn undo(&mut self) -> Option<HistoryTarget> {
        let mut targets = TerritoryTargets {
            territory: &mut self.territory,
            extra: &mut self.extra,
        };
        self.history.undo(&mut targets)
    }

    fn redo(&mut self) -> Option<HistoryTarget> {
        let mut targets = TerritoryTargets {
            territory: &mut self.territory,
            extra: &mut self.extra,
        };
        self.history.redo(&mut targets)
    }

    fn geometry(&self, id: GroupId) -> GroupGeometry {
        self.territory
            .group(id)
            .map(|g| g.geometry.clone())
            .unwrap_or_default()
    }
}

const GROUP: HistoryTarget = HistoryTarget::Group(GroupId(1));

#[test]
fn test_history_round_trip() {
    let mut fx = Fixture::new();
    let before = fx.geometry(GroupId(1));

    fx.edit(GROUP, Edit::AppendPath(path(0.0)));
    let after = fx.geometry(GroupId(1));
    assert_ne!(before, after);

    assert_eq!(fx.undo(), Some(GROUP));
    assert_eq!(fx.geometry(GroupId(1)), before);

    assert_eq!(fx.redo(), Some(GROUP));
    assert_eq!(fx.geometry(GroupId(1)), after);
}

#[test]
fn test_new_edit_clears_redo() {
    let mut fx = Fixture::new();
    fx.edit(GROUP, Edit::AppendPath(path(0.0)));
    fx.edit(GROUP, Edit::AppendPath(path(1.0)));

    fx.undo();
    assert!(fx.history.can_redo());

    fx.edit(GROUP, Edit::AppendPath(path(2.0)));
    assert!(!fx.history.can_redo());
    assert_eq!(fx.redo(), None);
}

#[test]
fn test_empty_stacks_are_noops() {
    let mut fx = Fixture::new();
    assert_eq!(fx.undo(), None);
    assert_eq!(fx.redo(), None);
    assert_eq!(fx.geometry(GroupId(1)), GroupGeometry::default());
}

#[test]
fn test_command_history_max_size() {
    let mut fx = Fixture::new();
    for i in 0..150 {
        fx.edit(GROUP, Edit::AppendPath(path(i as f64)));
    }
    assert_eq!(fx.history.undo_count(), MAX_HISTORY_SIZE);

    // Oldest snapshots are dropped, so undo bottoms out with 50 paths left
    while fx.undo().is_some() {}
    assert_eq!(fx.geometry(GroupId(1)).paths.len(), 50);
}

#[test]
fn test_entries_restore_their_own_target() {
    let mut fx = Fixture::new();
    fx.edit(GROUP, Edit::AppendPath(path(0.0)));
    fx.edit(HistoryTarget::Extra, Edit::AppendPath(path(5.0)));

    // Most recent entry is the extra buffer, whatever the selection says
    assert_eq!(fx.undo(), Some(HistoryTarget::Extra));
    assert!(fx.extra.paths.is_empty());
    assert_eq!(fx.geometry(GroupId(1)).paths.len(), 1);

    assert_eq!(fx.undo(), Some(GROUP));
    assert!(fx.geometry(GroupId(1)).paths.is_empty());

    assert_eq!(fx.redo(), Some(GROUP));
    assert_eq!(fx.redo(), Some(HistoryTarget::Extra));
    assert_eq!(fx.extra.paths, vec![path(5.0)]);
}

#[test]
fn test_switching_group_keeps_entry_target() {
    let mut fx = Fixture::new();
    let second = fx.territory.add_group("Second", "#00FF00").unwrap();

    fx.edit(GROUP, Edit::AppendRing(vec![
        Coordinate::new(0.0, 0.0),
        Coordinate::new(0.0, 1.0),
        Coordinate::new(1.0, 1.0),
    ]));
    fx.territory.select(second);

    assert_eq!(fx.undo(), Some(GROUP));
    assert!(fx.geometry(GroupId(1)).rings.is_empty());
    assert_eq!(fx.geometry(second), GroupGeometry::default());
}

#[test]
fn test_missing_group_is_noop() {
    let mut fx = Fixture::new();
    assert!(fx.edit(HistoryTarget::Group(GroupId(9)), Edit::ClearRings).is_none());
    assert!(!fx.history.can_undo());

    fx.edit(GROUP, Edit::AppendPath(path(0.0)));
    fx.territory.groups.clear();
    assert_eq!(fx.undo(), None);
    assert!(!fx.history.can_redo());
}

#[test]
fn test_ring_edits_rejected_on_extra() {
    let mut fx = Fixture::new();
    assert!(fx.edit(HistoryTarget::Extra, Edit::ClearRings).is_none());
    assert!(fx.edit(HistoryTarget::Extra, Edit::AppendRing(path(0.0))).is_none());
    assert!(!fx.history.can_undo());
}

#[test]
fn test_apply_edit_reports_update() {
    let mut fx = Fixture::new();
    let update = fx.edit(GROUP, Edit::AppendPath(path(0.0)));
    assert_eq!(
        update,
        Some(TerritoryUpdate::Geometry {
            group_id: GroupId(1),
            rings: vec![],
            paths: vec![path(0.0)],
        })
    );

    let update = fx.edit(HistoryTarget::Extra, Edit::ReplacePaths(vec![path(3.0)]));
    assert_eq!(
        update,
        Some(TerritoryUpdate::ExtraPaths {
            paths: vec![path(3.0)]
        })
    );
}

#[test]
fn test_clear_edits() {
    let mut fx = Fixture::new();
    fx.edit(GROUP, Edit::AppendPath(path(0.0)));
    fx.edit(GROUP, Edit::AppendRing(path(1.0)));
    fx.edit(GROUP, Edit::ClearPaths);
    let geometry = fx.geometry(GroupId(1));
    assert!(geometry.paths.is_empty());
    assert_eq!(geometry.rings.len(), 1);

    fx.undo();
    assert_eq!(fx.geometry(GroupId(1)).paths.len(), 1);
}

#[test]
fn test_shortcut_decoding() {
    let mut keyboard = ButtonInput::<KeyCode>::default();
    keyboard.press(KeyCode::KeyZ);
    assert_eq!(shortcut_request(&keyboard), None);

    let mut keyboard = ButtonInput::<KeyCode>::default();
    keyboard.press(KeyCode::ControlLeft);
    keyboard.press(KeyCode::KeyZ);
    assert_eq!(shortcut_request(&keyboard), Some(HistoryRequest::Undo));

    let mut keyboard = ButtonInput::<KeyCode>::default();
    keyboard.press(KeyCode::ControlRight);
    keyboard.press(KeyCode::ShiftLeft);
    keyboard.press(KeyCode::KeyZ);
    assert_eq!(shortcut_request(&keyboard), Some(HistoryRequest::Redo));

    let mut keyboard = ButtonInput::<KeyCode>::default();
    keyboard.press(KeyCode::ControlLeft);
    keyboard.press(KeyCode::KeyY);
    assert_eq!(shortcut_request(&keyboard), Some(HistoryRequest::Redo));
}

#[test]
fn test_history_blocked_during_erase_gesture() {
    let territory = TerritoryData::default();
    let extra = ExtraAnnotations::default();
    let mut erase = EraseSession::default();
    let capture = FreehandCapture::default();
    assert!(!gesture_in_progress(&erase, &capture));

    let working = PendingErase::capture(HistoryTarget::Group(GroupId(1)), &territory, &extra)
        .expect("default group exists");
    erase.begin(working, Coordinate::new(0.0, 0.0));
    assert!(gesture_in_progress(&erase, &capture));

    erase.finish();
    assert!(!gesture_in_progress(&erase, &capture));
}

#[test]
fn test_history_blocked_while_freehand_captures() {
    let erase = EraseSession::default();
    let mut capture = FreehandCapture::default();

    assert!(capture.begin(Coordinate::new(0.0, 0.0)));
    assert!(gesture_in_progress(&erase, &capture));

    capture.extend(Coordinate::new(0.0, 0.001));
    assert!(capture.finish().is_some());
    assert!(!gesture_in_progress(&erase, &capture));

    // A stroke waiting on the router only appends, so history stays usable
    capture.start_snapping();
    assert!(!gesture_in_progress(&erase, &capture));
}
