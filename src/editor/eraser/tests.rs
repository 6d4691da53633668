//! Unit tests for the eraser module.

use crate::constants::{MAX_ERASE_RADIUS_M, METERS_PER_DEGREE_LAT, MIN_ERASE_RADIUS_M};
use crate::editor::history::HistoryTarget;
use crate::geo::{Coordinate, LocalPlane, Path, Ring};
use crate::territory::{ExtraAnnotations, GroupGeometry, GroupId, TerritoryData};

use super::clip::{erase_from_paths, erase_from_rings};
use super::session::{EraseSession, PendingErase};
use super::stroke::stroke_positions;
use super::systems::has_changes;

fn c(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng)
}

fn square(lat: f64, lng: f64, size: f64) -> Ring {
    vec![
        c(lat, lng),
        c(lat, lng + size),
        c(lat + size, lng + size),
        c(lat + size, lng),
    ]
}

#[test]
fn test_far_erase_is_noop() {
    let paths: Vec<Path> = vec![vec![c(0.0, 0.0), c(0.0, 0.01), c(0.01, 0.01)]];
    let rings = vec![square(0.0, 0.0, 0.01)];
    let cursor = c(1.0, 1.0);

    assert_eq!(erase_from_paths(cursor, 150.0, &paths), paths);
    assert_eq!(erase_from_rings(cursor, 150.0, &rings), rings);
}

#[test]
fn test_contained_path_is_removed() {
    let paths = vec![vec![c(0.0, 0.0), c(0.0, 0.0001), c(0.0001, 0.0001)]];
    assert!(erase_from_paths(c(0.0, 0.0), 150.0, &paths).is_empty());
}

#[test]
fn test_split_scenario() {
    let paths = vec![vec![c(0.0, 0.0), c(0.0, 0.002), c(0.0, 0.004)]];
    let cursor = c(0.0, 0.002);
    let radius = 150.0;

    let result = erase_from_paths(cursor, radius, &paths);
    assert_eq!(result.len(), 2);

    let offset = radius / METERS_PER_DEGREE_LAT;
    let left = &result[0];
    let right = &result[1];
    assert_eq!(left.len(), 2);
    assert_eq!(right.len(), 2);

    assert_eq!(left[0], c(0.0, 0.0));
    assert!((left[1].lng - (0.002 - offset)).abs() < 1e-9);
    assert!((right[0].lng - (0.002 + offset)).abs() < 1e-9);
    assert!((right[1].lng - 0.004).abs() < 1e-12);

    // Cut points sit on the circle
    for point in [left[1], right[0]] {
        let distance = LocalPlane::new(cursor).project(point).length();
        assert!((distance - radius).abs() < 1e-6, "distance {}", distance);
    }
}

#[test]
fn test_chord_through_circle_splits_single_segment() {
    let paths = vec![vec![c(0.0, -0.01), c(0.0, 0.01)]];
    let result = erase_from_paths(c(0.0, 0.0), 100.0, &paths);
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|p| p.len() == 2));
}

#[test]
fn test_chord_with_endpoints_just_outside_is_cut() {
    let radius = 150.0;
    let reach = (radius + 0.2) / METERS_PER_DEGREE_LAT;
    let cursor = c(0.0, 0.0);
    let paths = vec![vec![c(0.0, -reach), c(0.0, reach)]];

    let result = erase_from_paths(cursor, radius, &paths);
    assert_eq!(result.len(), 2);

    // Nothing that survives may pass through the circle
    let plane = LocalPlane::new(cursor);
    for piece in &result {
        assert!(piece.len() >= 2);
        for edge in piece.windows(2) {
            let mid = edge[0].lerp(edge[1], 0.5);
            let distance = plane.project(mid).length();
            assert!(distance >= radius - 1e-6, "midpoint {} m from cursor", distance);
        }
    }
    assert_eq!(result[0][0], c(0.0, -reach));
    assert_eq!(result[1][1], c(0.0, reach));
}

#[test]
fn test_wide_radius_consumes_short_path() {
    let paths = vec![vec![c(0.0, 0.0), c(0.0, 0.002), c(0.0, 0.004)]];
    assert!(erase_from_paths(c(0.0, 0.002), 300.0, &paths).is_empty());
}

#[test]
fn test_path_starting_inside_keeps_outside_tail() {
    let paths = vec![vec![c(0.0, 0.0), c(0.0, 0.005)]];
    let result = erase_from_paths(c(0.0, 0.0), 150.0, &paths);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].len(), 2);
    assert!((result[0][0].lng - 150.0 / METERS_PER_DEGREE_LAT).abs() < 1e-9);
    assert_eq!(result[0][1], c(0.0, 0.005));
}

#[test]
fn test_pieces_never_shorter_than_two_points() {
    let paths = vec![vec![
        c(0.0, 0.0),
        c(0.0005, 0.0005),
        c(0.0, 0.001),
        c(0.0005, 0.0015),
        c(0.0, 0.002),
    ]];
    for lng in [0.0, 0.0005, 0.001, 0.0015, 0.002] {
        for piece in erase_from_paths(c(0.0, lng), 40.0, &paths) {
            assert!(piece.len() >= 2);
        }
    }
}

#[test]
fn test_ring_touched_at_one_vertex_is_removed() {
    let ring = vec![c(0.0, 0.0), c(0.0, 0.01), c(0.01, 0.01), c(0.01, 0.0)];
    // Cursor just outside the corner; the circle covers the vertex only
    let rings = erase_from_rings(c(-0.0005, -0.0005), 100.0, &[ring.clone()]);
    assert!(rings.is_empty());

    let rings = erase_from_rings(c(-0.01, -0.01), 100.0, &[ring.clone()]);
    assert_eq!(rings, vec![ring]);
}

#[test]
fn test_ring_removed_when_cursor_inside() {
    let ring = square(0.0, 0.0, 0.1);
    assert!(erase_from_rings(c(0.05, 0.05), 5.0, &[ring]).is_empty());
}

#[test]
fn test_ring_closing_edge_counts() {
    // Closing edge runs from (0.01, 0) back to (0, 0) along lng = 0
    let ring = vec![c(0.0, 0.0), c(0.0, 0.01), c(0.01, 0.01), c(0.01, 0.0)];
    let cursor = c(0.005, -0.0005);
    assert!(erase_from_rings(cursor, 100.0, &[ring]).is_empty());
}

#[test]
fn test_degenerate_shapes_pass_through() {
    let paths = vec![vec![c(0.0, 0.0)], vec![]];
    assert_eq!(erase_from_paths(c(0.0, 0.0), 150.0, &paths), paths);

    let rings = vec![vec![c(0.0, 0.0), c(0.0, 0.0001)]];
    assert_eq!(erase_from_rings(c(0.0, 0.0), 150.0, &rings), rings);
}

#[test]
fn test_faulty_shape_kept_and_batch_continues() {
    let broken = vec![c(0.0, 0.0), c(f64::NAN, 0.001)];
    let erasable = vec![c(0.0, 0.0), c(0.0, 0.0001)];
    let result = erase_from_paths(c(0.0, 0.0), 150.0, &[broken.clone(), erasable]);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0][0], broken[0]);
    assert!(result[0][1].lat.is_nan());

    let broken_ring = vec![c(0.0, 0.0), c(0.0, f64::INFINITY), c(0.001, 0.0)];
    let result = erase_from_rings(c(0.0, 0.0), 150.0, &[broken_ring, square(0.0, 0.0, 0.001)]);
    assert_eq!(result.len(), 1);
}

#[test]
fn test_invalid_cursor_changes_nothing() {
    let paths = vec![vec![c(0.0, 0.0), c(0.0, 0.001)]];
    assert_eq!(erase_from_paths(c(f64::NAN, 0.0), 150.0, &paths), paths);
    assert_eq!(erase_from_paths(c(0.0, 0.0), f64::NAN, &paths), paths);
}

#[test]
fn test_stroke_interpolation_spacing() {
    let start = c(0.0, 0.0);
    let end = c(0.0, 0.01); // ~1112 m
    let positions = stroke_positions(Some(start), end, 100.0);

    // 25 m spacing
    assert_eq!(positions.len(), 45);
    assert_eq!(positions.last(), Some(&end));
    let first = positions[0];
    assert!((first.lng - 0.01 / 45.0).abs() < 1e-12);
}

#[test]
fn test_stroke_short_move_and_first_point() {
    let start = c(0.0, 0.0);
    let near = c(0.0, 0.0001);
    assert_eq!(stroke_positions(Some(start), near, 150.0), vec![near]);
    assert_eq!(stroke_positions(None, near, 150.0), vec![near]);
}

#[test]
fn test_fast_drag_leaves_no_gap() {
    let mut session = EraseSession::default();
    session.set_radius(50.0);
    let paths = vec![vec![c(0.001, 0.0), c(0.001, 0.01)], vec![c(-0.001, 0.005), c(0.003, 0.005)]];
    session.begin(PendingErase::Extra { paths }, c(0.001, 0.0));
    // One jump along the first path covers all of it
    session.stroke_to(c(0.001, 0.01));

    let Some(PendingErase::Extra { paths }) = session.finish() else {
        panic!("expected an extra working copy");
    };
    // The crossing path is cut in two around lat 0.001
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|p| p.iter().all(|pt| pt.lng == 0.005)));
}

#[test]
fn test_finish_is_idempotent() {
    let mut session = EraseSession::default();
    assert!(session.finish().is_none());

    session.begin(PendingErase::Extra { paths: vec![] }, c(0.0, 0.0));
    assert!(session.is_active());
    assert!(session.finish().is_some());
    assert!(session.finish().is_none());
    assert!(!session.is_active());
}

#[test]
fn test_abandon_drops_working_copy() {
    let mut session = EraseSession::default();
    session.begin(PendingErase::Extra { paths: vec![] }, c(0.0, 0.0));
    session.abandon();
    assert!(session.finish().is_none());
}

#[test]
fn test_radius_is_clamped() {
    let mut session = EraseSession::default();
    assert_eq!(session.radius(), 150.0);
    session.step_radius(1);
    assert_eq!(session.radius(), 155.0);
    session.step_radius(-1000);
    assert_eq!(session.radius(), MIN_ERASE_RADIUS_M);
    session.set_radius(10_000.0);
    assert_eq!(session.radius(), MAX_ERASE_RADIUS_M);
}

#[test]
fn test_working_copy_leaves_committed_state_alone() {
    let mut territory = TerritoryData::default();
    let extra = ExtraAnnotations::default();
    if let Some(group) = territory.group_mut(GroupId(1)) {
        group.geometry = GroupGeometry {
            rings: vec![square(0.0, 0.0, 0.001)],
            paths: vec![vec![c(0.0, 0.0), c(0.0, 0.01)]],
        };
    }
    let committed = territory.group(GroupId(1)).map(|g| g.geometry.clone());

    let working = PendingErase::capture(HistoryTarget::Group(GroupId(1)), &territory, &extra);
    let Some(working) = working else {
        panic!("group exists");
    };
    assert!(!has_changes(&working, &territory, &extra));

    let mut session = EraseSession::default();
    session.begin(working, c(0.0, 0.0));
    assert_eq!(territory.group(GroupId(1)).map(|g| g.geometry.clone()), committed);

    let Some(pending) = session.finish() else {
        panic!("gesture was active");
    };
    assert!(has_changes(&pending, &territory, &extra));
    let PendingErase::Group { geometry, .. } = pending else {
        panic!("expected group working copy");
    };
    assert!(geometry.rings.is_empty());
    assert_eq!(geometry.paths.len(), 1);
}
