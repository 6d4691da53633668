use crate::constants::ERASE_STROKE_SPACING;
use crate::geo::{haversine_distance, Coordinate};

/// Upper bound on synthesized positions for a single pointer move
const MAX_STROKE_STEPS: usize = 1024;

/// Cursor positions to erase at when the pointer moves from `last` to `current`.
///
/// Moves longer than a quarter of the radius are filled in with evenly spaced
/// intermediate positions. The result always ends with `current`.
pub fn stroke_positions(last: Option<Coordinate>, current: Coordinate, radius: f64) -> Vec<Coordinate> {
    let Some(last) = last else {
        return vec![current];
    };

    let spacing = radius * ERASE_STROKE_SPACING;
    let distance = haversine_distance(last, current);
    if spacing.is_nan() || spacing <= 0.0 || !distance.is_finite() || distance <= spacing {
        return vec![current];
    }

    let steps = ((distance / spacing).ceil() as usize).clamp(1, MAX_STROKE_STEPS);
    let mut positions: Vec<Coordinate> = (1..steps)
        .map(|i| last.lerp(current, i as f64 / steps as f64))
        .collect();
    positions.push(current);
    positions
}
