//! Exact circle clipping of paths and whole-ring removal.
//!
//! Both operations work in a local metric plane centered on the cursor, so
//! the eraser circle is `|p|² = r²`.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::geo::{distance_sq_point_to_segment, point_in_ring, Coordinate, LocalPlane, Path, Ring};

/// A shape the eraser refused to touch
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EraseFault {
    #[error("vertex {index} is not a finite coordinate")]
    NonFiniteVertex { index: usize },

    #[error("eraser cursor or radius is not finite")]
    InvalidCursor,
}

/// Crossings of segment `a`-`b` with the circle of radius² `r2` at the origin,
/// as ascending parameters strictly inside the segment.
///
/// Every root in the open interval is kept, however close to an endpoint, so
/// a chord through the circle is always cut.
fn circle_crossings(a: DVec2, b: DVec2, r2: f64) -> Vec<f64> {
    let d = b - a;
    let qa = d.length_squared();
    if qa <= f64::EPSILON {
        return Vec::new();
    }
    let qb = 2.0 * a.dot(d);
    let qc = a.length_squared() - r2;

    let discriminant = qb * qb - 4.0 * qa * qc;
    if discriminant <= 0.0 {
        return Vec::new();
    }

    let sqrt = discriminant.sqrt();
    [(-qb - sqrt) / (2.0 * qa), (-qb + sqrt) / (2.0 * qa)]
        .into_iter()
        .filter(|t| *t > 0.0 && *t < 1.0)
        .collect()
}

/// Accumulates surviving runs of a path into output pieces
#[derive(Default)]
struct PieceBuilder {
    pieces: Vec<Path>,
    current: Path,
}

impl PieceBuilder {
    fn start_with(&mut self, point: Coordinate) {
        if self.current.is_empty() {
            self.current.push(point);
        }
    }

    fn push(&mut self, point: Coordinate) {
        self.current.push(point);
    }

    fn flush(&mut self) {
        let current = std::mem::take(&mut self.current);
        if current.len() >= 2 {
            self.pieces.push(current);
        }
    }

    fn finish(mut self) -> Vec<Path> {
        self.flush();
        self.pieces
    }
}

fn check_finite(shape: &[Coordinate]) -> Result<(), EraseFault> {
    match shape.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(EraseFault::NonFiniteVertex { index }),
        None => Ok(()),
    }
}

fn check_cursor(cursor: Coordinate, radius: f64) -> Result<(), EraseFault> {
    if cursor.is_finite() && radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(EraseFault::InvalidCursor)
    }
}

/// Clip one path against the circle, returning the surviving pieces.
///
/// Paths with fewer than two points are returned unchanged.
pub fn erase_path(
    plane: &LocalPlane,
    radius: f64,
    path: &[Coordinate],
) -> Result<Vec<Path>, EraseFault> {
    if path.len() < 2 {
        return Ok(vec![path.to_vec()]);
    }
    check_finite(path)?;

    let r2 = radius * radius;
    let local: Vec<DVec2> = path.iter().map(|p| plane.project(*p)).collect();
    let mut builder = PieceBuilder::default();

    for i in 0..path.len() - 1 {
        let (ca, cb) = (path[i], path[i + 1]);
        let (a, b) = (local[i], local[i + 1]);
        // Endpoints stay exact; crossings come back from the plane so they sit on the circle
        let at = |t: f64| {
            if t <= 0.0 {
                ca
            } else if t >= 1.0 {
                cb
            } else {
                plane.unproject(a.lerp(b, t))
            }
        };
        let roots = circle_crossings(a, b, r2);

        if roots.is_empty() {
            let a_inside = a.length_squared() <= r2;
            let b_inside = b.length_squared() <= r2;
            match (a_inside, b_inside) {
                (false, false) => {
                    builder.start_with(ca);
                    builder.push(cb);
                }
                // Leaving the circle without a usable crossing: restart at the outside end
                (true, false) => {
                    builder.flush();
                    builder.push(cb);
                }
                (false, true) => {
                    builder.start_with(ca);
                    builder.flush();
                }
                (true, true) => builder.flush(),
            }
            continue;
        }

        let mut breaks = Vec::with_capacity(roots.len() + 2);
        breaks.push(0.0);
        breaks.extend(roots);
        breaks.push(1.0);

        for span in breaks.windows(2) {
            let (t0, t1) = (span[0], span[1]);
            let mid = a.lerp(b, (t0 + t1) * 0.5);
            if mid.length_squared() > r2 {
                builder.start_with(at(t0));
                builder.push(at(t1));
            } else {
                builder.flush();
            }
        }
    }

    Ok(builder.finish())
}

/// Whether the circle touches the ring anywhere (inside it or within `radius` of an edge).
///
/// Rings with fewer than three points are never touched.
pub fn ring_touched(
    plane: &LocalPlane,
    radius: f64,
    ring: &[Coordinate],
) -> Result<bool, EraseFault> {
    if ring.len() < 3 {
        return Ok(false);
    }
    check_finite(ring)?;

    if point_in_ring(plane.origin(), ring) {
        return Ok(true);
    }

    let r2 = radius * radius;
    let local: Vec<DVec2> = ring.iter().map(|p| plane.project(*p)).collect();
    let touched = (0..local.len()).any(|i| {
        let next = (i + 1) % local.len();
        distance_sq_point_to_segment(DVec2::ZERO, local[i], local[next]) <= r2
    });
    Ok(touched)
}

/// Erase the circle from every path. One path's fault keeps that path unchanged.
pub fn erase_from_paths(cursor: Coordinate, radius: f64, paths: &[Path]) -> Vec<Path> {
    if let Err(fault) = check_cursor(cursor, radius) {
        warn!("Eraser skipped: {}", fault);
        return paths.to_vec();
    }

    let plane = LocalPlane::new(cursor);
    let mut result = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        match erase_path(&plane, radius, path) {
            Ok(pieces) => result.extend(pieces),
            Err(fault) => {
                warn!("Eraser left path {} unchanged: {}", i, fault);
                result.push(path.clone());
            }
        }
    }
    result
}

/// Remove every ring the circle touches. Rings are never partially clipped.
pub fn erase_from_rings(cursor: Coordinate, radius: f64, rings: &[Ring]) -> Vec<Ring> {
    if let Err(fault) = check_cursor(cursor, radius) {
        warn!("Eraser skipped: {}", fault);
        return rings.to_vec();
    }

    let plane = LocalPlane::new(cursor);
    rings
        .iter()
        .enumerate()
        .filter(|(i, ring)| match ring_touched(&plane, radius, ring) {
            Ok(touched) => !touched,
            Err(fault) => {
                warn!("Eraser left ring {} unchanged: {}", i, fault);
                true
            }
        })
        .map(|(_, ring)| ring.clone())
        .collect()
}
