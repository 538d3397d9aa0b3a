use super::{Point2, Vector2, TOLERANCE};
use crate::error::{CorridorError, Result};

/// Unit vector pointing from `a` to `b`.
///
/// # Errors
///
/// Returns `CorridorError::GeometryDegenerate` if `a` and `b` coincide
/// within [`TOLERANCE`].
pub fn segment_direction(a: &Point2, b: &Point2) -> Result<Vector2> {
    (b - a).try_normalize(TOLERANCE).ok_or_else(|| {
        CorridorError::GeometryDegenerate(format!("zero-length segment at ({}, {})", a.x, a.y))
    })
}

/// Returns the left-pointing normal of a direction vector, `(-dy, dx)`.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Vertices of a regular `segments`-gon inscribed in the circle of
/// `radius` around `center`, counter-clockwise, starting on the +X axis.
#[must_use]
pub fn regular_polygon(center: &Point2, radius: f64, segments: u32) -> Vec<Point2> {
    let step = std::f64::consts::TAU / f64::from(segments);
    (0..segments)
        .map(|k| {
            let a = step * f64::from(k);
            Point2::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

/// Removes consecutive duplicate vertices of a closed ring, including a
/// repeated closing vertex.
#[must_use]
pub fn dedup_ring(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_none_or(|last| (p - last).norm() > TOLERANCE) {
            out.push(*p);
        }
    }
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() <= TOLERANCE {
        out.pop();
    }
    out
}
