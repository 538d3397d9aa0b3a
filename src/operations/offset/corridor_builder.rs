use tracing::trace;

use crate::error::{CorridorError, Result};
use crate::geometry::{PointSequence, Region};
use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::Point2;

/// Buffers a route into a raw corridor region.
///
/// # Algorithm
///
/// 1. A disk of radius `width` around every route point (round joins and caps)
/// 2. For each non-degenerate segment `p1 → p2`, a slab with corners
///    `p1 ± width·n` and `p2 ± width·n`, where `n` is the unit left normal
/// 3. Kernel union of every disk and slab
///
/// A single-point route short-circuits to its disk. Zero-length segments
/// contribute no slab. The result may be a multi-polygon or carry holes when
/// the route loops back onto itself.
#[derive(Debug)]
pub struct CorridorBuilder<'a> {
    points: &'a PointSequence,
    width: f64,
}

impl<'a> CorridorBuilder<'a> {
    /// Creates a new corridor build operation.
    #[must_use]
    pub fn new(points: &'a PointSequence, width: f64) -> Self {
        Self { points, width }
    }

    /// Executes the build, returning the unsmoothed region.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if `width` is not a positive
    /// finite number.
    pub fn execute(&self) -> Result<Region> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(CorridorError::InvalidInput(format!(
                "buffer width must be positive and finite, got {}",
                self.width
            )));
        }

        let pts = self.points.points();
        if pts.len() == 1 {
            return Ok(Region::disk(&pts[0], self.width));
        }

        let mut parts: Vec<Region> = pts.iter().map(|p| Region::disk(p, self.width)).collect();
        parts.extend(pts.windows(2).filter_map(|w| segment_slab(&w[0], &w[1], self.width)));

        trace!(
            points = pts.len(),
            shapes = parts.len(),
            "unioning corridor disks and slabs"
        );
        Ok(Region::union_all(parts))
    }
}

/// The straight slab covering `p1 → p2` at half-width `width`, or `None`
/// for a zero-length segment.
fn segment_slab(p1: &Point2, p2: &Point2, width: f64) -> Option<Region> {
    let normal = left_normal(segment_direction(p1, p2).ok()?) * width;
    let corners = [p1 + normal, p2 + normal, p2 - normal, p1 - normal];
    Region::from_vertices(&corners).ok()
}
