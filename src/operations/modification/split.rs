use crate::error::{CorridorError, Result};
use crate::geometry::PointSequence;
use crate::math::distance_2d::project_onto_segment;
use crate::math::Point2;

/// Result of splitting a route at a vertex.
#[derive(Debug, Clone)]
pub struct RouteSplit {
    /// Vertices from the start up to and including the split vertex.
    pub head: PointSequence,
    /// Vertices from the split vertex to the end.
    pub tail: PointSequence,
    /// Index of the split vertex in the original route.
    pub vertex_index: usize,
    /// Normalized arc-length position `[0, 1]` of the projected query point.
    pub parameter: f64,
}

/// Splits a route at the vertex nearest to the projection of a query point.
///
/// The query point is projected onto the closest centerline segment; the
/// split happens at whichever endpoint of that segment is nearer to the
/// projection. The split vertex belongs to both halves, so each half is a
/// valid non-empty route.
#[derive(Debug)]
pub struct SplitAtPoint<'a> {
    points: &'a PointSequence,
    at: Point2,
}

impl<'a> SplitAtPoint<'a> {
    /// Creates a new split operation.
    #[must_use]
    pub fn new(points: &'a PointSequence, at: Point2) -> Self {
        Self { points, at }
    }

    /// Executes the split.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if the query point is not finite.
    pub fn execute(&self) -> Result<RouteSplit> {
        if !self.at.x.is_finite() || !self.at.y.is_finite() {
            return Err(CorridorError::invalid("split point must be finite"));
        }

        let pts = self.points.points();
        if pts.len() == 1 {
            return Ok(RouteSplit {
                head: self.points.clone(),
                tail: self.points.clone(),
                vertex_index: 0,
                parameter: 0.0,
            });
        }

        // Closest segment; ties keep the earliest one.
        let mut best_seg = 0;
        let mut best = project_onto_segment(&self.at, &pts[0], &pts[1]);
        for (i, w) in pts.windows(2).enumerate().skip(1) {
            let proj = project_onto_segment(&self.at, &w[0], &w[1]);
            if proj.distance < best.distance {
                best = proj;
                best_seg = i;
            }
        }

        let vertex_index = if best.t <= 0.5 { best_seg } else { best_seg + 1 };

        let cumulative = self.points.cumulative_lengths();
        let total = cumulative[cumulative.len() - 1];
        let parameter = if total > 0.0 {
            let seg_len = cumulative[best_seg + 1] - cumulative[best_seg];
            (cumulative[best_seg] + best.t * seg_len) / total
        } else {
            0.0
        };

        Ok(RouteSplit {
            head: PointSequence::new(pts[..=vertex_index].to_vec())?,
            tail: PointSequence::new(pts[vertex_index..].to_vec())?,
            vertex_index,
            parameter,
        })
    }
}
