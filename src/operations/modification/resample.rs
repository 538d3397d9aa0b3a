use crate::error::{CorridorError, Result};
use crate::geometry::PointSequence;
use crate::math::Point2;

/// Resamples a route at evenly spaced arc-length positions.
///
/// Produces exactly `count` points. With `count >= 2` the first and last
/// samples are the route's endpoints; `count == 1` yields the start point.
#[derive(Debug)]
pub struct Resample<'a> {
    points: &'a PointSequence,
    count: usize,
}

impl<'a> Resample<'a> {
    /// Creates a new resampling operation.
    #[must_use]
    pub fn new(points: &'a PointSequence, count: usize) -> Self {
        Self { points, count }
    }

    /// Executes the resampling.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if `count` is zero.
    pub fn execute(&self) -> Result<PointSequence> {
        if self.count == 0 {
            return Err(CorridorError::invalid("cannot resample a route to 0 points"));
        }

        let pts = self.points.points();
        let cumulative = self.points.cumulative_lengths();
        let total = cumulative[cumulative.len() - 1];

        if self.count == 1 || total <= 0.0 {
            return PointSequence::new(vec![pts[0]; self.count]);
        }

        #[allow(clippy::cast_precision_loss)]
        let step = total / (self.count - 1) as f64;
        let mut out = Vec::with_capacity(self.count);
        let mut seg = 0;
        for k in 0..self.count - 1 {
            #[allow(clippy::cast_precision_loss)]
            let target = step * k as f64;
            while seg + 2 < cumulative.len() && cumulative[seg + 1] < target {
                seg += 1;
            }
            out.push(point_at(pts, &cumulative, seg, target));
        }
        out.push(pts[pts.len() - 1]);

        PointSequence::new(out)
    }
}

fn point_at(pts: &[Point2], cumulative: &[f64], seg: usize, target: f64) -> Point2 {
    let seg_len = cumulative[seg + 1] - cumulative[seg];
    if seg_len <= 0.0 {
        return pts[seg];
    }
    let t = ((target - cumulative[seg]) / seg_len).clamp(0.0, 1.0);
    pts[seg] + (pts[seg + 1] - pts[seg]) * t
}
