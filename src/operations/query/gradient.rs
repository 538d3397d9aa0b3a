use crate::geometry::PointSequence;

/// Per-segment slope `dy/dx` of a route.
///
/// Vertical segments (`dx == 0`) give `+∞` when `dy > 0` and `-∞`
/// otherwise, which includes zero-length segments.
#[derive(Debug)]
pub struct Gradient<'a> {
    points: &'a PointSequence,
}

impl<'a> Gradient<'a> {
    #[must_use]
    pub fn new(points: &'a PointSequence) -> Self {
        Self { points }
    }

    /// Executes the query; one value per segment.
    #[must_use]
    pub fn execute(&self) -> Vec<f64> {
        self.points
            .points()
            .windows(2)
            .map(|w| {
                let dx = w[1].x - w[0].x;
                let dy = w[1].y - w[0].y;
                if dx == 0.0 {
                    if dy > 0.0 {
                        f64::INFINITY
                    } else {
                        f64::NEG_INFINITY
                    }
                } else {
                    dy / dx
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn slopes_and_verticals() {
        let route =
            PointSequence::from_xy(&[(0.0, 0.0), (2.0, 1.0), (2.0, 3.0), (2.0, 2.0), (4.0, 2.0)])
                .unwrap();
        let g = Gradient::new(&route).execute();
        assert_eq!(g.len(), 4);
        assert!((g[0] - 0.5).abs() < 1e-12);
        assert_eq!(g[1], f64::INFINITY);
        assert_eq!(g[2], f64::NEG_INFINITY);
        assert!(g[3].abs() < 1e-12);
    }

    #[test]
    fn single_point_has_no_segments() {
        let route = PointSequence::from_xy(&[(1.0, 1.0)]).unwrap();
        assert!(Gradient::new(&route).execute().is_empty());
    }
}
