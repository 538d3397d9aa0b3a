use geo::Simplify;

use crate::error::{CorridorError, Result};
use crate::geometry::PointSequence;

/// Ramer–Douglas–Peucker reduction of a route's vertices.
///
/// Endpoints are always kept. A tolerance of zero returns the route
/// unchanged, collinear vertices included.
#[derive(Debug)]
pub struct SimplifyRoute<'a> {
    points: &'a PointSequence,
    tolerance: f64,
}

impl<'a> SimplifyRoute<'a> {
    /// Creates a new simplification operation.
    #[must_use]
    pub fn new(points: &'a PointSequence, tolerance: f64) -> Self {
        Self { points, tolerance }
    }

    /// Executes the simplification.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if the tolerance is negative or
    /// not finite.
    pub fn execute(&self) -> Result<PointSequence> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(CorridorError::InvalidInput(format!(
                "simplification tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        if self.points.len() < 3 || self.tolerance <= 0.0 {
            return Ok(self.points.clone());
        }
        let simplified = self.points.to_line_string().simplify(&self.tolerance);
        PointSequence::try_from(&simplified)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn removes_near_collinear_vertex() {
        let route = PointSequence::from_xy(&[(0.0, 0.0), (1.0, 0.01), (2.0, 0.0)]).unwrap();
        let out = SimplifyRoute::new(&route, 0.1).execute().unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.first(), route.first());
        assert_eq!(out.last(), route.last());
    }

    #[test]
    fn keeps_real_corner() {
        let route = PointSequence::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        let out = SimplifyRoute::new(&route, 0.1).execute().unwrap();
        assert_eq!(out, route);
    }

    #[test]
    fn zero_tolerance_keeps_every_vertex() {
        let route =
            PointSequence::from_xy(&[(0.0, 0.0), (0.5, 0.0), (1.0, 0.0), (1.0, 2.0), (3.0, 2.5)])
                .unwrap();
        let out = SimplifyRoute::new(&route, 0.0).execute().unwrap();
        assert_eq!(out.len(), route.len());
        assert_eq!(out, route);
        assert!((out.length() - route.length()).abs() < 1e-12);
    }

    #[test]
    fn short_routes_unchanged() {
        let route = PointSequence::from_xy(&[(0.0, 0.0), (1.0, 0.0)]).unwrap();
        assert_eq!(SimplifyRoute::new(&route, 5.0).execute().unwrap(), route);
    }

    #[test]
    fn negative_tolerance_rejected() {
        let route = PointSequence::from_xy(&[(0.0, 0.0)]).unwrap();
        assert!(SimplifyRoute::new(&route, -1.0).execute().is_err());
    }
}
