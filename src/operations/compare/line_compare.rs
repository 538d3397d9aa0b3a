use geo::HausdorffDistance;
use serde::Serialize;
use tracing::debug;

use crate::corridor::Corridor;
use crate::error::Result;
use crate::geometry::PointSequence;
use crate::math::TOLERANCE;
use crate::operations::query::{CompareMode, DistanceStats};

/// Cheap structural comparison of a route against another line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasicComparison {
    /// Lengths agree within [`TOLERANCE`].
    pub same_length: bool,
    pub same_point_count: bool,
    /// First and last points are exactly equal.
    pub same_endpoints: bool,
}

/// Basic comparison plus index-wise vertex distances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedComparison {
    #[serde(flatten)]
    pub basic: BasicComparison,
    /// Distances between vertices with the same index, over the shorter
    /// of the two sequences.
    pub vertex_distances: DistanceStats,
    pub length_difference: f64,
    pub route_points: usize,
    pub line_points: usize,
}

/// Area-based comparison of the corridor against a buffer around the line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometricComparison {
    pub same_length: bool,
    pub same_point_count: bool,
    pub symmetric_difference_area: f64,
    pub intersection_area: f64,
    pub union_area: f64,
    /// Intersection over union; 0 when the union is empty.
    pub jaccard: f64,
    /// Hausdorff distance between the two centerlines.
    pub hausdorff: f64,
    pub corridor_contains_line: bool,
    pub line_buffer_contains_route: bool,
}

/// Result of [`CompareWithLine`], shaped by [`CompareMode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LineComparison {
    Basic(BasicComparison),
    Detailed(DetailedComparison),
    Geometric(GeometricComparison),
}

/// Compares a corridor's route with another polyline.
#[derive(Debug)]
pub struct CompareWithLine<'a> {
    corridor: &'a Corridor,
    line: &'a PointSequence,
}

impl<'a> CompareWithLine<'a> {
    #[must_use]
    pub fn new(corridor: &'a Corridor, line: &'a PointSequence) -> Self {
        Self { corridor, line }
    }

    /// Executes the comparison.
    ///
    /// # Errors
    ///
    /// Only the `geometric` mode can fail, when the line cannot be built
    /// into a corridor with this corridor's parameters.
    ///
    /// # Algorithm
    ///
    /// `geometric` builds the line into a region with the same width and
    /// resolution as this corridor, so identical lines produce identical
    /// regions (Jaccard 1, Hausdorff 0).
    pub fn execute(&self, mode: CompareMode) -> Result<LineComparison> {
        Ok(match mode {
            CompareMode::Basic => LineComparison::Basic(self.basic()),
            CompareMode::Detailed => LineComparison::Detailed(self.detailed()),
            CompareMode::Geometric => LineComparison::Geometric(self.geometric()?),
        })
    }

    fn length_difference(&self) -> f64 {
        (self.corridor.points().length() - self.line.length()).abs()
    }

    fn basic(&self) -> BasicComparison {
        let route = self.corridor.points();
        BasicComparison {
            same_length: self.length_difference() < TOLERANCE,
            same_point_count: route.len() == self.line.len(),
            same_endpoints: route.first() == self.line.first() && route.last() == self.line.last(),
        }
    }

    fn detailed(&self) -> DetailedComparison {
        let route = self.corridor.points();
        let distances = route
            .iter()
            .zip(self.line.iter())
            .map(|(a, b)| (a - b).norm());
        DetailedComparison {
            basic: self.basic(),
            vertex_distances: DistanceStats::of(distances),
            length_difference: self.length_difference(),
            route_points: route.len(),
            line_points: self.line.len(),
        }
    }

    fn geometric(&self) -> Result<GeometricComparison> {
        let other = Corridor::new(self.line.clone(), *self.corridor.params())?;
        let mine = self.corridor.region();
        let theirs = other.region();

        let intersection_area = mine.intersection(theirs).area();
        let union_area = mine.union(theirs).area();
        let jaccard = if union_area > 0.0 {
            intersection_area / union_area
        } else {
            0.0
        };
        let hausdorff = self
            .corridor
            .points()
            .to_line_string()
            .hausdorff_distance(&self.line.to_line_string());
        debug!(jaccard, hausdorff, "geometric line comparison");

        Ok(GeometricComparison {
            same_length: self.length_difference() < TOLERANCE,
            same_point_count: self.corridor.points().len() == self.line.len(),
            symmetric_difference_area: mine.symmetric_difference(theirs).area(),
            intersection_area,
            union_area,
            jaccard,
            hausdorff,
            corridor_contains_line: mine.contains_line(self.line),
            line_buffer_contains_route: theirs.contains_line(self.corridor.points()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::corridor::CorridorParams;
    use approx::assert_relative_eq;

    fn corridor() -> Corridor {
        Corridor::new(
            PointSequence::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 1.0)]).unwrap(),
            CorridorParams::new(0.2, 40).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn basic_identical_line() {
        let c = corridor();
        let line = c.points().clone();
        let LineComparison::Basic(b) = CompareWithLine::new(&c, &line)
            .execute(CompareMode::Basic)
            .unwrap()
        else {
            panic!("expected basic");
        };
        assert!(b.same_length && b.same_point_count && b.same_endpoints);
    }

    #[test]
    fn detailed_shifted_line() {
        let c = corridor();
        let line = PointSequence::from_xy(&[(0.0, 0.1), (1.0, 0.1)]).unwrap();
        let LineComparison::Detailed(d) = CompareWithLine::new(&c, &line)
            .execute(CompareMode::Detailed)
            .unwrap()
        else {
            panic!("expected detailed");
        };
        assert!(!d.basic.same_point_count);
        assert!(!d.basic.same_endpoints);
        assert_eq!(d.route_points, 3);
        assert_eq!(d.line_points, 2);
        assert_relative_eq!(d.vertex_distances.max.unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(d.vertex_distances.mean.unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(d.length_difference, 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn geometric_identical_line() {
        let c = corridor();
        let line = c.points().clone();
        let LineComparison::Geometric(g) = CompareWithLine::new(&c, &line)
            .execute(CompareMode::Geometric)
            .unwrap()
        else {
            panic!("expected geometric");
        };
        assert_relative_eq!(g.jaccard, 1.0, epsilon = 1e-9);
        assert!(g.hausdorff.abs() < 1e-12);
        assert!(g.symmetric_difference_area < 1e-9);
        assert!(g.corridor_contains_line);
        assert!(g.line_buffer_contains_route);
    }

    #[test]
    fn geometric_far_line_is_disjoint() {
        let c = corridor();
        let line = PointSequence::from_xy(&[(10.0, 10.0), (11.0, 10.0)]).unwrap();
        let LineComparison::Geometric(g) = CompareWithLine::new(&c, &line)
            .execute(CompareMode::Geometric)
            .unwrap()
        else {
            panic!("expected geometric");
        };
        assert!(g.intersection_area.abs() < 1e-12);
        assert!(g.jaccard.abs() < 1e-12);
        assert!(!g.corridor_contains_line);
        assert!(g.hausdorff > 10.0);
    }
}
