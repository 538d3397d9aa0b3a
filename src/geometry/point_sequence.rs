use std::collections::HashSet;
use std::ops::Index;

use geo::LineString;

use crate::error::{CorridorError, Result};
use crate::math::distance_2d::polyline_length;
use crate::math::{to_coord, Point2};

/// Exact-coordinate key for set semantics over points.
///
/// `-0.0` and `0.0` map to the same key so that hashing agrees with `==`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey(u64, u64);

impl PointKey {
    #[must_use]
    pub fn of(p: &Point2) -> Self {
        Self(canonical_bits(p.x), canonical_bits(p.y))
    }
}

fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0_f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// An ordered, non-empty route of finite 2D points.
///
/// The order is the route direction. Duplicates are allowed. Sequences are
/// never mutated in place; every derived operation returns a new sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSequence {
    points: Vec<Point2>,
}

impl PointSequence {
    /// Creates a sequence from points in route order.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if `points` is empty or any
    /// coordinate is NaN or infinite.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.is_empty() {
            return Err(CorridorError::invalid("a route needs at least 1 point"));
        }
        if let Some((i, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(CorridorError::InvalidInput(format!(
                "point {i} has non-finite coordinates ({}, {})",
                p.x, p.y
            )));
        }
        Ok(Self { points })
    }

    /// Creates a sequence from `(x, y)` tuples.
    ///
    /// # Errors
    ///
    /// Same as [`PointSequence::new`].
    pub fn from_xy(coords: &[(f64, f64)]) -> Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Point2 {
        self.points[0]
    }

    #[must_use]
    pub fn last(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2> {
        self.points.iter()
    }

    /// Length of the centerline through the points.
    #[must_use]
    pub fn length(&self) -> f64 {
        polyline_length(&self.points)
    }

    /// Cumulative arc length at each vertex; starts at 0.
    #[must_use]
    pub fn cumulative_lengths(&self) -> Vec<f64> {
        let mut acc = 0.0;
        let mut out = Vec::with_capacity(self.points.len());
        out.push(0.0);
        for w in self.points.windows(2) {
            acc += (w[1] - w[0]).norm();
            out.push(acc);
        }
        out
    }

    /// Returns the same points in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Set of exact coordinates in this sequence.
    #[must_use]
    pub fn key_set(&self) -> HashSet<PointKey> {
        self.points.iter().map(PointKey::of).collect()
    }

    /// Whether `p` occurs in the sequence with exactly equal coordinates.
    #[must_use]
    pub fn contains_exact(&self, p: &Point2) -> bool {
        let key = PointKey::of(p);
        self.points.iter().any(|q| PointKey::of(q) == key)
    }

    /// The centerline as a kernel line string.
    #[must_use]
    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::new(self.points.iter().map(to_coord).collect())
    }
}

impl Index<usize> for PointSequence {
    type Output = Point2;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a PointSequence {
    type Item = &'a Point2;
    type IntoIter = std::slice::Iter<'a, Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl TryFrom<Vec<Point2>> for PointSequence {
    type Error = CorridorError;

    fn try_from(points: Vec<Point2>) -> Result<Self> {
        Self::new(points)
    }
}

impl TryFrom<&LineString<f64>> for PointSequence {
    type Error = CorridorError;

    fn try_from(line: &LineString<f64>) -> Result<Self> {
        Self::new(line.coords().map(|c| Point2::new(c.x, c.y)).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            PointSequence::new(vec![]),
            Err(CorridorError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_non_finite() {
        let err = PointSequence::from_xy(&[(0.0, 0.0), (f64::NAN, 1.0)]).unwrap_err();
        assert!(err.to_string().contains("point 1"), "{err}");
        assert!(PointSequence::from_xy(&[(f64::INFINITY, 0.0)]).is_err());
    }

    #[test]
    fn keeps_duplicates_and_order() {
        let seq = PointSequence::from_xy(&[(1.0, 1.0), (0.0, 0.0), (1.0, 1.0)]).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq[0], Point2::new(1.0, 1.0));
        assert_eq!(seq.last(), Point2::new(1.0, 1.0));
        assert_eq!(seq.key_set().len(), 2);
    }

    #[test]
    fn length_and_cumulative() {
        let seq = PointSequence::from_xy(&[(0.0, 0.0), (3.0, 4.0), (3.0, 5.0)]).unwrap();
        assert!((seq.length() - 6.0).abs() < 1e-12);
        assert_eq!(seq.cumulative_lengths(), vec![0.0, 5.0, 6.0]);
    }

    #[test]
    fn signed_zero_is_same_key() {
        assert_eq!(
            PointKey::of(&Point2::new(0.0, -0.0)),
            PointKey::of(&Point2::new(-0.0, 0.0))
        );
    }

    #[test]
    fn reversed_and_line_string() {
        let seq = PointSequence::from_xy(&[(0.0, 0.0), (1.0, 0.0)]).unwrap();
        let rev = seq.reversed();
        assert_eq!(rev.first(), Point2::new(1.0, 0.0));
        let line = seq.to_line_string();
        assert_eq!(line.0.len(), 2);
        let back = PointSequence::try_from(&line).unwrap();
        assert_eq!(back, seq);
    }
}
