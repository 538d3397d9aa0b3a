use serde::Serialize;

use crate::corridor::Corridor;
use crate::error::{CorridorError, Result};
use crate::math::Point2;

use super::mode::PointSetMode;

/// One point's entry in a distance-ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedPoint {
    pub index: usize,
    pub contained: bool,
    pub distance: f64,
}

/// Detailed answer for a point list against one corridor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSetDetails {
    pub total_points: usize,
    pub contained_points: Vec<usize>,
    pub contained_count: usize,
    pub all_contained: bool,
    pub any_contained: bool,
    pub distances: Vec<f64>,
    /// Every point, ordered by ascending boundary distance.
    pub by_distance: Vec<RankedPoint>,
}

/// Result of [`CheckPoints`], shaped by [`PointSetMode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PointSetResult {
    Contains(Vec<bool>),
    Any(bool),
    All(bool),
    Count(usize),
    Which(Vec<usize>),
    Details(PointSetDetails),
}

/// Checks a list of points against one corridor.
#[derive(Debug)]
pub struct CheckPoints<'a> {
    corridor: &'a Corridor,
    points: &'a [Point2],
}

impl<'a> CheckPoints<'a> {
    #[must_use]
    pub fn new(corridor: &'a Corridor, points: &'a [Point2]) -> Self {
        Self { corridor, points }
    }

    /// Executes the check.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if any point is not finite.
    pub fn execute(&self, mode: PointSetMode) -> Result<PointSetResult> {
        if let Some(i) = self
            .points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(CorridorError::InvalidInput(format!(
                "point {i} has non-finite coordinates"
            )));
        }

        let flags: Vec<bool> = self.points.iter().map(|p| self.corridor.contains(p)).collect();
        let which = || -> Vec<usize> {
            flags
                .iter()
                .enumerate()
                .filter_map(|(i, &f)| f.then_some(i))
                .collect()
        };

        Ok(match mode {
            PointSetMode::Contains => PointSetResult::Contains(flags.clone()),
            PointSetMode::Any => PointSetResult::Any(flags.iter().any(|&f| f)),
            PointSetMode::All => PointSetResult::All(flags.iter().all(|&f| f)),
            PointSetMode::Count => PointSetResult::Count(flags.iter().filter(|&&f| f).count()),
            PointSetMode::Which => PointSetResult::Which(which()),
            PointSetMode::Details => {
                let distances: Vec<f64> = self
                    .points
                    .iter()
                    .map(|p| self.corridor.distance_to_boundary(p))
                    .collect();
                let mut by_distance: Vec<RankedPoint> = flags
                    .iter()
                    .zip(&distances)
                    .enumerate()
                    .map(|(index, (&contained, &distance))| RankedPoint {
                        index,
                        contained,
                        distance,
                    })
                    .collect();
                by_distance.sort_by(|a, b| a.distance.total_cmp(&b.distance));

                let contained = which();
                PointSetResult::Details(PointSetDetails {
                    total_points: self.points.len(),
                    contained_count: contained.len(),
                    contained_points: contained,
                    all_contained: flags.iter().all(|&f| f),
                    any_contained: flags.iter().any(|&f| f),
                    distances,
                    by_distance,
                })
            }
        })
    }
}
