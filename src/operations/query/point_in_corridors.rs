use serde::Serialize;

use crate::corridor::Corridor;
use crate::error::{CorridorError, Result};
use crate::math::Point2;

use super::mode::CorridorSetMode;

/// Detailed answer for one point against a corridor list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorSetDetails {
    pub total_corridors: usize,
    pub containing_corridors: Vec<usize>,
    pub containing_count: usize,
    pub in_all: bool,
    pub in_any: bool,
    pub distances: Vec<f64>,
}

/// Result of [`PointInCorridors`], shaped by [`CorridorSetMode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CorridorSetResult {
    Any(bool),
    All(bool),
    Count(usize),
    Which(Vec<usize>),
    Details(CorridorSetDetails),
}

/// Checks one point against a list of corridors.
#[derive(Debug)]
pub struct PointInCorridors<'a> {
    point: Point2,
    corridors: &'a [Corridor],
}

impl<'a> PointInCorridors<'a> {
    #[must_use]
    pub fn new(point: Point2, corridors: &'a [Corridor]) -> Self {
        Self { point, corridors }
    }

    /// Executes the check.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if the point is not finite.
    pub fn execute(&self, mode: CorridorSetMode) -> Result<CorridorSetResult> {
        if !self.point.x.is_finite() || !self.point.y.is_finite() {
            return Err(CorridorError::invalid("query point must be finite"));
        }

        let flags: Vec<bool> = self.corridors.iter().map(|c| c.contains(&self.point)).collect();
        let which = || -> Vec<usize> {
            flags
                .iter()
                .enumerate()
                .filter_map(|(i, &f)| f.then_some(i))
                .collect()
        };

        Ok(match mode {
            CorridorSetMode::Any => CorridorSetResult::Any(flags.iter().any(|&f| f)),
            CorridorSetMode::All => CorridorSetResult::All(flags.iter().all(|&f| f)),
            CorridorSetMode::Count => CorridorSetResult::Count(flags.iter().filter(|&&f| f).count()),
            CorridorSetMode::Which => CorridorSetResult::Which(which()),
            CorridorSetMode::Details => {
                let containing = which();
                CorridorSetResult::Details(CorridorSetDetails {
                    total_corridors: self.corridors.len(),
                    containing_count: containing.len(),
                    containing_corridors: containing,
                    in_all: flags.iter().all(|&f| f),
                    in_any: flags.iter().any(|&f| f),
                    distances: self
                        .corridors
                        .iter()
                        .map(|c| c.distance_to_boundary(&self.point))
                        .collect(),
                })
            }
        })
    }
}
