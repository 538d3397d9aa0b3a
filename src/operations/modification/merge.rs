use std::collections::HashSet;

use crate::error::{CorridorError, Result};
use crate::geometry::{PointKey, PointSequence};

/// Merges two routes into one point set ordered by ascending x.
///
/// Exact duplicate coordinates (within and across both routes) are kept
/// once. Points with equal x keep their first-seen order.
#[derive(Debug)]
pub struct MergeRoutes<'a> {
    a: &'a PointSequence,
    b: &'a PointSequence,
}

impl<'a> MergeRoutes<'a> {
    #[must_use]
    pub fn new(a: &'a PointSequence, b: &'a PointSequence) -> Self {
        Self { a, b }
    }

    /// Executes the merge.
    ///
    /// # Errors
    ///
    /// Never fails for valid inputs; the result type mirrors the other
    /// route operations.
    pub fn execute(&self) -> Result<PointSequence> {
        let mut seen = HashSet::new();
        let mut merged: Vec<_> = self
            .a
            .iter()
            .chain(self.b.iter())
            .filter(|p| seen.insert(PointKey::of(p)))
            .copied()
            .collect();
        merged.sort_by(|p, q| p.x.total_cmp(&q.x));
        PointSequence::new(merged)
    }
}

/// Removes from one route every point that occurs (exactly) in another.
#[derive(Debug)]
pub struct SubtractRoutes<'a> {
    from: &'a PointSequence,
    remove: &'a PointSequence,
}

impl<'a> SubtractRoutes<'a> {
    #[must_use]
    pub fn new(from: &'a PointSequence, remove: &'a PointSequence) -> Self {
        Self { from, remove }
    }

    /// Executes the subtraction, keeping the remaining points in order.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if no point remains.
    pub fn execute(&self) -> Result<PointSequence> {
        let removed = self.remove.key_set();
        let remaining: Vec<_> = self
            .from
            .iter()
            .filter(|p| !removed.contains(&PointKey::of(p)))
            .copied()
            .collect();
        if remaining.is_empty() {
            return Err(CorridorError::invalid(
                "subtraction removed every point of the route",
            ));
        }
        PointSequence::new(remaining)
    }
}
