use std::collections::HashSet;

use serde::Serialize;

use crate::corridor::Corridor;
use crate::geometry::{PointKey, PointSequence};
use crate::math::Point2;

/// Area differences at or below this value are not reported.
pub const AREA_TOLERANCE: f64 = 1e-10;

/// Route points present in only one of two corridors, compared as sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsDiff {
    /// Points of `self` missing from `other`, in route order.
    pub only_in_self: Vec<[f64; 2]>,
    /// Points of `other` missing from `self`, in route order.
    pub only_in_other: Vec<[f64; 2]>,
    pub self_count: usize,
    pub other_count: usize,
}

/// A scalar that differs between two corridors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalarDiff {
    #[serde(rename = "self")]
    pub this: f64,
    pub other: f64,
    pub difference: f64,
}

impl ScalarDiff {
    fn new(this: f64, other: f64) -> Self {
        Self {
            this,
            other,
            difference: (this - other).abs(),
        }
    }
}

/// Per-field discrepancies between two corridors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<PointsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<ScalarDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ScalarDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<ScalarDiff>,
}

impl CorridorDiff {
    /// Compares two corridors field by field; `None` when nothing differs.
    ///
    /// Points are compared as unordered sets: a reordering of the same
    /// points is not reported here even though `==` rejects it.
    #[must_use]
    pub fn between(a: &Corridor, b: &Corridor) -> Option<Self> {
        #[allow(clippy::cast_precision_loss)]
        let (res_a, res_b) = (a.params().resolution() as f64, b.params().resolution() as f64);
        let diff = Self {
            points: points_diff(a.points(), b.points()),
            width: differs(a.params().width(), b.params().width()),
            resolution: differs(res_a, res_b),
            area: {
                let d = ScalarDiff::new(a.area(), b.area());
                (d.difference > AREA_TOLERANCE).then_some(d)
            },
        };
        diff.has_differences().then_some(diff)
    }

    #[must_use]
    pub fn has_differences(&self) -> bool {
        self.points.is_some()
            || self.width.is_some()
            || self.resolution.is_some()
            || self.area.is_some()
    }
}

#[allow(clippy::float_cmp)]
fn differs(a: f64, b: f64) -> Option<ScalarDiff> {
    (a != b).then(|| ScalarDiff::new(a, b))
}

fn points_diff(a: &PointSequence, b: &PointSequence) -> Option<PointsDiff> {
    if a == b {
        return None;
    }
    let a_keys = a.key_set();
    let b_keys = b.key_set();
    let only_in_self = unique_missing(a, &b_keys);
    let only_in_other = unique_missing(b, &a_keys);
    if only_in_self.is_empty() && only_in_other.is_empty() {
        return None;
    }
    Some(PointsDiff {
        only_in_self,
        only_in_other,
        self_count: a.len(),
        other_count: b.len(),
    })
}

fn unique_missing(seq: &PointSequence, other: &HashSet<PointKey>) -> Vec<[f64; 2]> {
    let mut seen = HashSet::new();
    seq.iter()
        .filter(|p| {
            let key = PointKey::of(p);
            !other.contains(&key) && seen.insert(key)
        })
        .map(|p: &Point2| [p.x, p.y])
        .collect()
}
