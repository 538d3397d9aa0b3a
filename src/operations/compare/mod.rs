mod diff;
mod line_compare;

pub use diff::{CorridorDiff, PointsDiff, ScalarDiff, AREA_TOLERANCE};
pub use line_compare::{
    BasicComparison, CompareWithLine, DetailedComparison, GeometricComparison, LineComparison,
};
