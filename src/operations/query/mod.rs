mod batch;
mod check_points;
mod gradient;
mod mode;
mod point_in_corridors;

pub use batch::{
    BatchQuery, BatchResult, BatchSummary, CorridorBreakdown, CorridorDetail, DetailedReport,
    DistanceStats, PointBreakdown, PointDetail, QueryMatrix, SummaryReport,
};
pub use check_points::{CheckPoints, PointSetDetails, PointSetResult, RankedPoint};
pub use gradient::Gradient;
pub use mode::{BatchMode, CompareMode, CorridorSetMode, PointSetMode};
pub use point_in_corridors::{CorridorSetDetails, CorridorSetResult, PointInCorridors};
