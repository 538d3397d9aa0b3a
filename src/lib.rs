pub mod corridor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod math;
pub mod operations;

pub use corridor::{Corridor, CorridorParams, CorridorStatistics};
pub use error::{CorridorError, Result};
pub use geometry::{PointSequence, Region};
pub use input::RawInput;
pub use math::Point2;
pub use operations::query::{BatchMode, BatchQuery, CompareMode, CorridorSetMode, PointSetMode};
