pub mod point_sequence;
pub mod region;

pub use point_sequence::{PointKey, PointSequence};
pub use region::{BoundingBox, Region, DISK_SEGMENTS};
