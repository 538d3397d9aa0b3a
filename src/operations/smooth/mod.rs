mod contour_smoother;

pub use contour_smoother::{ContourSmoother, MIN_RESOLUTION};
