pub mod distance_2d;
pub mod polygon_2d;
pub mod spline_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Converts a point into the kernel's coordinate type.
#[must_use]
pub fn to_coord(p: &Point2) -> geo::Coord<f64> {
    geo::Coord { x: p.x, y: p.y }
}

/// Converts a kernel coordinate into a point.
#[must_use]
pub fn from_coord(c: geo::Coord<f64>) -> Point2 {
    Point2::new(c.x, c.y)
}
