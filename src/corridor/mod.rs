//! The corridor aggregate: a route, its construction parameters, and the
//! smoothed buffer region built from them.

mod params;

use std::fmt;
use std::ops::{Add, Index, Sub};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::geometry::{BoundingBox, PointSequence, Region};
use crate::input::RawInput;
use crate::math::Point2;
use crate::operations::compare::{CompareWithLine, CorridorDiff, LineComparison};
use crate::operations::modification::{
    MergeRoutes, Resample, SimplifyRoute, SplitAtPoint, SubtractRoutes,
};
use crate::operations::offset::CorridorBuilder;
use crate::operations::query::{CheckPoints, CompareMode, Gradient, PointSetMode, PointSetResult};
use crate::operations::smooth::ContourSmoother;

const SQUARE_METRES_PER_KM2: f64 = 1e6;

pub use params::{CorridorParams, DEFAULT_RESOLUTION, DEFAULT_WIDTH};

/// Summary measures of a corridor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorridorStatistics {
    pub route_length: f64,
    pub buffer_area: f64,
    pub buffer_perimeter: f64,
    pub point_count: usize,
    pub bounding_box: Option<BoundingBox>,
    pub centroid: Option<[f64; 2]>,
}

/// A buffered region around an ordered route.
///
/// Immutable after construction: every derived operation builds a new
/// corridor with its own region.
#[derive(Debug, Clone)]
pub struct Corridor {
    points: PointSequence,
    params: CorridorParams,
    region: Region,
}

impl Corridor {
    /// Builds the corridor for `points`.
    ///
    /// # Errors
    ///
    /// Propagates construction errors of the buffer builder.
    ///
    /// # Algorithm
    ///
    /// 1. Buffer every point and segment by `params.width()` and union them.
    /// 2. Unless the route is a single point, smooth the outer boundary to
    ///    `params.resolution()` samples (a no-op when the union is not one
    ///    simple polygon). A smoothed ring that would leave any route point
    ///    outside is discarded in favour of the unsmoothed one.
    pub fn new(points: PointSequence, params: CorridorParams) -> Result<Self> {
        let raw = CorridorBuilder::new(&points, params.width()).execute()?;
        let region = if points.len() == 1 {
            raw
        } else {
            ContourSmoother::new(params.resolution())
                .keeping(points.points())
                .execute(raw)
        };
        debug!(
            points = points.len(),
            width = params.width(),
            resolution = params.resolution(),
            polygons = region.polygon_count(),
            "corridor built"
        );
        Ok(Self {
            points,
            params,
            region,
        })
    }

    /// Builds a corridor with the default width and resolution.
    ///
    /// # Errors
    ///
    /// Same as [`Corridor::new`].
    pub fn with_defaults(points: PointSequence) -> Result<Self> {
        Self::new(points, CorridorParams::default())
    }

    /// Parses a raw representation and builds the corridor.
    ///
    /// # Errors
    ///
    /// Returns the parse error of [`RawInput::into_points`], or the
    /// construction error of [`Corridor::new`].
    pub fn from_raw(raw: RawInput, params: CorridorParams) -> Result<Self> {
        Self::new(raw.into_points()?, params)
    }

    /// The route, in input order.
    #[must_use]
    pub fn points(&self) -> &PointSequence {
        &self.points
    }

    #[must_use]
    pub fn params(&self) -> &CorridorParams {
        &self.params
    }

    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The route as a kernel line string.
    #[must_use]
    pub fn centerline(&self) -> geo::LineString<f64> {
        self.points.to_line_string()
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.region.area()
    }

    /// Area in square kilometres, taking coordinates as metres.
    #[must_use]
    pub fn area_km2(&self) -> f64 {
        self.area() / SQUARE_METRES_PER_KM2
    }

    /// Distance from `p` to the region boundary; 0 on the boundary.
    #[must_use]
    pub fn distance_to_boundary(&self, p: &Point2) -> f64 {
        self.region.boundary_distance(p)
    }

    /// Boundary-inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        self.region.contains(p)
    }

    #[must_use]
    pub fn statistics(&self) -> CorridorStatistics {
        CorridorStatistics {
            route_length: self.points.length(),
            buffer_area: self.region.area(),
            buffer_perimeter: self.region.perimeter(),
            point_count: self.points.len(),
            bounding_box: self.region.bounding_box(),
            centroid: self.region.centroid().map(|c| [c.x, c.y]),
        }
    }

    /// Rebuilds the corridor from a Ramer–Douglas–Peucker simplified route.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` for a negative or non-finite
    /// tolerance.
    pub fn simplify(&self, tolerance: f64) -> Result<Self> {
        let points = SimplifyRoute::new(&self.points, tolerance).execute()?;
        Self::new(points, self.params)
    }

    /// Splits the corridor in two at the route vertex nearest to the
    /// projection of `p`. Both halves share that vertex.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if `p` is not finite.
    pub fn split_at(&self, p: &Point2) -> Result<(Self, Self)> {
        let split = SplitAtPoint::new(&self.points, *p).execute()?;
        debug!(
            vertex = split.vertex_index,
            parameter = split.parameter,
            "splitting corridor"
        );
        Ok((
            Self::new(split.head, self.params)?,
            Self::new(split.tail, self.params)?,
        ))
    }

    /// Rebuilds the corridor from `count` points evenly spaced along the
    /// route by arc length.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if `count` is 0.
    pub fn interpolate(&self, count: usize) -> Result<Self> {
        let points = Resample::new(&self.points, count).execute()?;
        Self::new(points, self.params)
    }

    /// Slope `dy/dx` of every route segment.
    #[must_use]
    pub fn gradient(&self) -> Vec<f64> {
        Gradient::new(&self.points).execute()
    }

    /// Merges both routes (duplicates dropped, sorted by x) into a new
    /// corridor with this corridor's width and the default resolution.
    ///
    /// # Errors
    ///
    /// Propagates construction errors.
    pub fn combine(&self, other: &Self) -> Result<Self> {
        let points = MergeRoutes::new(&self.points, &other.points).execute()?;
        Self::new(points, CorridorParams::with_width(self.params.width())?)
    }

    /// Drops every route point that also occurs in `other`, keeping this
    /// corridor's width and the default resolution.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if no point remains.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        let points = SubtractRoutes::new(&self.points, &other.points).execute()?;
        Self::new(points, CorridorParams::with_width(self.params.width())?)
    }

    /// Field-by-field differences; `None` when the corridors agree.
    #[must_use]
    pub fn diff(&self, other: &Self) -> Option<CorridorDiff> {
        CorridorDiff::between(self, other)
    }

    /// Compares the route with another polyline.
    ///
    /// # Errors
    ///
    /// See [`CompareWithLine::execute`].
    pub fn compare_with_line(&self, line: &PointSequence, mode: CompareMode) -> Result<LineComparison> {
        CompareWithLine::new(self, line).execute(mode)
    }

    /// Checks a list of points against this corridor.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if any point is not finite.
    pub fn check_points(&self, points: &[Point2], mode: PointSetMode) -> Result<PointSetResult> {
        CheckPoints::new(self, points).execute(mode)
    }

    /// GeoJSON feature of the region outline.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::GeometryDegenerate` if the region is not a
    /// single polygon.
    pub fn to_geojson(&self) -> Result<serde_json::Value> {
        crate::export::to_geojson(&self.region)
    }
}

impl PartialEq for Corridor {
    /// Order-sensitive on the route; the region is derived and not compared.
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points && self.params == other.params
    }
}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Corridor with {} points", self.points.len())?;
        writeln!(f, "Route length: {:.2}", self.points.length())?;
        writeln!(f, "Buffer area: {:.2}", self.area())?;
        write!(f, "Buffer width: {}", self.params.width())
    }
}

impl Index<usize> for Corridor {
    type Output = Point2;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl Add for &Corridor {
    type Output = Result<Corridor>;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl Sub for &Corridor {
    type Output = Result<Corridor>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn route(coords: &[(f64, f64)]) -> PointSequence {
        PointSequence::from_xy(coords).unwrap()
    }

    fn build(coords: &[(f64, f64)], width: f64) -> Corridor {
        Corridor::new(route(coords), CorridorParams::new(width, 50).unwrap()).unwrap()
    }

    #[test]
    fn single_point_is_unsmoothed_disk() {
        let c = build(&[(1.0, 1.0)], 0.5);
        assert_relative_eq!(c.area(), PI * 0.25, max_relative = 5e-3);
        assert!(c.contains(&Point2::new(1.0, 1.0)));
        assert!(!c.contains(&Point2::new(1.6, 1.0)));
    }

    #[test]
    fn area_in_square_kilometres() {
        let c = build(&[(0.0, 0.0), (2000.0, 0.0)], 250.0);
        assert_relative_eq!(c.area_km2(), c.area() / 1e6);
        // 2 km slab, 0.5 km wide, plus a disk of radius 0.25 km.
        assert_relative_eq!(c.area_km2(), 1.0 + PI * 0.0625, max_relative = 1e-2);
    }

    #[test]
    fn route_points_are_inside() {
        let c = build(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.5)], 0.2);
        for p in c.points() {
            assert!(c.contains(p));
        }
    }

    #[test]
    fn statistics_fields() {
        let c = build(&[(0.0, 0.0), (3.0, 4.0)], 0.1);
        let s = c.statistics();
        assert_relative_eq!(s.route_length, 5.0, epsilon = 1e-12);
        assert_eq!(s.point_count, 2);
        assert_relative_eq!(s.buffer_area, c.area(), epsilon = 1e-12);
        let centroid = s.centroid.unwrap();
        assert_relative_eq!(centroid[0], 1.5, epsilon = 0.1);
        assert_relative_eq!(centroid[1], 2.0, epsilon = 0.1);
        let bbox = s.bounding_box.unwrap();
        assert!(bbox.min_x < 0.0 && bbox.max_x > 3.0);
    }

    #[test]
    fn simplify_zero_keeps_non_collinear_route() {
        let c = build(&[(0.0, 0.0), (1.0, 0.5), (2.0, 0.0)], 0.1);
        assert_eq!(c.simplify(0.0).unwrap().points(), c.points());
        assert!(c.simplify(-1.0).is_err());
    }

    #[test]
    fn simplify_drops_near_collinear_vertex() {
        let c = build(&[(0.0, 0.0), (1.0, 0.01), (2.0, 0.0)], 0.1);
        assert_eq!(c.simplify(0.1).unwrap().points().len(), 2);
    }

    #[test]
    fn split_shares_vertex() {
        let c = build(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)], 0.1);
        let (head, tail) = c.split_at(&Point2::new(1.1, 0.5)).unwrap();
        assert_eq!(head.points().last(), Point2::new(1.0, 0.0));
        assert_eq!(tail.points().first(), Point2::new(1.0, 0.0));
        assert_eq!(head.points().len() + tail.points().len(), 5);
        assert_eq!(head.params(), c.params());
    }

    #[test]
    fn interpolate_count_and_endpoints() {
        let c = build(&[(0.0, 0.0), (1.0, 0.0), (1.0, 2.0)], 0.1);
        let i = c.interpolate(7).unwrap();
        assert_eq!(i.points().len(), 7);
        assert_eq!(i.points().first(), c.points().first());
        assert_eq!(i.points().last(), c.points().last());
        assert!(c.interpolate(0).is_err());
    }

    #[test]
    fn combine_and_subtract() {
        let a = build(&[(2.0, 0.0), (0.0, 0.0)], 0.1);
        let b = Corridor::new(
            route(&[(0.0, 0.0), (1.0, 1.0)]),
            CorridorParams::new(0.3, 80).unwrap(),
        )
        .unwrap();

        let sum = (&a + &b).unwrap();
        let xs: Vec<f64> = sum.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
        assert_eq!(sum.params().width(), 0.1);
        assert_eq!(sum.params().resolution(), DEFAULT_RESOLUTION);

        let diff = (&a - &b).unwrap();
        assert_eq!(diff.points().len(), 1);
        assert_eq!(diff[0], Point2::new(2.0, 0.0));

        assert!((&a - &a).is_err());
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = build(&[(0.0, 0.0), (1.0, 0.0)], 0.1);
        let b = build(&[(0.0, 0.0), (1.0, 0.0)], 0.1);
        let r = build(&[(1.0, 0.0), (0.0, 0.0)], 0.1);
        assert_eq!(a, b);
        assert_ne!(a, r);
        assert_ne!(a, build(&[(0.0, 0.0), (1.0, 0.0)], 0.2));
    }

    #[test]
    fn display_summary() {
        let c = build(&[(0.0, 0.0), (1.0, 0.0)], 0.1);
        let text = c.to_string();
        assert!(text.starts_with("Corridor with 2 points"));
        assert!(text.contains("Route length: 1.00"));
        assert!(text.ends_with("Buffer width: 0.1"));
    }

    #[test]
    fn gradient_per_segment() {
        let c = build(&[(0.0, 0.0), (1.0, 2.0), (1.0, 3.0)], 0.1);
        let g = c.gradient();
        assert_eq!(g.len(), 2);
        assert_relative_eq!(g[0], 2.0);
        assert_eq!(g[1], f64::INFINITY);
    }

    #[test]
    fn from_raw_flat() {
        let c = Corridor::from_raw(
            RawInput::Flat(vec![0.0, 0.0, 1.0, 0.0]),
            CorridorParams::default(),
        )
        .unwrap();
        assert_eq!(c.points().len(), 2);
        assert_eq!(c.params().width(), DEFAULT_WIDTH);
    }
}
