use geo::{
    Area, BooleanOps, BoundingRect, Centroid, Intersects, LineString, MultiPolygon, Polygon,
    Relate,
};
use serde::Serialize;

use crate::error::{CorridorError, Result};
use crate::math::distance_2d::{point_to_polyline_dist, polyline_length};
use crate::math::polygon_2d::regular_polygon;
use crate::math::{from_coord, to_coord, Point2};

use super::PointSequence;

/// Number of vertices of the polygonal circle approximation used by
/// [`Region::disk`].
pub const DISK_SEGMENTS: u32 = 64;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// A polygon-or-multipolygon value backed by the `geo` kernel.
///
/// All boolean algebra and point-in-polygon work is delegated to `geo`;
/// this type only exposes the capability surface the corridor pipeline
/// consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    shape: MultiPolygon<f64>,
}

impl Region {
    /// Polygonal approximation of the disk of `radius` around `center`.
    #[must_use]
    pub fn disk(center: &Point2, radius: f64) -> Self {
        let ring = regular_polygon(center, radius, DISK_SEGMENTS);
        Self::from_polygon(polygon_from(&ring))
    }

    /// Builds a single polygon from a vertex loop (closing vertex optional).
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::GeometryDegenerate` if fewer than 3 vertices
    /// are given.
    pub fn from_vertices(vertices: &[Point2]) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(CorridorError::GeometryDegenerate(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        Ok(Self::from_polygon(polygon_from(vertices)))
    }

    #[must_use]
    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self {
            shape: MultiPolygon::new(vec![polygon]),
        }
    }

    #[must_use]
    pub fn from_multi_polygon(shape: MultiPolygon<f64>) -> Self {
        Self { shape }
    }

    /// Unions all regions into one using a cascaded pairwise merge.
    #[must_use]
    pub fn union_all(regions: Vec<Region>) -> Self {
        let mut parts: Vec<MultiPolygon<f64>> = regions.into_iter().map(|r| r.shape).collect();
        while parts.len() > 1 {
            parts = parts
                .chunks(2)
                .map(|pair| {
                    pair.iter()
                        .skip(1)
                        .fold(pair[0].clone(), |acc, next| acc.union(next))
                })
                .collect();
        }
        Self {
            shape: parts.pop().unwrap_or_else(|| MultiPolygon::new(Vec::new())),
        }
    }

    /// Boundary-inclusive point-in-region test.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        self.shape.intersects(&geo::Point::from(to_coord(p)))
    }

    /// Whether the whole polyline lies inside the region.
    #[must_use]
    pub fn contains_line(&self, line: &PointSequence) -> bool {
        if line.len() == 1 {
            return self.contains(&line.first());
        }
        self.shape.relate(&line.to_line_string()).is_contains()
    }

    /// Minimum distance from `p` to any ring of the region (exterior or
    /// interior). Zero for points on the boundary.
    #[must_use]
    pub fn boundary_distance(&self, p: &Point2) -> f64 {
        self.rings()
            .map(|ring| point_to_polyline_dist(p, &ring_points(ring)))
            .fold(f64::INFINITY, f64::min)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.shape.unsigned_area()
    }

    /// Total length of every ring.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.rings().map(|ring| polyline_length(&ring_points(ring))).sum()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.shape.bounding_rect().map(|rect| BoundingBox {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        })
    }

    #[must_use]
    pub fn centroid(&self) -> Option<Point2> {
        self.shape.centroid().map(|c| from_coord(c.0))
    }

    #[must_use]
    pub fn intersection(&self, other: &Region) -> Region {
        Self {
            shape: self.shape.intersection(&other.shape),
        }
    }

    #[must_use]
    pub fn union(&self, other: &Region) -> Region {
        Self {
            shape: self.shape.union(&other.shape),
        }
    }

    #[must_use]
    pub fn symmetric_difference(&self, other: &Region) -> Region {
        Self {
            shape: self.shape.xor(&other.shape),
        }
    }

    /// The exterior ring (closed, first vertex repeated) when the region is
    /// a single polygon without holes.
    #[must_use]
    pub fn simple_exterior(&self) -> Option<Vec<Point2>> {
        match self.shape.0.as_slice() {
            [polygon] if polygon.interiors().is_empty() => Some(ring_points(polygon.exterior())),
            _ => None,
        }
    }

    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.shape.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shape.0.is_empty()
    }

    #[must_use]
    pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.shape
    }

    fn rings(&self) -> impl Iterator<Item = &LineString<f64>> {
        self.shape
            .iter()
            .flat_map(|poly| std::iter::once(poly.exterior()).chain(poly.interiors()))
    }
}

fn polygon_from(vertices: &[Point2]) -> Polygon<f64> {
    Polygon::new(
        LineString::new(vertices.iter().map(to_coord).collect()),
        Vec::new(),
    )
}

fn ring_points(ring: &LineString<f64>) -> Vec<Point2> {
    ring.coords().map(|c| from_coord(*c)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn unit_square() -> Region {
        Region::from_vertices(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap()
    }

    #[test]
    fn disk_area_close_to_circle() {
        let disk = Region::disk(&p(1.0, 2.0), 0.5);
        assert_relative_eq!(disk.area(), PI * 0.25, max_relative = 5e-3);
        assert!(disk.contains(&p(1.0, 2.0)));
        assert!(!disk.contains(&p(1.6, 2.0)));
    }

    #[test]
    fn square_measures() {
        let sq = unit_square();
        assert_relative_eq!(sq.area(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(sq.perimeter(), 4.0, epsilon = 1e-12);
        let bbox = sq.bounding_box().unwrap();
        assert_eq!(bbox.max_x, 1.0);
        let c = sq.centroid().unwrap();
        assert_relative_eq!(c.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn boundary_distance_inside_and_on_edge() {
        let sq = unit_square();
        assert_relative_eq!(sq.boundary_distance(&p(0.5, 0.25)), 0.25, epsilon = 1e-12);
        assert!(sq.boundary_distance(&p(1.0, 0.3)) == 0.0);
        assert_relative_eq!(sq.boundary_distance(&p(2.0, 0.5)), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn contains_is_boundary_inclusive() {
        let sq = unit_square();
        assert!(sq.contains(&p(1.0, 0.5)));
        assert!(sq.contains(&p(0.5, 0.5)));
        assert!(!sq.contains(&p(1.5, 0.5)));
    }

    #[test]
    fn union_all_overlapping_and_disjoint() {
        let merged = Region::union_all(vec![
            Region::disk(&p(0.0, 0.0), 1.0),
            Region::disk(&p(1.0, 0.0), 1.0),
            Region::disk(&p(0.5, 0.5), 1.0),
        ]);
        assert_eq!(merged.polygon_count(), 1);
        assert!(merged.simple_exterior().is_some());

        let split = Region::union_all(vec![
            Region::disk(&p(0.0, 0.0), 1.0),
            Region::disk(&p(10.0, 0.0), 1.0),
        ]);
        assert_eq!(split.polygon_count(), 2);
        assert!(split.simple_exterior().is_none());
    }

    #[test]
    fn union_all_empty_is_empty() {
        assert!(Region::union_all(Vec::new()).is_empty());
    }

    #[test]
    fn boolean_algebra_areas() {
        let a = unit_square();
        let b = Region::from_vertices(&[p(0.5, 0.0), p(1.5, 0.0), p(1.5, 1.0), p(0.5, 1.0)]).unwrap();
        assert_relative_eq!(a.intersection(&b).area(), 0.5, epsilon = 1e-9);
        assert_relative_eq!(a.union(&b).area(), 1.5, epsilon = 1e-9);
        assert_relative_eq!(a.symmetric_difference(&b).area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn contains_line() {
        let sq = unit_square();
        let inside = PointSequence::from_xy(&[(0.2, 0.2), (0.8, 0.8)]).unwrap();
        let crossing = PointSequence::from_xy(&[(0.2, 0.2), (1.8, 0.8)]).unwrap();
        assert!(sq.contains_line(&inside));
        assert!(!sq.contains_line(&crossing));
    }

    #[test]
    fn from_vertices_rejects_two_points() {
        assert!(Region::from_vertices(&[p(0.0, 0.0), p(1.0, 0.0)]).is_err());
    }
}
