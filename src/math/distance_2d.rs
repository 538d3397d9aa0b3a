use super::Point2;

/// Projection of a point onto a bounded segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentProjection {
    /// Closest point on the segment.
    pub point: Point2,
    /// Segment parameter of the closest point, clamped to `[0, 1]`.
    pub t: f64,
    /// Distance from the query point to `point`.
    pub distance: f64,
}

/// Projects `p` onto the segment `a → b`.
///
/// Zero-length segments project onto `a` with `t = 0`.
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> SegmentProjection {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        return SegmentProjection {
            point: *a,
            t: 0.0,
            distance: (p - a).norm(),
        };
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    let closest = a + d * t;

    SegmentProjection {
        point: closest,
        t,
        distance: (p - closest).norm(),
    }
}

/// Returns the minimum distance from `p` to the segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    project_onto_segment(p, a, b).distance
}

/// Returns the minimum distance from `p` to an open polyline.
///
/// A single-vertex polyline degenerates to point distance; an empty one
/// yields `f64::INFINITY`.
#[must_use]
pub fn point_to_polyline_dist(p: &Point2, vertices: &[Point2]) -> f64 {
    match vertices {
        [] => f64::INFINITY,
        [only] => (p - only).norm(),
        _ => vertices
            .windows(2)
            .map(|w| point_to_segment_dist(p, &w[0], &w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Returns the length of an open polyline.
#[must_use]
pub fn polyline_length(vertices: &[Point2]) -> f64 {
    vertices.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(&p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(&p(-1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_on_vertex_is_exactly_zero() {
        let a = p(0.3, 0.7);
        let d = point_to_segment_dist(&a, &a, &p(2.0, 0.0));
        assert!(d == 0.0, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        // Zero-length segment: distance is point-to-point.
        let d = point_to_segment_dist(&p(3.0, 4.0), &p(0.0, 0.0), &p(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn projection_parameter() {
        let proj = project_onto_segment(&p(1.5, 2.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((proj.t - 0.75).abs() < TOL);
        assert!((proj.point.x - 1.5).abs() < TOL);
        assert!((proj.distance - 2.0).abs() < TOL);
    }

    #[test]
    fn polyline_dist_and_length() {
        let line = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)];
        assert!((polyline_length(&line) - 2.0).abs() < TOL);
        let d = point_to_polyline_dist(&p(2.0, 0.5), &line);
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn polyline_dist_single_vertex() {
        let d = point_to_polyline_dist(&p(3.0, 4.0), &[p(0.0, 0.0)]);
        assert!((d - 5.0).abs() < TOL);
        assert!(point_to_polyline_dist(&p(0.0, 0.0), &[]).is_infinite());
    }
}
