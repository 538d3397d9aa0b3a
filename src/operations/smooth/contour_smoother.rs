use tracing::debug;

use crate::error::{CorridorError, Result};
use crate::geometry::Region;
use crate::math::polygon_2d::dedup_ring;
use crate::math::spline_2d::PeriodicSpline2D;
use crate::math::Point2;

/// Minimum number of samples for a smoothed contour.
pub const MIN_RESOLUTION: usize = 4;

/// Re-samples the outer boundary of a single-polygon region through a
/// periodic cubic spline.
///
/// Only a single polygon without holes is smoothed; any other region is
/// returned unchanged. When the fit itself fails (too few distinct
/// vertices, degenerate ring) or the sampled ring leaves one of the anchor
/// points outside, the unsmoothed exterior ring is rebuilt as the polygon.
/// Neither case is reported as an error.
#[derive(Debug)]
pub struct ContourSmoother {
    resolution: usize,
    anchors: Vec<Point2>,
}

impl ContourSmoother {
    /// Creates a new smoother producing `resolution` boundary samples.
    #[must_use]
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            anchors: Vec::new(),
        }
    }

    /// Points the smoothed region must still contain, typically the route
    /// the region was buffered from.
    #[must_use]
    pub fn keeping(mut self, anchors: &[Point2]) -> Self {
        self.anchors = anchors.to_vec();
        self
    }

    /// Executes the smoothing.
    #[must_use]
    pub fn execute(&self, region: Region) -> Region {
        let Some(exterior) = region.simple_exterior() else {
            debug!(
                polygons = region.polygon_count(),
                "region is not a single simple polygon; smoothing skipped"
            );
            return region;
        };

        match self.smooth_ring(&exterior) {
            Ok(smoothed) => smoothed,
            Err(err) => {
                debug!(%err, "contour fit failed; keeping unsmoothed ring");
                Region::from_vertices(&exterior).unwrap_or(region)
            }
        }
    }

    fn smooth_ring(&self, exterior: &[Point2]) -> Result<Region> {
        let ring = dedup_ring(exterior);
        let spline = PeriodicSpline2D::fit(&ring)?;
        let samples = spline.sample(self.resolution.max(MIN_RESOLUTION));

        if samples.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(CorridorError::GeometryDegenerate(
                "non-finite contour sample".to_owned(),
            ));
        }
        let smoothed = Region::from_vertices(&samples)?;

        if let Some(i) = self.anchors.iter().position(|p| !smoothed.contains(p)) {
            return Err(CorridorError::GeometryDegenerate(format!(
                "smoothed contour leaves anchor point {i} outside"
            )));
        }
        Ok(smoothed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::PointSequence;
    use crate::operations::offset::CorridorBuilder;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn smoothed_disk_keeps_area() {
        let disk = Region::disk(&p(0.0, 0.0), 1.0);
        let smoothed = ContourSmoother::new(200).execute(disk.clone());
        let ring = smoothed.simple_exterior().unwrap();
        // The last sample closes the ring.
        assert_eq!(ring.len(), 200);
        assert_relative_eq!(smoothed.area(), disk.area(), max_relative = 1e-2);
    }

    #[test]
    fn resolution_sets_vertex_budget() {
        let route = PointSequence::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        let raw = CorridorBuilder::new(&route, 0.1).execute().unwrap();
        let smoothed = ContourSmoother::new(20).execute(raw);
        let ring = smoothed.simple_exterior().unwrap();
        assert_eq!(ring.len(), 20);
    }

    #[test]
    fn triangle_falls_back_to_raw_ring() {
        let tri = Region::from_vertices(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]).unwrap();
        let out = ContourSmoother::new(50).execute(tri.clone());
        assert_relative_eq!(out.area(), tri.area(), epsilon = 1e-12);
        assert_eq!(out.simple_exterior().unwrap().len(), 4);
    }

    #[test]
    fn multi_polygon_is_identity() {
        let two = Region::union_all(vec![
            Region::disk(&p(0.0, 0.0), 1.0),
            Region::disk(&p(5.0, 0.0), 1.0),
        ]);
        let out = ContourSmoother::new(50).execute(two.clone());
        assert_eq!(out, two);
    }

    #[test]
    fn long_route_keeps_end_caps() {
        let coords: Vec<(f64, f64)> = (0..30).map(|i| (f64::from(i), 0.0)).collect();
        let route = PointSequence::from_xy(&coords).unwrap();
        let raw = CorridorBuilder::new(&route, 0.02).execute().unwrap();
        let out = ContourSmoother::new(50)
            .keeping(route.points())
            .execute(raw.clone());
        for q in &route {
            assert!(out.contains(q), "{q:?} outside");
        }
        assert_relative_eq!(out.area(), raw.area(), epsilon = 1e-12);
    }

    #[test]
    fn anchors_do_not_block_a_good_fit() {
        let route = PointSequence::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        let raw = CorridorBuilder::new(&route, 0.1).execute().unwrap();
        let out = ContourSmoother::new(20)
            .keeping(route.points())
            .execute(raw);
        assert_eq!(out.simple_exterior().unwrap().len(), 20);
    }

    #[test]
    fn tiny_resolution_is_clamped() {
        let disk = Region::disk(&p(0.0, 0.0), 1.0);
        let out = ContourSmoother::new(1).execute(disk);
        assert_eq!(out.simple_exterior().unwrap().len(), MIN_RESOLUTION);
    }
}
