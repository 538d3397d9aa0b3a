use nalgebra::DMatrix;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::corridor::Corridor;
use crate::error::{CorridorError, Result};
use crate::math::Point2;

use super::mode::BatchMode;

/// Dense containment and boundary-distance matrices.
///
/// Rows are query points, columns are corridors.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMatrix {
    pub contains: DMatrix<bool>,
    pub distances: DMatrix<f64>,
}

impl QueryMatrix {
    /// Containment matrix as nested rows.
    #[must_use]
    pub fn contains_rows(&self) -> Vec<Vec<bool>> {
        self.contains
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    /// Distance matrix as nested rows.
    #[must_use]
    pub fn distance_rows(&self) -> Vec<Vec<f64>> {
        self.distances
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    fn summary(&self) -> BatchSummary {
        let rows = self.contains.nrows();
        let cols = self.contains.ncols();
        BatchSummary {
            total_points: rows,
            total_corridors: cols,
            points_in_any: (0..rows).filter(|&i| self.contains.row(i).iter().any(|&c| c)).count(),
            points_in_all: (0..rows).filter(|&i| self.contains.row(i).iter().all(|&c| c)).count(),
            corridors_with_any: (0..cols)
                .filter(|&j| self.contains.column(j).iter().any(|&c| c))
                .count(),
            corridors_with_all: (0..cols)
                .filter(|&j| self.contains.column(j).iter().all(|&c| c))
                .count(),
        }
    }
}

/// Aggregate containment counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_points: usize,
    pub total_corridors: usize,
    /// Points contained by at least one corridor.
    pub points_in_any: usize,
    /// Points contained by every corridor.
    pub points_in_all: usize,
    /// Corridors containing at least one point.
    pub corridors_with_any: usize,
    /// Corridors containing every point.
    pub corridors_with_all: usize,
}

/// Summary counts together with the containment matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    #[serde(flatten)]
    pub summary: BatchSummary,
    pub containment: Vec<Vec<bool>>,
}

/// Min/max/mean over a set of distances.
///
/// All `None` when there is nothing to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl DistanceStats {
    pub(crate) fn of(values: impl IntoIterator<Item = f64>) -> Self {
        let (mut min, mut max, mut sum, mut n) = (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0_usize);
        for v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            n += 1;
        }
        if n == 0 {
            return Self {
                min: None,
                max: None,
                mean: None,
            };
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / n as f64;
        Self {
            min: Some(min),
            max: Some(max),
            mean: Some(mean),
        }
    }
}

/// Breakdown of one query point across all corridors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointBreakdown {
    pub point_index: usize,
    pub point: [f64; 2],
    pub containing_corridors: Vec<usize>,
    pub containing_count: usize,
    pub distance: DistanceStats,
    /// Vacuously true when there are no corridors.
    pub in_all_corridors: bool,
}

/// Breakdown of one corridor across all query points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorBreakdown {
    pub corridor_index: usize,
    pub contained_points: Vec<usize>,
    pub contained_count: usize,
    pub distance: DistanceStats,
    /// Vacuously true when there are no points.
    pub contains_all_points: bool,
}

/// Per-point entry of a detailed report, with the full distance row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointDetail {
    pub point_index: usize,
    pub point: [f64; 2],
    pub containing_corridors: Vec<usize>,
    pub containing_count: usize,
    pub distances: Vec<f64>,
}

/// Per-corridor entry of a detailed report, with the full distance column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorDetail {
    pub corridor_index: usize,
    pub contained_points: Vec<usize>,
    pub contained_count: usize,
    pub distances: Vec<f64>,
}

/// Everything a batch query computes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedReport {
    pub summary: BatchSummary,
    pub containment: Vec<Vec<bool>>,
    pub distances: Vec<Vec<f64>>,
    pub by_point: Vec<PointDetail>,
    pub by_corridor: Vec<CorridorDetail>,
}

/// Result of a batch query, shaped by [`BatchMode`].
///
/// Serializes as the bare payload; the containment matrix becomes nested
/// rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchResult {
    Matrix(#[serde(serialize_with = "serialize_rows")] DMatrix<bool>),
    Summary(SummaryReport),
    ByPoint(Vec<PointBreakdown>),
    ByBuffer(Vec<CorridorBreakdown>),
    Detailed(DetailedReport),
}

/// Containment and boundary-distance queries of many points against many
/// corridors.
///
/// Every cell of both matrices is computed regardless of the mode. With the
/// `parallel` feature the rows are computed on the rayon thread pool; the
/// result is identical either way. Non-finite query points fail the whole
/// batch before any cell is evaluated.
#[derive(Debug)]
pub struct BatchQuery<'a> {
    points: &'a [Point2],
    corridors: &'a [Corridor],
}

impl<'a> BatchQuery<'a> {
    /// Creates a new batch query.
    #[must_use]
    pub fn new(points: &'a [Point2], corridors: &'a [Corridor]) -> Self {
        Self { points, corridors }
    }

    /// Computes both matrices.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if any query point is not finite.
    pub fn matrix(&self) -> Result<QueryMatrix> {
        if let Some(i) = self
            .points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(CorridorError::InvalidInput(format!(
                "query point {i} has non-finite coordinates"
            )));
        }

        let n = self.points.len();
        let m = self.corridors.len();
        debug!(points = n, corridors = m, "evaluating batch query matrix");

        let cells = self.cells();
        Ok(QueryMatrix {
            contains: DMatrix::from_fn(n, m, |i, j| cells[i * m + j].0),
            distances: DMatrix::from_fn(n, m, |i, j| cells[i * m + j].1),
        })
    }

    /// Computes the matrices and shapes them by `mode`.
    ///
    /// # Errors
    ///
    /// Same as [`BatchQuery::matrix`].
    pub fn execute(&self, mode: BatchMode) -> Result<BatchResult> {
        let qm = self.matrix()?;
        Ok(match mode {
            BatchMode::Matrix => BatchResult::Matrix(qm.contains),
            BatchMode::Summary => BatchResult::Summary(SummaryReport {
                summary: qm.summary(),
                containment: qm.contains_rows(),
            }),
            BatchMode::ByPoint => BatchResult::ByPoint(self.by_point(&qm)),
            BatchMode::ByBuffer => BatchResult::ByBuffer(by_corridor(&qm)),
            BatchMode::Detailed => BatchResult::Detailed(self.detailed(&qm)),
        })
    }

    /// Row-major `(contains, distance)` for every cell.
    fn cells(&self) -> Vec<(bool, f64)> {
        let row = |p: &Point2| -> Vec<(bool, f64)> {
            self.corridors
                .iter()
                .map(|c| (c.contains(p), c.distance_to_boundary(p)))
                .collect()
        };

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<(bool, f64)>> = self.points.par_iter().map(row).collect();
        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<(bool, f64)>> = self.points.iter().map(row).collect();

        rows.into_iter().flatten().collect()
    }

    fn by_point(&self, qm: &QueryMatrix) -> Vec<PointBreakdown> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let row = qm.contains.row(i);
                let containing = indices_where(row.iter());
                PointBreakdown {
                    point_index: i,
                    point: [p.x, p.y],
                    containing_count: containing.len(),
                    containing_corridors: containing,
                    distance: DistanceStats::of(qm.distances.row(i).iter().copied()),
                    in_all_corridors: row.iter().all(|&c| c),
                }
            })
            .collect()
    }

    fn detailed(&self, qm: &QueryMatrix) -> DetailedReport {
        let by_point = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let containing = indices_where(qm.contains.row(i).iter());
                PointDetail {
                    point_index: i,
                    point: [p.x, p.y],
                    containing_count: containing.len(),
                    containing_corridors: containing,
                    distances: qm.distances.row(i).iter().copied().collect(),
                }
            })
            .collect();

        let by_corridor = (0..qm.contains.ncols())
            .map(|j| {
                let contained = indices_where(qm.contains.column(j).iter());
                CorridorDetail {
                    corridor_index: j,
                    contained_count: contained.len(),
                    contained_points: contained,
                    distances: qm.distances.column(j).iter().copied().collect(),
                }
            })
            .collect();

        DetailedReport {
            summary: qm.summary(),
            containment: qm.contains_rows(),
            distances: qm.distance_rows(),
            by_point,
            by_corridor,
        }
    }
}

fn by_corridor(qm: &QueryMatrix) -> Vec<CorridorBreakdown> {
    (0..qm.contains.ncols())
        .map(|j| {
            let column = qm.contains.column(j);
            let contained = indices_where(column.iter());
            CorridorBreakdown {
                corridor_index: j,
                contained_count: contained.len(),
                contained_points: contained,
                distance: DistanceStats::of(qm.distances.column(j).iter().copied()),
                contains_all_points: column.iter().all(|&c| c),
            }
        })
        .collect()
}

fn serialize_rows<S: Serializer>(
    matrix: &DMatrix<bool>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(
        matrix
            .row_iter()
            .map(|row| row.iter().copied().collect::<Vec<bool>>()),
    )
}

fn indices_where<'a>(flags: impl Iterator<Item = &'a bool>) -> Vec<usize> {
    flags
        .enumerate()
        .filter_map(|(i, &flag)| flag.then_some(i))
        .collect()
}
