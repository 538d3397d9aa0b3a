//! Closed (periodic) cubic interpolating splines through 2D vertex loops.
//!
//! The curve is parameterized by normalized chord length: vertex `i` sits at
//! `t_i = (chord length up to i) / (total loop length)`, so `t ∈ [0, 1]` and
//! `t = 1` closes the loop back onto vertex 0. Each coordinate is an
//! independent C² periodic cubic with zero smoothing (it interpolates every
//! vertex exactly).

use super::{Point2, TOLERANCE};
use crate::error::{CorridorError, Result};

/// Minimum number of distinct vertices a periodic cubic fit needs.
pub const MIN_SPLINE_VERTICES: usize = 4;

/// A periodic cubic spline through a closed vertex loop.
#[derive(Debug, Clone)]
pub struct PeriodicSpline2D {
    vertices: Vec<Point2>,
    /// Knot parameters, `len = vertices.len() + 1`, `knots[n] = 1`.
    knots: Vec<f64>,
    /// Second derivatives of x(t) at each vertex.
    mx: Vec<f64>,
    /// Second derivatives of y(t) at each vertex.
    my: Vec<f64>,
}

impl PeriodicSpline2D {
    /// Fits a periodic spline through `vertices` (an open loop: the closing
    /// vertex must not be repeated).
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::GeometryDegenerate` if fewer than
    /// [`MIN_SPLINE_VERTICES`] vertices are given, if two consecutive
    /// vertices coincide, or if the system is singular.
    pub fn fit(vertices: &[Point2]) -> Result<Self> {
        let n = vertices.len();
        if n < MIN_SPLINE_VERTICES {
            return Err(CorridorError::GeometryDegenerate(format!(
                "periodic cubic fit needs at least {MIN_SPLINE_VERTICES} vertices, got {n}"
            )));
        }

        let mut knots = Vec::with_capacity(n + 1);
        knots.push(0.0);
        let mut acc = 0.0;
        for i in 0..n {
            let chord = (vertices[(i + 1) % n] - vertices[i]).norm();
            if chord < TOLERANCE {
                return Err(CorridorError::GeometryDegenerate(format!(
                    "coincident consecutive vertices at index {i}"
                )));
            }
            acc += chord;
            knots.push(acc);
        }
        for k in &mut knots {
            *k /= acc;
        }

        let h: Vec<f64> = knots.windows(2).map(|w| w[1] - w[0]).collect();
        let xs: Vec<f64> = vertices.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = vertices.iter().map(|p| p.y).collect();

        let mx = second_derivatives(&xs, &h)?;
        let my = second_derivatives(&ys, &h)?;

        Ok(Self {
            vertices: vertices.to_vec(),
            knots,
            mx,
            my,
        })
    }

    /// Evaluates the curve at parameter `t`, wrapped into `[0, 1]`.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> Point2 {
        let n = self.vertices.len();
        let t = if (0.0..=1.0).contains(&t) {
            t
        } else {
            t.rem_euclid(1.0)
        };

        // Interval i with knots[i] <= t <= knots[i + 1].
        let i = match self
            .knots
            .binary_search_by(|k| k.partial_cmp(&t).unwrap_or(std::cmp::Ordering::Less))
        {
            Ok(idx) => idx.min(n - 1),
            Err(idx) => idx.saturating_sub(1).min(n - 1),
        };
        let j = (i + 1) % n;

        let h = self.knots[i + 1] - self.knots[i];
        let a = self.knots[i + 1] - t;
        let b = t - self.knots[i];

        let eval = |y0: f64, y1: f64, m0: f64, m1: f64| {
            m0 * a.powi(3) / (6.0 * h)
                + m1 * b.powi(3) / (6.0 * h)
                + (y0 / h - m0 * h / 6.0) * a
                + (y1 / h - m1 * h / 6.0) * b
        };

        let p0 = self.vertices[i];
        let p1 = self.vertices[j];
        Point2::new(
            eval(p0.x, p1.x, self.mx[i], self.mx[j]),
            eval(p0.y, p1.y, self.my[i], self.my[j]),
        )
    }

    /// Samples the curve at `count` uniformly spaced parameters
    /// `k / (count - 1)`. The last sample is an exact copy of the first so
    /// the result is a closed loop.
    #[must_use]
    pub fn sample(&self, count: usize) -> Vec<Point2> {
        match count {
            0 => Vec::new(),
            1 => vec![self.evaluate(0.0)],
            _ => {
                #[allow(clippy::cast_precision_loss)]
                let denom = (count - 1) as f64;
                let mut out: Vec<Point2> = (0..count - 1)
                    .map(|k| {
                        #[allow(clippy::cast_precision_loss)]
                        let t = k as f64 / denom;
                        self.evaluate(t)
                    })
                    .collect();
                out.push(out[0]);
                out
            }
        }
    }
}

/// Solves the cyclic tridiagonal system for the second derivatives of a
/// periodic cubic through `y` with interval widths `h`:
///
/// `h[i-1] M[i-1] + 2 (h[i-1] + h[i]) M[i] + h[i] M[i+1] = rhs[i]` (indices mod n).
fn second_derivatives(y: &[f64], h: &[f64]) -> Result<Vec<f64>> {
    let n = y.len();
    let prev = |i: usize| (i + n - 1) % n;

    let sub: Vec<f64> = (0..n).map(|i| h[prev(i)]).collect();
    let diag: Vec<f64> = (0..n).map(|i| 2.0 * (h[prev(i)] + h[i])).collect();
    let sup: Vec<f64> = h.to_vec();
    let rhs: Vec<f64> = (0..n)
        .map(|i| {
            let next = (i + 1) % n;
            6.0 * ((y[next] - y[i]) / h[i] - (y[i] - y[prev(i)]) / h[prev(i)])
        })
        .collect();

    solve_cyclic_tridiagonal(&sub, &diag, &sup, &rhs)
}

/// Sherman–Morrison reduction of a cyclic tridiagonal system to two plain
/// tridiagonal solves. `sub[0]` couples row 0 to the last unknown and
/// `sup[n-1]` couples the last row to unknown 0.
fn solve_cyclic_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Result<Vec<f64>> {
    let n = diag.len();
    let gamma = -diag[0];
    let alpha = sup[n - 1];
    let beta = sub[0];

    let mut modified = diag.to_vec();
    modified[0] = diag[0] - gamma;
    modified[n - 1] = diag[n - 1] - alpha * beta / gamma;

    let x = solve_tridiagonal(sub, &modified, sup, rhs)?;

    let mut u = vec![0.0; n];
    u[0] = gamma;
    u[n - 1] = alpha;
    let z = solve_tridiagonal(sub, &modified, sup, &u)?;

    let denom = 1.0 + z[0] + beta * z[n - 1] / gamma;
    if denom.abs() < f64::EPSILON {
        return Err(CorridorError::GeometryDegenerate(
            "singular periodic spline system".to_owned(),
        ));
    }
    let factor = (x[0] + beta * x[n - 1] / gamma) / denom;

    Ok(x.iter().zip(&z).map(|(xi, zi)| xi - factor * zi).collect())
}

/// Thomas algorithm. `sub[0]` and `sup[n-1]` are ignored.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Result<Vec<f64>> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    let singular = || CorridorError::GeometryDegenerate("singular tridiagonal system".to_owned());

    if diag[0].abs() < f64::EPSILON {
        return Err(singular());
    }
    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for i in 1..n {
        let m = diag[i] - sub[i] * c[i - 1];
        if m.abs() < f64::EPSILON {
            return Err(singular());
        }
        c[i] = if i + 1 < n { sup[i] / m } else { 0.0 };
        d[i] = (rhs[i] - sub[i] * d[i - 1]) / m;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d[i] - c[i] * x[i + 1];
    }
    Ok(x)
}
