//! Grid evaluation for visualization
//!
//! Evaluates the queueing model over (lambda, mu) grids to produce the
//! datasets that the chart crate renders: a metric surface for a fixed
//! server count, and the capacity frontier (the largest sustainable arrival
//! rate per service rate under an SLO). Infeasible grid cells carry
//! `f64::NAN` rather than an error so that a sweep never aborts on the
//! unstable corner of the grid.

use crate::error::ModelError;
use crate::metrics::{validate_percentile, QueueMetrics};
use crate::params::QueueParameters;
use crate::search::SloSpec;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// An evenly spaced sweep over one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    start: f64,
    end: f64,
    steps: usize,
}

impl SweepRange {
    /// Create a validated range. Requires finite `start < end` and at least
    /// two steps.
    pub fn new(start: f64, end: f64, steps: usize) -> Result<Self, ModelError> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(ModelError::invalid(format!(
                "sweep range must satisfy start < end with finite bounds, got [{start}, {end}]"
            )));
        }
        if steps < 2 {
            return Err(ModelError::invalid("sweep needs at least 2 steps"));
        }
        Ok(Self { start, end, steps })
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The grid values, endpoints included.
    pub fn values(&self) -> Vec<f64> {
        let span = self.end - self.start;
        (0..self.steps)
            .map(|i| self.start + span * i as f64 / (self.steps - 1) as f64)
            .collect()
    }
}

/// Which steady-state quantity a surface sweep evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum SurfaceMetric {
    MeanWaitTime,
    MeanResponseTime,
    ResponseTimePercentile { percentile: f64 },
}

/// A metric evaluated over a (lambda, mu) grid for a fixed server count.
///
/// `values[i][j]` corresponds to `(lambda[i], mu[j])`; cells where the queue
/// is unstable (or mu <= 0) hold `f64::NAN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSurface {
    pub lambda: Vec<f64>,
    pub mu: Vec<f64>,
    pub servers: u32,
    pub metric: SurfaceMetric,
    pub values: Vec<Vec<f64>>,
}

impl MetricSurface {
    /// Minimum and maximum over the finite cells, if any exist.
    pub fn finite_bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for v in self.values.iter().flatten().copied() {
            if v.is_finite() {
                bounds = Some(match bounds {
                    None => (v, v),
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                });
            }
        }
        bounds
    }
}

/// Evaluate `metric` over the lambda x mu grid at a fixed server count.
///
/// Grid points may dip into negative lambda or non-positive mu when the
/// caller sweeps across zero; those cells become NaN like the unstable ones.
pub fn sweep_surface(
    lambda_range: &SweepRange,
    mu_range: &SweepRange,
    servers: u32,
    metric: SurfaceMetric,
) -> Result<MetricSurface, ModelError> {
    if servers < 1 {
        return Err(ModelError::invalid("server count must be >= 1"));
    }
    if let SurfaceMetric::ResponseTimePercentile { percentile } = metric {
        validate_percentile(percentile)?;
    }

    let lambda = lambda_range.values();
    let mu = mu_range.values();
    let values = lambda
        .iter()
        .map(|&l| mu.iter().map(|&m| cell_value(l, m, servers, metric)).collect())
        .collect();
    trace!(
        servers,
        cells = lambda_range.steps() * mu_range.steps(),
        "surface sweep complete"
    );

    Ok(MetricSurface {
        lambda,
        mu,
        servers,
        metric,
        values,
    })
}

fn cell_value(lambda: f64, mu: f64, servers: u32, metric: SurfaceMetric) -> f64 {
    let Ok(params) = QueueParameters::new(lambda, mu, servers) else {
        return f64::NAN;
    };
    let Ok(metrics) = QueueMetrics::compute(&params) else {
        return f64::NAN;
    };
    match metric {
        SurfaceMetric::MeanWaitTime => metrics.mean_wait_time,
        SurfaceMetric::MeanResponseTime => metrics.mean_response_time,
        SurfaceMetric::ResponseTimePercentile { percentile } => metrics
            .response_time_percentile(percentile)
            .unwrap_or(f64::NAN),
    }
}

/// One point on a capacity frontier: the largest arrival rate at `mu` whose
/// SLO percentile still meets the bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    pub mu: f64,
    pub lambda: f64,
}

/// Compute the capacity frontier for a fixed server count.
///
/// For each service rate the feasible arrival rates form an interval
/// starting at zero (the percentile is increasing in lambda), so the
/// boundary is found by bisection up to `lambda_max`. Service rates where
/// even lambda = 0 misses the bound contribute no point.
pub fn capacity_frontier(
    mu_values: &[f64],
    lambda_max: f64,
    servers: u32,
    slo: &SloSpec,
) -> Result<Vec<FrontierPoint>, ModelError> {
    if servers < 1 {
        return Err(ModelError::invalid("server count must be >= 1"));
    }
    if !lambda_max.is_finite() || lambda_max <= 0.0 {
        return Err(ModelError::invalid(format!(
            "lambda_max must be finite and > 0, got {lambda_max}"
        )));
    }

    let feasible = |lambda: f64, mu: f64| -> bool {
        let Ok(params) = QueueParameters::new(lambda, mu, servers) else {
            return false;
        };
        let Ok(metrics) = QueueMetrics::compute(&params) else {
            return false;
        };
        match metrics.response_time_percentile(slo.percentile()) {
            Ok(t) => t <= slo.response_time_bound(),
            Err(_) => false,
        }
    };

    let mut frontier = Vec::with_capacity(mu_values.len());
    for &mu in mu_values {
        if mu <= 0.0 || !feasible(0.0, mu) {
            continue;
        }
        // Feasibility can only be lost as lambda grows; keep the stable
        // ceiling strictly below c * mu.
        let cap = lambda_max.min(servers as f64 * mu * (1.0 - 1e-9));
        if feasible(cap, mu) {
            frontier.push(FrontierPoint { mu, lambda: cap });
            continue;
        }
        let mut lo = 0.0;
        let mut hi = cap;
        for _ in 0..80 {
            let mid = 0.5 * (lo + hi);
            if feasible(mid, mu) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        frontier.push(FrontierPoint { mu, lambda: lo });
    }
    Ok(frontier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_range_produces_even_grid() {
        let r = SweepRange::new(0.0, 10.0, 5).unwrap();
        assert_eq!(r.values(), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn sweep_range_validation() {
        assert!(SweepRange::new(5.0, 5.0, 3).is_err());
        assert!(SweepRange::new(0.0, 1.0, 1).is_err());
        assert!(SweepRange::new(f64::NAN, 1.0, 3).is_err());
    }

    #[test]
    fn surface_marks_unstable_cells_nan() {
        // c=2: cells with lambda >= 2 * mu must be NaN, the rest finite.
        let lambda = SweepRange::new(1.0, 9.0, 5).unwrap();
        let mu = SweepRange::new(1.0, 3.0, 3).unwrap();
        let surface = sweep_surface(&lambda, &mu, 2, SurfaceMetric::MeanWaitTime).unwrap();
        for (i, &l) in surface.lambda.iter().enumerate() {
            for (j, &m) in surface.mu.iter().enumerate() {
                let v = surface.values[i][j];
                if l >= 2.0 * m {
                    assert!(v.is_nan(), "expected NaN at lambda={l}, mu={m}");
                } else {
                    assert!(v.is_finite() && v >= 0.0, "expected finite at lambda={l}, mu={m}");
                }
            }
        }
    }

    #[test]
    fn surface_matches_direct_metric_evaluation() {
        let lambda = SweepRange::new(1.0, 5.0, 3).unwrap();
        let mu = SweepRange::new(2.0, 4.0, 2).unwrap();
        let surface = sweep_surface(&lambda, &mu, 3, SurfaceMetric::MeanResponseTime).unwrap();
        let params = QueueParameters::new(3.0, 2.0, 3).unwrap();
        let direct = QueueMetrics::compute(&params).unwrap().mean_response_time;
        assert_eq!(surface.values[1][0], direct);
    }

    #[test]
    fn percentile_surface_validates_percentile_up_front() {
        let lambda = SweepRange::new(1.0, 5.0, 3).unwrap();
        let mu = SweepRange::new(2.0, 4.0, 2).unwrap();
        let err = sweep_surface(
            &lambda,
            &mu,
            3,
            SurfaceMetric::ResponseTimePercentile { percentile: 1.5 },
        );
        assert!(matches!(err, Err(ModelError::InvalidPercentile { .. })));
    }

    #[test]
    fn finite_bounds_ignore_nan() {
        let lambda = SweepRange::new(1.0, 9.0, 5).unwrap();
        let mu = SweepRange::new(1.0, 3.0, 3).unwrap();
        let surface = sweep_surface(&lambda, &mu, 2, SurfaceMetric::MeanWaitTime).unwrap();
        let (lo, hi) = surface.finite_bounds().unwrap();
        assert!(lo.is_finite() && hi.is_finite() && lo <= hi);
    }

    #[test]
    fn frontier_points_are_maximal() {
        let slo = SloSpec::new(0.95, 2.0).unwrap();
        let mu_values = [1.0, 2.0, 3.0];
        let frontier = capacity_frontier(&mu_values, 100.0, 6, &slo).unwrap();
        assert!(!frontier.is_empty());
        for point in &frontier {
            let params = QueueParameters::new(point.lambda, point.mu, 6).unwrap();
            let t = QueueMetrics::compute(&params)
                .unwrap()
                .response_time_percentile(0.95)
                .unwrap();
            assert!(t <= 2.0, "frontier point must be feasible");

            // A step beyond the frontier must break the SLO (or stability).
            let beyond = point.lambda * 1.01 + 0.01;
            let params = QueueParameters::new(beyond, point.mu, 6).unwrap();
            let still_ok = QueueMetrics::compute(&params)
                .ok()
                .and_then(|m| m.response_time_percentile(0.95).ok())
                .map(|t| t <= 2.0)
                .unwrap_or(false);
            assert!(!still_ok, "lambda beyond the frontier must be infeasible");
        }
    }

    #[test]
    fn frontier_skips_hopeless_service_rates() {
        // p95 of service alone is ln(20)/mu; mu = 1 cannot meet a bound of
        // 2.0 even with an empty queue, so it contributes no point.
        let slo = SloSpec::new(0.95, 2.0).unwrap();
        let frontier = capacity_frontier(&[0.5, 1.0], 50.0, 4, &slo).unwrap();
        assert!(frontier.is_empty());
    }

    #[test]
    fn frontier_respects_lambda_max() {
        // Loose SLO: the frontier saturates at lambda_max, not at the
        // stability limit.
        let slo = SloSpec::new(0.5, 100.0).unwrap();
        let frontier = capacity_frontier(&[10.0], 5.0, 4, &slo).unwrap();
        assert_eq!(frontier.len(), 1);
        assert!((frontier[0].lambda - 5.0).abs() < 1e-9);
    }
}
