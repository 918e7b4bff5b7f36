//! SLO-driven capacity search
//!
//! Finds the smallest server count whose percentile response time meets a
//! service-level objective. Response time is monotonically non-increasing in
//! the server count for fixed rates, so a linear upward scan over the
//! candidate range is exact; the scan starts at the smallest count that can
//! possibly be stable.

use crate::error::ModelError;
use crate::metrics::QueueMetrics;
use crate::params::QueueParameters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A service-level objective: "the `percentile`-th response time must not
/// exceed `response_time_bound`".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SloSpec {
    percentile: f64,
    response_time_bound: f64,
}

impl SloSpec {
    /// Create a validated SLO. `percentile` must lie in (0, 1) exclusive and
    /// `response_time_bound` must be positive and finite.
    pub fn new(percentile: f64, response_time_bound: f64) -> Result<Self, ModelError> {
        if !percentile.is_finite() || percentile <= 0.0 || percentile >= 1.0 {
            return Err(ModelError::InvalidPercentile { percentile });
        }
        if !response_time_bound.is_finite() || response_time_bound <= 0.0 {
            return Err(ModelError::invalid(format!(
                "response time bound must be finite and > 0, got {response_time_bound}"
            )));
        }
        Ok(Self {
            percentile,
            response_time_bound,
        })
    }

    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    pub fn response_time_bound(&self) -> f64 {
        self.response_time_bound
    }
}

/// Inclusive candidate range for the server-count scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRange {
    min_servers: u32,
    max_servers: u32,
}

impl SearchRange {
    /// Create a validated range. Requires `1 <= min_servers <= max_servers`.
    pub fn new(min_servers: u32, max_servers: u32) -> Result<Self, ModelError> {
        if min_servers < 1 {
            return Err(ModelError::invalid("min_servers must be >= 1"));
        }
        if max_servers < min_servers {
            return Err(ModelError::invalid(format!(
                "max_servers ({max_servers}) must be >= min_servers ({min_servers})"
            )));
        }
        Ok(Self {
            min_servers,
            max_servers,
        })
    }

    pub fn min_servers(&self) -> u32 {
        self.min_servers
    }

    pub fn max_servers(&self) -> u32 {
        self.max_servers
    }
}

/// Outcome of a capacity search. Infeasibility is a reportable result, not
/// an error: exhausting the range without meeting the SLO is expected when
/// the bound is tighter than the service time alone allows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchResult {
    /// The smallest server count in range that meets the SLO.
    Found {
        servers: u32,
        metrics: QueueMetrics,
        percentile_response_time: f64,
    },
    /// No server count in `[min_servers, max_servers]` meets the SLO.
    Infeasible { min_servers: u32, max_servers: u32 },
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found { .. })
    }

    /// The optimal server count, if one was found.
    pub fn servers(&self) -> Option<u32> {
        match self {
            SearchResult::Found { servers, .. } => Some(*servers),
            SearchResult::Infeasible { .. } => None,
        }
    }
}

/// Find the minimal server count in `range` whose `slo.percentile()`-th
/// response time is at most `slo.response_time_bound()`.
///
/// The scan begins at `max(range.min_servers, floor(lambda/mu) + 1)`, the
/// smallest count that gives rho < 1. A candidate that is still unstable is
/// skipped rather than surfaced; only structurally invalid rates produce an
/// error.
pub fn find_optimal_servers(
    lambda: f64,
    mu: f64,
    slo: &SloSpec,
    range: &SearchRange,
) -> Result<SearchResult, ModelError> {
    // Validate the rates once, independent of any candidate count.
    QueueParameters::new(lambda, mu, 1)?;

    let infeasible = SearchResult::Infeasible {
        min_servers: range.min_servers(),
        max_servers: range.max_servers(),
    };

    // Smallest count with c * mu > lambda.
    let min_stable = (lambda / mu).floor() + 1.0;
    if min_stable > range.max_servers() as f64 {
        info!(
            lambda,
            mu,
            max_servers = range.max_servers(),
            "offered load exceeds the entire candidate range"
        );
        return Ok(infeasible);
    }
    let start = range.min_servers().max(min_stable as u32);

    for servers in start..=range.max_servers() {
        let params = QueueParameters::new(lambda, mu, servers)?;
        let metrics = match QueueMetrics::compute(&params) {
            Ok(m) => m,
            // An unstable candidate just means "try more servers".
            Err(ModelError::UnstableQueue { .. }) => continue,
            Err(e) => return Err(e),
        };
        let percentile_response_time = metrics.response_time_percentile(slo.percentile())?;
        debug!(
            servers,
            percentile_response_time,
            bound = slo.response_time_bound(),
            "evaluated candidate"
        );
        if percentile_response_time <= slo.response_time_bound() {
            info!(servers, percentile_response_time, "SLO satisfied");
            return Ok(SearchResult::Found {
                servers,
                metrics,
                percentile_response_time,
            });
        }
    }

    info!(
        min_servers = range.min_servers(),
        max_servers = range.max_servers(),
        "no server count in range meets the SLO"
    );
    Ok(infeasible)
}
