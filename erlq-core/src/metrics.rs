//! Steady-state metrics for an M/M/c queue
//!
//! [`QueueMetrics`] is computed once from a set of [`QueueParameters`] and is
//! never mutated; percentile queries are methods evaluated on demand. All
//! computation is deterministic: identical inputs yield bit-identical
//! outputs.
//!
//! # Response-time distribution
//!
//! An arriving job either finds a free server (probability `1 - P_wait`) and
//! experiences only an Exp(mu) service, or it queues (probability `P_wait`)
//! and experiences an Exp(c*mu - lambda) wait followed by an Exp(mu)
//! service. The response-time survival function is the mixture of those two
//! tails and has a closed form; percentiles invert it numerically.

use crate::erlang::erlang_c;
use crate::error::ModelError;
use crate::params::QueueParameters;
use serde::{Deserialize, Serialize};

/// Relative tolerance for percentile inversion.
const PERCENTILE_TOLERANCE: f64 = 1e-12;

/// Steady-state performance metrics of a stable M/M/c queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueMetrics {
    params: QueueParameters,
    /// Erlang-C probability that an arriving job must wait.
    pub waiting_probability: f64,
    /// Mean time spent waiting in queue, Wq = P_wait / (c*mu - lambda).
    pub mean_wait_time: f64,
    /// Mean response time, W = Wq + 1/mu.
    pub mean_response_time: f64,
    /// Mean number of jobs waiting in queue, Lq = lambda * Wq.
    pub mean_queue_length: f64,
    /// Mean number of jobs in the system, L = Lq + a.
    pub mean_in_system: f64,
}

impl QueueMetrics {
    /// Compute all mean-value metrics for the given parameters.
    ///
    /// Returns [`ModelError::UnstableQueue`] when rho >= 1.
    pub fn compute(params: &QueueParameters) -> Result<Self, ModelError> {
        let waiting_probability = erlang_c(params)?;
        let mean_wait_time = waiting_probability / params.drain_rate();
        let mean_response_time = mean_wait_time + 1.0 / params.mu();
        let mean_queue_length = params.lambda() * mean_wait_time;
        let mean_in_system = mean_queue_length + params.offered_load();
        Ok(Self {
            params: *params,
            waiting_probability,
            mean_wait_time,
            mean_response_time,
            mean_queue_length,
            mean_in_system,
        })
    }

    /// The parameters these metrics were derived from.
    pub fn params(&self) -> &QueueParameters {
        &self.params
    }

    /// Survival function of the response time: P(R > t).
    ///
    /// Closed-form mixture of the served-immediately and queued cases. When
    /// the wait rate c*mu - lambda coincides with the service rate mu (that
    /// is, lambda = (c-1)*mu) the queued branch degenerates to an Erlang-2
    /// tail.
    pub fn response_time_tail(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        let mu = self.params.mu();
        let drain = self.params.drain_rate();
        let pw = self.waiting_probability;

        let served = (-mu * t).exp();
        let queued = if (drain - mu).abs() <= 1e-12 * mu {
            (-mu * t).exp() * (1.0 + mu * t)
        } else {
            (drain * (-mu * t).exp() - mu * (-drain * t).exp()) / (drain - mu)
        };
        (1.0 - pw) * served + pw * queued
    }

    /// The p-th percentile of response time: smallest t with P(R <= t) >= p.
    ///
    /// The tail is continuous and strictly decreasing, so the percentile is
    /// found by doubling to bracket and then bisecting to a relative
    /// tolerance of 1e-12. Requires p in (0, 1) exclusive.
    pub fn response_time_percentile(&self, p: f64) -> Result<f64, ModelError> {
        validate_percentile(p)?;
        let target = 1.0 - p;

        let mut hi = self.mean_response_time.max(1.0 / self.params.mu());
        while self.response_time_tail(hi) > target {
            hi *= 2.0;
        }
        let mut lo = 0.0;
        for _ in 0..200 {
            if hi - lo <= PERCENTILE_TOLERANCE * hi {
                break;
            }
            let mid = 0.5 * (lo + hi);
            if self.response_time_tail(mid) > target {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok(0.5 * (lo + hi))
    }

    /// The p-th percentile of queueing delay (time before service starts).
    ///
    /// The delay tail is P(Wq > t) = P_wait * exp(-(c*mu - lambda) * t), so
    /// the percentile has the closed form ln(P_wait / (1-p)) / (c*mu -
    /// lambda), clamped at zero when a fraction >= p of jobs does not wait
    /// at all.
    pub fn wait_time_percentile(&self, p: f64) -> Result<f64, ModelError> {
        validate_percentile(p)?;
        let target = 1.0 - p;
        if self.waiting_probability <= target {
            return Ok(0.0);
        }
        Ok((self.waiting_probability / target).ln() / self.params.drain_rate())
    }
}

pub(crate) fn validate_percentile(p: f64) -> Result<(), ModelError> {
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        return Err(ModelError::InvalidPercentile { percentile: p });
    }
    Ok(())
}
