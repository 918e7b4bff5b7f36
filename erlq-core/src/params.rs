//! Validated inputs for an M/M/c queue
//!
//! Parameters are checked once at construction. Stability (rho < 1) is
//! deliberately not a construction invariant: unstable configurations are
//! representable, and the metric operations report [`ModelError::UnstableQueue`]
//! when asked to evaluate one.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Inputs to an M/M/c queueing model: Poisson arrivals at rate `lambda`,
/// exponential service at rate `mu` per server, `servers` identical servers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueParameters {
    lambda: f64,
    mu: f64,
    servers: u32,
}

impl QueueParameters {
    /// Create validated queue parameters.
    ///
    /// Requires `lambda >= 0`, `mu > 0`, `servers >= 1`, and finite rates.
    pub fn new(lambda: f64, mu: f64, servers: u32) -> Result<Self, ModelError> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(ModelError::invalid(format!(
                "arrival rate lambda must be finite and >= 0, got {lambda}"
            )));
        }
        if !mu.is_finite() || mu <= 0.0 {
            return Err(ModelError::invalid(format!(
                "service rate mu must be finite and > 0, got {mu}"
            )));
        }
        if servers < 1 {
            return Err(ModelError::invalid("server count must be >= 1"));
        }
        Ok(Self {
            lambda,
            mu,
            servers,
        })
    }

    /// Arrival rate lambda.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Per-server service rate mu.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Number of parallel servers c.
    pub fn servers(&self) -> u32 {
        self.servers
    }

    /// Utilization rho = lambda / (c * mu).
    pub fn utilization(&self) -> f64 {
        self.lambda / (self.servers as f64 * self.mu)
    }

    /// Offered load a = lambda / mu, the expected number of busy servers
    /// under unlimited capacity.
    pub fn offered_load(&self) -> f64 {
        self.lambda / self.mu
    }

    /// Whether the queue admits a steady state (rho < 1).
    pub fn is_stable(&self) -> bool {
        self.utilization() < 1.0
    }

    /// Spare service capacity c * mu - lambda. Positive iff stable; this is
    /// the rate of the conditional waiting-time distribution.
    pub fn drain_rate(&self) -> f64 {
        self.servers as f64 * self.mu - self.lambda
    }

    pub(crate) fn unstable_error(&self) -> ModelError {
        ModelError::UnstableQueue {
            lambda: self.lambda,
            mu: self.mu,
            servers: self.servers,
            utilization: self.utilization(),
        }
    }
}

/// Arrival rate that produces utilization `rho` at the given service rate and
/// server count: lambda = rho * c * mu.
pub fn arrival_rate_for_utilization(rho: f64, mu: f64, servers: u32) -> f64 {
    rho * servers as f64 * mu
}

/// Per-server service rate needed for utilization `rho` at the given arrival
/// rate and server count: mu = lambda / (rho * c).
pub fn service_rate_for_utilization(lambda: f64, rho: f64, servers: u32) -> f64 {
    lambda / (rho * servers as f64)
}
