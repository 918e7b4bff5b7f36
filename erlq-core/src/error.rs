//! Error types for the queueing engine

use thiserror::Error;

/// Top-level error type for queueing-model operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The queue has no steady state: utilization rho = lambda / (servers * mu) >= 1.
    ///
    /// During a capacity search this is recovered locally (the candidate is
    /// skipped); it only reaches callers that query an unstable configuration
    /// directly.
    #[error("unstable queue: utilization {utilization:.4} >= 1 for lambda={lambda}, mu={mu}, servers={servers}")]
    UnstableQueue {
        lambda: f64,
        mu: f64,
        servers: u32,
        utilization: f64,
    },

    /// Percentile outside the open interval (0, 1). Always surfaced; this is
    /// a configuration mistake, not a property of the queue.
    #[error("percentile must lie strictly between 0 and 1, got {percentile}")]
    InvalidPercentile { percentile: f64 },

    /// Structurally invalid inputs: negative arrival rate, non-positive
    /// service rate, zero servers, non-finite values, or a malformed range.
    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },
}

impl ModelError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ModelError::InvalidParameters {
            reason: reason.into(),
        }
    }
}
