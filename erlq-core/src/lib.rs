//! Analytic M/M/c queueing engine
//!
//! This crate computes steady-state performance metrics for an M/M/c queue
//! (Poisson arrivals at rate lambda, exponential service at rate mu per
//! server, c identical parallel servers) and searches for the minimum server
//! count that satisfies a percentile response-time objective.
//!
//! Everything here is a pure function over numeric inputs: no shared state,
//! no I/O, no randomness. Calls are independently reentrant and safe to
//! issue from any number of threads.
//!
//! # Basic usage
//!
//! ```
//! use erlq_core::{find_optimal_servers, QueueMetrics, QueueParameters, SearchRange, SloSpec};
//!
//! // Metrics for a fixed configuration.
//! let params = QueueParameters::new(8.0, 2.0, 6)?;
//! let metrics = QueueMetrics::compute(&params)?;
//! assert!(metrics.waiting_probability < 0.3);
//!
//! // Smallest server count meeting "p95 response time <= 2.0".
//! let slo = SloSpec::new(0.95, 2.0)?;
//! let range = SearchRange::new(1, 100)?;
//! let result = find_optimal_servers(8.0, 2.0, &slo, &range)?;
//! assert_eq!(result.servers(), Some(6));
//! # Ok::<(), erlq_core::ModelError>(())
//! ```
//!
//! # Stability
//!
//! A steady state exists only when rho = lambda / (c * mu) < 1. Metric
//! operations on unstable parameters return [`ModelError::UnstableQueue`];
//! the capacity search treats an unstable candidate as "needs more servers"
//! and moves on, and grid sweeps mark unstable cells `NaN`.

pub mod erlang;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod params;
pub mod search;
pub mod sweep;

pub use erlang::erlang_c;
pub use error::ModelError;
pub use logging::{init_logging, init_logging_with_level};
pub use metrics::QueueMetrics;
pub use params::{arrival_rate_for_utilization, service_rate_for_utilization, QueueParameters};
pub use search::{find_optimal_servers, SearchRange, SearchResult, SloSpec};
pub use sweep::{
    capacity_frontier, sweep_surface, FrontierPoint, MetricSurface, SurfaceMetric, SweepRange,
};
