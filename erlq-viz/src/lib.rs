//! Visualization for M/M/c capacity analysis
//!
//! Renders the datasets produced by `erlq-core` with the plotters library:
//!
//! - a heatmap of a steady-state metric over a (lambda, mu) grid for a
//!   fixed server count;
//! - capacity-frontier contours showing, per server count, the largest
//!   arrival rate that still meets an SLO at each service rate.
//!
//! # Example
//!
//! ```no_run
//! use erlq_core::{sweep_surface, SurfaceMetric, SweepRange};
//! use erlq_viz::{render_surface_heatmap, ChartConfig};
//!
//! let lambda = SweepRange::new(1.0, 20.0, 100)?;
//! let mu = SweepRange::new(1.0, 6.0, 100)?;
//! let surface = sweep_surface(&lambda, &mu, 4, SurfaceMetric::MeanWaitTime)?;
//!
//! let config = ChartConfig::new("Mean wait time, c = 4")
//!     .x_label("arrival rate λ")
//!     .y_label("service rate μ");
//! render_surface_heatmap(&surface, "wq_surface.png", &config).unwrap();
//! # Ok::<(), erlq_core::ModelError>(())
//! ```

pub mod charts;
pub mod error;

pub use charts::{render_capacity_contour, render_surface_heatmap, ChartConfig, FrontierSeries};
pub use error::VizError;
