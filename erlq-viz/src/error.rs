//! Error types for chart rendering

use thiserror::Error;

/// Errors produced while rendering or exporting charts
#[derive(Debug, Error)]
pub enum VizError {
    /// The dataset cannot be drawn (empty, or no finite values).
    #[error("nothing to draw: {0}")]
    EmptyData(String),

    /// A plotters drawing operation failed.
    #[error("rendering failed: {0}")]
    Render(String),

    /// Writing the output artifact failed.
    #[error("export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
