//! Heatmap of a metric surface over the (lambda, mu) plane
//!
//! Renders the grid produced by `erlq_core::sweep_surface` as colored cells:
//! blue for low values through red for high, grey where the queue is
//! unstable (NaN cells).

use crate::charts::ChartConfig;
use crate::error::VizError;
use erlq_core::MetricSurface;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const UNSTABLE_CELL: RGBColor = RGBColor(210, 210, 210);

/// Render a metric surface as a heatmap.
///
/// The backend is chosen from the file extension: `.svg` uses the SVG
/// backend, anything else is rasterized to a bitmap.
pub fn render_surface_heatmap(
    surface: &MetricSurface,
    output_path: impl AsRef<Path>,
    config: &ChartConfig,
) -> Result<(), VizError> {
    // Validate before the backend opens the output file.
    if surface.lambda.len() < 2 || surface.mu.len() < 2 {
        return Err(VizError::EmptyData(
            "surface needs at least a 2x2 grid".to_string(),
        ));
    }
    if surface.finite_bounds().is_none() {
        return Err(VizError::EmptyData(
            "surface has no stable cells".to_string(),
        ));
    }

    let path = output_path.as_ref();
    tracing::debug!(path = %path.display(), servers = surface.servers, "rendering surface heatmap");
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => {
            let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
            draw_heatmap(&root, surface, config)
        }
        _ => {
            let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
            draw_heatmap(&root, surface, config)
        }
    }
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    surface: &MetricSurface,
    config: &ChartConfig,
) -> Result<(), VizError> {
    let (vmin, vmax) = surface
        .finite_bounds()
        .ok_or_else(|| VizError::EmptyData("surface has no stable cells".to_string()))?;
    let span = (vmax - vmin).max(f64::MIN_POSITIVE);

    root.fill(&WHITE)
        .map_err(|e| VizError::Render(format!("failed to fill background: {e}")))?;

    // Grid validity (>= 2 points per axis) is checked by the caller.
    let (l0, l1) = (surface.lambda[0], surface.lambda[surface.lambda.len() - 1]);
    let (m0, m1) = (surface.mu[0], surface.mu[surface.mu.len() - 1]);

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(l0..l1, m0..m1)
        .map_err(|e| VizError::Render(format!("failed to build chart: {e}")))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .draw()
        .map_err(|e| VizError::Render(format!("failed to configure mesh: {e}")))?;

    let mut cells = Vec::new();
    for i in 0..surface.lambda.len() - 1 {
        for j in 0..surface.mu.len() - 1 {
            let value = surface.values[i][j];
            let style: ShapeStyle = if value.is_finite() {
                // Hue sweep from blue (2/3) down to red (0).
                let t = ((value - vmin) / span).clamp(0.0, 1.0);
                HSLColor(2.0 / 3.0 * (1.0 - t), 0.85, 0.5).filled()
            } else {
                UNSTABLE_CELL.filled()
            };
            cells.push(Rectangle::new(
                [
                    (surface.lambda[i], surface.mu[j]),
                    (surface.lambda[i + 1], surface.mu[j + 1]),
                ],
                style,
            ));
        }
    }
    chart
        .draw_series(cells)
        .map_err(|e| VizError::Render(format!("failed to draw cells: {e}")))?;

    root.present()
        .map_err(|e| VizError::Export(format!("failed to save chart: {e}")))?;
    Ok(())
}
