//! Capacity-frontier contour chart
//!
//! Draws one line per server count: for each service rate on the x-axis, the
//! largest arrival rate that still meets the SLO. The area under a line is
//! the safe operating region for that many servers.

use crate::charts::ChartConfig;
use crate::error::VizError;
use erlq_core::FrontierPoint;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const SERIES_COLORS: [RGBColor; 6] = [RED, BLUE, GREEN, MAGENTA, CYAN, BLACK];

/// A capacity frontier for one server count.
#[derive(Debug, Clone)]
pub struct FrontierSeries {
    pub servers: u32,
    pub points: Vec<FrontierPoint>,
}

/// Render capacity frontiers for several server counts on one chart.
///
/// The backend is chosen from the file extension, as for the heatmap.
pub fn render_capacity_contour(
    series: &[FrontierSeries],
    output_path: impl AsRef<Path>,
    config: &ChartConfig,
) -> Result<(), VizError> {
    // Validate before the backend opens the output file.
    let drawable: usize = series.iter().map(|s| s.points.len()).sum();
    if drawable < 2 {
        return Err(VizError::EmptyData(
            "no frontier points to draw".to_string(),
        ));
    }

    let path = output_path.as_ref();
    tracing::debug!(path = %path.display(), series = series.len(), "rendering capacity contour");
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => {
            let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
            draw_contour(&root, series, config)
        }
        _ => {
            let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
            draw_contour(&root, series, config)
        }
    }
}

fn draw_contour<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[FrontierSeries],
    config: &ChartConfig,
) -> Result<(), VizError> {
    let mut mu_min = f64::INFINITY;
    let mut mu_max = f64::NEG_INFINITY;
    let mut lambda_max = 0.0f64;
    for s in series {
        for p in &s.points {
            mu_min = mu_min.min(p.mu);
            mu_max = mu_max.max(p.mu);
            lambda_max = lambda_max.max(p.lambda);
        }
    }
    if !mu_min.is_finite() || mu_max <= mu_min {
        return Err(VizError::EmptyData(
            "no frontier points to draw".to_string(),
        ));
    }

    root.fill(&WHITE)
        .map_err(|e| VizError::Render(format!("failed to fill background: {e}")))?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(mu_min..mu_max, 0.0..lambda_max * 1.1)
        .map_err(|e| VizError::Render(format!("failed to build chart: {e}")))?;

    chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .draw()
        .map_err(|e| VizError::Render(format!("failed to configure mesh: {e}")))?;

    for (idx, s) in series.iter().enumerate() {
        if s.points.is_empty() {
            continue;
        }
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                s.points.iter().map(|p| (p.mu, p.lambda)),
                color.stroke_width(2),
            ))
            .map_err(|e| VizError::Render(format!("failed to draw frontier: {e}")))?
            .label(format!("c = {}", s.servers))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| VizError::Render(format!("failed to draw legend: {e}")))?;

    root.present()
        .map_err(|e| VizError::Export(format!("failed to save chart: {e}")))?;
    Ok(())
}
