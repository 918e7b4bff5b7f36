//! `erlq` — analytic M/M/c capacity planner
//!
//! Thin front-end over `erlq-core` and `erlq-viz`: computes steady-state
//! metrics for a fixed configuration, searches for the smallest server count
//! meeting an SLO, and renders surface/contour charts.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use erlq_core::{
    capacity_frontier, find_optimal_servers, sweep_surface, QueueMetrics, QueueParameters,
    SearchRange, SearchResult, SloSpec, SurfaceMetric, SweepRange,
};
use erlq_viz::{render_capacity_contour, render_surface_heatmap, ChartConfig, FrontierSeries};

#[derive(Parser)]
#[command(
    name = "erlq",
    about = "Steady-state M/M/c metrics and SLO-driven capacity planning",
    version
)]
struct Cli {
    /// Log level: trace, debug, info, warn, error
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute steady-state metrics for a fixed configuration
    Metrics {
        /// Arrival rate lambda (jobs per time unit)
        #[arg(long)]
        lambda: f64,
        /// Per-server service rate mu
        #[arg(long)]
        mu: f64,
        /// Number of servers c
        #[arg(long)]
        servers: u32,
        /// Also report this response-time percentile, e.g. 0.95
        #[arg(long)]
        percentile: Option<f64>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Find the smallest server count meeting an SLO
    Plan {
        #[arg(long)]
        lambda: f64,
        #[arg(long)]
        mu: f64,
        /// SLO percentile, e.g. 0.95
        #[arg(long, default_value_t = 0.95)]
        percentile: f64,
        /// SLO response-time bound (same time units as the rates)
        #[arg(long)]
        target: f64,
        #[arg(long, default_value_t = 1)]
        min_servers: u32,
        #[arg(long, default_value_t = 500)]
        max_servers: u32,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Render a mean-wait-time heatmap over a (lambda, mu) grid
    Surface {
        #[arg(long)]
        lambda_min: f64,
        #[arg(long)]
        lambda_max: f64,
        #[arg(long)]
        mu_min: f64,
        #[arg(long)]
        mu_max: f64,
        /// Grid resolution per axis
        #[arg(long, default_value_t = 200)]
        steps: usize,
        #[arg(long)]
        servers: u32,
        /// Output image (.svg or .png)
        #[arg(long, default_value = "surface.png")]
        out: String,
    },
    /// Render capacity-frontier contours for several server counts
    Contour {
        #[arg(long)]
        mu_min: f64,
        #[arg(long)]
        mu_max: f64,
        #[arg(long, default_value_t = 100)]
        steps: usize,
        /// Largest arrival rate to consider
        #[arg(long)]
        lambda_max: f64,
        /// SLO percentile
        #[arg(long, default_value_t = 0.95)]
        percentile: f64,
        /// SLO response-time bound
        #[arg(long)]
        target: f64,
        /// Server counts to draw, e.g. --servers 2 --servers 4
        #[arg(long, required = true)]
        servers: Vec<u32>,
        /// Output image (.svg or .png)
        #[arg(long, default_value = "contour.png")]
        out: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    erlq_core::init_logging_with_level(&cli.log_level);
    tracing::debug!(level = %cli.log_level, "logging initialized");

    match cli.command {
        Commands::Metrics {
            lambda,
            mu,
            servers,
            percentile,
            format,
        } => {
            let params = QueueParameters::new(lambda, mu, servers)?;
            let metrics = QueueMetrics::compute(&params)?;
            let pct = percentile
                .map(|p| metrics.response_time_percentile(p).map(|t| (p, t)))
                .transpose()?;
            print_metrics(&metrics, pct, format)?;
        }
        Commands::Plan {
            lambda,
            mu,
            percentile,
            target,
            min_servers,
            max_servers,
            format,
        } => {
            let slo = SloSpec::new(percentile, target)?;
            let range = SearchRange::new(min_servers, max_servers)?;
            let result = find_optimal_servers(lambda, mu, &slo, &range)?;
            print_search_result(&result, &slo, format)?;
        }
        Commands::Surface {
            lambda_min,
            lambda_max,
            mu_min,
            mu_max,
            steps,
            servers,
            out,
        } => {
            let lambda = SweepRange::new(lambda_min, lambda_max, steps)?;
            let mu = SweepRange::new(mu_min, mu_max, steps)?;
            let surface = sweep_surface(&lambda, &mu, servers, SurfaceMetric::MeanWaitTime)?;
            let config = ChartConfig::new(format!("Mean wait time, c = {servers}"))
                .x_label("arrival rate λ")
                .y_label("service rate μ");
            render_surface_heatmap(&surface, &out, &config)
                .with_context(|| format!("rendering {out}"))?;
            println!("wrote {out}");
        }
        Commands::Contour {
            mu_min,
            mu_max,
            steps,
            lambda_max,
            percentile,
            target,
            servers,
            out,
        } => {
            let slo = SloSpec::new(percentile, target)?;
            let mu_values = SweepRange::new(mu_min, mu_max, steps)?.values();
            let mut series = Vec::new();
            for c in servers {
                let points = capacity_frontier(&mu_values, lambda_max, c, &slo)?;
                series.push(FrontierSeries { servers: c, points });
            }
            let config = ChartConfig::new(format!(
                "Capacity frontier, p{:.0} <= {target}",
                percentile * 100.0
            ))
            .x_label("service rate μ")
            .y_label("sustainable arrival rate λ");
            render_capacity_contour(&series, &out, &config)
                .with_context(|| format!("rendering {out}"))?;
            println!("wrote {out}");
        }
    }
    Ok(())
}

fn print_metrics(
    metrics: &QueueMetrics,
    percentile: Option<(f64, f64)>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(metrics)?;
            if let Some((p, t)) = percentile {
                value["response_time_percentile"] = serde_json::json!({ "p": p, "value": t });
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            let params = metrics.params();
            println!(
                "lambda = {}, mu = {}, servers = {}",
                params.lambda(),
                params.mu(),
                params.servers()
            );
            println!("utilization (rho)     = {:.4}", params.utilization());
            println!("P(wait)               = {:.6}", metrics.waiting_probability);
            println!("mean wait time (Wq)   = {:.6}", metrics.mean_wait_time);
            println!("mean response (W)     = {:.6}", metrics.mean_response_time);
            println!("mean queue length     = {:.6}", metrics.mean_queue_length);
            println!("mean jobs in system   = {:.6}", metrics.mean_in_system);
            if let Some((p, t)) = percentile {
                println!("p{:.0} response time    = {t:.6}", p * 100.0);
            }
        }
    }
    Ok(())
}

fn print_search_result(
    result: &SearchResult,
    slo: &SloSpec,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Text => match result {
            SearchResult::Found {
                servers,
                metrics,
                percentile_response_time,
            } => {
                println!(
                    "{servers} servers meet p{:.0} <= {} (achieved {percentile_response_time:.6})",
                    slo.percentile() * 100.0,
                    slo.response_time_bound()
                );
                println!(
                    "  rho = {:.4}, P(wait) = {:.6}, W = {:.6}",
                    metrics.params().utilization(),
                    metrics.waiting_probability,
                    metrics.mean_response_time
                );
            }
            SearchResult::Infeasible {
                min_servers,
                max_servers,
            } => {
                println!(
                    "no server count in [{min_servers}, {max_servers}] meets p{:.0} <= {}",
                    slo.percentile() * 100.0,
                    slo.response_time_bound()
                );
            }
        },
    }
    Ok(())
}
