//! Revenue vs Cost Dashboard
//!
//! Loads monthly revenue and cost CSVs per business line, normalizes them and
//! shows an interactive comparison chart.

mod charts;
mod config;
mod dashboard;
mod data;
mod gui;
mod reconcile;

use anyhow::{anyhow, Context, Result};
use charts::StaticChartRenderer;
use clap::Parser;
use config::{Settings, SettingsOverrides};
use dashboard::Dashboard;
use eframe::egui;
use gui::DashboardApp;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "revcost",
    about = "Compare monthly revenue and cost per business line"
)]
struct Cli {
    /// Costs CSV file
    #[arg(long)]
    costs: Option<PathBuf>,
    /// Revenue CSV file
    #[arg(long)]
    revenue: Option<PathBuf>,
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Business line to select initially (repeatable)
    #[arg(short, long = "select")]
    select: Vec<String>,
    /// Render the chart for the selection to this PNG/SVG file and exit
    #[arg(long)]
    export: Option<PathBuf>,
    /// Print the chart for the selection as JSON and exit
    #[arg(long)]
    json: bool,
    /// Verbose logging
    #[arg(long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply_overrides(SettingsOverrides {
        costs_path: cli.costs,
        revenue_path: cli.revenue,
        selected: cli.select,
    });

    let dashboard = Dashboard::load(
        &settings.revenue_path,
        &settings.costs_path,
        settings.aliases.clone(),
    )
    .with_context(|| {
        format!(
            "loading {} and {}",
            settings.revenue_path.display(),
            settings.costs_path.display()
        )
    })?;

    for label in &settings.selected {
        if dashboard.reconciliation.category(label).is_none() {
            warn!(label = %label, "selected business line not found in either table");
        }
    }

    if cli.json || cli.export.is_some() {
        let figure = dashboard.figure(&settings.selected);
        if let Some(path) = &cli.export {
            StaticChartRenderer::render_to_file(
                &figure,
                path,
                settings.export_width,
                settings.export_height,
            )
            .with_context(|| format!("exporting chart to {}", path.display()))?;
        }
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&figure)?);
        }
        return Ok(());
    }

    info!(
        options = dashboard.reconciliation.options().len(),
        "starting dashboard window"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Revenue vs Cost Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Revenue vs Cost Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dashboard, settings)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
