//! Revenue vs Cost Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::Settings;
use crate::dashboard::Dashboard;
use crate::data::{BusinessTable, DataLoader, TableKind};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{debug, error, info, warn};

/// CSV reload result from background thread
enum LoadResult {
    Complete { table: BusinessTable, path: PathBuf },
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    dashboard: Dashboard,
    settings: Settings,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV reloading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dashboard: Dashboard, settings: Settings) -> Self {
        let mut control_panel =
            ControlPanel::new(settings.revenue_path.clone(), settings.costs_path.clone());
        control_panel.update_options(&dashboard.reconciliation);
        control_panel.set_selected(&settings.selected);

        let mut app = Self {
            dashboard,
            settings,
            control_panel,
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        app.redraw();
        app
    }

    /// Recompute the figure from the current selection.
    fn redraw(&mut self) {
        let selected = self.control_panel.get_selected();
        let figure = self.dashboard.figure(&selected);
        debug!(
            selected = selected.len(),
            traces = figure.traces.len(),
            "chart recomputed"
        );
        self.chart_viewer.set_figure(figure);
        self.control_panel.export_enabled = self.chart_viewer.has_traces();
    }

    /// Pick a new CSV for one table and reload it in the background.
    fn handle_browse(&mut self, kind: TableKind) {
        if self.is_loading {
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        info!(table = %kind, file = %path.display(), "reloading table");
        self.control_panel
            .set_status(&format!("Loading {}...", path.display()));
        self.control_panel.is_busy = true;
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match DataLoader::load_table(&path, kind) {
                Ok(table) => LoadResult::Complete { table, path },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV reload results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { table, path }) => {
                let kind = table.kind;
                let lines = table.len();
                self.dashboard.replace_table(table);
                self.control_panel.set_path(kind, path.clone());
                match kind {
                    TableKind::Revenue => self.settings.revenue_path = path,
                    TableKind::Cost => self.settings.costs_path = path,
                }
                self.control_panel
                    .update_options(&self.dashboard.reconciliation);
                self.control_panel
                    .set_status(&format!("Loaded {} {} lines", lines, kind));
                self.finish_loading();
                self.redraw();
            }
            Ok(LoadResult::Error(e)) => {
                error!(error = %e, "reload failed");
                self.control_panel.set_error(&e);
                self.finish_loading();
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel
                    .set_error("loader thread exited unexpectedly");
                self.finish_loading();
            }
        }
    }

    fn finish_loading(&mut self) {
        self.is_loading = false;
        self.control_panel.is_busy = false;
    }

    /// Save the current chart to an image and open it.
    fn handle_export_png(&mut self) {
        let Some(figure) = &self.chart_viewer.figure else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .add_filter("SVG Image", &["svg"])
            .set_file_name("revenue_cost.png")
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::render_to_file(
            figure,
            &output_path,
            self.settings.export_width,
            self.settings.export_height,
        ) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    warn!(error = %e, "could not open exported chart");
                }
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.control_panel.set_error(&e.to_string());
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::Browse(kind) => self.handle_browse(kind),
                        ControlPanelAction::SelectionChanged => self.redraw(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
