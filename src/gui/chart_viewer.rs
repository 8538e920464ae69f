//! Chart Viewer Widget
//! Central panel showing the revenue vs. cost comparison chart.

use crate::charts::{ChartPlotter, ComparisonFigure};
use egui::{Color32, RichText};

const HEADER: &str = "Revenue and Cost Comparison of Services";

#[derive(Default)]
pub struct ChartViewer {
    pub figure: Option<ComparisonFigure>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_figure(&mut self, figure: ComparisonFigure) {
        self.figure = Some(figure);
    }

    /// True when a figure with at least one trace is shown.
    pub fn has_traces(&self) -> bool {
        self.figure.as_ref().is_some_and(|f| !f.is_empty())
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.add_space(5.0);
        ui.heading(RichText::new(HEADER).size(22.0).strong());
        ui.add_space(10.0);

        let Some(figure) = &self.figure else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.label(RichText::new(&figure.title).size(16.0).strong());
        if figure.is_empty() {
            ui.label(
                RichText::new("No business lines selected")
                    .size(12.0)
                    .color(Color32::GRAY),
            );
        }
        ui.add_space(5.0);

        let height = ui.available_height().max(200.0);
        ChartPlotter::draw_comparison_chart(ui, figure, height);
    }
}
