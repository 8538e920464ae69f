//! Chart Plotter Module
//! Draws the interactive revenue vs. cost chart using egui_plot.

use super::series::ComparisonFigure;
use crate::data::TableKind;
use egui::Color32;
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints, Points};

pub const REVENUE_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green
pub const COST_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red

/// Draws comparison charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn trace_color(kind: TableKind) -> Color32 {
        match kind {
            TableKind::Revenue => REVENUE_COLOR,
            TableKind::Cost => COST_COLOR,
        }
    }

    /// Month name for an x position (1 = Jan).
    pub fn month_label(months: &[String], x: f64) -> Option<&str> {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 1.0 {
            return None;
        }
        months.get(rounded as usize - 1).map(String::as_str)
    }

    /// Draw the line chart: one line per trace, months on the x-axis.
    pub fn draw_comparison_chart(ui: &mut egui::Ui, figure: &ComparisonFigure, height: f32) {
        let tick_months = figure.months.clone();
        let hover_months = figure.months.clone();
        let month_count = figure.months.len();

        Plot::new("revenue_cost_chart")
            .height(height)
            .legend(Legend::default())
            .x_axis_label(figure.x_title.as_str())
            .y_axis_label(figure.y_title.as_str())
            .allow_scroll(false)
            .include_x(0.5)
            .include_x(month_count as f64 + 0.5)
            .include_y(0.0)
            // One tick per month
            .x_grid_spacer(move |_input| {
                (1..=month_count)
                    .map(|m| GridMark {
                        value: m as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                Self::month_label(&tick_months, mark.value)
                    .unwrap_or_default()
                    .to_string()
            })
            .label_formatter(move |name, value| {
                let month = Self::month_label(&hover_months, value.x).unwrap_or("");
                if name.is_empty() {
                    format!("{}: {:.3}", month, value.y)
                } else {
                    format!("{}\n{}: {:.3}", name, month, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for trace in &figure.traces {
                    let color = Self::trace_color(trace.kind);
                    let points: Vec<[f64; 2]> = trace
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| [i as f64 + 1.0, v])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(2.0)
                            .name(&trace.name),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(3.0)
                            .color(color)
                            .name(&trace.name),
                    );
                }
            });
    }
}
