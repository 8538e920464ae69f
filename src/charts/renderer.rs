//! Static Chart Renderer
//! Writes the revenue vs. cost chart to an image file with plotters.
//!
//! Layout matches the interactive chart: title on top, months on the
//! x-axis, one line with markers per trace, legend in the upper right.

use super::plotter::ChartPlotter;
use super::series::ComparisonFigure;
use crate::data::TableKind;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render: no business lines selected")]
    NoTraces,
    #[error("Unsupported image format '{0}' (use .png or .svg)")]
    UnsupportedFormat(String),
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the figure to `path`. The backend is chosen by file extension.
    pub fn render_to_file(
        figure: &ComparisonFigure,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if figure.is_empty() {
            return Err(RenderError::NoTraces);
        }

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => {
                let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
                Self::draw(&root, figure)?;
            }
            "svg" => {
                let root = SVGBackend::new(path, (width, height)).into_drawing_area();
                Self::draw(&root, figure)?;
            }
            other => return Err(RenderError::UnsupportedFormat(other.to_string())),
        }

        info!(path = %path.display(), width, height, "chart exported");
        Ok(())
    }

    /// Y bounds with 10% headroom; a flat series gets a unit-wide window.
    pub fn y_range(figure: &ComparisonFigure) -> (f64, f64) {
        match figure.value_range() {
            None => (0.0, 1.0),
            Some((lo, hi)) if hi - lo == 0.0 => (lo - 0.5, hi + 0.5),
            Some((lo, hi)) => {
                let pad = (hi - lo) * 0.1;
                (lo - pad, hi + pad)
            }
        }
    }

    /// Same palette as the interactive chart.
    fn rgb(kind: TableKind) -> RGBColor {
        let c = ChartPlotter::trace_color(kind);
        RGBColor(c.r(), c.g(), c.b())
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        figure: &ComparisonFigure,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;

        let months = &figure.months;
        let (y_min, y_max) = Self::y_range(figure);

        let mut chart = ChartBuilder::on(root)
            .caption(&figure.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0.5f64..(months.len() as f64 + 0.5), y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(figure.x_title.as_str())
            .y_desc(figure.y_title.as_str())
            .x_labels(months.len())
            .x_label_formatter(&|x| {
                ChartPlotter::month_label(months, *x)
                    .unwrap_or_default()
                    .to_string()
            })
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()
            .map_err(draw_err)?;

        for trace in &figure.traces {
            let color = Self::rgb(trace.kind);
            let points: Vec<(f64, f64)> = trace
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| !v.is_nan())
                .map(|(i, &v)| (i as f64 + 1.0, v))
                .collect();

            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                .map_err(draw_err)?
                .label(trace.name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                )
                .map_err(draw_err)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::series::{build_figure, Trace};
    use crate::data::BusinessTable;

    fn figure_with(values: [f64; 12]) -> ComparisonFigure {
        let mut figure = build_figure(
            &[],
            &BusinessTable::new(TableKind::Revenue, vec![]),
            &BusinessTable::new(TableKind::Cost, vec![]),
        );
        figure.traces.push(Trace {
            kind: TableKind::Revenue,
            name: "Revenue - [Ads]".to_string(),
            lines: vec!["Ads".to_string()],
            values,
        });
        figure
    }

    #[test]
    fn empty_figure_is_not_rendered() {
        let figure = build_figure(
            &[],
            &BusinessTable::new(TableKind::Revenue, vec![]),
            &BusinessTable::new(TableKind::Cost, vec![]),
        );
        let dir = tempfile::tempdir().unwrap();
        let err = StaticChartRenderer::render_to_file(&figure, &dir.path().join("c.png"), 800, 600)
            .unwrap_err();
        assert!(matches!(err, RenderError::NoTraces));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let figure = figure_with([0.5; 12]);
        let dir = tempfile::tempdir().unwrap();
        let err = StaticChartRenderer::render_to_file(&figure, &dir.path().join("c.bmp"), 800, 600)
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(ext) if ext == "bmp"));
    }

    #[test]
    fn y_range_pads_values() {
        let mut values = [0.0; 12];
        values[11] = 1.0;
        let (lo, hi) = StaticChartRenderer::y_range(&figure_with(values));
        assert!((lo + 0.1).abs() < 1e-9);
        assert!((hi - 1.1).abs() < 1e-9);

        let (lo, hi) = StaticChartRenderer::y_range(&figure_with([2.0; 12]));
        assert_eq!((lo, hi), (1.5, 2.5));
    }

    #[test]
    fn export_colors_match_interactive_palette() {
        for kind in [TableKind::Revenue, TableKind::Cost] {
            let egui_color = ChartPlotter::trace_color(kind);
            let RGBColor(r, g, b) = StaticChartRenderer::rgb(kind);
            assert_eq!((r, g, b), (egui_color.r(), egui_color.g(), egui_color.b()));
        }
    }
}
