//! Charts module - Comparison series, interactive plot and static export

mod plotter;
mod renderer;
mod series;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use series::{build_figure, ComparisonFigure};
