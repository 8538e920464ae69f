//! Comparison Series Module
//! Filters the selected business lines and sums them per month.

use crate::data::{BusinessTable, TableKind, MONTHS};
use serde::Serialize;
use std::collections::BTreeSet;

pub const FIGURE_TITLE: &str = "Revenue and Cost Evolution";
pub const X_AXIS_TITLE: &str = "Month";
pub const Y_AXIS_TITLE: &str = "Value";

/// One line of the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub kind: TableKind,
    pub name: String,
    /// Selected labels that exist in this trace's table, sorted.
    pub lines: Vec<String>,
    pub values: [f64; 12],
}

/// Everything needed to draw the revenue vs. cost chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonFigure {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub months: Vec<String>,
    pub traces: Vec<Trace>,
}

impl ComparisonFigure {
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Smallest and largest plotted value, ignoring NaN.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.traces
            .iter()
            .flat_map(|t| t.values.iter().copied())
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Sum the selected rows of one table per month.
///
/// Returns `None` when none of the selected labels occur in the table.
pub fn aggregate(table: &BusinessTable, selected: &BTreeSet<&str>) -> Option<Trace> {
    let matched: Vec<String> = selected
        .iter()
        .filter(|label| table.contains(label))
        .map(|label| label.to_string())
        .collect();
    if matched.is_empty() {
        return None;
    }

    let mut values = [0.0; 12];
    for line in table
        .lines
        .iter()
        .filter(|l| selected.contains(l.label.as_str()))
    {
        for (sum, v) in values.iter_mut().zip(line.monthly) {
            if !v.is_nan() {
                *sum += v;
            }
        }
    }

    Some(Trace {
        kind: table.kind,
        name: format!("{} - [{}]", table.kind.title(), matched.join(", ")),
        lines: matched,
        values,
    })
}

/// Build the figure for the current selection: a revenue trace and a cost
/// trace, each omitted when no selected label belongs to its table.
pub fn build_figure(
    selected: &[String],
    revenue: &BusinessTable,
    cost: &BusinessTable,
) -> ComparisonFigure {
    let selected: BTreeSet<&str> = selected.iter().map(String::as_str).collect();

    let traces = [revenue, cost]
        .into_iter()
        .filter_map(|table| aggregate(table, &selected))
        .collect();

    ComparisonFigure {
        title: FIGURE_TITLE.to_string(),
        x_title: X_AXIS_TITLE.to_string(),
        y_title: Y_AXIS_TITLE.to_string(),
        months: MONTHS.iter().map(|m| m.to_string()).collect(),
        traces,
    }
}
