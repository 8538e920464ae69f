//! Data module - CSV loading, cleaning and normalization

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError};

use serde::Serialize;
use std::fmt;

/// Column holding the business-line label in both tables.
pub const LABEL_COLUMN: &str = "Line Of Business";

/// Monthly value columns, in calendar order.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Yearly total column.
pub const TOTAL_COLUMN: &str = "Total";

/// Which of the two input tables a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableKind {
    Revenue,
    Cost,
}

impl TableKind {
    pub fn title(self) -> &'static str {
        match self {
            TableKind::Revenue => "Revenue",
            TableKind::Cost => "Cost",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One row of a table: a business line with its twelve monthly values and total.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessLine {
    pub label: String,
    pub monthly: [f64; 12],
    pub total: f64,
}

/// A cleaned revenue or cost table.
#[derive(Debug, Clone)]
pub struct BusinessTable {
    pub kind: TableKind,
    pub lines: Vec<BusinessLine>,
}

impl BusinessTable {
    pub fn new(kind: TableKind, lines: Vec<BusinessLine>) -> Self {
        Self { kind, lines }
    }

    /// Distinct labels, sorted.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.lines.iter().map(|l| l.label.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.lines.iter().any(|l| l.label == label)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
