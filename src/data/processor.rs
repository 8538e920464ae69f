//! Data Processor Module
//! Handles currency cleaning and min-max normalization.

use super::{BusinessLine, BusinessTable, TableKind, LABEL_COLUMN, MONTHS, TOTAL_COLUMN};
use polars::prelude::*;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Parse a currency-formatted string into a float.
///
/// Every character other than ASCII digits and `.` is dropped before
/// parsing, so `"$1,234.50"` becomes `1234.5`. Signs and parentheses are
/// dropped too. Text that still fails to parse yields `NaN`.
pub fn parse_currency(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

/// Rescale values in place to `[0, 1]` using the column's own min and max.
///
/// NaN entries are ignored when finding the range and stay NaN. A constant
/// column maps to all zeros.
pub fn min_max_scale(values: &mut [f64]) {
    let (min, max) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return; // all NaN or empty
    }

    let range = if max - min == 0.0 { 1.0 } else { max - min };
    for v in values.iter_mut() {
        if !v.is_nan() {
            *v = (*v - min) / range;
        }
    }
}

/// Converts raw text frames into typed, normalized tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Parse a numeric text column into floats, one per row.
    fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, ProcessorError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let values = column
            .str()?
            .into_iter()
            .map(|v| v.map(parse_currency).unwrap_or(f64::NAN))
            .collect();
        Ok(values)
    }

    /// Build a typed, normalized table from a loaded frame.
    ///
    /// Every row, labelled or not, takes part in the min-max range of each
    /// column. Rows without a label are dropped only after scaling.
    pub fn to_table(df: &DataFrame, kind: TableKind) -> Result<BusinessTable, ProcessorError> {
        let labels_col = df.column(LABEL_COLUMN)?.cast(&DataType::String)?;
        let labels = labels_col.str()?;

        // 12 months + total
        let mut columns = MONTHS
            .iter()
            .chain(std::iter::once(&TOTAL_COLUMN))
            .map(|m| Self::column_values(df, m))
            .collect::<Result<Vec<_>, _>>()?;
        Self::normalize(&mut columns);

        let mut lines = Vec::with_capacity(df.height());
        let mut unlabelled = 0usize;
        for (row, label) in labels.into_iter().enumerate() {
            let Some(label) = label else {
                unlabelled += 1;
                continue;
            };

            let mut monthly = [f64::NAN; 12];
            for (m, value) in monthly.iter_mut().enumerate() {
                *value = columns[m][row];
            }

            lines.push(BusinessLine {
                label: label.to_string(),
                monthly,
                total: columns[MONTHS.len()][row],
            });
        }

        if unlabelled > 0 {
            debug!(table = %kind, rows = unlabelled, "unlabelled rows dropped after scaling");
        }
        Ok(BusinessTable::new(kind, lines))
    }

    /// Min-max normalize each column independently across all of its rows.
    pub fn normalize(columns: &mut [Vec<f64>]) {
        columns.par_iter_mut().for_each(|col| min_max_scale(col));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_currency_strings() {
        assert_eq!(parse_currency("$1,234.50"), 1234.5);
        assert_eq!(parse_currency("  $ 7 "), 7.0);
        assert_eq!(parse_currency("0"), 0.0);
        assert_eq!(parse_currency("-$1,200"), 1200.0);
        assert_eq!(parse_currency("(450)"), 450.0);
    }

    #[test]
    fn malformed_currency_is_nan() {
        assert!(parse_currency("").is_nan());
        assert!(parse_currency("n/a").is_nan());
        assert!(parse_currency("$1.2.3").is_nan());
    }

    #[test]
    fn min_max_maps_extremes_to_unit_range() {
        let mut values = vec![5.0, 15.0, 10.0, 25.0];
        min_max_scale(&mut values);
        assert_eq!(values, vec![0.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn min_max_keeps_nan_and_ignores_it_for_range() {
        let mut values = vec![f64::NAN, 2.0, 4.0];
        min_max_scale(&mut values);
        assert!(values[0].is_nan());
        assert_eq!(&values[1..], &[0.0, 1.0]);
    }

    #[test]
    fn min_max_constant_column_is_zero() {
        let mut values = vec![3.0, 3.0, 3.0];
        min_max_scale(&mut values);
        assert_eq!(values, vec![0.0, 0.0, 0.0]);

        let mut all_nan = vec![f64::NAN, f64::NAN];
        min_max_scale(&mut all_nan);
        assert!(all_nan.iter().all(|v| v.is_nan()));
    }

    fn frame() -> DataFrame {
        let mut columns = vec![Column::new(
            LABEL_COLUMN.into(),
            vec![Some("Retail"), None, Some("Online")],
        )];
        for month in MONTHS {
            columns.push(Column::new(
                month.into(),
                vec![Some("$100"), Some("$1"), Some("bad")],
            ));
        }
        columns.push(Column::new(
            TOTAL_COLUMN.into(),
            vec![Some("$1,200"), Some("$12"), None],
        ));
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn to_table_parses_rows_and_skips_unlabelled() {
        let table = DataProcessor::to_table(&frame(), TableKind::Revenue).unwrap();
        assert_eq!(table.kind, TableKind::Revenue);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lines[0].label, "Retail");
        assert_eq!(table.lines[1].label, "Online");
        assert!(table.lines[1].monthly.iter().all(|v| v.is_nan()));
        assert!(table.lines[1].total.is_nan());
    }

    #[test]
    fn unlabelled_rows_still_set_the_column_range() {
        // Retail 100, unlabelled 1: the unlabelled row is the column minimum
        let table = DataProcessor::to_table(&frame(), TableKind::Revenue).unwrap();
        assert_eq!(table.lines[0].monthly, [1.0; 12]);
        assert_eq!(table.lines[0].total, 1.0);
    }

    #[test]
    fn normalize_scales_each_column_independently() {
        let mut columns = vec![
            vec![0.0, 10.0, 5.0],
            vec![300.0, 100.0, 200.0],
            vec![50.0, 150.0, 100.0],
        ];
        DataProcessor::normalize(&mut columns);

        assert_eq!(columns[0], vec![0.0, 1.0, 0.5]);
        assert_eq!(columns[1], vec![1.0, 0.0, 0.5]);
        assert_eq!(columns[2], vec![0.0, 1.0, 0.5]);
    }
}
