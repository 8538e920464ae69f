//! CSV Data Loader Module
//! Reads the revenue/cost CSV files with Polars and checks their layout.

use super::processor::{DataProcessor, ProcessorError};
use super::{BusinessTable, TableKind, LABEL_COLUMN, MONTHS, TOTAL_COLUMN};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { column: String, file: String },
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Loads business-line CSV files.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with every column kept as text.
    ///
    /// Schema inference is disabled so that currency strings such as
    /// `"$1,200.50"` reach the cleaning step untouched.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.display().to_string()));
        }

        let mut df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        // Headers exported from spreadsheets often carry stray spaces
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        for name in names {
            let trimmed = name.trim();
            if trimmed != name {
                df.rename(&name, trimmed.into())?;
            }
        }

        Self::check_columns(&df, file_path)?;
        debug!(
            file = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "csv read"
        );
        Ok(df)
    }

    /// Verify that the label, month and total columns are all present.
    pub fn check_columns(df: &DataFrame, file_path: &Path) -> Result<(), LoaderError> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let required = std::iter::once(LABEL_COLUMN)
            .chain(MONTHS)
            .chain(std::iter::once(TOTAL_COLUMN));

        for column in required {
            if !present.iter().any(|p| p == column) {
                return Err(LoaderError::MissingColumn {
                    column: column.to_string(),
                    file: file_path.display().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Load, clean and normalize one table.
    pub fn load_table(file_path: &Path, kind: TableKind) -> Result<BusinessTable, LoaderError> {
        let df = Self::load_csv(file_path)?;
        let table = DataProcessor::to_table(&df, kind)?;
        info!(
            table = %kind,
            file = %file_path.display(),
            lines = table.len(),
            "table loaded"
        );
        Ok(table)
    }
}
