//! Error types for spreadsheet ingestion.

use std::path::PathBuf;

use sheetcheck_model::DatasetError;
use thiserror::Error;

/// Errors that can occur while opening a workbook or reading a sheet.
///
/// All of these are input errors: they stop dataset construction and the
/// engine is never invoked.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Spreadsheet file not found.
    #[error("spreadsheet file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Extension is not one of the supported spreadsheet formats.
    #[error("unsupported file format '{extension}' for {path} (expected xlsx, xlsm, xlsb, xls, ods, or csv)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Parsing Errors ===
    /// calamine could not open or decode the workbook.
    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// The csv reader failed.
    #[error("failed to read csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // === Sheet Errors ===
    /// The workbook contains no sheets at all.
    #[error("workbook has no sheets: {path}")]
    NoSheets { path: PathBuf },

    /// Requested sheet does not exist.
    #[error("sheet '{sheet}' not found in {path} (available: {})", .available.join(", "))]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    /// Rows could not be assembled into a dataset.
    #[error("invalid table in {path}: {source}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: DatasetError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/data.xlsx"),
        };
        assert_eq!(
            err.to_string(),
            "spreadsheet file not found: /path/to/data.xlsx"
        );
    }

    #[test]
    fn test_sheet_not_found_lists_sheets() {
        let err = IngestError::SheetNotFound {
            path: PathBuf::from("book.xlsx"),
            sheet: "Q3".to_string(),
            available: vec!["Q1".to_string(), "Q2".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "sheet 'Q3' not found in book.xlsx (available: Q1, Q2)"
        );
    }
}
