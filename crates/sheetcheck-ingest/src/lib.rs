//! Spreadsheet ingestion for sheetcheck.
//!
//! Opens xlsx/xlsm/xlsb/xls/ods workbooks through calamine and csv files
//! through the csv crate, and turns one sheet into a [`Dataset`].
//!
//! # Example
//!
//! ```ignore
//! use sheetcheck_ingest::Workbook;
//!
//! let mut workbook = Workbook::open("customers.xlsx")?;
//! for name in workbook.sheet_names() {
//!     let dataset = workbook.read_sheet(&name)?;
//!     println!("{name}: {} rows", dataset.row_count());
//! }
//! ```
//!
//! [`Dataset`]: sheetcheck_model::Dataset

mod error;
mod spreadsheet;
mod table;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use workbook::{Workbook, WorkbookFormat, read_dataset};
