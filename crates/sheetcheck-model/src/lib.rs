//! Data model shared by the sheetcheck crates.
//!
//! The types here describe what flows between the spreadsheet reader, the
//! validation engine, the report formatter, and the notification dispatcher:
//!
//! - [`Dataset`]: an in-memory table of [`CellValue`]s with a header
//! - [`RuleSet`]: ordered [`ColumnSpec`]s plus global [`RuleSettings`]
//! - [`Finding`]: one issue reported by the engine
//! - [`ValidationReport`]: all findings of a run with derived counts and status

pub mod cell;
pub mod dataset;
pub mod error;
pub mod finding;
pub mod report;
pub mod rules;

pub use cell::CellValue;
pub use dataset::{Dataset, Row};
pub use error::{DatasetError, RuleSetError};
pub use finding::{Finding, FindingCode, Severity};
pub use report::{ReportSummary, ValidationReport, ValidationStatus};
pub use rules::{ColumnSpec, ExpectedType, RowFilter, RuleSet, RuleSettings};
