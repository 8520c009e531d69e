//! Validation engine for sheetcheck.
//!
//! [`validate`] checks a [`Dataset`] against a [`RuleSet`] and returns a
//! [`ValidationReport`]. Checks run in a fixed order:
//!
//! 1. Required column presence (`missing_column`)
//! 2. Per-row null (`null_value`), type (`type_mismatch`) and range
//!    (`value_out_of_range`) checks
//! 3. Opt-in column-level checks (`high_null_ratio`, `constant_column`,
//!    `long_text`)
//! 4. Opt-in row-level checks (`empty_row`, `sparse_row`, `duplicate_row`)
//!
//! Columns matching a skip pattern and rows matching the row filter are
//! left out of every check.
//!
//! [`ValidationSession`] wraps the engine with the selection state an
//! interactive surface needs.
//!
//! [`Dataset`]: sheetcheck_model::Dataset
//! [`RuleSet`]: sheetcheck_model::RuleSet
//! [`ValidationReport`]: sheetcheck_model::ValidationReport

mod checks;
pub mod coerce;
mod engine;
pub mod session;
mod util;

pub use engine::validate;
pub use session::{LoadedDataset, SessionError, ValidationSession};
pub use util::ColumnLookup;
