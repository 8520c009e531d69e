//! Required column presence.

use sheetcheck_model::{ColumnSpec, Finding, FindingCode, Severity};

use crate::util::ColumnLookup;

/// One `missing_column` error per required column absent from the header.
pub fn check(specs: &[&ColumnSpec], columns: &ColumnLookup) -> Vec<Finding> {
    specs
        .iter()
        .filter(|spec| spec.required && !columns.contains(&spec.name))
        .map(|spec| {
            Finding::new(
                Severity::Error,
                FindingCode::MissingColumn,
                Some(spec.name.clone()),
                None,
                format!("Required column '{}' is missing", spec.name),
            )
        })
        .collect()
}
