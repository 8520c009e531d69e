//! Validation check modules.
//!
//! Each module performs one kind of check; [`run_all`] fixes their order.

mod aggregate;
mod cells;
mod presence;
mod scope;

use sheetcheck_model::{Dataset, Finding, RuleSet};

use crate::util::ColumnLookup;
use scope::Scope;

/// Run every check on a dataset, in reporting order.
pub fn run_all(dataset: &Dataset, rules: &RuleSet) -> Vec<Finding> {
    let settings = rules.settings();
    let column_lookup = ColumnLookup::new(dataset.columns(), settings.case_insensitive_columns);
    let scope = Scope::new(dataset, rules, &column_lookup);
    let mut findings = Vec::new();

    // 1. Required column presence
    findings.extend(presence::check(&scope.specs, &column_lookup));

    // 2. Null, type and range checks, row by row
    findings.extend(cells::check(&scope));

    // 3. Column-level checks, when enabled
    if let Some(threshold) = settings.null_warning_threshold {
        findings.extend(aggregate::null_ratio(&scope, threshold));
    }
    if settings.flag_constant_columns {
        findings.extend(aggregate::constant_columns(&scope));
    }
    if let Some(limit) = settings.max_text_length {
        findings.extend(aggregate::long_text(&scope, limit));
    }

    // 4. Row-level checks, when enabled
    if settings.flag_empty_rows {
        findings.extend(aggregate::empty_rows(&scope));
    }
    if let Some(threshold) = settings.sparse_row_threshold {
        findings.extend(aggregate::sparse_rows(
            &scope,
            threshold,
            settings.flag_empty_rows,
        ));
    }
    if settings.flag_duplicate_rows {
        findings.extend(aggregate::duplicate_rows(&scope));
    }

    findings
}
