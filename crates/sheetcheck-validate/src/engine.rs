use tracing::{debug, debug_span};

use sheetcheck_model::{Dataset, RuleSet, ValidationReport};

use crate::checks;

/// Validate a dataset against a rule set.
///
/// Pure: no I/O, nothing retained, and equal inputs give equal reports.
/// Findings are ordered as missing columns, then per-row cell findings,
/// then the enabled column-level and row-level checks.
pub fn validate(dataset: &Dataset, rules: &RuleSet) -> ValidationReport {
    let span = debug_span!(
        "validate",
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        rules = rules.len()
    );
    let _guard = span.enter();

    let findings = checks::run_all(dataset, rules);
    let report = ValidationReport::new(findings, dataset.row_count(), dataset.column_count());
    debug!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        status = report.status().as_str(),
        "validation complete"
    );
    report
}
