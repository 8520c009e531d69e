//! Per-cell null, type and range checks.
//!
//! Rows are visited in dataset order and, within a row, columns in rule set
//! order, so findings come out in a stable reading order.

use sheetcheck_model::{CellValue, ColumnSpec, Finding, FindingCode, Severity};

use super::scope::Scope;
use crate::coerce::{numeric_value, satisfies};

pub fn check(scope: &Scope<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for &(row_index, row) in &scope.rows {
        for &(spec, index) in &scope.present {
            let Some(value) = row.get(index) else {
                continue;
            };
            if value.is_null() {
                if !spec.allow_null {
                    findings.push(null_finding(spec, row_index));
                }
            } else if !satisfies(value, spec.expected_type) {
                findings.push(type_finding(spec, row_index, value));
            } else if spec.has_range()
                && let Some(number) = numeric_value(value)
                && let Some(finding) = range_finding(spec, row_index, number)
            {
                findings.push(finding);
            }
        }
    }

    findings
}

fn null_finding(spec: &ColumnSpec, row_index: usize) -> Finding {
    let severity = if spec.required {
        Severity::Error
    } else {
        Severity::Warning
    };
    Finding::new(
        severity,
        FindingCode::NullValue,
        Some(spec.name.clone()),
        Some(row_index),
        format!("Row {}: column '{}' is empty", row_index + 1, spec.name),
    )
}

fn type_finding(spec: &ColumnSpec, row_index: usize, value: &CellValue) -> Finding {
    Finding::new(
        Severity::Error,
        FindingCode::TypeMismatch,
        Some(spec.name.clone()),
        Some(row_index),
        format!(
            "Row {}: column '{}' expects {}, found {} '{}'",
            row_index + 1,
            spec.name,
            spec.expected_type,
            value.kind(),
            value
        ),
    )
}

/// Bounds are inclusive. Non-numeric cells are left to the type check.
fn range_finding(spec: &ColumnSpec, row_index: usize, number: f64) -> Option<Finding> {
    let bound = match (spec.min_value, spec.max_value) {
        (Some(min), _) if number < min => format!("below the minimum {min}"),
        (_, Some(max)) if number > max => format!("above the maximum {max}"),
        _ => return None,
    };
    Some(Finding::new(
        Severity::Error,
        FindingCode::ValueOutOfRange,
        Some(spec.name.clone()),
        Some(row_index),
        format!(
            "Row {}: column '{}' value {number} is {bound}",
            row_index + 1,
            spec.name
        ),
    ))
}
