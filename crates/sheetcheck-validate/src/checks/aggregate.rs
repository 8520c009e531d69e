//! Opt-in dataset-level checks.
//!
//! Column-level checks run over the in-scope rule columns, row-level checks
//! over the in-scope cells of each row.

use std::collections::{HashMap, HashSet};

use sheetcheck_model::{CellValue, Finding, FindingCode, Row, Severity};

use super::scope::Scope;

/// One warning per rule set column whose null ratio exceeds the threshold.
///
/// Columns absent from the dataset and datasets without rows are skipped.
pub fn null_ratio(scope: &Scope<'_>, threshold: f64) -> Vec<Finding> {
    let total = scope.rows.len();
    if total == 0 {
        return Vec::new();
    }
    let mut findings = Vec::new();
    for &(spec, index) in &scope.present {
        let nulls = scope
            .rows
            .iter()
            .filter(|(_, row)| row.get(index).is_none_or(CellValue::is_null))
            .count();
        let ratio = nulls as f64 / total as f64;
        if ratio > threshold {
            findings.push(Finding::new(
                Severity::Warning,
                FindingCode::HighNullRatio,
                Some(spec.name.clone()),
                None,
                format!(
                    "Column '{}' is {:.1}% empty ({nulls} of {total} rows, threshold {:.1}%)",
                    spec.name,
                    ratio * 100.0,
                    threshold * 100.0
                ),
            ));
        }
    }
    findings
}

/// One warning per rule set column whose non-null cells all hold the same
/// value. Needs at least two non-null cells.
pub fn constant_columns(scope: &Scope<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for &(spec, index) in &scope.present {
        let mut values = HashSet::new();
        let mut filled = 0;
        for (_, row) in &scope.rows {
            if let Some(cell) = row.get(index).filter(|cell| !cell.is_null()) {
                filled += 1;
                values.insert(cell_key(cell));
            }
        }
        if filled >= 2 && values.len() == 1 {
            findings.push(Finding::new(
                Severity::Warning,
                FindingCode::ConstantColumn,
                Some(spec.name.clone()),
                None,
                format!(
                    "Column '{}' holds the same value in all {filled} non-empty rows",
                    spec.name
                ),
            ));
        }
    }
    findings
}

/// One warning per rule set column with text cells longer than `limit`
/// characters.
pub fn long_text(scope: &Scope<'_>, limit: usize) -> Vec<Finding> {
    let mut findings = Vec::new();
    for &(spec, index) in &scope.present {
        let mut count = 0;
        let mut longest = 0;
        for (_, row) in &scope.rows {
            if let Some(CellValue::String(text)) = row.get(index) {
                let length = text.trim().chars().count();
                if length > limit {
                    count += 1;
                    longest = longest.max(length);
                }
            }
        }
        if count > 0 {
            findings.push(Finding::new(
                Severity::Warning,
                FindingCode::LongText,
                Some(spec.name.clone()),
                None,
                format!(
                    "Column '{}' has text longer than {limit} characters in {count} row(s) (longest {longest})",
                    spec.name
                ),
            ));
        }
    }
    findings
}

/// One warning per row whose cells are all null.
pub fn empty_rows(scope: &Scope<'_>) -> Vec<Finding> {
    scope
        .rows
        .iter()
        .filter(|(_, row)| scope.is_blank(row))
        .map(|&(row_index, _)| {
            Finding::new(
                Severity::Warning,
                FindingCode::EmptyRow,
                None,
                Some(row_index),
                format!("Row {} is empty", row_index + 1),
            )
        })
        .collect()
}

/// One warning per row whose null ratio exceeds the threshold.
///
/// With `skip_blank` set, rows with no values at all are left to
/// [`empty_rows`].
pub fn sparse_rows(scope: &Scope<'_>, threshold: f64, skip_blank: bool) -> Vec<Finding> {
    let width = scope.data_columns.len();
    if width == 0 {
        return Vec::new();
    }
    let mut findings = Vec::new();
    for &(row_index, row) in &scope.rows {
        let nulls = scope.cells(row).filter(|cell| cell.is_null()).count();
        if skip_blank && nulls == width {
            continue;
        }
        let ratio = nulls as f64 / width as f64;
        if ratio > threshold {
            findings.push(Finding::new(
                Severity::Warning,
                FindingCode::SparseRow,
                None,
                Some(row_index),
                format!(
                    "Row {} is {:.1}% empty ({nulls} of {width} cells, threshold {:.1}%)",
                    row_index + 1,
                    ratio * 100.0,
                    threshold * 100.0
                ),
            ));
        }
    }
    findings
}

/// One warning per row identical to an earlier row.
///
/// Blank rows are left to [`empty_rows`]. Null and blank-string cells
/// compare equal.
pub fn duplicate_rows(scope: &Scope<'_>) -> Vec<Finding> {
    let mut first_seen: HashMap<Vec<String>, usize> = HashMap::new();
    let mut findings = Vec::new();
    for &(row_index, row) in &scope.rows {
        if scope.is_blank(row) {
            continue;
        }
        let key = row_key(scope, row);
        match first_seen.get(&key) {
            Some(&original) => findings.push(Finding::new(
                Severity::Warning,
                FindingCode::DuplicateRow,
                None,
                Some(row_index),
                format!("Row {} duplicates row {}", row_index + 1, original + 1),
            )),
            None => {
                first_seen.insert(key, row_index);
            }
        }
    }
    findings
}

fn row_key(scope: &Scope<'_>, row: &Row) -> Vec<String> {
    scope.cells(row).map(cell_key).collect()
}

fn cell_key(cell: &CellValue) -> String {
    if cell.is_null() {
        String::new()
    } else {
        format!("{}:{cell}", cell.kind())
    }
}
