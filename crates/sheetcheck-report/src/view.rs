//! Structured summary of a report for table and JSON surfaces.

use serde::Serialize;

use sheetcheck_model::{Finding, FindingCode, ReportSummary, ValidationReport, ValidationStatus};

/// Finding counts for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnBreakdown {
    pub column: String,
    pub errors: usize,
    pub warnings: usize,
    pub nulls: usize,
    pub type_mismatches: usize,
}

impl ColumnBreakdown {
    fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            errors: 0,
            warnings: 0,
            nulls: 0,
            type_mismatches: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }
}

/// What a surface needs to show a report without walking the findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub status: ValidationStatus,
    pub summary: ReportSummary,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    /// Columns in order of their first finding.
    pub columns: Vec<ColumnBreakdown>,
    pub preview: Vec<Finding>,
    /// Findings left out of `preview`.
    pub hidden_count: usize,
}

/// Build a [`ReportView`] showing at most `preview_limit` findings.
pub fn render_summary(report: &ValidationReport, preview_limit: usize) -> ReportView {
    let findings = report.findings();
    let preview: Vec<Finding> = findings.iter().take(preview_limit).cloned().collect();
    ReportView {
        status: report.status(),
        summary: *report.summary(),
        errors: report.errors().cloned().collect(),
        warnings: report.warnings().cloned().collect(),
        columns: column_breakdown(findings),
        hidden_count: findings.len() - preview.len(),
        preview,
    }
}

pub(crate) fn column_breakdown(findings: &[Finding]) -> Vec<ColumnBreakdown> {
    let mut columns: Vec<ColumnBreakdown> = Vec::new();
    for finding in findings {
        let Some(name) = finding.column() else {
            continue;
        };
        let index = match columns.iter().position(|entry| entry.column == name) {
            Some(index) => index,
            None => {
                columns.push(ColumnBreakdown::new(name));
                columns.len() - 1
            }
        };
        let entry = &mut columns[index];
        if finding.is_error() {
            entry.errors += 1;
        } else {
            entry.warnings += 1;
        }
        match finding.code() {
            FindingCode::NullValue => entry.nulls += 1,
            FindingCode::TypeMismatch => entry.type_mismatches += 1,
            _ => {}
        }
    }
    columns
}
