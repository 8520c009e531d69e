use std::fmt;

use serde::{Deserialize, Serialize};

use crate::finding::{Finding, Severity};

/// Coarse outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Passed,
    PassedWithWarnings,
    Failed,
}

impl ValidationStatus {
    /// Failed iff there are errors; warnings alone only downgrade a pass.
    pub fn from_counts(error_count: usize, warning_count: usize) -> Self {
        if error_count > 0 {
            Self::Failed
        } else if warning_count > 0 {
            Self::PassedWithWarnings
        } else {
            Self::Passed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::PassedWithWarnings => "passed_with_warnings",
            Self::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::PassedWithWarnings => "Passed with warnings",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

/// Result of one validation run.
///
/// Built in one step from the findings; counts and status are derived and
/// the report cannot be changed afterwards. A new run builds a new report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    findings: Vec<Finding>,
    summary: ReportSummary,
    status: ValidationStatus,
}

impl ValidationReport {
    pub fn new(findings: Vec<Finding>, total_rows: usize, total_columns: usize) -> Self {
        let error_count = findings
            .iter()
            .filter(|finding| finding.severity() == Severity::Error)
            .count();
        let warning_count = findings.len() - error_count;
        let summary = ReportSummary {
            total_rows,
            total_columns,
            error_count,
            warning_count,
        };
        Self {
            findings,
            summary,
            status: ValidationStatus::from_counts(error_count, warning_count),
        }
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    pub fn error_count(&self) -> usize {
        self.summary.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.summary.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|finding| finding.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|finding| !finding.is_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_derivation() {
        assert_eq!(ValidationStatus::from_counts(0, 0), ValidationStatus::Passed);
        assert_eq!(
            ValidationStatus::from_counts(0, 3),
            ValidationStatus::PassedWithWarnings
        );
        assert_eq!(ValidationStatus::from_counts(1, 0), ValidationStatus::Failed);
        assert_eq!(ValidationStatus::from_counts(2, 5), ValidationStatus::Failed);
    }
}
