//! Validation finding types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Finding severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed; makes the report fail.
    Error,
    /// Should be reviewed.
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What kind of problem a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCode {
    /// A required column is absent from the header.
    MissingColumn,
    /// A non-nullable column has a null cell.
    NullValue,
    /// A cell does not satisfy the column's expected type.
    TypeMismatch,
    /// A column's null ratio is above the configured threshold.
    HighNullRatio,
    /// Every cell of a row is null.
    EmptyRow,
    /// A row repeats an earlier row.
    DuplicateRow,
    /// A numeric cell lies outside the column's declared range.
    ValueOutOfRange,
    /// A row's share of null cells is above the configured threshold.
    SparseRow,
    /// A column holds one repeated value.
    ConstantColumn,
    /// A column holds text longer than the configured limit.
    LongText,
}

impl FindingCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingColumn => "missing_column",
            Self::NullValue => "null_value",
            Self::TypeMismatch => "type_mismatch",
            Self::HighNullRatio => "high_null_ratio",
            Self::EmptyRow => "empty_row",
            Self::DuplicateRow => "duplicate_row",
            Self::ValueOutOfRange => "value_out_of_range",
            Self::SparseRow => "sparse_row",
            Self::ConstantColumn => "constant_column",
            Self::LongText => "long_text",
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    severity: Severity,
    code: FindingCode,
    column: Option<String>,
    row_index: Option<usize>,
    message: String,
}

impl Finding {
    pub fn new(
        severity: Severity,
        code: FindingCode,
        column: Option<String>,
        row_index: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            column,
            row_index,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> FindingCode {
        self.code
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// 0-based position of the data row (the header is not counted).
    pub fn row_index(&self) -> Option<usize> {
        self.row_index
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
