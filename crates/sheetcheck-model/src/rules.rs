//! Rule set types.
//!
//! A [`RuleSet`] is the declarative description a dataset is checked
//! against. It is validated once when built; the engine never sees an
//! invalid one.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RuleSetError;

/// Type a column's non-null cells are expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedType {
    #[default]
    String,
    Integer,
    Float,
    Date,
    Boolean,
}

impl ExpectedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedType::String => "string",
            ExpectedType::Integer => "integer",
            ExpectedType::Float => "float",
            ExpectedType::Date => "date",
            ExpectedType::Boolean => "boolean",
        }
    }

    pub const fn all() -> &'static [Self] {
        &[
            Self::String,
            Self::Integer,
            Self::Float,
            Self::Date,
            Self::Boolean,
        ]
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpectedType {
    type Err = String;

    /// Parse a type name from configuration (case-insensitive, with aliases).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "str" | "text" => Ok(ExpectedType::String),
            "integer" | "int" => Ok(ExpectedType::Integer),
            "float" | "number" | "double" | "decimal" => Ok(ExpectedType::Float),
            "date" | "datetime" => Ok(ExpectedType::Date),
            "boolean" | "bool" => Ok(ExpectedType::Boolean),
            _ => Err(format!("Unknown column type: {s}")),
        }
    }
}

/// Constraints declared for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub expected_type: ExpectedType,
    pub required: bool,
    pub allow_null: bool,
    /// Inclusive lower bound for numeric cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Inclusive upper bound for numeric cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

impl ColumnSpec {
    /// An optional, nullable column of the given type.
    pub fn new(name: impl Into<String>, expected_type: ExpectedType) -> Self {
        Self {
            name: name.into(),
            expected_type,
            required: false,
            allow_null: true,
            min_value: None,
            max_value: None,
        }
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.with_required(true)
    }

    #[must_use]
    pub fn not_null(self) -> Self {
        self.with_allow_null(false)
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_allow_null(mut self, allow_null: bool) -> Self {
        self.allow_null = allow_null;
        self
    }

    #[must_use]
    pub fn with_min_value(mut self, min_value: f64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    #[must_use]
    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn has_range(&self) -> bool {
        self.min_value.is_some() || self.max_value.is_some()
    }
}

/// Rows to leave out of every check, picked by the value of one column.
///
/// Values match after trimming, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowFilter {
    pub column: String,
    pub values: Vec<String>,
}

impl RowFilter {
    pub fn new<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        self.values
            .iter()
            .any(|value| value.trim().eq_ignore_ascii_case(text))
    }
}

/// Global settings of a rule set. Every dataset-level check is opt-in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleSettings {
    /// Warn once per column whose null ratio is above this value.
    pub null_warning_threshold: Option<f64>,
    /// Warn for rows where every cell is null.
    pub flag_empty_rows: bool,
    /// Warn for rows identical to an earlier row.
    pub flag_duplicate_rows: bool,
    /// Match rule column names against the header ignoring ASCII case.
    pub case_insensitive_columns: bool,
    /// Columns whose name contains one of these (ignoring case) are left
    /// out of every check.
    pub skip_column_patterns: Vec<String>,
    /// Rows left out of every check.
    pub skip_rows: Option<RowFilter>,
    /// Warn for rows whose share of null cells is above this value.
    pub sparse_row_threshold: Option<f64>,
    /// Warn for columns holding one repeated value.
    pub flag_constant_columns: bool,
    /// Warn for columns with text longer than this many characters.
    pub max_text_length: Option<usize>,
}

impl RuleSettings {
    /// True when `column` matches a skip pattern.
    pub fn skips_column(&self, column: &str) -> bool {
        if self.skip_column_patterns.is_empty() {
            return false;
        }
        let column = column.to_lowercase();
        self.skip_column_patterns
            .iter()
            .any(|pattern| column.contains(&pattern.trim().to_lowercase()))
    }
}

/// Ordered column specifications plus global settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RuleSet {
    columns: Vec<ColumnSpec>,
    settings: RuleSettings,
}

impl RuleSet {
    pub fn new(columns: Vec<ColumnSpec>, settings: RuleSettings) -> Result<Self, RuleSetError> {
        check_threshold("null_warning_threshold", settings.null_warning_threshold)?;
        check_threshold("sparse_row_threshold", settings.sparse_row_threshold)?;
        if settings
            .skip_column_patterns
            .iter()
            .any(|pattern| pattern.trim().is_empty())
        {
            return Err(RuleSetError::BlankSkipPattern);
        }
        if let Some(filter) = &settings.skip_rows
            && filter.column.trim().is_empty()
        {
            return Err(RuleSetError::BlankRowFilterColumn);
        }
        let mut seen = HashSet::new();
        for (position, column) in columns.iter().enumerate() {
            let name = column.name.trim();
            if name.is_empty() {
                return Err(RuleSetError::BlankColumnName {
                    position: position + 1,
                });
            }
            let key = if settings.case_insensitive_columns {
                name.to_ascii_uppercase()
            } else {
                name.to_string()
            };
            if !seen.insert(key) {
                return Err(RuleSetError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
            check_range(column)?;
        }
        Ok(Self { columns, settings })
    }

    pub fn from_columns(columns: Vec<ColumnSpec>) -> Result<Self, RuleSetError> {
        Self::new(columns, RuleSettings::default())
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|column| column.required)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn check_threshold(setting: &'static str, value: Option<f64>) -> Result<(), RuleSetError> {
    match value {
        Some(value) if !(0.0..=1.0).contains(&value) => {
            Err(RuleSetError::InvalidThreshold { setting, value })
        }
        _ => Ok(()),
    }
}

fn check_range(column: &ColumnSpec) -> Result<(), RuleSetError> {
    let invalid = || RuleSetError::InvalidRange {
        column: column.name.clone(),
        min: column.min_value,
        max: column.max_value,
    };
    let bounds = [column.min_value, column.max_value];
    if bounds.iter().flatten().any(|bound| !bound.is_finite()) {
        return Err(invalid());
    }
    if let (Some(min), Some(max)) = (column.min_value, column.max_value)
        && min > max
    {
        return Err(invalid());
    }
    Ok(())
}
