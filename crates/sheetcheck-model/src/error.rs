use thiserror::Error;

/// Structural problems with a dataset being assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("duplicate column '{name}' in dataset header")]
    DuplicateColumn { name: String },

    #[error("row {row_index} has {found} cells but the header has {expected} columns")]
    RowWidth {
        row_index: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row_index} refers to unknown column '{name}'")]
    UnknownColumn { row_index: usize, name: String },
}

/// A rule set that cannot be used for validation.
///
/// These are configuration errors: they are raised while the rule set is
/// built, before any dataset is looked at.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleSetError {
    #[error("duplicate column '{name}' in rule set")]
    DuplicateColumn { name: String },

    #[error("rule set column #{position} has a blank name")]
    BlankColumnName { position: usize },

    #[error("{setting} {value} is outside 0..=1")]
    InvalidThreshold { setting: &'static str, value: f64 },

    #[error("column '{column}' has an invalid value range (min {min:?}, max {max:?})")]
    InvalidRange {
        column: String,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("skip_column_patterns holds a blank pattern")]
    BlankSkipPattern,

    #[error("skip_rows names a blank column")]
    BlankRowFilterColumn,
}
