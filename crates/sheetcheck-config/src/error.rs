//! Error types for configuration loading.

use std::path::PathBuf;

use sheetcheck_model::RuleSetError;
use thiserror::Error;

/// A configuration that cannot be used. Fatal to the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("column '{column}' has unknown type '{value}'")]
    UnknownColumnType { column: String, value: String },

    #[error("invalid rule set: {0}")]
    Rules(#[from] RuleSetError),

    #[error("recipient route '{column}' names unknown business unit '{unit}'")]
    UnknownUnit { column: String, unit: String },

    #[error("invalid email address '{address}' in {field}")]
    InvalidAddress { field: String, address: String },

    #[error("no email section configured; SMTP delivery needs smtp_server and sender_email")]
    MissingEmailSection,

    #[error("SMTP password environment variable {var} is not set")]
    MissingPasswordEnv { var: String },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
