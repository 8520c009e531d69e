//! Configuration loading for sheetcheck.
//!
//! A single YAML file holds the rule set, recipient routing, SMTP settings,
//! and notification options. Every section is optional.
//!
//! ```yaml
//! validation:
//!   columns:
//!     - { name: ID, type: integer, required: true, allow_null: false }
//!   settings: { null_warning_threshold: 0.5 }
//! recipients:
//!   default: [data-team@example.com]
//! ```

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, Result};
pub use loader::{DEFAULT_CONFIG_FILE, load_config, load_rules, resolve_config_path};
pub use schema::{
    AppConfig, ColumnEntry, DEFAULT_PREVIEW_LIMIT, EmailSection, LegacyBusinessUnit,
    NotificationSection, ValidationSection,
};
