use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use sheetcheck_model::RuleSet;

use crate::error::{ConfigError, Result};
use crate::schema::AppConfig;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

impl AppConfig {
    /// Parse and check a YAML document. An empty document is the default
    /// configuration.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        parse(text, Path::new("<inline>"))
    }
}

fn parse(text: &str, path: &Path) -> Result<AppConfig> {
    let config: AppConfig = if text.trim().is_empty() {
        AppConfig::default()
    } else {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };
    config.check()?;
    Ok(config)
}

/// Read, parse, and check a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse(&text, path)?;
    info!(
        path = %path.display(),
        columns = config.validation.columns.len(),
        units = config.recipients.units.len(),
        "loaded configuration"
    );
    Ok(config)
}

/// The configuration file to use: `explicit` when given, otherwise
/// [`DEFAULT_CONFIG_FILE`] if it exists in the working directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        debug!(path = %fallback.display(), "using configuration from working directory");
        Some(fallback)
    } else {
        None
    }
}

/// Load only the rule set of a configuration file.
pub fn load_rules(path: impl AsRef<Path>) -> Result<RuleSet> {
    load_config(path)?.rules()
}
