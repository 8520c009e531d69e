//! Configuration document types.
//!
//! Unknown top-level sections are ignored so older config files keep
//! loading; column entries and rule settings reject unknown keys to catch
//! typos.

use lettre::Address;
use serde::Deserialize;

use sheetcheck_model::{ColumnSpec, ExpectedType, RuleSet, RuleSettings};
use sheetcheck_notify::{
    DEFAULT_SMTP_PORT, NotificationPolicy, RecipientMap, SmtpCredentials, SmtpSecurity,
    SmtpSettings,
};
use sheetcheck_report::DEFAULT_SUBJECT_PREFIX;

use crate::error::{ConfigError, Result};

/// Number of findings listed in message bodies and table previews by default.
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub validation: ValidationSection,
    #[serde(default)]
    pub recipients: RecipientMap,
    /// Single-unit form of `recipients`.
    #[serde(default)]
    pub business_unit: Option<LegacyBusinessUnit>,
    #[serde(default)]
    pub email: Option<EmailSection>,
    #[serde(default)]
    pub notification: NotificationSection,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ValidationSection {
    #[serde(default)]
    pub columns: Vec<ColumnEntry>,
    /// Shorthand: these columns are required.
    #[serde(default)]
    pub required_columns: Vec<String>,
    /// Shorthand: these columns may not hold nulls.
    #[serde(default)]
    pub non_nullable_columns: Vec<String>,
    #[serde(default)]
    pub settings: RuleSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnEntry {
    pub name: String,
    /// Type name; see [`ExpectedType`]'s `FromStr` for accepted spellings.
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_true")]
    pub allow_null: bool,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyBusinessUnit {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub cc_emails: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailSection {
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub security: SmtpSecurity,
    pub sender_email: String,
    /// Login name; defaults to `sender_email` when a password is present.
    #[serde(default)]
    pub username: Option<String>,
    /// Environment variable holding the SMTP password.
    #[serde(default)]
    pub password_env: Option<String>,
    /// Inline password. Prefer `password_env`.
    #[serde(default)]
    pub sender_password: Option<String>,
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationSection {
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
    #[serde(default)]
    pub notify_on_success: bool,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            subject_prefix: default_subject_prefix(),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            notify_on_success: false,
        }
    }
}

fn default_subject_prefix() -> String {
    DEFAULT_SUBJECT_PREFIX.to_string()
}

fn default_preview_limit() -> usize {
    DEFAULT_PREVIEW_LIMIT
}

impl AppConfig {
    /// Build the rule set.
    ///
    /// Declared columns come first, in order. Shorthand names that are
    /// already declared only tighten the declared column; the others are
    /// appended as string columns in the order they first appear.
    pub fn rules(&self) -> Result<RuleSet> {
        let section = &self.validation;
        let mut columns = Vec::with_capacity(section.columns.len());
        for entry in &section.columns {
            let expected_type = match &entry.type_name {
                Some(value) => value.parse::<ExpectedType>().map_err(|_| {
                    ConfigError::UnknownColumnType {
                        column: entry.name.clone(),
                        value: value.clone(),
                    }
                })?,
                None => ExpectedType::default(),
            };
            let mut spec = ColumnSpec::new(entry.name.clone(), expected_type)
                .with_required(entry.required)
                .with_allow_null(entry.allow_null);
            spec.min_value = entry.min_value;
            spec.max_value = entry.max_value;
            columns.push(spec);
        }

        for name in &section.required_columns {
            upsert(&mut columns, name).required = true;
        }
        for name in &section.non_nullable_columns {
            upsert(&mut columns, name).allow_null = false;
        }

        Ok(RuleSet::new(columns, section.settings.clone())?)
    }

    /// Recipients with the single-unit form folded into the default list.
    pub fn recipient_map(&self) -> RecipientMap {
        let mut map = self.recipients.clone();
        if let Some(unit) = &self.business_unit {
            push_unique(&mut map.default, &unit.email);
            for cc in &unit.cc_emails {
                push_unique(&mut map.default_cc, cc);
            }
        }
        map
    }

    /// Greeting name from the single-unit form, if configured.
    pub fn default_unit_name(&self) -> Option<&str> {
        self.business_unit
            .as_ref()
            .and_then(|unit| unit.name.as_deref())
    }

    pub fn notification_policy(&self) -> NotificationPolicy {
        NotificationPolicy {
            notify_on_success: self.notification.notify_on_success,
        }
    }

    /// SMTP settings, reading the password from the process environment.
    pub fn smtp_settings(&self) -> Result<SmtpSettings> {
        self.smtp_settings_with(|var| std::env::var(var).ok())
    }

    /// SMTP settings with a custom environment lookup.
    pub fn smtp_settings_with<F>(&self, lookup: F) -> Result<SmtpSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = self.email.as_ref().ok_or(ConfigError::MissingEmailSection)?;
        let password = match &email.password_env {
            Some(var) => Some(lookup(var).ok_or_else(|| ConfigError::MissingPasswordEnv {
                var: var.clone(),
            })?),
            None => email.sender_password.clone(),
        };
        let credentials = password.map(|password| SmtpCredentials {
            username: email
                .username
                .clone()
                .unwrap_or_else(|| email.sender_email.clone()),
            password,
        });
        Ok(SmtpSettings {
            server: email.smtp_server.clone(),
            port: email.smtp_port,
            security: email.security,
            sender: email.sender_email.clone(),
            credentials,
        })
    }

    /// Cross-field checks that serde cannot express.
    pub fn check(&self) -> Result<()> {
        self.rules()?;

        for (column, unit) in &self.recipients.columns {
            if !self.recipients.units.contains_key(unit) {
                return Err(ConfigError::UnknownUnit {
                    column: column.clone(),
                    unit: unit.clone(),
                });
            }
        }

        check_addresses("recipients.default", &self.recipients.default)?;
        check_addresses("recipients.default_cc", &self.recipients.default_cc)?;
        for (key, unit) in &self.recipients.units {
            check_addresses(&format!("recipients.units.{key}.emails"), &unit.emails)?;
            check_addresses(&format!("recipients.units.{key}.cc"), &unit.cc)?;
        }
        if let Some(unit) = &self.business_unit {
            check_addresses("business_unit.email", std::slice::from_ref(&unit.email))?;
            check_addresses("business_unit.cc_emails", &unit.cc_emails)?;
        }
        if let Some(email) = &self.email {
            check_addresses("email.sender_email", std::slice::from_ref(&email.sender_email))?;
        }
        Ok(())
    }
}

fn upsert<'a>(columns: &'a mut Vec<ColumnSpec>, name: &str) -> &'a mut ColumnSpec {
    let index = match columns.iter().position(|column| column.name == name) {
        Some(index) => index,
        None => {
            columns.push(ColumnSpec::new(name, ExpectedType::String));
            columns.len() - 1
        }
    };
    &mut columns[index]
}

fn push_unique(list: &mut Vec<String>, address: &str) {
    if !list.iter().any(|existing| existing == address) {
        list.push(address.to_string());
    }
}

fn check_addresses(field: &str, addresses: &[String]) -> Result<()> {
    for address in addresses {
        // Same parser the SMTP transport uses, so a bad address is a config
        // error here rather than a delivery error later.
        if address.trim().parse::<Address>().is_err() {
            return Err(ConfigError::InvalidAddress {
                field: field.to_string(),
                address: address.clone(),
            });
        }
    }
    Ok(())
}
