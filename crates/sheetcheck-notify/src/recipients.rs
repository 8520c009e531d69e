//! Recipient routing.
//!
//! Findings are routed to business units through their column name; findings
//! without a column use the [`GENERAL_BUCKET`] key. Anything that cannot be
//! routed goes to the default list.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use sheetcheck_model::ValidationReport;

use crate::error::RecipientError;

/// Route key for findings that are not tied to a column.
pub const GENERAL_BUCKET: &str = "general";

/// An organizational recipient group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusinessUnit {
    /// Display name used in the message greeting.
    pub name: String,
    pub emails: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecipientMap {
    /// Fallback addresses for findings without a route.
    #[serde(default)]
    pub default: Vec<String>,
    /// Copied whenever the default list is used.
    #[serde(default)]
    pub default_cc: Vec<String>,
    /// Units keyed by identifier.
    #[serde(default)]
    pub units: BTreeMap<String, BusinessUnit>,
    /// Column name (or [`GENERAL_BUCKET`]) to unit identifier.
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

impl RecipientMap {
    fn unit_for(&self, key: &str) -> Option<&BusinessUnit> {
        self.columns.get(key).and_then(|unit| self.units.get(unit))
    }
}

/// Resolved addresses for one report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Recipients {
    pub to: BTreeSet<String>,
    pub cc: BTreeSet<String>,
    /// Display names of the units that were routed to.
    pub units: BTreeSet<String>,
}

impl Recipients {
    /// Every address, `to` and `cc` together.
    pub fn all(&self) -> BTreeSet<String> {
        self.to.union(&self.cc).cloned().collect()
    }
}

/// Route a report's findings to recipients.
///
/// A report without findings goes to the default list. When routing only
/// produced cc addresses they are promoted to `to`.
pub fn route(
    report: &ValidationReport,
    map: &RecipientMap,
) -> Result<Recipients, RecipientError> {
    let mut recipients = Recipients::default();
    let mut use_default = report.findings().is_empty();

    for finding in report.findings() {
        let key = finding.column().unwrap_or(GENERAL_BUCKET);
        match map.unit_for(key) {
            Some(unit) => {
                recipients.to.extend(unit.emails.iter().cloned());
                recipients.cc.extend(unit.cc.iter().cloned());
                recipients.units.insert(unit.name.clone());
            }
            None => use_default = true,
        }
    }
    if use_default {
        recipients.to.extend(map.default.iter().cloned());
        recipients.cc.extend(map.default_cc.iter().cloned());
    }
    if recipients.to.is_empty() {
        recipients.to = std::mem::take(&mut recipients.cc);
    }
    recipients.cc.retain(|address| !recipients.to.contains(address));

    if recipients.to.is_empty() {
        return Err(RecipientError::NoRecipients);
    }
    Ok(recipients)
}

/// Every address a report's notification should reach.
pub fn resolve_recipients(
    report: &ValidationReport,
    map: &RecipientMap,
) -> Result<BTreeSet<String>, RecipientError> {
    route(report, map).map(|recipients| recipients.all())
}

#[cfg(test)]
mod tests {
    use sheetcheck_model::{Finding, FindingCode, Severity};

    use super::*;

    fn map() -> RecipientMap {
        RecipientMap {
            default: vec!["data@example.com".to_string()],
            default_cc: Vec::new(),
            units: BTreeMap::from([
                (
                    "finance".to_string(),
                    BusinessUnit {
                        name: "Finance".to_string(),
                        emails: vec!["fin@example.com".to_string()],
                        cc: vec!["cfo@example.com".to_string()],
                    },
                ),
                (
                    "ops".to_string(),
                    BusinessUnit {
                        name: "Operations".to_string(),
                        emails: vec!["ops@example.com".to_string()],
                        cc: vec!["fin@example.com".to_string()],
                    },
                ),
            ]),
            columns: BTreeMap::from([
                ("Amount".to_string(), "finance".to_string()),
                ("Site".to_string(), "ops".to_string()),
                ("Region".to_string(), "nobody".to_string()),
            ]),
        }
    }

    fn report(columns: &[Option<&str>]) -> ValidationReport {
        let findings = columns
            .iter()
            .map(|column| {
                Finding::new(
                    Severity::Error,
                    FindingCode::EmptyRow,
                    column.map(str::to_string),
                    None,
                    "msg",
                )
            })
            .collect();
        ValidationReport::new(findings, 1, 1)
    }

    #[test]
    fn routes_by_column() {
        let recipients = route(&report(&[Some("Amount")]), &map()).unwrap();
        assert_eq!(
            recipients.to,
            BTreeSet::from(["fin@example.com".to_string()])
        );
        assert_eq!(
            recipients.cc,
            BTreeSet::from(["cfo@example.com".to_string()])
        );
        assert_eq!(recipients.units, BTreeSet::from(["Finance".to_string()]));
    }

    #[test]
    fn cc_never_repeats_a_to_address() {
        let recipients = route(&report(&[Some("Amount"), Some("Site")]), &map()).unwrap();
        assert!(recipients.to.contains("fin@example.com"));
        assert!(!recipients.cc.contains("fin@example.com"));
    }

    #[test]
    fn unknown_routes_fall_back_to_default() {
        let all = resolve_recipients(&report(&[Some("Other"), Some("Region")]), &map()).unwrap();
        assert_eq!(all, BTreeSet::from(["data@example.com".to_string()]));
    }

    #[test]
    fn general_bucket_routes_column_less_findings() {
        let mut map = map();
        map.columns
            .insert(GENERAL_BUCKET.to_string(), "ops".to_string());
        let recipients = route(&report(&[None]), &map).unwrap();
        assert_eq!(
            recipients.to,
            BTreeSet::from(["ops@example.com".to_string()])
        );
    }

    #[test]
    fn empty_resolution_is_an_error() {
        let err = route(&report(&[Some("Other")]), &RecipientMap::default()).unwrap_err();
        assert_eq!(err, RecipientError::NoRecipients);
    }
}
