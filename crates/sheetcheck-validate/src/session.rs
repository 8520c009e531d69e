//! Interactive validation state.
//!
//! A [`ValidationSession`] is owned by whatever surface lets a user pick a
//! file, a sheet, and a rule set and then press "validate". Every selection
//! bumps a generation counter; a report is only handed out while it was
//! computed for the current generation, so a surface can never show results
//! for data that is no longer selected.

use thiserror::Error;
use tracing::info;

use sheetcheck_model::{Dataset, RuleSet, ValidationReport};

use crate::engine::validate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no rule set selected")]
    NoRules,
    #[error("no dataset selected")]
    NoDataset,
}

/// A dataset together with where it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub source: String,
    pub sheet: Option<String>,
    pub dataset: Dataset,
}

#[derive(Debug, Clone)]
struct StampedReport {
    generation: u64,
    report: ValidationReport,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationSession {
    rules: Option<RuleSet>,
    dataset: Option<LoadedDataset>,
    report: Option<StampedReport>,
    generation: u64,
    last_error: Option<String>,
}

impl ValidationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        let mut session = Self::new();
        session.set_rules(rules);
        session
    }

    pub fn rules(&self) -> Option<&RuleSet> {
        self.rules.as_ref()
    }

    pub fn dataset(&self) -> Option<&LoadedDataset> {
        self.dataset.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the rule set; the current report becomes stale.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = Some(rules);
        self.invalidate();
    }

    /// Select a new dataset; the current report becomes stale.
    pub fn select_dataset(
        &mut self,
        source: impl Into<String>,
        sheet: Option<String>,
        dataset: Dataset,
    ) {
        self.dataset = Some(LoadedDataset {
            source: source.into(),
            sheet,
            dataset,
        });
        self.invalidate();
    }

    pub fn clear_dataset(&mut self) {
        self.dataset = None;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.report = None;
    }

    /// Run the engine from scratch on the current selection.
    ///
    /// On failure the error is also recorded and stays visible through
    /// [`last_error`](Self::last_error) until the next successful run.
    pub fn run(&mut self) -> Result<&ValidationReport, SessionError> {
        let (Some(rules), Some(loaded)) = (&self.rules, &self.dataset) else {
            let error = if self.rules.is_none() {
                SessionError::NoRules
            } else {
                SessionError::NoDataset
            };
            self.last_error = Some(error.to_string());
            return Err(error);
        };

        let report = validate(&loaded.dataset, rules);
        info!(
            source = %loaded.source,
            sheet = loaded.sheet.as_deref().unwrap_or_default(),
            generation = self.generation,
            status = report.status().as_str(),
            "session validation finished"
        );
        self.last_error = None;
        let stamped = self.report.insert(StampedReport {
            generation: self.generation,
            report,
        });
        Ok(&stamped.report)
    }

    /// The report for the current selection, if one has been computed.
    pub fn report(&self) -> Option<&ValidationReport> {
        self.report
            .as_ref()
            .filter(|stamped| stamped.generation == self.generation)
            .map(|stamped| &stamped.report)
    }

    /// Record a failure that happened outside the session, such as a file
    /// that could not be read.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
