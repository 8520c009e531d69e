//! The `check` flow: load config, read sheets, validate, notify.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use sheetcheck_config::{AppConfig, load_config, resolve_config_path};
use sheetcheck_ingest::{Workbook, WorkbookFormat};
use sheetcheck_model::{ValidationReport, ValidationStatus};
use sheetcheck_notify::{
    DispatchOutcome, Dispatcher, LogTransport, MailTransport, NotifyError, SmtpMailer,
};
use sheetcheck_report::MessageContext;
use sheetcheck_validate::validate;

use crate::exit;
use crate::logging::{log_data_enabled, redact_value};

/// Which sheets of the workbook to check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelection {
    #[default]
    First,
    Named(String),
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyMode {
    #[default]
    Off,
    Send,
    /// Build the messages and log them instead of sending.
    DryRun,
}

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub file: PathBuf,
    pub sheets: SheetSelection,
    pub config: Option<PathBuf>,
    pub notify: NotifyMode,
    /// Overrides `notification.preview_limit`.
    pub preview_limit: Option<usize>,
}

impl CheckOptions {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            sheets: SheetSelection::default(),
            config: None,
            notify: NotifyMode::default(),
            preview_limit: None,
        }
    }
}

/// What happened to the notification of one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NotificationStatus {
    Skipped,
    Sent { to: Vec<String>, cc: Vec<String> },
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct SheetResult {
    pub sheet: String,
    pub report: ValidationReport,
    /// `None` when notifications were not requested.
    pub notification: Option<NotificationStatus>,
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub file: PathBuf,
    pub sheets: Vec<SheetResult>,
    pub preview_limit: usize,
}

impl CheckResult {
    /// The worst status across all checked sheets.
    pub fn status(&self) -> ValidationStatus {
        let errors = self.sheets.iter().map(|s| s.report.error_count()).sum();
        let warnings = self.sheets.iter().map(|s| s.report.warning_count()).sum();
        ValidationStatus::from_counts(errors, warnings)
    }

    pub fn transport_failed(&self) -> bool {
        self.sheets
            .iter()
            .any(|s| matches!(s.notification, Some(NotificationStatus::Failed { .. })))
    }

    /// A delivery failure outranks the validation outcome.
    pub fn exit_code(&self) -> i32 {
        if self.transport_failed() {
            exit::TRANSPORT_ERROR
        } else if self.status() == ValidationStatus::Failed {
            exit::VALIDATION_FAILED
        } else {
            exit::SUCCESS
        }
    }
}

/// Load the configuration named on the command line, or `config.yaml` from
/// the working directory, or the defaults.
pub fn load_app_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match resolve_config_path(explicit) {
        Some(path) => {
            load_config(&path).with_context(|| format!("load config {}", path.display()))
        }
        None => {
            debug!("no configuration file; using defaults");
            Ok(AppConfig::default())
        }
    }
}

pub fn run_check(options: &CheckOptions) -> Result<CheckResult> {
    let config = load_app_config(options.config.as_deref())?;
    let transport: Option<Box<dyn MailTransport>> = match options.notify {
        NotifyMode::Off => None,
        NotifyMode::DryRun => {
            let transport = LogTransport::new().with_body(log_data_enabled());
            Some(Box::new(transport))
        }
        NotifyMode::Send => {
            let settings = config.smtp_settings().context("configure SMTP delivery")?;
            let mailer = SmtpMailer::new(&settings).context("set up SMTP transport")?;
            Some(Box::new(mailer))
        }
    };
    check_with(options, &config, transport.as_deref())
}

/// Run a check with an already loaded config and an optional transport.
pub fn check_with(
    options: &CheckOptions,
    config: &AppConfig,
    transport: Option<&dyn MailTransport>,
) -> Result<CheckResult> {
    let file = &options.file;
    let span = info_span!("check", file = %file.display());
    let _guard = span.enter();
    let start = Instant::now();

    let rules = config.rules().context("build rule set")?;
    let preview_limit = options
        .preview_limit
        .unwrap_or(config.notification.preview_limit);
    let dispatcher = Dispatcher::new(config.recipient_map(), config.notification_policy());

    let mut workbook =
        Workbook::open(file).with_context(|| format!("open {}", file.display()))?;
    let sheet_names = match &options.sheets {
        SheetSelection::First => {
            let first = workbook.sheet_names().into_iter().next();
            vec![first.ok_or_else(|| sheetcheck_ingest::IngestError::NoSheets {
                path: file.clone(),
            })?]
        }
        SheetSelection::Named(name) => vec![name.clone()],
        SheetSelection::All => workbook.sheet_names(),
    };

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet in sheet_names {
        let dataset = workbook
            .read_sheet(&sheet)
            .with_context(|| format!("read sheet '{sheet}' of {}", file.display()))?;
        let report = validate(&dataset, &rules);
        log_findings(&sheet, &report);

        let notification = match transport {
            Some(transport) => {
                let context =
                    message_context(file, workbook.format(), &sheet, config, preview_limit);
                Some(notify_sheet(&dispatcher, &report, &context, transport)?)
            }
            None => None,
        };
        sheets.push(SheetResult {
            sheet,
            report,
            notification,
        });
    }

    let result = CheckResult {
        file: file.clone(),
        sheets,
        preview_limit,
    };
    info!(
        sheets = result.sheets.len(),
        status = result.status().as_str(),
        duration_ms = start.elapsed().as_millis(),
        "check complete"
    );
    Ok(result)
}

/// Delivery failures are recorded so the remaining sheets still run.
/// Recipient errors are configuration problems and stop the run.
fn notify_sheet(
    dispatcher: &Dispatcher,
    report: &ValidationReport,
    context: &MessageContext,
    transport: &dyn MailTransport,
) -> Result<NotificationStatus> {
    match dispatcher.dispatch(report, context, transport) {
        Ok(DispatchOutcome::Skipped) => Ok(NotificationStatus::Skipped),
        Ok(DispatchOutcome::Sent(payload)) => Ok(NotificationStatus::Sent {
            to: payload.recipients.to.into_iter().collect(),
            cc: payload.recipients.cc.into_iter().collect(),
        }),
        Err(NotifyError::Transport(error)) => {
            warn!(error = %error, "notification not delivered");
            Ok(NotificationStatus::Failed {
                error: error.to_string(),
            })
        }
        Err(error @ NotifyError::Recipients(_)) => Err(anyhow::Error::new(error)
            .context(format!("route notification for {}", context.file_name))),
    }
}

fn message_context(
    file: &Path,
    format: WorkbookFormat,
    sheet: &str,
    config: &AppConfig,
    body_limit: usize,
) -> MessageContext {
    let file_name = file
        .file_name()
        .map_or_else(|| file.display().to_string(), |name| name.to_string_lossy().into_owned());
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut context = MessageContext::new(file_name)
        .with_generated_at(generated_at)
        .with_subject_prefix(config.notification.subject_prefix.clone())
        .with_body_limit(body_limit);
    // A csv file has no sheet of its own.
    if format != WorkbookFormat::Csv {
        context = context.with_sheet(sheet);
    }
    if config.recipients.units.is_empty()
        && let Some(unit) = config.default_unit_name()
    {
        context = context.with_unit(unit);
    }
    context
}

fn log_findings(sheet: &str, report: &ValidationReport) {
    for finding in report.findings() {
        debug!(
            sheet,
            severity = finding.severity().label(),
            code = finding.code().as_str(),
            column = finding.column().unwrap_or("-"),
            row = finding.row_index().map(|row| row + 1),
            message = redact_value(finding.message()),
            "finding"
        );
    }
    info!(
        sheet,
        rows = report.summary().total_rows,
        errors = report.error_count(),
        warnings = report.warning_count(),
        status = report.status().as_str(),
        "sheet validated"
    );
}
