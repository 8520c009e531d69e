//! Subject, HTML, and plain-text bodies for notification messages.

use quick_xml::escape::escape;
use serde::Serialize;

use sheetcheck_model::{Finding, ValidationReport, ValidationStatus};

use crate::view::{ColumnBreakdown, column_breakdown};

pub const DEFAULT_SUBJECT_PREFIX: &str = "Data Validation Alert";
pub const DEFAULT_BODY_LIMIT: usize = 10;
const DEFAULT_GREETING_NAME: &str = "Team";
const SIGNATURE: &str = "Data Validation System";

/// Where a report came from and how its message should look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub file_name: String,
    pub sheet_name: Option<String>,
    /// Display name used in the greeting.
    pub unit_name: Option<String>,
    /// Preformatted timestamp; left out of the body when absent.
    pub generated_at: Option<String>,
    pub subject_prefix: String,
    /// Number of findings listed in the body.
    pub body_limit: usize,
}

impl MessageContext {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            sheet_name: None,
            unit_name: None,
            generated_at: None,
            subject_prefix: DEFAULT_SUBJECT_PREFIX.to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit_name: impl Into<String>) -> Self {
        self.unit_name = Some(unit_name.into());
        self
    }

    #[must_use]
    pub fn with_generated_at(mut self, generated_at: impl Into<String>) -> Self {
        self.generated_at = Some(generated_at.into());
        self
    }

    #[must_use]
    pub fn with_subject_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.subject_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    fn source_label(&self) -> String {
        match &self.sheet_name {
            Some(sheet) => format!("{} ({sheet})", self.file_name),
            None => self.file_name.clone(),
        }
    }

    fn greeting_name(&self) -> &str {
        self.unit_name.as_deref().unwrap_or(DEFAULT_GREETING_NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMessage {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Render a report into an email-ready message.
///
/// The output depends only on the report and the context. Passed reports
/// get a completion message.
pub fn render_message(report: &ValidationReport, context: &MessageContext) -> RenderedMessage {
    let content = MessageContent::new(report, context);
    RenderedMessage {
        subject: content.subject(),
        html_body: content.html(),
        text_body: content.text(),
    }
}

struct MessageContent<'a> {
    report: &'a ValidationReport,
    context: &'a MessageContext,
    listed: &'a [Finding],
    hidden: usize,
    columns: Vec<ColumnBreakdown>,
}

impl<'a> MessageContent<'a> {
    fn new(report: &'a ValidationReport, context: &'a MessageContext) -> Self {
        let findings = report.findings();
        let shown = findings.len().min(context.body_limit);
        Self {
            report,
            context,
            listed: &findings[..shown],
            hidden: findings.len() - shown,
            columns: column_breakdown(findings),
        }
    }

    fn passed(&self) -> bool {
        self.report.status() == ValidationStatus::Passed
    }

    fn headline(&self) -> &'static str {
        match self.report.status() {
            ValidationStatus::Passed => "No Issues Found",
            ValidationStatus::PassedWithWarnings => "Warnings Found",
            ValidationStatus::Failed => "Errors Found",
        }
    }

    fn subject(&self) -> String {
        format!(
            "{} - {}: {}",
            self.context.subject_prefix,
            self.headline(),
            self.context.source_label()
        )
    }

    fn intro(&self) -> &'static str {
        if self.passed() {
            "The data validation process completed with no issues found."
        } else {
            "Automated data validation detected issues in the spreadsheet below."
        }
    }

    fn closing(&self) -> &'static str {
        if self.passed() {
            "All required data is present and the spreadsheet is ready for processing."
        } else {
            "Please review and update the data as soon as possible."
        }
    }

    /// Label/value pairs of the summary block, unescaped.
    fn summary_items(&self) -> Vec<(&'static str, String)> {
        let summary = self.report.summary();
        let mut items = vec![("File", self.context.file_name.clone())];
        if let Some(sheet) = &self.context.sheet_name {
            items.push(("Sheet", sheet.clone()));
        }
        items.push(("Status", self.report.status().label().to_string()));
        items.push(("Total rows", summary.total_rows.to_string()));
        items.push(("Total columns", summary.total_columns.to_string()));
        items.push(("Errors", summary.error_count.to_string()));
        items.push(("Warnings", summary.warning_count.to_string()));
        if let Some(generated_at) = &self.context.generated_at {
            items.push(("Validated at", generated_at.clone()));
        }
        items
    }

    fn text(&self) -> String {
        let mut lines = vec![
            format!("Dear {},", self.context.greeting_name()),
            String::new(),
            self.intro().to_string(),
            String::new(),
        ];
        for (label, value) in self.summary_items() {
            lines.push(format!("{label}: {value}"));
        }
        if !self.columns.is_empty() {
            lines.push(String::new());
            lines.push("Columns with findings:".to_string());
            for column in &self.columns {
                lines.push(format!(
                    "- {}: {} error(s), {} warning(s)",
                    column.column, column.errors, column.warnings
                ));
            }
        }
        if !self.listed.is_empty() {
            lines.push(String::new());
            lines.push("Findings:".to_string());
            for finding in self.listed {
                lines.push(format!("- [{}] {}", finding.severity(), finding.message()));
            }
            if self.hidden > 0 {
                lines.push(format!("... and {} more", self.hidden));
            }
        }
        lines.push(String::new());
        lines.push(self.closing().to_string());
        lines.push(String::new());
        lines.push(SIGNATURE.to_string());
        lines.join("\n")
    }

    fn html(&self) -> String {
        let title = if self.passed() {
            "Data Validation Complete"
        } else {
            "Data Validation Alert"
        };
        let mut html = String::from("<html>\n<body>\n");
        html.push_str(&format!("<h2>{title}</h2>\n"));
        html.push_str(&format!(
            "<p>Dear {},</p>\n",
            escape(self.context.greeting_name())
        ));
        html.push_str(&format!("<p>{}</p>\n", self.intro()));

        html.push_str("<h3>Validation Summary</h3>\n<ul>\n");
        for (label, value) in self.summary_items() {
            html.push_str(&format!(
                "<li><strong>{label}:</strong> {}</li>\n",
                escape(value.as_str())
            ));
        }
        html.push_str("</ul>\n");

        if !self.columns.is_empty() {
            html.push_str("<h3>Columns with Findings</h3>\n<ul>\n");
            for column in &self.columns {
                html.push_str(&format!(
                    "<li><strong>{}:</strong> {} error(s), {} warning(s)</li>\n",
                    escape(column.column.as_str()),
                    column.errors,
                    column.warnings
                ));
            }
            html.push_str("</ul>\n");
        }

        if !self.listed.is_empty() {
            html.push_str("<h3>Findings</h3>\n<ul>\n");
            for finding in self.listed {
                html.push_str(&format!(
                    "<li><strong>{}</strong> ({}): {}</li>\n",
                    finding.severity(),
                    finding.code(),
                    escape(finding.message())
                ));
            }
            if self.hidden > 0 {
                html.push_str(&format!("<li><em>... and {} more</em></li>\n", self.hidden));
            }
            html.push_str("</ul>\n");
        }

        html.push_str(&format!("<p>{}</p>\n", self.closing()));
        html.push_str(&format!("<p>Best regards,<br>\n{SIGNATURE}</p>\n"));
        html.push_str("</body>\n</html>\n");
        html
    }
}
