//! Integration tests for summary views and notification messages.

use sheetcheck_model::{Finding, FindingCode, Severity, ValidationReport, ValidationStatus};
use sheetcheck_report::{MessageContext, render_message, render_summary};

fn failed_report() -> ValidationReport {
    ValidationReport::new(
        vec![
            Finding::new(
                Severity::Error,
                FindingCode::MissingColumn,
                Some("Email".to_string()),
                None,
                "Required column 'Email' is missing",
            ),
            Finding::new(
                Severity::Error,
                FindingCode::TypeMismatch,
                Some("Age".to_string()),
                Some(0),
                "Row 1: column 'Age' expects integer, found 'thirty'",
            ),
            Finding::new(
                Severity::Warning,
                FindingCode::NullValue,
                Some("Phone".to_string()),
                Some(1),
                "Row 2: column 'Phone' is empty",
            ),
        ],
        2,
        3,
    )
}

fn context() -> MessageContext {
    MessageContext::new("customers.xlsx")
        .with_sheet("Q1")
        .with_unit("Finance")
        .with_generated_at("2024-05-01 09:00")
        .with_body_limit(2)
}

#[test]
fn summary_view_groups_and_previews() {
    let view = render_summary(&failed_report(), 1);

    assert_eq!(view.status, ValidationStatus::Failed);
    assert_eq!(view.errors.len(), 2);
    assert_eq!(view.warnings.len(), 1);
    assert_eq!(view.preview.len(), 1);
    assert_eq!(view.hidden_count, 2);
    let columns: Vec<&str> = view.columns.iter().map(|c| c.column.as_str()).collect();
    assert_eq!(columns, ["Email", "Age", "Phone"]);
}

#[test]
fn summary_view_without_limit_pressure() {
    let view = render_summary(&failed_report(), 50);
    assert_eq!(view.preview.len(), 3);
    assert_eq!(view.hidden_count, 0);

    let json = serde_json::to_value(&view).expect("serialize view");
    assert_eq!(json["status"], "failed");
    assert_eq!(json["columns"][1]["type_mismatches"], 1);
}

#[test]
fn failed_subject() {
    let message = render_message(&failed_report(), &context());
    assert_eq!(
        message.subject,
        "Data Validation Alert - Errors Found: customers.xlsx (Q1)"
    );
}

#[test]
fn failed_text_body() {
    let message = render_message(&failed_report(), &context());
    insta::assert_snapshot!(message.text_body, @r"
    Dear Finance,

    Automated data validation detected issues in the spreadsheet below.

    File: customers.xlsx
    Sheet: Q1
    Status: Failed
    Total rows: 2
    Total columns: 3
    Errors: 2
    Warnings: 1
    Validated at: 2024-05-01 09:00

    Columns with findings:
    - Email: 1 error(s), 0 warning(s)
    - Age: 1 error(s), 0 warning(s)
    - Phone: 0 error(s), 1 warning(s)

    Findings:
    - [Error] Required column 'Email' is missing
    - [Error] Row 1: column 'Age' expects integer, found 'thirty'
    ... and 1 more

    Please review and update the data as soon as possible.

    Data Validation System
    ");
}

#[test]
fn html_body_escapes_user_values() {
    let report = ValidationReport::new(
        vec![Finding::new(
            Severity::Error,
            FindingCode::TypeMismatch,
            Some("<b>Total</b>".to_string()),
            Some(0),
            "Row 1: value '<script>alert(1)</script>' is not a number",
        )],
        1,
        1,
    );
    let context = MessageContext::new("R&D <draft>.xlsx").with_unit("Sales & Ops");
    let message = render_message(&report, &context);

    assert!(message.html_body.contains("R&amp;D &lt;draft&gt;.xlsx"));
    assert!(message.html_body.contains("Dear Sales &amp; Ops,"));
    assert!(message.html_body.contains("&lt;b&gt;Total&lt;/b&gt;"));
    assert!(message.html_body.contains("&lt;script&gt;"));
    assert!(!message.html_body.contains("<script>"));
    assert!(!message.html_body.contains("<b>Total"));
}

#[test]
fn html_body_lists_limited_findings() {
    let message = render_message(&failed_report(), &context());
    assert!(message.html_body.starts_with("<html>"));
    assert!(message.html_body.contains("<h2>Data Validation Alert</h2>"));
    assert!(
        message
            .html_body
            .contains("<li><strong>Error</strong> (missing_column): ")
    );
    assert!(message.html_body.contains("<li><em>... and 1 more</em></li>"));
    assert!(!message.html_body.contains("Phone&apos; is empty"));
}

#[test]
fn passed_report_renders_completion_message() {
    let report = ValidationReport::new(Vec::new(), 12, 4);
    let message = render_message(&report, &context());

    assert_eq!(
        message.subject,
        "Data Validation Alert - No Issues Found: customers.xlsx (Q1)"
    );
    assert!(message.text_body.contains("completed with no issues found"));
    assert!(!message.text_body.contains("Findings:"));
    assert!(message.html_body.contains("<h2>Data Validation Complete</h2>"));
}

#[test]
fn warnings_only_subject() {
    let report = ValidationReport::new(
        vec![Finding::new(
            Severity::Warning,
            FindingCode::HighNullRatio,
            Some("Notes".to_string()),
            None,
            "Column 'Notes' is 80.0% empty",
        )],
        5,
        2,
    );
    let context = MessageContext::new("notes.csv").with_subject_prefix("Sheet check");
    let message = render_message(&report, &context);
    assert_eq!(message.subject, "Sheet check - Warnings Found: notes.csv");
    assert!(message.text_body.starts_with("Dear Team,"));
}

#[test]
fn rendering_is_deterministic() {
    let first = render_message(&failed_report(), &context());
    let second = render_message(&failed_report(), &context());
    assert_eq!(first, second);
}
