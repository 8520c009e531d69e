//! Terminal and JSON rendering of check results.

use std::path::Path;

use anyhow::Result;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use serde::Serialize;

use sheetcheck_model::{Finding, RuleSet, Severity, ValidationStatus};
use sheetcheck_report::{ReportView, render_summary};

use crate::pipeline::{CheckResult, NotificationStatus};

pub fn print_check(result: &CheckResult) {
    println!("File: {}", result.file.display());
    for sheet in &result.sheets {
        let view = render_summary(&sheet.report, result.preview_limit);
        println!();
        println!(
            "Sheet: {}  {} rows x {} columns",
            sheet.sheet, view.summary.total_rows, view.summary.total_columns
        );
        println!("Status: {}", view.status.label());
        if !view.columns.is_empty() {
            println!("{}", column_table(&view));
        }
        if !view.preview.is_empty() {
            println!("{}", finding_table(&view));
        }
        if view.hidden_count > 0 {
            println!("... and {} more", view.hidden_count);
        }
        if let Some(notification) = &sheet.notification {
            print_notification(notification);
        }
    }
    if result.sheets.len() > 1 {
        println!();
        println!("{}", totals_table(result));
    }
}

fn print_notification(notification: &NotificationStatus) {
    match notification {
        NotificationStatus::Skipped => println!("Notification: not needed"),
        NotificationStatus::Sent { to, cc } if cc.is_empty() => {
            println!("Notification: sent to {}", to.join(", "));
        }
        NotificationStatus::Sent { to, cc } => {
            println!(
                "Notification: sent to {} (cc {})",
                to.join(", "),
                cc.join(", ")
            );
        }
        NotificationStatus::Failed { error } => eprintln!("Notification failed: {error}"),
    }
}

#[derive(Serialize)]
struct JsonCheck<'a> {
    file: &'a Path,
    status: ValidationStatus,
    sheets: Vec<JsonSheet<'a>>,
}

#[derive(Serialize)]
struct JsonSheet<'a> {
    sheet: &'a str,
    #[serde(flatten)]
    view: ReportView,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification: Option<&'a NotificationStatus>,
}

pub fn check_json(result: &CheckResult) -> Result<String> {
    let document = JsonCheck {
        file: &result.file,
        status: result.status(),
        sheets: result
            .sheets
            .iter()
            .map(|sheet| JsonSheet {
                sheet: &sheet.sheet,
                view: render_summary(&sheet.report, result.preview_limit),
                notification: sheet.notification.as_ref(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

fn column_table(view: &ReportView) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Nulls"),
        header_cell("Type"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for column in &view.columns {
        table.add_row(vec![
            Cell::new(&column.column),
            count_cell(column.errors, Color::Red),
            count_cell(column.warnings, Color::Yellow),
            count_cell(column.nulls, Color::Yellow),
            count_cell(column.type_mismatches, Color::Red),
        ]);
    }
    table
}

fn finding_table(view: &ReportView) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Column"),
        header_cell("Row"),
        header_cell("Message"),
    ]);
    apply_finding_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for finding in &view.preview {
        table.add_row(finding_row(finding));
    }
    table
}

fn finding_row(finding: &Finding) -> Vec<Cell> {
    vec![
        severity_cell(finding.severity()),
        Cell::new(finding.code().as_str()),
        finding.column().map_or_else(|| dim_cell("-"), Cell::new),
        // Row numbers are 1-based for people.
        finding
            .row_index()
            .map_or_else(|| dim_cell("-"), |row| Cell::new(row + 1)),
        Cell::new(finding.message()),
    ]
}

fn totals_table(result: &CheckResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut rows = 0;
    let mut errors = 0;
    let mut warnings = 0;
    for sheet in &result.sheets {
        let report = &sheet.report;
        rows += report.summary().total_rows;
        errors += report.error_count();
        warnings += report.warning_count();
        table.add_row(vec![
            Cell::new(&sheet.sheet).add_attribute(Attribute::Bold),
            Cell::new(report.summary().total_rows),
            count_cell(report.error_count(), Color::Red),
            count_cell(report.warning_count(), Color::Yellow),
            status_cell(report.status()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(rows).add_attribute(Attribute::Bold),
        count_cell(errors, Color::Red).add_attribute(Attribute::Bold),
        count_cell(warnings, Color::Yellow).add_attribute(Attribute::Bold),
        status_cell(result.status()).add_attribute(Attribute::Bold),
    ]);
    table
}

fn rules_table(rules: &RuleSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Nullable"),
        header_cell("Range"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for column in rules.columns() {
        let range = match (column.min_value, column.max_value) {
            (None, None) => dim_cell("-"),
            (min, max) => Cell::new(format!("{} .. {}", bound(min), bound(max))),
        };
        table.add_row(vec![
            Cell::new(&column.name).add_attribute(Attribute::Bold),
            Cell::new(column.expected_type.as_str()),
            flag_cell(column.required),
            flag_cell(column.allow_null),
            range,
        ]);
    }
    table
}

pub fn print_rules(rules: &RuleSet) {
    if rules.is_empty() {
        println!("No column rules configured.");
    } else {
        println!("{}", rules_table(rules));
    }
    let settings = rules.settings();
    println!(
        "Null ratio warning: {}",
        percent_or_off(settings.null_warning_threshold)
    );
    println!(
        "Sparse row warning: {}",
        percent_or_off(settings.sparse_row_threshold)
    );
    println!("Flag empty rows: {}", yes_no(settings.flag_empty_rows));
    println!("Flag duplicate rows: {}", yes_no(settings.flag_duplicate_rows));
    println!(
        "Flag constant columns: {}",
        yes_no(settings.flag_constant_columns)
    );
    println!(
        "Text length limit: {}",
        settings
            .max_text_length
            .map_or_else(|| "off".to_string(), |limit| format!("{limit} chars"))
    );
    println!(
        "Case-insensitive columns: {}",
        yes_no(settings.case_insensitive_columns)
    );
    if !settings.skip_column_patterns.is_empty() {
        println!(
            "Skipped columns matching: {}",
            settings.skip_column_patterns.join(", ")
        );
    }
    if let Some(filter) = &settings.skip_rows {
        println!(
            "Skipped rows: {} in [{}]",
            filter.column,
            filter.values.join(", ")
        );
    }
}

fn bound(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v}"))
}

fn percent_or_off(value: Option<f64>) -> String {
    value.map_or_else(|| "off".to_string(), |v| format!("{:.1}%", v * 100.0))
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_finding_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160)
        .set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn status_cell(status: ValidationStatus) -> Cell {
    let color = match status {
        ValidationStatus::Passed => Color::Green,
        ValidationStatus::PassedWithWarnings => Color::Yellow,
        ValidationStatus::Failed => Color::Red,
    };
    Cell::new(status.label()).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
