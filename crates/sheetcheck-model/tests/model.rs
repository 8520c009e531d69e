use std::collections::BTreeMap;

use chrono::NaiveDate;
use sheetcheck_model::{
    CellValue, ColumnSpec, Dataset, ExpectedType, Finding, FindingCode, RuleSet, RuleSettings,
    Severity, ValidationReport, ValidationStatus,
};

#[test]
fn dataset_round_trips_through_records() {
    let records = vec![
        BTreeMap::from([
            ("Name".to_string(), CellValue::from("Alice")),
            ("Age".to_string(), CellValue::from(30_i64)),
        ]),
        BTreeMap::from([("Name".to_string(), CellValue::from("Bob"))]),
    ];
    let dataset = Dataset::from_records(["Name", "Age"], records).expect("dataset");

    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.column_count(), 2);
    assert_eq!(dataset.value(1, "Age"), Some(&CellValue::Null));
    assert_eq!(dataset.value(0, "Missing"), None);
    assert_eq!(dataset.value(5, "Name"), None);
}

#[test]
fn blank_rows_are_detected() {
    let dataset = Dataset::new(["A", "B"])
        .and_then(|dataset| {
            dataset.with_rows([
                vec![CellValue::Null, CellValue::from(" ")],
                vec![CellValue::from("x"), CellValue::Null],
            ])
        })
        .expect("dataset");

    assert!(dataset.rows()[0].is_blank());
    assert!(!dataset.rows()[1].is_blank());
}

#[test]
fn dates_display_as_iso() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
    assert_eq!(CellValue::from(date).to_string(), "2024-03-09");
    assert_eq!(CellValue::Null.to_string(), "");
}

#[test]
fn rule_set_preserves_column_order() {
    let rules = RuleSet::new(
        vec![
            ColumnSpec::new("Name", ExpectedType::String).required(),
            ColumnSpec::new("Age", ExpectedType::Integer),
            ColumnSpec::new("Email", ExpectedType::String).required().not_null(),
        ],
        RuleSettings::default(),
    )
    .expect("rules");

    let names: Vec<&str> = rules.columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Name", "Age", "Email"]);
    let required: Vec<&str> = rules.required_columns().map(|c| c.name.as_str()).collect();
    assert_eq!(required, ["Name", "Email"]);
    assert_eq!(
        rules.column("Age").map(|c| c.expected_type),
        Some(ExpectedType::Integer)
    );
}

#[test]
fn warnings_only_report_passes_with_warnings() {
    let report = ValidationReport::new(
        vec![Finding::new(
            Severity::Warning,
            FindingCode::EmptyRow,
            None,
            Some(3),
            "Row 4 is empty",
        )],
        10,
        4,
    );

    assert_eq!(report.status(), ValidationStatus::PassedWithWarnings);
    assert!(!report.has_errors());
    assert_eq!(report.errors().count(), 0);
    assert_eq!(report.warnings().count(), 1);
    assert_eq!(report.summary().total_rows, 10);
    assert_eq!(report.summary().total_columns, 4);
}

#[test]
fn finding_serializes_with_snake_case_codes() {
    let finding = Finding::new(
        Severity::Error,
        FindingCode::TypeMismatch,
        Some("Age".to_string()),
        Some(0),
        "bad",
    );
    let json = serde_json::to_value(&finding).expect("serialize");
    assert_eq!(json["severity"], "error");
    assert_eq!(json["code"], "type_mismatch");
    assert_eq!(json["row_index"], 0);

    let back: Finding = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, finding);
}
