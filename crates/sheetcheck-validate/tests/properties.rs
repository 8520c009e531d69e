//! Property tests for the validation engine.
//!
//! Properties tested:
//! - status is failed exactly when there are errors
//! - counts do not depend on row order or header order
//! - validating twice gives the same report
//! - a rule set with no requirements always passes

use proptest::prelude::*;
use sheetcheck_model::{
    CellValue, ColumnSpec, Dataset, ExpectedType, RuleSet, ValidationReport, ValidationStatus,
};
use sheetcheck_validate::validate;

const COLUMNS: [&str; 3] = ["Name", "Age", "Joined"];

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Null),
        Just(CellValue::from("")),
        "[a-z]{1,6}".prop_map(CellValue::from),
        (-50i64..200).prop_map(|n| CellValue::from(n.to_string())),
        (-50i64..200).prop_map(CellValue::Integer),
        (-5.0f64..5.0).prop_map(CellValue::Float),
        Just(CellValue::from("2024-01-31")),
        any::<bool>().prop_map(CellValue::Boolean),
    ]
}

fn rows() -> impl Strategy<Value = Vec<Vec<CellValue>>> {
    prop::collection::vec(prop::collection::vec(cell(), COLUMNS.len()), 0..20)
}

fn spec() -> impl Strategy<Value = (ExpectedType, bool, bool)> {
    (
        prop::sample::select(ExpectedType::all().to_vec()),
        any::<bool>(),
        any::<bool>(),
    )
}

fn rules() -> impl Strategy<Value = RuleSet> {
    (spec(), spec(), spec(), any::<bool>()).prop_map(|(a, b, c, with_extra)| {
        let mut columns: Vec<ColumnSpec> = COLUMNS
            .iter()
            .zip([a, b, c])
            .map(|(name, (ty, required, allow_null))| {
                ColumnSpec::new(*name, ty)
                    .with_required(required)
                    .with_allow_null(allow_null)
            })
            .collect();
        if with_extra {
            columns.push(ColumnSpec::new("Email", ExpectedType::String).required());
        }
        RuleSet::from_columns(columns).expect("generated rules are valid")
    })
}

fn build(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Dataset {
    Dataset::new(columns.iter().copied())
        .and_then(|dataset| dataset.with_rows(rows))
        .expect("generated dataset is valid")
}

fn counts(report: &ValidationReport) -> (usize, usize) {
    (report.error_count(), report.warning_count())
}

proptest! {
    #[test]
    fn status_matches_error_count(rows in rows(), rules in rules()) {
        let report = validate(&build(&COLUMNS, rows), &rules);
        prop_assert_eq!(report.status() == ValidationStatus::Failed, report.error_count() > 0);
        prop_assert_eq!(
            report.status() == ValidationStatus::Passed,
            report.findings().is_empty()
        );
        prop_assert_eq!(
            report.error_count() + report.warning_count(),
            report.findings().len()
        );
    }

    #[test]
    fn counts_ignore_row_order(rows in rows(), rules in rules()) {
        let forward = validate(&build(&COLUMNS, rows.clone()), &rules);
        let mut reversed_rows = rows;
        reversed_rows.reverse();
        let reversed = validate(&build(&COLUMNS, reversed_rows), &rules);
        prop_assert_eq!(counts(&forward), counts(&reversed));
    }

    #[test]
    fn counts_ignore_header_order(rows in rows(), rules in rules()) {
        let forward = validate(&build(&COLUMNS, rows.clone()), &rules);
        let permuted_columns = [COLUMNS[2], COLUMNS[0], COLUMNS[1]];
        let permuted_rows: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|row| vec![row[2].clone(), row[0].clone(), row[1].clone()])
            .collect();
        let permuted = validate(&build(&permuted_columns, permuted_rows), &rules);
        prop_assert_eq!(counts(&forward), counts(&permuted));
    }

    #[test]
    fn validation_is_idempotent(rows in rows(), rules in rules()) {
        let dataset = build(&COLUMNS, rows);
        prop_assert_eq!(validate(&dataset, &rules), validate(&dataset, &rules));
    }

    #[test]
    fn unconstrained_string_rules_always_pass(rows in rows()) {
        let rules = RuleSet::from_columns(
            COLUMNS
                .iter()
                .map(|name| ColumnSpec::new(*name, ExpectedType::String))
                .collect(),
        )
        .expect("valid rules");
        let report = validate(&build(&COLUMNS, rows), &rules);
        prop_assert_eq!(report.status(), ValidationStatus::Passed);
    }
}
