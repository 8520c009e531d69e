//! Type coercion policy.
//!
//! Decides whether a non-null cell satisfies a column's expected type.
//! Strings are trimmed before parsing; thousands separators and currency
//! symbols are not stripped.

use chrono::{NaiveDate, NaiveDateTime};

use sheetcheck_model::{CellValue, ExpectedType};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// True when `value` is acceptable for `expected`.
///
/// Null cells are the null check's concern and always satisfy the type.
pub fn satisfies(value: &CellValue, expected: ExpectedType) -> bool {
    if value.is_null() {
        return true;
    }
    match expected {
        ExpectedType::String => true,
        ExpectedType::Integer => is_integer(value),
        ExpectedType::Float => is_float(value),
        ExpectedType::Date => is_date(value),
        ExpectedType::Boolean => is_boolean(value),
    }
}

fn is_integer(value: &CellValue) -> bool {
    match value {
        CellValue::Integer(_) => true,
        CellValue::Float(number) => is_whole_i64(*number),
        CellValue::String(text) => {
            let text = text.trim();
            text.parse::<i64>().is_ok()
                || (!text.contains(['e', 'E']) && parse_finite(text).is_some_and(is_whole_i64))
        }
        CellValue::Null | CellValue::Date(_) | CellValue::Boolean(_) => false,
    }
}

fn is_float(value: &CellValue) -> bool {
    match value {
        CellValue::Integer(_) => true,
        CellValue::Float(number) => number.is_finite(),
        CellValue::String(text) => parse_finite(text.trim()).is_some(),
        CellValue::Null | CellValue::Date(_) | CellValue::Boolean(_) => false,
    }
}

fn is_date(value: &CellValue) -> bool {
    match value {
        CellValue::Date(_) => true,
        CellValue::String(text) => parse_date(text.trim()).is_some(),
        CellValue::Null | CellValue::Integer(_) | CellValue::Float(_) | CellValue::Boolean(_) => {
            false
        }
    }
}

fn is_boolean(value: &CellValue) -> bool {
    match value {
        CellValue::Boolean(_) => true,
        CellValue::Integer(number) => matches!(number, 0 | 1),
        CellValue::String(text) => parse_bool(text.trim()).is_some(),
        CellValue::Null | CellValue::Float(_) | CellValue::Date(_) => false,
    }
}

/// The number a cell holds, for range checks.
///
/// Integers, finite floats and strings parsing as finite floats have one;
/// dates, booleans and other text do not.
pub fn numeric_value(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Integer(number) => Some(*number as f64),
        CellValue::Float(number) => Some(*number).filter(|number| number.is_finite()),
        CellValue::String(text) => parse_finite(text.trim()),
        CellValue::Null | CellValue::Date(_) | CellValue::Boolean(_) => None,
    }
}

/// A whole number inside the `i64` range. `i64::MAX as f64` rounds up to
/// 2^63, which is itself out of range.
fn is_whole_i64(number: f64) -> bool {
    number.is_finite()
        && number.fract() == 0.0
        && number >= i64::MIN as f64
        && number < i64::MAX as f64
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Parse the accepted date and date-time spellings to a calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
}

pub fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> CellValue {
        CellValue::from(text)
    }

    #[test]
    fn integer_boundaries() {
        assert!(satisfies(&s("30"), ExpectedType::Integer));
        assert!(satisfies(&s(" 30 "), ExpectedType::Integer));
        assert!(satisfies(&s("30.0"), ExpectedType::Integer));
        assert!(satisfies(&s("-7"), ExpectedType::Integer));
        assert!(!satisfies(&s("30.5"), ExpectedType::Integer));
        assert!(!satisfies(&s("thirty"), ExpectedType::Integer));
        assert!(!satisfies(&s("1,000"), ExpectedType::Integer));
        assert!(!satisfies(&s("NaN"), ExpectedType::Integer));
        assert!(satisfies(&CellValue::Float(30.0), ExpectedType::Integer));
        assert!(!satisfies(&CellValue::Float(30.5), ExpectedType::Integer));
        assert!(!satisfies(&CellValue::Boolean(true), ExpectedType::Integer));
    }

    #[test]
    fn integers_stay_in_i64_range_without_exponents() {
        assert!(satisfies(&s("9223372036854775807"), ExpectedType::Integer));
        assert!(!satisfies(&s("9223372036854775808"), ExpectedType::Integer));
        assert!(!satisfies(&s("1e3"), ExpectedType::Integer));
        assert!(!satisfies(&s("2E2"), ExpectedType::Integer));
        assert!(satisfies(&s("-9007199254740992.0"), ExpectedType::Integer));
        assert!(!satisfies(&CellValue::Float(1e20), ExpectedType::Integer));
        assert!(!satisfies(&CellValue::Float(-1e20), ExpectedType::Integer));
        assert!(satisfies(&CellValue::Float(-9.0e15), ExpectedType::Integer));
        // Exponent notation is still a float.
        assert!(satisfies(&s("1e3"), ExpectedType::Float));
    }

    #[test]
    fn float_boundaries() {
        assert!(satisfies(&s("2.5"), ExpectedType::Float));
        assert!(satisfies(&s("3"), ExpectedType::Float));
        assert!(satisfies(&CellValue::Integer(3), ExpectedType::Float));
        assert!(!satisfies(&s("inf"), ExpectedType::Float));
        assert!(!satisfies(&s("$3.50"), ExpectedType::Float));
        assert!(!satisfies(&CellValue::Float(f64::NAN), ExpectedType::Float));
    }

    #[test]
    fn numeric_values_for_ranges() {
        assert_eq!(numeric_value(&CellValue::Integer(7)), Some(7.0));
        assert_eq!(numeric_value(&s(" 2.5 ")), Some(2.5));
        assert_eq!(numeric_value(&s("1e3")), Some(1000.0));
        assert_eq!(numeric_value(&s("seven")), None);
        assert_eq!(numeric_value(&CellValue::Boolean(true)), None);
        assert_eq!(numeric_value(&CellValue::Float(f64::INFINITY)), None);
    }

    #[test]
    fn date_spellings() {
        assert!(satisfies(&s("2024-02-29"), ExpectedType::Date));
        assert!(satisfies(&s("2024/02/29"), ExpectedType::Date));
        assert!(satisfies(&s("2024-02-29T10:15"), ExpectedType::Date));
        assert!(satisfies(&s("2024-02-29 10:15:30"), ExpectedType::Date));
        assert!(!satisfies(&s("2023-02-29"), ExpectedType::Date));
        assert!(!satisfies(&s("29/02/2024"), ExpectedType::Date));
        assert!(!satisfies(&CellValue::Integer(45000), ExpectedType::Date));
    }

    #[test]
    fn boolean_spellings() {
        for text in ["true", "FALSE", "Yes", "n", "1", "0"] {
            assert!(satisfies(&s(text), ExpectedType::Boolean), "{text}");
        }
        assert!(!satisfies(&s("maybe"), ExpectedType::Boolean));
        assert!(satisfies(&CellValue::Integer(1), ExpectedType::Boolean));
        assert!(!satisfies(&CellValue::Integer(2), ExpectedType::Boolean));
    }

    #[test]
    fn strings_accept_everything_and_nulls_always_pass() {
        assert!(satisfies(&CellValue::Integer(4), ExpectedType::String));
        assert!(satisfies(&CellValue::Null, ExpectedType::Integer));
        assert!(satisfies(&s("  "), ExpectedType::Date));
    }
}
