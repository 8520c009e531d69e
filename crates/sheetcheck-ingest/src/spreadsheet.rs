//! Cell conversion for calamine-backed workbooks.

use calamine::{Data, DataType};
use chrono::{NaiveDate, NaiveDateTime, Timelike};

use sheetcheck_model::CellValue;

/// Convert one calamine cell into a dataset cell.
///
/// Error cells (`#N/A`, `#DIV/0!`, ...) and empty cells become null. Date
/// cells without a time of day become dates; with one they are kept as an
/// ISO timestamp string so the time is not lost.
pub(crate) fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Int(value) => CellValue::Integer(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Boolean(*value),
        Data::String(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                CellValue::Null
            } else {
                CellValue::String(trimmed.to_string())
            }
        }
        Data::DateTime(value) => {
            if value.is_duration() {
                return CellValue::Float(value.as_f64());
            }
            match cell.as_datetime() {
                Some(datetime) => from_datetime(datetime),
                None => CellValue::Float(value.as_f64()),
            }
        }
        Data::DateTimeIso(value) => parse_iso(value),
        Data::DurationIso(value) => CellValue::String(value.clone()),
    }
}

fn from_datetime(datetime: NaiveDateTime) -> CellValue {
    if datetime.time().num_seconds_from_midnight() == 0 {
        CellValue::Date(datetime.date())
    } else {
        CellValue::String(datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}

fn parse_iso(value: &str) -> CellValue {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(date);
    }
    if let Ok(datetime) = trimmed.parse::<NaiveDateTime>() {
        return from_datetime(datetime);
    }
    CellValue::String(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use calamine::CellErrorType;

    use super::*;

    #[test]
    fn scalars_convert_natively() {
        assert_eq!(convert_cell(&Data::Int(4)), CellValue::Integer(4));
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Float(2.5));
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Boolean(true));
        assert_eq!(
            convert_cell(&Data::String(" Alice ".to_string())),
            CellValue::from("Alice")
        );
    }

    #[test]
    fn error_and_empty_cells_are_null() {
        assert_eq!(convert_cell(&Data::Empty), CellValue::Null);
        assert_eq!(convert_cell(&Data::Error(CellErrorType::NA)), CellValue::Null);
        assert_eq!(convert_cell(&Data::Error(CellErrorType::Div0)), CellValue::Null);
        assert_eq!(convert_cell(&Data::String("  ".to_string())), CellValue::Null);
    }

    #[test]
    fn iso_dates_are_parsed() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-01-15".to_string())),
            CellValue::Date(date)
        );
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-01-15T00:00:00".to_string())),
            CellValue::Date(date)
        );
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-01-15T08:30:00".to_string())),
            CellValue::from("2024-01-15T08:30:00")
        );
    }
}
