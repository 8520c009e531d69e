//! Header detection and normalization shared by every backend.
//!
//! Backends hand over raw rows of [`CellValue`]s; this module picks the
//! header row, cleans up the column names, and pads the data rows.

use std::collections::HashSet;

use sheetcheck_model::{CellValue, Dataset, DatasetError};

/// Trim, strip a byte order mark, and collapse internal whitespace.
pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        CellValue::Null
    } else {
        CellValue::String(trimmed.to_string())
    }
}

/// Turn raw header cells into unique, non-blank column names.
///
/// Blank names become `Unnamed: <index>`; repeats of an earlier name get a
/// `.1`, `.2`, ... suffix.
pub(crate) fn build_headers(raw: &[CellValue], width: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(width);
    let mut headers = Vec::with_capacity(width);
    for index in 0..width {
        let name = raw
            .get(index)
            .map(|cell| normalize_header(&cell.to_string()))
            .unwrap_or_default();
        let base = if name.is_empty() {
            format!("Unnamed: {index}")
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}

/// Build a dataset from raw rows.
///
/// The first row with any non-null cell is the header. Rows after it are kept
/// even when blank and are padded with nulls to the table width. A sheet with
/// no non-null cells yields an empty dataset.
pub(crate) fn dataset_from_rows(rows: Vec<Vec<CellValue>>) -> Result<Dataset, DatasetError> {
    let Some(header_index) = rows
        .iter()
        .position(|row| row.iter().any(|cell| !cell.is_null()))
    else {
        return Dataset::new(Vec::<String>::new());
    };

    let width = rows
        .iter()
        .skip(header_index)
        .map(|row| last_non_null(row).map_or(0, |idx| idx + 1))
        .max()
        .unwrap_or(0);

    let mut rows = rows.into_iter().skip(header_index);
    let header = rows.next().unwrap_or_default();
    let mut dataset = Dataset::new(build_headers(&header, width))?;
    for mut cells in rows {
        cells.truncate(width);
        cells.resize(width, CellValue::Null);
        dataset.push_row(cells)?;
    }
    Ok(dataset)
}

fn last_non_null(row: &[CellValue]) -> Option<usize> {
    row.iter().rposition(|cell| !cell.is_null())
}
