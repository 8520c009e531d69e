//! The part of a dataset the checks look at.

use sheetcheck_model::{CellValue, ColumnSpec, Dataset, RuleSet, Row};
use tracing::debug;

use crate::util::ColumnLookup;

/// Columns and rows left after the skip settings are applied.
///
/// Skipped rule columns get no findings at all, not even `missing_column`.
/// Skipped rows still count towards the report's row total.
pub struct Scope<'a> {
    /// Rule columns not matching a skip pattern, in rule set order.
    pub specs: Vec<&'a ColumnSpec>,
    /// The subset of `specs` found in the header, with its position.
    pub present: Vec<(&'a ColumnSpec, usize)>,
    /// Header positions not matching a skip pattern.
    pub data_columns: Vec<usize>,
    /// Data rows not matched by the row filter, with their index.
    pub rows: Vec<(usize, &'a Row)>,
}

impl<'a> Scope<'a> {
    pub fn new(dataset: &'a Dataset, rules: &'a RuleSet, lookup: &ColumnLookup) -> Self {
        let settings = rules.settings();
        let specs: Vec<&ColumnSpec> = rules
            .columns()
            .iter()
            .filter(|spec| !settings.skips_column(&spec.name))
            .collect();
        let present = specs
            .iter()
            .filter_map(|spec| lookup.get(&spec.name).map(|index| (*spec, index)))
            .collect();
        let data_columns: Vec<usize> = dataset
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, name)| !settings.skips_column(name))
            .map(|(index, _)| index)
            .collect();

        let filter = settings
            .skip_rows
            .as_ref()
            .and_then(|filter| lookup.get(&filter.column).map(|index| (filter, index)));
        let rows: Vec<(usize, &Row)> = dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| match filter {
                Some((filter, index)) => !row
                    .get(index)
                    .is_some_and(|cell| !cell.is_null() && filter.matches(&cell.to_string())),
                None => true,
            })
            .collect();

        let skipped_rows = dataset.row_count() - rows.len();
        let skipped_columns = dataset.column_count() - data_columns.len();
        if skipped_rows > 0 || skipped_columns > 0 || specs.len() < rules.len() {
            debug!(
                skipped_rows,
                skipped_columns,
                skipped_rules = rules.len() - specs.len(),
                "skip settings applied"
            );
        }

        Self {
            specs,
            present,
            data_columns,
            rows,
        }
    }

    /// The in-scope cells of a row, in header order.
    pub fn cells<'r>(&'r self, row: &'r Row) -> impl Iterator<Item = &'r CellValue> + 'r {
        self.data_columns
            .iter()
            .filter_map(move |&index| row.get(index))
    }

    /// True when every in-scope cell of the row is null.
    pub fn is_blank(&self, row: &Row) -> bool {
        self.cells(row).all(CellValue::is_null)
    }
}
