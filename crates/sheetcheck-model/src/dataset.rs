use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::cell::CellValue;
use crate::error::DatasetError;

/// One data row; cells are positional and line up with the dataset header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    /// True when every cell is null.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_null)
    }
}

/// An in-memory table read from one spreadsheet sheet.
///
/// Every row has exactly one cell per header column; [`Dataset::push_row`]
/// refuses anything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new<I, S>(columns: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(DatasetError::DuplicateColumn { name: name.clone() });
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Build a dataset from name -> value records; absent names become null.
    pub fn from_records<I, S, R>(columns: I, records: R) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = BTreeMap<String, CellValue>>,
    {
        let mut dataset = Self::new(columns)?;
        for (row_index, mut record) in records.into_iter().enumerate() {
            let mut cells = Vec::with_capacity(dataset.columns.len());
            for column in &dataset.columns {
                cells.push(record.remove(column).unwrap_or(CellValue::Null));
            }
            if let Some(name) = record.into_keys().next() {
                return Err(DatasetError::UnknownColumn { row_index, name });
            }
            dataset.rows.push(Row { cells });
        }
        Ok(dataset)
    }

    pub fn push_row(&mut self, cells: Vec<CellValue>) -> Result<(), DatasetError> {
        if cells.len() != self.columns.len() {
            return Err(DatasetError::RowWidth {
                row_index: self.rows.len(),
                expected: self.columns.len(),
                found: cells.len(),
            });
        }
        self.rows.push(Row { cells });
        Ok(())
    }

    /// Builder-style variant of [`Dataset::push_row`] for many rows.
    pub fn with_rows<R>(mut self, rows: R) -> Result<Self, DatasetError>
    where
        R: IntoIterator<Item = Vec<CellValue>>,
    {
        for cells in rows {
            self.push_row(cells)?;
        }
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn value(&self, row_index: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row_index)?.get(index)
    }
}
