use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{Reader, Sheets, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::debug;

use sheetcheck_model::{CellValue, Dataset};

use crate::error::{IngestError, Result};
use crate::spreadsheet::convert_cell;
use crate::table::{dataset_from_rows, normalize_cell};

/// Spreadsheet formats that can be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    Xlsx,
    Xlsm,
    Xlsb,
    Xls,
    Ods,
    Csv,
}

impl WorkbookFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" => Some(Self::Xlsx),
            "xlsm" => Some(Self::Xlsm),
            "xlsb" => Some(Self::Xlsb),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Xlsm => "xlsm",
            Self::Xlsb => "xlsb",
            Self::Xls => "xls",
            Self::Ods => "ods",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for WorkbookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Backend {
    Spreadsheet(Sheets<BufReader<File>>),
    Delimited { sheet_name: String },
}

/// An opened spreadsheet file.
///
/// csv files expose a single sheet named after the file stem.
pub struct Workbook {
    path: PathBuf,
    format: WorkbookFormat,
    backend: Backend,
}

impl fmt::Debug for Workbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workbook")
            .field("path", &self.path)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl Workbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(IngestError::FileNotFound { path });
        }
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        let Some(format) = WorkbookFormat::from_extension(&extension) else {
            return Err(IngestError::UnsupportedFormat { path, extension });
        };

        let backend = match format {
            WorkbookFormat::Csv => {
                let sheet_name = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Sheet1".to_string());
                Backend::Delimited { sheet_name }
            }
            _ => {
                let sheets = open_workbook_auto(&path).map_err(|source| IngestError::Workbook {
                    path: path.clone(),
                    source,
                })?;
                Backend::Spreadsheet(sheets)
            }
        };
        debug!(path = %path.display(), format = %format, "opened workbook");
        Ok(Self {
            path,
            format,
            backend,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> WorkbookFormat {
        self.format
    }

    /// Sheet names in workbook order. Rows are not read.
    pub fn sheet_names(&self) -> Vec<String> {
        match &self.backend {
            Backend::Spreadsheet(sheets) => sheets.sheet_names(),
            Backend::Delimited { sheet_name } => vec![sheet_name.clone()],
        }
    }

    pub fn read_sheet(&mut self, name: &str) -> Result<Dataset> {
        let available = self.sheet_names();
        if !available.iter().any(|sheet| sheet == name) {
            return Err(IngestError::SheetNotFound {
                path: self.path.clone(),
                sheet: name.to_string(),
                available,
            });
        }
        let rows = match &mut self.backend {
            Backend::Spreadsheet(sheets) => {
                let range =
                    sheets
                        .worksheet_range(name)
                        .map_err(|source| IngestError::Workbook {
                            path: self.path.clone(),
                            source,
                        })?;
                range
                    .rows()
                    .map(|row| row.iter().map(convert_cell).collect())
                    .collect()
            }
            Backend::Delimited { .. } => read_csv_rows(&self.path)?,
        };
        let dataset = dataset_from_rows(rows).map_err(|source| IngestError::Dataset {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            path = %self.path.display(),
            sheet = name,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "read sheet"
        );
        Ok(dataset)
    }

    pub fn read_first_sheet(&mut self) -> Result<Dataset> {
        let Some(first) = self.sheet_names().into_iter().next() else {
            return Err(IngestError::NoSheets {
                path: self.path.clone(),
            });
        };
        self.read_sheet(&first)
    }
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<CellValue>>> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let mut rows = Vec::new();
    // Byte records, so a cell that is not valid UTF-8 becomes null instead
    // of failing the file.
    for record in reader.byte_records() {
        let record = record.map_err(csv_error)?;
        rows.push(
            record
                .iter()
                .map(|field| std::str::from_utf8(field).map_or(CellValue::Null, normalize_cell))
                .collect(),
        );
    }
    Ok(rows)
}

/// Open `path` and read `sheet`, or the first sheet when `sheet` is `None`.
pub fn read_dataset(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<Dataset> {
    let mut workbook = Workbook::open(path)?;
    match sheet {
        Some(name) => workbook.read_sheet(name),
        None => workbook.read_first_sheet(),
    }
}
