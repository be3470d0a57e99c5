use std::path::PathBuf;

use calamine::{open_workbook_auto, Data, Reader};

use crate::domain::entities::row::{Cell, RawRow};
use crate::usecase::ports::source::{RowSource, SourceError};

/// One sheet of an xlsx/xls/xlsb/ods workbook. Without a sheet name the first
/// sheet is read.
pub struct WorkbookSource {
    path: PathBuf,
    sheet: Option<String>,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>, sheet: Option<String>) -> Self {
        Self {
            path: path.into(),
            sheet,
        }
    }
}

pub fn data_to_cell(cell: &Data) -> Cell {
    match cell {
        Data::String(v) if v.trim().is_empty() => Cell::Empty,
        Data::String(v) => Cell::Text(v.to_string()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(v) => Cell::Text(v.to_string()),
        Data::DateTime(v) => Cell::Number(v.as_f64()),
        Data::DateTimeIso(v) => Cell::Text(v.to_string()),
        Data::DurationIso(v) => Cell::Text(v.to_string()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

impl RowSource for WorkbookSource {
    fn describe(&self) -> String {
        match &self.sheet {
            Some(sheet) => format!("workbook {}#{sheet}", self.path.display()),
            None => format!("workbook {}", self.path.display()),
        }
    }

    fn read_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        let path = self.path.display().to_string();
        let mut workbook = open_workbook_auto(&self.path).map_err(|err| SourceError::Open {
            path: path.clone(),
            message: err.to_string(),
        })?;

        let sheet_names = workbook.sheet_names().to_vec();
        tracing::debug!(sheets = ?sheet_names, "workbook opened");
        let sheet = match &self.sheet {
            Some(name) if sheet_names.iter().any(|s| s == name) => name.clone(),
            Some(name) => {
                return Err(SourceError::SheetMissing {
                    path,
                    sheet: name.clone(),
                })
            }
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| SourceError::SheetMissing {
                    path: path.clone(),
                    sheet: "(first sheet)".to_string(),
                })?,
        };

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|err| SourceError::Read(format!("failed to read sheet {sheet}: {err}")))?;

        // Indices are relative to the used range, the same as the sheet export.
        let rows = range
            .rows()
            .enumerate()
            .map(|(row_idx, cells)| RawRow::new(row_idx, cells.iter().map(data_to_cell).collect()))
            .collect();
        Ok(rows)
    }
}
