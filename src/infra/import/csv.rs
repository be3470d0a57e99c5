use std::path::PathBuf;

use crate::domain::entities::row::{Cell, RawRow};
use crate::usecase::ports::source::{RowSource, SourceError};

/// Headerless CSV export of the budget sheet. Rows may differ in width.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Numbers become numeric cells, the way a spreadsheet reader types them.
pub fn field_to_cell(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Cell::Number(value),
        _ => Cell::Text(field.to_string()),
    }
}

pub fn read_csv_rows<R: std::io::Read>(reader: R) -> Result<Vec<RawRow>, SourceError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record
            .map_err(|err| SourceError::Read(format!("failed to parse csv record {row_idx}: {err}")))?;
        rows.push(RawRow::new(row_idx, record.iter().map(field_to_cell).collect()));
    }
    Ok(rows)
}

impl RowSource for CsvSource {
    fn describe(&self) -> String {
        format!("csv {}", self.path.display())
    }

    fn read_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        let file = std::fs::File::open(&self.path).map_err(|err| SourceError::Open {
            path: self.path.display().to_string(),
            message: err.to_string(),
        })?;
        read_csv_rows(file)
    }
}
