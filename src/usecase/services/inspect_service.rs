use anyhow::{Context, Result};

use crate::domain::entities::row::RawRow;
use crate::domain::services::classifier::{classify, Classification};
use crate::usecase::ports::source::RowSource;

#[derive(Debug, Clone, PartialEq)]
pub struct InspectedRow {
    pub index: usize,
    pub cells: Vec<String>,
    pub verdict: String,
}

pub fn verdict_for(row: &RawRow, header_rows: usize) -> String {
    if row.index < header_rows.max(1) {
        return "header".to_string();
    }
    match classify(row) {
        Classification::Structural {
            depth,
            numbering,
            description,
        } => format!("depth {} {numbering} {description}", depth.index()),
        Classification::Leaf { description } => format!("depth 4 (unlabeled) {description}"),
        Classification::Skip(reason) => format!("skip: {}", reason.as_str()),
    }
}

/// First `limit` rows with their raw cells and how the classifier reads them.
pub fn inspect_rows(rows: &[RawRow], header_rows: usize, limit: usize) -> Vec<InspectedRow> {
    rows.iter()
        .take(limit)
        .map(|row| InspectedRow {
            index: row.index,
            cells: row.cells.iter().map(ToString::to_string).collect(),
            verdict: verdict_for(row, header_rows),
        })
        .collect()
}

pub struct InspectService {
    source: Box<dyn RowSource>,
    header_rows: usize,
}

impl InspectService {
    pub fn new(source: Box<dyn RowSource>, header_rows: usize) -> Self {
        Self {
            source,
            header_rows,
        }
    }

    pub fn inspect(&self, limit: usize) -> Result<Vec<InspectedRow>> {
        let rows = self
            .source
            .read_rows()
            .with_context(|| format!("failed to load {}", self.source.describe()))?;
        Ok(inspect_rows(&rows, self.header_rows, limit))
    }
}
