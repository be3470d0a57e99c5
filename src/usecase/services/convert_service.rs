use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::domain::entities::outline::OutlineNode;
use crate::domain::entities::row::RawRow;
use crate::domain::services::aggregator::aggregate_forest;
use crate::domain::services::builder::build;
use crate::domain::services::classifier::classify_row;
use crate::usecase::ports::source::RowSource;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionReport {
    pub roots: Vec<OutlineNode>,
    /// Rows after the header.
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub orphans: Vec<String>,
    pub total: i64,
}

impl ConversionReport {
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(OutlineNode::node_count).sum()
    }
}

/// Classify, build and aggregate in one pass over already loaded rows. The
/// first row is always treated as the header.
pub fn convert_rows(rows: &[RawRow], header_rows: usize) -> ConversionReport {
    let header_rows = header_rows.max(1);
    let body = rows.get(header_rows..).unwrap_or_default();
    let mut rows_skipped = 0;

    let classified: Vec<_> = body
        .iter()
        .filter_map(|row| match classify_row(row) {
            Ok(classified) => Some(classified),
            Err(reason) => {
                debug!(row = row.index, reason = reason.as_str(), "row skipped");
                rows_skipped += 1;
                None
            }
        })
        .collect();

    let forest = build(classified);
    let mut roots = forest.roots;
    let total = aggregate_forest(&mut roots);

    ConversionReport {
        roots,
        rows_read: body.len(),
        rows_skipped,
        orphans: forest.orphans,
        total,
    }
}

pub struct ConvertService {
    source: Box<dyn RowSource>,
    header_rows: usize,
}

impl ConvertService {
    pub fn new(source: Box<dyn RowSource>, header_rows: usize) -> Self {
        Self {
            source,
            header_rows,
        }
    }

    pub fn convert(&self) -> Result<ConversionReport> {
        info!(source = %self.source.describe(), "reading budget sheet");
        let rows = self
            .source
            .read_rows()
            .with_context(|| format!("failed to load {}", self.source.describe()))?;
        info!(rows = rows.len(), "raw rows loaded");

        let report = convert_rows(&rows, self.header_rows);
        info!(
            roots = report.roots.len(),
            nodes = report.node_count(),
            skipped = report.rows_skipped,
            orphans = report.orphans.len(),
            total = report.total,
            "outline built"
        );
        Ok(report)
    }
}
