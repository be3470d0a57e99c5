use crate::domain::entities::row::RawRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    Open { path: String, message: String },
    SheetMissing { path: String, sheet: String },
    Read(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Open { path, message } => write!(f, "failed to open {path}: {message}"),
            SourceError::SheetMissing { path, sheet } => {
                write!(f, "sheet not found in {path}: {sheet}")
            }
            SourceError::Read(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Anything that yields the rows of one sheet, header included, in sheet order.
pub trait RowSource {
    fn describe(&self) -> String;
    fn read_rows(&self) -> Result<Vec<RawRow>, SourceError>;
}
