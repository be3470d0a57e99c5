pub mod csv;
pub mod xlsx;

use std::path::Path;

use crate::usecase::ports::source::RowSource;

/// Picks a reader from the file extension; anything that is not `.csv` goes
/// through the workbook reader.
pub fn open_source(path: &Path, sheet: Option<String>) -> Box<dyn RowSource> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Box::new(csv::CsvSource::new(path))
    } else {
        Box::new(xlsx::WorkbookSource::new(path, sheet))
    }
}
