use std::fmt;

pub const COL_PRIMARY: usize = 1;
pub const COL_SECONDARY: usize = 2;
pub const COL_QTY: usize = 3;
pub const COL_HOURS: usize = 4;
pub const COL_DAYS: usize = 5;
pub const COL_MONTHS: usize = 6;
pub const COL_VOLUME: usize = 7;
pub const COL_UNIT: usize = 8;
pub const COL_UNIT_PRICE: usize = 9;
pub const COL_TOTAL_PRICE: usize = 10;

static EMPTY: Cell = Cell::Empty;

/// One spreadsheet cell as handed over by a reader.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    #[cfg(test)]
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(v) => v.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Trimmed text form. Zero and non-finite numbers read as blank, the same
    /// way a falsy cell does in the sheet export.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(v) => v.trim().to_string(),
            Cell::Number(v) if *v == 0.0 || !v.is_finite() => String::new(),
            Cell::Number(v) => format_number(*v),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(v) => write!(f, "{v}"),
            Cell::Number(v) => write!(f, "{}", format_number(*v)),
        }
    }
}

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// A sheet row with its 0-based position in the sheet (row 0 is the header).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    pub index: usize,
    pub cells: Vec<Cell>,
}

impl RawRow {
    pub fn new(index: usize, cells: Vec<Cell>) -> Self {
        Self { index, cells }
    }

    pub fn cell(&self, idx: usize) -> &Cell {
        self.cells.get(idx).unwrap_or(&EMPTY)
    }

    pub fn text(&self, idx: usize) -> String {
        self.cell(idx).as_text()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_text_treats_zero_as_blank() {
        assert_eq!(Cell::Number(0.0).as_text(), "");
        assert_eq!(Cell::Number(3.0).as_text(), "3");
        assert_eq!(Cell::Number(2.5).as_text(), "2.5");
        assert_eq!(Cell::text("  I.  ").as_text(), "I.");
    }

    #[test]
    fn cell_out_of_range_reads_empty() {
        let row = RawRow::new(4, vec![Cell::Empty, Cell::text("A)")]);
        assert_eq!(row.cell(9), &Cell::Empty);
        assert_eq!(row.text(1), "A)");
        assert!(!row.is_empty());
        assert!(RawRow::new(5, vec![Cell::text("  ")]).is_empty());
    }
}
