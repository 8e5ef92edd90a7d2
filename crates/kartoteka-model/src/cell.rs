//! Typed cell values and the record-sheet grid.
//!
//! A grid is a rectangular, immutable snapshot of one sheet of a record
//! file. Cells are addressed by zero-based (row, column); reads outside
//! the populated area answer [`CellValue::Empty`] rather than failing,
//! because real sheets are ragged and extraction is positional.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of a record sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Free text, as read from the sheet.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// A date-typed cell (spreadsheet date, already resolved).
    Date(NaiveDate),
    /// Blank cell.
    Empty,
}

impl CellValue {
    /// Returns true for blank cells and for text cells that trim to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Renders the cell for display in warnings and error messages.
    pub fn display_value(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(value) => {
                if value.fract() == 0.0 {
                    format!("{}", *value as i64)
                } else {
                    format!("{value}")
                }
            }
            Self::Date(date) => date.to_string(),
            Self::Empty => String::new(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_value())
    }
}

/// One sheet of a record file, as a dense row-major grid.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Number of rows in the populated area.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest populated row. Rows are ragged; callers that need a
    /// rectangular bound use this.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at (row, col); out-of-range reads answer `Empty`.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&CellValue::Empty)
    }

    /// Width of a single row, zero when the row does not exist.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A named sheet together with its grid, as handed over by a grid source.
#[derive(Debug, Clone)]
pub struct NamedGrid {
    /// Sheet name (for CSV sources, the file stem).
    pub name: String,
    pub grid: Grid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reads_are_empty() {
        let grid = Grid::new(vec![vec![CellValue::Text("a".to_string())]]);
        assert_eq!(grid.cell(0, 0), &CellValue::Text("a".to_string()));
        assert_eq!(grid.cell(5, 5), &CellValue::Empty);
    }

    #[test]
    fn ragged_rows_report_widest_column_count() {
        let grid = Grid::new(vec![
            vec![CellValue::Empty; 2],
            vec![CellValue::Empty; 7],
            vec![CellValue::Empty; 4],
        ]);
        assert_eq!(grid.col_count(), 7);
        assert_eq!(grid.row_len(0), 2);
        assert_eq!(grid.row_len(9), 0);
    }

    #[test]
    fn blank_detection_covers_whitespace_text() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".to_string()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn number_display_drops_trailing_zero_fraction() {
        assert_eq!(CellValue::Number(12.0).display_value(), "12");
        assert_eq!(CellValue::Number(12.5).display_value(), "12.5");
    }
}
