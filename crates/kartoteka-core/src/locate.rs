//! Field locators: strategies for finding semantically meaningful cells.
//!
//! Record sheets follow a loose layout convention; the extractor never
//! hard-codes coordinates inline. Instead it asks a locator for a cell,
//! so alternate sheet layouts only need a different strategy, not new
//! extraction logic.

use kartoteka_model::{CellValue, Grid};

/// A located cell, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

/// Strategy for locating one field inside a grid.
pub trait FieldLocator {
    /// Finds the field's cell, or None when the grid does not carry it.
    fn locate(&self, grid: &Grid) -> Option<CellRef>;
}

/// Fixed sheet-convention coordinates.
///
/// Tolerates grids smaller than the convention: out-of-range lookups
/// answer None instead of erroring.
#[derive(Debug, Clone, Copy)]
pub struct FixedCell {
    pub row: usize,
    pub col: usize,
}

impl FieldLocator for FixedCell {
    fn locate(&self, grid: &Grid) -> Option<CellRef> {
        if self.row < grid.row_count() && self.col < grid.col_count() {
            Some(CellRef {
                row: self.row,
                col: self.col,
            })
        } else {
            None
        }
    }
}

/// Scans one column top-to-bottom for a label substring.
///
/// Matching is case-insensitive on the cell's display text. Rows that
/// additionally carry any exclusion marker (e.g. a death marker) are
/// skipped. When several rows match, the last one wins, matching how
/// sheets append corrections below earlier entries.
#[derive(Debug, Clone)]
pub struct LabeledRow<'a> {
    pub col: usize,
    pub label: &'a str,
    pub exclude: &'a [&'a str],
}

impl FieldLocator for LabeledRow<'_> {
    fn locate(&self, grid: &Grid) -> Option<CellRef> {
        let mut found = None;
        for row in 0..grid.row_count() {
            let cell = grid.cell(row, self.col);
            if matches!(cell, CellValue::Empty) {
                continue;
            }
            let text = cell.display_value().to_lowercase();
            if !text.contains(self.label) {
                continue;
            }
            if self.exclude.iter().any(|marker| text.contains(marker)) {
                continue;
            }
            found = Some(CellRef {
                row,
                col: self.col,
            });
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn fixed_cell_tolerates_small_grids() {
        let grid = Grid::new(vec![vec![CellValue::Empty; 2]; 3]);
        assert_eq!(
            FixedCell { row: 1, col: 1 }.locate(&grid),
            Some(CellRef { row: 1, col: 1 })
        );
        assert_eq!(FixedCell { row: 8, col: 1 }.locate(&grid), None);
        assert_eq!(FixedCell { row: 1, col: 5 }.locate(&grid), None);
    }

    #[test]
    fn labeled_row_skips_excluded_and_keeps_last() {
        let grid = Grid::new(vec![
            vec![text("Dziadek Stanisław")],
            vec![text("dziadek † zm. 1990")],
            vec![text("DZIADEK Józef")],
        ]);
        let locator = LabeledRow {
            col: 0,
            label: "dziadek",
            exclude: &["†", "zm."],
        };
        assert_eq!(locator.locate(&grid), Some(CellRef { row: 2, col: 0 }));
    }

    #[test]
    fn labeled_row_answers_none_without_match() {
        let grid = Grid::new(vec![vec![text("babcia zm. 1985")]]);
        let locator = LabeledRow {
            col: 0,
            label: "babcia",
            exclude: &["†", "zm."],
        };
        assert_eq!(locator.locate(&grid), None);
    }
}
