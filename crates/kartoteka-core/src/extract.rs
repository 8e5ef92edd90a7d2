//! Heuristic record extraction from one sheet grid.
//!
//! Sheets follow a loose parish convention: family surname and address
//! in a header block, the principal couple around rows 8-9, grandparent
//! roles labeled in column 3, and one person per data row with the name
//! in column 1 and the birth date in column 2. Everything here is
//! best-effort; a sheet that lacks a region simply contributes nothing.

use chrono::NaiveDate;
use kartoteka_model::{CellValue, Grid, MarriageInfo};

use crate::dates::{find_labeled_date, normalize_date};
use crate::locate::{FieldLocator, FixedCell, LabeledRow};
use crate::text::extract_words;

/// Principal-couple convention cells.
const HUSBAND_NAME: FixedCell = FixedCell { row: 8, col: 1 };
const WIFE_NAME: FixedCell = FixedCell { row: 9, col: 1 };
const HUSBAND_MARRIAGE: FixedCell = FixedCell { row: 8, col: 3 };
const WIFE_MARRIAGE: FixedCell = FixedCell { row: 9, col: 3 };

/// Column carrying grandparent role markers.
const ROLE_COL: usize = 3;
/// Death markers that disqualify a role row.
const DEATH_MARKERS: [&str; 2] = ["†", "zm."];
/// The grandfather label wins on a row carrying both role markers, so
/// such a row never supplies the grandmother.
const GRANDMOTHER_EXCLUDE: [&str; 3] = ["†", "zm.", "dziadek"];
/// Grandparent neighborhood scan: first and last candidate column.
const SCAN_COL_FROM: usize = 4;
const SCAN_COL_TO: usize = 17;

/// Header block recovered from the top of a sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetHeader {
    pub surname: String,
    pub address: String,
    pub old_address: String,
}

/// First non-blank cell in `rows` of column `col`, rendered for display.
fn first_in_column(grid: &Grid, col: usize, rows: std::ops::Range<usize>) -> Option<String> {
    rows.map(|row| grid.cell(row, col))
        .find(|cell| !cell.is_blank())
        .map(CellValue::display_value)
}

/// Joins the first non-blank cell of each column in `cols` over `rows`.
fn join_columns(grid: &Grid, cols: std::ops::Range<usize>, rows: std::ops::Range<usize>) -> String {
    let parts: Vec<String> = cols
        .filter_map(|col| first_in_column(grid, col, rows.clone()))
        .collect();
    parts.join(" ")
}

/// Extracts surname and addresses from the sheet header block.
///
/// Surname comes from columns 0-1 over rows 1-6; the current address
/// from columns 2-4 over rows 1-3; the prior address from columns 5-6
/// over rows 1-3. Grids smaller than a region yield an empty field.
pub fn extract_sheet_header(grid: &Grid) -> SheetHeader {
    let mut header = SheetHeader::default();
    if grid.row_count() >= 7 && grid.col_count() >= 2 {
        header.surname = join_columns(grid, 0..2, 1..7);
    }
    if grid.row_count() >= 4 && grid.col_count() >= 5 {
        header.address = join_columns(grid, 2..5, 1..4);
    }
    if grid.row_count() >= 4 && grid.col_count() >= 7 {
        header.old_address = join_columns(grid, 5..7, 1..4);
    }
    header
}

/// Reads a located cell as a non-blank display string.
fn located_text(grid: &Grid, locator: &FixedCell) -> Option<String> {
    let cell_ref = locator.locate(grid)?;
    let cell = grid.cell(cell_ref.row, cell_ref.col);
    if cell.is_blank() {
        None
    } else {
        Some(cell.display_value())
    }
}

/// Extracts the principal couple and their marriage date.
///
/// Either spouse's marriage-date cell may be empty; whichever is present
/// is used. A grid smaller than the convention yields all-absent.
pub fn extract_marriage_info(grid: &Grid, today: NaiveDate) -> MarriageInfo {
    let husband = located_text(grid, &HUSBAND_NAME);
    let wife = located_text(grid, &WIFE_NAME);

    let marriage_date = [HUSBAND_MARRIAGE, WIFE_MARRIAGE]
        .iter()
        .filter_map(|locator| locator.locate(grid))
        .map(|cell_ref| grid.cell(cell_ref.row, cell_ref.col))
        .find(|cell| !cell.is_blank())
        .and_then(|cell| normalize_date(cell, today));

    MarriageInfo {
        husband,
        wife,
        marriage_date,
    }
}

/// Searches for the grandparents' marriage date.
///
/// Both role rows ("dziadek" and "babcia", minus rows marked deceased)
/// must be present. The bounded neighborhood around them is scanned
/// row-major; the first cell whose content normalizes to a date wins,
/// whether labeled ("ślub 15.06.1995") or a raw date cell.
pub fn extract_grandparents_marriage_date(grid: &Grid, today: NaiveDate) -> Option<String> {
    let grandfather = LabeledRow {
        col: ROLE_COL,
        label: "dziadek",
        exclude: &DEATH_MARKERS,
    }
    .locate(grid)?;
    let grandmother = LabeledRow {
        col: ROLE_COL,
        label: "babcia",
        exclude: &GRANDMOTHER_EXCLUDE,
    }
    .locate(grid)?;

    let earlier = grandfather.row.min(grandmother.row);
    let later = grandfather.row.max(grandmother.row);

    if grid.col_count() == 0 {
        return None;
    }
    let col_to = SCAN_COL_TO.min(grid.col_count() - 1);
    if col_to < SCAN_COL_FROM {
        return None;
    }

    let row_from = earlier.saturating_sub(2);
    let row_to = grid.row_count().min(later + 3);

    for row in row_from..row_to {
        for col in SCAN_COL_FROM..=col_to {
            let cell = grid.cell(row, col);
            if cell.is_blank() {
                continue;
            }
            let found = match cell {
                CellValue::Text(text) => find_labeled_date(text, today),
                other => normalize_date(other, today),
            };
            if found.is_some() {
                return found;
            }
        }
    }
    None
}

/// Name tokens of a person data row.
///
/// Rows narrower than three columns carry no person. The first token of
/// the name cell is the given name; a second token, when present,
/// overrides the sheet surname.
pub fn person_row_tokens(grid: &Grid, row: usize) -> Option<(String, Option<String>)> {
    if grid.row_len(row) < 3 {
        return None;
    }
    let mut tokens = extract_words(grid.cell(row, 1)).into_iter();
    let given_name = tokens.next()?;
    Some((given_name, tokens.next()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn small_grid_yields_empty_header_and_marriage() {
        let grid = Grid::new(vec![vec![text("x")]]);
        assert_eq!(extract_sheet_header(&grid), SheetHeader::default());
        assert_eq!(
            extract_marriage_info(&grid, d(2025, 6, 10)),
            MarriageInfo::default()
        );
    }

    #[test]
    fn shared_role_cell_cannot_supply_the_grandmother() {
        let today = d(2025, 6, 10);
        let mut rows = vec![vec![CellValue::Empty; 5]; 4];
        rows[2][3] = text("dziadek i babcia Kowalscy");
        rows[2][4] = text("ślub 20.06.1975");
        assert_eq!(
            extract_grandparents_marriage_date(&Grid::new(rows.clone()), today),
            None
        );

        // A separate babcia row restores the couple.
        rows[3][3] = text("babcia Helena");
        assert_eq!(
            extract_grandparents_marriage_date(&Grid::new(rows), today),
            Some("1975-06-20".to_string())
        );
    }

    #[test]
    fn person_row_needs_three_columns_and_a_name() {
        let grid = Grid::new(vec![
            vec![text("1"), text("Jan Kowalski")],
            vec![text("2"), text("Anna Nowak"), text("15.06.1950")],
            vec![text("3"), CellValue::Empty, text("1.1.1960")],
        ]);
        assert_eq!(person_row_tokens(&grid, 0), None);
        assert_eq!(
            person_row_tokens(&grid, 1),
            Some(("anna".to_string(), Some("nowak".to_string())))
        );
        assert_eq!(person_row_tokens(&grid, 2), None);
    }
}
