//! Date recognition and validation for record-sheet cells.
//!
//! Sheet dates are hand-typed `D.M.YYYY` (separators `.`, `/`, or `-`),
//! sometimes prefixed with a wedding label ("ślub"). The grammar is:
//!
//! ```text
//! date-cell   = [label] [":" | "-"] day sep month sep year
//! label       = "ślub" | "slub"           (case-insensitive)
//! sep         = "." | "/" | "-"
//! sentinel    = "99" sep "99" sep "9999"  (first-class production)
//! ```
//!
//! The sentinel triple is the parish convention for "birth date unknown";
//! it is accepted as valid-but-special and never becomes a calendar date.

use chrono::{Datelike, NaiveDate};
use kartoteka_model::CellValue;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// The culturally-defined "unknown date" triple.
pub const SENTINEL_DAY: u32 = 99;
pub const SENTINEL_MONTH: u32 = 99;
pub const SENTINEL_YEAR: i32 = 9999;

/// Earliest year a sheet date may carry.
pub const MIN_YEAR: i32 = 1800;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})[./-](\d{1,2})[./-](\d{4})").expect("date pattern"));

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bś?lub\b").expect("label pattern"));

/// Wedding-label-plus-date pattern for free-text neighborhood scans.
static LABELED_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:ślub|slub)?\s*[:\-]?\s*(\d{1,2}[./-]\d{1,2}[./-]\d{4})")
        .expect("labeled date pattern")
});

/// Reasons a date triple fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Month outside 1-12.
    InvalidMonth(u32),
    /// Day outside 1-31.
    InvalidDay(u32),
    /// Year outside 1800..=(current year + 1).
    InvalidYear(i32),
    /// Components in range but not a real calendar date (e.g. Feb 30).
    CalendarInvalid { day: u32, month: u32, year: i32 },
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMonth(month) => write!(f, "invalid month: {month}"),
            Self::InvalidDay(day) => write!(f, "invalid day: {day}"),
            Self::InvalidYear(year) => write!(f, "invalid year: {year}"),
            Self::CalendarInvalid { day, month, year } => {
                write!(f, "invalid calendar date {day}.{month}.{year}")
            }
        }
    }
}

impl std::error::Error for DateError {}

/// Outcome of validating a day/month/year triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValidation {
    /// A real calendar date.
    Valid(NaiveDate),
    /// The exact 99/99/9999 triple: valid-but-special. The person is
    /// still counted; their age comes from the population median.
    Sentinel,
    Invalid(DateError),
}

impl DateValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            _ => None,
        }
    }
}

/// Validates a date triple against calendar rules and the year window.
///
/// `today` anchors the upper year bound (`today.year + 1`); passing it
/// explicitly keeps validation deterministic under test.
pub fn validate_date_components(day: u32, month: u32, year: i32, today: NaiveDate) -> DateValidation {
    if day == SENTINEL_DAY && month == SENTINEL_MONTH && year == SENTINEL_YEAR {
        return DateValidation::Sentinel;
    }
    if !(1..=12).contains(&month) {
        return DateValidation::Invalid(DateError::InvalidMonth(month));
    }
    if !(1..=31).contains(&day) {
        return DateValidation::Invalid(DateError::InvalidDay(day));
    }
    if year < MIN_YEAR || year > today.year() + 1 {
        return DateValidation::Invalid(DateError::InvalidYear(year));
    }
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => DateValidation::Valid(date),
        None => DateValidation::Invalid(DateError::CalendarInvalid { day, month, year }),
    }
}

/// Parses the first `D.M.YYYY` pattern in `text`, returning the raw
/// triple without validating it.
fn find_date_triple(text: &str) -> Option<(u32, u32, i32)> {
    let captures = DATE_RE.captures(text)?;
    let day = captures[1].parse().ok()?;
    let month = captures[2].parse().ok()?;
    let year = captures[3].parse().ok()?;
    Some((day, month, year))
}

/// Normalizes a cell to an ISO `YYYY-MM-DD` string.
///
/// Date cells convert directly. Text cells have a leading wedding label
/// stripped, then the date grammar applied; only a fully valid date
/// survives. The sentinel yields `None` here; sentinel handling is a
/// birth-date concern, see [`read_birth_cell`].
pub fn normalize_date(cell: &CellValue, today: NaiveDate) -> Option<String> {
    match cell {
        CellValue::Date(date) => Some(date.to_string()),
        CellValue::Text(text) => {
            let lowered = text.to_lowercase();
            let stripped = LABEL_RE.replace_all(&lowered, "");
            let (day, month, year) = find_date_triple(stripped.trim())?;
            validate_date_components(day, month, year, today)
                .as_date()
                .map(|date| date.to_string())
        }
        CellValue::Number(_) | CellValue::Empty => None,
    }
}

/// Normalizes a date already captured from free text (neighborhood scans).
pub fn normalize_date_text(text: &str, today: NaiveDate) -> Option<String> {
    normalize_date(&CellValue::Text(text.to_string()), today)
}

/// Searches free text for an optionally-labeled date and normalizes it.
pub fn find_labeled_date(text: &str, today: NaiveDate) -> Option<String> {
    let captures = LABELED_DATE_RE.captures(text)?;
    normalize_date_text(captures.get(1)?.as_str(), today)
}

/// A birth date recovered from a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthDate {
    Date(NaiveDate),
    /// The sentinel triple: age comes from the running population median.
    SentinelMedian,
}

/// Full classification of a birth cell, driving error/warning semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthCellOutcome {
    /// Cell is blank.
    Missing,
    Date(NaiveDate),
    /// The sentinel triple; informational, never an error.
    Sentinel,
    /// A date pattern is present but fails validation.
    Invalid(DateError),
    /// Cell has content but no recognizable date pattern.
    Unparsable,
}

/// Classifies a birth cell.
///
/// Date-typed cells convert directly. Text cells are searched for the
/// date grammar; the sentinel triple is recognized before component
/// validation, so it never surfaces as an invalid date.
pub fn read_birth_cell(cell: &CellValue, today: NaiveDate) -> BirthCellOutcome {
    match cell {
        CellValue::Date(date) => BirthCellOutcome::Date(*date),
        CellValue::Empty => BirthCellOutcome::Missing,
        CellValue::Text(text) => {
            if text.trim().is_empty() {
                return BirthCellOutcome::Missing;
            }
            match find_date_triple(text) {
                Some((day, month, year)) => {
                    match validate_date_components(day, month, year, today) {
                        DateValidation::Valid(date) => BirthCellOutcome::Date(date),
                        DateValidation::Sentinel => {
                            tracing::info!(
                                cell = %text,
                                "sentinel birth date 99/99/9999: assigning population-median age"
                            );
                            BirthCellOutcome::Sentinel
                        }
                        DateValidation::Invalid(error) => BirthCellOutcome::Invalid(error),
                    }
                }
                None => BirthCellOutcome::Unparsable,
            }
        }
        CellValue::Number(_) => BirthCellOutcome::Unparsable,
    }
}

/// Extracts a birth date, collapsing error detail.
///
/// Thin wrapper over [`read_birth_cell`] for callers that only need the
/// date-or-sentinel outcome.
pub fn extract_birth_date(cell: &CellValue, today: NaiveDate) -> Option<BirthDate> {
    match read_birth_cell(cell, today) {
        BirthCellOutcome::Date(date) => Some(BirthDate::Date(date)),
        BirthCellOutcome::Sentinel => Some(BirthDate::SentinelMedian),
        _ => None,
    }
}
