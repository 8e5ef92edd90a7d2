//! Analysis engine for parish family record cards.
//!
//! Takes loosely-structured sheet grids, extracts people, marriages and
//! grandparent couples, detects upcoming wedding jubilees and folds
//! everything into run statistics. The engine is pure with respect to
//! time and storage: callers pass the reference date and a [`pipeline::GridSource`].

pub mod age;
pub mod dates;
pub mod extract;
pub mod jubilee;
pub mod locate;
pub mod pipeline;
pub mod stats;
pub mod text;

pub use age::calculate_age;
pub use dates::{BirthCellOutcome, DateError, DateValidation, normalize_date, normalize_date_text};
pub use extract::{
    SheetHeader, extract_grandparents_marriage_date, extract_marriage_info, extract_sheet_header,
};
pub use jubilee::{MILESTONE_YEARS, anniversary_in_year, upcoming_jubilees};
pub use pipeline::{AnalysisRun, DEFAULT_MEDIAN_AGE, GridSource, InMemorySource, SourceFile, analyze_files};
pub use stats::{AGE_GROUP_LABELS, AgeStats, FamilySplit, NameCount, Statistics, Summary};
pub use text::{format_person_name, strip_diacritics};
