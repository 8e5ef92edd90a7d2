//! The sequential analysis pipeline.
//!
//! Processing is strictly one file, one sheet, one row at a time. The
//! sentinel-age median substitution reads the ages recorded so far, so
//! the deterministic file/sheet/row order is part of the contract;
//! parallelizing the scan would change sentinel ages.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use kartoteka_model::{
    AnalysisOptions, CoupleKind, Grid, Issue, Jubilee, KartotekaError, MarriageRecord,
    NameDictionary, NamedGrid, PersonRecord, Result,
};

use crate::age::calculate_age;
use crate::dates::{BirthCellOutcome, read_birth_cell};
use crate::extract::{
    SheetHeader, extract_grandparents_marriage_date, extract_marriage_info, extract_sheet_header,
    person_row_tokens,
};
use crate::jubilee::upcoming_jubilees;
use crate::stats::{Statistics, Summary};
use crate::text::{format_person_name, strip_diacritics};

/// Fallback age for a sentinel birth before any ages are recorded.
pub const DEFAULT_MEDIAN_AGE: i64 = 40;

/// Placeholder names for the grandparent couple.
const GRANDFATHER: &str = "Dziadek";
const GRANDMOTHER: &str = "Babcia";

/// Supplies sheet grids for a record file. The engine never touches the
/// filesystem itself; implementations live with the ingest layer.
pub trait GridSource {
    fn load_grids(&self, path: &Path) -> Result<Vec<NamedGrid>>;
}

/// One discovered record file, as handed to the pipeline.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Template files are listed but contribute nothing to statistics.
    pub is_template: bool,
}

/// Everything one analysis run produces.
#[derive(Debug, Default)]
pub struct AnalysisRun {
    pub people: Vec<PersonRecord>,
    pub jubilees: Vec<Jubilee>,
    pub marriages: Vec<MarriageRecord>,
    /// Normalized unknown given name -> every "file -> sheet" location
    /// it was seen at.
    pub unknown_names: BTreeMap<String, Vec<String>>,
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

/// Mutable run state threaded through the per-sheet steps.
struct RunState<'a> {
    options: &'a AnalysisOptions,
    dictionary: &'a NameDictionary,
    today: NaiveDate,
    stats: Statistics,
    people: Vec<PersonRecord>,
    jubilees: Vec<Jubilee>,
    marriages: Vec<MarriageRecord>,
    unknown_names: BTreeMap<String, Vec<String>>,
    issues: Vec<Issue>,
}

/// Analyzes a set of discovered record files.
///
/// The statistics value is created here, mutated only by this call, and
/// returned frozen inside the run result. Fails only on an empty name
/// dictionary; every per-file problem becomes a recorded issue.
pub fn analyze_files(
    source: &dyn GridSource,
    files: &[SourceFile],
    dictionary: &NameDictionary,
    options: &AnalysisOptions,
    today: NaiveDate,
) -> Result<AnalysisRun> {
    if dictionary.is_empty() {
        return Err(KartotekaError::EmptyDictionary);
    }

    let mut state = RunState {
        options,
        dictionary,
        today,
        stats: Statistics::new(),
        people: Vec::new(),
        jubilees: Vec::new(),
        marriages: Vec::new(),
        unknown_names: BTreeMap::new(),
        issues: Vec::new(),
    };
    state.stats.start();

    for file in files {
        let file_name = file.path.display().to_string();
        info!(file = %file_name, "analyzing file");

        if file.is_template {
            state.issues.push(Issue::info(
                &file_name,
                None,
                "template file; listed but excluded from statistics",
            ));
            continue;
        }
        state.stats.add_file();

        let grids = match source.load_grids(&file.path) {
            Ok(grids) => grids,
            Err(error) => {
                warn!(file = %file_name, %error, "cannot read file");
                state
                    .issues
                    .push(Issue::error(&file_name, None, format!("cannot read file: {error}")));
                state.stats.add_error();
                continue;
            }
        };

        for sheet in &grids {
            state.stats.add_sheet();
            debug!(file = %file_name, sheet = %sheet.name, "analyzing sheet");
            analyze_sheet(&mut state, &file_name, sheet);
        }
    }

    state.stats.update_family_stats(&state.people);
    state.stats.finish();

    Ok(AnalysisRun {
        people: state.people,
        jubilees: state.jubilees,
        marriages: state.marriages,
        unknown_names: state.unknown_names,
        issues: state.issues,
        summary: state.stats.summary(),
    })
}

fn analyze_sheet(state: &mut RunState<'_>, file_name: &str, sheet: &NamedGrid) {
    let header = extract_sheet_header(&sheet.grid);

    analyze_principal_couple(state, file_name, sheet, &header);
    analyze_grandparent_couple(state, file_name, sheet, &header);
    analyze_person_rows(state, file_name, sheet, &header);
}

fn analyze_principal_couple(
    state: &mut RunState<'_>,
    file_name: &str,
    sheet: &NamedGrid,
    header: &SheetHeader,
) {
    let marriage = extract_marriage_info(&sheet.grid, state.today);
    let Some(date) = &marriage.marriage_date else {
        return;
    };
    let Ok(parsed) = date.parse::<NaiveDate>() else {
        return;
    };

    state.stats.add_marriage_year(parsed.year());
    record_marriage_in_range(
        state,
        file_name,
        header,
        marriage.husband.clone().unwrap_or_default(),
        marriage.wife.clone().unwrap_or_default(),
        date,
        parsed.year(),
        CoupleKind::Spouses,
    );

    if let (Some(husband), Some(wife)) = (&marriage.husband, &marriage.wife) {
        let found = upcoming_jubilees(
            date,
            &header.surname,
            husband,
            wife,
            &header.old_address,
            CoupleKind::Spouses,
            state.options,
            state.today,
        );
        for jubilee in found {
            state.stats.add_jubilee();
            state.jubilees.push(jubilee);
        }
    }
}

fn analyze_grandparent_couple(
    state: &mut RunState<'_>,
    file_name: &str,
    sheet: &NamedGrid,
    header: &SheetHeader,
) {
    let Some(date) = extract_grandparents_marriage_date(&sheet.grid, state.today) else {
        return;
    };
    let Ok(parsed) = date.parse::<NaiveDate>() else {
        return;
    };

    state.stats.add_marriage_year(parsed.year());
    record_marriage_in_range(
        state,
        file_name,
        header,
        GRANDFATHER.to_string(),
        GRANDMOTHER.to_string(),
        &date,
        parsed.year(),
        CoupleKind::Grandparents,
    );

    let found = upcoming_jubilees(
        &date,
        &header.surname,
        GRANDFATHER,
        GRANDMOTHER,
        &header.old_address,
        CoupleKind::Grandparents,
        state.options,
        state.today,
    );
    for jubilee in found {
        state.stats.add_jubilee();
        state.jubilees.push(jubilee);
    }
}

#[allow(clippy::too_many_arguments)]
fn record_marriage_in_range(
    state: &mut RunState<'_>,
    file_name: &str,
    header: &SheetHeader,
    husband: String,
    wife: String,
    date: &str,
    year: i32,
    kind: CoupleKind,
) {
    if !state.options.marriage_year_in_range(year) {
        return;
    }
    state.stats.add_marriage_in_range();
    state.marriages.push(MarriageRecord {
        surname: header.surname.clone(),
        husband,
        wife,
        date: date.to_string(),
        year,
        address: header.address.clone(),
        old_address: header.old_address.clone(),
        kind,
        file: file_name.to_string(),
    });
}

fn analyze_person_rows(
    state: &mut RunState<'_>,
    file_name: &str,
    sheet: &NamedGrid,
    header: &SheetHeader,
) {
    for row in 0..sheet.grid.row_count() {
        let Some((given_name, surname_override)) = person_row_tokens(&sheet.grid, row) else {
            continue;
        };
        analyze_person_row(
            state,
            file_name,
            sheet,
            header,
            row,
            &given_name,
            surname_override.as_deref(),
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn analyze_person_row(
    state: &mut RunState<'_>,
    file_name: &str,
    sheet: &NamedGrid,
    header: &SheetHeader,
    row: usize,
    given_name: &str,
    surname_override: Option<&str>,
) {
    let birth_cell = sheet.grid.cell(row, 2);
    let sheet_name = Some(sheet.name.as_str());

    let (age, median_assigned) = match read_birth_cell(birth_cell, state.today) {
        BirthCellOutcome::Missing => {
            state.issues.push(Issue::warning(
                file_name,
                sheet_name,
                format!("missing birth date for '{given_name}'"),
            ));
            state.stats.add_warning();
            return;
        }
        BirthCellOutcome::Invalid(error) => {
            state.issues.push(Issue::error(
                file_name,
                sheet_name,
                format!(
                    "invalid birth date for '{given_name}': {} ({error})",
                    birth_cell.display_value()
                ),
            ));
            state.stats.add_error();
            return;
        }
        BirthCellOutcome::Unparsable => {
            state.issues.push(Issue::warning(
                file_name,
                sheet_name,
                format!(
                    "cannot read birth date for '{given_name}': {}",
                    birth_cell.display_value()
                ),
            ));
            state.stats.add_warning();
            return;
        }
        BirthCellOutcome::Sentinel => {
            let age = state.stats.running_median().unwrap_or(DEFAULT_MEDIAN_AGE);
            state.issues.push(Issue::info(
                file_name,
                sheet_name,
                format!("sentinel birth date for '{given_name}': median age {age} assigned"),
            ));
            (age, true)
        }
        BirthCellOutcome::Date(birth) => {
            // Birth decades see the year before the age and dictionary
            // filters run; excluded rows still shape the histogram.
            state.stats.add_birth_year(birth.year());
            (calculate_age(birth, state.today), false)
        }
    };

    if !state.options.age_in_range(age) {
        return;
    }

    let name_key = strip_diacritics(given_name.trim());
    let Some(gender) = state.dictionary.lookup(&name_key) else {
        record_unknown_name(state, file_name, &sheet.name, given_name, &name_key);
        return;
    };

    let surname = match surname_override {
        Some(second) => format_person_name(second),
        None => header.surname.clone(),
    };

    let record = PersonRecord {
        given_name: given_name.to_string(),
        given_name_key: name_key,
        surname,
        address: header.address.clone(),
        old_address: header.old_address.clone(),
        age,
        median_assigned,
        gender,
        sheet: sheet.name.clone(),
        file: file_name.to_string(),
    };
    state.stats.add_person(&record);
    state.people.push(record);
}

fn record_unknown_name(
    state: &mut RunState<'_>,
    file_name: &str,
    sheet_name: &str,
    given_name: &str,
    name_key: &str,
) {
    let first_occurrence = !state.unknown_names.contains_key(name_key);
    if first_occurrence {
        state.issues.push(Issue::warning(
            file_name,
            Some(sheet_name),
            format!("unknown given name '{given_name}'; add it to the name dictionary"),
        ));
        state.stats.add_warning();
        state.stats.add_unknown_name();
    }
    let location = format!("{file_name} -> {sheet_name}");
    let locations = state.unknown_names.entry(name_key.to_string()).or_default();
    if !locations.contains(&location) {
        locations.push(location);
    }
}

/// Convenience source for tests and embedders that already hold grids.
pub struct InMemorySource {
    grids: BTreeMap<PathBuf, Vec<NamedGrid>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            grids: BTreeMap::new(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, grids: Vec<NamedGrid>) -> Self {
        self.grids.insert(path.into(), grids);
        self
    }

    pub fn with_sheet(self, path: impl Into<PathBuf>, name: &str, grid: Grid) -> Self {
        self.with_file(
            path,
            vec![NamedGrid {
                name: name.to_string(),
                grid,
            }],
        )
    }
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSource for InMemorySource {
    fn load_grids(&self, path: &Path) -> Result<Vec<NamedGrid>> {
        self.grids
            .get(path)
            .cloned()
            .ok_or_else(|| KartotekaError::Message(format!("no grids for {}", path.display())))
    }
}
