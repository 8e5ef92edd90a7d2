//! The analyze command as a library: discover, analyze, export.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, info_span};

use kartoteka_core::pipeline::{AnalysisRun, analyze_files};
use kartoteka_ingest::{CsvGridSource, discover_record_files, load_name_dictionary};
use kartoteka_model::AnalysisOptions;
use kartoteka_report::{csv as report_csv, format_statistics};

/// Output file names, fixed by office convention.
const PEOPLE_FILE: &str = "osoby.csv";
const JUBILEES_FILE: &str = "jubileusze.csv";
const MARRIAGES_FILE: &str = "sluby.csv";
const UNKNOWN_FILE: &str = "nieznane_imiona.csv";
const SUMMARY_FILE: &str = "podsumowanie.csv";
const STATISTICS_FILE: &str = "statystyki.txt";

/// One analyze invocation, fully resolved.
pub struct AnalyzeRequest {
    /// Folder containing the record-card files.
    pub folder: PathBuf,
    /// Path to the given-name dictionary JSON.
    pub names: PathBuf,
    pub options: AnalysisOptions,
    /// None for a dry run: analyze and report, write nothing.
    pub output_dir: Option<PathBuf>,
    /// Anchors ages, the year window, and jubilee lookahead.
    pub reference_date: NaiveDate,
}

pub struct AnalyzeOutcome {
    pub run: AnalysisRun,
    pub reference_date: NaiveDate,
    /// Files written, in write order. Empty on a dry run.
    pub written: Vec<PathBuf>,
}

pub fn run_analysis(request: &AnalyzeRequest) -> Result<AnalyzeOutcome> {
    let span = info_span!("analyze", folder = %request.folder.display());
    let _guard = span.enter();

    let dictionary = load_name_dictionary(&request.names);
    let files = discover_record_files(&request.folder)?;
    info!(
        files = files.len(),
        names = dictionary.len(),
        reference_date = %request.reference_date,
        "starting analysis"
    );

    let run = analyze_files(
        &CsvGridSource,
        &files,
        &dictionary,
        &request.options,
        request.reference_date,
    )?;

    let written = match &request.output_dir {
        Some(output_dir) => write_outputs(output_dir, &run, request.reference_date)?,
        None => Vec::new(),
    };

    Ok(AnalyzeOutcome {
        run,
        reference_date: request.reference_date,
        written,
    })
}

fn write_outputs(dir: &Path, run: &AnalysisRun, today: NaiveDate) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create output folder {}", dir.display()))?;
    let mut written = Vec::new();

    let path = dir.join(PEOPLE_FILE);
    report_csv::write_people_to_path(&path, &run.people)?;
    written.push(path);

    let path = dir.join(JUBILEES_FILE);
    report_csv::write_jubilees_to_path(&path, &run.jubilees)?;
    written.push(path);

    let path = dir.join(MARRIAGES_FILE);
    report_csv::write_marriages_to_path(&path, &run.marriages)?;
    written.push(path);

    let path = dir.join(UNKNOWN_FILE);
    report_csv::write_unknown_names_to_path(&path, &run.unknown_names)?;
    written.push(path);

    let path = dir.join(SUMMARY_FILE);
    report_csv::write_summary_to_path(&path, &run.summary)?;
    written.push(path);

    let path = dir.join(STATISTICS_FILE);
    fs::write(&path, format_statistics(&run.summary, today))
        .with_context(|| format!("write {}", path.display()))?;
    written.push(path);

    info!(files = written.len(), folder = %dir.display(), "reports written");
    Ok(written)
}
