//! End-to-end analyze runs over a real temporary folder.

use std::fs;

use chrono::NaiveDate;
use kartoteka_cli::analysis::{AnalyzeRequest, run_analysis};
use kartoteka_model::AnalysisOptions;
use tempfile::TempDir;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

fn seed_folder() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("karty")).unwrap();
    fs::write(
        dir.path().join("imiona.json"),
        r#"{"Jan": "M", "Anna": "K"}"#,
    )
    .unwrap();
    let card = "\
,,,,,,\n\
Kowalscy,,Lipowa 7,,,,\n\
,,,,,,\n\
,,,,,,\n\
,,,,,,\n\
,,,,,,\n\
,,,,,,\n\
,,,,,,\n\
,Jan Kowalski,10.03.1960,ślub 15.06.1995,,,\n\
,Anna Kowalska,22.07.1965,,,,\n";
    fs::write(dir.path().join("karty").join("rodzina.csv"), card).unwrap();
    dir
}

fn request(dir: &TempDir, output_dir: Option<std::path::PathBuf>) -> AnalyzeRequest {
    AnalyzeRequest {
        folder: dir.path().join("karty"),
        names: dir.path().join("imiona.json"),
        options: AnalysisOptions::default(),
        output_dir,
        reference_date: reference_date(),
    }
}

#[test]
fn analyze_writes_every_report_file() {
    let dir = seed_folder();
    let output_dir = dir.path().join("wyniki");
    let outcome = run_analysis(&request(&dir, Some(output_dir.clone()))).unwrap();

    assert_eq!(outcome.run.people.len(), 2);
    assert_eq!(outcome.run.jubilees.len(), 1);
    assert_eq!(outcome.run.jubilees[0].years, 30);
    assert_eq!(outcome.run.marriages.len(), 1);
    assert_eq!(outcome.run.summary.errors_count, 0);

    assert_eq!(outcome.written.len(), 6);
    for path in &outcome.written {
        assert!(path.exists(), "missing report file {}", path.display());
    }
    let statistics = fs::read_to_string(output_dir.join("statystyki.txt")).unwrap();
    assert!(statistics.contains("STATYSTYKI ANALIZY"));
    assert!(statistics.contains("Nadchodzace jubileusze:          1"));

    let people = fs::read_to_string(output_dir.join("osoby.csv")).unwrap();
    assert!(people.contains("Jan"));
    assert!(people.contains("Kowalski"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = seed_folder();
    let outcome = run_analysis(&request(&dir, None)).unwrap();

    assert_eq!(outcome.run.people.len(), 2);
    assert!(outcome.written.is_empty());
    assert!(!dir.path().join("karty").join("wyniki").exists());
}

#[test]
fn empty_name_dictionary_fails_the_run() {
    let dir = seed_folder();
    fs::write(dir.path().join("imiona.json"), "{}").unwrap();
    assert!(run_analysis(&request(&dir, None)).is_err());
}
