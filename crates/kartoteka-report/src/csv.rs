//! CSV exports of the run results.
//!
//! One file per result kind, with the Polish headers the parish office
//! expects. Writers take any `io::Write` so tests can capture buffers;
//! the `*_to_path` wrappers are what the CLI uses.

use std::io;
use std::path::Path;

use kartoteka_core::format_person_name;
use kartoteka_model::{Gender, Jubilee, MarriageRecord, PersonRecord};

use crate::error::Result;

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Mężczyzna",
        Gender::Female => "Kobieta",
    }
}

/// Writes the accepted-person listing.
pub fn write_people<W: io::Write>(writer: W, people: &[PersonRecord]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record([
        "Imię",
        "Nazwisko",
        "Adres aktualny",
        "Adres stary",
        "Wiek",
        "Płeć",
        "Arkusz",
        "Plik",
    ])?;
    for person in people {
        out.write_record([
            format_person_name(&person.given_name).as_str(),
            person.surname.as_str(),
            person.address.as_str(),
            person.old_address.as_str(),
            person.age.to_string().as_str(),
            gender_label(person.gender),
            person.sheet.as_str(),
            person.file.as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Writes upcoming jubilees, soonest first.
pub fn write_jubilees<W: io::Write>(writer: W, jubilees: &[Jubilee]) -> Result<()> {
    let mut sorted: Vec<&Jubilee> = jubilees.iter().collect();
    sorted.sort_by_key(|jubilee| jubilee.days_until);

    let mut out = csv::Writer::from_writer(writer);
    out.write_record([
        "Data jubileuszu",
        "Lata małżeństwa",
        "Mąż",
        "Żona",
        "Nazwisko",
        "Stary adres",
        "Typ",
        "Dni do jubileuszu",
    ])?;
    for jubilee in sorted {
        out.write_record([
            jubilee.date.as_str(),
            jubilee.years.to_string().as_str(),
            jubilee.husband.as_str(),
            jubilee.wife.as_str(),
            jubilee.surname.as_str(),
            jubilee.old_address.as_str(),
            jubilee.kind.label(),
            jubilee.days_until.to_string().as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Writes in-range marriages, oldest first.
pub fn write_marriages<W: io::Write>(writer: W, marriages: &[MarriageRecord]) -> Result<()> {
    let mut sorted: Vec<&MarriageRecord> = marriages.iter().collect();
    sorted.sort_by_key(|marriage| marriage.year);

    let mut out = csv::Writer::from_writer(writer);
    out.write_record([
        "Rok",
        "Data ślubu",
        "Mąż",
        "Żona",
        "Nazwisko",
        "Adres",
        "Stary adres",
        "Typ",
        "Plik źródłowy",
    ])?;
    for marriage in sorted {
        out.write_record([
            marriage.year.to_string().as_str(),
            marriage.date.as_str(),
            marriage.husband.as_str(),
            marriage.wife.as_str(),
            marriage.surname.as_str(),
            marriage.address.as_str(),
            marriage.old_address.as_str(),
            marriage.kind.label(),
            marriage.file.as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Writes unknown given names, one row per location.
pub fn write_unknown_names<'a, W, I>(writer: W, unknown: I) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = (&'a String, &'a Vec<String>)>,
{
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Nieznane imię", "Lokalizacja", "Liczba wystąpień"])?;
    for (name, locations) in unknown {
        for location in locations {
            out.write_record([
                name.as_str(),
                location.as_str(),
                locations.len().to_string().as_str(),
            ])?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Writes the flat summary as category/value pairs.
pub fn write_summary<W: io::Write>(writer: W, summary: &kartoteka_core::Summary) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Kategoria", "Wartość"])?;
    let rows: [(&str, String); 13] = [
        ("Wszystkie osoby", summary.total_people.to_string()),
        ("Kobiety", summary.total_females.to_string()),
        ("Mężczyźni", summary.total_males.to_string()),
        ("Przeskanowane pliki", summary.files_scanned.to_string()),
        ("Przeskanowane arkusze", summary.sheets_scanned.to_string()),
        ("Unikalne adresy", summary.unique_addresses.to_string()),
        ("Błędy", summary.errors_count.to_string()),
        ("Ostrzeżenia", summary.warnings_count.to_string()),
        ("Nieznane imiona", summary.unknown_names_count.to_string()),
        ("Jubileusze", summary.jubilees_count.to_string()),
        (
            "Śluby w zakresie",
            summary.marriages_in_range_count.to_string(),
        ),
        (
            "Mediana wieku",
            format!("{:.1}", summary.age_stats.median),
        ),
        (
            "Czas analizy (s)",
            format!("{:.2}", summary.analysis_duration_secs),
        ),
    ];
    for (category, value) in rows {
        out.write_record([category, value.as_str()])?;
    }
    out.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<std::fs::File> {
    Ok(std::fs::File::create(path)?)
}

pub fn write_people_to_path(path: &Path, people: &[PersonRecord]) -> Result<()> {
    write_people(create(path)?, people)
}

pub fn write_jubilees_to_path(path: &Path, jubilees: &[Jubilee]) -> Result<()> {
    write_jubilees(create(path)?, jubilees)
}

pub fn write_marriages_to_path(path: &Path, marriages: &[MarriageRecord]) -> Result<()> {
    write_marriages(create(path)?, marriages)
}

pub fn write_unknown_names_to_path<'a, I>(path: &Path, unknown: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a String, &'a Vec<String>)>,
{
    write_unknown_names(create(path)?, unknown)
}

pub fn write_summary_to_path(path: &Path, summary: &kartoteka_core::Summary) -> Result<()> {
    write_summary(create(path)?, summary)
}
