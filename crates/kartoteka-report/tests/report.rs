//! CSV export shape checks.

use std::collections::BTreeMap;

use kartoteka_model::{CoupleKind, Gender, Jubilee, MarriageRecord, PersonRecord};
use kartoteka_report::csv::{write_jubilees, write_marriages, write_people, write_unknown_names};

fn person(name: &str) -> PersonRecord {
    PersonRecord {
        given_name: name.to_string(),
        given_name_key: name.to_lowercase(),
        surname: "Kowalski".to_string(),
        address: "Lipowa 7".to_string(),
        old_address: String::new(),
        age: 40,
        median_assigned: false,
        gender: Gender::Male,
        sheet: "rodzina".to_string(),
        file: "karty/rodzina.csv".to_string(),
    }
}

fn jubilee(days_until: i64) -> Jubilee {
    Jubilee {
        years: 30,
        date: "2025-06-15".to_string(),
        days_until,
        surname: "Kowalski".to_string(),
        husband: "Jan".to_string(),
        wife: "Anna".to_string(),
        old_address: String::new(),
        kind: CoupleKind::Spouses,
    }
}

fn marriage(year: i32) -> MarriageRecord {
    MarriageRecord {
        surname: "Kowalski".to_string(),
        husband: "Jan".to_string(),
        wife: "Anna".to_string(),
        date: format!("{year}-06-15"),
        year,
        address: "Lipowa 7".to_string(),
        old_address: String::new(),
        kind: CoupleKind::Grandparents,
        file: "karty/rodzina.csv".to_string(),
    }
}

fn rows(buffer: &[u8]) -> Vec<Vec<String>> {
    csv::Reader::from_reader(buffer)
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn people_rows_carry_formatted_names_and_gender_labels() {
    let mut buffer = Vec::new();
    write_people(&mut buffer, &[person("jan")]).unwrap();

    let rows = rows(&buffer);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Jan");
    assert_eq!(rows[0][5], "Mężczyzna");
}

#[test]
fn jubilees_are_sorted_soonest_first() {
    let mut buffer = Vec::new();
    write_jubilees(&mut buffer, &[jubilee(20), jubilee(3)]).unwrap();

    let rows = rows(&buffer);
    assert_eq!(rows[0][7], "3");
    assert_eq!(rows[1][7], "20");
    assert_eq!(rows[0][6], "MAŁŻONKOWIE");
}

#[test]
fn marriages_are_sorted_oldest_first_with_category_tag() {
    let mut buffer = Vec::new();
    write_marriages(&mut buffer, &[marriage(2001), marriage(1955)]).unwrap();

    let rows = rows(&buffer);
    assert_eq!(rows[0][0], "1955");
    assert_eq!(rows[1][0], "2001");
    assert_eq!(rows[0][7], "DZIADKOWIE");
}

#[test]
fn unknown_names_expand_one_row_per_location() {
    let mut unknown: BTreeMap<String, Vec<String>> = BTreeMap::new();
    unknown.insert(
        "zygfryd".to_string(),
        vec!["a.csv -> rodzina".to_string(), "b.csv -> rodzina".to_string()],
    );

    let mut buffer = Vec::new();
    write_unknown_names(&mut buffer, &unknown).unwrap();

    let rows = rows(&buffer);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "zygfryd");
    assert_eq!(rows[0][2], "2");
    assert_eq!(rows[1][1], "b.csv -> rodzina");
}
