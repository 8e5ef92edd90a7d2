//! Property tests for the hand-typed date grammar.

use chrono::{Datelike, NaiveDate};
use kartoteka_core::dates::{DateValidation, normalize_date_text, validate_date_components};
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

proptest! {
    #[test]
    fn valid_triples_normalize_to_the_same_calendar_day(
        day in 1u32..=28,
        month in 1u32..=12,
        year in 1900i32..=2020,
        sep in prop::sample::select(vec!['.', '/', '-']),
    ) {
        let text = format!("{day}{sep}{month}{sep}{year}");
        let normalized = normalize_date_text(&text, today()).unwrap();
        let parsed: NaiveDate = normalized.parse().unwrap();
        prop_assert_eq!((parsed.day(), parsed.month(), parsed.year()), (day, month, year));
    }

    #[test]
    fn out_of_range_months_never_validate(
        day in 1u32..=28,
        month in 13u32..=98,
        year in 1900i32..=2020,
    ) {
        let validation = validate_date_components(day, month, year, today());
        prop_assert!(matches!(validation, DateValidation::Invalid(_)));
    }

    #[test]
    fn years_outside_the_window_never_validate(
        day in 1u32..=28,
        month in 1u32..=12,
        year in prop::sample::select(vec![1702i32, 1799, 2027, 3000]),
    ) {
        let validation = validate_date_components(day, month, year, today());
        prop_assert!(matches!(validation, DateValidation::Invalid(_)));
    }
}
