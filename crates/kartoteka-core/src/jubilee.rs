//! Wedding-anniversary jubilee detection.

use chrono::{Datelike, NaiveDate};
use kartoteka_model::{AnalysisOptions, CoupleKind, Jubilee};

/// Elapsed-year counts that qualify as jubilees. Fixed by parish
/// convention; no other count qualifies regardless of proximity.
pub const MILESTONE_YEARS: [i32; 8] = [10, 20, 25, 30, 40, 50, 60, 70];

/// This year's occurrence of an anniversary date.
///
/// Feb 29 anniversaries are remapped to Feb 28 in non-leap years rather
/// than erroring.
pub fn anniversary_in_year(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
}

/// Detects an upcoming jubilee for one couple.
///
/// Fails closed (empty) on an unparsable marriage date or a marriage
/// year outside the configured range. Emits at most one jubilee, and
/// only forward-looking ones: anniversaries already past this year are
/// never reported.
pub fn upcoming_jubilees(
    marriage_date_iso: &str,
    surname: &str,
    husband: &str,
    wife: &str,
    old_address: &str,
    kind: CoupleKind,
    options: &AnalysisOptions,
    today: NaiveDate,
) -> Vec<Jubilee> {
    let Ok(marriage_date) = marriage_date_iso.parse::<NaiveDate>() else {
        return Vec::new();
    };
    if !options.marriage_year_in_range(marriage_date.year()) {
        return Vec::new();
    }
    let Some(anniversary) = anniversary_in_year(marriage_date, today.year()) else {
        return Vec::new();
    };

    let years = today.year() - marriage_date.year();
    let days_until = (anniversary - today).num_days();

    if MILESTONE_YEARS.contains(&years) && (0..=options.jubilee_window_days).contains(&days_until) {
        vec![Jubilee {
            years,
            date: anniversary.to_string(),
            days_until,
            surname: surname.to_string(),
            husband: husband.to_string(),
            wife: wife.to_string(),
            old_address: old_address.to_string(),
            kind,
        }]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn options() -> AnalysisOptions {
        AnalysisOptions::default()
    }

    #[test]
    fn feb_29_remaps_to_28_in_non_leap_years() {
        assert_eq!(
            anniversary_in_year(d(2000, 2, 29), 2025),
            Some(d(2025, 2, 28))
        );
        assert_eq!(
            anniversary_in_year(d(2000, 2, 29), 2024),
            Some(d(2024, 2, 29))
        );
    }

    #[test]
    fn milestone_within_window_emits_one_jubilee() {
        let found = upcoming_jubilees(
            "1995-06-15",
            "Kowalski",
            "Jan Kowalski",
            "Anna Kowalska",
            "",
            CoupleKind::Spouses,
            &options(),
            d(2025, 6, 10),
        );
        assert_eq!(found.len(), 1);
        let jubilee = &found[0];
        assert_eq!(jubilee.years, 30);
        assert_eq!(jubilee.date, "2025-06-15");
        assert_eq!(jubilee.days_until, 5);
        assert_eq!(jubilee.kind, CoupleKind::Spouses);
    }

    #[test]
    fn non_milestone_years_never_qualify() {
        for year in [2010, 1980] {
            let found = upcoming_jubilees(
                &format!("{year}-06-15"),
                "Kowalski",
                "Jan",
                "Anna",
                "",
                CoupleKind::Spouses,
                &options(),
                d(2025, 6, 10),
            );
            assert!(found.is_empty(), "elapsed {} should not qualify", 2025 - year);
        }
    }

    #[test]
    fn past_anniversaries_are_not_reported() {
        // 30 years elapsed but the anniversary was yesterday.
        let found = upcoming_jubilees(
            "1995-06-09",
            "Kowalski",
            "Jan",
            "Anna",
            "",
            CoupleKind::Spouses,
            &options(),
            d(2025, 6, 10),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn window_bound_is_inclusive() {
        let found = upcoming_jubilees(
            "1995-07-10",
            "Kowalski",
            "Jan",
            "Anna",
            "",
            CoupleKind::Spouses,
            &AnalysisOptions::default().with_jubilee_window(30),
            d(2025, 6, 10),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].days_until, 30);
    }

    #[test]
    fn out_of_range_marriage_year_fails_closed() {
        let narrowed = AnalysisOptions::default().with_marriage_years(2000, 2100);
        let found = upcoming_jubilees(
            "1995-06-15",
            "Kowalski",
            "Jan",
            "Anna",
            "",
            CoupleKind::Spouses,
            &narrowed,
            d(2025, 6, 10),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn unparsable_date_fails_closed() {
        let found = upcoming_jubilees(
            "15.06.1995",
            "Kowalski",
            "Jan",
            "Anna",
            "",
            CoupleKind::Spouses,
            &options(),
            d(2025, 6, 10),
        );
        assert!(found.is_empty());
    }
}
