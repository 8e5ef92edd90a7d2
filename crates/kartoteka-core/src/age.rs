//! Age computation from birth dates.

use chrono::{Datelike, NaiveDate};

/// Whole-year age at `today`, adjusted for whether the birthday has
/// occurred yet this year.
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year() - birth.year());
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn age_before_and_after_birthday() {
        let birth = d(1950, 6, 15);
        assert_eq!(calculate_age(birth, d(2025, 6, 14)), 74);
        assert_eq!(calculate_age(birth, d(2025, 6, 15)), 75);
        assert_eq!(calculate_age(birth, d(2025, 6, 16)), 75);
    }

    #[test]
    fn age_on_new_years_boundary() {
        let birth = d(2000, 12, 31);
        assert_eq!(calculate_age(birth, d(2025, 1, 1)), 24);
        assert_eq!(calculate_age(birth, d(2025, 12, 31)), 25);
    }
}
