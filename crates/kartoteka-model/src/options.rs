//! Configuration supplied by the caller for one analysis run.

use serde::{Deserialize, Serialize};

/// Options controlling extraction filters and jubilee detection.
///
/// The engine never loads configuration itself; callers build this and
/// pass it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Inclusive lower bound of the accepted age range.
    pub age_from: i64,
    /// Inclusive upper bound of the accepted age range.
    pub age_to: i64,
    /// Jubilee lookahead window, in days.
    pub jubilee_window_days: i64,
    /// Inclusive lower bound of accepted marriage years.
    pub marriage_year_from: i32,
    /// Inclusive upper bound of accepted marriage years.
    pub marriage_year_to: i32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            age_from: 0,
            age_to: 120,
            jubilee_window_days: 30,
            marriage_year_from: 1900,
            marriage_year_to: 2100,
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age_range(mut self, from: i64, to: i64) -> Self {
        self.age_from = from;
        self.age_to = to;
        self
    }

    pub fn with_jubilee_window(mut self, days: i64) -> Self {
        self.jubilee_window_days = days;
        self
    }

    pub fn with_marriage_years(mut self, from: i32, to: i32) -> Self {
        self.marriage_year_from = from;
        self.marriage_year_to = to;
        self
    }

    /// True when `age` passes the inclusive range filter.
    pub fn age_in_range(&self, age: i64) -> bool {
        (self.age_from..=self.age_to).contains(&age)
    }

    /// True when `year` passes the inclusive marriage-year filter.
    pub fn marriage_year_in_range(&self, year: i32) -> bool {
        (self.marriage_year_from..=self.marriage_year_to).contains(&year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = AnalysisOptions::default();
        assert_eq!(options.age_from, 0);
        assert_eq!(options.age_to, 120);
        assert_eq!(options.jubilee_window_days, 30);
        assert_eq!(options.marriage_year_from, 1900);
        assert_eq!(options.marriage_year_to, 2100);
    }

    #[test]
    fn range_filters_are_inclusive() {
        let options = AnalysisOptions::new()
            .with_age_range(18, 65)
            .with_marriage_years(1950, 2000);
        assert!(options.age_in_range(18));
        assert!(options.age_in_range(65));
        assert!(!options.age_in_range(66));
        assert!(options.marriage_year_in_range(1950));
        assert!(!options.marriage_year_in_range(1949));
    }
}
