//! Running statistics for one analysis run.
//!
//! A `Statistics` value is owned by the analysis pipeline for the whole
//! run and mutated strictly sequentially; counters only grow between
//! [`Statistics::reset`] calls. The insertion-ordered age list serves
//! double duty: it feeds the per-record sentinel median substitution
//! while the run is in flight, and the final summary statistics at the
//! end. That order dependence is intentional and load-bearing.

use kartoteka_model::{Gender, PersonRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::text::capitalize_first;

/// Age-group histogram labels, in bucket order.
pub const AGE_GROUP_LABELS: [&str; 6] = ["0-17", "18-30", "31-50", "51-70", "71-90", "90+"];

/// Bucket index for an age; buckets are 0-17, 18-30, 31-50, 51-70,
/// 71-90, 90+.
pub fn age_group_index(age: i64) -> usize {
    match age {
        _ if age < 18 => 0,
        _ if age < 31 => 1,
        _ if age < 51 => 2,
        _ if age < 71 => 3,
        _ if age < 91 => 4,
        _ => 5,
    }
}

/// Floor-to-decade for year histograms.
pub fn decade_of(year: i32) -> i32 {
    (year / 10) * 10
}

/// Family-size split keyed by shared current address.
///
/// Buckets are exactly {1, 2, 3-4, 5+} people per distinct address;
/// each distinct address increments exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySplit {
    pub count_1: u64,
    pub count_2: u64,
    pub count_3_4: u64,
    pub count_5_plus: u64,
    /// Age (min, max) observed across families of each size.
    pub ages_1: Option<(i64, i64)>,
    pub ages_2: Option<(i64, i64)>,
    pub ages_3_4: Option<(i64, i64)>,
    pub ages_5_plus: Option<(i64, i64)>,
}

impl FamilySplit {
    pub fn total(&self) -> u64 {
        self.count_1 + self.count_2 + self.count_3_4 + self.count_5_plus
    }
}

/// Age distribution summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeStats {
    /// Mean, rounded to one decimal. 0 for an empty run.
    pub average: f64,
    /// Median of the final age list. 0 for an empty run.
    pub median: f64,
    pub min: i64,
    pub max: i64,
}

/// Name-frequency entry, for ranking reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: u64,
}

/// Flat snapshot of one finished run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_people: u64,
    pub total_males: u64,
    pub total_females: u64,
    pub files_scanned: u64,
    pub sheets_scanned: u64,
    pub errors_count: u64,
    pub warnings_count: u64,
    pub unknown_names_count: u64,
    pub jubilees_count: u64,
    pub marriages_in_range_count: u64,
    pub unique_addresses: u64,
    /// Counts per bucket, in [`AGE_GROUP_LABELS`] order.
    pub age_groups: Vec<u64>,
    pub birth_decades: BTreeMap<i32, u64>,
    pub marriage_decades: BTreeMap<i32, u64>,
    pub age_stats: AgeStats,
    pub family: FamilySplit,
    /// Name frequencies, most frequent first.
    pub name_counts: Vec<NameCount>,
    pub analysis_duration_secs: f64,
}

/// Incremental statistics aggregator.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    total_people: u64,
    total_males: u64,
    total_females: u64,
    files_scanned: u64,
    sheets_scanned: u64,
    errors_count: u64,
    warnings_count: u64,
    unknown_names_count: u64,
    jubilees_count: u64,
    marriages_in_range_count: u64,
    addresses: HashSet<String>,
    age_groups: [u64; 6],
    birth_decades: BTreeMap<i32, u64>,
    marriage_decades: BTreeMap<i32, u64>,
    /// Insertion-ordered; drives both sentinel substitution and the
    /// final summary. Do not sort in place.
    ages: Vec<i64>,
    name_counts: BTreeMap<String, u64>,
    family: FamilySplit,
    started_at: Option<Instant>,
    elapsed: Option<Duration>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every counter. The only operation that lowers them.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resets and stamps the start of a run.
    pub fn start(&mut self) {
        self.reset();
        self.started_at = Some(Instant::now());
    }

    /// Freezes the run duration.
    pub fn finish(&mut self) {
        if let Some(started) = self.started_at {
            self.elapsed = Some(started.elapsed());
        }
    }

    /// Folds an accepted person into the counters.
    ///
    /// The record's age must already be resolved (sentinel substitution
    /// happens before this call); it joins the running age list here.
    pub fn add_person(&mut self, person: &PersonRecord) {
        self.total_people += 1;
        match person.gender {
            Gender::Male => self.total_males += 1,
            Gender::Female => self.total_females += 1,
        }
        self.ages.push(person.age);
        self.age_groups[age_group_index(person.age)] += 1;
        if !person.address.trim().is_empty() {
            self.addresses.insert(person.address.clone());
        }
        let name_key = capitalize_first(&person.given_name);
        if !name_key.is_empty() {
            *self.name_counts.entry(name_key).or_insert(0) += 1;
        }
    }

    pub fn add_birth_year(&mut self, year: i32) {
        *self.birth_decades.entry(decade_of(year)).or_insert(0) += 1;
    }

    pub fn add_marriage_year(&mut self, year: i32) {
        *self.marriage_decades.entry(decade_of(year)).or_insert(0) += 1;
    }

    pub fn add_file(&mut self) {
        self.files_scanned += 1;
    }

    pub fn add_sheet(&mut self) {
        self.sheets_scanned += 1;
    }

    pub fn add_error(&mut self) {
        self.errors_count += 1;
    }

    pub fn add_warning(&mut self) {
        self.warnings_count += 1;
    }

    pub fn add_unknown_name(&mut self) {
        self.unknown_names_count += 1;
    }

    pub fn add_jubilee(&mut self) {
        self.jubilees_count += 1;
    }

    pub fn add_marriage_in_range(&mut self) {
        self.marriages_in_range_count += 1;
    }

    /// Number of ages recorded so far.
    pub fn ages_recorded(&self) -> usize {
        self.ages.len()
    }

    /// Median of the ages recorded *so far*, rounded to the nearest
    /// integer with ties to even; None before any age is recorded.
    ///
    /// This is the sentinel-substitution median. It deliberately sees
    /// only the run's prefix, so substituted ages feed later medians.
    pub fn running_median(&self) -> Option<i64> {
        if self.ages.is_empty() {
            return None;
        }
        Some(round_half_to_even(median_of(&self.ages)))
    }

    /// Recomputes family-size buckets from the finished person list.
    ///
    /// People sharing a non-empty current address form one family; each
    /// distinct address lands in exactly one size bucket.
    pub fn update_family_stats(&mut self, people: &[PersonRecord]) {
        let mut families: HashMap<&str, Vec<i64>> = HashMap::new();
        for person in people {
            let address = person.address.trim();
            if address.is_empty() {
                continue;
            }
            families.entry(address).or_default().push(person.age);
        }

        self.family = FamilySplit::default();
        for ages in families.values() {
            let min = ages.iter().copied().min().unwrap_or(0);
            let max = ages.iter().copied().max().unwrap_or(0);
            let (count, range) = match ages.len() {
                1 => (&mut self.family.count_1, &mut self.family.ages_1),
                2 => (&mut self.family.count_2, &mut self.family.ages_2),
                3 | 4 => (&mut self.family.count_3_4, &mut self.family.ages_3_4),
                _ => (&mut self.family.count_5_plus, &mut self.family.ages_5_plus),
            };
            *count += 1;
            *range = Some(match *range {
                Some((lo, hi)) => (lo.min(min), hi.max(max)),
                None => (min, max),
            });
        }
    }

    /// Age statistics over the full, final age list.
    pub fn age_stats(&self) -> AgeStats {
        if self.ages.is_empty() {
            return AgeStats::default();
        }
        let count = self.ages.len() as f64;
        let sum: i64 = self.ages.iter().sum();
        AgeStats {
            average: (sum as f64 / count * 10.0).round() / 10.0,
            median: median_of(&self.ages),
            min: self.ages.iter().copied().min().unwrap_or(0),
            max: self.ages.iter().copied().max().unwrap_or(0),
        }
    }

    /// Produces the flat snapshot handed to presentation sinks.
    pub fn summary(&self) -> Summary {
        let mut name_counts: Vec<NameCount> = self
            .name_counts
            .iter()
            .map(|(name, count)| NameCount {
                name: name.clone(),
                count: *count,
            })
            .collect();
        name_counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        Summary {
            total_people: self.total_people,
            total_males: self.total_males,
            total_females: self.total_females,
            files_scanned: self.files_scanned,
            sheets_scanned: self.sheets_scanned,
            errors_count: self.errors_count,
            warnings_count: self.warnings_count,
            unknown_names_count: self.unknown_names_count,
            jubilees_count: self.jubilees_count,
            marriages_in_range_count: self.marriages_in_range_count,
            unique_addresses: self.addresses.len() as u64,
            age_groups: self.age_groups.to_vec(),
            birth_decades: self.birth_decades.clone(),
            marriage_decades: self.marriage_decades.clone(),
            age_stats: self.age_stats(),
            family: self.family,
            name_counts,
            analysis_duration_secs: self.elapsed.map_or(0.0, |d| d.as_secs_f64()),
        }
    }
}

/// Rounds to the nearest integer, breaking `.5` ties toward the even
/// neighbor. The median of integer ages is always a whole or half
/// number, so the tie case is exact.
fn round_half_to_even(value: f64) -> i64 {
    let below = value.floor() as i64;
    let fraction = value - below as f64;
    if fraction > 0.5 {
        below + 1
    } else if fraction < 0.5 || below % 2 == 0 {
        below
    } else {
        below + 1
    }
}

/// Median of an unsorted list. Even counts average the middle pair.
fn median_of(ages: &[i64]) -> f64 {
    let mut sorted = ages.to_vec();
    sorted.sort_unstable();
    let count = sorted.len();
    if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) as f64 / 2.0
    } else {
        sorted[count / 2] as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, age: i64, gender: Gender, address: &str) -> PersonRecord {
        PersonRecord {
            given_name: name.to_string(),
            given_name_key: name.to_lowercase(),
            surname: "Kowalski".to_string(),
            address: address.to_string(),
            old_address: String::new(),
            age,
            median_assigned: false,
            gender,
            sheet: "Arkusz1".to_string(),
            file: "rodzina.csv".to_string(),
        }
    }

    #[test]
    fn age_group_boundaries() {
        assert_eq!(age_group_index(0), 0);
        assert_eq!(age_group_index(17), 0);
        assert_eq!(age_group_index(18), 1);
        assert_eq!(age_group_index(30), 1);
        assert_eq!(age_group_index(31), 2);
        assert_eq!(age_group_index(50), 2);
        assert_eq!(age_group_index(51), 3);
        assert_eq!(age_group_index(70), 3);
        assert_eq!(age_group_index(71), 4);
        assert_eq!(age_group_index(90), 4);
        assert_eq!(age_group_index(91), 5);
    }

    #[test]
    fn running_median_is_prefix_sensitive() {
        let mut stats = Statistics::new();
        assert_eq!(stats.running_median(), None);
        stats.add_person(&person("Jan", 30, Gender::Male, "a"));
        assert_eq!(stats.running_median(), Some(30));
        stats.add_person(&person("Anna", 41, Gender::Female, "a"));
        // (30 + 41) / 2 = 35.5 ties to the even 36.
        assert_eq!(stats.running_median(), Some(36));
        stats.add_person(&person("Piotr", 60, Gender::Male, "b"));
        assert_eq!(stats.running_median(), Some(41));
    }

    #[test]
    fn median_ties_break_toward_even() {
        let mut stats = Statistics::new();
        stats.add_person(&person("Jan", 30, Gender::Male, "a"));
        stats.add_person(&person("Anna", 43, Gender::Female, "a"));
        // (30 + 43) / 2 = 36.5 rounds down to the even 36.
        assert_eq!(stats.running_median(), Some(36));
        stats.add_person(&person("Piotr", 36, Gender::Male, "b"));
        stats.add_person(&person("Maria", 31, Gender::Female, "b"));
        // [30, 31, 36, 43] has median 33.5, rounding up to the even 34.
        assert_eq!(stats.running_median(), Some(34));
    }

    #[test]
    fn empty_run_reports_zero_age_stats() {
        let stats = Statistics::new();
        let age_stats = stats.age_stats();
        assert_eq!(age_stats.median, 0.0);
        assert_eq!(age_stats.average, 0.0);
        assert_eq!(age_stats.min, 0);
        assert_eq!(age_stats.max, 0);
    }

    #[test]
    fn family_buckets_sum_to_distinct_addresses() {
        let mut people = vec![
            person("Jan", 40, Gender::Male, "Polna 1"),
            person("Anna", 38, Gender::Female, "Polna 1"),
            person("Piotr", 70, Gender::Male, "Leśna 2"),
        ];
        for (i, name) in ["Maria", "Ewa", "Adam", "Tomasz", "Zofia"].iter().enumerate() {
            people.push(person(name, 10 + i as i64, Gender::Female, "Długa 3"));
        }
        let mut stats = Statistics::new();
        stats.update_family_stats(&people);
        let family = stats.summary().family;
        assert_eq!(family.count_1, 1);
        assert_eq!(family.count_2, 1);
        assert_eq!(family.count_3_4, 0);
        assert_eq!(family.count_5_plus, 1);
        assert_eq!(family.total(), 3);
        assert_eq!(family.ages_2, Some((38, 40)));
        assert_eq!(family.ages_5_plus, Some((10, 14)));
    }

    #[test]
    fn age_groups_sum_to_total_people() {
        let mut stats = Statistics::new();
        for (age, gender) in [(5, Gender::Male), (25, Gender::Female), (95, Gender::Female)] {
            stats.add_person(&person("Jan", age, gender, ""));
        }
        let summary = stats.summary();
        assert_eq!(summary.age_groups.iter().sum::<u64>(), summary.total_people);
        assert_eq!(summary.total_males, 1);
        assert_eq!(summary.total_females, 2);
        // Blank addresses never count as a family address.
        assert_eq!(summary.unique_addresses, 0);
    }

    #[test]
    fn decade_histograms_floor_years() {
        let mut stats = Statistics::new();
        stats.add_birth_year(1957);
        stats.add_birth_year(1950);
        stats.add_marriage_year(1999);
        let summary = stats.summary();
        assert_eq!(summary.birth_decades.get(&1950), Some(&2));
        assert_eq!(summary.marriage_decades.get(&1990), Some(&1));
    }

    #[test]
    fn name_counts_rank_by_frequency() {
        let mut stats = Statistics::new();
        for name in ["jan", "JAN", "anna"] {
            stats.add_person(&person(name, 40, Gender::Male, ""));
        }
        let summary = stats.summary();
        assert_eq!(summary.name_counts[0].name, "Jan");
        assert_eq!(summary.name_counts[0].count, 2);
        assert_eq!(summary.name_counts[1].name, "Anna");
    }

    #[test]
    fn reset_is_the_only_lowering_operation() {
        let mut stats = Statistics::new();
        stats.add_file();
        stats.add_sheet();
        stats.add_error();
        stats.add_warning();
        let before = stats.summary();
        assert_eq!(before.files_scanned, 1);
        stats.reset();
        let after = stats.summary();
        assert_eq!(after.files_scanned, 0);
        assert_eq!(after.errors_count, 0);
    }
}
