//! The human-readable statistics block, in the parish office's Polish.
//!
//! Layout is fixed-width text with simple block-character bars, written
//! for printing and for pasting into the parish bulletin. Section order
//! and labels are part of the office's routine; do not reorder.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate};
use kartoteka_core::stats::{AGE_GROUP_LABELS, Summary};

const RULE_WIDTH: usize = 78;
const BAR_WIDTH: usize = 30;
const NAME_BAR_WIDTH: usize = 25;
const TOP_NAMES: usize = 20;

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

fn average(total: u64, count: u64) -> String {
    if count == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", total as f64 / count as f64)
}

fn bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage / 100.0) * width as f64) as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

fn age_range(range: Option<(i64, i64)>) -> String {
    match range {
        Some((min, max)) => format!("{min}-{max}"),
        None => "-".to_string(),
    }
}

/// Renders the full statistics block.
///
/// `today` anchors the days-to-year-end footer; pass the run's
/// reference date so the block is reproducible.
pub fn format_statistics(summary: &Summary, today: NaiveDate) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "                    STATYSTYKI ANALIZY                      ");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);

    let _ = writeln!(out, "LUDZIE:");
    let _ = writeln!(out, "  Wszystkie osoby:   {:>5}", summary.total_people);
    let _ = writeln!(
        out,
        "  Kobiety:           {:>5} ({:>5.1}%)",
        summary.total_females,
        percentage(summary.total_females, summary.total_people)
    );
    let _ = writeln!(
        out,
        "  Mezczyzni:         {:>5} ({:>5.1}%)",
        summary.total_males,
        percentage(summary.total_males, summary.total_people)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "PLIKI I ARKUSZE:");
    let _ = writeln!(out, "  Przeskanowane pliki:         {:>5}", summary.files_scanned);
    let _ = writeln!(out, "  Przeskanowane arkusze:       {:>5}", summary.sheets_scanned);
    let _ = writeln!(
        out,
        "  Srednio arkuszy na plik:     {:>5}",
        average(summary.sheets_scanned, summary.files_scanned)
    );
    let _ = writeln!(out);

    let family = &summary.family;
    let _ = writeln!(out, "PODZIAŁ RODZIN:");
    let _ = writeln!(
        out,
        "  Rodziny 1-osobowe:   {:02} (wiek: {})",
        family.count_1,
        age_range(family.ages_1)
    );
    let _ = writeln!(
        out,
        "  Rodziny 2-osobowe:   {:02} (wiek: {})",
        family.count_2,
        age_range(family.ages_2)
    );
    let _ = writeln!(
        out,
        "  Rodziny 3-4-osobowe: {:02} (wiek: {})",
        family.count_3_4,
        age_range(family.ages_3_4)
    );
    let _ = writeln!(
        out,
        "  Rodziny 5+-osobowe:  {:02} (wiek: {})",
        family.count_5_plus,
        age_range(family.ages_5_plus)
    );
    let _ = writeln!(out);

    if !summary.birth_decades.is_empty() {
        let _ = writeln!(out, "URODZINY W DEKADACH (od najstarszych):");
        for (decade, count) in &summary.birth_decades {
            let percent = percentage(*count, summary.total_people);
            let _ = writeln!(
                out,
                "  {decade}s: {count:>4} osob  {} {percent:>5.1}%",
                bar(percent, BAR_WIDTH)
            );
        }
        let _ = writeln!(out);
    }

    if !summary.marriage_decades.is_empty() {
        let total_marriages: u64 = summary.marriage_decades.values().sum();
        let _ = writeln!(out, "SLUBY W DEKADACH (od najstarszych):");
        for (decade, count) in &summary.marriage_decades {
            let percent = percentage(*count, total_marriages);
            let _ = writeln!(
                out,
                "  {decade}s: {count:>4} slubow {} {percent:>5.1}%",
                bar(percent, BAR_WIDTH)
            );
        }
        let _ = writeln!(out);
    }

    let age = &summary.age_stats;
    let _ = writeln!(out, "ROZKLAD WIEKU:");
    let _ = writeln!(out, "  Srednia wieku:              {:>5.1} lat", age.average);
    let _ = writeln!(out, "  Mediana wieku:              {:>5.1} lat", age.median);
    let _ = writeln!(out, "  Najmlodszy:                 {:>5} lat", age.min);
    let _ = writeln!(out, "  Najstarszy:                 {:>5} lat", age.max);
    let _ = writeln!(out, "  Grupy wiekowe:");
    for (label, count) in AGE_GROUP_LABELS.iter().zip(&summary.age_groups) {
        let percent = percentage(*count, summary.total_people);
        let _ = writeln!(
            out,
            "    {label:>6} lat: {count:>4} osob  {} {percent:>5.1}%",
            bar(percent, BAR_WIDTH)
        );
    }
    let _ = writeln!(out);

    if !summary.name_counts.is_empty() {
        let _ = writeln!(out, "TOP {TOP_NAMES} IMION:");
        let top = &summary.name_counts[..summary.name_counts.len().min(TOP_NAMES)];
        let max_count = top.first().map_or(1, |entry| entry.count.max(1));
        for (index, entry) in top.iter().enumerate() {
            let percent = percentage(entry.count, summary.total_people);
            let filled = ((entry.count as f64 / max_count as f64) * NAME_BAR_WIDTH as f64) as usize;
            let filled = filled.min(NAME_BAR_WIDTH);
            let _ = writeln!(
                out,
                "  {:2}. {:<15} {:>4} [{}{}] {percent:>5.1}%",
                index + 1,
                entry.name,
                entry.count,
                "█".repeat(filled),
                "░".repeat(NAME_BAR_WIDTH - filled)
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "ADRESY:");
    let _ = writeln!(out, "  Unikalne adresy:             {:>5}", summary.unique_addresses);
    let _ = writeln!(
        out,
        "  Srednio osob na adres:       {:>5}",
        average(summary.total_people, summary.unique_addresses)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "JUBILEUSZE I SLUBY:");
    let _ = writeln!(out, "  Nadchodzace jubileusze:      {:>5}", summary.jubilees_count);
    let _ = writeln!(
        out,
        "  Sluby w zakresie lat:        {:>5}",
        summary.marriages_in_range_count
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "PROBLEMY:");
    let _ = writeln!(out, "  Bledy:                       {:>5}", summary.errors_count);
    let _ = writeln!(out, "  Ostrzezenia:                 {:>5}", summary.warnings_count);
    let _ = writeln!(out, "  Nieznane imiona:             {:>5}", summary.unknown_names_count);
    let _ = writeln!(out);

    let _ = writeln!(out, "CZAS ANALIZY:");
    let _ = writeln!(
        out,
        "  Czas trwania:           {:>8.2} sekund",
        summary.analysis_duration_secs
    );
    if summary.files_scanned > 0 {
        let _ = writeln!(
            out,
            "  Sredni czas na plik:    {:>8.2} s",
            summary.analysis_duration_secs / summary.files_scanned as f64
        );
    }

    let end_of_year = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
    let days_left = (end_of_year - today).num_days();
    let _ = writeln!(out);
    let _ = writeln!(out, "DNI DO KOŃCA ROKU: {days_left:03}");

    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(2, 2), 100.0);
    }

    #[test]
    fn bar_is_always_the_requested_width() {
        for percent in [0.0, 33.3, 100.0] {
            let rendered = bar(percent, 30);
            assert_eq!(rendered.chars().count(), 32);
        }
    }

    #[test]
    fn empty_summary_still_renders_every_section() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let summary = Summary {
            age_groups: vec![0; AGE_GROUP_LABELS.len()],
            ..Summary::default()
        };
        let text = format_statistics(&summary, today);
        for section in [
            "LUDZIE:",
            "PLIKI I ARKUSZE:",
            "PODZIAŁ RODZIN:",
            "ROZKLAD WIEKU:",
            "ADRESY:",
            "JUBILEUSZE I SLUBY:",
            "PROBLEMY:",
            "CZAS ANALIZY:",
        ] {
            assert!(text.contains(section), "missing section {section}");
        }
        // 204 days from 2025-06-10 to year end.
        assert!(text.contains("DNI DO KOŃCA ROKU: 204"));
        // Empty decade histograms are omitted entirely.
        assert!(!text.contains("URODZINY W DEKADACH"));
    }
}
