//! Text normalization for names and free-text cells.
//!
//! Record sheets are hand-typed Polish; lookups against the name
//! dictionary must survive diacritics, casing, and stray whitespace.
//! Display formatting is a separate concern and never feeds lookups.

use kartoteka_model::CellValue;
use regex::Regex;
use std::sync::LazyLock;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w-]+\b").expect("word pattern"));

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("number pattern"));

/// Folds Polish diacritics to their ASCII base letters and lower-cases.
///
/// This is the canonical lookup key for given names; both the dictionary
/// loader and the extractor must use the same fold.
pub fn strip_diacritics(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            'ą' | 'Ą' => 'a',
            'ć' | 'Ć' => 'c',
            'ę' | 'Ę' => 'e',
            'ł' | 'Ł' => 'l',
            'ń' | 'Ń' => 'n',
            'ó' | 'Ó' => 'o',
            'ś' | 'Ś' => 's',
            'ź' | 'Ź' | 'ż' | 'Ż' => 'z',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Formats a name for display: each space- or hyphen-delimited segment
/// is capitalized independently, delimiters preserved.
///
/// Display only; never use the result as a dictionary key.
pub fn format_person_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut result = String::with_capacity(lowered.len());
    let mut at_segment_start = true;
    for ch in lowered.chars() {
        if ch == '-' || ch == ' ' {
            result.push(ch);
            at_segment_start = true;
        } else if at_segment_start {
            result.extend(ch.to_uppercase());
            at_segment_start = false;
        } else {
            result.push(ch);
        }
    }
    result
}

/// Tokenizes a cell into lower-cased words.
///
/// Text cells split on word boundaries, dropping purely numeric tokens.
/// Numeric cells yield nothing; date cells are re-tokenized through
/// their ISO text rendering.
pub fn extract_words(cell: &CellValue) -> Vec<String> {
    match cell {
        CellValue::Text(text) => tokenize(text),
        CellValue::Date(date) => tokenize(&date.to_string()),
        CellValue::Number(_) | CellValue::Empty => Vec::new(),
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|token| token.as_str().to_string())
        .filter(|token| !token.is_empty() && !token.chars().all(char::is_numeric))
        .collect()
}

/// First run of digits in the text, or None.
pub fn extract_number_from_text(text: &str) -> Option<i64> {
    NUMBER_RE.find(text)?.as_str().parse().ok()
}

/// Capitalizes the first letter and lower-cases the rest; used as the
/// name-frequency counter key.
pub fn capitalize_first(text: &str) -> String {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => {
            let mut result: String = first.to_uppercase().collect();
            result.push_str(&chars.as_str().to_lowercase());
            result
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_diacritics_folds_polish_letters() {
        assert_eq!(strip_diacritics("Józef"), "jozef");
        assert_eq!(strip_diacritics("ŚWIĘTOSŁAWA"), "swietoslawa");
        assert_eq!(strip_diacritics("żółć"), "zolc");
    }

    #[test]
    fn format_person_name_capitalizes_segments() {
        assert_eq!(format_person_name("  anna maria "), "Anna Maria");
        assert_eq!(format_person_name("kowalska-nowak"), "Kowalska-Nowak");
        assert_eq!(format_person_name("JAN"), "Jan");
    }

    #[test]
    fn extract_words_drops_numeric_tokens() {
        let cell = CellValue::Text("Jan Kowalski 1950".to_string());
        assert_eq!(extract_words(&cell), vec!["jan", "kowalski"]);
    }

    #[test]
    fn extract_words_ignores_numbers_and_blanks() {
        assert!(extract_words(&CellValue::Number(42.0)).is_empty());
        assert!(extract_words(&CellValue::Empty).is_empty());
    }

    #[test]
    fn extract_number_finds_first_digit_run() {
        assert_eq!(extract_number_from_text("ul. Polna 12/3"), Some(12));
        assert_eq!(extract_number_from_text("brak"), None);
    }
}
