//! Name dictionary loading.
//!
//! The dictionary is a JSON object of given name to gender code (`M` or
//! `K`). Loading fails closed: a missing, unreadable, or malformed file
//! yields an empty dictionary, which the pipeline then rejects up front
//! instead of silently reporting every name as unknown.

use std::collections::BTreeMap;
use std::path::Path;

use kartoteka_core::text::strip_diacritics;
use kartoteka_model::{Gender, NameDictionary};
use tracing::warn;

pub fn load_name_dictionary(path: &Path) -> NameDictionary {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(file = %path.display(), %error, "cannot read name dictionary");
            return NameDictionary::new();
        }
    };

    let parsed: BTreeMap<String, String> = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!(file = %path.display(), %error, "name dictionary is not a JSON name-to-gender object");
            return NameDictionary::new();
        }
    };

    let mut entries = Vec::with_capacity(parsed.len());
    for (name, gender) in &parsed {
        let Ok(gender) = gender.parse::<Gender>() else {
            warn!(file = %path.display(), name, gender, "invalid gender code in name dictionary");
            return NameDictionary::new();
        };
        entries.push((strip_diacritics(name.trim()), gender));
    }

    let dictionary = NameDictionary::from_entries(entries);
    if dictionary.is_empty() {
        warn!(file = %path.display(), "name dictionary is empty");
    }
    dictionary
}
