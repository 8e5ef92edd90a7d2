//! Record-file discovery.

use std::path::Path;

use kartoteka_core::pipeline::SourceFile;
use kartoteka_core::text::strip_diacritics;

use crate::error::{IngestError, Result};

/// Editor lock-file prefix; such files are never record files.
const LOCK_PREFIX: &str = "~$";

/// The template file stem ("wzór"), diacritic-folded. Only the exact
/// stem counts; "wzory-rocznik.csv" is a regular record file.
const TEMPLATE_STEM: &str = "wzor";

/// Lists the record files of a folder, sorted by filename.
///
/// Only `.csv` files count (extension matched case-insensitively).
/// Editor lock files are skipped outright; template files are kept but
/// flagged, so the pipeline can list them without analyzing them.
pub fn discover_record_files(dir: &Path) -> Result<Vec<SourceFile>> {
    if !dir.is_dir() {
        return Err(IngestError::FolderNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::FolderRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::FolderRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if !is_csv {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("");
        if stem.starts_with(LOCK_PREFIX) {
            tracing::debug!(file = %path.display(), "skipping editor lock file");
            continue;
        }

        let is_template = strip_diacritics(stem) == TEMPLATE_STEM;
        files.push(SourceFile { path, is_template });
    }

    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}
