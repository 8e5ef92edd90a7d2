//! CSV-backed grid source.
//!
//! One CSV file is one sheet; the sheet name is the file stem. Rows may
//! be ragged, matching how record cards are exported.

use std::path::Path;

use chrono::NaiveDate;
use kartoteka_core::pipeline::GridSource;
use kartoteka_model::{CellValue, Grid, KartotekaError, NamedGrid};

/// Loads record grids from CSV files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvGridSource;

/// Types one CSV field the way spreadsheet exports do: blank, ISO date,
/// number, or free text. A leading BOM never reaches the engine.
fn parse_cell(field: &str) -> CellValue {
    let field = field.strip_prefix('\u{feff}').unwrap_or(field);
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(date) = trimmed.parse::<NaiveDate>() {
        return CellValue::Date(date);
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        return CellValue::Number(number);
    }
    CellValue::Text(trimmed.to_string())
}

impl GridSource for CsvGridSource {
    fn load_grids(&self, path: &Path) -> kartoteka_model::Result<Vec<NamedGrid>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| KartotekaError::Message(format!("cannot open {}: {e}", path.display())))?;

        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| KartotekaError::Message(format!("cannot read {}: {e}", path.display())))?;
            rows.push(record.iter().map(parse_cell).collect());
        }

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("arkusz")
            .to_string();
        Ok(vec![NamedGrid {
            name,
            grid: Grid::new(rows),
        }])
    }
}
