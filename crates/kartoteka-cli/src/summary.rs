//! Terminal summary tables for a finished run.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use kartoteka_cli::analysis::AnalyzeOutcome;
use kartoteka_model::{IssueSeverity, Jubilee, NameDictionary};

pub fn print_summary(outcome: &AnalyzeOutcome) {
    let summary = &outcome.run.summary;
    println!("Data odniesienia: {}", outcome.reference_date);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Kategoria"), header_cell("Wartość")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Osoby"), Cell::new(summary.total_people)]);
    table.add_row(vec![Cell::new("Kobiety"), Cell::new(summary.total_females)]);
    table.add_row(vec![Cell::new("Mężczyźni"), Cell::new(summary.total_males)]);
    table.add_row(vec![Cell::new("Pliki"), Cell::new(summary.files_scanned)]);
    table.add_row(vec![Cell::new("Arkusze"), Cell::new(summary.sheets_scanned)]);
    table.add_row(vec![
        Cell::new("Unikalne adresy"),
        Cell::new(summary.unique_addresses),
    ]);
    table.add_row(vec![
        Cell::new("Jubileusze"),
        Cell::new(summary.jubilees_count),
    ]);
    table.add_row(vec![
        Cell::new("Śluby w zakresie lat"),
        Cell::new(summary.marriages_in_range_count),
    ]);
    table.add_row(vec![
        Cell::new("Nieznane imiona"),
        count_cell(summary.unknown_names_count, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Ostrzeżenia"),
        count_cell(summary.warnings_count, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Błędy"),
        count_cell(summary.errors_count, Color::Red),
    ]);
    println!("{table}");

    print_jubilee_table(&outcome.run.jubilees);
    print_issue_table(outcome);

    for path in &outcome.written {
        println!("Zapisano: {}", path.display());
    }
}

fn print_jubilee_table(jubilees: &[Jubilee]) {
    if jubilees.is_empty() {
        return;
    }
    let mut jubilees: Vec<_> = jubilees.iter().collect();
    jubilees.sort_by_key(|j| j.days_until);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Data"),
        header_cell("Lata"),
        header_cell("Mąż"),
        header_cell("Żona"),
        header_cell("Nazwisko"),
        header_cell("Typ"),
        header_cell("Dni"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for jubilee in jubilees {
        table.add_row(vec![
            Cell::new(&jubilee.date),
            Cell::new(jubilee.years),
            Cell::new(&jubilee.husband),
            Cell::new(&jubilee.wife),
            Cell::new(&jubilee.surname),
            Cell::new(jubilee.kind.label()),
            Cell::new(jubilee.days_until),
        ]);
    }
    println!();
    println!("Nadchodzące jubileusze:");
    println!("{table}");
}

pub fn print_name_dictionary(dictionary: &NameDictionary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Imię"), header_cell("Płeć")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    let mut entries: Vec<_> = dictionary.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (name, gender) in entries {
        table.add_row(vec![Cell::new(name), Cell::new(gender.code())]);
    }
    println!("{table}");
    println!("Imion w słowniku: {}", dictionary.len());
}

fn print_issue_table(outcome: &AnalyzeOutcome) {
    if outcome.run.issues.is_empty() {
        return;
    }
    let mut issues: Vec<_> = outcome.run.issues.iter().collect();
    issues.sort_by(|a, b| {
        severity_rank(b.severity)
            .cmp(&severity_rank(a.severity))
            .then_with(|| a.file.cmp(&b.file))
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Poziom"),
        header_cell("Plik"),
        header_cell("Arkusz"),
        header_cell("Komunikat"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.file),
            match &issue.sheet {
                Some(sheet) => Cell::new(sheet),
                None => dim_cell("-"),
            },
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Problemy:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 2,
        IssueSeverity::Warning => 1,
        IssueSeverity::Info => 0,
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("BŁĄD").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("OSTRZ").fg(Color::Yellow),
        IssueSeverity::Info => dim_cell("INFO"),
    }
}

fn count_cell(count: u64, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
