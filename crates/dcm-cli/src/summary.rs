use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dcm_map::{MatchCatalog, ScoredTarget};
use dcm_model::{FieldMapping, MappingStatus};

pub fn print_mappings(mappings: &[FieldMapping]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Entity"),
        header_cell("Field"),
        header_cell("Dictionary ID"),
        header_cell("Score"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for mapping in mappings {
        table.add_row(vec![
            Cell::new(&mapping.source_column),
            optional_cell(mapping.entity.as_deref()),
            optional_cell(mapping.field.as_deref()),
            optional_cell(mapping.dictionary_field_id.as_deref()),
            score_cell(mapping.score),
            status_cell(mapping.status),
        ]);
    }
    println!("{table}");
    let pending = mappings
        .iter()
        .filter(|m| m.status == MappingStatus::Pending)
        .count();
    println!(
        "{pending} of {} columns have a recommendation awaiting confirmation",
        mappings.len()
    );
}

pub fn print_candidates(column: &str, candidates: &[ScoredTarget], min_score: f64) {
    println!("Column: {column}");
    if candidates.is_empty() {
        println!("No target competes for this column.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Entity"),
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Score"),
        header_cell("Breakdown"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (rank, candidate) in candidates.iter().enumerate() {
        let score = Cell::new(format!("{:.2}", candidate.score));
        let score = if candidate.score >= min_score {
            score.fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            score.fg(Color::DarkGrey)
        };
        let breakdown = candidate
            .components
            .iter()
            .map(|c| format!("{} {:.2} ({})", c.name, c.value, c.description))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&candidate.target.entity),
            optional_cell(candidate.target.field.as_deref()),
            Cell::new(candidate.target.kind),
            score,
            Cell::new(breakdown),
        ]);
    }
    println!("{table}");
    if candidates[0].score < min_score {
        println!("Best score is below {min_score:.0}: the column would be left unmapped.");
    }
}

pub fn print_catalog(catalog: &MatchCatalog) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Dictionary ID"),
        header_cell("Standard values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for target in catalog {
        table.add_row(vec![
            Cell::new(&target.entity),
            optional_cell(target.field.as_deref()),
            Cell::new(target.kind),
            optional_cell(target.id.as_deref()),
            Cell::new(target.standard_values.len()),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn score_cell(score: Option<f64>) -> Cell {
    match score {
        Some(score) => Cell::new(format!("{score:.2}")),
        None => dim_cell("-"),
    }
}

fn status_cell(status: MappingStatus) -> Cell {
    match status {
        MappingStatus::Pending => Cell::new(status).fg(Color::Green),
        MappingStatus::Unmapped => Cell::new(status).fg(Color::Yellow),
        MappingStatus::Confirmed | MappingStatus::Rejected => Cell::new(status),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
