use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sleeplog_cli::pipeline::ConvertOutcome;
use sleeplog_model::{Diagnostic, Severity};
use sleeplog_output::OutputLayout;

pub fn print_summary(outcome: &ConvertOutcome) {
    let reshaped = &outcome.reshaped;
    println!("Input: {}", outcome.input.display());
    match &outcome.output_path {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, not written)"),
    }
    let layout = match outcome.layout {
        OutputLayout::Nights => "nights",
        OutputLayout::GgirAdvanced => "ggir-advanced",
    };
    println!(
        "Layout: {layout}  Events: {}  Night columns: {}",
        outcome.event_count, reshaped.width
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Recording"),
        header_cell("Subject"),
        header_cell("Start"),
        header_cell("Nights"),
        header_cell("Matched"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Right);

    for (index, segment) in outcome.segments.iter().enumerate() {
        let issues: Vec<&Diagnostic> = reshaped
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.segment_index == index)
            .collect();
        let errors = count_severity(&issues, Severity::Error);
        let warnings = count_severity(&issues, Severity::Warning);
        let row = reshaped.rows.iter().find(|row| row.segment_index == index);
        let matched = match row {
            Some(row) => Cell::new(row.matched_count()),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(index + 1),
            recording_cell(&segment.recording_id, row.is_some()),
            Cell::new(&segment.subject_id),
            Cell::new(segment.start_date),
            Cell::new(segment.span()),
            matched,
            count_cell(errors, Color::Red),
            count_cell(warnings, Color::Yellow),
        ]);
    }
    println!("{table}");
    print_diagnostics(&reshaped.diagnostics);
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Segment"),
        header_cell("Severity"),
        header_cell("Recording"),
        header_cell("Code"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    let mut ordered: Vec<&Diagnostic> = diagnostics.iter().collect();
    ordered.sort_by_key(|diagnostic| (diagnostic.severity(), diagnostic.segment_index));
    for diagnostic in ordered {
        table.add_row(vec![
            Cell::new(diagnostic.segment_index + 1),
            severity_cell(diagnostic.severity()),
            Cell::new(&diagnostic.recording_id),
            Cell::new(diagnostic.kind.code()),
            Cell::new(diagnostic.kind.to_string()),
        ]);
    }
    println!();
    println!("Diagnostics:");
    println!("{table}");
}

fn count_severity(issues: &[&Diagnostic], severity: Severity) -> usize {
    issues
        .iter()
        .filter(|diagnostic| diagnostic.severity() == severity)
        .count()
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn recording_cell(recording_id: &str, emitted: bool) -> Cell {
    if emitted {
        Cell::new(recording_id)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(format!("{recording_id} (skipped)")).fg(Color::DarkGrey)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
