use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_cli::types::{BuildResult, ExportOutcome, QueryResult};
use roster_core::{Badge, TableView};
use roster_ingest::{SheetReport, SheetStatus};
use roster_model::{ChoiceKind, ChoiceSet};

pub fn print_build_summary(result: &BuildResult) {
    println!("Source: {}", result.source_name);
    println!("Output: {} ({} bytes)", result.output.display(), result.bytes);
    println!("Variant: {}", variant_name(result.kind));
    if result.sheets.is_empty() {
        println!("Records: {}", result.records);
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Status"),
        header_cell("Records"),
        header_cell("Dropped"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for sheet in &result.sheets {
        table.add_row(vec![
            Cell::new(&sheet.name),
            status_cell(sheet),
            count_cell(sheet.is_used().then(|| sheet.records()), Color::Reset),
            count_cell(sheet.is_used().then(|| sheet.dropped()), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.records).add_attribute(Attribute::Bold),
        count_cell(Some(result.rows_dropped), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_query(result: &QueryResult) {
    println!("{}", badge_line(&result.view.badges, result));
    println!("{}", result.labels.count_text(result.view.count));
    match &result.view.table {
        TableView::Empty => println!("{}", result.empty_message),
        TableView::Rows { columns, rows } => {
            let mut table = Table::new();
            table.set_header(columns.iter().map(|c| header_cell(c)).collect::<Vec<_>>());
            apply_table_style(&mut table);
            for row in rows {
                table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
            }
            println!("{table}");
        }
    }
    for item in &result.unknown {
        eprintln!("warning: {} '{}' not found in data", item.dimension, item.value);
    }
    match &result.export {
        Some(ExportOutcome::Written { path, rows }) => {
            println!("Exported {rows} rows to {}", path.display());
        }
        Some(ExportOutcome::NothingToExport { notice }) => eprintln!("{notice}"),
        None => {}
    }
}

pub fn print_choices(choices: &ChoiceSet) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    match choices {
        ChoiceSet::Independent { year, site } => {
            table.set_header(vec![header_cell("Years"), header_cell("Sites")]);
            let rows = year.len().max(site.len());
            for index in 0..rows {
                table.add_row(vec![
                    Cell::new(year.get(index).map(String::as_str).unwrap_or("")),
                    Cell::new(site.get(index).map(String::as_str).unwrap_or("")),
                ]);
            }
        }
        ChoiceSet::Cascading { year, site_by_year } => {
            table.set_header(vec![header_cell("Year"), header_cell("Sites")]);
            for value in year {
                let sites = site_by_year
                    .get(value)
                    .map(|sites| sites.join(", "))
                    .unwrap_or_default();
                table.add_row(vec![Cell::new(value), Cell::new(sites)]);
            }
        }
    }
    println!("{table}");
}

fn badge_line(badges: &[Badge], result: &QueryResult) -> String {
    badges
        .iter()
        .map(|badge| {
            let label = result.labels.label(badge.dimension);
            format!("{label}: {}", badge.text)
        })
        .collect::<Vec<_>>()
        .join("  /  ")
}

fn variant_name(kind: ChoiceKind) -> &'static str {
    match kind {
        ChoiceKind::Cascading => "cascading",
        ChoiceKind::Independent => "multi",
    }
}

fn status_cell(sheet: &SheetReport) -> Cell {
    match &sheet.status {
        SheetStatus::Used { .. } => Cell::new("used").fg(Color::Green),
        SheetStatus::Skipped { missing } => {
            Cell::new(format!("skipped (no {})", missing.join(", "))).fg(Color::DarkGrey)
        }
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
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
        .set_width(100);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
