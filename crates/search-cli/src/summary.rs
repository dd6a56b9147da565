//! Terminal tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use search_model::{CanonicalField, RangeBucket, ValueDetails};
use search_normalize::RejectedRecord;

pub fn fields_table(fields: &[CanonicalField]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Display name"),
        header_cell("Type"),
        header_cell("Aliases"),
        header_cell("Advanced"),
        header_cell("Parametric"),
    ]);
    apply_table_style(&mut table);
    for field in fields {
        table.add_row(vec![
            Cell::new(&field.id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&field.display_name),
            Cell::new(field.field_type),
            Cell::new(field.aliases.join(", ")),
            flag_cell(field.advanced),
            flag_cell(field.parametric),
        ]);
    }
    table
}

pub fn buckets_table(buckets: &[RangeBucket]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Range"), header_cell("Count")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for bucket in buckets {
        let close = if bucket.closed { "]" } else { ")" };
        table.add_row(vec![
            Cell::new(format!(
                "[{}, {}{close}",
                bucket.lower_bound, bucket.upper_bound
            )),
            Cell::new(bucket.count),
        ]);
    }
    table
}

pub fn details_table(details: &ValueDetails) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Average"),
        header_cell("Sum"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(details.min),
        Cell::new(details.max),
        Cell::new(details.average),
        Cell::new(details.sum),
        Cell::new(details.total_values),
    ]);
    table
}

/// One line per rejected record, for stderr.
pub fn rejected_lines(rejected: &[RejectedRecord]) -> Vec<String> {
    rejected
        .iter()
        .map(|record| format!("rejected result #{}: {}", record.position, record.error))
        .collect()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("-").fg(Color::DarkGrey)
    }
}
