//! Table rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use snac_client::{Preferences, ProcessCode, ProcessResponse};
use snac_map::{MigrationReport, Suggestion};
use snac_model::{SchemaModel, SchemaType, Warning};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn dim_cell(text: impl ToString) -> Cell {
    Cell::new(text).add_attribute(Attribute::Dim)
}

fn flag_cell(set: bool) -> Cell {
    if set {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Fields of one schema type.
pub fn model_table(model: &SchemaModel, schema_type: SchemaType) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Required"),
        header_cell("Description"),
        header_cell("Previous names"),
    ]);
    apply_table_style(&mut table);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::UpperBoundary(Width::Percentage(50)),
    ]);
    align_column(&mut table, 1, CellAlignment::Center);
    for field in model.fields(schema_type) {
        let name = if field.required {
            Cell::new(&field.name).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&field.name)
        };
        let previous = if field.previous_names.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(field.previous_names.join(", "))
        };
        table.add_row(vec![
            name,
            flag_cell(field.required),
            Cell::new(&field.tooltip),
            previous,
        ]);
    }
    table
}

pub fn warnings_table(warnings: &[Warning]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Warning"), header_cell("Field"), header_cell("Detail")]);
    apply_table_style(&mut table);
    for warning in warnings {
        table.add_row(vec![
            Cell::new(&warning.title).fg(Color::Yellow),
            Cell::new(&warning.field).add_attribute(Attribute::Bold),
            Cell::new(&warning.body),
        ]);
    }
    table
}

pub fn suggestions_table(columns: &[String], suggestions: &[Suggestion]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Confidence"),
        header_cell("Matched"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in columns {
        match suggestions.iter().find(|s| &s.column == column) {
            Some(s) => {
                let matched = if s.matched_name == s.field {
                    dim_cell("-")
                } else {
                    Cell::new(&s.matched_name)
                };
                table.add_row(vec![
                    Cell::new(column),
                    Cell::new(&s.field).fg(Color::Green),
                    Cell::new(format!("{:.0}%", s.confidence * 100.0)),
                    matched,
                ]);
            }
            None => {
                table.add_row(vec![Cell::new(column), dim_cell("-"), dim_cell("-"), dim_cell("-")]);
            }
        }
    }
    table
}

pub fn preview_table(items: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Item")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, item) in items.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(item)]);
    }
    table
}

/// Preferences with API keys masked.
pub fn preferences_table(preferences: &Preferences) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Environment"),
        header_cell("Name"),
        header_cell("Active"),
        header_cell("API key"),
        header_cell("Web URL"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for (id, env) in &preferences.environments {
        let key = if env.has_api_key() {
            Cell::new(mask_key(&env.api_key))
        } else {
            Cell::new("not set").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(id),
            Cell::new(&env.name),
            flag_cell(*id == preferences.env),
            key,
            Cell::new(&env.web_url),
        ]);
    }
    table
}

pub fn migration_table(report: &MigrationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Was"), header_cell("Now")]);
    apply_table_style(&mut table);
    for (column, previous, current) in &report.renamed {
        table.add_row(vec![
            Cell::new(column),
            dim_cell(previous),
            Cell::new(current).fg(Color::Green),
        ]);
    }
    for (column, field) in &report.unrecognized {
        table.add_row(vec![
            Cell::new(column),
            Cell::new(field).fg(Color::Red),
            dim_cell("unknown field"),
        ]);
    }
    table
}

/// One line describing a host process response.
pub fn process_summary(what: &str, response: &ProcessResponse) -> String {
    let state = match response.code {
        ProcessCode::Ok => "done",
        ProcessCode::Pending => "started",
        ProcessCode::Error => "failed",
    };
    match (&response.message, &response.history_entry) {
        (Some(message), _) => format!("{what} {state}: {message}"),
        (None, Some(entry)) => format!("{what} {state}: {}", entry.description),
        (None, None) => format!("{what} {state}"),
    }
}

/// Keeps the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let key = key.trim();
    let visible: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{visible}")
    }
}
