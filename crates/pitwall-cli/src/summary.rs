use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pitwall_model::{FileOutcome, TransformResult};

use crate::types::{ParsedValue, TransformRun};

pub fn print_summary(run: &TransformRun) {
    println!("Input: {}", run.input_root.display());
    println!("Output: {}", run.output_root.display());
    if let Some(path) = &run.report {
        println!("Report: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Unparseable"),
        header_cell("Issues"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for result in &run.results {
        let issues = result
            .columns()
            .iter()
            .map(|report| report.issues.len())
            .sum::<usize>();
        table.add_row(vec![
            Cell::new(result.relative.display()),
            status_cell(result),
            Cell::new(result.rows()),
            count_or_dash(result, result.columns().len()),
            count_cell(Some(result.unparseable_cells()), Color::Yellow),
            count_cell(Some(issues), Color::Yellow),
        ]);
    }
    let summary = &run.summary;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} ok / {} warn / {} failed",
            summary.transformed, summary.no_classified_columns, summary.failed
        ))
        .add_attribute(Attribute::Bold),
        Cell::new(summary.rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(Some(summary.unparseable_cells), Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_issue_table(run);
    if !summary.failures.is_empty() {
        eprintln!("Failures:");
        for (path, failure) in &summary.failures {
            eprintln!("- {}: {failure}", path.display());
        }
    }
}

fn print_issue_table(run: &TransformRun) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Issue"),
    ]);
    apply_table_style(&mut table);
    let mut any = false;
    for result in &run.results {
        for report in result.columns() {
            for issue in &report.issues {
                any = true;
                table.add_row(vec![
                    Cell::new(result.relative.display()),
                    Cell::new(&report.column).fg(Color::Blue),
                    Cell::new(report.kind),
                    Cell::new(issue).fg(Color::Yellow),
                ]);
            }
        }
    }
    if any {
        println!();
        println!("Column issues:");
        println!("{table}");
    }
}

pub fn print_parsed(values: &[ParsedValue]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Value"), header_cell("Normalized")]);
    apply_table_style(&mut table);
    for value in values {
        let normalized = match &value.outcome {
            Ok(canonical) => Cell::new(canonical).fg(Color::Green),
            Err(reason) => Cell::new(format!("unparseable ({reason})")).fg(Color::Red),
        };
        table.add_row(vec![Cell::new(format!("{:?}", value.raw)), normalized]);
    }
    println!("{table}");
}

fn status_cell(result: &TransformResult) -> Cell {
    match &result.outcome {
        FileOutcome::Transformed { .. } => Cell::new("ok").fg(Color::Green),
        FileOutcome::NoClassifiedColumns { .. } => Cell::new("copied").fg(Color::Yellow),
        FileOutcome::Failed { failure } => Cell::new(format!("failed ({failure})"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_or_dash(result: &TransformResult, count: usize) -> Cell {
    if result.is_failure() {
        dim_cell("-")
    } else {
        Cell::new(count)
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
