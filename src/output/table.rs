//! Plain-text tables

use std::io::{self, Write};

use console::measure_text_width;
use owo_colors::OwoColorize;
use serde_json::Value;

const TRUNCATE_WIDTH: usize = 30;
const COLUMN_GAP: usize = 3;

/// Render a header row plus body rows with auto-sized columns
pub fn render_table(
    w: &mut dyn Write,
    columns: &[String],
    lines: &[Vec<String>],
    color: bool,
) -> io::Result<()> {
    let mut widths: Vec<usize> = columns.iter().map(|c| measure_text_width(c)).collect();
    for line in lines {
        for (i, cell) in line.iter().enumerate() {
            let width = measure_text_width(cell);
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    let header: Vec<String> = columns
        .iter()
        .map(|c| {
            if color {
                c.green().bold().to_string()
            } else {
                c.clone()
            }
        })
        .collect();
    write_row(w, &header, &widths)?;

    for line in lines {
        write_row(w, line, &widths)?;
    }

    Ok(())
}

/// Render `label  value` pairs, labels styled like a header column
pub fn render_fields(w: &mut dyn Write, fields: &[(String, String)], color: bool) -> io::Result<()> {
    let width = fields
        .iter()
        .map(|(label, _)| measure_text_width(label) + 1)
        .max()
        .unwrap_or(0);

    for (label, value) in fields {
        let label = format!("{}:", label);
        let pad = width.saturating_sub(measure_text_width(&label)) + COLUMN_GAP;
        let shown = if color {
            label.green().bold().to_string()
        } else {
            label
        };
        writeln!(w, "{}{}{}", shown, " ".repeat(pad), value)?;
    }

    Ok(())
}

fn write_row(w: &mut dyn Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let mut row = String::new();
    for (i, cell) in cells.iter().enumerate() {
        row.push_str(cell);
        if i + 1 < cells.len() {
            let pad = widths[i].saturating_sub(measure_text_width(cell)) + COLUMN_GAP;
            row.push_str(&" ".repeat(pad));
        }
    }
    writeln!(w, "{}", row)
}

/// Shorten long cells for display
pub fn truncate(s: &str) -> String {
    if s.chars().count() <= TRUNCATE_WIDTH {
        return s.to_string();
    }
    let head: String = s.chars().take(TRUNCATE_WIDTH).collect();
    format!("{}...", head)
}

/// Primitive values pass through, complex values become compact JSON
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
