use colored::Colorize;
use strongly_typed::types::ALL_TAGS;
use strongly_typed::{Record, Value};
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

pub(super) fn print_coerced(value: &Value) {
    println!("{} {}", value.inspect().bold(), value.type_name().dimmed());
}

/// One line per attribute, in declaration order, with names and values
/// aligned in columns.
pub(super) fn print_record(record: &Record) {
    let rows: Vec<(&str, String, &str)> = record
        .iter()
        .map(|(name, value)| match value {
            Some(v) => (name, v.inspect(), v.type_name()),
            None => (name, "nil".to_string(), ""),
        })
        .collect();

    let name_width = rows.iter().map(|(n, _, _)| n.width()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v, _)| v.width()).max().unwrap_or(0);

    for (name, shown, type_name) in &rows {
        let name_pad = " ".repeat(name_width - name.width());
        let value_pad = " ".repeat(value_width - shown.width());
        let line = format!(
            "{}{}{}{}{}{}{}",
            name.bold(),
            name_pad,
            COLUMN_GAP,
            shown,
            value_pad,
            COLUMN_GAP,
            type_name.dimmed()
        );
        println!("{}", line.trim_end());
    }
}

pub(super) fn print_types() {
    for tag in ALL_TAGS {
        if tag.is_declarable() {
            println!("{}", tag.name());
        } else {
            println!("{} {}", tag.name(), "(not declarable, use Integer)".yellow());
        }
    }
}
