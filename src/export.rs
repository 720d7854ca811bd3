//! Result serialization: CSV download text and an ASCII table preview.

use crate::models::{QueryResult, Value};
use unicode_width::UnicodeWidthStr;

/// Render one value for display. NULL renders as the literal `NULL`.
pub fn format_value(value: &Value) -> String {
    value.to_string()
}

/// Quote a CSV field when it contains the delimiter, a quote, or a line
/// break; embedded quotes are doubled.
fn csv_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') || text.contains('\r') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Serialize a result as comma-separated text: header row of column names,
/// one line per row, no index column. NULL cells are empty fields.
pub fn to_delimited_text(result: &QueryResult) -> String {
    let mut out = String::new();

    let header = result
        .columns
        .iter()
        .map(|c| csv_field(c))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&header);
    out.push('\n');

    for row in &result.rows {
        let line = row
            .iter()
            .map(|v| {
                if v.is_null() {
                    String::new()
                } else {
                    csv_field(&v.to_string())
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Render a result as an ASCII table for display next to the generated SQL.
/// Numbers are right-aligned; widths account for wide characters.
pub fn format_as_table(result: &QueryResult) -> String {
    if result.columns.is_empty() {
        return "Leere Ergebnismenge".to_string();
    }

    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.width()).collect();
    for row in &result.rows {
        for (i, value) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(format_value(value).width());
            }
        }
    }

    let separator: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .collect::<String>()
        + "+\n";

    let mut out = String::new();
    out.push_str(&separator);
    let header: String = result
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("| {:^width$} ", col, width = *w))
        .collect::<String>()
        + "|\n";
    out.push_str(&header);
    out.push_str(&separator);

    for row in &result.rows {
        let line: String = row
            .iter()
            .zip(&widths)
            .map(|(value, w)| {
                let formatted = format_value(value);
                if matches!(
                    value,
                    Value::Int(_) | Value::Float(_) | Value::Decimal(_)
                ) {
                    format!("| {:>width$} ", formatted, width = *w)
                } else {
                    format!("| {:<width$} ", formatted, width = *w)
                }
            })
            .collect::<String>()
            + "|\n";
        out.push_str(&line);
    }

    out.push_str(&separator);
    let row_text = if result.row_count() == 1 {
        "Zeile"
    } else {
        "Zeilen"
    };
    out.push_str(&format!("{} {}\n", result.row_count(), row_text));
    out
}
