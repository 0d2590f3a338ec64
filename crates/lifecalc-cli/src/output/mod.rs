pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Repayment schedules are rendered as their own table rather than
/// flattened into field/value rows.
pub(crate) const SCHEDULE_KEY: &str = "schedule";

/// Flatten nested objects and arrays into dotted `(path, value)` rows,
/// e.g. `charge.slices.0.amount`. Nulls are dropped.
pub(crate) fn flatten(map: &Map<String, Value>, skip: &[&str]) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for (key, val) in map {
        if skip.contains(&key.as_str()) {
            continue;
        }
        flatten_into(key.clone(), val, &mut rows);
    }
    rows
}

fn flatten_into(path: String, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, val) in map {
                flatten_into(format!("{path}.{key}"), val, rows);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(format!("{path}.{i}"), item, rows);
            }
        }
        scalar => rows.push((path, scalar_text(scalar))),
    }
}

pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Rows of an array of objects under the headers of its first element.
pub(crate) fn object_rows(items: &[Value]) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let Value::Object(first) = items.first()? else {
        return None;
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
                .collect()
        })
        .collect();
    Some((headers, rows))
}
