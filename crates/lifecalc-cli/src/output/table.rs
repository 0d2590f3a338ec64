use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, object_rows, scalar_text, SCHEDULE_KEY};

/// Format output as tables using the tabled crate: the headline, the
/// flattened result, the repayment schedule when present, then warnings.
pub fn print_table(value: &Value) {
    let Value::Object(envelope) = value else {
        println!("{}", scalar_text(value));
        return;
    };

    let Some(Value::Object(result)) = envelope.get("result") else {
        print_field_table(flatten(envelope, &[]));
        return;
    };

    if let Some(Value::String(headline)) = envelope.get("headline") {
        println!("{}\n", headline);
    }

    print_field_table(flatten(result, &[SCHEDULE_KEY]));

    if let Some(Value::Array(schedule)) = result.get(SCHEDULE_KEY) {
        if let Some((headers, rows)) = object_rows(schedule) {
            let mut builder = Builder::default();
            builder.push_record(headers);
            for row in rows {
                builder.push_record(row);
            }
            println!("\nSchedule:");
            println!("{}", Table::from(builder));
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table(rows: Vec<(String, String)>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in rows {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}
