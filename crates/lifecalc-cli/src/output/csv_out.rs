use serde_json::Value;
use std::io;

use super::{flatten, object_rows, scalar_text, SCHEDULE_KEY};

/// Write output as CSV to stdout.
///
/// A loan run with a schedule writes one row per period; everything else
/// is written as flattened `field,value` pairs of the result.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value.get("result").unwrap_or(value);
    match result {
        Value::Object(map) => {
            let schedule = map
                .get(SCHEDULE_KEY)
                .and_then(Value::as_array)
                .and_then(|items| object_rows(items));
            if let Some((headers, rows)) = schedule {
                let _ = wtr.write_record(&headers);
                for row in rows {
                    let _ = wtr.write_record(&row);
                }
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in flatten(map, &[]) {
                    let _ = wtr.write_record([key, val]);
                }
            }
        }
        other => {
            let _ = wtr.write_record([scalar_text(other)]);
        }
    }

    let _ = wtr.flush();
}
