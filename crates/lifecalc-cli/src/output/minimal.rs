use serde_json::Value;

use super::scalar_text;

/// Print just the headline figure, already formatted for the locale.
///
/// Falls back to the first result field for envelopes without one.
pub fn print_minimal(value: &Value) {
    if let Some(Value::String(headline)) = value.get("headline") {
        println!("{}", headline);
        return;
    }

    let result = value.get("result").unwrap_or(value);
    match result {
        Value::Object(map) => {
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, scalar_text(val));
            }
        }
        other => println!("{}", scalar_text(other)),
    }
}
