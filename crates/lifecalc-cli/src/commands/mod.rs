pub mod benefits;
pub mod dates;
pub mod health;
pub mod lending;
pub mod payroll;
pub mod savings;
pub mod tax;
pub mod utility;

use serde_json::{Map, Value};

use lifecalc_core::forms::{self, CalculatorForm, FormContext};
use lifecalc_core::LifeCalcError;

use crate::input;

/// Flag values gathered into a form object. Flags left off are omitted so
/// the form's own defaults apply.
#[derive(Debug, Default)]
pub struct FormFields {
    fields: Map<String, Value>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &str, value: Option<String>) -> Self {
        if let Some(v) = value {
            self.fields.insert(key.to_string(), Value::String(v));
        }
        self
    }

    /// An enum choice typed on the command line; `equal-principal` and
    /// `equal_principal` are both accepted.
    pub fn choice(mut self, key: &str, value: Option<String>) -> Self {
        if let Some(v) = value {
            let normalized = v.trim().to_ascii_lowercase().replace('-', "_");
            self.fields.insert(key.to_string(), Value::String(normalized));
        }
        self
    }

    pub fn flag(mut self, key: &str, set: bool) -> Self {
        if set {
            self.fields.insert(key.to_string(), Value::Bool(true));
        }
        self
    }

    pub fn value(mut self, key: &str, value: Option<Value>) -> Self {
        if let Some(v) = value {
            self.fields.insert(key.to_string(), v);
        }
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Resolve a form from `--input` or piped stdin, with any flags laid over
/// the document. Stdin is only read when neither a file nor flags are given.
///
/// The subcommand decides which calculator runs, so a `calculator` key in
/// the supplied JSON is overwritten.
pub fn resolve_form(
    calculator: &str,
    input_path: Option<&str>,
    fields: FormFields,
) -> Result<CalculatorForm, Box<dyn std::error::Error>> {
    let (source, base) = if let Some(path) = input_path {
        ("file", input::file::read_json_value(path)?)
    } else if !fields.is_empty() {
        ("flags", Value::Object(Map::new()))
    } else if let Some(piped) = input::stdin::read_stdin()? {
        ("stdin", piped)
    } else {
        ("flags", Value::Object(Map::new()))
    };
    tracing::debug!(calculator, source, flags = fields.fields.len(), "form resolved");

    let mut map = overlay(base, fields)?;
    map.insert("calculator".to_string(), Value::String(calculator.to_string()));

    let form: CalculatorForm =
        serde_json::from_value(Value::Object(map)).map_err(LifeCalcError::from)?;
    Ok(form)
}

/// Flags win over keys of the same name in the document.
fn overlay(base: Value, fields: FormFields) -> Result<Map<String, Value>, Box<dyn std::error::Error>> {
    match base {
        Value::Object(mut map) => {
            map.extend(fields.fields);
            Ok(map)
        }
        _ => Err("Form input must be a JSON object".into()),
    }
}

/// Submit a form and hand back the serialized envelope.
pub fn run_form(form: &CalculatorForm, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let output = forms::submit(form, ctx)?;
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lifecalc_core::presentation::Locale;

    fn ctx() -> FormContext {
        FormContext::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), Locale::Ko)
    }

    #[test]
    fn test_flags_build_form() {
        let fields = FormFields::new()
            .text("amount", Some("300,000,000".into()))
            .text("rate", Some("4".into()))
            .text("term", Some("30".into()))
            .choice("scheme", Some("Equal-Payment".into()));
        let form = resolve_form("loan", None, fields).unwrap();
        assert_eq!(form.name(), "loan");

        let value = run_form(&form, &ctx()).unwrap();
        assert_eq!(value["headline"], "1,432,246원");
    }

    #[test]
    fn test_missing_flag_is_reported_by_field() {
        let fields = FormFields::new().text("height", Some("170".into()));
        let form = resolve_form("bmi", None, fields).unwrap();
        let err = run_form(&form, &ctx()).unwrap_err();
        let err = err.downcast_ref::<LifeCalcError>().unwrap();
        assert_eq!(err.field(), Some("weight"));
    }

    #[test]
    fn test_unknown_choice_is_a_decode_error() {
        let fields = FormFields::new()
            .text("amount", Some("1000".into()))
            .choice("scheme", Some("balloon".into()));
        let err = resolve_form("loan", None, fields).unwrap_err();
        assert!(err.downcast_ref::<LifeCalcError>().is_some());
    }

    #[test]
    fn test_flags_overlay_document() {
        let base = serde_json::json!({"usage": "100", "table": null});
        let table = serde_json::json!({"name": "flat"});
        let fields = FormFields::new().value("table", Some(table.clone()));
        let map = overlay(base, fields).unwrap();
        assert_eq!(map["usage"], "100");
        assert_eq!(map["table"], table);

        let fields = FormFields::new().text("usage", Some("200".into()));
        let map = overlay(serde_json::json!({"usage": "100"}), fields).unwrap();
        assert_eq!(map["usage"], "200");
    }

    #[test]
    fn test_non_object_document_rejected() {
        let err = overlay(serde_json::json!(["usage", "100"]), FormFields::new()).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn test_input_file_keeps_flags() {
        let path = std::env::temp_dir().join(format!("lifecalc-form-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"amount": "300,000,000", "rate": "4"}"#).unwrap();
        let fields = FormFields::new().text("term", Some("30".into()));
        let form = resolve_form("loan", path.to_str(), fields).unwrap();
        std::fs::remove_file(&path).unwrap();

        let value = run_form(&form, &ctx()).unwrap();
        assert_eq!(value["headline"], "1,432,246원");
    }
}
