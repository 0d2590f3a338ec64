#![cfg(feature = "full")]

use chrono::NaiveDate;
use lifecalc_core::forms::{self, CalculationResult, CalculatorForm, FormContext};
use lifecalc_core::presentation::Locale;
use lifecalc_core::ErrorKind;
use pretty_assertions::assert_eq;
use serde_json::Value;

fn ctx(locale: Locale) -> FormContext {
    FormContext::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), locale)
}

fn form(json: &str) -> CalculatorForm {
    serde_json::from_str(json).unwrap()
}

// ===========================================================================
// Every calculator through the JSON bridge
// ===========================================================================

const VALID_FORMS: &[(&str, &str)] = &[
    (r#"{"calculator":"electric","usage":"350"}"#, "65,866원"),
    (r#"{"calculator":"gas","usage":"20"}"#, "17,380원"),
    (r#"{"calculator":"water","usage":"10"}"#, "4,730원"),
    (r#"{"calculator":"management_fee","area":"84"}"#, "75,600원"),
    (r#"{"calculator":"income_tax","annual_income":"50,000,000","deductions":"10,000,000"}"#, "5,412,000원"),
    (r#"{"calculator":"vat","amount":"100,000"}"#, "110,000원"),
    (r#"{"calculator":"salary","annual_salary":"36,000,000"}"#, "2,601,601원"),
    (r#"{"calculator":"overtime","daily_wage":"96,000","overtime_hours":"3"}"#, "54,000원"),
    (r#"{"calculator":"weekly_rest","daily_wage":"80,000","days_worked":"5"}"#, "80,000원"),
    (r#"{"calculator":"annual_leave","monthly_salary":"2,092,000","unused_days":"5"}"#, "500,000원"),
    (r#"{"calculator":"severance","wage_total":"9,000,000","wage_days":"90","service_days":"730"}"#, "6,000,000원"),
    (r#"{"calculator":"unemployment","monthly_wage":"3,000,000","years":"2"}"#, "7,214,400원"),
    (r#"{"calculator":"loan","amount":"300,000,000","rate":"4","term":"30"}"#, "1,432,246원"),
    (r#"{"calculator":"savings","principal":"1,200,000","rate":"3","term":"12"}"#, "1,216,638원"),
    (r#"{"calculator":"goal_savings","goal":"10,000,000","rate":"3","term":"12","term_unit":"months"}"#, "821,937원"),
    (r#"{"calculator":"age","birth_date":"2000-05-20"}"#, "만 26세 4개월 29일"),
    (r#"{"calculator":"d_day","target_date":"2026-12-25"}"#, "D-67"),
    (r#"{"calculator":"baby_days","birth_date":"2026-10-16"}"#, "3일째"),
    (r#"{"calculator":"military_discharge","enlistment_date":"2026-01-19"}"#, "2027년 07월 19일 (월)"),
    (r#"{"calculator":"bmi","height":"175","weight":"65"}"#, "21.2 (정상)"),
];

#[test]
fn test_every_calculator_has_a_headline() {
    let ctx = ctx(Locale::Ko);
    for (json, headline) in VALID_FORMS {
        let outcome = forms::evaluate_json(json, &ctx);
        assert!(outcome.error.is_none(), "{json} failed: {:?}", outcome.error);
        let output = outcome.result.unwrap();
        assert_eq!(&output.headline, headline, "{json}");
        assert!(!output.methodology.is_empty());
    }
}

#[test]
fn test_envelope_shape() {
    let out = forms::submit(
        &form(r#"{"calculator":"salary","annual_salary":"36,000,000"}"#),
        &ctx(Locale::En),
    )
    .unwrap();
    let value = serde_json::to_value(&out).unwrap();

    assert_eq!(value["headline"], Value::from("2,601,601 KRW"));
    assert_eq!(value["assumptions"]["calculator"], Value::from("salary"));
    assert_eq!(value["assumptions"]["today"], Value::from("2026-10-19"));
    assert_eq!(value["assumptions"]["locale"], Value::from("en"));
    assert_eq!(value["metadata"]["precision"], Value::from("rust_decimal_128bit"));
    // untagged: result fields sit directly under "result"
    assert!(value["result"]["net_monthly_salary"].is_string());
    assert!(!out.warnings.is_empty());
}

#[test]
fn test_clamped_unemployment_warns() {
    let out = forms::submit(
        &form(r#"{"calculator":"unemployment","monthly_wage":"9,000,000","years":"1"}"#),
        &ctx(Locale::Ko),
    )
    .unwrap();
    assert_eq!(out.warnings.len(), 2);
    match out.result {
        CalculationResult::Unemployment(r) => assert!(r.clamped),
        other => panic!("unexpected {other:?}"),
    }
}

// ===========================================================================
// Rejections
// ===========================================================================

#[test]
fn test_rejections_carry_kind_field_and_message() {
    let cases: &[(&str, ErrorKind, &str)] = &[
        (r#"{"calculator":"electric","usage":""}"#, ErrorKind::EmptyInput, "usage"),
        (r#"{"calculator":"electric","usage":"12abc"}"#, ErrorKind::NotANumber, "usage"),
        (r#"{"calculator":"vat","amount":"-100"}"#, ErrorKind::OutOfRange, "amount"),
        (r#"{"calculator":"age","birth_date":"2030-01-01"}"#, ErrorKind::FutureDate, "birth_date"),
        (r#"{"calculator":"d_day","target_date":"2026-02-30"}"#, ErrorKind::InvalidDate, "target_date"),
        (
            r#"{"calculator":"severance","daily_wage":"100000","start_date":"2026-01-01","end_date":"2025-01-01"}"#,
            ErrorKind::OrderingViolation,
            "end_date",
        ),
    ];
    let ctx = ctx(Locale::Ko);
    for (json, kind, field) in cases {
        let outcome = forms::evaluate_json(json, &ctx);
        assert!(outcome.result.is_none(), "{json} should be rejected");
        let failure = outcome.error.unwrap();
        assert_eq!(failure.kind, *kind, "{json}");
        assert_eq!(failure.field.as_deref(), Some(*field), "{json}");
        assert!(!failure.message.is_empty());
    }
}

#[test]
fn test_overflowing_amounts_are_rejected_not_panics() {
    let cases: &[(&str, &str)] = &[
        (
            r#"{"calculator":"electric","usage":"1,000,000,000,000,000,000,000,000,000"}"#,
            "usage",
        ),
        (
            r#"{"calculator":"vat","amount":"75,000,000,000,000,000,000,000,000,000"}"#,
            "amount",
        ),
        (
            r#"{"calculator":"overtime","daily_wage":"70,000,000,000,000,000,000,000,000,000","overtime_hours":"100"}"#,
            "overtime_hours",
        ),
    ];
    let ctx = ctx(Locale::Ko);
    for (json, field) in cases {
        let outcome = forms::evaluate_json(json, &ctx);
        assert!(outcome.result.is_none(), "{json} should be rejected");
        let failure = outcome.error.unwrap();
        assert_eq!(failure.kind, ErrorKind::InvalidInput, "{json}");
        assert_eq!(failure.field.as_deref(), Some(*field), "{json}");
    }
}

#[test]
fn test_locale_only_changes_text() {
    let f = form(r#"{"calculator":"loan","amount":"100,000,000","rate":"3.5","term":"360","term_unit":"months"}"#);
    let ko = forms::submit(&f, &ctx(Locale::Ko)).unwrap();
    let en = forms::submit(&f, &ctx(Locale::En)).unwrap();
    assert_eq!(ko.result, en.result);
    assert_eq!(ko.headline, "449,045원");
    assert_eq!(en.headline, "449,045 KRW");
}

#[test]
fn test_failure_serializes_kind_snake_case() {
    let outcome = forms::evaluate_json(r#"{"calculator":"bmi","height":"","weight":"70"}"#, &ctx(Locale::En));
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["result"], Value::Null);
    assert_eq!(value["error"]["kind"], Value::from("empty_input"));
    assert_eq!(value["error"]["field"], Value::from("height"));
}
