use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;

use lifecalc_core::forms::{self, FormContext};
use lifecalc_core::presentation::{self, Locale, PresentationContext};
use lifecalc_core::validation::{self, NumericStyle};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_locale(locale: Option<String>) -> NapiResult<Locale> {
    match locale {
        Some(raw) => raw.parse::<Locale>().map_err(to_napi_error),
        None => Ok(Locale::default()),
    }
}

fn parse_today(today: Option<String>) -> NapiResult<NaiveDate> {
    match today {
        Some(raw) => validation::parse_date("today", &raw).map_err(to_napi_error),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Evaluate a raw calculator form, e.g.
/// `{"calculator":"loan","amount":"300,000,000","rate":"4","term":"30"}`.
///
/// Returns a `{result, error}` outcome. Rejected input is reported in
/// `error` with a localized message; only a bad `locale` or `today`
/// raises.
#[napi]
pub fn evaluate_form(form_json: String, locale: Option<String>, today: Option<String>) -> NapiResult<String> {
    let ctx = FormContext::new(parse_today(today)?, parse_locale(locale)?);
    let outcome = forms::evaluate_json(&form_json, &ctx);
    serde_json::to_string(&outcome).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rate tables
// ---------------------------------------------------------------------------

/// The built-in schedule for `electric`, `gas` or `water`.
#[napi]
pub fn default_rate_table(utility: String) -> NapiResult<String> {
    let utility: lifecalc_core::utility::tariffs::Utility =
        serde_json::from_value(serde_json::Value::String(utility)).map_err(to_napi_error)?;
    serde_json::to_string(&utility.default_table()).map_err(to_napi_error)
}

/// Resolve a metered quantity against a rate table.
#[napi]
pub fn resolve_tiered_charge(quantity: String, table_json: String) -> NapiResult<String> {
    let table: lifecalc_core::tiered::RateTable =
        serde_json::from_str(&table_json).map_err(to_napi_error)?;
    let quantity = validation::parse_number("quantity", &quantity, NumericStyle::Grouped)
        .map_err(to_napi_error)?;
    let charge = lifecalc_core::tiered::resolve(quantity, &table).map_err(to_napi_error)?;
    serde_json::to_string(&charge).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Lending
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: lifecalc_core::lending::loan::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lifecalc_core::lending::loan::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: lifecalc_core::amortization::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rows = lifecalc_core::amortization::schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&rows).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Group and suffix a decimal amount, e.g. `"1432245.6"` -> `"1,432,246원"`.
#[napi]
pub fn format_money(amount: String, locale: Option<String>) -> NapiResult<String> {
    let ctx = PresentationContext::for_locale(parse_locale(locale)?);
    let amount = validation::parse_number("amount", &amount, NumericStyle::Grouped).map_err(to_napi_error)?;
    Ok(presentation::format_money(amount, &ctx))
}

#[napi]
pub fn format_date(date: String, locale: Option<String>) -> NapiResult<String> {
    let ctx = PresentationContext::for_locale(parse_locale(locale)?);
    let date = validation::parse_date("date", &date).map_err(to_napi_error)?;
    Ok(presentation::format_date(date, &ctx))
}
