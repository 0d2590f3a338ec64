//! Input gate between raw form text and the calculators.
//!
//! Every calculator form runs its fields through these helpers before any
//! arithmetic happens, so the computation modules only ever see decimals and
//! dates that already satisfy their field's business rule.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::LifeCalcError;
use crate::LifeCalcResult;

/// Accepted date spellings, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"];

/// How a numeric field is cleaned before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericStyle {
    /// Amount fields: only grouping separators are removed, anything else
    /// left over makes the value unparseable.
    Grouped,
    /// Rate, period and count fields: everything except ASCII digits and
    /// `.` is discarded.
    Digits,
}

/// Remove grouping separators (`,`, `_`) and whitespace.
pub fn clean_grouped(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect()
}

/// Keep only ASCII digits and decimal points.
pub fn clean_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Parse a numeric field with no range rule.
pub fn parse_number(field: &str, raw: &str, style: NumericStyle) -> LifeCalcResult<Decimal> {
    let cleaned = match style {
        NumericStyle::Grouped => clean_grouped(raw),
        NumericStyle::Digits => clean_digits(raw),
    };
    if cleaned.is_empty() {
        return Err(LifeCalcError::EmptyInput {
            field: field.into(),
        });
    }
    Decimal::from_str(&cleaned).map_err(|_| LifeCalcError::NotANumber {
        field: field.into(),
        value: raw.trim().to_string(),
    })
}

/// Parse a field whose business rule requires a strictly positive value.
pub fn parse_positive(field: &str, raw: &str, style: NumericStyle) -> LifeCalcResult<Decimal> {
    let value = parse_number(field, raw, style)?;
    require_positive(field, value)?;
    Ok(value)
}

/// Parse a field that may be zero but never negative.
pub fn parse_non_negative(field: &str, raw: &str, style: NumericStyle) -> LifeCalcResult<Decimal> {
    let value = parse_number(field, raw, style)?;
    if value < Decimal::ZERO {
        return Err(LifeCalcError::out_of_range(field, "must not be negative"));
    }
    Ok(value)
}

/// Parse an optional non-negative field; a blank entry yields `default`.
pub fn parse_optional(
    field: &str,
    raw: &str,
    style: NumericStyle,
    default: Decimal,
) -> LifeCalcResult<Decimal> {
    if raw.trim().is_empty() {
        return Ok(default);
    }
    parse_non_negative(field, raw, style)
}

/// Parse a whole-number count (days, months). Non-digits are discarded.
pub fn parse_whole(field: &str, raw: &str) -> LifeCalcResult<u32> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.is_empty() {
        return Err(LifeCalcError::EmptyInput {
            field: field.into(),
        });
    }
    cleaned
        .parse::<u32>()
        .map_err(|_| LifeCalcError::out_of_range(field, "count is too large"))
}

pub fn require_positive(field: &str, value: Decimal) -> LifeCalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(LifeCalcError::out_of_range(field, "must be greater than zero"));
    }
    Ok(())
}

/// Parse a calendar date.
pub fn parse_date(field: &str, raw: &str) -> LifeCalcResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LifeCalcError::EmptyInput {
            field: field.into(),
        });
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| LifeCalcError::InvalidDate {
            field: field.into(),
            value: trimmed.to_string(),
        })
}

/// Reject dates after `today`.
pub fn require_not_future(field: &str, date: NaiveDate, today: NaiveDate) -> LifeCalcResult<()> {
    if date > today {
        return Err(LifeCalcError::FutureDate {
            field: field.into(),
            date: date.to_string(),
        });
    }
    Ok(())
}

/// Require `earlier` to fall strictly before `later`.
pub fn require_ordered(
    earlier_field: &str,
    earlier: NaiveDate,
    later_field: &str,
    later: NaiveDate,
) -> LifeCalcResult<()> {
    if earlier >= later {
        return Err(LifeCalcError::OrderingViolation {
            earlier: earlier_field.into(),
            later: later_field.into(),
        });
    }
    Ok(())
}
