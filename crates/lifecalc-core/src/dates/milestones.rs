use chrono::{Days, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LifeCalcError;
use crate::validation;
use crate::LifeCalcResult;

use super::next_anniversary;

/// Average month and year lengths for approximate spans.
const AVERAGE_MONTH_DAYS: Decimal = dec!(30.44);
const AVERAGE_YEAR_DAYS: Decimal = dec!(365.25);
const HUNDRED_DAYS: u64 = 100;

fn whole_units(days: i64, unit: Decimal) -> i64 {
    (Decimal::from(days) / unit).floor().to_i64().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// D-day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DDayInput {
    pub target_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DDayOutput {
    pub target_date: NaiveDate,
    pub days_remaining: i64,
    pub days_passed: i64,
    pub weeks_remaining: i64,
    pub months_remaining: i64,
    /// "D-42", "D-Day" or "D+3"
    pub label: String,
}

pub fn calculate_d_day(input: &DDayInput, today: NaiveDate) -> DDayOutput {
    let diff = (input.target_date - today).num_days();
    let days_remaining = diff.max(0);
    let days_passed = (-diff).max(0);

    let label = match diff {
        0 => "D-Day".to_string(),
        d if d > 0 => format!("D-{d}"),
        d => format!("D+{}", -d),
    };

    DDayOutput {
        target_date: input.target_date,
        days_remaining,
        days_passed,
        weeks_remaining: days_remaining / 7,
        months_remaining: whole_units(days_remaining, AVERAGE_MONTH_DAYS),
        label,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DDayForm {
    pub target_date: String,
}

impl DDayForm {
    pub fn parse(&self) -> LifeCalcResult<DDayInput> {
        Ok(DDayInput {
            target_date: validation::parse_date("target_date", &self.target_date)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Days since birth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabyDaysInput {
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabyDaysOutput {
    pub birth_date: NaiveDate,
    pub days_old: i64,
    pub weeks_old: i64,
    pub months_old: i64,
    pub years_old: i64,
    pub hundredth_day: NaiveDate,
    pub next_birthday: NaiveDate,
}

pub fn calculate_baby_days(input: &BabyDaysInput, today: NaiveDate) -> LifeCalcResult<BabyDaysOutput> {
    let birth = input.birth_date;
    validation::require_not_future("birth_date", birth, today)?;

    let days_old = (today - birth).num_days();
    let hundredth_day = birth
        .checked_add_days(Days::new(HUNDRED_DAYS))
        .ok_or_else(|| LifeCalcError::invalid("birth_date", "date is out of range"))?;

    Ok(BabyDaysOutput {
        birth_date: birth,
        days_old,
        weeks_old: days_old / 7,
        months_old: whole_units(days_old, AVERAGE_MONTH_DAYS),
        years_old: whole_units(days_old, AVERAGE_YEAR_DAYS),
        hundredth_day,
        next_birthday: next_anniversary(birth, today)?,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BabyDaysForm {
    pub birth_date: String,
}

impl BabyDaysForm {
    pub fn parse(&self) -> LifeCalcResult<BabyDaysInput> {
        Ok(BabyDaysInput {
            birth_date: validation::parse_date("birth_date", &self.birth_date)?,
        })
    }
}
