use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::LifeCalcError;
use crate::validation;
use crate::LifeCalcResult;

use super::next_anniversary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeInput {
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeOutput {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub days_lived: i64,
    pub next_birthday: NaiveDate,
    pub days_until_birthday: i64,
}

fn days_in_previous_month(today: NaiveDate) -> LifeCalcResult<u32> {
    today
        .with_day(1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .ok_or_else(|| LifeCalcError::invalid("today", "date is out of range"))
}

/// Age in full years, months and days. A negative day count borrows the
/// length of the month before `today`.
pub fn calculate_age(input: &AgeInput, today: NaiveDate) -> LifeCalcResult<AgeOutput> {
    let birth = input.birth_date;
    validation::require_not_future("birth_date", birth, today)?;

    let mut years = today.year() - birth.year();
    let mut months = today.month() as i32 - birth.month() as i32;
    let mut days = today.day() as i32 - birth.day() as i32;

    if days < 0 {
        months -= 1;
        // a birth day past the end of the shorter month anchors on its last day
        let previous = days_in_previous_month(today)?;
        days = today.day() as i32 + (previous - birth.day().min(previous)) as i32;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let next_birthday = next_anniversary(birth, today)?;

    Ok(AgeOutput {
        years: years.max(0) as u32,
        months: months as u32,
        days: days as u32,
        days_lived: (today - birth).num_days(),
        next_birthday,
        days_until_birthday: (next_birthday - today).num_days(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeForm {
    pub birth_date: String,
}

impl AgeForm {
    pub fn parse(&self) -> LifeCalcResult<AgeInput> {
        Ok(AgeInput {
            birth_date: validation::parse_date("birth_date", &self.birth_date)?,
        })
    }
}
