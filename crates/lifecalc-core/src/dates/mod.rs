//! Calendar calculators. Every function takes `today` from the caller so
//! results never depend on the system clock.

pub mod age;
pub mod milestones;
pub mod military;

use chrono::{Datelike, NaiveDate};

use crate::error::LifeCalcError;
use crate::LifeCalcResult;

/// `date`'s month and day in `year`. Feb 29 falls on Mar 1 outside leap years.
pub fn anniversary_in(date: NaiveDate, year: i32) -> LifeCalcResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .ok_or_else(|| LifeCalcError::invalid("date", format!("year {year} is out of range")))
}

/// First anniversary of `date` on or after `today`.
pub fn next_anniversary(date: NaiveDate, today: NaiveDate) -> LifeCalcResult<NaiveDate> {
    let this_year = anniversary_in(date, today.year())?;
    if this_year < today {
        anniversary_in(date, today.year() + 1)
    } else {
        Ok(this_year)
    }
}
