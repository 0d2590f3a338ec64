use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LifeCalcError;
use crate::validation;
use crate::LifeCalcResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    #[default]
    Army,
    Navy,
    AirForce,
    Marines,
}

impl Branch {
    /// Mandatory service length in months.
    pub fn service_months(self) -> u32 {
        match self {
            Branch::Army | Branch::Marines => 18,
            Branch::Navy => 20,
            Branch::AirForce => 21,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargeInput {
    pub enlistment_date: NaiveDate,
    #[serde(default)]
    pub branch: Branch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargeOutput {
    pub branch: Branch,
    pub service_months: u32,
    pub discharge_date: NaiveDate,
    pub days_served: i64,
    pub days_remaining: i64,
    /// Percent of `service_months * 30` days served, 0 to 100, 1 dp
    pub progress_percent: Decimal,
}

/// Discharge date and progress. Enlistment may lie in the future, in which
/// case nothing has been served yet.
pub fn calculate_discharge(input: &DischargeInput, today: NaiveDate) -> LifeCalcResult<DischargeOutput> {
    let months = input.branch.service_months();
    // month ends clamp: a Jan 31 enlistment plus one month lands on Feb 28/29
    let discharge_date = input
        .enlistment_date
        .checked_add_months(Months::new(months))
        .ok_or_else(|| LifeCalcError::invalid("enlistment_date", "date is out of range"))?;

    let served = (today - input.enlistment_date).num_days();
    let remaining = (discharge_date - today).num_days();
    let nominal_days = Decimal::from(months * 30);
    let progress = (Decimal::from(served) / nominal_days * dec!(100))
        .clamp(Decimal::ZERO, dec!(100))
        .round_dp(1);

    Ok(DischargeOutput {
        branch: input.branch,
        service_months: months,
        discharge_date,
        days_served: served.max(0),
        days_remaining: remaining.max(0),
        progress_percent: progress,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DischargeForm {
    pub enlistment_date: String,
    #[serde(default)]
    pub branch: Branch,
}

impl DischargeForm {
    pub fn parse(&self) -> LifeCalcResult<DischargeInput> {
        Ok(DischargeInput {
            enlistment_date: validation::parse_date("enlistment_date", &self.enlistment_date)?,
            branch: self.branch,
        })
    }
}
