use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LifeCalcError;
use crate::tiered::StepSchedule;
use crate::types::{round_won, CheckedArith, Money, Rate};
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

const REPLACEMENT_RATE: Rate = dec!(0.6);
/// Daily benefit floor, 2026 minimum wage basis
pub const DAILY_BENEFIT_FLOOR: Money = dec!(60120);
pub const DAILY_BENEFIT_CAP: Money = dec!(66000);
const DAYS_PER_MONTH: Decimal = dec!(30);

/// Benefit days by years of insured employment.
pub fn payment_days_schedule() -> StepSchedule<u32> {
    StepSchedule::new(
        90,
        vec![
            (dec!(1), 120),
            (dec!(3), 150),
            (dec!(5), 180),
            (dec!(10), 240),
        ],
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnemploymentInput {
    /// Average monthly wage before leaving
    pub monthly_wage: Money,
    #[serde(default)]
    pub years: Decimal,
    #[serde(default)]
    pub months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnemploymentOutput {
    pub daily_wage: Money,
    pub daily_benefit: Money,
    pub insured_years: Decimal,
    pub payment_days: u32,
    pub monthly_benefit: Money,
    pub total_benefit: Money,
    /// Whether the floor or cap replaced the 60% figure
    pub clamped: bool,
}

pub fn calculate_unemployment(input: &UnemploymentInput) -> LifeCalcResult<UnemploymentOutput> {
    validation::require_positive("monthly_wage", input.monthly_wage)?;
    if input.years < Decimal::ZERO {
        return Err(LifeCalcError::out_of_range("years", "must not be negative"));
    }

    let insured_years = input
        .years
        .add_or(Decimal::from(input.months) / dec!(12), "years")?;
    if insured_years <= Decimal::ZERO {
        return Err(LifeCalcError::out_of_range(
            "service_period",
            "insured period must be greater than zero",
        ));
    }

    let daily_wage = input.monthly_wage / DAYS_PER_MONTH;
    let raw_benefit = daily_wage * REPLACEMENT_RATE;
    let daily_benefit = raw_benefit.clamp(DAILY_BENEFIT_FLOOR, DAILY_BENEFIT_CAP);
    let payment_days = payment_days_schedule().lookup(insured_years);

    tracing::debug!(
        %insured_years,
        payment_days,
        %daily_benefit,
        "unemployment benefit resolved"
    );

    Ok(UnemploymentOutput {
        daily_wage: round_won(daily_wage),
        daily_benefit: round_won(daily_benefit),
        insured_years: insured_years.round_dp(2),
        payment_days,
        monthly_benefit: round_won(daily_benefit * DAYS_PER_MONTH),
        total_benefit: round_won(daily_benefit * Decimal::from(payment_days)),
        clamped: daily_benefit != raw_benefit,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnemploymentForm {
    pub monthly_wage: String,
    pub years: String,
    pub months: String,
}

impl UnemploymentForm {
    pub fn parse(&self) -> LifeCalcResult<UnemploymentInput> {
        let months = if self.months.trim().is_empty() {
            0
        } else {
            validation::parse_whole("months", &self.months)?
        };
        Ok(UnemploymentInput {
            monthly_wage: validation::parse_positive(
                "monthly_wage",
                &self.monthly_wage,
                NumericStyle::Grouped,
            )?,
            years: validation::parse_optional("years", &self.years, NumericStyle::Digits, Decimal::ZERO)?,
            months,
        })
    }
}
