use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_won, Money, Rate};
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

// Employee shares, 2024
const NATIONAL_PENSION: Rate = dec!(0.045);
const HEALTH_INSURANCE: Rate = dec!(0.03545);
/// Applied to the health insurance premium, not to salary
const LONG_TERM_CARE: Rate = dec!(0.1227);
const EMPLOYMENT_INSURANCE: Rate = dec!(0.009);
/// Varies by industry (0.6% to 1.7%); the lowest band is assumed
const INDUSTRIAL_ACCIDENT: Rate = dec!(0.006);
const EARNED_INCOME_DEDUCTION: Rate = dec!(0.5);
const FLAT_INCOME_TAX: Rate = dec!(0.06);
const LOCAL_INCOME_TAX: Rate = dec!(0.10);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryInput {
    pub annual_salary: Money,
}

/// Monthly figures, each rounded to whole won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryOutput {
    pub monthly_salary: Money,
    pub national_pension: Money,
    pub health_insurance: Money,
    pub long_term_care: Money,
    pub employment_insurance: Money,
    pub industrial_accident_insurance: Money,
    pub income_tax: Money,
    pub local_income_tax: Money,
    pub total_deduction: Money,
    pub net_monthly_salary: Money,
}

/// Simplified monthly take-home pay: four social insurances at the employee
/// rate, half of salary deducted as earned income, and a flat 6% income tax
/// on the rest.
pub fn calculate_take_home(input: &SalaryInput) -> LifeCalcResult<SalaryOutput> {
    validation::require_positive("annual_salary", input.annual_salary)?;

    let monthly = input.annual_salary / dec!(12);
    let pension = monthly * NATIONAL_PENSION;
    let health = monthly * HEALTH_INSURANCE;
    let long_term_care = health * LONG_TERM_CARE;
    let employment = monthly * EMPLOYMENT_INSURANCE;
    let accident = monthly * INDUSTRIAL_ACCIDENT;

    let taxable = (monthly - monthly * EARNED_INCOME_DEDUCTION).max(Decimal::ZERO);
    let income_tax = taxable * FLAT_INCOME_TAX;
    let local_tax = income_tax * LOCAL_INCOME_TAX;

    let total_deduction =
        pension + health + long_term_care + employment + accident + income_tax + local_tax;

    Ok(SalaryOutput {
        monthly_salary: round_won(monthly),
        national_pension: round_won(pension),
        health_insurance: round_won(health),
        long_term_care: round_won(long_term_care),
        employment_insurance: round_won(employment),
        industrial_accident_insurance: round_won(accident),
        income_tax: round_won(income_tax),
        local_income_tax: round_won(local_tax),
        total_deduction: round_won(total_deduction),
        net_monthly_salary: round_won(monthly - total_deduction),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryForm {
    pub annual_salary: String,
}

impl SalaryForm {
    pub fn parse(&self) -> LifeCalcResult<SalaryInput> {
        Ok(SalaryInput {
            annual_salary: validation::parse_positive(
                "annual_salary",
                &self.annual_salary,
                NumericStyle::Grouped,
            )?,
        })
    }
}
