use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{
    self, AmortizationInput, RepaymentScheme, SchedulePeriod, TermUnit,
};
use crate::types::{round_won, Money, Rate};
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub amount: Money,
    /// Annual rate in percent, e.g. `4.5`
    pub annual_rate_percent: Rate,
    pub term: Decimal,
    #[serde(default = "default_term_unit")]
    pub term_unit: TermUnit,
    #[serde(default = "default_scheme")]
    pub scheme: RepaymentScheme,
    #[serde(default)]
    pub include_schedule: bool,
}

fn default_term_unit() -> TermUnit {
    TermUnit::Years
}

fn default_scheme() -> RepaymentScheme {
    RepaymentScheme::EqualPayment
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOutput {
    pub amount: Money,
    pub scheme: RepaymentScheme,
    pub months: u32,
    pub monthly_rate: Rate,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub first_payment: Money,
    pub last_payment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<SchedulePeriod>>,
}

pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// Monthly repayment of a loan. Figures are rounded to whole won; schedule
/// rows are rounded the same way when requested.
pub fn calculate_loan(input: &LoanInput) -> LifeCalcResult<LoanOutput> {
    validation::require_positive("amount", input.amount)?;
    validation::require_positive("rate", input.annual_rate_percent)?;
    let months = amortization::periods_from_term("term", input.term, input.term_unit)?;

    let engine_input = AmortizationInput {
        principal: input.amount,
        periodic_rate: monthly_rate(input.annual_rate_percent),
        periods: months,
        scheme: input.scheme,
    };
    let result = amortization::amortize(&engine_input)?;

    let schedule = if input.include_schedule {
        let rows = amortization::schedule(&engine_input)?
            .into_iter()
            .map(|row| SchedulePeriod {
                period: row.period,
                opening_balance: round_won(row.opening_balance),
                principal: round_won(row.principal),
                interest: round_won(row.interest),
                payment: round_won(row.payment),
                closing_balance: round_won(row.closing_balance),
            })
            .collect();
        Some(rows)
    } else {
        None
    };

    let first = result.first_period_payment.unwrap_or(result.periodic_payment);
    let last = result.last_period_payment.unwrap_or(result.periodic_payment);

    Ok(LoanOutput {
        amount: input.amount,
        scheme: input.scheme,
        months,
        monthly_rate: engine_input.periodic_rate,
        monthly_payment: round_won(result.periodic_payment),
        total_payment: round_won(result.total_payment),
        total_interest: round_won(result.total_interest),
        first_payment: round_won(first),
        last_payment: round_won(last),
        schedule,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanForm {
    pub amount: String,
    pub rate: String,
    pub term: String,
    #[serde(default = "default_term_unit")]
    pub term_unit: TermUnit,
    #[serde(default = "default_scheme")]
    pub scheme: RepaymentScheme,
    #[serde(default)]
    pub include_schedule: bool,
}

impl Default for LoanForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            rate: String::new(),
            term: String::new(),
            term_unit: default_term_unit(),
            scheme: default_scheme(),
            include_schedule: false,
        }
    }
}

impl LoanForm {
    pub fn parse(&self) -> LifeCalcResult<LoanInput> {
        Ok(LoanInput {
            amount: validation::parse_positive("amount", &self.amount, NumericStyle::Grouped)?,
            annual_rate_percent: validation::parse_positive("rate", &self.rate, NumericStyle::Digits)?,
            term: validation::parse_positive("term", &self.term, NumericStyle::Digits)?,
            term_unit: self.term_unit,
            scheme: self.scheme,
            include_schedule: self.include_schedule,
        })
    }
}
