use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::LifeCalcError;
use crate::types::{CheckedArith, Money, Rate};
use crate::LifeCalcResult;

/// How a loan (or savings plan) is paid down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentScheme {
    /// Same total payment every period (annuity).
    EqualPayment,
    /// Same principal every period; interest shrinks with the balance.
    EqualPrincipal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub principal: Money,
    /// Rate per period, already divided down from the annual rate.
    pub periodic_rate: Rate,
    pub periods: u32,
    pub scheme: RepaymentScheme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// The fixed payment, or the average payment under equal principal.
    pub periodic_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_period_payment: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_period_payment: Option<Money>,
}

/// A single row of a repayment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub period: u32,
    pub opening_balance: Money,
    pub principal: Money,
    pub interest: Money,
    pub payment: Money,
    pub closing_balance: Money,
}

fn validate(principal: Money, periodic_rate: Rate, periods: u32) -> LifeCalcResult<()> {
    if principal <= Decimal::ZERO {
        return Err(LifeCalcError::invalid(
            "principal",
            "Principal must be positive",
        ));
    }
    if periodic_rate < Decimal::ZERO {
        return Err(LifeCalcError::invalid(
            "periodic_rate",
            "Periodic rate must not be negative",
        ));
    }
    if periods == 0 {
        return Err(LifeCalcError::invalid(
            "periods",
            "Number of periods must be > 0",
        ));
    }
    if periods > MAX_PERIODS {
        return Err(LifeCalcError::invalid(
            "periods",
            format!("Number of periods must not exceed {MAX_PERIODS}"),
        ));
    }
    Ok(())
}

/// Annuity payment `P * r(1+r)^n / ((1+r)^n - 1)`, or `P / n` at a zero rate.
fn annuity_payment(principal: Money, periodic_rate: Rate, periods: u32) -> LifeCalcResult<Money> {
    let n = Decimal::from(periods);
    if periodic_rate.is_zero() {
        return Ok(principal / n);
    }

    let growth = (Decimal::ONE + periodic_rate)
        .checked_powi(i64::from(periods))
        .ok_or_else(|| LifeCalcError::overflow("periods"))?;
    let denominator = growth.sub_or(Decimal::ONE, "periodic_rate")?;
    if denominator.is_zero() {
        return Err(LifeCalcError::invalid(
            "periodic_rate",
            "Rate too small to resolve an annuity factor",
        ));
    }

    let factor = periodic_rate
        .mul_or(growth, "periodic_rate")?
        .div_or(denominator, "periodic_rate")?;
    principal.mul_or(factor, "principal")
}

/// Equal total payment every period.
pub fn equal_payment(
    principal: Money,
    periodic_rate: Rate,
    periods: u32,
) -> LifeCalcResult<AmortizationResult> {
    validate(principal, periodic_rate, periods)?;

    let payment = annuity_payment(principal, periodic_rate, periods)?;
    let total_payment = payment.mul_or(Decimal::from(periods), "principal")?;

    Ok(AmortizationResult {
        periodic_payment: payment,
        total_payment,
        total_interest: total_payment.sub_or(principal, "principal")?,
        first_period_payment: Some(payment),
        last_period_payment: Some(payment),
    })
}

/// Equal principal every period, interest on the remaining balance.
pub fn equal_principal(
    principal: Money,
    periodic_rate: Rate,
    periods: u32,
) -> LifeCalcResult<AmortizationResult> {
    validate(principal, periodic_rate, periods)?;

    let n = Decimal::from(periods);
    let periodic_principal = principal / n;
    let mut total_payment = Decimal::ZERO;
    let mut first = Decimal::ZERO;
    let mut last = Decimal::ZERO;

    for i in 0..periods {
        let repaid = periodic_principal.mul_or(Decimal::from(i), "principal")?;
        let remaining = principal.sub_or(repaid, "principal")?;
        let payment = remaining
            .mul_or(periodic_rate, "periodic_rate")?
            .add_or(periodic_principal, "principal")?;
        total_payment = total_payment.add_or(payment, "principal")?;
        if i == 0 {
            first = payment;
        }
        if i == periods - 1 {
            last = payment;
        }
    }

    Ok(AmortizationResult {
        periodic_payment: total_payment / n,
        total_payment,
        total_interest: total_payment.sub_or(principal, "principal")?,
        first_period_payment: Some(first),
        last_period_payment: Some(last),
    })
}

/// Dispatch on the input's repayment scheme.
pub fn amortize(input: &AmortizationInput) -> LifeCalcResult<AmortizationResult> {
    match input.scheme {
        RepaymentScheme::EqualPayment => {
            equal_payment(input.principal, input.periodic_rate, input.periods)
        }
        RepaymentScheme::EqualPrincipal => {
            equal_principal(input.principal, input.periodic_rate, input.periods)
        }
    }
}

/// Period-by-period repayment table. The final period absorbs any residual
/// balance left by decimal rounding so the loan closes at exactly zero.
pub fn schedule(input: &AmortizationInput) -> LifeCalcResult<Vec<SchedulePeriod>> {
    validate(input.principal, input.periodic_rate, input.periods)?;

    let fixed_payment = match input.scheme {
        RepaymentScheme::EqualPayment => {
            Some(annuity_payment(input.principal, input.periodic_rate, input.periods)?)
        }
        RepaymentScheme::EqualPrincipal => None,
    };
    let periodic_principal = input.principal / Decimal::from(input.periods);

    let mut rows = Vec::with_capacity(input.periods as usize);
    let mut balance = input.principal;

    for period in 1..=input.periods {
        let opening = balance;
        let interest = opening.mul_or(input.periodic_rate, "periodic_rate")?;
        let principal = if period == input.periods {
            opening
        } else {
            match fixed_payment {
                Some(payment) => payment.sub_or(interest, "principal")?,
                None => periodic_principal,
            }
        };
        balance = opening.sub_or(principal, "principal")?;

        rows.push(SchedulePeriod {
            period,
            opening_balance: opening,
            principal,
            interest,
            payment: principal.add_or(interest, "principal")?,
            closing_balance: balance,
        });
    }

    Ok(rows)
}

/// Unit a loan or savings term is entered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermUnit {
    #[default]
    Months,
    Years,
}

/// Longest term accepted, in months.
pub const MAX_PERIODS: u32 = 1200;

/// Convert a term to a whole number of monthly periods.
pub fn periods_from_term(field: &str, term: Decimal, unit: TermUnit) -> LifeCalcResult<u32> {
    if term <= Decimal::ZERO {
        return Err(LifeCalcError::out_of_range(field, "must be greater than zero"));
    }
    let months = match unit {
        TermUnit::Months => term,
        TermUnit::Years => term
            .checked_mul(Decimal::from(12))
            .ok_or_else(|| LifeCalcError::out_of_range(field, "term is too long"))?,
    };
    if months.fract() != Decimal::ZERO {
        return Err(LifeCalcError::out_of_range(
            field,
            "term must come to a whole number of months",
        ));
    }
    months
        .to_u32()
        .filter(|m| *m <= MAX_PERIODS)
        .ok_or_else(|| LifeCalcError::out_of_range(field, "term is too long"))
}
