use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{self, TermUnit};
use crate::error::LifeCalcError;
use crate::types::{round_won, CheckedArith, Money, Rate};
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsKind {
    /// Installment savings: equal monthly deposits, compounded monthly
    #[default]
    Installment,
    /// Time deposit: lump sum at simple interest
    Deposit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsInput {
    #[serde(default)]
    pub kind: SavingsKind,
    /// Total paid in over the term (installment) or the lump sum (deposit)
    pub principal: Money,
    pub annual_rate_percent: Rate,
    pub term: Decimal,
    #[serde(default)]
    pub term_unit: TermUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsOutput {
    pub kind: SavingsKind,
    pub months: u32,
    pub principal: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_deposit: Option<Money>,
    pub interest: Money,
    pub total: Money,
}

/// Future value of `deposit` paid at the end of each of `months` periods.
pub fn installment_future_value(deposit: Money, monthly_rate: Rate, months: u32) -> LifeCalcResult<Money> {
    if monthly_rate.is_zero() {
        return deposit.mul_or(Decimal::from(months), "principal");
    }
    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(months))
        .ok_or_else(|| LifeCalcError::overflow("term"))?;
    let factor = growth
        .sub_or(Decimal::ONE, "term")?
        .div_or(monthly_rate, "rate")?;
    deposit.mul_or(factor, "principal")
}

/// Maturity of installment savings or a time deposit, before tax.
pub fn calculate_savings(input: &SavingsInput) -> LifeCalcResult<SavingsOutput> {
    validation::require_positive("principal", input.principal)?;
    validation::require_positive("rate", input.annual_rate_percent)?;
    let months = amortization::periods_from_term("term", input.term, input.term_unit)?;
    let rate = input.annual_rate_percent / dec!(100);
    let n = Decimal::from(months);

    let (monthly_deposit, total, interest) = match input.kind {
        SavingsKind::Installment => {
            let deposit = input.principal / n;
            let total = installment_future_value(deposit, rate / dec!(12), months)?;
            let paid_in = deposit.mul_or(n, "principal")?;
            (Some(deposit), total, total.sub_or(paid_in, "principal")?)
        }
        SavingsKind::Deposit => {
            let years = n / dec!(12);
            let accrual = rate.mul_or(years, "rate")?.add_or(Decimal::ONE, "rate")?;
            let total = input.principal.mul_or(accrual, "principal")?;
            (None, total, total.sub_or(input.principal, "principal")?)
        }
    };

    Ok(SavingsOutput {
        kind: input.kind,
        months,
        principal: round_won(input.principal),
        monthly_deposit: monthly_deposit.map(round_won),
        interest: round_won(interest),
        total: round_won(total),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsForm {
    #[serde(default)]
    pub kind: SavingsKind,
    pub principal: String,
    pub rate: String,
    pub term: String,
    #[serde(default)]
    pub term_unit: TermUnit,
}

impl SavingsForm {
    pub fn parse(&self) -> LifeCalcResult<SavingsInput> {
        Ok(SavingsInput {
            kind: self.kind,
            principal: validation::parse_positive("principal", &self.principal, NumericStyle::Grouped)?,
            annual_rate_percent: validation::parse_positive("rate", &self.rate, NumericStyle::Digits)?,
            term: validation::parse_positive("term", &self.term, NumericStyle::Digits)?,
            term_unit: self.term_unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_installment_savings() {
        let out = calculate_savings(&SavingsInput {
            kind: SavingsKind::Installment,
            principal: dec!(1200000),
            annual_rate_percent: dec!(3),
            term: dec!(12),
            term_unit: TermUnit::Months,
        })
        .unwrap();
        assert_eq!(out.monthly_deposit, Some(dec!(100000)));
        assert_eq!(out.total, dec!(1216638));
        assert_eq!(out.interest, dec!(16638));
    }

    #[test]
    fn test_time_deposit_simple_interest() {
        let out = calculate_savings(&SavingsInput {
            kind: SavingsKind::Deposit,
            principal: dec!(10000000),
            annual_rate_percent: dec!(3),
            term: dec!(2),
            term_unit: TermUnit::Years,
        })
        .unwrap();
        assert_eq!(out.months, 24);
        assert_eq!(out.total, dec!(10600000));
        assert_eq!(out.interest, dec!(600000));
        assert!(out.monthly_deposit.is_none());
    }

    #[test]
    fn test_rate_required() {
        let err = SavingsForm {
            principal: "1,000,000".into(),
            rate: "".into(),
            term: "12".into(),
            ..Default::default()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
        assert_eq!(err.field(), Some("rate"));
    }

    #[test]
    fn test_huge_deposit_is_an_error() {
        let err = calculate_savings(&SavingsInput {
            kind: SavingsKind::Deposit,
            principal: Decimal::MAX,
            annual_rate_percent: dec!(3),
            term: dec!(2),
            term_unit: TermUnit::Years,
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.field(), Some("principal"));

        let err = calculate_savings(&SavingsInput {
            kind: SavingsKind::Installment,
            principal: dec!(1200000),
            annual_rate_percent: dec!(1000000),
            term: dec!(100),
            term_unit: TermUnit::Years,
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
