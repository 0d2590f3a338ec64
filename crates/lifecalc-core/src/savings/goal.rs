use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{self, TermUnit};
use crate::error::LifeCalcError;
use crate::types::{round_won, CheckedArith, Money, Rate};
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

use super::deposits::installment_future_value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSavingsInput {
    pub goal: Money,
    #[serde(default)]
    pub current_balance: Money,
    /// May be zero
    pub annual_rate_percent: Rate,
    pub term: Decimal,
    #[serde(default = "default_term_unit")]
    pub term_unit: TermUnit,
}

fn default_term_unit() -> TermUnit {
    TermUnit::Years
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSavingsOutput {
    pub months: u32,
    pub monthly_contribution: Money,
    /// Contributions plus the starting balance
    pub total_contributed: Money,
    pub interest_earned: Money,
}

/// Monthly contribution that grows `current_balance` into `goal`, both
/// compounding monthly. Zero when the balance alone reaches the goal.
pub fn calculate_goal_savings(input: &GoalSavingsInput) -> LifeCalcResult<GoalSavingsOutput> {
    validation::require_positive("goal", input.goal)?;
    if input.current_balance < Decimal::ZERO {
        return Err(LifeCalcError::out_of_range("current_balance", "must not be negative"));
    }
    if input.annual_rate_percent < Decimal::ZERO {
        return Err(LifeCalcError::out_of_range("rate", "must not be negative"));
    }
    if input.goal <= input.current_balance {
        return Err(LifeCalcError::OrderingViolation {
            earlier: "current_balance".into(),
            later: "goal".into(),
        });
    }
    let months = amortization::periods_from_term("term", input.term, input.term_unit)?;
    let n = Decimal::from(months);
    let monthly_rate = input.annual_rate_percent / dec!(100) / dec!(12);

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(months))
        .ok_or_else(|| LifeCalcError::overflow("term"))?;
    let grown_balance = input.current_balance.mul_or(growth, "current_balance")?;

    let contribution = if monthly_rate.is_zero() {
        (input.goal - input.current_balance) / n
    } else {
        let remaining = input.goal - grown_balance;
        if remaining <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            remaining
                .mul_or(monthly_rate, "rate")?
                .div_or(growth - Decimal::ONE, "rate")?
        }
    };

    let total_contributed = contribution
        .mul_or(n, "goal")?
        .add_or(input.current_balance, "goal")?;
    let final_value = grown_balance.add_or(
        installment_future_value(contribution, monthly_rate, months)?,
        "goal",
    )?;

    Ok(GoalSavingsOutput {
        months,
        monthly_contribution: round_won(contribution),
        total_contributed: round_won(total_contributed),
        interest_earned: round_won(final_value.sub_or(total_contributed, "goal")?),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalSavingsForm {
    pub goal: String,
    #[serde(default)]
    pub current_balance: String,
    pub rate: String,
    pub term: String,
    #[serde(default = "default_term_unit")]
    pub term_unit: TermUnit,
}

impl Default for GoalSavingsForm {
    fn default() -> Self {
        Self {
            goal: String::new(),
            current_balance: String::new(),
            rate: String::new(),
            term: String::new(),
            term_unit: default_term_unit(),
        }
    }
}

impl GoalSavingsForm {
    pub fn parse(&self) -> LifeCalcResult<GoalSavingsInput> {
        let goal = validation::parse_positive("goal", &self.goal, NumericStyle::Grouped)?;
        let current_balance = validation::parse_optional(
            "current_balance",
            &self.current_balance,
            NumericStyle::Grouped,
            Decimal::ZERO,
        )?;
        if current_balance < Decimal::ZERO {
            return Err(LifeCalcError::out_of_range("current_balance", "must not be negative"));
        }
        Ok(GoalSavingsInput {
            goal,
            current_balance,
            annual_rate_percent: validation::parse_non_negative("rate", &self.rate, NumericStyle::Digits)?,
            term: validation::parse_positive("term", &self.term, NumericStyle::Digits)?,
            term_unit: self.term_unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn goal(goal: Decimal, current: Decimal, rate: Decimal, months: u32) -> GoalSavingsOutput {
        calculate_goal_savings(&GoalSavingsInput {
            goal,
            current_balance: current,
            annual_rate_percent: rate,
            term: Decimal::from(months),
            term_unit: TermUnit::Months,
        })
        .unwrap()
    }

    #[test]
    fn test_ten_million_in_a_year() {
        let out = goal(dec!(10000000), Decimal::ZERO, dec!(3), 12);
        assert_eq!(out.monthly_contribution, dec!(821937));
        assert_eq!(out.total_contributed, dec!(9863244));
        assert_eq!(out.interest_earned, dec!(136756));
    }

    #[test]
    fn test_existing_balance_compounds() {
        let out = goal(dec!(10000000), dec!(2000000), dec!(3), 24);
        assert_eq!(out.monthly_contribution, dec!(318850));
        assert_eq!(out.total_contributed, dec!(9652393));
        assert_eq!(out.interest_earned, dec!(347607));
    }

    #[test]
    fn test_zero_rate_is_a_straight_split() {
        let out = goal(dec!(12000000), dec!(0), Decimal::ZERO, 12);
        assert_eq!(out.monthly_contribution, dec!(1000000));
        assert_eq!(out.interest_earned, Decimal::ZERO);
    }

    #[test]
    fn test_goal_must_exceed_balance() {
        let err = calculate_goal_savings(&GoalSavingsInput {
            goal: dec!(5000000),
            current_balance: dec!(5000000),
            annual_rate_percent: dec!(3),
            term: dec!(1),
            term_unit: TermUnit::Years,
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OrderingViolation);
        assert_eq!(err.field(), Some("goal"));
    }

    #[test]
    fn test_blank_balance_defaults_to_zero() {
        let input = GoalSavingsForm {
            goal: "10,000,000".into(),
            rate: "0".into(),
            term: "1".into(),
            ..Default::default()
        }
        .parse()
        .unwrap();
        assert_eq!(input.current_balance, Decimal::ZERO);
        assert_eq!(input.term_unit, TermUnit::Years);
    }

    #[test]
    fn test_balance_growth_overflow_is_an_error() {
        let err = calculate_goal_savings(&GoalSavingsInput {
            goal: Decimal::MAX,
            current_balance: dec!(70000000000000000000000000000),
            annual_rate_percent: dec!(12),
            term: dec!(10),
            term_unit: TermUnit::Years,
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.field(), Some("current_balance"));
    }
}
