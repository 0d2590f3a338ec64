use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_won, CheckedArith, Money};
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

const DAILY_HOURS: Decimal = dec!(8);
const OVERTIME_PREMIUM: Decimal = dec!(1.5);
const SCHEDULED_WORKDAYS_PER_WEEK: Decimal = dec!(5);
const DEFAULT_WEEKLY_HOURS: Decimal = dec!(40);
/// 261 workdays a year over 12 months
const SCHEDULED_WORKDAYS_PER_MONTH: Decimal = dec!(20.92);

// ---------------------------------------------------------------------------
// Overtime
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeInput {
    pub daily_wage: Money,
    pub overtime_hours: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeOutput {
    pub hourly_wage: Money,
    pub overtime_pay: Money,
}

/// Overtime pay at 150% of the hourly wage, with an 8-hour working day.
pub fn calculate_overtime(input: &OvertimeInput) -> LifeCalcResult<OvertimeOutput> {
    validation::require_positive("daily_wage", input.daily_wage)?;
    validation::require_positive("overtime_hours", input.overtime_hours)?;

    let hourly = input.daily_wage / DAILY_HOURS;
    Ok(OvertimeOutput {
        hourly_wage: round_won(hourly),
        overtime_pay: round_won(
            hourly
                .mul_or(OVERTIME_PREMIUM, "daily_wage")?
                .mul_or(input.overtime_hours, "overtime_hours")?,
        ),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimeForm {
    pub daily_wage: String,
    pub overtime_hours: String,
}

impl OvertimeForm {
    pub fn parse(&self) -> LifeCalcResult<OvertimeInput> {
        Ok(OvertimeInput {
            daily_wage: validation::parse_positive("daily_wage", &self.daily_wage, NumericStyle::Grouped)?,
            overtime_hours: validation::parse_positive(
                "overtime_hours",
                &self.overtime_hours,
                NumericStyle::Digits,
            )?,
        })
    }
}

// ---------------------------------------------------------------------------
// Weekly paid holiday allowance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRestInput {
    pub weekly_hours: Decimal,
    pub daily_wage: Money,
    pub days_worked: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRestOutput {
    pub weekly_hours: Decimal,
    pub weekly_rest_pay: Money,
}

/// One day's pay pro-rated by days actually worked over a five-day week.
pub fn calculate_weekly_rest(input: &WeeklyRestInput) -> LifeCalcResult<WeeklyRestOutput> {
    validation::require_positive("daily_wage", input.daily_wage)?;
    validation::require_positive("days_worked", input.days_worked)?;

    Ok(WeeklyRestOutput {
        weekly_hours: input.weekly_hours,
        weekly_rest_pay: round_won(
            input
                .daily_wage
                .mul_or(input.days_worked, "days_worked")?
                / SCHEDULED_WORKDAYS_PER_WEEK,
        ),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyRestForm {
    /// Blank means the standard 40-hour week
    #[serde(default)]
    pub weekly_hours: String,
    pub daily_wage: String,
    pub days_worked: String,
}

impl WeeklyRestForm {
    pub fn parse(&self) -> LifeCalcResult<WeeklyRestInput> {
        let weekly_hours = validation::parse_optional(
            "weekly_hours",
            &self.weekly_hours,
            NumericStyle::Digits,
            DEFAULT_WEEKLY_HOURS,
        )?;
        Ok(WeeklyRestInput {
            weekly_hours: if weekly_hours.is_zero() {
                DEFAULT_WEEKLY_HOURS
            } else {
                weekly_hours
            },
            daily_wage: validation::parse_positive("daily_wage", &self.daily_wage, NumericStyle::Grouped)?,
            days_worked: validation::parse_positive(
                "days_worked",
                &self.days_worked,
                NumericStyle::Digits,
            )?,
        })
    }
}

// ---------------------------------------------------------------------------
// Unused annual leave
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualLeaveInput {
    pub monthly_salary: Money,
    pub unused_days: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualLeaveOutput {
    pub daily_wage: Money,
    pub annual_leave_pay: Money,
}

/// Payout for unused annual leave at the average scheduled daily wage.
pub fn calculate_annual_leave(input: &AnnualLeaveInput) -> LifeCalcResult<AnnualLeaveOutput> {
    validation::require_positive("monthly_salary", input.monthly_salary)?;
    validation::require_positive("unused_days", input.unused_days)?;

    let daily = input.monthly_salary / SCHEDULED_WORKDAYS_PER_MONTH;
    Ok(AnnualLeaveOutput {
        daily_wage: round_won(daily),
        annual_leave_pay: round_won(daily.mul_or(input.unused_days, "unused_days")?),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnualLeaveForm {
    pub monthly_salary: String,
    pub unused_days: String,
}

impl AnnualLeaveForm {
    pub fn parse(&self) -> LifeCalcResult<AnnualLeaveInput> {
        Ok(AnnualLeaveInput {
            monthly_salary: validation::parse_positive(
                "monthly_salary",
                &self.monthly_salary,
                NumericStyle::Grouped,
            )?,
            unused_days: validation::parse_positive(
                "unused_days",
                &self.unused_days,
                NumericStyle::Digits,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_overtime() {
        let out = calculate_overtime(&OvertimeInput {
            daily_wage: dec!(96000),
            overtime_hours: dec!(3),
        })
        .unwrap();
        assert_eq!(out.hourly_wage, dec!(12000));
        assert_eq!(out.overtime_pay, dec!(54000));
    }

    #[test]
    fn test_weekly_rest_defaults_to_40_hours() {
        let input = WeeklyRestForm {
            weekly_hours: String::new(),
            daily_wage: "80,000".into(),
            days_worked: "4".into(),
        }
        .parse()
        .unwrap();
        assert_eq!(input.weekly_hours, dec!(40));
        let out = calculate_weekly_rest(&input).unwrap();
        assert_eq!(out.weekly_rest_pay, dec!(64000));
    }

    #[test]
    fn test_annual_leave() {
        let out = calculate_annual_leave(&AnnualLeaveInput {
            monthly_salary: dec!(2092000),
            unused_days: dec!(5),
        })
        .unwrap();
        assert_eq!(out.daily_wage, dec!(100000));
        assert_eq!(out.annual_leave_pay, dec!(500000));
    }

    #[test]
    fn test_zero_hours_rejected() {
        let err = OvertimeForm {
            daily_wage: "100000".into(),
            overtime_hours: "0".into(),
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_huge_multipliers_are_errors() {
        let err = calculate_overtime(&OvertimeInput {
            daily_wage: Decimal::MAX,
            overtime_hours: dec!(1000),
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = calculate_weekly_rest(&WeeklyRestInput {
            weekly_hours: dec!(40),
            daily_wage: Decimal::MAX,
            days_worked: dec!(5),
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("days_worked"));

        let err = calculate_annual_leave(&AnnualLeaveInput {
            monthly_salary: dec!(1000000),
            unused_days: Decimal::MAX,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("unused_days"));
    }
}
