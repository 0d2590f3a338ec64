use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LifeCalcError;
use crate::types::{CheckedArith, Money};
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

/// Days of average wage paid per year of service.
const DAYS_PER_SERVICE_YEAR: Decimal = dec!(30);
const DAYS_PER_YEAR: Decimal = dec!(365);

/// How the average daily wage is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WageBasis {
    /// Already computed by the caller
    DailyAverage { daily_wage: Money },
    /// Wages paid over a reference window (normally the last three months)
    /// and the calendar days in that window
    ReferenceWindow { wage_total: Money, days: u32 },
}

/// Length of continuous service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServicePeriod {
    Years { years: Decimal },
    Days { days: u32 },
    Dates { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeveranceInput {
    pub wage: WageBasis,
    pub service: ServicePeriod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeveranceOutput {
    pub average_daily_wage: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_days: Option<u32>,
    pub service_years: Decimal,
    /// Unrounded; the presentation layer rounds for display
    pub severance_pay: Money,
}

/// Total wages over the reference window divided by its calendar days.
pub fn average_daily_wage(wage_total: Money, days: u32) -> LifeCalcResult<Money> {
    validation::require_positive("wage_total", wage_total)?;
    if days == 0 {
        return Err(LifeCalcError::out_of_range(
            "wage_days",
            "Reference window must span at least one day",
        ));
    }
    Ok(wage_total / Decimal::from(days))
}

/// Average daily wage * 30 days * years of service.
pub fn severance_pay(daily_wage: Money, service_years: Decimal) -> LifeCalcResult<Money> {
    daily_wage
        .mul_or(DAYS_PER_SERVICE_YEAR, "daily_wage")?
        .mul_or(service_years, "service")
}

fn resolve_service(service: &ServicePeriod) -> LifeCalcResult<(Option<u32>, Decimal)> {
    let (days, years) = match service {
        ServicePeriod::Years { years } => (None, *years),
        ServicePeriod::Days { days } => (Some(*days), Decimal::from(*days) / DAYS_PER_YEAR),
        ServicePeriod::Dates { start, end } => {
            validation::require_ordered("start_date", *start, "end_date", *end)?;
            let days = u32::try_from((*end - *start).num_days()).map_err(|_| {
                LifeCalcError::out_of_range("end_date", "Service period is too long")
            })?;
            (Some(days), Decimal::from(days) / DAYS_PER_YEAR)
        }
    };
    validation::require_positive("service", years)?;
    Ok((days, years))
}

pub fn calculate_severance(input: &SeveranceInput) -> LifeCalcResult<SeveranceOutput> {
    let daily = match &input.wage {
        WageBasis::DailyAverage { daily_wage } => {
            validation::require_positive("daily_wage", *daily_wage)?;
            *daily_wage
        }
        WageBasis::ReferenceWindow { wage_total, days } => average_daily_wage(*wage_total, *days)?,
    };
    let (service_days, service_years) = resolve_service(&input.service)?;

    Ok(SeveranceOutput {
        average_daily_wage: daily,
        service_days,
        service_years,
        severance_pay: severance_pay(daily, service_years)?,
    })
}

/// Raw severance form. The wage is either a daily average or a reference
/// window total with its day count; service is a date pair, a day count or
/// a number of years, checked in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeveranceForm {
    pub daily_wage: String,
    pub wage_total: String,
    pub wage_days: String,
    pub years: String,
    pub service_days: String,
    pub start_date: String,
    pub end_date: String,
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl SeveranceForm {
    pub fn parse(&self) -> LifeCalcResult<SeveranceInput> {
        let wage = if !is_blank(&self.daily_wage) {
            WageBasis::DailyAverage {
                daily_wage: validation::parse_positive(
                    "daily_wage",
                    &self.daily_wage,
                    NumericStyle::Grouped,
                )?,
            }
        } else if !is_blank(&self.wage_total) {
            WageBasis::ReferenceWindow {
                wage_total: validation::parse_positive(
                    "wage_total",
                    &self.wage_total,
                    NumericStyle::Grouped,
                )?,
                days: validation::parse_whole("wage_days", &self.wage_days)?,
            }
        } else {
            return Err(LifeCalcError::EmptyInput {
                field: "daily_wage".into(),
            });
        };

        let service = if !is_blank(&self.start_date) || !is_blank(&self.end_date) {
            let start = validation::parse_date("start_date", &self.start_date)?;
            let end = validation::parse_date("end_date", &self.end_date)?;
            validation::require_ordered("start_date", start, "end_date", end)?;
            ServicePeriod::Dates { start, end }
        } else if !is_blank(&self.service_days) {
            ServicePeriod::Days {
                days: validation::parse_whole("service_days", &self.service_days)?,
            }
        } else {
            ServicePeriod::Years {
                years: validation::parse_positive("years", &self.years, NumericStyle::Digits)?,
            }
        };

        Ok(SeveranceInput { wage, service })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_reference_window_composition() {
        let out = calculate_severance(&SeveranceInput {
            wage: WageBasis::ReferenceWindow {
                wage_total: dec!(9000000),
                days: 90,
            },
            service: ServicePeriod::Days { days: 730 },
        })
        .unwrap();
        assert_eq!(out.average_daily_wage, dec!(100000));
        assert_eq!(out.service_years, dec!(2));
        assert_eq!(out.severance_pay, dec!(6000000));
    }

    #[test]
    fn test_daily_wage_and_years() {
        let out = calculate_severance(&SeveranceInput {
            wage: WageBasis::DailyAverage {
                daily_wage: dec!(120000),
            },
            service: ServicePeriod::Years { years: dec!(3.5) },
        })
        .unwrap();
        assert_eq!(out.severance_pay, dec!(12600000));
        assert_eq!(out.service_days, None);
    }

    #[test]
    fn test_service_dates_must_be_ordered() {
        let form = SeveranceForm {
            daily_wage: "100,000".into(),
            start_date: "2024-05-01".into(),
            end_date: "2023-05-01".into(),
            ..Default::default()
        };
        assert_eq!(form.parse().unwrap_err().kind(), ErrorKind::OrderingViolation);
    }

    #[test]
    fn test_service_dates_count_days() {
        let input = SeveranceForm {
            daily_wage: "100000".into(),
            start_date: "2023-01-01".into(),
            end_date: "2024-01-01".into(),
            ..Default::default()
        }
        .parse()
        .unwrap();
        let out = calculate_severance(&input).unwrap();
        assert_eq!(out.service_days, Some(365));
        assert_eq!(out.severance_pay, dec!(3000000));
    }

    #[test]
    fn test_missing_wage() {
        let form = SeveranceForm {
            years: "2".into(),
            ..Default::default()
        };
        assert_eq!(form.parse().unwrap_err().kind(), ErrorKind::EmptyInput);
    }

    #[test]
    fn test_zero_day_window_rejected() {
        assert_eq!(
            average_daily_wage(dec!(9000000), 0).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_huge_wage_is_an_error() {
        let err = calculate_severance(&SeveranceInput {
            wage: WageBasis::DailyAverage {
                daily_wage: Decimal::MAX,
            },
            service: ServicePeriod::Years { years: dec!(10) },
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.field(), Some("daily_wage"));
    }
}
