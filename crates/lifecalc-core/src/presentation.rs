//! Rendering of results and errors for a locale.
//!
//! Nothing here feeds back into a computation: the locale only chooses
//! strings and number formatting.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, LifeCalcError};
use crate::types::{round_won, Money};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl FromStr for Locale {
    type Err = LifeCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "ko-kr" => Ok(Locale::Ko),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(LifeCalcError::invalid("locale", format!("Unsupported locale '{other}'"))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ko => write!(f, "ko"),
            Locale::En => write!(f, "en"),
        }
    }
}

/// Formatting configuration passed in at call time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationContext {
    pub locale: Locale,
    /// Appended to every money figure, e.g. "원" or " KRW".
    pub currency_suffix: String,
    pub grouping_separator: char,
}

impl PresentationContext {
    pub fn for_locale(locale: Locale) -> Self {
        let currency_suffix = match locale {
            Locale::Ko => "원",
            Locale::En => " KRW",
        };
        Self {
            locale,
            currency_suffix: currency_suffix.to_string(),
            grouping_separator: ',',
        }
    }
}

impl Default for PresentationContext {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Whole number with grouped digits; halves round away from zero.
pub fn format_number(value: Decimal, ctx: &PresentationContext) -> String {
    let rounded = round_won(value);
    let Some(whole) = rounded.to_i128() else {
        return "0".to_string();
    };
    let grouped = group_digits(&whole.unsigned_abs().to_string(), ctx.grouping_separator);
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_money(amount: Money, ctx: &PresentationContext) -> String {
    format!("{}{}", format_number(amount, ctx), ctx.currency_suffix)
}

fn weekday_label(day: Weekday, locale: Locale) -> &'static str {
    match (locale, day) {
        (Locale::Ko, Weekday::Sun) => "일",
        (Locale::Ko, Weekday::Mon) => "월",
        (Locale::Ko, Weekday::Tue) => "화",
        (Locale::Ko, Weekday::Wed) => "수",
        (Locale::Ko, Weekday::Thu) => "목",
        (Locale::Ko, Weekday::Fri) => "금",
        (Locale::Ko, Weekday::Sat) => "토",
        (Locale::En, Weekday::Sun) => "Sun",
        (Locale::En, Weekday::Mon) => "Mon",
        (Locale::En, Weekday::Tue) => "Tue",
        (Locale::En, Weekday::Wed) => "Wed",
        (Locale::En, Weekday::Thu) => "Thu",
        (Locale::En, Weekday::Fri) => "Fri",
        (Locale::En, Weekday::Sat) => "Sat",
    }
}

pub fn format_date(date: NaiveDate, ctx: &PresentationContext) -> String {
    let weekday = weekday_label(date.weekday(), ctx.locale);
    match ctx.locale {
        Locale::Ko => format!(
            "{}년 {:02}월 {:02}일 ({})",
            date.year(),
            date.month(),
            date.day(),
            weekday
        ),
        Locale::En => format!("{}, {}", weekday, date.format("%b %-d, %Y")),
    }
}

/// Human description of a baby's age in days: days under a week, weeks under
/// a month, months under a year, then years and months.
pub fn describe_days_old(days: i64, ctx: &PresentationContext) -> String {
    let ko = ctx.locale == Locale::Ko;
    if days < 7 {
        return if ko { format!("{days}일째") } else { format!("day {days}") };
    }
    if days < 30 {
        let (weeks, rest) = (days / 7, days % 7);
        return match (ko, rest) {
            (true, 0) => format!("{weeks}주째"),
            (true, _) => format!("{weeks}주 {rest}일째"),
            (false, 0) => format!("{weeks} weeks"),
            (false, _) => format!("{weeks} weeks {rest} days"),
        };
    }

    let d = Decimal::from(days);
    let month = dec!(30.44);
    if days < 365 {
        let months = (d / month).floor();
        let rest = (d % month).floor();
        return match (ko, rest.is_zero()) {
            (true, true) => format!("{months}개월째"),
            (true, false) => format!("{months}개월 {rest}일째"),
            (false, true) => format!("{months} months"),
            (false, false) => format!("{months} months {rest} days"),
        };
    }

    let years = (d / dec!(365.25)).floor();
    let months = ((d % dec!(365.25)) / month).floor();
    match (ko, months.is_zero()) {
        (true, true) => format!("{years}살째"),
        (true, false) => format!("{years}살 {months}개월째"),
        (false, true) => format!("{years} years"),
        (false, false) => format!("{years} years {months} months"),
    }
}

/// User-facing message for a rejected form.
pub fn error_message(err: &LifeCalcError, ctx: &PresentationContext) -> String {
    let field = err.field().unwrap_or("-");
    match (ctx.locale, err.kind()) {
        (Locale::Ko, ErrorKind::EmptyInput) => format!("값을 입력해주세요. ({field})"),
        (Locale::Ko, ErrorKind::NotANumber) => format!("숫자만 입력해주세요. ({field})"),
        (Locale::Ko, ErrorKind::OutOfRange) => format!("올바른 값을 입력해주세요. ({field})"),
        (Locale::Ko, ErrorKind::InvalidDate) => format!("올바른 날짜를 입력해주세요. ({field})"),
        (Locale::Ko, ErrorKind::FutureDate) => format!("미래 날짜는 입력할 수 없습니다. ({field})"),
        (Locale::Ko, ErrorKind::OrderingViolation) => match err {
            LifeCalcError::OrderingViolation { earlier, later } => {
                format!("{earlier} 값이 {later} 값보다 앞서야 합니다.")
            }
            _ => "입력 순서가 올바르지 않습니다.".to_string(),
        },
        (Locale::Ko, _) => "계산 중 오류가 발생했습니다. 다시 시도해주세요.".to_string(),
        (Locale::En, ErrorKind::EmptyInput) => format!("Please enter a value for {field}."),
        (Locale::En, ErrorKind::NotANumber) => format!("{field} must be a number."),
        (Locale::En, ErrorKind::OutOfRange) => format!("Please enter a valid value for {field}."),
        (Locale::En, ErrorKind::InvalidDate) => format!("Please enter a valid date for {field}."),
        (Locale::En, ErrorKind::FutureDate) => format!("{field} cannot be in the future."),
        (Locale::En, ErrorKind::OrderingViolation) => match err {
            LifeCalcError::OrderingViolation { earlier, later } => {
                format!("{earlier} must come before {later}.")
            }
            _ => "Inputs are out of order.".to_string(),
        },
        (Locale::En, _) => "Something went wrong while calculating. Please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ko() -> PresentationContext {
        PresentationContext::for_locale(Locale::Ko)
    }

    fn en() -> PresentationContext {
        PresentationContext::for_locale(Locale::En)
    }

    #[test]
    fn test_money_grouping() {
        assert_eq!(format_money(dec!(65866), &ko()), "65,866원");
        assert_eq!(format_money(dec!(449044.69), &en()), "449,045 KRW");
        assert_eq!(format_money(dec!(999), &ko()), "999원");
        assert_eq!(format_money(dec!(1000000), &ko()), "1,000,000원");
        assert_eq!(format_number(dec!(-1234567.5), &ko()), "-1,234,568");
    }

    #[test]
    fn test_dates() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_date(d, &ko()), "2026년 10월 19일 (월)");
        assert_eq!(format_date(d, &en()), "Mon, Oct 19, 2026");
    }

    #[test]
    fn test_days_old_descriptions() {
        assert_eq!(describe_days_old(3, &ko()), "3일째");
        assert_eq!(describe_days_old(14, &ko()), "2주째");
        assert_eq!(describe_days_old(17, &ko()), "2주 3일째");
        assert_eq!(describe_days_old(100, &ko()), "3개월 8일째");
        assert_eq!(describe_days_old(400, &ko()), "1살 1개월째");
        assert_eq!(describe_days_old(17, &en()), "2 weeks 3 days");
    }

    #[test]
    fn test_error_messages_follow_locale() {
        let err = LifeCalcError::EmptyInput {
            field: "usage".into(),
        };
        assert_eq!(error_message(&err, &ko()), "값을 입력해주세요. (usage)");
        assert_eq!(error_message(&err, &en()), "Please enter a value for usage.");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("KO".parse::<Locale>().unwrap(), Locale::Ko);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}
