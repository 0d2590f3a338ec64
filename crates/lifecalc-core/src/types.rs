use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::LifeCalcError;
use crate::LifeCalcResult;

/// All monetary values, in won. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Metered consumption (kWh, m3) or any other non-monetary amount.
pub type Quantity = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    /// Key figure rendered for the requesting locale
    pub headline: String,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    headline: String,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        headline,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Round to whole won, halves away from zero.
pub fn round_won(value: Decimal) -> Money {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Decimal arithmetic that reports overflow as `InvalidInput` on `field`
/// instead of panicking. Every gate accepts amounts up to the decimal
/// maximum, so calculators combine inputs through these.
pub trait CheckedArith: Sized {
    fn mul_or(self, rhs: Decimal, field: &str) -> LifeCalcResult<Decimal>;
    fn div_or(self, rhs: Decimal, field: &str) -> LifeCalcResult<Decimal>;
    fn add_or(self, rhs: Decimal, field: &str) -> LifeCalcResult<Decimal>;
    fn sub_or(self, rhs: Decimal, field: &str) -> LifeCalcResult<Decimal>;
}

impl CheckedArith for Decimal {
    fn mul_or(self, rhs: Decimal, field: &str) -> LifeCalcResult<Decimal> {
        self.checked_mul(rhs).ok_or_else(|| LifeCalcError::overflow(field))
    }

    /// Division by zero is reported the same way as overflow.
    fn div_or(self, rhs: Decimal, field: &str) -> LifeCalcResult<Decimal> {
        self.checked_div(rhs).ok_or_else(|| LifeCalcError::overflow(field))
    }

    fn add_or(self, rhs: Decimal, field: &str) -> LifeCalcResult<Decimal> {
        self.checked_add(rhs).ok_or_else(|| LifeCalcError::overflow(field))
    }

    fn sub_or(self, rhs: Decimal, field: &str) -> LifeCalcResult<Decimal> {
        self.checked_sub(rhs).ok_or_else(|| LifeCalcError::overflow(field))
    }
}

/// Checked sum of a column of figures.
pub fn checked_sum<I>(values: I, field: &str) -> LifeCalcResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.add_or(v, field))
}
