use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::tiered::{self, RateTable, RateTier};
use crate::types::{round_won, CheckedArith, Money, Rate};
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

/// Local income tax as a share of national income tax.
pub const LOCAL_TAX_RATE: Rate = dec!(0.10);

/// Comprehensive income tax brackets, 2026. Bracket rates are marginal, so
/// the tiered resolver reproduces the statutory progressive deduction table.
pub fn income_tax_2026() -> RateTable {
    RateTable {
        name: "comprehensive_income_tax".into(),
        schedule: "2026".into(),
        unit: "KRW".into(),
        tiers: vec![
            RateTier::bounded(dec!(12000000), dec!(0.06), Decimal::ZERO),
            RateTier::bounded(dec!(46000000), dec!(0.15), Decimal::ZERO),
            RateTier::bounded(dec!(88000000), dec!(0.24), Decimal::ZERO),
            RateTier::bounded(dec!(150000000), dec!(0.35), Decimal::ZERO),
            RateTier::bounded(dec!(300000000), dec!(0.38), Decimal::ZERO),
            RateTier::bounded(dec!(500000000), dec!(0.40), Decimal::ZERO),
            RateTier::unbounded(dec!(0.42), Decimal::ZERO),
        ],
        surcharges: Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxInput {
    pub annual_income: Money,
    #[serde(default)]
    pub deductions: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxOutput {
    pub taxable_income: Money,
    /// Highest marginal rate reached
    pub marginal_rate: Rate,
    pub income_tax: Money,
    pub local_tax: Money,
    pub total_tax: Money,
    pub effective_rate: Rate,
}

/// Income tax and local income tax on `annual_income - deductions`.
/// Each figure is rounded to whole won after computing the exact amounts.
pub fn calculate_income_tax(input: &IncomeTaxInput) -> LifeCalcResult<IncomeTaxOutput> {
    validation::require_positive("annual_income", input.annual_income)?;

    let table = income_tax_2026();
    let taxable = input
        .annual_income
        .sub_or(input.deductions, "deductions")?
        .max(Decimal::ZERO);
    let income_tax = tiered::usage_charge(taxable, &table)
        .map_err(|e| e.renamed("quantity", "annual_income"))?
        .max(Decimal::ZERO);
    let local_tax = income_tax * LOCAL_TAX_RATE;
    let total_tax = income_tax + local_tax;
    let marginal_rate = table.tiers[table.tier_index(taxable)].marginal_rate;

    Ok(IncomeTaxOutput {
        taxable_income: round_won(taxable),
        marginal_rate,
        income_tax: round_won(income_tax),
        local_tax: round_won(local_tax),
        total_tax: round_won(total_tax),
        effective_rate: (total_tax / input.annual_income).round_dp(4),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeTaxForm {
    pub annual_income: String,
    #[serde(default)]
    pub deductions: String,
}

impl IncomeTaxForm {
    pub fn parse(&self) -> LifeCalcResult<IncomeTaxInput> {
        Ok(IncomeTaxInput {
            annual_income: validation::parse_positive(
                "annual_income",
                &self.annual_income,
                NumericStyle::Grouped,
            )?,
            deductions: validation::parse_optional(
                "deductions",
                &self.deductions,
                NumericStyle::Grouped,
                Decimal::ZERO,
            )?,
        })
    }
}
