use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_won, CheckedArith, Money, Rate};
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

pub const VAT_RATE: Rate = dec!(0.10);

/// Which side of the VAT split the entered amount is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatBasis {
    /// Amount excludes VAT
    #[default]
    Supply,
    /// Amount already includes VAT
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatInput {
    pub amount: Money,
    #[serde(default)]
    pub basis: VatBasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatOutput {
    pub supply_price: Money,
    pub vat: Money,
    pub total_price: Money,
}

pub fn calculate_vat(input: &VatInput) -> LifeCalcResult<VatOutput> {
    validation::require_positive("amount", input.amount)?;

    let (supply, vat, total) = match input.basis {
        VatBasis::Supply => {
            let vat = input.amount * VAT_RATE;
            (input.amount, vat, input.amount.add_or(vat, "amount")?)
        }
        VatBasis::Total => {
            let supply = input.amount / (Decimal::ONE + VAT_RATE);
            (supply, input.amount - supply, input.amount)
        }
    };

    Ok(VatOutput {
        supply_price: round_won(supply),
        vat: round_won(vat),
        total_price: round_won(total),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VatForm {
    pub amount: String,
    #[serde(default)]
    pub basis: VatBasis,
}

impl VatForm {
    pub fn parse(&self) -> LifeCalcResult<VatInput> {
        Ok(VatInput {
            amount: validation::parse_positive("amount", &self.amount, NumericStyle::Grouped)?,
            basis: self.basis,
        })
    }
}
