use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::tiered::StepSchedule;
use crate::types::CheckedArith;
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

/// Asia-Pacific BMI classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label_ko(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "저체중",
            BmiCategory::Normal => "정상",
            BmiCategory::Overweight => "과체중",
            BmiCategory::Obese => "비만",
        }
    }

    pub fn label_en(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

pub fn category_schedule() -> StepSchedule<BmiCategory> {
    StepSchedule::new(
        BmiCategory::Underweight,
        vec![
            (dec!(18.5), BmiCategory::Normal),
            (dec!(23), BmiCategory::Overweight),
            (dec!(25), BmiCategory::Obese),
        ],
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    pub height_cm: Decimal,
    pub weight_kg: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiOutput {
    /// Rounded to one decimal place
    pub bmi: Decimal,
    pub category: BmiCategory,
}

/// Category is taken from the unrounded index.
pub fn calculate_bmi(input: &BmiInput) -> LifeCalcResult<BmiOutput> {
    validation::require_positive("height", input.height_cm)?;
    validation::require_positive("weight", input.weight_kg)?;

    let metres = input.height_cm / dec!(100);
    let bmi = input
        .weight_kg
        .div_or(metres.mul_or(metres, "height")?, "height")?;

    Ok(BmiOutput {
        bmi: bmi.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        category: category_schedule().lookup(bmi),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmiForm {
    pub height: String,
    pub weight: String,
}

impl BmiForm {
    pub fn parse(&self) -> LifeCalcResult<BmiInput> {
        Ok(BmiInput {
            height_cm: validation::parse_positive("height", &self.height, NumericStyle::Digits)?,
            weight_kg: validation::parse_positive("weight", &self.weight, NumericStyle::Digits)?,
        })
    }
}
