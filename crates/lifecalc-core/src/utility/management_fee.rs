use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{checked_sum, round_won, CheckedArith, Money};
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

// Approximate per-m2 unit costs, 2026
const GENERAL_PER_M2: Decimal = dec!(300);
const ELEVATOR_PER_M2: Decimal = dec!(200);
const SECURITY_PER_M2: Decimal = dec!(150);
const CLEANING_PER_M2: Decimal = dec!(100);
const LIGHTING_PER_M2: Decimal = dec!(50);
const REPAIRS_PER_M2: Decimal = dec!(100);

/// Contract type of the building. Echoed in the output; the unit costs are
/// the same for both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagementPlan {
    #[default]
    Basic,
    Comprehensive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementFeeInput {
    /// Exclusive floor area in m2
    pub area: Decimal,
    #[serde(default)]
    pub plan: ManagementPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementFeeOutput {
    pub area: Decimal,
    pub plan: ManagementPlan,
    pub general_fee: Money,
    pub elevator_fee: Money,
    pub security_fee: Money,
    pub cleaning_fee: Money,
    pub lighting_fee: Money,
    pub repair_fee: Money,
    pub total: Money,
}

/// Monthly apartment management fee estimate. Each line is rounded to whole
/// won before summing.
pub fn calculate_management_fee(input: &ManagementFeeInput) -> LifeCalcResult<ManagementFeeOutput> {
    validation::require_positive("area", input.area)?;

    let line = |unit_cost: Decimal| input.area.mul_or(unit_cost, "area").map(round_won);
    let general_fee = line(GENERAL_PER_M2)?;
    let elevator_fee = line(ELEVATOR_PER_M2)?;
    let security_fee = line(SECURITY_PER_M2)?;
    let cleaning_fee = line(CLEANING_PER_M2)?;
    let lighting_fee = line(LIGHTING_PER_M2)?;
    let repair_fee = line(REPAIRS_PER_M2)?;
    let total = checked_sum(
        [general_fee, elevator_fee, security_fee, cleaning_fee, lighting_fee, repair_fee],
        "area",
    )?;

    Ok(ManagementFeeOutput {
        area: input.area,
        plan: input.plan,
        general_fee,
        elevator_fee,
        security_fee,
        cleaning_fee,
        lighting_fee,
        repair_fee,
        total,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagementFeeForm {
    pub area: String,
    #[serde(default)]
    pub plan: ManagementPlan,
}

impl ManagementFeeForm {
    pub fn parse(&self) -> LifeCalcResult<ManagementFeeInput> {
        Ok(ManagementFeeInput {
            area: validation::parse_positive("area", &self.area, NumericStyle::Grouped)?,
            plan: self.plan,
        })
    }
}
