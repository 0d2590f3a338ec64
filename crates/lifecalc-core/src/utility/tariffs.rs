use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::tiered::{self, RateTable, RateTier, Surcharge, TieredCharge};
use crate::types::Quantity;
use crate::validation::{self, NumericStyle};
use crate::LifeCalcResult;

// ---------------------------------------------------------------------------
// Built-in schedules
// ---------------------------------------------------------------------------

fn vat() -> Surcharge {
    Surcharge {
        name: "vat".into(),
        rate: dec!(0.10),
    }
}

/// Residential low-voltage electricity, 2024.
pub fn electric_residential_2024() -> RateTable {
    RateTable {
        name: "electric_residential_low_voltage".into(),
        schedule: "2024".into(),
        unit: "kWh".into(),
        tiers: vec![
            RateTier::bounded(dec!(200), dec!(120.7), dec!(910)),
            RateTier::bounded(dec!(400), dec!(214.6), dec!(1600)),
            RateTier::unbounded(dec!(307.3), dec!(7300)),
        ],
        surcharges: vec![
            vat(),
            Surcharge {
                name: "power_industry_fund".into(),
                rate: dec!(0.037),
            },
        ],
    }
}

/// Residential city gas, 2024.
pub fn gas_residential_2024() -> RateTable {
    RateTable {
        name: "gas_residential".into(),
        schedule: "2024".into(),
        unit: "m3".into(),
        tiers: vec![
            RateTier::bounded(dec!(20), dec!(730), dec!(1200)),
            RateTier::bounded(dec!(100), dec!(850), dec!(2400)),
            RateTier::bounded(dec!(500), dec!(1020), dec!(4800)),
            RateTier::unbounded(dec!(1200), dec!(9600)),
        ],
        surcharges: vec![vat()],
    }
}

/// Residential water supply, 2026.
pub fn water_residential_2026() -> RateTable {
    RateTable {
        name: "water_residential".into(),
        schedule: "2026".into(),
        unit: "m3".into(),
        tiers: vec![
            RateTier::bounded(dec!(20), dec!(330), dec!(1000)),
            RateTier::bounded(dec!(50), dec!(550), dec!(1500)),
            RateTier::bounded(dec!(100), dec!(880), dec!(2000)),
            RateTier::bounded(dec!(200), dec!(1210), dec!(3000)),
            RateTier::unbounded(dec!(1650), dec!(4000)),
        ],
        surcharges: vec![vat()],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Utility {
    Electric,
    Gas,
    Water,
}

impl Utility {
    /// The schedule used when the caller does not supply one.
    pub fn default_table(self) -> RateTable {
        match self {
            Utility::Electric => electric_residential_2024(),
            Utility::Gas => gas_residential_2024(),
            Utility::Water => water_residential_2026(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Utility::Electric => "electric",
            Utility::Gas => "gas",
            Utility::Water => "water",
        }
    }
}

// ---------------------------------------------------------------------------
// Bill calculation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityBillInput {
    pub utility: Utility,
    pub usage: Quantity,
    /// Replaces the built-in schedule, e.g. a newer tariff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<RateTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityBillOutput {
    pub utility: Utility,
    pub schedule: String,
    pub unit: String,
    #[serde(flatten)]
    pub charge: TieredCharge,
}

/// Monthly bill for a metered usage. Usage must be positive.
pub fn calculate_bill(input: &UtilityBillInput) -> LifeCalcResult<UtilityBillOutput> {
    validation::require_positive("usage", input.usage)?;

    let table = match &input.table {
        Some(t) => t.clone(),
        None => input.utility.default_table(),
    };
    let charge =
        tiered::resolve(input.usage, &table).map_err(|e| e.renamed("quantity", "usage"))?;

    Ok(UtilityBillOutput {
        utility: input.utility,
        schedule: table.schedule,
        unit: table.unit,
        charge,
    })
}

/// Raw form for the electricity, gas and water calculators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityForm {
    pub usage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<RateTable>,
}

impl UtilityForm {
    pub fn parse(&self, utility: Utility) -> LifeCalcResult<UtilityBillInput> {
        let usage = validation::parse_positive("usage", &self.usage, NumericStyle::Grouped)?;
        if let Some(table) = &self.table {
            table.validate()?;
        }
        Ok(UtilityBillInput {
            utility,
            usage,
            table: self.table.clone(),
        })
    }
}

/// Bill total for `usage` under the built-in schedule, without the breakdown.
pub fn bill_total(utility: Utility, usage: Quantity) -> LifeCalcResult<Decimal> {
    let output = calculate_bill(&UtilityBillInput {
        utility,
        usage,
        table: None,
    })?;
    Ok(output.charge.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_builtin_tables_are_valid() {
        for utility in [Utility::Electric, Utility::Gas, Utility::Water] {
            assert!(utility.default_table().validate().is_ok(), "{utility:?}");
        }
    }

    #[test]
    fn test_electric_350_kwh() {
        assert_eq!(bill_total(Utility::Electric, dec!(350)).unwrap(), dec!(65866));
    }

    #[test]
    fn test_electric_top_tier() {
        // 200*120.7 + 200*214.6 + 100*307.3 = 97790, fee 7300
        let out = calculate_bill(&UtilityBillInput {
            utility: Utility::Electric,
            usage: dec!(500),
            table: None,
        })
        .unwrap();
        assert_eq!(out.charge.usage_charge, dec!(97790));
        assert_eq!(out.charge.basic_charge, dec!(7300));
        // floor(105090 * 0.1) + floor(105090 * 0.037)
        assert_eq!(out.charge.surcharges[0].amount, dec!(10509));
        assert_eq!(out.charge.surcharges[1].amount, dec!(3888));
        assert_eq!(out.charge.total, dec!(119487));
    }

    #[test]
    fn test_gas_third_tier() {
        // 20*730 + 80*850 + 50*1020 = 133600, fee 4800, vat floor(13840)
        let out = calculate_bill(&UtilityBillInput {
            utility: Utility::Gas,
            usage: dec!(150),
            table: None,
        })
        .unwrap();
        assert_eq!(out.charge.usage_charge, dec!(133600));
        assert_eq!(out.charge.basic_charge, dec!(4800));
        assert_eq!(out.charge.total, dec!(152240));
        assert_eq!(out.unit, "m3");
    }

    #[test]
    fn test_water_first_tier_fractional_usage() {
        // 12.5 * 330 = 4125, fee 1000, vat floor(512.5) = 512
        let total = bill_total(Utility::Water, dec!(12.5)).unwrap();
        assert_eq!(total, dec!(5637));
    }

    #[test]
    fn test_zero_usage_rejected_at_gate() {
        let err = UtilityForm {
            usage: "0".into(),
            table: None,
        }
        .parse(Utility::Gas)
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_form_with_custom_table() {
        let mut table = electric_residential_2024();
        table.schedule = "2025".into();
        table.surcharges.clear();
        let input = UtilityForm {
            usage: "1,00".into(),
            table: Some(table),
        }
        .parse(Utility::Electric)
        .unwrap();
        let out = calculate_bill(&input).unwrap();
        assert_eq!(out.schedule, "2025");
        assert_eq!(out.charge.total, dec!(910) + dec!(12070));
    }

    #[test]
    fn test_overflowing_usage_reports_usage_field() {
        let usage = Decimal::from_scientific("1e27").unwrap();
        let err = bill_total(Utility::Electric, usage).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.field(), Some("usage"));
    }
}
