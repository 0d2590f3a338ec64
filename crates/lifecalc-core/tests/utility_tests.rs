#![cfg(all(feature = "utility", feature = "tax"))]

use lifecalc_core::tax::income_tax::{self, IncomeTaxInput};
use lifecalc_core::tiered::{self, RateTable, SurchargeLine, TierSlice};
use lifecalc_core::utility::management_fee::{self, ManagementFeeForm};
use lifecalc_core::utility::tariffs::{self, Utility, UtilityForm};
use lifecalc_core::ErrorKind;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Tiered tariffs
// ===========================================================================

#[test]
fn test_electric_350_kwh_breakdown() {
    let input = UtilityForm {
        usage: "350".into(),
        table: None,
    }
    .parse(Utility::Electric)
    .unwrap();
    let bill = tariffs::calculate_bill(&input).unwrap();

    assert_eq!(bill.schedule, "2024");
    assert_eq!(bill.unit, "kWh");
    assert_eq!(bill.charge.tier_index, 1);
    assert_eq!(
        bill.charge.breakdown,
        vec![
            TierSlice {
                tier: 0,
                upper_bound: Some(dec!(200)),
                quantity: dec!(200),
                marginal_rate: dec!(120.7),
                charge: dec!(24140),
            },
            TierSlice {
                tier: 1,
                upper_bound: Some(dec!(400)),
                quantity: dec!(150),
                marginal_rate: dec!(214.6),
                charge: dec!(32190),
            },
        ]
    );
    assert_eq!(bill.charge.basic_charge, dec!(1600));
    assert_eq!(bill.charge.subtotal, dec!(57930));
    assert_eq!(
        bill.charge.surcharges,
        vec![
            SurchargeLine {
                name: "vat".into(),
                rate: dec!(0.10),
                amount: dec!(5793),
            },
            SurchargeLine {
                name: "power_industry_fund".into(),
                rate: dec!(0.037),
                amount: dec!(2143),
            },
        ]
    );
    assert_eq!(bill.charge.total, dec!(65866));
}

#[test]
fn test_tier_boundary_and_one_unit_over() {
    let at = tariffs::calculate_bill(&tariffs::UtilityBillInput {
        utility: Utility::Electric,
        usage: dec!(200),
        table: None,
    })
    .unwrap();
    let over = tariffs::calculate_bill(&tariffs::UtilityBillInput {
        utility: Utility::Electric,
        usage: dec!(201),
        table: None,
    })
    .unwrap();
    assert_eq!(at.charge.basic_charge, dec!(910));
    assert_eq!(over.charge.basic_charge, dec!(1600));
    assert!(over.charge.total > at.charge.total);
}

#[test]
fn test_every_builtin_table_bills_monotonically() {
    for utility in [Utility::Electric, Utility::Gas, Utility::Water] {
        let mut last = Decimal::ZERO;
        for usage in (1..=600).step_by(7) {
            let total = tariffs::bill_total(utility, Decimal::from(usage)).unwrap();
            assert!(
                total >= last,
                "{} bill fell from {last} to {total} at {usage}",
                utility.label()
            );
            last = total;
        }
    }
}

#[test]
fn test_custom_table_from_json() {
    let json = r#"{
        "name": "electric_residential_low_voltage",
        "schedule": "2025-summer",
        "unit": "kWh",
        "tiers": [
            { "upper_bound": "300", "marginal_rate": "120", "basic_charge": "910" },
            { "upper_bound": "450", "marginal_rate": "214.6", "basic_charge": "1600" },
            { "marginal_rate": "307.3", "basic_charge": "7300" }
        ],
        "surcharges": [ { "name": "vat", "rate": "0.1" } ]
    }"#;
    let table: RateTable = serde_json::from_str(json).unwrap();
    table.validate().unwrap();

    let bill = tiered::resolve(dec!(350), &table).unwrap();
    // 300 * 120 + 50 * 214.6 = 46,730; + 1,600 = 48,330; vat 4,833
    assert_eq!(bill.usage_charge, dec!(46730));
    assert_eq!(bill.total, dec!(53163));
}

#[test]
fn test_unordered_custom_table_rejected_at_gate() {
    let mut table = tariffs::gas_residential_2024();
    table.tiers.swap(0, 1);
    let err = UtilityForm {
        usage: "30".into(),
        table: Some(table),
    }
    .parse(Utility::Gas)
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

// ===========================================================================
// Management fee and income tax
// ===========================================================================

#[test]
fn test_management_fee_lines_sum_to_total() {
    let input = ManagementFeeForm {
        area: "84.5".into(),
        ..Default::default()
    }
    .parse()
    .unwrap();
    let out = management_fee::calculate_management_fee(&input).unwrap();
    let lines = out.general_fee
        + out.elevator_fee
        + out.security_fee
        + out.cleaning_fee
        + out.lighting_fee
        + out.repair_fee;
    assert_eq!(out.total, lines);
    assert_eq!(out.general_fee, dec!(25350));
}

#[test]
fn test_income_tax_top_bracket() {
    let out = income_tax::calculate_income_tax(&IncomeTaxInput {
        annual_income: dec!(600000000),
        deductions: Decimal::ZERO,
    })
    .unwrap();
    // 174,600,000 + 100,000,000 * 42%
    assert_eq!(out.income_tax, dec!(216600000));
    assert_eq!(out.local_tax, dec!(21660000));
    assert_eq!(out.marginal_rate, dec!(0.42));
}
