use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LifeCalcError;
use crate::types::{checked_sum, CheckedArith, Money, Quantity, Rate};
use crate::LifeCalcResult;

/// One bracket of a tiered tariff or tax schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    /// Inclusive upper bound of the bracket; `None` means unbounded.
    #[serde(default)]
    pub upper_bound: Option<Quantity>,
    /// Charge per unit for the part of the quantity inside this bracket.
    pub marginal_rate: Decimal,
    /// Flat fee applied when the whole quantity lands in this bracket.
    #[serde(default)]
    pub basic_charge: Money,
}

impl RateTier {
    pub fn bounded(upper_bound: Quantity, marginal_rate: Decimal, basic_charge: Money) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            marginal_rate,
            basic_charge,
        }
    }

    pub fn unbounded(marginal_rate: Decimal, basic_charge: Money) -> Self {
        Self {
            upper_bound: None,
            marginal_rate,
            basic_charge,
        }
    }
}

/// Percentage levied on the tier subtotal (VAT, funds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surcharge {
    pub name: String,
    pub rate: Rate,
}

/// A versioned tiered schedule, e.g. the 2024 residential electricity tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub name: String,
    /// Schedule version label, e.g. "2024".
    pub schedule: String,
    /// Unit the quantity is metered in.
    pub unit: String,
    pub tiers: Vec<RateTier>,
    #[serde(default)]
    pub surcharges: Vec<Surcharge>,
}

impl RateTable {
    /// Check that the tiers are contiguous, ascending and exhaustive.
    pub fn validate(&self) -> LifeCalcResult<()> {
        if self.tiers.is_empty() {
            return Err(LifeCalcError::invalid("tiers", "Rate table has no tiers"));
        }

        let last = self.tiers.len() - 1;
        let mut previous = Decimal::ZERO;
        for (i, tier) in self.tiers.iter().enumerate() {
            match tier.upper_bound {
                Some(upper) if i == last => {
                    return Err(LifeCalcError::invalid(
                        "tiers",
                        format!("Last tier must be unbounded, found upper bound {upper}"),
                    ));
                }
                Some(upper) if upper <= previous => {
                    return Err(LifeCalcError::invalid(
                        "tiers",
                        format!("Tier {i} upper bound {upper} does not exceed {previous}"),
                    ));
                }
                Some(upper) => previous = upper,
                None if i != last => {
                    return Err(LifeCalcError::invalid(
                        "tiers",
                        format!("Tier {i} is unbounded but is not the last tier"),
                    ));
                }
                None => {}
            }
            if tier.marginal_rate < Decimal::ZERO || tier.basic_charge < Decimal::ZERO {
                return Err(LifeCalcError::invalid(
                    "tiers",
                    format!("Tier {i} has a negative rate or fee"),
                ));
            }
        }

        for s in &self.surcharges {
            if s.rate < Decimal::ZERO {
                return Err(LifeCalcError::invalid(
                    "surcharges",
                    format!("Surcharge '{}' has a negative rate", s.name),
                ));
            }
        }
        Ok(())
    }

    /// Index of the tier containing `quantity`. Boundary values belong to
    /// the lower tier.
    pub fn tier_index(&self, quantity: Quantity) -> usize {
        self.tiers
            .iter()
            .position(|t| t.upper_bound.map_or(true, |upper| quantity <= upper))
            .unwrap_or(self.tiers.len().saturating_sub(1))
    }
}

/// The part of the quantity billed inside one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSlice {
    pub tier: usize,
    pub upper_bound: Option<Quantity>,
    pub quantity: Quantity,
    pub marginal_rate: Decimal,
    pub charge: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeLine {
    pub name: String,
    pub rate: Rate,
    pub amount: Money,
}

/// Full charge for a quantity against a [`RateTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredCharge {
    pub quantity: Quantity,
    /// Zero-based index of the tier the quantity falls in
    pub tier_index: usize,
    pub basic_charge: Money,
    pub usage_charge: Money,
    pub breakdown: Vec<TierSlice>,
    pub surcharges: Vec<SurchargeLine>,
    pub subtotal: Money,
    pub total: Money,
}

fn walk_tiers(quantity: Quantity, table: &RateTable) -> LifeCalcResult<(usize, Vec<TierSlice>)> {
    let mut previous = Decimal::ZERO;
    let mut slices = Vec::with_capacity(table.tiers.len());

    for (i, tier) in table.tiers.iter().enumerate() {
        let ceiling = match tier.upper_bound {
            Some(upper) => quantity.min(upper),
            None => quantity,
        };
        let within = (ceiling - previous).max(Decimal::ZERO);
        let charge = within.mul_or(tier.marginal_rate, "quantity")?;
        tracing::trace!(tier = i, %within, %charge, "tier slice");

        slices.push(TierSlice {
            tier: i,
            upper_bound: tier.upper_bound,
            quantity: within,
            marginal_rate: tier.marginal_rate,
            charge,
        });

        match tier.upper_bound {
            Some(upper) if quantity > upper => previous = upper,
            _ => return Ok((i, slices)),
        }
    }

    // validate() guarantees an unbounded last tier, so the loop always returns
    Ok((table.tiers.len().saturating_sub(1), slices))
}

fn check_quantity(quantity: Quantity) -> LifeCalcResult<()> {
    if quantity < Decimal::ZERO {
        return Err(LifeCalcError::invalid(
            "quantity",
            "Quantity must not be negative",
        ));
    }
    Ok(())
}

/// Marginal usage charge only: each tier's rate applied to the slice of the
/// quantity inside it.
pub fn usage_charge(quantity: Quantity, table: &RateTable) -> LifeCalcResult<Money> {
    check_quantity(quantity)?;
    table.validate()?;
    let (_, slices) = walk_tiers(quantity, table)?;
    checked_sum(slices.iter().map(|s| s.charge), "quantity")
}

/// Resolve the full bill for `quantity`: basic charge of the containing tier,
/// marginal usage charge, and each surcharge floored independently.
pub fn resolve(quantity: Quantity, table: &RateTable) -> LifeCalcResult<TieredCharge> {
    check_quantity(quantity)?;
    table.validate()?;

    let (tier_index, breakdown) = walk_tiers(quantity, table)?;
    let usage_charge = checked_sum(breakdown.iter().map(|s| s.charge), "quantity")?;
    let basic_charge = table.tiers[tier_index].basic_charge;
    let subtotal = basic_charge.add_or(usage_charge, "quantity")?;

    let surcharges = table
        .surcharges
        .iter()
        .map(|s| {
            Ok(SurchargeLine {
                name: s.name.clone(),
                rate: s.rate,
                amount: subtotal.mul_or(s.rate, "quantity")?.floor(),
            })
        })
        .collect::<LifeCalcResult<Vec<_>>>()?;
    let surcharge_total = checked_sum(surcharges.iter().map(|s| s.amount), "quantity")?;
    let total = subtotal.add_or(surcharge_total, "quantity")?;

    Ok(TieredCharge {
        quantity,
        tier_index,
        basic_charge,
        usage_charge,
        breakdown,
        surcharges,
        subtotal,
        total,
    })
}

/// Picks a value by the highest threshold not above the quantity, with no
/// accumulation across brackets (benefit durations, categories).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSchedule<T> {
    /// Value below the first threshold.
    pub base: T,
    /// `(inclusive lower bound, value)` pairs in ascending order.
    pub steps: Vec<(Decimal, T)>,
}

impl<T: Clone> StepSchedule<T> {
    pub fn new(base: T, steps: Vec<(Decimal, T)>) -> Self {
        Self { base, steps }
    }

    pub fn lookup(&self, quantity: Decimal) -> T {
        self.steps
            .iter()
            .rev()
            .find(|(from, _)| quantity >= *from)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.base.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::{prop_assert, proptest};
    use rust_decimal_macros::dec;

    fn sample_table() -> RateTable {
        RateTable {
            name: "sample".into(),
            schedule: "test".into(),
            unit: "kWh".into(),
            tiers: vec![
                RateTier::bounded(dec!(200), dec!(120.7), dec!(910)),
                RateTier::bounded(dec!(400), dec!(214.6), dec!(1600)),
                RateTier::unbounded(dec!(307.3), dec!(7300)),
            ],
            surcharges: vec![
                Surcharge {
                    name: "vat".into(),
                    rate: dec!(0.10),
                },
                Surcharge {
                    name: "fund".into(),
                    rate: dec!(0.037),
                },
            ],
        }
    }

    #[test]
    fn test_second_tier_bill() {
        let bill = resolve(dec!(350), &sample_table()).unwrap();
        assert_eq!(bill.usage_charge, dec!(56330));
        assert_eq!(bill.basic_charge, dec!(1600));
        assert_eq!(bill.tier_index, 1);
        assert_eq!(bill.subtotal, dec!(57930));
        assert_eq!(bill.surcharges[0].amount, dec!(5793));
        assert_eq!(bill.surcharges[1].amount, dec!(2143));
        assert_eq!(bill.total, dec!(65866));
    }

    #[test]
    fn test_zero_quantity_uses_first_fee() {
        let bill = resolve(Decimal::ZERO, &sample_table()).unwrap();
        assert_eq!(bill.usage_charge, Decimal::ZERO);
        assert_eq!(bill.basic_charge, dec!(910));
        assert_eq!(bill.tier_index, 0);
    }

    #[test]
    fn test_boundary_belongs_to_lower_tier() {
        let table = sample_table();
        let at = resolve(dec!(200), &table).unwrap();
        assert_eq!(at.tier_index, 0);
        assert_eq!(at.usage_charge, dec!(24140));
        assert_eq!(at.basic_charge, dec!(910));

        let at_second = usage_charge(dec!(400), &table).unwrap();
        assert_eq!(at_second, dec!(200) * dec!(120.7) + dec!(200) * dec!(214.6));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let err = resolve(dec!(-1), &sample_table()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_huge_quantity_is_an_error() {
        let huge = Decimal::from_scientific("1e27").unwrap();
        let err = resolve(huge, &sample_table()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.field(), Some("quantity"));
        assert!(usage_charge(huge, &sample_table()).is_err());

        // large but representable still resolves
        let big = Decimal::from_scientific("1e20").unwrap();
        let bill = resolve(big, &sample_table()).unwrap();
        assert!(bill.total > bill.subtotal);
    }

    #[test]
    fn test_malformed_tables_rejected() {
        let mut table = sample_table();
        table.tiers[2].upper_bound = Some(dec!(1000));
        assert!(table.validate().is_err());

        let mut table = sample_table();
        table.tiers[1].upper_bound = Some(dec!(150));
        assert!(table.validate().is_err());

        let mut table = sample_table();
        table.tiers[0].upper_bound = None;
        assert!(table.validate().is_err());

        let mut table = sample_table();
        table.tiers.clear();
        assert!(resolve(dec!(10), &table).is_err());
    }

    #[test]
    fn test_step_schedule_lookup() {
        let days = StepSchedule::new(90u32, vec![(dec!(1), 120), (dec!(3), 150), (dec!(10), 240)]);
        assert_eq!(days.lookup(dec!(0.5)), 90);
        assert_eq!(days.lookup(dec!(1)), 120);
        assert_eq!(days.lookup(dec!(9.99)), 150);
        assert_eq!(days.lookup(dec!(25)), 240);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_usage_charge_is_monotonic(a in 0u32..2_000_000, b in 0u32..2_000_000) {
            let table = sample_table();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            // hundredths of a kWh
            let q1 = Decimal::new(lo as i64, 2);
            let q2 = Decimal::new(hi as i64, 2);
            prop_assert!(usage_charge(q2, &table).unwrap() >= usage_charge(q1, &table).unwrap());
        }
    }
}
