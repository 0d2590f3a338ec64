#![cfg(all(feature = "lending", feature = "savings"))]

use lifecalc_core::amortization::{self, AmortizationInput, RepaymentScheme, TermUnit};
use lifecalc_core::lending::loan::{self, LoanForm};
use lifecalc_core::savings::deposits::{self, SavingsForm, SavingsKind};
use lifecalc_core::savings::goal::{self, GoalSavingsForm};
use lifecalc_core::ErrorKind;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization engine
// ===========================================================================

#[test]
fn test_engine_schemes_agree_on_principal() {
    for scheme in [RepaymentScheme::EqualPayment, RepaymentScheme::EqualPrincipal] {
        let input = AmortizationInput {
            principal: dec!(50000000),
            periodic_rate: dec!(0.004),
            periods: 60,
            scheme,
        };
        let summary = amortization::amortize(&input).unwrap();
        let rows = amortization::schedule(&input).unwrap();
        let principal_paid: Decimal = rows.iter().map(|r| r.principal).sum();
        let interest_paid: Decimal = rows.iter().map(|r| r.interest).sum();

        assert!((principal_paid - dec!(50000000)).abs() < dec!(0.0001));
        assert!(
            (interest_paid - summary.total_interest).abs() < dec!(0.01),
            "{scheme:?}: schedule interest {interest_paid} vs summary {}",
            summary.total_interest
        );
    }
}

#[test]
fn test_equal_principal_costs_less_interest() {
    let annuity = amortization::equal_payment(dec!(100000000), dec!(0.004), 240).unwrap();
    let linear = amortization::equal_principal(dec!(100000000), dec!(0.004), 240).unwrap();
    assert!(linear.total_interest < annuity.total_interest);
    assert!(linear.first_period_payment > annuity.first_period_payment);
    assert!(linear.last_period_payment < annuity.last_period_payment);
}

// ===========================================================================
// Loan calculator
// ===========================================================================

#[test]
fn test_loan_form_in_years() {
    let input = LoanForm {
        amount: "300,000,000".into(),
        rate: "4%".into(),
        term: "30".into(),
        ..Default::default()
    }
    .parse()
    .unwrap();
    assert_eq!(input.term_unit, TermUnit::Years);
    assert_eq!(input.scheme, RepaymentScheme::EqualPayment);

    let out = loan::calculate_loan(&input).unwrap();
    assert_eq!(out.monthly_payment, dec!(1432246));
    assert_eq!(out.total_payment, dec!(515608519));
}

#[test]
fn test_loan_missing_amount() {
    let err = LoanForm {
        rate: "4".into(),
        term: "30".into(),
        ..Default::default()
    }
    .parse()
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
    assert_eq!(err.field(), Some("amount"));
}

#[test]
fn test_loan_garbage_amount() {
    let err = LoanForm {
        amount: "1억".into(),
        rate: "4".into(),
        term: "30".into(),
        ..Default::default()
    }
    .parse()
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotANumber);
}

// ===========================================================================
// Savings
// ===========================================================================

#[test]
fn test_installment_savings_form() {
    let input = SavingsForm {
        kind: SavingsKind::Installment,
        principal: "1,200,000".into(),
        rate: "3".into(),
        term: "1".into(),
        term_unit: TermUnit::Years,
    }
    .parse()
    .unwrap();
    let out = deposits::calculate_savings(&input).unwrap();
    assert_eq!(out.months, 12);
    assert_eq!(out.monthly_deposit, Some(dec!(100000)));
    assert_eq!(out.total, dec!(1216638));
}

#[test]
fn test_compounding_beats_simple_interest() {
    let installment = deposits::calculate_savings(&deposits::SavingsInput {
        kind: SavingsKind::Installment,
        principal: dec!(12000000),
        annual_rate_percent: dec!(4),
        term: dec!(12),
        term_unit: TermUnit::Months,
    })
    .unwrap();
    let deposit = deposits::calculate_savings(&deposits::SavingsInput {
        kind: SavingsKind::Deposit,
        principal: dec!(12000000),
        annual_rate_percent: dec!(4),
        term: dec!(12),
        term_unit: TermUnit::Months,
    })
    .unwrap();
    // deposits sit for the full year, installments on average for half of it
    assert!(deposit.interest > installment.interest);
    assert_eq!(deposit.interest, dec!(480000));
}

#[test]
fn test_goal_savings_reaches_goal() {
    let input = GoalSavingsForm {
        goal: "30,000,000".into(),
        current_balance: "5,000,000".into(),
        rate: "3.5".into(),
        term: "3".into(),
        ..Default::default()
    }
    .parse()
    .unwrap();
    let out = goal::calculate_goal_savings(&input).unwrap();
    assert_eq!(out.months, 36);
    let reached = out.total_contributed + out.interest_earned;
    assert!((reached - dec!(30000000)).abs() <= dec!(2), "reached {reached}");
}

#[test]
fn test_goal_below_balance_is_an_ordering_violation() {
    let err = goal::calculate_goal_savings(
        &GoalSavingsForm {
            goal: "1,000,000".into(),
            current_balance: "2,000,000".into(),
            rate: "3".into(),
            term: "1".into(),
            ..Default::default()
        }
        .parse()
        .unwrap(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OrderingViolation);
}
