//! Form bridge: raw string forms in, a computation envelope out.
//!
//! A [`CalculatorForm`] is what a UI or CLI collects. [`submit`] runs it
//! through the validation gate and the calculator; [`evaluate`] does the same
//! but folds any rejection into a localized [`FormFailure`] so the caller
//! never has to handle an error path.

use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ErrorKind, LifeCalcError};
use crate::presentation::{self, Locale, PresentationContext};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LifeCalcResult;

#[cfg(feature = "benefits")]
use crate::benefits::{severance, unemployment};
#[cfg(feature = "dates")]
use crate::dates::{age, milestones, military};
#[cfg(feature = "health")]
use crate::health::bmi;
#[cfg(feature = "lending")]
use crate::lending::loan;
#[cfg(feature = "payroll")]
use crate::payroll::{allowances, salary};
#[cfg(feature = "savings")]
use crate::savings::{deposits, goal};
#[cfg(feature = "tax")]
use crate::tax::{income_tax, vat};
#[cfg(feature = "utility")]
use crate::utility::{management_fee, tariffs};

const REFERENCE_ONLY: &str = "Simplified estimate for reference only; actual amounts may differ";

/// A raw calculator form, tagged by `"calculator"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorForm {
    #[cfg(feature = "utility")]
    Electric(tariffs::UtilityForm),
    #[cfg(feature = "utility")]
    Gas(tariffs::UtilityForm),
    #[cfg(feature = "utility")]
    Water(tariffs::UtilityForm),
    #[cfg(feature = "utility")]
    ManagementFee(management_fee::ManagementFeeForm),
    #[cfg(feature = "tax")]
    IncomeTax(income_tax::IncomeTaxForm),
    #[cfg(feature = "tax")]
    Vat(vat::VatForm),
    #[cfg(feature = "payroll")]
    Salary(salary::SalaryForm),
    #[cfg(feature = "payroll")]
    Overtime(allowances::OvertimeForm),
    #[cfg(feature = "payroll")]
    WeeklyRest(allowances::WeeklyRestForm),
    #[cfg(feature = "payroll")]
    AnnualLeave(allowances::AnnualLeaveForm),
    #[cfg(feature = "benefits")]
    Severance(severance::SeveranceForm),
    #[cfg(feature = "benefits")]
    Unemployment(unemployment::UnemploymentForm),
    #[cfg(feature = "lending")]
    Loan(loan::LoanForm),
    #[cfg(feature = "savings")]
    Savings(deposits::SavingsForm),
    #[cfg(feature = "savings")]
    GoalSavings(goal::GoalSavingsForm),
    #[cfg(feature = "dates")]
    Age(age::AgeForm),
    #[cfg(feature = "dates")]
    DDay(milestones::DDayForm),
    #[cfg(feature = "dates")]
    BabyDays(milestones::BabyDaysForm),
    #[cfg(feature = "dates")]
    MilitaryDischarge(military::DischargeForm),
    #[cfg(feature = "health")]
    Bmi(bmi::BmiForm),
}

impl CalculatorForm {
    /// The `"calculator"` tag of this form.
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "utility")]
            CalculatorForm::Electric(_) => "electric",
            #[cfg(feature = "utility")]
            CalculatorForm::Gas(_) => "gas",
            #[cfg(feature = "utility")]
            CalculatorForm::Water(_) => "water",
            #[cfg(feature = "utility")]
            CalculatorForm::ManagementFee(_) => "management_fee",
            #[cfg(feature = "tax")]
            CalculatorForm::IncomeTax(_) => "income_tax",
            #[cfg(feature = "tax")]
            CalculatorForm::Vat(_) => "vat",
            #[cfg(feature = "payroll")]
            CalculatorForm::Salary(_) => "salary",
            #[cfg(feature = "payroll")]
            CalculatorForm::Overtime(_) => "overtime",
            #[cfg(feature = "payroll")]
            CalculatorForm::WeeklyRest(_) => "weekly_rest",
            #[cfg(feature = "payroll")]
            CalculatorForm::AnnualLeave(_) => "annual_leave",
            #[cfg(feature = "benefits")]
            CalculatorForm::Severance(_) => "severance",
            #[cfg(feature = "benefits")]
            CalculatorForm::Unemployment(_) => "unemployment",
            #[cfg(feature = "lending")]
            CalculatorForm::Loan(_) => "loan",
            #[cfg(feature = "savings")]
            CalculatorForm::Savings(_) => "savings",
            #[cfg(feature = "savings")]
            CalculatorForm::GoalSavings(_) => "goal_savings",
            #[cfg(feature = "dates")]
            CalculatorForm::Age(_) => "age",
            #[cfg(feature = "dates")]
            CalculatorForm::DDay(_) => "d_day",
            #[cfg(feature = "dates")]
            CalculatorForm::BabyDays(_) => "baby_days",
            #[cfg(feature = "dates")]
            CalculatorForm::MilitaryDischarge(_) => "military_discharge",
            #[cfg(feature = "health")]
            CalculatorForm::Bmi(_) => "bmi",
        }
    }
}

/// One result shape per calculator. Serialized without a tag; the envelope
/// and the submitted form already say which calculator ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationResult {
    #[cfg(feature = "utility")]
    UtilityBill(tariffs::UtilityBillOutput),
    #[cfg(feature = "utility")]
    ManagementFee(management_fee::ManagementFeeOutput),
    #[cfg(feature = "tax")]
    IncomeTax(income_tax::IncomeTaxOutput),
    #[cfg(feature = "tax")]
    Vat(vat::VatOutput),
    #[cfg(feature = "payroll")]
    Salary(salary::SalaryOutput),
    #[cfg(feature = "payroll")]
    Overtime(allowances::OvertimeOutput),
    #[cfg(feature = "payroll")]
    WeeklyRest(allowances::WeeklyRestOutput),
    #[cfg(feature = "payroll")]
    AnnualLeave(allowances::AnnualLeaveOutput),
    #[cfg(feature = "benefits")]
    Severance(severance::SeveranceOutput),
    #[cfg(feature = "benefits")]
    Unemployment(unemployment::UnemploymentOutput),
    #[cfg(feature = "lending")]
    Loan(loan::LoanOutput),
    #[cfg(feature = "savings")]
    Savings(deposits::SavingsOutput),
    #[cfg(feature = "savings")]
    GoalSavings(goal::GoalSavingsOutput),
    #[cfg(feature = "dates")]
    Age(age::AgeOutput),
    #[cfg(feature = "dates")]
    DDay(milestones::DDayOutput),
    #[cfg(feature = "dates")]
    BabyDays(milestones::BabyDaysOutput),
    #[cfg(feature = "dates")]
    MilitaryDischarge(military::DischargeOutput),
    #[cfg(feature = "health")]
    Bmi(bmi::BmiOutput),
}

impl CalculationResult {
    /// The key figure of the result, rendered for `ctx`.
    pub fn headline(&self, ctx: &PresentationContext) -> String {
        let ko = ctx.locale == Locale::Ko;
        let money = |amount: Money| presentation::format_money(amount, ctx);
        match self {
            #[cfg(feature = "utility")]
            CalculationResult::UtilityBill(r) => money(r.charge.total),
            #[cfg(feature = "utility")]
            CalculationResult::ManagementFee(r) => money(r.total),
            #[cfg(feature = "tax")]
            CalculationResult::IncomeTax(r) => money(r.total_tax),
            #[cfg(feature = "tax")]
            CalculationResult::Vat(r) => money(r.total_price),
            #[cfg(feature = "payroll")]
            CalculationResult::Salary(r) => money(r.net_monthly_salary),
            #[cfg(feature = "payroll")]
            CalculationResult::Overtime(r) => money(r.overtime_pay),
            #[cfg(feature = "payroll")]
            CalculationResult::WeeklyRest(r) => money(r.weekly_rest_pay),
            #[cfg(feature = "payroll")]
            CalculationResult::AnnualLeave(r) => money(r.annual_leave_pay),
            #[cfg(feature = "benefits")]
            CalculationResult::Severance(r) => money(r.severance_pay),
            #[cfg(feature = "benefits")]
            CalculationResult::Unemployment(r) => money(r.total_benefit),
            #[cfg(feature = "lending")]
            CalculationResult::Loan(r) => money(r.monthly_payment),
            #[cfg(feature = "savings")]
            CalculationResult::Savings(r) => money(r.total),
            #[cfg(feature = "savings")]
            CalculationResult::GoalSavings(r) => money(r.monthly_contribution),
            #[cfg(feature = "dates")]
            CalculationResult::Age(r) if ko => {
                format!("만 {}세 {}개월 {}일", r.years, r.months, r.days)
            }
            #[cfg(feature = "dates")]
            CalculationResult::Age(r) => {
                format!("{} years {} months {} days", r.years, r.months, r.days)
            }
            #[cfg(feature = "dates")]
            CalculationResult::DDay(r) => r.label.clone(),
            #[cfg(feature = "dates")]
            CalculationResult::BabyDays(r) => presentation::describe_days_old(r.days_old, ctx),
            #[cfg(feature = "dates")]
            CalculationResult::MilitaryDischarge(r) => presentation::format_date(r.discharge_date, ctx),
            #[cfg(feature = "health")]
            CalculationResult::Bmi(r) => {
                let label = if ko { r.category.label_ko() } else { r.category.label_en() };
                format!("{} ({label})", r.bmi)
            }
        }
    }
}

/// Caller-supplied context: the calendar date and the output locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormContext {
    pub today: NaiveDate,
    #[serde(default)]
    pub presentation: PresentationContext,
}

impl FormContext {
    pub fn new(today: NaiveDate, locale: Locale) -> Self {
        Self {
            today,
            presentation: PresentationContext::for_locale(locale),
        }
    }
}

/// A rejected form, ready to show next to the offending field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFailure {
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl FormFailure {
    pub fn from_error(err: &LifeCalcError, ctx: &PresentationContext) -> Self {
        Self {
            kind: err.kind(),
            field: err.field().map(str::to_string),
            message: presentation::error_message(err, ctx),
        }
    }
}

/// Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct FormOutcome {
    pub result: Option<ComputationOutput<CalculationResult>>,
    pub error: Option<FormFailure>,
}

struct Computed {
    result: CalculationResult,
    methodology: &'static str,
    warnings: Vec<String>,
}

impl Computed {
    fn new(result: CalculationResult, methodology: &'static str) -> Self {
        Self {
            result,
            methodology,
            warnings: Vec::new(),
        }
    }

    fn warn(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

#[cfg(feature = "utility")]
fn utility_bill(form: &tariffs::UtilityForm, utility: tariffs::Utility) -> LifeCalcResult<Computed> {
    let input = form.parse(utility)?;
    let output = tariffs::calculate_bill(&input)?;
    let mut computed = Computed::new(
        CalculationResult::UtilityBill(output),
        "Progressive block tariff: marginal rate per tier, basic charge of the reached tier, surcharges floored",
    );
    if let Some(table) = &input.table {
        computed = computed.warn(format!(
            "Custom rate table '{}' ({}) replaced the built-in schedule",
            table.name, table.schedule
        ));
    }
    Ok(computed)
}

#[cfg_attr(not(feature = "dates"), allow(unused_variables))]
fn compute(form: &CalculatorForm, today: NaiveDate) -> LifeCalcResult<Computed> {
    let computed = match form {
        #[cfg(feature = "utility")]
        CalculatorForm::Electric(f) => utility_bill(f, tariffs::Utility::Electric)?,
        #[cfg(feature = "utility")]
        CalculatorForm::Gas(f) => utility_bill(f, tariffs::Utility::Gas)?,
        #[cfg(feature = "utility")]
        CalculatorForm::Water(f) => utility_bill(f, tariffs::Utility::Water)?,
        #[cfg(feature = "utility")]
        CalculatorForm::ManagementFee(f) => Computed::new(
            CalculationResult::ManagementFee(management_fee::calculate_management_fee(&f.parse()?)?),
            "Area times per-m2 unit cost for each line item, each line rounded",
        )
        .warn(REFERENCE_ONLY),
        #[cfg(feature = "tax")]
        CalculatorForm::IncomeTax(f) => Computed::new(
            CalculationResult::IncomeTax(income_tax::calculate_income_tax(&f.parse()?)?),
            "Progressive brackets on income less deductions, plus 10% local income tax",
        )
        .warn(REFERENCE_ONLY),
        #[cfg(feature = "tax")]
        CalculatorForm::Vat(f) => Computed::new(
            CalculationResult::Vat(vat::calculate_vat(&f.parse()?)?),
            "10% value added tax split",
        ),
        #[cfg(feature = "payroll")]
        CalculatorForm::Salary(f) => Computed::new(
            CalculationResult::Salary(salary::calculate_take_home(&f.parse()?)?),
            "Monthly salary less four social insurances and a flat income tax",
        )
        .warn(REFERENCE_ONLY),
        #[cfg(feature = "payroll")]
        CalculatorForm::Overtime(f) => Computed::new(
            CalculationResult::Overtime(allowances::calculate_overtime(&f.parse()?)?),
            "Hourly wage (daily / 8) x 1.5 x overtime hours",
        ),
        #[cfg(feature = "payroll")]
        CalculatorForm::WeeklyRest(f) => Computed::new(
            CalculationResult::WeeklyRest(allowances::calculate_weekly_rest(&f.parse()?)?),
            "Daily wage x days worked / 5",
        ),
        #[cfg(feature = "payroll")]
        CalculatorForm::AnnualLeave(f) => Computed::new(
            CalculationResult::AnnualLeave(allowances::calculate_annual_leave(&f.parse()?)?),
            "Monthly salary / 20.92 scheduled days x unused days",
        ),
        #[cfg(feature = "benefits")]
        CalculatorForm::Severance(f) => Computed::new(
            CalculationResult::Severance(severance::calculate_severance(&f.parse()?)?),
            "Average daily wage x 30 days x years of service",
        )
        .warn(REFERENCE_ONLY),
        #[cfg(feature = "benefits")]
        CalculatorForm::Unemployment(f) => {
            let output = unemployment::calculate_unemployment(&f.parse()?)?;
            let clamped = output.clamped;
            let computed = Computed::new(
                CalculationResult::Unemployment(output),
                "60% of the average daily wage within the daily floor and cap, paid for days set by insured tenure",
            )
            .warn(REFERENCE_ONLY);
            if clamped {
                computed.warn("Daily benefit was limited to the statutory floor or cap")
            } else {
                computed
            }
        }
        #[cfg(feature = "lending")]
        CalculatorForm::Loan(f) => Computed::new(
            CalculationResult::Loan(loan::calculate_loan(&f.parse()?)?),
            "Monthly amortization at annual rate / 12",
        ),
        #[cfg(feature = "savings")]
        CalculatorForm::Savings(f) => Computed::new(
            CalculationResult::Savings(deposits::calculate_savings(&f.parse()?)?),
            "Installment savings compound monthly; time deposits earn simple interest",
        )
        .warn("Interest is shown before tax"),
        #[cfg(feature = "savings")]
        CalculatorForm::GoalSavings(f) => Computed::new(
            CalculationResult::GoalSavings(goal::calculate_goal_savings(&f.parse()?)?),
            "Monthly contribution solving the future value of an annuity plus the compounded balance",
        )
        .warn("Interest is shown before tax"),
        #[cfg(feature = "dates")]
        CalculatorForm::Age(f) => Computed::new(
            CalculationResult::Age(age::calculate_age(&f.parse()?, today)?),
            "Calendar difference in years, months and days",
        ),
        #[cfg(feature = "dates")]
        CalculatorForm::DDay(f) => Computed::new(
            CalculationResult::DDay(milestones::calculate_d_day(&f.parse()?, today)),
            "Whole days between today and the target date",
        ),
        #[cfg(feature = "dates")]
        CalculatorForm::BabyDays(f) => Computed::new(
            CalculationResult::BabyDays(milestones::calculate_baby_days(&f.parse()?, today)?),
            "Days since birth; months and years from average lengths of 30.44 and 365.25 days",
        ),
        #[cfg(feature = "dates")]
        CalculatorForm::MilitaryDischarge(f) => Computed::new(
            CalculationResult::MilitaryDischarge(military::calculate_discharge(&f.parse()?, today)?),
            "Enlistment date plus the branch's service months",
        )
        .warn("Early discharge and leave are not taken into account"),
        #[cfg(feature = "health")]
        CalculatorForm::Bmi(f) => Computed::new(
            CalculationResult::Bmi(bmi::calculate_bmi(&f.parse()?)?),
            "Weight (kg) / height (m) squared, Asia-Pacific cut-offs",
        ),
    };
    Ok(computed)
}

/// Validate and compute a form.
pub fn submit(
    form: &CalculatorForm,
    ctx: &FormContext,
) -> LifeCalcResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    let calculator = form.name();
    tracing::debug!(calculator, today = %ctx.today, locale = %ctx.presentation.locale, "form submitted");

    let computed = compute(form, ctx.today).map_err(|err| {
        tracing::warn!(
            calculator,
            kind = ?err.kind(),
            field = err.field().unwrap_or("-"),
            "form rejected"
        );
        err
    })?;

    let headline = computed.result.headline(&ctx.presentation);
    let assumptions = json!({
        "calculator": calculator,
        "today": ctx.today,
        "locale": ctx.presentation.locale,
    });
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        computed.methodology,
        headline,
        &assumptions,
        computed.warnings,
        elapsed,
        computed.result,
    ))
}

/// Like [`submit`], with the failure folded into the outcome.
pub fn evaluate(form: &CalculatorForm, ctx: &FormContext) -> FormOutcome {
    match submit(form, ctx) {
        Ok(output) => FormOutcome {
            result: Some(output),
            error: None,
        },
        Err(err) => FormOutcome {
            result: None,
            error: Some(FormFailure::from_error(&err, &ctx.presentation)),
        },
    }
}

/// Decode a JSON form and evaluate it. A malformed document is reported as a
/// `serialization` failure rather than an error.
pub fn evaluate_json(form_json: &str, ctx: &FormContext) -> FormOutcome {
    match serde_json::from_str::<CalculatorForm>(form_json) {
        Ok(form) => evaluate(&form, ctx),
        Err(err) => {
            let err = LifeCalcError::from(err);
            tracing::warn!(error = %err, "form could not be decoded");
            FormOutcome {
                result: None,
                error: Some(FormFailure::from_error(&err, &ctx.presentation)),
            }
        }
    }
}
