use clap::Args;
use serde_json::Value;

use lifecalc_core::forms::FormContext;

use crate::commands::{resolve_form, run_form, FormFields};

/// Arguments for take-home pay
#[derive(Args)]
pub struct SalaryArgs {
    /// Gross annual salary in won
    #[arg(long)]
    pub annual_salary: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for overtime pay
#[derive(Args)]
pub struct OvertimeArgs {
    /// Ordinary daily wage in won
    #[arg(long)]
    pub daily_wage: Option<String>,

    /// Overtime hours worked
    #[arg(long)]
    pub overtime_hours: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for weekly paid rest allowance
#[derive(Args)]
pub struct WeeklyRestArgs {
    /// Contracted hours per week (defaults to 40)
    #[arg(long)]
    pub weekly_hours: Option<String>,

    /// Ordinary daily wage in won
    #[arg(long)]
    pub daily_wage: Option<String>,

    /// Days worked in the week
    #[arg(long)]
    pub days_worked: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for unused annual leave pay
#[derive(Args)]
pub struct AnnualLeaveArgs {
    /// Monthly salary in won
    #[arg(long)]
    pub monthly_salary: Option<String>,

    /// Unused leave days
    #[arg(long)]
    pub unused_days: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_salary(args: SalaryArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new().text("annual_salary", args.annual_salary);
    let form = resolve_form("salary", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}

pub fn run_overtime(args: OvertimeArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("daily_wage", args.daily_wage)
        .text("overtime_hours", args.overtime_hours);
    let form = resolve_form("overtime", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}

pub fn run_weekly_rest(args: WeeklyRestArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("weekly_hours", args.weekly_hours)
        .text("daily_wage", args.daily_wage)
        .text("days_worked", args.days_worked);
    let form = resolve_form("weekly_rest", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}

pub fn run_annual_leave(args: AnnualLeaveArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("monthly_salary", args.monthly_salary)
        .text("unused_days", args.unused_days);
    let form = resolve_form("annual_leave", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}
