use clap::Args;
use serde_json::Value;

use lifecalc_core::forms::FormContext;

use crate::commands::{resolve_form, run_form, FormFields};

/// Arguments for statutory severance pay
///
/// Give either `--daily-wage` or `--wage-total` with `--wage-days`, and one
/// of `--start-date`/`--end-date`, `--service-days` or `--years`.
#[derive(Args)]
pub struct SeveranceArgs {
    /// Average daily wage in won
    #[arg(long)]
    pub daily_wage: Option<String>,

    /// Wages paid over the reference window (normally the last three months)
    #[arg(long)]
    pub wage_total: Option<String>,

    /// Calendar days in the reference window
    #[arg(long)]
    pub wage_days: Option<String>,

    /// Years of continuous service
    #[arg(long)]
    pub years: Option<String>,

    /// Days of continuous service
    #[arg(long)]
    pub service_days: Option<String>,

    /// First day of employment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of employment (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for job-seeker (unemployment) benefit
#[derive(Args)]
pub struct UnemploymentArgs {
    /// Average monthly wage before leaving in won
    #[arg(long)]
    pub monthly_wage: Option<String>,

    /// Whole years insured
    #[arg(long)]
    pub years: Option<String>,

    /// Additional months insured
    #[arg(long)]
    pub months: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_severance(args: SeveranceArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("daily_wage", args.daily_wage)
        .text("wage_total", args.wage_total)
        .text("wage_days", args.wage_days)
        .text("years", args.years)
        .text("service_days", args.service_days)
        .text("start_date", args.start_date)
        .text("end_date", args.end_date);
    let form = resolve_form("severance", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}

pub fn run_unemployment(args: UnemploymentArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("monthly_wage", args.monthly_wage)
        .text("years", args.years)
        .text("months", args.months);
    let form = resolve_form("unemployment", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}
