use clap::Args;
use serde_json::Value;

use lifecalc_core::forms::FormContext;

use crate::commands::{resolve_form, run_form, FormFields};

/// Arguments for age in years, months and days
#[derive(Args)]
pub struct AgeArgs {
    /// Birth date (YYYY-MM-DD, YYYY.MM.DD or YYYY/MM/DD)
    #[arg(long)]
    pub birth_date: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a D-day countdown
#[derive(Args)]
pub struct DDayArgs {
    /// Target date
    #[arg(long)]
    pub target_date: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for days since a baby's birth
#[derive(Args)]
pub struct BabyDaysArgs {
    /// Birth date
    #[arg(long)]
    pub birth_date: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the military discharge date
#[derive(Args)]
pub struct DischargeArgs {
    /// Enlistment date
    #[arg(long)]
    pub enlistment_date: Option<String>,

    /// Branch: army (default), navy, air-force or marines
    #[arg(long)]
    pub branch: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_age(args: AgeArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new().text("birth_date", args.birth_date);
    let form = resolve_form("age", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}

pub fn run_d_day(args: DDayArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new().text("target_date", args.target_date);
    let form = resolve_form("d_day", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}

pub fn run_baby_days(args: BabyDaysArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new().text("birth_date", args.birth_date);
    let form = resolve_form("baby_days", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}

pub fn run_discharge(args: DischargeArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("enlistment_date", args.enlistment_date)
        .choice("branch", args.branch);
    let form = resolve_form("military_discharge", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}
