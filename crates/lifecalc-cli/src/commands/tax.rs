use clap::Args;
use serde_json::Value;

use lifecalc_core::forms::FormContext;

use crate::commands::{resolve_form, run_form, FormFields};

/// Arguments for the annual income tax estimate
#[derive(Args)]
pub struct IncomeTaxArgs {
    /// Gross annual income in won
    #[arg(long)]
    pub annual_income: Option<String>,

    /// Total deductions in won (blank for none)
    #[arg(long)]
    pub deductions: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the VAT split
#[derive(Args)]
pub struct VatArgs {
    /// Amount in won
    #[arg(long)]
    pub amount: Option<String>,

    /// Whether the amount is the supply value or already includes VAT: supply or total
    #[arg(long)]
    pub basis: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_income_tax(args: IncomeTaxArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("annual_income", args.annual_income)
        .text("deductions", args.deductions);
    let form = resolve_form("income_tax", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}

pub fn run_vat(args: VatArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("amount", args.amount)
        .choice("basis", args.basis);
    let form = resolve_form("vat", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}
