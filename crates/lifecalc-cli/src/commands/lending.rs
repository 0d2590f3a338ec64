use clap::Args;
use serde_json::Value;

use lifecalc_core::forms::FormContext;

use crate::commands::{resolve_form, run_form, FormFields};

/// Arguments for loan repayment
#[derive(Args)]
pub struct LoanArgs {
    /// Principal in won
    #[arg(long)]
    pub amount: Option<String>,

    /// Annual interest rate in percent (e.g. 4.5)
    #[arg(long)]
    pub rate: Option<String>,

    /// Loan term
    #[arg(long)]
    pub term: Option<String>,

    /// Unit of --term: years (default) or months
    #[arg(long)]
    pub term_unit: Option<String>,

    /// Repayment scheme: equal-payment (default) or equal-principal
    #[arg(long)]
    pub scheme: Option<String>,

    /// Include the month-by-month repayment schedule
    #[arg(long)]
    pub schedule: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_loan(args: LoanArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("amount", args.amount)
        .text("rate", args.rate)
        .text("term", args.term)
        .choice("term_unit", args.term_unit)
        .choice("scheme", args.scheme)
        .flag("include_schedule", args.schedule);
    let form = resolve_form("loan", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}
