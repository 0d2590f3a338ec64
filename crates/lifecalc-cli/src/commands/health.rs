use clap::Args;
use serde_json::Value;

use lifecalc_core::forms::FormContext;

use crate::commands::{resolve_form, run_form, FormFields};

/// Arguments for body mass index
#[derive(Args)]
pub struct BmiArgs {
    /// Height in centimetres
    #[arg(long)]
    pub height: Option<String>,

    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_bmi(args: BmiArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("height", args.height)
        .text("weight", args.weight);
    let form = resolve_form("bmi", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}
