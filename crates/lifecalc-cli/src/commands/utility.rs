use clap::Args;
use serde_json::Value;

use lifecalc_core::forms::FormContext;
use lifecalc_core::tiered::RateTable;

use crate::commands::{resolve_form, run_form, FormFields};
use crate::input;

/// Arguments shared by the electricity, gas and water bills
#[derive(Args)]
pub struct UtilityArgs {
    /// Metered usage for the month (kWh for electricity, m3 for gas and water)
    #[arg(long)]
    pub usage: Option<String>,

    /// Path to a JSON or YAML rate table replacing the built-in schedule
    #[arg(long)]
    pub schedule: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the apartment management fee estimate
#[derive(Args)]
pub struct ManagementFeeArgs {
    /// Exclusive floor area in m2
    #[arg(long)]
    pub area: Option<String>,

    /// Fee plan: basic or comprehensive
    #[arg(long)]
    pub plan: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_utility(
    calculator: &str,
    args: UtilityArgs,
    ctx: &FormContext,
) -> Result<Value, Box<dyn std::error::Error>> {
    let table = match args.schedule.as_deref() {
        Some(path) => {
            let table: RateTable = input::file::read_document(path)?;
            table.validate()?;
            Some(serde_json::to_value(table)?)
        }
        None => None,
    };

    let fields = FormFields::new().text("usage", args.usage).value("table", table);
    let form = resolve_form(calculator, args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}

pub fn run_management_fee(
    args: ManagementFeeArgs,
    ctx: &FormContext,
) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("area", args.area)
        .choice("plan", args.plan);
    let form = resolve_form("management_fee", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}
