use clap::Args;
use serde_json::Value;

use lifecalc_core::forms::FormContext;

use crate::commands::{resolve_form, run_form, FormFields};

/// Arguments for installment savings and time deposits
#[derive(Args)]
pub struct SavingsArgs {
    /// Product kind: installment (default) or deposit
    #[arg(long)]
    pub kind: Option<String>,

    /// Monthly deposit for installment savings, or the lump sum for a deposit
    #[arg(long)]
    pub principal: Option<String>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<String>,

    /// Term
    #[arg(long)]
    pub term: Option<String>,

    /// Unit of --term: months (default) or years
    #[arg(long)]
    pub term_unit: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the monthly contribution needed to reach a goal
#[derive(Args)]
pub struct GoalSavingsArgs {
    /// Target amount in won
    #[arg(long)]
    pub goal: Option<String>,

    /// Amount already saved (blank for none)
    #[arg(long)]
    pub current_balance: Option<String>,

    /// Annual interest rate in percent (0 allowed)
    #[arg(long)]
    pub rate: Option<String>,

    /// Time to reach the goal
    #[arg(long)]
    pub term: Option<String>,

    /// Unit of --term: years (default) or months
    #[arg(long)]
    pub term_unit: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_savings(args: SavingsArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .choice("kind", args.kind)
        .text("principal", args.principal)
        .text("rate", args.rate)
        .text("term", args.term)
        .choice("term_unit", args.term_unit);
    let form = resolve_form("savings", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}

pub fn run_goal_savings(args: GoalSavingsArgs, ctx: &FormContext) -> Result<Value, Box<dyn std::error::Error>> {
    let fields = FormFields::new()
        .text("goal", args.goal)
        .text("current_balance", args.current_balance)
        .text("rate", args.rate)
        .text("term", args.term)
        .choice("term_unit", args.term_unit);
    let form = resolve_form("goal_savings", args.input.as_deref(), fields)?;
    run_form(&form, ctx)
}
