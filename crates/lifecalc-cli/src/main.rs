mod commands;
mod input;
mod output;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use lifecalc_core::forms::FormContext;
use lifecalc_core::presentation::{self, Locale};
use lifecalc_core::validation;
use lifecalc_core::LifeCalcError;

use commands::benefits::{SeveranceArgs, UnemploymentArgs};
use commands::dates::{AgeArgs, BabyDaysArgs, DDayArgs, DischargeArgs};
use commands::health::BmiArgs;
use commands::lending::LoanArgs;
use commands::payroll::{AnnualLeaveArgs, OvertimeArgs, SalaryArgs, WeeklyRestArgs};
use commands::savings::{GoalSavingsArgs, SavingsArgs};
use commands::tax::{IncomeTaxArgs, VatArgs};
use commands::utility::{ManagementFeeArgs, UtilityArgs};

/// Everyday payroll, tariff, loan and date calculators
#[derive(Parser)]
#[command(
    name = "lifecalc",
    version,
    about = "Everyday payroll, tariff, loan and date calculators",
    long_about = "A CLI for the calculators people reach for at home: utility bills, \
                  take-home pay, severance, loans, savings, ages and anniversaries. \
                  Money is computed in whole won with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Locale for headlines and error messages (ko or en)
    #[arg(long, default_value = "ko", global = true)]
    locale: String,

    /// Evaluate as of this date instead of the system date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<String>,

    /// Log calculator activity to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Residential electricity bill from kWh used
    Electric(UtilityArgs),
    /// City gas bill from m3 used
    Gas(UtilityArgs),
    /// Water and sewerage bill from m3 used
    Water(UtilityArgs),
    /// Apartment management fee estimate from floor area
    ManagementFee(ManagementFeeArgs),
    /// Annual income tax with local income tax
    IncomeTax(IncomeTaxArgs),
    /// Split an amount into supply value and VAT
    Vat(VatArgs),
    /// Monthly take-home pay after social insurance and withholding
    Salary(SalaryArgs),
    /// Overtime pay at the 1.5x premium
    Overtime(OvertimeArgs),
    /// Weekly paid rest allowance
    WeeklyRest(WeeklyRestArgs),
    /// Pay for unused annual leave
    AnnualLeave(AnnualLeaveArgs),
    /// Statutory severance pay
    Severance(SeveranceArgs),
    /// Job-seeker benefit and payment days
    Unemployment(UnemploymentArgs),
    /// Loan repayment (equal payment or equal principal)
    Loan(LoanArgs),
    /// Installment savings or time deposit maturity
    Savings(SavingsArgs),
    /// Monthly contribution needed to reach a savings goal
    GoalSavings(GoalSavingsArgs),
    /// Age in years, months and days
    Age(AgeArgs),
    /// Countdown to a date
    DDay(DDayArgs),
    /// Days since a baby was born, with the 100th day
    BabyDays(BabyDaysArgs),
    /// Military discharge date and progress
    MilitaryDischarge(DischargeArgs),
    /// Body mass index with the Korean obesity bands
    Bmi(BmiArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn form_context(locale: &str, today: Option<&str>) -> Result<FormContext, LifeCalcError> {
    let locale: Locale = locale.parse()?;
    let today = match today {
        Some(raw) => validation::parse_date("today", raw)?,
        None => chrono::Local::now().date_naive(),
    };
    Ok(FormContext::new(today, locale))
}

fn fail(message: &str) -> ! {
    eprintln!("{}: {}", "error".red().bold(), message);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = match form_context(&cli.locale, cli.today.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => fail(&e.to_string()),
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Electric(args) => commands::utility::run_utility("electric", args, &ctx),
        Commands::Gas(args) => commands::utility::run_utility("gas", args, &ctx),
        Commands::Water(args) => commands::utility::run_utility("water", args, &ctx),
        Commands::ManagementFee(args) => commands::utility::run_management_fee(args, &ctx),
        Commands::IncomeTax(args) => commands::tax::run_income_tax(args, &ctx),
        Commands::Vat(args) => commands::tax::run_vat(args, &ctx),
        Commands::Salary(args) => commands::payroll::run_salary(args, &ctx),
        Commands::Overtime(args) => commands::payroll::run_overtime(args, &ctx),
        Commands::WeeklyRest(args) => commands::payroll::run_weekly_rest(args, &ctx),
        Commands::AnnualLeave(args) => commands::payroll::run_annual_leave(args, &ctx),
        Commands::Severance(args) => commands::benefits::run_severance(args, &ctx),
        Commands::Unemployment(args) => commands::benefits::run_unemployment(args, &ctx),
        Commands::Loan(args) => commands::lending::run_loan(args, &ctx),
        Commands::Savings(args) => commands::savings::run_savings(args, &ctx),
        Commands::GoalSavings(args) => commands::savings::run_goal_savings(args, &ctx),
        Commands::Age(args) => commands::dates::run_age(args, &ctx),
        Commands::DDay(args) => commands::dates::run_d_day(args, &ctx),
        Commands::BabyDays(args) => commands::dates::run_baby_days(args, &ctx),
        Commands::MilitaryDischarge(args) => commands::dates::run_discharge(args, &ctx),
        Commands::Bmi(args) => commands::health::run_bmi(args, &ctx),
        Commands::Version => {
            println!("lifecalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            // calculator errors are shown the way the form would show them
            let message = match e.downcast_ref::<LifeCalcError>() {
                Some(err) => presentation::error_message(err, &ctx.presentation),
                None => e.to_string(),
            };
            fail(&message);
        }
    }
}
