mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::deposits::{FdArgs, PpfArgs, RdArgs};
use commands::goals::GoalProgressArgs;
use commands::interest::{CompoundInterestArgs, SimpleInterestArgs};
use commands::investments::{GoalSipArgs, SipArgs, SwpArgs};
use commands::loans::EmiArgs;

/// Personal-finance projections with decimal precision
#[derive(Parser)]
#[command(
    name = "wcalc",
    version,
    about = "Personal-finance projections with decimal precision",
    long_about = "A CLI for SIP and SWP projections with step-up, goal planning, \
                  loan EMIs, fixed/recurring deposits, PPF and simple or compound \
                  interest. Inputs come from flags, a JSON/YAML file or piped JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a Systematic Investment Plan with optional yearly step-up
    Sip(SipArgs),
    /// Project a Systematic Withdrawal Plan and detect corpus exhaustion
    Swp(SwpArgs),
    /// Monthly SIP needed to reach a goal, with milestones
    GoalSip(GoalSipArgs),
    /// Loan EMI with amortization schedule
    Emi(EmiArgs),
    /// Fixed deposit maturity
    Fd(FdArgs),
    /// Recurring deposit maturity
    Rd(RdArgs),
    /// Public Provident Fund maturity
    Ppf(PpfArgs),
    /// Simple interest with yearly rows
    SimpleInterest(SimpleInterestArgs),
    /// Compound interest with yearly rows
    CompoundInterest(CompoundInterestArgs),
    /// Progress of a savings goal against its timeline
    GoalProgress(GoalProgressArgs),
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

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sip(args) => commands::investments::run_sip(args),
        Commands::Swp(args) => commands::investments::run_swp(args),
        Commands::GoalSip(args) => commands::investments::run_goal_sip(args),
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::Fd(args) => commands::deposits::run_fd(args),
        Commands::Rd(args) => commands::deposits::run_rd(args),
        Commands::Ppf(args) => commands::deposits::run_ppf(args),
        Commands::SimpleInterest(args) => commands::interest::run_simple_interest(args),
        Commands::CompoundInterest(args) => commands::interest::run_compound_interest(args),
        Commands::GoalProgress(args) => commands::goals::run_goal_progress(args),
        Commands::Version => {
            println!("wcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            if let Some(Value::Array(warnings)) = value.get("warnings") {
                for w in warnings.iter().filter_map(Value::as_str) {
                    tracing::warn!("{w}");
                }
            }
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
