use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealthcalc_core::deposits::fixed_deposit::{self, FdInput};
use wealthcalc_core::deposits::ppf::{self, PpfInput};
use wealthcalc_core::deposits::recurring_deposit::{self, RdInput};

use crate::input;

/// Arguments for a fixed deposit
#[derive(Args)]
pub struct FdArgs {
    /// Amount deposited
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub annual_interest_rate: Option<Decimal>,

    /// Tenure in years (fractions allowed)
    #[arg(long)]
    pub tenure_years: Option<Decimal>,

    /// Use simple interest instead of quarterly compounding
    #[arg(long)]
    pub simple: bool,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a recurring deposit
#[derive(Args)]
pub struct RdArgs {
    /// Deposit made every month
    #[arg(long)]
    pub monthly_deposit: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub annual_interest_rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure_months: Option<u32>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a PPF projection
#[derive(Args)]
pub struct PpfArgs {
    /// Deposit made every year
    #[arg(long)]
    pub yearly_deposit: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub annual_interest_rate: Option<Decimal>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_fd(args: FdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fd_input: FdInput = match input::read_input(args.input.as_deref())? {
        Some(doc) => doc,
        None => FdInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate: args
                .annual_interest_rate
                .ok_or("--annual-interest-rate is required (or provide --input)")?,
            tenure_years: args
                .tenure_years
                .ok_or("--tenure-years is required (or provide --input)")?,
            compound_quarterly: !args.simple,
        },
    };
    let result = fixed_deposit::calculate_fd(&fd_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_rd(args: RdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rd_input: RdInput = match input::read_input(args.input.as_deref())? {
        Some(doc) => doc,
        None => RdInput {
            monthly_deposit: args
                .monthly_deposit
                .ok_or("--monthly-deposit is required (or provide --input)")?,
            annual_interest_rate: args
                .annual_interest_rate
                .ok_or("--annual-interest-rate is required (or provide --input)")?,
            tenure_months: args
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
        },
    };
    let result = recurring_deposit::calculate_rd(&rd_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_ppf(args: PpfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ppf_input: PpfInput = match input::read_input(args.input.as_deref())? {
        Some(doc) => doc,
        None => PpfInput {
            yearly_deposit: args
                .yearly_deposit
                .ok_or("--yearly-deposit is required (or provide --input)")?,
            annual_interest_rate: args
                .annual_interest_rate
                .ok_or("--annual-interest-rate is required (or provide --input)")?,
        },
    };
    let result = ppf::calculate_ppf(&ppf_input)?;
    Ok(serde_json::to_value(result)?)
}
