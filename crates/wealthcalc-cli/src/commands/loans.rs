use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealthcalc_core::loans::emi::{self, EmiInput};

use crate::input;

/// Arguments for an EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub annual_interest_rate: Option<Decimal>,

    /// Loan tenure in months
    #[arg(long)]
    pub tenure_months: Option<u32>,

    /// Drop the month-by-month schedule from the output
    #[arg(long)]
    pub summary_only: bool,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input: EmiInput = match input::read_input(args.input.as_deref())? {
        Some(doc) => doc,
        None => EmiInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate: args
                .annual_interest_rate
                .ok_or("--annual-interest-rate is required (or provide --input)")?,
            tenure_months: args
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
        },
    };
    let mut result = emi::calculate_emi(&emi_input)?;
    if args.summary_only {
        result.result.schedule.clear();
    }
    Ok(serde_json::to_value(result)?)
}
