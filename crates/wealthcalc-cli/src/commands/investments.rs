use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealthcalc_core::investments::goal::{self, GoalInput};
use wealthcalc_core::investments::sip::{self, SipInput};
use wealthcalc_core::investments::swp::{self, SwpInput};

use crate::input;

/// Arguments for a SIP projection
#[derive(Args)]
pub struct SipArgs {
    /// Monthly contribution in the first year
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Expected annual return in percent (12 = 12%)
    #[arg(long)]
    pub annual_return_rate: Option<Decimal>,

    /// Investment horizon in whole years
    #[arg(long)]
    pub duration_in_years: Option<u32>,

    /// Yearly increase of the contribution in percent
    #[arg(long, default_value = "0")]
    pub step_up_percentage: Decimal,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a SWP projection
#[derive(Args)]
pub struct SwpArgs {
    /// Corpus at the start of the plan
    #[arg(long)]
    pub initial_corpus: Option<Decimal>,

    /// Monthly withdrawal in the first year
    #[arg(long)]
    pub monthly_withdrawal: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long)]
    pub annual_return_rate: Option<Decimal>,

    /// Plan length in whole years
    #[arg(long)]
    pub duration_in_years: Option<u32>,

    /// Yearly increase of the withdrawal in percent
    #[arg(long, default_value = "0")]
    pub step_up_percentage: Decimal,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for goal SIP planning
#[derive(Args)]
pub struct GoalSipArgs {
    /// Amount the goal needs
    #[arg(long)]
    pub target_amount: Option<Decimal>,

    /// Years until the goal is due
    #[arg(long)]
    pub time_horizon: Option<u32>,

    /// Lump sum available today
    #[arg(long, default_value = "0")]
    pub initial_amount: Decimal,

    /// Expected annual return in percent
    #[arg(long)]
    pub expected_return: Option<Decimal>,

    /// Yearly SIP increase in percent
    #[arg(long, default_value = "0")]
    pub step_up_percentage: Decimal,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipInput = match input::read_input(args.input.as_deref())? {
        Some(doc) => doc,
        None => SipInput {
            monthly_investment: args
                .monthly_investment
                .ok_or("--monthly-investment is required (or provide --input)")?,
            annual_return_rate: args
                .annual_return_rate
                .ok_or("--annual-return-rate is required (or provide --input)")?,
            duration_in_years: args
                .duration_in_years
                .ok_or("--duration-in-years is required (or provide --input)")?,
            step_up_percentage: args.step_up_percentage,
        },
    };
    let result = sip::calculate_sip(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_swp(args: SwpArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let swp_input: SwpInput = match input::read_input(args.input.as_deref())? {
        Some(doc) => doc,
        None => SwpInput {
            initial_corpus: args
                .initial_corpus
                .ok_or("--initial-corpus is required (or provide --input)")?,
            monthly_withdrawal: args
                .monthly_withdrawal
                .ok_or("--monthly-withdrawal is required (or provide --input)")?,
            annual_return_rate: args
                .annual_return_rate
                .ok_or("--annual-return-rate is required (or provide --input)")?,
            duration_in_years: args
                .duration_in_years
                .ok_or("--duration-in-years is required (or provide --input)")?,
            step_up_percentage: args.step_up_percentage,
        },
    };
    let result = swp::calculate_swp(&swp_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_goal_sip(args: GoalSipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let goal_input: GoalInput = match input::read_input(args.input.as_deref())? {
        Some(doc) => doc,
        None => GoalInput {
            target_amount: args
                .target_amount
                .ok_or("--target-amount is required (or provide --input)")?,
            time_horizon: args
                .time_horizon
                .ok_or("--time-horizon is required (or provide --input)")?,
            initial_amount: args.initial_amount,
            expected_return: args
                .expected_return
                .ok_or("--expected-return is required (or provide --input)")?,
            step_up_percentage: args.step_up_percentage,
        },
    };
    let result = goal::calculate_goal_sip(&goal_input)?;
    Ok(serde_json::to_value(result)?)
}
