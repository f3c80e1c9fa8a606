use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealthcalc_core::goals::ledger::GoalLedger;
use wealthcalc_core::goals::progress::{self, GoalProgressInput};

use crate::input;

/// Arguments for goal progress
#[derive(Args)]
pub struct GoalProgressArgs {
    /// Goal target amount
    #[arg(long)]
    pub target_amount: Option<Decimal>,

    /// Sum of savings linked to the goal
    #[arg(long)]
    pub total_savings: Option<Decimal>,

    /// Sum of debts linked to the goal
    #[arg(long, default_value = "0")]
    pub total_debts: Decimal,

    /// Goal start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Goal target date (YYYY-MM-DD)
    #[arg(long)]
    pub target_date: Option<NaiveDate>,

    /// Evaluation date, defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Ledger document (JSON/YAML) to read the goal and its totals from
    #[arg(long, requires = "goal_id")]
    pub ledger: Option<String>,

    /// Goal id inside --ledger
    #[arg(long)]
    pub goal_id: Option<String>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long, conflicts_with = "ledger")]
    pub input: Option<String>,
}

pub fn run_goal_progress(args: GoalProgressArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    if let Some(ref path) = args.ledger {
        let ledger: GoalLedger = input::file::read_document(path)?;
        let goal_id = args.goal_id.as_deref().ok_or("--goal-id is required with --ledger")?;
        let result = ledger.progress(goal_id, as_of)?;
        return Ok(serde_json::to_value(result)?);
    }

    let progress_input: GoalProgressInput = match input::read_input(args.input.as_deref())? {
        Some(doc) => doc,
        None => GoalProgressInput {
            target_amount: args
                .target_amount
                .ok_or("--target-amount is required (or provide --input)")?,
            total_savings: args
                .total_savings
                .ok_or("--total-savings is required (or provide --input)")?,
            total_debts: args.total_debts,
            start_date: args
                .start_date
                .ok_or("--start-date is required (or provide --input)")?,
            target_date: args
                .target_date
                .ok_or("--target-date is required (or provide --input)")?,
            as_of,
        },
    };
    let result = progress::evaluate_goal_progress(&progress_input)?;
    Ok(serde_json::to_value(result)?)
}
