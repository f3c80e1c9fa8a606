//! Goal progress: how far net savings have come against a dated target, and
//! whether that is ahead of the straight-line schedule.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::WealthCalcError;
use crate::investments::goal::Milestone;
use crate::time_value::checked;
use crate::types::{
    require_non_negative, require_positive, with_metadata, ComputationOutput, Money, Percent,
};
use crate::WealthCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A dated goal and the money saved and owed against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgressInput {
    pub target_amount: Money,
    /// Sum of every saving linked to the goal.
    pub total_savings: Money,
    /// Sum of every debt linked to the goal.
    #[serde(default)]
    pub total_debts: Money,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    /// Evaluation date; today's local date when absent.
    #[serde(default = "today")]
    pub as_of: NaiveDate,
}

/// Output from `evaluate_goal_progress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub target_amount: Money,
    /// Savings less debts; may be negative.
    pub net_saved: Money,
    pub remaining_amount: Money,
    pub progress_pct: Percent,
    /// Share of the goal window already elapsed, 0..=100.
    pub expected_pct: Percent,
    pub on_track: bool,
    pub days_elapsed: i64,
    pub days_total: i64,
    pub days_remaining: i64,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Compare actual progress with the time-based expectation.
///
/// `progress_pct = (savings - debts) / target * 100` and
/// `expected_pct = elapsed_days / total_days * 100`, clamped to 0..=100.
/// The goal is on track when progress is at least the expectation.
pub fn evaluate_goal_progress(
    input: &GoalProgressInput,
) -> WealthCalcResult<ComputationOutput<GoalProgress>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("target_amount", input.target_amount)?;
    require_non_negative("total_savings", input.total_savings)?;
    require_non_negative("total_debts", input.total_debts)?;

    let days_total = (input.target_date - input.start_date).num_days();
    if days_total <= 0 {
        return Err(WealthCalcError::DateError(format!(
            "target date {} must be after start date {}",
            input.target_date, input.start_date
        )));
    }

    let days_elapsed = (input.as_of - input.start_date).num_days().clamp(0, days_total);
    let days_remaining = (input.target_date - input.as_of).num_days().max(0);

    let net_saved = input.total_savings - input.total_debts;
    let progress_pct = checked(
        net_saved
            .checked_div(input.target_amount)
            .and_then(|v| v.checked_mul(Decimal::ONE_HUNDRED)),
        "goal progress percentage",
    )?;
    let remaining_amount = checked(
        input.target_amount.checked_sub(net_saved),
        "goal remaining amount",
    )?
    .max(Decimal::ZERO);
    let expected_pct =
        Decimal::from(days_elapsed) / Decimal::from(days_total) * Decimal::ONE_HUNDRED;
    let on_track = progress_pct >= expected_pct;

    if net_saved < Decimal::ZERO {
        warnings.push("Debts exceed savings; net progress is negative".into());
    }
    if input.as_of > input.target_date && progress_pct < Decimal::ONE_HUNDRED {
        warnings.push(format!(
            "Target date {} has passed with the goal unmet",
            input.target_date
        ));
    }

    tracing::trace!(%progress_pct, %expected_pct, on_track, "goal progress evaluated");

    let output = GoalProgress {
        target_amount: input.target_amount,
        net_saved,
        remaining_amount,
        progress_pct,
        expected_pct,
        on_track,
        days_elapsed,
        days_total,
        days_remaining,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Goal progress (net savings over target vs elapsed share of goal window)",
        &serde_json::json!({
            "start_date": input.start_date,
            "target_date": input.target_date,
            "as_of": input.as_of,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Mark milestones whose amount is covered by `net_saved`.
///
/// Milestones never revert to unachieved. Returns how many flipped.
pub fn update_milestones(milestones: &mut [Milestone], net_saved: Money) -> usize {
    let mut flipped = 0;
    for milestone in milestones.iter_mut().filter(|m| !m.achieved) {
        if net_saved >= milestone.target_amount {
            milestone.achieved = true;
            flipped += 1;
        }
    }
    flipped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
