//! Goal planning: the monthly SIP needed to reach a target, milestone
//! projections and a heuristic achievement probability.
//!
//! With a step-up the required SIP comes from a rate-adjustment heuristic
//! (`r + step_up/100/12` fed into the plain annuity inversion) rather than a
//! true growing-annuity solution. Outputs depend on that exact formula, so
//! it is kept as is.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::schedule::step_up;
use crate::time_value::{annual_rate, checked, compound, monthly_rate, sinking_fund_payment};
use crate::types::{
    require_non_negative, require_nonzero_count, require_positive, with_metadata,
    ComputationOutput, Money, Percent,
};
use crate::WealthCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Milestones reported for every goal, as percentages of the target.
pub const MILESTONE_PERCENTAGES: [u32; 4] = [25, 50, 75, 100];

/// Forward milestone search gives up after 50 years.
pub const MILESTONE_SEARCH_CAP_MONTHS: u32 = 600;

const MAX_ACHIEVEMENT_PROBABILITY: Decimal = dec!(0.95);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for goal planning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalInput {
    pub target_amount: Money,
    /// Years until the goal is due.
    pub time_horizon: u32,
    /// Lump sum already available today.
    #[serde(default)]
    pub initial_amount: Money,
    /// Expected annual return in percent.
    pub expected_return: Percent,
    #[serde(default)]
    pub step_up_percentage: Percent,
}

/// A fraction of the goal and how long the plan takes to get there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub percentage: u32,
    pub target_amount: Money,
    /// Whole years (floored) of the forward simulation.
    pub time_to_reach_years: u32,
    /// Always false when computed; flipped by progress tracking.
    pub achieved: bool,
}

/// Output from `calculate_goal_sip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalResult {
    pub target_amount: Money,
    pub required_monthly_sip: Money,
    pub time_horizon: u32,
    pub initial_amount: Money,
    pub expected_return: Percent,
    pub step_up_percentage: Percent,
    pub future_value_of_lump_sum: Money,
    pub achievement_probability: Decimal,
    pub milestones: Vec<Milestone>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Solve for the monthly SIP that funds `target_amount` within the horizon.
///
/// A lump sum larger than the target produces a negative required SIP; it
/// is passed through and flagged in the warnings.
pub fn calculate_goal_sip(input: &GoalInput) -> WealthCalcResult<ComputationOutput<GoalResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("target_amount", input.target_amount)?;
    require_nonzero_count("time_horizon", input.time_horizon)?;
    require_non_negative("initial_amount", input.initial_amount)?;
    require_positive("expected_return", input.expected_return)?;
    require_non_negative("step_up_percentage", input.step_up_percentage)?;

    let r = monthly_rate(input.expected_return);
    let n = input.time_horizon * 12;

    // Lump sum compounds annually at the headline rate
    let lump_growth = compound(annual_rate(input.expected_return), input.time_horizon)?;
    let fv_lump = checked(
        input.initial_amount.checked_mul(lump_growth),
        "lump sum future value",
    )?;
    let remaining = input.target_amount - fv_lump;

    if remaining < Decimal::ZERO {
        tracing::debug!(%remaining, "lump sum alone exceeds goal target");
        warnings.push(format!(
            "Initial amount grows to {} which already exceeds the target; required SIP is negative",
            fv_lump.round_dp(2)
        ));
    }

    let required_monthly_sip = if input.step_up_percentage.is_zero() {
        sinking_fund_payment(remaining, r, n)?
    } else {
        let adjusted_rate = r + input.step_up_percentage / dec!(100) / dec!(12);
        sinking_fund_payment(remaining, adjusted_rate, n)?
    };

    let mut milestones = Vec::with_capacity(MILESTONE_PERCENTAGES.len());
    for pct in MILESTONE_PERCENTAGES {
        let target = input.target_amount / dec!(100) * Decimal::from(pct);
        let months = months_to_reach(
            target,
            input.initial_amount,
            required_monthly_sip,
            r,
            input.step_up_percentage,
        )?;
        if months >= MILESTONE_SEARCH_CAP_MONTHS {
            warnings.push(format!(
                "{pct}% milestone not reached within {MILESTONE_SEARCH_CAP_MONTHS} months"
            ));
        }
        milestones.push(Milestone {
            percentage: pct,
            target_amount: target,
            time_to_reach_years: months / 12,
            achieved: false,
        });
    }

    let output = GoalResult {
        target_amount: input.target_amount,
        required_monthly_sip,
        time_horizon: input.time_horizon,
        initial_amount: input.initial_amount,
        expected_return: input.expected_return,
        step_up_percentage: input.step_up_percentage,
        future_value_of_lump_sum: fv_lump,
        achievement_probability: achievement_probability(
            input.expected_return,
            input.time_horizon,
        ),
        milestones,
    };

    let methodology = if input.step_up_percentage.is_zero() {
        "Goal SIP (ordinary annuity inversion on target less compounded lump sum)"
    } else {
        "Goal SIP (step-up approximated by raising the monthly rate by step_up/12; heuristic)"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &serde_json::json!({
            "monthly_rate": r.to_string(),
            "months": n,
            "remaining_after_lump_sum": remaining.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Heuristic likelihood of reaching the goal, from the return assumption
/// and horizon alone. Not a statistical estimate.
///
/// Base by return: ≤8% 0.85, ≤12% 0.75, ≤15% 0.65, else 0.55.
/// Horizon bonus: ≥15y +0.10, ≥10y +0.05, ≥5y +0.02. Capped at 0.95.
pub fn achievement_probability(expected_return: Percent, time_horizon: u32) -> Decimal {
    let base = if expected_return <= dec!(8) {
        dec!(0.85)
    } else if expected_return <= dec!(12) {
        dec!(0.75)
    } else if expected_return <= dec!(15) {
        dec!(0.65)
    } else {
        dec!(0.55)
    };

    let bonus = match time_horizon {
        h if h >= 15 => dec!(0.10),
        h if h >= 10 => dec!(0.05),
        h if h >= 5 => dec!(0.02),
        _ => Decimal::ZERO,
    };

    (base + bonus).min(MAX_ACHIEVEMENT_PROBABILITY)
}

/// Months of contributions (each followed by a month of interest) until the
/// balance reaches `target`, capped at [`MILESTONE_SEARCH_CAP_MONTHS`].
fn months_to_reach(
    target: Money,
    initial_amount: Money,
    monthly_sip: Money,
    r: Decimal,
    step_up_percentage: Percent,
) -> WealthCalcResult<u32> {
    let mut balance = initial_amount;
    let mut sip = monthly_sip;
    let mut months = 0;

    while balance < target && months < MILESTONE_SEARCH_CAP_MONTHS {
        balance = checked(balance.checked_add(sip), "milestone balance")?;
        let interest = checked(balance.checked_mul(r), "milestone interest")?;
        balance = checked(balance.checked_add(interest), "milestone balance")?;
        months += 1;
        if months % 12 == 0 {
            sip = step_up(sip, step_up_percentage)?;
        }
    }

    if balance < target {
        tracing::debug!(%target, months, "milestone search hit the cap");
    }
    Ok(months)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
