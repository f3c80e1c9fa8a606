use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::schedule::{step_up, YearBuilder, YearWiseData};
use crate::time_value::{checked, monthly_rate};
use crate::types::{
    require_non_negative, require_nonzero_count, require_positive, with_metadata,
    ComputationOutput, Money, Percent,
};
use crate::WealthCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a Systematic Withdrawal Plan projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpInput {
    pub initial_corpus: Money,
    /// Withdrawal in the first year, taken at the start of every month.
    pub monthly_withdrawal: Money,
    /// Expected annual return in percent.
    pub annual_return_rate: Percent,
    pub duration_in_years: u32,
    /// Annual increase of the monthly withdrawal, in percent.
    #[serde(default)]
    pub step_up_percentage: Percent,
}

/// Output from `calculate_swp`.
///
/// Withdrawals appear as negative cash flows in `year_wise_data`; the
/// summary fields carry positive magnitudes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpResult {
    pub initial_corpus: Money,
    pub monthly_withdrawal: Money,
    pub remaining_corpus: Money,
    pub total_withdrawn: Money,
    pub annual_return_rate: Percent,
    pub duration_in_years: u32,
    pub step_up_percentage: Percent,
    pub year_wise_data: Vec<YearWiseData>,
    pub corpus_exhaustion_warning: bool,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Simulate an SWP month by month.
///
/// Each month the withdrawal is taken first and interest accrues on what is
/// left. The run stops as soon as the balance can no longer cover a full
/// withdrawal; the year in progress is still reported with the months that
/// completed (possibly none) and no later years follow.
pub fn calculate_swp(input: &SwpInput) -> WealthCalcResult<ComputationOutput<SwpResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("initial_corpus", input.initial_corpus)?;
    require_positive("monthly_withdrawal", input.monthly_withdrawal)?;
    require_positive("annual_return_rate", input.annual_return_rate)?;
    require_nonzero_count("duration_in_years", input.duration_in_years)?;
    require_non_negative("step_up_percentage", input.step_up_percentage)?;

    let r = monthly_rate(input.annual_return_rate);

    let mut balance = input.initial_corpus;
    let mut total_withdrawn = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut current_withdrawal = input.monthly_withdrawal;
    let mut corpus_exhausted = false;
    let mut year_wise_data = Vec::with_capacity(input.duration_in_years as usize);

    for year in 1..=input.duration_in_years {
        let mut builder = YearBuilder::new(year, balance, current_withdrawal);

        for month in 1..=12 {
            if balance <= current_withdrawal {
                corpus_exhausted = true;
                tracing::debug!(year, month, %balance, "SWP corpus exhausted");
                warnings.push(format!(
                    "Corpus exhausted in year {year}, month {month}: balance {} cannot cover withdrawal {}",
                    balance.round_dp(2),
                    current_withdrawal.round_dp(2)
                ));
                break;
            }

            let opening = balance;
            balance -= current_withdrawal;
            total_withdrawn = checked(
                total_withdrawn.checked_add(current_withdrawal),
                "SWP total withdrawn",
            )?;

            let interest = checked(balance.checked_mul(r), "SWP interest")?;
            balance = checked(balance.checked_add(interest), "SWP balance")?;
            total_interest = checked(total_interest.checked_add(interest), "SWP total interest")?;

            builder.record(month, opening, -current_withdrawal, interest, balance)?;
        }

        year_wise_data.push(builder.finish(balance, -total_withdrawn, total_interest));

        if corpus_exhausted {
            break;
        }

        if input.step_up_percentage > Decimal::ZERO {
            current_withdrawal = step_up(current_withdrawal, input.step_up_percentage)?;
        }
    }

    let output = SwpResult {
        initial_corpus: input.initial_corpus,
        monthly_withdrawal: input.monthly_withdrawal,
        remaining_corpus: balance,
        total_withdrawn,
        annual_return_rate: input.annual_return_rate,
        duration_in_years: input.duration_in_years,
        step_up_percentage: input.step_up_percentage,
        year_wise_data,
        corpus_exhaustion_warning: corpus_exhausted,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SWP projection (monthly compounding, withdrawal before interest, annual step-up, stops on exhaustion)",
        &serde_json::json!({
            "monthly_rate": r.to_string(),
            "months": input.duration_in_years * 12,
            "step_up_percentage": input.step_up_percentage.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
