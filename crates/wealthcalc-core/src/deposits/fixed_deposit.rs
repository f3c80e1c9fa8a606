use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::WealthCalcError;
use crate::time_value::{checked, growth_factor, periodic_rate};
use crate::types::{
    require_positive, with_metadata, ComputationOutput, Money, Percent, Years,
    YearlyBreakdown,
};
use crate::WealthCalcResult;

/// Fixed deposits compound quarterly when compounding is selected.
pub const FD_COMPOUNDING_PERIODS_PER_YEAR: u32 = 4;

fn default_compound() -> bool {
    true
}

/// Input for a fixed deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdInput {
    pub principal: Money,
    /// Annual interest rate in percent.
    pub annual_interest_rate: Percent,
    /// Tenure in years; fractions allowed (1.5 = 18 months).
    pub tenure_years: Years,
    /// Quarterly compounding when true, simple interest when false.
    #[serde(default = "default_compound")]
    pub compound_quarterly: bool,
}

/// Output from `calculate_fd`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdResult {
    pub principal: Money,
    pub annual_interest_rate: Percent,
    pub tenure_years: Years,
    pub compound_quarterly: bool,
    pub maturity_amount: Money,
    pub total_interest: Money,
    pub year_wise_breakdown: Vec<YearlyBreakdown>,
}

/// Fixed deposit maturity.
///
/// Simple: `P * r * t / 100`. Compound: `P * (1 + r/400)^(4t) - P`. The
/// breakdown has one row per started year; a fractional tenure makes the
/// final row a partial year.
pub fn calculate_fd(input: &FdInput) -> WealthCalcResult<ComputationOutput<FdResult>> {
    let start = Instant::now();

    require_positive("principal", input.principal)?;
    require_positive("annual_interest_rate", input.annual_interest_rate)?;
    require_positive("tenure_years", input.tenure_years)?;

    let years = input
        .tenure_years
        .ceil()
        .to_u32()
        .ok_or_else(|| WealthCalcError::InvalidInput {
            field: "tenure_years".into(),
            reason: "tenure_years is out of range".into(),
        })?;

    let q = periodic_rate(input.annual_interest_rate, FD_COMPOUNDING_PERIODS_PER_YEAR);
    let value_at = |t: Years| -> WealthCalcResult<Money> {
        if input.compound_quarterly {
            let quarters = t * Decimal::from(FD_COMPOUNDING_PERIODS_PER_YEAR);
            let growth = growth_factor(q, quarters)?;
            checked(input.principal.checked_mul(growth), "FD value")
        } else {
            checked(
                input
                    .principal
                    .checked_mul(input.annual_interest_rate / Decimal::ONE_HUNDRED)
                    .and_then(|v| v.checked_mul(t))
                    .and_then(|interest| input.principal.checked_add(interest)),
                "FD value",
            )
        }
    };

    let mut year_wise_breakdown = Vec::with_capacity(years as usize);
    let mut opening = Decimal::ZERO;
    for year in 1..=years {
        let elapsed = Decimal::from(year).min(input.tenure_years);
        let closing = value_at(elapsed)?;
        let deposited = if year == 1 { input.principal } else { Decimal::ZERO };
        year_wise_breakdown.push(YearlyBreakdown {
            year,
            opening_amount: opening,
            deposited,
            yearly_interest: closing - opening - deposited,
            cumulative_interest: closing - input.principal,
            closing_amount: closing,
        });
        opening = closing;
    }

    let maturity_amount = value_at(input.tenure_years)?;
    let total_interest = maturity_amount - input.principal;

    let output = FdResult {
        principal: input.principal,
        annual_interest_rate: input.annual_interest_rate,
        tenure_years: input.tenure_years,
        compound_quarterly: input.compound_quarterly,
        maturity_amount,
        total_interest,
        year_wise_breakdown,
    };

    let methodology = if input.compound_quarterly {
        "Fixed deposit (quarterly compounding)"
    } else {
        "Fixed deposit (simple interest)"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &serde_json::json!({
            "quarterly_rate": input.compound_quarterly.then(|| q.to_string()),
            "tenure_years": input.tenure_years.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}
