use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::InterestRow;
use crate::time_value::{checked, compound, periodic_rate};
use crate::types::{
    require_nonzero_count, require_positive, with_metadata, ComputationOutput, Money, Percent,
};
use crate::WealthCalcResult;

/// How often interest is credited within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Annually,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }
}

fn default_frequency() -> CompoundingFrequency {
    CompoundingFrequency::Annually
}

/// Input for compound interest; compounding defaults to annual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub principal: Money,
    /// Annual interest rate in percent.
    pub annual_interest_rate: Percent,
    pub time_years: u32,
    #[serde(default = "default_frequency")]
    pub frequency: CompoundingFrequency,
}

/// Output from `calculate_compound_interest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub principal: Money,
    pub annual_interest_rate: Percent,
    pub time_years: u32,
    pub frequency: CompoundingFrequency,
    pub interest: Money,
    pub total_amount: Money,
    pub yearly_breakdown: Vec<InterestRow>,
}

/// Compound interest `A = P * (1 + r/(100f))^(f*t)`.
///
/// Each yearly row compounds the previous closing amount through `f`
/// periods, so the last closing equals `A`.
pub fn calculate_compound_interest(
    input: &CompoundInterestInput,
) -> WealthCalcResult<ComputationOutput<CompoundInterestResult>> {
    let start = Instant::now();

    require_positive("principal", input.principal)?;
    require_positive("annual_interest_rate", input.annual_interest_rate)?;
    require_nonzero_count("time_years", input.time_years)?;

    let f = input.frequency.periods_per_year();
    let rate = periodic_rate(input.annual_interest_rate, f);
    let year_factor = compound(rate, f)?;

    let mut amount = input.principal;
    let mut yearly_breakdown = Vec::with_capacity(input.time_years as usize);
    for year in 1..=input.time_years {
        let opening = amount;
        amount = checked(opening.checked_mul(year_factor), "compound interest amount")?;
        yearly_breakdown.push(InterestRow {
            year,
            opening_amount: opening,
            yearly_interest: amount - opening,
            cumulative_interest: amount - input.principal,
            closing_amount: amount,
        });
    }

    let output = CompoundInterestResult {
        principal: input.principal,
        annual_interest_rate: input.annual_interest_rate,
        time_years: input.time_years,
        frequency: input.frequency,
        interest: amount - input.principal,
        total_amount: amount,
        yearly_breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound interest (P * (1 + r/f)^(f*t))",
        &serde_json::json!({
            "periods_per_year": f,
            "periodic_rate": rate.to_string(),
            "annual_growth_factor": year_factor.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}
