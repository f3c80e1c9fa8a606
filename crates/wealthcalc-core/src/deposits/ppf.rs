use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{annual_rate, checked};
use crate::types::{
    require_positive, with_metadata, ComputationOutput, Money, Percent, YearlyBreakdown,
};
use crate::WealthCalcResult;

/// PPF accounts run for a fixed 15 years.
pub const PPF_TENURE_YEARS: u32 = 15;

pub const PPF_MIN_YEARLY_DEPOSIT: Money = dec!(500);
pub const PPF_MAX_YEARLY_DEPOSIT: Money = dec!(150_000);

/// Input for a Public Provident Fund account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfInput {
    /// Deposit made at the start of every year.
    pub yearly_deposit: Money,
    /// Annual interest rate in percent.
    pub annual_interest_rate: Percent,
}

/// Output from `calculate_ppf`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfResult {
    pub yearly_deposit: Money,
    pub annual_interest_rate: Percent,
    pub tenure_years: u32,
    pub total_deposited: Money,
    pub maturity_amount: Money,
    pub total_interest: Money,
    pub year_wise_breakdown: Vec<YearlyBreakdown>,
}

/// Public Provident Fund maturity over the fixed tenure, compounding yearly
/// with the deposit credited before interest.
///
/// Deposits outside the statutory band are accepted and flagged.
pub fn calculate_ppf(input: &PpfInput) -> WealthCalcResult<ComputationOutput<PpfResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("yearly_deposit", input.yearly_deposit)?;
    require_positive("annual_interest_rate", input.annual_interest_rate)?;

    if input.yearly_deposit < PPF_MIN_YEARLY_DEPOSIT {
        warnings.push(format!(
            "Yearly deposit {} is below the PPF minimum of {PPF_MIN_YEARLY_DEPOSIT}",
            input.yearly_deposit
        ));
    } else if input.yearly_deposit > PPF_MAX_YEARLY_DEPOSIT {
        warnings.push(format!(
            "Yearly deposit {} exceeds the PPF limit of {PPF_MAX_YEARLY_DEPOSIT}",
            input.yearly_deposit
        ));
    }

    let r = annual_rate(input.annual_interest_rate);

    let mut balance = Decimal::ZERO;
    let mut deposited = Decimal::ZERO;
    let mut year_wise_breakdown = Vec::with_capacity(PPF_TENURE_YEARS as usize);

    for year in 1..=PPF_TENURE_YEARS {
        let opening = balance;
        balance = checked(balance.checked_add(input.yearly_deposit), "PPF balance")?;
        deposited += input.yearly_deposit;
        let interest = checked(balance.checked_mul(r), "PPF interest")?;
        balance = checked(balance.checked_add(interest), "PPF balance")?;

        year_wise_breakdown.push(YearlyBreakdown {
            year,
            opening_amount: opening,
            deposited: input.yearly_deposit,
            yearly_interest: interest,
            cumulative_interest: balance - deposited,
            closing_amount: balance,
        });
    }

    let output = PpfResult {
        yearly_deposit: input.yearly_deposit,
        annual_interest_rate: input.annual_interest_rate,
        tenure_years: PPF_TENURE_YEARS,
        total_deposited: deposited,
        maturity_amount: balance,
        total_interest: balance - deposited,
        year_wise_breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "PPF (15-year tenure, annual compounding, deposit at start of year)",
        &serde_json::json!({
            "annual_rate": r.to_string(),
            "tenure_years": PPF_TENURE_YEARS,
            "deposit_band": [PPF_MIN_YEARLY_DEPOSIT.to_string(), PPF_MAX_YEARLY_DEPOSIT.to_string()],
        }),
        warnings,
        elapsed,
        output,
    ))
}
