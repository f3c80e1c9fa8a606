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

/// Input parameters for a Systematic Investment Plan projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    /// Contribution in the first year, paid at the start of every month.
    pub monthly_investment: Money,
    /// Expected annual return in percent (12 = 12%).
    pub annual_return_rate: Percent,
    pub duration_in_years: u32,
    /// Annual increase of the monthly contribution, in percent.
    #[serde(default)]
    pub step_up_percentage: Percent,
}

/// Output from `calculate_sip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipResult {
    pub monthly_investment: Money,
    pub total_invested: Money,
    pub maturity_amount: Money,
    pub total_gains: Money,
    pub annual_return_rate: Percent,
    pub duration_in_years: u32,
    pub step_up_percentage: Percent,
    pub year_wise_data: Vec<YearWiseData>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Simulate a SIP month by month.
///
/// Each month the contribution is added first and interest then accrues on
/// the post-contribution balance. The step-up is applied once per year,
/// after the twelfth month.
pub fn calculate_sip(input: &SipInput) -> WealthCalcResult<ComputationOutput<SipResult>> {
    let start = Instant::now();

    require_positive("monthly_investment", input.monthly_investment)?;
    require_positive("annual_return_rate", input.annual_return_rate)?;
    require_nonzero_count("duration_in_years", input.duration_in_years)?;
    require_non_negative("step_up_percentage", input.step_up_percentage)?;

    let r = monthly_rate(input.annual_return_rate);

    let mut balance = Decimal::ZERO;
    let mut total_invested = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut current_monthly = input.monthly_investment;
    let mut year_wise_data = Vec::with_capacity(input.duration_in_years as usize);

    for year in 1..=input.duration_in_years {
        let mut builder = YearBuilder::new(year, balance, current_monthly);

        for month in 1..=12 {
            let opening = balance;
            balance = checked(balance.checked_add(current_monthly), "SIP balance")?;
            // Both running totals are bounded by the balance.
            total_invested += current_monthly;

            let interest = checked(balance.checked_mul(r), "SIP interest")?;
            balance = checked(balance.checked_add(interest), "SIP balance")?;
            total_interest += interest;

            builder.record(month, opening, current_monthly, interest, balance)?;
        }

        year_wise_data.push(builder.finish(balance, total_invested, total_interest));

        if input.step_up_percentage > Decimal::ZERO {
            current_monthly = step_up(current_monthly, input.step_up_percentage)?;
        }
    }

    let maturity_amount = balance;
    let total_gains = maturity_amount - total_invested;

    tracing::trace!(
        years = input.duration_in_years,
        %total_invested,
        %maturity_amount,
        "SIP projection complete"
    );

    let output = SipResult {
        monthly_investment: input.monthly_investment,
        total_invested,
        maturity_amount,
        total_gains,
        annual_return_rate: input.annual_return_rate,
        duration_in_years: input.duration_in_years,
        step_up_percentage: input.step_up_percentage,
        year_wise_data,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SIP projection (monthly compounding, contribution before interest, annual step-up)",
        &serde_json::json!({
            "monthly_rate": r.to_string(),
            "months": input.duration_in_years * 12,
            "step_up_percentage": input.step_up_percentage.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WealthCalcError;
    use rust_decimal_macros::dec;

    fn default_input() -> SipInput {
        SipInput {
            monthly_investment: dec!(5000),
            annual_return_rate: dec!(12),
            duration_in_years: 10,
            step_up_percentage: Decimal::ZERO,
        }
    }

    #[test]
    fn test_first_month_contribution_before_interest() {
        let result = calculate_sip(&default_input()).unwrap().result;
        let first = &result.year_wise_data[0].monthly_data[0];

        assert_eq!(first.opening_balance, Decimal::ZERO);
        assert_eq!(first.sip_amount, dec!(5000));
        // Interest accrues on the post-contribution balance: 5000 * 1%
        assert_eq!(first.interest_earned, dec!(50));
        assert_eq!(first.closing_balance, dec!(5050));
        assert_eq!(first.month_name, "Jan");
    }

    #[test]
    fn test_year_and_month_counts() {
        let result = calculate_sip(&default_input()).unwrap().result;
        assert_eq!(result.year_wise_data.len(), 10);
        for year in &result.year_wise_data {
            assert_eq!(year.monthly_data.len(), 12);
        }
    }

    #[test]
    fn test_step_up_applies_once_per_year() {
        let mut input = default_input();
        input.step_up_percentage = dec!(10);
        let result = calculate_sip(&input).unwrap().result;

        let y1 = &result.year_wise_data[0];
        let y2 = &result.year_wise_data[1];
        assert_eq!(y1.monthly_amount, dec!(5000));
        assert_eq!(y2.monthly_amount, dec!(5500));
        assert!(y1.monthly_data.iter().all(|m| m.sip_amount == dec!(5000)));
        assert_eq!(y2.total_invested_this_year, dec!(66000));
        // Base amount is reported pre step-up
        assert_eq!(result.monthly_investment, dec!(5000));
    }

    #[test]
    fn test_year_closing_chains_into_next_opening() {
        let result = calculate_sip(&default_input()).unwrap().result;
        for pair in result.year_wise_data.windows(2) {
            assert_eq!(pair[0].closing_balance, pair[1].opening_balance);
        }
    }

    #[test]
    fn test_monthly_invariant_holds() {
        let mut input = default_input();
        input.step_up_percentage = dec!(7.5);
        let result = calculate_sip(&input).unwrap().result;
        for year in &result.year_wise_data {
            for m in &year.monthly_data {
                assert_eq!(
                    m.closing_balance,
                    m.opening_balance + m.sip_amount + m.interest_earned
                );
            }
        }
    }

    #[test]
    fn test_zero_monthly_investment_rejected() {
        let mut input = default_input();
        input.monthly_investment = Decimal::ZERO;
        assert!(calculate_sip(&input).is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut input = default_input();
        input.duration_in_years = 0;
        assert!(calculate_sip(&input).is_err());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut input = default_input();
        input.annual_return_rate = dec!(-1);
        assert!(calculate_sip(&input).is_err());
    }

    #[test]
    fn test_century_horizon_stays_in_range() {
        let mut input = default_input();
        input.duration_in_years = 300;
        let result = calculate_sip(&input).unwrap().result;
        assert_eq!(result.year_wise_data.len(), 300);
        assert!(result.maturity_amount > result.total_invested);
    }

    #[test]
    fn test_balance_overflow_returns_error() {
        let mut input = default_input();
        input.duration_in_years = 700;
        let err = calculate_sip(&input).unwrap_err();
        assert!(matches!(err, WealthCalcError::Overflow { .. }), "got {err}");
    }
}
