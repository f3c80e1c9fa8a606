use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::fixed_deposit::FD_COMPOUNDING_PERIODS_PER_YEAR;
use crate::time_value::{checked, growth_factor, periodic_rate};
use crate::types::{
    require_nonzero_count, require_positive, with_metadata, ComputationOutput, Money, Percent,
    YearlyBreakdown,
};
use crate::WealthCalcResult;

/// Input for a recurring deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdInput {
    /// Deposit made at the start of every month.
    pub monthly_deposit: Money,
    /// Annual interest rate in percent.
    pub annual_interest_rate: Percent,
    pub tenure_months: u32,
}

/// Output from `calculate_rd`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdResult {
    pub monthly_deposit: Money,
    pub annual_interest_rate: Percent,
    pub tenure_months: u32,
    pub total_deposited: Money,
    pub maturity_amount: Money,
    pub total_interest: Money,
    pub year_wise_breakdown: Vec<YearlyBreakdown>,
}

/// Recurring deposit with quarterly compounding.
///
/// Deposit `i` of `n` earns for its remaining `n - i + 1` months:
/// `maturity = Σ M * (1 + r/400)^((n-i+1)/3)`. It is accumulated month by
/// month with the monthly growth factor `(1 + r/400)^(1/3)`.
pub fn calculate_rd(input: &RdInput) -> WealthCalcResult<ComputationOutput<RdResult>> {
    let start = Instant::now();

    require_positive("monthly_deposit", input.monthly_deposit)?;
    require_positive("annual_interest_rate", input.annual_interest_rate)?;
    require_nonzero_count("tenure_months", input.tenure_months)?;

    let q = periodic_rate(input.annual_interest_rate, FD_COMPOUNDING_PERIODS_PER_YEAR);
    // Three months per quarter
    let monthly_growth = growth_factor(q, Decimal::ONE / dec!(3))?;

    let mut value = Decimal::ZERO;
    let mut deposited = Decimal::ZERO;
    let mut year_wise_breakdown = Vec::new();
    let mut year_opening = Decimal::ZERO;
    let mut year_deposited = Decimal::ZERO;

    for month in 1..=input.tenure_months {
        value = checked(
            value
                .checked_add(input.monthly_deposit)
                .and_then(|v| v.checked_mul(monthly_growth)),
            "RD value",
        )?;
        // Deposits never exceed the grown value
        deposited += input.monthly_deposit;
        year_deposited += input.monthly_deposit;

        if month % 12 == 0 || month == input.tenure_months {
            year_wise_breakdown.push(YearlyBreakdown {
                year: month.div_ceil(12),
                opening_amount: year_opening,
                deposited: year_deposited,
                yearly_interest: value - year_opening - year_deposited,
                cumulative_interest: value - deposited,
                closing_amount: value,
            });
            year_opening = value;
            year_deposited = Decimal::ZERO;
        }
    }

    let output = RdResult {
        monthly_deposit: input.monthly_deposit,
        annual_interest_rate: input.annual_interest_rate,
        tenure_months: input.tenure_months,
        total_deposited: deposited,
        maturity_amount: value,
        total_interest: value - deposited,
        year_wise_breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Recurring deposit (quarterly compounding, each deposit earns for its remaining tenure)",
        &serde_json::json!({
            "quarterly_rate": q.to_string(),
            "monthly_growth_factor": monthly_growth.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn five_year_rd() -> RdInput {
        RdInput {
            monthly_deposit: dec!(5_000),
            annual_interest_rate: dec!(7),
            tenure_months: 60,
        }
    }

    #[test]
    fn test_maturity_matches_per_deposit_sum() {
        // Σ 5000 * 1.0175^((60-i+1)/3) ≈ 359,663.95
        let result = calculate_rd(&five_year_rd()).unwrap().result;
        assert!(
            (result.maturity_amount - dec!(359_663.95)).abs() < dec!(0.05),
            "got {}",
            result.maturity_amount
        );
        assert_eq!(result.total_deposited, dec!(300_000));
        assert_eq!(
            result.total_interest,
            result.maturity_amount - result.total_deposited
        );
    }

    #[test]
    fn test_one_quarter_equals_closed_form() {
        let input = RdInput {
            monthly_deposit: dec!(1_000),
            annual_interest_rate: dec!(8),
            tenure_months: 3,
        };
        let result = calculate_rd(&input).unwrap().result;
        // Deposit 1 earns a full quarter, deposits 2 and 3 two and one months
        let g = growth_factor(dec!(0.02), Decimal::ONE / dec!(3)).unwrap();
        let expected = dec!(1_000) * (g * g * g + g * g + g);
        assert!((result.maturity_amount - expected).abs() < dec!(0.000001));
    }

    #[test]
    fn test_breakdown_rows_per_year_with_partial_tail() {
        let mut input = five_year_rd();
        input.tenure_months = 30;
        let result = calculate_rd(&input).unwrap().result;

        let years: Vec<u32> = result.year_wise_breakdown.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1, 2, 3]);
        assert_eq!(result.year_wise_breakdown[2].deposited, dec!(30_000));
        assert_eq!(
            result.year_wise_breakdown[2].closing_amount,
            result.maturity_amount
        );
    }

    #[test]
    fn test_year_rows_chain() {
        let result = calculate_rd(&five_year_rd()).unwrap().result;
        for pair in result.year_wise_breakdown.windows(2) {
            assert_eq!(pair[0].closing_amount, pair[1].opening_amount);
        }
    }

    #[test]
    fn test_zero_deposit_rejected() {
        let mut input = five_year_rd();
        input.monthly_deposit = Decimal::ZERO;
        assert!(calculate_rd(&input).is_err());
    }

    #[test]
    fn test_value_overflow_returns_error() {
        let input = RdInput {
            monthly_deposit: Decimal::MAX,
            annual_interest_rate: dec!(7),
            tenure_months: 2,
        };
        assert!(matches!(
            calculate_rd(&input),
            Err(crate::error::WealthCalcError::Overflow { .. })
        ));
    }
}
