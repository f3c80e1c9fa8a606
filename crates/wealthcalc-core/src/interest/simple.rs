use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::InterestRow;
use crate::time_value::checked;
use crate::types::{
    require_nonzero_count, require_positive, with_metadata, ComputationOutput, Money, Percent,
};
use crate::WealthCalcResult;

/// Input for simple interest over whole years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestInput {
    pub principal: Money,
    /// Annual interest rate in percent.
    pub annual_interest_rate: Percent,
    pub time_years: u32,
}

/// Output from `calculate_simple_interest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestResult {
    pub principal: Money,
    pub annual_interest_rate: Percent,
    pub time_years: u32,
    pub interest: Money,
    pub total_amount: Money,
    pub yearly_breakdown: Vec<InterestRow>,
}

/// Simple interest `P * r * t / 100`, accruing the same amount every year.
pub fn calculate_simple_interest(
    input: &SimpleInterestInput,
) -> WealthCalcResult<ComputationOutput<SimpleInterestResult>> {
    let start = Instant::now();

    require_positive("principal", input.principal)?;
    require_positive("annual_interest_rate", input.annual_interest_rate)?;
    require_nonzero_count("time_years", input.time_years)?;

    let yearly_interest = checked(
        input
            .principal
            .checked_mul(input.annual_interest_rate / Decimal::ONE_HUNDRED),
        "simple interest",
    )?;
    let interest = checked(
        yearly_interest.checked_mul(Decimal::from(input.time_years)),
        "simple interest",
    )?;
    let total_amount = checked(input.principal.checked_add(interest), "simple interest total")?;

    // Every row stays within the checked totals.
    let mut cumulative = Decimal::ZERO;
    let yearly_breakdown: Vec<InterestRow> = (1..=input.time_years)
        .map(|year| {
            let opening = input.principal + cumulative;
            cumulative += yearly_interest;
            InterestRow {
                year,
                opening_amount: opening,
                yearly_interest,
                cumulative_interest: cumulative,
                closing_amount: input.principal + cumulative,
            }
        })
        .collect();

    let output = SimpleInterestResult {
        principal: input.principal,
        annual_interest_rate: input.annual_interest_rate,
        time_years: input.time_years,
        interest,
        total_amount,
        yearly_breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simple interest (P * r * t / 100)",
        &serde_json::json!({
            "yearly_interest": yearly_interest.to_string(),
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

    #[test]
    fn test_simple_interest_total() {
        let input = SimpleInterestInput {
            principal: dec!(10_000),
            annual_interest_rate: dec!(8),
            time_years: 5,
        };
        let result = calculate_simple_interest(&input).unwrap().result;
        assert_eq!(result.interest, dec!(4_000));
        assert_eq!(result.total_amount, dec!(14_000));
    }

    #[test]
    fn test_rows_accrue_level_interest() {
        let input = SimpleInterestInput {
            principal: dec!(10_000),
            annual_interest_rate: dec!(8),
            time_years: 3,
        };
        let result = calculate_simple_interest(&input).unwrap().result;
        let rows = &result.yearly_breakdown;
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.yearly_interest == dec!(800)));
        assert_eq!(rows[1].opening_amount, dec!(10_800));
        assert_eq!(rows[2].cumulative_interest, dec!(2_400));
        assert_eq!(rows[2].closing_amount, result.total_amount);
    }

    #[test]
    fn test_zero_years_rejected() {
        let input = SimpleInterestInput {
            principal: dec!(10_000),
            annual_interest_rate: dec!(8),
            time_years: 0,
        };
        assert!(calculate_simple_interest(&input).is_err());
    }

    #[test]
    fn test_total_overflow_returns_error() {
        let input = SimpleInterestInput {
            principal: Decimal::MAX / dec!(2),
            annual_interest_rate: dec!(50),
            time_years: 10,
        };
        assert!(matches!(
            calculate_simple_interest(&input),
            Err(crate::error::WealthCalcError::Overflow { .. })
        ));
    }
}
