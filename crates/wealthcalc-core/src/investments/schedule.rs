//! Month-by-month and year-by-year snapshot records shared by the SIP and
//! SWP simulators.
//!
//! Cash flows are signed: contributions are positive, withdrawals negative.
//! Every [`MonthlyData`] satisfies
//! `closing_balance = opening_balance + sip_amount + interest_earned`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::checked;
use crate::types::{month_label, Money, Percent};
use crate::WealthCalcResult;

/// A single simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    /// Month within the year, 1..=12.
    pub month: u32,
    pub month_name: String,
    pub opening_balance: Money,
    /// Signed cash flow for the month (negative for withdrawals).
    pub sip_amount: Money,
    pub interest_earned: Money,
    pub closing_balance: Money,
}

/// A simulated year and its months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearWiseData {
    pub year: u32,
    pub opening_balance: Money,
    /// Signed sum of this year's monthly cash flows.
    pub total_invested_this_year: Money,
    pub interest_earned_this_year: Money,
    pub closing_balance: Money,
    /// Signed cash flow to date.
    pub cumulative_invested: Money,
    pub cumulative_interest: Money,
    /// Monthly amount in force this year, after any step-up.
    pub monthly_amount: Money,
    pub monthly_data: Vec<MonthlyData>,
}

/// Collects the months of one simulated year.
#[derive(Debug)]
pub(crate) struct YearBuilder {
    year: u32,
    opening_balance: Money,
    monthly_amount: Money,
    invested: Money,
    interest: Money,
    months: Vec<MonthlyData>,
}

impl YearBuilder {
    pub(crate) fn new(year: u32, opening_balance: Money, monthly_amount: Money) -> Self {
        Self {
            year,
            opening_balance,
            monthly_amount,
            invested: Decimal::ZERO,
            interest: Decimal::ZERO,
            months: Vec::with_capacity(12),
        }
    }

    pub(crate) fn record(
        &mut self,
        month: u32,
        opening_balance: Money,
        flow: Money,
        interest: Money,
        closing_balance: Money,
    ) -> WealthCalcResult<()> {
        self.invested = checked(self.invested.checked_add(flow), "yearly cash flow")?;
        self.interest = checked(self.interest.checked_add(interest), "yearly interest")?;
        self.months.push(MonthlyData {
            month,
            month_name: month_label(month).to_string(),
            opening_balance,
            sip_amount: flow,
            interest_earned: interest,
            closing_balance,
        });
        Ok(())
    }

    pub(crate) fn finish(
        self,
        closing_balance: Money,
        cumulative_invested: Money,
        cumulative_interest: Money,
    ) -> YearWiseData {
        YearWiseData {
            year: self.year,
            opening_balance: self.opening_balance,
            total_invested_this_year: self.invested,
            interest_earned_this_year: self.interest,
            closing_balance,
            cumulative_invested,
            cumulative_interest,
            monthly_amount: self.monthly_amount,
            monthly_data: self.months,
        }
    }
}

/// Apply one annual step-up: `amount * (1 + pct/100)`. Zero leaves the amount unchanged.
pub fn step_up(amount: Money, pct: Percent) -> WealthCalcResult<Money> {
    if pct.is_zero() {
        return Ok(amount);
    }
    checked(
        amount.checked_mul(Decimal::ONE + pct / Decimal::ONE_HUNDRED),
        "step-up amount",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_year_builder_sums_signed_flows() {
        let mut year = YearBuilder::new(1, dec!(1000), dec!(100));
        year.record(1, dec!(1000), dec!(-100), dec!(9), dec!(909)).unwrap();
        year.record(2, dec!(909), dec!(-100), dec!(8.09), dec!(817.09)).unwrap();
        let data = year.finish(dec!(817.09), dec!(-200), dec!(17.09));

        assert_eq!(data.total_invested_this_year, dec!(-200));
        assert_eq!(data.interest_earned_this_year, dec!(17.09));
        assert_eq!(data.monthly_data.len(), 2);
        assert_eq!(data.monthly_data[1].month_name, "Feb");
    }

    #[test]
    fn test_step_up_ten_percent() {
        assert_eq!(step_up(dec!(1000), dec!(10)).unwrap(), dec!(1100));
        assert_eq!(step_up(dec!(1000), Decimal::ZERO).unwrap(), dec!(1000));
    }

    #[test]
    fn test_step_up_overflow_is_an_error() {
        assert!(step_up(Decimal::MAX, dec!(10)).is_err());
    }
}
