use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{amortizing_payment, checked, monthly_rate};
use crate::types::{
    require_nonzero_count, require_positive, with_metadata, ComputationOutput, Money, Percent,
};
use crate::WealthCalcResult;

/// Input for an equated-monthly-installment loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: Money,
    /// Annual interest rate in percent.
    pub annual_interest_rate: Percent,
    pub tenure_months: u32,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

/// Schedule rows rolled up per loan year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiYearSummary {
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
}

/// Output from `calculate_emi`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiResult {
    pub principal: Money,
    pub annual_interest_rate: Percent,
    pub tenure_months: u32,
    pub emi: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
    pub yearly_summary: Vec<EmiYearSummary>,
}

/// Reducing-balance EMI: `P*r*(1+r)^n / ((1+r)^n - 1)` with `r` the monthly
/// rate. Totals use `EMI * n`; the schedule splits every payment into
/// interest on the opening balance and principal, and its last row clears
/// whatever balance is left so the loan closes at exactly zero.
pub fn calculate_emi(input: &EmiInput) -> WealthCalcResult<ComputationOutput<EmiResult>> {
    let start = Instant::now();

    require_positive("principal", input.principal)?;
    require_positive("annual_interest_rate", input.annual_interest_rate)?;
    require_nonzero_count("tenure_months", input.tenure_months)?;

    let r = monthly_rate(input.annual_interest_rate);
    let n = input.tenure_months;

    let emi = amortizing_payment(input.principal, r, n)?;
    let total_payment = checked(emi.checked_mul(Decimal::from(n)), "EMI total payment")?;
    let total_interest = total_payment - input.principal;

    let schedule = build_schedule(input.principal, r, n, emi);
    let yearly_summary = summarise_by_year(&schedule);

    let output = EmiResult {
        principal: input.principal,
        annual_interest_rate: input.annual_interest_rate,
        tenure_months: n,
        emi,
        total_payment,
        total_interest,
        schedule,
        yearly_summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "EMI (reducing balance, monthly rests)",
        &serde_json::json!({
            "monthly_rate": r.to_string(),
            "tenure_months": n,
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

fn build_schedule(principal: Money, r: Decimal, n: u32, emi: Money) -> Vec<AmortizationRow> {
    let mut rows = Vec::with_capacity(n as usize);
    let mut balance = principal;

    for month in 1..=n {
        let opening = balance;
        let interest = opening * r;
        let (payment, principal_part) = if month == n {
            (opening + interest, opening)
        } else {
            (emi, emi - interest)
        };
        balance = opening - principal_part;

        rows.push(AmortizationRow {
            month,
            opening_balance: opening,
            payment,
            interest,
            principal: principal_part,
            closing_balance: balance,
        });
    }
    rows
}

fn summarise_by_year(schedule: &[AmortizationRow]) -> Vec<EmiYearSummary> {
    schedule
        .chunks(12)
        .enumerate()
        .map(|(i, rows)| EmiYearSummary {
            year: i as u32 + 1,
            principal_paid: rows.iter().map(|r| r.principal).sum(),
            interest_paid: rows.iter().map(|r| r.interest).sum(),
            closing_balance: rows.last().map(|r| r.closing_balance).unwrap_or_default(),
        })
        .collect()
}
