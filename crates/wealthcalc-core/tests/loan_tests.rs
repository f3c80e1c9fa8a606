use pretty_assertions::assert_eq;
use proptest::prelude::{prop_assert, proptest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wealthcalc_core::loans::emi;
use wealthcalc_core::WealthCalcError;

fn loan(principal: Decimal, rate: Decimal, months: u32) -> emi::EmiInput {
    emi::EmiInput {
        principal,
        annual_interest_rate: rate,
        tenure_months: months,
    }
}

#[test]
fn test_home_loan_emi_and_totals() {
    let output = emi::calculate_emi(&loan(dec!(1_000_000), dec!(8.5), 240)).unwrap();
    let r = &output.result;

    // 1e6 * r * (1+r)^240 / ((1+r)^240 - 1), r = 8.5/1200 ≈ 8,678.23
    assert!((r.emi - dec!(8678.23)).abs() < dec!(0.01), "EMI was {}", r.emi);
    assert!((r.total_payment - dec!(2_082_775.76)).abs() < dec!(0.01));
    assert!((r.total_interest - dec!(1_082_775.76)).abs() < dec!(0.01));
    assert_eq!(r.yearly_summary.len(), 20);
    assert_eq!(output.methodology, "EMI (reducing balance, monthly rests)");
}

#[test]
fn test_yearly_summary_balances_decline() {
    let r = emi::calculate_emi(&loan(dec!(500_000), dec!(10), 60))
        .unwrap()
        .result;
    let balances: Vec<Decimal> = r.yearly_summary.iter().map(|y| y.closing_balance).collect();
    for pair in balances.windows(2) {
        assert!(pair[1] < pair[0]);
    }
    assert_eq!(balances.last().copied(), Some(Decimal::ZERO));
}

#[test]
fn test_single_month_loan_repays_with_one_month_interest() {
    let r = emi::calculate_emi(&loan(dec!(12_000), dec!(12), 1))
        .unwrap()
        .result;
    assert_eq!(r.emi, dec!(12_120));
    assert_eq!(r.schedule.len(), 1);
    assert_eq!(r.schedule[0].interest, dec!(120));
}

#[test]
fn test_zero_rate_loan_rejected() {
    let err = emi::calculate_emi(&loan(dec!(12_000), Decimal::ZERO, 12)).unwrap_err();
    match err {
        WealthCalcError::InvalidInput { field, .. } => assert_eq!(field, "annual_interest_rate"),
        other => panic!("unexpected error: {other}"),
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(32))]

    #[test]
    fn prop_emi_schedule_repays_principal(
        principal in 10_000u32..5_000_000,
        rate_bp in 100u32..2_400,
        months in 1u32..360
    ) {
        let principal = Decimal::from(principal);
        let r = emi::calculate_emi(&loan(principal, Decimal::new(rate_bp as i64, 2), months))
            .unwrap()
            .result;

        let repaid: Decimal = r.schedule.iter().map(|row| row.principal).sum();
        prop_assert!((repaid - principal).abs() < dec!(0.0001));
        prop_assert!(r.total_interest > Decimal::ZERO);
        prop_assert!(r.schedule.iter().all(|row| row.interest >= Decimal::ZERO));
    }
}
