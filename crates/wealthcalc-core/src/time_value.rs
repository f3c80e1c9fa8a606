use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::WealthCalcError;
use crate::types::{Money, Percent, Rate};
use crate::WealthCalcResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Monthly periodic rate from an annual percentage: `pct / 12 / 100`.
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    annual_pct / MONTHS_PER_YEAR / HUNDRED
}

/// Annual periodic rate from an annual percentage: `pct / 100`.
pub fn annual_rate(annual_pct: Percent) -> Rate {
    annual_pct / HUNDRED
}

/// Per-period rate when an annual percentage is compounded `periods_per_year` times.
pub fn periodic_rate(annual_pct: Percent, periods_per_year: u32) -> Rate {
    annual_pct / HUNDRED / Decimal::from(periods_per_year)
}

/// Turn the `None` of a `checked_*` operation into an overflow error.
pub(crate) fn checked(value: Option<Decimal>, context: &str) -> WealthCalcResult<Decimal> {
    value.ok_or_else(|| WealthCalcError::Overflow {
        context: context.into(),
    })
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound(rate: Rate, n: u32) -> WealthCalcResult<Decimal> {
    let mut result = Decimal::ONE;
    let factor = checked(Decimal::ONE.checked_add(rate), "growth factor")?;
    for _ in 0..n {
        result = checked(result.checked_mul(factor), "growth factor")?;
    }
    Ok(result)
}

/// (1 + r)^periods for a possibly fractional number of periods.
///
/// Whole periods go through [`compound`]; fractional exponents fall back to
/// `checked_powd`.
pub fn growth_factor(rate: Rate, periods: Decimal) -> WealthCalcResult<Decimal> {
    if periods.fract().is_zero() {
        if let Some(n) = periods.to_u32() {
            return compound(rate, n);
        }
    }
    let base = checked(Decimal::ONE.checked_add(rate), "growth factor")?;
    checked(base.checked_powd(periods), "growth factor")
}

/// Future value of a level contribution paid at the start of each period
/// (annuity due): `pmt * ((1+r)^n - 1) / r * (1+r)`.
pub fn fv_annuity_due(pmt: Money, rate: Rate, n: u32) -> WealthCalcResult<Money> {
    if rate.is_zero() {
        return checked(pmt.checked_mul(Decimal::from(n)), "annuity future value");
    }
    let factor = compound(rate, n)?;
    pmt.checked_mul(factor - Decimal::ONE)
        .and_then(|v| v.checked_div(rate))
        .and_then(|v| v.checked_mul(Decimal::ONE + rate))
        .ok_or_else(|| WealthCalcError::Overflow {
            context: "annuity future value".into(),
        })
}

/// Level end-of-period payment that accumulates to `fv` after `n` periods
/// (ordinary annuity inversion): `fv * r / ((1+r)^n - 1)`.
pub fn sinking_fund_payment(fv: Money, rate: Rate, n: u32) -> WealthCalcResult<Money> {
    if n == 0 {
        return Err(WealthCalcError::InvalidInput {
            field: "n".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    let denom = compound(rate, n)? - Decimal::ONE;
    if denom.is_zero() {
        return Err(WealthCalcError::DivisionByZero {
            context: "sinking fund annuity factor".into(),
        });
    }
    checked(
        fv.checked_mul(rate).and_then(|v| v.checked_div(denom)),
        "sinking fund payment",
    )
}

/// Level payment that fully amortises `principal` over `n` periods
/// (reducing balance): `P * r * (1+r)^n / ((1+r)^n - 1)`.
pub fn amortizing_payment(principal: Money, rate: Rate, n: u32) -> WealthCalcResult<Money> {
    if n == 0 {
        return Err(WealthCalcError::InvalidInput {
            field: "n".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    let factor = compound(rate, n)?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Err(WealthCalcError::DivisionByZero {
            context: "amortization annuity factor".into(),
        });
    }
    checked(
        principal
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(factor))
            .and_then(|v| v.checked_div(denom)),
        "amortizing payment",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_twelve_percent() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
    }

    #[test]
    fn test_periodic_rate_quarterly() {
        assert_eq!(periodic_rate(dec!(8), 4), dec!(0.02));
    }

    #[test]
    fn test_compound_matches_repeated_product() {
        assert_eq!(compound(dec!(0.10), 2).unwrap(), dec!(1.21));
        assert_eq!(compound(dec!(0.10), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_growth_factor_whole_periods_is_exact() {
        assert_eq!(growth_factor(dec!(0.02), dec!(3)).unwrap(), dec!(1.061208));
    }

    #[test]
    fn test_growth_factor_fractional_periods() {
        // 1.02^0.5 ≈ 1.0099505
        let g = growth_factor(dec!(0.02), dec!(0.5)).unwrap();
        assert!((g - dec!(1.0099505)).abs() < dec!(0.000001), "got {}", g);
    }

    #[test]
    fn test_fv_annuity_due_basic() {
        // 100 at the start of each of 2 periods at 10%: 100*1.21 + 100*1.1 = 231
        assert_eq!(fv_annuity_due(dec!(100), dec!(0.10), 2).unwrap(), dec!(231));
    }

    #[test]
    fn test_sinking_fund_payment_inverts_ordinary_annuity() {
        // FV of 100 paid at the end of 2 periods at 10% = 210
        let pmt = sinking_fund_payment(dec!(210), dec!(0.10), 2).unwrap();
        assert!((pmt - dec!(100)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_amortizing_payment_zero_rate_rejected() {
        assert!(amortizing_payment(dec!(1000), Decimal::ZERO, 12).is_err());
    }

    #[test]
    fn test_amortizing_payment_zero_periods_rejected() {
        assert!(amortizing_payment(dec!(1000), dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_compound_overflow_is_an_error() {
        // 1.12^700 is far beyond Decimal's ~7.9e28 range
        let err = compound(dec!(0.12), 700).unwrap_err();
        assert!(matches!(err, WealthCalcError::Overflow { .. }));
    }

    #[test]
    fn test_growth_factor_fractional_overflow_is_an_error() {
        assert!(growth_factor(dec!(0.12), dec!(700.5)).is_err());
    }

    #[test]
    fn test_sinking_fund_payment_overflow_is_an_error() {
        let err = sinking_fund_payment(dec!(1_000_000), dec!(0.01), 8400).unwrap_err();
        assert!(matches!(err, WealthCalcError::Overflow { .. }));
    }
}
