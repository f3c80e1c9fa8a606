use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WealthCalcError;
use crate::WealthCalcResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Periodic rates expressed as decimals (0.01 = 1% per period).
pub type Rate = Decimal;

/// Annual rates as entered by users, in percent (12 = 12% p.a.).
pub type Percent = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Short month labels, indexed by month-of-year minus one.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Label for a 1-based month index; wraps past December.
pub fn month_label(month: u32) -> &'static str {
    MONTH_LABELS[((month.max(1) - 1) % 12) as usize]
}

/// One row of a deposit's year-by-year growth table:
/// `closing_amount = opening_amount + deposited + yearly_interest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyBreakdown {
    pub year: u32,
    pub opening_amount: Money,
    pub deposited: Money,
    pub yearly_interest: Money,
    pub cumulative_interest: Money,
    pub closing_amount: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

pub(crate) fn require_positive(field: &str, value: Decimal) -> WealthCalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: field.into(),
            reason: format!("{field} must be > 0"),
        });
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> WealthCalcResult<()> {
    if value < Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: field.into(),
            reason: format!("{field} must be >= 0"),
        });
    }
    Ok(())
}

pub(crate) fn require_nonzero_count(field: &str, value: u32) -> WealthCalcResult<()> {
    if value == 0 {
        return Err(WealthCalcError::InvalidInput {
            field: field.into(),
            reason: format!("{field} must be at least 1"),
        });
    }
    Ok(())
}
