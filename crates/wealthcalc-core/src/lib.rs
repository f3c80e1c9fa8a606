pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "investments")]
pub mod investments;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "deposits")]
pub mod deposits;

#[cfg(feature = "interest")]
pub mod interest;

#[cfg(feature = "goals")]
pub mod goals;

pub use error::WealthCalcError;
pub use types::*;

/// Standard result type for all wealthcalc operations
pub type WealthCalcResult<T> = Result<T, WealthCalcError>;
