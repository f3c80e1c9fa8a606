pub mod deposits;
pub mod goals;
pub mod interest;
pub mod investments;
pub mod loans;
