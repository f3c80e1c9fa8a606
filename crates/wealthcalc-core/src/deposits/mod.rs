pub mod fixed_deposit;
pub mod ppf;
pub mod recurring_deposit;
