pub mod compound;
pub mod simple;

use serde::{Deserialize, Serialize};

use crate::types::Money;

/// One year of an interest table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRow {
    pub year: u32,
    pub opening_amount: Money,
    pub yearly_interest: Money,
    pub cumulative_interest: Money,
    pub closing_amount: Money,
}
