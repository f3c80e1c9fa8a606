use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use wealthcalc_core::interest::compound::{
    self, CompoundInterestInput, CompoundingFrequency,
};
use wealthcalc_core::interest::simple::{self, SimpleInterestInput};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    Annually,
    Quarterly,
    Monthly,
}

impl From<FrequencyArg> for CompoundingFrequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Annually => CompoundingFrequency::Annually,
            FrequencyArg::Quarterly => CompoundingFrequency::Quarterly,
            FrequencyArg::Monthly => CompoundingFrequency::Monthly,
        }
    }
}

/// Arguments for simple interest
#[derive(Args)]
pub struct SimpleInterestArgs {
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub annual_interest_rate: Option<Decimal>,

    /// Whole years
    #[arg(long)]
    pub time_years: Option<u32>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for compound interest
#[derive(Args)]
pub struct CompoundInterestArgs {
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub annual_interest_rate: Option<Decimal>,

    /// Whole years
    #[arg(long)]
    pub time_years: Option<u32>,

    /// How often interest is credited
    #[arg(long, value_enum, default_value = "annually")]
    pub frequency: FrequencyArg,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simple_interest(args: SimpleInterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let si_input: SimpleInterestInput = match input::read_input(args.input.as_deref())? {
        Some(doc) => doc,
        None => SimpleInterestInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate: args
                .annual_interest_rate
                .ok_or("--annual-interest-rate is required (or provide --input)")?,
            time_years: args
                .time_years
                .ok_or("--time-years is required (or provide --input)")?,
        },
    };
    let result = simple::calculate_simple_interest(&si_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compound_interest(
    args: CompoundInterestArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let ci_input: CompoundInterestInput = match input::read_input(args.input.as_deref())? {
        Some(doc) => doc,
        None => CompoundInterestInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate: args
                .annual_interest_rate
                .ok_or("--annual-interest-rate is required (or provide --input)")?,
            time_years: args
                .time_years
                .ok_or("--time-years is required (or provide --input)")?,
            frequency: args.frequency.into(),
        },
    };
    let result = compound::calculate_compound_interest(&ci_input)?;
    Ok(serde_json::to_value(result)?)
}
