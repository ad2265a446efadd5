use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use mortgage_core::sensitivity::{self, RateSweepSpec};

use crate::input;

/// Arguments for an interest-rate sweep
#[derive(Args)]
pub struct SweepArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub years: u32,

    /// First rate of the sweep in percent
    #[arg(long)]
    pub rate_start: Option<Decimal>,

    /// Last rate of the sweep in percent
    #[arg(long)]
    pub rate_end: Option<Decimal>,

    /// Increment between swept rates in percent
    #[arg(long, default_value = "0.25")]
    pub rate_step: Decimal,

    /// Quoted rate, always included in the table
    #[arg(long)]
    pub exact_rate: Option<Decimal>,

    /// Include the exact-rate schedule in the output
    #[arg(long)]
    pub schedule: bool,

    /// Path to a JSON or YAML file with the sweep definition
    #[arg(long)]
    pub input: Option<String>,
}

/// File/stdin shape for `sweep`.
#[derive(Debug, Deserialize)]
struct SweepInput {
    principal: Decimal,
    loan_term_years: u32,
    rates: RateSweepSpec,
    exact_rate: Decimal,
}

pub fn run_sweep(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sweep_input = match input::load::<SweepInput>(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SweepInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            loan_term_years: args.years,
            rates: RateSweepSpec::new(
                args.rate_start
                    .ok_or("--rate-start is required (or provide --input)")?,
                args.rate_end
                    .ok_or("--rate-end is required (or provide --input)")?,
                args.rate_step,
            ),
            exact_rate: args
                .exact_rate
                .ok_or("--exact-rate is required (or provide --input)")?,
        },
    };

    let table = sensitivity::sweep(
        sweep_input.principal,
        sweep_input.loan_term_years,
        &sweep_input.rates,
        sweep_input.exact_rate,
    )?;
    tracing::info!(rates = table.entries.len(), "swept interest rates");

    let mut value = serde_json::to_value(table)?;
    if !args.schedule {
        super::strip_schedules(&mut value);
    }
    Ok(value)
}
