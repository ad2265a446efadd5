use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::Value;

use mortgage_core::affordability;

use crate::input;

/// Arguments for the funds-to-close check
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Purchase price of the home
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Down payment in percent of the home price
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Liquid savings available to close
    #[arg(long)]
    pub cash_savings: Option<Decimal>,

    /// Moving costs
    #[arg(long, default_value = "0")]
    pub moving_cost: Decimal,

    /// Closing costs in percent of the home price
    #[arg(long, default_value = "3")]
    pub closing_cost: Decimal,

    /// Path to a JSON or YAML file with the same fields
    #[arg(long)]
    pub input: Option<String>,
}

fn default_closing_cost_percent() -> Decimal {
    dec!(3)
}

/// File/stdin shape for `affordability`.
#[derive(Debug, Deserialize)]
struct AffordabilityInput {
    home_price: Decimal,
    down_payment_percent: Decimal,
    cash_savings: Decimal,
    #[serde(default)]
    moving_cost: Decimal,
    #[serde(default = "default_closing_cost_percent")]
    closing_cost_percent: Decimal,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let check_input = match input::load::<AffordabilityInput>(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AffordabilityInput {
            home_price: args
                .home_price
                .ok_or("--home-price is required (or provide --input)")?,
            down_payment_percent: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            cash_savings: args
                .cash_savings
                .ok_or("--cash-savings is required (or provide --input)")?,
            moving_cost: args.moving_cost,
            closing_cost_percent: args.closing_cost,
        },
    };

    let check = affordability::check(
        check_input.home_price,
        check_input.down_payment_percent,
        check_input.cash_savings,
        check_input.moving_cost,
        check_input.closing_cost_percent,
    )?;
    if !check.sufficient_funds {
        tracing::warn!(shortfall = %check.shortfall(), "insufficient funds to close");
    }

    Ok(serde_json::to_value(check)?)
}
