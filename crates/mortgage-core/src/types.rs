use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::MortgageResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates and shares expressed as percentages (6.5 = 6.5%). Never as decimals.
pub type Percent = Decimal;

/// Number of decimal places in the smallest currency unit.
pub const CURRENCY_DP: u32 = 2;

pub const MONTHS_PER_YEAR: u32 = 12;

const ONE_HUNDRED: Decimal = dec!(100);

/// Round a currency amount to whole cents, half away from zero.
///
/// Only called at output boundaries; intermediate arithmetic stays at full
/// `Decimal` precision.
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// `amount × percent / 100`
pub fn percent_of(amount: Money, percent: Percent) -> Money {
    amount * percent / ONE_HUNDRED
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> MortgageResult<()> {
    if value < Decimal::ZERO {
        return Err(MortgageError::invalid_parameter(
            field,
            format!("must be >= 0, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn require_percentage(field: &str, value: Percent) -> MortgageResult<()> {
    if value < Decimal::ZERO || value > ONE_HUNDRED {
        return Err(MortgageError::invalid_parameter(
            field,
            format!("must be within [0, 100], got {value}"),
        ));
    }
    Ok(())
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
