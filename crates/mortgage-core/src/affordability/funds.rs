use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{percent_of, require_non_negative, require_percentage, Money, Percent};
use crate::MortgageResult;

/// Liquid funds needed to close versus what the buyer has saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityCheck {
    pub home_price: Money,
    pub down_payment_percent: Percent,
    pub cash_savings: Money,
    pub moving_cost: Money,
    pub closing_cost_percent: Percent,
    pub down_payment_amount: Money,
    /// `home_price × closing_cost_percent / 100`
    pub closing_cost_amount: Money,
    /// Down payment + closing costs + moving costs.
    pub total_cash_required: Money,
    pub sufficient_funds: bool,
    /// Savings left after closing. Negative is a shortfall.
    pub cash_position: Money,
}

impl AffordabilityCheck {
    pub fn shortfall(&self) -> Money {
        (-self.cash_position).max(Decimal::ZERO)
    }

    pub fn surplus(&self) -> Money {
        self.cash_position.max(Decimal::ZERO)
    }
}

/// Check whether `cash_savings` covers the down payment, closing costs and
/// moving costs. Equality counts as sufficient.
pub fn check(
    home_price: Money,
    down_payment_percent: Percent,
    cash_savings: Money,
    moving_cost: Money,
    closing_cost_percent: Percent,
) -> MortgageResult<AffordabilityCheck> {
    require_non_negative("home_price", home_price)?;
    require_percentage("down_payment_percent", down_payment_percent)?;
    require_non_negative("cash_savings", cash_savings)?;
    require_non_negative("moving_cost", moving_cost)?;
    require_percentage("closing_cost_percent", closing_cost_percent)?;

    let down_payment_amount = percent_of(home_price, down_payment_percent);
    let closing_cost_amount = percent_of(home_price, closing_cost_percent);
    let total_cash_required = down_payment_amount + closing_cost_amount + moving_cost;
    let cash_position = cash_savings - total_cash_required;

    Ok(AffordabilityCheck {
        home_price,
        down_payment_percent,
        cash_savings,
        moving_cost,
        closing_cost_percent,
        down_payment_amount,
        closing_cost_amount,
        total_cash_required,
        sufficient_funds: cash_savings >= total_cash_required,
        cash_position,
    })
}
