use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::housing_cost::HousingCostAssumptions;
use crate::amortization::AmortizationResult;
use crate::error::MortgageError;
use crate::types::{percent_of, round_currency, Money, Percent, MONTHS_PER_YEAR};
use crate::MortgageResult;

/// Private mortgage insurance over the life of the loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmiSchedule {
    /// True when the loan starts above the LTV threshold.
    pub required: bool,
    pub ltv_threshold_percent: Percent,
    pub initial_ltv_percent: Percent,
    pub monthly_premium: Money,
    /// Number of monthly payments that carry a PMI premium.
    pub months_charged: u32,
    pub total_paid: Money,
    /// Period after which LTV first reaches the threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_ltv_percent: Option<Percent>,
}

impl PmiSchedule {
    pub fn not_required(ltv_threshold_percent: Percent) -> Self {
        Self {
            required: false,
            ltv_threshold_percent,
            initial_ltv_percent: Decimal::ZERO,
            monthly_premium: Decimal::ZERO,
            months_charged: 0,
            total_paid: Decimal::ZERO,
            dropoff_period: None,
            dropoff_ltv_percent: None,
        }
    }
}

fn ltv_percent(balance: Money, home_price: Money) -> Percent {
    balance / home_price * dec!(100)
}

/// Work out PMI for a loan on a home bought at `home_price`.
///
/// The premium is a flat percentage of the original loan amount. It is
/// charged on every payment whose opening balance keeps LTV above the
/// threshold and stops once the scheduled balance reaches it.
pub fn pmi_schedule(
    home_price: Money,
    amortization: &AmortizationResult,
    assumptions: &HousingCostAssumptions,
) -> MortgageResult<PmiSchedule> {
    assumptions.validate()?;
    if home_price <= Decimal::ZERO {
        return Err(MortgageError::invalid_parameter(
            "home_price",
            format!("must be > 0, got {home_price}"),
        ));
    }

    let threshold = assumptions.pmi_ltv_threshold_percent;
    let initial_ltv = ltv_percent(amortization.principal, home_price);
    if initial_ltv <= threshold {
        return Ok(PmiSchedule {
            initial_ltv_percent: initial_ltv.round_dp(4),
            ..PmiSchedule::not_required(threshold)
        });
    }

    let premium = percent_of(amortization.principal, assumptions.pmi_annual_percent)
        / Decimal::from(MONTHS_PER_YEAR);

    let mut opening_balance = amortization.principal;
    let mut months_charged: u32 = 0;
    let mut dropoff = None;
    for row in &amortization.schedule {
        if ltv_percent(opening_balance, home_price) <= threshold {
            break;
        }
        months_charged += 1;
        let closing_ltv = ltv_percent(row.remaining_balance, home_price);
        if closing_ltv <= threshold {
            dropoff = Some((row.period, closing_ltv));
            break;
        }
        opening_balance = row.remaining_balance;
    }

    Ok(PmiSchedule {
        required: true,
        ltv_threshold_percent: threshold,
        initial_ltv_percent: initial_ltv.round_dp(4),
        monthly_premium: round_currency(premium),
        months_charged,
        total_paid: round_currency(premium * Decimal::from(months_charged)),
        dropoff_period: dropoff.map(|(period, _)| period),
        dropoff_ltv_percent: dropoff.map(|(_, ltv)| ltv.round_dp(4)),
    })
}
