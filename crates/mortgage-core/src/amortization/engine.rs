use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{
    percent_of, require_non_negative, require_percentage, round_currency, Money, Percent,
    MONTHS_PER_YEAR,
};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan parameters as supplied by the buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Purchase price of the home.
    pub home_price: Money,
    /// Down payment as a percentage of the home price (0-100).
    pub down_payment_percent: Percent,
    /// Loan term in whole years.
    pub loan_term_years: u32,
    /// Annual nominal interest rate as a percentage (6.5 = 6.5%).
    pub interest_rate: Percent,
    /// Date of the first monthly payment. When present every schedule row
    /// carries its payment date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanParameters {
    pub fn validate(&self) -> MortgageResult<()> {
        if self.home_price <= Decimal::ZERO {
            return Err(MortgageError::invalid_parameter(
                "home_price",
                format!("must be > 0, got {}", self.home_price),
            ));
        }
        require_percentage("down_payment_percent", self.down_payment_percent)?;
        validate_term_and_rate(self.loan_term_years, self.interest_rate)
    }

    /// Cash paid up front: `home_price × down_payment_percent / 100`.
    pub fn down_payment_amount(&self) -> Money {
        percent_of(self.home_price, self.down_payment_percent)
    }

    /// Amount borrowed: `home_price × (1 − down_payment_percent / 100)`.
    pub fn loan_principal(&self) -> Money {
        self.home_price - self.down_payment_amount()
    }
}

/// One monthly period of the amortization schedule.
///
/// Amounts are in whole cents. Each row is the difference of cent-rounded
/// cumulative totals, so the principal column sums exactly to the principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    /// Period number (1-indexed).
    pub period: u32,
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// Balance outstanding after this period's payment.
    pub remaining_balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

/// Full amortization result for one loan at one rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    pub number_of_payments: u32,
    /// Level monthly payment (principal and interest), rounded to cents.
    pub monthly_payment: Money,
    /// Sum of every payment, including the final-period adjustment.
    pub total_paid: Money,
    pub total_interest_paid: Money,
    pub schedule: Vec<PaymentRow>,
}

/// Headline figures of an [`AmortizationResult`] without the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest_paid: Money,
}

impl AmortizationResult {
    pub fn summary(&self) -> AmortizationSummary {
        AmortizationSummary {
            monthly_payment: self.monthly_payment,
            total_paid: self.total_paid,
            total_interest_paid: self.total_interest_paid,
        }
    }
}

/// Longest loan term accepted, in years.
pub const MAX_TERM_YEARS: u32 = 100;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amortize `principal` at `annual_rate_percent` over `term_years`.
pub fn compute(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageResult<AmortizationResult> {
    build_schedule(principal, annual_rate_percent, term_years, None)
}

/// Same as [`compute`], with every row dated one month after the previous,
/// starting at `first_payment_date`.
pub fn compute_dated(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
    first_payment_date: NaiveDate,
) -> MortgageResult<AmortizationResult> {
    build_schedule(
        principal,
        annual_rate_percent,
        term_years,
        Some(first_payment_date),
    )
}

/// Amortize the loan described by `params`: the principal is derived from the
/// home price and down payment, and rows are dated when a first payment date
/// is given.
pub fn compute_loan(params: &LoanParameters) -> MortgageResult<AmortizationResult> {
    params.validate()?;
    build_schedule(
        params.loan_principal(),
        params.interest_rate,
        params.loan_term_years,
        params.first_payment_date,
    )
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn validate_term_and_rate(term_years: u32, annual_rate_percent: Percent) -> MortgageResult<()> {
    if term_years < 1 {
        return Err(MortgageError::invalid_parameter(
            "loan_term_years",
            "must be at least 1 year",
        ));
    }
    if term_years > MAX_TERM_YEARS {
        return Err(MortgageError::invalid_parameter(
            "loan_term_years",
            format!("must be at most {MAX_TERM_YEARS} years, got {term_years}"),
        ));
    }
    require_non_negative("interest_rate", annual_rate_percent)
}

fn principal_too_large() -> MortgageError {
    MortgageError::invalid_parameter(
        "principal",
        "too large: amounts at this rate exceed decimal range",
    )
}

/// Monthly periodic rate as a decimal: `annual% / 100 / 12`.
pub(crate) fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Level payment `P·r / (1 − (1+r)^−n)`, or `P / n` when the rate is zero.
/// `None` when the payment is outside the `Decimal` range.
///
/// When `(1+r)^n` exceeds the `Decimal` range the discount term is below the
/// representable precision and the payment is interest-only to 28 digits.
pub(crate) fn level_payment(principal: Money, rate: Decimal, periods: u32) -> Option<Money> {
    if rate.is_zero() {
        return principal.checked_div(Decimal::from(periods));
    }
    let interest_only = principal.checked_mul(rate)?;
    match Decimal::ONE
        .checked_add(rate)?
        .checked_powi(i64::from(periods))
    {
        Some(growth) => {
            let discount = Decimal::ONE / growth;
            interest_only.checked_div(Decimal::ONE - discount)
        }
        None => Some(interest_only),
    }
}

fn build_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
    first_payment_date: Option<NaiveDate>,
) -> MortgageResult<AmortizationResult> {
    require_non_negative("principal", principal)?;
    validate_term_and_rate(term_years, annual_rate_percent)?;

    let periods = term_years * MONTHS_PER_YEAR;
    let rate = monthly_rate(annual_rate_percent);
    let payment = level_payment(principal, rate, periods).ok_or_else(principal_too_large)?;

    let principal_cents = round_currency(principal);
    let mut balance = principal;
    let mut cum_principal = Decimal::ZERO;
    let mut cum_interest = Decimal::ZERO;
    let mut prev_principal_cents = Decimal::ZERO;
    let mut prev_interest_cents = Decimal::ZERO;
    let mut schedule = Vec::with_capacity(periods as usize);

    for period in 1..=periods {
        let interest = balance.checked_mul(rate).ok_or_else(principal_too_large)?;
        cum_interest = cum_interest
            .checked_add(interest)
            .ok_or_else(principal_too_large)?;

        if period == periods {
            // Final period retires whatever is left.
            balance = Decimal::ZERO;
            cum_principal = principal;
        } else {
            let principal_portion = payment - interest;
            balance -= principal_portion;
            cum_principal += principal_portion;
        }

        let principal_cents_to_date = round_currency(cum_principal);
        let interest_cents_to_date = round_currency(cum_interest);
        let principal_portion = principal_cents_to_date - prev_principal_cents;
        let interest_portion = interest_cents_to_date - prev_interest_cents;
        prev_principal_cents = principal_cents_to_date;
        prev_interest_cents = interest_cents_to_date;

        schedule.push(PaymentRow {
            period,
            payment: principal_portion
                .checked_add(interest_portion)
                .ok_or_else(principal_too_large)?,
            principal_portion,
            interest_portion,
            remaining_balance: principal_cents - principal_cents_to_date,
            payment_date: first_payment_date
                .and_then(|d| d.checked_add_months(Months::new(period - 1))),
        });
    }

    let total_interest_paid = round_currency(cum_interest);
    let total_paid = principal_cents
        .checked_add(total_interest_paid)
        .ok_or_else(principal_too_large)?;

    Ok(AmortizationResult {
        principal: principal_cents,
        annual_rate_percent,
        term_years,
        number_of_payments: periods,
        monthly_payment: round_currency(payment),
        total_paid,
        total_interest_paid,
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_payment_standard() {
        let pmt = level_payment(dec!(400000), monthly_rate(dec!(6)), 360).unwrap();
        assert_eq!(round_currency(pmt), dec!(2398.20));
    }

    #[test]
    fn test_level_payment_zero_rate_is_exact() {
        let pmt = level_payment(dec!(100000), Decimal::ZERO, 120).unwrap();
        assert_eq!(pmt, dec!(100000) / dec!(120));
    }

    #[test]
    fn test_level_payment_overflowing_growth_is_interest_only() {
        let rate = monthly_rate(dec!(5000));
        let pmt = level_payment(dec!(1000), rate, 600).unwrap();
        assert_eq!(pmt, dec!(1000) * rate);
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
    }

    #[test]
    fn test_level_payment_out_of_range() {
        assert_eq!(level_payment(Decimal::MAX, monthly_rate(dec!(1200)), 12), None);
    }

    #[test]
    fn test_term_bounds() {
        assert!(compute(dec!(1000), dec!(5), MAX_TERM_YEARS).is_ok());
        let err = compute(dec!(1000), dec!(5), MAX_TERM_YEARS + 1).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidParameter { .. }));
        assert_eq!(err.field(), "loan_term_years");
    }

    #[test]
    fn test_compute_dated_accepts_zero_principal() {
        let result =
            compute_dated(Decimal::ZERO, dec!(5), 1, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
                .unwrap();
        assert_eq!(result.total_paid, Decimal::ZERO);
        assert_eq!(
            result.schedule[11].payment_date,
            NaiveDate::from_ymd_opt(2025, 12, 15)
        );
    }

    #[test]
    fn test_final_row_clears_balance() {
        let result = compute(dec!(250000), dec!(4.25), 15).unwrap();
        let last = result.schedule.last().unwrap();
        assert_eq!(last.period, 180);
        assert_eq!(last.remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_rows_reconcile_to_totals() {
        let result = compute(dec!(187654.32), dec!(7.15), 30).unwrap();
        let paid: Decimal = result.schedule.iter().map(|r| r.payment).sum();
        let interest: Decimal = result.schedule.iter().map(|r| r.interest_portion).sum();
        assert_eq!(paid, result.total_paid);
        assert_eq!(interest, result.total_interest_paid);
    }

    #[test]
    fn test_zero_principal() {
        let result = compute(Decimal::ZERO, dec!(5), 1).unwrap();
        assert_eq!(result.monthly_payment, Decimal::ZERO);
        assert_eq!(result.total_paid, Decimal::ZERO);
        assert!(result
            .schedule
            .iter()
            .all(|r| r.remaining_balance.is_zero() && r.payment.is_zero()));
    }

    #[test]
    fn test_loan_parameters_derivations() {
        let params = LoanParameters {
            home_price: dec!(300000),
            down_payment_percent: dec!(20),
            loan_term_years: 30,
            interest_rate: dec!(6),
            first_payment_date: None,
        };
        assert_eq!(params.down_payment_amount(), dec!(60000));
        assert_eq!(params.loan_principal(), dec!(240000));
    }

    #[test]
    fn test_payment_dates_advance_monthly() {
        let params = LoanParameters {
            home_price: dec!(200000),
            down_payment_percent: dec!(10),
            loan_term_years: 1,
            interest_rate: dec!(5),
            first_payment_date: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let result = compute_loan(&params).unwrap();
        assert_eq!(
            result.schedule[0].payment_date,
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        // Month-end dates clamp to the shorter month.
        assert_eq!(
            result.schedule[1].payment_date,
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            result.schedule[11].payment_date,
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn test_rejects_down_payment_over_100() {
        let params = LoanParameters {
            home_price: dec!(200000),
            down_payment_percent: dec!(101),
            loan_term_years: 30,
            interest_rate: dec!(5),
            first_payment_date: None,
        };
        let err = compute_loan(&params).unwrap_err();
        assert_eq!(err.field(), "down_payment_percent");
    }
}
