//! End-to-end mortgage analysis: funds to close, the exact-rate schedule, a
//! rate sweep, PMI and the monthly cost of owning the home.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::affordability::{
    self, pmi_schedule, AffordabilityCheck, HousingCostAssumptions, MonthlyHousingCost,
    PmiSchedule,
};
use crate::amortization::{self, AmortizationResult, LoanParameters};
use crate::sensitivity::{self, RateSweepSpec, SensitivityEntry};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

fn default_closing_cost_percent() -> Percent {
    dec!(3)
}

/// Everything the buyer supplies for a full analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageAnalysisInput {
    pub home_price: Money,
    pub down_payment_percent: Percent,
    pub loan_term_years: u32,
    /// Quoted rate for this loan, in percent.
    pub interest_rate_exact: Percent,
    pub interest_rate_start: Percent,
    pub interest_rate_end: Percent,
    pub interest_rate_step: Percent,
    pub cash_savings: Money,
    pub moving_cost: Money,
    /// Closing costs as a percentage of the home price.
    #[serde(default = "default_closing_cost_percent")]
    pub closing_cost_percent: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub assumptions: HousingCostAssumptions,
}

impl MortgageAnalysisInput {
    pub fn loan_parameters(&self) -> LoanParameters {
        LoanParameters {
            home_price: self.home_price,
            down_payment_percent: self.down_payment_percent,
            loan_term_years: self.loan_term_years,
            interest_rate: self.interest_rate_exact,
            first_payment_date: self.first_payment_date,
        }
    }

    pub fn rate_sweep(&self) -> RateSweepSpec {
        RateSweepSpec::new(
            self.interest_rate_start,
            self.interest_rate_end,
            self.interest_rate_step,
        )
    }
}

/// Result of a full analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageAnalysisOutput {
    pub loan_amount: Money,
    pub affordability: AffordabilityCheck,
    /// Exact-rate amortization, full schedule included.
    pub amortization: AmortizationResult,
    /// Summaries across the swept rates, ascending.
    pub rate_sensitivity: Vec<SensitivityEntry>,
    pub pmi: PmiSchedule,
    pub monthly_housing_cost: MonthlyHousingCost,
    /// Every scheduled payment plus all PMI premiums.
    pub total_cost_of_loan: Money,
}

/// Run the complete analysis. Every input is validated before any figure is
/// computed; insufficient funds and PMI are reported as warnings.
pub fn analyze_mortgage(
    input: &MortgageAnalysisInput,
) -> MortgageResult<ComputationOutput<MortgageAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let funds = affordability::check(
        input.home_price,
        input.down_payment_percent,
        input.cash_savings,
        input.moving_cost,
        input.closing_cost_percent,
    )?;
    let loan = input.loan_parameters();
    loan.validate()?;
    let sweep_spec = input.rate_sweep();
    sweep_spec.validate()?;
    input.assumptions.validate()?;

    let table = sensitivity::sweep(
        loan.loan_principal(),
        loan.loan_term_years,
        &sweep_spec,
        loan.interest_rate,
    )?;
    let amortization = match loan.first_payment_date {
        Some(_) => amortization::compute_loan(&loan)?,
        None => table.exact_rate_result,
    };

    let pmi = pmi_schedule(input.home_price, &amortization, &input.assumptions)?;
    let monthly_housing_cost = affordability::monthly_housing_cost(
        input.home_price,
        amortization.monthly_payment,
        &pmi,
        &input.assumptions,
    )?;

    if !funds.sufficient_funds {
        warnings.push(format!(
            "Cash savings fall short of the {} required to close by {}",
            funds.total_cash_required,
            funds.shortfall()
        ));
    }
    if pmi.required {
        warnings.push(format!(
            "Loan-to-value of {}% exceeds {}%: PMI of {} per month for {} months",
            pmi.initial_ltv_percent.normalize(),
            pmi.ltv_threshold_percent.normalize(),
            pmi.monthly_premium,
            pmi.months_charged
        ));
    }
    if loan.loan_principal().is_zero() {
        warnings.push("Down payment covers the full home price; nothing is financed".into());
    }

    let total_cost_of_loan = amortization.total_paid + pmi.total_paid;
    let output = MortgageAnalysisOutput {
        loan_amount: amortization.principal,
        affordability: funds,
        amortization,
        rate_sensitivity: table.entries,
        pmi,
        monthly_housing_cost,
        total_cost_of_loan,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Mortgage Amortization with Rate Sensitivity",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> MortgageAnalysisInput {
        MortgageAnalysisInput {
            home_price: dec!(215000),
            down_payment_percent: dec!(5),
            loan_term_years: 30,
            interest_rate_exact: dec!(7.15),
            interest_rate_start: dec!(2),
            interest_rate_end: dec!(8),
            interest_rate_step: dec!(1),
            cash_savings: dec!(18000),
            moving_cost: dec!(1200),
            closing_cost_percent: dec!(3),
            first_payment_date: None,
            assumptions: HousingCostAssumptions::default(),
        }
    }

    #[test]
    fn test_analysis_sections_agree() {
        let out = analyze_mortgage(&sample_input()).unwrap().result;
        assert_eq!(out.loan_amount, dec!(204250));
        assert_eq!(out.affordability.down_payment_amount, dec!(10750));
        let exact = out
            .rate_sensitivity
            .iter()
            .find(|e| e.is_exact_rate)
            .unwrap();
        assert_eq!(exact.interest_rate, dec!(7.15));
        assert_eq!(exact.monthly_payment, out.amortization.monthly_payment);
        assert_eq!(
            out.monthly_housing_cost.principal_and_interest,
            out.amortization.monthly_payment
        );
        assert_eq!(
            out.total_cost_of_loan,
            out.amortization.total_paid + out.pmi.total_paid
        );
    }

    #[test]
    fn test_rate_sensitivity_has_grid_plus_exact() {
        let out = analyze_mortgage(&sample_input()).unwrap().result;
        // 2..8 step 1 => 7 grid rates + 7.15
        assert_eq!(out.rate_sensitivity.len(), 8);
    }

    #[test]
    fn test_dated_schedule_when_first_payment_given() {
        let mut input = sample_input();
        input.first_payment_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        let out = analyze_mortgage(&input).unwrap().result;
        assert_eq!(
            out.amortization.schedule[12].payment_date,
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
    }

    #[test]
    fn test_invalid_sweep_returns_no_result() {
        let mut input = sample_input();
        input.interest_rate_end = dec!(1);
        let err = analyze_mortgage(&input).unwrap_err();
        assert!(matches!(err, crate::MortgageError::InvalidRange { .. }));
    }

    #[test]
    fn test_warnings() {
        // 215000 × 5% + 3% + 1200 = 18400 > 18000
        let out = analyze_mortgage(&sample_input()).unwrap();
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[0].contains("short"));
        assert!(out.warnings[1].contains("PMI"));
    }
}
