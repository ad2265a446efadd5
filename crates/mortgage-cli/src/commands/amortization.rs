use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::amortization::{self, AmortizationResult, LoanParameters};

use crate::input;

/// Arguments for a single-rate amortization
#[derive(Args)]
pub struct AmortizeArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6.5 for 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub years: u32,

    /// Date of the first payment (YYYY-MM-DD); dates every schedule row
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,

    /// Include the period-by-period schedule in the output
    #[arg(long)]
    pub schedule: bool,

    /// Path to a JSON or YAML file with loan parameters
    /// (home_price, down_payment_percent, loan_term_years, interest_rate)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = match input::load::<LoanParameters>(args.input.as_deref())? {
        Some(params) => amortization::compute_loan(&params)?,
        None => amortize_from_flags(&args)?,
    };

    tracing::info!(
        monthly_payment = %result.monthly_payment,
        periods = result.number_of_payments,
        "amortized loan"
    );

    let mut value = serde_json::to_value(result)?;
    if !args.schedule {
        super::strip_schedules(&mut value);
    }
    Ok(value)
}

fn amortize_from_flags(
    args: &AmortizeArgs,
) -> Result<AmortizationResult, Box<dyn std::error::Error>> {
    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
    let result = match args.first_payment_date {
        Some(date) => amortization::compute_dated(principal, rate, args.years, date)?,
        None => amortization::compute(principal, rate, args.years)?,
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_core::MortgageError;
    use rust_decimal_macros::dec;

    fn flags(principal: Decimal, date: Option<NaiveDate>) -> AmortizeArgs {
        AmortizeArgs {
            principal: Some(principal),
            rate: Some(dec!(6)),
            years: 30,
            first_payment_date: date,
            schedule: true,
            input: None,
        }
    }

    #[test]
    fn test_zero_principal_with_first_payment_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1);
        let result = amortize_from_flags(&flags(Decimal::ZERO, date)).unwrap();
        assert_eq!(result.total_paid, Decimal::ZERO);
        assert_eq!(result.schedule[0].payment_date, date);
    }

    #[test]
    fn test_dated_flags_report_principal_field() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1);
        let err = amortize_from_flags(&flags(dec!(-1), date)).unwrap_err();
        let err = err.downcast_ref::<MortgageError>().unwrap();
        assert_eq!(err.field(), "principal");
    }

    #[test]
    fn test_missing_rate_flag() {
        let mut args = flags(dec!(1000), None);
        args.rate = None;
        let err = amortize_from_flags(&args).unwrap_err();
        assert!(err.to_string().contains("--rate"));
    }
}
