//! Level-payment mortgage amortization.
//!
//! Computes the fixed monthly payment for a fully amortizing loan, the
//! period-by-period split between principal and interest, and the totals
//! paid over the life of the loan. All math in `rust_decimal::Decimal`.

pub mod engine;

pub use engine::{
    compute, compute_dated, compute_loan, AmortizationResult, AmortizationSummary, LoanParameters,
    PaymentRow, MAX_TERM_YEARS,
};
