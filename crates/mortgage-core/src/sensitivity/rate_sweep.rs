use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::amortization::{self, AmortizationResult};
use crate::error::MortgageError;
use crate::types::{require_non_negative, Money, Percent};
use crate::MortgageResult;

/// Rates closer than this (in percentage points) are the same rate.
pub const RATE_EPSILON: Decimal = dec!(0.000001);

/// Upper bound on grid points in a single sweep.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Grid of interest rates to sweep, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSweepSpec {
    pub start: Percent,
    pub end: Percent,
    pub step: Percent,
}

impl RateSweepSpec {
    pub fn new(start: Percent, end: Percent, step: Percent) -> Self {
        Self { start, end, step }
    }

    pub fn validate(&self) -> MortgageResult<()> {
        require_non_negative("rate_start", self.start)?;
        if self.step <= Decimal::ZERO {
            return Err(MortgageError::invalid_range(
                "rate_step",
                format!("step must be > 0, got {}", self.step),
            ));
        }
        if self.step <= RATE_EPSILON {
            return Err(MortgageError::invalid_range(
                "rate_step",
                format!("step must be > {RATE_EPSILON}, got {}", self.step),
            ));
        }
        if self.end < self.start {
            return Err(MortgageError::invalid_range(
                "rate_end",
                format!("end ({}) must be >= start ({})", self.end, self.start),
            ));
        }
        Ok(())
    }

    /// Grid points `start + k·step` that do not exceed `end`. `end` itself is
    /// appended when it falls within half a step of the last grid point. The
    /// grid stops early at the first point outside the `Decimal` range.
    pub fn grid(&self) -> MortgageResult<Vec<Percent>> {
        self.validate()?;

        let mut rates = Vec::new();
        let mut k: u32 = 0;
        loop {
            let rate = match self
                .step
                .checked_mul(Decimal::from(k))
                .and_then(|offset| self.start.checked_add(offset))
            {
                Some(rate) if rate <= self.end => rate,
                _ => break,
            };
            if rates.len() == MAX_SWEEP_POINTS {
                return Err(MortgageError::invalid_range(
                    "rate_step",
                    format!("sweep would exceed {MAX_SWEEP_POINTS} rates"),
                ));
            }
            rates.push(rate);
            k += 1;
        }

        if let Some(&last) = rates.last() {
            let gap = self.end - last;
            if gap > RATE_EPSILON && gap <= self.step / dec!(2) {
                rates.push(self.end);
            }
        }

        Ok(rates)
    }
}

/// One row of the sensitivity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityEntry {
    pub interest_rate: Percent,
    /// True for the buyer's quoted rate.
    pub is_exact_rate: bool,
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest_paid: Money,
}

/// Payments across the swept rates, ascending by rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityTable {
    pub entries: Vec<SensitivityEntry>,
    /// Full schedule at the exact rate; swept rates keep only summaries.
    pub exact_rate_result: AmortizationResult,
}

impl SensitivityTable {
    pub fn exact_entry(&self) -> Option<&SensitivityEntry> {
        self.entries.iter().find(|e| e.is_exact_rate)
    }

    pub fn rates(&self) -> Vec<Percent> {
        self.entries.iter().map(|e| e.interest_rate).collect()
    }
}

/// The ordered rate sequence for a sweep: the grid from `spec` merged with
/// `exact_rate`. Each element is `(rate, is_exact_rate)`.
pub fn sweep_rates(spec: &RateSweepSpec, exact_rate: Percent) -> MortgageResult<Vec<(Percent, bool)>> {
    require_non_negative("interest_rate_exact", exact_rate)?;
    let grid = spec.grid()?;

    let mut rates: Vec<(Percent, bool)> = grid
        .into_iter()
        .filter(|r| (*r - exact_rate).abs() > RATE_EPSILON)
        .map(|r| (r, false))
        .collect();

    let pos = rates.partition_point(|(r, _)| *r < exact_rate);
    rates.insert(pos, (exact_rate, true));

    Ok(rates)
}

/// Amortize `principal` over `term_years` at every rate in the sweep.
pub fn sweep(
    principal: Money,
    term_years: u32,
    spec: &RateSweepSpec,
    exact_rate: Percent,
) -> MortgageResult<SensitivityTable> {
    let rates = sweep_rates(spec, exact_rate)?;
    let exact_rate_result = amortization::compute(principal, exact_rate, term_years)?;

    let entries = summarise_rates(&rates, principal, term_years, &exact_rate_result)?;

    Ok(SensitivityTable {
        entries,
        exact_rate_result,
    })
}

fn entry_for(
    rate: Percent,
    is_exact: bool,
    principal: Money,
    term_years: u32,
    exact: &AmortizationResult,
) -> MortgageResult<SensitivityEntry> {
    let summary = if is_exact {
        exact.summary()
    } else {
        amortization::compute(principal, rate, term_years)?.summary()
    };
    Ok(SensitivityEntry {
        interest_rate: rate,
        is_exact_rate: is_exact,
        monthly_payment: summary.monthly_payment,
        total_paid: summary.total_paid,
        total_interest_paid: summary.total_interest_paid,
    })
}

#[cfg(not(feature = "parallel"))]
fn summarise_rates(
    rates: &[(Percent, bool)],
    principal: Money,
    term_years: u32,
    exact: &AmortizationResult,
) -> MortgageResult<Vec<SensitivityEntry>> {
    rates
        .iter()
        .map(|&(rate, is_exact)| entry_for(rate, is_exact, principal, term_years, exact))
        .collect()
}

#[cfg(feature = "parallel")]
fn summarise_rates(
    rates: &[(Percent, bool)],
    principal: Money,
    term_years: u32,
    exact: &AmortizationResult,
) -> MortgageResult<Vec<SensitivityEntry>> {
    rates
        .par_iter()
        .map(|&(rate, is_exact)| entry_for(rate, is_exact, principal, term_years, exact))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_exact_steps() {
        let spec = RateSweepSpec::new(dec!(2), dec!(8), dec!(1));
        let grid = spec.grid().unwrap();
        assert_eq!(
            grid,
            vec![dec!(2), dec!(3), dec!(4), dec!(5), dec!(6), dec!(7), dec!(8)]
        );
    }

    #[test]
    fn test_grid_appends_end_within_half_step() {
        // 5.0, 5.4, 5.8 then end 6.0 is 0.2 away (<= 0.2)
        let spec = RateSweepSpec::new(dec!(5), dec!(6), dec!(0.4));
        let grid = spec.grid().unwrap();
        assert_eq!(grid, vec![dec!(5), dec!(5.4), dec!(5.8), dec!(6)]);
    }

    #[test]
    fn test_grid_end_policy_boundary() {
        // 5.0, 5.6, 6.2; end is 0.3 past the last point, exactly half a step
        let spec = RateSweepSpec::new(dec!(5), dec!(6.5), dec!(0.6));
        assert_eq!(
            spec.grid().unwrap(),
            vec![dec!(5), dec!(5.6), dec!(6.2), dec!(6.5)]
        );

        // 0.35 past the last point, more than half a step
        let spec = RateSweepSpec::new(dec!(5), dec!(6.55), dec!(0.6));
        assert_eq!(spec.grid().unwrap(), vec![dec!(5), dec!(5.6), dec!(6.2)]);
    }

    #[test]
    fn test_grid_single_point() {
        let spec = RateSweepSpec::new(dec!(4), dec!(4), dec!(0.25));
        assert_eq!(spec.grid().unwrap(), vec![dec!(4)]);
    }

    #[test]
    fn test_grid_uses_multiplication_not_accumulation() {
        let spec = RateSweepSpec::new(dec!(0), dec!(1), dec!(0.1));
        let grid = spec.grid().unwrap();
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[10], dec!(1.0));
    }

    #[test]
    fn test_invalid_ranges() {
        let zero_step = RateSweepSpec::new(dec!(5), dec!(6), dec!(0));
        assert!(matches!(
            zero_step.grid(),
            Err(MortgageError::InvalidRange { .. })
        ));

        let inverted = RateSweepSpec::new(dec!(6), dec!(5), dec!(0.5));
        assert!(matches!(
            inverted.grid(),
            Err(MortgageError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_step_below_rate_resolution() {
        let spec = RateSweepSpec::new(dec!(5), dec!(5.00001), dec!(0.0000001));
        let err = spec.grid().unwrap_err();
        assert!(matches!(err, MortgageError::InvalidRange { .. }));
        assert_eq!(err.field(), "rate_step");
        assert!(sweep_rates(&spec, dec!(5.000005)).is_err());

        let at_epsilon = RateSweepSpec::new(dec!(5), dec!(5.00001), RATE_EPSILON);
        assert!(at_epsilon.validate().is_err());
    }

    #[test]
    fn test_grid_stops_at_decimal_limit() {
        let spec = RateSweepSpec::new(dec!(1), Decimal::MAX, Decimal::MAX);
        assert_eq!(spec.grid().unwrap(), vec![dec!(1)]);
    }

    #[test]
    fn test_grid_too_many_points() {
        let spec = RateSweepSpec::new(dec!(0), dec!(100), dec!(0.001));
        assert!(matches!(spec.grid(), Err(MortgageError::InvalidRange { .. })));
    }

    #[test]
    fn test_exact_rate_inserted_in_order() {
        let spec = RateSweepSpec::new(dec!(5), dec!(6), dec!(0.5));
        let rates = sweep_rates(&spec, dec!(5.75)).unwrap();
        assert_eq!(
            rates,
            vec![
                (dec!(5.0), false),
                (dec!(5.5), false),
                (dec!(5.75), true),
                (dec!(6.0), false),
            ]
        );
    }

    #[test]
    fn test_exact_rate_outside_grid() {
        let spec = RateSweepSpec::new(dec!(5), dec!(6), dec!(0.5));
        let below = sweep_rates(&spec, dec!(3)).unwrap();
        assert_eq!(below.first(), Some(&(dec!(3), true)));
        let above = sweep_rates(&spec, dec!(9)).unwrap();
        assert_eq!(above.last(), Some(&(dec!(9), true)));
    }

    #[test]
    fn test_duplicate_keeps_exact_version() {
        let spec = RateSweepSpec::new(dec!(5), dec!(6), dec!(0.5));
        let rates = sweep_rates(&spec, dec!(5.5)).unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates[1], (dec!(5.5), true));
    }
}
