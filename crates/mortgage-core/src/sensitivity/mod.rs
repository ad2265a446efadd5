//! Interest-rate sensitivity of a mortgage: the same loan amortized across a
//! grid of rates plus the exact quoted rate.

pub mod rate_sweep;

pub use rate_sweep::{sweep, sweep_rates, RateSweepSpec, SensitivityEntry, SensitivityTable};
