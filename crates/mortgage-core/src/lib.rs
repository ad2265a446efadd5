pub mod error;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
