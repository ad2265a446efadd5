use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MortgageError {
    /// A single input value is outside its valid domain.
    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    /// A relationship between two or more inputs is violated.
    #[error("Invalid range: {field} — {reason}")]
    InvalidRange { field: String, reason: String },
}

impl MortgageError {
    pub fn invalid_parameter(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_range(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidRange {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> &str {
        match self {
            MortgageError::InvalidParameter { field, .. } => field,
            MortgageError::InvalidRange { field, .. } => field,
        }
    }
}
