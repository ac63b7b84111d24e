//! Guard errors: the final acceptability check on an assembled query.

use super::error_code::{self, DpleErrorCode};

/// Errors raised by the guard feature before the query executes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("No selection criteria given")]
    NoSelectionCriteria,

    #[error("Query too expensive: total cost {total} exceeds maximum {max}")]
    CostExceeded { total: u32, max: u32 },
}

impl DpleErrorCode for GuardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSelectionCriteria => error_code::NO_CRITERIA,
            Self::CostExceeded { .. } => error_code::TOO_EXPENSIVE,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            Self::NoSelectionCriteria => error_code::MSG_NO_CRITERIA,
            Self::CostExceeded { .. } => error_code::MSG_TOO_EXPENSIVE,
        }
    }

    fn message_params(&self) -> Vec<String> {
        match self {
            Self::NoSelectionCriteria => Vec::new(),
            Self::CostExceeded { total, max } => vec![total.to_string(), max.to_string()],
        }
    }
}
