//! Engine construction errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::DpleErrorCode;
use super::{GuardError, ParamError, QueryError};

/// Errors that abort a dynamic page list request. No partial result is
/// exposed once one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),

    #[error("Guard error: {0}")]
    Guard(#[from] GuardError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),
}

impl DpleErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Param(e) => e.error_code(),
            Self::Guard(e) => e.error_code(),
            Self::Query(e) => e.error_code(),
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            Self::Param(e) => e.message_key(),
            Self::Guard(e) => e.message_key(),
            Self::Query(e) => e.message_key(),
        }
    }

    fn message_params(&self) -> Vec<String> {
        match self {
            Self::Param(e) => e.message_params(),
            Self::Guard(e) => e.message_params(),
            Self::Query(e) => e.message_params(),
        }
    }
}
