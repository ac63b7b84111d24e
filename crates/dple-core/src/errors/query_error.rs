//! Query accumulator errors.

use super::error_code::{self, DpleErrorCode};
use super::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Query has already been executed")]
    AlreadyExecuted,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl DpleErrorCode for QueryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyExecuted => error_code::ALREADY_EXECUTED,
            Self::Storage(e) => e.error_code(),
        }
    }

    fn message_key(&self) -> &'static str {
        error_code::MSG_INTERNAL
    }
}
