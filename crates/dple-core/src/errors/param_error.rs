//! Parameter parsing errors.
//!
//! Malformed or absent parameters degrade to defaults; only a numeric
//! namespace index the host does not know is fatal.

use super::error_code::{self, DpleErrorCode};

/// Errors raised while features parse their parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("Invalid namespace index: {index}")]
    InvalidNamespace { index: i64 },
}

impl DpleErrorCode for ParamError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNamespace { .. } => error_code::INVALID_NAMESPACE,
        }
    }

    fn message_key(&self) -> &'static str {
        error_code::MSG_INVALID_NS_INDEX
    }

    fn message_params(&self) -> Vec<String> {
        match self {
            Self::InvalidNamespace { index } => vec![index.to_string()],
        }
    }
}
