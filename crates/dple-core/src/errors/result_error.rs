//! Result retrieval errors. Fatal to one retrieval call, never to the engine.

use super::error_code::{self, DpleErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultError {
    #[error("Unknown result converter: {name}")]
    UnknownConverter { name: String },

    #[error("Query has not been executed")]
    NotExecuted,
}

impl DpleErrorCode for ResultError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownConverter { .. } => error_code::UNKNOWN_CONVERTER,
            Self::NotExecuted => error_code::NOT_EXECUTED,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            Self::UnknownConverter { .. } => error_code::MSG_UNKNOWN_CONVERTER,
            Self::NotExecuted => error_code::MSG_INTERNAL,
        }
    }

    fn message_params(&self) -> Vec<String> {
        match self {
            Self::UnknownConverter { name } => vec![name.clone()],
            Self::NotExecuted => Vec::new(),
        }
    }
}
