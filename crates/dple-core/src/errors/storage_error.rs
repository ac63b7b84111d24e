//! Storage errors.

use super::error_code::{self, DpleErrorCode};

/// Errors from the relational store and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Connection lock poisoned")]
    LockPoisoned,
}

impl DpleErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            _ => error_code::STORAGE_ERROR,
        }
    }

    fn message_key(&self) -> &'static str {
        error_code::MSG_INTERNAL
    }
}
