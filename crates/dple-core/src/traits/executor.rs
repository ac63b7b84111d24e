//! QueryExecutor trait.

use crate::errors::StorageError;
use crate::query::{ResultSet, SelectRequest};

/// Runs a structured select and materializes its rows.
pub trait QueryExecutor {
    fn select(&self, request: &SelectRequest<'_>) -> Result<ResultSet, StorageError>;
}
