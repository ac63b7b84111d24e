//! # dple-storage
//!
//! SQLite persistence for the dynamic page list engine: a wiki-shaped
//! schema, the renderer that turns structured selects into SQL with bound
//! parameters, and [`SqliteWiki`], which implements every collaborator
//! trait the engine consumes.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod wiki;

pub use connection::DatabaseManager;
pub use wiki::SqliteWiki;

use dple_core::errors::StorageError;

pub(crate) fn to_storage_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}
