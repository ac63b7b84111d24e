//! User lookups.

use dple_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

use crate::to_storage_err;

pub fn find_user_id(conn: &Connection, name: &str) -> Result<Option<i64>, StorageError> {
    conn.prepare_cached("SELECT user_id FROM user WHERE user_name = ?1")
        .map_err(to_storage_err)?
        .query_row(params![name], |row| row.get(0))
        .optional()
        .map_err(to_storage_err)
}
