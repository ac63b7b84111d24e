//! Schema migrations, tracked with `PRAGMA user_version`.

pub mod v001_wiki_schema;

use dple_core::errors::StorageError;
use rusqlite::Connection;

use crate::to_storage_err;

const MIGRATIONS: &[(u32, &str)] = &[(1, v001_wiki_schema::MIGRATION_SQL)];

/// Latest schema version this crate knows.
pub const LATEST_VERSION: u32 = 1;

pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(to_storage_err)
}

/// Apply every pending migration, each in its own transaction.
/// Returns the schema version afterwards.
pub fn run_migrations(conn: &Connection) -> Result<u32, StorageError> {
    let mut version = current_version(conn)?;

    for &(target, sql) in MIGRATIONS {
        if target <= version {
            continue;
        }
        let batch = format!("BEGIN;\n{sql}\nPRAGMA user_version = {target};\nCOMMIT;");
        if let Err(e) = conn.execute_batch(&batch) {
            // Best effort; the transaction may not have started.
            let _ = conn.execute_batch("ROLLBACK;");
            return Err(StorageError::MigrationFailed {
                version: target,
                message: e.to_string(),
            });
        }
        tracing::info!(version = target, "applied migration");
        version = target;
    }

    Ok(version)
}
