//! Page and redirect lookups.

use dple_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

use crate::to_storage_err;

/// Existence data for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStatus {
    pub id: i64,
    pub is_redirect: bool,
}

pub fn find_page(
    conn: &Connection,
    namespace: i32,
    dbkey: &str,
) -> Result<Option<PageStatus>, StorageError> {
    conn.prepare_cached(
        "SELECT page_id, page_is_redirect FROM page
         WHERE page_namespace = ?1 AND page_title = ?2",
    )
    .map_err(to_storage_err)?
    .query_row(params![namespace, dbkey], |row| {
        Ok(PageStatus {
            id: row.get(0)?,
            is_redirect: row.get::<_, i64>(1)? != 0,
        })
    })
    .optional()
    .map_err(to_storage_err)
}

/// Namespace and key a redirect page points to.
pub fn find_redirect_target(
    conn: &Connection,
    page_id: i64,
) -> Result<Option<(i32, String)>, StorageError> {
    conn.prepare_cached("SELECT rd_namespace, rd_title FROM redirect WHERE rd_from = ?1")
        .map_err(to_storage_err)?
        .query_row(params![page_id], |row| Ok((row.get(0)?, row.get(1)?)))
        .optional()
        .map_err(to_storage_err)
}

pub fn count_pages(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM page", [], |row| row.get(0))
        .map_err(to_storage_err)
}
