//! Write queries for populating a wiki store.
//!
//! The engine itself only reads; these exist for hosts that import data
//! and for tests.

use dple_core::errors::StorageError;
use rusqlite::{params, Connection};

use crate::to_storage_err;

/// A page to insert. Titles are stored keys (`_` for spaces).
#[derive(Debug, Clone, Default)]
pub struct NewPage<'a> {
    pub namespace: i32,
    pub title: &'a str,
    pub is_redirect: bool,
    pub len: i64,
    pub touched: &'a str,
    pub counter: i64,
}

impl<'a> NewPage<'a> {
    pub fn new(namespace: i32, title: &'a str) -> Self {
        Self {
            namespace,
            title,
            ..Default::default()
        }
    }
}

/// A category membership.
#[derive(Debug, Clone, Default)]
pub struct NewCategoryLink<'a> {
    pub from: i64,
    pub to: &'a str,
    pub sortkey: &'a str,
    pub sortkey_prefix: &'a str,
    pub timestamp: &'a str,
    pub kind: &'a str,
}

/// Insert a page. Returns its id.
pub fn insert_page(conn: &Connection, page: &NewPage<'_>) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO page (page_namespace, page_title, page_is_redirect, page_len,
                           page_touched, page_counter)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            page.namespace,
            page.title,
            page.is_redirect as i64,
            page.len,
            page.touched,
            page.counter
        ],
    )
    .map_err(to_storage_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_category_link(conn: &Connection, link: &NewCategoryLink<'_>) -> Result<(), StorageError> {
    let kind = if link.kind.is_empty() { "page" } else { link.kind };
    let sortkey = if link.sortkey.is_empty() {
        link.sortkey_prefix
    } else {
        link.sortkey
    };
    conn.execute(
        "INSERT INTO categorylinks (cl_from, cl_to, cl_sortkey, cl_sortkey_prefix, cl_timestamp, cl_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![link.from, link.to, sortkey, link.sortkey_prefix, link.timestamp, kind],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn insert_page_link(conn: &Connection, from: i64, namespace: i32, title: &str) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO pagelinks (pl_from, pl_namespace, pl_title) VALUES (?1, ?2, ?3)",
        params![from, namespace, title],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn insert_template_link(conn: &Connection, from: i64, namespace: i32, title: &str) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO templatelinks (tl_from, tl_namespace, tl_title) VALUES (?1, ?2, ?3)",
        params![from, namespace, title],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn insert_image_link(conn: &Connection, from: i64, to: &str) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO imagelinks (il_from, il_to) VALUES (?1, ?2)",
        params![from, to],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Record a redirect and flag its page as one.
pub fn insert_redirect(conn: &Connection, from: i64, namespace: i32, title: &str) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO redirect (rd_from, rd_namespace, rd_title) VALUES (?1, ?2, ?3)",
        params![from, namespace, title],
    )
    .map_err(to_storage_err)?;
    conn.execute(
        "UPDATE page SET page_is_redirect = 1 WHERE page_id = ?1",
        params![from],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn insert_user(conn: &Connection, name: &str) -> Result<i64, StorageError> {
    conn.execute("INSERT INTO user (user_name) VALUES (?1)", params![name])
        .map_err(to_storage_err)?;
    Ok(conn.last_insert_rowid())
}

/// Append a revision to a page by `user`. The previous latest revision
/// becomes its parent and the page's latest pointer moves forward.
pub fn insert_revision(
    conn: &Connection,
    page_id: i64,
    user: i64,
    timestamp: &str,
) -> Result<i64, StorageError> {
    let parent: i64 = conn
        .query_row(
            "SELECT page_latest FROM page WHERE page_id = ?1",
            params![page_id],
            |row| row.get(0),
        )
        .map_err(to_storage_err)?;
    conn.execute(
        "INSERT INTO revision (rev_page, rev_user, rev_timestamp, rev_parent_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![page_id, user, timestamp, parent],
    )
    .map_err(to_storage_err)?;
    let rev_id = conn.last_insert_rowid();
    conn.execute(
        "UPDATE page SET page_latest = ?1, page_touched = ?2 WHERE page_id = ?3",
        params![rev_id, timestamp, page_id],
    )
    .map_err(to_storage_err)?;
    Ok(rev_id)
}
