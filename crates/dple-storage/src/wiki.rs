//! The SQLite-backed wiki host.

use dple_core::config::Settings;
use dple_core::errors::StorageError;
use dple_core::query::{ResultSet, SelectRequest};
use dple_core::traits::{
    NamespaceTable, QueryExecutor, RedirectResolver, TitleResolver, UserDirectory,
};
use dple_core::types::{NamespaceRegistry, Title};

use crate::connection::DatabaseManager;
use crate::queries::{pages, select, users};

/// Implements every collaborator the engine needs over one database.
///
/// Lookups that fail at the storage level are logged and treated as
/// "not found"; only query execution reports storage errors.
pub struct SqliteWiki {
    db: DatabaseManager,
    namespaces: NamespaceRegistry,
}

impl SqliteWiki {
    pub fn new(db: DatabaseManager, namespaces: NamespaceRegistry) -> Self {
        Self { db, namespaces }
    }

    /// A wiki over `db` with the standard namespaces and the content
    /// namespaces configured in `settings`.
    pub fn with_settings(db: DatabaseManager, settings: &Settings) -> Self {
        let namespaces = NamespaceRegistry::standard()
            .with_content_namespaces(settings.content_namespaces().to_vec());
        Self::new(db, namespaces)
    }

    /// An empty in-memory wiki with the standard namespaces.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::open_in_memory_with(&Settings::default())
    }

    pub fn open_in_memory_with(settings: &Settings) -> Result<Self, StorageError> {
        Ok(Self::with_settings(DatabaseManager::open_in_memory()?, settings))
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    pub fn namespaces(&self) -> &NamespaceRegistry {
        &self.namespaces
    }

    fn page_status(&self, namespace: i32, dbkey: &str) -> Option<pages::PageStatus> {
        self.db
            .with_reader(|conn| pages::find_page(conn, namespace, dbkey))
            .unwrap_or_else(|e| {
                tracing::warn!(namespace, dbkey, error = %e, "page lookup failed");
                None
            })
    }

    fn attach_status(&self, title: Title) -> Title {
        match self.page_status(title.namespace(), title.dbkey()) {
            Some(status) => title.with_id(status.id).with_redirect(status.is_redirect),
            None => title,
        }
    }
}

impl NamespaceTable for SqliteWiki {
    fn exists(&self, index: i32) -> bool {
        self.namespaces.exists(index)
    }

    fn index_by_name(&self, name: &str) -> Option<i32> {
        self.namespaces.index_by_name(name)
    }

    fn display_name(&self, index: i32) -> Option<String> {
        self.namespaces.display_name(index)
    }

    fn has_subpages(&self, index: i32) -> bool {
        self.namespaces.has_subpages(index)
    }

    fn is_content(&self, index: i32) -> bool {
        self.namespaces.is_content(index)
    }
}

impl TitleResolver for SqliteWiki {
    fn resolve(&self, default_ns: i32, text: &str) -> Option<Title> {
        let title = Title::make_title_safe(&self.namespaces, default_ns, text)?;
        Some(self.attach_status(title))
    }
}

impl RedirectResolver for SqliteWiki {
    fn redirect_target(&self, title: &Title) -> Option<Title> {
        if !title.is_redirect() {
            return None;
        }
        let page_id = if title.exists() {
            title.id()
        } else {
            self.page_status(title.namespace(), title.dbkey())?.id
        };

        let target = self
            .db
            .with_reader(|conn| pages::find_redirect_target(conn, page_id))
            .unwrap_or_else(|e| {
                tracing::warn!(page_id, error = %e, "redirect lookup failed");
                None
            })?;

        let (namespace, dbkey) = target;
        if !self.namespaces.exists(namespace) {
            return None;
        }
        Some(self.attach_status(Title::from_parts(&self.namespaces, namespace, &dbkey)))
    }
}

impl UserDirectory for SqliteWiki {
    fn user_id_by_name(&self, name: &str) -> Option<i64> {
        self.db
            .with_reader(|conn| users::find_user_id(conn, name))
            .unwrap_or_else(|e| {
                tracing::warn!(name, error = %e, "user lookup failed");
                None
            })
    }
}

impl QueryExecutor for SqliteWiki {
    fn select(&self, request: &SelectRequest<'_>) -> Result<ResultSet, StorageError> {
        self.db.with_reader(|conn| select::run_select(conn, request))
    }
}
