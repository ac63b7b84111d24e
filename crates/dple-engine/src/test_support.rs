//! In-memory collaborators for unit tests.

use std::cell::{Cell, RefCell};

use rustc_hash::FxHashMap;

use dple_core::config::Settings;
use dple_core::errors::StorageError;
use dple_core::params::ParameterSet;
use dple_core::query::{ResultSet, Row, SelectRequest};
use dple_core::traits::{
    Host, NamespaceTable, QueryExecutor, RedirectResolver, TitleResolver, UserDirectory,
};
use dple_core::types::{NamespaceRegistry, Title};

use crate::feature::ConstructContext;
use crate::registry::FeatureSetBuilder;

/// Namespace table, resolvers and a recording executor that answers
/// every select with the same canned rows.
pub(crate) struct Fixture {
    pub namespaces: NamespaceRegistry,
    users: FxHashMap<String, i64>,
    redirects: FxHashMap<String, Title>,
    rows: RefCell<Vec<Row>>,
    pub selects: Cell<usize>,
    pub last_conds: Cell<usize>,
    pub earlier: FeatureSetBuilder,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            namespaces: NamespaceRegistry::standard(),
            users: FxHashMap::default(),
            redirects: FxHashMap::default(),
            rows: RefCell::new(Vec::new()),
            selects: Cell::new(0),
            last_conds: Cell::new(0),
            earlier: FeatureSetBuilder::new(),
        }
    }

    pub fn with_rows(self, rows: Vec<Row>) -> Self {
        *self.rows.borrow_mut() = rows;
        self
    }

    pub fn with_user(mut self, name: &str, id: i64) -> Self {
        self.users.insert(name.to_string(), id);
        self
    }

    /// Register `from` (prefixed text) as a redirect to `to`.
    pub fn with_redirect(mut self, from: &str, to: Title) -> Self {
        self.redirects.insert(from.to_string(), to);
        self
    }

    pub fn settings(&self) -> Settings {
        Settings::default()
    }

    pub fn title(&self, ns: i32, dbkey: &str) -> Title {
        Title::from_parts(&self.namespaces, ns, dbkey)
    }

    pub fn host(&self) -> Host<'_> {
        Host::from_backend(self)
    }

    pub fn context<'a>(&'a self, params: &'a ParameterSet, settings: &'a Settings) -> ConstructContext<'a> {
        ConstructContext {
            params,
            settings,
            host: self.host(),
            earlier: &self.earlier,
        }
    }
}

/// A page row with the base columns set.
pub(crate) fn page_row(id: i64, ns: i32, dbkey: &str) -> Row {
    Row::new()
        .with("page_id", id)
        .with("page_namespace", ns)
        .with("page_title", dbkey)
        .with("page_is_redirect", 0_i64)
        .with("page_len", id * 100)
}

impl NamespaceTable for Fixture {
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

impl TitleResolver for Fixture {
    fn resolve(&self, default_ns: i32, text: &str) -> Option<Title> {
        Title::make_title_safe(&self.namespaces, default_ns, text)
    }
}

impl RedirectResolver for Fixture {
    fn redirect_target(&self, title: &Title) -> Option<Title> {
        self.redirects.get(&title.prefixed_text()).cloned()
    }
}

impl UserDirectory for Fixture {
    fn user_id_by_name(&self, name: &str) -> Option<i64> {
        self.users.get(name).copied()
    }
}

impl QueryExecutor for Fixture {
    fn select(&self, request: &SelectRequest<'_>) -> Result<ResultSet, StorageError> {
        self.selects.set(self.selects.get() + 1);
        self.last_conds.set(request.conds.len());
        Ok(ResultSet::new(self.rows.borrow().clone()))
    }
}
