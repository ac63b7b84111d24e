//! Bundle of collaborator references handed to the engine.

use super::{NamespaceTable, QueryExecutor, RedirectResolver, TitleResolver, UserDirectory};

/// Borrowed collaborators for one engine run.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub namespaces: &'a dyn NamespaceTable,
    pub titles: &'a dyn TitleResolver,
    pub redirects: &'a dyn RedirectResolver,
    pub users: &'a dyn UserDirectory,
    pub executor: &'a dyn QueryExecutor,
}

impl<'a> Host<'a> {
    /// Use one object for every collaborator role.
    pub fn from_backend<B>(backend: &'a B) -> Self
    where
        B: NamespaceTable + TitleResolver + RedirectResolver + UserDirectory + QueryExecutor,
    {
        Self {
            namespaces: backend,
            titles: backend,
            redirects: backend,
            users: backend,
            executor: backend,
        }
    }
}
