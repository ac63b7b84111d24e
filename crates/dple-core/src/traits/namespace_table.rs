//! NamespaceTable trait.

/// Namespace metadata lookups.
pub trait NamespaceTable {
    /// Whether `index` names a configured namespace.
    fn exists(&self, index: i32) -> bool;

    /// Index of a namespace by (localized or canonical) name.
    fn index_by_name(&self, name: &str) -> Option<i32>;

    /// Display name, empty for the main namespace.
    fn display_name(&self, index: i32) -> Option<String>;

    fn has_subpages(&self, index: i32) -> bool;

    fn is_content(&self, index: i32) -> bool;
}
