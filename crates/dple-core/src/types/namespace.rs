//! Built-in namespace table.

use rustc_hash::FxHashMap;

use crate::traits::NamespaceTable;

/// One namespace known to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceEntry {
    pub index: i32,
    /// Canonical name with spaces; empty for the main namespace.
    pub name: String,
    pub subpages: bool,
}

/// In-memory namespace table seeded with the standard wiki namespaces.
///
/// Name lookups are case-insensitive and treat `_` and ` ` alike.
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    entries: FxHashMap<i32, NamespaceEntry>,
    by_name: FxHashMap<String, i32>,
    content: Vec<i32>,
}

const STANDARD: &[(i32, &str, bool)] = &[
    (-2, "Media", false),
    (-1, "Special", false),
    (0, "", false),
    (1, "Talk", true),
    (2, "User", true),
    (3, "User talk", true),
    (4, "Project", true),
    (5, "Project talk", true),
    (6, "File", false),
    (7, "File talk", true),
    (8, "MediaWiki", true),
    (9, "MediaWiki talk", true),
    (10, "Template", true),
    (11, "Template talk", true),
    (12, "Help", true),
    (13, "Help talk", true),
    (14, "Category", false),
    (15, "Category talk", true),
];

const ALIASES: &[(&str, i32)] = &[("Image", 6), ("Image talk", 7)];

fn lookup_key(name: &str) -> String {
    name.trim().replace('_', " ").to_lowercase()
}

impl NamespaceRegistry {
    /// An empty registry containing only the main namespace.
    pub fn empty() -> Self {
        let mut registry = Self {
            entries: FxHashMap::default(),
            by_name: FxHashMap::default(),
            content: vec![0],
        };
        registry.add_namespace(0, "", false);
        registry
    }

    /// The standard wiki namespace table.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for &(index, name, subpages) in STANDARD {
            registry.add_namespace(index, name, subpages);
        }
        for &(alias, index) in ALIASES {
            registry.add_alias(alias, index);
        }
        registry
    }

    pub fn add_namespace(&mut self, index: i32, name: &str, subpages: bool) -> &mut Self {
        if !name.is_empty() {
            self.by_name.insert(lookup_key(name), index);
        }
        self.entries.insert(
            index,
            NamespaceEntry {
                index,
                name: name.replace('_', " "),
                subpages,
            },
        );
        self
    }

    pub fn add_alias(&mut self, alias: &str, index: i32) -> &mut Self {
        self.by_name.insert(lookup_key(alias), index);
        self
    }

    pub fn with_content_namespaces(mut self, content: Vec<i32>) -> Self {
        self.content = content;
        self
    }

    pub fn entry(&self, index: i32) -> Option<&NamespaceEntry> {
        self.entries.get(&index)
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl NamespaceTable for NamespaceRegistry {
    fn exists(&self, index: i32) -> bool {
        self.entries.contains_key(&index)
    }

    fn index_by_name(&self, name: &str) -> Option<i32> {
        self.by_name.get(&lookup_key(name)).copied()
    }

    fn display_name(&self, index: i32) -> Option<String> {
        self.entries.get(&index).map(|e| e.name.clone())
    }

    fn has_subpages(&self, index: i32) -> bool {
        self.entries.get(&index).is_some_and(|e| e.subpages)
    }

    fn is_content(&self, index: i32) -> bool {
        self.content.contains(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_and_separator_insensitive() {
        let ns = NamespaceRegistry::standard();
        assert_eq!(ns.index_by_name("category"), Some(14));
        assert_eq!(ns.index_by_name("User_talk"), Some(3));
        assert_eq!(ns.index_by_name("user talk"), Some(3));
        assert_eq!(ns.index_by_name("Image"), Some(6));
        assert_eq!(ns.index_by_name("Nonexistent"), None);
    }

    #[test]
    fn test_display_and_flags() {
        let ns = NamespaceRegistry::standard();
        assert_eq!(ns.display_name(0).as_deref(), Some(""));
        assert_eq!(ns.display_name(11).as_deref(), Some("Template talk"));
        assert!(ns.has_subpages(2));
        assert!(!ns.has_subpages(0));
        assert!(ns.is_content(0));
        assert!(!ns.is_content(14));
        assert!(!ns.exists(100));
    }
}
