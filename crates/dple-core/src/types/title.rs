//! Page titles and their cheap derived properties.

use serde::{Deserialize, Serialize};

use crate::constants::{DBKEY_SEPARATOR, NS_MAIN};
use crate::traits::NamespaceTable;

/// Characters that can never appear in a title.
const ILLEGAL_TITLE_CHARS: &[char] = &['<', '>', '[', ']', '|', '{', '}'];

/// Longest stored title key in bytes.
const MAX_DBKEY_BYTES: usize = 255;

/// A page title: namespace plus normalized key, with the flags needed to
/// derive the cheap page properties without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Title {
    id: i64,
    namespace: i32,
    ns_text: String,
    dbkey: String,
    is_redirect: bool,
    subpages: bool,
    content: bool,
}

/// The cheap properties of a title, keyed the way result arrays expose them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProperties {
    pub id: i64,
    pub namespace: i32,
    pub ns_text: String,
    pub text: String,
    pub prefixed_text: String,
    pub base_text: String,
    pub subpage_text: String,
    #[serde(rename = "canHaveTalkPage")]
    pub can_talk: bool,
    pub is_content_page: bool,
    pub is_redirect: bool,
    pub is_subpage: bool,
    pub is_talk_page: bool,
}

impl Title {
    /// Build a title from an already-normalized key, as stored in the page table.
    pub fn from_parts(namespaces: &dyn NamespaceTable, namespace: i32, dbkey: &str) -> Self {
        Self {
            id: 0,
            namespace,
            ns_text: namespaces.display_name(namespace).unwrap_or_default(),
            dbkey: dbkey.to_string(),
            is_redirect: false,
            subpages: namespaces.has_subpages(namespace),
            content: namespaces.is_content(namespace),
        }
    }

    /// Normalize free text into a title.
    ///
    /// A recognized namespace prefix overrides `default_ns`; a leading `:`
    /// forces the main namespace. Returns `None` for text that cannot name
    /// a page. The returned title has id 0 until resolved against storage.
    pub fn make_title_safe(
        namespaces: &dyn NamespaceTable,
        default_ns: i32,
        text: &str,
    ) -> Option<Self> {
        if !namespaces.exists(default_ns) {
            return None;
        }

        let mut key = normalize_key(text);
        let mut namespace = default_ns;

        if let Some(rest) = key.strip_prefix(':') {
            namespace = NS_MAIN;
            key = trim_separators(rest).to_string();
        }

        if let Some((prefix, rest)) = key.split_once(':') {
            if let Some(index) = namespaces.index_by_name(prefix) {
                namespace = index;
                key = trim_separators(rest).to_string();
            }
        }

        // Fragments are not part of the page name.
        if let Some(pos) = key.find('#') {
            key.truncate(pos);
            key = trim_separators(&key).to_string();
        }

        if !is_valid_key(&key) {
            return None;
        }

        Some(Self::from_parts(namespaces, namespace, &capitalize_first(&key)))
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_redirect(mut self, is_redirect: bool) -> Self {
        self.is_redirect = is_redirect;
        self
    }

    /// Page id; 0 for a page that does not exist.
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn exists(&self) -> bool {
        self.id > 0
    }

    pub fn namespace(&self) -> i32 {
        self.namespace
    }

    pub fn ns_text(&self) -> &str {
        &self.ns_text
    }

    /// Stored key with `_` as word separator.
    pub fn dbkey(&self) -> &str {
        &self.dbkey
    }

    /// Display text without namespace prefix.
    pub fn text(&self) -> String {
        self.dbkey.replace(DBKEY_SEPARATOR, " ")
    }

    pub fn prefixed_text(&self) -> String {
        if self.ns_text.is_empty() {
            self.text()
        } else {
            format!("{}:{}", self.ns_text, self.text())
        }
    }

    pub fn base_text(&self) -> String {
        let text = self.text();
        if !self.subpages {
            return text;
        }
        match text.rfind('/') {
            Some(pos) => text[..pos].to_string(),
            None => text,
        }
    }

    pub fn subpage_text(&self) -> String {
        let text = self.text();
        if !self.subpages {
            return text;
        }
        match text.rfind('/') {
            Some(pos) => text[pos + 1..].to_string(),
            None => text,
        }
    }

    pub fn can_talk(&self) -> bool {
        self.namespace >= NS_MAIN
    }

    pub fn is_content_page(&self) -> bool {
        self.content
    }

    pub fn is_redirect(&self) -> bool {
        self.is_redirect
    }

    pub fn is_subpage(&self) -> bool {
        self.subpages && self.dbkey.contains('/')
    }

    pub fn is_talk_page(&self) -> bool {
        self.namespace > NS_MAIN && self.namespace % 2 == 1
    }

    pub fn properties(&self) -> PageProperties {
        PageProperties {
            id: self.id,
            namespace: self.namespace,
            ns_text: self.ns_text.clone(),
            text: self.text(),
            prefixed_text: self.prefixed_text(),
            base_text: self.base_text(),
            subpage_text: self.subpage_text(),
            can_talk: self.can_talk(),
            is_content_page: self.is_content_page(),
            is_redirect: self.is_redirect,
            is_subpage: self.is_subpage(),
            is_talk_page: self.is_talk_page(),
        }
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefixed_text())
    }
}

fn trim_separators(s: &str) -> &str {
    s.trim_matches(DBKEY_SEPARATOR)
}

/// Spaces to `_`, collapse runs, trim both ends.
fn normalize_key(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_sep = false;
    for c in text.trim().chars() {
        let c = if c.is_whitespace() { DBKEY_SEPARATOR } else { c };
        if c == DBKEY_SEPARATOR {
            if !last_was_sep {
                out.push(c);
            }
            last_was_sep = true;
        } else {
            out.push(c);
            last_was_sep = false;
        }
    }
    trim_separators(&out).to_string()
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_DBKEY_BYTES
        && !key.starts_with(':')
        && !key.chars().any(|c| ILLEGAL_TITLE_CHARS.contains(&c) || c.is_control())
        && key != "."
        && key != ".."
        && !key.starts_with("./")
        && !key.starts_with("../")
        && !key.contains("/./")
        && !key.contains("/../")
}

fn capitalize_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
