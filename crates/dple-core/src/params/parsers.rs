//! Parameter parsers.
//!
//! Stateless and lenient: malformed or absent input degrades to a
//! documented default. The only failure is a numeric namespace index the
//! host does not know.

use serde::{Deserialize, Serialize};

use super::numeric::{int_value, is_numeric};
use super::{ParamValue, Scalar};
use crate::errors::ParamError;
use crate::traits::{NamespaceTable, TitleResolver, UserDirectory};
use crate::types::{SortOrder, Title, UserRef};

/// Whether a class of pages is included, excluded or exclusively selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeExclude {
    Include,
    Exclude,
    Only,
}

impl IncludeExclude {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "include" => Some(Self::Include),
            "exclude" => Some(Self::Exclude),
            "only" => Some(Self::Only),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::Only => "only",
        }
    }
}

/// `include|exclude|only`, anything else yields `default`.
pub fn parse_include_exclude_or(value: Option<&ParamValue>, default: IncludeExclude) -> IncludeExclude {
    value
        .and_then(ParamValue::as_scalar)
        .and_then(Scalar::as_str)
        .and_then(IncludeExclude::from_name)
        .unwrap_or(default)
}

/// `include|exclude|only`, defaulting to `exclude`.
pub fn parse_include_exclude(value: Option<&ParamValue>) -> IncludeExclude {
    parse_include_exclude_or(value, IncludeExclude::Exclude)
}

/// A namespace index or name. Unknown names map to the main namespace;
/// unknown numeric indexes are an error.
pub fn parse_namespace(value: &Scalar, namespaces: &dyn NamespaceTable) -> Result<i32, ParamError> {
    if is_numeric(value) {
        let index = int_value(value);
        return i32::try_from(index)
            .ok()
            .filter(|i| namespaces.exists(*i))
            .ok_or(ParamError::InvalidNamespace { index });
    }

    Ok(namespaces.index_by_name(&value.as_text()).unwrap_or(0))
}

/// Text, with empty strings read as absent.
pub fn parse_text(value: Option<&Scalar>) -> Option<String> {
    value
        .map(|v| v.as_text().into_owned())
        .filter(|s| !s.is_empty())
}

/// A title substring converted to stored-key form.
pub fn parse_title_substring(value: Option<&Scalar>) -> Option<String> {
    parse_text(value).map(|s| s.replace(' ', "_"))
}

/// A user id or name. Existence is not checked.
pub fn parse_user(value: &Scalar, users: &dyn UserDirectory) -> UserRef {
    if is_numeric(value) {
        return UserRef::from_id(int_value(value));
    }

    let name = canonical_user_name(&value.as_text());
    if name.is_empty() {
        return UserRef::from_id(0);
    }
    let id = users.user_id_by_name(&name);
    UserRef::from_name(name, id)
}

fn canonical_user_name(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolve page names in `default_ns` (or an explicit prefix namespace).
/// HTML entities are decoded first; names that do not form a valid title
/// are dropped. Order and duplicates are kept.
pub fn array_to_titles(
    pages: Option<&ParamValue>,
    default_ns: i32,
    titles: &dyn TitleResolver,
) -> Vec<Title> {
    let Some(pages) = pages else {
        return Vec::new();
    };

    pages
        .scalars()
        .iter()
        .filter_map(|page| {
            let text = page.as_text();
            let decoded = html_escape::decode_html_entities(&text);
            titles.resolve(default_ns, &decoded)
        })
        .collect()
}

/// `ascending|descending`, defaulting to `descending`.
pub fn parse_order(value: Option<&ParamValue>) -> SortOrder {
    match value.and_then(ParamValue::as_scalar).and_then(Scalar::as_str) {
        Some("ascending") => SortOrder::Ascending,
        _ => SortOrder::Descending,
    }
}
