//! Result shapes and the records they are made of.

use serde::Serialize;
use serde_json::{Map, Value};

use dple_core::types::{PageProperties, Title};

/// The closed set of result conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultShape {
    /// Title text without namespace.
    Pagenames,
    /// Namespace name, `:` and title text.
    Fullpagenames,
    /// Titles with their custom fields.
    #[default]
    Titles,
    /// Flat mappings of cheap title properties and custom fields.
    Arrays,
}

impl ResultShape {
    pub const ALL: [ResultShape; 4] = [Self::Pagenames, Self::Fullpagenames, Self::Titles, Self::Arrays];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pagenames => "pagenames",
            Self::Fullpagenames => "fullpagenames",
            Self::Titles => "titles",
            Self::Arrays => "arrays",
        }
    }

    /// Accepts canonical names and the `toPagenames` style spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        let canonical = name.strip_prefix("to").unwrap_or(name);
        Self::ALL
            .iter()
            .copied()
            .find(|shape| shape.name().eq_ignore_ascii_case(canonical))
    }
}

impl std::fmt::Display for ResultShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A borrowed, memoized conversion result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultView<'a> {
    Pagenames(&'a [String]),
    Fullpagenames(&'a [String]),
    Titles(&'a [PageRecord]),
    Arrays(&'a [Map<String, Value>]),
}

impl ResultView<'_> {
    pub fn shape(&self) -> ResultShape {
        match self {
            Self::Pagenames(_) => ResultShape::Pagenames,
            Self::Fullpagenames(_) => ResultShape::Fullpagenames,
            Self::Titles(_) => ResultShape::Titles,
            Self::Arrays(_) => ResultShape::Arrays,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Pagenames(v) | Self::Fullpagenames(v) => v.len(),
            Self::Titles(v) => v.len(),
            Self::Arrays(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One result page with its custom fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    pub title: Title,
    pub custom: CustomFields,
}

/// Per-page data beyond the title itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomFields {
    /// Title text up to its last `.`; the whole text when there is none.
    pub withoutsuffix: String,
    /// Length of the current revision in bytes.
    pub length: i64,
    /// When the page was added to the first category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryadd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortkey: Option<String>,
    /// Text after the first `|` of the sort key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryaddx: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortkeyx: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrax: Option<String>,
    /// Present only when redirects are resolved; null when the page is not
    /// a redirect or its target cannot be determined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Option<PageProperties>>,
}

/// Strip a trailing `.suffix`.
pub fn without_suffix(text: &str) -> &str {
    text.rfind('.').map_or(text, |pos| &text[..pos])
}

/// The annotation after the first `|`, if any.
pub fn sortkey_extra(sortkey: &str) -> Option<&str> {
    sortkey
        .split_once(dple_core::constants::SORTKEY_EXTRA_SEPARATOR)
        .map(|(_, extra)| extra)
}

/// Serialize into a JSON object; anything else yields an empty map.
pub(crate) fn to_object<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize result record");
            Map::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_names() {
        assert_eq!(ResultShape::from_name("titles"), Some(ResultShape::Titles));
        assert_eq!(ResultShape::from_name("toFullpagenames"), Some(ResultShape::Fullpagenames));
        assert_eq!(ResultShape::from_name("toArrays"), Some(ResultShape::Arrays));
        assert_eq!(ResultShape::from_name("toJson"), None);
        assert_eq!(ResultShape::from_name(""), None);
        assert_eq!(ResultShape::default(), ResultShape::Titles);
    }

    #[test]
    fn test_without_suffix() {
        assert_eq!(without_suffix("Logo.svg"), "Logo");
        assert_eq!(without_suffix("Archive.tar.gz"), "Archive.tar");
        assert_eq!(without_suffix("Plain"), "Plain");
    }

    #[test]
    fn test_sortkey_extra() {
        assert_eq!(sortkey_extra("Smith|head of team"), Some("head of team"));
        assert_eq!(sortkey_extra("a|b|c"), Some("b|c"));
        assert_eq!(sortkey_extra("Smith"), None);
    }

    /// Absent optional fields are omitted; an unresolved target is null.
    #[test]
    fn test_custom_fields_serialization() {
        let fields = CustomFields {
            withoutsuffix: "Foo".into(),
            length: 12,
            target: Some(None),
            ..Default::default()
        };
        let map = to_object(&fields);
        assert_eq!(map.len(), 3);
        assert_eq!(map["target"], Value::Null);
        assert!(!map.contains_key("categoryadd"));
    }
}
