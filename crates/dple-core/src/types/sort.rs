//! Sort order and sort method values.

use serde::{Deserialize, Serialize};

/// Sort direction of the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    /// SQL keyword for this direction.
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Criteria by which the result list can be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    /// Page creation order (page ids are never reused and increase).
    Created,
    /// Last modification time.
    LastEdit,
    /// Page length.
    Length,
    /// Title without namespace prefix.
    Title,
    /// Time of addition to the first category.
    CategoryAdd,
    /// Time of addition of the first `contains` page to the category.
    CategoryAddX,
    /// Sort key in the first category.
    CategorySortkey,
    /// Sort key of the first `contains` page in the category.
    CategorySortkeyX,
    /// Page view counter.
    Popularity,
}

impl SortMethod {
    pub const ALL: [SortMethod; 9] = [
        Self::Created,
        Self::LastEdit,
        Self::Length,
        Self::Title,
        Self::CategoryAdd,
        Self::CategoryAddX,
        Self::CategorySortkey,
        Self::CategorySortkeyX,
        Self::Popularity,
    ];

    /// The fallback used whenever a requested method is unavailable.
    pub const FALLBACK: SortMethod = Self::Created;

    pub fn name(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::LastEdit => "lastedit",
            Self::Length => "length",
            Self::Title => "title",
            Self::CategoryAdd => "categoryadd",
            Self::CategoryAddX => "categoryaddx",
            Self::CategorySortkey => "categorysortkey",
            Self::CategorySortkeyX => "categorysortkeyx",
            Self::Popularity => "popularity",
        }
    }

    /// Parse a method name, including the `sortkey` / `sortkeyx` aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sortkey" => Some(Self::CategorySortkey),
            "sortkeyx" => Some(Self::CategorySortkeyX),
            _ => Self::ALL.iter().copied().find(|m| m.name() == name),
        }
    }
}

impl std::fmt::Display for SortMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
