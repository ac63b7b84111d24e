//! Feature variant identifiers.

use serde::{Deserialize, Serialize};

/// The closed set of feature variants.
///
/// The declaration order is the default construction order; the guard
/// comes last so it observes every other feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Namespace,
    Redirects,
    Subpages,
    Titlematch,
    Category,
    Contains,
    Linksto,
    Linksfrom,
    Uses,
    Usedby,
    Imageused,
    Redirectsto,
    User,
    Extra,
    Extrax,
    Order,
    Count,
    Results,
    Check,
}

impl FeatureKind {
    /// Default construction order.
    pub fn default_order() -> &'static [FeatureKind] {
        &[
            Self::Namespace, Self::Redirects, Self::Subpages, Self::Titlematch,
            Self::Category, Self::Contains, Self::Linksto, Self::Linksfrom,
            Self::Uses, Self::Usedby, Self::Imageused, Self::Redirectsto,
            Self::User, Self::Extra, Self::Extrax, Self::Order, Self::Count,
            Self::Results, Self::Check,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Namespace => "namespace", Self::Redirects => "redirects",
            Self::Subpages => "subpages", Self::Titlematch => "titlematch",
            Self::Category => "category", Self::Contains => "contains",
            Self::Linksto => "linksto", Self::Linksfrom => "linksfrom",
            Self::Uses => "uses", Self::Usedby => "usedby",
            Self::Imageused => "imageused", Self::Redirectsto => "redirectsto",
            Self::User => "user", Self::Extra => "extra", Self::Extrax => "extrax",
            Self::Order => "order", Self::Count => "count",
            Self::Results => "results", Self::Check => "check",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::default_order()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Whether this variant joins one auxiliary table row per referenced entity.
    pub fn is_linked_entity(&self) -> bool {
        matches!(
            self,
            Self::Category
                | Self::Contains
                | Self::Linksto
                | Self::Linksfrom
                | Self::Uses
                | Self::Usedby
                | Self::Imageused
                | Self::Redirectsto
        )
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
