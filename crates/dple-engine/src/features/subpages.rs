//! Subpage handling.

use dple_core::errors::EngineError;
use dple_core::params::{parse_include_exclude, IncludeExclude};
use dple_core::query::{ColumnRef, DpleQuery, LikePattern, Predicate};
use dple_core::types::FeatureKind;

use crate::feature::{ConstructContext, DpleFeature};
use crate::registry::FeatureSet;

/// Includes, excludes or selects only pages whose title contains `/`.
#[derive(Debug)]
pub struct SubpagesFeature {
    subpages: IncludeExclude,
}

impl SubpagesFeature {
    pub fn new(ctx: &ConstructContext<'_>) -> Self {
        Self {
            subpages: parse_include_exclude(ctx.params.get("subpages")),
        }
    }

    pub fn subpages(&self) -> IncludeExclude {
        self.subpages
    }
}

impl DpleFeature for SubpagesFeature {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Subpages
    }

    fn modify_query(&self, _features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        let column = ColumnRef::new("page_title");
        let slash = LikePattern::containing("/");
        match self.subpages {
            IncludeExclude::Include => {}
            IncludeExclude::Exclude => query.add_cond(Predicate::not_like(column, slash)),
            IncludeExclude::Only => query.add_cond(Predicate::like(column, slash)),
        }
        Ok(())
    }
}
