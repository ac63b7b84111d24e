//! Redirect page handling.

use dple_core::errors::EngineError;
use dple_core::params::{parse_include_exclude, IncludeExclude, Scalar};
use dple_core::query::{ColumnRef, DpleQuery, Predicate};
use dple_core::types::FeatureKind;

use crate::feature::{ConstructContext, DpleFeature};
use crate::registry::FeatureSet;

/// Includes, excludes or selects only redirect pages.
///
/// `redirects=resolve` behaves like `only` and additionally makes the
/// rich-record converter attach each redirect's target.
#[derive(Debug)]
pub struct RedirectsFeature {
    redirects: IncludeExclude,
    resolve: bool,
}

impl RedirectsFeature {
    pub fn new(ctx: &ConstructContext<'_>) -> Self {
        let value = ctx.params.get("redirects");
        let resolve = ctx.params.get_scalar("redirects").and_then(Scalar::as_str) == Some("resolve");

        let redirects = if resolve {
            IncludeExclude::Only
        } else {
            parse_include_exclude(value)
        };

        Self { redirects, resolve }
    }

    pub fn redirects(&self) -> IncludeExclude {
        self.redirects
    }

    pub fn resolves(&self) -> bool {
        self.resolve
    }
}

impl DpleFeature for RedirectsFeature {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Redirects
    }

    fn modify_query(&self, _features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        let flag = match self.redirects {
            IncludeExclude::Include => return Ok(()),
            IncludeExclude::Exclude => 0_i64,
            IncludeExclude::Only => 1_i64,
        };
        query.add_cond(Predicate::eq(ColumnRef::new("page_is_redirect"), flag));
        Ok(())
    }
}
