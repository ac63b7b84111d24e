//! The feature capability interface and the closed set of variants.

use dple_core::config::Settings;
use dple_core::errors::{EngineError, ParamError};
use dple_core::params::ParameterSet;
use dple_core::query::{DpleQuery, ResultSet};
use dple_core::traits::Host;
use dple_core::types::FeatureKind;

use crate::converters::{ResultShape, ResultView};
use crate::features::{
    CheckFeature, CountFeature, ExtraFeature, LinkedEntityFeature, NamespaceFeature,
    OrderFeature, RedirectsFeature, ResultsFeature, SubpagesFeature, TitlematchFeature,
    UserFeature,
};
use crate::features::linked;
use crate::registry::{FeatureSet, FeatureSetBuilder};

/// What a feature sees while it parses its parameters.
///
/// `earlier` holds only the features registered before this one. State
/// that depends on a later sibling has to wait for `modify_query`.
#[derive(Clone, Copy)]
pub struct ConstructContext<'a> {
    pub params: &'a ParameterSet,
    pub settings: &'a Settings,
    pub host: Host<'a>,
    pub earlier: &'a FeatureSetBuilder,
}

/// What a converter sees when it shapes the executed result.
#[derive(Clone, Copy)]
pub struct ConvertInput<'a> {
    pub result: &'a ResultSet,
    pub features: &'a FeatureSet,
    pub host: Host<'a>,
}

/// One unit of query-building logic.
///
/// Features are constructed once per request in registry order, then
/// each mutates the query exactly once, in the same order. Values that
/// depend on siblings constructed later are resolved in `modify_query`.
pub trait DpleFeature {
    fn kind(&self) -> FeatureKind;

    /// Estimated join expense; 0 when the feature adds no joins.
    fn cost(&self) -> u32 {
        0
    }

    fn modify_query(&self, _features: &FeatureSet, _query: &mut DpleQuery) -> Result<(), EngineError> {
        Ok(())
    }

    /// Result shapes this feature can produce.
    fn result_converters(&self) -> &'static [ResultShape] {
        &[]
    }

    /// Produce `shape`, or `None` when this feature does not own it.
    fn convert<'s>(&'s self, _shape: ResultShape, _input: ConvertInput<'_>) -> Option<ResultView<'s>> {
        None
    }
}

pub enum Feature {
    Namespace(NamespaceFeature),
    Redirects(RedirectsFeature),
    Subpages(SubpagesFeature),
    Titlematch(TitlematchFeature),
    Linked(LinkedEntityFeature),
    User(UserFeature),
    Extra(ExtraFeature),
    Order(OrderFeature),
    Count(CountFeature),
    Results(ResultsFeature),
    Check(CheckFeature),
}

macro_rules! dispatch {
    ($self:ident, $f:ident => $body:expr) => {
        match $self {
            Feature::Namespace($f) => $body,
            Feature::Redirects($f) => $body,
            Feature::Subpages($f) => $body,
            Feature::Titlematch($f) => $body,
            Feature::Linked($f) => $body,
            Feature::User($f) => $body,
            Feature::Extra($f) => $body,
            Feature::Order($f) => $body,
            Feature::Count($f) => $body,
            Feature::Results($f) => $body,
            Feature::Check($f) => $body,
        }
    };
}

impl Feature {
    /// Construct the variant for `kind` from the request parameters.
    pub fn construct(kind: FeatureKind, ctx: &ConstructContext<'_>) -> Result<Self, ParamError> {
        Ok(match kind {
            FeatureKind::Namespace => Self::Namespace(NamespaceFeature::new(ctx)?),
            FeatureKind::Redirects => Self::Redirects(RedirectsFeature::new(ctx)),
            FeatureKind::Subpages => Self::Subpages(SubpagesFeature::new(ctx)),
            FeatureKind::Titlematch => Self::Titlematch(TitlematchFeature::new(ctx)),
            FeatureKind::Category => Self::Linked(LinkedEntityFeature::new(&linked::CATEGORY, ctx)),
            FeatureKind::Contains => Self::Linked(LinkedEntityFeature::new(&linked::CONTAINS, ctx)),
            FeatureKind::Linksto => Self::Linked(LinkedEntityFeature::new(&linked::LINKSTO, ctx)),
            FeatureKind::Linksfrom => Self::Linked(LinkedEntityFeature::new(&linked::LINKSFROM, ctx)),
            FeatureKind::Uses => Self::Linked(LinkedEntityFeature::new(&linked::USES, ctx)),
            FeatureKind::Usedby => Self::Linked(LinkedEntityFeature::new(&linked::USEDBY, ctx)),
            FeatureKind::Imageused => Self::Linked(LinkedEntityFeature::new(&linked::IMAGEUSED, ctx)),
            FeatureKind::Redirectsto => {
                Self::Linked(LinkedEntityFeature::new(&linked::REDIRECTSTO, ctx))
            }
            FeatureKind::User => Self::User(UserFeature::new(ctx)),
            FeatureKind::Extra | FeatureKind::Extrax => Self::Extra(ExtraFeature::new(kind)),
            FeatureKind::Order => Self::Order(OrderFeature::new(ctx)),
            FeatureKind::Count => Self::Count(CountFeature::new(ctx)),
            FeatureKind::Results => Self::Results(ResultsFeature::new()),
            FeatureKind::Check => Self::Check(CheckFeature::new(ctx)),
        })
    }

    pub fn as_linked(&self) -> Option<&LinkedEntityFeature> {
        match self {
            Self::Linked(f) => Some(f),
            _ => None,
        }
    }
}

impl DpleFeature for Feature {
    fn kind(&self) -> FeatureKind {
        dispatch!(self, f => f.kind())
    }

    fn cost(&self) -> u32 {
        dispatch!(self, f => f.cost())
    }

    fn modify_query(&self, features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        dispatch!(self, f => f.modify_query(features, query))
    }

    fn result_converters(&self) -> &'static [ResultShape] {
        dispatch!(self, f => f.result_converters())
    }

    fn convert<'s>(&'s self, shape: ResultShape, input: ConvertInput<'_>) -> Option<ResultView<'s>> {
        dispatch!(self, f => f.convert(shape, input))
    }
}

impl std::fmt::Debug for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feature")
            .field("kind", &self.kind())
            .field("cost", &self.cost())
            .finish()
    }
}
