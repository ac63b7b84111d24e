//! The orchestrator.

use serde_json::{Map, Value};

use dple_core::config::Settings;
use dple_core::errors::{EngineError, ResultError};
use dple_core::params::ParameterSet;
use dple_core::query::DpleQuery;
use dple_core::traits::Host;

use crate::converters::{PageRecord, ResultShape, ResultView};
use crate::feature::{ConstructContext, ConvertInput, DpleFeature, Feature};
use crate::registry::{FeatureSet, FeatureSetBuilder};

/// One executed page list.
///
/// Construction runs the whole request: features are built in the
/// configured order, each modifies the query once, the guard runs last
/// and the query executes. Any failure aborts construction, so an
/// existing instance always holds an executed result.
pub struct DynamicPageList<'h> {
    features: FeatureSet,
    query: DpleQuery,
    host: Host<'h>,
}

impl<'h> DynamicPageList<'h> {
    pub fn new(params: &ParameterSet, settings: &Settings, host: Host<'h>) -> Result<Self, EngineError> {
        tracing::debug!(features = settings.features().len(), "constructing features");
        let mut builder = FeatureSetBuilder::new();
        for &kind in settings.features() {
            let ctx = ConstructContext {
                params,
                settings,
                host,
                earlier: &builder,
            };
            let feature = Feature::construct(kind, &ctx)?;
            tracing::trace!(feature = %kind, cost = feature.cost(), "feature constructed");
            if let Some(duplicate) = builder.register(feature) {
                tracing::debug!(feature = %duplicate.kind(), "duplicate feature ignored");
            }
        }
        let features = builder.finalize();

        tracing::debug!("modifying query");
        let mut query = DpleQuery::for_pages();
        for feature in &features {
            feature.modify_query(&features, &mut query)?;
        }

        tracing::debug!("executing query");
        let count = query.execute(host.executor)?.len();
        tracing::debug!("{count} records");

        Ok(Self {
            features,
            query,
            host,
        })
    }

    /// Number of result rows.
    pub fn count(&self) -> usize {
        self.query.count()
    }

    /// Convert the result to the shape called `name`.
    pub fn result(&self, name: &str) -> Result<ResultView<'_>, ResultError> {
        let shape = ResultShape::from_name(name).ok_or_else(|| ResultError::UnknownConverter {
            name: name.to_string(),
        })?;
        self.convert(shape)
    }

    /// Rich records, the default shape.
    pub fn result_default(&self) -> Result<ResultView<'_>, ResultError> {
        self.convert(ResultShape::default())
    }

    pub fn convert(&self, shape: ResultShape) -> Result<ResultView<'_>, ResultError> {
        let unknown = || ResultError::UnknownConverter {
            name: shape.name().to_string(),
        };
        let owner = self.features.converter_owner(shape).ok_or_else(unknown)?;
        let result = self.query.result().ok_or(ResultError::NotExecuted)?;
        let input = ConvertInput {
            result,
            features: &self.features,
            host: self.host,
        };
        owner.convert(shape, input).ok_or_else(unknown)
    }

    pub fn pagenames(&self) -> Result<&[String], ResultError> {
        match self.convert(ResultShape::Pagenames)? {
            ResultView::Pagenames(names) => Ok(names),
            other => Err(mismatch(other)),
        }
    }

    pub fn fullpagenames(&self) -> Result<&[String], ResultError> {
        match self.convert(ResultShape::Fullpagenames)? {
            ResultView::Fullpagenames(names) => Ok(names),
            other => Err(mismatch(other)),
        }
    }

    pub fn titles(&self) -> Result<&[PageRecord], ResultError> {
        match self.convert(ResultShape::Titles)? {
            ResultView::Titles(records) => Ok(records),
            other => Err(mismatch(other)),
        }
    }

    pub fn arrays(&self) -> Result<&[Map<String, Value>], ResultError> {
        match self.convert(ResultShape::Arrays)? {
            ResultView::Arrays(arrays) => Ok(arrays),
            other => Err(mismatch(other)),
        }
    }

    /// The executed query.
    pub fn query(&self) -> &DpleQuery {
        &self.query
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }
}

fn mismatch(view: ResultView<'_>) -> ResultError {
    ResultError::UnknownConverter {
        name: view.shape().name().to_string(),
    }
}

impl std::fmt::Debug for DynamicPageList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicPageList")
            .field("features", &self.features)
            .field("count", &self.count())
            .finish()
    }
}
