//! # dple-engine
//!
//! Builds one page-list query from independently pluggable features,
//! checks it against the cost budget, runs it once and offers several
//! memoized views of the result.
//!
//! ```text
//! ParameterSet ─▶ features (construct) ─▶ FeatureSet ─▶ modify_query ─▶ DpleQuery::execute
//!                                                                         │
//!                                             result(name) ◀── converters ┘
//! ```

pub mod converters;
pub mod engine;
pub mod feature;
pub mod features;
pub mod registry;

#[cfg(test)]
mod test_support;

pub use converters::{CustomFields, PageRecord, ResultShape, ResultView};
pub use engine::DynamicPageList;
pub use feature::{ConstructContext, ConvertInput, DpleFeature, Feature};
pub use registry::{FeatureSet, FeatureSetBuilder};
