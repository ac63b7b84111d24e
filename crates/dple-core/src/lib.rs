//! # dple-core
//!
//! Foundation crate for the dynamic page list engine.
//! Defines types, collaborator traits, errors, config, tracing setup,
//! the parameter parsers and the query accumulator.
//! The storage and engine crates depend on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod params;
pub mod query;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{DpleConfig, Settings};
pub use errors::{EngineError, GuardError, ParamError, QueryError, ResultError, StorageError};
pub use params::{ParamValue, ParameterSet, Scalar};
pub use query::{DpleQuery, Predicate, ResultSet, Row, SqlValue};
pub use traits::Host;
pub use types::{NamespaceRegistry, Title, UserRef};
