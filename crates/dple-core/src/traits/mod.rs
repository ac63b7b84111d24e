//! Collaborator traits the engine consumes.
//!
//! The engine never touches storage directly: titles, users and rows all
//! arrive through these seams. The storage crate implements them over
//! SQLite; tests implement them with in-memory doubles.

pub mod executor;
pub mod host;
pub mod namespace_table;
pub mod resolvers;

pub use executor::QueryExecutor;
pub use host::Host;
pub use namespace_table::NamespaceTable;
pub use resolvers::{RedirectResolver, TitleResolver, UserDirectory};
