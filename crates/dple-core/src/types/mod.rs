//! Domain types shared by the storage and engine crates.

pub mod feature_kind;
pub mod namespace;
pub mod sort;
pub mod title;
pub mod user;

pub use feature_kind::FeatureKind;
pub use namespace::{NamespaceEntry, NamespaceRegistry};
pub use sort::{SortMethod, SortOrder};
pub use title::{PageProperties, Title};
pub use user::UserRef;
