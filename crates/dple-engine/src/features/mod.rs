//! Feature variants, one per module.

mod check;
mod count;
mod extra;
pub mod linked;
mod namespace;
mod order;
mod redirects;
mod results;
mod subpages;
mod titlematch;
mod user;

pub use check::CheckFeature;
pub use count::CountFeature;
pub use extra::ExtraFeature;
pub use linked::{LinkSpec, LinkedEntityFeature};
pub use namespace::NamespaceFeature;
pub use order::{resolve_method, OrderFeature};
pub use redirects::RedirectsFeature;
pub use results::ResultsFeature;
pub use subpages::SubpagesFeature;
pub use titlematch::TitlematchFeature;
pub use user::{UserFeature, UserRelation};
