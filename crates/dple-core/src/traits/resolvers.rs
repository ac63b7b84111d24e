//! Title, redirect and user lookups.

use crate::types::Title;

/// Normalizes free text into titles and attaches page existence.
pub trait TitleResolver {
    /// `None` when the text cannot name a page. A well-formed title for a
    /// page that does not exist is returned with id 0.
    fn resolve(&self, default_ns: i32, text: &str) -> Option<Title>;
}

/// Follows redirect pages to their targets.
pub trait RedirectResolver {
    /// Target of a redirect page, or `None` when `title` is not a redirect
    /// or its target cannot be determined.
    fn redirect_target(&self, title: &Title) -> Option<Title>;
}

/// User name to id lookups.
pub trait UserDirectory {
    /// `None` for unknown users.
    fn user_id_by_name(&self, name: &str) -> Option<i64>;
}
