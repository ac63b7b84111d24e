//! SQL for the wiki store.

pub mod fixtures;
pub mod pages;
pub mod select;
pub mod users;
