//! User references.

use serde::{Deserialize, Serialize};

/// A user named in a request parameter. Existence is not verified:
/// an unknown name resolves to id 0, which matches no revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub name: Option<String>,
}

impl UserRef {
    pub fn from_id(id: i64) -> Self {
        Self { id, name: None }
    }

    pub fn from_name(name: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            id: id.unwrap_or(0),
            name: Some(name.into()),
        }
    }
}
