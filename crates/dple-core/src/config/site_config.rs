//! Site configuration: host properties the engine consults.

use serde::{Deserialize, Serialize};

use crate::constants::NS_MAIN;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Whether page view counters are disabled. Default: true.
    pub disable_counters: Option<bool>,
    /// Namespaces holding content pages. Default: main namespace only.
    #[serde(default)]
    pub content_namespaces: Vec<i32>,
}

impl SiteConfig {
    /// Returns whether page view counters are available for sorting.
    pub fn counters_enabled(&self) -> bool {
        !self.disable_counters.unwrap_or(true)
    }

    /// Returns the effective content namespaces, defaulting to `[0]`.
    pub fn effective_content_namespaces(&self) -> Vec<i32> {
        if self.content_namespaces.is_empty() {
            vec![NS_MAIN]
        } else {
            self.content_namespaces.clone()
        }
    }
}
