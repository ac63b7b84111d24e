//! Feature enablement table.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::FeatureKind;

/// Which feature variants are constructed, and in what order.
///
/// Construction order is policy: a feature may only inspect siblings
/// constructed before it, and the guard must observe all the others.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FeatureConfig {
    /// Ordered variant names. Default: [`FeatureKind::default_order`].
    pub order: Option<Vec<String>>,
    /// Variant names that are not constructed.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl FeatureConfig {
    /// Resolve the enabled variants in construction order.
    ///
    /// Unknown names and duplicates are rejected. The guard is moved to the
    /// end if it is enabled anywhere else in the list.
    pub fn effective_order(&self) -> Result<Vec<FeatureKind>, ConfigError> {
        let order = match &self.order {
            Some(names) => {
                let mut kinds = Vec::with_capacity(names.len());
                for name in names {
                    let kind = parse_kind("features.order", name)?;
                    if kinds.contains(&kind) {
                        return Err(ConfigError::ValidationFailed {
                            field: "features.order".to_string(),
                            message: format!("duplicate feature '{name}'"),
                        });
                    }
                    kinds.push(kind);
                }
                kinds
            }
            None => FeatureKind::default_order().to_vec(),
        };

        let mut disabled = Vec::with_capacity(self.disabled.len());
        for name in &self.disabled {
            disabled.push(parse_kind("features.disabled", name)?);
        }

        let mut enabled: Vec<FeatureKind> = order
            .into_iter()
            .filter(|kind| !disabled.contains(kind))
            .collect();

        move_guard_last(&mut enabled);
        Ok(enabled)
    }
}

/// Move the guard to the end of `kinds` so it observes every other feature.
pub(crate) fn move_guard_last(kinds: &mut Vec<FeatureKind>) {
    if let Some(pos) = kinds.iter().position(|k| *k == FeatureKind::Check) {
        let check = kinds.remove(pos);
        kinds.push(check);
    }
}

fn parse_kind(field: &str, name: &str) -> Result<FeatureKind, ConfigError> {
    FeatureKind::from_name(name).ok_or_else(|| ConfigError::ValidationFailed {
        field: field.to_string(),
        message: format!("unknown feature '{name}'"),
    })
}
