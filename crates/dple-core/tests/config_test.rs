//! Tests for the engine configuration system.

use std::sync::Mutex;

use dple_core::config::{DpleConfig, Settings};
use dple_core::errors::ConfigError;
use dple_core::types::FeatureKind;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all DPLE_ env vars to prevent cross-test contamination.
fn clear_dple_env_vars() {
    for key in ["DPLE_MAX_COST", "DPLE_MAX_RESULT_COUNT", "DPLE_DISABLE_COUNTERS"] {
        std::env::remove_var(key);
    }
}

/// Env overrides the project file, which overrides compiled defaults.
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dple_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("dple.toml"),
        r#"
[budget]
max_cost = 12
max_result_count = 50

[site]
disable_counters = false
"#,
    )
    .unwrap();

    std::env::set_var("DPLE_MAX_COST", "20");

    let config = DpleConfig::load(dir.path()).unwrap();
    assert_eq!(config.budget.effective_max_cost(), 20);
    assert_eq!(config.budget.effective_max_result_count(), 50);
    assert!(config.site.counters_enabled());

    clear_dple_env_vars();
}

/// A missing project file falls back to compiled defaults.
#[test]
fn test_load_missing_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dple_env_vars();

    let dir = tempdir();
    let config = DpleConfig::load(dir.path()).unwrap();
    assert_eq!(config.budget.effective_max_cost(), 6);
    assert_eq!(config.budget.effective_max_result_count(), 200);
    assert!(!config.site.counters_enabled());
    assert_eq!(
        config.features.effective_order().unwrap(),
        FeatureKind::default_order().to_vec()
    );
}

/// Invalid TOML is a parse error naming the file.
#[test]
fn test_invalid_toml_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dple_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("dple.toml"), "[budget\nmax_cost = ").unwrap();
    let err = DpleConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

/// Unparseable env values are ignored.
#[test]
fn test_bad_env_value_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dple_env_vars();

    std::env::set_var("DPLE_MAX_RESULT_COUNT", "lots");
    let dir = tempdir();
    let config = DpleConfig::load(dir.path()).unwrap();
    assert_eq!(config.budget.max_result_count, None);

    clear_dple_env_vars();
}

/// Legacy keys feed the fallback chains.
#[test]
fn test_legacy_fallback_chain() {
    let config = DpleConfig::from_toml(
        r#"
[budget]
dlp_max_categories = 3
dlp_allow_unlimited_results = true
"#,
    )
    .unwrap();
    assert_eq!(config.budget.effective_max_cost(), 3);
    assert_eq!(config.budget.effective_max_result_count(), 100_000);

    let config = DpleConfig::from_toml(
        r#"
[budget]
dlp_max_categories = 3
dlp_allow_unlimited_categories = true
"#,
    )
    .unwrap();
    assert_eq!(config.budget.effective_max_cost(), 1000);
}

/// Unknown feature names are rejected.
#[test]
fn test_unknown_feature_rejected() {
    let err = DpleConfig::from_toml(
        r#"
[features]
order = ["category", "teleport"]
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

/// A zero result ceiling is rejected.
#[test]
fn test_zero_result_count_rejected() {
    let err = DpleConfig::from_toml("[budget]\nmax_result_count = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

/// Disabled features drop out of the resolved settings.
#[test]
fn test_settings_from_config() {
    let config = DpleConfig::from_toml(
        r#"
[features]
disabled = ["redirects", "subpages"]

[budget]
max_cost = 9

[budget.cond_costs]
category = 2
"#,
    )
    .unwrap();
    let settings = Settings::from_config(&config).unwrap();
    assert!(!settings.features().contains(&FeatureKind::Redirects));
    assert!(!settings.features().contains(&FeatureKind::Subpages));
    assert!(settings.features().contains(&FeatureKind::Check));
    assert_eq!(settings.features().last(), Some(&FeatureKind::Check));
    assert_eq!(settings.max_cost(), 9);
    assert_eq!(settings.cond_cost("category"), 2);
    assert_eq!(settings.cond_cost("linksto"), 1);
    assert_eq!(settings.cond_cost("user_expensive"), 10);
    assert_eq!(settings.order_cost("title"), 1);
    assert_eq!(settings.order_cost("created"), 0);
}

/// Serializing and re-parsing keeps the effective values.
#[test]
fn test_to_toml_reparses() {
    let config = DpleConfig::from_toml("[budget]\nmax_cost = 4\n").unwrap();
    let text = config.to_toml().unwrap();
    let reparsed = DpleConfig::from_toml(&text).unwrap();
    assert_eq!(reparsed.budget.effective_max_cost(), 4);
}
