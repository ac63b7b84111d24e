//! Configuration system for the engine.
//! TOML-based, 3-layer resolution: env > project > defaults, resolved once
//! into an immutable [`Settings`] handed to the engine by reference.

pub mod budget_config;
pub mod dple_config;
pub mod feature_config;
pub mod settings;
pub mod site_config;

pub use budget_config::BudgetConfig;
pub use dple_config::DpleConfig;
pub use feature_config::FeatureConfig;
pub use settings::Settings;
pub use site_config::SiteConfig;
