//! Application configuration management.

use serde::Deserialize;
use std::str::FromStr;

use crate::types::Currency;

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Default values applied when inputs omit optional fields.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Pagination limits for list operations.
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Default values applied when inputs omit optional fields.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Currency assumed for resources and projects that do not declare one.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Name assigned to a budget created without one.
    #[serde(default = "default_budget_name")]
    pub budget_name: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_budget_name() -> String {
    "Project Budget".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            budget_name: default_budget_name(),
        }
    }
}

/// Pagination limits for list operations.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Upper bound applied to any requested page size.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,
}

fn default_max_per_page() -> u32 {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_per_page: default_max_per_page(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        // Pick up a local .env before reading the environment.
        dotenvy::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("OBRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Returns the configured default currency, falling back to USD when the
    /// configured code is unknown.
    #[must_use]
    pub fn default_currency(&self) -> Currency {
        Currency::from_str(&self.defaults.currency).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.defaults.currency, "USD");
        assert_eq!(config.defaults.budget_name, "Project Budget");
        assert_eq!(config.pagination.max_per_page, 100);
        assert_eq!(config.default_currency(), Currency::Usd);
    }

    #[test]
    fn test_env_override() {
        temp_env::with_vars(
            [
                ("OBRA__DEFAULTS__CURRENCY", Some("COP")),
                ("OBRA__PAGINATION__MAX_PER_PAGE", Some("25")),
            ],
            || {
                let config = EngineConfig::load().unwrap();
                assert_eq!(config.default_currency(), Currency::Cop);
                assert_eq!(config.pagination.max_per_page, 25);
            },
        );
    }

    #[test]
    fn test_unknown_currency_falls_back_to_usd() {
        let config = EngineConfig {
            defaults: DefaultsConfig {
                currency: "ZZZ".into(),
                ..DefaultsConfig::default()
            },
            ..EngineConfig::default()
        };
        assert_eq!(config.default_currency(), Currency::Usd);
    }
}
