//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Document store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Ledger defaults.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store connection URL.
    #[serde(default = "default_store_url")]
    pub url: String,
    /// Database name.
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_store_url() -> String {
    "memory://".to_string()
}

fn default_database() -> String {
    "kabadi".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            database: default_database(),
        }
    }
}

/// Ledger defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Assumed lead yield percentage applied when an extraction entry
    /// omits one or supplies one outside (0, 100].
    #[serde(default = "default_lead_percentage")]
    pub default_lead_percentage: Decimal,
}

fn default_lead_percentage() -> Decimal {
    Decimal::from(60)
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_lead_percentage: default_lead_percentage(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KABADI").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
