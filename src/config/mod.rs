//! Application configuration module
//!
//! Configuration is loaded from environment variables (and a `.env` file when
//! present) using the `config` and `dotenvy` crates, with the
//! `IAP_ELIGIBILITY` prefix and `__` separating nested values.
//!
//! # Example
//!
//! ```no_run
//! use fractic_iap_eligibility::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod app_store;
mod error;
mod server;
mod user_store;

pub use app_store::AppStoreConfig;
pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;
pub use user_store::UserStoreConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub app_store: AppStoreConfig,

    pub user_store: UserStoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `IAP_ELIGIBILITY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `IAP_ELIGIBILITY__APP_STORE__SHARED_SECRET=...` -> `app_store.shared_secret = ...`
    /// - `IAP_ELIGIBILITY__USER_STORE__PATH=users.json` -> `user_store.path = users.json`
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("IAP_ELIGIBILITY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.app_store.validate()?;
        self.user_store.validate()?;
        Ok(())
    }
}
