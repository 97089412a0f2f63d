//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `STARTUP_BLUEPRINT`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use startup_blueprint::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod database;
mod error;
mod journey;
mod server;

pub use ai::{AiConfig, AiProvider};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use journey::{JourneyConfig, StorageBackend};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Only needed by the `postgres` storage backend.
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub journey: JourneyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file is read first when present.
    ///
    /// - `STARTUP_BLUEPRINT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `STARTUP_BLUEPRINT__JOURNEY__STORAGE=file` -> `journey.storage = File`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STARTUP_BLUEPRINT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation across sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.journey.validate()?;
        match (&self.journey.storage, &self.database) {
            (StorageBackend::Postgres, None) => {
                return Err(ValidationError::MissingRequired("DATABASE__URL"))
            }
            (_, Some(database)) => database.validate()?,
            _ => {}
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
