//! Journey runtime configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::foundation::Locale;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct JourneyConfig {
    /// Locale a journey opens with until the client changes it.
    #[serde(default)]
    pub default_locale: Locale,

    #[serde(default)]
    pub storage: StorageBackend,

    /// Directory for the `file` backend; one YAML document per project.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Open journeys untouched this long are dropped from memory.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_eviction_interval_secs")]
    pub eviction_interval_secs: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local; lost on restart.
    #[default]
    Memory,
    File,
    Postgres,
}

impl JourneyConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.storage == StorageBackend::File && self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingDataDir);
        }
        if self.idle_timeout_secs == 0 || self.eviction_interval_secs == 0 {
            return Err(ValidationError::InvalidIdleTimeout);
        }
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn eviction_interval(&self) -> Duration {
        Duration::from_secs(self.eviction_interval_secs)
    }
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            storage: StorageBackend::default(),
            data_dir: default_data_dir(),
            idle_timeout_secs: default_idle_timeout_secs(),
            eviction_interval_secs: default_eviction_interval_secs(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/projects")
}

fn default_idle_timeout_secs() -> u64 {
    1800
}

fn default_eviction_interval_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_in_memory_english() {
        let config = JourneyConfig::default();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.default_locale, Locale::En);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_backend_needs_directory() {
        let config = JourneyConfig {
            storage: StorageBackend::File,
            data_dir: PathBuf::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::MissingDataDir));
    }

    #[test]
    fn idle_eviction_defaults_and_bounds() {
        let config = JourneyConfig::default();
        assert_eq!(config.idle_timeout(), Duration::from_secs(1800));
        assert_eq!(config.eviction_interval(), Duration::from_secs(60));

        let config = JourneyConfig {
            idle_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidIdleTimeout));
    }
}
