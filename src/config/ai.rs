//! Content generation configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub provider: AiProvider,

    pub anthropic_api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Overrides the Anthropic endpoint (proxies, test doubles).
    pub base_url: Option<String>,

    /// Per-call generation timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Which generator backs the journey.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Anthropic,
    /// Canned offline content; no network.
    Mock,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.provider == AiProvider::Anthropic {
            let key = self
                .anthropic_api_key
                .as_ref()
                .map(|k| k.expose_secret().as_str())
                .filter(|k| !k.is_empty())
                .ok_or(ValidationError::MissingRequired("AI__ANTHROPIC_API_KEY"))?;
            if !key.starts_with("sk-ant-") {
                return Err(ValidationError::InvalidAnthropicKey);
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            anthropic_api_key: None,
            model: default_model(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anthropic(key: &str) -> AiConfig {
        AiConfig {
            anthropic_api_key: Some(Secret::new(key.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn anthropic_requires_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("AI__ANTHROPIC_API_KEY"))
        );
        assert!(!AiConfig::default().has_anthropic());
    }

    #[test]
    fn anthropic_key_prefix_is_checked() {
        assert_eq!(
            anthropic("sk-openai").validate(),
            Err(ValidationError::InvalidAnthropicKey)
        );
        assert!(anthropic("sk-ant-xxx").validate().is_ok());
        assert!(anthropic("sk-ant-xxx").has_anthropic());
    }

    #[test]
    fn mock_provider_needs_no_key() {
        let config = AiConfig {
            provider: AiProvider::Mock,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn key_is_redacted_in_debug_output() {
        let rendered = format!("{:?}", anthropic("sk-ant-secret"));
        assert!(!rendered.contains("sk-ant-secret"));
    }
}
