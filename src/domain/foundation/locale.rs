//! Active interface/generation locale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Locale flowing into every generation request and prompt lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fa,
}

impl Locale {
    /// Language name used when instructing the generator.
    pub fn language_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Fa => "Persian (Farsi)",
        }
    }

    /// Short code as used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fa => "fa",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Locale::Fa)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fa" => Ok(Locale::Fa),
            other => Err(ValidationError::invalid_format(
                "locale",
                format!("unsupported locale '{}'", other),
            )),
        }
    }
}
