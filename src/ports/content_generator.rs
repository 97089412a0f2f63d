//! ContentGenerator port - the five generation operations the journey needs.
//!
//! Implementations decide how prompts are shaped and which provider answers
//! them; the journey only sees the normalized results below.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    foundation::Locale,
    journey::{Source, Stage, StartupData},
};

use super::AIError;

/// Result of generating content for an auto-generated stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StageGeneration {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl StageGeneration {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

/// Result of structured idea generation (logo, visual style).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuredIdeas {
    /// Text shown to the user.
    pub text: String,
    /// Opaque serialized value stored as the stage answer.
    pub structured_value: String,
    /// Base64 payloads or URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation provider failed: {0}")]
    Provider(String),

    #[error("generation timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("invalid generation response: {0}")]
    InvalidResponse(String),
}

impl From<AIError> for GenerationError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::Timeout { timeout_secs } => GenerationError::Timeout {
                secs: u64::from(timeout_secs),
            },
            AIError::Parse(message) => GenerationError::InvalidResponse(message),
            other => GenerationError::Provider(other.to_string()),
        }
    }
}

/// Port for journey content generation.
///
/// The caller guarantees at most one outstanding call per journey.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Proposes an answer for the current stage.
    async fn suggest(
        &self,
        stage: Stage,
        answers: &StartupData,
        locale: Locale,
    ) -> Result<String, GenerationError>;

    /// Rewrites `original` according to a free-text instruction.
    async fn refine(
        &self,
        original: &str,
        instruction: &str,
        answers: &StartupData,
        locale: Locale,
    ) -> Result<String, GenerationError>;

    /// Produces the phase summary stored under a summary stage.
    async fn summarize_section(
        &self,
        stage: Stage,
        answers: &StartupData,
        locale: Locale,
    ) -> Result<String, GenerationError>;

    /// Produces the answer of an auto-generated stage.
    async fn generate_for_stage(
        &self,
        stage: Stage,
        answers: &StartupData,
        locale: Locale,
    ) -> Result<StageGeneration, GenerationError>;

    /// Turns user input into structured ideas with optional images.
    async fn generate_structured_ideas(
        &self,
        stage: Stage,
        user_input: &str,
        answers: &StartupData,
        locale: Locale,
    ) -> Result<StructuredIdeas, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_timeout_maps_to_generation_timeout() {
        let err: GenerationError = AIError::Timeout { timeout_secs: 30 }.into();
        assert!(matches!(err, GenerationError::Timeout { secs: 30 }));
    }

    #[test]
    fn ai_parse_maps_to_invalid_response() {
        let err: GenerationError = AIError::parse("bad json").into();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[test]
    fn other_ai_errors_map_to_provider() {
        let err: GenerationError = AIError::AuthenticationFailed.into();
        assert_eq!(
            err.to_string(),
            "generation provider failed: authentication failed"
        );
    }
}
