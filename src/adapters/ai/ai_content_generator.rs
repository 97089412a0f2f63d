//! Provider-backed ContentGenerator implementation.
//!
//! Shapes the five journey prompts, sends them through an [`AIProvider`] and
//! normalizes the completions. Every call is bounded by a timeout.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    foundation::Locale,
    journey::{Stage, StartupData},
};
use crate::ports::{
    AIProvider, CompletionRequest, ContentGenerator, FinishReason, GenerationError, MessageRole,
    RequestMetadata, StageGeneration, StructuredIdeas,
};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2048;
const DEFAULT_IDEAS_TEXT: &str = "Here are some ideas based on your input.";

/// Generator that asks an LLM provider for every piece of content.
pub struct AiContentGenerator {
    provider: Arc<dyn AIProvider>,
    timeout: Duration,
}

impl AiContentGenerator {
    pub fn new(provider: Arc<dyn AIProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    fn system_prompt(locale: Locale) -> String {
        format!(
            "You are an AI startup mentor helping entrepreneurs develop their business ideas. Always respond in {}.",
            locale.language_name()
        )
    }

    fn suggestion_prompt(stage: Stage, answers: &StartupData) -> String {
        format!(
            "Based on the startup idea \"{}\" and current stage \"{}\", provide a helpful suggestion for the entrepreneur. Be specific and actionable.",
            answers.initial_idea().unwrap_or_default(),
            stage
        )
    }

    fn refine_prompt(original: &str, instruction: &str) -> String {
        format!(
            "Original text: \"{}\"\n\nUser instruction: \"{}\"\n\nPlease refine the text according to the instruction while maintaining its core meaning.",
            original, instruction
        )
    }

    fn summary_prompt(stage: Stage, answers: &StartupData) -> Result<String, GenerationError> {
        let data = serde_json::to_string(answers.as_map())
            .map_err(|e| GenerationError::InvalidResponse(format!("failed to encode answers: {}", e)))?;
        Ok(format!(
            "Generate a comprehensive summary for the \"{}\" section based on all the information provided so far: {}",
            stage, data
        ))
    }

    fn stage_prompt(stage: Stage, answers: &StartupData) -> String {
        let startup = answers
            .project_name()
            .filter(|n| !n.is_empty())
            .or_else(|| answers.initial_idea())
            .unwrap_or_default();
        format!(
            "For the startup \"{}\" at stage \"{}\", provide detailed analysis and insights. Use web search if needed to provide current market data.",
            startup, stage
        )
    }

    fn ideas_prompt(stage: Stage, user_input: &str, answers: &StartupData) -> String {
        format!(
            "For the startup \"{}\" at stage \"{}\", the user input is: \"{}\". Provide creative visual ideas and return them in JSON format with image descriptions.",
            answers.project_name().unwrap_or_default(),
            stage,
            user_input
        )
    }

    /// Sends one user prompt and returns the completion text.
    async fn complete(
        &self,
        stage: Option<Stage>,
        system_prompt: String,
        prompt: String,
    ) -> Result<String, GenerationError> {
        let mut metadata = RequestMetadata::new(format!("journey-{}", uuid::Uuid::new_v4()));
        if let Some(stage) = stage {
            metadata = metadata.with_stage(stage.as_str());
        }

        let request = CompletionRequest::new(metadata)
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, prompt)
            .with_temperature(TEMPERATURE)
            .with_max_tokens(MAX_TOKENS);

        let response = tokio::time::timeout(self.timeout, self.provider.complete(request))
            .await
            .map_err(|_| GenerationError::Timeout {
                secs: self.timeout.as_secs(),
            })??;

        tracing::debug!(
            stage = stage.map(Stage::as_str).unwrap_or("-"),
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            "completion received"
        );
        if response.finish_reason == FinishReason::Length {
            tracing::warn!(
                stage = stage.map(Stage::as_str).unwrap_or("-"),
                max_tokens = MAX_TOKENS,
                "completion cut off at token limit"
            );
        }

        Ok(response.content)
    }

    /// Reads `{text, ideas|jsonData, images}` out of a completion.
    ///
    /// Completions that are not a JSON object are kept as both the text and
    /// the stored value.
    fn parse_structured_ideas(content: &str) -> StructuredIdeas {
        let trimmed = strip_code_fence(content);
        let parsed = serde_json::from_str::<serde_json::Value>(trimmed)
            .ok()
            .filter(|v| v.is_object());

        let Some(value) = parsed else {
            let text = if content.trim().is_empty() {
                DEFAULT_IDEAS_TEXT.to_string()
            } else {
                content.to_string()
            };
            let structured_value = if content.trim().is_empty() {
                "{}".to_string()
            } else {
                content.to_string()
            };
            return StructuredIdeas {
                text,
                structured_value,
                images: Vec::new(),
            };
        };

        let text = value
            .get("text")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_IDEAS_TEXT)
            .to_string();

        let structured_value = match value.get("jsonData").or_else(|| value.get("ideas")) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        };

        let images = value
            .get("images")
            .and_then(|i| i.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        StructuredIdeas {
            text,
            structured_value,
            images,
        }
    }
}

/// Drops a surrounding Markdown code fence, if present.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[async_trait]
impl ContentGenerator for AiContentGenerator {
    async fn suggest(
        &self,
        stage: Stage,
        answers: &StartupData,
        locale: Locale,
    ) -> Result<String, GenerationError> {
        self.complete(
            Some(stage),
            Self::system_prompt(locale),
            Self::suggestion_prompt(stage, answers),
        )
        .await
    }

    async fn refine(
        &self,
        original: &str,
        instruction: &str,
        _answers: &StartupData,
        locale: Locale,
    ) -> Result<String, GenerationError> {
        self.complete(
            None,
            Self::system_prompt(locale),
            Self::refine_prompt(original, instruction),
        )
        .await
    }

    async fn summarize_section(
        &self,
        stage: Stage,
        answers: &StartupData,
        locale: Locale,
    ) -> Result<String, GenerationError> {
        let prompt = Self::summary_prompt(stage, answers)?;
        self.complete(Some(stage), Self::system_prompt(locale), prompt)
            .await
    }

    async fn generate_for_stage(
        &self,
        stage: Stage,
        answers: &StartupData,
        locale: Locale,
    ) -> Result<StageGeneration, GenerationError> {
        let system = format!(
            "{} Use web search grounding when appropriate.",
            Self::system_prompt(locale)
        );
        let text = self
            .complete(Some(stage), system, Self::stage_prompt(stage, answers))
            .await?;
        Ok(StageGeneration::text(text))
    }

    async fn generate_structured_ideas(
        &self,
        stage: Stage,
        user_input: &str,
        answers: &StartupData,
        locale: Locale,
    ) -> Result<StructuredIdeas, GenerationError> {
        let content = self
            .complete(
                Some(stage),
                Self::system_prompt(locale),
                Self::ideas_prompt(stage, user_input, answers),
            )
            .await?;
        Ok(Self::parse_structured_ideas(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    fn generator(provider: MockAIProvider) -> AiContentGenerator {
        AiContentGenerator::new(Arc::new(provider), Duration::from_secs(5))
    }

    fn answers() -> StartupData {
        StartupData::seeded("Acme", "Rockets for everyone")
    }

    #[tokio::test]
    async fn suggest_sends_mentor_prompt_in_locale() {
        let provider = MockAIProvider::new().with_response("Call it Acme Rockets");
        let content_gen = generator(provider.clone());

        let text = content_gen
            .suggest(Stage::IdeaTitle, &answers(), Locale::Fa)
            .await
            .unwrap();

        assert_eq!(text, "Call it Acme Rockets");
        let call = &provider.get_calls()[0];
        assert!(call
            .system_prompt
            .as_deref()
            .unwrap()
            .ends_with("Always respond in Persian (Farsi)."));
        assert!(call.messages[0]
            .content
            .contains("\"Rockets for everyone\" and current stage \"IDEA_TITLE\""));
        assert_eq!(call.temperature, Some(0.7));
        assert_eq!(call.max_tokens, Some(2048));
    }

    #[tokio::test]
    async fn summary_prompt_embeds_answers_as_json() {
        let provider = MockAIProvider::new().with_response("summary");
        let content_gen = generator(provider.clone());

        content_gen.summarize_section(Stage::ValidationSummary, &answers(), Locale::En)
            .await
            .unwrap();

        let prompt = &provider.get_calls()[0].messages[0].content;
        assert!(prompt.contains("\"VALIDATION_SUMMARY\" section"));
        assert!(prompt.contains("\"projectName\":\"Acme\""));
    }

    #[tokio::test]
    async fn stage_generation_names_the_project() {
        let provider = MockAIProvider::new().with_response("analysis");
        let content_gen = generator(provider.clone());

        let out = content_gen
            .generate_for_stage(Stage::BmcKeyActivities, &answers(), Locale::En)
            .await
            .unwrap();

        assert_eq!(out.text, "analysis");
        let call = &provider.get_calls()[0];
        assert!(call.messages[0].content.starts_with("For the startup \"Acme\""));
        assert!(call.system_prompt.as_deref().unwrap().contains("grounding"));
    }

    #[tokio::test]
    async fn truncated_completion_is_still_returned() {
        let provider = MockAIProvider::new().with_truncated_response("A long plan that stops");
        let out = generator(provider)
            .generate_for_stage(Stage::ComprehensiveBusinessPlan, &answers(), Locale::En)
            .await
            .unwrap();
        assert_eq!(out.text, "A long plan that stops");
    }

    #[tokio::test]
    async fn provider_errors_become_generation_errors() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });
        let err = generator(provider)
            .refine("a", "b", &answers(), Locale::En)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Provider(_)));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let provider = MockAIProvider::new()
            .with_response("late")
            .with_delay(Duration::from_millis(200));
        let content_gen = AiContentGenerator::new(Arc::new(provider), Duration::from_millis(20));

        let err = content_gen
            .suggest(Stage::IdeaTitle, &answers(), Locale::En)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Timeout { .. }));
    }

    #[tokio::test]
    async fn structured_ideas_read_json_completion() {
        let provider = MockAIProvider::new().with_response(
            "```json\n{\"text\":\"Two logo ideas\",\"ideas\":[{\"description\":\"rocket\"}],\"images\":[\"https://img/1.png\"]}\n```",
        );
        let ideas = generator(provider)
            .generate_structured_ideas(Stage::BrandingLogo, "a rocket", &answers(), Locale::En)
            .await
            .unwrap();

        assert_eq!(ideas.text, "Two logo ideas");
        assert_eq!(ideas.structured_value, "[{\"description\":\"rocket\"}]");
        assert_eq!(ideas.images, vec!["https://img/1.png".to_string()]);
    }

    #[test]
    fn plain_text_ideas_are_kept_verbatim() {
        let ideas = AiContentGenerator::parse_structured_ideas("A bold red rocket");
        assert_eq!(ideas.text, "A bold red rocket");
        assert_eq!(ideas.structured_value, "A bold red rocket");
        assert!(ideas.images.is_empty());
    }

    #[test]
    fn empty_ideas_fall_back_to_defaults() {
        let ideas = AiContentGenerator::parse_structured_ideas("  ");
        assert_eq!(ideas.text, DEFAULT_IDEAS_TEXT);
        assert_eq!(ideas.structured_value, "{}");
    }
}
