//! Scripted ContentGenerator for tests and offline runs.
//!
//! Every operation answers deterministically unless a response was queued
//! for it. Failures can be injected per operation or per stage.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::{
    foundation::Locale,
    journey::{Source, Stage, StartupData},
};
use crate::ports::{ContentGenerator, GenerationError, StageGeneration, StructuredIdeas};

/// The five generator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorOp {
    Suggest,
    Refine,
    SummarizeSection,
    GenerateForStage,
    GenerateStructuredIdeas,
}

/// One recorded generator call.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorCall {
    pub op: GeneratorOp,
    pub stage: Option<Stage>,
    pub input: Option<String>,
    pub locale: Locale,
}

#[derive(Debug, Default)]
struct Script {
    responses: HashMap<GeneratorOp, VecDeque<String>>,
    failures: HashMap<GeneratorOp, usize>,
    failing_stages: HashSet<Stage>,
    sources: Vec<Source>,
    images: Vec<String>,
    calls: Vec<GeneratorCall>,
}

#[derive(Debug, Clone, Default)]
pub struct MockContentGenerator {
    script: Arc<Mutex<Script>>,
    delay: Duration,
}

impl MockContentGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a text response for the next call of `op`.
    pub fn with_response(self, op: GeneratorOp, text: impl Into<String>) -> Self {
        self.lock()
            .responses
            .entry(op)
            .or_default()
            .push_back(text.into());
        self
    }

    /// Makes the next `times` calls of `op` fail.
    pub fn failing(self, op: GeneratorOp, times: usize) -> Self {
        *self.lock().failures.entry(op).or_default() += times;
        self
    }

    /// Makes every call targeting `stage` fail until [`Self::recover_stage`].
    pub fn failing_on_stage(self, stage: Stage) -> Self {
        self.lock().failing_stages.insert(stage);
        self
    }

    pub fn recover_stage(&self, stage: Stage) {
        self.lock().failing_stages.remove(&stage);
    }

    /// Injects a failure for the next call of `op` on an existing handle.
    pub fn fail_next(&self, op: GeneratorOp) {
        *self.lock().failures.entry(op).or_default() += 1;
    }

    /// Sources attached to every stage generation.
    pub fn with_sources(self, sources: Vec<Source>) -> Self {
        self.lock().sources = sources;
        self
    }

    /// Images attached to every structured idea result.
    pub fn with_images(self, images: Vec<String>) -> Self {
        self.lock().images = images;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, op: GeneratorOp) -> usize {
        self.lock().calls.iter().filter(|c| c.op == op).count()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records the call and returns the queued response, if any.
    async fn run(
        &self,
        op: GeneratorOp,
        stage: Option<Stage>,
        input: Option<&str>,
        locale: Locale,
    ) -> Result<Option<String>, GenerationError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let mut script = self.lock();
        script.calls.push(GeneratorCall {
            op,
            stage,
            input: input.map(str::to_string),
            locale,
        });

        if let Some(remaining) = script.failures.get_mut(&op).filter(|n| **n > 0) {
            *remaining -= 1;
            return Err(GenerationError::Provider(format!("scripted {:?} failure", op)));
        }
        if stage.is_some_and(|s| script.failing_stages.contains(&s)) {
            return Err(GenerationError::Provider(format!(
                "scripted failure for {:?}",
                stage
            )));
        }

        Ok(script.responses.get_mut(&op).and_then(VecDeque::pop_front))
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn suggest(
        &self,
        stage: Stage,
        _answers: &StartupData,
        locale: Locale,
    ) -> Result<String, GenerationError> {
        let queued = self.run(GeneratorOp::Suggest, Some(stage), None, locale).await?;
        Ok(queued.unwrap_or_else(|| format!("Suggested answer for {}", stage)))
    }

    async fn refine(
        &self,
        original: &str,
        instruction: &str,
        _answers: &StartupData,
        locale: Locale,
    ) -> Result<String, GenerationError> {
        let queued = self
            .run(GeneratorOp::Refine, None, Some(instruction), locale)
            .await?;
        Ok(queued.unwrap_or_else(|| format!("{} (refined: {})", original, instruction)))
    }

    async fn summarize_section(
        &self,
        stage: Stage,
        _answers: &StartupData,
        locale: Locale,
    ) -> Result<String, GenerationError> {
        let queued = self
            .run(GeneratorOp::SummarizeSection, Some(stage), None, locale)
            .await?;
        Ok(queued.unwrap_or_else(|| format!("Summary of {}", stage)))
    }

    async fn generate_for_stage(
        &self,
        stage: Stage,
        _answers: &StartupData,
        locale: Locale,
    ) -> Result<StageGeneration, GenerationError> {
        let queued = self
            .run(GeneratorOp::GenerateForStage, Some(stage), None, locale)
            .await?;
        let sources = self.lock().sources.clone();
        Ok(StageGeneration {
            text: queued.unwrap_or_else(|| format!("Generated content for {}", stage)),
            sources,
        })
    }

    async fn generate_structured_ideas(
        &self,
        stage: Stage,
        user_input: &str,
        _answers: &StartupData,
        locale: Locale,
    ) -> Result<StructuredIdeas, GenerationError> {
        let queued = self
            .run(
                GeneratorOp::GenerateStructuredIdeas,
                Some(stage),
                Some(user_input),
                locale,
            )
            .await?;
        let images = self.lock().images.clone();
        let structured_value = serde_json::json!({ "stage": stage.as_str(), "input": user_input })
            .to_string();
        Ok(StructuredIdeas {
            text: queued.unwrap_or_else(|| format!("Ideas for {}", stage)),
            structured_value,
            images,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_responses_name_the_stage() {
        let generator = MockContentGenerator::new();
        let answers = StartupData::new();

        let text = generator
            .suggest(Stage::IdeaTitle, &answers, Locale::En)
            .await
            .unwrap();
        assert_eq!(text, "Suggested answer for IDEA_TITLE");

        let generated = generator
            .generate_for_stage(Stage::BmcKeyActivities, &answers, Locale::En)
            .await
            .unwrap();
        assert_eq!(generated.text, "Generated content for BMC_KEY_ACTIVITIES");
    }

    #[tokio::test]
    async fn queued_responses_are_used_once() {
        let generator = MockContentGenerator::new().with_response(GeneratorOp::Suggest, "Acme");
        let answers = StartupData::new();

        let first = generator.suggest(Stage::IdeaTitle, &answers, Locale::En).await.unwrap();
        let second = generator.suggest(Stage::IdeaTitle, &answers, Locale::En).await.unwrap();

        assert_eq!(first, "Acme");
        assert_eq!(second, "Suggested answer for IDEA_TITLE");
    }

    #[tokio::test]
    async fn op_failures_are_consumed() {
        let generator = MockContentGenerator::new().failing(GeneratorOp::Refine, 1);
        let answers = StartupData::new();

        assert!(generator.refine("a", "b", &answers, Locale::En).await.is_err());
        assert!(generator.refine("a", "b", &answers, Locale::En).await.is_ok());
        assert_eq!(generator.call_count(GeneratorOp::Refine), 2);
    }

    #[tokio::test]
    async fn stage_failures_last_until_recovered() {
        let generator = MockContentGenerator::new().failing_on_stage(Stage::BmcCostStructure);
        let answers = StartupData::new();

        for _ in 0..2 {
            assert!(generator
                .generate_for_stage(Stage::BmcCostStructure, &answers, Locale::En)
                .await
                .is_err());
        }
        generator.recover_stage(Stage::BmcCostStructure);
        assert!(generator
            .generate_for_stage(Stage::BmcCostStructure, &answers, Locale::En)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn records_locale_and_input() {
        let generator = MockContentGenerator::new();
        generator
            .generate_structured_ideas(Stage::BrandingLogo, "rocket", &StartupData::new(), Locale::Fa)
            .await
            .unwrap();

        let call = &generator.calls()[0];
        assert_eq!(call.op, GeneratorOp::GenerateStructuredIdeas);
        assert_eq!(call.locale, Locale::Fa);
        assert_eq!(call.input.as_deref(), Some("rocket"));
    }
}
