//! Prompt catalog backed by the YAML document compiled into the binary.
//!
//! Each entry has a `title`, a `question` and an optional `guidance` paragraph.

use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::{foundation::Locale, journey::Stage};
use crate::ports::PromptCatalog;

const EMBEDDED_STAGES: &str = include_str!("stages.yaml");

#[derive(Debug, Clone, Deserialize)]
struct StageText {
    title: String,
    question: String,
    #[serde(default)]
    guidance: Option<String>,
}

/// Stage titles and questions keyed by stage identifier.
///
/// Only English text is authored; other locales read the English entry.
#[derive(Debug, Clone)]
pub struct StaticPromptCatalog {
    entries: HashMap<String, StageText>,
}

impl StaticPromptCatalog {
    /// Catalog built from the embedded `stages.yaml`.
    pub fn embedded() -> Result<Self, serde_yaml::Error> {
        Self::from_yaml_str(EMBEDDED_STAGES)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let entries: HashMap<String, StageText> = serde_yaml::from_str(yaml)?;
        Ok(Self { entries })
    }

    fn entry(&self, stage: Stage) -> Option<&StageText> {
        self.entries.get(stage.as_str())
    }
}

impl PromptCatalog for StaticPromptCatalog {
    fn title(&self, stage: Stage, _locale: Locale) -> String {
        self.entry(stage)
            .map(|e| e.title.clone())
            .unwrap_or_else(|| stage.as_str().to_string())
    }

    fn question(&self, stage: Stage, locale: Locale) -> String {
        match self.entry(stage) {
            Some(entry) => entry.question.clone(),
            None => format!("Let's work on {}.", self.title(stage, locale)),
        }
    }

    fn guidance(&self, stage: Stage, _locale: Locale) -> Option<String> {
        self.entry(stage)
            .and_then(|e| e.guidance.clone())
            .filter(|g| !g.trim().is_empty())
    }
}
