//! Persistence record for a project.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProjectId, Timestamp, ValidationError};

use super::message::ChatMessage;
use super::stage::Stage;
use super::stage_graph;
use super::startup_data::StartupData;

/// Everything persisted per project.
///
/// `stage` is kept as plain text so identifiers written by newer versions
/// survive a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    pub stage: String,
    pub startup_data: StartupData,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectRecord {
    /// Validates input and builds a fresh record parked on the first question.
    pub fn create(
        name: impl Into<String>,
        initial_idea: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        let initial_idea = initial_idea.into().trim().to_string();

        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if initial_idea.is_empty() {
            return Err(ValidationError::empty_field("initial_idea"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: ProjectId::new(),
            startup_data: StartupData::seeded(name.clone(), initial_idea),
            name,
            stage: stage_graph::first_interactive_stage().as_str().to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Parsed stage, or `None` if the identifier is unknown to this build.
    pub fn known_stage(&self) -> Option<Stage> {
        self.stage.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_seeds_name_idea_and_first_stage() {
        let record = ProjectRecord::create("Acme", "Rockets").unwrap();
        assert_eq!(record.stage, "IDEA_TITLE");
        assert_eq!(record.known_stage(), Some(Stage::IdeaTitle));
        assert_eq!(record.startup_data.project_name(), Some("Acme"));
        assert_eq!(record.startup_data.initial_idea(), Some("Rockets"));
        assert!(record.messages.is_empty());
    }

    #[test]
    fn create_rejects_blank_name() {
        let err = ProjectRecord::create("  ", "Rockets").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("name"));
    }

    #[test]
    fn create_rejects_blank_idea() {
        let err = ProjectRecord::create("Acme", "").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("initial_idea"));
    }

    #[test]
    fn unknown_stage_is_not_parsed() {
        let mut record = ProjectRecord::create("Acme", "Rockets").unwrap();
        record.stage = "SOME_FUTURE_STAGE".to_string();
        assert_eq!(record.known_stage(), None);
    }
}
