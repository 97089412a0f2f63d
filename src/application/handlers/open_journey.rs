//! OpenJourneyHandler - loads a project and prepares its journey controller.

use std::sync::Arc;

use crate::application::journey::{JourneyController, JourneyError, JourneyOutcome};
use crate::domain::foundation::{DomainError, Locale, ProjectId};
use crate::domain::journey::JourneyState;
use crate::ports::{ContentGenerator, ProjectRepository, PromptCatalog};

#[derive(Debug, Clone, Copy)]
pub struct OpenJourneyCommand {
    pub project_id: ProjectId,
    pub locale: Locale,
}

pub struct OpenJourneyResult {
    pub controller: JourneyController,
    /// What seeding did (start notice, first question).
    pub outcome: JourneyOutcome,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenJourneyError {
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    #[error(transparent)]
    Repository(#[from] DomainError),

    #[error(transparent)]
    Journey(#[from] JourneyError),
}

pub struct OpenJourneyHandler {
    repository: Arc<dyn ProjectRepository>,
    generator: Arc<dyn ContentGenerator>,
    prompts: Arc<dyn PromptCatalog>,
}

impl OpenJourneyHandler {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        generator: Arc<dyn ContentGenerator>,
        prompts: Arc<dyn PromptCatalog>,
    ) -> Self {
        Self {
            repository,
            generator,
            prompts,
        }
    }

    pub async fn handle(&self, cmd: OpenJourneyCommand) -> Result<OpenJourneyResult, OpenJourneyError> {
        let record = self
            .repository
            .load(cmd.project_id)
            .await?
            .ok_or(OpenJourneyError::NotFound(cmd.project_id))?;

        let state = JourneyState::hydrate(record, cmd.locale);
        let mut controller = JourneyController::new(
            state,
            Arc::clone(&self.generator),
            Arc::clone(&self.repository),
            Arc::clone(&self.prompts),
        );
        let outcome = controller.begin().await?;

        Ok(OpenJourneyResult {
            controller,
            outcome,
        })
    }
}
