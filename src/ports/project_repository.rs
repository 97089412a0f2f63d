//! ProjectRepository port for journey persistence.

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, ProjectId},
    journey::{ChatMessage, JourneyState, ProjectRecord, StartupData},
};

/// The mutable part of a project written after each journey operation.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneySaveRequest {
    /// Stage identifier as plain text; unknown ids are written back verbatim.
    pub stage: String,
    pub startup_data: StartupData,
    pub messages: Vec<ChatMessage>,
}

impl JourneySaveRequest {
    /// Pending suggestion entries are never written.
    pub fn from_state(state: &JourneyState) -> Self {
        Self {
            stage: state.stage_id().to_string(),
            startup_data: state.answers.clone(),
            messages: state.log.committed().cloned().collect(),
        }
    }
}

/// Repository for project records.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert a new project record.
    async fn create(&self, record: &ProjectRecord) -> Result<(), DomainError>;

    /// Load a project by ID.
    async fn load(&self, id: ProjectId) -> Result<Option<ProjectRecord>, DomainError>;

    /// Overwrite stage, answers and messages, bumping `updated_at`.
    ///
    /// Fails with `ProjectNotFound` if the project does not exist.
    async fn save(&self, id: ProjectId, request: &JourneySaveRequest) -> Result<(), DomainError>;
}
