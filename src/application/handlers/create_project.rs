//! CreateProjectHandler - Command handler for creating new projects.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::journey::ProjectRecord;
use crate::ports::ProjectRepository;

/// Command to create a new project.
#[derive(Debug, Clone)]
pub struct CreateProjectCommand {
    pub name: String,
    pub initial_idea: String,
}

/// Result of successful project creation.
#[derive(Debug, Clone)]
pub struct CreateProjectResult {
    pub project: ProjectRecord,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateProjectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] DomainError),
}

/// Handler for creating projects.
pub struct CreateProjectHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl CreateProjectHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    /// Validates input before anything is written.
    pub async fn handle(
        &self,
        cmd: CreateProjectCommand,
    ) -> Result<CreateProjectResult, CreateProjectError> {
        let project = ProjectRecord::create(cmd.name, cmd.initial_idea)?;
        self.repository.create(&project).await?;

        tracing::info!(project_id = %project.id, "project created");
        Ok(CreateProjectResult { project })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryProjectRepository;
    use crate::domain::foundation::{ErrorCode, ProjectId};
    use crate::ports::JourneySaveRequest;

    fn command(name: &str, idea: &str) -> CreateProjectCommand {
        CreateProjectCommand {
            name: name.to_string(),
            initial_idea: idea.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_and_persists_seeded_project() {
        let repository = InMemoryProjectRepository::new();
        let handler = CreateProjectHandler::new(Arc::new(repository.clone()));

        let result = handler.handle(command("Acme", "Rockets")).await.unwrap();

        let stored = repository.load(result.project.id).await.unwrap().unwrap();
        assert_eq!(stored.stage, "IDEA_TITLE");
        assert_eq!(stored.startup_data.project_name(), Some("Acme"));
        assert_eq!(stored.startup_data.initial_idea(), Some("Rockets"));
        assert!(stored.messages.is_empty());
    }

    #[tokio::test]
    async fn rejects_missing_idea_before_writing() {
        let repository = InMemoryProjectRepository::new();
        let handler = CreateProjectHandler::new(Arc::new(repository.clone()));

        let err = handler.handle(command("Acme", " ")).await.unwrap_err();

        assert!(matches!(
            err,
            CreateProjectError::Validation(ValidationError::EmptyField { ref field }) if field == "initial_idea"
        ));
        assert_eq!(repository.project_count().await, 0);
    }

    struct FailingRepository;

    #[async_trait::async_trait]
    impl ProjectRepository for FailingRepository {
        async fn create(&self, _record: &ProjectRecord) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "connection refused"))
        }

        async fn load(&self, _id: ProjectId) -> Result<Option<ProjectRecord>, DomainError> {
            Ok(None)
        }

        async fn save(&self, _id: ProjectId, _request: &JourneySaveRequest) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn surfaces_repository_failure() {
        let handler = CreateProjectHandler::new(Arc::new(FailingRepository));

        let err = handler.handle(command("Acme", "Rockets")).await.unwrap_err();

        match err {
            CreateProjectError::Repository(e) => assert_eq!(e.code(), ErrorCode::DatabaseError),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
