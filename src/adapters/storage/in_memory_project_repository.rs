//! In-Memory Project Repository
//!
//! Keeps project records in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, Timestamp};
use crate::domain::journey::ProjectRecord;
use crate::ports::{JourneySaveRequest, ProjectRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, ProjectRecord>>>,
    fail_saves: Arc<AtomicBool>,
    save_count: Arc<AtomicUsize>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save` fail with a storage error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    pub async fn project_count(&self) -> usize {
        self.projects.read().await.len()
    }

    /// Stores a record as-is, bypassing validation (useful for tests).
    pub async fn insert(&self, record: ProjectRecord) {
        self.projects.write().await.insert(record.id, record);
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, record: &ProjectRecord) -> Result<(), DomainError> {
        let mut projects = self.projects.write().await;
        if projects.contains_key(&record.id) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("Project {} already exists", record.id),
            ));
        }
        projects.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, id: ProjectId) -> Result<Option<ProjectRecord>, DomainError> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn save(&self, id: ProjectId, request: &JourneySaveRequest) -> Result<(), DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                "In-memory store is configured to fail saves",
            ));
        }

        let mut projects = self.projects.write().await;
        let record = projects.get_mut(&id).ok_or_else(|| {
            DomainError::new(ErrorCode::ProjectNotFound, format!("Project not found: {}", id))
        })?;

        record.stage = request.stage.clone();
        record.startup_data = request.startup_data.clone();
        record.messages = request.messages.clone();
        record.updated_at = Timestamp::now();
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
