//! File-based Project Repository
//!
//! Stores each project as one YAML document under the base directory,
//! named `<project-id>.yaml`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, Timestamp};
use crate::domain::journey::ProjectRecord;
use crate::ports::{JourneySaveRequest, ProjectRepository};

#[derive(Debug, Clone)]
pub struct FileProjectRepository {
    base_path: PathBuf,
}

impl FileProjectRepository {
    /// Create a repository rooted at `base_path`.
    ///
    /// # Example
    /// ```ignore
    /// let repo = FileProjectRepository::new("./data/projects");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn project_file_path(&self, id: ProjectId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", id))
    }

    async fn ensure_dir(&self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| storage_error("create project directory", e))
    }

    async fn write_record(&self, record: &ProjectRecord) -> Result<(), DomainError> {
        let yaml = serde_yaml::to_string(record).map_err(|e| {
            DomainError::new(
                ErrorCode::SerializationError,
                format!("Failed to serialize project: {}", e),
            )
        })?;

        // Write-then-rename so a crash never leaves a truncated document.
        let path = self.project_file_path(record.id);
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, yaml)
            .await
            .map_err(|e| storage_error("write project", e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| storage_error("replace project", e))
    }
}

fn storage_error(action: &str, err: std::io::Error) -> DomainError {
    DomainError::new(ErrorCode::StorageError, format!("Failed to {}: {}", action, err))
}

#[async_trait]
impl ProjectRepository for FileProjectRepository {
    async fn create(&self, record: &ProjectRecord) -> Result<(), DomainError> {
        self.ensure_dir().await?;
        if fs::try_exists(self.project_file_path(record.id))
            .await
            .map_err(|e| storage_error("check project", e))?
        {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("Project {} already exists", record.id),
            ));
        }
        self.write_record(record).await
    }

    async fn load(&self, id: ProjectId) -> Result<Option<ProjectRecord>, DomainError> {
        let path = self.project_file_path(id);

        let yaml = match fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("read project", e)),
        };

        let record = serde_yaml::from_str(&yaml).map_err(|e| {
            DomainError::new(
                ErrorCode::SerializationError,
                format!("Failed to parse project {}: {}", id, e),
            )
        })?;

        Ok(Some(record))
    }

    async fn save(&self, id: ProjectId, request: &JourneySaveRequest) -> Result<(), DomainError> {
        let mut record = self.load(id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::ProjectNotFound, format!("Project not found: {}", id))
        })?;

        record.stage = request.stage.clone();
        record.startup_data = request.startup_data.clone();
        record.messages = request.messages.clone();
        record.updated_at = Timestamp::now();

        self.write_record(&record).await
    }
}
