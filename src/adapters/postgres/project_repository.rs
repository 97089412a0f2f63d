//! PostgreSQL implementation of ProjectRepository.
//!
//! Persists project records to the `projects` table. Answers and the
//! conversation log are stored as JSONB documents.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, Timestamp};
use crate::domain::journey::{ChatMessage, ProjectRecord, StartupData};
use crate::ports::{JourneySaveRequest, ProjectRepository};

/// PostgreSQL implementation of ProjectRepository.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, record: &ProjectRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, name, stage, startup_data, messages, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.name)
        .bind(&record.stage)
        .bind(Json(&record.startup_data))
        .bind(Json(&record.messages))
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert project: {}", e),
            )
        })?;

        Ok(())
    }

    async fn load(&self, id: ProjectId) -> Result<Option<ProjectRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, stage, startup_data, messages, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch project: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_record(row)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, id: ProjectId, request: &JourneySaveRequest) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                stage = $2,
                startup_data = $3,
                messages = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(&request.stage)
        .bind(Json(&request.startup_data))
        .bind(Json(&request.messages))
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update project: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProjectNotFound,
                format!("Project not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

fn row_to_record(row: sqlx::postgres::PgRow) -> Result<ProjectRecord, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let name: String = row.try_get("name").map_err(|e| column_error("name", e))?;
    let stage: String = row.try_get("stage").map_err(|e| column_error("stage", e))?;
    let startup_data: serde_json::Value = row
        .try_get("startup_data")
        .map_err(|e| column_error("startup_data", e))?;
    let messages: serde_json::Value = row
        .try_get("messages")
        .map_err(|e| column_error("messages", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| column_error("updated_at", e))?;

    Ok(ProjectRecord {
        id: ProjectId::from_uuid(id),
        name,
        stage,
        startup_data: decode_startup_data(startup_data)?,
        messages: decode_messages(messages)?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

fn decode_startup_data(value: serde_json::Value) -> Result<StartupData, DomainError> {
    serde_json::from_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::SerializationError,
            format!("Invalid startup_data document: {}", e),
        )
    })
}

/// A NULL column reads as an empty log.
fn decode_messages(value: serde_json::Value) -> Result<Vec<ChatMessage>, DomainError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::SerializationError,
            format!("Invalid messages document: {}", e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_startup_data_reads_flat_object() {
        let data = decode_startup_data(json!({"projectName": "Acme", "idea_title": "X"})).unwrap();
        assert_eq!(data.project_name(), Some("Acme"));
        assert_eq!(data.get("idea_title"), Some("X"));
    }

    #[test]
    fn decode_startup_data_rejects_non_object() {
        let err = decode_startup_data(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SerializationError);
    }

    #[test]
    fn decode_messages_treats_null_as_empty() {
        assert!(decode_messages(serde_json::Value::Null).unwrap().is_empty());
    }

    #[test]
    fn decode_messages_reads_persisted_entries() {
        let messages = decode_messages(json!([
            {"id": "2f1c1d2e-8f7b-4f39-9a0e-5a4d7c1b9e01", "sender": "ai", "text": "Q"}
        ]))
        .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "Q");
    }
}
