//! HTTP DTOs (Data Transfer Objects) for journey endpoints.
//!
//! These types define the JSON request/response structure for the journey API.

use serde::{Deserialize, Serialize};

use crate::application::journey::{JourneyOutcome, JourneySnapshot};
use crate::domain::journey::{Phase, StageKind, StageSpec};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub initial_idea: String,
}

/// Free-text answer for the current stage.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Instruction used to rework a suggestion or an edited section.
#[derive(Debug, Clone, Deserialize)]
pub struct RefineRequest {
    pub instruction: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AcceptSuggestionRequest {
    pub answer: String,
}

/// Names a stage by its identifier, e.g. `"IDEA_TITLE"`.
#[derive(Debug, Clone, Deserialize)]
pub struct StageRequest {
    pub stage: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStageRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocaleRequest {
    pub locale: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCreatedResponse {
    pub project_id: String,
    pub stage: String,
}

/// What an operation did together with the journey as it stands afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResponse {
    pub outcome: JourneyOutcome,
    pub snapshot: JourneySnapshot,
}

/// One row of the public stage table.
#[derive(Debug, Clone, Serialize)]
pub struct StageResponse {
    pub id: &'static str,
    pub title: String,
    pub phase: Option<Phase>,
    pub kind: StageKind,
    pub data_key: Option<&'static str>,
}

impl StageResponse {
    pub fn from_spec(spec: &StageSpec, title: String) -> Self {
        Self {
            id: spec.id,
            title,
            phase: spec.phase,
            kind: spec.kind,
            data_key: spec.data_key,
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource, id))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new("UNPROCESSABLE", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}
