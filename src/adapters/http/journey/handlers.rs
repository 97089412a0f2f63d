//! HTTP handlers for journey endpoints.
//!
//! Every project operation is forwarded to the project's running journey
//! actor; the response pairs the operation outcome with the fresh snapshot.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::{
    CreateProjectCommand, CreateProjectError, CreateProjectHandler, OpenJourneyError,
};
use crate::application::journey::{JourneyError, JourneyHandle, JourneyOutcome, JourneyRegistry};
use crate::domain::foundation::{Locale, ProjectId};
use crate::domain::journey::{stage_graph, Stage};
use crate::ports::{ProjectRepository, PromptCatalog};

use super::dto::{
    AcceptSuggestionRequest, CreateProjectRequest, ErrorResponse, LocaleRequest,
    OperationResponse, ProjectCreatedResponse, RefineRequest, SendMessageRequest, StageRequest,
    StageResponse, UpdateStageRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct JourneyAppState {
    pub registry: Arc<JourneyRegistry>,
    pub repository: Arc<dyn ProjectRepository>,
    pub prompts: Arc<dyn PromptCatalog>,
    pub default_locale: Locale,
}

impl JourneyAppState {
    pub fn create_project_handler(&self) -> CreateProjectHandler {
        CreateProjectHandler::new(self.repository.clone())
    }

    async fn journey(&self, raw_id: &str) -> Result<JourneyHandle, JourneyApiError> {
        let project_id: ProjectId = raw_id
            .parse()
            .map_err(|_| JourneyApiError::BadRequest("Invalid project ID format".to_string()))?;
        Ok(self.registry.get_or_open(project_id).await?)
    }
}

fn operation(
    handle: &JourneyHandle,
    result: Result<JourneyOutcome, JourneyError>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let outcome = result?;
    Ok(Json(OperationResponse {
        outcome,
        snapshot: handle.snapshot(),
    }))
}

fn parse_stage(raw: &str) -> Result<Stage, JourneyApiError> {
    raw.parse()
        .map_err(|_| JourneyApiError::Unprocessable(format!("Unknown stage: {}", raw)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Project lifecycle
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/projects - Create a new project
pub async fn create_project(
    State(state): State<JourneyAppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, JourneyApiError> {
    let cmd = CreateProjectCommand {
        name: request.name,
        initial_idea: request.initial_idea,
    };
    let result = state.create_project_handler().handle(cmd).await?;

    let response = ProjectCreatedResponse {
        project_id: result.project.id.to_string(),
        stage: result.project.stage,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/projects/:id - Current journey snapshot (opens the journey on first use)
pub async fn get_journey(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    Ok(Json(handle.snapshot()))
}

/// DELETE /api/projects/:id/journey - Release the in-memory journey; the next request reloads it
pub async fn close_journey(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
) -> Result<StatusCode, JourneyApiError> {
    let project_id: ProjectId = project_id
        .parse()
        .map_err(|_| JourneyApiError::BadRequest("Invalid project ID format".to_string()))?;
    state.registry.close(project_id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/projects/:id/export - Downloadable project document
pub async fn export_project(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    let export = handle.export_project().await?;
    let disposition = format!("attachment; filename=\"{}\"", export.file_name());
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(export)))
}

/// GET /api/stages - The fixed stage table with display titles
pub async fn list_stages(State(state): State<JourneyAppState>) -> impl IntoResponse {
    let stages: Vec<StageResponse> = stage_graph::table()
        .iter()
        .map(|spec| {
            StageResponse::from_spec(spec, state.prompts.title(spec.stage, state.default_locale))
        })
        .collect();
    Json(stages)
}

// ════════════════════════════════════════════════════════════════════════════════
// Conversation
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/projects/:id/messages - Answer the current stage
pub async fn send_message(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    let result = handle.send_message(request.text).await;
    operation(&handle, result)
}

/// POST /api/projects/:id/proceed - Summarize the section and move past its gate
pub async fn proceed(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    let result = handle.proceed_to_next_section().await;
    operation(&handle, result)
}

/// POST /api/projects/:id/retry - Retry a failed auto-generated stage
pub async fn retry(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    let result = handle.retry_auto_generation().await;
    operation(&handle, result)
}

/// POST /api/projects/:id/jump - Revisit an earlier stage
pub async fn jump(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
    Json(request): Json<StageRequest>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let target = parse_stage(&request.stage)?;
    let handle = state.journey(&project_id).await?;
    let result = handle.jump_to_stage(target).await;
    operation(&handle, result)
}

/// POST /api/projects/:id/restart
pub async fn restart(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    let result = handle.restart_journey().await;
    operation(&handle, result)
}

/// PUT /api/projects/:id/locale
pub async fn set_locale(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
    Json(request): Json<LocaleRequest>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let locale = request
        .locale
        .parse::<Locale>()
        .map_err(|e| JourneyApiError::BadRequest(e.to_string()))?;
    let handle = state.journey(&project_id).await?;
    let result = handle.set_locale(locale).await;
    operation(&handle, result)
}

// ════════════════════════════════════════════════════════════════════════════════
// Suggestions
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/projects/:id/suggestion
pub async fn request_suggestion(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    let result = handle.request_suggestion().await;
    operation(&handle, result)
}

/// POST /api/projects/:id/suggestion/refine
pub async fn refine_suggestion(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    let result = handle.refine_suggestion(request.instruction).await;
    operation(&handle, result)
}

/// POST /api/projects/:id/suggestion/accept
pub async fn accept_suggestion(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
    Json(request): Json<AcceptSuggestionRequest>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    let result = handle.accept_suggestion(request.answer).await;
    operation(&handle, result)
}

/// DELETE /api/projects/:id/suggestion
pub async fn close_suggestion(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    let result = handle.close_suggestion().await;
    operation(&handle, result)
}

// ════════════════════════════════════════════════════════════════════════════════
// Direct editing
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/projects/:id/edit - Enter direct-edit mode for a stage
pub async fn start_edit(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
    Json(request): Json<StageRequest>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let stage = parse_stage(&request.stage)?;
    let handle = state.journey(&project_id).await?;
    let result = handle.edit_stage(stage).await;
    operation(&handle, result)
}

/// DELETE /api/projects/:id/edit
pub async fn cancel_edit(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let handle = state.journey(&project_id).await?;
    let result = handle.cancel_direct_edit().await;
    operation(&handle, result)
}

/// PUT /api/projects/:id/stages/:stage - Overwrite a stage's answer
pub async fn update_stage(
    State(state): State<JourneyAppState>,
    Path((project_id, stage)): Path<(String, String)>,
    Json(request): Json<UpdateStageRequest>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let stage = parse_stage(&stage)?;
    let handle = state.journey(&project_id).await?;
    let result = handle.update_stage_data(stage, request.text).await;
    operation(&handle, result)
}

/// POST /api/projects/:id/stages/:stage/refine - Rework a stage's answer with AI
pub async fn refine_stage(
    State(state): State<JourneyAppState>,
    Path((project_id, stage)): Path<(String, String)>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let stage = parse_stage(&stage)?;
    let handle = state.journey(&project_id).await?;
    let result = handle.refine_edited_stage(stage, request.instruction).await;
    operation(&handle, result)
}

/// POST /api/projects/:id/invalidate - Drop generated answers downstream of a stage
pub async fn invalidate(
    State(state): State<JourneyAppState>,
    Path(project_id): Path<String>,
    Json(request): Json<StageRequest>,
) -> Result<Json<OperationResponse>, JourneyApiError> {
    let stage = parse_stage(&request.stage)?;
    let handle = state.journey(&project_id).await?;
    let result = handle.invalidate_downstream_of(stage).await;
    operation(&handle, result)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum JourneyApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unprocessable(String),
    Internal(String),
}

impl From<JourneyError> for JourneyApiError {
    fn from(err: JourneyError) -> Self {
        match err {
            JourneyError::Busy
            | JourneyError::SuggestionPending
            | JourneyError::NoSuggestionOpen
            | JourneyError::NotAtSectionGate
            | JourneyError::AtSectionGate
            | JourneyError::Complete
            | JourneyError::NothingToRetry(_) => JourneyApiError::Conflict(err.to_string()),
            JourneyError::InvalidJump { .. }
            | JourneyError::UnrecognizedStage(_)
            | JourneyError::NoDataKey(_) => JourneyApiError::Unprocessable(err.to_string()),
            JourneyError::Validation(e) => JourneyApiError::BadRequest(e.to_string()),
            JourneyError::ServiceStopped => JourneyApiError::Internal(err.to_string()),
        }
    }
}

impl From<OpenJourneyError> for JourneyApiError {
    fn from(err: OpenJourneyError) -> Self {
        match err {
            OpenJourneyError::NotFound(id) => JourneyApiError::NotFound(id.to_string()),
            OpenJourneyError::Repository(e) => JourneyApiError::Internal(e.to_string()),
            OpenJourneyError::Journey(e) => e.into(),
        }
    }
}

impl From<CreateProjectError> for JourneyApiError {
    fn from(err: CreateProjectError) -> Self {
        match err {
            CreateProjectError::Validation(e) => JourneyApiError::BadRequest(e.to_string()),
            CreateProjectError::Repository(e) => JourneyApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for JourneyApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            JourneyApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            JourneyApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found("Project", &id))
            }
            JourneyApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::conflict(msg)),
            JourneyApiError::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::unprocessable(msg),
            ),
            JourneyApiError::Internal(msg) => {
                tracing::error!(error = %msg, "journey request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

    fn status_of(err: JourneyApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn busy_and_gate_conflicts_map_to_409() {
        assert_eq!(status_of(JourneyError::Busy.into()), StatusCode::CONFLICT);
        assert_eq!(status_of(JourneyError::AtSectionGate.into()), StatusCode::CONFLICT);
        assert_eq!(
            status_of(JourneyError::SuggestionPending.into()),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn invalid_jump_maps_to_422() {
        let err = JourneyError::InvalidJump {
            current: Stage::IdeaTitle,
            target: Stage::ElevatorPitch,
        };
        assert_eq!(status_of(err.into()), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            status_of(JourneyError::UnrecognizedStage("X".into()).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn validation_maps_to_400() {
        let err = JourneyError::Validation(ValidationError::empty_field("text"));
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);
        let err = CreateProjectError::Validation(ValidationError::empty_field("name"));
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn open_errors_map_to_404_and_500() {
        assert_eq!(
            status_of(OpenJourneyError::NotFound(ProjectId::new()).into()),
            StatusCode::NOT_FOUND
        );
        let repo = DomainError::new(ErrorCode::DatabaseError, "down");
        assert_eq!(
            status_of(OpenJourneyError::Repository(repo).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unknown_stage_is_unprocessable() {
        assert!(matches!(
            parse_stage("NOPE"),
            Err(JourneyApiError::Unprocessable(_))
        ));
        assert_eq!(parse_stage("IDEA_TITLE").unwrap(), Stage::IdeaTitle);
    }
}
