//! Route configuration for journey endpoints.

use axum::routing::{delete, get, post, put};
use axum::Router;

use super::handlers::{
    accept_suggestion, cancel_edit, close_journey, close_suggestion, create_project,
    export_project, get_journey, invalidate, jump, list_stages, proceed, refine_stage,
    refine_suggestion, request_suggestion, restart, retry, send_message, set_locale, start_edit,
    update_stage, JourneyAppState,
};

/// Creates the journey router with all endpoints.
///
/// Routes:
/// - `POST /api/projects` - Create a project
/// - `GET /api/projects/:id` - Journey snapshot
/// - `DELETE /api/projects/:id/journey` - Release the open journey
/// - `POST /api/projects/:id/messages` - Answer the current stage
/// - `POST|DELETE /api/projects/:id/suggestion` - Request or close a suggestion
/// - `POST /api/projects/:id/suggestion/refine` and `/accept`
/// - `POST /api/projects/:id/proceed` - Pass the section gate
/// - `POST /api/projects/:id/retry` - Retry a failed auto-generated stage
/// - `POST /api/projects/:id/jump` - Revisit an earlier stage
/// - `POST|DELETE /api/projects/:id/edit` - Enter or leave direct-edit mode
/// - `PUT /api/projects/:id/stages/:stage` and `POST .../refine`
/// - `POST /api/projects/:id/invalidate`
/// - `POST /api/projects/:id/restart`
/// - `PUT /api/projects/:id/locale`
/// - `GET /api/projects/:id/export`
/// - `GET /api/stages`
pub fn journey_router() -> Router<JourneyAppState> {
    Router::new()
        .route("/api/projects", post(create_project))
        .route("/api/projects/:id", get(get_journey))
        .route("/api/projects/:id/journey", delete(close_journey))
        .route("/api/projects/:id/messages", post(send_message))
        .route(
            "/api/projects/:id/suggestion",
            post(request_suggestion).delete(close_suggestion),
        )
        .route("/api/projects/:id/suggestion/refine", post(refine_suggestion))
        .route("/api/projects/:id/suggestion/accept", post(accept_suggestion))
        .route("/api/projects/:id/proceed", post(proceed))
        .route("/api/projects/:id/retry", post(retry))
        .route("/api/projects/:id/jump", post(jump))
        .route("/api/projects/:id/edit", post(start_edit).delete(cancel_edit))
        .route("/api/projects/:id/stages/:stage", put(update_stage))
        .route("/api/projects/:id/stages/:stage/refine", post(refine_stage))
        .route("/api/projects/:id/invalidate", post(invalidate))
        .route("/api/projects/:id/restart", post(restart))
        .route("/api/projects/:id/locale", put(set_locale))
        .route("/api/projects/:id/export", get(export_project))
        .route("/api/stages", get(list_stages))
}
