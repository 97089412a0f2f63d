//! Read-only view of a journey published after every operation.

use serde::Serialize;

use crate::domain::foundation::{Locale, ProjectId};
use crate::domain::journey::{ChatMessage, JourneyState, JourneyStatus, Stage, StartupData};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneySnapshot {
    pub project_id: ProjectId,
    pub locale: Locale,
    pub stage: String,
    pub status: JourneyStatus,
    pub is_loading: bool,
    pub is_complete: bool,
    pub progress: f32,
    pub first_uncompleted_stage: Stage,
    pub editing_stage: Option<Stage>,
    pub is_ready_for_next_section: bool,
    pub suggestion_open: bool,
    pub current_suggestion_text: String,
    pub answers: StartupData,
    pub messages: Vec<ChatMessage>,
}

impl From<&JourneyState> for JourneySnapshot {
    fn from(state: &JourneyState) -> Self {
        Self {
            project_id: state.project_id,
            locale: state.locale,
            stage: state.stage_id().to_string(),
            status: state.status(),
            is_loading: state.is_loading,
            is_complete: state.is_complete(),
            progress: state.progress(),
            first_uncompleted_stage: state.first_uncompleted_stage(),
            editing_stage: state.editing_stage,
            is_ready_for_next_section: state.is_ready_for_next_section,
            suggestion_open: state.suggestion_open,
            current_suggestion_text: state.current_suggestion_text.clone(),
            answers: state.answers.clone(),
            messages: state.log.messages().to_vec(),
        }
    }
}
