//! JourneyState - the orchestrator's full snapshot.

use serde::Serialize;

use crate::domain::foundation::{Locale, ProjectId};

use super::message::ConversationLog;
use super::project::ProjectRecord;
use super::stage::Stage;
use super::stage_graph;
use super::startup_data::StartupData;

/// Externally visible machine state. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStatus {
    Idle,
    Busy,
    AwaitingSuggestionConfirmation,
    AwaitingSectionGate,
    DirectEditing,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyState {
    pub project_id: ProjectId,
    pub locale: Locale,
    pub stage: Stage,
    /// Verbatim persisted stage id this build does not know.
    pub unrecognized_stage: Option<String>,
    pub answers: StartupData,
    pub log: ConversationLog,
    pub is_loading: bool,
    pub editing_stage: Option<Stage>,
    pub is_ready_for_next_section: bool,
    pub suggestion_open: bool,
    pub current_suggestion_text: String,
}

impl JourneyState {
    /// Empty state for a project that has not been hydrated yet.
    pub fn empty(project_id: ProjectId, locale: Locale) -> Self {
        Self {
            project_id,
            locale,
            stage: Stage::Initial,
            unrecognized_stage: None,
            answers: StartupData::new(),
            log: ConversationLog::new(),
            is_loading: false,
            editing_stage: None,
            is_ready_for_next_section: false,
            suggestion_open: false,
            current_suggestion_text: String::new(),
        }
    }

    /// Rebuilds the snapshot from a persisted record.
    ///
    /// A record parked on a summary stage resumes at its section gate.
    pub fn hydrate(record: ProjectRecord, locale: Locale) -> Self {
        let mut state = Self::empty(record.id, locale);
        match record.known_stage() {
            Some(stage) => {
                state.stage = stage;
                state.is_ready_for_next_section =
                    stage_graph::classify(stage) == super::StageKind::Summary;
            }
            None => state.unrecognized_stage = Some(record.stage),
        }
        state.answers = record.startup_data;
        state.log = record.messages.into();
        state
    }

    pub fn status(&self) -> JourneyStatus {
        if self.is_loading {
            JourneyStatus::Busy
        } else if self.is_complete() {
            JourneyStatus::Complete
        } else if self.is_ready_for_next_section {
            JourneyStatus::AwaitingSectionGate
        } else if self.suggestion_open {
            JourneyStatus::AwaitingSuggestionConfirmation
        } else if self.editing_stage.is_some() {
            JourneyStatus::DirectEditing
        } else {
            JourneyStatus::Idle
        }
    }

    pub fn is_complete(&self) -> bool {
        self.unrecognized_stage.is_none() && self.stage == Stage::Complete
    }

    /// Stage id as it must be persisted.
    pub fn stage_id(&self) -> &str {
        self.unrecognized_stage
            .as_deref()
            .unwrap_or_else(|| self.stage.as_str())
    }

    /// Position in the sequence as a percentage of the full journey.
    pub fn progress(&self) -> f32 {
        let last = (stage_graph::len() - 1) as f32;
        stage_graph::index_of(self.stage) as f32 / last * 100.0
    }

    /// First topic up to and including the current stage that has no answer.
    pub fn first_uncompleted_stage(&self) -> Stage {
        stage_graph::all_stages()
            .take_while(|s| !stage_graph::is_before(self.stage, *s))
            .filter(|s| !s.is_sentinel())
            .find(|s| {
                stage_graph::data_key_for(*s).is_some_and(|key| !self.answers.has_answer(key))
            })
            .unwrap_or(self.stage)
    }
}
