//! Structured results of journey operations.
//!
//! Progress and failures are reported here instead of being inferred from
//! system messages in the log.

use serde::Serialize;

use crate::domain::foundation::ValidationError;
use crate::domain::journey::Stage;

/// Overall result of an accepted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Ok,
    GenerationFailed,
    PersistenceFailed,
}

/// Something that happened while an operation ran, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JourneyEvent {
    AnswerRecorded { stage: Stage, key: String },
    StageEntered { stage: Stage },
    AutoGenerated { stage: Stage },
    SectionGateReached { stage: Stage },
    SectionSummarized { stage: Stage },
    JourneyCompleted,
    SuggestionReady { text: String },
    SuggestionClosed,
    EditStarted { stage: Stage },
    EditCancelled,
    StageDataUpdated { stage: Stage },
    DownstreamInvalidated { stage: Stage, keys: Vec<String> },
    JumpedBack { from: Stage, to: Stage },
    Restarted,
    LocaleChanged,
}

/// Result returned by every accepted journey operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyOutcome {
    pub kind: OutcomeKind,
    pub detail: Option<String>,
    pub events: Vec<JourneyEvent>,
}

impl JourneyOutcome {
    pub fn ok() -> Self {
        Self {
            kind: OutcomeKind::Ok,
            detail: None,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: JourneyEvent) {
        self.events.push(event);
    }

    /// A generation failure always wins over a later persistence failure.
    pub fn generation_failed(&mut self, detail: impl Into<String>) {
        self.kind = OutcomeKind::GenerationFailed;
        self.detail = Some(detail.into());
    }

    pub fn persistence_failed(&mut self, detail: impl Into<String>) {
        if self.kind == OutcomeKind::Ok {
            self.kind = OutcomeKind::PersistenceFailed;
            self.detail = Some(detail.into());
        }
    }

    pub fn is_ok(&self) -> bool {
        self.kind == OutcomeKind::Ok
    }

    pub fn has_event(&self, predicate: impl Fn(&JourneyEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}

impl Default for JourneyOutcome {
    fn default() -> Self {
        Self::ok()
    }
}

/// Synchronous rejection. The journey state is untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    #[error("another operation is in progress")]
    Busy,

    #[error("a suggestion is awaiting confirmation")]
    SuggestionPending,

    #[error("no suggestion is open")]
    NoSuggestionOpen,

    #[error("the journey is not waiting at a section gate")]
    NotAtSectionGate,

    #[error("the journey is waiting at a section gate")]
    AtSectionGate,

    #[error("cannot jump from {current} to {target}: only earlier stages can be revisited")]
    InvalidJump { current: Stage, target: Stage },

    #[error("the journey is already complete")]
    Complete,

    #[error("stage {0} has no answer to edit")]
    NoDataKey(Stage),

    #[error("nothing to retry at stage {0}")]
    NothingToRetry(Stage),

    #[error("stage '{0}' is not known to this version")]
    UnrecognizedStage(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("journey service stopped")]
    ServiceStopped,
}
