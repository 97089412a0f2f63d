//! JourneyService - runs one controller as a single-consumer actor.
//!
//! Commands are queued on an `mpsc` channel and applied one at a time; each
//! carries a `oneshot` for its reply. A `watch` channel publishes the latest
//! [`JourneySnapshot`] after every command and whenever `is_loading` flips,
//! so handles can reject UI entry points while a generation call is in
//! flight without taking a lock.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};

use crate::domain::foundation::{Locale, ProjectId};
use crate::domain::journey::{JourneyState, ProjectExport, Stage};

use super::controller::JourneyController;
use super::outcome::{JourneyError, JourneyOutcome};
use super::snapshot::JourneySnapshot;

const COMMAND_BUFFER: usize = 32;

type Reply = oneshot::Sender<Result<JourneyOutcome, JourneyError>>;

enum Command {
    SendMessage { text: String, reply: Reply },
    RequestSuggestion { reply: Reply },
    RefineSuggestion { instruction: String, reply: Reply },
    AcceptSuggestion { answer: String, reply: Reply },
    CloseSuggestion { reply: Reply },
    ProceedToNextSection { reply: Reply },
    RetryAutoGeneration { reply: Reply },
    JumpToStage { target: Stage, reply: Reply },
    EditStage { stage: Stage, reply: Reply },
    CancelDirectEdit { reply: Reply },
    UpdateStageData { stage: Stage, text: String, reply: Reply },
    RefineEditedStage { stage: Stage, instruction: String, reply: Reply },
    InvalidateDownstreamOf { stage: Stage, reply: Reply },
    RestartJourney { reply: Reply },
    SetLocale { locale: Locale, reply: Reply },
    Export { reply: oneshot::Sender<ProjectExport> },
}

pub struct JourneyService;

impl JourneyService {
    /// Moves `controller` into a background task and returns a handle to it.
    ///
    /// The task ends when every handle has been dropped.
    pub fn spawn(controller: JourneyController) -> JourneyHandle {
        let project_id = controller.state().project_id;
        let (snapshot_tx, snapshot_rx) = watch::channel(JourneySnapshot::from(controller.state()));
        let snapshot_tx = Arc::new(snapshot_tx);

        let publisher = Arc::clone(&snapshot_tx);
        let controller = controller.with_observer(Arc::new(move |state: &JourneyState| {
            publisher.send_replace(JourneySnapshot::from(state));
        }));

        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        tokio::spawn(run(controller, rx, snapshot_tx));

        JourneyHandle {
            project_id,
            tx,
            snapshot: snapshot_rx,
        }
    }
}

async fn run(
    mut controller: JourneyController,
    mut rx: mpsc::Receiver<Command>,
    snapshot_tx: Arc<watch::Sender<JourneySnapshot>>,
) {
    let project_id = controller.state().project_id;
    tracing::debug!(%project_id, "journey actor started");

    while let Some(command) = rx.recv().await {
        match command {
            Command::SendMessage { text, reply } => {
                let result = controller.send_message(&text).await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::RequestSuggestion { reply } => {
                let result = controller.request_suggestion().await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::RefineSuggestion { instruction, reply } => {
                let result = controller.refine_suggestion(&instruction).await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::AcceptSuggestion { answer, reply } => {
                let result = controller.accept_suggestion(&answer).await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::CloseSuggestion { reply } => {
                let result = controller.close_suggestion();
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::ProceedToNextSection { reply } => {
                let result = controller.proceed_to_next_section().await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::RetryAutoGeneration { reply } => {
                let result = controller.retry_auto_generation().await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::JumpToStage { target, reply } => {
                let result = controller.jump_to_stage(target).await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::EditStage { stage, reply } => {
                let result = controller.edit_stage(stage);
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::CancelDirectEdit { reply } => {
                let result = controller.cancel_direct_edit();
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::UpdateStageData { stage, text, reply } => {
                let result = controller.update_stage_data(stage, &text).await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::RefineEditedStage {
                stage,
                instruction,
                reply,
            } => {
                let result = controller.refine_edited_stage(stage, &instruction).await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::InvalidateDownstreamOf { stage, reply } => {
                let result = controller.invalidate_downstream_of(stage).await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::RestartJourney { reply } => {
                let result = controller.restart_journey().await;
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::SetLocale { locale, reply } => {
                let result = controller.set_locale(locale);
                respond(&controller, &snapshot_tx, reply, result);
            }
            Command::Export { reply } => {
                let result = controller.export_project();
                respond(&controller, &snapshot_tx, reply, result);
            }
        }
    }

    tracing::debug!(%project_id, "journey actor stopped");
}

/// Publishes the post-operation snapshot before the caller sees the reply.
fn respond<T>(
    controller: &JourneyController,
    snapshot_tx: &watch::Sender<JourneySnapshot>,
    reply: oneshot::Sender<T>,
    value: T,
) {
    snapshot_tx.send_replace(JourneySnapshot::from(controller.state()));
    let _ = reply.send(value);
}

/// Cloneable front door to a running journey actor.
#[derive(Debug, Clone)]
pub struct JourneyHandle {
    project_id: ProjectId,
    tx: mpsc::Sender<Command>,
    snapshot: watch::Receiver<JourneySnapshot>,
}

impl JourneyHandle {
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// True once the actor behind this handle has ended.
    pub fn is_stopped(&self) -> bool {
        self.tx.is_closed()
    }

    /// Latest published state.
    pub fn snapshot(&self) -> JourneySnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<JourneySnapshot> {
        self.snapshot.clone()
    }

    pub async fn send_message(&self, text: impl Into<String>) -> Result<JourneyOutcome, JourneyError> {
        self.fail_fast_if_busy()?;
        let text = text.into();
        self.call(|reply| Command::SendMessage { text, reply }).await
    }

    pub async fn request_suggestion(&self) -> Result<JourneyOutcome, JourneyError> {
        self.fail_fast_if_busy()?;
        self.call(|reply| Command::RequestSuggestion { reply }).await
    }

    pub async fn refine_suggestion(
        &self,
        instruction: impl Into<String>,
    ) -> Result<JourneyOutcome, JourneyError> {
        let instruction = instruction.into();
        self.call(|reply| Command::RefineSuggestion { instruction, reply })
            .await
    }

    pub async fn accept_suggestion(
        &self,
        answer: impl Into<String>,
    ) -> Result<JourneyOutcome, JourneyError> {
        let answer = answer.into();
        self.call(|reply| Command::AcceptSuggestion { answer, reply })
            .await
    }

    pub async fn close_suggestion(&self) -> Result<JourneyOutcome, JourneyError> {
        self.call(|reply| Command::CloseSuggestion { reply }).await
    }

    pub async fn proceed_to_next_section(&self) -> Result<JourneyOutcome, JourneyError> {
        self.fail_fast_if_busy()?;
        self.call(|reply| Command::ProceedToNextSection { reply })
            .await
    }

    pub async fn retry_auto_generation(&self) -> Result<JourneyOutcome, JourneyError> {
        self.call(|reply| Command::RetryAutoGeneration { reply })
            .await
    }

    pub async fn jump_to_stage(&self, target: Stage) -> Result<JourneyOutcome, JourneyError> {
        self.call(|reply| Command::JumpToStage { target, reply }).await
    }

    pub async fn edit_stage(&self, stage: Stage) -> Result<JourneyOutcome, JourneyError> {
        self.call(|reply| Command::EditStage { stage, reply }).await
    }

    pub async fn cancel_direct_edit(&self) -> Result<JourneyOutcome, JourneyError> {
        self.call(|reply| Command::CancelDirectEdit { reply }).await
    }

    pub async fn update_stage_data(
        &self,
        stage: Stage,
        text: impl Into<String>,
    ) -> Result<JourneyOutcome, JourneyError> {
        let text = text.into();
        self.call(|reply| Command::UpdateStageData { stage, text, reply })
            .await
    }

    pub async fn refine_edited_stage(
        &self,
        stage: Stage,
        instruction: impl Into<String>,
    ) -> Result<JourneyOutcome, JourneyError> {
        let instruction = instruction.into();
        self.call(|reply| Command::RefineEditedStage {
            stage,
            instruction,
            reply,
        })
        .await
    }

    pub async fn invalidate_downstream_of(
        &self,
        stage: Stage,
    ) -> Result<JourneyOutcome, JourneyError> {
        self.call(|reply| Command::InvalidateDownstreamOf { stage, reply })
            .await
    }

    pub async fn restart_journey(&self) -> Result<JourneyOutcome, JourneyError> {
        self.call(|reply| Command::RestartJourney { reply }).await
    }

    pub async fn set_locale(&self, locale: Locale) -> Result<JourneyOutcome, JourneyError> {
        self.call(|reply| Command::SetLocale { locale, reply }).await
    }

    pub async fn export_project(&self) -> Result<ProjectExport, JourneyError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Export { reply })
            .await
            .map_err(|_| JourneyError::ServiceStopped)?;
        rx.await.map_err(|_| JourneyError::ServiceStopped)
    }

    fn fail_fast_if_busy(&self) -> Result<(), JourneyError> {
        if self.snapshot.borrow().is_loading {
            return Err(JourneyError::Busy);
        }
        Ok(())
    }

    async fn call(
        &self,
        make: impl FnOnce(Reply) -> Command,
    ) -> Result<JourneyOutcome, JourneyError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| JourneyError::ServiceStopped)?;
        rx.await.map_err(|_| JourneyError::ServiceStopped)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{GeneratorOp, MockContentGenerator};
    use crate::adapters::prompts::StaticPromptCatalog;
    use crate::adapters::storage::InMemoryProjectRepository;
    use crate::domain::journey::ProjectRecord;
    use std::time::Duration;

    async fn spawn_at(stage: Stage, generator: MockContentGenerator) -> JourneyHandle {
        let repository = InMemoryProjectRepository::new();
        let mut record = ProjectRecord::create("Acme", "Rockets").unwrap();
        record.stage = stage.as_str().to_string();
        repository.insert(record.clone()).await;

        let controller = JourneyController::new(
            JourneyState::hydrate(record, Locale::En),
            Arc::new(generator),
            Arc::new(repository),
            Arc::new(StaticPromptCatalog::embedded().unwrap()),
        );
        JourneyService::spawn(controller)
    }

    #[tokio::test]
    async fn commands_update_published_snapshot() {
        let handle = spawn_at(Stage::IdeaTitle, MockContentGenerator::new()).await;

        handle.send_message("Acme").await.unwrap();

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.stage, "ELEVATOR_PITCH");
        assert_eq!(snapshot.answers.get("idea_title"), Some("Acme"));
    }

    #[tokio::test]
    async fn send_while_generating_fails_fast_with_busy() {
        let generator = MockContentGenerator::new().with_delay(Duration::from_millis(200));
        let handle = spawn_at(Stage::ElevatorPitch, generator).await;

        let mut updates = handle.subscribe();
        let background = handle.clone();
        let pending = tokio::spawn(async move { background.request_suggestion().await });

        while !updates.borrow_and_update().is_loading {
            updates.changed().await.unwrap();
        }
        assert_eq!(handle.send_message("hi").await.unwrap_err(), JourneyError::Busy);
        assert_eq!(
            handle.proceed_to_next_section().await.unwrap_err(),
            JourneyError::Busy
        );

        pending.await.unwrap().unwrap();
        assert!(!handle.snapshot().is_loading);
        assert!(handle.snapshot().suggestion_open);
    }

    #[tokio::test]
    async fn rejections_travel_back_through_the_handle() {
        let handle = spawn_at(Stage::IdeaTitle, MockContentGenerator::new()).await;
        assert_eq!(
            handle.proceed_to_next_section().await.unwrap_err(),
            JourneyError::NotAtSectionGate
        );
    }

    #[tokio::test]
    async fn export_reads_current_state() {
        let generator = MockContentGenerator::new().with_response(GeneratorOp::Suggest, "unused");
        let handle = spawn_at(Stage::IdeaTitle, generator).await;
        handle.send_message("X").await.unwrap();

        let export = handle.export_project().await.unwrap();
        assert_eq!(export.data.get("idea_title"), Some("X"));
        assert_eq!(export.stage, "ELEVATOR_PITCH");
    }
}
