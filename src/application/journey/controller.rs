//! JourneyController - the stage-sequencing state machine.
//!
//! Owns one [`JourneyState`] and mutates it only through the operations
//! below. Every operation either rejects synchronously with a
//! [`JourneyError`] (state untouched) or runs to completion and reports a
//! [`JourneyOutcome`].
//!
//! Generation failures append a system message and leave answers and stage
//! as they were before the failing call. Persistence failures are logged and
//! reported in the outcome; in-memory state stays authoritative.

use std::sync::Arc;

use crate::domain::foundation::{Locale, ValidationError};
use crate::domain::journey::{
    stage_graph, ChatMessage, JourneyState, ProjectExport, Stage, StageKind, StartupData,
};
use crate::ports::{ContentGenerator, JourneySaveRequest, ProjectRepository, PromptCatalog};

use super::notices;
use super::outcome::{JourneyError, JourneyEvent, JourneyOutcome};

/// Called whenever the controller changes state mid-operation
/// (currently when `is_loading` flips).
pub type StateObserver = Arc<dyn Fn(&JourneyState) + Send + Sync>;

pub struct JourneyController {
    state: JourneyState,
    generator: Arc<dyn ContentGenerator>,
    repository: Arc<dyn ProjectRepository>,
    prompts: Arc<dyn PromptCatalog>,
    observer: Option<StateObserver>,
}

impl JourneyController {
    pub fn new(
        state: JourneyState,
        generator: Arc<dyn ContentGenerator>,
        repository: Arc<dyn ProjectRepository>,
        prompts: Arc<dyn PromptCatalog>,
    ) -> Self {
        Self {
            state,
            generator,
            repository,
            prompts,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: StateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn state(&self) -> &JourneyState {
        &self.state
    }

    // ════════════════════════════════════════════════════════════════════════
    // Opening
    // ════════════════════════════════════════════════════════════════════════

    /// Seeds a freshly hydrated journey.
    ///
    /// An empty log gets the start notice and the current question; a
    /// journey still at `INITIAL` is advanced to its first question.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %self.state.stage_id()))]
    pub async fn begin(&mut self) -> Result<JourneyOutcome, JourneyError> {
        let mut outcome = JourneyOutcome::ok();
        if self.state.unrecognized_stage.is_some() {
            tracing::warn!("journey opened on an unrecognized stage; restart required");
            return Ok(outcome);
        }

        let stage = self.state.stage;
        if self.state.log.is_empty() {
            let name = self.state.answers.project_name().unwrap_or_default().to_string();
            self.state
                .log
                .push(ChatMessage::system(notices::starting_journey(&name)));

            if stage != Stage::Initial {
                self.emit_prompt(stage);
                outcome.push(JourneyEvent::StageEntered { stage });
                self.persist(&mut outcome).await;
            }
        }

        if stage == Stage::Initial {
            self.advance(stage, &mut outcome).await;
        }

        Ok(outcome)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Answering
    // ════════════════════════════════════════════════════════════════════════

    /// Records `text` as the answer to the current stage and advances.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %self.state.stage_id()))]
    pub async fn send_message(&mut self, text: &str) -> Result<JourneyOutcome, JourneyError> {
        let stage = self.ensure_answerable()?;
        if self.state.suggestion_open {
            return Err(JourneyError::SuggestionPending);
        }
        let text = non_blank(text, "text")?;

        let mut outcome = JourneyOutcome::ok();
        self.record_answer(stage, text, &mut outcome).await;
        Ok(outcome)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Suggestion sub-dialog
    // ════════════════════════════════════════════════════════════════════════

    /// Opens the suggestion dialog and asks the generator for a proposal.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %self.state.stage_id()))]
    pub async fn request_suggestion(&mut self) -> Result<JourneyOutcome, JourneyError> {
        let stage = self.ensure_answerable()?;

        self.state.suggestion_open = true;
        self.state.current_suggestion_text.clear();
        self.state.log.strip_suggestions();

        let mut outcome = JourneyOutcome::ok();
        let generator = Arc::clone(&self.generator);
        self.set_loading(true);
        let result = generator
            .suggest(stage, &self.state.answers, self.state.locale)
            .await;
        self.set_loading(false);

        match result {
            Ok(text) => self.hold_suggestion(text, &mut outcome),
            Err(e) => {
                tracing::warn!(error = %e, "suggestion generation failed");
                self.state.suggestion_open = false;
                self.state
                    .log
                    .push(ChatMessage::system(notices::SUGGESTION_FAILED));
                outcome.generation_failed(e.to_string());
                self.persist(&mut outcome).await;
            }
        }
        Ok(outcome)
    }

    /// Rewrites the held suggestion. The dialog stays open either way.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %self.state.stage_id()))]
    pub async fn refine_suggestion(
        &mut self,
        instruction: &str,
    ) -> Result<JourneyOutcome, JourneyError> {
        self.ensure_not_busy()?;
        if !self.state.suggestion_open {
            return Err(JourneyError::NoSuggestionOpen);
        }
        let instruction = non_blank(instruction, "instruction")?;

        let mut outcome = JourneyOutcome::ok();
        let original = self.state.current_suggestion_text.clone();
        let generator = Arc::clone(&self.generator);
        self.set_loading(true);
        let result = generator
            .refine(&original, instruction, &self.state.answers, self.state.locale)
            .await;
        self.set_loading(false);

        match result {
            Ok(text) => self.hold_suggestion(text, &mut outcome),
            Err(e) => {
                tracing::warn!(error = %e, "suggestion refinement failed");
                self.state
                    .log
                    .push(ChatMessage::system(notices::SUGGESTION_REFINE_FAILED));
                outcome.generation_failed(e.to_string());
                self.persist(&mut outcome).await;
            }
        }
        Ok(outcome)
    }

    /// Closes the dialog and treats `answer` exactly like a sent message.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %self.state.stage_id()))]
    pub async fn accept_suggestion(&mut self, answer: &str) -> Result<JourneyOutcome, JourneyError> {
        let stage = self.ensure_answerable()?;
        if !self.state.suggestion_open {
            return Err(JourneyError::NoSuggestionOpen);
        }
        let answer = non_blank(answer, "answer")?;

        let mut outcome = JourneyOutcome::ok();
        self.discard_suggestion();
        outcome.push(JourneyEvent::SuggestionClosed);
        self.record_answer(stage, answer, &mut outcome).await;
        Ok(outcome)
    }

    /// Discards the held suggestion. Closing an already closed dialog is a no-op.
    pub fn close_suggestion(&mut self) -> Result<JourneyOutcome, JourneyError> {
        self.ensure_not_busy()?;
        let mut outcome = JourneyOutcome::ok();
        if self.state.suggestion_open || self.state.log.has_pending_suggestion() {
            self.discard_suggestion();
            outcome.push(JourneyEvent::SuggestionClosed);
        }
        Ok(outcome)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Section gate
    // ════════════════════════════════════════════════════════════════════════

    /// Summarizes the phase ending at the current summary stage, then advances.
    ///
    /// On failure the journey stays parked at the gate and may be retried.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %self.state.stage_id()))]
    pub async fn proceed_to_next_section(&mut self) -> Result<JourneyOutcome, JourneyError> {
        let summary_stage = self.ensure_ready()?;
        if !self.state.is_ready_for_next_section {
            return Err(JourneyError::NotAtSectionGate);
        }

        let mut outcome = JourneyOutcome::ok();
        self.state
            .log
            .push(ChatMessage::system(notices::generating_summary(summary_stage)));

        let generator = Arc::clone(&self.generator);
        self.set_loading(true);
        let result = generator
            .summarize_section(summary_stage, &self.state.answers, self.state.locale)
            .await;
        self.set_loading(false);

        match result {
            Ok(summary) => {
                if let Some(key) = stage_graph::data_key_for(summary_stage) {
                    self.state.answers.set(key, summary);
                }
                self.state
                    .log
                    .push(ChatMessage::system(notices::summary_complete(summary_stage)));
                self.state.is_ready_for_next_section = false;
                outcome.push(JourneyEvent::SectionSummarized {
                    stage: summary_stage,
                });
                self.advance(summary_stage, &mut outcome).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "section summary failed");
                self.state
                    .log
                    .push(ChatMessage::system(notices::SUMMARY_FAILED));
                outcome.generation_failed(e.to_string());
                self.persist(&mut outcome).await;
            }
        }
        Ok(outcome)
    }

    /// Re-runs the generator for an auto stage whose earlier attempt failed.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %self.state.stage_id()))]
    pub async fn retry_auto_generation(&mut self) -> Result<JourneyOutcome, JourneyError> {
        let stage = self.ensure_ready()?;
        let missing = stage_graph::data_key_for(stage)
            .is_some_and(|key| !self.state.answers.has_answer(key));
        if stage_graph::classify(stage) != StageKind::AutoGenerated || !missing {
            return Err(JourneyError::NothingToRetry(stage));
        }

        let mut outcome = JourneyOutcome::ok();
        if self.generate_stage(stage, &mut outcome).await {
            self.advance(stage, &mut outcome).await;
        }
        Ok(outcome)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Navigation and direct editing
    // ════════════════════════════════════════════════════════════════════════

    /// Moves the stage pointer back to an earlier topic and asks it again.
    /// Answers collected after `target` are kept.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %self.state.stage_id(), to = %target))]
    pub async fn jump_to_stage(&mut self, target: Stage) -> Result<JourneyOutcome, JourneyError> {
        let current = self.ensure_ready()?;
        if self.state.is_ready_for_next_section {
            return Err(JourneyError::AtSectionGate);
        }
        if self.state.suggestion_open {
            return Err(JourneyError::SuggestionPending);
        }
        if target.is_sentinel() || !stage_graph::is_before(target, current) {
            return Err(JourneyError::InvalidJump { current, target });
        }

        let mut outcome = JourneyOutcome::ok();
        self.state.log.strip_suggestions();
        self.state.stage = target;
        outcome.push(JourneyEvent::JumpedBack {
            from: current,
            to: target,
        });
        outcome.push(JourneyEvent::StageEntered { stage: target });

        if stage_graph::classify(target) == StageKind::Summary {
            self.state.is_ready_for_next_section = true;
            outcome.push(JourneyEvent::SectionGateReached { stage: target });
        } else {
            self.emit_prompt(target);
        }

        self.persist(&mut outcome).await;
        Ok(outcome)
    }

    /// Enters direct-edit mode for `stage`. The stage pointer does not move.
    pub fn edit_stage(&mut self, stage: Stage) -> Result<JourneyOutcome, JourneyError> {
        self.ensure_not_busy()?;
        if stage_graph::data_key_for(stage).is_none() {
            return Err(JourneyError::NoDataKey(stage));
        }
        self.state.editing_stage = Some(stage);

        let mut outcome = JourneyOutcome::ok();
        outcome.push(JourneyEvent::EditStarted { stage });
        Ok(outcome)
    }

    pub fn cancel_direct_edit(&mut self) -> Result<JourneyOutcome, JourneyError> {
        self.ensure_not_busy()?;
        let mut outcome = JourneyOutcome::ok();
        if self.state.editing_stage.take().is_some() {
            outcome.push(JourneyEvent::EditCancelled);
        }
        Ok(outcome)
    }

    /// Overwrites the stored answer of `stage`. Downstream answers are not
    /// regenerated; see [`Self::invalidate_downstream_of`].
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %stage))]
    pub async fn update_stage_data(
        &mut self,
        stage: Stage,
        new_text: &str,
    ) -> Result<JourneyOutcome, JourneyError> {
        self.ensure_not_busy()?;
        let key = stage_graph::data_key_for(stage).ok_or(JourneyError::NoDataKey(stage))?;

        let mut outcome = JourneyOutcome::ok();
        let title = self.prompts.title(stage, self.state.locale);
        self.state.editing_stage = None;
        self.state
            .log
            .push(ChatMessage::system(notices::saving_changes(&title)));
        self.state.answers.set(key, new_text);
        outcome.push(JourneyEvent::StageDataUpdated { stage });

        if self.persist(&mut outcome).await {
            self.state.log.push(ChatMessage::system(notices::CHANGES_SAVED));
        }
        Ok(outcome)
    }

    /// Rewrites the stored answer of `stage` following `instruction`.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %stage))]
    pub async fn refine_edited_stage(
        &mut self,
        stage: Stage,
        instruction: &str,
    ) -> Result<JourneyOutcome, JourneyError> {
        self.ensure_not_busy()?;
        let key = stage_graph::data_key_for(stage).ok_or(JourneyError::NoDataKey(stage))?;
        let instruction = non_blank(instruction, "instruction")?;

        let mut outcome = JourneyOutcome::ok();
        let title = self.prompts.title(stage, self.state.locale);
        self.state
            .log
            .push(ChatMessage::system(notices::refining_stage(&title)));

        let original = self.state.answers.get(key).unwrap_or_default().to_string();
        let generator = Arc::clone(&self.generator);
        self.set_loading(true);
        let result = generator
            .refine(&original, instruction, &self.state.answers, self.state.locale)
            .await;
        self.set_loading(false);

        match result {
            Ok(refined) => {
                self.state.answers.set(key, refined);
                outcome.push(JourneyEvent::StageDataUpdated { stage });
                if self.persist(&mut outcome).await {
                    self.state.log.push(ChatMessage::system(notices::STAGE_REFINED));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "refining edited stage failed");
                self.state
                    .log
                    .push(ChatMessage::system(notices::STAGE_REFINE_FAILED));
                outcome.generation_failed(e.to_string());
                self.persist(&mut outcome).await;
            }
        }
        Ok(outcome)
    }

    /// Drops generated answers (auto and summary stages) that belong only to
    /// stages after `stage`. Interactive answers are kept.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %stage))]
    pub async fn invalidate_downstream_of(
        &mut self,
        stage: Stage,
    ) -> Result<JourneyOutcome, JourneyError> {
        self.ensure_ready()?;

        let mut removed: Vec<String> = Vec::new();
        for later in stage_graph::stages_after(stage) {
            if stage_graph::classify(later) == StageKind::Interactive {
                continue;
            }
            let Some(key) = stage_graph::data_key_for(later) else {
                continue;
            };
            let owned_downstream = stage_graph::stages_sharing_key(key)
                .into_iter()
                .all(|s| stage_graph::is_before(stage, s));
            if owned_downstream && self.state.answers.remove(key).is_some() {
                removed.push(key.to_string());
            }
        }

        let mut outcome = JourneyOutcome::ok();
        if !removed.is_empty() {
            tracing::info!(keys = ?removed, "invalidated downstream answers");
            outcome.push(JourneyEvent::DownstreamInvalidated {
                stage,
                keys: removed,
            });
            self.persist(&mut outcome).await;
        }
        Ok(outcome)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Project-level actions
    // ════════════════════════════════════════════════════════════════════════

    /// Starts over from the first question, keeping only name and idea.
    #[tracing::instrument(skip_all, fields(project_id = %self.state.project_id, stage = %self.state.stage_id()))]
    pub async fn restart_journey(&mut self) -> Result<JourneyOutcome, JourneyError> {
        self.ensure_not_busy()?;
        let idea = self
            .state
            .answers
            .initial_idea()
            .filter(|idea| !idea.trim().is_empty())
            .ok_or_else(|| ValidationError::empty_field("initial_idea"))?
            .to_string();
        let name = self.state.answers.project_name().unwrap_or_default().to_string();

        let first = stage_graph::first_interactive_stage();
        self.state.answers = StartupData::seeded(name, idea.clone());
        self.state.stage = first;
        self.state.unrecognized_stage = None;
        self.state.editing_stage = None;
        self.state.is_ready_for_next_section = false;
        self.state.suggestion_open = false;
        self.state.current_suggestion_text.clear();
        self.state.log = Default::default();
        self.state
            .log
            .push(ChatMessage::system(notices::restarting_project(&idea)));
        self.emit_prompt(first);

        let mut outcome = JourneyOutcome::ok();
        outcome.push(JourneyEvent::Restarted);
        outcome.push(JourneyEvent::StageEntered { stage: first });
        self.persist(&mut outcome).await;
        Ok(outcome)
    }

    /// Downloadable document of the current stage, answers and log.
    pub fn export_project(&self) -> ProjectExport {
        ProjectExport::from_state(&self.state)
    }

    /// Changes the locale used for prompts and generation from now on.
    pub fn set_locale(&mut self, locale: Locale) -> Result<JourneyOutcome, JourneyError> {
        self.ensure_not_busy()?;
        let mut outcome = JourneyOutcome::ok();
        if self.state.locale != locale {
            self.state.locale = locale;
            outcome.push(JourneyEvent::LocaleChanged);
        }
        Ok(outcome)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Transitions
    // ════════════════════════════════════════════════════════════════════════

    /// Moves past `from`, chaining through auto-generated stages until an
    /// interactive stage, a section gate, the end, or a generation failure.
    async fn advance(&mut self, from: Stage, outcome: &mut JourneyOutcome) {
        let mut current = from;
        loop {
            self.state.log.strip_suggestions();

            let Some(next) = stage_graph::next(current) else {
                self.state.stage = Stage::Complete;
                outcome.push(JourneyEvent::JourneyCompleted);
                self.persist(outcome).await;
                return;
            };

            self.state.stage = next;
            outcome.push(JourneyEvent::StageEntered { stage: next });
            tracing::debug!(stage = %next, "entered stage");

            match stage_graph::classify(next) {
                StageKind::Summary => {
                    self.state.is_ready_for_next_section = true;
                    outcome.push(JourneyEvent::SectionGateReached { stage: next });
                    self.persist(outcome).await;
                    return;
                }
                StageKind::AutoGenerated => {
                    self.emit_prompt(next);
                    if !self.generate_stage(next, outcome).await {
                        self.persist(outcome).await;
                        return;
                    }
                    current = next;
                }
                StageKind::Interactive => {
                    self.emit_prompt(next);
                    if next == Stage::Complete {
                        outcome.push(JourneyEvent::JourneyCompleted);
                    }
                    self.persist(outcome).await;
                    return;
                }
            }
        }
    }

    /// Stores `text` (or the structured ideas derived from it) under the
    /// current stage's key, then advances.
    async fn record_answer(&mut self, stage: Stage, text: &str, outcome: &mut JourneyOutcome) {
        self.state.log.push(ChatMessage::user(text));

        let key = stage_graph::data_key_for(stage);
        if stage_graph::collects_structured_ideas(stage) {
            let generator = Arc::clone(&self.generator);
            self.set_loading(true);
            let result = generator
                .generate_structured_ideas(stage, text, &self.state.answers, self.state.locale)
                .await;
            self.set_loading(false);

            match result {
                Ok(ideas) => {
                    if let Some(key) = key {
                        self.state.answers.set(key, ideas.structured_value);
                    }
                    self.state
                        .log
                        .push(ChatMessage::ai(ideas.text).with_images(ideas.images));
                }
                Err(e) => {
                    tracing::warn!(error = %e, stage = %stage, "structured idea generation failed");
                    self.state.log.push(ChatMessage::system(notices::MESSAGE_FAILED));
                    outcome.generation_failed(e.to_string());
                    self.persist(outcome).await;
                    return;
                }
            }
        } else if let Some(key) = key {
            self.state.answers.set(key, text);
        }

        if let Some(key) = key {
            outcome.push(JourneyEvent::AnswerRecorded {
                stage,
                key: key.to_string(),
            });
        }
        self.advance(stage, outcome).await;
    }

    /// Generates the answer of an auto stage. Returns false on failure.
    async fn generate_stage(&mut self, stage: Stage, outcome: &mut JourneyOutcome) -> bool {
        let generator = Arc::clone(&self.generator);
        self.set_loading(true);
        let result = generator
            .generate_for_stage(stage, &self.state.answers, self.state.locale)
            .await;
        self.set_loading(false);

        match result {
            Ok(generation) => {
                if let Some(key) = stage_graph::data_key_for(stage) {
                    self.state.answers.set(key, generation.text.clone());
                }
                self.state
                    .log
                    .push(ChatMessage::ai(generation.text).with_sources(generation.sources));
                outcome.push(JourneyEvent::AutoGenerated { stage });
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, stage = %stage, "auto-generation failed");
                self.state
                    .log
                    .push(ChatMessage::system(notices::AUTO_GENERATION_FAILED));
                outcome.generation_failed(e.to_string());
                false
            }
        }
    }

    /// Asks the stage's question. Interactive stages get their guidance
    /// first; summary stages say nothing.
    fn emit_prompt(&mut self, stage: Stage) {
        let locale = self.state.locale;
        match stage_graph::classify(stage) {
            StageKind::Summary => {}
            StageKind::AutoGenerated => {
                let question = self.prompts.question(stage, locale);
                let text = notices::substitute_competitors(&question, &self.state.answers);
                self.state.log.push(ChatMessage::ai(text));
            }
            StageKind::Interactive => {
                if let Some(guidance) = self.prompts.guidance(stage, locale) {
                    self.state.log.push(ChatMessage::ai(guidance));
                }
                let question = self.prompts.question(stage, locale);
                self.state.log.push(ChatMessage::ai(question));
            }
        }
    }

    fn hold_suggestion(&mut self, text: String, outcome: &mut JourneyOutcome) {
        self.state.log.strip_suggestions();
        self.state.log.push(ChatMessage::suggestion(text.clone()));
        self.state.current_suggestion_text = text.clone();
        outcome.push(JourneyEvent::SuggestionReady { text });
    }

    fn discard_suggestion(&mut self) {
        self.state.suggestion_open = false;
        self.state.current_suggestion_text.clear();
        self.state.log.strip_suggestions();
    }

    /// Saves the current state. Returns false (and marks the outcome) on failure.
    async fn persist(&self, outcome: &mut JourneyOutcome) -> bool {
        let request = JourneySaveRequest::from_state(&self.state);
        match self.repository.save(self.state.project_id, &request).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    project_id = %self.state.project_id,
                    error = %e,
                    "failed to persist journey; in-memory state kept"
                );
                outcome.persistence_failed(e.to_string());
                false
            }
        }
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.is_loading = loading;
        if let Some(observer) = &self.observer {
            observer(&self.state);
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Guards
    // ════════════════════════════════════════════════════════════════════════

    fn ensure_not_busy(&self) -> Result<(), JourneyError> {
        if self.state.is_loading {
            return Err(JourneyError::Busy);
        }
        Ok(())
    }

    /// Current stage, if it is one this build understands.
    fn ensure_ready(&self) -> Result<Stage, JourneyError> {
        self.ensure_not_busy()?;
        if let Some(id) = &self.state.unrecognized_stage {
            return Err(JourneyError::UnrecognizedStage(id.clone()));
        }
        Ok(self.state.stage)
    }

    /// Current stage, if it can take an answer right now.
    fn ensure_answerable(&self) -> Result<Stage, JourneyError> {
        let stage = self.ensure_ready()?;
        if self.state.is_complete() {
            return Err(JourneyError::Complete);
        }
        if self.state.is_ready_for_next_section {
            return Err(JourneyError::AtSectionGate);
        }
        Ok(stage)
    }
}

fn non_blank<'a>(value: &'a str, field: &str) -> Result<&'a str, JourneyError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field).into());
    }
    Ok(trimmed)
}
