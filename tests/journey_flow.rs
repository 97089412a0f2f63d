//! End-to-end journey scenarios through the application layer.
//!
//! These tests drive a project from creation to completion using the mock
//! generator and the in-memory repository, checking what gets persisted.

use std::sync::Arc;

use proptest::prelude::*;

use startup_blueprint::adapters::ai::{GeneratorOp, MockContentGenerator};
use startup_blueprint::adapters::prompts::StaticPromptCatalog;
use startup_blueprint::adapters::storage::InMemoryProjectRepository;
use startup_blueprint::application::handlers::{
    CreateProjectCommand, CreateProjectHandler, OpenJourneyHandler,
};
use startup_blueprint::application::journey::{
    JourneyController, JourneyError, JourneyEvent, JourneyHandle, JourneyOutcome, JourneyRegistry,
    JourneySnapshot, OutcomeKind,
};
use startup_blueprint::domain::foundation::{Locale, ProjectId};
use startup_blueprint::domain::journey::{
    stage_graph, JourneyState, JourneyStatus, ProjectRecord, Stage, StageKind,
};
use startup_blueprint::ports::ProjectRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct World {
    repository: InMemoryProjectRepository,
    generator: MockContentGenerator,
    registry: JourneyRegistry,
}

impl World {
    fn new(generator: MockContentGenerator) -> Self {
        let repository = InMemoryProjectRepository::new();
        let opener = OpenJourneyHandler::new(
            Arc::new(repository.clone()),
            Arc::new(generator.clone()),
            Arc::new(StaticPromptCatalog::embedded().unwrap()),
        );
        Self {
            repository,
            generator,
            registry: JourneyRegistry::new(opener, Locale::En),
        }
    }

    async fn create(&self, name: &str, idea: &str) -> ProjectId {
        CreateProjectHandler::new(Arc::new(self.repository.clone()))
            .handle(CreateProjectCommand {
                name: name.to_string(),
                initial_idea: idea.to_string(),
            })
            .await
            .unwrap()
            .project
            .id
    }

    async fn open(&self, id: ProjectId) -> JourneyHandle {
        self.registry.get_or_open(id).await.unwrap()
    }
}

/// Answers every question and passes every gate until the journey completes.
async fn walk_to_completion(handle: &JourneyHandle) -> Vec<JourneySnapshot> {
    let mut seen = vec![handle.snapshot()];
    for _ in 0..stage_graph::len() * 2 {
        let snapshot = handle.snapshot();
        let outcome = match snapshot.status {
            JourneyStatus::Complete => return seen,
            JourneyStatus::AwaitingSectionGate => handle.proceed_to_next_section().await,
            JourneyStatus::Idle => {
                handle
                    .send_message(format!("Answer for {}", snapshot.stage))
                    .await
            }
            other => panic!("unexpected status while walking: {other:?}"),
        };
        assert_eq!(outcome.unwrap().kind, OutcomeKind::Ok);
        seen.push(handle.snapshot());
    }
    panic!("journey did not complete");
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn full_journey_reaches_completion_with_every_answer() {
    let world = World::new(MockContentGenerator::new());
    let id = world.create("Acme Rockets", "Reusable rockets for hobbyists").await;
    let handle = world.open(id).await;

    let snapshots = walk_to_completion(&handle).await;

    let last = snapshots.last().unwrap();
    assert!(last.is_complete);
    assert_eq!(last.progress, 100.0);
    for spec in stage_graph::table() {
        if let Some(key) = spec.data_key {
            assert!(last.answers.has_answer(key), "missing answer for {}", spec.id);
        }
    }

    let stored = world.repository.load(id).await.unwrap().unwrap();
    assert_eq!(stored.stage, "COMPLETE");
    assert_eq!(stored.startup_data, last.answers);
    assert!(stored.messages.iter().all(|m| !m.is_suggestion));
}

#[tokio::test]
async fn progress_never_moves_backwards_while_answering() {
    let world = World::new(MockContentGenerator::new());
    let id = world.create("Acme", "Rockets").await;
    let handle = world.open(id).await;

    let snapshots = walk_to_completion(&handle).await;

    for pair in snapshots.windows(2) {
        assert!(
            pair[1].progress >= pair[0].progress,
            "progress fell from {} to {}",
            pair[0].stage,
            pair[1].stage
        );
    }
}

fn stages_entered(outcome: &JourneyOutcome) -> usize {
    outcome
        .events
        .iter()
        .filter(|e| matches!(e, JourneyEvent::StageEntered { .. }))
        .count()
}

#[tokio::test]
async fn journey_from_initial_completes_in_one_advance_per_stage() {
    let repository = InMemoryProjectRepository::new();
    let mut record = ProjectRecord::create("Acme", "Rockets").unwrap();
    record.stage = Stage::Initial.as_str().to_string();
    repository.insert(record.clone()).await;

    let mut controller = JourneyController::new(
        JourneyState::hydrate(record, Locale::En),
        Arc::new(MockContentGenerator::new()),
        Arc::new(repository),
        Arc::new(StaticPromptCatalog::embedded().unwrap()),
    );

    let mut advances = stages_entered(&controller.begin().await.unwrap());
    assert_eq!(stage_graph::index_of(controller.state().stage), advances);

    while !controller.state().is_complete() {
        let outcome = if controller.state().is_ready_for_next_section {
            controller.proceed_to_next_section().await
        } else {
            let text = format!("Answer for {}", controller.state().stage);
            controller.send_message(&text).await
        };
        let outcome = outcome.unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Ok);
        advances += stages_entered(&outcome);
        assert_eq!(stage_graph::index_of(controller.state().stage), advances);
        assert!(advances < stage_graph::len(), "journey ran past its last stage");
    }

    assert_eq!(advances, stage_graph::len() - 1);
}

#[tokio::test]
async fn every_summary_stage_is_generated_once() {
    let world = World::new(MockContentGenerator::new());
    let id = world.create("Acme", "Rockets").await;
    walk_to_completion(&world.open(id).await).await;

    let summaries = stage_graph::table()
        .iter()
        .filter(|s| s.kind == StageKind::Summary)
        .count();
    assert_eq!(
        world.generator.call_count(GeneratorOp::SummarizeSection),
        summaries
    );
}

#[tokio::test]
async fn reopening_resumes_from_persisted_stage() {
    let world = World::new(MockContentGenerator::new());
    let id = world.create("Acme", "Rockets").await;
    let handle = world.open(id).await;
    handle.send_message("Acme Rockets").await.unwrap();
    handle.send_message("Rockets for everyone").await.unwrap();
    let before = handle.snapshot();

    assert!(world.registry.close(id).await);
    drop(handle);
    let reopened = world.open(id).await.snapshot();

    assert_eq!(reopened.stage, before.stage);
    assert_eq!(reopened.answers, before.answers);
    assert_eq!(reopened.messages.len(), before.messages.len());
}

#[tokio::test]
async fn suggestion_round_trip_commits_only_accepted_text() {
    let generator = MockContentGenerator::new()
        .with_response(GeneratorOp::Suggest, "Rocketeer")
        .with_response(GeneratorOp::Refine, "Rocketeer Labs");
    let world = World::new(generator);
    let id = world.create("Acme", "Rockets").await;
    let handle = world.open(id).await;

    handle.request_suggestion().await.unwrap();
    assert_eq!(handle.snapshot().current_suggestion_text, "Rocketeer");
    assert_eq!(
        handle.send_message("ignored").await.unwrap_err(),
        JourneyError::SuggestionPending
    );

    handle.refine_suggestion("make it sound bigger").await.unwrap();
    assert_eq!(handle.snapshot().current_suggestion_text, "Rocketeer Labs");

    handle.accept_suggestion("Rocketeer Labs").await.unwrap();
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.answers.get("idea_title"), Some("Rocketeer Labs"));
    assert_eq!(snapshot.stage, "ELEVATOR_PITCH");
    assert!(!snapshot.suggestion_open);

    let stored = world.repository.load(id).await.unwrap().unwrap();
    assert!(stored.messages.iter().all(|m| !m.is_suggestion));
}

#[tokio::test]
async fn failed_auto_stage_can_be_retried() {
    let generator = MockContentGenerator::new().failing_on_stage(Stage::MarketAnalysisOppThreats);
    let world = World::new(generator.clone());
    let id = world.create("Acme", "Rockets").await;
    let handle = world.open(id).await;

    // Walk up to the failing auto stage.
    let mut last_kind = OutcomeKind::Ok;
    while handle.snapshot().stage != "MARKET_ANALYSIS_OPP_THREATS" {
        let outcome = if handle.snapshot().is_ready_for_next_section {
            handle.proceed_to_next_section().await.unwrap()
        } else {
            handle.send_message("answer").await.unwrap()
        };
        last_kind = outcome.kind;
    }
    assert_eq!(last_kind, OutcomeKind::GenerationFailed);
    assert!(!handle.snapshot().answers.has_answer("marketAnalysis_oppThreats"));
    assert_eq!(
        world.repository.load(id).await.unwrap().unwrap().stage,
        "MARKET_ANALYSIS_OPP_THREATS"
    );

    generator.recover_stage(Stage::MarketAnalysisOppThreats);
    let outcome = handle.retry_auto_generation().await.unwrap();

    assert!(outcome.is_ok());
    let snapshot = handle.snapshot();
    assert!(snapshot.answers.has_answer("marketAnalysis_oppThreats"));
    assert_eq!(snapshot.stage, "MARKET_ANALYSIS_COMPETITOR_IDENTIFICATION");
}

#[tokio::test]
async fn restart_returns_to_first_question_with_only_seed_data() {
    let world = World::new(MockContentGenerator::new());
    let id = world.create("Acme", "Rockets").await;
    let handle = world.open(id).await;
    handle.send_message("Acme Rockets").await.unwrap();

    handle.restart_journey().await.unwrap();

    let stored = world.repository.load(id).await.unwrap().unwrap();
    assert_eq!(stored.stage, "IDEA_TITLE");
    assert_eq!(stored.startup_data.len(), 2);
    assert_eq!(stored.startup_data.project_name(), Some("Acme"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Jumping to any earlier stage lands exactly there; anything else is refused.
    #[test]
    fn jump_accepts_only_earlier_stages(from in 1usize..60, to in 1usize..60) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let world = World::new(MockContentGenerator::new());
            let id = world.create("Acme", "Rockets").await;
            let handle = world.open(id).await;

            // Walk forward `from` answers.
            for _ in 0..from {
                let snapshot = handle.snapshot();
                if snapshot.is_ready_for_next_section {
                    handle.proceed_to_next_section().await.unwrap();
                } else {
                    handle.send_message("answer").await.unwrap();
                }
            }
            let snapshot = handle.snapshot();
            if snapshot.is_ready_for_next_section {
                return Ok(());
            }
            let current: Stage = snapshot.stage.parse().unwrap();
            let target = stage_graph::all_stages().nth(to).unwrap();

            let result = handle.jump_to_stage(target).await;
            if stage_graph::is_before(target, current) && !target.is_sentinel() {
                prop_assert!(result.is_ok());
                let landed: Stage = handle.snapshot().stage.parse().unwrap();
                prop_assert_eq!(landed, target);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(handle.snapshot().stage, snapshot.stage);
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
