//! Stage Graph - pure, total queries over the stage table.
//!
//! Index comparison is the only ordering test used anywhere in the journey.

use super::stage::{Phase, Stage, StageKind, StageSpec, STAGE_TABLE};

/// All stages in interview order, sentinels included.
pub fn all_stages() -> impl Iterator<Item = Stage> {
    STAGE_TABLE.iter().map(|spec| spec.stage)
}

/// The full table, for callers that render it.
pub fn table() -> &'static [StageSpec] {
    STAGE_TABLE
}

/// Number of stages in the sequence (sentinels included).
pub fn len() -> usize {
    STAGE_TABLE.len()
}

pub fn index_of(stage: Stage) -> usize {
    stage as usize
}

/// Sequence successor, or `None` past `Complete`.
pub fn next(stage: Stage) -> Option<Stage> {
    STAGE_TABLE.get(index_of(stage) + 1).map(|spec| spec.stage)
}

pub fn previous(stage: Stage) -> Option<Stage> {
    index_of(stage)
        .checked_sub(1)
        .and_then(|i| STAGE_TABLE.get(i))
        .map(|spec| spec.stage)
}

pub fn classify(stage: Stage) -> StageKind {
    stage.spec().kind
}

/// Answer-record key a stage writes to. `None` only for the sentinels.
pub fn data_key_for(stage: Stage) -> Option<&'static str> {
    stage.spec().data_key
}

pub fn phase_of(stage: Stage) -> Option<Phase> {
    stage.spec().phase
}

/// Every stage writing to `key`; more than one entry means the key is aliased.
pub fn stages_sharing_key(key: &str) -> Vec<Stage> {
    STAGE_TABLE
        .iter()
        .filter(|spec| spec.data_key == Some(key))
        .map(|spec| spec.stage)
        .collect()
}

pub fn stages_in_phase(phase: Phase) -> Vec<Stage> {
    STAGE_TABLE
        .iter()
        .filter(|spec| spec.phase == Some(phase))
        .map(|spec| spec.stage)
        .collect()
}

/// The gate that closes `phase`.
pub fn summary_stage_of(phase: Phase) -> Option<Stage> {
    STAGE_TABLE
        .iter()
        .find(|spec| spec.phase == Some(phase) && spec.kind == StageKind::Summary)
        .map(|spec| spec.stage)
}

/// Where a fresh or restarted journey begins.
pub fn first_interactive_stage() -> Stage {
    STAGE_TABLE
        .iter()
        .find(|spec| !spec.stage.is_sentinel() && spec.kind == StageKind::Interactive)
        .map_or(Stage::IdeaTitle, |spec| spec.stage)
}

/// Interactive stages whose answer is produced by a structured-ideas
/// (image/visual concept) generation call instead of stored verbatim.
pub fn collects_structured_ideas(stage: Stage) -> bool {
    matches!(stage, Stage::BrandingLogo | Stage::BrandingVisualStyle)
}

/// True if `a` comes strictly before `b` in the sequence.
pub fn is_before(a: Stage, b: Stage) -> bool {
    index_of(a) < index_of(b)
}

/// Stages strictly after `stage`, in order.
pub fn stages_after(stage: Stage) -> impl Iterator<Item = Stage> {
    STAGE_TABLE[index_of(stage) + 1..].iter().map(|spec| spec.stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ─────────────────────────────────────────────────────────────────────
    // Table shape
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn every_topic_stage_has_a_data_key() {
        for stage in all_stages().filter(|s| !s.is_sentinel()) {
            assert!(data_key_for(stage).is_some(), "{} has no key", stage);
        }
        assert_eq!(data_key_for(Stage::Initial), None);
        assert_eq!(data_key_for(Stage::Complete), None);
    }

    #[test]
    fn every_phase_ends_with_exactly_one_summary() {
        for phase in Phase::all() {
            let stages = stages_in_phase(*phase);
            let summaries: Vec<_> = stages
                .iter()
                .filter(|s| classify(**s) == StageKind::Summary)
                .collect();
            assert_eq!(summaries.len(), 1, "phase {:?}", phase);
            assert_eq!(stages.last(), summaries.first().copied());
        }
    }

    #[test]
    fn phases_are_contiguous_and_ordered() {
        let phases: Vec<Phase> = all_stages().filter_map(phase_of).collect();
        for pair in phases.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn swot_sub_stages_alias_one_key() {
        let sharing = stages_sharing_key("marketAnalysis_swot");
        assert_eq!(
            sharing,
            vec![
                Stage::MarketAnalysisSwotStrengths,
                Stage::MarketAnalysisSwotWeaknesses,
                Stage::MarketAnalysisSwotOpportunities,
                Stage::MarketAnalysisSwotThreats,
            ]
        );
    }

    #[test]
    fn only_swot_key_is_aliased() {
        for spec in table().iter().filter(|s| !s.stage.is_sentinel()) {
            let key = spec.data_key.unwrap_or_default();
            if key != "marketAnalysis_swot" {
                assert_eq!(stages_sharing_key(key).len(), 1, "{} is aliased", key);
            }
        }
    }

    #[test]
    fn classification_matches_known_stages() {
        assert_eq!(classify(Stage::IdeaTitle), StageKind::Interactive);
        assert_eq!(classify(Stage::ExecutiveSummary), StageKind::Interactive);
        assert_eq!(classify(Stage::MarketAnalysisOppThreats), StageKind::AutoGenerated);
        assert_eq!(classify(Stage::OrganizationCompanySummary), StageKind::AutoGenerated);
        assert_eq!(classify(Stage::BrandingGuidelines), StageKind::Summary);
        assert_eq!(classify(Stage::FinalOutputsSummary), StageKind::Summary);
        assert_eq!(classify(Stage::Initial), StageKind::Interactive);
    }

    #[test]
    fn sixteen_stages_are_auto_generated() {
        let count = all_stages()
            .filter(|s| classify(*s) == StageKind::AutoGenerated)
            .count();
        assert_eq!(count, 16);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn next_walks_the_sequence() {
        assert_eq!(next(Stage::Initial), Some(Stage::IdeaTitle));
        assert_eq!(next(Stage::ValidationSummary), Some(Stage::BusinessGoalsTimeline));
        assert_eq!(next(Stage::FinalOutputsSummary), Some(Stage::Complete));
        assert_eq!(next(Stage::Complete), None);
    }

    #[test]
    fn previous_walks_backwards() {
        assert_eq!(previous(Stage::IdeaTitle), Some(Stage::Initial));
        assert_eq!(previous(Stage::Initial), None);
    }

    #[test]
    fn summary_stage_lookup() {
        assert_eq!(
            summary_stage_of(Phase::MarketAnalysis),
            Some(Stage::MarketAnalysisSummary)
        );
        assert_eq!(summary_stage_of(Phase::Branding), Some(Stage::BrandingGuidelines));
    }

    #[test]
    fn first_interactive_is_idea_title() {
        assert_eq!(first_interactive_stage(), Stage::IdeaTitle);
    }

    #[test]
    fn structured_ideas_stages_are_interactive() {
        for stage in all_stages().filter(|s| collects_structured_ideas(*s)) {
            assert_eq!(classify(stage), StageKind::Interactive);
        }
    }

    #[test]
    fn stages_after_complete_is_empty() {
        assert_eq!(stages_after(Stage::Complete).count(), 0);
        assert_eq!(stages_after(Stage::Initial).count(), len() - 1);
    }

    proptest! {
        #[test]
        fn next_then_previous_is_identity(index in 0usize..100) {
            let stage = table()[index].stage;
            let successor = next(stage).unwrap();
            prop_assert_eq!(previous(successor), Some(stage));
            prop_assert_eq!(index_of(successor), index + 1);
        }

        #[test]
        fn is_before_agrees_with_index(a in 0usize..101, b in 0usize..101) {
            let (sa, sb) = (table()[a].stage, table()[b].stage);
            prop_assert_eq!(is_before(sa, sb), a < b);
        }
    }
}
