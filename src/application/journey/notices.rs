//! System and fallback texts appended to the conversation log.

use crate::domain::journey::{Stage, StartupData, COMPETITOR_LIST_KEY};

const COMPETITOR_PLACEHOLDER: &str = "{competitor_list}";
const DEFAULT_COMPETITORS: &str = "your competitors";

pub fn starting_journey(project_name: &str) -> String {
    format!("Starting journey for \"{}\"", project_name)
}

pub fn restarting_project(initial_idea: &str) -> String {
    format!("Restarting project with the idea: {}", initial_idea)
}

pub fn generating_summary(summary_stage: Stage) -> String {
    format!("Generating summary for {}...", summary_stage.section_prefix())
}

pub fn summary_complete(summary_stage: Stage) -> String {
    format!("{} summary complete.", summary_stage.section_prefix())
}

pub const SUMMARY_FAILED: &str =
    "Sorry, an error occurred while generating the summary. Please try again.";
pub const AUTO_GENERATION_FAILED: &str = "Sorry, an error occurred. Please try again.";
pub const MESSAGE_FAILED: &str = "Sorry, an error occurred while processing your message.";
pub const SUGGESTION_FAILED: &str = "Sorry, I couldn't generate a suggestion right now.";
pub const SUGGESTION_REFINE_FAILED: &str = "Sorry, an error occurred while refining.";

pub fn saving_changes(title: &str) -> String {
    format!("Saving changes to {}...", title)
}

pub const CHANGES_SAVED: &str = "Your changes have been saved.";

pub fn refining_stage(title: &str) -> String {
    format!("Refining \"{}\" based on your command...", title)
}

pub const STAGE_REFINED: &str = "The section was refined and saved.";
pub const STAGE_REFINE_FAILED: &str = "Sorry, an error occurred while refining this section.";

/// Fills `{competitor_list}` from the answers collected so far.
pub fn substitute_competitors(question: &str, answers: &StartupData) -> String {
    if !question.contains(COMPETITOR_PLACEHOLDER) {
        return question.to_string();
    }
    let competitors = answers
        .get(COMPETITOR_LIST_KEY)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_COMPETITORS);
    question.replace(COMPETITOR_PLACEHOLDER, competitors)
}
