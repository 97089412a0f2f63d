//! Downloadable project export document.

use serde::{Deserialize, Serialize};

use super::message::ChatMessage;
use super::state::JourneyState;
use super::startup_data::StartupData;

pub const EXPORT_VERSION: &str = "1.0";

/// `{version, stage, data, messages}` as written to the export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectExport {
    pub version: String,
    pub stage: String,
    pub data: StartupData,
    pub messages: Vec<ChatMessage>,
}

impl ProjectExport {
    pub fn from_state(state: &JourneyState) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            stage: state.stage_id().to_string(),
            data: state.answers.clone(),
            messages: state.log.messages().to_vec(),
        }
    }

    /// `<project-name>-export.json`, lowercased with whitespace runs as dashes.
    pub fn file_name(&self) -> String {
        let name = self
            .data
            .project_name()
            .filter(|n| !n.is_empty())
            .unwrap_or("unnamed-project");
        let slug = name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("{}-export.json", slug)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
