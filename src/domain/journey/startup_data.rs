//! Answer Record - the accumulated blueprint keyed by data key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key holding the project name captured at creation.
pub const PROJECT_NAME_KEY: &str = "projectName";
/// Key holding the free-text idea captured at creation.
pub const INITIAL_IDEA_KEY: &str = "initialIdea";
/// Key read when substituting `{competitor_list}` into auto-stage prompts.
pub const COMPETITOR_LIST_KEY: &str = "marketAnalysis_competitor_list";

/// Sparse map from data key to an opaque string value.
///
/// Values may be plain text or serialized structured blobs; the journey
/// never looks inside them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StartupData(BTreeMap<String, String>);

impl StartupData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers present right after project creation or restart.
    pub fn seeded(project_name: impl Into<String>, initial_idea: impl Into<String>) -> Self {
        let mut data = Self::new();
        data.set(PROJECT_NAME_KEY, project_name);
        data.set(INITIAL_IDEA_KEY, initial_idea);
        data
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Overwrites any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// True when `key` holds a non-blank value.
    pub fn has_answer(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.get(PROJECT_NAME_KEY)
    }

    pub fn initial_idea(&self) -> Option<&str> {
        self.get(INITIAL_IDEA_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map (for serialization into prompts).
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl From<BTreeMap<String, String>> for StartupData {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for StartupData {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
