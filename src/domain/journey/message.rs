//! Conversation log - append-only ordered chat entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp};

/// Who authored a chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
    System,
}

/// A grounding source attached to generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

impl Source {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}

/// One chat entry. Field names follow the persisted camelCase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_suggestion: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    /// Base64 payloads or URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default)]
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            text: text.into(),
            is_suggestion: false,
            sources: Vec::new(),
            images: Vec::new(),
            timestamp: Timestamp::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Sender::System, text)
    }

    /// AI entry mirroring the held suggestion; purged on any transition.
    pub fn suggestion(text: impl Into<String>) -> Self {
        Self {
            is_suggestion: true,
            ..Self::ai(text)
        }
    }

    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

/// Ordered message sequence. Entries are only ever appended, except that
/// pending suggestion entries are dropped as a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationLog(Vec<ChatMessage>);

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.0.push(message);
    }

    /// Removes every `is_suggestion` entry; returns how many were dropped.
    pub fn strip_suggestions(&mut self) -> usize {
        let before = self.0.len();
        self.0.retain(|m| !m.is_suggestion);
        before - self.0.len()
    }

    pub fn has_pending_suggestion(&self) -> bool {
        self.0.iter().any(|m| m.is_suggestion)
    }

    /// Entries other than pending suggestions.
    pub fn committed(&self) -> impl Iterator<Item = &ChatMessage> {
        self.0.iter().filter(|m| !m.is_suggestion)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.0
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<ChatMessage> {
        self.0
    }
}

impl From<Vec<ChatMessage>> for ConversationLog {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_suggestions_keeps_committed_order() {
        let mut log = ConversationLog::new();
        log.push(ChatMessage::ai("Q1"));
        log.push(ChatMessage::suggestion("maybe this"));
        log.push(ChatMessage::user("A1"));
        log.push(ChatMessage::suggestion("or that"));

        assert!(log.has_pending_suggestion());
        assert_eq!(log.strip_suggestions(), 2);
        assert!(!log.has_pending_suggestion());

        let texts: Vec<_> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Q1", "A1"]);
    }

    #[test]
    fn serializes_camel_case_and_omits_defaults() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "user");
        assert!(json.get("isSuggestion").is_none());
        assert!(json.get("sources").is_none());

        let json = serde_json::to_value(ChatMessage::suggestion("s")).unwrap();
        assert_eq!(json["isSuggestion"], true);
        assert_eq!(json["sender"], "ai");
    }

    #[test]
    fn deserializes_records_without_optional_fields() {
        let raw = serde_json::json!({
            "id": "2f1c1d2e-8f7b-4f39-9a0e-5a4d7c1b9e01",
            "sender": "system",
            "text": "Starting"
        });
        let msg: ChatMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(msg.sender, Sender::System);
        assert!(!msg.is_suggestion);
        assert!(msg.images.is_empty());
    }

    #[test]
    fn sources_round_trip() {
        let msg = ChatMessage::ai("market data")
            .with_sources(vec![Source::new("https://example.com", "Example")]);
        let json = serde_json::to_string(&msg).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sources, msg.sources);
    }
}
