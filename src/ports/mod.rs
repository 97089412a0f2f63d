//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the journey and the outside world. Adapters implement these ports.
//!
//! - `ContentGenerator` - the five generation operations used by the journey
//! - `AIProvider` - raw LLM completions underneath a generator
//! - `ProjectRepository` - load/save of project records
//! - `PromptCatalog` - localized stage questions

mod ai_provider;
mod content_generator;
mod project_repository;
mod prompt_catalog;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, RequestMetadata, TokenUsage,
};
pub use content_generator::{ContentGenerator, GenerationError, StageGeneration, StructuredIdeas};
pub use project_repository::{JourneySaveRequest, ProjectRepository};
pub use prompt_catalog::PromptCatalog;
