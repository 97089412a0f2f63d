//! AI adapters.
//!
//! ## Available Adapters
//!
//! - `AnthropicProvider` - Anthropic Claude models behind the AIProvider port
//! - `MockAIProvider` - Configurable provider mock for testing
//! - `AiContentGenerator` - ContentGenerator that prompts an AIProvider
//! - `MockContentGenerator` - Scripted ContentGenerator for tests and offline runs

mod ai_content_generator;
mod anthropic_provider;
mod mock_content_generator;
mod mock_provider;

pub use ai_content_generator::AiContentGenerator;
pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_content_generator::{GeneratorCall, GeneratorOp, MockContentGenerator};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
