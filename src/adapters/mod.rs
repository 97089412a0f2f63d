//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Anthropic provider, prompt-building content generator and mocks
//! - `http` - axum REST surface
//! - `postgres` - PostgreSQL project repository
//! - `prompts` - Embedded stage question catalog
//! - `storage` - In-memory and YAML file project repositories

pub mod ai;
pub mod http;
pub mod postgres;
pub mod prompts;
pub mod storage;
