//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, locale, timestamps, errors)
//! - `journey` - Stage graph, answer record, conversation log and journey state

pub mod foundation;
pub mod journey;
