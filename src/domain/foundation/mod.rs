//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the startup blueprint domain.

mod errors;
mod ids;
mod locale;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{MessageId, ProjectId};
pub use locale::Locale;
pub use timestamp::Timestamp;
