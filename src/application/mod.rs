//! Application layer - Handlers and journey orchestration.
//!
//! This layer coordinates domain operations with the ports.

pub mod handlers;
pub mod journey;

pub use handlers::{
    CreateProjectCommand, CreateProjectError, CreateProjectHandler, CreateProjectResult,
    OpenJourneyCommand, OpenJourneyError, OpenJourneyHandler, OpenJourneyResult,
};
pub use journey::{
    JourneyController, JourneyError, JourneyEvent, JourneyHandle, JourneyOutcome,
    JourneyRegistry, JourneyService, JourneySnapshot, OutcomeKind,
};
