//! Application handlers.
//!
//! Command handlers that validate input and coordinate ports.

mod create_project;
mod open_journey;

pub use create_project::{
    CreateProjectCommand, CreateProjectError, CreateProjectHandler, CreateProjectResult,
};
pub use open_journey::{
    OpenJourneyCommand, OpenJourneyError, OpenJourneyHandler, OpenJourneyResult,
};
