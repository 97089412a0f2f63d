//! Journey orchestration - the controller, its actor, and open journeys.

mod controller;
mod notices;
mod outcome;
mod registry;
mod service;
mod snapshot;

pub use controller::{JourneyController, StateObserver};
pub use outcome::{JourneyError, JourneyEvent, JourneyOutcome, OutcomeKind};
pub use registry::JourneyRegistry;
pub use service::{JourneyHandle, JourneyService};
pub use snapshot::JourneySnapshot;
