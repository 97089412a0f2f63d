//! Journey module - the stage graph and the data the interview accumulates.
//!
//! The journey walks a project through a fixed sequence of stages grouped into
//! phases. Each stage writes one answer into [`StartupData`]; the chat
//! transcript lives in a [`ConversationLog`].

mod export;
mod message;
mod project;
mod stage;
pub mod stage_graph;
mod startup_data;
mod state;

pub use export::{ProjectExport, EXPORT_VERSION};
pub use message::{ChatMessage, ConversationLog, Sender, Source};
pub use project::ProjectRecord;
pub use stage::{Phase, Stage, StageKind, StageSpec};
pub use startup_data::{StartupData, COMPETITOR_LIST_KEY, INITIAL_IDEA_KEY, PROJECT_NAME_KEY};
pub use state::{JourneyState, JourneyStatus};
