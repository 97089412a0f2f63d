//! HTTP adapter for the journey.
//!
//! Exposes project creation and every journey operation as REST endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{JourneyApiError, JourneyAppState};
pub use routes::journey_router;
