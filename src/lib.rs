//! Startup Blueprint - guided startup planning journey
//!
//! This crate walks a founder through a fixed sequence of interview stages,
//! asking questions, generating sections with an LLM and assembling the
//! answers into a complete startup blueprint.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
