//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProjectRepository` - Project records with JSONB answers and log

mod project_repository;

pub use project_repository::PostgresProjectRepository;
