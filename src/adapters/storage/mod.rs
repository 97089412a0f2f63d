//! Storage Adapters
//!
//! Implementations of the ProjectRepository port that need no database.
//!
//! ## Available Adapters
//!
//! - **FileProjectRepository** - One YAML document per project on disk
//! - **InMemoryProjectRepository** - Records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileProjectRepository, InMemoryProjectRepository};
//!
//! let repo = FileProjectRepository::new("./data/projects");
//! let repo = InMemoryProjectRepository::new();
//! ```

mod file_project_repository;
mod in_memory_project_repository;

pub use file_project_repository::FileProjectRepository;
pub use in_memory_project_repository::InMemoryProjectRepository;
