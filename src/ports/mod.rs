//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod decision_repository;
mod profile_reader;
mod text_generator;
mod timeline_repository;

pub use decision_repository::DecisionRepository;
pub use profile_reader::ProfileReader;
pub use text_generator::{GeneratorError, TextGenerator};
pub use timeline_repository::TimelineRepository;
