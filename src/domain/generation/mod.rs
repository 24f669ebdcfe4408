//! Generation module - the pure stages of the timeline pipeline.
//!
//! Stages, in pipeline order:
//!
//! 1. [`context`] renders the user profile into prompt context
//! 2. [`prompt`] compiles the full prompt and sampling configuration
//! 3. [`extractor`] recovers and validates JSON from raw model output
//! 4. [`normalizer`] maps a validated result into persistable timelines
//!
//! Invoking the text-generation capability itself (with tier fallback)
//! lives in the application layer; every stage here is a pure function.

pub mod context;
pub mod extractor;
pub mod normalizer;
pub mod prompt;

pub use extractor::{extract, ExtractionError, GeneratedEvent, GeneratedTimeline, GenerationResult};
pub use normalizer::normalize;
pub use prompt::{compile, GenerationPrompt, PromptRequest, SamplingConfig};
