//! Application layer - the generation pipeline service and the command
//! handlers that orchestrate it against the ports.

pub mod generation;
pub mod handlers;

pub use generation::{
    GenerationError, GenerationKind, GenerationRequest, TierFailure, TimelineGenerator,
};
