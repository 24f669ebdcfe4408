//! Text Generator Port - one model tier of the text-generation capability.
//!
//! Each implementation is bound to a single named model tier. The
//! fallback invoker composes several handles in priority order; this
//! contract deliberately has no retry semantics of its own.

use async_trait::async_trait;

use crate::domain::generation::GenerationPrompt;

/// Port for one tier of the text-generation capability.
///
/// Given a prompt and sampling configuration, produce text; fallible.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a raw text completion for the prompt.
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, GeneratorError>;

    /// The model tier identifier this handle is bound to.
    fn model(&self) -> &str;
}

/// Text generation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeneratorError {
    /// Rate limited or out of quota at the backend.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Backend is unavailable.
    #[error("backend unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the request as invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// The backend answered but the completion was empty.
    #[error("empty completion")]
    EmptyCompletion,
}

impl GeneratorError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}
