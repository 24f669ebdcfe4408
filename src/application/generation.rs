//! Timeline generation service.
//!
//! Owns the ordered model-tier list and runs the full pipeline:
//! compile prompt -> invoke with tier fallback -> extract & validate ->
//! normalize. Higher-capability tiers have tighter availability and
//! quota, so the invoker degrades through the list instead of
//! hard-failing when the best tier is saturated.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::decision::{DecisionSummary, Timeline};
use crate::domain::foundation::DecisionId;
use crate::domain::generation::{
    compile, context::render_profile_context, extract, normalize, ExtractionError, PromptRequest,
};
use crate::domain::user::UserProfile;
use crate::ports::{GeneratorError, TextGenerator};

/// One failed tier attempt, recorded while falling through the chain.
#[derive(Debug, Clone)]
pub struct TierFailure {
    /// Model tier that failed.
    pub model: String,
    /// The underlying generator error.
    pub error: GeneratorError,
}

impl fmt::Display for TierFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.model, self.error)
    }
}

/// Errors produced by the generation pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// No model tier is configured; no attempt was made.
    #[error("text-generation capability is not configured")]
    NotConfigured,

    /// Every configured tier failed; carries every recorded failure,
    /// the last of which is the proximate cause.
    #[error("all model tiers failed (last: {})", .attempts.last().map(|a| a.to_string()).unwrap_or_default())]
    Unavailable { attempts: Vec<TierFailure> },

    /// The backend responded but its output could not be coerced into
    /// the timeline-set schema. Not retried against another tier: this
    /// is a data-shape problem, not an availability problem.
    #[error("malformed generation output: {0}")]
    Malformed(#[from] ExtractionError),
}

/// What kind of generation is being requested.
#[derive(Debug, Clone)]
pub enum GenerationKind {
    /// First generation for a new root decision.
    FirstGeneration,
    /// Injection of a follow-up decision; carries the original
    /// decision's content for the causal-frame rewrite.
    Injection { parent_content: String },
}

/// A fully specified generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The current decision text.
    pub decision_text: String,
    /// Profile snapshot taken at generation time.
    pub profile: UserProfile,
    /// Prior decisions, newest first.
    pub prior_decisions: Vec<DecisionSummary>,
    /// First generation or injection.
    pub kind: GenerationKind,
}

/// The timeline generation pipeline.
///
/// Holds the model tiers in priority order, highest capability first.
/// Constructed once and shared; handlers receive it by `Arc`.
pub struct TimelineGenerator {
    tiers: Vec<Arc<dyn TextGenerator>>,
}

impl TimelineGenerator {
    /// Creates a generator over the given tier chain.
    pub fn new(tiers: Vec<Arc<dyn TextGenerator>>) -> Self {
        Self { tiers }
    }

    /// Returns the configured tier models, in priority order.
    pub fn models(&self) -> Vec<&str> {
        self.tiers.iter().map(|t| t.model()).collect()
    }

    /// Runs the full pipeline and returns timelines owned by
    /// `decision_id`, ready to persist.
    pub async fn generate(
        &self,
        decision_id: DecisionId,
        request: &GenerationRequest,
    ) -> Result<Vec<Timeline>, GenerationError> {
        let profile_context = render_profile_context(&request.profile);
        let parent_content = match &request.kind {
            GenerationKind::FirstGeneration => None,
            GenerationKind::Injection { parent_content } => Some(parent_content.as_str()),
        };

        let prompt = compile(&PromptRequest {
            decision_text: &request.decision_text,
            profile_context: &profile_context,
            prior_decisions: &request.prior_decisions,
            parent_content,
        });

        let raw = self.invoke(&prompt).await?;
        let result = extract(&raw)?;
        Ok(normalize(result, decision_id))
    }

    /// Attempts each tier in order with the same prompt; first success
    /// wins. A failed tier is never retried, and no partial output from
    /// a failed tier is mixed into the result.
    async fn invoke(
        &self,
        prompt: &crate::domain::generation::GenerationPrompt,
    ) -> Result<String, GenerationError> {
        if self.tiers.is_empty() {
            return Err(GenerationError::NotConfigured);
        }

        let mut attempts = Vec::new();

        for tier in &self.tiers {
            info!(model = tier.model(), "attempting model tier");
            match tier.generate(prompt).await {
                Ok(text) => {
                    info!(model = tier.model(), "model tier succeeded");
                    return Ok(text);
                }
                Err(error) => {
                    warn!(model = tier.model(), %error, "model tier failed");
                    attempts.push(TierFailure {
                        model: tier.model().to_string(),
                        error,
                    });
                }
            }
        }

        Err(GenerationError::Unavailable { attempts })
    }
}
