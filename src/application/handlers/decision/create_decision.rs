//! CreateDecisionHandler - Command handler for creating decisions.
//!
//! Creates the Decision record first, then runs the generation
//! pipeline. Generation is best-effort relative to decision creation:
//! if it fails, the Decision stays persisted with zero timelines and
//! the error carries its id so the caller can still reach it.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::warn;

use crate::application::generation::{
    GenerationError, GenerationKind, GenerationRequest, TimelineGenerator,
};
use crate::domain::decision::{Decision, Timeline};
use crate::domain::foundation::{DecisionId, DomainError, UserId, ValidationError};
use crate::domain::generation::prompt::MAX_PRIOR_DECISIONS;
use crate::ports::{DecisionRepository, ProfileReader, TimelineRepository};

/// Command to create a new decision.
#[derive(Debug, Clone)]
pub struct CreateDecisionCommand {
    /// User making the decision.
    pub user_id: UserId,
    /// The decision text.
    pub content: String,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional free-form context map.
    pub context: Option<Map<String, Value>>,
}

/// Result of successful decision creation.
#[derive(Debug, Clone)]
pub struct CreateDecisionResult {
    /// The created decision.
    pub decision: Decision,
    /// The generated timelines, in generation order.
    pub timelines: Vec<Timeline>,
}

/// Error type for decision creation.
#[derive(Debug)]
pub enum CreateDecisionError {
    /// User does not exist.
    UserNotFound(UserId),
    /// Invalid command input.
    Validation(ValidationError),
    /// The decision was persisted but timeline generation failed.
    GenerationFailed {
        /// Id of the decision that remains queryable with zero timelines.
        decision_id: DecisionId,
        source: GenerationError,
    },
    /// Store failure.
    Storage(DomainError),
}

impl std::fmt::Display for CreateDecisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateDecisionError::UserNotFound(id) => write!(f, "User not found: {}", id),
            CreateDecisionError::Validation(err) => write!(f, "{}", err),
            CreateDecisionError::GenerationFailed { decision_id, source } => write!(
                f,
                "Timeline generation failed for decision {}: {}",
                decision_id, source
            ),
            CreateDecisionError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CreateDecisionError {}

impl From<ValidationError> for CreateDecisionError {
    fn from(err: ValidationError) -> Self {
        CreateDecisionError::Validation(err)
    }
}

impl From<DomainError> for CreateDecisionError {
    fn from(err: DomainError) -> Self {
        CreateDecisionError::Storage(err)
    }
}

/// Handler for creating decisions.
pub struct CreateDecisionHandler {
    profile_reader: Arc<dyn ProfileReader>,
    decision_repository: Arc<dyn DecisionRepository>,
    timeline_repository: Arc<dyn TimelineRepository>,
    generator: Arc<TimelineGenerator>,
}

impl CreateDecisionHandler {
    pub fn new(
        profile_reader: Arc<dyn ProfileReader>,
        decision_repository: Arc<dyn DecisionRepository>,
        timeline_repository: Arc<dyn TimelineRepository>,
        generator: Arc<TimelineGenerator>,
    ) -> Self {
        Self {
            profile_reader,
            decision_repository,
            timeline_repository,
            generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateDecisionCommand,
    ) -> Result<CreateDecisionResult, CreateDecisionError> {
        // 1. Load the profile snapshot before any write
        let profile = self
            .profile_reader
            .get_profile(&cmd.user_id)
            .await?
            .ok_or_else(|| CreateDecisionError::UserNotFound(cmd.user_id.clone()))?;

        // 2. Load recent history for prompt context, newest first
        let prior_decisions = self
            .decision_repository
            .find_recent_by_user(&cmd.user_id, MAX_PRIOR_DECISIONS)
            .await?;

        // 3. Persist the decision; it survives a failed generation
        let decision = Decision::new(
            cmd.user_id.clone(),
            cmd.content.clone(),
            cmd.category,
            cmd.context,
        )?;
        self.decision_repository.save(&decision).await?;

        // 4. Run the generation pipeline
        let request = GenerationRequest {
            decision_text: cmd.content,
            profile,
            prior_decisions,
            kind: GenerationKind::FirstGeneration,
        };
        let timelines = match self.generator.generate(decision.id(), &request).await {
            Ok(timelines) => timelines,
            Err(source) => {
                warn!(decision_id = %decision.id(), error = %source, "timeline generation failed");
                return Err(CreateDecisionError::GenerationFailed {
                    decision_id: decision.id(),
                    source,
                });
            }
        };

        // 5. Persist each timeline with its events as one unit
        for timeline in &timelines {
            self.timeline_repository
                .save(timeline)
                .await
                .map_err(|e| e.with_detail("decision_id", decision.id().to_string()))?;
        }

        Ok(CreateDecisionResult {
            decision,
            timelines,
        })
    }
}
