//! GetDecisionHandler - Fetch one decision with its timelines.

use std::sync::Arc;

use crate::domain::decision::{Decision, Timeline};
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::ports::{DecisionRepository, TimelineRepository};

/// Query for a single decision.
#[derive(Debug, Clone)]
pub struct GetDecisionQuery {
    pub decision_id: DecisionId,
    pub user_id: UserId,
}

/// A decision with its full timeline set.
#[derive(Debug, Clone)]
pub struct GetDecisionResult {
    pub decision: Decision,
    /// Timelines in their persisted order; events within each timeline
    /// are in ascending chronological order.
    pub timelines: Vec<Timeline>,
}

/// Error type for decision reads.
#[derive(Debug)]
pub enum GetDecisionError {
    /// Decision absent or owned by a different user.
    DecisionNotFound(DecisionId),
    /// Store failure.
    Storage(DomainError),
}

impl std::fmt::Display for GetDecisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetDecisionError::DecisionNotFound(id) => write!(f, "Decision not found: {}", id),
            GetDecisionError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetDecisionError {}

impl From<DomainError> for GetDecisionError {
    fn from(err: DomainError) -> Self {
        GetDecisionError::Storage(err)
    }
}

/// Handler for reading a single decision.
pub struct GetDecisionHandler {
    decision_repository: Arc<dyn DecisionRepository>,
    timeline_repository: Arc<dyn TimelineRepository>,
}

impl GetDecisionHandler {
    pub fn new(
        decision_repository: Arc<dyn DecisionRepository>,
        timeline_repository: Arc<dyn TimelineRepository>,
    ) -> Self {
        Self {
            decision_repository,
            timeline_repository,
        }
    }

    pub async fn handle(
        &self,
        query: GetDecisionQuery,
    ) -> Result<GetDecisionResult, GetDecisionError> {
        let decision = self
            .decision_repository
            .find_by_id_for_user(&query.decision_id, &query.user_id)
            .await?
            .ok_or(GetDecisionError::DecisionNotFound(query.decision_id))?;

        let timelines = self
            .timeline_repository
            .find_by_decision(&decision.id())
            .await?;

        Ok(GetDecisionResult {
            decision,
            timelines,
        })
    }
}
