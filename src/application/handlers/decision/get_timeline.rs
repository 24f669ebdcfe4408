//! GetTimelineHandler - Fetch one timeline with its events.

use std::sync::Arc;

use crate::domain::decision::{Decision, Timeline};
use crate::domain::foundation::{DomainError, TimelineId, UserId};
use crate::ports::{DecisionRepository, TimelineRepository};

/// Query for a single timeline.
#[derive(Debug, Clone)]
pub struct GetTimelineQuery {
    pub timeline_id: TimelineId,
    pub user_id: UserId,
}

/// A timeline with its owning decision.
#[derive(Debug, Clone)]
pub struct GetTimelineResult {
    pub timeline: Timeline,
    pub decision: Decision,
}

/// Error type for timeline reads.
#[derive(Debug)]
pub enum GetTimelineError {
    /// Timeline absent, or its decision owned by a different user.
    /// Ownership mismatch deliberately reports not-found.
    TimelineNotFound(TimelineId),
    /// Store failure.
    Storage(DomainError),
}

impl std::fmt::Display for GetTimelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetTimelineError::TimelineNotFound(id) => write!(f, "Timeline not found: {}", id),
            GetTimelineError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetTimelineError {}

impl From<DomainError> for GetTimelineError {
    fn from(err: DomainError) -> Self {
        GetTimelineError::Storage(err)
    }
}

/// Handler for reading a single timeline.
pub struct GetTimelineHandler {
    decision_repository: Arc<dyn DecisionRepository>,
    timeline_repository: Arc<dyn TimelineRepository>,
}

impl GetTimelineHandler {
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
        query: GetTimelineQuery,
    ) -> Result<GetTimelineResult, GetTimelineError> {
        let timeline = self
            .timeline_repository
            .find_by_id(&query.timeline_id)
            .await?
            .ok_or(GetTimelineError::TimelineNotFound(query.timeline_id))?;

        let decision = self
            .decision_repository
            .find_by_id_for_user(&timeline.decision_id(), &query.user_id)
            .await?
            .ok_or(GetTimelineError::TimelineNotFound(query.timeline_id))?;

        Ok(GetTimelineResult { timeline, decision })
    }
}
