//! ListDecisionsHandler - List a user's decisions with timeline summaries.

use std::sync::Arc;

use crate::domain::decision::Decision;
use crate::domain::foundation::{DomainError, TimelineId, UserId};
use crate::ports::{DecisionRepository, TimelineRepository};

/// Query for a user's decision history.
#[derive(Debug, Clone)]
pub struct ListDecisionsQuery {
    pub user_id: UserId,
}

/// Lightweight projection of a timeline for list views.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSummary {
    pub id: TimelineId,
    pub title: String,
    pub probability: f64,
}

/// One decision with its timeline summaries.
#[derive(Debug, Clone)]
pub struct DecisionOverview {
    pub decision: Decision,
    pub timelines: Vec<TimelineSummary>,
}

/// Error type for decision listing.
#[derive(Debug)]
pub enum ListDecisionsError {
    /// Store failure.
    Storage(DomainError),
}

impl std::fmt::Display for ListDecisionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListDecisionsError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ListDecisionsError {}

impl From<DomainError> for ListDecisionsError {
    fn from(err: DomainError) -> Self {
        ListDecisionsError::Storage(err)
    }
}

/// Handler for listing decisions.
pub struct ListDecisionsHandler {
    decision_repository: Arc<dyn DecisionRepository>,
    timeline_repository: Arc<dyn TimelineRepository>,
}

impl ListDecisionsHandler {
    pub fn new(
        decision_repository: Arc<dyn DecisionRepository>,
        timeline_repository: Arc<dyn TimelineRepository>,
    ) -> Self {
        Self {
            decision_repository,
            timeline_repository,
        }
    }

    /// Returns the user's decisions, newest first, each with its
    /// timeline summaries.
    pub async fn handle(
        &self,
        query: ListDecisionsQuery,
    ) -> Result<Vec<DecisionOverview>, ListDecisionsError> {
        let decisions = self
            .decision_repository
            .find_all_by_user(&query.user_id)
            .await?;

        let mut overviews = Vec::with_capacity(decisions.len());
        for decision in decisions {
            let timelines = self
                .timeline_repository
                .find_by_decision(&decision.id())
                .await?
                .iter()
                .map(|t| TimelineSummary {
                    id: t.id(),
                    title: t.title().to_string(),
                    probability: t.probability(),
                })
                .collect();

            overviews.push(DecisionOverview {
                decision,
                timelines,
            });
        }

        Ok(overviews)
    }
}
