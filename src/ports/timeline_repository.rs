//! Timeline Repository Port.

use async_trait::async_trait;

use crate::domain::decision::Timeline;
use crate::domain::foundation::{DecisionId, DomainError, TimelineId};

/// Port for persisting and querying Timeline aggregates.
///
/// A timeline and its events are stored as a single unit: a persisted
/// timeline must never be observable with a partial event list.
/// Timelines are write-once.
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    /// Persists a timeline together with all of its events.
    async fn save(&self, timeline: &Timeline) -> Result<(), DomainError>;

    /// Finds a timeline by id.
    async fn find_by_id(&self, id: &TimelineId) -> Result<Option<Timeline>, DomainError>;

    /// Finds a timeline by id, scoped to its owning decision.
    async fn find_by_id_for_decision(
        &self,
        id: &TimelineId,
        decision_id: &DecisionId,
    ) -> Result<Option<Timeline>, DomainError>;

    /// Returns all timelines for a decision in insertion order.
    async fn find_by_decision(
        &self,
        decision_id: &DecisionId,
    ) -> Result<Vec<Timeline>, DomainError>;
}
