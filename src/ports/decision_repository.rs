//! Decision Repository Port.

use async_trait::async_trait;

use crate::domain::decision::{Decision, DecisionSummary};
use crate::domain::foundation::{DecisionId, DomainError, UserId};

/// Port for persisting and querying Decision aggregates.
///
/// Decisions are write-once; there is no update operation.
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Persists a new decision.
    async fn save(&self, decision: &Decision) -> Result<(), DomainError>;

    /// Finds a decision by id, scoped to its owner.
    ///
    /// Returns None both when the decision does not exist and when it
    /// is owned by a different user, so callers cannot distinguish the
    /// two cases.
    async fn find_by_id_for_user(
        &self,
        id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Decision>, DomainError>;

    /// Returns summaries of the most recent decisions for a user,
    /// newest first, at most `limit`.
    async fn find_recent_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<DecisionSummary>, DomainError>;

    /// Returns all decisions for a user, newest first.
    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Decision>, DomainError>;
}
