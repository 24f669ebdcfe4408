//! In-Memory Decision Store Adapter

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::decision::{Decision, DecisionSummary};
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::ports::DecisionRepository;

/// In-memory decision storage
///
/// Keeps decisions in insertion order; recency queries sort by
/// creation timestamp, newest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDecisionStore {
    decisions: Arc<RwLock<Vec<Decision>>>,
}

impl InMemoryDecisionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored decisions
    pub async fn count(&self) -> usize {
        self.decisions.read().await.len()
    }
}

#[async_trait]
impl DecisionRepository for InMemoryDecisionStore {
    async fn save(&self, decision: &Decision) -> Result<(), DomainError> {
        self.decisions.write().await.push(decision.clone());
        Ok(())
    }

    async fn find_by_id_for_user(
        &self,
        id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Decision>, DomainError> {
        Ok(self
            .decisions
            .read()
            .await
            .iter()
            .find(|d| d.id() == *id && d.user_id() == user_id)
            .cloned())
    }

    async fn find_recent_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<DecisionSummary>, DomainError> {
        let decisions = self.decisions.read().await;
        let mut owned: Vec<&Decision> =
            decisions.iter().filter(|d| d.user_id() == user_id).collect();
        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(owned.iter().take(limit).map(|d| d.summary()).collect())
    }

    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Decision>, DomainError> {
        let decisions = self.decisions.read().await;
        let mut owned: Vec<Decision> = decisions
            .iter()
            .filter(|d| d.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(owned)
    }
}
