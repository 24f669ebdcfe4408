//! In-Memory Timeline Store Adapter

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::decision::Timeline;
use crate::domain::foundation::{DecisionId, DomainError, TimelineId};
use crate::ports::TimelineRepository;

/// In-memory timeline storage
///
/// Timelines are grouped under their decision and kept in insertion
/// order, so repeated reads of a decision return identical sets in
/// identical order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimelineStore {
    by_decision: Arc<RwLock<HashMap<DecisionId, Vec<Timeline>>>>,
}

impl InMemoryTimelineStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored timelines
    pub async fn count(&self) -> usize {
        self.by_decision.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl TimelineRepository for InMemoryTimelineStore {
    async fn save(&self, timeline: &Timeline) -> Result<(), DomainError> {
        self.by_decision
            .write()
            .await
            .entry(timeline.decision_id())
            .or_default()
            .push(timeline.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TimelineId) -> Result<Option<Timeline>, DomainError> {
        Ok(self
            .by_decision
            .read()
            .await
            .values()
            .flatten()
            .find(|t| t.id() == *id)
            .cloned())
    }

    async fn find_by_id_for_decision(
        &self,
        id: &TimelineId,
        decision_id: &DecisionId,
    ) -> Result<Option<Timeline>, DomainError> {
        Ok(self
            .by_decision
            .read()
            .await
            .get(decision_id)
            .and_then(|timelines| timelines.iter().find(|t| t.id() == *id))
            .cloned())
    }

    async fn find_by_decision(
        &self,
        decision_id: &DecisionId,
    ) -> Result<Vec<Timeline>, DomainError> {
        Ok(self
            .by_decision
            .read()
            .await
            .get(decision_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{Impact, TimelineEvent, TimelineMetric, TimelineMetrics, Trend};

    fn metrics() -> TimelineMetrics {
        let metric = TimelineMetric {
            score: 50,
            trend: Trend::Stable,
        };
        TimelineMetrics {
            emotional: metric,
            financial: metric,
            career: metric,
            relationships: metric,
            risk: metric,
        }
    }

    fn timeline(decision_id: DecisionId, title: &str) -> Timeline {
        Timeline::new(
            decision_id,
            title,
            "summary",
            50.0,
            metrics(),
            vec![],
            vec![],
            vec![TimelineEvent::new(0, "3 months", "event", Impact::Neutral)],
        )
    }

    #[tokio::test]
    async fn preserves_insertion_order_across_reads() {
        let store = InMemoryTimelineStore::new();
        let decision_id = DecisionId::new();

        for title in ["first", "second", "third"] {
            store.save(&timeline(decision_id, title)).await.unwrap();
        }

        let read1 = store.find_by_decision(&decision_id).await.unwrap();
        let read2 = store.find_by_decision(&decision_id).await.unwrap();

        let titles: Vec<&str> = read1.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
        assert_eq!(read1, read2);
    }

    #[tokio::test]
    async fn decision_scoped_lookup_misses_other_decisions() {
        let store = InMemoryTimelineStore::new();
        let decision_a = DecisionId::new();
        let decision_b = DecisionId::new();

        let saved = timeline(decision_a, "only in a");
        store.save(&saved).await.unwrap();

        assert!(store
            .find_by_id_for_decision(&saved.id(), &decision_a)
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_id_for_decision(&saved.id(), &decision_b)
            .await
            .unwrap()
            .is_none());
        assert!(store.find_by_id(&saved.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_decision_has_no_timelines() {
        let store = InMemoryTimelineStore::new();
        let timelines = store.find_by_decision(&DecisionId::new()).await.unwrap();
        assert!(timelines.is_empty());
    }
}
