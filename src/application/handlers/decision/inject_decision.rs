//! InjectDecisionHandler - Branch a follow-up decision off a timeline.
//!
//! Injection creates a child Decision under the original one and
//! regenerates timelines conditioned on continuity with the branched
//! timeline's decision. Only one hop of prior context is carried: the
//! original decision itself, never its own ancestor chain.

use std::sync::Arc;

use tracing::warn;

use crate::application::generation::{
    GenerationError, GenerationKind, GenerationRequest, TimelineGenerator,
};
use crate::domain::decision::{Decision, Timeline};
use crate::domain::foundation::{DecisionId, DomainError, TimelineId, UserId, ValidationError};
use crate::ports::{DecisionRepository, ProfileReader, TimelineRepository};

/// Command to inject a follow-up decision into a timeline.
#[derive(Debug, Clone)]
pub struct InjectDecisionCommand {
    /// The decision being branched from.
    pub decision_id: DecisionId,
    /// The timeline being branched from; must belong to `decision_id`.
    pub timeline_id: TimelineId,
    /// The follow-up decision text.
    pub content: String,
    /// User making the injection; must own the decision.
    pub user_id: UserId,
}

/// Result of a successful injection.
#[derive(Debug, Clone)]
pub struct InjectDecisionResult {
    /// The child decision.
    pub decision: Decision,
    /// The timelines generated under the child decision.
    pub timelines: Vec<Timeline>,
    /// The original decision.
    pub parent_decision_id: DecisionId,
    /// The timeline that was branched from.
    pub parent_timeline_id: TimelineId,
}

/// Error type for decision injection.
#[derive(Debug)]
pub enum InjectDecisionError {
    /// Decision absent or owned by a different user. Ownership
    /// mismatch deliberately reports not-found to avoid leaking
    /// existence.
    DecisionNotFound(DecisionId),
    /// Timeline absent under the referenced decision.
    TimelineNotFound(TimelineId),
    /// User does not exist.
    UserNotFound(UserId),
    /// Invalid command input.
    Validation(ValidationError),
    /// The child decision was persisted but generation failed.
    GenerationFailed {
        /// Id of the child decision that remains queryable.
        decision_id: DecisionId,
        source: GenerationError,
    },
    /// Store failure.
    Storage(DomainError),
}

impl std::fmt::Display for InjectDecisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InjectDecisionError::DecisionNotFound(id) => write!(f, "Decision not found: {}", id),
            InjectDecisionError::TimelineNotFound(id) => write!(f, "Timeline not found: {}", id),
            InjectDecisionError::UserNotFound(id) => write!(f, "User not found: {}", id),
            InjectDecisionError::Validation(err) => write!(f, "{}", err),
            InjectDecisionError::GenerationFailed { decision_id, source } => write!(
                f,
                "Timeline generation failed for decision {}: {}",
                decision_id, source
            ),
            InjectDecisionError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for InjectDecisionError {}

impl From<ValidationError> for InjectDecisionError {
    fn from(err: ValidationError) -> Self {
        InjectDecisionError::Validation(err)
    }
}

impl From<DomainError> for InjectDecisionError {
    fn from(err: DomainError) -> Self {
        InjectDecisionError::Storage(err)
    }
}

/// Handler for injecting follow-up decisions.
pub struct InjectDecisionHandler {
    profile_reader: Arc<dyn ProfileReader>,
    decision_repository: Arc<dyn DecisionRepository>,
    timeline_repository: Arc<dyn TimelineRepository>,
    generator: Arc<TimelineGenerator>,
}

impl InjectDecisionHandler {
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
        cmd: InjectDecisionCommand,
    ) -> Result<InjectDecisionResult, InjectDecisionError> {
        // 1. Verify the decision exists and is owned by the caller
        let original = self
            .decision_repository
            .find_by_id_for_user(&cmd.decision_id, &cmd.user_id)
            .await?
            .ok_or(InjectDecisionError::DecisionNotFound(cmd.decision_id))?;

        // 2. Verify the timeline belongs to that decision
        let timeline = self
            .timeline_repository
            .find_by_id_for_decision(&cmd.timeline_id, &cmd.decision_id)
            .await?
            .ok_or(InjectDecisionError::TimelineNotFound(cmd.timeline_id))?;

        // 3. Load the profile snapshot
        let profile = self
            .profile_reader
            .get_profile(&cmd.user_id)
            .await?
            .ok_or_else(|| InjectDecisionError::UserNotFound(cmd.user_id.clone()))?;

        // 4. Persist the child decision; it survives a failed generation,
        //    the same partial-success policy as decision creation
        let child = Decision::branch(&original, cmd.user_id, cmd.content.clone())?;
        self.decision_repository.save(&child).await?;

        // 5. Generate with the causal-frame prompt and one hop of context
        let request = GenerationRequest {
            decision_text: cmd.content,
            profile,
            prior_decisions: vec![original.summary()],
            kind: GenerationKind::Injection {
                parent_content: original.content().to_string(),
            },
        };
        let timelines = match self.generator.generate(child.id(), &request).await {
            Ok(timelines) => timelines,
            Err(source) => {
                warn!(decision_id = %child.id(), error = %source, "timeline generation failed");
                return Err(InjectDecisionError::GenerationFailed {
                    decision_id: child.id(),
                    source,
                });
            }
        };

        // 6. Persist each timeline with its events as one unit
        for generated in &timelines {
            self.timeline_repository
                .save(generated)
                .await
                .map_err(|e| e.with_detail("decision_id", child.id().to_string()))?;
        }

        Ok(InjectDecisionResult {
            decision: child,
            timelines,
            parent_decision_id: original.id(),
            parent_timeline_id: timeline.id(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockTextGenerator;
    use crate::adapters::storage::{
        InMemoryDecisionStore, InMemoryProfileStore, InMemoryTimelineStore,
    };
    use crate::domain::decision::{Impact, TimelineEvent, TimelineMetric, TimelineMetrics, Trend};
    use crate::domain::user::{RiskTolerance, UserProfile};
    use crate::ports::{GeneratorError, TextGenerator};

    // ─────────────────────────────────────────────────────────────────────
    // Test helpers
    // ─────────────────────────────────────────────────────────────────────

    fn valid_payload() -> String {
        r#"{
            "timelines": [{
                "title": "Adjusted Path",
                "summary": "The move changes things.",
                "probability": 45,
                "metrics": {
                    "emotional": { "score": 65, "trend": "up" },
                    "financial": { "score": 40, "trend": "down" },
                    "career": { "score": 70, "trend": "up" },
                    "relationships": { "score": 55, "trend": "stable" },
                    "risk": { "score": 80, "trend": "up" }
                },
                "events": [
                    { "period": "3 months", "description": "Relocate", "impact": "neutral" }
                ],
                "tradeoffs": ["Leaving your network"],
                "secondOrderEffects": ["New city, new opportunities"]
            }]
        }"#
        .to_string()
    }

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

    struct Fixture {
        profiles: Arc<InMemoryProfileStore>,
        decisions: Arc<InMemoryDecisionStore>,
        timelines: Arc<InMemoryTimelineStore>,
        user_id: UserId,
        original: Decision,
        timeline: Timeline,
    }

    impl Fixture {
        async fn new() -> Self {
            let profiles = Arc::new(InMemoryProfileStore::new());
            let decisions = Arc::new(InMemoryDecisionStore::new());
            let timelines = Arc::new(InMemoryTimelineStore::new());

            let user_id = UserId::new("user-1").unwrap();
            profiles
                .insert(
                    user_id.clone(),
                    UserProfile::new(RiskTolerance::High, vec!["Career Growth".to_string()]),
                )
                .await;

            let original = Decision::new(
                user_id.clone(),
                "Quit my job to start a startup",
                None,
                None,
            )
            .unwrap();
            decisions.save(&original).await.unwrap();

            let timeline = Timeline::new(
                original.id(),
                "The Bold Leap",
                "You go all in.",
                40.0,
                metrics(),
                vec![],
                vec![],
                vec![TimelineEvent::new(0, "3 months", "Notice", Impact::Neutral)],
            );
            timelines.save(&timeline).await.unwrap();

            Self {
                profiles,
                decisions,
                timelines,
                user_id,
                original,
                timeline,
            }
        }

        fn handler(&self, tiers: Vec<Arc<dyn TextGenerator>>) -> InjectDecisionHandler {
            InjectDecisionHandler::new(
                self.profiles.clone(),
                self.decisions.clone(),
                self.timelines.clone(),
                Arc::new(TimelineGenerator::new(tiers)),
            )
        }

        fn command(&self, content: &str) -> InjectDecisionCommand {
            InjectDecisionCommand {
                decision_id: self.original.id(),
                timeline_id: self.timeline.id(),
                content: content.to_string(),
                user_id: self.user_id.clone(),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn creates_child_with_parent_lineage() {
        let fixture = Fixture::new().await;
        let tier = Arc::new(MockTextGenerator::new("tier-a").with_response(valid_payload()));
        let handler = fixture.handler(vec![tier as Arc<dyn TextGenerator>]);

        let result = handler
            .handle(fixture.command("What if I also moved to a new city?"))
            .await
            .unwrap();

        assert_eq!(
            result.decision.parent_decision_id(),
            Some(fixture.original.id())
        );
        assert_eq!(result.parent_decision_id, fixture.original.id());
        assert_eq!(result.parent_timeline_id, fixture.timeline.id());
        assert_eq!(result.timelines.len(), 1);
        assert_eq!(result.timelines[0].decision_id(), result.decision.id());
    }

    #[tokio::test]
    async fn prompt_uses_causal_frame_and_one_hop_of_context() {
        let fixture = Fixture::new().await;
        let tier = Arc::new(MockTextGenerator::new("tier-a").with_response(valid_payload()));
        let handler = fixture.handler(vec![tier.clone() as Arc<dyn TextGenerator>]);

        handler
            .handle(fixture.command("move to a new city"))
            .await
            .unwrap();

        let prompt = &tier.prompts()[0];
        assert!(prompt.text.contains(
            "Following my previous decision to \"Quit my job to start a startup\", \
             I now want to: move to a new city"
        ));
        assert!(prompt.text.contains("1. Quit my job to start a startup"));
        assert!((prompt.sampling.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn foreign_decision_reports_not_found() {
        let fixture = Fixture::new().await;
        let tier = Arc::new(MockTextGenerator::new("tier-a").with_response(valid_payload()));
        let handler = fixture.handler(vec![tier as Arc<dyn TextGenerator>]);

        let mut cmd = fixture.command("move");
        cmd.user_id = UserId::new("someone-else").unwrap();
        let result = handler.handle(cmd).await;

        // Ownership mismatch is indistinguishable from absence.
        assert!(matches!(
            result,
            Err(InjectDecisionError::DecisionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn unknown_timeline_reports_not_found() {
        let fixture = Fixture::new().await;
        let tier = Arc::new(MockTextGenerator::new("tier-a").with_response(valid_payload()));
        let handler = fixture.handler(vec![tier as Arc<dyn TextGenerator>]);

        let mut cmd = fixture.command("move");
        cmd.timeline_id = TimelineId::new();
        let result = handler.handle(cmd).await;

        assert!(matches!(
            result,
            Err(InjectDecisionError::TimelineNotFound(_))
        ));
    }

    #[tokio::test]
    async fn generation_failure_keeps_child_decision() {
        let fixture = Fixture::new().await;
        let tier = Arc::new(
            MockTextGenerator::new("tier-a").with_error(GeneratorError::unavailable("down")),
        );
        let handler = fixture.handler(vec![tier as Arc<dyn TextGenerator>]);

        let result = handler.handle(fixture.command("move")).await;

        let decision_id = match result {
            Err(InjectDecisionError::GenerationFailed { decision_id, .. }) => decision_id,
            other => panic!("expected GenerationFailed, got {:?}", other.is_ok()),
        };

        // Same partial-success policy as creation: the child stays.
        let child = fixture
            .decisions
            .find_by_id_for_user(&decision_id, &fixture.user_id)
            .await
            .unwrap()
            .expect("child decision should be persisted");
        assert_eq!(child.parent_decision_id(), Some(fixture.original.id()));
        assert!(fixture
            .timelines
            .find_by_decision(&decision_id)
            .await
            .unwrap()
            .is_empty());
    }
}
