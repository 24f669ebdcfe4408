//! Integration tests for the timeline generation flows.
//!
//! These tests verify the end-to-end paths:
//! 1. Create a decision and persist generated timelines
//! 2. Inject a follow-up decision into a timeline (parent/child lineage)
//! 3. Degrade through the model tier chain and surface typed failures
//!
//! Uses in-memory stores and mock generators to exercise the pipeline
//! without external dependencies.

use std::sync::Arc;

use futurecast::adapters::ai::MockTextGenerator;
use futurecast::adapters::storage::{
    InMemoryDecisionStore, InMemoryProfileStore, InMemoryTimelineStore,
};
use futurecast::application::handlers::decision::{
    CreateDecisionCommand, CreateDecisionError, CreateDecisionHandler, GetDecisionHandler,
    GetDecisionQuery, InjectDecisionCommand, InjectDecisionHandler,
};
use futurecast::application::{GenerationError, TimelineGenerator};
use futurecast::domain::foundation::UserId;
use futurecast::domain::user::{RiskTolerance, UserProfile};
use futurecast::ports::{GeneratorError, TextGenerator};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    profiles: Arc<InMemoryProfileStore>,
    decisions: Arc<InMemoryDecisionStore>,
    timelines: Arc<InMemoryTimelineStore>,
    user_id: UserId,
}

impl TestApp {
    async fn new() -> Self {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let user_id = UserId::new("user-1").unwrap();
        profiles
            .insert(
                user_id.clone(),
                UserProfile::new(RiskTolerance::High, vec!["Career Growth".to_string()])
                    .with_situation("28yo engineer"),
            )
            .await;

        Self {
            profiles,
            decisions: Arc::new(InMemoryDecisionStore::new()),
            timelines: Arc::new(InMemoryTimelineStore::new()),
            user_id,
        }
    }

    fn create_handler(&self, tiers: Vec<Arc<dyn TextGenerator>>) -> CreateDecisionHandler {
        CreateDecisionHandler::new(
            self.profiles.clone(),
            self.decisions.clone(),
            self.timelines.clone(),
            Arc::new(TimelineGenerator::new(tiers)),
        )
    }

    fn inject_handler(&self, tiers: Vec<Arc<dyn TextGenerator>>) -> InjectDecisionHandler {
        InjectDecisionHandler::new(
            self.profiles.clone(),
            self.decisions.clone(),
            self.timelines.clone(),
            Arc::new(TimelineGenerator::new(tiers)),
        )
    }

    fn get_handler(&self) -> GetDecisionHandler {
        GetDecisionHandler::new(self.decisions.clone(), self.timelines.clone())
    }
}

fn timeline_json(title: &str, probability: u32) -> String {
    format!(
        r#"{{
            "title": "{}",
            "summary": "A plausible path with clear trade-offs.",
            "probability": {},
            "metrics": {{
                "emotional": {{ "score": 70, "trend": "up" }},
                "financial": {{ "score": 45, "trend": "down" }},
                "career": {{ "score": 80, "trend": "up" }},
                "relationships": {{ "score": 60, "trend": "stable" }},
                "risk": {{ "score": 75, "trend": "up" }}
            }},
            "events": [
                {{ "period": "3 months", "description": "Hand in notice", "impact": "neutral" }},
                {{ "period": "6 months", "description": "First customer", "impact": "positive" }},
                {{ "period": "1 year", "description": "Runway tightens", "impact": "negative" }},
                {{ "period": "2 years", "description": "Break even", "impact": "positive" }}
            ],
            "tradeoffs": ["Stability for upside"],
            "secondOrderEffects": ["Your network shifts toward founders"]
        }}"#,
        title, probability
    )
}

fn three_timeline_payload() -> String {
    format!(
        r#"{{ "timelines": [{}, {}, {}] }}"#,
        timeline_json("The Bold Leap", 35),
        timeline_json("Safe Harbor", 45),
        timeline_json("The Balanced Path", 20)
    )
}

// =============================================================================
// Create decision flow
// =============================================================================

#[tokio::test]
async fn create_decision_persists_three_timelines_from_fenced_output() {
    let app = TestApp::new().await;

    // Backend wraps its JSON in a fenced block; extraction must recover it.
    let fenced = format!("```json\n{}\n```", three_timeline_payload());
    let tier = Arc::new(MockTextGenerator::new("gemini-3-pro-preview").with_response(fenced));
    let handler = app.create_handler(vec![tier as Arc<dyn TextGenerator>]);

    let result = handler
        .handle(CreateDecisionCommand {
            user_id: app.user_id.clone(),
            content: "Should I quit my job to start a startup?".to_string(),
            category: None,
            context: None,
        })
        .await
        .unwrap();

    assert!(result.decision.parent_decision_id().is_none());
    assert_eq!(result.timelines.len(), 3);
    for timeline in &result.timelines {
        assert!(!timeline.events().is_empty());
        assert_eq!(timeline.metrics().emotional.score, 70);
    }

    // Persisted state matches the returned payload.
    assert_eq!(app.timelines.count().await, 3);
    let fetched = app
        .get_handler()
        .handle(GetDecisionQuery {
            decision_id: result.decision.id(),
            user_id: app.user_id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(fetched.timelines.len(), 3);
}

#[tokio::test]
async fn fetching_a_decision_twice_returns_identical_timeline_sets() {
    let app = TestApp::new().await;
    let tier = Arc::new(
        MockTextGenerator::new("gemini-3-pro-preview").with_response(three_timeline_payload()),
    );
    let handler = app.create_handler(vec![tier as Arc<dyn TextGenerator>]);

    let created = handler
        .handle(CreateDecisionCommand {
            user_id: app.user_id.clone(),
            content: "Should I move abroad?".to_string(),
            category: None,
            context: None,
        })
        .await
        .unwrap();

    let query = GetDecisionQuery {
        decision_id: created.decision.id(),
        user_id: app.user_id.clone(),
    };
    let first = app.get_handler().handle(query.clone()).await.unwrap();
    let second = app.get_handler().handle(query).await.unwrap();

    assert_eq!(first.timelines, second.timelines);
    let titles: Vec<&str> = first.timelines.iter().map(|t| t.title()).collect();
    assert_eq!(titles, vec!["The Bold Leap", "Safe Harbor", "The Balanced Path"]);
}

// =============================================================================
// Tier fallback
// =============================================================================

#[tokio::test]
async fn saturated_primary_tier_falls_back_and_succeeds() {
    let app = TestApp::new().await;

    let primary = Arc::new(
        MockTextGenerator::new("gemini-3-pro-preview")
            .with_error(GeneratorError::rate_limited(30)),
    );
    let secondary = Arc::new(
        MockTextGenerator::new("gemini-3-flash-preview")
            .with_response(three_timeline_payload()),
    );
    let tertiary = Arc::new(
        MockTextGenerator::new("gemini-2.5-flash").with_response(three_timeline_payload()),
    );

    let handler = app.create_handler(vec![
        primary.clone() as Arc<dyn TextGenerator>,
        secondary.clone(),
        tertiary.clone(),
    ]);

    let result = handler
        .handle(CreateDecisionCommand {
            user_id: app.user_id.clone(),
            content: "Quit?".to_string(),
            category: None,
            context: None,
        })
        .await
        .unwrap();

    assert_eq!(result.timelines.len(), 3);
    assert_eq!(primary.call_count(), 1);
    assert_eq!(secondary.call_count(), 1);
    // First success wins; the last tier is never consulted.
    assert_eq!(tertiary.call_count(), 0);
}

#[tokio::test]
async fn all_tiers_down_keeps_decision_with_zero_timelines() {
    let app = TestApp::new().await;

    let tiers: Vec<Arc<dyn TextGenerator>> = ["pro", "flash", "lite"]
        .into_iter()
        .map(|name| {
            Arc::new(
                MockTextGenerator::new(name)
                    .with_error(GeneratorError::unavailable("overloaded")),
            ) as Arc<dyn TextGenerator>
        })
        .collect();
    let handler = app.create_handler(tiers);

    let result = handler
        .handle(CreateDecisionCommand {
            user_id: app.user_id.clone(),
            content: "Quit?".to_string(),
            category: None,
            context: None,
        })
        .await;

    let decision_id = match result {
        Err(CreateDecisionError::GenerationFailed { decision_id, source }) => {
            match source {
                GenerationError::Unavailable { attempts } => assert_eq!(attempts.len(), 3),
                other => panic!("expected Unavailable, got {}", other),
            }
            decision_id
        }
        _ => panic!("expected GenerationFailed"),
    };

    // Chosen partial-success policy: the decision record survives.
    let fetched = app
        .get_handler()
        .handle(GetDecisionQuery {
            decision_id,
            user_id: app.user_id.clone(),
        })
        .await
        .unwrap();
    assert!(fetched.timelines.is_empty());
}

// =============================================================================
// Injection flow
// =============================================================================

#[tokio::test]
async fn injection_creates_child_decision_with_lineage() {
    let app = TestApp::new().await;

    let tier = Arc::new(
        MockTextGenerator::new("gemini-3-pro-preview").with_response(three_timeline_payload()),
    );
    let created = app
        .create_handler(vec![tier as Arc<dyn TextGenerator>])
        .handle(CreateDecisionCommand {
            user_id: app.user_id.clone(),
            content: "Should I quit my job to start a startup?".to_string(),
            category: None,
            context: None,
        })
        .await
        .unwrap();

    let branched_timeline = created.timelines[0].id();

    let inject_tier = Arc::new(
        MockTextGenerator::new("gemini-3-pro-preview").with_response(three_timeline_payload()),
    );
    let result = app
        .inject_handler(vec![inject_tier.clone() as Arc<dyn TextGenerator>])
        .handle(InjectDecisionCommand {
            decision_id: created.decision.id(),
            timeline_id: branched_timeline,
            content: "What if I also moved to a new city?".to_string(),
            user_id: app.user_id.clone(),
        })
        .await
        .unwrap();

    assert_eq!(
        result.decision.parent_decision_id(),
        Some(created.decision.id())
    );
    assert_eq!(result.parent_decision_id, created.decision.id());
    assert_eq!(result.parent_timeline_id, branched_timeline);
    assert_eq!(result.timelines.len(), 3);

    // The injection prompt conditions on the original decision.
    let prompt = &inject_tier.prompts()[0];
    assert!(prompt.text.contains(
        "Following my previous decision to \"Should I quit my job to start a startup?\""
    ));

    // Parent and child each keep their own timeline sets.
    assert_eq!(app.timelines.count().await, 6);
}
