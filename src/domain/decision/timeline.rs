//! Timeline aggregate - One simulated future outcome for a Decision.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    DecisionId, Timestamp, TimelineEventId, TimelineId, ValidationError,
};

/// Direction a metric is heading over the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Stable,
    Down,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Stable => write!(f, "stable"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Whether an event helps, hurts, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Neutral => write!(f, "neutral"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// The five metric dimensions every timeline must score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricDimension {
    Emotional,
    Financial,
    Career,
    Relationships,
    Risk,
}

impl MetricDimension {
    /// All dimensions, in canonical order.
    pub fn all() -> [MetricDimension; 5] {
        [
            Self::Emotional,
            Self::Financial,
            Self::Career,
            Self::Relationships,
            Self::Risk,
        ]
    }

    /// The JSON key used for this dimension in model output and storage.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Emotional => "emotional",
            Self::Financial => "financial",
            Self::Career => "career",
            Self::Relationships => "relationships",
            Self::Risk => "risk",
        }
    }
}

impl fmt::Display for MetricDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A scored dimension with its trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineMetric {
    /// Score on a 0-100 scale.
    pub score: u8,
    /// Direction the dimension is heading.
    pub trend: Trend,
}

impl TimelineMetric {
    /// Creates a metric, returning error if the score exceeds 100.
    pub fn try_new(score: u8, trend: Trend) -> Result<Self, ValidationError> {
        if score > 100 {
            return Err(ValidationError::out_of_range("score", 0, 100, score as i64));
        }
        Ok(Self { score, trend })
    }
}

/// The complete five-dimension metric set. All dimensions are mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineMetrics {
    pub emotional: TimelineMetric,
    pub financial: TimelineMetric,
    pub career: TimelineMetric,
    pub relationships: TimelineMetric,
    pub risk: TimelineMetric,
}

impl TimelineMetrics {
    /// Returns the metric for a dimension.
    pub fn get(&self, dimension: MetricDimension) -> TimelineMetric {
        match dimension {
            MetricDimension::Emotional => self.emotional,
            MetricDimension::Financial => self.financial,
            MetricDimension::Career => self.career,
            MetricDimension::Relationships => self.relationships,
            MetricDimension::Risk => self.risk,
        }
    }
}

/// A key event within a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    id: TimelineEventId,
    /// Zero-based chronological position within the timeline.
    order: u32,
    /// Free-text time marker, e.g. "3 months".
    period: String,
    description: String,
    impact: Impact,
}

impl TimelineEvent {
    /// Creates an event at the given chronological position.
    pub fn new(order: u32, period: impl Into<String>, description: impl Into<String>, impact: Impact) -> Self {
        Self {
            id: TimelineEventId::new(),
            order,
            period: period.into(),
            description: description.into(),
            impact,
        }
    }

    /// Returns the event ID.
    pub fn id(&self) -> TimelineEventId {
        self.id
    }

    /// Returns the zero-based chronological position.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Returns the free-text time marker.
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Returns the event description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the event impact.
    pub fn impact(&self) -> Impact {
        self.impact
    }
}

/// The Timeline aggregate root.
///
/// A Timeline belongs to exactly one Decision and is immutable after
/// creation; there is no update path.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    id: TimelineId,
    decision_id: DecisionId,
    title: String,
    summary: String,
    /// Likelihood of this outcome, 0-100.
    probability: f64,
    metrics: TimelineMetrics,
    tradeoffs: Vec<String>,
    second_order_effects: Vec<String>,
    events: Vec<TimelineEvent>,
    created_at: Timestamp,
}

impl Timeline {
    /// Creates a new timeline under a decision.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        decision_id: DecisionId,
        title: impl Into<String>,
        summary: impl Into<String>,
        probability: f64,
        metrics: TimelineMetrics,
        tradeoffs: Vec<String>,
        second_order_effects: Vec<String>,
        events: Vec<TimelineEvent>,
    ) -> Self {
        Self {
            id: TimelineId::new(),
            decision_id,
            title: title.into(),
            summary: summary.into(),
            probability,
            metrics,
            tradeoffs,
            second_order_effects,
            events,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitutes a timeline from persisted data.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TimelineId,
        decision_id: DecisionId,
        title: String,
        summary: String,
        probability: f64,
        metrics: TimelineMetrics,
        tradeoffs: Vec<String>,
        second_order_effects: Vec<String>,
        events: Vec<TimelineEvent>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            decision_id,
            title,
            summary,
            probability,
            metrics,
            tradeoffs,
            second_order_effects,
            events,
            created_at,
        }
    }

    /// Returns the timeline ID.
    pub fn id(&self) -> TimelineId {
        self.id
    }

    /// Returns the owning decision ID.
    pub fn decision_id(&self) -> DecisionId {
        self.decision_id
    }

    /// Returns the timeline title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the timeline summary.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the outcome probability (0-100).
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Returns the five-dimension metric set.
    pub fn metrics(&self) -> &TimelineMetrics {
        &self.metrics
    }

    /// Returns the trade-offs of this path.
    pub fn tradeoffs(&self) -> &[String] {
        &self.tradeoffs
    }

    /// Returns the second-order effects of this path.
    pub fn second_order_effects(&self) -> &[String] {
        &self.second_order_effects
    }

    /// Returns the events in chronological order.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Returns when this timeline was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(score: u8, trend: Trend) -> TimelineMetric {
        TimelineMetric::try_new(score, trend).unwrap()
    }

    fn test_metrics() -> TimelineMetrics {
        TimelineMetrics {
            emotional: metric(70, Trend::Up),
            financial: metric(40, Trend::Down),
            career: metric(80, Trend::Up),
            relationships: metric(60, Trend::Stable),
            risk: metric(75, Trend::Up),
        }
    }

    #[test]
    fn metric_rejects_score_over_100() {
        let result = TimelineMetric::try_new(101, Trend::Up);
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn metric_accepts_boundary_scores() {
        assert!(TimelineMetric::try_new(0, Trend::Down).is_ok());
        assert!(TimelineMetric::try_new(100, Trend::Up).is_ok());
    }

    #[test]
    fn metrics_get_returns_each_dimension() {
        let metrics = test_metrics();
        assert_eq!(metrics.get(MetricDimension::Emotional).score, 70);
        assert_eq!(metrics.get(MetricDimension::Financial).score, 40);
        assert_eq!(metrics.get(MetricDimension::Career).score, 80);
        assert_eq!(metrics.get(MetricDimension::Relationships).score, 60);
        assert_eq!(metrics.get(MetricDimension::Risk).score, 75);
    }

    #[test]
    fn dimension_keys_match_wire_names() {
        let keys: Vec<&str> = MetricDimension::all().iter().map(|d| d.key()).collect();
        assert_eq!(
            keys,
            vec!["emotional", "financial", "career", "relationships", "risk"]
        );
    }

    #[test]
    fn trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&Impact::Negative).unwrap(), "\"negative\"");
    }

    #[test]
    fn timeline_preserves_event_order() {
        let decision_id = DecisionId::new();
        let events = vec![
            TimelineEvent::new(0, "3 months", "Hand in notice", Impact::Neutral),
            TimelineEvent::new(1, "6 months", "First customer", Impact::Positive),
            TimelineEvent::new(2, "1 year", "Runway gets tight", Impact::Negative),
        ];

        let timeline = Timeline::new(
            decision_id,
            "The Bold Leap",
            "You quit and go all in.",
            35.0,
            test_metrics(),
            vec!["Stability for upside".to_string()],
            vec!["Network expands rapidly".to_string()],
            events,
        );

        assert_eq!(timeline.decision_id(), decision_id);
        let orders: Vec<u32> = timeline.events().iter().map(|e| e.order()).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }
}
