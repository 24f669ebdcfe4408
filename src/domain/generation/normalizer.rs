//! Timeline normalization.
//!
//! Maps a validated generation result into persistable timeline
//! aggregates: identities and timestamps are assigned, event order is
//! derived from source position, and probabilities are clamped into
//! range. No deduplication and no cross-timeline consistency is
//! enforced; in particular, probabilities across a set are not
//! renormalized to sum to 100.

use crate::domain::decision::{Timeline, TimelineEvent};
use crate::domain::foundation::DecisionId;

use super::extractor::GenerationResult;

/// Normalizes a generation result into timelines owned by `decision_id`.
///
/// Event order is the zero-based position in the source sequence; any
/// order-like field the model emitted was already discarded at
/// extraction and plays no part here.
pub fn normalize(result: GenerationResult, decision_id: DecisionId) -> Vec<Timeline> {
    result
        .timelines
        .into_iter()
        .map(|generated| {
            let events = generated
                .events
                .into_iter()
                .enumerate()
                .map(|(position, event)| {
                    TimelineEvent::new(
                        position as u32,
                        event.period,
                        event.description,
                        event.impact,
                    )
                })
                .collect();

            Timeline::new(
                decision_id,
                generated.title,
                generated.summary,
                generated.probability.clamp(0.0, 100.0),
                generated.metrics,
                generated.tradeoffs,
                generated.second_order_effects,
                events,
            )
        })
        .collect()
}
