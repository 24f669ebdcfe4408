//! Decision handlers - the operations exposed to boundary layers.
//!
//! - `CreateDecisionHandler` - create a decision and generate timelines
//! - `InjectDecisionHandler` - branch a follow-up decision off a timeline
//! - `GetDecisionHandler` - fetch one decision with its timelines
//! - `ListDecisionsHandler` - list a user's decisions with summaries
//! - `GetTimelineHandler` - fetch one timeline with its events

mod create_decision;
mod get_decision;
mod get_timeline;
mod inject_decision;
mod list_decisions;

pub use create_decision::{
    CreateDecisionCommand, CreateDecisionError, CreateDecisionHandler, CreateDecisionResult,
};
pub use get_decision::{GetDecisionError, GetDecisionHandler, GetDecisionQuery, GetDecisionResult};
pub use get_timeline::{
    GetTimelineError, GetTimelineHandler, GetTimelineQuery, GetTimelineResult,
};
pub use inject_decision::{
    InjectDecisionCommand, InjectDecisionError, InjectDecisionHandler, InjectDecisionResult,
};
pub use list_decisions::{
    DecisionOverview, ListDecisionsError, ListDecisionsHandler, ListDecisionsQuery,
    TimelineSummary,
};
