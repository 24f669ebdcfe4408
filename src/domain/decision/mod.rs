//! Decision module - the Decision aggregate and its Timelines.
//!
//! A Decision is created once and never mutated. It owns zero or more
//! Timelines; corrections happen by generating new Timelines under a
//! new or child Decision. Lineage forms a forest: each Decision has at
//! most one parent, set only for decisions created via injection.

mod decision;
mod timeline;

pub use decision::{Decision, DecisionSummary};
pub use timeline::{
    Impact, MetricDimension, Timeline, TimelineEvent, TimelineMetric, TimelineMetrics, Trend,
};
