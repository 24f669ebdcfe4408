//! Storage adapters.
//!
//! In-memory implementations of the store ports, used for testing and
//! development. A durable backend plugs in behind the same ports.

mod in_memory_decision_store;
mod in_memory_profile_store;
mod in_memory_timeline_store;

pub use in_memory_decision_store::InMemoryDecisionStore;
pub use in_memory_profile_store::InMemoryProfileStore;
pub use in_memory_timeline_store::InMemoryTimelineStore;
