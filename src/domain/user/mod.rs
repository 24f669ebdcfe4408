//! User module - profile snapshot used for generation context.

mod profile;

pub use profile::{RiskTolerance, UserProfile, MAX_PRIORITIES};
