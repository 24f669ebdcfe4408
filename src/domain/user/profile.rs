//! User profile snapshot for generation context.
//!
//! The profile is owned by the user-account aggregate; the generation
//! pipeline only consumes an immutable snapshot of it, taken at
//! generation time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of priorities carried into generation context.
pub const MAX_PRIORITIES: usize = 5;

/// How much uncertainty the user is willing to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl Default for RiskTolerance {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Immutable snapshot of a user's profile at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Risk tolerance classification.
    pub risk_tolerance: RiskTolerance,
    /// Ordered priorities, most important first (at most [`MAX_PRIORITIES`]).
    pub priorities: Vec<String>,
    /// Free-text description of the user's current situation.
    pub current_situation: Option<String>,
}

impl UserProfile {
    /// Creates a profile snapshot, truncating priorities to the cap.
    pub fn new(risk_tolerance: RiskTolerance, priorities: Vec<String>) -> Self {
        let mut priorities = priorities;
        priorities.truncate(MAX_PRIORITIES);
        Self {
            risk_tolerance,
            priorities,
            current_situation: None,
        }
    }

    /// Sets the current situation text.
    pub fn with_situation(mut self, situation: impl Into<String>) -> Self {
        self.current_situation = Some(situation.into());
        self
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new(RiskTolerance::default(), Vec::new())
    }
}
