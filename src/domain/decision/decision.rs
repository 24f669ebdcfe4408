//! Decision aggregate - A user-submitted choice under consideration.

use serde_json::{Map, Value};

use crate::domain::foundation::{DecisionId, Timestamp, UserId, ValidationError};

/// The Decision aggregate root.
///
/// Write-once: a Decision is constructed via [`Decision::new`] (root) or
/// [`Decision::branch`] (injection child) and never updated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    id: DecisionId,
    user_id: UserId,
    content: String,
    category: Option<String>,
    context: Option<Map<String, Value>>,
    parent_decision_id: Option<DecisionId>,
    created_at: Timestamp,
}

impl Decision {
    /// Creates a new root decision (no parent).
    pub fn new(
        user_id: UserId,
        content: impl Into<String>,
        category: Option<String>,
        context: Option<Map<String, Value>>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }

        Ok(Self {
            id: DecisionId::new(),
            user_id,
            content,
            category,
            context,
            parent_decision_id: None,
            created_at: Timestamp::now(),
        })
    }

    /// Creates a child decision branching off an existing one.
    ///
    /// The parent must already exist, which makes lineage cycles
    /// structurally impossible.
    pub fn branch(
        parent: &Decision,
        user_id: UserId,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }

        Ok(Self {
            id: DecisionId::new(),
            user_id,
            content,
            category: None,
            context: None,
            parent_decision_id: Some(parent.id()),
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a decision from persisted data.
    pub fn reconstitute(
        id: DecisionId,
        user_id: UserId,
        content: String,
        category: Option<String>,
        context: Option<Map<String, Value>>,
        parent_decision_id: Option<DecisionId>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            content,
            category,
            context,
            parent_decision_id,
            created_at,
        }
    }

    /// Returns the decision ID.
    pub fn id(&self) -> DecisionId {
        self.id
    }

    /// Returns the owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the decision text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the optional category.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the optional free-form context map.
    pub fn context(&self) -> Option<&Map<String, Value>> {
        self.context.as_ref()
    }

    /// Returns the parent decision ID if this was created via injection.
    pub fn parent_decision_id(&self) -> Option<DecisionId> {
        self.parent_decision_id
    }

    /// Returns true if this decision branches off another.
    pub fn is_branch(&self) -> bool {
        self.parent_decision_id.is_some()
    }

    /// Returns when this decision was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Projects this decision into the summary used for prompt context.
    pub fn summary(&self) -> DecisionSummary {
        DecisionSummary {
            content: self.content.clone(),
            category: self.category.clone(),
        }
    }
}

/// Lightweight projection of a prior decision for prompt context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionSummary {
    /// The decision text.
    pub content: String,
    /// Optional category label.
    pub category: Option<String>,
}

impl DecisionSummary {
    /// Creates a new summary.
    pub fn new(content: impl Into<String>, category: Option<String>) -> Self {
        Self {
            content: content.into(),
            category,
        }
    }
}
