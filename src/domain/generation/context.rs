//! Profile context rendering for prompt injection.

use crate::domain::user::UserProfile;

/// Marker used when a profile field carries no information.
const NOT_SPECIFIED: &str = "Not specified";

/// Renders a profile snapshot into the context block of a prompt.
///
/// Total and deterministic: identical profiles always render to the
/// identical string, and no profile can fail to render.
pub fn render_profile_context(profile: &UserProfile) -> String {
    let priorities = if profile.priorities.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        profile.priorities.join(", ")
    };

    let situation = profile
        .current_situation
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NOT_SPECIFIED);

    format!(
        "User Profile:\n\
         - Risk Tolerance: {}\n\
         - Priorities: {}\n\
         - Current Situation: {}",
        profile.risk_tolerance, priorities, situation
    )
}
