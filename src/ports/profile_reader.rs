//! Profile Reader Port - read access to the user-account aggregate.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::UserProfile;

/// Port for reading user profile snapshots.
///
/// The profile is owned by the account aggregate; the generation core
/// only ever reads it, and reads happen before any write in a request.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Returns the profile snapshot for a user, or None if the user
    /// does not exist.
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError>;
}
