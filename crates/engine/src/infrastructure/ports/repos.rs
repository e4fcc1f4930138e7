//! Repository port traits for database access.

use async_trait::async_trait;
use socialsim_domain::{InteractionLog, UserId};

use super::error::RepoError;

// =============================================================================
// Interaction Logs
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionLogRepo: Send + Sync {
    async fn save(&self, log: &InteractionLog) -> Result<(), RepoError>;
    /// All logs for a user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<InteractionLog>, RepoError>;
}
