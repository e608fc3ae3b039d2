//! Store abstraction shared by the Postgres and in-memory backends

use async_trait::async_trait;
use civicsense_core::{CivicScores, ScoreDeltas, UserRecord};

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("user store is not connected")]
    Unavailable,

    #[error("user '{0}' already exists")]
    Duplicate(String),

    #[error("stored user '{user_id}' is invalid: {reason}")]
    Corrupt { user_id: String, reason: String },
}

/// Access to the `users` collection
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a newly registered user.
    async fn insert(&self, user: &UserRecord) -> Result<(), StoreError>;

    /// Load a user by id.
    async fn find(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Write back age, level and re-evaluation timestamp.
    ///
    /// Returns false if the user no longer exists.
    async fn update_level(&self, user: &UserRecord) -> Result<bool, StoreError>;

    /// Atomically add `deltas` to the user's scores and return the new totals.
    ///
    /// Returns `None` if the user does not exist.
    async fn increment_scores(
        &self,
        user_id: &str,
        deltas: &ScoreDeltas,
    ) -> Result<Option<CivicScores>, StoreError>;
}
